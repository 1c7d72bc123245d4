/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use std::env;
use std::fs;
use std::process::{Command, Output};

fn fixture(subfolder: &str, file: &str) -> String {
	format!("tests/test_data/{}/{}", subfolder, file)
}

fn scratch(name: &str) -> String {
	env::temp_dir()
		.join(format!("stokr-it-{}-{}", std::process::id(), name))
		.to_string_lossy()
		.to_string()
}

fn execute(args: Vec<&str>) -> Output {
	let all_args = [vec!["run", "--"], args].concat();

	Command::new("cargo")
		.args(all_args)
		.output()
		.expect("Failed to execute process")
}

/// Runs against the standard fixture set, with the command and any extra
/// flags appended by the caller.
fn execute_standard(extra: Vec<&str>) -> Output {
	let stock = fixture("standard", "stock.csv");
	let failure = fixture("standard", "failure.csv");
	let success = fixture("standard", "success.csv");

	let mut args: Vec<&str> = vec![
		"--stock",
		stock.as_str(),
		"--failure",
		failure.as_str(),
		"--success",
		success.as_str(),
	];
	args.extend(extra);

	execute(args)
}

#[test]
fn test_project_computes_expected_values() {
	let out = scratch("projected.csv");
	let output = execute_standard(vec![
		"project", "-s", "2024", "-e", "2025", "-o", out.as_str(),
	]);

	assert!(
		output.status.success(),
		"project failed: {}",
		String::from_utf8_lossy(&output.stderr)
	);

	// Warehouse: 500 -> 450, then (450 + 50 manual) * 0.9 = 450.
	// Retail: 1000 -> 900 with half the losses repaired, then a zero
	// failure rate leaves 900 untouched. The 2024 column is created after
	// the existing ones, so it lands last.
	let saved = fs::read_to_string(&out).unwrap();
	assert_eq!(
		saved,
		"Source;2023;2025;2024\nWarehouse;500;450;450\nRetail;1000;900;900\n"
	);

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("Updated stock data saved to"));

	fs::remove_file(&out).unwrap();
}

#[test]
fn test_show_round_trips_a_clean_table() {
	let out = scratch("roundtrip.csv");
	let stock = fixture("standard", "stock.csv");
	let output = execute(vec![
		"show",
		"--kind",
		"stock",
		"--stock",
		stock.as_str(),
		"-o",
		out.as_str(),
	]);

	assert!(
		output.status.success(),
		"show failed: {}",
		String::from_utf8_lossy(&output.stderr)
	);

	assert_eq!(
		fs::read_to_string(&out).unwrap(),
		fs::read_to_string(&stock).unwrap()
	);

	fs::remove_file(&out).unwrap();
}

#[test]
fn test_show_coerces_malformed_cells_to_zero() {
	let out = scratch("coerced.csv");
	let stock = fixture("malformed", "stock.csv");
	let output = execute(vec![
		"show",
		"--kind",
		"stock",
		"--stock",
		stock.as_str(),
		"-o",
		out.as_str(),
	]);

	assert!(output.status.success());
	assert_eq!(
		fs::read_to_string(&out).unwrap(),
		"Source;2023\nAlpha;0\n"
	);

	fs::remove_file(&out).unwrap();
}

#[test]
fn test_project_requires_both_years() {
	let output = execute_standard(vec!["project", "-s", "2024"]);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr)
		.contains("both start and end year"));
}

#[test]
fn test_project_rejects_non_integer_years() {
	let output =
		execute_standard(vec!["project", "-s", "20x4", "-e", "2025"]);
	assert!(!output.status.success());
}

#[test]
fn test_missing_baseline_column_fails() {
	let stock = fixture("nobaseline", "stock.csv");
	let failure = fixture("nobaseline", "failure.csv");
	let success = fixture("nobaseline", "success.csv");

	let output = execute(vec![
		"project",
		"--stock",
		stock.as_str(),
		"--failure",
		failure.as_str(),
		"--success",
		success.as_str(),
		"-s",
		"2024",
		"-e",
		"2024",
	]);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("baseline"));
}

#[test]
fn test_chart_prints_stacked_totals_and_legend() {
	let output = execute_standard(vec!["chart", "-s", "2024", "-e", "2025"]);

	assert!(
		output.status.success(),
		"chart failed: {}",
		String::from_utf8_lossy(&output.stderr)
	);

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("Value change for stock level"));
	// both years total 450 + 900
	assert!(stdout.contains("| 1350"));
	assert!(stdout.contains("Warehouse"));
	assert!(stdout.contains("Retail"));
}

#[test]
fn test_chart_names_every_missing_year() {
	let result = fixture("standard", "result.csv");
	let output = execute(vec![
		"chart",
		"--from",
		result.as_str(),
		"-s",
		"2024",
		"-e",
		"2027",
	]);

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("2026, 2027"));
	assert!(!stderr.contains("2025,"));
}

#[test]
fn test_chart_exports_json_matrix() {
	let out = scratch("chart.json");
	let output = execute_standard(vec![
		"chart", "-s", "2024", "-e", "2025", "--json", out.as_str(),
	]);

	assert!(output.status.success());

	let json = fs::read_to_string(&out).unwrap();
	assert!(json.contains("\"years\""));
	assert!(json.contains("2024"));
	assert!(json.contains("\"totals\""));

	fs::remove_file(&out).unwrap();
}

#[test]
fn test_check_reports_alignment_gaps() {
	let stock = fixture("misaligned", "stock.csv");
	let failure = fixture("misaligned", "failure.csv");
	let success = fixture("misaligned", "success.csv");

	let output = execute(vec![
		"check",
		"--stock",
		stock.as_str(),
		"--failure",
		failure.as_str(),
		"--success",
		success.as_str(),
	]);

	assert!(
		output.status.success(),
		"check failed: {}",
		String::from_utf8_lossy(&output.stderr)
	);

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("stock rows 3-3"));
	assert!(stdout.contains("2026 has failure rates but no success rates"));
	assert!(stdout.contains("Done"));
}
