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
use crate::chart::data::ChartData;
use crate::chart::renderer::ChartRenderer;
use crate::config::config_file::Config;
use crate::parsing::filesystem::Filesystem;
use crate::projection::engine;
use crate::projection::years::{year_matcher, YearRange};
use crate::reports::table_reporter::TableReporter;
use crate::tables::store::{Store, TableKind};
use crate::tables::table::Table;
use anyhow::{anyhow, bail, Error};
use chrono::{Datelike, Local};
use clap::{Parser, ValueEnum};
use regex::Regex;
use std::collections::BTreeSet;

mod chart;
mod config;
mod parsing;
mod projection;
mod reports;
mod tables;

#[derive(Parser)]
#[command(
	name = "stokr",
	version = "1.0",
	about = "Stock level projection tool"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	// -----------
	// -- FLAGS --
	// -----------
	/// Which table the Show command displays
	#[arg(short, long)]
	kind: Option<Kind>,

	/// Path to the stock table
	#[arg(long)]
	stock: Option<String>,

	/// Path to the failure rate table
	#[arg(long)]
	failure: Option<String>,

	/// Path to the success rate table
	#[arg(long)]
	success: Option<String>,

	/// First year of the projection range
	#[arg(short, long)]
	start: Option<u16>,

	/// Last year of the projection range, inclusive
	#[arg(short, long)]
	end: Option<u16>,

	/// Write the resulting table to this path
	#[arg(short, long)]
	out: Option<String>,

	/// Write the prepared chart data to this path as JSON
	#[arg(long)]
	json: Option<String>,

	/// Chart a previously saved projection result instead of recomputing
	#[arg(long)]
	from: Option<String>,

	/// Chart width in characters
	#[arg(short, long)]
	width: Option<usize>,

	/// Maximum amount of decimal places to show for any displayed value
	#[arg(short, long)]
	precision: Option<usize>,

	/// Custom config file location (default: ~/.config/stokr/config.toml)
	#[arg(long)]
	config: Option<String>,
}

impl Cli {
	/// The point is that this number exceeds what anyone wants; it's just to
	/// stop the program from printing e.g. millions of zeroes by accident
	const MAX_PRECISION: usize = 12;

	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if let Some(prec) = self.precision {
			if prec > Cli::MAX_PRECISION {
				bail!("Maximum precision is {}", Cli::MAX_PRECISION);
			}
		}

		if self.width == Some(0) {
			bail!("Chart width must be at least 1");
		}

		Ok(())
	}

	/// Both bounds are required before any computation happens.
	fn year_range(&self) -> Result<YearRange, Error> {
		match (self.start, self.end) {
			(Some(start), Some(end)) => Ok(YearRange::new(start, end)),
			_ => bail!("Please enter both start and end year"),
		}
	}
}

#[derive(ValueEnum, Clone, Copy, PartialEq)]
enum Directive {
	Show,    // display (and optionally re-save) one table
	Project, // compute updated stock data over a year range
	Chart,   // project, then render the stacked bar chart
	Check,   // report alignment gaps between the three tables
}

#[derive(ValueEnum, Clone, Copy, PartialEq)]
enum Kind {
	Stock,
	Failure,
	Success,
}

impl Kind {
	fn table_kind(self) -> TableKind {
		match self {
			Kind::Stock => TableKind::Stock,
			Kind::Failure => TableKind::Failure,
			Kind::Success => TableKind::Success,
		}
	}

	fn flag(self) -> &'static str {
		match self {
			Kind::Stock => "stock",
			Kind::Failure => "failure",
			Kind::Success => "success",
		}
	}
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	args.validate()?;

	let fs = Filesystem::new();
	let config = fs.get_config(args.config.as_ref())?;
	let mut store = Store::new();

	match args.command {
		Directive::Show => {
			let kind = args.kind.unwrap_or(Kind::Stock);
			let path = resolve_path(kind, &args, &config)?;
			store.load(kind.table_kind(), &path, &fs)?;

			TableReporter::new(store.get(kind.table_kind())?, args.precision)
				.print();

			if let Some(out) = &args.out {
				store.save(kind.table_kind(), out, &fs)?;
				println!();
				println!("{} data saved to {}", kind.table_kind(), out);
			}
		},
		Directive::Project => {
			let range = args.year_range()?;
			load_all(&mut store, &args, &config, &fs)?;

			let result = engine::project(
				store.stock()?,
				store.failure()?,
				store.success()?,
				&range,
			)?;
			store.commit(result);

			TableReporter::new(
				store.get(TableKind::Changed)?,
				args.precision,
			)
			.print();

			if let Some(out) = &args.out {
				store.save(TableKind::Changed, out, &fs)?;
				println!();
				println!("Updated stock data saved to {}", out);
			}
		},
		Directive::Chart => {
			let range = args.year_range()?;

			match &args.from {
				Some(path) => {
					let content = fs.read(path)?;
					let result = parsing::parser::parse_table(&content)
						.map_err(|e| anyhow!("{}: {}", path, e))?;
					store.commit(result);
				},
				None => {
					load_all(&mut store, &args, &config, &fs)?;
					let result = engine::project(
						store.stock()?,
						store.failure()?,
						store.success()?,
						&range,
					)?;
					store.commit(result);
				},
			}

			let result = match store.committed_result() {
				Some(t) => t,
				None => bail!("no projection has been computed yet"),
			};

			let data = ChartData::build(result, &range)?;
			for diagnostic in data.diagnostics() {
				eprintln!("warning: {}", diagnostic);
			}

			if let Some(json) = &args.json {
				fs.write_atomic(json, &data.to_json()?)?;
				println!("Chart data saved to {}", json);
			}

			let width = args
				.width
				.or_else(|| config.chart.as_ref().and_then(|c| c.width));
			ChartRenderer::new(width).print(&data);
		},
		Directive::Check => {
			load_all(&mut store, &args, &config, &fs)?;
			run_check(&store)?;
		},
	}

	Ok(())
}

fn load_all(
	store: &mut Store,
	args: &Cli,
	config: &Config,
	fs: &Filesystem,
) -> Result<(), Error> {
	for kind in [Kind::Stock, Kind::Failure, Kind::Success] {
		let path = resolve_path(kind, args, config)?;
		store.load(kind.table_kind(), &path, fs)?;
	}
	Ok(())
}

/// Flag first, config file second. There is no further fallback; a table
/// with no known location is a validation error before any computation.
fn resolve_path(
	kind: Kind,
	args: &Cli,
	config: &Config,
) -> Result<String, Error> {
	let flag = match kind {
		Kind::Stock => &args.stock,
		Kind::Failure => &args.failure,
		Kind::Success => &args.success,
	};
	if let Some(path) = flag {
		return Ok(path.clone());
	}

	let files = config.files.as_ref();
	let fallback = match kind {
		Kind::Stock => files.and_then(|f| f.stock.clone()),
		Kind::Failure => files.and_then(|f| f.failure.clone()),
		Kind::Success => files.and_then(|f| f.success.clone()),
	};

	match fallback {
		Some(path) => Ok(path),
		None => bail!(
			"no {} table path given; pass --{} or set files.{} in the config",
			kind.table_kind(),
			kind.flag(),
			kind.flag()
		),
	}
}

/// Reports the alignment gaps that projections absorb silently: short rate
/// tables, one-sided year coverage, a missing baseline. Warnings only;
/// nothing here changes how a projection behaves.
fn run_check(store: &Store) -> Result<(), Error> {
	let stock = store.stock()?;
	let failure = store.failure()?;
	let success = store.success()?;

	let covered = failure.row_count().min(success.row_count());
	if stock.row_count() > covered {
		println!(
			"warning: stock rows {}-{} have no matching rate rows; projections skip them",
			covered + 1,
			stock.row_count()
		);
	}

	if !stock.has_year(engine::BASELINE_YEAR) {
		println!(
			"warning: stock table has no baseline column \"{}\"; projections will fail",
			engine::BASELINE_YEAR
		);
	}

	let matcher = year_matcher();
	let failure_years = year_set(failure, &matcher);
	let success_years = year_set(success, &matcher);

	for year in failure_years.difference(&success_years) {
		println!(
			"warning: year {} has failure rates but no success rates; projections skip it",
			year
		);
	}
	for year in success_years.difference(&failure_years) {
		println!(
			"warning: year {} has success rates but no failure rates; projections skip it",
			year
		);
	}

	let this_year = Local::now().year();
	match failure_years.intersection(&success_years).max() {
		Some(&last) if (last as i32) < this_year => {
			println!(
				"warning: rate coverage ends in {}, before the current year",
				last
			);
		},
		None => {
			println!(
				"warning: the rate tables share no year columns; projections write nothing"
			);
		},
		_ => {},
	}

	println!("Done");
	Ok(())
}

fn year_set(table: &Table, matcher: &Regex) -> BTreeSet<u16> {
	table
		.columns()
		.iter()
		.filter(|c| matcher.is_match(c))
		.filter_map(|c| c.parse().ok())
		.collect()
}
