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
use crate::parsing::parser::SOURCE_COLUMN;
use crate::tables::cell::Cell;
use crate::tables::table::Table;

/// Standard printer for the stock and rate tables: headers centered over
/// their columns, numeric columns right-aligned, source labels left-aligned,
/// columns shown in their on-disk order.
///
/// Precision affects the display only; the underlying values are never
/// rounded.
pub struct TableReporter<'a> {
	table: &'a Table,
	precision: Option<usize>,
}

impl<'a> TableReporter<'a> {
	pub fn new(table: &'a Table, precision: Option<usize>) -> Self {
		Self { table, precision }
	}

	pub fn print(&self) {
		println!();
		print!("{}", self.render());
	}

	pub fn render(&self) -> String {
		let source_pos = self.table.source_pos();

		let mut headers: Vec<String> = self.table.columns().to_vec();
		headers.insert(
			source_pos.min(headers.len()),
			SOURCE_COLUMN.to_string(),
		);

		let rows: Vec<Vec<String>> = self
			.table
			.rows()
			.iter()
			.map(|row| {
				let mut fields: Vec<String> = row
					.cells
					.iter()
					.map(|c| self.format_cell(c))
					.collect();
				fields
					.insert(source_pos.min(fields.len()), row.source.clone());
				fields
			})
			.collect();

		let mut widths: Vec<usize> =
			headers.iter().map(|h| h.len()).collect();
		for row in &rows {
			for (i, value) in row.iter().enumerate() {
				widths[i] = widths[i].max(value.len());
			}
		}

		let mut out = String::new();

		let header_line: Vec<String> = headers
			.iter()
			.enumerate()
			.map(|(i, h)| center_align(h, widths[i]))
			.collect();
		out.push_str(&header_line.join(" | "));
		out.push('\n');

		let total_width: usize =
			widths.iter().sum::<usize>() + 3 * (widths.len().max(1) - 1);
		out.push_str(&"-".repeat(total_width));
		out.push('\n');

		for row in &rows {
			let line: Vec<String> = row
				.iter()
				.enumerate()
				.map(|(i, value)| {
					if i == source_pos {
						format!("{:<width$}", value, width = widths[i])
					} else {
						format!("{:>width$}", value, width = widths[i])
					}
				})
				.collect();
			out.push_str(line.join("   ").trim_end());
			out.push('\n');
		}

		out
	}

	fn format_cell(&self, cell: &Cell) -> String {
		match (cell, self.precision) {
			(Cell::Missing, _) => cell.to_string(),
			(_, Some(p)) => format!("{:.*}", p, cell),
			(_, None) => cell.to_string(),
		}
	}
}

fn center_align(value: &str, width: usize) -> String {
	if value.len() >= width {
		return value.to_string();
	}
	let total_padding = width - value.len();
	let left_padding = total_padding / 2;

	format!(
		"{}{}{}",
		" ".repeat(left_padding),
		value,
		" ".repeat(total_padding - left_padding)
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parsing::parser::parse_table;

	#[test]
	fn test_renders_all_values_in_disk_order() {
		let table =
			parse_table("Source;2023;2024\nAlpha;500;450\nBeta;20;18\n")
				.unwrap();
		let rendered = TableReporter::new(&table, None).render();

		let lines: Vec<&str> = rendered.lines().collect();
		assert!(lines[0].starts_with("Source"));
		assert!(lines[1].starts_with("---"));
		assert!(lines[2].contains("Alpha"));
		assert!(lines[2].contains("500"));
		assert!(lines[3].contains("18"));
	}

	#[test]
	fn test_source_column_keeps_its_disk_position() {
		let table = parse_table("2023;Source\n500;Alpha\n").unwrap();
		let rendered = TableReporter::new(&table, None).render();

		let header = rendered.lines().next().unwrap();
		assert!(header.trim_start().starts_with("2023"));
	}

	#[test]
	fn test_precision_applies_to_display_only() {
		let table = parse_table("Source;2023\nAlpha;405.1234\n").unwrap();
		let rendered = TableReporter::new(&table, Some(2)).render();

		assert!(rendered.contains("405.12"));
		assert!(!rendered.contains("405.1234"));
	}

	#[test]
	fn test_missing_cells_display_as_dash() {
		use crate::projection::years::YearRange;

		let mut table = parse_table("Source;2023\nAlpha;500\n").unwrap();
		table.ensure_year_columns(&YearRange::new(2024, 2024));
		let rendered = TableReporter::new(&table, None).render();

		assert!(rendered.lines().nth(2).unwrap().ends_with("-"));
	}
}
