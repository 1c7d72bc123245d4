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
use crate::projection::years::{column_name, YearRange};
use crate::tables::cell::Cell;

/// One stock source. The source label is not required to be unique; where a
/// label is used as a lookup key, the first matching row wins.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
	pub source: String,
	pub cells: Vec<Cell>,
}

impl Row {
	pub fn new(source: String, cells: Vec<Cell>) -> Self {
		Self { source, cells }
	}
}

/// An ordered set of rows under a `Source` column plus zero or more value
/// columns, usually year columns. `columns` excludes the Source column;
/// `source_pos` remembers where Source sat in the on-disk column order so a
/// save can reproduce the original schema.
///
/// The stock, failure and success tables of one projection are three
/// independent instances of this type, aligned by row position only. Nothing
/// here enforces that alignment; the projection engine skips rows the rate
/// tables cannot cover.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
	columns: Vec<String>,
	source_pos: usize,
	rows: Vec<Row>,
}

impl Table {
	pub fn new(columns: Vec<String>, source_pos: usize, rows: Vec<Row>) -> Self {
		Self {
			columns,
			source_pos,
			rows,
		}
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	pub fn source_pos(&self) -> usize {
		self.source_pos
	}

	pub fn rows(&self) -> &[Row] {
		&self.rows
	}

	pub fn row_count(&self) -> usize {
		self.rows.len()
	}

	pub fn column_index(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|c| c == name)
	}

	pub fn has_year(&self, year: u16) -> bool {
		self.column_index(&column_name(year)).is_some()
	}

	pub fn cell(&self, row: usize, col: usize) -> Cell {
		self.rows[row].cells[col]
	}

	pub fn set_cell(&mut self, row: usize, col: usize, value: Cell) {
		self.rows[row].cells[col] = value;
	}

	/// First row whose source label matches, if any. Duplicate labels
	/// resolve to the earliest row by position.
	pub fn first_row_for_source(&self, source: &str) -> Option<usize> {
		self.rows.iter().position(|r| r.source == source)
	}

	/// Creates any year columns of the given range that are absent, filled
	/// with the missing sentinel for every row. Only the requested range is
	/// touched; new columns append after the existing ones in increasing
	/// year order.
	pub fn ensure_year_columns(&mut self, range: &YearRange) {
		for year in range.years() {
			let name = column_name(year);
			if self.column_index(&name).is_some() {
				continue;
			}
			self.columns.push(name);
			for row in &mut self.rows {
				row.cells.push(Cell::Missing);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Table {
		Table::new(
			vec!["2023".to_string(), "2024".to_string()],
			0,
			vec![
				Row::new(
					"Alpha".to_string(),
					vec![Cell::Numeric(500.0), Cell::Numeric(0.0)],
				),
				Row::new(
					"Beta".to_string(),
					vec![Cell::Numeric(200.0), Cell::Numeric(10.0)],
				),
				Row::new(
					"Alpha".to_string(),
					vec![Cell::Numeric(9.0), Cell::Numeric(9.0)],
				),
			],
		)
	}

	mod lookups {
		use super::*;

		#[test]
		fn test_column_index() {
			let table = sample();
			assert_eq!(table.column_index("2024"), Some(1));
			assert_eq!(table.column_index("2030"), None);
		}

		#[test]
		fn test_has_year() {
			let table = sample();
			assert!(table.has_year(2023));
			assert!(!table.has_year(2025));
		}

		#[test]
		fn test_duplicate_source_resolves_to_first_row() {
			let table = sample();
			assert_eq!(table.first_row_for_source("Alpha"), Some(0));
			assert_eq!(table.first_row_for_source("Gamma"), None);
		}
	}

	mod year_columns {
		use super::*;

		#[test]
		fn test_ensure_creates_only_absent_columns() {
			let mut table = sample();
			table.ensure_year_columns(&YearRange::new(2024, 2026));

			assert_eq!(
				table.columns(),
				&["2023", "2024", "2025", "2026"]
			);
			// pre-existing cells untouched
			assert_eq!(table.cell(1, 1), Cell::Numeric(10.0));
			// created cells carry the missing sentinel
			assert_eq!(table.cell(0, 2), Cell::Missing);
			assert_eq!(table.cell(2, 3), Cell::Missing);
		}

		#[test]
		fn test_ensure_is_idempotent() {
			let mut table = sample();
			table.ensure_year_columns(&YearRange::new(2025, 2025));
			table.ensure_year_columns(&YearRange::new(2025, 2025));
			assert_eq!(table.columns().len(), 3);
		}

		#[test]
		fn test_ensure_with_empty_range_changes_nothing() {
			let mut table = sample();
			table.ensure_year_columns(&YearRange::new(2026, 2024));
			assert_eq!(table.columns().len(), 2);
		}
	}
}
