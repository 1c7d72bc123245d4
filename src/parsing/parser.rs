/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
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
use crate::tables::cell::Cell;
use crate::tables::table::{Row, Table};
use anyhow::{bail, Error};

pub const DELIMITER: char = ';';
pub const SOURCE_COLUMN: &str = "Source";

/// Parses a semicolon-delimited table: one header row naming the columns,
/// then one row per source. The `Source` column is required and may sit at
/// any position; every other field is numeric.
///
/// Malformed and empty numeric fields coerce to zero without any error.
/// Rows shorter than the header pad out with zeros; fields beyond the
/// header are dropped.
pub fn parse_table(content: &str) -> Result<Table, Error> {
	let mut lines = content.lines();

	let header = match lines.next() {
		Some(h) if !h.trim().is_empty() => h,
		_ => bail!("table file is empty"),
	};

	let header_fields: Vec<String> = header
		.split(DELIMITER)
		.map(|f| f.trim().to_string())
		.collect();

	let source_pos =
		match header_fields.iter().position(|f| f == SOURCE_COLUMN) {
			Some(p) => p,
			None => bail!("table has no {} column", SOURCE_COLUMN),
		};

	let columns: Vec<String> = header_fields
		.iter()
		.enumerate()
		.filter(|(i, _)| *i != source_pos)
		.map(|(_, f)| f.clone())
		.collect();

	let mut rows = Vec::new();
	for line in lines {
		if line.trim().is_empty() {
			continue;
		}

		let fields: Vec<&str> = line.split(DELIMITER).collect();
		let source = fields
			.get(source_pos)
			.map(|f| f.trim().to_string())
			.unwrap_or_default();

		let mut cells = Vec::with_capacity(columns.len());
		for i in 0..header_fields.len() {
			if i == source_pos {
				continue;
			}
			cells.push(Cell::from_field(fields.get(i).unwrap_or(&"")));
		}

		rows.push(Row::new(source, cells));
	}

	Ok(Table::new(columns, source_pos, rows))
}

/// Renders a table back into the delimited format, with the Source column
/// restored to its original on-disk position. Missing cells write as empty
/// fields.
pub fn render_delimited(table: &Table) -> String {
	let sep = DELIMITER.to_string();
	let mut out = String::new();

	let mut header: Vec<String> = table.columns().to_vec();
	header.insert(
		table.source_pos().min(header.len()),
		SOURCE_COLUMN.to_string(),
	);
	out.push_str(&header.join(&sep));
	out.push('\n');

	for row in table.rows() {
		let mut fields: Vec<String> =
			row.cells.iter().map(|c| c.to_field()).collect();
		fields
			.insert(table.source_pos().min(fields.len()), row.source.clone());
		out.push_str(&fields.join(&sep));
		out.push('\n');
	}

	out
}
