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
use crate::tables::table::Table;
use anyhow::{bail, Error};

/// The year whose stock value seeds every projection. Read, never written.
pub const BASELINE_YEAR: u16 = 2023;

/// Projects stock levels over the requested range and returns the updated
/// table. The inputs are untouched; the caller decides what to do with the
/// result.
///
/// Per row, the baseline cell seeds a running stock value that walks the
/// range in increasing year order. A year projects only when both rate
/// tables carry its column; otherwise the year is skipped outright, with
/// no write and no change to the running value. A `Numeric` value already
/// sitting in a projected year's cell is added to the running value first,
/// so manual entries act as injections rather than being discarded.
///
/// Alignment gaps are policy, not errors: a row whose index exceeds either
/// rate table is left untouched, silently. The one hard failure is a stock
/// table with no baseline column at all, since nothing can anchor the
/// projection then.
pub fn project(
	stock: &Table,
	failure: &Table,
	success: &Table,
	range: &YearRange,
) -> Result<Table, Error> {
	let baseline_idx = match stock.column_index(&column_name(BASELINE_YEAR)) {
		Some(i) => i,
		None => bail!(
			"stock table has no baseline column \"{}\"",
			BASELINE_YEAR
		),
	};

	let mut result = stock.clone();
	result.ensure_year_columns(range);

	for row in 0..result.row_count() {
		if row >= failure.row_count() || row >= success.row_count() {
			continue;
		}

		let mut current = result.cell(row, baseline_idx).as_number();

		for year in range.years() {
			if year == BASELINE_YEAR {
				continue;
			}

			let name = column_name(year);
			let (failure_idx, success_idx) =
				match (failure.column_index(&name), success.column_index(&name))
				{
					(Some(f), Some(s)) => (f, s),
					_ => continue,
				};
			let target = match result.column_index(&name) {
				Some(t) => t,
				None => continue,
			};

			if let Cell::Numeric(v) = result.cell(row, target) {
				current += v;
			}

			current = end_of_year_stock(
				current,
				failure.cell(row, failure_idx).as_number(),
				success.cell(row, success_idx).as_number(),
			);

			result.set_cell(row, target, Cell::Numeric(current));
		}
	}

	Ok(result)
}

/// One year of attrition and recovery. A `failure_rate` percent share of
/// the stock fails during the year; `success_rate` percent of that share
/// is repaired and returns. Rates are applied as-is, with no plausibility
/// bounds.
///
/// A zero failure rate returns the stock unchanged regardless of the
/// success rate. That short-circuit is deliberate, not an approximation.
pub fn end_of_year_stock(
	stock: f64,
	failure_rate: f64,
	success_rate: f64,
) -> f64 {
	if failure_rate == 0.0 {
		return stock;
	}

	let consumed = stock * (failure_rate / 100.0);
	let repaired = if success_rate > 0.0 {
		consumed * (success_rate / 100.0)
	} else {
		0.0
	};

	stock - consumed + repaired
}
