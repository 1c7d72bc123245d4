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
use serde::Serialize;

/// The per-source, per-year matrix behind a stacked bar chart, plus the
/// per-year totals used for the top-of-stack labels and axis scaling.
///
/// Unlike the projection engine, chart preparation complains out loud:
/// a requested year with no column in the result table aborts with one
/// aggregated error naming every absent year, and values that cannot be
/// resolved chart as zero with a recorded diagnostic.
#[derive(Debug, Serialize)]
pub struct ChartData {
	years: Vec<u16>,
	/// Source labels in table row order, duplicates included.
	sources: Vec<String>,
	/// Indexed `[year][source]`, aligned with `years` and `sources`.
	values: Vec<Vec<f64>>,
	/// Sum across sources, per year.
	totals: Vec<f64>,

	#[serde(skip_serializing)]
	diagnostics: Vec<String>,
}

impl ChartData {
	pub fn build(
		result: &Table,
		range: &YearRange,
	) -> Result<ChartData, Error> {
		let missing: Vec<String> = range
			.years()
			.map(column_name)
			.filter(|name| result.column_index(name).is_none())
			.collect();
		if !missing.is_empty() {
			bail!(
				"cannot chart: missing year columns: {}",
				missing.join(", ")
			);
		}

		let years: Vec<u16> = range.years().collect();
		let year_cols: Vec<usize> = years
			.iter()
			.filter_map(|y| result.column_index(&column_name(*y)))
			.collect();

		let sources: Vec<String> = result
			.rows()
			.iter()
			.map(|r| r.source.clone())
			.collect();

		let mut diagnostics = Vec::new();
		let mut per_source: Vec<Vec<f64>> = Vec::with_capacity(sources.len());

		for source in &sources {
			// Lookup goes through the label, not the row position, so
			// duplicate labels all chart the first matching row.
			let row = match result.first_row_for_source(source) {
				Some(r) => r,
				None => {
					diagnostics.push(format!(
						"missing data for source {} in some years; using 0",
						source
					));
					per_source.push(vec![0.0; years.len()]);
					continue;
				},
			};

			let mut values = Vec::with_capacity(years.len());
			let mut had_missing = false;
			let mut had_non_finite = false;

			for col in &year_cols {
				match result.cell(row, *col) {
					Cell::Numeric(v) if v.is_finite() => values.push(v),
					Cell::Numeric(_) => {
						had_non_finite = true;
						values.push(0.0);
					},
					Cell::Missing => {
						had_missing = true;
						values.push(0.0);
					},
				}
			}

			if had_missing {
				diagnostics.push(format!(
					"no numeric value for source {} in some years; using 0",
					source
				));
			}
			if had_non_finite {
				diagnostics.push(format!(
					"non-finite value for source {}; using 0",
					source
				));
			}

			per_source.push(values);
		}

		// Transpose into year-major order and total each stack
		let mut values = Vec::with_capacity(years.len());
		let mut totals = Vec::with_capacity(years.len());
		for year_idx in 0..years.len() {
			let stack: Vec<f64> =
				per_source.iter().map(|vs| vs[year_idx]).collect();
			totals.push(stack.iter().sum());
			values.push(stack);
		}

		Ok(ChartData {
			years,
			sources,
			values,
			totals,
			diagnostics,
		})
	}

	pub fn years(&self) -> &[u16] {
		&self.years
	}

	pub fn sources(&self) -> &[String] {
		&self.sources
	}

	/// One stack per year, each aligned with `sources()`.
	pub fn values(&self) -> &[Vec<f64>] {
		&self.values
	}

	pub fn totals(&self) -> &[f64] {
		&self.totals
	}

	pub fn diagnostics(&self) -> &[String] {
		&self.diagnostics
	}

	pub fn to_json(&self) -> Result<String, Error> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}
