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

/// Glyphs cycle when a table has more sources than this list.
const SEGMENT_GLYPHS: [char; 6] = ['#', '=', '%', '+', 'o', '.'];

const DEFAULT_WIDTH: usize = 60;

/// Terminal rendering of a chart: one horizontal stacked bar per year,
/// segments in source order, the year's total after the bar, and a legend
/// mapping glyphs back to sources. Bars scale so the largest total fills
/// the configured width.
pub struct ChartRenderer {
	width: usize,
}

impl ChartRenderer {
	pub fn new(width: Option<usize>) -> Self {
		Self {
			width: width.unwrap_or(DEFAULT_WIDTH),
		}
	}

	pub fn print(&self, data: &ChartData) {
		println!();
		println!("Value change for stock level");
		println!();

		let max_total =
			data.totals().iter().cloned().fold(0.0_f64, f64::max);

		for (i, year) in data.years().iter().enumerate() {
			let bar = self.bar(&data.values()[i], max_total);
			println!(
				"{} |{:<width$}| {:.0}",
				year,
				bar,
				data.totals()[i],
				width = self.width
			);
		}

		println!();
		for (i, source) in data.sources().iter().enumerate() {
			println!("  {} {}", glyph(i), source);
		}
	}

	/// Builds one bar. Segment boundaries come from the rounded cumulative
	/// share of the stack, so the bar's length always matches the stack's
	/// total share of the widest bar; negative values draw as zero-length
	/// segments.
	fn bar(&self, stack: &[f64], max_total: f64) -> String {
		if max_total <= 0.0 {
			return String::new();
		}

		let mut out = String::new();
		let mut cumulative = 0.0;
		let mut drawn = 0;

		for (i, value) in stack.iter().enumerate() {
			cumulative += value.max(0.0);
			let end = ((cumulative / max_total) * self.width as f64).round()
				as usize;
			let end = end.min(self.width);
			for _ in drawn..end {
				out.push(glyph(i));
			}
			drawn = drawn.max(end);
		}

		out
	}
}

fn glyph(i: usize) -> char {
	SEGMENT_GLYPHS[i % SEGMENT_GLYPHS.len()]
}
