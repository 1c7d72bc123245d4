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
use regex::Regex;
use std::ops::RangeInclusive;

/// An inclusive span of years to project over. A range whose start exceeds
/// its end iterates as empty rather than failing; a projection over it is a
/// successful no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearRange {
	start: u16,
	end: u16,
}

impl YearRange {
	pub fn new(start: u16, end: u16) -> Self {
		Self { start, end }
	}

	/// Iterates in increasing order. Order matters to callers: each year's
	/// projected value feeds the next.
	pub fn years(&self) -> RangeInclusive<u16> {
		self.start..=self.end
	}
}

/// Year columns are always named by the decimal string of the year, so a
/// lookup can construct the column name directly from the integer.
pub fn column_name(year: u16) -> String {
	year.to_string()
}

/// Matcher for column names that denote years. Compile once per consumer.
pub fn year_matcher() -> Regex {
	Regex::new(r"^[0-9]{4}$").unwrap()
}
