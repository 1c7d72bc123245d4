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
use std::fmt;

/// A single table value. Every non-Source cell resolves to one of these at
/// load time; there is no string-typed cell after parsing.
///
/// `Missing` only ever enters a table through year columns created for a
/// projection range. File input, including malformed input, always loads as
/// `Numeric` because unparseable fields coerce to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
	Numeric(f64),
	Missing,
}

impl Cell {
	/// Parses one delimited field. Empty and malformed fields become 0.0
	/// without complaint; callers that care about malformed input must
	/// check before this point, because the coercion is silent on purpose.
	pub fn from_field(raw: &str) -> Cell {
		match raw.trim().parse::<f64>() {
			Ok(v) => Cell::Numeric(v),
			Err(_) => Cell::Numeric(0.0),
		}
	}

	/// Numeric view of the cell; `Missing` reads as zero.
	pub fn as_number(&self) -> f64 {
		match self {
			Cell::Numeric(v) => *v,
			Cell::Missing => 0.0,
		}
	}

	/// The on-disk form: `Missing` serializes as an empty field.
	pub fn to_field(&self) -> String {
		match self {
			Cell::Numeric(v) => format!("{}", v),
			Cell::Missing => String::new(),
		}
	}
}

impl fmt::Display for Cell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Cell::Numeric(v) => match f.precision() {
				Some(p) => write!(f, "{:.*}", p, v),
				None => write!(f, "{}", v),
			},
			Cell::Missing => write!(f, "-"),
		}
	}
}
