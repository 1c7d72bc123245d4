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
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub files: Option<Files>,
	pub chart: Option<Chart>,
}

/// Default table locations, used when the matching flag is not passed.
#[derive(Debug, Default, Deserialize)]
pub struct Files {
	pub stock: Option<String>,
	pub failure: Option<String>,
	pub success: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Chart {
	/// Width of the widest bar, in characters.
	pub width: Option<usize>,
}
