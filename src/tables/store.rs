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
use crate::parsing::filesystem::Filesystem;
use crate::parsing::parser::{parse_table, render_delimited};
use crate::tables::table::Table;
use anyhow::{anyhow, bail, Error};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
	Stock,
	Failure,
	Success,
	/// The committed projection result. Computed, never loaded.
	Changed,
}

impl fmt::Display for TableKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TableKind::Stock => write!(f, "stock"),
			TableKind::Failure => write!(f, "failure rate"),
			TableKind::Success => write!(f, "success rate"),
			TableKind::Changed => write!(f, "updated stock"),
		}
	}
}

/// Owns the three input tables plus the most recent projection result. The
/// store is an explicit context object passed to whatever needs it; it has
/// no behavior of its own beyond load, save and handing out borrows.
///
/// Copy-on-update: the projection engine receives borrows of the inputs
/// and builds a fresh table. Nothing in the store changes until the caller
/// commits that result, so the originals always hold pre-projection values
/// for comparison.
#[derive(Debug, Default)]
pub struct Store {
	stock: Option<Table>,
	failure: Option<Table>,
	success: Option<Table>,
	changed: Option<Table>,
}

impl Store {
	pub fn new() -> Self {
		Default::default()
	}

	/// Reads and parses the file at `path` into the given slot, replacing
	/// any previous table of that kind wholesale.
	pub fn load(
		&mut self,
		kind: TableKind,
		path: &str,
		fs: &Filesystem,
	) -> Result<(), Error> {
		let content = fs.read(path)?;
		let table =
			parse_table(&content).map_err(|e| anyhow!("{}: {}", path, e))?;

		match kind {
			TableKind::Stock => self.stock = Some(table),
			TableKind::Failure => self.failure = Some(table),
			TableKind::Success => self.success = Some(table),
			TableKind::Changed => {
				bail!("updated stock data is computed, not loaded")
			},
		}

		Ok(())
	}

	/// Writes the table of the given kind back out in the delimited
	/// format. The write is atomic; a failed save leaves no partial file.
	pub fn save(
		&self,
		kind: TableKind,
		path: &str,
		fs: &Filesystem,
	) -> Result<(), Error> {
		let table = self.get(kind)?;
		fs.write_atomic(path, &render_delimited(table))
	}

	pub fn get(&self, kind: TableKind) -> Result<&Table, Error> {
		let slot = match kind {
			TableKind::Stock => &self.stock,
			TableKind::Failure => &self.failure,
			TableKind::Success => &self.success,
			TableKind::Changed => &self.changed,
		};

		match slot {
			Some(t) => Ok(t),
			None if kind == TableKind::Changed => {
				bail!("no projection has been computed yet")
			},
			None => bail!("no {} table loaded", kind),
		}
	}

	pub fn stock(&self) -> Result<&Table, Error> {
		self.get(TableKind::Stock)
	}

	pub fn failure(&self) -> Result<&Table, Error> {
		self.get(TableKind::Failure)
	}

	pub fn success(&self) -> Result<&Table, Error> {
		self.get(TableKind::Success)
	}

	/// Replaces the committed projection result wholesale. Results are
	/// never partially merged; one projection, one table.
	pub fn commit(&mut self, result: Table) {
		self.changed = Some(result);
	}

	/// The most recent committed projection, or None before the first one.
	pub fn committed_result(&self) -> Option<&Table> {
		self.changed.as_ref()
	}
}
