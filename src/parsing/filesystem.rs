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
use crate::config::config_file::Config;
use anyhow::{anyhow, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::path::PathBuf;

pub struct Filesystem;

impl Filesystem {
	pub fn new() -> Self {
		Self
	}

	pub fn read(&self, path: &str) -> Result<String, Error> {
		fs::read_to_string(path)
			.map_err(|e| anyhow!("failed to read {}: {}", path, e))
	}

	/// Writes via a temporary file in the same directory, then renames
	/// over the target, so an interrupted or failed save never leaves a
	/// partial file at the destination.
	pub fn write_atomic(
		&self,
		path: &str,
		content: &str,
	) -> Result<(), Error> {
		let tmp = format!("{}.tmp", path);

		fs::write(&tmp, content)
			.map_err(|e| anyhow!("failed to write {}: {}", tmp, e))?;

		if let Err(e) = fs::rename(&tmp, path) {
			let _ = fs::remove_file(&tmp);
			return Err(anyhow!("failed to save {}: {}", path, e));
		}

		Ok(())
	}

	/// Fetches the config from the given path, or default path if none.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
	) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => {
				let home_dir = home_dir().unwrap_or_else(|| {
					panic!("Unable to determine home directory")
				});
				home_dir.join(".config/stokr/config.toml")
			},
			Some(p) => PathBuf::from(p),
		};

		// create empty config file if it doesn't exist
		if !config_path.exists() && custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(config_path.clone())?;
		}

		let content = fs::read_to_string(config_path)?;
		let config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::env;
	use std::path::Path;

	fn scratch_path(name: &str) -> String {
		env::temp_dir()
			.join(format!("stokr-{}-{}", std::process::id(), name))
			.to_string_lossy()
			.to_string()
	}

	#[test]
	fn test_write_atomic_leaves_no_temp_file() {
		let fs_layer = Filesystem::new();
		let path = scratch_path("atomic.csv");

		fs_layer
			.write_atomic(&path, "Source;2023\nAlpha;500\n")
			.unwrap();

		assert_eq!(
			fs::read_to_string(&path).unwrap(),
			"Source;2023\nAlpha;500\n"
		);
		assert!(!Path::new(&format!("{}.tmp", path)).exists());

		fs::remove_file(&path).unwrap();
	}

	#[test]
	fn test_write_atomic_overwrites_previous_content() {
		let fs_layer = Filesystem::new();
		let path = scratch_path("overwrite.csv");

		fs_layer.write_atomic(&path, "old\n").unwrap();
		fs_layer.write_atomic(&path, "new\n").unwrap();

		assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");

		fs::remove_file(&path).unwrap();
	}

	#[test]
	fn test_read_missing_file_names_the_path() {
		let fs_layer = Filesystem::new();
		let err = fs_layer.read("no/such/file.csv").unwrap_err();
		assert!(err.to_string().contains("no/such/file.csv"));
	}
}
