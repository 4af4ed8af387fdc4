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
use crate::calc::tax::TaxRate;
use crate::config::config_file::Config;
use crate::export::csv_writer::{plan_csv, purchases_csv};
use crate::import::importer::{read_plan_csv, read_purchases_csv};
use crate::shopping::plan::Plan;
use crate::shopping::session::Session;
use anyhow::{anyhow, bail, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Where a session lives on disk.
pub struct SessionFiles {
	pub plan: PathBuf,
	pub purchases: PathBuf,
}

pub struct Filesystem {
	home: Option<PathBuf>,
}

impl Filesystem {
	pub fn new() -> Self {
		Self { home: home_dir() }
	}

	pub fn open(&self, file_path: &Path) -> Result<File, Error> {
		File::open(file_path)
			.map_err(|e| anyhow!("failed to open {}: {}", file_path.display(), e))
	}

	pub fn write(&self, file_path: &Path, contents: &[u8]) -> Result<(), Error> {
		if let Some(parent) = file_path.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent)?;
			}
		}
		fs::write(file_path, contents)
			.map_err(|e| anyhow!("failed to write {}: {}", file_path.display(), e))
	}

	/// Fetches the config from the given path, or default path if none.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
	) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => match &self.home {
				Some(home) => home.join(".config/bozorlik/config.toml"),
				None => bail!("Unable to determine home directory"),
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

		let content = fs::read_to_string(&config_path).map_err(|e| {
			anyhow!("failed to read config {}: {}", config_path.display(), e)
		})?;
		toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))
	}

	/// Loads the plan and purchase table. A missing plan file starts from the
	/// example plan; a missing purchase table is derived from the plan.
	pub fn load_session(
		&self,
		files: &SessionFiles,
		tax_rate: TaxRate,
	) -> Result<Session, Error> {
		let plan = if files.plan.exists() {
			read_plan_csv(self.open(&files.plan)?).map_err(|e| {
				anyhow!("failed to load plan {}: {}", files.plan.display(), e)
			})?
		} else {
			log::info!(
				"no plan at {}, starting from the example plan",
				files.plan.display()
			);
			Plan::example()
		};

		if !files.purchases.exists() {
			log::info!(
				"no purchase table at {}, deriving it from the plan",
				files.purchases.display()
			);
			return Ok(Session::from_plan(plan, tax_rate));
		}

		let purchases = read_purchases_csv(self.open(&files.purchases)?)
			.map_err(|e| {
				anyhow!(
					"failed to load purchases {}: {}",
					files.purchases.display(),
					e
				)
			})?;
		Ok(Session::new(plan, purchases, tax_rate))
	}

	pub fn save_session(
		&self,
		session: &Session,
		files: &SessionFiles,
	) -> Result<(), Error> {
		self.write(&files.plan, &plan_csv(session.plan().items())?)?;
		self.write(&files.purchases, &purchases_csv(session.purchases())?)?;
		log::debug!(
			"saved session to {} and {}",
			files.plan.display(),
			files.purchases.display()
		);
		Ok(())
	}
}
