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
use serde::Deserialize;

/// Contents of `config.toml`. Every field is optional; command-line flags
/// win over anything set here.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
	/// Percent, 0 to 100.
	pub tax_rate: Option<f64>,
	pub files: Option<Files>,
	pub display: Option<Display>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Files {
	/// Where the plan is kept between runs.
	pub plan: Option<String>,

	/// Where the purchase table is kept between runs.
	pub purchases: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Display {
	pub currency: Option<String>,
}

impl Config {
	pub fn plan_file(&self) -> Option<&str> {
		self.files.as_ref().and_then(|f| f.plan.as_deref())
	}

	pub fn purchases_file(&self) -> Option<&str> {
		self.files.as_ref().and_then(|f| f.purchases.as_deref())
	}

	pub fn currency(&self) -> Option<&str> {
		self.display.as_ref().and_then(|d| d.currency.as_deref())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_full() {
		let config: Config = toml::from_str(
			r#"
tax_rate = 15.0

[files]
plan = "reja.csv"
purchases = "xarid.csv"

[display]
currency = "UZS"
"#,
		)
		.unwrap();

		assert_eq!(config.tax_rate, Some(15.0));
		assert_eq!(config.plan_file(), Some("reja.csv"));
		assert_eq!(config.purchases_file(), Some("xarid.csv"));
		assert_eq!(config.currency(), Some("UZS"));
	}

	#[test]
	fn test_parse_empty() {
		let config: Config = toml::from_str("").unwrap();
		assert!(config.tax_rate.is_none());
		assert!(config.plan_file().is_none());
		assert!(config.currency().is_none());
	}

	#[test]
	fn test_partial_section() {
		let config: Config = toml::from_str("[files]\nplan = \"a.csv\"\n").unwrap();
		assert_eq!(config.plan_file(), Some("a.csv"));
		assert!(config.purchases_file().is_none());
	}
}
