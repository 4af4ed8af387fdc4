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
use anyhow::{bail, Error};
use serde::Serialize;
use std::fmt;

pub const DEFAULT_TAX_RATE: f64 = 12.0;

/// The single sales tax rate, in percent, applied to every line at
/// calculation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaxRate(f64);

impl TaxRate {
	pub fn new(percent: f64) -> Result<Self, Error> {
		if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
			bail!("Tax rate must be between 0 and 100 percent, got {}", percent);
		}
		Ok(Self(percent))
	}

	pub fn percent(&self) -> f64 {
		self.0
	}
}

impl Default for TaxRate {
	fn default() -> Self {
		Self(DEFAULT_TAX_RATE)
	}
}

impl fmt::Display for TaxRate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}%", self.0)
	}
}

/// A gross amount broken into its pre-tax part and the tax it contains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TaxSplit {
	pub net: f64,
	pub tax: f64,
}

/// Extracts the tax already contained in a tax-inclusive amount.
///
/// The gross amount is taken to be `net * (1 + rate/100)`, so the tax part is
/// `gross * rate / (100 + rate)` and the net part is whatever remains. Non
/// positive amounts and negative rates split into nothing.
pub fn split_tax(gross: f64, rate_percent: f64) -> TaxSplit {
	if gross <= 0.0 || rate_percent < 0.0 {
		return TaxSplit::default();
	}

	let tax = gross * (rate_percent / (100.0 + rate_percent));
	TaxSplit {
		net: gross - tax,
		tax,
	}
}
