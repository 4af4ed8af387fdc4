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
use serde::{Serialize, Serializer};
use std::fmt;

/// Units of measure a plan or purchase line can be counted in.
///
/// Continuous units take fractional quantities (weight, volume). Discrete
/// units only ever hold whole numbers (pieces, boxes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
	Kg,
	Litr,
	Dona,
	Karobka,
}

impl Unit {
	pub const ALL: [Unit; 4] = [Unit::Kg, Unit::Litr, Unit::Dona, Unit::Karobka];

	pub fn name(&self) -> &'static str {
		match self {
			Unit::Kg => "kg",
			Unit::Litr => "litr",
			Unit::Dona => "dona",
			Unit::Karobka => "karobka",
		}
	}

	pub fn is_continuous(&self) -> bool {
		matches!(self, Unit::Kg | Unit::Litr)
	}

	pub fn from_str(s: &str) -> Result<Self, Error> {
		let needle = s.trim().to_lowercase();
		match Unit::ALL.iter().find(|u| u.name() == needle) {
			Some(unit) => Ok(*unit),
			None => bail!(
				"unknown unit '{}' (expected one of: {})",
				s.trim(),
				Unit::ALL.map(|u| u.name()).join(", ")
			),
		}
	}
}

impl fmt::Display for Unit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

impl Serialize for Unit {
	fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
		s.serialize_str(self.name())
	}
}
