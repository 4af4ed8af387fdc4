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
use crate::catalog::unit::Unit;
use serde::{Serialize, Serializer};
use std::fmt;

/// A normalized, non-negative amount of goods. Which variant a value takes
/// follows from the continuity class of the unit it is counted in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Quantity {
	/// Weight or volume, kept to at most three decimal places.
	Continuous(f64),
	/// Pieces or boxes.
	Discrete(u64),
}

impl Quantity {
	pub fn zero(unit: Unit) -> Self {
		if unit.is_continuous() {
			Quantity::Continuous(0.0)
		} else {
			Quantity::Discrete(0)
		}
	}

	pub fn one(unit: Unit) -> Self {
		if unit.is_continuous() {
			Quantity::Continuous(1.0)
		} else {
			Quantity::Discrete(1)
		}
	}

	pub fn as_f64(&self) -> f64 {
		match self {
			Quantity::Continuous(v) => *v,
			Quantity::Discrete(v) => *v as f64,
		}
	}
}

impl fmt::Display for Quantity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Quantity::Discrete(v) => write!(f, "{}", v),
			Quantity::Continuous(v) => write!(f, "{}", trim_decimals(*v, 3)),
		}
	}
}

impl Serialize for Quantity {
	fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
		match self {
			Quantity::Continuous(v) => s.serialize_f64(*v),
			Quantity::Discrete(v) => s.serialize_u64(*v),
		}
	}
}

/// Renders a value with at most `places` decimals and no trailing zeros,
/// e.g. 2.500 -> "2.5", 3.000 -> "3".
pub fn trim_decimals(v: f64, places: usize) -> String {
	let s = format!("{:.*}", places, v);
	if !s.contains('.') {
		return s;
	}

	let trimmed = s.trim_end_matches('0').trim_end_matches('.');
	if trimmed == "-0" {
		"0".to_string()
	} else {
		trimmed.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display() {
		assert_eq!(Quantity::Continuous(2.5).to_string(), "2.5");
		assert_eq!(Quantity::Continuous(3.0).to_string(), "3");
		assert_eq!(Quantity::Continuous(0.05).to_string(), "0.05");
		assert_eq!(Quantity::Continuous(2.346).to_string(), "2.346");
		assert_eq!(Quantity::Discrete(12).to_string(), "12");
	}

	#[test]
	fn test_zero_follows_unit() {
		assert_eq!(Quantity::zero(Unit::Kg), Quantity::Continuous(0.0));
		assert_eq!(Quantity::zero(Unit::Dona), Quantity::Discrete(0));
		assert_eq!(Quantity::zero(Unit::Litr).as_f64(), 0.0);
	}

	#[test]
	fn test_trim_decimals() {
		assert_eq!(trim_decimals(-0.5, 3), "-0.5");
		assert_eq!(trim_decimals(-0.0001, 3), "0");
		assert_eq!(trim_decimals(1500.0, 0), "1500");
	}
}
