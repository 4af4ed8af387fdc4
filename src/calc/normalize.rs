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
use crate::calc::quantity::Quantity;
use crate::catalog::unit::Unit;

/// Loosely typed cell content as it arrives from the outside world: a CSV
/// field, a command line flag, a line of free text, or nothing at all.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawValue<'a> {
	Missing,
	Number(f64),
	Text(&'a str),
}

impl From<f64> for RawValue<'_> {
	fn from(v: f64) -> Self {
		RawValue::Number(v)
	}
}

impl<'a> From<&'a str> for RawValue<'a> {
	fn from(s: &'a str) -> Self {
		RawValue::Text(s)
	}
}

impl<'a> From<Option<&'a str>> for RawValue<'a> {
	fn from(s: Option<&'a str>) -> Self {
		s.map(RawValue::Text).unwrap_or(RawValue::Missing)
	}
}

impl RawValue<'_> {
	/// Returns the finite number this value holds, if any. Blank text,
	/// garbage, NaN and infinities all count as "no number".
	pub fn as_number(&self) -> Option<f64> {
		let v = match self {
			RawValue::Missing => return None,
			RawValue::Number(v) => *v,
			RawValue::Text(s) => {
				let s = s.trim();
				if s.is_empty() {
					return None;
				}
				s.parse::<f64>().ok()?
			},
		};

		v.is_finite().then_some(v)
	}
}

/// Coerces a raw value into a quantity valid for the given unit.
///
/// Continuous units keep three decimals, with halves rounded away from zero
/// (`f64::round`, not round-half-to-even). Discrete units truncate towards
/// zero. Anything negative, unreadable or too large to stay finite becomes
/// zero. This never fails, so a sloppy cell never blocks editing the rest of
/// the table.
pub fn normalize<'a>(value: impl Into<RawValue<'a>>, unit: Unit) -> Quantity {
	let v = value.into().as_number().unwrap_or(0.0);

	if unit.is_continuous() {
		let rounded = (v * 1000.0).round() / 1000.0;
		Quantity::Continuous(if rounded.is_finite() && rounded > 0.0 {
			rounded
		} else {
			0.0
		})
	} else {
		let truncated = v.trunc();
		Quantity::Discrete(if truncated > 0.0 { truncated as u64 } else { 0 })
	}
}

/// Re-applies `normalize` to an already typed quantity, e.g. after the unit
/// of a row changed from kilograms to pieces.
pub fn renormalize(qty: Quantity, unit: Unit) -> Quantity {
	normalize(qty.as_f64(), unit)
}

/// Prices follow the same lenient parse as quantities, without rounding.
pub fn normalize_price<'a>(value: impl Into<RawValue<'a>>) -> f64 {
	match value.into().as_number() {
		Some(v) if v > 0.0 => v,
		_ => 0.0,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_continuous() {
		assert_eq!(normalize("abc", Unit::Kg), Quantity::Continuous(0.0));
		assert_eq!(normalize(-5.0, Unit::Kg), Quantity::Continuous(0.0));
		assert_eq!(normalize(2.34567, Unit::Kg), Quantity::Continuous(2.346));
		assert_eq!(normalize(" 1.5 ", Unit::Litr), Quantity::Continuous(1.5));
		assert_eq!(normalize("0.0004", Unit::Kg), Quantity::Continuous(0.0));
	}

	#[test]
	fn test_discrete_truncates() {
		assert_eq!(normalize(2.9, Unit::Dona), Quantity::Discrete(2));
		assert_eq!(normalize(-1.0, Unit::Dona), Quantity::Discrete(0));
		assert_eq!(normalize("3.99", Unit::Karobka), Quantity::Discrete(3));
		assert_eq!(normalize("-0.5", Unit::Dona), Quantity::Discrete(0));
	}

	#[test]
	fn test_missing_and_blank() {
		assert_eq!(normalize(RawValue::Missing, Unit::Kg), Quantity::Continuous(0.0));
		assert_eq!(normalize("", Unit::Dona), Quantity::Discrete(0));
		assert_eq!(normalize("   ", Unit::Litr), Quantity::Continuous(0.0));
		assert_eq!(normalize(None::<&str>, Unit::Karobka), Quantity::Discrete(0));
	}

	#[test]
	fn test_non_finite() {
		assert_eq!(normalize("NaN", Unit::Kg), Quantity::Continuous(0.0));
		assert_eq!(normalize("inf", Unit::Dona), Quantity::Discrete(0));
		assert_eq!(normalize(f64::INFINITY, Unit::Kg), Quantity::Continuous(0.0));
	}

	#[test]
	fn test_overflow_on_rounding() {
		// finite input whose scaled value overflows
		assert_eq!(normalize("1e306", Unit::Kg), Quantity::Continuous(0.0));
		assert_eq!(normalize(f64::MAX, Unit::Litr), Quantity::Continuous(0.0));
		assert!(normalize(1e306, Unit::Dona).as_f64().is_finite());
	}

	#[test]
	fn test_rounds_half_away_from_zero() {
		assert_eq!(normalize(0.0625, Unit::Kg), Quantity::Continuous(0.063));
		assert_eq!(normalize(1.0625, Unit::Kg), Quantity::Continuous(1.063));
	}

	#[test]
	fn test_renormalize_on_unit_change() {
		let qty = normalize(2.75, Unit::Kg);
		assert_eq!(renormalize(qty, Unit::Dona), Quantity::Discrete(2));
		assert_eq!(
			renormalize(Quantity::Discrete(4), Unit::Litr),
			Quantity::Continuous(4.0)
		);
	}

	#[test]
	fn test_price() {
		assert_eq!(normalize_price("15000"), 15000.0);
		assert_eq!(normalize_price(-10.0), 0.0);
		assert_eq!(normalize_price("n/a"), 0.0);
		assert_eq!(normalize_price(12.345), 12.345);
	}
}
