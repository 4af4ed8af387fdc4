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
use crate::calc::normalize::renormalize;
use crate::calc::tax::split_tax;
use crate::shopping::purchase::PurchaseRecord;

/// Recomputes the derived fields of one purchase line from its inputs.
///
/// Quantities are re-normalized against the line's current unit and the
/// price is clamped to zero before the gross amount is taken. Unbought lines
/// carry no money at all. The result depends on nothing but the arguments.
pub fn compute_line(record: &PurchaseRecord, rate_percent: f64) -> PurchaseRecord {
	let plan_qty = renormalize(record.plan_qty, record.unit);
	let actual_qty = renormalize(record.actual_qty, record.unit);
	let unit_price_gross = if record.unit_price_gross > 0.0 {
		record.unit_price_gross
	} else {
		0.0
	};

	let line_gross = if record.bought {
		actual_qty.as_f64() * unit_price_gross
	} else {
		0.0
	};
	// an overflowing product would poison every total downstream
	let line_gross = if line_gross.is_finite() { line_gross } else { 0.0 };
	let split = split_tax(line_gross, rate_percent);

	PurchaseRecord {
		plan_qty,
		actual_qty,
		unit_price_gross,
		line_gross,
		line_net: split.net,
		line_vat: split.tax,
		..record.clone()
	}
}
