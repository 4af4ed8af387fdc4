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
use crate::calc::normalize::{normalize, normalize_price, renormalize};
use crate::calc::quantity::Quantity;
use crate::catalog::category::Category;
use crate::catalog::unit::Unit;
use crate::shopping::plan::PlanItem;
use anyhow::{bail, Error};
use serde::Serialize;

/// A plan line together with what actually happened at the market. Field
/// order is the column order of the purchase table file and the
/// "Purchases" sheet.
///
/// The `line_*` fields are derived; see `calc::line::compute_line`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PurchaseRecord {
	pub item: String,
	pub category: Category,
	pub unit: Unit,
	pub plan_qty: Quantity,
	pub bought: bool,
	pub actual_qty: Quantity,
	pub unit_price_gross: f64,
	pub line_gross: f64,
	pub line_net: f64,
	pub line_vat: f64,
}

impl PurchaseRecord {
	/// Copies a plan line with every actual zeroed out.
	pub fn from_plan(plan: &PlanItem) -> Self {
		Self {
			item: plan.item.clone(),
			category: plan.category,
			unit: plan.unit,
			plan_qty: renormalize(plan.plan_qty, plan.unit),
			bought: false,
			actual_qty: Quantity::zero(plan.unit),
			unit_price_gross: 0.0,
			line_gross: 0.0,
			line_net: 0.0,
			line_vat: 0.0,
		}
	}

	/// A purchase that was never on the plan. It is bought by definition and
	/// has a planned quantity of zero.
	pub fn ad_hoc(
		item: &str,
		category: Category,
		unit: Unit,
		actual_qty: Quantity,
		unit_price_gross: f64,
	) -> Self {
		Self {
			item: item.trim().to_string(),
			category,
			unit,
			plan_qty: Quantity::zero(unit),
			bought: true,
			actual_qty: renormalize(actual_qty, unit),
			unit_price_gross: unit_price_gross.max(0.0),
			line_gross: 0.0,
			line_net: 0.0,
			line_vat: 0.0,
		}
	}
}

/// Field changes for a single purchase row. `None` leaves a field as it is.
#[derive(Debug, Default)]
pub struct PurchaseEdit {
	pub item: Option<String>,
	pub category: Option<Category>,
	pub unit: Option<Unit>,
	pub bought: Option<bool>,
	pub actual_qty: Option<String>,
	pub unit_price_gross: Option<String>,
}

impl PurchaseEdit {
	/// Applies the edit to the given record. Derived fields are left stale;
	/// the owner recomputes them afterwards.
	pub fn apply(self, record: &mut PurchaseRecord) -> Result<(), Error> {
		if let Some(item) = self.item {
			if item.trim().is_empty() {
				bail!("Item name cannot be empty");
			}
			record.item = item.trim().to_string();
		}
		if let Some(category) = self.category {
			record.category = category;
		}
		if let Some(unit) = self.unit {
			record.unit = unit;
		}
		if let Some(bought) = self.bought {
			record.bought = bought;
		}
		if let Some(qty) = self.actual_qty {
			record.actual_qty = normalize(qty.as_str(), record.unit);
		}
		if let Some(price) = self.unit_price_gross {
			record.unit_price_gross = normalize_price(price.as_str());
		}

		Ok(())
	}
}

/// Reads the loose spellings a "bought" cell may have. Anything that is not
/// clearly affirmative counts as not bought.
pub fn parse_bought(s: &str) -> bool {
	matches!(
		s.trim().to_lowercase().as_str(),
		"true" | "yes" | "1" | "x"
	)
}
