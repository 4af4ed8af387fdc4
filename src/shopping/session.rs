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
use crate::calc::line::compute_line;
use crate::calc::normalize::{normalize, normalize_price};
use crate::calc::quantity::Quantity;
use crate::calc::reconcile::{reconcile, Reconciliation};
use crate::calc::tax::TaxRate;
use crate::catalog::category::Category;
use crate::catalog::guesser::{infer_category, infer_unit};
use crate::catalog::unit::Unit;
use crate::shopping::plan::{row_index, title_case, Plan};
use crate::shopping::purchase::{PurchaseEdit, PurchaseRecord};
use anyhow::{bail, Error};

/// Everything one user is working on: the plan, the purchase table derived
/// from it and the tax rate used to split prices.
///
/// Every method that touches purchases or the rate finishes with a full
/// recompute, so the derived line amounts are never stale.
#[derive(Clone, Debug)]
pub struct Session {
	plan: Plan,
	purchases: Vec<PurchaseRecord>,
	tax_rate: TaxRate,
}

impl Session {
	pub fn new(
		plan: Plan,
		purchases: Vec<PurchaseRecord>,
		tax_rate: TaxRate,
	) -> Self {
		let mut session = Self {
			plan,
			purchases,
			tax_rate,
		};
		session.recompute();
		session
	}

	/// A session whose purchase table is a fresh copy of the plan.
	pub fn from_plan(plan: Plan, tax_rate: TaxRate) -> Self {
		let mut session = Self::new(plan, Vec::new(), tax_rate);
		session.derive_purchases();
		session
	}

	pub fn plan(&self) -> &Plan {
		&self.plan
	}

	/// The plan has no derived fields, so it may be edited freely. Changes do
	/// not reach the purchase table until `derive_purchases` is called.
	pub fn plan_mut(&mut self) -> &mut Plan {
		&mut self.plan
	}

	pub fn replace_plan(&mut self, plan: Plan) {
		self.plan = plan;
	}

	pub fn purchases(&self) -> &[PurchaseRecord] {
		&self.purchases
	}

	pub fn tax_rate(&self) -> TaxRate {
		self.tax_rate
	}

	/// Throws away the purchase table and copies the current plan into it
	/// with all actuals zeroed.
	pub fn derive_purchases(&mut self) {
		self.purchases = self
			.plan
			.items()
			.iter()
			.map(PurchaseRecord::from_plan)
			.collect();
		self.recompute();
	}

	/// Records something bought that was not on the plan. Unit and category
	/// are guessed from the name unless given.
	pub fn add_purchase(
		&mut self,
		name: &str,
		qty: Option<&str>,
		price: Option<&str>,
		unit: Option<Unit>,
		category: Option<Category>,
	) -> Result<&PurchaseRecord, Error> {
		let name = name.trim();
		if name.is_empty() {
			bail!("Item name cannot be empty");
		}

		let unit = unit.unwrap_or_else(|| infer_unit(name));
		let category = category.unwrap_or_else(|| infer_category(name));
		let actual_qty = match qty {
			Some(q) => normalize(q, unit),
			None => Quantity::one(unit),
		};
		let price = price.map(normalize_price).unwrap_or(0.0);

		self.purchases.push(PurchaseRecord::ad_hoc(
			&title_case(name),
			category,
			unit,
			actual_qty,
			price,
		));
		self.recompute();

		Ok(&self.purchases[self.purchases.len() - 1])
	}

	/// Edits the purchase row with the given 1-based number.
	pub fn edit_purchase(
		&mut self,
		row: usize,
		edit: PurchaseEdit,
	) -> Result<&PurchaseRecord, Error> {
		let idx = row_index(row, self.purchases.len())?;
		edit.apply(&mut self.purchases[idx])?;
		self.recompute();
		Ok(&self.purchases[idx])
	}

	pub fn remove_purchase(&mut self, row: usize) -> Result<PurchaseRecord, Error> {
		let idx = row_index(row, self.purchases.len())?;
		let removed = self.purchases.remove(idx);
		self.recompute();
		Ok(removed)
	}

	/// The bought lines only, as printed on a receipt.
	pub fn receipt(&self) -> Vec<&PurchaseRecord> {
		self.purchases.iter().filter(|r| r.bought).collect()
	}

	pub fn reconcile(&self) -> Reconciliation {
		reconcile(&self.purchases)
	}

	fn recompute(&mut self) {
		let rate = self.tax_rate.percent();
		self.purchases = self
			.purchases
			.iter()
			.map(|r| compute_line(r, rate))
			.collect();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::shopping::plan::PlanItem;

	fn guruch_session() -> Session {
		let plan = Plan::new(vec![PlanItem::new(
			"Guruch",
			Category::QuruqOziqOvqat,
			Unit::Kg,
			3.0,
		)]);
		Session::from_plan(plan, TaxRate::default())
	}

	#[test]
	fn test_derive_and_edit() {
		let mut session = guruch_session();
		assert_eq!(session.purchases().len(), 1);
		assert!(session.reconcile().is_nothing_purchased());

		let line = session
			.edit_purchase(
				1,
				PurchaseEdit {
					bought: Some(true),
					actual_qty: Some("2.5".to_string()),
					unit_price_gross: Some("15000".to_string()),
					..Default::default()
				},
			)
			.unwrap();
		assert_eq!(line.line_gross, 37500.0);
		assert!((line.line_vat - 4017.857).abs() < 1e-3);
		assert!((line.line_net - 33482.143).abs() < 1e-3);

		let result = session.reconcile();
		assert_eq!(result.deltas[0].qty_diff, -0.5);
		assert_eq!(result.categories()[0].items, 1);
		assert_eq!(result.categories()[0].qty, 2.5);
		assert_eq!(result.totals().gross, 37500.0);
		assert_eq!(session.receipt().len(), 1);
	}

	#[test]
	fn test_rate_change_recomputes_every_line() {
		let mut session = guruch_session();
		session
			.edit_purchase(
				1,
				PurchaseEdit {
					bought: Some(true),
					actual_qty: Some("1".to_string()),
					unit_price_gross: Some("1120".to_string()),
					..Default::default()
				},
			)
			.unwrap();

		assert!((session.purchases()[0].line_vat - 120.0).abs() < 1e-9);

		// reloading the same tables under another rate redoes every line
		let session = Session::new(
			session.plan().clone(),
			session.purchases().to_vec(),
			TaxRate::new(0.0).unwrap(),
		);
		assert_eq!(session.purchases()[0].line_vat, 0.0);
		assert_eq!(session.purchases()[0].line_net, 1120.0);
	}

	#[test]
	fn test_plan_edits_do_not_leak_into_purchases() {
		let mut session = guruch_session();
		session
			.plan_mut()
			.quick_add("Suv", None, None, None)
			.unwrap();
		assert_eq!(session.plan().len(), 2);
		assert_eq!(session.purchases().len(), 1);

		session.derive_purchases();
		assert_eq!(session.purchases().len(), 2);
		assert_eq!(session.purchases()[1].item, "Suv");
	}

	#[test]
	fn test_ad_hoc_purchase() {
		let mut session = guruch_session();
		let line = session
			.add_purchase("kolbasa", Some("2"), Some("45000"), None, None)
			.unwrap();
		assert_eq!(line.item, "Kolbasa");
		assert_eq!(line.unit, Unit::Kg);
		assert_eq!(line.category, Category::GoshtMahsulotlari);
		assert_eq!(line.plan_qty, Quantity::Continuous(0.0));
		assert_eq!(line.line_gross, 90000.0);

		let result = session.reconcile();
		assert_eq!(result.deltas[1].qty_diff, 2.0);
		assert_eq!(result.totals().items, 1);

		assert!(session.add_purchase(" ", None, None, None, None).is_err());
	}

	#[test]
	fn test_row_errors_leave_state_alone() {
		let mut session = guruch_session();
		assert!(session.remove_purchase(2).is_err());
		assert!(session
			.edit_purchase(0, PurchaseEdit::default())
			.is_err());
		assert_eq!(session.purchases().len(), 1);

		session.remove_purchase(1).unwrap();
		assert!(session.purchases().is_empty());
		assert_eq!(session.plan().len(), 1);
	}
}
