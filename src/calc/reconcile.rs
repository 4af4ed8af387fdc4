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
use crate::catalog::category::Category;
use crate::catalog::unit::Unit;
use crate::shopping::purchase::PurchaseRecord;
use serde::Serialize;

/// Plan against actual for a single purchase line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeltaRow {
	pub item: String,
	pub category: Category,
	pub unit: Unit,
	pub plan_qty: Quantity,
	pub bought: bool,
	pub actual_qty: Quantity,
	pub line_gross: f64,
	pub line_net: f64,
	pub line_vat: f64,

	/// Negative when less was bought than planned. Computed whether or not
	/// the line was bought, so unplanned purchases show up as surplus.
	pub qty_diff: f64,
}

/// Spending within one category, over bought lines only.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategorySummary {
	pub category: Category,
	pub items: usize,
	pub qty: f64,
	pub net: f64,
	pub vat: f64,
	pub gross: f64,
}

impl CategorySummary {
	fn new(category: Category) -> Self {
		Self {
			category,
			items: 0,
			qty: 0.0,
			net: 0.0,
			vat: 0.0,
			gross: 0.0,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Totals {
	pub net: f64,
	pub vat: f64,
	pub gross: f64,
	pub items: usize,
}

/// Whether anything has been bought yet. An empty shopping trip is its own
/// state, not a table full of zeroes.
#[derive(Clone, Debug, PartialEq)]
pub enum PurchaseSummary {
	NothingPurchased,
	Purchased {
		categories: Vec<CategorySummary>,
		totals: Totals,
	},
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation {
	pub deltas: Vec<DeltaRow>,
	pub summary: PurchaseSummary,
}

impl Reconciliation {
	pub fn is_nothing_purchased(&self) -> bool {
		self.summary == PurchaseSummary::NothingPurchased
	}

	/// Per-category spending, biggest gross first. Empty when nothing was
	/// bought.
	pub fn categories(&self) -> &[CategorySummary] {
		match &self.summary {
			PurchaseSummary::NothingPurchased => &[],
			PurchaseSummary::Purchased { categories, .. } => categories,
		}
	}

	/// Grand totals; all zero when nothing was bought.
	pub fn totals(&self) -> Totals {
		match &self.summary {
			PurchaseSummary::NothingPurchased => Totals::default(),
			PurchaseSummary::Purchased { totals, .. } => *totals,
		}
	}
}

/// Compares every line against its plan, then groups the bought lines by
/// category and sums them up. Records are expected to have gone through
/// `compute_line` already.
pub fn reconcile(records: &[PurchaseRecord]) -> Reconciliation {
	let deltas = records
		.iter()
		.map(|r| DeltaRow {
			item: r.item.clone(),
			category: r.category,
			unit: r.unit,
			plan_qty: r.plan_qty,
			bought: r.bought,
			actual_qty: r.actual_qty,
			line_gross: r.line_gross,
			line_net: r.line_net,
			line_vat: r.line_vat,
			qty_diff: r.actual_qty.as_f64() - r.plan_qty.as_f64(),
		})
		.collect();

	let bought: Vec<&PurchaseRecord> = records.iter().filter(|r| r.bought).collect();
	if bought.is_empty() {
		return Reconciliation {
			deltas,
			summary: PurchaseSummary::NothingPurchased,
		};
	}

	// groups stay in first-encounter order until the final sort
	let mut categories: Vec<CategorySummary> = Vec::new();
	let mut totals = Totals::default();

	for record in bought {
		let group = match categories
			.iter()
			.position(|c| c.category == record.category)
		{
			Some(i) => &mut categories[i],
			None => {
				categories.push(CategorySummary::new(record.category));
				let last = categories.len() - 1;
				&mut categories[last]
			},
		};

		group.items += 1;
		group.qty += record.actual_qty.as_f64();
		group.net += record.line_net;
		group.vat += record.line_vat;
		group.gross += record.line_gross;

		totals.items += 1;
		totals.net += record.line_net;
		totals.vat += record.line_vat;
		totals.gross += record.line_gross;
	}

	// sort_by is stable, so equal gross keeps encounter order
	categories.sort_by(|a, b| b.gross.total_cmp(&a.gross));

	Reconciliation {
		deltas,
		summary: PurchaseSummary::Purchased { categories, totals },
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::calc::line::compute_line;
	use crate::shopping::plan::PlanItem;

	fn bought(
		item: &str,
		category: Category,
		unit: Unit,
		qty: f64,
		price: f64,
	) -> PurchaseRecord {
		let plan = PlanItem::new(item, category, unit, 1.0);
		let record = PurchaseRecord {
			bought: true,
			actual_qty: crate::calc::normalize::normalize(qty, unit),
			unit_price_gross: price,
			..PurchaseRecord::from_plan(&plan)
		};
		compute_line(&record, 12.0)
	}

	#[test]
	fn test_end_to_end_single_line() {
		let plan = PlanItem::new("Guruch", Category::QuruqOziqOvqat, Unit::Kg, 3.0);
		let record = PurchaseRecord {
			bought: true,
			actual_qty: Quantity::Continuous(2.5),
			unit_price_gross: 15000.0,
			..PurchaseRecord::from_plan(&plan)
		};
		let result = reconcile(&[compute_line(&record, 12.0)]);

		assert_eq!(result.deltas.len(), 1);
		assert_eq!(result.deltas[0].qty_diff, -0.5);

		let categories = result.categories();
		assert_eq!(categories.len(), 1);
		assert_eq!(categories[0].category, Category::QuruqOziqOvqat);
		assert_eq!(categories[0].items, 1);
		assert_eq!(categories[0].qty, 2.5);
		assert_eq!(categories[0].gross, 37500.0);
		assert!((categories[0].vat - 4017.857).abs() < 1e-3);
		assert!((categories[0].net - 33482.143).abs() < 1e-3);

		let totals = result.totals();
		assert_eq!(totals.items, 1);
		assert_eq!(totals.gross, 37500.0);
	}

	#[test]
	fn test_nothing_purchased() {
		let plan = PlanItem::new("Olma", Category::MevaSabzavot, Unit::Kg, 2.0);
		let result = reconcile(&[PurchaseRecord::from_plan(&plan)]);

		assert!(result.is_nothing_purchased());
		assert!(result.categories().is_empty());
		assert_eq!(result.totals(), Totals::default());
		// the delta view is still there, showing everything as under-bought
		assert_eq!(result.deltas[0].qty_diff, -2.0);

		assert!(reconcile(&[]).is_nothing_purchased());
	}

	#[test]
	fn test_grouping_and_order() {
		let records = vec![
			bought("Olma", Category::MevaSabzavot, Unit::Kg, 2.0, 12000.0),
			bought("Suv", Category::Ichimliklar, Unit::Litr, 5.0, 3000.0),
			bought("Anor", Category::MevaSabzavot, Unit::Kg, 1.5, 20000.0),
			bought("Tuz", Category::QuruqOziqOvqat, Unit::Kg, 1.0, 15000.0),
			bought("Sok", Category::Ichimliklar, Unit::Litr, 0.0, 9000.0),
		];
		let result = reconcile(&records);
		let categories = result.categories();

		assert_eq!(categories.len(), 3);
		assert_eq!(categories[0].category, Category::MevaSabzavot);
		assert_eq!(categories[0].items, 2);
		assert_eq!(categories[0].qty, 3.5);
		assert_eq!(categories[0].gross, 54000.0);

		// 15000 each: Ichimliklar was seen before Quruq oziq-ovqat
		assert_eq!(categories[1].category, Category::Ichimliklar);
		assert_eq!(categories[1].items, 2);
		assert_eq!(categories[1].gross, 15000.0);
		assert_eq!(categories[2].category, Category::QuruqOziqOvqat);
		assert_eq!(categories[2].gross, 15000.0);
	}

	#[test]
	fn test_category_sums_match_totals() {
		let records = vec![
			bought("Non", Category::NonBakery, Unit::Dona, 3.0, 4000.0),
			bought("Sut", Category::SutMahsulotlari, Unit::Karobka, 2.0, 11500.0),
			bought("Shokolad", Category::Shirinliklar, Unit::Dona, 1.0, 18990.0),
			bought("Kolbasa", Category::GoshtMahsulotlari, Unit::Kg, 0.75, 98000.0),
		];
		let result = reconcile(&records);
		let totals = result.totals();

		let gross: f64 = result.categories().iter().map(|c| c.gross).sum();
		let net: f64 = result.categories().iter().map(|c| c.net).sum();
		let vat: f64 = result.categories().iter().map(|c| c.vat).sum();
		assert!((gross - totals.gross).abs() < 1e-6);
		assert!((net - totals.net).abs() < 1e-6);
		assert!((vat - totals.vat).abs() < 1e-6);
		assert!((totals.net + totals.vat - totals.gross).abs() < 1e-6);
		assert_eq!(totals.items, 4);
	}

	#[test]
	fn test_unbought_lines_excluded_but_diffed() {
		let plan = PlanItem::new("Uzum", Category::MevaSabzavot, Unit::Kg, 1.0);
		let not_bought = PurchaseRecord {
			actual_qty: Quantity::Continuous(2.0),
			unit_price_gross: 30000.0,
			..PurchaseRecord::from_plan(&plan)
		};
		let records = vec![
			compute_line(&not_bought, 12.0),
			bought("Piyoz", Category::MevaSabzavot, Unit::Kg, 2.0, 5000.0),
		];
		let result = reconcile(&records);

		assert_eq!(result.deltas[0].qty_diff, 1.0);
		assert_eq!(result.categories()[0].items, 1);
		assert_eq!(result.totals().gross, 10000.0);
	}

	#[test]
	fn test_ad_hoc_shows_surplus() {
		let record = PurchaseRecord::ad_hoc(
			"Qatiq",
			Category::SutMahsulotlari,
			Unit::Karobka,
			Quantity::Discrete(3),
			7000.0,
		);
		let result = reconcile(&[compute_line(&record, 12.0)]);
		assert_eq!(result.deltas[0].qty_diff, 3.0);
		assert_eq!(result.totals().gross, 21000.0);
	}
}
