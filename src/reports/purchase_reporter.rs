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
use crate::calc::reconcile::Totals;
use crate::calc::tax::TaxRate;
use crate::reports::table::Table;
use crate::shopping::purchase::PurchaseRecord;
use crate::util::money::fmt_money;

pub const NO_PURCHASES: &str = "No purchases yet";

pub struct PurchaseReporter<'a> {
	records: &'a [PurchaseRecord],
	currency: &'a str,
}

impl<'a> PurchaseReporter<'a> {
	pub fn new(records: &'a [PurchaseRecord], currency: &'a str) -> Self {
		Self { records, currency }
	}

	/// The whole purchase table, bought or not, numbered for `buy set`.
	pub fn render_table(&self) -> String {
		if self.records.is_empty() {
			return "Purchase table is empty\n".to_string();
		}

		let mut table = Table::new(10);
		table.right_align(vec![0, 4, 6, 7, 8, 9]);
		table.add_header(vec![
			"#", "Item", "Category", "Unit", "Planned", "Bought", "Actual",
			"Price", "Gross", "Tax",
		]);
		table.add_separator();

		for (i, r) in self.records.iter().enumerate() {
			table.add_row(vec![
				(i + 1).to_string(),
				r.item.clone(),
				r.category.to_string(),
				r.unit.to_string(),
				r.plan_qty.to_string(),
				if r.bought { "x" } else { "" }.to_string(),
				r.actual_qty.to_string(),
				fmt_money(r.unit_price_gross, ""),
				fmt_money(r.line_gross, ""),
				fmt_money(r.line_vat, ""),
			]);
		}

		table.render()
	}

	/// Bought lines followed by the net, tax and gross totals.
	pub fn render_receipt(&self, totals: &Totals, rate: TaxRate) -> String {
		let bought: Vec<&PurchaseRecord> =
			self.records.iter().filter(|r| r.bought).collect();
		if bought.is_empty() {
			return format!("{}\n", NO_PURCHASES);
		}

		let mut table = Table::new(5);
		table.right_align(vec![1, 3, 4]);
		table.add_header(vec!["Item", "Qty", "Unit", "Price", "Total"]);
		table.add_separator();

		for r in bought {
			table.add_row(vec![
				r.item.clone(),
				r.actual_qty.to_string(),
				r.unit.to_string(),
				fmt_money(r.unit_price_gross, ""),
				fmt_money(r.line_gross, self.currency),
			]);
		}

		table.add_partial_separator(vec![4]);
		table.add_row(vec![
			"Net".to_string(),
			String::new(),
			String::new(),
			String::new(),
			fmt_money(totals.net, self.currency),
		]);
		table.add_row(vec![
			format!("Tax ({})", rate),
			String::new(),
			String::new(),
			String::new(),
			fmt_money(totals.vat, self.currency),
		]);
		table.add_row(vec![
			"Total".to_string(),
			String::new(),
			String::new(),
			String::new(),
			fmt_money(totals.gross, self.currency),
		]);

		table.render()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::calc::line::compute_line;
	use crate::calc::quantity::Quantity;
	use crate::calc::reconcile::reconcile;
	use crate::catalog::category::Category;
	use crate::catalog::unit::Unit;
	use crate::shopping::plan::PlanItem;

	fn records() -> Vec<PurchaseRecord> {
		let guruch = PlanItem::new("Guruch", Category::QuruqOziqOvqat, Unit::Kg, 3.0);
		let tuz = PlanItem::new("Tuz", Category::QuruqOziqOvqat, Unit::Kg, 1.0);
		vec![
			compute_line(
				&PurchaseRecord {
					bought: true,
					actual_qty: Quantity::Continuous(2.5),
					unit_price_gross: 15000.0,
					..PurchaseRecord::from_plan(&guruch)
				},
				12.0,
			),
			compute_line(&PurchaseRecord::from_plan(&tuz), 12.0),
		]
	}

	#[test]
	fn test_table_lists_everything() {
		let records = records();
		let out = PurchaseReporter::new(&records, "so'm").render_table();
		let lines: Vec<&str> = out.lines().collect();

		assert_eq!(lines.len(), 4);
		assert!(lines[2].starts_with("1   Guruch"));
		assert!(lines[2].contains("15 000"));
		assert!(lines[2].contains("37 500"));
		assert!(lines[3].starts_with("2   Tuz"));
	}

	#[test]
	fn test_receipt_totals() {
		let records = records();
		let totals = reconcile(&records).totals();
		let out = PurchaseReporter::new(&records, "so'm")
			.render_receipt(&totals, TaxRate::default());

		assert!(out.contains("Guruch"));
		assert!(!out.contains("Tuz"));
		let lines: Vec<&str> = out.lines().collect();
		let n = lines.len();
		assert!(lines[n - 3].starts_with("Net"));
		assert!(lines[n - 3].ends_with("33 482 so'm"));
		assert!(lines[n - 2].starts_with("Tax (12%)"));
		assert!(lines[n - 2].ends_with("4 018 so'm"));
		assert!(lines[n - 1].starts_with("Total"));
		assert!(lines[n - 1].ends_with("37 500 so'm"));
	}

	#[test]
	fn test_receipt_without_purchases() {
		let guruch = PlanItem::new("Guruch", Category::QuruqOziqOvqat, Unit::Kg, 3.0);
		let records = vec![PurchaseRecord::from_plan(&guruch)];
		let out = PurchaseReporter::new(&records, "so'm")
			.render_receipt(&Totals::default(), TaxRate::default());
		assert_eq!(out, "No purchases yet\n");
	}
}
