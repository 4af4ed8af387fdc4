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
use crate::calc::quantity::trim_decimals;
use crate::calc::reconcile::{
	CategorySummary, DeltaRow, PurchaseSummary, Reconciliation, Totals,
};
use crate::calc::tax::TaxRate;
use crate::reports::purchase_reporter::NO_PURCHASES;
use crate::reports::table::Table;
use crate::util::money::fmt_money;
use anyhow::Error;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
	Purchased,
	NothingPurchased,
}

/// Shape of `report --json`.
#[derive(Serialize)]
struct JsonReport<'a> {
	status: Status,
	tax_rate: f64,
	deltas: &'a [DeltaRow],
	categories: &'a [CategorySummary],
	totals: Totals,
}

pub struct SummaryReporter<'a> {
	reconciliation: &'a Reconciliation,
	rate: TaxRate,
	currency: &'a str,
}

impl<'a> SummaryReporter<'a> {
	pub fn new(
		reconciliation: &'a Reconciliation,
		rate: TaxRate,
		currency: &'a str,
	) -> Self {
		Self {
			reconciliation,
			rate,
			currency,
		}
	}

	/// Plan against actual, then spending by category and the grand totals.
	pub fn render(&self) -> String {
		let mut out = String::new();

		out.push_str("Plan vs actual\n\n");
		out.push_str(&self.render_deltas());

		out.push('\n');
		match &self.reconciliation.summary {
			PurchaseSummary::NothingPurchased => {
				out.push_str(NO_PURCHASES);
				out.push('\n');
			},
			PurchaseSummary::Purchased { categories, totals } => {
				out.push_str("By category\n\n");
				out.push_str(&self.render_categories(categories));
				out.push('\n');
				out.push_str(&self.render_totals(totals));
			},
		}

		out
	}

	fn render_deltas(&self) -> String {
		if self.reconciliation.deltas.is_empty() {
			return "Purchase table is empty\n".to_string();
		}

		let mut table = Table::new(6);
		table.right_align(vec![3, 4, 5]);
		table.add_header(vec![
			"Item", "Unit", "Bought", "Planned", "Actual", "Difference",
		]);
		table.add_separator();

		for d in &self.reconciliation.deltas {
			table.add_row(vec![
				d.item.clone(),
				d.unit.to_string(),
				if d.bought { "x" } else { "" }.to_string(),
				d.plan_qty.to_string(),
				d.actual_qty.to_string(),
				fmt_diff(d.qty_diff),
			]);
		}

		table.render()
	}

	fn render_categories(&self, categories: &[CategorySummary]) -> String {
		let mut table = Table::new(6);
		table.right_align(vec![1, 2, 3, 4, 5]);
		table.add_header(vec!["Category", "Items", "Qty", "Net", "Tax", "Gross"]);
		table.add_separator();

		for c in categories {
			table.add_row(vec![
				c.category.to_string(),
				c.items.to_string(),
				trim_decimals(c.qty, 3),
				fmt_money(c.net, ""),
				fmt_money(c.vat, ""),
				fmt_money(c.gross, ""),
			]);
		}

		table.render()
	}

	fn render_totals(&self, totals: &Totals) -> String {
		let mut table = Table::new(2);
		table.right_align(vec![1]);
		table.add_row(vec![
			"Items bought".to_string(),
			totals.items.to_string(),
		]);
		table.add_row(vec![
			"Net total".to_string(),
			fmt_money(totals.net, self.currency),
		]);
		table.add_row(vec![
			format!("Tax total ({})", self.rate),
			fmt_money(totals.vat, self.currency),
		]);
		table.add_row(vec![
			"Gross total".to_string(),
			fmt_money(totals.gross, self.currency),
		]);
		table.render()
	}

	pub fn to_json(&self) -> Result<String, Error> {
		let status = if self.reconciliation.is_nothing_purchased() {
			Status::NothingPurchased
		} else {
			Status::Purchased
		};

		let report = JsonReport {
			status,
			tax_rate: self.rate.percent(),
			deltas: &self.reconciliation.deltas,
			categories: self.reconciliation.categories(),
			totals: self.reconciliation.totals(),
		};

		Ok(serde_json::to_string_pretty(&report)?)
	}
}

fn fmt_diff(v: f64) -> String {
	let s = trim_decimals(v, 3);
	if v > 0.0 && s != "0" {
		format!("+{}", s)
	} else {
		s
	}
}
