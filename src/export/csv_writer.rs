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
use crate::shopping::plan::PlanItem;
use crate::shopping::purchase::PurchaseRecord;
use anyhow::{anyhow, Error};
use serde::Serialize;

pub const PLAN_COLUMNS: [&str; 4] = ["item", "category", "unit", "plan_qty"];

pub const PURCHASE_COLUMNS: [&str; 10] = [
	"item",
	"category",
	"unit",
	"plan_qty",
	"bought",
	"actual_qty",
	"unit_price_gross",
	"line_gross",
	"line_net",
	"line_vat",
];

pub const RECEIPT_COLUMNS: [&str; 8] = [
	"item",
	"category",
	"unit",
	"actual_qty",
	"unit_price_gross",
	"line_net",
	"line_vat",
	"line_gross",
];

#[derive(Serialize)]
struct ReceiptRow<'a> {
	item: &'a str,
	category: Category,
	unit: Unit,
	actual_qty: Quantity,
	unit_price_gross: f64,
	line_net: f64,
	line_vat: f64,
	line_gross: f64,
}

impl<'a> From<&'a PurchaseRecord> for ReceiptRow<'a> {
	fn from(r: &'a PurchaseRecord) -> Self {
		Self {
			item: &r.item,
			category: r.category,
			unit: r.unit,
			actual_qty: r.actual_qty,
			unit_price_gross: r.unit_price_gross,
			line_net: r.line_net,
			line_vat: r.line_vat,
			line_gross: r.line_gross,
		}
	}
}

/// Writes the header explicitly so that an empty table still produces a
/// well-formed file.
fn write_rows<T: Serialize>(
	header: &[&str],
	rows: impl IntoIterator<Item = T>,
) -> Result<Vec<u8>, Error> {
	let mut wtr = csv::WriterBuilder::new()
		.has_headers(false)
		.from_writer(Vec::new());

	wtr.write_record(header)?;
	for row in rows {
		wtr.serialize(row)?;
	}

	wtr.into_inner()
		.map_err(|e| anyhow!("failed to write CSV: {}", e.error()))
}

/// The plan as `item,category,unit,plan_qty`, UTF-8 with a header row.
pub fn plan_csv(items: &[PlanItem]) -> Result<Vec<u8>, Error> {
	write_rows(&PLAN_COLUMNS, items)
}

/// The full purchase table, as kept between runs.
pub fn purchases_csv(records: &[PurchaseRecord]) -> Result<Vec<u8>, Error> {
	write_rows(&PURCHASE_COLUMNS, records)
}

/// Bought lines only, in receipt column order.
pub fn receipt_csv(records: &[PurchaseRecord]) -> Result<Vec<u8>, Error> {
	write_rows(
		&RECEIPT_COLUMNS,
		records.iter().filter(|r| r.bought).map(ReceiptRow::from),
	)
}
