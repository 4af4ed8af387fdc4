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
use crate::calc::reconcile::Reconciliation;
use crate::export::csv_writer::PURCHASE_COLUMNS;
use crate::shopping::purchase::PurchaseRecord;
use anyhow::{bail, Error};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

const SUMMARY_COLUMNS: [&str; 2] = ["metric", "value"];
const CATEGORY_COLUMNS: [&str; 6] = ["category", "items", "qty", "net", "vat", "gross"];

fn write_header(sheet: &mut Worksheet, header: &[&str]) -> Result<(), XlsxError> {
	for (col, name) in header.iter().enumerate() {
		sheet.write_string(0, col as u16, *name)?;
	}
	Ok(())
}

/// Builds the three-sheet report: the purchase table as held, the grand
/// totals and the per-category breakdown. There is nothing to report before
/// anything was bought.
pub fn report_workbook(
	purchases: &[PurchaseRecord],
	reconciliation: &Reconciliation,
) -> Result<Vec<u8>, Error> {
	if reconciliation.is_nothing_purchased() {
		bail!("Nothing purchased yet; there is no report to export");
	}

	let mut workbook = Workbook::new();

	let sheet = workbook.add_worksheet().set_name("Purchases")?;
	write_header(sheet, &PURCHASE_COLUMNS)?;
	for (i, r) in purchases.iter().enumerate() {
		let row = i as u32 + 1;
		sheet.write_string(row, 0, &r.item)?;
		sheet.write_string(row, 1, r.category.name())?;
		sheet.write_string(row, 2, r.unit.name())?;
		sheet.write_number(row, 3, r.plan_qty.as_f64())?;
		sheet.write_boolean(row, 4, r.bought)?;
		sheet.write_number(row, 5, r.actual_qty.as_f64())?;
		sheet.write_number(row, 6, r.unit_price_gross)?;
		sheet.write_number(row, 7, r.line_gross)?;
		sheet.write_number(row, 8, r.line_net)?;
		sheet.write_number(row, 9, r.line_vat)?;
	}

	let totals = reconciliation.totals();
	let summary = workbook.add_worksheet().set_name("Summary")?;
	write_header(summary, &SUMMARY_COLUMNS)?;
	let metrics = [
		("Net total (excl. tax)", totals.net),
		("Tax total", totals.vat),
		("Gross total (incl. tax)", totals.gross),
		("Items bought", totals.items as f64),
	];
	for (i, (metric, value)) in metrics.iter().enumerate() {
		let row = i as u32 + 1;
		summary.write_string(row, 0, *metric)?;
		summary.write_number(row, 1, *value)?;
	}

	let by_category = workbook.add_worksheet().set_name("ByCategory")?;
	write_header(by_category, &CATEGORY_COLUMNS)?;
	for (i, c) in reconciliation.categories().iter().enumerate() {
		let row = i as u32 + 1;
		by_category.write_string(row, 0, c.category.name())?;
		by_category.write_number(row, 1, c.items as f64)?;
		by_category.write_number(row, 2, c.qty)?;
		by_category.write_number(row, 3, c.net)?;
		by_category.write_number(row, 4, c.vat)?;
		by_category.write_number(row, 5, c.gross)?;
	}

	Ok(workbook.save_to_buffer()?)
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
	use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
	use std::io::Cursor;

	fn purchases() -> Vec<PurchaseRecord> {
		let guruch = PlanItem::new("Guruch", Category::QuruqOziqOvqat, Unit::Kg, 3.0);
		let non = PlanItem::new("Non & somsa", Category::NonBakery, Unit::Dona, 2.0);
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
			compute_line(&PurchaseRecord::from_plan(&non), 12.0),
		]
	}

	fn open(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
		open_workbook_from_rs(Cursor::new(bytes)).unwrap()
	}

	#[test]
	fn test_report_sheets() {
		let purchases = purchases();
		let bytes = report_workbook(&purchases, &reconcile(&purchases)).unwrap();
		let mut book = open(bytes);

		assert_eq!(book.sheet_names(), vec!["Purchases", "Summary", "ByCategory"]);

		let sheet = book.worksheet_range("Purchases").unwrap();
		assert_eq!(sheet.get_value((0, 0)), Some(&Data::String("item".to_string())));
		assert_eq!(sheet.get_value((0, 9)), Some(&Data::String("line_vat".to_string())));
		assert_eq!(
			sheet.get_value((2, 0)),
			Some(&Data::String("Non & somsa".to_string()))
		);
		assert_eq!(sheet.get_value((1, 7)), Some(&Data::Float(37500.0)));
		assert_eq!(sheet.get_value((2, 4)), Some(&Data::Bool(false)));

		let summary = book.worksheet_range("Summary").unwrap();
		assert_eq!(
			summary.get_value((4, 0)),
			Some(&Data::String("Items bought".to_string()))
		);
		assert_eq!(summary.get_value((4, 1)), Some(&Data::Float(1.0)));
		assert_eq!(summary.get_value((3, 1)), Some(&Data::Float(37500.0)));

		let by_category = book.worksheet_range("ByCategory").unwrap();
		assert_eq!(by_category.height(), 2);
		assert_eq!(
			by_category.get_value((1, 0)),
			Some(&Data::String("Quruq oziq-ovqat".to_string()))
		);
		assert_eq!(by_category.get_value((1, 5)), Some(&Data::Float(37500.0)));
	}

	#[test]
	fn test_nothing_purchased_refused() {
		let guruch = PlanItem::new("Guruch", Category::QuruqOziqOvqat, Unit::Kg, 3.0);
		let purchases = vec![PurchaseRecord::from_plan(&guruch)];
		let err = report_workbook(&purchases, &reconcile(&purchases))
			.err()
			.unwrap();
		assert!(err.to_string().contains("Nothing purchased yet"));
	}
}
