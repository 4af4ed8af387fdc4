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
use crate::calc::normalize::{normalize, normalize_price};
use crate::catalog::category::Category;
use crate::catalog::unit::Unit;
use crate::shopping::plan::{Plan, PlanItem};
use crate::shopping::purchase::{parse_bought, PurchaseRecord};
use anyhow::{anyhow, bail, Error};
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;

pub const PLAN_REQUIRED: [&str; 3] = ["item", "unit", "plan_qty"];
pub const PURCHASE_REQUIRED: [&str; 2] = ["item", "unit"];

/// Header lookup that forgives case and surrounding whitespace.
struct Columns {
	index: HashMap<String, usize>,
}

impl Columns {
	fn new(headers: &StringRecord) -> Self {
		let mut index = HashMap::new();
		for (i, h) in headers.iter().enumerate() {
			// first occurrence wins for duplicated headers
			index.entry(h.trim().to_lowercase()).or_insert(i);
		}
		Self { index }
	}

	fn require(&self, required: &[&str]) -> Result<(), Error> {
		let missing: Vec<&str> = required
			.iter()
			.filter(|c| !self.index.contains_key(**c))
			.copied()
			.collect();

		if !missing.is_empty() {
			bail!(
				"CSV is missing required columns: {} (needs {})",
				missing.join(", "),
				required.join(", ")
			);
		}
		Ok(())
	}

	fn get<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
		self.index.get(column).and_then(|i| record.get(*i))
	}
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
	csv::ReaderBuilder::new()
		.trim(csv::Trim::All)
		.flexible(true)
		.from_reader(input)
}

fn row_unit(
	columns: &Columns,
	record: &StringRecord,
	line: usize,
) -> Result<Unit, Error> {
	let raw = columns.get(record, "unit").unwrap_or_default();
	Unit::from_str(raw).map_err(|e| anyhow!("{} (line {})", e, line))
}

/// Reads a plan table. `item`, `unit` and `plan_qty` must be present;
/// `category` is optional. Quantities that cannot be read become zero, but an
/// unknown unit rejects the whole file.
pub fn read_plan_csv<R: Read>(input: R) -> Result<Plan, Error> {
	let mut rdr = reader(input);
	let columns = Columns::new(rdr.headers()?);
	columns.require(&PLAN_REQUIRED)?;

	let mut items = Vec::new();
	for (i, result) in rdr.records().enumerate() {
		let record = result.map_err(|e| anyhow!("malformed CSV: {}", e))?;
		let line = i + 2;

		let unit = row_unit(&columns, &record, line)?;
		let category = columns
			.get(&record, "category")
			.map(Category::from_str_lossy)
			.unwrap_or_default();

		items.push(PlanItem {
			item: columns.get(&record, "item").unwrap_or_default().to_string(),
			category,
			unit,
			plan_qty: normalize(columns.get(&record, "plan_qty"), unit),
		});
	}

	Ok(Plan::new(items))
}

/// Reads a saved purchase table. Derived `line_*` columns are ignored; they
/// are recomputed once the table is loaded into a session.
pub fn read_purchases_csv<R: Read>(input: R) -> Result<Vec<PurchaseRecord>, Error> {
	let mut rdr = reader(input);
	let columns = Columns::new(rdr.headers()?);
	columns.require(&PURCHASE_REQUIRED)?;

	let mut records = Vec::new();
	for (i, result) in rdr.records().enumerate() {
		let record = result.map_err(|e| anyhow!("malformed CSV: {}", e))?;
		let line = i + 2;

		let unit = row_unit(&columns, &record, line)?;
		let category = columns
			.get(&record, "category")
			.map(Category::from_str_lossy)
			.unwrap_or_default();

		records.push(PurchaseRecord {
			item: columns.get(&record, "item").unwrap_or_default().to_string(),
			category,
			unit,
			plan_qty: normalize(columns.get(&record, "plan_qty"), unit),
			bought: columns
				.get(&record, "bought")
				.map(parse_bought)
				.unwrap_or(false),
			actual_qty: normalize(columns.get(&record, "actual_qty"), unit),
			unit_price_gross: normalize_price(
				columns.get(&record, "unit_price_gross"),
			),
			line_gross: 0.0,
			line_net: 0.0,
			line_vat: 0.0,
		});
	}

	Ok(records)
}
