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
use crate::calc::normalize::{normalize, renormalize, RawValue};
use crate::calc::quantity::Quantity;
use crate::catalog::category::Category;
use crate::catalog::common::{lookup_common, COMMON_ITEMS};
use crate::catalog::guesser::{infer_category, infer_unit};
use crate::catalog::unit::Unit;
use anyhow::{bail, Error};
use serde::Serialize;

/// One line of the shopping list as intended before going to the market.
/// Field order is the column order of the plan CSV.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanItem {
	pub item: String,
	pub category: Category,
	pub unit: Unit,
	pub plan_qty: Quantity,
}

impl PlanItem {
	pub fn new<'a>(
		item: &str,
		category: Category,
		unit: Unit,
		plan_qty: impl Into<RawValue<'a>>,
	) -> Self {
		Self {
			item: item.trim().to_string(),
			category,
			unit,
			plan_qty: normalize(plan_qty, unit),
		}
	}
}

/// Field changes for a single plan row. `None` leaves a field as it is.
#[derive(Debug, Default)]
pub struct PlanEdit {
	pub item: Option<String>,
	pub category: Option<Category>,
	pub unit: Option<Unit>,
	pub plan_qty: Option<String>,
}

/// The editable plan table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plan {
	items: Vec<PlanItem>,
}

impl Plan {
	pub fn new(items: Vec<PlanItem>) -> Self {
		Self { items }
	}

	/// A starter list built from the quick-add catalogue, one of each.
	pub fn example() -> Self {
		let items = COMMON_ITEMS
			.iter()
			.map(|c| {
				PlanItem::new(&title_case(c.name), c.category, c.unit, 1.0)
			})
			.collect();
		Self { items }
	}

	pub fn items(&self) -> &[PlanItem] {
		&self.items
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn push(&mut self, mut item: PlanItem) {
		item.plan_qty = renormalize(item.plan_qty, item.unit);
		self.items.push(item);
	}

	pub fn extend(&mut self, items: Vec<PlanItem>) {
		for item in items {
			self.push(item);
		}
	}

	/// Adds an item by name. Catalogue items bring their own unit and
	/// category, anything else is guessed from the name; explicit values win
	/// over both.
	pub fn quick_add(
		&mut self,
		name: &str,
		qty: Option<&str>,
		unit: Option<Unit>,
		category: Option<Category>,
	) -> Result<&PlanItem, Error> {
		let name = name.trim();
		if name.is_empty() {
			bail!("Item name cannot be empty");
		}

		let (default_unit, default_category) = match lookup_common(name) {
			Some(common) => (common.unit, common.category),
			None => (infer_unit(name), infer_category(name)),
		};
		let unit = unit.unwrap_or(default_unit);
		let category = category.unwrap_or(default_category);

		let plan_qty = match qty {
			Some(q) => normalize(q, unit),
			None => Quantity::one(unit),
		};

		self.items.push(PlanItem {
			item: title_case(name),
			category,
			unit,
			plan_qty,
		});

		Ok(&self.items[self.items.len() - 1])
	}

	/// Applies an edit to the row with the given 1-based number.
	pub fn edit(&mut self, row: usize, edit: PlanEdit) -> Result<(), Error> {
		let idx = row_index(row, self.items.len())?;
		let line = &mut self.items[idx];

		if let Some(item) = edit.item {
			if item.trim().is_empty() {
				bail!("Item name cannot be empty");
			}
			line.item = item.trim().to_string();
		}
		if let Some(category) = edit.category {
			line.category = category;
		}
		if let Some(unit) = edit.unit {
			line.unit = unit;
		}

		line.plan_qty = match edit.plan_qty {
			Some(q) => normalize(q.as_str(), line.unit),
			None => renormalize(line.plan_qty, line.unit),
		};

		Ok(())
	}

	/// Removes and returns the row with the given 1-based number.
	pub fn remove(&mut self, row: usize) -> Result<PlanItem, Error> {
		let idx = row_index(row, self.items.len())?;
		Ok(self.items.remove(idx))
	}

	pub fn clear(&mut self) {
		self.items.clear();
	}
}

/// Converts a 1-based row number as shown in tables into a vector index.
pub fn row_index(row: usize, len: usize) -> Result<usize, Error> {
	if row == 0 || row > len {
		bail!("No row {} (table has {} rows)", row, len);
	}
	Ok(row - 1)
}

/// Capitalises the first letter of each whitespace-separated word.
pub fn title_case(s: &str) -> String {
	s.split_whitespace()
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => {
					first.to_uppercase().collect::<String>()
						+ &chars.as_str().to_lowercase()
				},
				None => String::new(),
			}
		})
		.collect::<Vec<String>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_example_plan() {
		let plan = Plan::example();
		assert_eq!(plan.len(), COMMON_ITEMS.len());

		let anor = &plan.items()[0];
		assert_eq!(anor.item, "Anor");
		assert_eq!(anor.unit, Unit::Kg);
		assert_eq!(anor.plan_qty, Quantity::Continuous(1.0));

		let non = plan.items().iter().find(|i| i.item == "Non").unwrap();
		assert_eq!(non.plan_qty, Quantity::Discrete(1));
		assert_eq!(non.category, Category::NonBakery);
	}

	#[test]
	fn test_quick_add_from_catalogue() {
		let mut plan = Plan::default();
		let added = plan.quick_add("suv", Some("2"), None, None).unwrap();
		assert_eq!(added.item, "Suv");
		assert_eq!(added.unit, Unit::Litr);
		assert_eq!(added.category, Category::Ichimliklar);
		assert_eq!(added.plan_qty, Quantity::Continuous(2.0));
	}

	#[test]
	fn test_quick_add_inferred_and_overridden() {
		let mut plan = Plan::default();
		let added = plan.quick_add("tovuq go'shti", None, None, None).unwrap();
		assert_eq!(added.item, "Tovuq Go'shti");
		assert_eq!(added.unit, Unit::Kg);
		assert_eq!(added.category, Category::GoshtMahsulotlari);
		assert_eq!(added.plan_qty, Quantity::Continuous(1.0));

		let added = plan
			.quick_add("tuxum", Some("10.7"), None, Some(Category::Boshqa))
			.unwrap();
		assert_eq!(added.unit, Unit::Dona);
		assert_eq!(added.plan_qty, Quantity::Discrete(10));
		assert_eq!(added.category, Category::Boshqa);

		assert!(plan.quick_add("   ", None, None, None).is_err());
		assert_eq!(plan.len(), 2);
	}

	#[test]
	fn test_edit_renormalizes_on_unit_change() {
		let mut plan = Plan::new(vec![PlanItem::new(
			"Olma",
			Category::MevaSabzavot,
			Unit::Kg,
			2.75,
		)]);

		plan.edit(
			1,
			PlanEdit {
				unit: Some(Unit::Dona),
				..Default::default()
			},
		)
		.unwrap();
		assert_eq!(plan.items()[0].plan_qty, Quantity::Discrete(2));

		plan.edit(
			1,
			PlanEdit {
				plan_qty: Some("abc".to_string()),
				..Default::default()
			},
		)
		.unwrap();
		assert_eq!(plan.items()[0].plan_qty, Quantity::Discrete(0));
	}

	#[test]
	fn test_row_bounds() {
		let mut plan = Plan::example();
		assert!(plan.remove(0).is_err());
		assert!(plan.remove(plan.len() + 1).is_err());

		let removed = plan.remove(1).unwrap();
		assert_eq!(removed.item, "Anor");
		assert_eq!(plan.len(), COMMON_ITEMS.len() - 1);

		plan.clear();
		assert!(plan.is_empty());
	}

	#[test]
	fn test_title_case() {
		assert_eq!(title_case("  qum   shakar "), "Qum Shakar");
		assert_eq!(title_case("GURUCH"), "Guruch");
		assert_eq!(title_case(""), "");
	}
}
