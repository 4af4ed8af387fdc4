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
use crate::reports::table::Table;
use crate::shopping::plan::PlanItem;

pub struct PlanReporter<'a> {
	items: &'a [PlanItem],
}

impl<'a> PlanReporter<'a> {
	pub fn new(items: &'a [PlanItem]) -> Self {
		Self { items }
	}

	/// Numbered plan table; the numbers are what `plan set` and
	/// `plan remove` take.
	pub fn render(&self) -> String {
		if self.items.is_empty() {
			return "Plan is empty\n".to_string();
		}

		let mut table = Table::new(5);
		table.right_align(vec![0, 4]);
		table.add_header(vec!["#", "Item", "Category", "Unit", "Planned"]);
		table.add_separator();

		for (i, item) in self.items.iter().enumerate() {
			table.add_row(vec![
				(i + 1).to_string(),
				item.item.clone(),
				item.category.to_string(),
				item.unit.to_string(),
				item.plan_qty.to_string(),
			]);
		}

		table.render()
	}
}
