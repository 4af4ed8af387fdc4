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
use crate::catalog::category::Category;
use crate::catalog::unit::Unit;

/// A frequently bought item with the unit and category it is usually
/// listed under.
pub struct CommonItem {
	pub name: &'static str,
	pub unit: Unit,
	pub category: Category,
}

pub const COMMON_ITEMS: &[CommonItem] = &[
	CommonItem {
		name: "anor",
		unit: Unit::Kg,
		category: Category::MevaSabzavot,
	},
	CommonItem {
		name: "olma",
		unit: Unit::Kg,
		category: Category::MevaSabzavot,
	},
	CommonItem {
		name: "uzum",
		unit: Unit::Kg,
		category: Category::MevaSabzavot,
	},
	CommonItem {
		name: "shaftoli",
		unit: Unit::Kg,
		category: Category::MevaSabzavot,
	},
	CommonItem {
		name: "piyoz",
		unit: Unit::Kg,
		category: Category::MevaSabzavot,
	},
	CommonItem {
		name: "kartoshka",
		unit: Unit::Kg,
		category: Category::MevaSabzavot,
	},
	CommonItem {
		name: "shakar",
		unit: Unit::Kg,
		category: Category::QuruqOziqOvqat,
	},
	CommonItem {
		name: "tuz",
		unit: Unit::Kg,
		category: Category::QuruqOziqOvqat,
	},
	CommonItem {
		name: "non",
		unit: Unit::Dona,
		category: Category::NonBakery,
	},
	CommonItem {
		name: "shokolad",
		unit: Unit::Dona,
		category: Category::Shirinliklar,
	},
	CommonItem {
		name: "suv",
		unit: Unit::Litr,
		category: Category::Ichimliklar,
	},
	CommonItem {
		name: "sut",
		unit: Unit::Karobka,
		category: Category::SutMahsulotlari,
	},
];

/// Exact, case-insensitive catalogue lookup.
pub fn lookup_common(name: &str) -> Option<&'static CommonItem> {
	let needle = name.trim().to_lowercase();
	COMMON_ITEMS.iter().find(|c| c.name == needle)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_lookup_common() {
		let sut = lookup_common(" Sut ").unwrap();
		assert_eq!(sut.unit, Unit::Karobka);
		assert_eq!(sut.category, Category::SutMahsulotlari);

		assert!(lookup_common("sut qatiq").is_none());
	}
}
