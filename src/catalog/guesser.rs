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
use crate::catalog::category::{fold_apostrophes, Category};
use crate::catalog::unit::Unit;

/// One entry of an ordered keyword table. A name matches the rule when any
/// keyword occurs in it as a substring.
struct Rule<T: 'static> {
	result: T,
	keywords: &'static [&'static str],
}

const UNIT_RULES: &[Rule<Unit>] = &[
	Rule {
		result: Unit::Litr,
		keywords: &["suv", "yog'", "yog ", "sirka", "vinegar", "sok", "sharbat"],
	},
	Rule {
		result: Unit::Dona,
		keywords: &[
			"non",
			"tuxum",
			"shokolad",
			"konserva",
			"qadoq",
			"pachka",
			"pachkasi",
		],
	},
	Rule {
		result: Unit::Karobka,
		keywords: &["sut", "sok karobka", "quti", "qutisi"],
	},
	Rule {
		result: Unit::Kg,
		keywords: &[
			"go'sht",
			"gosht",
			"kolbasa",
			"guruch",
			"shakar",
			"tuz",
			"piyoz",
			"kartoshka",
			"un",
			"sabzi",
			"anor",
			"olma",
			"uzum",
			"shaftoli",
			"banan",
			"olcha",
			"bodring",
			"pamidor",
			"pomidor",
		],
	},
];

const CATEGORY_RULES: &[Rule<Category>] = &[
	Rule {
		result: Category::Ichimliklar,
		keywords: &["suv", "sok", "sharbat", "cola", "choy", "qahva", "kofe"],
	},
	Rule {
		result: Category::NonBakery,
		keywords: &["non", "bulochka", "baget", "pita"],
	},
	Rule {
		result: Category::Shirinliklar,
		keywords: &["shokolad", "konfet", "pechenye", "wafer", "vafli"],
	},
	Rule {
		result: Category::SutMahsulotlari,
		keywords: &["sut", "qatiq", "smetana", "tvorog", "pishloq", "sir"],
	},
	Rule {
		result: Category::GoshtMahsulotlari,
		keywords: &["go'sht", "gosht", "mol", "qoy", "tovuq", "kolbasa", "farsh"],
	},
	Rule {
		result: Category::QuruqOziqOvqat,
		keywords: &[
			"guruch",
			"grechka",
			"makaron",
			"shakar",
			"tuz",
			"ziravor",
			"murch",
			"zira",
			"qum shakar",
			"qand",
		],
	},
	Rule {
		result: Category::MevaSabzavot,
		keywords: &[
			"olma", "anor", "uzum", "shaftoli", "banan", "piyoz", "kartoshka",
			"sabzi", "bodring", "pomidor", "pamidor", "ko'kat", "kokat",
		],
	},
];

/// Guesses the unit of measure for a free-text item name. Falls back to
/// kilograms when no keyword matches.
///
/// This only pre-fills new entries; a wrong guess is corrected by editing the
/// row afterwards.
pub fn infer_unit(name: &str) -> Unit {
	first_match(UNIT_RULES, name).unwrap_or(Unit::Kg)
}

/// Guesses the category for a free-text item name, falling back to the
/// catch-all category.
pub fn infer_category(name: &str) -> Category {
	first_match(CATEGORY_RULES, name).unwrap_or(Category::Boshqa)
}

fn first_match<T: Copy>(rules: &[Rule<T>], name: &str) -> Option<T> {
	let n = fold_apostrophes(name).to_lowercase();
	rules
		.iter()
		.find(|rule| rule.keywords.iter().any(|k| n.contains(k)))
		.map(|rule| rule.result)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_infer_unit() {
		assert_eq!(infer_unit("Suv"), Unit::Litr);
		assert_eq!(infer_unit("Non"), Unit::Dona);
		assert_eq!(infer_unit("Sut 3.2%"), Unit::Karobka);
		assert_eq!(infer_unit("Guruch lazer"), Unit::Kg);
	}

	#[test]
	fn test_infer_unit_default() {
		assert_eq!(infer_unit("Salfetka"), Unit::Kg);
		assert_eq!(infer_unit(""), Unit::Kg);
	}

	#[test]
	fn test_first_rule_wins() {
		// "sok karobka" also contains "sok", which the litr rule lists first
		assert_eq!(infer_unit("Sok karobka"), Unit::Litr);
		assert_eq!(infer_category("Non"), Category::NonBakery);
		// "shokoladli sut" hits the sweets rule before the dairy rule
		assert_eq!(infer_category("Shokoladli sut"), Category::Shirinliklar);
	}

	#[test]
	fn test_infer_category() {
		assert_eq!(infer_category("Kolbasa"), Category::GoshtMahsulotlari);
		assert_eq!(infer_category("GURUCH"), Category::QuruqOziqOvqat);
		assert_eq!(infer_category("Olma"), Category::MevaSabzavot);
		assert_eq!(
			infer_category("Mol go\u{02BB}shti"),
			Category::GoshtMahsulotlari
		);
		assert_eq!(infer_category("Sovun"), Category::Boshqa);
	}
}
