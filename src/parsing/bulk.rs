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
use crate::catalog::guesser::infer_category;
use crate::catalog::unit::Unit;
use crate::shopping::plan::PlanItem;
use regex::Regex;

/// Turns free text, one item per line, into plan items. Two line shapes are
/// understood:
///
///   Guruch, 3, kg, Quruq oziq-ovqat
///   Zira 0.05 kg Quruq oziq-ovqat
///
/// The category is optional in both and is guessed from the name when left
/// out. In the second shape the name runs up to the first number that is
/// directly followed by a known unit, so names may contain spaces.
pub struct BulkParser {
	qty_regex: Regex,
}

#[derive(Debug, Default)]
pub struct BulkResult {
	pub items: Vec<PlanItem>,

	/// 1-based numbers of non-blank lines that could not be read.
	pub skipped: Vec<usize>,
}

impl BulkParser {
	pub fn new() -> Self {
		Self {
			qty_regex: Regex::new(r"^\d+(?:[.,]\d+)?$").unwrap(),
		}
	}

	pub fn parse(&self, text: &str) -> BulkResult {
		let mut result = BulkResult::default();

		for (i, line) in text.lines().enumerate() {
			let l = line.trim();
			if l.is_empty() {
				continue;
			}

			match self.parse_line(l) {
				Some(item) => result.items.push(item),
				None => {
					log::debug!("skipping unreadable line {}: {}", i + 1, l);
					result.skipped.push(i + 1);
				},
			}
		}

		result
	}

	fn parse_line(&self, line: &str) -> Option<PlanItem> {
		if line.contains(',') {
			if let Some(item) = self.parse_comma_separated(line) {
				return Some(item);
			}
		}
		self.parse_whitespace_separated(line)
	}

	fn parse_comma_separated(&self, line: &str) -> Option<PlanItem> {
		let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
		if fields.len() < 3 {
			return None;
		}

		let category = fields[3..]
			.iter()
			.filter(|f| !f.is_empty())
			.copied()
			.collect::<Vec<&str>>()
			.join(", ");
		self.build(fields[0], fields[1], fields[2], &category)
	}

	fn parse_whitespace_separated(&self, line: &str) -> Option<PlanItem> {
		let tokens: Vec<&str> = line.split_whitespace().collect();
		if tokens.len() < 3 {
			return None;
		}

		for i in 1..tokens.len() - 1 {
			if !self.qty_regex.is_match(tokens[i]) {
				continue;
			}
			if Unit::from_str(tokens[i + 1]).is_err() {
				continue;
			}

			let name = tokens[..i].join(" ");
			let category = tokens[i + 2..].join(" ");
			return self.build(&name, tokens[i], tokens[i + 1], &category);
		}

		None
	}

	fn build(
		&self,
		name: &str,
		qty: &str,
		unit: &str,
		category: &str,
	) -> Option<PlanItem> {
		if name.is_empty() || !self.qty_regex.is_match(qty) {
			return None;
		}
		let unit = Unit::from_str(unit).ok()?;

		let category = if category.is_empty() {
			infer_category(name)
		} else {
			Category::from_str_lossy(category)
		};

		Some(PlanItem::new(name, category, unit, qty.replace(',', ".").as_str()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::calc::quantity::Quantity;

	#[test]
	fn test_whitespace_line_with_category() {
		let result = BulkParser::new().parse("Suv 1.5 litr Ichimliklar");
		assert!(result.skipped.is_empty());
		assert_eq!(
			result.items,
			vec![PlanItem {
				item: "Suv".to_string(),
				category: Category::Ichimliklar,
				unit: Unit::Litr,
				plan_qty: Quantity::Continuous(1.5),
			}]
		);
	}

	#[test]
	fn test_comma_line_infers_category() {
		let result = BulkParser::new().parse("Kolbasa, 2, dona");
		assert_eq!(result.items.len(), 1);
		let item = &result.items[0];
		assert_eq!(item.item, "Kolbasa");
		assert_eq!(item.unit, Unit::Dona);
		assert_eq!(item.plan_qty, Quantity::Discrete(2));
		assert_eq!(item.category, Category::GoshtMahsulotlari);
	}

	#[test]
	fn test_multi_word_names_and_categories() {
		let text = "Guruch, 3, kg, Quruq oziq-ovqat\n\
			Zira 0.05 kg Quruq oziq-ovqat\n\
			Qora murch 0.1 kg\n\
			Sut 3.2% 2 karobka";
		let result = BulkParser::new().parse(text);
		assert!(result.skipped.is_empty());
		assert_eq!(result.items.len(), 4);

		assert_eq!(result.items[0].category, Category::QuruqOziqOvqat);
		assert_eq!(result.items[0].plan_qty, Quantity::Continuous(3.0));

		assert_eq!(result.items[1].item, "Zira");
		assert_eq!(result.items[1].plan_qty, Quantity::Continuous(0.05));
		assert_eq!(result.items[1].category, Category::QuruqOziqOvqat);

		assert_eq!(result.items[2].item, "Qora murch");
		assert_eq!(result.items[2].category, Category::QuruqOziqOvqat);

		assert_eq!(result.items[3].item, "Sut 3.2%");
		assert_eq!(result.items[3].unit, Unit::Karobka);
		assert_eq!(result.items[3].plan_qty, Quantity::Discrete(2));
	}

	#[test]
	fn test_decimal_comma() {
		let result = BulkParser::new().parse("Suv 1,5 litr");
		assert_eq!(result.items.len(), 1);
		assert_eq!(result.items[0].plan_qty, Quantity::Continuous(1.5));
		assert_eq!(result.items[0].category, Category::Ichimliklar);
	}

	#[test]
	fn test_malformed_lines_skipped() {
		let text = "\n\
			Olma 2 qop\n\
			just some words\n\
			, 2, kg\n\
			Non, many, dona\n\
			Non 3 dona\n";
		let result = BulkParser::new().parse(text);
		assert_eq!(result.items.len(), 1);
		assert_eq!(result.items[0].item, "Non");
		assert_eq!(result.skipped, vec![2, 3, 4, 5]);
	}

	#[test]
	fn test_unknown_category_is_other() {
		let result = BulkParser::new().parse("Sovun, 2, dona, Kimyoviy");
		assert_eq!(result.items[0].category, Category::Boshqa);
	}

	#[test]
	fn test_nothing_recognized() {
		let result = BulkParser::new().parse("hello\nworld");
		assert!(result.items.is_empty());
		assert_eq!(result.skipped.len(), 2);
	}
}
