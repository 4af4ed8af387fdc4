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
use serde::{Serialize, Serializer};
use std::fmt;

/// The closed set of shopping categories. `Boshqa` ("other") catches
/// everything that does not fit elsewhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
	MevaSabzavot,
	QuruqOziqOvqat,
	Ichimliklar,
	GoshtMahsulotlari,
	SutMahsulotlari,
	Shirinliklar,
	NonBakery,
	UyRozgor,
	#[default]
	Boshqa,
}

impl Category {
	pub const ALL: [Category; 9] = [
		Category::MevaSabzavot,
		Category::QuruqOziqOvqat,
		Category::Ichimliklar,
		Category::GoshtMahsulotlari,
		Category::SutMahsulotlari,
		Category::Shirinliklar,
		Category::NonBakery,
		Category::UyRozgor,
		Category::Boshqa,
	];

	pub fn name(&self) -> &'static str {
		match self {
			Category::MevaSabzavot => "Meva-sabzavot",
			Category::QuruqOziqOvqat => "Quruq oziq-ovqat",
			Category::Ichimliklar => "Ichimliklar",
			Category::GoshtMahsulotlari => "Go'sht mahsulotlari",
			Category::SutMahsulotlari => "Sut mahsulotlari",
			Category::Shirinliklar => "Shirinliklar",
			Category::NonBakery => "Non & bakery",
			Category::UyRozgor => "Uy-ro'zg'or",
			Category::Boshqa => "Boshqa",
		}
	}

	/// Exact (case-insensitive) lookup by display name. "Other" is accepted
	/// as an alias of the catch-all.
	pub fn lookup(s: &str) -> Option<Self> {
		let needle = fold_apostrophes(s.trim()).to_lowercase();
		if needle == "other" {
			return Some(Category::Boshqa);
		}

		Category::ALL
			.iter()
			.find(|c| c.name().to_lowercase() == needle)
			.copied()
	}

	/// Like `lookup`, but anything unrecognised (including blanks) lands in
	/// the catch-all category.
	pub fn from_str_lossy(s: &str) -> Self {
		if s.trim().is_empty() {
			return Category::Boshqa;
		}

		Category::lookup(s).unwrap_or_else(|| {
			log::warn!("unknown category '{}', using {}", s.trim(), Category::Boshqa);
			Category::Boshqa
		})
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

impl Serialize for Category {
	fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
		s.serialize_str(self.name())
	}
}

/// Uzbek text mixes several apostrophe lookalikes (oʻ, o‘, o’); collapse
/// them to the ASCII one used throughout the catalogue.
pub fn fold_apostrophes(s: &str) -> String {
	s.chars()
		.map(|c| match c {
			'\u{02BB}' | '\u{02BC}' | '\u{2018}' | '\u{2019}' | '`' => '\'',
			_ => c,
		})
		.collect()
}
