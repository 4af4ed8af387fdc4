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
pub const DEFAULT_CURRENCY: &str = "so'm";

/// Renders an amount rounded to whole currency units with spaces between
/// thousands, e.g. `37 500 so'm`.
pub fn fmt_money(amount: f64, currency: &str) -> String {
	if !amount.is_finite() {
		return "-".to_string();
	}

	let rounded = amount.round() as i64;
	let digits = rounded.unsigned_abs().to_string();

	let mut grouped = String::new();
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(' ');
		}
		grouped.push(c);
	}

	let sign = if rounded < 0 { "-" } else { "" };
	if currency.is_empty() {
		format!("{}{}", sign, grouped)
	} else {
		format!("{}{} {}", sign, grouped, currency)
	}
}
