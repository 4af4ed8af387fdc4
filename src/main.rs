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
use crate::calc::tax::{TaxRate, DEFAULT_TAX_RATE};
use crate::catalog::category::Category;
use crate::catalog::common::COMMON_ITEMS;
use crate::catalog::guesser::{infer_category, infer_unit};
use crate::catalog::unit::Unit;
use crate::config::config_file::Config;
use crate::export::csv_writer::{plan_csv, purchases_csv, receipt_csv};
use crate::export::workbook::report_workbook;
use crate::import::importer::read_plan_csv;
use crate::parsing::bulk::BulkParser;
use crate::parsing::filesystem::{Filesystem, SessionFiles};
use crate::reports::plan_reporter::PlanReporter;
use crate::reports::purchase_reporter::PurchaseReporter;
use crate::reports::summary_reporter::SummaryReporter;
use crate::reports::table::Table;
use crate::shopping::plan::{Plan, PlanEdit};
use crate::shopping::purchase::PurchaseEdit;
use crate::shopping::session::Session;
use crate::util::money::{fmt_money, DEFAULT_CURRENCY};
use anyhow::{bail, Error};
use chrono::Local;
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

mod calc;
mod catalog;
mod config;
mod export;
mod import;
mod parsing;
mod reports;
mod shopping;
mod util;

const DEFAULT_PLAN_FILE: &str = "bozorlik_reja.csv";
const DEFAULT_PURCHASES_FILE: &str = "bozorlik_xarid.csv";

#[derive(Parser)]
#[command(
	name = "bozorlik",
	version = "1.0",
	about = "Shopping plan, purchases and tax-inclusive receipts"
)]
struct Cli {
	#[command(subcommand)]
	command: Command,

	// -----------
	// -- FLAGS --
	// -----------
	/// Custom config file location (default: ~/.config/bozorlik/config.toml)
	#[arg(long, global = true)]
	config: Option<String>,

	/// Plan file to work on (default: bozorlik_reja.csv)
	#[arg(long, global = true)]
	plan: Option<String>,

	/// Purchase table file to work on (default: bozorlik_xarid.csv)
	#[arg(long, global = true)]
	purchases: Option<String>,

	/// Tax rate in percent included in every price (default: 12)
	#[arg(short, long, global = true)]
	rate: Option<f64>,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if let Some(rate) = self.rate {
			TaxRate::new(rate)?;
		}

		Ok(())
	}
}

#[derive(Subcommand)]
enum Command {
	/// Build the shopping list before going to the market
	#[command(subcommand)]
	Plan(PlanCommand),

	/// Record what was actually bought and at what price
	#[command(subcommand)]
	Buy(BuyCommand),

	/// Plan vs actual, spending by category and totals
	Report {
		/// Print the report as JSON
		#[arg(long)]
		json: bool,

		/// Also write a spreadsheet (default: bozorlik_hisobot_<date>.xlsx)
		#[arg(long, value_name = "PATH")]
		xlsx: Option<Option<String>>,
	},

	/// Show the unit and category guessed for an item name
	Infer { name: String },

	/// List the quick-add catalogue, units and categories
	Catalog,
}

#[derive(Subcommand)]
enum PlanCommand {
	/// Print the plan
	Show,

	/// Add one item; unit and category are guessed unless given
	Add {
		name: String,
		#[arg(short, long, allow_hyphen_values = true)]
		qty: Option<String>,
		#[arg(short, long)]
		unit: Option<String>,
		#[arg(short, long)]
		category: Option<String>,
	},

	/// Add items from free text, one per line (reads stdin without FILE)
	Bulk { file: Option<String> },

	/// Change fields of plan row N
	Set {
		row: usize,
		#[arg(long)]
		item: Option<String>,
		#[arg(short, long, allow_hyphen_values = true)]
		qty: Option<String>,
		#[arg(short, long)]
		unit: Option<String>,
		#[arg(short, long)]
		category: Option<String>,
	},

	/// Delete plan row N
	Remove { row: usize },

	/// Empty the plan
	Clear,

	/// Replace the plan with the example list
	Example,

	/// Replace the plan with the contents of a CSV file
	Import { file: String },

	/// Write the plan to a CSV file
	Export { file: String },
}

#[derive(Subcommand)]
enum BuyCommand {
	/// Print the purchase table and the receipt
	Show,

	/// Start the purchase table over from the plan
	Derive,

	/// Record an item bought outside the plan
	Add {
		name: String,
		#[arg(short, long, allow_hyphen_values = true)]
		qty: Option<String>,
		#[arg(short, long, allow_hyphen_values = true)]
		price: Option<String>,
		#[arg(short, long)]
		unit: Option<String>,
		#[arg(short, long)]
		category: Option<String>,
	},

	/// Change fields of purchase row N
	Set {
		row: usize,
		#[arg(short, long, value_parser = BoolishValueParser::new())]
		bought: Option<bool>,
		#[arg(short, long, allow_hyphen_values = true)]
		qty: Option<String>,
		#[arg(short, long, allow_hyphen_values = true)]
		price: Option<String>,
		#[arg(long)]
		item: Option<String>,
		#[arg(short, long)]
		unit: Option<String>,
		#[arg(short, long)]
		category: Option<String>,
	},

	/// Delete purchase row N
	Remove { row: usize },

	/// Write the bought lines to a CSV file
	Receipt { file: String },

	/// Write the full purchase table to a CSV file
	Export { file: String },
}

/// Effective settings once flags and the config file are merged.
struct Settings {
	files: SessionFiles,
	tax_rate: TaxRate,
	currency: String,
}

impl Settings {
	fn resolve(args: &Cli, config: &Config) -> Result<Self, Error> {
		let tax_rate =
			TaxRate::new(args.rate.or(config.tax_rate).unwrap_or(DEFAULT_TAX_RATE))?;

		let plan = args
			.plan
			.as_deref()
			.or(config.plan_file())
			.unwrap_or(DEFAULT_PLAN_FILE);
		let purchases = args
			.purchases
			.as_deref()
			.or(config.purchases_file())
			.unwrap_or(DEFAULT_PURCHASES_FILE);

		Ok(Self {
			files: SessionFiles {
				plan: PathBuf::from(plan),
				purchases: PathBuf::from(purchases),
			},
			tax_rate,
			currency: config.currency().unwrap_or(DEFAULT_CURRENCY).to_string(),
		})
	}
}

fn main() -> Result<(), Error> {
	env_logger::Builder::from_env(
		env_logger::Env::default().filter_or("BOZORLIK_LOG", "warn"),
	)
	.init();

	let args = Cli::parse();
	args.validate()?;

	// these need no session at all
	match &args.command {
		Command::Infer { name } => {
			print!("{}", infer_report(name));
			return Ok(());
		},
		Command::Catalog => {
			print!("{}", catalog_report());
			return Ok(());
		},
		_ => {},
	}

	let fs = Filesystem::new();
	let config = fs.get_config(args.config.as_ref())?;
	let settings = Settings::resolve(&args, &config)?;
	let mut session = fs.load_session(&settings.files, settings.tax_rate)?;

	let changed = match args.command {
		Command::Plan(cmd) => plan_command(cmd, &mut session, &fs)?,
		Command::Buy(cmd) => buy_command(cmd, &mut session, &fs, &settings)?,
		Command::Report { json, xlsx } => {
			report(&session, &fs, &settings, json, xlsx)?;
			false
		},
		Command::Infer { .. } | Command::Catalog => false,
	};

	// only reached when the command went through
	if changed {
		fs.save_session(&session, &settings.files)?;
	}

	Ok(())
}

/// Runs a plan subcommand. Returns whether the session must be saved.
fn plan_command(
	cmd: PlanCommand,
	session: &mut Session,
	fs: &Filesystem,
) -> Result<bool, Error> {
	match cmd {
		PlanCommand::Show => {
			print!("{}", PlanReporter::new(session.plan().items()).render());
			Ok(false)
		},
		PlanCommand::Add {
			name,
			qty,
			unit,
			category,
		} => {
			let unit = parse_unit(unit.as_deref())?;
			let category = category.as_deref().map(Category::from_str_lossy);
			let item = session.plan_mut().quick_add(
				&name,
				qty.as_deref(),
				unit,
				category,
			)?;
			println!(
				"Added {} {} {} ({})",
				item.item, item.plan_qty, item.unit, item.category
			);
			Ok(true)
		},
		PlanCommand::Bulk { file } => {
			let text = match file {
				Some(path) => {
					let mut text = String::new();
					fs.open(Path::new(&path))?.read_to_string(&mut text)?;
					text
				},
				None => std::io::read_to_string(std::io::stdin())?,
			};

			let result = BulkParser::new().parse(&text);
			if result.items.is_empty() {
				bail!("Nothing recognized in the bulk input");
			}

			let added = result.items.len();
			session.plan_mut().extend(result.items);
			println!("Added {} items", added);
			if !result.skipped.is_empty() {
				println!(
					"Skipped lines: {}",
					result
						.skipped
						.iter()
						.map(|n| n.to_string())
						.collect::<Vec<String>>()
						.join(", ")
				);
			}
			Ok(true)
		},
		PlanCommand::Set {
			row,
			item,
			qty,
			unit,
			category,
		} => {
			let edit = PlanEdit {
				item,
				category: category.as_deref().map(Category::from_str_lossy),
				unit: parse_unit(unit.as_deref())?,
				plan_qty: qty,
			};
			session.plan_mut().edit(row, edit)?;
			print!("{}", PlanReporter::new(session.plan().items()).render());
			Ok(true)
		},
		PlanCommand::Remove { row } => {
			let removed = session.plan_mut().remove(row)?;
			println!("Removed {}", removed.item);
			Ok(true)
		},
		PlanCommand::Clear => {
			if session.plan().is_empty() {
				println!("Plan is already empty");
				return Ok(false);
			}
			session.plan_mut().clear();
			println!("Plan cleared");
			Ok(true)
		},
		PlanCommand::Example => {
			session.replace_plan(Plan::example());
			print!("{}", PlanReporter::new(session.plan().items()).render());
			Ok(true)
		},
		PlanCommand::Import { file } => {
			let plan = read_plan_csv(fs.open(Path::new(&file))?)?;
			let count = plan.len();
			session.replace_plan(plan);
			println!(
				"Imported {} items; run `buy derive` to start purchases from them",
				count
			);
			Ok(true)
		},
		PlanCommand::Export { file } => {
			fs.write(Path::new(&file), &plan_csv(session.plan().items())?)?;
			println!("Wrote {}", file);
			Ok(false)
		},
	}
}

/// Runs a buy subcommand. Returns whether the session must be saved.
fn buy_command(
	cmd: BuyCommand,
	session: &mut Session,
	fs: &Filesystem,
	settings: &Settings,
) -> Result<bool, Error> {
	match cmd {
		BuyCommand::Show => {
			let reporter =
				PurchaseReporter::new(session.purchases(), &settings.currency);
			print!("{}", reporter.render_table());
			println!();
			print!(
				"{}",
				reporter.render_receipt(
					&session.reconcile().totals(),
					session.tax_rate()
				)
			);
			Ok(false)
		},
		BuyCommand::Derive => {
			session.derive_purchases();
			println!("Purchase table derived from {} plan items", session.plan().len());
			Ok(true)
		},
		BuyCommand::Add {
			name,
			qty,
			price,
			unit,
			category,
		} => {
			let unit = parse_unit(unit.as_deref())?;
			let category = category.as_deref().map(Category::from_str_lossy);
			let line = session.add_purchase(
				&name,
				qty.as_deref(),
				price.as_deref(),
				unit,
				category,
			)?;
			println!(
				"Bought {} {} {} ({}) for {}",
				line.item,
				line.actual_qty,
				line.unit,
				line.category,
				fmt_money(line.line_gross, &settings.currency)
			);
			Ok(true)
		},
		BuyCommand::Set {
			row,
			bought,
			qty,
			price,
			item,
			unit,
			category,
		} => {
			let edit = PurchaseEdit {
				item,
				category: category.as_deref().map(Category::from_str_lossy),
				unit: parse_unit(unit.as_deref())?,
				bought,
				actual_qty: qty,
				unit_price_gross: price,
			};
			let line = session.edit_purchase(row, edit)?;
			println!(
				"{}: {} {} at {} = {} (tax {})",
				line.item,
				line.actual_qty,
				line.unit,
				fmt_money(line.unit_price_gross, &settings.currency),
				fmt_money(line.line_gross, &settings.currency),
				fmt_money(line.line_vat, &settings.currency),
			);
			Ok(true)
		},
		BuyCommand::Remove { row } => {
			let removed = session.remove_purchase(row)?;
			println!("Removed {}", removed.item);
			Ok(true)
		},
		BuyCommand::Receipt { file } => {
			fs.write(Path::new(&file), &receipt_csv(session.purchases())?)?;
			println!("Wrote {} receipt lines to {}", session.receipt().len(), file);
			Ok(false)
		},
		BuyCommand::Export { file } => {
			fs.write(Path::new(&file), &purchases_csv(session.purchases())?)?;
			println!("Wrote {}", file);
			Ok(false)
		},
	}
}

fn report(
	session: &Session,
	fs: &Filesystem,
	settings: &Settings,
	json: bool,
	xlsx: Option<Option<String>>,
) -> Result<(), Error> {
	let reconciliation = session.reconcile();

	if let Some(path) = xlsx {
		let path = path.unwrap_or_else(|| {
			format!("bozorlik_hisobot_{}.xlsx", Local::now().format("%Y-%m-%d"))
		});
		let workbook = report_workbook(session.purchases(), &reconciliation)?;
		fs.write(Path::new(&path), &workbook)?;
		log::info!("wrote report workbook to {}", path);
	}

	let reporter =
		SummaryReporter::new(&reconciliation, session.tax_rate(), &settings.currency);
	if json {
		println!("{}", reporter.to_json()?);
	} else {
		print!("{}", reporter.render());
	}

	Ok(())
}

fn parse_unit(unit: Option<&str>) -> Result<Option<Unit>, Error> {
	unit.map(Unit::from_str).transpose()
}

fn infer_report(name: &str) -> String {
	format!(
		"{}: {}, {}\n",
		name.trim(),
		infer_unit(name),
		infer_category(name)
	)
}

fn catalog_report() -> String {
	let mut table = Table::new(3);
	table.add_header(vec!["Item", "Unit", "Category"]);
	table.add_separator();
	for common in COMMON_ITEMS {
		table.add_row(vec![
			common.name.to_string(),
			common.unit.to_string(),
			common.category.to_string(),
		]);
	}

	let mut out = table.render();
	out.push_str(&format!(
		"\nUnits: {}\nCategories: {}\n",
		Unit::ALL
			.iter()
			.map(|u| u.name())
			.collect::<Vec<&str>>()
			.join(", "),
		Category::ALL
			.iter()
			.map(|c| c.name())
			.collect::<Vec<&str>>()
			.join(", ")
	));
	out
}
