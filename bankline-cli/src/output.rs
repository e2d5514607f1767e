//! Output formatting utilities

use bankline_core::Transaction;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Table of transactions, newest first as given
pub fn transaction_table(transactions: &[Transaction]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Date", "Amount", "Description", "Category", "Bank", "Fingerprint"]);

    for tx in transactions {
        let color = if tx.is_income { Color::Green } else { Color::Red };
        let amount = Cell::new(format!("{:.2}", tx.amount)).fg(color);
        table.add_row(vec![
            Cell::new(tx.date.format("%Y-%m-%d")),
            amount,
            Cell::new(&tx.description),
            Cell::new(tx.suggested_category.label()),
            Cell::new(tx.bank.code()),
            Cell::new(&tx.fingerprint),
        ]);
    }

    table
}

