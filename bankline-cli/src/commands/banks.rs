//! Banks command - list the banks statements can be imported from

use anyhow::Result;
use serde::Serialize;

use crate::output;
use bankline_core::statement::supported_banks;
use bankline_core::Bank;

#[derive(Serialize)]
struct BankInfo {
    code: &'static str,
    name: &'static str,
    supported: bool,
}

pub fn run(json: bool) -> Result<()> {
    // Registered formats first, in detection order
    let mut banks = supported_banks();
    banks.extend(Bank::ALL.into_iter().filter(|b| !b.is_supported()));

    let infos: Vec<BankInfo> = banks
        .iter()
        .map(|b| BankInfo {
            code: b.code(),
            name: b.name(),
            supported: b.is_supported(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Code", "Bank", "Import"]);
    for info in &infos {
        table.add_row(vec![
            info.code,
            info.name,
            if info.supported { "supported" } else { "coming soon" },
        ]);
    }
    println!("{}", table);

    Ok(())
}
