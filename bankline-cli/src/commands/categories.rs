//! Categories command - list the category vocabulary

use anyhow::Result;

use crate::output;
use bankline_core::services::RULES;
use bankline_core::Category;

pub fn run(json: bool) -> Result<()> {
    if json {
        let labels: Vec<&str> = Category::ALL.iter().map(Category::label).collect();
        println!("{}", serde_json::to_string_pretty(&labels)?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Category", "Suggested on import"]);
    for category in Category::ALL {
        let guessed = RULES.iter().any(|rule| rule.category == category);
        table.add_row(vec![category.label(), if guessed { "yes" } else { "" }]);
    }
    println!("{}", table);

    Ok(())
}
