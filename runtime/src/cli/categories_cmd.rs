//! `announce-feed categories`: list configured category keys.

use crate::category::Category;
use crate::cli::output;
use anyhow::Result;

pub fn run() -> Result<()> {
    if output::is_json() {
        let list: Vec<_> = Category::all()
            .map(|c| serde_json::json!({ "key": c.key(), "id": c.id() }))
            .collect();
        output::print_json(&serde_json::Value::Array(list));
        return Ok(());
    }

    for c in Category::all() {
        println!("{:>4}  {}", c.id(), c.key());
    }
    Ok(())
}
