//! Pairs command implementation.

use lowmodel_canonical::Pairs;
use lowmodel_node::{FromNode, Tree};
use serde_json::Value;

use crate::document::read_input;
use crate::output::format_json;

pub fn run(input: Option<String>, yaml: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (path, text) = read_input(input.as_deref())?;
    let mut tree = Tree::new();
    let root = tree
        .load_str(&text)
        .map_err(|e| format!("Invalid document {}: {}", path, e))?;
    let pairs = Pairs::<String, Value>::from_node(&tree, root)?;

    if yaml {
        print!("{}", serde_yaml::to_string(&pairs)?);
    } else {
        println!("{}", format_json(&pairs));
    }
    Ok(())
}
