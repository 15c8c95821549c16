//! Extensions command implementation.

use lowmodel_core::ExtractOptions;
use lowmodel_schemas::{build_object, ObjectKind};

use crate::document::{load_index, locate};
use crate::output::format_json;

pub fn run(
    file: String,
    kind: ObjectKind,
    pointer: Option<String>,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = load_index(&file, options)?;
    let node = locate(&index, pointer.as_deref())?;
    let object = build_object(kind, node, &index)?;
    println!("{}", format_json(object.extensions()));
    Ok(())
}
