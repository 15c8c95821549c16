//! Hash command implementation.

use lowmodel_canonical::Digest;
use lowmodel_core::ExtractOptions;
use lowmodel_schemas::{build_object, ObjectKind};
use serde_json::json;
use tracing::debug;

use crate::document::{load_index, locate};
use crate::output::format_json;

pub fn run(
    file: String,
    kind: ObjectKind,
    pointer: Option<String>,
    expect: Option<Digest>,
    json: bool,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = load_index(&file, options)?;
    let node = locate(&index, pointer.as_deref())?;
    let object = build_object(kind, node, &index)?;
    let digest = object.hash();
    debug!(kind = kind.name(), digest = %digest, "object hashed");

    if json {
        println!(
            "{}",
            format_json(&json!({
                "kind": kind.name(),
                "digest": digest,
                "hex": digest.to_hex(),
                "object": object,
            }))
        );
    } else {
        println!("{}", digest);
    }

    if let Some(expected) = expect {
        if expected != digest {
            return Err(
                format!("digest mismatch: expected {}, computed {}", expected, digest).into(),
            );
        }
    }
    Ok(())
}
