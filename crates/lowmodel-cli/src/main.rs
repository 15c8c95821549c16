//! lowmodel CLI - build, hash and inspect low-level document objects.

use clap::{Parser, Subcommand};
use lowmodel_canonical::Digest;
use lowmodel_core::{ExtractOptions, MergeKeyPolicy};
use lowmodel_schemas::ObjectKind;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod document;
mod output;

use commands::{extensions, hash, pairs};

#[derive(Parser)]
#[command(name = "lowmodel")]
#[command(about = "Build, hash and inspect low-level document objects")]
struct Cli {
    /// How to treat YAML merge keys (warn, reject, ignore)
    #[arg(long, global = true, default_value_t = MergeKeyPolicy::Warn)]
    merge_keys: MergeKeyPolicy,
    /// Regex selecting vendor-extension keys (default: ^x-)
    #[arg(long, global = true)]
    extension_pattern: Option<String>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an object and print its structural hash
    Hash {
        /// Path to a YAML or JSON document
        file: String,
        /// Object kind, e.g. tag, v2-responses, v3-response
        #[arg(long)]
        kind: ObjectKind,
        /// JSON pointer to the object (default: document root)
        #[arg(long)]
        pointer: Option<String>,
        /// Fail unless the hash equals this digest (hex or base64url)
        #[arg(long, value_name = "DIGEST")]
        expect: Option<Digest>,
        /// Output kind, digest and object as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build an object and print its vendor extensions
    Extensions {
        /// Path to a YAML or JSON document
        file: String,
        /// Object kind, e.g. tag, v2-responses, v3-response
        #[arg(long)]
        kind: ObjectKind,
        /// JSON pointer to the object (default: document root)
        #[arg(long)]
        pointer: Option<String>,
    },
    /// Re-encode a mapping document, preserving key order
    Pairs {
        /// Input document (or stdin if not provided)
        input: Option<String>,
        /// Emit YAML instead of JSON
        #[arg(long)]
        yaml: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn options(
    merge_keys: MergeKeyPolicy,
    extension_pattern: Option<&str>,
) -> Result<ExtractOptions, Box<dyn std::error::Error>> {
    let options = ExtractOptions::default().with_merge_keys(merge_keys);
    match extension_pattern {
        Some(pattern) => Ok(options
            .with_extension_pattern(pattern)
            .map_err(|e| format!("Invalid extension pattern: {}", e))?),
        None => Ok(options),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = options(cli.merge_keys, cli.extension_pattern.as_deref()).and_then(|options| {
        match cli.command {
            Commands::Hash {
                file,
                kind,
                pointer,
                expect,
                json,
            } => hash::run(file, kind, pointer, expect, json, options),
            Commands::Extensions {
                file,
                kind,
                pointer,
            } => extensions::run(file, kind, pointer, options),
            Commands::Pairs { input, yaml } => pairs::run(input, yaml),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
