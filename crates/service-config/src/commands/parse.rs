//! `parse` command

use anyhow::{Context, Result};
use serde_json::json;
use service_config_resolver::parser;

use crate::cli::ParseArgs;
use crate::output;

pub fn run(args: ParseArgs) -> Result<()> {
    let reference = parser::parse(&args.reference).context("Failed to parse reference")?;

    if args.json {
        let value = json!({
            "path": reference.path,
            "fallback": reference.fallback,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::kv("path", &reference.path);
    output::kv("fallback", reference.fallback.as_deref().unwrap_or("-"));
    output::kv("env var", reference.last_segment());
    Ok(())
}
