//! `config` and `secret` commands

use anyhow::{Context, Result};
use service_config_resolver::{
    ResolveOptions, ResolvedValue, ServiceConfigPlugin, VariableRequest, SECRET_CONFIG,
    SERVICE_CONFIG,
};
use tracing::info;

use super::load_descriptor;
use crate::cli::{GlobalArgs, ResolveArgs};
use crate::output;

pub async fn config(args: ResolveArgs, global: &GlobalArgs) -> Result<()> {
    run(SERVICE_CONFIG, args, global).await
}

pub async fn secret(args: ResolveArgs, global: &GlobalArgs) -> Result<()> {
    run(SECRET_CONFIG, args, global).await
}

async fn run(source: &str, args: ResolveArgs, global: &GlobalArgs) -> Result<()> {
    let request = parse_request(&args.reference)?;
    let config = load_descriptor(global)?;
    info!("Using descriptor {}", config.config_path);

    let plugin = ServiceConfigPlugin::new(
        config.inner().clone(),
        ResolveOptions {
            stage: global.stage.clone(),
            aws_profile: global.aws_profile.clone(),
        },
    )
    .context("Failed to initialize resolver")?;

    let resolved = plugin
        .resolve(source, request)
        .await
        .with_context(|| format!("Failed to resolve {}:{}", source, args.reference))?;

    print!("{}", render(&resolved, args.json)?);
    if resolved.value.is_none() && !args.json {
        output::warning("Reference resolved to no value");
    }
    Ok(())
}

/// Accept either a bare reference or an `{"address": ...}` JSON wrapper
fn parse_request(raw: &str) -> Result<VariableRequest> {
    if raw.trim_start().starts_with('{') {
        serde_json::from_str(raw).context("Invalid JSON variable request")
    } else {
        Ok(VariableRequest::from(raw))
    }
}

fn render(resolved: &ResolvedValue, json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(resolved)?));
    }
    Ok(match &resolved.value {
        Some(value) => format!("{}\n", value),
        None => String::new(),
    })
}
