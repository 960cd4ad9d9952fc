//! `urls` command

use anyhow::Result;
use serde_json::{json, Value};
use service_config_core::DeploymentConfig;

use super::load_descriptor;
use crate::cli::{GlobalArgs, UrlsArgs};
use crate::output;

pub fn run(args: UrlsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_descriptor(global)?;
    let summary = summarize(&config, global.stage.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", config.config_path);
    for key in ["stage", "consul", "vault", "local_env"] {
        let value = match &summary[key] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        output::kv(key, &value);
    }
    Ok(())
}

fn summarize(config: &DeploymentConfig, stage: Option<&str>) -> Value {
    let plugin = config.plugin_config();
    let stage = stage.unwrap_or(config.stage());

    json!({
        "stage": stage,
        "consul": plugin.consul_url(),
        "vault": plugin.vault_url(),
        "local_env": plugin.uses_local_env(stage),
    })
}
