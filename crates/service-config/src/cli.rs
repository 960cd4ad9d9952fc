//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// service-config - Consul config and KMS-encrypted Vault secrets
#[derive(Parser, Debug)]
#[command(name = "service-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to serverless.yml (searched upwards from the current directory by default)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Deployment stage (defaults to provider.stage)
    #[arg(short, long, global = true, env = "SERVICE_CONFIG_STAGE")]
    pub stage: Option<String>,

    /// AWS profile used for KMS
    #[arg(long, global = true, env = "AWS_PROFILE")]
    pub aws_profile: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<Utf8PathBuf>,
    pub stage: Option<String>,
    pub aws_profile: Option<String>,
}

impl Cli {
    pub fn global(&self) -> GlobalArgs {
        GlobalArgs {
            config: self.config.clone(),
            stage: self.stage.clone(),
            aws_profile: self.aws_profile.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a configuration value from Consul
    Config(ResolveArgs),

    /// Resolve a secret from Vault and print its KMS ciphertext
    Secret(ResolveArgs),

    /// Show the effective Consul and Vault base URLs
    Urls(UrlsArgs),

    /// Parse a reference without contacting any backend
    Parse(ParseArgs),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Reference, e.g. `path/to/key, fallback` or `{"address": "path/to/key"}`
    pub reference: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UrlsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Reference to parse
    pub reference: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
