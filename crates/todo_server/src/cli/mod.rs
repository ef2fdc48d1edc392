use clap::{Parser, Subcommand};
use todo_core::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API and the daily purge of completed todos
    ///
    /// Example: todo_server serve
    /// Example: todo_server serve --config-override bind=0.0.0.0:8080
    Serve,
    /// Delete every completed todo once and exit
    ///
    /// Example: todo_server purge
    /// Example: todo_server purge --json
    Purge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Bind,
    DatabaseUrl,
    CorsOrigin,
    PurgeAt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    if value.is_empty() {
        return Err("override value cannot be empty".to_string());
    }

    let canonical_field = canonicalize_flag_name(key_raw)
        .ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match canonical_field.as_str() {
        "bind" | "listen" => ConfigOverrideTarget::Bind,
        "database_url" | "database" | "db" => ConfigOverrideTarget::DatabaseUrl,
        "cors_origin" | "origin" => ConfigOverrideTarget::CorsOrigin,
        "purge_at" => ConfigOverrideTarget::PurgeAt,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

/// Folds every `--config-override` argument into one set of overrides.
/// Later values for the same key win.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        let slot = match parsed.target {
            ConfigOverrideTarget::Bind => &mut overrides.bind,
            ConfigOverrideTarget::DatabaseUrl => &mut overrides.database_url,
            ConfigOverrideTarget::CorsOrigin => &mut overrides.cors_origin,
            ConfigOverrideTarget::PurgeAt => &mut overrides.purge_at,
        };
        *slot = Some(parsed.value);
    }
    Ok(overrides)
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
