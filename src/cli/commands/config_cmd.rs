//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::engine::Context;

/// Get a configuration value.
pub fn get(_ctx: &Context, key: &str) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;

    // Known key without a value: print nothing
    if let Some(value) = config.get(key)? {
        println!("{}", value);
    }
    Ok(())
}

/// Set a configuration value.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load().context("Failed to load config")?;
    config.set(key, value)?;
    let path = config.save().context("Failed to write config")?;

    if !ctx.quiet {
        println!("Set {} in {}", key, path.display());
    }
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let entries = config.entries();

    if ctx.json {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    match config.loaded_from() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config file)"),
    }
    for (key, value) in entries {
        println!("{} = {}", key, value);
    }
    Ok(())
}
