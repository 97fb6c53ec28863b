//
//  bitly-cli
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Getting, setting and listing values in the configuration file. These
//! commands never contact the API.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use url::Url;

use crate::config::Config;
use crate::output::OutputFormat;

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(KeyArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Reset a configuration value to its default
    Unset(KeyArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Configuration key (base_url, access_token, default_group, format)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (base_url, access_token, default_group, format)
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    /// Get a configuration value
    fn get(&self, args: &KeyArgs, global: &GlobalOptions) -> Result<()> {
        check_key(&args.key)?;
        let config = global.load_config()?;
        let value = config.get(&args.key);

        if global.json {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(v) = value {
            println!("{}", v);
        }

        Ok(())
    }

    /// Set a configuration value
    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        check_key(&args.key)?;
        validate(&args.key, &args.value)?;

        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        config.set(&args.key, args.value.clone());
        config.save_to(&path)?;

        let shown = display_value(&args.key, &args.value);
        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
                "value": shown,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{} Set {} = {}", style("✓").green(), style(&args.key).cyan(), shown);
        }

        Ok(())
    }

    /// Unset a configuration value
    fn unset(&self, args: &KeyArgs, global: &GlobalOptions) -> Result<()> {
        check_key(&args.key)?;

        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        config.unset(&args.key);
        config.save_to(&path)?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{} Unset {}", style("✓").green(), style(&args.key).cyan());
        }

        Ok(())
    }

    /// List all configuration values
    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;

        if global.json {
            let mut result = serde_json::Map::new();
            for key in Config::KEYS {
                let value = config.get(key).map(|v| display_value(key, &v));
                result.insert(key.to_string(), serde_json::json!(value));
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        for key in Config::KEYS {
            let value = config
                .get(key)
                .map(|v| display_value(key, &v))
                .unwrap_or_else(|| "-".to_string());
            println!("{}: {}", style(key).cyan(), value);
        }

        Ok(())
    }

    /// Show configuration file path
    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let config_path = global.config_path()?;

        if global.json {
            let result = serde_json::json!({
                "path": config_path.display().to_string(),
                "exists": crate::config::config_exists(&config_path),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", config_path.display());
        }

        Ok(())
    }
}

fn check_key(key: &str) -> Result<()> {
    if !Config::KEYS.contains(&key) {
        bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            key,
            Config::KEYS.join(", ")
        );
    }
    Ok(())
}

fn validate(key: &str, value: &str) -> Result<()> {
    match key {
        "format" => {
            value.parse::<OutputFormat>().map_err(anyhow::Error::msg)?;
        }
        "base_url" => {
            let url = Url::parse(value)
                .map_err(|e| anyhow::anyhow!("Invalid value for base_url: {}", e))?;
            if url.cannot_be_a_base() {
                bail!("Invalid value for base_url: {} cannot carry a path", value);
            }
        }
        "access_token" | "default_group" if value.trim().is_empty() => {
            bail!("Value for {} must not be empty; use 'bitly config unset {}'", key, key);
        }
        _ => {}
    }
    Ok(())
}

/// Masks all but the last four characters of the access token.
fn display_value(key: &str, value: &str) -> String {
    if key != "access_token" {
        return value.to_string();
    }
    let count = value.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = value.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}
