//
//  bitly-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod config;
mod domain;
mod group;
mod link;
mod metrics;
mod org;
mod user;

pub use config::ConfigCommand;
pub use domain::DomainCommand;
pub use group::GroupCommand;
pub use link::LinkCommand;
pub use org::OrgCommand;
pub use user::UserCommand;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::{Parser, Subcommand};

use crate::api::BitlyClient;
use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};

/// Bitly CLI - Shorten and track links from the command line
#[derive(Parser, Debug)]
#[command(
    name = "bitly",
    version,
    about = "Shorten and track links from the command line",
    long_about = "bitly is a CLI for the Bitly v4 API.\n\n\
                  It shortens links and brings their click metrics, groups and \
                  organizations to your terminal.",
    propagate_version = true,
    after_help = "Use 'bitly <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Access token (overrides the configured one)
    #[arg(long, global = true, env = "BITLY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL (overrides the configured one)
    #[arg(long, global = true, env = "BITLY_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to the configuration file
    #[arg(long, global = true, env = "BITLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// The configuration file in effect.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    /// `--json` wins; otherwise the configured format, falling back to a table.
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        if self.json {
            return OutputFormat::Json;
        }
        config.output.format.parse().unwrap_or_else(|e: String| {
            tracing::warn!("{}", e);
            OutputFormat::Table
        })
    }

    /// Builds a client from the configuration with flag and environment
    /// overrides applied.
    pub fn client(&self, config: &Config) -> Result<BitlyClient> {
        let mut api = config.api_with_token(self.token.as_deref());
        if let Some(base_url) = &self.base_url {
            api.base_url = base_url.clone();
        }
        Ok(BitlyClient::from_config(&api)?)
    }
}

/// Everything a remote command needs: the loaded configuration, a client
/// and a writer.
pub(crate) struct Session {
    pub config: Config,
    pub client: BitlyClient,
    pub writer: OutputWriter,
}

impl Session {
    pub fn open(global: &GlobalOptions) -> Result<Self> {
        let config = global.load_config()?;
        let client = global.client(&config)?;
        let writer = OutputWriter::new(global.output_format(&config));
        Ok(Self {
            config,
            client,
            writer,
        })
    }

    /// Resolves the group a command acts on: the explicit argument, then the
    /// configured default, then the user's default group.
    pub async fn group_guid(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(guid) = explicit.filter(|g| !g.is_empty()) {
            return Ok(guid.to_string());
        }
        if let Some(guid) = self.config.api.default_group.as_deref().filter(|g| !g.is_empty()) {
            return Ok(guid.to_string());
        }

        tracing::debug!("No group given, using the user's default group");
        let user = self.client.users().current().await?;
        if user.default_group_guid.is_empty() {
            anyhow::bail!("No group given and the account has no default group");
        }
        Ok(user.default_group_guid)
    }
}

/// Parses `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Ok(at);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().fixed_offset())
        .ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD or RFC 3339", s))
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shorten, expand, update and track bitlinks
    #[command(visible_alias = "l")]
    Link(LinkCommand),

    /// Manage groups
    #[command(visible_alias = "g")]
    Group(GroupCommand),

    /// View organizations
    Org(OrgCommand),

    /// View or update the authenticated user
    User(UserCommand),

    /// List branded short domains
    Domain(DomainCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}
