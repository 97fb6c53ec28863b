//
//  bitly-cli
//  cli/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group commands
//!
//! Groups own bitlinks. Commands that take an optional GUID fall back to
//! `default_group` from the configuration, then to the account's default
//! group.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::api::groups::{
    Group, GroupList, GroupPreferences, GroupUpdate, GroupsQuery, SortType, SortedBitlinks,
    SortedBitlinksQuery, Tags,
};
use crate::output::{
    format_bool, format_count, or_dash, print_field, print_header, truncate, TableBuilder,
    TableOutput, TableRow,
};

use super::metrics::WindowArgs;
use super::{GlobalOptions, Session};

/// Manage groups
#[derive(Args, Debug)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub command: GroupSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupSubcommand {
    /// List groups
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View group details
    View(GroupArg),

    /// Rename a group or move it to another organization
    Update(UpdateArgs),

    /// View or change a group's default short domain
    Preferences(PreferencesArgs),

    /// List tags used in a group
    Tags(GroupArg),

    /// Show clicks by country across a group
    Countries(GroupArg),

    /// Show clicks by referring network across a group
    #[command(name = "referring-networks")]
    ReferringNetworks(GroupArg),

    /// Show how many links were shortened in a group
    #[command(name = "shorten-counts")]
    ShortenCounts(GroupArg),

    /// Rank a group's bitlinks by clicks
    Top(TopArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only groups in this organization
    #[arg(long, short = 'o')]
    pub org: Option<String>,
}

#[derive(Args, Debug)]
pub struct GroupArg {
    /// Group GUID (defaults to the configured or account default group)
    pub group: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Group GUID
    pub group: String,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Organization to move the group to
    #[arg(long, short = 'o')]
    pub org: Option<String>,

    /// Branded short domain to assign (repeatable; replaces the current set)
    #[arg(long = "bsd")]
    pub bsds: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PreferencesArgs {
    /// Group GUID (defaults to the configured or account default group)
    pub group: Option<String>,

    /// Set the default short domain
    #[arg(long)]
    pub set_domain: Option<String>,
}

#[derive(Args, Debug)]
pub struct TopArgs {
    /// Group GUID (defaults to the configured or account default group)
    pub group: Option<String>,

    /// Metric to rank by
    #[arg(long, default_value = "clicks")]
    pub sort: SortType,

    #[command(flatten)]
    pub window: WindowArgs,
}

// Display

impl TableRow for Group {
    fn headers() -> &'static [&'static str] {
        &["GUID", "Name", "Organization", "Role", "Active"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let guid = if color {
            style(&self.guid).cyan().to_string()
        } else {
            self.guid.clone()
        };
        vec![
            guid,
            truncate(&self.name, 40),
            self.organization_guid.clone(),
            or_dash(&self.role).to_string(),
            format_bool(self.is_active, color),
        ]
    }
}

impl TableOutput for Group {
    fn print_table(&self, color: bool) {
        print_header(or_dash(&self.name));
        print_field("GUID", &self.guid, color);
        print_field("Organization", &self.organization_guid, color);
        print_field("Role", or_dash(&self.role), color);
        print_field("Active", &format_bool(self.is_active, color), color);
        print_field("Created", or_dash(&self.created), color);
        print_field("Modified", or_dash(&self.modified), color);
        if !self.bsds.is_empty() {
            print_field("Domains", &self.bsds.join(", "), color);
        }
    }
}

impl TableOutput for GroupList {
    fn print_table(&self, color: bool) {
        TableBuilder::new()
            .color(color)
            .headers(Group::headers().iter().copied())
            .rows(self.groups.iter().map(|g| g.row(color)))
            .print();
    }
}

impl TableOutput for GroupPreferences {
    fn print_table(&self, color: bool) {
        print_field("Group", &self.group_guid, color);
        print_field("Default domain", or_dash(&self.domain_preference), color);
    }
}

impl TableOutput for Tags {
    fn print_table(&self, color: bool) {
        if self.tags.is_empty() {
            println!("No tags");
            return;
        }
        for tag in &self.tags {
            if color {
                println!("{}", style(tag).green());
            } else {
                println!("{}", tag);
            }
        }
    }
}

impl TableOutput for SortedBitlinks {
    fn print_table(&self, color: bool) {
        TableBuilder::new()
            .color(color)
            .headers(["#", "Bitlink", "Clicks", "Long URL"])
            .rows(self.sorted_links.iter().enumerate().map(|(rank, sorted)| {
                let long_url = self
                    .links
                    .iter()
                    .find(|link| link.id == sorted.id)
                    .map(|link| truncate(&link.long_url, 50))
                    .unwrap_or_else(|| "-".to_string());
                vec![
                    (rank + 1).to_string(),
                    sorted.id.clone(),
                    format_count(sorted.clicks),
                    long_url,
                ]
            }))
            .print();
    }
}

impl GroupCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        let groups = session.client.groups();
        match &self.command {
            GroupSubcommand::List(args) => {
                let mut query = GroupsQuery::new();
                if let Some(org) = &args.org {
                    query = query.organization_guid(org);
                }
                let list = groups.list(&query).await?;
                session.writer.write(&list)
            }
            GroupSubcommand::View(args) => {
                let guid = session.group_guid(args.group.as_deref()).await?;
                session.writer.write(&groups.get(&guid).await?)
            }
            GroupSubcommand::Update(args) => self.update(&session, args).await,
            GroupSubcommand::Preferences(args) => self.preferences(&session, args).await,
            GroupSubcommand::Tags(args) => {
                let guid = session.group_guid(args.group.as_deref()).await?;
                session.writer.write(&groups.tags(&guid).await?)
            }
            GroupSubcommand::Countries(args) => {
                let guid = session.group_guid(args.group.as_deref()).await?;
                session.writer.write(&groups.countries(&guid).await?)
            }
            GroupSubcommand::ReferringNetworks(args) => {
                let guid = session.group_guid(args.group.as_deref()).await?;
                session.writer.write(&groups.referring_networks(&guid).await?)
            }
            GroupSubcommand::ShortenCounts(args) => {
                let guid = session.group_guid(args.group.as_deref()).await?;
                session.writer.write(&groups.shorten_counts(&guid).await?)
            }
            GroupSubcommand::Top(args) => {
                let guid = session.group_guid(args.group.as_deref()).await?;
                let query = SortedBitlinksQuery::new(args.sort).window(args.window.to_query());
                session.writer.write(&groups.sorted_bitlinks(&guid, &query).await?)
            }
        }
    }

    async fn update(&self, session: &Session, args: &UpdateArgs) -> Result<()> {
        let mut update = GroupUpdate::new();
        if let Some(name) = &args.name {
            update = update.name(name);
        }
        if let Some(org) = &args.org {
            update = update.organization_guid(org);
        }
        if !args.bsds.is_empty() {
            update = update.bsds(args.bsds.clone());
        }
        if update == GroupUpdate::default() {
            bail!("Nothing to update. Pass --name, --org or --bsd");
        }

        let group = session.client.groups().update(&args.group, &update).await?;
        session.writer.write_success(&format!("Updated group {}", group.guid));
        session.writer.write(&group)
    }

    async fn preferences(&self, session: &Session, args: &PreferencesArgs) -> Result<()> {
        let guid = session.group_guid(args.group.as_deref()).await?;
        let groups = session.client.groups();

        let Some(domain) = &args.set_domain else {
            return session.writer.write(&groups.preferences(&guid).await?);
        };

        let preferences = GroupPreferences {
            group_guid: guid.clone(),
            domain_preference: domain.clone(),
        };
        let updated = groups.update_preferences(&guid, &preferences).await?;
        session
            .writer
            .write_success(&format!("Default domain for {} is now {}", guid, updated.domain_preference));
        session.writer.write(&updated)
    }
}
