//
//  bitly-cli
//  cli/link.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitlink commands
//!
//! Shortening, expanding and editing bitlinks, listing a group's links, and
//! every per-link click metric.

use anyhow::{bail, Result};
use chrono::{DateTime, FixedOffset};
use clap::{Args, Subcommand};
use console::style;

use crate::api::bitlinks::{
    Bitlink, ClickSummary, CreateBitlinkRequest, Deeplink, ExpandRequest, ExpandedLink,
    LinkClicks, ReferrersByDomains, ShortenRequest, UpdateBitlinkRequest,
};
use crate::api::common::bitlink_id;
use crate::api::groups::{BitlinksQuery, GroupBitlinks, Toggle};
use crate::output::{
    format_bool, format_count, or_dash, print_field, print_header, truncate, TableBuilder,
    TableOutput, TableRow,
};

use super::metrics::{describe_window, WindowArgs};
use super::{parse_datetime, GlobalOptions, Session};

/// Shorten, expand, update and track bitlinks
#[derive(Args, Debug)]
pub struct LinkCommand {
    #[command(subcommand)]
    pub command: LinkSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LinkSubcommand {
    /// Shorten a long URL
    #[command(visible_alias = "s")]
    Shorten(ShortenArgs),

    /// Create a bitlink with a title, tags or a deep link
    Create(CreateArgs),

    /// Show the long URL behind a bitlink
    Expand(ExpandArgs),

    /// Update a bitlink's title, tags or archived state
    Update(UpdateArgs),

    /// List bitlinks in a group
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show clicks for a bitlink
    Clicks(ClicksArgs),

    /// Show clicks by country
    Countries(LinkMetricsArgs),

    /// Show clicks by referrer
    Referrers(LinkMetricsArgs),

    /// Show clicks by referring domain
    #[command(name = "referring-domains")]
    ReferringDomains(LinkMetricsArgs),

    /// Show referrers grouped by referring network
    #[command(name = "referrers-by-domain")]
    ReferrersByDomain(LinkMetricsArgs),
}

#[derive(Args, Debug)]
pub struct ShortenArgs {
    /// URL to shorten
    pub long_url: String,

    /// Short domain to use (e.g. bit.ly or a branded domain)
    #[arg(long, short = 'd')]
    pub domain: Option<String>,

    /// Group to create the link in
    #[arg(long, short = 'g')]
    pub group: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// URL to shorten
    pub long_url: String,

    /// Title of the bitlink
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Tag to attach (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Short domain to use
    #[arg(long, short = 'd')]
    pub domain: Option<String>,

    /// Group to create the link in
    #[arg(long, short = 'g')]
    pub group: Option<String>,

    #[command(flatten)]
    pub deeplink: DeeplinkArgs,
}

/// Mobile deep link attached on creation
#[derive(Args, Debug, Default)]
pub struct DeeplinkArgs {
    /// Mobile app identifier for a deep link
    #[arg(long = "app-id", requires = "app_uri_path")]
    pub app_id: Option<String>,

    /// Path inside the app the deep link opens
    #[arg(long = "app-uri-path", requires = "app_id")]
    pub app_uri_path: Option<String>,

    /// Where to send users without the app
    #[arg(long = "install-url", requires = "app_id")]
    pub install_url: Option<String>,

    /// Install behaviour
    #[arg(
        long = "install-type",
        requires = "app_id",
        value_parser = ["no_install", "auto_install", "promote_install"]
    )]
    pub install_type: Option<String>,
}

impl DeeplinkArgs {
    fn to_deeplink(&self) -> Option<Deeplink> {
        self.app_id.as_ref().map(|app_id| Deeplink {
            app_id: Some(app_id.clone()),
            app_uri_path: self.app_uri_path.clone(),
            install_url: self.install_url.clone(),
            install_type: self.install_type.clone(),
            ..Default::default()
        })
    }
}

#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Bitlink (e.g. bit.ly/3xYz or https://bit.ly/3xYz)
    pub bitlink: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Bitlink to update
    pub bitlink: String,

    /// New title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Archive the bitlink
    #[arg(long, conflicts_with = "unarchive")]
    pub archive: bool,

    /// Restore an archived bitlink
    #[arg(long)]
    pub unarchive: bool,

    /// Replace the tags (repeatable)
    #[arg(long = "tag", conflicts_with = "clear_tags")]
    pub tags: Vec<String>,

    /// Remove every tag
    #[arg(long)]
    pub clear_tags: bool,
}

impl UpdateArgs {
    fn to_request(&self) -> UpdateBitlinkRequest {
        let mut request = UpdateBitlinkRequest::new();
        if let Some(title) = &self.title {
            request = request.title(title.clone());
        }
        if self.archive {
            request = request.archived(true);
        } else if self.unarchive {
            request = request.archived(false);
        }
        if self.clear_tags {
            request = request.tags(Vec::<String>::new());
        } else if !self.tags.is_empty() {
            request = request.tags(self.tags.iter().cloned());
        }
        request
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Group to list (defaults to the configured or account default group)
    #[arg(long, short = 'g')]
    pub group: Option<String>,

    /// Links per page
    #[arg(long, short = 's')]
    pub size: Option<u32>,

    /// Page number
    #[arg(long, short = 'p')]
    pub page: Option<u32>,

    /// Search term across link fields
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Keyword filter
    #[arg(long)]
    pub keyword: Option<String>,

    /// Archived links: on, off or both
    #[arg(long)]
    pub archived: Option<Toggle>,

    /// Only links with a custom back-half: on, off or both
    #[arg(long)]
    pub custom: Option<Toggle>,

    /// Only links carrying this tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Only links created after this date
    #[arg(long, value_parser = parse_datetime)]
    pub created_after: Option<DateTime<FixedOffset>>,

    /// Only links created before this date
    #[arg(long, value_parser = parse_datetime)]
    pub created_before: Option<DateTime<FixedOffset>>,

    /// Only links modified after this date
    #[arg(long, value_parser = parse_datetime)]
    pub modified_after: Option<DateTime<FixedOffset>>,

    /// Only links created by this login (repeatable)
    #[arg(long = "creator")]
    pub creators: Vec<String>,
}

impl ListArgs {
    fn to_query(&self) -> BitlinksQuery {
        let mut query = BitlinksQuery::new();
        query.size = self.size;
        query.page = self.page;
        query.query = self.query.clone();
        query.keyword = self.keyword.clone();
        query.archived = self.archived;
        query.custom_bitlink = self.custom;
        query.tags = self.tags.clone();
        query.encoding_login = self.creators.clone();
        if let Some(at) = self.created_after {
            query = query.created_after_at(at);
        }
        if let Some(at) = self.created_before {
            query = query.created_before_at(at);
        }
        if let Some(at) = self.modified_after {
            query = query.modified_after_at(at);
        }
        query
    }
}

#[derive(Args, Debug)]
pub struct ClicksArgs {
    /// Bitlink to report on
    pub bitlink: String,

    /// Show only the total for the window
    #[arg(long)]
    pub summary: bool,

    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(Args, Debug)]
pub struct LinkMetricsArgs {
    /// Bitlink to report on
    pub bitlink: String,

    #[command(flatten)]
    pub window: WindowArgs,
}

// Display

impl TableOutput for Bitlink {
    fn print_table(&self, color: bool) {
        let title = self.title.as_deref().unwrap_or(&self.link);
        print_header(title);
        print_field("Bitlink", &self.link, color);
        print_field("Long URL", &self.long_url, color);
        print_field("ID", &self.id, color);
        print_field("Created", or_dash(&self.created_at), color);
        print_field("Archived", &format_bool(self.archived, color), color);
        if !self.tags.is_empty() {
            print_field("Tags", &self.tags.join(", "), color);
        }
        if !self.custom_bitlinks.is_empty() {
            print_field("Custom", &self.custom_bitlinks.join(", "), color);
        }
        for deeplink in &self.deeplinks {
            let app = deeplink.app_id.as_deref().unwrap_or("-");
            let path = deeplink.app_uri_path.as_deref().unwrap_or("");
            print_field("Deep link", &format!("{}{}", app, path), color);
        }
        if let Some(group) = &self.references.group {
            print_field("Group", group, color);
        }
    }
}

impl TableRow for Bitlink {
    fn headers() -> &'static [&'static str] {
        &["Bitlink", "Long URL", "Title", "Created", "Tags"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let link = if color && self.archived {
            style(&self.id).dim().to_string()
        } else {
            self.id.clone()
        };
        vec![
            link,
            truncate(&self.long_url, 50),
            truncate(self.title.as_deref().unwrap_or("-"), 30),
            self.created_at.chars().take(10).collect(),
            or_dash(&self.tags.join(", ")).to_string(),
        ]
    }
}

impl TableOutput for ExpandedLink {
    fn print_table(&self, color: bool) {
        print_field("Bitlink", &self.link, color);
        print_field("Long URL", &self.long_url, color);
        print_field("Created", or_dash(&self.created_at), color);
    }
}

impl TableOutput for ClickSummary {
    fn print_table(&self, color: bool) {
        let total = format_count(self.total_clicks);
        if color {
            print_field("Clicks", &style(total).bold().to_string(), color);
        } else {
            print_field("Clicks", &total, color);
        }
        print_field("Window", &describe_window(&self.unit, self.units, &self.unit_reference), color);
    }
}

impl TableOutput for LinkClicks {
    fn print_table(&self, color: bool) {
        print_field("Window", &describe_window(&self.unit, self.units, &self.unit_reference), color);
        print_field("Total", &format_count(self.total_clicks()), color);
        println!();
        TableBuilder::new()
            .color(color)
            .headers(["Date", "Clicks"])
            .rows(
                self.link_clicks
                    .iter()
                    .map(|c| vec![c.date.clone(), format_count(c.clicks)]),
            )
            .print();
    }
}

impl TableOutput for ReferrersByDomains {
    fn print_table(&self, color: bool) {
        print_field("Window", &describe_window(&self.unit, self.units, &self.unit_reference), color);
        println!();
        TableBuilder::new()
            .color(color)
            .headers(["Network", "Referrer", "Clicks"])
            .rows(self.referrers_by_domain.iter().flat_map(|domain| {
                domain.referrers.iter().map(move |referrer| {
                    vec![
                        domain.network.clone(),
                        or_dash(&referrer.value).to_string(),
                        format_count(referrer.clicks),
                    ]
                })
            }))
            .print();
    }
}

impl TableOutput for GroupBitlinks {
    fn print_table(&self, color: bool) {
        TableBuilder::new()
            .color(color)
            .headers(Bitlink::headers().iter().copied())
            .rows(self.links.iter().map(|link| link.row(color)))
            .print();

        let pagination = &self.pagination;
        if pagination.total > 0 {
            let mut footer = format!(
                "Page {} ({} of {} links)",
                pagination.page.max(1),
                self.links.len(),
                format_count(pagination.total)
            );
            if let Some(next) = pagination.next_page() {
                footer.push_str(&format!(", next: --page {}", next));
            }
            if color {
                println!("{}", style(footer).dim());
            } else {
                println!("{}", footer);
            }
        }
    }
}

impl LinkCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        match &self.command {
            LinkSubcommand::Shorten(args) => self.shorten(&session, args).await,
            LinkSubcommand::Create(args) => self.create(&session, args).await,
            LinkSubcommand::Expand(args) => self.expand(&session, args).await,
            LinkSubcommand::Update(args) => self.update(&session, args).await,
            LinkSubcommand::List(args) => self.list(&session, args).await,
            LinkSubcommand::Clicks(args) => self.clicks(&session, args).await,
            LinkSubcommand::Countries(args) => {
                let metrics = session
                    .client
                    .bitlinks()
                    .countries(&args.bitlink, &args.window.to_query())
                    .await?;
                session.writer.write(&metrics)
            }
            LinkSubcommand::Referrers(args) => {
                let metrics = session
                    .client
                    .bitlinks()
                    .referrers(&args.bitlink, &args.window.to_query())
                    .await?;
                session.writer.write(&metrics)
            }
            LinkSubcommand::ReferringDomains(args) => {
                let metrics = session
                    .client
                    .bitlinks()
                    .referring_domains(&args.bitlink, &args.window.to_query())
                    .await?;
                session.writer.write(&metrics)
            }
            LinkSubcommand::ReferrersByDomain(args) => {
                let metrics = session
                    .client
                    .bitlinks()
                    .referrers_by_domains(&args.bitlink, &args.window.to_query())
                    .await?;
                session.writer.write(&metrics)
            }
        }
    }

    async fn shorten(&self, session: &Session, args: &ShortenArgs) -> Result<()> {
        let mut request = ShortenRequest::new(&args.long_url);
        if let Some(domain) = &args.domain {
            request = request.domain(domain);
        }
        if let Some(group) = args.group.as_deref().or(session.config.api.default_group.as_deref()) {
            request = request.group_guid(group);
        }

        let link = session.client.bitlinks().shorten(&request).await?;
        match session.writer.format() {
            crate::output::OutputFormat::Json => session.writer.write(&link),
            crate::output::OutputFormat::Table => {
                session.writer.write_info(&link.link);
                Ok(())
            }
        }
    }

    async fn create(&self, session: &Session, args: &CreateArgs) -> Result<()> {
        let mut request = CreateBitlinkRequest::new(&args.long_url);
        if let Some(domain) = &args.domain {
            request = request.domain(domain);
        }
        if let Some(group) = args.group.as_deref().or(session.config.api.default_group.as_deref()) {
            request = request.group_guid(group);
        }
        if let Some(title) = &args.title {
            request = request.title(title);
        }
        for tag in &args.tags {
            request = request.tag(tag);
        }
        if let Some(deeplink) = args.deeplink.to_deeplink() {
            request = request.deeplink(deeplink);
        }

        let link = session.client.bitlinks().create(&request).await?;
        session.writer.write_success(&format!("Created {}", link.link));
        session.writer.write(&link)
    }

    async fn expand(&self, session: &Session, args: &ExpandArgs) -> Result<()> {
        let request = ExpandRequest::new(bitlink_id(&args.bitlink));
        let expanded = session.client.bitlinks().expand(&request).await?;
        session.writer.write(&expanded)
    }

    async fn update(&self, session: &Session, args: &UpdateArgs) -> Result<()> {
        let request = args.to_request();
        if request == UpdateBitlinkRequest::default() {
            bail!("Nothing to update. Pass --title, --archive, --unarchive, --tag or --clear-tags");
        }

        let link = session.client.bitlinks().update(&args.bitlink, &request).await?;
        session.writer.write_success(&format!("Updated {}", link.id));
        session.writer.write(&link)
    }

    async fn list(&self, session: &Session, args: &ListArgs) -> Result<()> {
        let group = session.group_guid(args.group.as_deref()).await?;
        let page = session.client.groups().bitlinks(&group, &args.to_query()).await?;
        session.writer.write(&page)
    }

    async fn clicks(&self, session: &Session, args: &ClicksArgs) -> Result<()> {
        let query = args.window.to_query();
        if args.summary {
            let summary = session.client.bitlinks().clicks_summary(&args.bitlink, &query).await?;
            return session.writer.write(&summary);
        }
        let clicks = session.client.bitlinks().clicks(&args.bitlink, &query).await?;
        session.writer.write(&clicks)
    }
}
