//
//  bitly-cli
//  cli/org.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::organizations::{Organization, OrganizationList};
use crate::output::{
    format_bool, or_dash, print_field, print_header, TableBuilder, TableOutput, TableRow,
};

use super::{GlobalOptions, Session};

/// View organizations
#[derive(Args, Debug)]
pub struct OrgCommand {
    #[command(subcommand)]
    pub command: OrgSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OrgSubcommand {
    /// List organizations
    #[command(visible_alias = "ls")]
    List,

    /// View organization details
    View(OrgArg),

    /// Show how many links were shortened in an organization
    #[command(name = "shorten-counts")]
    ShortenCounts(OrgArg),
}

#[derive(Args, Debug)]
pub struct OrgArg {
    /// Organization GUID
    pub org: String,
}

impl TableRow for Organization {
    fn headers() -> &'static [&'static str] {
        &["GUID", "Name", "Tier", "Role", "Active"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let guid = if color {
            style(&self.guid).cyan().to_string()
        } else {
            self.guid.clone()
        };
        let tier = if self.tier_display_name.is_empty() {
            or_dash(&self.tier).to_string()
        } else {
            self.tier_display_name.clone()
        };
        vec![
            guid,
            self.name.clone(),
            tier,
            or_dash(&self.role).to_string(),
            format_bool(self.is_active, color),
        ]
    }
}

impl TableOutput for Organization {
    fn print_table(&self, color: bool) {
        print_header(or_dash(&self.name));
        print_field("GUID", &self.guid, color);
        print_field("Tier", or_dash(&self.tier), color);
        if !self.tier_family.is_empty() {
            print_field("Tier family", &self.tier_family, color);
        }
        print_field("Role", or_dash(&self.role), color);
        print_field("Active", &format_bool(self.is_active, color), color);
        print_field("Created", or_dash(&self.created), color);
        if !self.bsds.is_empty() {
            print_field("Domains", &self.bsds.join(", "), color);
        }
    }
}

impl TableOutput for OrganizationList {
    fn print_table(&self, color: bool) {
        TableBuilder::new()
            .color(color)
            .headers(Organization::headers().iter().copied())
            .rows(self.organizations.iter().map(|o| o.row(color)))
            .print();
    }
}

impl OrgCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        let organizations = session.client.organizations();
        match &self.command {
            OrgSubcommand::List => session.writer.write(&organizations.list().await?),
            OrgSubcommand::View(args) => session.writer.write(&organizations.get(&args.org).await?),
            OrgSubcommand::ShortenCounts(args) => {
                session.writer.write(&organizations.shorten_counts(&args.org).await?)
            }
        }
    }
}
