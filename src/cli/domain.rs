//
//  bitly-cli
//  cli/domain.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Branded short domain commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::bsds::BrandedDomains;
use crate::output::TableOutput;

use super::{GlobalOptions, Session};

/// List branded short domains
#[derive(Args, Debug)]
pub struct DomainCommand {
    #[command(subcommand)]
    pub command: DomainSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DomainSubcommand {
    /// List the branded short domains on your account
    #[command(visible_alias = "ls")]
    List,
}

impl TableOutput for BrandedDomains {
    fn print_table(&self, _color: bool) {
        if self.bsds.is_empty() {
            println!("No branded short domains");
            return;
        }
        for domain in &self.bsds {
            println!("{}", domain);
        }
    }
}

impl DomainCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        match &self.command {
            DomainSubcommand::List => session.writer.write(&session.client.bsds().list().await?),
        }
    }
}
