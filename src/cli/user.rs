//
//  bitly-cli
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Commands for the authenticated user

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::api::users::{User, UserUpdate};
use crate::output::{format_bool, or_dash, print_field, print_header, TableOutput};

use super::{GlobalOptions, Session};

/// View or update the authenticated user
#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// Show the authenticated user
    #[command(visible_alias = "me")]
    View,

    /// Change your name or default group
    Update(UpdateArgs),
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Display name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Default group GUID
    #[arg(long, short = 'g')]
    pub default_group: Option<String>,
}

impl TableOutput for User {
    fn print_table(&self, color: bool) {
        print_header(if self.name.is_empty() { &self.login } else { &self.name });
        print_field("Login", or_dash(&self.login), color);
        if let Some(email) = self.primary_email() {
            print_field("Email", &email.email, color);
        }
        print_field("Default group", or_dash(&self.default_group_guid), color);
        print_field("Active", &format_bool(self.is_active, color), color);
        print_field("2FA", &format_bool(self.is_2fa_enabled, color), color);
        print_field("SSO", &format_bool(self.is_sso_user, color), color);
        print_field("Created", or_dash(&self.created), color);
    }
}

impl UserCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = Session::open(global)?;
        let users = session.client.users();
        match &self.command {
            UserSubcommand::View => session.writer.write(&users.current().await?),
            UserSubcommand::Update(args) => {
                let mut update = UserUpdate::new();
                if let Some(name) = &args.name {
                    update = update.name(name);
                }
                if let Some(group) = &args.default_group {
                    update = update.default_group_guid(group);
                }
                if update == UserUpdate::default() {
                    bail!("Nothing to update. Pass --name or --default-group");
                }

                let user = users.update(&update).await?;
                session.writer.write_success("Profile updated");
                session.writer.write(&user)
            }
        }
    }
}
