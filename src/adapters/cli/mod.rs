//! Command-line surface: argument parsing and dispatch onto the views.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use luminara_types::OAuthProvider;
use url::Url;

mod commands;
mod render;

pub use commands::run;

#[derive(Parser, Debug)]
#[command(name = "luminara")]
#[command(version)]
#[command(about = "Claim and manage your Luminara subdomain")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the Luminara API
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<Url>,

    /// Directory for local storage (default: ~/.config/luminara)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Launch URL to resolve the session from (e.g. an OAuth redirect)
    #[arg(long, global = true, value_name = "URL")]
    pub from_url: Option<Url>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shows who is logged in and what to do next
    Status,

    /// Logs in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for without echo when omitted
        #[arg(long, env = "LUMINARA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Creates a new account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        /// Prompted for without echo when omitted
        #[arg(long, env = "LUMINARA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Starts a sign-in with a third-party provider (github, discord)
    Oauth {
        #[arg(value_name = "PROVIDER")]
        provider: OAuthProvider,
    },

    /// Completes a sign-in from the URL the provider redirected to
    OauthComplete {
        #[arg(value_name = "REDIRECT_URL")]
        url: Url,
    },

    /// Sends the verification email again
    ResendVerification {
        #[arg(long)]
        email: String,
    },

    /// Forgets the stored credential
    Logout,

    /// Prints the current identity
    Whoami,

    /// Shows a user's public profile
    Profile {
        #[arg(value_name = "USERNAME")]
        username: String,
    },

    /// Manages the account
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },

    /// Manages your subdomain claim
    Subdomain {
        #[command(subcommand)]
        command: SubdomainCommands,
    },

    /// Manages the admin token for your subdomain
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Changes the account email
    UpdateEmail {
        #[arg(value_name = "EMAIL")]
        email: String,
    },
    /// Deletes the account permanently
    Delete,
}

#[derive(Subcommand, Debug)]
pub enum SubdomainCommands {
    /// Shows your claim and admin endpoint
    Show,
    /// Checks whether a name is available
    Check {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Reads names from stdin as you type and checks the last one
    Watch,
    /// Claims a subdomain
    Claim {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Renames your claim
    Rename {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Deletes your claim
    Delete,
    /// Copies your subdomain URL to the clipboard
    CopyUrl,
}

#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Shows whether an admin token exists
    Status,
    /// Generates a new admin token, replacing any existing one
    Generate {
        /// Copy the token to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Deletes the admin token
    Delete,
}
