//! Command handlers. Each one drives a view through the context and maps
//! its result onto an exit code; notices are already printed by the notifier.

use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use luminara_types::User;
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use super::{AccountCommands, Commands, SubdomainCommands, TokenCommands, render};
use crate::{
    adapters::{app_context::AppContext, console},
    application::{
        outcome::{Outcome, SkipReason, SubmitOutcome},
        use_cases::{
            auth::{LoginForm, RegisterForm},
            dashboard::ClaimState,
        },
    },
    domain::entities::route::Route,
};

pub async fn run(
    command: Commands,
    ctx: &AppContext,
    launch_url: Option<&Url>,
) -> Result<ExitCode> {
    match command {
        Commands::Status => status(ctx),
        Commands::Login { email, password } => {
            if let Some(url) = launch_url {
                ctx.auth.acknowledge_verification(url);
            }
            let password = password_or_prompt(password)?;
            let outcome = ctx.auth.login(&LoginForm { email, password }).await;
            Ok(submit_exit(outcome))
        }
        Commands::Register {
            email,
            username,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let form = RegisterForm::new(email, username, &password);
            let outcome = ctx.auth.register(&form).await;
            Ok(submit_exit(outcome))
        }
        Commands::Oauth { provider } => {
            let outcome = ctx.auth.start_oauth(provider).await;
            if let Outcome::Done { value: auth_url, .. } = &outcome {
                println!("If the browser did not open, visit:");
                println!("  {}", auth_url);
                println!("Then run: luminara oauth-complete '<redirect url>'");
            }
            Ok(outcome_exit(&outcome))
        }
        Commands::OauthComplete { url } => {
            let route = ctx.auth.complete_oauth(&url).await;
            Ok(if route == Route::Dashboard {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::ResendVerification { email } => {
            let outcome = ctx.auth.resend_verification(&email).await;
            Ok(outcome_exit(&outcome))
        }
        Commands::Logout => {
            ctx.session.logout()?;
            println!("Logged out.");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Whoami => {
            let user = require_user(ctx)?;
            println!("{}", render::user(&user));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Profile { username } => {
            let outcome = ctx.account.public_profile(&username).await;
            match &outcome {
                Outcome::Done {
                    value: Some(user), ..
                } => println!("{}", render::user(user)),
                Outcome::Done { value: None, .. } => {
                    println!("No user named {}", username);
                    return Ok(ExitCode::FAILURE);
                }
                _ => {}
            }
            Ok(outcome_exit(&outcome))
        }
        Commands::Account { command } => account(command, ctx).await,
        Commands::Subdomain { command } => subdomain(command, ctx).await,
        Commands::Token { command } => token(command, ctx).await,
    }
}

fn status(ctx: &AppContext) -> Result<ExitCode> {
    match ctx.session.user() {
        Some(user) => println!("Logged in as {}", render::user(&user)),
        None => println!("Not logged in"),
    }
    let ctas = ctx.landing();
    if !ctas.is_empty() {
        println!("Next: {}", render::calls_to_action(&ctas));
    }
    Ok(ExitCode::SUCCESS)
}

async fn account(command: AccountCommands, ctx: &AppContext) -> Result<ExitCode> {
    require_user(ctx)?;
    let exit = match command {
        AccountCommands::UpdateEmail { email } => {
            outcome_exit(&ctx.account.update_email(&email).await)
        }
        AccountCommands::Delete => outcome_exit(&ctx.account.delete_account().await),
    };
    Ok(exit)
}

async fn subdomain(command: SubdomainCommands, ctx: &AppContext) -> Result<ExitCode> {
    let dashboard = &ctx.dashboard;

    let exit = match command {
        SubdomainCommands::Check { name } => {
            dashboard.on_input_changed(&name);
            dashboard.settle().await;
            availability_exit(ctx)
        }
        SubdomainCommands::Watch => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
                dashboard.on_input_changed(&line);
            }
            dashboard.settle().await;
            availability_exit(ctx)
        }
        SubdomainCommands::Show => {
            require_user(ctx)?;
            dashboard.mount().await;
            let view = dashboard.view();
            println!("{}", render::claim(&view.claim));
            if let Some(endpoint) = &view.admin_endpoint {
                println!("Admin endpoint: {}", endpoint);
            }
            println!("{}", render::token_status(view.token_status.as_ref()));
            ExitCode::SUCCESS
        }
        SubdomainCommands::Claim { name } => {
            require_user(ctx)?;
            dashboard.on_input_changed(&name);
            dashboard.settle().await;
            if !dashboard.can_create() {
                return Ok(availability_exit(ctx));
            }
            let outcome = dashboard.create_claim().await;
            if outcome.is_done() {
                print_claim(ctx);
            }
            outcome_exit(&outcome)
        }
        SubdomainCommands::Rename { name } => {
            require_user(ctx)?;
            dashboard.fetch_claim().await;
            if !has_claim(ctx) {
                return Ok(ExitCode::FAILURE);
            }
            dashboard.on_input_changed(&name);
            dashboard.settle().await;
            if !dashboard.view().can_rename {
                return Ok(availability_exit(ctx));
            }
            let outcome = dashboard.rename_claim().await;
            if outcome.is_done() {
                print_claim(ctx);
            }
            outcome_exit(&outcome)
        }
        SubdomainCommands::Delete => {
            require_user(ctx)?;
            dashboard.fetch_claim().await;
            if !has_claim(ctx) {
                return Ok(ExitCode::FAILURE);
            }
            outcome_exit(&dashboard.delete_claim().await)
        }
        SubdomainCommands::CopyUrl => {
            require_user(ctx)?;
            dashboard.fetch_claim().await;
            if !has_claim(ctx) {
                return Ok(ExitCode::FAILURE);
            }
            outcome_exit(&dashboard.copy_url())
        }
    };
    Ok(exit)
}

async fn token(command: TokenCommands, ctx: &AppContext) -> Result<ExitCode> {
    require_user(ctx)?;
    let dashboard = &ctx.dashboard;

    let exit = match command {
        TokenCommands::Status => {
            dashboard.fetch_token_status().await;
            println!("{}", render::token_status(dashboard.view().token_status.as_ref()));
            ExitCode::SUCCESS
        }
        TokenCommands::Generate { copy } => {
            let outcome = dashboard.generate_token().await;
            if !outcome.is_done() {
                return Ok(outcome_exit(&outcome));
            }
            if let Some(token) = dashboard.view().token_display {
                println!("Admin token (shown only once, store it safely):");
                println!("  {}", token);
            }
            if copy {
                outcome_exit(&dashboard.copy_token())
            } else {
                ExitCode::SUCCESS
            }
        }
        TokenCommands::Delete => outcome_exit(&dashboard.delete_token().await),
    };
    Ok(exit)
}

fn require_user(ctx: &AppContext) -> Result<User> {
    match ctx.session.user() {
        Some(user) => Ok(user),
        None => bail!("Not logged in. Run `luminara login` first."),
    }
}

fn has_claim(ctx: &AppContext) -> bool {
    match ctx.dashboard.view().claim {
        ClaimState::Claimed(_) => true,
        ClaimState::Absent => {
            println!("No subdomain claimed. Run `luminara subdomain claim <name>` first.");
            false
        }
        ClaimState::NotLoaded => false,
    }
}

fn print_claim(ctx: &AppContext) {
    let view = ctx.dashboard.view();
    println!("{}", render::claim(&view.claim));
    if let Some(endpoint) = view.admin_endpoint {
        println!("Admin endpoint: {}", endpoint);
    }
}

fn availability_exit(ctx: &AppContext) -> ExitCode {
    let view = ctx.dashboard.view();
    println!("{}", render::availability(&view.availability));
    if view.can_create {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn outcome_exit<T>(outcome: &Outcome<T>) -> ExitCode {
    match outcome {
        Outcome::Done { .. } => ExitCode::SUCCESS,
        Outcome::Skipped(SkipReason::NotConfirmed) => {
            println!("Cancelled.");
            ExitCode::SUCCESS
        }
        Outcome::Failed { .. } | Outcome::Skipped(_) => ExitCode::FAILURE,
    }
}

fn submit_exit(outcome: SubmitOutcome) -> ExitCode {
    match outcome {
        SubmitOutcome::Navigate(route) => {
            println!("Next: {}", route);
            ExitCode::SUCCESS
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in &errors.0 {
                eprintln!("{}: {}", field, message);
            }
            ExitCode::FAILURE
        }
        SubmitOutcome::Failed { .. } => ExitCode::FAILURE,
    }
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return console::read_hidden("Password: ").context("failed to read password");
    }
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
