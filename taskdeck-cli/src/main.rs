//! Main entry point for the TaskDeck CLI.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::config::{ClientConfig, Overrides};
use url::Url;

mod commands;
mod context;
mod logging;

use commands::{config::FormatArg, session, tasks::TaskCommand};
use context::Context;

/// TaskDeck CLI
#[derive(Parser, Debug)]
#[command(name = "taskdeck", version)]
#[command(about = "Command-line client for the TaskDeck task board", long_about = None)]
pub struct Cli {
    /// Path to a configuration file (yaml, json or toml)
    #[arg(long, short, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API root, e.g. http://localhost:5000/api
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<Url>,

    /// Where the session is persisted
    #[arg(long, global = true, value_name = "FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and persist the session
    Signin(session::SignInArgs),
    /// Register a new account
    Signup(session::SignUpArgs),
    /// Forget the persisted session
    Signout,
    /// Show the signed-in user
    Whoami,
    /// List, inspect and edit tasks
    #[command(subcommand)]
    Tasks(TaskCommand),
    /// Show how a web route resolves for the current session
    Route {
        /// Location path, e.g. /task/add
        path: String,
    },
    /// Print a configuration file with the default values
    Config {
        #[arg(long, short, value_enum, default_value_t = FormatArg::Yaml)]
        format: FormatArg,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script
        #[arg(long, short)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let overrides = Overrides {
        api_base_url: cli.api_url,
        session_path: cli.session_file,
    };

    match cli.command {
        Commands::Completion { shell } => commands::completion::generate_completion(shell),
        Commands::Config { format, output } => {
            commands::config::generate_config(format, output.as_deref())?;
        }
        command => {
            let config = ClientConfig::load_config(cli.config.as_deref(), &overrides)
                .context("failed to load configuration")?;
            logging::initialize_tracing(&config.logging);
            let ctx = Context::new(&config);
            run(command, &ctx).await?;
        }
    }

    Ok(())
}

async fn run(command: Commands, ctx: &Context) -> Result<()> {
    match command {
        Commands::Signin(args) => session::sign_in(ctx, args).await,
        Commands::Signup(args) => session::sign_up(ctx, args).await,
        Commands::Signout => {
            session::sign_out(ctx);
            Ok(())
        }
        Commands::Whoami => session::whoami(ctx),
        Commands::Tasks(command) => commands::tasks::run(ctx, command).await,
        Commands::Route { path } => {
            commands::route::show(ctx, &path);
            Ok(())
        }
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}
