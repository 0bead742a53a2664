//! CLI Adapter.

mod community;
mod generate;
mod library;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::api::{self, SessionOptions};
use crate::app::logging;
use crate::domain::{AppError, TargetTool};

#[derive(Parser)]
#[command(name = "eduprompt")]
#[command(version)]
#[command(
    about = "Generate GDPT 2018 lesson plan, slide and assessment prompts for AI tools",
    long_about = None
)]
struct Cli {
    /// Path to eduprompt.toml (defaults to $EDUPROMPT_CONFIG, then ./eduprompt.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Act as this user (defaults to $EDUPROMPT_USER, then [user] id)
    #[arg(long, global = true)]
    user: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a prompt
    #[clap(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        kind: generate::GenerateCommands,
    },
    /// List supported AI tools, or show one in detail
    #[clap(visible_alias = "t")]
    Tools {
        /// Tool name (chatgpt, gemini, copilot, canva-ai, gamma-app)
        name: Option<String>,
    },
    /// Manage your saved prompts
    #[clap(visible_alias = "lib")]
    Library {
        #[command(subcommand)]
        command: library::LibraryCommands,
    },
    /// Browse, rate and moderate shared prompts
    #[clap(visible_alias = "c")]
    Community {
        #[command(subcommand)]
        command: community::CommunityCommands,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<(), AppError> {
    let options = SessionOptions { config_path: cli.config, user: cli.user };
    let base = std::env::current_dir()?;
    let app_config = api::load_config_at(&base, &options)?;
    logging::init(&app_config.log.level);

    if let Commands::Tools { name } = &cli.command {
        return run_tools(name.as_deref());
    }

    let ctx = api::create_context(&base, &app_config, &options);
    match cli.command {
        Commands::Generate { kind } => generate::run_generate(&ctx, kind),
        Commands::Library { command } => library::run_library(&ctx, command),
        Commands::Community { command } => community::run_community(&ctx, command),
        Commands::Tools { .. } => Ok(()),
    }
}

fn run_tools(name: Option<&str>) -> Result<(), AppError> {
    let Some(name) = name else {
        for tool in TargetTool::ALL {
            println!("  • {:<10} {} ({})", tool.as_str(), tool, tool.url());
        }
        return Ok(());
    };

    let tool = api::find_tool(name)?;
    println!("{} ({})", tool, tool.url());
    println!("\nInstructions:");
    for line in tool.instructions() {
        println!("  • {}", line);
    }
    println!("\nFooter:{}", tool.footer());
    Ok(())
}
