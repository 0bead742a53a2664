//! `community` subcommands.

use clap::Subcommand;
use uuid::Uuid;

use super::library::print_summary;
use super::output::{self, FORMATS, Format};
use crate::app::api::DefaultContext;
use crate::domain::{AppError, LibraryEntry, SharedFilter};

#[derive(Subcommand)]
pub enum CommunityCommands {
    /// List shared prompts, best rated first
    #[clap(visible_alias = "ls")]
    List {
        /// Only prompts carrying this tag
        #[arg(long)]
        tag: Option<String>,
        /// Search title, text and subject
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long, default_value = "text", value_parser = FORMATS)]
        format: String,
    },
    /// Rate a shared prompt from 1 to 5 stars
    Rate { id: Uuid, stars: u8 },
    /// Withdraw a shared prompt (moderators only)
    Hide { id: Uuid },
}

pub fn run_community(ctx: &DefaultContext, command: CommunityCommands) -> Result<(), AppError> {
    let library = ctx.library();

    match command {
        CommunityCommands::List { tag, query, format } => {
            let entries = library.list_shared(&SharedFilter { tag, query })?;
            output::emit(Format::from_name(&format), &entries, |entries: &Vec<LibraryEntry>| {
                if entries.is_empty() {
                    println!("No shared prompts found");
                }
                for entry in entries {
                    print_summary(entry);
                }
            })
        }
        CommunityCommands::Rate { id, stars } => {
            let entry = library.rate(ctx.user(), id, stars)?;
            let average = entry.average_rating().unwrap_or_default();
            println!("✅ Rated '{}' {} ★ (average {:.1})", entry.title, stars, average);
            Ok(())
        }
        CommunityCommands::Hide { id } => {
            let entry = library.hide(ctx.user(), id)?;
            println!("✅ Hid '{}'", entry.title);
            Ok(())
        }
    }
}
