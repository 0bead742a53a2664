//! `library` subcommands.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use clap::Subcommand;
use dialoguer::{Confirm, Error as DialoguerError};
use uuid::Uuid;

use super::output::{self, FORMATS, Format};
use crate::app::api::DefaultContext;
use crate::domain::{AppError, LibraryEntry, PromptVersion};

#[derive(Subcommand)]
pub enum LibraryCommands {
    /// List your saved prompts, most recently updated first
    #[clap(visible_alias = "ls")]
    List {
        #[arg(long, default_value = "text", value_parser = FORMATS)]
        format: String,
    },
    /// Show a saved or shared prompt
    Show {
        id: Uuid,
        #[arg(long, default_value = "text", value_parser = FORMATS)]
        format: String,
    },
    /// Replace the prompt text, recording a new version
    Edit {
        id: Uuid,
        /// New prompt text
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,
        /// Read the new prompt text from a file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Short note describing the change
        #[arg(long)]
        note: Option<String>,
    },
    /// List the versions of a prompt
    History {
        id: Uuid,
        #[arg(long, default_value = "text", value_parser = FORMATS)]
        format: String,
    },
    /// Restore an earlier version as the newest one
    Revert { id: Uuid, version: u32 },
    /// Share a prompt with the community
    Share { id: Uuid },
    /// Stop sharing a prompt
    Unshare { id: Uuid },
    /// Replace a prompt's tags
    Tag {
        id: Uuid,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Delete a prompt from your library
    #[clap(visible_alias = "rm")]
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn run_library(ctx: &DefaultContext, command: LibraryCommands) -> Result<(), AppError> {
    let library = ctx.library();
    let user = ctx.user();

    match command {
        LibraryCommands::List { format } => {
            let entries = library.list_for_user(user)?;
            output::emit(Format::from_name(&format), &entries, |entries: &Vec<LibraryEntry>| {
                if entries.is_empty() {
                    println!("No saved prompts for '{}'", user);
                }
                for entry in entries {
                    print_summary(entry);
                }
            })
        }
        LibraryCommands::Show { id, format } => {
            let entry = library.get(user, id)?;
            output::emit(Format::from_name(&format), &entry, print_entry)
        }
        LibraryCommands::Edit { id, text, file, note } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(path)?,
                (None, None) => String::new(),
            };
            let entry = library.edit(user, id, &text, note.as_deref())?;
            println!("✅ Saved version {} of '{}'", entry.current_version(), entry.title);
            Ok(())
        }
        LibraryCommands::History { id, format } => {
            let versions = library.history(user, id)?;
            output::emit(Format::from_name(&format), &versions, |versions: &Vec<PromptVersion>| {
                for version in versions {
                    let note = version.note.as_deref().unwrap_or("");
                    println!(
                        "  v{:<3} {}  {} chars  {}",
                        version.number,
                        version.created_at.format("%Y-%m-%d %H:%M"),
                        version.text.chars().count(),
                        note
                    );
                }
            })
        }
        LibraryCommands::Revert { id, version } => {
            let entry = library.revert(user, id, version)?;
            println!("✅ Restored version {} as version {}", version, entry.current_version());
            Ok(())
        }
        LibraryCommands::Share { id } => {
            let entry = library.set_shared(user, id, true)?;
            println!("✅ Shared '{}'", entry.title);
            Ok(())
        }
        LibraryCommands::Unshare { id } => {
            let entry = library.set_shared(user, id, false)?;
            println!("✅ '{}' is private again", entry.title);
            Ok(())
        }
        LibraryCommands::Tag { id, tags } => {
            let entry = library.retag(user, id, &tags)?;
            println!("✅ Tags: {}", entry.prompt.tags.join(" "));
            Ok(())
        }
        LibraryCommands::Delete { id, yes } => {
            let entry = library.get(user, id)?;
            if !yes && !confirm_delete(&entry.title)? {
                println!("Cancelled");
                return Ok(());
            }
            library.delete(user, id)?;
            println!("✅ Deleted '{}'", entry.title);
            Ok(())
        }
    }
}

pub(super) fn print_summary(entry: &LibraryEntry) {
    let shared = if entry.is_shared() { " [shared]" } else { "" };
    let rating = entry
        .average_rating()
        .map(|avg| format!(" ★{:.1} ({})", avg, entry.ratings.len()))
        .unwrap_or_default();
    println!(
        "{}  v{}  {}{}{}",
        entry.id(),
        entry.current_version(),
        entry.title,
        shared,
        rating
    );
}

fn print_entry(entry: &LibraryEntry) {
    println!("{}", entry.title);
    println!(
        "id: {}  owner: {}  version: {}  tool: {}",
        entry.id(),
        entry.owner(),
        entry.current_version(),
        entry.prompt.target_tool
    );
    println!("tags: {}", entry.prompt.tags.join(" "));
    println!();
    println!("{}", entry.prompt.generated_text);
}

fn confirm_delete(title: &str) -> Result<bool, AppError> {
    match Confirm::new().with_prompt(format!("Delete '{}'?", title)).default(false).interact() {
        Ok(answer) => Ok(answer),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(false),
        Err(err) => Err(AppError::Io(std::io::Error::other(format!(
            "Failed to read confirmation: {}",
            err
        )))),
    }
}
