//! API facade for the application.
//!
//! Glues configuration, context creation and the services together for the CLI
//! and for embedding callers.

use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::app::config;
use crate::domain::{AppConfig, PromptInput, TargetTool};
use crate::services::{
    BuiltinTemplates, FilesystemPromptLibrary, InMemoryPromptCache, LibraryService,
    PromptGenerator,
};

pub use crate::domain::{AppError, GeneratedPrompt, LibraryEntry, SharedFilter};

/// Context wired with the default adapters.
pub type DefaultContext =
    AppContext<InMemoryPromptCache, BuiltinTemplates, FilesystemPromptLibrary>;

/// Where to find configuration and who is acting.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub config_path: Option<PathBuf>,
    pub user: Option<String>,
}

/// Load configuration relative to the current directory.
pub fn load_config(options: &SessionOptions) -> Result<AppConfig, AppError> {
    load_config_at(std::env::current_dir()?, options)
}

/// Load configuration relative to `base`.
pub fn load_config_at(
    base: impl AsRef<Path>,
    options: &SessionOptions,
) -> Result<AppConfig, AppError> {
    config::load_config(base.as_ref(), options.config_path.as_deref())
}

/// Build the default context; a relative library directory resolves against `base`.
pub fn create_context(
    base: impl AsRef<Path>,
    app_config: &AppConfig,
    options: &SessionOptions,
) -> DefaultContext {
    let library_dir = if app_config.library.dir.is_absolute() {
        app_config.library.dir.clone()
    } else {
        base.as_ref().join(&app_config.library.dir)
    };

    let cache = InMemoryPromptCache::new(app_config.cache.sweep_threshold);
    let generator = PromptGenerator::with_ttl(cache, BuiltinTemplates, app_config.cache.ttl());
    let library = LibraryService::new(FilesystemPromptLibrary::new(library_dir))
        .with_moderators(app_config.library.moderators.iter().cloned());
    let user = config::resolve_user(
        options.user.as_deref(),
        std::env::var(config::USER_ENV).ok(),
        app_config,
    );

    AppContext::new(generator, library, user)
}

/// Load configuration and build the default context in one step.
pub fn open_at(
    base: impl AsRef<Path>,
    options: &SessionOptions,
) -> Result<DefaultContext, AppError> {
    let app_config = load_config_at(base.as_ref(), options)?;
    Ok(create_context(base, &app_config, options))
}

/// Generate a prompt and store it in the acting user's library.
pub fn generate_and_save(
    ctx: &DefaultContext,
    input: &PromptInput,
    title: Option<&str>,
) -> Result<LibraryEntry, AppError> {
    let prompt = ctx.generator().generate(input)?;
    ctx.library().save(ctx.user(), prompt, title)
}

/// Look up a target tool by name.
pub fn find_tool(name: &str) -> Result<TargetTool, AppError> {
    TargetTool::from_name(name).ok_or_else(|| AppError::UnknownTool(name.to_string()))
}
