mod builtin_templates;
mod filesystem_prompt_library;
mod library_service;
mod memory_prompt_cache;
mod memory_prompt_library;
mod prompt_generator;

pub use builtin_templates::BuiltinTemplates;
pub use filesystem_prompt_library::FilesystemPromptLibrary;
pub use library_service::LibraryService;
pub use memory_prompt_cache::{DEFAULT_SWEEP_THRESHOLD, InMemoryPromptCache};
pub use memory_prompt_library::MemoryPromptLibrary;
pub use prompt_generator::{DEFAULT_TTL, PromptGenerator, cache_key, kind_prefix};
