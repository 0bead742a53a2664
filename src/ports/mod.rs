mod prompt_cache;
mod prompt_library;
mod template_renderer;

pub use prompt_cache::{CacheError, PromptCache};
pub use prompt_library::PromptLibrary;
pub use template_renderer::TemplateRenderer;
