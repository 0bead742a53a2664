use crate::ports::{PromptCache, PromptLibrary, TemplateRenderer};
use crate::services::{LibraryService, PromptGenerator};

/// Application context holding the services a command runs against.
pub struct AppContext<C: PromptCache, R: TemplateRenderer, L: PromptLibrary> {
    generator: PromptGenerator<C, R>,
    library: LibraryService<L>,
    user: String,
}

impl<C: PromptCache, R: TemplateRenderer, L: PromptLibrary> AppContext<C, R, L> {
    /// Create a new application context acting as `user`.
    pub fn new(
        generator: PromptGenerator<C, R>,
        library: LibraryService<L>,
        user: impl Into<String>,
    ) -> Self {
        Self { generator, library, user: user.into() }
    }

    pub fn generator(&self) -> &PromptGenerator<C, R> {
        &self.generator
    }

    pub fn library(&self) -> &LibraryService<L> {
        &self.library
    }

    /// Identity used for library and community operations.
    pub fn user(&self) -> &str {
        &self.user
    }
}
