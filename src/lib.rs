//! eduprompt: generate GDPT 2018 teaching prompts for AI tools and keep them in a
//! personal and community library.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    DefaultContext, SessionOptions, create_context, find_tool, generate_and_save, load_config,
    load_config_at, open_at,
};
pub use domain::{
    AppError, AssessmentInput, CognitiveLevel, GeneratedPrompt, GradeLevel, LessonPlanInput,
    LibraryEntry, OutputFormat, PresentationInput, PromptInput, QuestionType, SharedFilter,
    TargetTool, distribute,
};
