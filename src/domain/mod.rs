pub mod bloom;
pub mod configuration;
pub mod error;
pub mod generated_prompt;
pub mod grade;
pub mod library;
pub mod prompt_input;
pub mod target_tool;
pub mod templates;

pub use bloom::{BloomDistribution, CognitiveLevel, distribute};
pub use configuration::{AppConfig, CONFIG_FILE, CacheConfig, parse_config_content};
pub use error::{AppError, FieldError};
pub use generated_prompt::{BASELINE_TAGS, GeneratedPrompt};
pub use grade::GradeLevel;
pub use library::{LibraryEntry, PromptVersion, RATING_RANGE, SharedFilter, normalize_tags};
pub use prompt_input::{
    AssessmentInput, LessonPlanInput, OutputFormat, PresentationInput, PromptInput, PromptKind,
    QuestionType,
};
pub use target_tool::{TargetTool, ToolProfile};
