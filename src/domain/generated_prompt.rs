use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PromptInput, TargetTool};

/// Tags every generated prompt carries regardless of kind.
pub const BASELINE_TAGS: [&str; 2] = ["#GDPT2018", "#Chuẩn5512"];

/// A generated prompt ready to paste into an AI tool.
///
/// `user_id` is left empty by the generator; whoever stores the prompt fills it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPrompt {
    pub id: Uuid,
    #[serde(default)]
    pub user_id: String,
    pub input_parameters: PromptInput,
    pub generated_text: String,
    pub target_tool: TargetTool,
    pub created_at: DateTime<Utc>,
    pub is_shared: bool,
    pub tags: Vec<String>,
}

impl GeneratedPrompt {
    /// Wrap rendered text into a fresh, unshared, unowned record.
    pub fn new(input: PromptInput, generated_text: String) -> Self {
        let tags = Self::tags_for(&input);
        let target_tool = input.target_tool();
        Self {
            id: Uuid::new_v4(),
            user_id: String::new(),
            input_parameters: input,
            generated_text,
            target_tool,
            created_at: Utc::now(),
            is_shared: false,
            tags,
        }
    }

    /// Baseline tags, the two kind tags, then subject and grade.
    pub fn tags_for(input: &PromptInput) -> Vec<String> {
        let mut tags: Vec<String> = BASELINE_TAGS.iter().map(|t| t.to_string()).collect();
        tags.extend(input.kind().tags().iter().map(|t| t.to_string()));
        tags.push(format!("#{}", input.subject().trim()));
        tags.push(format!("#Lớp{}", input.grade_level()));
        tags
    }
}
