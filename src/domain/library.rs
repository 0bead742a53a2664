//! Saved prompts, their edit history and community ratings.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GeneratedPrompt;

pub const RATING_RANGE: (u8, u8) = (1, 5);

/// One revision of a saved prompt's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptVersion {
    pub number: u32,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A prompt stored in a user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub prompt: GeneratedPrompt,
    pub title: String,
    pub versions: Vec<PromptVersion>,
    /// Stars keyed by rating user.
    #[serde(default)]
    pub ratings: BTreeMap<String, u8>,
    pub updated_at: DateTime<Utc>,
}

impl LibraryEntry {
    /// Start a library entry; the prompt's text becomes version 1.
    pub fn new(prompt: GeneratedPrompt, title: impl Into<String>) -> Self {
        let now = Utc::now();
        let first = PromptVersion {
            number: 1,
            text: prompt.generated_text.clone(),
            note: None,
            created_at: now,
        };
        Self {
            prompt,
            title: title.into(),
            versions: vec![first],
            ratings: BTreeMap::new(),
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.prompt.id
    }

    pub fn owner(&self) -> &str {
        &self.prompt.user_id
    }

    pub fn is_shared(&self) -> bool {
        self.prompt.is_shared
    }

    pub fn current_version(&self) -> u32 {
        self.versions.last().map(|v| v.number).unwrap_or(0)
    }

    pub fn version(&self, number: u32) -> Option<&PromptVersion> {
        self.versions.iter().find(|v| v.number == number)
    }

    /// Append a revision and make it the current text.
    pub fn record_version(&mut self, text: String, note: Option<String>) -> u32 {
        let number = self.current_version() + 1;
        let now = Utc::now();
        self.prompt.generated_text = text.clone();
        self.versions.push(PromptVersion { number, text, note, created_at: now });
        self.updated_at = now;
        number
    }

    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: u32 = self.ratings.values().map(|&stars| u32::from(stars)).sum();
        Some(f64::from(sum) / self.ratings.len() as f64)
    }

    pub fn matches(&self, filter: &SharedFilter) -> bool {
        if let Some(tag) = &filter.tag {
            let wanted = normalize_tag(tag).to_lowercase();
            if !self.prompt.tags.iter().any(|t| t.to_lowercase() == wanted) {
                return false;
            }
        }
        if let Some(query) = &filter.query {
            let query = query.to_lowercase();
            let haystacks = [
                self.title.as_str(),
                self.prompt.generated_text.as_str(),
                self.prompt.input_parameters.subject(),
            ];
            if !haystacks.iter().any(|h| h.to_lowercase().contains(&query)) {
                return false;
            }
        }
        true
    }
}

/// Search criteria for shared prompts.
#[derive(Debug, Clone, Default)]
pub struct SharedFilter {
    /// Exact tag, `#` optional, case-insensitive.
    pub tag: Option<String>,
    /// Case-insensitive substring of title, text or subject.
    pub query: Option<String>,
}

fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim();
    if tag.starts_with('#') { tag.to_string() } else { format!("#{tag}") }
}

/// Prefix tags with `#`, drop blanks and duplicates, keep first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if tag.trim().trim_start_matches('#').is_empty() {
            continue;
        }
        let tag = normalize_tag(tag);
        if !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AssessmentInput, CognitiveLevel, GradeLevel, PromptInput, QuestionType, TargetTool,
    };

    fn entry() -> LibraryEntry {
        let input = PromptInput::Assessment(AssessmentInput {
            subject: "Tiếng Anh".to_string(),
            grade_level: GradeLevel::Six,
            topic: "My school".to_string(),
            question_count: 5,
            bloom_levels: vec![CognitiveLevel::Recognition],
            question_type: QuestionType::MultipleChoice,
            target_tool: TargetTool::ChatGpt,
        });
        let prompt = GeneratedPrompt::new(input, "câu hỏi ban đầu".to_string());
        LibraryEntry::new(prompt, "Kiểm tra 15 phút")
    }

    #[test]
    fn new_entry_starts_at_version_one() {
        let entry = entry();
        assert_eq!(entry.current_version(), 1);
        assert_eq!(entry.version(1).unwrap().text, "câu hỏi ban đầu");
    }

    #[test]
    fn record_version_updates_current_text() {
        let mut entry = entry();
        let number = entry.record_version("bản sửa".to_string(), Some("rút gọn".to_string()));
        assert_eq!(number, 2);
        assert_eq!(entry.prompt.generated_text, "bản sửa");
        assert_eq!(entry.versions.len(), 2);
    }

    #[test]
    fn average_rating() {
        let mut entry = entry();
        assert_eq!(entry.average_rating(), None);
        entry.ratings.insert("a".to_string(), 5);
        entry.ratings.insert("b".to_string(), 2);
        assert_eq!(entry.average_rating(), Some(3.5));
    }

    #[test]
    fn filter_by_tag_and_query() {
        let entry = entry();
        let by_tag = SharedFilter { tag: Some("câubloom".to_string()), query: None };
        assert!(!entry.matches(&by_tag));
        let by_tag = SharedFilter { tag: Some("#CÂUHỎIBLOOM".to_string()), query: None };
        assert!(entry.matches(&by_tag));
        let by_query = SharedFilter { tag: None, query: Some("tiếng anh".to_string()) };
        assert!(entry.matches(&by_query));
        let miss = SharedFilter { tag: None, query: Some("hóa học".to_string()) };
        assert!(!entry.matches(&miss));
    }

    #[test]
    fn tags_are_normalized() {
        let tags = vec![
            "Ôn tập".to_string(),
            "#Ôn tập".to_string(),
            "  ".to_string(),
            "#".to_string(),
            "#Lớp6".to_string(),
        ];
        assert_eq!(normalize_tags(&tags), vec!["#Ôn tập".to_string(), "#Lớp6".to_string()]);
    }
}
