//! Prompt generation with a read-through cache.

use std::time::Duration;

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::domain::{
    AppError, AssessmentInput, GeneratedPrompt, LessonPlanInput, PresentationInput, PromptInput,
    PromptKind, distribute,
};
use crate::ports::{CacheError, PromptCache, TemplateRenderer};

/// Lifetime of a cached prompt unless configured otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const KEY_PREFIX: &str = "prompt";

/// Cache key for an input: `prompt:<kind>:<sha256 of canonical JSON>`.
///
/// The input is serialized through `serde_json::Value`, whose object keys are
/// sorted, so field order never affects the key.
pub fn cache_key(input: &PromptInput) -> Result<String, AppError> {
    let canonical = serde_json::to_string(&serde_json::to_value(input)?)?;
    Ok(format!("{}{}", kind_prefix(input.kind()), hash_content(&canonical)))
}

/// Key prefix shared by every cached prompt of `kind`.
pub fn kind_prefix(kind: PromptKind) -> String {
    format!("{KEY_PREFIX}:{}:", kind.as_str())
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}

/// Service for generating prompts from structured input.
///
/// Rendering is deterministic, so the cache only saves work; any cache
/// failure is logged and generation carries on without it.
pub struct PromptGenerator<C: PromptCache, R: TemplateRenderer> {
    cache: C,
    renderer: R,
    ttl: Duration,
}

impl<C: PromptCache, R: TemplateRenderer> PromptGenerator<C, R> {
    pub fn new(cache: C, renderer: R) -> Self {
        Self::with_ttl(cache, renderer, DEFAULT_TTL)
    }

    pub fn with_ttl(cache: C, renderer: R, ttl: Duration) -> Self {
        Self { cache, renderer, ttl }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn generate_lesson_plan(
        &self,
        input: LessonPlanInput,
    ) -> Result<GeneratedPrompt, AppError> {
        self.generate(&input.into())
    }

    pub fn generate_presentation(
        &self,
        input: PresentationInput,
    ) -> Result<GeneratedPrompt, AppError> {
        self.generate(&input.into())
    }

    pub fn generate_assessment(
        &self,
        input: AssessmentInput,
    ) -> Result<GeneratedPrompt, AppError> {
        self.generate(&input.into())
    }

    /// Validate, then return the cached prompt for `input` or render a new one.
    ///
    /// The returned prompt has an empty `user_id`.
    pub fn generate(&self, input: &PromptInput) -> Result<GeneratedPrompt, AppError> {
        input.validate()?;
        let key = cache_key(input)?;

        if let Some(cached) = self.lookup(&key) {
            debug!(%key, "prompt cache hit");
            return Ok(cached);
        }
        debug!(%key, "prompt cache miss");

        let body = match input {
            PromptInput::LessonPlan(input) => self.renderer.render_lesson_plan(input),
            PromptInput::Presentation(input) => self.renderer.render_presentation(input),
            PromptInput::Assessment(input) => {
                let distribution = distribute(input.question_count, &input.bloom_levels)?;
                self.renderer.render_assessment(input, &distribution)
            }
        };
        let text = format!("{body}{}", input.target_tool().footer());
        let prompt = GeneratedPrompt::new(input.clone(), text);

        self.store(&key, &prompt);
        info!(
            kind = %input.kind(),
            tool = input.target_tool().as_str(),
            id = %prompt.id,
            chars = prompt.generated_text.chars().count(),
            "generated prompt"
        );
        Ok(prompt)
    }

    /// Drop cached prompts of one kind, or all of them.
    pub fn invalidate(&self, kind: Option<PromptKind>) -> Result<usize, CacheError> {
        let prefix = match kind {
            Some(kind) => kind_prefix(kind),
            None => format!("{KEY_PREFIX}:"),
        };
        self.cache.invalidate_by_prefix(&prefix)
    }

    fn lookup(&self, key: &str) -> Option<GeneratedPrompt> {
        let raw = match self.cache.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(%key, error = %err, "prompt cache read failed; rendering directly");
                return None;
            }
        };

        match serde_json::from_str::<GeneratedPrompt>(&raw) {
            Ok(prompt) => Some(prompt),
            Err(err) => {
                warn!(%key, error = %err, "discarding unreadable cached prompt");
                if let Err(err) = self.cache.delete(key) {
                    warn!(%key, error = %err, "failed to delete unreadable cached prompt");
                }
                None
            }
        }
    }

    fn store(&self, key: &str, prompt: &GeneratedPrompt) {
        let raw = match serde_json::to_string(prompt) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%key, error = %err, "failed to serialize prompt for cache");
                return;
            }
        };
        if let Err(err) = self.cache.set(key, raw, self.ttl) {
            warn!(%key, error = %err, "prompt cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CognitiveLevel, GradeLevel, OutputFormat, QuestionType, TargetTool};
    use crate::services::{BuiltinTemplates, InMemoryPromptCache};
    use crate::testing::{CountingRenderer, FailingCache};
    use std::collections::HashSet;
    use std::thread;

    fn lesson_plan(tool: TargetTool) -> LessonPlanInput {
        LessonPlanInput {
            subject: "Toán học".to_string(),
            grade_level: GradeLevel::Seven,
            lesson_name: "Số hữu tỉ".to_string(),
            pedagogical_standard: "GDPT 2018".to_string(),
            output_format: OutputFormat::FourColumn,
            target_tool: tool,
        }
    }

    fn assessment() -> AssessmentInput {
        AssessmentInput {
            subject: "Khoa học tự nhiên".to_string(),
            grade_level: GradeLevel::Eight,
            topic: "Áp suất".to_string(),
            question_count: 12,
            bloom_levels: vec![
                CognitiveLevel::Recognition,
                CognitiveLevel::Application,
                CognitiveLevel::Evaluation,
            ],
            question_type: QuestionType::MultipleChoice,
            target_tool: TargetTool::Gemini,
        }
    }

    fn counting_generator() -> PromptGenerator<InMemoryPromptCache, CountingRenderer> {
        PromptGenerator::new(InMemoryPromptCache::default(), CountingRenderer::default())
    }

    #[test]
    fn lesson_plan_tags_match_subject_and_grade() {
        let generator = PromptGenerator::new(InMemoryPromptCache::default(), BuiltinTemplates);
        let prompt = generator.generate_lesson_plan(lesson_plan(TargetTool::ChatGpt)).unwrap();

        let tags: HashSet<&str> = prompt.tags.iter().map(String::as_str).collect();
        let expected: HashSet<&str> = [
            "#GDPT2018",
            "#Chuẩn5512",
            "#KếHoạchBàiDạy",
            "#TổChứcHoạtĐộng",
            "#Toán học",
            "#Lớp7",
        ]
        .into_iter()
        .collect();
        assert_eq!(tags, expected);
        assert!(!prompt.is_shared);
        assert!(prompt.user_id.is_empty());
    }

    #[test]
    fn second_call_is_served_from_cache() {
        let generator = counting_generator();
        let first = generator.generate_assessment(assessment()).unwrap();
        let second = generator.generate_assessment(assessment()).unwrap();

        assert_eq!(generator.renderer().calls(), 1);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.id, first.id);
        assert_eq!(second.generated_text, first.generated_text);
    }

    #[test]
    fn expired_entry_triggers_recomputation() {
        let generator = PromptGenerator::with_ttl(
            InMemoryPromptCache::default(),
            CountingRenderer::default(),
            Duration::from_secs(1),
        );
        let first = generator.generate_lesson_plan(lesson_plan(TargetTool::Copilot)).unwrap();
        thread::sleep(Duration::from_millis(1100));
        let second = generator.generate_lesson_plan(lesson_plan(TargetTool::Copilot)).unwrap();

        assert_eq!(generator.renderer().calls(), 2);
        assert!(second.created_at > first.created_at);
        assert_eq!(second.generated_text, first.generated_text);
    }

    #[test]
    fn fresh_renders_are_byte_identical() {
        let generator = counting_generator();
        let first = generator.generate_assessment(assessment()).unwrap();
        generator.cache().clear().unwrap();
        let second = generator.generate_assessment(assessment()).unwrap();

        assert_eq!(generator.renderer().calls(), 2);
        assert_ne!(first.id, second.id);
        assert_eq!(first.generated_text, second.generated_text);
    }

    #[test]
    fn text_ends_with_tool_footer() {
        let generator = PromptGenerator::new(InMemoryPromptCache::default(), BuiltinTemplates);
        for tool in TargetTool::ALL {
            let prompt = generator.generate_lesson_plan(lesson_plan(tool)).unwrap();
            assert!(prompt.generated_text.ends_with(tool.footer()), "footer for {tool:?}");
            for other in TargetTool::ALL.iter().filter(|other| **other != tool) {
                assert!(!prompt.generated_text.ends_with(other.footer()));
            }
        }
    }

    #[test]
    fn invalid_assessment_is_rejected_before_rendering() {
        let generator = counting_generator();

        let mut zero = assessment();
        zero.question_count = 0;
        let err = generator.generate_assessment(zero).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut no_levels = assessment();
        no_levels.bloom_levels.clear();
        let err = generator.generate_assessment(no_levels).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "bloom_levels");

        assert_eq!(generator.renderer().calls(), 0);
        assert!(generator.cache().is_empty());
    }

    #[test]
    fn cache_failures_fall_back_to_rendering() {
        let generator = PromptGenerator::new(FailingCache, CountingRenderer::default());
        let first = generator.generate_lesson_plan(lesson_plan(TargetTool::Gemini)).unwrap();
        let second = generator.generate_lesson_plan(lesson_plan(TargetTool::Gemini)).unwrap();

        assert_eq!(generator.renderer().calls(), 2);
        assert_eq!(first.generated_text, second.generated_text);
    }

    #[test]
    fn unreadable_cache_entry_is_replaced() {
        let generator = counting_generator();
        let input: PromptInput = lesson_plan(TargetTool::ChatGpt).into();
        let key = cache_key(&input).unwrap();
        generator.cache().set(&key, "{not json".to_string(), DEFAULT_TTL).unwrap();

        let prompt = generator.generate(&input).unwrap();
        assert_eq!(generator.renderer().calls(), 1);

        let cached = generator.cache().get(&key).unwrap().unwrap();
        let cached: GeneratedPrompt = serde_json::from_str(&cached).unwrap();
        assert_eq!(cached.id, prompt.id);
    }

    #[test]
    fn cache_key_depends_on_kind_and_content() {
        let a: PromptInput = lesson_plan(TargetTool::ChatGpt).into();
        let b: PromptInput = lesson_plan(TargetTool::Gemini).into();

        let key = cache_key(&a).unwrap();
        assert!(key.starts_with("prompt:lesson-plan:"));
        assert_eq!(key.len(), "prompt:lesson-plan:".len() + 64);
        assert_eq!(key, cache_key(&a.clone()).unwrap());
        assert_ne!(key, cache_key(&b).unwrap());
    }

    #[test]
    fn invalidate_by_kind() {
        let generator = counting_generator();
        generator.generate_lesson_plan(lesson_plan(TargetTool::ChatGpt)).unwrap();
        generator.generate_assessment(assessment()).unwrap();

        assert_eq!(generator.invalidate(Some(PromptKind::LessonPlan)).unwrap(), 1);
        assert_eq!(generator.cache().len(), 1);
        assert_eq!(generator.invalidate(None).unwrap(), 1);
        assert!(generator.cache().is_empty());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn generation_is_deterministic(
            count in 1u32..=50,
            level_mask in 1u8..64,
            grade in 6u8..=9,
            tool_index in 0usize..5,
        ) {
            let levels: Vec<CognitiveLevel> = CognitiveLevel::ALL
                .iter()
                .enumerate()
                .filter(|(i, _)| level_mask & (1 << i) != 0)
                .map(|(_, level)| *level)
                .collect();
            let input = AssessmentInput {
                question_count: count,
                bloom_levels: levels,
                grade_level: GradeLevel::from_number(grade).unwrap(),
                target_tool: TargetTool::ALL[tool_index],
                ..assessment()
            };

            let first = PromptGenerator::new(InMemoryPromptCache::default(), BuiltinTemplates)
                .generate_assessment(input.clone())
                .unwrap();
            let second = PromptGenerator::new(InMemoryPromptCache::default(), BuiltinTemplates)
                .generate_assessment(input)
                .unwrap();
            prop_assert_eq!(first.generated_text, second.generated_text);
        }
    }
}
