//! Structured inputs for the three prompt generators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{AppError, CognitiveLevel, FieldError, GradeLevel, TargetTool};

pub const NAME_MAX_CHARS: usize = 200;
pub const CURRICULUM_MIN_CHARS: usize = 10;
pub const CURRICULUM_MAX_CHARS: usize = 5000;
pub const SLIDE_COUNT_RANGE: (u32, u32) = (3, 20);
pub const QUESTION_COUNT_RANGE: (u32, u32) = (1, 50);

/// Column layout of the lesson-plan activity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    FourColumn,
    FiveColumn,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::FourColumn => "four-column",
            OutputFormat::FiveColumn => "five-column",
        }
    }

    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name.trim().to_lowercase().as_str() {
            "four-column" | "4" => Some(OutputFormat::FourColumn),
            "five-column" | "5" => Some(OutputFormat::FiveColumn),
            _ => None,
        }
    }

    /// Table headers in column order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            OutputFormat::FourColumn => &[
                "Hoạt động của giáo viên",
                "Hoạt động của học sinh",
                "Nội dung cần đạt",
                "Phương pháp/Kỹ thuật dạy học",
            ],
            OutputFormat::FiveColumn => &[
                "Thời gian",
                "Hoạt động của giáo viên",
                "Hoạt động của học sinh",
                "Nội dung cần đạt",
                "Phương pháp/Kỹ thuật dạy học",
            ],
        }
    }
}

/// Form of the questions in an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
    Essay,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::ShortAnswer => "short-answer",
            QuestionType::Essay => "essay",
        }
    }

    pub fn from_name(name: &str) -> Option<QuestionType> {
        match name.trim().to_lowercase().as_str() {
            "multiple-choice" | "mcq" => Some(QuestionType::MultipleChoice),
            "short-answer" => Some(QuestionType::ShortAnswer),
            "essay" => Some(QuestionType::Essay),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Trắc nghiệm nhiều lựa chọn",
            QuestionType::ShortAnswer => "Trả lời ngắn",
            QuestionType::Essay => "Tự luận",
        }
    }
}

/// Discriminator for the three prompt shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    LessonPlan,
    Presentation,
    Assessment,
}

impl PromptKind {
    pub const ALL: [PromptKind; 3] =
        [PromptKind::LessonPlan, PromptKind::Presentation, PromptKind::Assessment];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::LessonPlan => "lesson-plan",
            PromptKind::Presentation => "presentation",
            PromptKind::Assessment => "assessment",
        }
    }

    /// The two tags that identify prompts of this kind.
    pub fn tags(&self) -> [&'static str; 2] {
        match self {
            PromptKind::LessonPlan => ["#KếHoạchBàiDạy", "#TổChứcHoạtĐộng"],
            PromptKind::Presentation => ["#BàiTrìnhChiếu", "#ThiếtKếSlide"],
            PromptKind::Assessment => ["#ĐánhGiáNăngLực", "#CâuHỏiBloom"],
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPlanInput {
    pub subject: String,
    pub grade_level: GradeLevel,
    pub lesson_name: String,
    pub pedagogical_standard: String,
    pub output_format: OutputFormat,
    pub target_tool: TargetTool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationInput {
    pub subject: String,
    pub grade_level: GradeLevel,
    pub lesson_name: String,
    pub curriculum_content: String,
    pub slide_count: u32,
    pub target_tool: TargetTool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub subject: String,
    pub grade_level: GradeLevel,
    pub topic: String,
    pub question_count: u32,
    pub bloom_levels: Vec<CognitiveLevel>,
    pub question_type: QuestionType,
    pub target_tool: TargetTool,
}

/// Any of the three generator inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PromptInput {
    LessonPlan(LessonPlanInput),
    Presentation(PresentationInput),
    Assessment(AssessmentInput),
}

impl PromptInput {
    pub fn kind(&self) -> PromptKind {
        match self {
            PromptInput::LessonPlan(_) => PromptKind::LessonPlan,
            PromptInput::Presentation(_) => PromptKind::Presentation,
            PromptInput::Assessment(_) => PromptKind::Assessment,
        }
    }

    pub fn subject(&self) -> &str {
        match self {
            PromptInput::LessonPlan(input) => &input.subject,
            PromptInput::Presentation(input) => &input.subject,
            PromptInput::Assessment(input) => &input.subject,
        }
    }

    pub fn grade_level(&self) -> GradeLevel {
        match self {
            PromptInput::LessonPlan(input) => input.grade_level,
            PromptInput::Presentation(input) => input.grade_level,
            PromptInput::Assessment(input) => input.grade_level,
        }
    }

    /// Lesson name or assessment topic.
    pub fn headline(&self) -> &str {
        match self {
            PromptInput::LessonPlan(input) => &input.lesson_name,
            PromptInput::Presentation(input) => &input.lesson_name,
            PromptInput::Assessment(input) => &input.topic,
        }
    }

    pub fn target_tool(&self) -> TargetTool {
        match self {
            PromptInput::LessonPlan(input) => input.target_tool,
            PromptInput::Presentation(input) => input.target_tool,
            PromptInput::Assessment(input) => input.target_tool,
        }
    }

    /// Check field ranges, reporting every offending field at once.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        match self {
            PromptInput::LessonPlan(input) => {
                check_required(&mut errors, "subject", &input.subject);
                check_length(&mut errors, "lesson_name", &input.lesson_name, 1, NAME_MAX_CHARS);
                check_required(&mut errors, "pedagogical_standard", &input.pedagogical_standard);
            }
            PromptInput::Presentation(input) => {
                check_required(&mut errors, "subject", &input.subject);
                check_length(&mut errors, "lesson_name", &input.lesson_name, 1, NAME_MAX_CHARS);
                check_length(
                    &mut errors,
                    "curriculum_content",
                    &input.curriculum_content,
                    CURRICULUM_MIN_CHARS,
                    CURRICULUM_MAX_CHARS,
                );
                check_range(&mut errors, "slide_count", input.slide_count, SLIDE_COUNT_RANGE);
            }
            PromptInput::Assessment(input) => {
                check_required(&mut errors, "subject", &input.subject);
                check_length(&mut errors, "topic", &input.topic, 1, NAME_MAX_CHARS);
                check_range(&mut errors, "question_count", input.question_count, QUESTION_COUNT_RANGE);
                if input.bloom_levels.is_empty() {
                    errors.push(FieldError::new("bloom_levels", "must select at least one level"));
                } else if has_duplicates(&input.bloom_levels) {
                    errors.push(FieldError::new("bloom_levels", "must not repeat a level"));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(AppError::Validation(errors)) }
    }
}

impl From<LessonPlanInput> for PromptInput {
    fn from(value: LessonPlanInput) -> Self {
        PromptInput::LessonPlan(value)
    }
}

impl From<PresentationInput> for PromptInput {
    fn from(value: PresentationInput) -> Self {
        PromptInput::Presentation(value)
    }
}

impl From<AssessmentInput> for PromptInput {
    fn from(value: AssessmentInput) -> Self {
        PromptInput::Assessment(value)
    }
}

fn check_required(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be blank"));
    }
}

fn check_length(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be blank"));
        return;
    }
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(FieldError::new(
            field,
            format!("must be between {min} and {max} characters (got {len})"),
        ));
    }
}

fn check_range(errors: &mut Vec<FieldError>, field: &'static str, value: u32, range: (u32, u32)) {
    let (min, max) = range;
    if value < min || value > max {
        errors.push(FieldError::new(field, format!("must be between {min} and {max} (got {value})")));
    }
}

fn has_duplicates(levels: &[CognitiveLevel]) -> bool {
    levels.iter().enumerate().any(|(i, level)| levels[..i].contains(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment() -> AssessmentInput {
        AssessmentInput {
            subject: "Ngữ văn".to_string(),
            grade_level: GradeLevel::Eight,
            topic: "Truyện ngắn hiện đại".to_string(),
            question_count: 10,
            bloom_levels: vec![CognitiveLevel::Recognition, CognitiveLevel::Analysis],
            question_type: QuestionType::ShortAnswer,
            target_tool: TargetTool::Gemini,
        }
    }

    fn fields(err: AppError) -> Vec<&'static str> {
        err.field_errors().iter().map(|e| e.field).collect()
    }

    #[test]
    fn valid_assessment_passes() {
        assert!(PromptInput::from(assessment()).validate().is_ok());
    }

    #[test]
    fn zero_questions_rejected() {
        let mut input = assessment();
        input.question_count = 0;
        let err = PromptInput::from(input).validate().unwrap_err();
        assert_eq!(fields(err), vec!["question_count"]);
    }

    #[test]
    fn empty_and_repeated_levels_rejected() {
        let mut input = assessment();
        input.bloom_levels.clear();
        let err = PromptInput::from(input.clone()).validate().unwrap_err();
        assert_eq!(fields(err), vec!["bloom_levels"]);

        input.bloom_levels = vec![CognitiveLevel::Analysis, CognitiveLevel::Analysis];
        let err = PromptInput::from(input).validate().unwrap_err();
        assert_eq!(fields(err), vec!["bloom_levels"]);
    }

    #[test]
    fn presentation_reports_all_bad_fields() {
        let input = PresentationInput {
            subject: " ".to_string(),
            grade_level: GradeLevel::Six,
            lesson_name: "Phân số".to_string(),
            curriculum_content: "ngắn".to_string(),
            slide_count: 25,
            target_tool: TargetTool::CanvaAi,
        };
        let err = PromptInput::from(input).validate().unwrap_err();
        assert_eq!(fields(err), vec!["subject", "curriculum_content", "slide_count"]);
    }

    #[test]
    fn lesson_name_length_counts_characters_not_bytes() {
        let input = LessonPlanInput {
            subject: "Lịch sử".to_string(),
            grade_level: GradeLevel::Nine,
            // 200 multi-byte characters
            lesson_name: "ệ".repeat(NAME_MAX_CHARS),
            pedagogical_standard: "CV 5512".to_string(),
            output_format: OutputFormat::FiveColumn,
            target_tool: TargetTool::Copilot,
        };
        assert!(PromptInput::from(input.clone()).validate().is_ok());

        let mut too_long = input;
        too_long.lesson_name.push('ệ');
        assert!(PromptInput::from(too_long).validate().is_err());
    }

    #[test]
    fn input_serializes_with_type_tag() {
        let json = serde_json::to_value(PromptInput::from(assessment())).unwrap();
        assert_eq!(json["type"], "assessment");
        assert_eq!(json["grade_level"], 8);
        assert_eq!(json["question_type"], "short-answer");
        assert_eq!(json["bloom_levels"][1], "analysis");
    }
}
