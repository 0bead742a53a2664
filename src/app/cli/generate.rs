//! `generate` subcommands.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::output::{self, FORMATS, Format};
use crate::app::api::{self, DefaultContext};
use crate::domain::{
    AppError, AssessmentInput, CognitiveLevel, GeneratedPrompt, GradeLevel, LessonPlanInput,
    OutputFormat, PresentationInput, PromptInput, QuestionType,
};

#[derive(Args)]
pub struct CommonArgs {
    /// Subject, e.g. "Toán" or "Ngữ văn"
    #[arg(long)]
    subject: String,
    /// Grade level (6-9)
    #[arg(long)]
    grade: u8,
    /// Target AI tool
    #[arg(long, default_value = "chatgpt")]
    tool: String,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, default_value = "text", value_parser = FORMATS)]
    format: String,
    /// Save the prompt to your library
    #[arg(long)]
    save: bool,
    /// Library title (defaults to lesson or topic and subject)
    #[arg(long, requires = "save")]
    title: Option<String>,
}

#[derive(Subcommand)]
pub enum GenerateCommands {
    /// Lesson plan following Công văn 5512
    #[clap(visible_alias = "lp")]
    LessonPlan {
        #[command(flatten)]
        common: CommonArgs,
        /// Lesson name
        #[arg(long)]
        lesson: String,
        /// Pedagogical standard to follow
        #[arg(long, default_value = "Công văn 5512")]
        standard: String,
        /// Activity table layout
        #[arg(
            long,
            default_value = "four-column",
            value_parser = ["four-column", "five-column", "4", "5"]
        )]
        columns: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Slide deck outline grounded in curriculum text
    #[clap(visible_alias = "ppt")]
    Presentation {
        #[command(flatten)]
        common: CommonArgs,
        /// Lesson name
        #[arg(long)]
        lesson: String,
        /// Curriculum content the slides may draw on
        #[arg(long, conflicts_with = "content_file", required_unless_present = "content_file")]
        content: Option<String>,
        /// Read curriculum content from a file
        #[arg(long)]
        content_file: Option<PathBuf>,
        /// Number of slides (3-20)
        #[arg(long, default_value_t = 10)]
        slides: u32,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Assessment with a Bloom matrix
    #[clap(visible_alias = "as")]
    Assessment {
        #[command(flatten)]
        common: CommonArgs,
        /// Topic being assessed
        #[arg(long)]
        topic: String,
        /// Number of questions (1-50)
        #[arg(long, default_value_t = 10)]
        questions: u32,
        /// Comma-separated Bloom levels
        #[arg(long, value_delimiter = ',', default_value = "recognition,comprehension,application")]
        levels: Vec<String>,
        /// multiple-choice, short-answer or essay
        #[arg(long, default_value = "multiple-choice")]
        question_type: String,
        #[command(flatten)]
        output: OutputArgs,
    },
}

pub fn run_generate(ctx: &DefaultContext, command: GenerateCommands) -> Result<(), AppError> {
    let (input, output) = build_input(command)?;

    let prompt = if output.save {
        let entry = api::generate_and_save(ctx, &input, output.title.as_deref())?;
        eprintln!("✅ Saved to library as {} ({})", entry.id(), entry.title);
        entry.prompt
    } else {
        ctx.generator().generate(&input)?
    };

    output::emit(Format::from_name(&output.format), &prompt, |prompt: &GeneratedPrompt| {
        println!("{}", prompt.generated_text);
    })
}

fn build_input(command: GenerateCommands) -> Result<(PromptInput, OutputArgs), AppError> {
    match command {
        GenerateCommands::LessonPlan { common, lesson, standard, columns, output } => {
            let output_format = OutputFormat::from_name(&columns).ok_or_else(|| {
                AppError::invalid_field("output_format", format!("unknown layout '{columns}'"))
            })?;
            let input = LessonPlanInput {
                subject: common.subject,
                grade_level: parse_grade(common.grade)?,
                lesson_name: lesson,
                pedagogical_standard: standard,
                output_format,
                target_tool: api::find_tool(&common.tool)?,
            };
            Ok((input.into(), output))
        }
        GenerateCommands::Presentation {
            common,
            lesson,
            content,
            content_file,
            slides,
            output,
        } => {
            let curriculum_content = match (content, content_file) {
                (Some(content), _) => content,
                (None, Some(path)) => fs::read_to_string(path)?,
                (None, None) => String::new(),
            };
            let input = PresentationInput {
                subject: common.subject,
                grade_level: parse_grade(common.grade)?,
                lesson_name: lesson,
                curriculum_content,
                slide_count: slides,
                target_tool: api::find_tool(&common.tool)?,
            };
            Ok((input.into(), output))
        }
        GenerateCommands::Assessment {
            common,
            topic,
            questions,
            levels,
            question_type,
            output,
        } => {
            let bloom_levels = levels
                .iter()
                .map(|name| {
                    CognitiveLevel::from_name(name).ok_or_else(|| {
                        AppError::invalid_field("bloom_levels", format!("unknown level '{name}'"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let question_type = QuestionType::from_name(&question_type).ok_or_else(|| {
                AppError::invalid_field(
                    "question_type",
                    format!("unknown question type '{question_type}'"),
                )
            })?;
            let input = AssessmentInput {
                subject: common.subject,
                grade_level: parse_grade(common.grade)?,
                topic,
                question_count: questions,
                bloom_levels,
                question_type,
                target_tool: api::find_tool(&common.tool)?,
            };
            Ok((input.into(), output))
        }
    }
}

fn parse_grade(value: u8) -> Result<GradeLevel, AppError> {
    GradeLevel::try_from(value).map_err(|message| AppError::invalid_field("grade_level", message))
}
