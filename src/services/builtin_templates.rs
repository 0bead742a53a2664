use crate::domain::templates;
use crate::domain::{AssessmentInput, BloomDistribution, LessonPlanInput, PresentationInput};
use crate::ports::TemplateRenderer;

/// Renderer backed by the built-in Vietnamese templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for BuiltinTemplates {
    fn render_lesson_plan(&self, input: &LessonPlanInput) -> String {
        templates::render_lesson_plan(input)
    }

    fn render_presentation(&self, input: &PresentationInput) -> String {
        templates::render_presentation(input)
    }

    fn render_assessment(
        &self,
        input: &AssessmentInput,
        distribution: &BloomDistribution,
    ) -> String {
        templates::render_assessment(input, distribution)
    }
}
