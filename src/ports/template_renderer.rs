use crate::domain::{AssessmentInput, BloomDistribution, LessonPlanInput, PresentationInput};

/// Port for turning validated inputs into prompt text.
pub trait TemplateRenderer {
    fn render_lesson_plan(&self, input: &LessonPlanInput) -> String;

    fn render_presentation(&self, input: &PresentationInput) -> String;

    /// `distribution` is computed by the caller from the input's count and levels.
    fn render_assessment(
        &self,
        input: &AssessmentInput,
        distribution: &BloomDistribution,
    ) -> String;
}
