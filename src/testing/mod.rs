//! Test doubles for the generator ports.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::{AssessmentInput, BloomDistribution, LessonPlanInput, PresentationInput};
use crate::ports::{CacheError, PromptCache, TemplateRenderer};
use crate::services::BuiltinTemplates;

/// Built-in renderer that counts how often it was asked to render.
#[derive(Debug, Default)]
pub struct CountingRenderer {
    inner: BuiltinTemplates,
    calls: AtomicUsize,
}

impl CountingRenderer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl TemplateRenderer for CountingRenderer {
    fn render_lesson_plan(&self, input: &LessonPlanInput) -> String {
        self.record();
        self.inner.render_lesson_plan(input)
    }

    fn render_presentation(&self, input: &PresentationInput) -> String {
        self.record();
        self.inner.render_presentation(input)
    }

    fn render_assessment(
        &self,
        input: &AssessmentInput,
        distribution: &BloomDistribution,
    ) -> String {
        self.record();
        self.inner.render_assessment(input, distribution)
    }
}

/// Cache whose backend is always down.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingCache;

impl FailingCache {
    fn unavailable() -> CacheError {
        CacheError::Unavailable("connection refused".to_string())
    }
}

impl PromptCache for FailingCache {
    fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(Self::unavailable())
    }

    fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        Err(Self::unavailable())
    }

    fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(Self::unavailable())
    }

    fn invalidate_by_prefix(&self, _prefix: &str) -> Result<usize, CacheError> {
        Err(Self::unavailable())
    }

    fn clear(&self) -> Result<(), CacheError> {
        Err(Self::unavailable())
    }
}

/// Sets or removes an environment variable, restoring it on drop.
///
/// Tests using it must be `#[serial]`.
pub struct EnvVarGuard {
    key: String,
    original: Option<String>,
}

impl EnvVarGuard {
    pub fn set(key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let original = std::env::var(key).ok();
        unsafe { std::env::set_var(key, value) };
        Self { key: key.to_string(), original }
    }

    pub fn remove(key: &str) -> Self {
        let original = std::env::var(key).ok();
        unsafe { std::env::remove_var(key) };
        Self { key: key.to_string(), original }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.original {
            Some(original) => unsafe { std::env::set_var(&self.key, original) },
            None => unsafe { std::env::remove_var(&self.key) },
        }
    }
}
