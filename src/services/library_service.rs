//! Personal prompt library and community sharing.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::info;
use uuid::Uuid;

use crate::domain::{
    AppError, GeneratedPrompt, LibraryEntry, PromptVersion, RATING_RANGE, SharedFilter,
    normalize_tags,
};
use crate::ports::PromptLibrary;

/// Ownership, versioning and sharing rules over a [`PromptLibrary`] store.
pub struct LibraryService<L: PromptLibrary> {
    store: L,
    moderators: BTreeSet<String>,
}

impl<L: PromptLibrary> LibraryService<L> {
    pub fn new(store: L) -> Self {
        Self { store, moderators: BTreeSet::new() }
    }

    pub fn with_moderators<I, S>(mut self, moderators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moderators = moderators
            .into_iter()
            .map(Into::into)
            .map(|moderator: String| moderator.trim().to_string())
            .filter(|moderator| !moderator.is_empty())
            .collect();
        self
    }

    pub fn store(&self) -> &L {
        &self.store
    }

    /// Save a generated prompt into `user`'s library.
    ///
    /// The entry gets a fresh id, so the same cached prompt saved twice makes
    /// two independent entries. Without a title, the lesson name or topic and
    /// the subject are used.
    pub fn save(
        &self,
        user: &str,
        mut prompt: GeneratedPrompt,
        title: Option<&str>,
    ) -> Result<LibraryEntry, AppError> {
        let user = require_user(user)?;
        prompt.id = Uuid::new_v4();
        prompt.user_id = user.to_string();

        let title = match title.map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!(
                "{} ({})",
                prompt.input_parameters.headline().trim(),
                prompt.input_parameters.subject().trim()
            ),
        };

        let entry = LibraryEntry::new(prompt, title);
        self.store.save(&entry)?;
        info!(id = %entry.id(), user, title = %entry.title, "saved prompt to library");
        Ok(entry)
    }

    /// Fetch an entry the user owns or that has been shared.
    pub fn get(&self, user: &str, id: Uuid) -> Result<LibraryEntry, AppError> {
        let user = require_user(user)?;
        let entry = self.load(id)?;
        if entry.owner() != user && !entry.is_shared() {
            return Err(AppError::unauthorized(user, "view", id));
        }
        Ok(entry)
    }

    /// The user's own entries, most recently updated first.
    pub fn list_for_user(&self, user: &str) -> Result<Vec<LibraryEntry>, AppError> {
        let user = require_user(user)?;
        let mut entries: Vec<LibraryEntry> =
            self.store.list()?.into_iter().filter(|entry| entry.owner() == user).collect();
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(entries)
    }

    /// Replace the prompt text, recording a new version.
    pub fn edit(
        &self,
        user: &str,
        id: Uuid,
        text: &str,
        note: Option<&str>,
    ) -> Result<LibraryEntry, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::invalid_field("text", "must not be blank"));
        }
        let (user, mut entry) = self.owned(user, id, "edit")?;
        let number = entry.record_version(text.to_string(), note.map(str::to_string));
        self.store.save(&entry)?;
        info!(%id, user, version = number, "edited library prompt");
        Ok(entry)
    }

    pub fn history(&self, user: &str, id: Uuid) -> Result<Vec<PromptVersion>, AppError> {
        Ok(self.owned(user, id, "view history of")?.1.versions)
    }

    /// Restore an earlier version by appending a copy of it.
    pub fn revert(&self, user: &str, id: Uuid, version: u32) -> Result<LibraryEntry, AppError> {
        let (user, mut entry) = self.owned(user, id, "revert")?;
        let text = entry.version(version).map(|v| v.text.clone()).ok_or_else(|| {
            AppError::invalid_field("version", format!("{version} does not exist"))
        })?;
        let number = entry.record_version(text, Some(format!("Khôi phục phiên bản {version}")));
        self.store.save(&entry)?;
        info!(%id, user, from = version, version = number, "reverted library prompt");
        Ok(entry)
    }

    pub fn set_shared(&self, user: &str, id: Uuid, shared: bool) -> Result<LibraryEntry, AppError> {
        let (user, mut entry) = self.owned(user, id, "share")?;
        entry.prompt.is_shared = shared;
        entry.updated_at = chrono::Utc::now();
        self.store.save(&entry)?;
        info!(%id, user, shared, "changed sharing");
        Ok(entry)
    }

    /// Replace the entry's tags with a normalized copy of `tags`.
    pub fn retag(&self, user: &str, id: Uuid, tags: &[String]) -> Result<LibraryEntry, AppError> {
        let (_, mut entry) = self.owned(user, id, "tag")?;
        entry.prompt.tags = normalize_tags(tags);
        entry.updated_at = chrono::Utc::now();
        self.store.save(&entry)?;
        Ok(entry)
    }

    pub fn delete(&self, user: &str, id: Uuid) -> Result<(), AppError> {
        let (user, _) = self.owned(user, id, "delete")?;
        self.store.remove(id)?;
        info!(%id, user, "deleted library prompt");
        Ok(())
    }

    /// Shared entries matching `filter`, best rated first, then newest.
    pub fn list_shared(&self, filter: &SharedFilter) -> Result<Vec<LibraryEntry>, AppError> {
        let mut entries: Vec<LibraryEntry> = self
            .store
            .list()?
            .into_iter()
            .filter(|entry| entry.is_shared() && entry.matches(filter))
            .collect();
        entries.sort_by(|a, b| {
            let by_rating = b
                .average_rating()
                .unwrap_or(0.0)
                .partial_cmp(&a.average_rating().unwrap_or(0.0))
                .unwrap_or(Ordering::Equal);
            by_rating.then_with(|| b.prompt.created_at.cmp(&a.prompt.created_at))
        });
        Ok(entries)
    }

    /// Rate a shared entry. Rating again replaces the user's earlier stars.
    pub fn rate(&self, user: &str, id: Uuid, stars: u8) -> Result<LibraryEntry, AppError> {
        let user = require_user(user)?;
        let (min, max) = RATING_RANGE;
        if !(min..=max).contains(&stars) {
            return Err(AppError::invalid_field(
                "stars",
                format!("must be between {min} and {max}"),
            ));
        }

        let mut entry = self.load(id)?;
        if !entry.is_shared() {
            return Err(AppError::unauthorized(user, "rate", id));
        }
        if entry.owner() == user {
            return Err(AppError::invalid_field("stars", "owners cannot rate their own prompt"));
        }

        entry.ratings.insert(user.to_string(), stars);
        self.store.save(&entry)?;
        info!(%id, user, stars, "rated shared prompt");
        Ok(entry)
    }

    pub fn average_rating(&self, id: Uuid) -> Result<Option<f64>, AppError> {
        Ok(self.load(id)?.average_rating())
    }

    /// Withdraw a shared entry from the community list.
    pub fn hide(&self, moderator: &str, id: Uuid) -> Result<LibraryEntry, AppError> {
        let moderator = require_user(moderator)?;
        if !self.moderators.contains(moderator) {
            return Err(AppError::unauthorized(moderator, "hide", id));
        }
        let mut entry = self.load(id)?;
        entry.prompt.is_shared = false;
        self.store.save(&entry)?;
        info!(%id, moderator, "hid shared prompt");
        Ok(entry)
    }

    fn load(&self, id: Uuid) -> Result<LibraryEntry, AppError> {
        self.store.load(id)?.ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Load an entry owned by `user`, returning the normalized user with it.
    fn owned<'u>(
        &self,
        user: &'u str,
        id: Uuid,
        action: &'static str,
    ) -> Result<(&'u str, LibraryEntry), AppError> {
        let user = require_user(user)?;
        let entry = self.load(id)?;
        if entry.owner() != user {
            return Err(AppError::unauthorized(user, action, id));
        }
        Ok((user, entry))
    }
}

/// Trimmed user id; blank ids are rejected.
fn require_user(user: &str) -> Result<&str, AppError> {
    let user = user.trim();
    if user.is_empty() {
        return Err(AppError::invalid_field("user_id", "must not be blank"));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GradeLevel, LessonPlanInput, OutputFormat, PromptInput, TargetTool};
    use crate::services::{
        BuiltinTemplates, InMemoryPromptCache, MemoryPromptLibrary, PromptGenerator,
    };

    fn prompt(lesson: &str) -> GeneratedPrompt {
        let input = PromptInput::LessonPlan(LessonPlanInput {
            subject: "Toán".to_string(),
            grade_level: GradeLevel::Seven,
            lesson_name: lesson.to_string(),
            pedagogical_standard: "5512".to_string(),
            output_format: OutputFormat::FourColumn,
            target_tool: TargetTool::Gemini,
        });
        GeneratedPrompt::new(input, format!("kế hoạch {lesson}"))
    }

    fn service() -> LibraryService<MemoryPromptLibrary> {
        LibraryService::new(MemoryPromptLibrary::new()).with_moderators(["admin"])
    }

    #[test]
    fn save_assigns_owner_and_default_title() {
        let service = service();
        let entry = service.save("lan", prompt("Tỉ lệ thức"), None).unwrap();

        assert_eq!(entry.owner(), "lan");
        assert_eq!(entry.title, "Tỉ lệ thức (Toán)");
        assert_eq!(service.list_for_user("lan").unwrap().len(), 1);
        assert!(service.list_for_user("minh").unwrap().is_empty());
    }

    #[test]
    fn save_requires_user() {
        let err = service().save("  ", prompt("Tỉ lệ thức"), None).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "user_id");
    }

    #[test]
    fn same_cached_prompt_saved_by_two_users_stays_separate() {
        let generator = PromptGenerator::new(InMemoryPromptCache::default(), BuiltinTemplates);
        let input = prompt("Tỉ lệ thức").input_parameters;
        let first = generator.generate(&input).unwrap();
        let second = generator.generate(&input).unwrap();
        assert_eq!(first.id, second.id);

        let service = service();
        let lan = service.save("lan", first, None).unwrap();
        service.edit("lan", lan.id(), "bản của Lan", None).unwrap();
        let minh = service.save("minh", second, None).unwrap();

        assert_ne!(lan.id(), minh.id());
        let lan_entries = service.list_for_user("lan").unwrap();
        assert_eq!(lan_entries.len(), 1);
        assert_eq!(lan_entries[0].current_version(), 2);
        assert_eq!(lan_entries[0].prompt.generated_text, "bản của Lan");
        assert_eq!(service.list_for_user("minh").unwrap().len(), 1);
        assert!(service.edit("minh", lan.id(), "x", None).is_err());
    }

    #[test]
    fn user_ids_are_trimmed_everywhere() {
        let service = service().with_moderators([" admin "]);
        let id = service.save(" lan ", prompt("Số thực"), None).unwrap().id();

        assert!(service.get("lan ", id).is_ok());
        assert_eq!(service.list_for_user(" lan").unwrap().len(), 1);
        service.edit("  lan", id, "bản hai", None).unwrap();
        assert_eq!(service.history("lan\t", id).unwrap().len(), 2);
        service.set_shared(" lan ", id, true).unwrap();
        assert!(service.rate(" lan ", id, 5).is_err());
        assert!(service.hide(" admin", id).is_ok());
        assert_eq!(service.get("  ", id).unwrap_err().field_errors()[0].field, "user_id");
        service.delete("lan ", id).unwrap();
    }

    #[test]
    fn private_entries_are_hidden_from_others() {
        let service = service();
        let entry = service.save("lan", prompt("Số thực"), Some("Bài 1")).unwrap();

        assert!(matches!(service.get("minh", entry.id()), Err(AppError::Unauthorized { .. })));
        assert!(service.get("lan", entry.id()).is_ok());

        service.set_shared("lan", entry.id(), true).unwrap();
        assert!(service.get("minh", entry.id()).is_ok());
    }

    #[test]
    fn missing_entry_is_not_found() {
        let err = service().get("lan", Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn edit_and_revert_append_versions() {
        let service = service();
        let entry = service.save("lan", prompt("Số thực"), None).unwrap();
        let id = entry.id();

        service.edit("lan", id, "bản thứ hai", Some("bổ sung ví dụ")).unwrap();
        let reverted = service.revert("lan", id, 1).unwrap();

        assert_eq!(reverted.current_version(), 3);
        assert_eq!(reverted.prompt.generated_text, "kế hoạch Số thực");
        let history = service.history("lan", id).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].note.as_deref(), Some("Khôi phục phiên bản 1"));
    }

    #[test]
    fn edit_rejects_blank_text_and_other_users() {
        let service = service();
        let id = service.save("lan", prompt("Số thực"), None).unwrap().id();

        assert_eq!(service.edit("lan", id, " ", None).unwrap_err().field_errors()[0].field, "text");
        assert!(matches!(
            service.edit("minh", id, "x", None),
            Err(AppError::Unauthorized { action: "edit", .. })
        ));
        assert!(service.revert("lan", id, 9).is_err());
    }

    #[test]
    fn retag_normalizes() {
        let service = service();
        let id = service.save("lan", prompt("Số thực"), None).unwrap().id();
        let entry =
            service.retag("lan", id, &["ôn tập".to_string(), "#ôn tập".to_string()]).unwrap();
        assert_eq!(entry.prompt.tags, vec!["#ôn tập".to_string()]);
    }

    #[test]
    fn rating_rules() {
        let service = service();
        let id = service.save("lan", prompt("Số thực"), None).unwrap().id();

        assert!(matches!(service.rate("minh", id, 4), Err(AppError::Unauthorized { .. })));
        service.set_shared("lan", id, true).unwrap();

        assert!(service.rate("lan", id, 5).is_err());
        assert!(service.rate("minh", id, 0).is_err());
        assert!(service.rate("minh", id, 6).is_err());

        service.rate("minh", id, 4).unwrap();
        service.rate("hoa", id, 2).unwrap();
        service.rate("minh", id, 5).unwrap();
        assert_eq!(service.average_rating(id).unwrap(), Some(3.5));
    }

    #[test]
    fn shared_list_orders_by_rating() {
        let service = service();
        let low = service.save("lan", prompt("Số thực"), None).unwrap().id();
        let high = service.save("lan", prompt("Tỉ lệ thức"), None).unwrap().id();
        let unrated = service.save("lan", prompt("Hàm số"), None).unwrap().id();
        let private = service.save("lan", prompt("Đồ thị"), None).unwrap().id();
        for id in [low, high, unrated] {
            service.set_shared("lan", id, true).unwrap();
        }
        service.rate("minh", low, 2).unwrap();
        service.rate("minh", high, 5).unwrap();

        let ids: Vec<Uuid> =
            service.list_shared(&SharedFilter::default()).unwrap().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![high, low, unrated]);
        assert!(!ids.contains(&private));

        let filter = SharedFilter { tag: None, query: Some("tỉ lệ".to_string()) };
        assert_eq!(service.list_shared(&filter).unwrap().len(), 1);
    }

    #[test]
    fn only_moderators_can_hide() {
        let service = service();
        let id = service.save("lan", prompt("Số thực"), None).unwrap().id();
        service.set_shared("lan", id, true).unwrap();

        assert!(matches!(service.hide("minh", id), Err(AppError::Unauthorized { .. })));
        let hidden = service.hide("admin", id).unwrap();
        assert!(!hidden.is_shared());
        assert!(service.list_shared(&SharedFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn delete_removes_entry() {
        let service = service();
        let id = service.save("lan", prompt("Số thực"), None).unwrap().id();

        assert!(service.delete("minh", id).is_err());
        service.delete("lan", id).unwrap();
        assert!(matches!(service.get("lan", id), Err(AppError::NotFound(_))));
    }
}
