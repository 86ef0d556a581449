//! The merge-or-create ingestion pipeline.
//!
//! Processes each raw lesson independently: validate, hash, look up the
//! canonical lesson for the dedup key, then merge into it or create a new
//! one. A failure on one entry becomes an error string in the report and
//! processing continues; nothing is rolled back across entries.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::Serialize;

use lore_core::config::LoreConfig;
use lore_core::errors::LoreResult;
use lore_core::hash;
use lore_core::lesson::{Lesson, LessonType, Namespace, RawLesson};
use lore_core::traits::ILessonStorage;

use crate::classifier;
use crate::extraction;
use crate::genericity;
use crate::linker::SimilarityLinker;

/// Outcome counts for one submitted batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

enum EntryOutcome {
    Created,
    Updated,
    Skipped,
}

/// Orchestrates validation, dedup lookup, field extraction, merging, and
/// similarity linking. The single writer path for lesson creation.
pub struct IngestionPipeline<'a> {
    storage: &'a dyn ILessonStorage,
    linker: SimilarityLinker,
}

impl<'a> IngestionPipeline<'a> {
    pub fn new(storage: &'a dyn ILessonStorage, config: &LoreConfig) -> Self {
        Self {
            storage,
            linker: SimilarityLinker::new(config.linker.clone()),
        }
    }

    /// Process a batch pushed by one source project. Best-effort: per-entry
    /// failures are collected, never thrown.
    pub fn process_lessons(
        &self,
        raw_lessons: &[RawLesson],
        source_project: &str,
        namespace: &Namespace,
    ) -> IngestReport {
        let mut report = IngestReport::default();

        for (index, raw) in raw_lessons.iter().enumerate() {
            match self.process_entry(raw, source_project, namespace) {
                Ok(EntryOutcome::Created) => report.created += 1,
                Ok(EntryOutcome::Updated) => report.updated += 1,
                Ok(EntryOutcome::Skipped) => report.skipped += 1,
                Err(reason) => report.errors.push(format!("entry {index}: {reason}")),
            }
        }

        tracing::info!(
            source_project,
            namespace = %namespace,
            created = report.created,
            updated = report.updated,
            skipped = report.skipped,
            errors = report.errors.len(),
            "batch processed"
        );
        report
    }

    fn process_entry(
        &self,
        raw: &RawLesson,
        source_project: &str,
        namespace: &Namespace,
    ) -> Result<EntryOutcome, String> {
        let content = raw
            .content_text()
            .ok_or("missing or empty content")?
            .to_string();
        let type_str = raw
            .lesson_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or("missing or empty type")?;
        let lesson_type: LessonType = type_str.parse()?;

        if namespace.is_generic() {
            let report = genericity::validate(&content);
            if !report.is_valid {
                return Err(format!("content is not generic: {}", report.errors.join("; ")));
            }
            for warning in &report.warnings {
                tracing::warn!(source_project, %warning, "genericity warning");
            }
        }

        let content_hash = hash::hash(&content);
        let existing = self
            .storage
            .find_by_hash(&content_hash, namespace)
            .map_err(|e| e.to_string())?;

        match existing {
            Some(canonical) => self
                .merge_into(canonical, raw, source_project)
                .map_err(|e| e.to_string()),
            None => self
                .create_lesson(raw, content, content_hash, lesson_type, source_project, namespace)
                .map_err(|e| e.to_string()),
        }
    }

    /// Merge an incoming record into the canonical lesson for its hash.
    ///
    /// Tags and source projects union; metadata is a shallow key-union where
    /// the incoming value wins on collision; title/summary/category are
    /// first-write-wins and never overwritten once set. When nothing actually
    /// changes the entry counts as skipped.
    fn merge_into(
        &self,
        mut canonical: Lesson,
        raw: &RawLesson,
        source_project: &str,
    ) -> LoreResult<EntryOutcome> {
        let mut changed = false;

        for tag in raw.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if canonical.tags.insert(tag.to_string()) {
                changed = true;
            }
        }

        for (key, value) in &raw.metadata {
            if canonical.metadata.get(key) != Some(value) {
                canonical.metadata.insert(key.clone(), value.clone());
                changed = true;
            }
        }

        if canonical.source_projects.insert(source_project.to_string()) {
            changed = true;
        }

        if canonical.category.is_none() {
            if let Some(category) = trimmed(raw.category.as_deref()) {
                canonical.category = Some(category);
                changed = true;
            }
        }
        if canonical.title.is_none() {
            if let Some(title) = extraction::extract_title(raw) {
                canonical.title = Some(title);
                changed = true;
            }
        }
        if canonical.summary.is_none() {
            if let Some(summary) = extraction::extract_summary(raw) {
                canonical.summary = Some(summary);
                changed = true;
            }
        }
        if canonical.subcategory.is_none() {
            if let Some(category) = canonical.category.clone() {
                let text = canonical
                    .summary
                    .clone()
                    .unwrap_or_else(|| canonical.content.clone());
                if let Some(subcategory) = classifier::classify(&category, &text) {
                    canonical.subcategory = Some(subcategory);
                    changed = true;
                }
            }
        }

        if !changed {
            return Ok(EntryOutcome::Skipped);
        }

        canonical.updated_at = Utc::now();
        self.storage.update(&canonical)?;
        Ok(EntryOutcome::Updated)
    }

    /// Create a fresh canonical lesson and link it to similar peers.
    fn create_lesson(
        &self,
        raw: &RawLesson,
        content: String,
        content_hash: String,
        lesson_type: LessonType,
        source_project: &str,
        namespace: &Namespace,
    ) -> LoreResult<EntryOutcome> {
        let title = extraction::extract_title(raw);
        let summary = extraction::extract_summary(raw);
        let category = trimmed(raw.category.as_deref());
        let classify_text = summary.clone().unwrap_or_else(|| content.clone());
        let subcategory = category
            .as_deref()
            .and_then(|c| classifier::classify(c, &classify_text));

        let tags: BTreeSet<String> = raw
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let now = Utc::now();
        let lesson = Lesson {
            id: uuid::Uuid::new_v4().to_string(),
            source_project: source_project.to_string(),
            source_projects: BTreeSet::from([source_project.to_string()]),
            is_generic: namespace.is_generic(),
            lesson_type,
            category,
            subcategory,
            title,
            summary,
            tags,
            metadata: raw.metadata.clone(),
            content,
            content_hash,
            relevance_score: 0.0,
            deprecated_at: None,
            superseded_by: None,
            created_at: now,
            updated_at: now,
        };

        self.storage.create(&lesson)?;

        if namespace.is_generic() {
            // Linking failures don't undo the create; the lesson is already
            // canonical for its hash.
            if let Err(e) = self.linker.link_similar(&lesson, self.storage) {
                tracing::warn!(lesson_id = %lesson.id, error = %e, "similarity linking failed");
            }
        }

        Ok(EntryOutcome::Created)
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
