//! SearchEngine — filter composition, ranked retrieval, related-lesson
//! attachment, and the browse/statistics operations.

use serde::Serialize;

use lore_core::config::{LoreConfig, SearchConfig};
use lore_core::errors::{LoreError, LoreResult};
use lore_core::lesson::{Lesson, Namespace, RelationshipType};
use lore_core::models::{CategoryStats, LessonFilter};
use lore_core::traits::ILessonStorage;
use lore_scoring::RetrievalTracker;

use crate::filter::resolve_filter_target;
use crate::ranking;

/// One ranked search/browse request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Free-text query; None means browse.
    pub query: Option<String>,
    /// Category or subcategory filter, resolved at query time.
    pub category: Option<String>,
    /// Lesson matches if it carries ANY of these tags.
    pub tags: Vec<String>,
    /// Attach related lessons to each hit.
    pub include_related: bool,
    /// Result cap; falls back to the configured default.
    pub limit: Option<usize>,
    pub namespace: Namespace,
    /// Exclude deprecated lessons. On by default.
    pub active_only: bool,
    /// Session identifier recorded with implicit usage events.
    pub session_id: Option<String>,
}

impl SearchRequest {
    /// A default browse of one namespace: active lessons only, no filters.
    pub fn browse(namespace: Namespace) -> Self {
        Self {
            query: None,
            category: None,
            tags: Vec::new(),
            include_related: false,
            limit: None,
            namespace,
            active_only: true,
            session_id: None,
        }
    }

    /// A keyword query over one namespace.
    pub fn keyword(namespace: Namespace, query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::browse(namespace)
        }
    }
}

/// How a result set ended up ordered; callers detect degraded mode here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderedBy {
    /// Full-text relevance blended with the stored relevance score.
    Hybrid,
    /// Full-text relevance alone (stored scores unavailable).
    FulltextOnly,
    /// Substring fallback: recency order only.
    RecencyFallback,
    /// Browse without a query: stored relevance, then recency.
    StoredRelevance,
    /// Browse without stored scores: recency only.
    CreatedAt,
}

/// A related lesson attached to a search hit.
#[derive(Debug, Clone)]
pub struct RelatedLesson {
    pub lesson: Lesson,
    pub relationship_type: RelationshipType,
    pub relevance_score: f64,
}

/// One ranked result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub lesson: Lesson,
    /// Position-determining score; semantics depend on `ordered_by`.
    pub rank_score: f64,
    pub related: Vec<RelatedLesson>,
}

/// A ranked result set with its ordering provenance.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub hits: Vec<SearchHit>,
    pub ordered_by: OrderedBy,
}

/// The query-time engine over the stored lesson base.
pub struct SearchEngine<'a> {
    storage: &'a dyn ILessonStorage,
    tracker: RetrievalTracker,
    config: SearchConfig,
}

impl<'a> SearchEngine<'a> {
    pub fn new(storage: &'a dyn ILessonStorage, config: &LoreConfig) -> Self {
        Self {
            storage,
            tracker: RetrievalTracker::new(config.tracker.clone()),
            config: config.search.clone(),
        }
    }

    /// Run a ranked search or browse per the request.
    pub fn search(&self, request: &SearchRequest) -> LoreResult<SearchResponse> {
        let filter = self.build_filter(request)?;
        let limit = request.limit.unwrap_or(self.config.default_limit);
        let caps = self.storage.capabilities();

        let query = request
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());

        let (ranked, ordered_by) = match query {
            Some(query) => {
                let fulltext = self.storage.search_fulltext(query, &filter, limit)?;
                if fulltext.is_empty() {
                    // Cold/small datasets may have no indexable match even
                    // though the query appears verbatim in some body.
                    let hits = self.storage.search_substring(query, &filter, limit)?;
                    tracing::debug!(hits = hits.len(), "substring fallback");
                    (
                        hits.into_iter().map(|l| (l, 0.0)).collect(),
                        OrderedBy::RecencyFallback,
                    )
                } else {
                    let ordered_by = if caps.relevance_score {
                        OrderedBy::Hybrid
                    } else {
                        OrderedBy::FulltextOnly
                    };
                    (
                        ranking::hybrid_rank(fulltext, caps.relevance_score, &self.config),
                        ordered_by,
                    )
                }
            }
            None => {
                let lessons = self.storage.query(&filter)?;
                let ordered_by = if caps.relevance_score {
                    OrderedBy::StoredRelevance
                } else {
                    OrderedBy::CreatedAt
                };
                (
                    lessons
                        .into_iter()
                        .take(limit)
                        .map(|l| {
                            let score = l.relevance_score;
                            (l, score)
                        })
                        .collect::<Vec<_>>(),
                    ordered_by,
                )
            }
        };

        // Keyword queries feed the usage signal for everything they surface.
        if let Some(query) = query {
            for (lesson, _) in &ranked {
                self.tracker.record_view(
                    self.storage,
                    &lesson.id,
                    Some(query),
                    request.session_id.as_deref(),
                )?;
            }
        }

        let mut hits = Vec::with_capacity(ranked.len());
        for (lesson, rank_score) in ranked {
            let related = if request.include_related {
                self.related_for(&lesson.id)?
            } else {
                Vec::new()
            };
            hits.push(SearchHit {
                lesson,
                rank_score,
                related,
            });
        }

        Ok(SearchResponse { hits, ordered_by })
    }

    /// Browse one category (or subcategory) of a namespace.
    /// An empty category string short-circuits with `CategoryRequired`.
    pub fn by_category(
        &self,
        category: &str,
        namespace: &Namespace,
        limit: Option<usize>,
    ) -> LoreResult<SearchResponse> {
        if category.trim().is_empty() {
            return Err(LoreError::CategoryRequired);
        }
        let mut request = SearchRequest::browse(namespace.clone());
        request.category = Some(category.to_string());
        request.limit = limit;
        self.search(&request)
    }

    /// Browse lessons carrying any of the supplied tags.
    pub fn by_tags(
        &self,
        tags: &[String],
        namespace: &Namespace,
        limit: Option<usize>,
    ) -> LoreResult<SearchResponse> {
        let mut request = SearchRequest::browse(namespace.clone());
        request.tags = tags.to_vec();
        request.limit = limit;
        self.search(&request)
    }

    /// All lessons related to one lesson, with edge type and strength.
    pub fn related_to(&self, lesson_id: &str) -> LoreResult<Vec<RelatedLesson>> {
        if self.storage.get(lesson_id)?.is_none() {
            return Err(LoreError::LessonNotFound {
                id: lesson_id.to_string(),
            });
        }
        self.related_for(lesson_id)
    }

    /// The highest-scored active lessons of a namespace.
    pub fn top_by_score(
        &self,
        namespace: &Namespace,
        limit: Option<usize>,
    ) -> LoreResult<Vec<Lesson>> {
        let filter = LessonFilter::active(namespace.clone());
        let limit = limit.unwrap_or(self.config.default_limit);
        Ok(self.storage.query(&filter)?.into_iter().take(limit).collect())
    }

    /// Per-category aggregates across the whole base.
    pub fn category_statistics(&self) -> LoreResult<Vec<CategoryStats>> {
        self.storage.category_statistics()
    }

    /// Record explicit feedback for a surfaced lesson.
    pub fn mark_helpful(
        &self,
        lesson_id: &str,
        was_helpful: bool,
        session_id: Option<&str>,
    ) -> LoreResult<()> {
        self.tracker
            .record_feedback(self.storage, lesson_id, was_helpful, session_id)
    }

    fn build_filter(&self, request: &SearchRequest) -> LoreResult<LessonFilter> {
        let target = match request
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            Some(candidate) => Some(resolve_filter_target(candidate, self.storage)?),
            None => None,
        };

        Ok(LessonFilter {
            namespace: Some(request.namespace.clone()),
            active_only: request.active_only,
            target,
            tags: request.tags.clone(),
        })
    }

    /// Up to `related_limit` related lessons for one lesson, any edge type.
    fn related_for(&self, lesson_id: &str) -> LoreResult<Vec<RelatedLesson>> {
        let edges = self.storage.get_relationships(lesson_id, None)?;
        let mut related = Vec::new();
        for edge in edges.into_iter().take(self.config.related_limit) {
            let other_id = if edge.lesson_id == lesson_id {
                &edge.related_lesson_id
            } else {
                &edge.lesson_id
            };
            // A dangling edge (endpoint deleted mid-read) is silently skipped.
            if let Some(lesson) = self.storage.get(other_id)? {
                related.push(RelatedLesson {
                    lesson,
                    relationship_type: edge.relationship_type,
                    relevance_score: edge.relevance_score,
                });
            }
        }
        Ok(related)
    }
}
