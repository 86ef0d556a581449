//! Keyword-scoring subcategory classifier.
//!
//! A static table maps each known category to candidate subcategories, each
//! with a keyword list. A candidate's score is the summed character length of
//! every keyword found (case-insensitive) in the leading window of the text,
//! so a specific multi-word phrase outranks a generic single word. Ties break
//! to the first-inserted candidate.

use lore_core::constants::CLASSIFIER_SCAN_WINDOW;

/// One candidate subcategory with its trigger keywords.
pub struct SubcategoryEntry {
    pub subcategory: &'static str,
    pub keywords: &'static [&'static str],
}

/// One category with its ordered candidate list.
pub struct CategoryEntry {
    pub category: &'static str,
    pub subcategories: &'static [SubcategoryEntry],
}

/// The classification table. Order within a category is significant: the
/// first-inserted candidate wins score ties.
pub const CATEGORY_TABLE: &[CategoryEntry] = &[
    CategoryEntry {
        category: "testing",
        subcategories: &[
            SubcategoryEntry {
                subcategory: "unit-testing",
                keywords: &["unit test", "assertion", "mock", "stub", "test case"],
            },
            SubcategoryEntry {
                subcategory: "integration-testing",
                keywords: &[
                    "integration test",
                    "end to end",
                    "e2e",
                    "http test",
                    "feature test",
                ],
            },
            SubcategoryEntry {
                subcategory: "test-tooling",
                keywords: &["fixture", "coverage", "test runner", "snapshot"],
            },
        ],
    },
    CategoryEntry {
        category: "database",
        subcategories: &[
            SubcategoryEntry {
                subcategory: "query-optimization",
                keywords: &["slow query", "n+1", "query plan", "explain", "index"],
            },
            SubcategoryEntry {
                subcategory: "schema-design",
                keywords: &[
                    "migration",
                    "schema",
                    "foreign key",
                    "constraint",
                    "normalization",
                ],
            },
            SubcategoryEntry {
                subcategory: "data-integrity",
                keywords: &["transaction", "rollback", "consistency", "deadlock"],
            },
        ],
    },
    CategoryEntry {
        category: "security",
        subcategories: &[
            SubcategoryEntry {
                subcategory: "authentication",
                keywords: &["login", "password", "token", "session", "oauth"],
            },
            SubcategoryEntry {
                subcategory: "authorization",
                keywords: &["permission", "role", "policy", "access control"],
            },
            SubcategoryEntry {
                subcategory: "input-validation",
                keywords: &["sanitize", "validation", "sql injection", "xss", "escaping"],
            },
        ],
    },
    CategoryEntry {
        category: "backend",
        subcategories: &[
            SubcategoryEntry {
                subcategory: "api-design",
                keywords: &["endpoint", "rest", "status code", "controller", "versioning"],
            },
            SubcategoryEntry {
                subcategory: "background-jobs",
                keywords: &["queue", "worker", "cron", "retry", "scheduled job"],
            },
            SubcategoryEntry {
                subcategory: "caching",
                keywords: &["cache", "ttl", "invalidation", "memoization"],
            },
        ],
    },
    CategoryEntry {
        category: "frontend",
        subcategories: &[
            SubcategoryEntry {
                subcategory: "component-design",
                keywords: &["component", "props", "render", "template"],
            },
            SubcategoryEntry {
                subcategory: "state-management",
                keywords: &["state", "store", "reducer", "reactivity"],
            },
            SubcategoryEntry {
                subcategory: "styling",
                keywords: &["css", "layout", "theme", "responsive"],
            },
        ],
    },
    CategoryEntry {
        category: "performance",
        subcategories: &[
            SubcategoryEntry {
                subcategory: "memory-usage",
                keywords: &["memory", "allocation", "leak", "heap"],
            },
            SubcategoryEntry {
                subcategory: "latency",
                keywords: &["latency", "timeout", "response time", "slow"],
            },
            SubcategoryEntry {
                subcategory: "profiling",
                keywords: &["profile", "benchmark", "flamegraph", "instrument"],
            },
        ],
    },
    CategoryEntry {
        category: "deployment",
        subcategories: &[
            SubcategoryEntry {
                subcategory: "continuous-integration",
                keywords: &["pipeline", "build", "artifact", "ci"],
            },
            SubcategoryEntry {
                subcategory: "infrastructure",
                keywords: &["docker", "container", "kubernetes", "provisioning"],
            },
            SubcategoryEntry {
                subcategory: "release-management",
                keywords: &["rollback", "canary", "feature flag", "release"],
            },
        ],
    },
];

/// Classify text into the best-matching subcategory of a category.
///
/// Returns None when the category is unknown or no keyword matches within
/// the scan window.
pub fn classify(category: &str, text: &str) -> Option<String> {
    let entry = CATEGORY_TABLE
        .iter()
        .find(|e| e.category.eq_ignore_ascii_case(category))?;

    let window: String = text
        .chars()
        .take(CLASSIFIER_SCAN_WINDOW)
        .collect::<String>()
        .to_lowercase();

    let mut best: Option<(&'static str, usize)> = None;
    for candidate in entry.subcategories {
        let score: usize = candidate
            .keywords
            .iter()
            .filter(|kw| window.contains(&kw.to_lowercase()))
            .map(|kw| kw.len())
            .sum();
        if score > 0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate.subcategory, score));
        }
    }

    best.map(|(subcategory, _)| subcategory.to_string())
}
