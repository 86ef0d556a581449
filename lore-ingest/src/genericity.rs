//! The genericity gate for the shared cross-project pool.
//!
//! A small, fixed pattern list catching the most common ways project-specific
//! detail leaks into generic lessons: absolute deployment paths (errors) and
//! internal hostnames or quoted project names (warnings). This is a narrow
//! heuristic, not a security boundary; it deliberately attempts no broader
//! PII/secret scanning. Project-detail submissions bypass it entirely.

use std::sync::LazyLock;

use regex::Regex;

/// Severity of a matched rule. Errors reject the submission; warnings never
/// block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A compiled genericity rule.
pub struct GenericityRule {
    pub name: &'static str,
    pub severity: Severity,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub message: &'static str,
}

macro_rules! genericity_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Shared web-root paths ──────────────────────────────────────────────────
genericity_pattern!(RE_WEB_ROOT_PATH, r"/var/www/[^/\s'\x22]+/");

// ── Home-directory paths ───────────────────────────────────────────────────
genericity_pattern!(RE_HOME_DIR_PATH, r"/home/[^/\s'\x22]+/[^/\s'\x22]+");

// ── Internal-TLD URLs ──────────────────────────────────────────────────────
genericity_pattern!(
    RE_INTERNAL_URL,
    r"(?i)https?://[a-z0-9.-]+\.(?:local|test|dev)\b"
);

// ── Quoted project references ──────────────────────────────────────────────
genericity_pattern!(
    RE_QUOTED_PROJECT,
    r#"(?i)("[^"]*project[^"]*"|'[^']*project[^']*')"#
);

// ── Known placeholder names in quotes ──────────────────────────────────────
genericity_pattern!(
    RE_PLACEHOLDER_NAME,
    r#"(?i)["'](myapp|my-app|example-app|acme|testproject)["']"#
);

/// All rules, errors first.
pub fn all_rules() -> Vec<GenericityRule> {
    vec![
        GenericityRule {
            name: "web_root_path",
            severity: Severity::Error,
            regex: &RE_WEB_ROOT_PATH,
            message: "content references an absolute web-root path (/var/www/...)",
        },
        GenericityRule {
            name: "home_dir_path",
            severity: Severity::Error,
            regex: &RE_HOME_DIR_PATH,
            message: "content references a home-directory path (/home/...)",
        },
        GenericityRule {
            name: "internal_url",
            severity: Severity::Warning,
            regex: &RE_INTERNAL_URL,
            message: "content references an internal URL (.local/.test/.dev host)",
        },
        GenericityRule {
            name: "quoted_project",
            severity: Severity::Warning,
            regex: &RE_QUOTED_PROJECT,
            message: "content quotes a project-specific name",
        },
        GenericityRule {
            name: "placeholder_name",
            severity: Severity::Warning,
            regex: &RE_PLACEHOLDER_NAME,
            message: "content quotes a known placeholder name",
        },
    ]
}

/// Result of validating one content body against the rules.
#[derive(Debug, Clone, Default)]
pub struct GenericityReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Run every rule against the content. Any error match rejects; warnings
/// are advisory only. Rules whose regex failed to compile simply never match.
pub fn validate(content: &str) -> GenericityReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for rule in all_rules() {
        let Some(re) = rule.regex.as_ref() else {
            continue;
        };
        if re.is_match(content) {
            match rule.severity {
                Severity::Error => errors.push(rule.message.to_string()),
                Severity::Warning => warnings.push(rule.message.to_string()),
            }
        }
    }

    GenericityReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}
