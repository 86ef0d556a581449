//! Title and summary extraction chains for raw lesson records.
//!
//! Each field is resolved by an ordered list of strategies tried in
//! sequence: explicit field, then metadata keys, then a JSON-object content
//! body, then (for summaries) the leading sentences of the stripped content.
//! Malformed JSON never fails an entry; it just falls through to the next
//! strategy.

use lore_core::constants::SUMMARY_SENTENCE_COUNT;
use lore_core::lesson::RawLesson;

/// Resolve a title: explicit field → metadata.title → JSON content `title`.
pub fn extract_title(raw: &RawLesson) -> Option<String> {
    non_empty(raw.title.as_deref())
        .or_else(|| metadata_string(raw, "title"))
        .or_else(|| json_content_string(raw, &["title"]))
}

/// Resolve a summary: explicit field → metadata.summary → metadata.description
/// → JSON content `description`/`summary` → leading sentences of content.
pub fn extract_summary(raw: &RawLesson) -> Option<String> {
    non_empty(raw.summary.as_deref())
        .or_else(|| metadata_string(raw, "summary"))
        .or_else(|| metadata_string(raw, "description"))
        .or_else(|| json_content_string(raw, &["description", "summary"]))
        .or_else(|| leading_sentences(raw.content_text()?, SUMMARY_SENTENCE_COUNT))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn metadata_string(raw: &RawLesson, key: &str) -> Option<String> {
    non_empty(raw.metadata.get(key).and_then(|v| v.as_str()))
}

/// When the content body is itself a JSON object, pull the first present key.
fn json_content_string(raw: &RawLesson, keys: &[&str]) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(raw.content_text()?).ok()?;
    let object = parsed.as_object()?;
    keys.iter()
        .find_map(|key| non_empty(object.get(*key).and_then(|v| v.as_str())))
}

/// The first `count` sentences of the content, with markdown markup stripped
/// and whitespace collapsed.
fn leading_sentences(content: &str, count: usize) -> Option<String> {
    let stripped: String = content
        .chars()
        .filter(|c| !matches!(c, '#' | '*' | '`' | '_' | '>'))
        .collect();
    let flattened = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.is_empty() {
        return None;
    }

    let mut sentences: Vec<String> = Vec::new();
    let mut start = 0;
    for (i, c) in flattened.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let sentence = flattened[start..=i].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = i + 1;
            if sentences.len() == count {
                return Some(sentences.join(" "));
            }
        }
    }

    // Fewer terminators than requested: include the trailing fragment.
    let tail = flattened[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    if sentences.is_empty() {
        None
    } else {
        Some(sentences.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with_content(content: &str) -> RawLesson {
        RawLesson {
            content: Some(content.to_string()),
            ..RawLesson::default()
        }
    }

    #[test]
    fn explicit_title_wins() {
        let mut raw = raw_with_content("{\"title\": \"from json\"}");
        raw.title = Some("explicit".to_string());
        raw.metadata
            .insert("title".to_string(), "from metadata".into());
        assert_eq!(extract_title(&raw).as_deref(), Some("explicit"));
    }

    #[test]
    fn metadata_title_beats_json_content() {
        let mut raw = raw_with_content("{\"title\": \"from json\"}");
        raw.metadata
            .insert("title".to_string(), "from metadata".into());
        assert_eq!(extract_title(&raw).as_deref(), Some("from metadata"));
    }

    #[test]
    fn json_content_title_is_last_resort() {
        let raw = raw_with_content("{\"title\": \"from json\"}");
        assert_eq!(extract_title(&raw).as_deref(), Some("from json"));
    }

    #[test]
    fn malformed_json_content_is_swallowed() {
        let raw = raw_with_content("{not json");
        assert_eq!(extract_title(&raw), None);
    }

    #[test]
    fn summary_falls_back_to_first_two_sentences() {
        let raw = raw_with_content(
            "Use `cargo deny` in CI.\nIt catches *yanked* crates early. More text follows.",
        );
        assert_eq!(
            extract_summary(&raw).as_deref(),
            Some("Use cargo deny in CI. It catches yanked crates early.")
        );
    }

    #[test]
    fn summary_prefers_metadata_description() {
        let mut raw = raw_with_content("Body. With sentences.");
        raw.metadata
            .insert("description".to_string(), "described".into());
        assert_eq!(extract_summary(&raw).as_deref(), Some("described"));
    }

    #[test]
    fn single_sentence_content_is_kept_whole() {
        let raw = raw_with_content("No terminator at all");
        assert_eq!(
            extract_summary(&raw).as_deref(),
            Some("No terminator at all")
        );
    }
}
