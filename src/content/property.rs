//! Typed readers for Notion property values
//!
//! A property value looks like `{"type": "select", "select": {"name": "Tech"}}`.
//! Each reader inspects the declared type and returns `None` for shapes it
//! cannot read, so callers can fall through to the next candidate.

use serde_json::Value;

const KNOWN_KINDS: &[&str] = &[
    "title",
    "rich_text",
    "select",
    "status",
    "multi_select",
    "date",
    "created_time",
    "last_edited_time",
    "people",
    "files",
    "url",
    "email",
    "phone_number",
    "number",
    "formula",
];

/// The declared property type, or the first known payload key
fn kind_of(value: &Value) -> Option<&str> {
    if let Some(kind) = value.get("type").and_then(Value::as_str) {
        return Some(kind);
    }
    KNOWN_KINDS
        .iter()
        .copied()
        .find(|k| value.get(*k).is_some())
}

fn payload(value: &Value) -> Option<(&str, &Value)> {
    let kind = kind_of(value)?;
    Some((kind, value.get(kind)?))
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Concatenated `plain_text` of a rich-text array
pub fn plain_text(spans: &Value) -> String {
    spans
        .as_array()
        .map(|spans| {
            spans
                .iter()
                .filter_map(|s| {
                    s.get("plain_text")
                        .or_else(|| s.get("text").and_then(|t| t.get("content")))
                        .and_then(Value::as_str)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn number_text(number: &Value) -> Option<String> {
    let n = number.as_f64()?;
    if n.fract() == 0.0 {
        Some(format!("{}", n as i64))
    } else {
        Some(n.to_string())
    }
}

/// Read a property as a single non-empty string
pub fn text(value: &Value) -> Option<String> {
    let (kind, payload) = payload(value)?;
    let text = match kind {
        "title" | "rich_text" => plain_text(payload),
        "select" | "status" => payload.get("name")?.as_str()?.to_string(),
        "date" => payload.get("start")?.as_str()?.to_string(),
        "created_time" | "last_edited_time" | "url" | "email" | "phone_number" => {
            payload.as_str()?.to_string()
        }
        "number" => number_text(payload)?,
        "people" => person(value)?,
        "formula" => match payload.get("type").and_then(Value::as_str)? {
            "string" => payload.get("string")?.as_str()?.to_string(),
            "number" => number_text(payload.get("number")?)?,
            "date" => payload.get("date")?.get("start")?.as_str()?.to_string(),
            _ => return None,
        },
        _ => return None,
    };
    non_empty(text)
}

/// Read a multi-select property as its option names
///
/// An existing but empty multi-select yields `Some(vec![])`.
pub fn names(value: &Value) -> Option<Vec<String>> {
    let (kind, payload) = payload(value)?;
    if kind != "multi_select" {
        return None;
    }
    Some(
        payload
            .as_array()?
            .iter()
            .filter_map(|o| o.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect(),
    )
}

/// Name of the first person in a people property
pub fn person(value: &Value) -> Option<String> {
    let (kind, payload) = payload(value)?;
    if kind != "people" {
        return None;
    }
    payload
        .as_array()?
        .iter()
        .find_map(|p| p.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .and_then(non_empty)
}

/// URL of a file object: hosted file first, then external
pub fn file_object_url(file: &Value) -> Option<String> {
    file.get("file")
        .and_then(|f| f.get("url"))
        .and_then(Value::as_str)
        .or_else(|| {
            file.get("external")
                .and_then(|f| f.get("url"))
                .and_then(Value::as_str)
        })
        .map(str::to_string)
        .and_then(non_empty)
}

/// URL of the first file in a files property, or a plain url property
pub fn file_url(value: &Value) -> Option<String> {
    let (kind, payload) = payload(value)?;
    match kind {
        "files" => payload.as_array()?.first().and_then(file_object_url),
        "url" => payload.as_str().map(str::to_string).and_then(non_empty),
        _ => None,
    }
}

/// Read a number or numeric formula property
pub fn number(value: &Value) -> Option<f64> {
    let (kind, payload) = payload(value)?;
    match kind {
        "number" => payload.as_f64(),
        "formula" => payload.get("number")?.as_f64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_from_title_concatenates_spans() {
        let value = json!({
            "type": "title",
            "title": [{ "plain_text": "Hello, " }, { "plain_text": "world" }]
        });
        assert_eq!(text(&value).as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_text_blank_is_none() {
        let value = json!({ "type": "rich_text", "rich_text": [{ "plain_text": "  " }] });
        assert_eq!(text(&value), None);
        let value = json!({ "type": "select", "select": null });
        assert_eq!(text(&value), None);
    }

    #[test]
    fn test_text_without_type_field() {
        let value = json!({ "select": { "name": "Tech" } });
        assert_eq!(text(&value).as_deref(), Some("Tech"));
    }

    #[test]
    fn test_status_and_formula() {
        let value = json!({ "type": "status", "status": { "name": "Draft" } });
        assert_eq!(text(&value).as_deref(), Some("Draft"));
        let value = json!({
            "type": "formula",
            "formula": { "type": "string", "string": "computed" }
        });
        assert_eq!(text(&value).as_deref(), Some("computed"));
    }

    #[test]
    fn test_names() {
        let value = json!({
            "type": "multi_select",
            "multi_select": [{ "name": "rust" }, { "name": "web" }]
        });
        assert_eq!(names(&value), Some(vec!["rust".to_string(), "web".to_string()]));
        let empty = json!({ "type": "multi_select", "multi_select": [] });
        assert_eq!(names(&empty), Some(vec![]));
        let wrong = json!({ "type": "select", "select": { "name": "x" } });
        assert_eq!(names(&wrong), None);
    }

    #[test]
    fn test_file_url_prefers_hosted() {
        let value = json!({
            "type": "files",
            "files": [{
                "name": "cover.png",
                "file": { "url": "https://s3/cover.png" },
                "external": { "url": "https://cdn/cover.png" }
            }]
        });
        assert_eq!(file_url(&value).as_deref(), Some("https://s3/cover.png"));
        let external = json!({
            "type": "files",
            "files": [{ "type": "external", "external": { "url": "https://cdn/c.png" } }]
        });
        assert_eq!(file_url(&external).as_deref(), Some("https://cdn/c.png"));
        assert_eq!(file_url(&json!({ "type": "files", "files": [] })), None);
    }

    #[test]
    fn test_number() {
        assert_eq!(number(&json!({ "type": "number", "number": 7 })), Some(7.0));
        assert_eq!(number(&json!({ "type": "number", "number": null })), None);
        assert_eq!(text(&json!({ "type": "number", "number": 7 })).as_deref(), Some("7"));
    }

    #[test]
    fn test_person() {
        let value = json!({
            "type": "people",
            "people": [{ "object": "user", "id": "u1" }, { "name": "Ada" }]
        });
        assert_eq!(person(&value).as_deref(), Some("Ada"));
    }
}
