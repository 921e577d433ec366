//! Rich text rendering

use serde_json::Value;

use crate::helpers::{external_link, html_escape};

/// Rich-text spans of a block payload; empty when absent
pub fn spans_of(payload: &Value) -> &[Value] {
    payload
        .get("rich_text")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Plain text of a span list
pub fn plain_text(spans: &[Value]) -> String {
    spans.iter().map(span_text).collect()
}

fn span_text(span: &Value) -> &str {
    span.get("plain_text")
        .and_then(Value::as_str)
        .or_else(|| {
            span.get("text")
                .and_then(|t| t.get("content"))
                .and_then(Value::as_str)
        })
        .unwrap_or("")
}

fn span_href(span: &Value) -> Option<&str> {
    span.get("href").and_then(Value::as_str).or_else(|| {
        span.get("text")
            .and_then(|t| t.get("link"))
            .and_then(|l| l.get("url"))
            .and_then(Value::as_str)
    })
}

fn annotation(span: &Value, name: &str) -> bool {
    span.get("annotations")
        .and_then(|a| a.get(name))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Render a list of spans to inline HTML
pub fn render(spans: &[Value]) -> String {
    spans.iter().map(render_span).collect()
}

fn render_span(span: &Value) -> String {
    let mut html = html_escape(span_text(span)).replace('\n', "<br>");
    if html.is_empty() {
        return html;
    }

    if span.get("type").and_then(Value::as_str) == Some("equation") {
        html = format!(r#"<span class="notion-equation">{}</span>"#, html);
    }
    if annotation(span, "code") {
        html = format!("<code>{}</code>", html);
    }
    if annotation(span, "bold") {
        html = format!("<strong>{}</strong>", html);
    }
    if annotation(span, "italic") {
        html = format!("<em>{}</em>", html);
    }
    if annotation(span, "strikethrough") {
        html = format!("<s>{}</s>", html);
    }
    if annotation(span, "underline") {
        html = format!("<u>{}</u>", html);
    }
    if let Some(color) = span
        .get("annotations")
        .and_then(|a| a.get("color"))
        .and_then(Value::as_str)
        .filter(|c| *c != "default")
    {
        html = format!(r#"<span class="notion-{}">{}</span>"#, html_escape(color), html);
    }
    if let Some(href) = span_href(span) {
        html = external_link(href, &html, None);
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_annotations() {
        let spans = json!([
            { "plain_text": "Hello ", "annotations": { "bold": true } },
            { "plain_text": "<world>", "annotations": { "italic": true, "code": true } }
        ]);
        assert_eq!(
            render(spans.as_array().unwrap()),
            "<strong>Hello </strong><em><code>&lt;world&gt;</code></em>"
        );
    }

    #[test]
    fn test_render_link_and_color() {
        let spans = json!([{
            "plain_text": "docs",
            "href": "https://doc.rust-lang.org",
            "annotations": { "color": "red" }
        }]);
        assert_eq!(
            render(spans.as_array().unwrap()),
            r#"<a href="https://doc.rust-lang.org" target="_blank" rel="noopener noreferrer"><span class="notion-red">docs</span></a>"#
        );
    }

    #[test]
    fn test_text_content_fallback_and_newlines() {
        let spans = json!([{ "type": "text", "text": { "content": "a\nb" } }]);
        assert_eq!(render(spans.as_array().unwrap()), "a<br>b");
        assert_eq!(plain_text(spans.as_array().unwrap()), "a\nb");
    }

    #[test]
    fn test_spans_of_missing() {
        assert!(spans_of(&json!({})).is_empty());
    }
}
