//! Built-in block renderers

use serde_json::Value;

use super::plugins::video_embed;
use super::property::file_object_url;
use super::renderer::{BlockRenderer, Container, ContentRenderer, RenderError};
use super::rich_text;
use crate::helpers::{external_link, html_escape};
use crate::notion::Block;

pub(crate) fn payload_of(block: &Block) -> Result<&Value, RenderError> {
    block
        .payload()
        .ok_or_else(|| RenderError::MissingPayload(block.kind.clone()))
}

fn caption_of(payload: &Value) -> Option<String> {
    payload
        .get("caption")
        .and_then(Value::as_array)
        .filter(|c| !c.is_empty())
        .map(|c| rich_text::render(c))
}

/// Install the built-in block types
pub fn register_defaults(renderer: &mut ContentRenderer) {
    renderer
        .register("paragraph", paragraph)
        .register("heading_1", heading(1))
        .register("heading_2", heading(2))
        .register("heading_3", heading(3))
        .register("bulleted_list_item", ListItem(Container::BulletedList))
        .register("numbered_list_item", ListItem(Container::NumberedList))
        .register("to_do", to_do)
        .register("toggle", toggle)
        .register("quote", quote)
        .register("callout", callout)
        .register("divider", divider)
        .register("image", image)
        .register("video", video)
        .register("file", file)
        .register("pdf", file)
        .register("equation", equation)
        .register("child_page", child_title)
        .register("child_database", child_title)
        .register("table_of_contents", omitted)
        .register("breadcrumb", omitted);
}

/// Fallback for unknown types: the block's text, if any, as a paragraph
pub fn plain_text(block: &Block) -> Result<String, RenderError> {
    let text = block
        .payload()
        .map(|p| rich_text::plain_text(rich_text::spans_of(p)))
        .unwrap_or_default();
    if text.trim().is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("<p>{}</p>", html_escape(&text)))
    }
}

fn paragraph(block: &Block) -> Result<String, RenderError> {
    let payload = payload_of(block)?;
    Ok(format!(
        "<p>{}</p>",
        rich_text::render(rich_text::spans_of(payload))
    ))
}

fn heading(level: u8) -> impl Fn(&Block) -> Result<String, RenderError> + Send + Sync {
    move |block: &Block| {
        let payload = payload_of(block)?;
        Ok(format!(
            "<h{level}>{}</h{level}>",
            rich_text::render(rich_text::spans_of(payload))
        ))
    }
}

struct ListItem(Container);

impl BlockRenderer for ListItem {
    fn render(&self, block: &Block) -> Result<String, RenderError> {
        let payload = payload_of(block)?;
        Ok(format!(
            "<li>{}</li>",
            rich_text::render(rich_text::spans_of(payload))
        ))
    }

    fn container(&self) -> Option<Container> {
        Some(self.0)
    }
}

fn to_do(block: &Block) -> Result<String, RenderError> {
    let payload = payload_of(block)?;
    let checked = payload
        .get("checked")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    Ok(format!(
        r#"<div class="notion-to-do"><input type="checkbox" disabled{}> <span>{}</span></div>"#,
        if checked { " checked" } else { "" },
        rich_text::render(rich_text::spans_of(payload))
    ))
}

// Only the summary is rendered; toggle bodies are nested children.
fn toggle(block: &Block) -> Result<String, RenderError> {
    let payload = payload_of(block)?;
    Ok(format!(
        "<details><summary>{}</summary></details>",
        rich_text::render(rich_text::spans_of(payload))
    ))
}

fn quote(block: &Block) -> Result<String, RenderError> {
    let payload = payload_of(block)?;
    Ok(format!(
        "<blockquote>{}</blockquote>",
        rich_text::render(rich_text::spans_of(payload))
    ))
}

fn callout(block: &Block) -> Result<String, RenderError> {
    let payload = payload_of(block)?;
    let icon = payload
        .get("icon")
        .and_then(|i| i.get("emoji"))
        .and_then(Value::as_str)
        .map(|e| format!(r#"<span class="notion-callout-icon">{}</span>"#, html_escape(e)))
        .unwrap_or_default();
    Ok(format!(
        r#"<div class="notion-callout">{}<div>{}</div></div>"#,
        icon,
        rich_text::render(rich_text::spans_of(payload))
    ))
}

fn divider(_block: &Block) -> Result<String, RenderError> {
    Ok("<hr>".to_string())
}

fn image(block: &Block) -> Result<String, RenderError> {
    let payload = payload_of(block)?;
    let url = file_object_url(payload).ok_or(RenderError::MissingField("url"))?;
    let alt = payload
        .get("caption")
        .and_then(Value::as_array)
        .map(|c| rich_text::plain_text(c))
        .unwrap_or_default();
    let caption = caption_of(payload)
        .map(|c| format!("<figcaption>{}</figcaption>", c))
        .unwrap_or_default();
    Ok(format!(
        r#"<figure class="notion-image"><img src="{}" alt="{}">{}</figure>"#,
        html_escape(&url),
        html_escape(&alt),
        caption
    ))
}

fn video(block: &Block) -> Result<String, RenderError> {
    let payload = payload_of(block)?;
    let url = file_object_url(payload).ok_or(RenderError::MissingField("url"))?;
    Ok(video_embed(&url).unwrap_or_else(|| {
        format!(
            r#"<video class="notion-video" controls src="{}"></video>"#,
            html_escape(&url)
        )
    }))
}

fn file(block: &Block) -> Result<String, RenderError> {
    let payload = payload_of(block)?;
    let url = file_object_url(payload).ok_or(RenderError::MissingField("url"))?;
    let label = caption_of(payload)
        .or_else(|| {
            payload
                .get("name")
                .and_then(Value::as_str)
                .map(html_escape)
        })
        .unwrap_or_else(|| html_escape(&url));
    Ok(format!(
        r#"<div class="notion-file">{}</div>"#,
        external_link(&url, &label, None)
    ))
}

fn equation(block: &Block) -> Result<String, RenderError> {
    let payload = payload_of(block)?;
    let expression = payload
        .get("expression")
        .and_then(Value::as_str)
        .ok_or(RenderError::MissingField("expression"))?;
    Ok(format!(
        r#"<div class="notion-equation"><code>{}</code></div>"#,
        html_escape(expression)
    ))
}

fn child_title(block: &Block) -> Result<String, RenderError> {
    let payload = payload_of(block)?;
    let title = payload
        .get("title")
        .and_then(Value::as_str)
        .ok_or(RenderError::MissingField("title"))?;
    Ok(format!(
        r#"<p class="notion-{}">{}</p>"#,
        block.kind.replace('_', "-"),
        html_escape(title)
    ))
}

fn omitted(_block: &Block) -> Result<String, RenderError> {
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use serde_json::json;

    fn render_one(kind: &str, payload: Value) -> String {
        let mut renderer = ContentRenderer::bare(&RenderConfig::default());
        register_defaults(&mut renderer);
        renderer.render(&[Block::new("b", kind, payload)])
    }

    #[test]
    fn test_headings() {
        let payload = json!({ "rich_text": [{ "plain_text": "Title" }] });
        assert_eq!(render_one("heading_2", payload.clone()), "<h2>Title</h2>");
        assert_eq!(render_one("heading_3", payload), "<h3>Title</h3>");
    }

    #[test]
    fn test_to_do_checked() {
        let html = render_one(
            "to_do",
            json!({ "checked": true, "rich_text": [{ "plain_text": "ship it" }] }),
        );
        assert!(html.contains("disabled checked"));
        assert!(html.contains("ship it"));
    }

    #[test]
    fn test_image_with_caption() {
        let html = render_one(
            "image",
            json!({
                "type": "external",
                "external": { "url": "https://cdn/cat.png" },
                "caption": [{ "plain_text": "A cat" }]
            }),
        );
        assert_eq!(
            html,
            r#"<figure class="notion-image"><img src="https://cdn/cat.png" alt="A cat"><figcaption>A cat</figcaption></figure>"#
        );
    }

    #[test]
    fn test_callout_icon() {
        let html = render_one(
            "callout",
            json!({
                "icon": { "type": "emoji", "emoji": "💡" },
                "rich_text": [{ "plain_text": "Tip" }]
            }),
        );
        assert!(html.starts_with(r#"<div class="notion-callout"><span class="notion-callout-icon">💡</span>"#));
    }

    #[test]
    fn test_file_link() {
        let html = render_one(
            "pdf",
            json!({ "type": "file", "file": { "url": "https://s3/a.pdf" }, "name": "a.pdf" }),
        );
        assert!(html.contains(r#"href="https://s3/a.pdf""#));
        assert!(html.contains(">a.pdf</a>"));
    }

    #[test]
    fn test_table_of_contents_omitted() {
        assert_eq!(
            render_one("table_of_contents", json!({})),
            RenderConfig::default().failed_placeholder
        );
    }

    #[test]
    fn test_child_page() {
        assert_eq!(
            render_one("child_page", json!({ "title": "Notes" })),
            r#"<p class="notion-child-page">Notes</p>"#
        );
    }
}
