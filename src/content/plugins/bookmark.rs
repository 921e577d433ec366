//! Link previews for bookmark, link_preview and embed blocks

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;

use crate::content::blocks::payload_of;
use crate::content::renderer::{BlockRenderer, ContentRenderer, RenderError, RendererPlugin};
use crate::content::rich_text;
use crate::helpers::html_escape;
use crate::notion::Block;

lazy_static! {
    static ref YOUTUBE: Regex = Regex::new(
        r"^https?://(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})"
    )
    .unwrap();
    static ref VIMEO: Regex = Regex::new(r"^https?://(?:www\.)?vimeo\.com/(\d+)").unwrap();
}

/// Iframe markup for known video hosts
pub fn video_embed(url: &str) -> Option<String> {
    let src = if let Some(caps) = YOUTUBE.captures(url) {
        format!("https://www.youtube.com/embed/{}", &caps[1])
    } else if let Some(caps) = VIMEO.captures(url) {
        format!("https://player.vimeo.com/video/{}", &caps[1])
    } else {
        return None;
    };
    Some(format!(
        r#"<div class="notion-embed"><iframe src="{}" frameborder="0" allowfullscreen loading="lazy"></iframe></div>"#,
        src
    ))
}

/// Renders a link-preview card; embeds of known video hosts become iframes
#[derive(Debug, Clone, Copy, Default)]
pub struct BookmarkRenderer;

impl BookmarkRenderer {
    fn card(url: &str, caption: Option<String>) -> String {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
            .unwrap_or_else(|| url.to_string());
        let title = caption.unwrap_or_else(|| html_escape(&host));

        format!(
            concat!(
                r#"<a class="notion-bookmark" href="{url}" target="_blank" rel="noopener noreferrer">"#,
                r#"<div class="notion-bookmark-title">{title}</div>"#,
                r#"<div class="notion-bookmark-link">{url}</div>"#,
                "</a>"
            ),
            url = html_escape(url),
            title = title,
        )
    }
}

impl BlockRenderer for BookmarkRenderer {
    fn render(&self, block: &Block) -> Result<String, RenderError> {
        let payload = payload_of(block)?;
        let url = payload
            .get("url")
            .and_then(Value::as_str)
            .filter(|u| !u.trim().is_empty())
            .ok_or(RenderError::MissingField("url"))?;

        if block.kind == "embed" {
            if let Some(embed) = video_embed(url) {
                return Ok(embed);
            }
        }

        let caption = payload
            .get("caption")
            .and_then(Value::as_array)
            .map(|c| rich_text::render(c))
            .filter(|c| !c.is_empty());
        Ok(Self::card(url, caption))
    }
}

/// Installs [`BookmarkRenderer`] for every link-like block type
#[derive(Debug, Clone, Copy, Default)]
pub struct BookmarkPlugin;

impl RendererPlugin for BookmarkPlugin {
    fn install(self, renderer: &mut ContentRenderer) {
        let shared: Arc<dyn BlockRenderer> = Arc::new(BookmarkRenderer);
        for kind in ["bookmark", "link_preview", "embed"] {
            renderer.register_shared(kind, shared.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bookmark_card() {
        let block = Block::new(
            "b1",
            "bookmark",
            json!({ "url": "https://www.rust-lang.org/learn?x=1&y=2", "caption": [] }),
        );
        let html = BookmarkRenderer.render(&block).unwrap();
        assert!(html.contains(r#"href="https://www.rust-lang.org/learn?x=1&amp;y=2""#));
        assert!(html.contains(r#"<div class="notion-bookmark-title">rust-lang.org</div>"#));
    }

    #[test]
    fn test_bookmark_caption_as_title() {
        let block = Block::new(
            "b1",
            "link_preview",
            json!({ "url": "https://example.com", "caption": [{ "plain_text": "Example" }] }),
        );
        let html = BookmarkRenderer.render(&block).unwrap();
        assert!(html.contains(r#"<div class="notion-bookmark-title">Example</div>"#));
    }

    #[test]
    fn test_bookmark_requires_url() {
        let block = Block::new("b1", "bookmark", json!({ "caption": [] }));
        assert!(BookmarkRenderer.render(&block).is_err());
    }

    #[test]
    fn test_youtube_embed() {
        let block = Block::new(
            "e1",
            "embed",
            json!({ "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ" }),
        );
        let html = BookmarkRenderer.render(&block).unwrap();
        assert!(html.contains(r#"src="https://www.youtube.com/embed/dQw4w9WgXcQ""#));
    }

    #[test]
    fn test_other_embed_is_card() {
        let block = Block::new("e1", "embed", json!({ "url": "https://gist.github.com/x" }));
        let html = BookmarkRenderer.render(&block).unwrap();
        assert!(html.starts_with(r#"<a class="notion-bookmark""#));
    }

    #[test]
    fn test_video_embed_hosts() {
        assert!(video_embed("https://youtu.be/dQw4w9WgXcQ").is_some());
        assert!(video_embed("https://vimeo.com/76979871").is_some());
        assert!(video_embed("https://example.com/video.mp4").is_none());
    }
}
