//! Code blocks with syntax highlighting

use serde_json::Value;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::content::blocks::payload_of;
use crate::content::renderer::{BlockRenderer, ContentRenderer, RenderError, RendererPlugin};
use crate::content::rich_text;
use crate::helpers::html_escape;
use crate::notion::Block;

/// Highlights `code` blocks with syntect
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl CodeHighlighter {
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Map Notion language names onto syntect tokens
    fn language_token(language: &str) -> &str {
        match language {
            "plain text" | "" => "txt",
            "c++" => "cpp",
            "c#" => "cs",
            "shell" | "bash" => "sh",
            "typescript" => "js",
            "markup" | "html" => "html",
            "objective-c" => "m",
            "f#" => "fs",
            other => other,
        }
    }

    fn find_syntax(&self, language: &str) -> &SyntaxReference {
        let token = Self::language_token(language);
        self.syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_extension(token))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    fn theme(&self) -> Result<&Theme, RenderError> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
            .ok_or_else(|| RenderError::Highlight("no themes available".to_string()))
    }

    /// Highlight a code snippet
    pub fn highlight(&self, code: &str, language: &str) -> Result<String, RenderError> {
        let class = html_escape(&language.replace(' ', "-"));
        let syntax = self.find_syntax(language);
        let theme = self.theme()?;

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) if self.line_numbers => Ok(add_line_numbers(&highlighted, &class)),
            Ok(highlighted) => Ok(format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                class, highlighted
            )),
            Err(e) => {
                tracing::debug!("Highlighting {} failed, using plain block: {}", language, e);
                Ok(format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    class,
                    html_escape(code)
                ))
            }
        }
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Add a line-number gutter to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let gutter: Vec<String> = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect();

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang,
        gutter.join("\n"),
        lines.join("\n")
    )
}

impl BlockRenderer for CodeHighlighter {
    fn render(&self, block: &Block) -> Result<String, RenderError> {
        let payload = payload_of(block)?;
        let code = rich_text::plain_text(rich_text::spans_of(payload));
        let language = payload
            .get("language")
            .and_then(Value::as_str)
            .unwrap_or("plain text");

        let mut html = self.highlight(&code, language)?;
        if let Some(caption) = payload
            .get("caption")
            .and_then(Value::as_array)
            .filter(|c| !c.is_empty())
        {
            html.push_str(&format!(
                r#"<p class="code-caption">{}</p>"#,
                rich_text::render(caption)
            ));
        }
        Ok(html)
    }
}

impl RendererPlugin for CodeHighlighter {
    fn install(self, renderer: &mut ContentRenderer) {
        renderer.register("code", self);
    }
}
