//! Content renderer - turns a list of Notion blocks into one HTML string

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::blocks;
use super::plugins::{BookmarkPlugin, CodeHighlighter};
use crate::config::RenderConfig;
use crate::notion::Block;

/// Errors raised while rendering a single block
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("block has no '{0}' payload")]
    MissingPayload(String),

    #[error("block field '{0}' is missing")]
    MissingField(&'static str),

    #[error("highlighting failed: {0}")]
    Highlight(String),
}

/// Element wrapping consecutive blocks of the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    BulletedList,
    NumberedList,
}

impl Container {
    fn open(self) -> &'static str {
        match self {
            Container::BulletedList => "<ul>",
            Container::NumberedList => "<ol>",
        }
    }

    fn close(self) -> &'static str {
        match self {
            Container::BulletedList => "</ul>",
            Container::NumberedList => "</ol>",
        }
    }
}

/// Renders one block type
pub trait BlockRenderer: Send + Sync {
    /// Render a block; an empty string omits it from the output
    fn render(&self, block: &Block) -> Result<String, RenderError>;

    /// Container that consecutive blocks of this renderer share
    fn container(&self) -> Option<Container> {
        None
    }
}

impl<F> BlockRenderer for F
where
    F: Fn(&Block) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, block: &Block) -> Result<String, RenderError> {
        self(block)
    }
}

/// A bundle of block renderers installed together
pub trait RendererPlugin {
    fn install(self, renderer: &mut ContentRenderer);
}

/// Block renderer registry
pub struct ContentRenderer {
    registry: HashMap<String, Arc<dyn BlockRenderer>>,
    fallback: Arc<dyn BlockRenderer>,
    empty_placeholder: String,
    failed_placeholder: String,
}

impl ContentRenderer {
    /// Renderer with the built-in block types plus code and bookmark plugins
    pub fn new(config: &RenderConfig) -> Self {
        let mut renderer = Self::bare(config);
        blocks::register_defaults(&mut renderer);
        renderer
            .use_plugin(CodeHighlighter::with_options(
                &config.highlight_theme,
                config.line_numbers,
            ))
            .use_plugin(BookmarkPlugin);
        renderer
    }

    /// Renderer with no registered block types; everything goes to the fallback
    pub fn bare(config: &RenderConfig) -> Self {
        Self {
            registry: HashMap::new(),
            fallback: Arc::new(blocks::plain_text),
            empty_placeholder: config.empty_placeholder.clone(),
            failed_placeholder: config.failed_placeholder.clone(),
        }
    }

    /// Register a renderer for a block type, replacing any previous one
    pub fn register<R>(&mut self, kind: &str, renderer: R) -> &mut Self
    where
        R: BlockRenderer + 'static,
    {
        self.register_shared(kind, Arc::new(renderer))
    }

    /// Register one renderer instance for a block type
    pub fn register_shared(&mut self, kind: &str, renderer: Arc<dyn BlockRenderer>) -> &mut Self {
        self.registry.insert(kind.to_string(), renderer);
        self
    }

    /// Replace the renderer used for unregistered block types
    pub fn set_fallback<R>(&mut self, renderer: R) -> &mut Self
    where
        R: BlockRenderer + 'static,
    {
        self.fallback = Arc::new(renderer);
        self
    }

    pub fn use_plugin<P: RendererPlugin>(&mut self, plugin: P) -> &mut Self {
        plugin.install(self);
        self
    }

    pub fn supports(&self, kind: &str) -> bool {
        self.registry.contains_key(kind)
    }

    /// Render blocks in order
    ///
    /// A block that fails to render is logged and skipped; the remaining
    /// blocks are still rendered. Empty input yields the empty placeholder and
    /// input where nothing rendered yields the failure placeholder.
    pub fn render(&self, blocks: &[Block]) -> String {
        if blocks.is_empty() {
            return self.empty_placeholder.clone();
        }

        let mut html = String::new();
        let mut open: Option<Container> = None;
        let mut rendered = 0;

        for block in blocks {
            let renderer = match self.registry.get(&block.kind) {
                Some(renderer) => renderer,
                None => {
                    debug!(block_id = %block.id, kind = %block.kind, "Unsupported block type");
                    &self.fallback
                }
            };

            match renderer.render(block) {
                Ok(fragment) if fragment.is_empty() => {}
                Ok(fragment) => {
                    let container = renderer.container();
                    if open != container {
                        if let Some(previous) = open {
                            html.push_str(previous.close());
                        }
                        if let Some(next) = container {
                            html.push_str(next.open());
                        }
                        open = container;
                    }
                    html.push_str(&fragment);
                    rendered += 1;
                }
                Err(e) => {
                    warn!(block_id = %block.id, kind = %block.kind, "Failed to render block: {}", e);
                }
            }
        }

        if let Some(previous) = open {
            html.push_str(previous.close());
        }

        if rendered == 0 {
            self.failed_placeholder.clone()
        } else {
            html
        }
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}
