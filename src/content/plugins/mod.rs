//! Pluggable block renderers

mod bookmark;
mod code;

pub use bookmark::{video_embed, BookmarkPlugin, BookmarkRenderer};
pub use code::CodeHighlighter;
