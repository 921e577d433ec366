//! Content module - post normalization and block rendering

mod blocks;
mod normalizer;
pub mod plugins;
mod post;
mod property;
mod renderer;
mod rich_text;

pub use normalizer::{sort_by_date_desc, Normalizer};
pub use post::{Post, PostWithContent, FALLBACK_DESCRIPTION, FALLBACK_TITLE};
pub use renderer::{BlockRenderer, Container, ContentRenderer, RenderError, RendererPlugin};
