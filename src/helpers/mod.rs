//! Helper functions shared by the renderer, the API and the CLI

mod date;
mod html;
mod list;

pub use date::*;
pub use html::*;
pub use list::*;

/// Estimate reading time in minutes from rendered content length
///
/// One minute per thousand characters, never less than one.
pub fn estimate_read_time(content: &str) -> u32 {
    let minutes = content.chars().count().div_ceil(1000);
    minutes.max(1) as u32
}
