//! Configuration module

mod blog;
mod properties;

pub use blog::BlogConfig;
pub use blog::NotionConfig;
pub use blog::RenderConfig;
pub use blog::ServerConfig;
pub use properties::PostDefaults;
pub use properties::PropertyMap;
