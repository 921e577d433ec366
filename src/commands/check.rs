//! Check the Notion setup

use anyhow::Result;

use crate::config::{BlogConfig, NotionConfig};
use crate::NotionBlog;

/// Report configuration, then test the connection and database access
///
/// The configuration is printed before any client is built.
pub async fn run(config: BlogConfig) -> Result<()> {
    println!("Configuration:");
    for line in describe(&config.notion) {
        println!("  {}", line);
    }

    if config.notion.secret.is_none() {
        anyhow::bail!(
            "NOTION_SECRET is not set; create an integration at https://www.notion.so/my-integrations and export its secret"
        );
    }

    let blog = NotionBlog::new(config)?;
    verify(&blog).await
}

/// Configuration summary; the secret is shown only as a short prefix
pub fn describe(notion: &NotionConfig) -> Vec<String> {
    let secret = match notion.secret.as_deref() {
        Some(secret) => {
            let prefix: String = secret.chars().take(10).collect();
            format!("set ({}...)", prefix)
        }
        None => "NOT SET".to_string(),
    };
    let database = match notion.database_id.as_deref() {
        Some(id) => format!("set ({})", id),
        None => "NOT SET".to_string(),
    };

    vec![
        format!("NOTION_SECRET:      {}", secret),
        format!("NOTION_DATABASE_ID: {}", database),
        format!("API:                {} ({})", notion.api_url, notion.api_version),
    ]
}

async fn verify(blog: &NotionBlog) -> Result<()> {
    print!("\nTesting Notion connection... ");
    blog.service.test_connection().await?;
    println!("ok");

    if let Ok(database_id) = blog.database_id() {
        print!("Querying database {}... ", database_id);
        let posts = blog.service.list_posts(database_id).await?;
        println!("ok, {} published posts", posts.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::MockSource;
    use crate::BlogError;
    use std::sync::Arc;

    #[test]
    fn test_describe_masks_secret() {
        let notion = NotionConfig {
            secret: Some("secret_abcdefghijklmnop".to_string()),
            ..NotionConfig::default()
        };
        let lines = describe(&notion);
        assert_eq!(lines[0], "NOTION_SECRET:      set (secret_abc...)");
        assert_eq!(lines[1], "NOTION_DATABASE_ID: NOT SET");
    }

    #[tokio::test]
    async fn test_missing_secret_is_reported() {
        let err = run(BlogConfig::default()).await.unwrap_err();
        assert!(err.to_string().contains("NOTION_SECRET is not set"));
        assert_eq!(describe(&BlogConfig::default().notion)[0], "NOTION_SECRET:      NOT SET");
    }

    #[tokio::test]
    async fn test_verify_queries_database() {
        let mut config = BlogConfig::default();
        config.notion.database_id = Some("db".to_string());
        let source = Arc::new(MockSource::new().with_database("db", Vec::new()));
        let blog = NotionBlog::with_source(config, source.clone());

        verify(&blog).await.unwrap();
        assert_eq!(source.queries().len(), 1);
    }

    #[tokio::test]
    async fn test_verify_fails_on_connection_error() {
        let source = MockSource::new()
            .with_connection_error(BlogError::Connection("connection refused".into()));
        let blog = NotionBlog::with_source(BlogConfig::default(), Arc::new(source));
        assert!(verify(&blog).await.is_err());
    }
}
