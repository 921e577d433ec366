//! List blog content

use anyhow::Result;

use crate::helpers::{count_categories, count_tags, full_date, PostFilter};
use crate::NotionBlog;

/// List posts, tags or categories of the configured database
pub async fn run(blog: &NotionBlog, content_type: &str, filter: &PostFilter) -> Result<()> {
    let database_id = blog.database_id()?;

    match content_type {
        "post" | "posts" => {
            let posts = filter.apply(blog.service.list_posts(database_id).await?);
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}] ({} min, {})",
                    full_date(&post.published_date),
                    post.title,
                    post.id,
                    post.read_time,
                    post.category
                );
            }
        }
        "tag" | "tags" => {
            let posts = blog.service.list_posts(database_id).await?;
            let tags = count_tags(&posts);
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let posts = blog.service.list_posts(database_id).await?;
            let categories = count_categories(&posts);
            println!("Categories ({}):", categories.len());
            for (category, count) in categories {
                println!("  {} ({})", category, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}
