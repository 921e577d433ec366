//! Show a single post

use anyhow::Result;

use crate::helpers::{full_date, strip_html, truncate};
use crate::NotionBlog;

/// Print a post's metadata, and optionally its rendered HTML
pub async fn run(blog: &NotionBlog, page_id: &str, with_content: bool) -> Result<()> {
    let merged = blog.service.get_post_with_content(page_id).await?;
    let post = &merged.post;

    println!("{}", post.title);
    println!("  id:        {}", post.id);
    println!("  slug:      {}", post.slug);
    println!("  published: {}", full_date(&post.published_date));
    println!("  author:    {}", post.author);
    println!("  category:  {}", post.category);
    if !post.tags.is_empty() {
        println!("  tags:      {}", post.tags.join(", "));
    }
    if let Some(cover) = &post.cover_image {
        println!("  cover:     {}", cover);
    }
    println!("  read time: {} min", post.read_time);
    if !post.description.is_empty() {
        println!("\n{}", post.description);
    }

    if with_content {
        println!("\n{}", merged.content);
    } else {
        println!("\n{}", truncate(strip_html(&merged.content).trim(), 280, None));
    }

    Ok(())
}
