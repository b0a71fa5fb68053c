//! Blog post commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use chrono::{DateTime, Utc};
use dialoguer::Confirm;

use bookshelf_blog::{BlogPost, BlogStore, NewPost, PostPatch};

use super::{BlogArgs, BlogCommand, PostArgs};
use crate::context::Context;
use crate::output::truncate;

/// Run the blog command.
pub async fn run(args: BlogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        BlogCommand::List => list_posts(ctx),
        BlogCommand::Get { id } => get_post(&id, ctx),
        BlogCommand::Create { post, token } => create_post(post, token, ctx),
        BlogCommand::Update { id, post, token } => update_post(&id, post, token, ctx),
        BlogCommand::Delete { id, yes, token } => delete_post(&id, yes, token, ctx),
    }
}

fn list_posts(ctx: &Context) -> Result<()> {
    let posts = ctx.blog()?.list()?;

    if ctx.output.is_json() {
        ctx.output.json(&posts);
        return Ok(());
    }

    ctx.output.header("Blog");
    let widths = [36, 10, 40];
    ctx.output.table_row(&["ID", "DATE", "TITLE"], &widths);
    for post in &posts {
        ctx.output.table_row(
            &[
                &post.id,
                &format_date(&post.published_at),
                &truncate(&post.title, widths[2]),
            ],
            &widths,
        );
    }

    Ok(())
}

fn get_post(id: &str, ctx: &Context) -> Result<()> {
    let post = ctx.blog()?.get(id)?;

    if ctx.output.is_json() {
        ctx.output.json(&post);
        return Ok(());
    }

    print_post(&post, ctx);
    println!("\n{}", post.content);
    Ok(())
}

fn create_post(args: PostArgs, token: Option<String>, ctx: &Context) -> Result<()> {
    let token = ctx.admin_token(token)?;
    let mut blog = ctx.blog()?;

    let content = read_content(&args)?;
    let post = blog.create(
        &token,
        NewPost {
            title: args.title.unwrap_or_default(),
            content: content.unwrap_or_default(),
            author: args.author.unwrap_or_default(),
            excerpt: args.excerpt,
            featured_image: args.image,
            tags: args.tags,
        },
    )?;

    if ctx.output.is_json() {
        ctx.output.json(&post);
        return Ok(());
    }

    ctx.output.success(&format!("Created post {}", post.id));
    print_post(&post, ctx);
    Ok(())
}

fn update_post(id: &str, args: PostArgs, token: Option<String>, ctx: &Context) -> Result<()> {
    let token = ctx.admin_token(token)?;
    let mut blog = ctx.blog()?;

    let content = read_content(&args)?;
    let patch = PostPatch {
        title: args.title,
        content,
        author: args.author,
        excerpt: args.excerpt,
        featured_image: args.image,
        tags: if args.tags.is_empty() {
            None
        } else {
            Some(args.tags)
        },
    };
    if patch == PostPatch::default() {
        bail!("Nothing to update. Pass at least one field, e.g. --title");
    }

    let post = blog.update(&token, id, patch)?;

    if ctx.output.is_json() {
        ctx.output.json(&post);
        return Ok(());
    }

    ctx.output.success(&format!("Updated post {}", post.id));
    print_post(&post, ctx);
    Ok(())
}

fn delete_post(id: &str, yes: bool, token: Option<String>, ctx: &Context) -> Result<()> {
    let token = ctx.admin_token(token)?;
    let mut blog = ctx.blog()?;

    let post = blog.get(id)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", post.title))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Delete cancelled");
            return Ok(());
        }
    }

    blog.delete(&token, id)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": id }));
        return Ok(());
    }

    ctx.output.success(&format!("Deleted post {}", id));
    Ok(())
}

fn read_content(args: &PostArgs) -> Result<Option<String>> {
    match (&args.content, &args.content_file) {
        (Some(content), _) => Ok(Some(content.clone())),
        (None, Some(path)) => {
            let path = std::path::Path::new(path);
            fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("Failed to read content file: {}", path.display()))
        }
        (None, None) => Ok(None),
    }
}

fn print_post(post: &BlogPost, ctx: &Context) {
    ctx.output.header(&post.title);
    ctx.output.kv("id", &post.id);
    ctx.output.kv("author", &post.author);
    ctx.output.kv("published", &format_date(&post.published_at));
    if post.updated_at != post.published_at {
        ctx.output.kv("updated", &format_date(&post.updated_at));
    }
    if let Some(image) = &post.featured_image {
        ctx.output.kv("image", image);
    }
    ctx.output.kv("excerpt", &post.excerpt);
    for tag in &post.tags {
        ctx.output.list_item(tag);
    }
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
