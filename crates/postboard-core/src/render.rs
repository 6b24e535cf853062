//! Renderer - turns posts into markup for the display regions.
//!
//! Templates are escaped by askama, so user text never becomes markup and
//! image data only ever lands inside a `src` attribute.

use std::cmp::Reverse;

use askama::Template;

use crate::domain::{FormKind, ImagePreview, Post, parse_post_date};
use crate::error::RenderError;

struct CardView<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    image: &'a str,
    has_image: bool,
    date: String,
}

#[derive(Template)]
#[template(path = "post_list.html")]
struct PostListTemplate<'a> {
    cards: Vec<CardView<'a>>,
}

#[derive(Template)]
#[template(path = "post_detail.html")]
struct PostDetailTemplate<'a> {
    id: &'a str,
    title: &'a str,
    image: &'a str,
    has_image: bool,
    date: String,
    lines: Vec<&'a str>,
}

#[derive(Template)]
#[template(path = "image_preview.html")]
struct ImagePreviewTemplate<'a> {
    src: &'a str,
    caption: &'a str,
    form: &'static str,
}

/// Posts in display order: newest `date` first, stable on ties.
/// Dates that do not parse sort after all others.
pub fn sorted_by_date(posts: &[Post]) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by_key(|post| Reverse(parse_post_date(&post.date)));
    sorted
}

/// Long-form date such as "September 10, 2025". Unparseable input is
/// returned unchanged.
pub fn format_date(date: &str) -> String {
    match parse_post_date(date) {
        Some(parsed) => parsed.format("%B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// One card per post, newest first.
pub fn render_post_list(posts: &[Post]) -> Result<String, RenderError> {
    let cards = sorted_by_date(posts)
        .into_iter()
        .map(|post| CardView {
            id: &post.id,
            title: &post.title,
            description: &post.description,
            image: &post.image,
            has_image: post.has_image(),
            date: format_date(&post.date),
        })
        .collect();

    Ok(PostListTemplate { cards }.render()?)
}

pub fn render_post_detail(post: &Post) -> Result<String, RenderError> {
    let template = PostDetailTemplate {
        id: &post.id,
        title: &post.title,
        image: &post.image,
        has_image: post.has_image(),
        date: format_date(&post.date),
        lines: post.description.split('\n').collect(),
    };

    Ok(template.render()?)
}

pub fn render_image_preview(preview: &ImagePreview, form: FormKind) -> Result<String, RenderError> {
    let template = ImagePreviewTemplate {
        src: &preview.src,
        caption: &preview.caption,
        form: form.as_str(),
    };

    Ok(template.render()?)
}
