//! Bulk fixes for legacy CMS posts: moving posts between post types and promoting
//! a fixed set of institutional tags to categories.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tags that were used as categories on the old site.
pub const CATEGORY_TAGS: &[&str] = &[
    "ethos-meio-ambiente",
    "ethos-integridade",
    "ethos-direitos-humanos",
    "ethos-institucional",
    "ethos-gestao-sustentavel",
];

const PARTNERSHIP_SLUG: &str = "parcerias";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WpPost {
    pub id: u64,
    pub post_type: String,
    /// Tag slugs.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Category slugs.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl WpPost {
    pub fn has_tag(&self, slug: &str) -> bool {
        self.tags.iter().any(|t| t == slug)
    }

    pub fn has_category(&self, slug: &str) -> bool {
        self.categories.iter().any(|c| c == slug)
    }

    fn append_tag(&mut self, slug: &str) {
        if !self.has_tag(slug) {
            self.tags.push(slug.to_string());
        }
    }

    fn append_category(&mut self, slug: &str) {
        if !self.has_category(slug) {
            self.categories.push(slug.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Publicacao,
    Post,
    Page,
    Iniciativa,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Publicacao => "publicacao",
            PostType::Post => "post",
            PostType::Page => "page",
            PostType::Iniciativa => "iniciativa",
        }
    }
}

impl std::str::FromStr for PostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publicacao" => Ok(PostType::Publicacao),
            "post" => Ok(PostType::Post),
            "page" => Ok(PostType::Page),
            "iniciativa" => Ok(PostType::Iniciativa),
            other => Err(format!("unknown post type '{}'", other)),
        }
    }
}

/// Changes the post type. Initiatives filed under `parcerias` also get the `parcerias` tag.
pub fn retype_post(post: &mut WpPost, post_type: PostType) {
    post.post_type = post_type.as_str().to_string();

    if post_type == PostType::Iniciativa && post.has_category(PARTNERSHIP_SLUG) {
        post.append_tag(PARTNERSHIP_SLUG);
    }

    tracing::debug!("Post {} retyped to {}", post.id, post.post_type);
}

/// Replaces each [`CATEGORY_TAGS`] tag with the category of the same slug.
///
/// Tags whose category does not exist are left alone. Returns the moved slugs.
pub fn change_tag_to_category(post: &mut WpPost, existing_categories: &HashSet<String>) -> Vec<String> {
    let mut moved = Vec::new();

    for slug in CATEGORY_TAGS {
        if !post.has_tag(slug) || !existing_categories.contains(*slug) {
            continue;
        }
        post.append_category(slug);
        post.tags.retain(|t| t != slug);
        moved.push(slug.to_string());
    }

    if !moved.is_empty() {
        tracing::debug!("Post {}: moved tags {:?} to categories", post.id, moved);
    }
    moved
}
