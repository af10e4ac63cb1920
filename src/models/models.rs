use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "joined")]
    pub joined_at: i64,
}

/// `author_name` is copied from the author at creation time and is never
/// refreshed afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "userId")]
    pub author_id: i64,
    #[serde(rename = "authorName")]
    pub author_name: String,
    pub text: String,
    #[serde(rename = "imageUrl", default)]
    pub image_ref: Option<String>,
    #[serde(rename = "timestamp")]
    pub created_at: i64,
    #[serde(rename = "editedAt", default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<i64>,
    #[serde(rename = "likes", default)]
    pub liked_by: Vec<i64>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    pub fn is_liked_by(&self, user_id: i64) -> bool {
        self.liked_by.contains(&user_id)
    }

    /// Collapses repeated likes left behind by older records.
    pub(crate) fn normalize(&mut self) {
        let mut seen = HashSet::with_capacity(self.liked_by.len());
        self.liked_by.retain(|id| seen.insert(*id));
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    #[serde(rename = "userId")]
    pub author_id: i64,
    pub text: String,
    #[serde(rename = "timestamp")]
    pub created_at: i64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    #[serde(rename = "latest")]
    Latest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "likes")]
    MostLiked,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Latest => write!(f, "latest"),
            SortMode::Oldest => write!(f, "oldest"),
            SortMode::MostLiked => write!(f, "likes"),
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latest" | "newest" => Ok(SortMode::Latest),
            "oldest" => Ok(SortMode::Oldest),
            "likes" | "most-liked" | "mostliked" => Ok(SortMode::MostLiked),
            other => Err(format!("Unknown sort mode: {}", other)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub sort_mode: SortMode,
}

impl FilterState {
    pub fn matches(&self, post: &Post) -> bool {
        self.search_text.is_empty()
            || post
                .text
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}
