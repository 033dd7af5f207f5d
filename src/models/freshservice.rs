//! Request and response bodies of the Freshservice v2 API, limited to the
//! fields this service reads or writes.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Number of articles requested per page when scanning a folder.
pub const ARTICLE_PAGE_SIZE: usize = 100;

/// Upper bound on pages scanned by one title lookup.
pub const MAX_ARTICLE_PAGES: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ArticleStatus {
    Draft = 1,
}

#[derive(Debug, Serialize)]
pub struct CreateArticleRequest<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub folder_id: u64,
    pub status: ArticleStatus,
}

/// `{"article": {...}}` as returned by article creation.
#[derive(Debug, Deserialize)]
pub struct ArticleEnvelope {
    #[serde(default)]
    pub article: Option<ArticleRef>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleRef {
    #[serde(default)]
    pub id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleList {
    #[serde(default)]
    pub articles: Vec<ArticleSummary>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

impl ArticleSummary {
    /// Case-insensitive comparison with surrounding whitespace ignored.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.trim().to_lowercase() == title.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum TicketPriority {
    Low = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum TicketStatus {
    Open = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum TicketSource {
    Portal = 2,
}

#[derive(Debug, Serialize)]
pub struct CreateTicketRequest<'a> {
    pub subject: &'a str,
    pub description: &'a str,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub source: TicketSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
    #[serde(skip_serializing_if = "no_tags")]
    pub tags: &'a [String],
}

fn no_tags(tags: &&[String]) -> bool {
    tags.is_empty()
}
