use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One knowledge-base lifecycle event as delivered by the workflow trigger.
///
/// Every field is optional on the wire; records without a title or status are
/// skipped by the dispatcher rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Title of the article the change refers to
    #[serde(default)]
    pub title: Option<String>,
    /// Article body, used as the description of newly created articles
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: Option<String>,
    /// Location of the source document that changed
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    /// Lifecycle status, e.g. "new", "Content updated", "deleted"
    #[serde(default)]
    pub status: Option<String>,
}

/// Accepts any JSON scalar as text. Objects and arrays read as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
        scalar => Some(scalar.to_string()),
    })
}

/// Classification of a change record's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    New,
    Updated,
    Deleted,
}

impl ChangeKind {
    /// Case-insensitive classification. Returns `None` for statuses this
    /// service does not act on.
    pub fn from_status(status: &str) -> Option<Self> {
        let status = status.to_lowercase();
        if status == "new" {
            Some(Self::New)
        } else if status.contains("updated") {
            Some(Self::Updated)
        } else if matches!(status.as_str(), "delete" | "deleted") {
            Some(Self::Deleted)
        } else {
            None
        }
    }
}

impl ChangeEvent {
    /// Trimmed title, or `None` when it is missing or blank.
    pub fn title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }

    /// The record's title and kind if the record is actionable.
    pub fn classify(&self) -> Option<(&str, ChangeKind)> {
        let title = self.title()?;
        let status = self.status.as_deref().filter(|s| !s.is_empty())?;
        ChangeKind::from_status(status).map(|kind| (title, kind))
    }
}
