use crate::config::FreshserviceConfig;
use crate::helpdesk::{Helpdesk, NewTicket};
use crate::models::change::{ChangeEvent, ChangeKind};
use crate::models::outcome::OperationResult;
use std::sync::Arc;
use tracing::{debug, info};

/// Turns change records into helpdesk operations, one record at a time.
#[derive(Clone)]
pub struct ChangeDispatcher {
    helpdesk: Arc<dyn Helpdesk>,
    group_id: Option<u64>,
    tag: String,
}

impl ChangeDispatcher {
    pub fn new(helpdesk: Arc<dyn Helpdesk>, group_id: Option<u64>, tag: impl Into<String>) -> Self {
        Self {
            helpdesk,
            group_id,
            tag: tag.into(),
        }
    }

    pub fn from_config(helpdesk: Arc<dyn Helpdesk>, settings: &FreshserviceConfig) -> Self {
        Self::new(helpdesk, settings.group_id, settings.tag.clone())
    }

    /// Processes every actionable record in order and returns the results of
    /// all operations performed. Failed operations do not stop processing.
    pub async fn dispatch(&self, changes: &[ChangeEvent]) -> Vec<OperationResult> {
        let mut results = Vec::new();

        for (index, change) in changes.iter().enumerate() {
            let Some((title, kind)) = change.classify() else {
                debug!(index, "skipping change without title or known status");
                continue;
            };

            info!(index, title, ?kind, "processing change");
            let url = change.url.as_deref();

            match kind {
                ChangeKind::New => {
                    let content = article_content(title, change.content.as_deref(), url);
                    let article = self.helpdesk.create_article(title, &content).await;
                    let review_url = self.review_url(&article);
                    let ticket = self
                        .ticket(
                            format!("New Knowledge Article Created: {title}"),
                            format!(
                                "A new knowledge article has been created.\n\n\
                                 Title: {title}\n\
                                 URL: {}\n\n\
                                 Review the article and update as needed in {} - {review_url}",
                                display_url(url),
                                self.helpdesk.name(),
                            ),
                        )
                        .await;
                    results.extend([article, ticket]);
                }
                ChangeKind::Updated => {
                    let ticket = self
                        .ticket(
                            format!("Knowledge Article Updated: {title}"),
                            format!(
                                "The knowledge article '{title}' has been updated.\n\n\
                                 URL: {}\n\n\
                                 Review the updates in {} - {}",
                                display_url(url),
                                self.helpdesk.name(),
                                self.helpdesk.knowledge_base_url(),
                            ),
                        )
                        .await;
                    results.push(ticket);
                }
                ChangeKind::Deleted => {
                    let deleted = self.helpdesk.delete_article(title).await;
                    let review_url = self.review_url(&deleted);
                    let ticket = self
                        .ticket(
                            format!("Knowledge Article Deleted: {title}"),
                            format!(
                                "The knowledge article '{title}' has been deleted.\n\n\
                                 URL: {}\n\n\
                                 Ensure it has been properly archived or removed in {} - {review_url}",
                                display_url(url),
                                self.helpdesk.name(),
                            ),
                        )
                        .await;
                    results.extend([deleted, ticket]);
                }
            }
        }

        results
    }

    /// URL reported by an article operation, or the knowledge base itself.
    fn review_url(&self, result: &OperationResult) -> String {
        result
            .article_url()
            .unwrap_or_else(|| self.helpdesk.knowledge_base_url())
            .to_string()
    }

    async fn ticket(&self, subject: String, description: String) -> OperationResult {
        let ticket = NewTicket {
            subject,
            description,
            group_id: self.group_id,
            tags: vec![self.tag.clone()],
        };
        self.helpdesk.create_ticket(&ticket).await
    }
}

fn display_url(url: Option<&str>) -> &str {
    url.filter(|url| !url.is_empty()).unwrap_or("not provided")
}

/// Body for a new article: the supplied content, or a short stub pointing at
/// the source document.
fn article_content(title: &str, content: Option<&str>, url: Option<&str>) -> String {
    match (content.filter(|c| !c.trim().is_empty()), url.filter(|u| !u.is_empty())) {
        (Some(content), _) => content.to_string(),
        (None, Some(url)) => format!("<p>{title} is now handled via <a href=\"{url}\">{url}</a></p>"),
        (None, None) => format!("<p>{title}</p>"),
    }
}
