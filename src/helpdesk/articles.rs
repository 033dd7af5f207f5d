use super::FreshserviceSystem;
use crate::models::freshservice::{
    ARTICLE_PAGE_SIZE, ArticleEnvelope, ArticleList, ArticleStatus, CreateArticleRequest,
    MAX_ARTICLE_PAGES,
};
use crate::models::outcome::OperationResult;
use reqwest::StatusCode;
use tracing::{debug, error, info, warn};

impl FreshserviceSystem {
    /// Creates a draft article in the configured folder.
    ///
    /// The article id from the response is only logged; the returned
    /// `article_url` is the knowledge base location.
    #[tracing::instrument(skip(self, content))]
    pub async fn create_article(&self, title: &str, content: &str) -> OperationResult {
        let url = self.settings.knowledge_base_url.as_str();
        let request = CreateArticleRequest {
            title,
            description: content,
            folder_id: self.settings.folder_id,
            status: ArticleStatus::Draft,
        };

        info!("Freshservice Request URL: {}", url);
        debug!("Freshservice Request: {:?}", request);

        let response = match self.client.post_json(url, &request).await {
            Ok(response) => response,
            Err(error) => {
                error!(%error, "failed to send article create request");
                return OperationResult::error(error.to_string());
            }
        };

        if !matches!(response.status, StatusCode::OK | StatusCode::CREATED) {
            warn!(status = %response.status, "article creation rejected");
            return OperationResult::error(format!(
                "Failed to create knowledge article: {}",
                response.body
            ));
        }

        match response.json::<ArticleEnvelope>() {
            Ok(envelope) => {
                let article_id = envelope.article.and_then(|article| article.id);
                info!(?article_id, "knowledge article created");
                OperationResult::success_with_url(
                    format!("Knowledge article created: {title}"),
                    url,
                )
            }
            Err(error) => {
                error!(%error, "article created but response was unreadable");
                OperationResult::error(error.to_string())
            }
        }
    }

    /// Scans the configured folder page by page for an article whose title
    /// matches `title` ignoring case and surrounding whitespace.
    ///
    /// Stops at the first match or at the first page shorter than
    /// [`ARTICLE_PAGE_SIZE`], scanning at most [`MAX_ARTICLE_PAGES`] pages. Any
    /// failure along the way counts as not found.
    #[tracing::instrument(skip(self))]
    pub async fn find_article_id(&self, title: &str) -> Option<u64> {
        let url = self.settings.knowledge_base_url.as_str();
        let mut page: u32 = 1;

        loop {
            let query = [
                ("folder_id", self.settings.folder_id.to_string()),
                ("per_page", ARTICLE_PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ];

            let response = match self.client.get(url, &query).await {
                Ok(response) => response,
                Err(error) => {
                    warn!(%error, page, "article lookup failed");
                    return None;
                }
            };

            if response.status != StatusCode::OK {
                warn!(status = %response.status, page, "article lookup rejected");
                return None;
            }

            let articles = match response.json::<ArticleList>() {
                Ok(list) => list.articles,
                Err(error) => {
                    warn!(%error, page, "article list unreadable");
                    return None;
                }
            };

            if let Some(article) = articles.iter().find(|article| article.title_matches(title)) {
                debug!(article_id = article.id, page, "article found");
                return Some(article.id);
            }

            if articles.len() < ARTICLE_PAGE_SIZE {
                debug!(page, "article not found");
                return None;
            }
            if page >= MAX_ARTICLE_PAGES {
                warn!(page, "article lookup gave up after page limit");
                return None;
            }
            page += 1;
        }
    }

    /// Deletes the article with the given title, if one can be found.
    #[tracing::instrument(skip(self))]
    pub async fn delete_article(&self, title: &str) -> OperationResult {
        let Some(article_id) = self.find_article_id(title).await else {
            return OperationResult::error(format!(
                "Article '{title}' not found, cannot delete."
            ));
        };

        let url = format!("{}/{}", self.settings.knowledge_base_url, article_id);
        info!("Freshservice Request URL: {}", url);

        let response = match self.client.delete(&url).await {
            Ok(response) => response,
            Err(error) => {
                error!(%error, "failed to send article delete request");
                return OperationResult::error(error.to_string());
            }
        };

        match response.status {
            StatusCode::NO_CONTENT => {
                info!(article_id, "knowledge article deleted");
                OperationResult::success(format!("Knowledge article '{title}' deleted"))
            }
            StatusCode::FORBIDDEN => {
                warn!(article_id, "no permission to delete article");
                OperationResult::error(format!(
                    "Permission denied. Cannot delete article '{title}'. Check Freshservice API permissions."
                ))
            }
            status => {
                warn!(%status, article_id, "article deletion rejected");
                OperationResult::error(format!(
                    "Failed to delete article '{title}': {}",
                    response.body
                ))
            }
        }
    }
}
