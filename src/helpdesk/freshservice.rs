use super::{FreshserviceClient, Helpdesk, NewTicket};
use crate::config::FreshserviceConfig;
use crate::error::HelpdeskError;
use crate::models::outcome::OperationResult;
use async_trait::async_trait;

/// Freshservice-backed helpdesk. Article operations live in `articles.rs`,
/// ticket operations in `tickets.rs`.
#[derive(Debug, Clone)]
pub struct FreshserviceSystem {
    pub(super) client: FreshserviceClient,
    pub(super) settings: FreshserviceConfig,
}

impl FreshserviceSystem {
    pub fn new(settings: FreshserviceConfig) -> Result<Self, HelpdeskError> {
        let client = FreshserviceClient::new(&settings.api_key, settings.timeout())?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl Helpdesk for FreshserviceSystem {
    fn name(&self) -> &'static str {
        "Freshservice"
    }

    fn knowledge_base_url(&self) -> &str {
        &self.settings.knowledge_base_url
    }

    async fn create_article(&self, title: &str, content: &str) -> OperationResult {
        FreshserviceSystem::create_article(self, title, content).await
    }

    async fn delete_article(&self, title: &str) -> OperationResult {
        FreshserviceSystem::delete_article(self, title).await
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> OperationResult {
        FreshserviceSystem::create_ticket(self, ticket).await
    }
}
