use super::{FreshserviceSystem, NewTicket};
use crate::models::freshservice::{CreateTicketRequest, TicketPriority, TicketSource, TicketStatus};
use crate::models::outcome::OperationResult;
use reqwest::StatusCode;
use tracing::{debug, error, info, warn};

impl FreshserviceSystem {
    /// Files a low priority, open, portal-sourced ticket.
    #[tracing::instrument(skip_all, fields(subject = %ticket.subject))]
    pub async fn create_ticket(&self, ticket: &NewTicket) -> OperationResult {
        let url = self.settings.ticket_url.as_str();
        let request = CreateTicketRequest {
            subject: &ticket.subject,
            description: &ticket.description,
            priority: TicketPriority::Low,
            status: TicketStatus::Open,
            source: TicketSource::Portal,
            group_id: ticket.group_id.filter(|id| *id != 0),
            tags: &ticket.tags,
        };

        info!("Freshservice Request URL: {}", url);
        debug!("Freshservice Request: {:?}", request);

        match self.client.post_json(url, &request).await {
            Ok(response) if response.status == StatusCode::CREATED => {
                info!("ticket created");
                OperationResult::success(format!("Ticket created: {}", ticket.subject))
            }
            Ok(response) => {
                warn!(status = %response.status, "ticket creation rejected");
                OperationResult::error(format!("Failed to create ticket: {}", response.body))
            }
            Err(error) => {
                error!(%error, "failed to send ticket create request");
                OperationResult::error(error.to_string())
            }
        }
    }
}
