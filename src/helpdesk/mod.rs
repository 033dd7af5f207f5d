//! Access to the helpdesk that owns knowledge articles and tickets.

mod articles;
mod client;
mod freshservice;
mod tickets;

pub use client::{ApiResponse, FreshserviceClient};
pub use freshservice::FreshserviceSystem;

use crate::models::outcome::OperationResult;
use async_trait::async_trait;

/// A notification ticket to be filed with the helpdesk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    /// Agent group; omitted from the request when `None`
    pub group_id: Option<u64>,
    /// Omitted from the request when empty
    pub tags: Vec<String>,
}

/// Operations the change dispatcher needs from a helpdesk.
///
/// Implementations never fail: transport and protocol errors are reported as
/// [`OperationResult::Error`] values.
#[async_trait]
pub trait Helpdesk: Send + Sync {
    /// Human readable name used in ticket texts
    fn name(&self) -> &'static str;

    /// Location of the knowledge base, used when no better article URL exists
    fn knowledge_base_url(&self) -> &str;

    async fn create_article(&self, title: &str, content: &str) -> OperationResult;
    async fn delete_article(&self, title: &str) -> OperationResult;
    async fn create_ticket(&self, ticket: &NewTicket) -> OperationResult;
}
