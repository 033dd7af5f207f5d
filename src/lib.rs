//! Keeps a Freshservice knowledge base and its helpdesk in step with an
//! external document source.
//!
//! A batch of change records (new, updated or deleted documents) comes in
//! through the webhook or the CLI. Each record is turned into article
//! operations and a notification ticket, and every outcome is reported back.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod helpdesk;
pub mod models;
pub mod webhook;
