mod api;
mod client;
mod types;
mod webhook;

#[cfg(test)]
pub(crate) mod testing;

pub use api::ChatApi;
pub use client::SlackClient;
pub use types::{Attachment, DirectoryMember, OutboundMessage, UserId};
pub use webhook::WebhookClient;
