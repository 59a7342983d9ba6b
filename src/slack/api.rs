use crate::error::Result;
use crate::slack::{DirectoryMember, OutboundMessage};
use std::future::Future;
use std::sync::Arc;

/// The chat service capabilities the log handler depends on
pub trait ChatApi: Send + Sync {
    /// List every member of the workspace directory, in the order the service returns them
    fn list_users(&self) -> impl Future<Output = Result<Vec<DirectoryMember>>> + Send;

    /// Post one message. Any transport or API failure is returned as an error.
    fn post_message(&self, message: &OutboundMessage) -> impl Future<Output = Result<()>> + Send;
}

impl<T: ChatApi> ChatApi for Arc<T> {
    fn list_users(&self) -> impl Future<Output = Result<Vec<DirectoryMember>>> + Send {
        self.as_ref().list_users()
    }

    fn post_message(&self, message: &OutboundMessage) -> impl Future<Output = Result<()>> + Send {
        self.as_ref().post_message(message)
    }
}
