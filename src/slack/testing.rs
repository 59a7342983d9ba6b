use crate::error::{Result, SlackLogError};
use crate::slack::{ChatApi, DirectoryMember, OutboundMessage};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory chat service that records everything posted to it
#[derive(Default)]
pub struct MockChatApi {
    members: Vec<DirectoryMember>,
    sent: Mutex<Vec<OutboundMessage>>,
    directory_calls: AtomicUsize,
    attempts: AtomicUsize,
    fail_sends: AtomicBool,
}

impl MockChatApi {
    pub fn with_members(members: Vec<DirectoryMember>) -> Self {
        Self {
            members,
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_sends.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn directory_calls(&self) -> usize {
        self.directory_calls.load(Ordering::SeqCst)
    }

    /// Number of send attempts, failed ones included
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl ChatApi for MockChatApi {
    async fn list_users(&self) -> Result<Vec<DirectoryMember>> {
        self.directory_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.members.clone())
    }

    async fn post_message(&self, message: &OutboundMessage) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(SlackLogError::SlackApi("channel_not_found".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
