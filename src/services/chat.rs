use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::ChatService;
use super::seed::{self, DEMO_USER_ID};
use crate::common::{Conversation, ConversationId, Envelope, Message, MessageKind, UserId};
use crate::config::{LatencyConfig, millis};

/// Serves the seeded conversations. Sent messages are echoed back as if the
/// backend had stored them, attributed to `sender_id`.
pub struct MockChatService {
    sender_id: UserId,
    conversations_delay: Duration,
    messages_delay: Duration,
    send_delay: Duration,
    create_delay: Duration,
}

impl MockChatService {
    pub fn new(latency: &LatencyConfig) -> Self {
        Self {
            sender_id: DEMO_USER_ID.to_string(),
            conversations_delay: millis(latency.conversations_ms),
            messages_delay: millis(latency.messages_ms),
            send_delay: millis(latency.send_message_ms),
            create_delay: millis(latency.create_conversation_ms),
        }
    }

    /// Attribute echoed messages to another account.
    pub fn with_sender(mut self, sender_id: impl Into<UserId>) -> Self {
        self.sender_id = sender_id.into();
        self
    }
}

#[async_trait]
impl ChatService for MockChatService {
    async fn get_conversations(&self) -> Envelope<Vec<Conversation>> {
        tokio::time::sleep(self.conversations_delay).await;
        Envelope::ok(seed::conversations(Utc::now()))
    }

    async fn get_messages(&self, conversation_id: ConversationId) -> Envelope<Vec<Message>> {
        tokio::time::sleep(self.messages_delay).await;
        Envelope::ok(seed::messages(&conversation_id, Utc::now()))
    }

    async fn send_message(
        &self,
        conversation_id: ConversationId,
        content: String,
    ) -> Envelope<Message> {
        tokio::time::sleep(self.send_delay).await;
        Envelope::ok(Message {
            id: Uuid::new_v4().to_string(),
            conversation_id,
            sender_id: self.sender_id.clone(),
            content,
            kind: MessageKind::Text,
            timestamp: Utc::now(),
            is_read: true,
        })
    }

    async fn create_conversation(&self, participant_ids: Vec<UserId>) -> Envelope<Conversation> {
        tokio::time::sleep(self.create_delay).await;

        let contacts = seed::contacts(Utc::now());
        let participants = participant_ids
            .iter()
            .filter_map(|id| contacts.iter().find(|user| &user.id == id).cloned())
            .collect();

        Envelope::ok(Conversation {
            id: Uuid::new_v4().to_string(),
            participants,
            last_message: None,
            unread_count: 0,
            updated_at: Utc::now(),
            title: None,
            is_group: participant_ids.len() > 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MockChatService {
        MockChatService::new(&LatencyConfig::instant())
    }

    #[tokio::test]
    async fn sent_message_echoes_content() {
        let message = service()
            .send_message("2".into(), "hello".into())
            .await
            .into_result("Failed to send message")
            .unwrap();
        assert_eq!(message.conversation_id, "2");
        assert_eq!(message.content, "hello");
        assert_eq!(message.sender_id, DEMO_USER_ID);
    }

    #[tokio::test]
    async fn with_sender_overrides_attribution() {
        let message = service()
            .with_sender("9")
            .send_message("1".into(), "hi".into())
            .await
            .into_result("Failed to send message")
            .unwrap();
        assert_eq!(message.sender_id, "9");
    }

    #[tokio::test]
    async fn create_resolves_known_contacts() {
        let conversation = service()
            .create_conversation(vec!["2".into(), "4".into(), "99".into()])
            .await
            .into_result("Failed to create conversation")
            .unwrap();
        assert!(conversation.is_group);
        let ids: Vec<_> = conversation.participants.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4"]);
    }

    #[tokio::test]
    async fn empty_create_is_not_a_group() {
        let conversation = service()
            .create_conversation(Vec::new())
            .await
            .into_result("Failed to create conversation")
            .unwrap();
        assert!(!conversation.is_group);
        assert!(conversation.participants.is_empty());
        assert_eq!(conversation.unread_count, 0);
    }
}
