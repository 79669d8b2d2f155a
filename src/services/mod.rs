//! Service boundary consumed by the store.
//!
//! Each facade is a trait so a real network client can replace the mocks
//! without touching store logic. The mocks sleep for a configured latency and
//! answer with canned data.

pub mod auth;
pub mod chat;
pub mod notifications;
pub mod seed;
pub mod worker;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::common::{
    AuthSession, Conversation, ConversationId, Envelope, LoginCredentials, Message, Notification,
    NotificationId, SignupCredentials, User, UserId,
};
use crate::config::LatencyConfig;

pub use auth::MockAuthService;
pub use chat::MockChatService;
pub use notifications::MockNotificationService;
pub use worker::ServiceWorker;

/// The only failure the store knows about: a message fit for a banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service answered with a failure envelope.
    #[error("{0}")]
    Rejected(String),
    /// The request never reached a service.
    #[error("{0}")]
    Unavailable(String),
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: LoginCredentials) -> Envelope<AuthSession>;
    async fn signup(&self, credentials: SignupCredentials) -> Envelope<AuthSession>;
    async fn logout(&self) -> Envelope<()>;
    async fn verify_token(&self, token: String) -> Envelope<User>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn get_conversations(&self) -> Envelope<Vec<Conversation>>;
    async fn get_messages(&self, conversation_id: ConversationId) -> Envelope<Vec<Message>>;
    async fn send_message(
        &self,
        conversation_id: ConversationId,
        content: String,
    ) -> Envelope<Message>;
    async fn create_conversation(&self, participant_ids: Vec<UserId>) -> Envelope<Conversation>;
}

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn get_notifications(&self) -> Envelope<Vec<Notification>>;
    async fn mark_as_read(&self, notification_id: NotificationId) -> Envelope<()>;
    async fn mark_all_as_read(&self) -> Envelope<()>;
}

/// Handles to the three facades, shared with the worker.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub chat: Arc<dyn ChatService>,
    pub notifications: Arc<dyn NotificationService>,
}

impl Services {
    pub fn new(
        auth: Arc<dyn AuthService>,
        chat: Arc<dyn ChatService>,
        notifications: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            auth,
            chat,
            notifications,
        }
    }

    /// The canned in-memory backend.
    pub fn mock(latency: &LatencyConfig) -> Self {
        Self::new(
            Arc::new(MockAuthService::new(latency)),
            Arc::new(MockChatService::new(latency)),
            Arc::new(MockNotificationService::new(latency)),
        )
    }
}
