use super::types::{
    AuthSession, Conversation, ConversationId, Message, Notification, NotificationId, User,
};
use crate::services::ServiceError;

/// Settlements the service worker reports back to the store, one per
/// command.
#[derive(Debug, Clone)]
pub enum ServiceEvent {
    LoggedIn(Result<AuthSession, ServiceError>),
    SignedUp(Result<AuthSession, ServiceError>),
    LoggedOut(Result<(), ServiceError>),
    TokenVerified {
        token: String,
        result: Result<User, ServiceError>,
    },
    ConversationsLoaded(Result<Vec<Conversation>, ServiceError>),
    MessagesLoaded {
        conversation_id: ConversationId,
        result: Result<Vec<Message>, ServiceError>,
    },
    MessageSent(Result<Message, ServiceError>),
    ConversationCreated(Result<Conversation, ServiceError>),
    NotificationsLoaded(Result<Vec<Notification>, ServiceError>),
    NotificationRead {
        notification_id: NotificationId,
        result: Result<(), ServiceError>,
    },
    AllNotificationsRead(Result<(), ServiceError>),
}
