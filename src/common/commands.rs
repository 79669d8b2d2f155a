use super::events::ServiceEvent;
use super::types::{ConversationId, LoginCredentials, NotificationId, SignupCredentials, UserId};
use crate::services::ServiceError;

/// Requests the store hands to the service worker.
#[derive(Debug, Clone)]
pub enum ServiceCommand {
    Login(LoginCredentials),
    Signup(SignupCredentials),
    Logout,
    VerifyToken(String),
    FetchConversations,
    FetchMessages(ConversationId),
    SendMessage {
        conversation_id: ConversationId,
        content: String,
    },
    CreateConversation(Vec<UserId>),
    FetchNotifications,
    MarkNotificationRead(NotificationId),
    MarkAllNotificationsRead,
}

impl ServiceCommand {
    /// Settlement reporting that this command failed without reaching the
    /// service.
    pub fn reject(self, error: ServiceError) -> ServiceEvent {
        match self {
            ServiceCommand::Login(_) => ServiceEvent::LoggedIn(Err(error)),
            ServiceCommand::Signup(_) => ServiceEvent::SignedUp(Err(error)),
            ServiceCommand::Logout => ServiceEvent::LoggedOut(Err(error)),
            ServiceCommand::VerifyToken(token) => ServiceEvent::TokenVerified {
                token,
                result: Err(error),
            },
            ServiceCommand::FetchConversations => ServiceEvent::ConversationsLoaded(Err(error)),
            ServiceCommand::FetchMessages(conversation_id) => ServiceEvent::MessagesLoaded {
                conversation_id,
                result: Err(error),
            },
            ServiceCommand::SendMessage { .. } => ServiceEvent::MessageSent(Err(error)),
            ServiceCommand::CreateConversation(_) => ServiceEvent::ConversationCreated(Err(error)),
            ServiceCommand::FetchNotifications => ServiceEvent::NotificationsLoaded(Err(error)),
            ServiceCommand::MarkNotificationRead(notification_id) => {
                ServiceEvent::NotificationRead {
                    notification_id,
                    result: Err(error),
                }
            }
            ServiceCommand::MarkAllNotificationsRead => {
                ServiceEvent::AllNotificationsRead(Err(error))
            }
        }
    }
}
