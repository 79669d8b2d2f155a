pub mod commands;
pub mod events;
pub mod input;
pub mod types;

pub use commands::ServiceCommand;
pub use events::ServiceEvent;
pub use types::{
    AuthSession, Conversation, ConversationId, ConversationPatch, Envelope, LoginCredentials,
    Message, MessageId, MessageKind, Notification, NotificationId, NotificationKind,
    SignupCredentials, User, UserId,
};
