//! Canned data served by the mock services.

use chrono::{DateTime, Duration, Utc};

use crate::common::{
    Conversation, Message, MessageKind, Notification, NotificationKind, User, UserId,
};

pub const DEMO_USER_ID: &str = "1";
pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "password";
pub const TOKEN_PREFIX: &str = "mock-jwt-token-";

const DEFAULT_AVATAR: &str =
    "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg?auto=compress&cs=tinysrgb&w=150";

pub fn demo_user() -> User {
    User {
        id: DEMO_USER_ID.to_string(),
        username: DEMO_USERNAME.to_string(),
        email: "demo@example.com".to_string(),
        avatar: Some(DEFAULT_AVATAR.to_string()),
        is_online: true,
        last_seen: None,
    }
}

pub fn new_user(id: UserId, username: &str, email: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: email.to_string(),
        avatar: Some(DEFAULT_AVATAR.to_string()),
        is_online: true,
        last_seen: None,
    }
}

pub fn contacts(now: DateTime<Utc>) -> Vec<User> {
    vec![
        User {
            id: "2".to_string(),
            username: "alice_johnson".to_string(),
            email: "alice@example.com".to_string(),
            avatar: Some(
                "https://images.pexels.com/photos/415829/pexels-photo-415829.jpeg?auto=compress&cs=tinysrgb&w=150"
                    .to_string(),
            ),
            is_online: true,
            last_seen: None,
        },
        User {
            id: "3".to_string(),
            username: "bob_smith".to_string(),
            email: "bob@example.com".to_string(),
            avatar: Some(
                "https://images.pexels.com/photos/614810/pexels-photo-614810.jpeg?auto=compress&cs=tinysrgb&w=150"
                    .to_string(),
            ),
            is_online: false,
            last_seen: Some(now - Duration::hours(1)),
        },
        User {
            id: "4".to_string(),
            username: "carol_white".to_string(),
            email: "carol@example.com".to_string(),
            avatar: Some(
                "https://images.pexels.com/photos/733872/pexels-photo-733872.jpeg?auto=compress&cs=tinysrgb&w=150"
                    .to_string(),
            ),
            is_online: true,
            last_seen: None,
        },
    ]
}

fn text(
    id: &str,
    conversation_id: &str,
    sender_id: &str,
    content: &str,
    timestamp: DateTime<Utc>,
    is_read: bool,
) -> Message {
    Message {
        id: id.to_string(),
        conversation_id: conversation_id.to_string(),
        sender_id: sender_id.to_string(),
        content: content.to_string(),
        kind: MessageKind::Text,
        timestamp,
        is_read,
    }
}

pub fn conversations(now: DateTime<Utc>) -> Vec<Conversation> {
    let mut contacts = contacts(now).into_iter();
    let (Some(alice), Some(bob), Some(carol)) = (contacts.next(), contacts.next(), contacts.next())
    else {
        return Vec::new();
    };

    let seed = [
        (alice, "1", "Hey! How are you doing?", "2", Duration::minutes(5), false, 2),
        (bob, "2", "Thanks for the help earlier!", "1", Duration::hours(1), true, 0),
        (carol, "3", "See you tomorrow!", "4", Duration::hours(2), false, 1),
    ];

    seed.into_iter()
        .map(|(peer, id, content, sender, age, is_read, unread_count)| {
            let updated_at = now - age;
            Conversation {
                id: id.to_string(),
                participants: vec![peer],
                last_message: Some(text(id, id, sender, content, updated_at, is_read)),
                unread_count,
                updated_at,
                title: None,
                is_group: false,
            }
        })
        .collect()
}

/// Thread history for a seeded conversation; unknown ids have none.
pub fn messages(conversation_id: &str, now: DateTime<Utc>) -> Vec<Message> {
    let ago = |minutes: i64| now - Duration::minutes(minutes);
    match conversation_id {
        "1" => vec![
            text("1", "1", "1", "Hi there! How are you?", ago(60), true),
            text("2", "1", "2", "Hey! I'm doing great, thanks for asking!", ago(55), true),
            text("3", "1", "2", "How about you? How's your day going?", ago(5), false),
        ],
        "2" => vec![
            text("4", "2", "3", "Thanks for helping me with the project!", ago(120), true),
            text("5", "2", "1", "No problem! Happy to help.", ago(60), true),
        ],
        "3" => vec![
            text("6", "3", "1", "Are we still on for tomorrow?", ago(180), true),
            text("7", "3", "4", "Yes! See you at 3 PM.", ago(120), false),
        ],
        _ => Vec::new(),
    }
}

pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let seed = [
        (
            "1",
            NotificationKind::Message,
            "New Message",
            "Alice sent you a message",
            Duration::minutes(5),
            false,
        ),
        (
            "2",
            NotificationKind::System,
            "System Update",
            "Your account has been updated successfully",
            Duration::hours(1),
            false,
        ),
        (
            "3",
            NotificationKind::Message,
            "New Message",
            "Bob replied to your message",
            Duration::hours(2),
            true,
        ),
        (
            "4",
            NotificationKind::Warning,
            "Low Credits",
            "Your credit balance is running low",
            Duration::days(1),
            true,
        ),
    ];

    seed.into_iter()
        .map(|(id, kind, title, message, age, is_read)| Notification {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            timestamp: now - age,
            is_read,
            action_url: None,
        })
        .collect()
}
