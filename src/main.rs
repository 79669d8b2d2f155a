use std::error::Error;

use chat_client::common::input::prepare_message;
use chat_client::common::{Conversation, LoginCredentials, Message, Notification};
use chat_client::config::{self, LatencyConfig};
use chat_client::{Services, Store};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(
    name = "chat-client",
    version,
    about = "Chat client backed by mocked services"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(
        long,
        env = "CHAT_CLIENT_CONFIG",
        default_value = config::DEFAULT_CONFIG_PATH,
        value_name = "FILE"
    )]
    config: String,
    /// Used when no stored session can be restored
    #[arg(long, default_value = "demo")]
    username: String,
    #[arg(long, default_value = "password")]
    password: String,
    /// Settle every mocked call immediately
    #[arg(long)]
    no_latency: bool,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone)]
enum Mode {
    /// List conversations (default)
    Conversations,
    /// Show a conversation's thread and mark it read
    Messages { conversation_id: String },
    /// Send a message to a conversation
    Send {
        conversation_id: String,
        text: String,
    },
    /// Show notifications and mark them all read
    Notifications,
    /// End the stored session
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if cli.no_latency {
        app_config.latency = LatencyConfig::instant();
    }

    let mut store = Store::spawn(Services::mock(&app_config.latency), &app_config);

    if store.bootstrap() {
        store.settle_all().await;
    }
    if !store.auth().is_authenticated {
        store.login(LoginCredentials {
            username: cli.username.clone(),
            password: cli.password.clone(),
        });
        store.settle_all().await;
    }
    if let Some(error) = &store.auth().last_error {
        if !store.auth().is_authenticated {
            return Err(format!("Login failed: {error}").into());
        }
    }
    if let Some(user) = &store.auth().user {
        log::info!("Client ready for {} ({})", user.username, user.id);
    }

    match cli.mode.unwrap_or(Mode::Conversations) {
        Mode::Conversations => {
            store.fetch_conversations();
            store.settle_all().await;
            fail_on(store.chat().last_error.as_deref())?;
            for conversation in &store.chat().conversations {
                print_conversation(conversation);
            }
            println!("{} unread in total", store.chat().total_unread());
        }
        Mode::Messages { conversation_id } => {
            store.fetch_conversations();
            store.fetch_messages(conversation_id.clone());
            store.settle_all().await;
            fail_on(store.chat().last_error.as_deref())?;

            store.set_active(Some(conversation_id.clone()));
            let local_user = store.chat().local_user_id().map(str::to_string);
            for message in store.chat().messages_for(&conversation_id) {
                print_message(message, local_user.as_deref());
            }
            let flipped = store.mark_read(&conversation_id);
            println!("Marked {flipped} message(s) read");
        }
        Mode::Send {
            conversation_id,
            text,
        } => {
            let Some(content) = prepare_message(&text) else {
                return Err("Message is empty or too long".into());
            };
            store.fetch_conversations();
            store.settle_all().await;
            store.send_message(conversation_id.clone(), content);
            store.settle_all().await;
            fail_on(store.chat().last_error.as_deref())?;

            if let Some(conversation) = store.chat().conversation(&conversation_id) {
                print_conversation(conversation);
            }
        }
        Mode::Notifications => {
            store.fetch_notifications();
            store.settle_all().await;
            fail_on(store.notifications().last_error.as_deref())?;
            for notification in &store.notifications().notifications {
                print_notification(notification);
            }
            store.mark_all_notifications_read();
            store.settle_all().await;
            println!("{} unread", store.notifications().unread_count);
        }
        Mode::Logout => {
            store.logout();
            store.settle_all().await;
            fail_on(store.auth().last_error.as_deref())?;
            println!("Signed out");
        }
    }

    Ok(())
}

fn fail_on(error: Option<&str>) -> Result<(), Box<dyn Error>> {
    match error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

fn print_conversation(conversation: &Conversation) {
    let preview = conversation
        .last_message
        .as_ref()
        .map(|message| message.content.as_str())
        .unwrap_or("(no messages)");
    println!(
        "[{}] {} ({} unread, {}) {}",
        conversation.id,
        conversation.display_name(),
        conversation.unread_count,
        conversation.updated_at.format("%H:%M"),
        preview
    );
}

fn print_message(message: &Message, local_user: Option<&str>) {
    let author = if Some(message.sender_id.as_str()) == local_user {
        "you".to_string()
    } else {
        message.sender_id.clone()
    };
    let marker = if message.is_read { ' ' } else { '*' };
    println!(
        "{marker} {} {author}: {}",
        message.timestamp.format("%H:%M"),
        message.content
    );
}

fn print_notification(notification: &Notification) {
    let marker = if notification.is_read { ' ' } else { '*' };
    println!(
        "{marker} [{:?}] {}: {} ({})",
        notification.kind,
        notification.title,
        notification.message,
        notification.timestamp.format("%Y-%m-%d %H:%M")
    );
}
