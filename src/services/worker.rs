use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;

use super::Services;
use crate::common::{ServiceCommand, ServiceEvent};

/// Background task that turns store commands into service calls.
///
/// Calls run concurrently; each one reports back as soon as it settles, so
/// two racing requests for the same data arrive in completion order.
pub struct ServiceWorker {
    services: Services,
    event_sender: mpsc::Sender<ServiceEvent>,
    command_receiver: mpsc::Receiver<ServiceCommand>,
}

impl ServiceWorker {
    pub fn new(
        services: Services,
        event_sender: mpsc::Sender<ServiceEvent>,
        command_receiver: mpsc::Receiver<ServiceCommand>,
    ) -> Self {
        Self {
            services,
            event_sender,
            command_receiver,
        }
    }

    pub async fn run(mut self) {
        let mut in_flight: FuturesUnordered<BoxFuture<'static, ServiceEvent>> =
            FuturesUnordered::new();
        log::info!("Service worker started");

        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    if let Some(command) = command {
                        log::debug!("Dispatching {command:?}");
                        in_flight.push(execute(self.services.clone(), command).boxed());
                    } else {
                        break;
                    }
                }
                Some(event) = in_flight.next(), if !in_flight.is_empty() => {
                    if !self.report(event).await {
                        return;
                    }
                }
            }
        }

        // Store hung up; let outstanding calls settle before exiting.
        while let Some(event) = in_flight.next().await {
            if !self.report(event).await {
                return;
            }
        }
        log::info!("Service worker stopped");
    }

    async fn report(&self, event: ServiceEvent) -> bool {
        if let Err(err) = self.event_sender.send(event).await {
            log::warn!("Store is gone, dropping settlement: {err:?}");
            return false;
        }
        true
    }
}

async fn execute(services: Services, command: ServiceCommand) -> ServiceEvent {
    match command {
        ServiceCommand::Login(credentials) => ServiceEvent::LoggedIn(
            services.auth.login(credentials).await.into_result("Login failed"),
        ),
        ServiceCommand::Signup(credentials) => ServiceEvent::SignedUp(
            services.auth.signup(credentials).await.into_result("Signup failed"),
        ),
        ServiceCommand::Logout => {
            ServiceEvent::LoggedOut(services.auth.logout().await.into_ack("Logout failed"))
        }
        ServiceCommand::VerifyToken(token) => {
            let result = services
                .auth
                .verify_token(token.clone())
                .await
                .into_result("Token verification failed");
            ServiceEvent::TokenVerified { token, result }
        }
        ServiceCommand::FetchConversations => ServiceEvent::ConversationsLoaded(
            services
                .chat
                .get_conversations()
                .await
                .into_result("Failed to fetch conversations"),
        ),
        ServiceCommand::FetchMessages(conversation_id) => {
            let result = services
                .chat
                .get_messages(conversation_id.clone())
                .await
                .into_result("Failed to fetch messages");
            ServiceEvent::MessagesLoaded {
                conversation_id,
                result,
            }
        }
        ServiceCommand::SendMessage {
            conversation_id,
            content,
        } => ServiceEvent::MessageSent(
            services
                .chat
                .send_message(conversation_id, content)
                .await
                .into_result("Failed to send message"),
        ),
        ServiceCommand::CreateConversation(participant_ids) => ServiceEvent::ConversationCreated(
            services
                .chat
                .create_conversation(participant_ids)
                .await
                .into_result("Failed to create conversation"),
        ),
        ServiceCommand::FetchNotifications => ServiceEvent::NotificationsLoaded(
            services
                .notifications
                .get_notifications()
                .await
                .into_result("Failed to fetch notifications"),
        ),
        ServiceCommand::MarkNotificationRead(notification_id) => {
            let result = services
                .notifications
                .mark_as_read(notification_id.clone())
                .await
                .into_ack("Failed to mark notification as read");
            ServiceEvent::NotificationRead {
                notification_id,
                result,
            }
        }
        ServiceCommand::MarkAllNotificationsRead => ServiceEvent::AllNotificationsRead(
            services
                .notifications
                .mark_all_as_read()
                .await
                .into_ack("Failed to mark all notifications as read"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::LoginCredentials;
    use crate::config::LatencyConfig;

    fn spawn_worker(
        latency: LatencyConfig,
    ) -> (mpsc::Sender<ServiceCommand>, mpsc::Receiver<ServiceEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        let worker = ServiceWorker::new(Services::mock(&latency), event_tx, cmd_rx);
        tokio::spawn(worker.run());
        (cmd_tx, event_rx)
    }

    #[tokio::test]
    async fn failed_login_reports_rejection() {
        let (cmd_tx, mut event_rx) = spawn_worker(LatencyConfig::instant());
        cmd_tx
            .send(ServiceCommand::Login(LoginCredentials {
                username: "demo".into(),
                password: "wrong".into(),
            }))
            .await
            .unwrap();

        match event_rx.recv().await {
            Some(ServiceEvent::LoggedIn(Err(err))) => {
                assert_eq!(err.to_string(), "Invalid username or password");
            }
            other => panic!("unexpected settlement: {other:?}"),
        }
    }

    #[tokio::test]
    async fn faster_call_settles_first() {
        let mut latency = LatencyConfig::instant();
        latency.conversations_ms = 200;
        let (cmd_tx, mut event_rx) = spawn_worker(latency);

        cmd_tx.send(ServiceCommand::FetchConversations).await.unwrap();
        cmd_tx
            .send(ServiceCommand::FetchMessages("1".into()))
            .await
            .unwrap();

        assert!(matches!(
            event_rx.recv().await,
            Some(ServiceEvent::MessagesLoaded { .. })
        ));
        assert!(matches!(
            event_rx.recv().await,
            Some(ServiceEvent::ConversationsLoaded(Ok(_)))
        ));
    }

    #[tokio::test]
    async fn drains_in_flight_calls_after_hangup() {
        let mut latency = LatencyConfig::instant();
        latency.notifications_ms = 50;
        let (cmd_tx, mut event_rx) = spawn_worker(latency);

        cmd_tx.send(ServiceCommand::FetchNotifications).await.unwrap();
        drop(cmd_tx);

        assert!(matches!(
            event_rx.recv().await,
            Some(ServiceEvent::NotificationsLoaded(Ok(_)))
        ));
        assert!(event_rx.recv().await.is_none());
    }
}
