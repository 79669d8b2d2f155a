//! Client-side state container.
//!
//! DESIGN
//! ======
//! State is split into slices (`auth`, `chat`, `notifications`, `ui`). The
//! [`Store`] is the only thing that mutates them: intents mark a request
//! pending and hand a [`ServiceCommand`] to the service worker; settlements
//! come back as [`ServiceEvent`]s and are applied one at a time. Views read
//! slices through shared references between applications.

pub mod auth;
pub mod chat;
pub mod notifications;
pub mod request;
pub mod session;
pub mod ui;

use tokio::sync::mpsc;

use crate::common::{
    ConversationId, ConversationPatch, LoginCredentials, Message, Notification, NotificationId,
    ServiceCommand, ServiceEvent, SignupCredentials, UserId,
};
use crate::config::AppConfig;
use crate::services::{ServiceError, ServiceWorker, Services};

pub use auth::AuthState;
pub use chat::{ChatRequest, ChatState};
pub use notifications::{NotificationRequest, NotificationState};
pub use request::RequestState;
pub use session::SessionStore;
pub use ui::{Theme, UiState};

pub struct Store {
    auth: AuthState,
    chat: ChatState,
    notifications: NotificationState,
    ui: UiState,
    session: SessionStore,
    command_sender: mpsc::Sender<ServiceCommand>,
    event_receiver: mpsc::Receiver<ServiceEvent>,
    in_flight: usize,
}

impl Store {
    /// Wires a store to an already running worker.
    pub fn new(
        command_sender: mpsc::Sender<ServiceCommand>,
        event_receiver: mpsc::Receiver<ServiceEvent>,
        session: SessionStore,
        ui: UiState,
    ) -> Self {
        Self {
            auth: AuthState::with_token(session.load()),
            chat: ChatState::default(),
            notifications: NotificationState::default(),
            ui,
            session,
            command_sender,
            event_receiver,
            in_flight: 0,
        }
    }

    /// Creates the channels and spawns a [`ServiceWorker`] on the current
    /// tokio runtime.
    pub fn spawn(services: Services, config: &AppConfig) -> Self {
        let capacity = config.channel_capacity.max(1);
        // Store -> Worker
        let (cmd_tx, cmd_rx) = mpsc::channel(capacity);
        // Worker -> Store
        let (event_tx, event_rx) = mpsc::channel(capacity);

        tokio::spawn(ServiceWorker::new(services, event_tx, cmd_rx).run());

        let session = match &config.session_file {
            Some(path) => SessionStore::new(Some(path.as_str())),
            None => SessionStore::in_memory(),
        };
        Self::new(cmd_tx, event_rx, session, UiState::from_config(&config.ui))
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn chat(&self) -> &ChatState {
        &self.chat
    }

    pub fn notifications(&self) -> &NotificationState {
        &self.notifications
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// No request is waiting for a settlement.
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    /// Startup rule: a restored token that is not yet trusted gets verified.
    /// Returns whether a verification was dispatched.
    pub fn bootstrap(&mut self) -> bool {
        if !self.auth.needs_verification() {
            return false;
        }
        self.verify_token()
    }

    // ========== Auth ==========

    pub fn login(&mut self, credentials: LoginCredentials) {
        self.auth.begin();
        self.dispatch(ServiceCommand::Login(credentials));
    }

    pub fn signup(&mut self, credentials: SignupCredentials) {
        self.auth.begin();
        self.dispatch(ServiceCommand::Signup(credentials));
    }

    /// Checks the current token. Returns false when there is none.
    pub fn verify_token(&mut self) -> bool {
        let Some(token) = self.auth.token.clone() else {
            return false;
        };
        self.auth.begin();
        self.dispatch(ServiceCommand::VerifyToken(token));
        true
    }

    pub fn logout(&mut self) {
        self.auth.begin();
        self.dispatch(ServiceCommand::Logout);
    }

    pub fn clear_auth_error(&mut self) {
        self.auth.clear_error();
    }

    // ========== Chat ==========

    pub fn fetch_conversations(&mut self) {
        self.chat.begin(ChatRequest::Conversations);
        self.dispatch(ServiceCommand::FetchConversations);
    }

    pub fn fetch_messages(&mut self, conversation_id: impl Into<ConversationId>) {
        self.chat.begin(ChatRequest::Messages);
        self.dispatch(ServiceCommand::FetchMessages(conversation_id.into()));
    }

    /// `content` must already be trimmed and non-empty; see
    /// [`crate::common::input::prepare_message`].
    pub fn send_message(&mut self, conversation_id: impl Into<ConversationId>, content: String) {
        self.chat.begin(ChatRequest::Send);
        self.dispatch(ServiceCommand::SendMessage {
            conversation_id: conversation_id.into(),
            content,
        });
    }

    pub fn create_conversation(&mut self, participant_ids: Vec<UserId>) {
        self.chat.begin(ChatRequest::Create);
        self.dispatch(ServiceCommand::CreateConversation(participant_ids));
    }

    /// Local only; loaded messages are flipped and the counter zeroed.
    pub fn mark_read(&mut self, conversation_id: &str) -> usize {
        self.chat.mark_read(conversation_id)
    }

    pub fn set_active(&mut self, conversation_id: Option<ConversationId>) {
        self.chat.set_active(conversation_id);
    }

    /// Entry point for messages pushed by the backend rather than fetched.
    pub fn receive_message(&mut self, message: Message) {
        self.chat.insert_message(message);
    }

    pub fn update_conversation(&mut self, patch: ConversationPatch) -> bool {
        self.chat.update_conversation(patch)
    }

    pub fn clear_chat_error(&mut self) {
        self.chat.clear_error();
    }

    // ========== Notifications ==========

    pub fn fetch_notifications(&mut self) {
        self.notifications.begin(NotificationRequest::List);
        self.dispatch(ServiceCommand::FetchNotifications);
    }

    pub fn mark_notification_read(&mut self, notification_id: impl Into<NotificationId>) {
        self.notifications.begin(NotificationRequest::MarkOne);
        self.dispatch(ServiceCommand::MarkNotificationRead(notification_id.into()));
    }

    pub fn mark_all_notifications_read(&mut self) {
        self.notifications.begin(NotificationRequest::MarkAll);
        self.dispatch(ServiceCommand::MarkAllNotificationsRead);
    }

    pub fn toggle_notification_panel(&mut self) {
        self.notifications.toggle_panel();
    }

    pub fn close_notification_panel(&mut self) {
        self.notifications.close_panel();
    }

    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.add(notification);
    }

    pub fn remove_notification(&mut self, notification_id: &str) -> Option<Notification> {
        self.notifications.remove(notification_id)
    }

    // ========== UI ==========

    pub fn set_credits(&mut self, credits: i64) {
        self.ui.set_credits(credits);
    }

    pub fn adjust_credits(&mut self, delta: i64) {
        self.ui.adjust_credits(delta);
    }

    pub fn toggle_theme(&mut self) {
        self.ui.toggle_theme();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.ui.set_theme(theme);
    }

    pub fn toggle_sidebar(&mut self) {
        self.ui.toggle_sidebar();
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.ui.set_sidebar_collapsed(collapsed);
    }

    // ========== Settlements ==========

    /// Applies every settlement that has already arrived without waiting.
    /// Returns how many were applied.
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_receiver.try_recv() {
            self.settle(event);
            applied += 1;
        }
        applied
    }

    /// Waits for the next settlement and applies it. Returns false when
    /// nothing is in flight or the worker has stopped.
    pub async fn next_settlement(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.event_receiver.recv().await {
            Some(event) => {
                self.settle(event);
                true
            }
            None => {
                log::warn!("Service worker stopped with {} requests in flight", self.in_flight);
                self.in_flight = 0;
                false
            }
        }
    }

    /// Waits until every dispatched request has settled.
    pub async fn settle_all(&mut self) {
        while self.next_settlement().await {}
    }

    fn dispatch(&mut self, command: ServiceCommand) {
        match self.command_sender.try_send(command) {
            Ok(()) => self.in_flight += 1,
            Err(err) => {
                log::warn!("Failed to send command to service worker: {err}");
                let reason = match &err {
                    mpsc::error::TrySendError::Full(_) => "Too many requests in flight",
                    mpsc::error::TrySendError::Closed(_) => "Service unavailable",
                };
                let command = err.into_inner();
                self.apply(command.reject(ServiceError::Unavailable(reason.to_string())));
            }
        }
    }

    fn settle(&mut self, event: ServiceEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.apply(event);
    }

    fn apply(&mut self, event: ServiceEvent) {
        match event {
            ServiceEvent::LoggedIn(result) | ServiceEvent::SignedUp(result) => match result {
                Ok(session) => {
                    log::info!("Signed in as {}", session.user.username);
                    if let Err(err) = self.session.save(&session.token) {
                        log::warn!("Failed to persist session: {err}");
                    }
                    self.chat.set_local_user(Some(session.user.id.clone()));
                    self.auth.authenticated(session);
                }
                Err(error) => {
                    log::warn!("Authentication failed: {error}");
                    self.auth.rejected(error);
                }
            },
            // A newer login or logout has replaced the token that was checked.
            ServiceEvent::TokenVerified { token, .. }
                if self.auth.token.as_deref() != Some(token.as_str()) =>
            {
                log::debug!("Ignoring verification of a replaced token");
            }
            ServiceEvent::TokenVerified { result, .. } => match result {
                Ok(user) => {
                    log::info!("Restored session for {}", user.username);
                    self.chat.set_local_user(Some(user.id.clone()));
                    self.auth.verified(user);
                }
                Err(error) => {
                    log::warn!("Stored session rejected: {error}");
                    self.forget_session();
                    self.chat.set_local_user(None);
                    self.auth.token_rejected(error);
                }
            },
            ServiceEvent::LoggedOut(result) => match result {
                Ok(()) => {
                    log::info!("Signed out");
                    self.forget_session();
                    self.auth.signed_out();
                    self.chat.set_local_user(None);
                    self.chat.reset();
                    self.notifications.reset();
                }
                Err(error) => self.auth.rejected(error),
            },
            ServiceEvent::ConversationsLoaded(result) => self.chat.conversations_loaded(result),
            ServiceEvent::MessagesLoaded {
                conversation_id,
                result,
            } => self.chat.messages_loaded(conversation_id, result),
            ServiceEvent::MessageSent(result) => self.chat.message_sent(result),
            ServiceEvent::ConversationCreated(result) => self.chat.conversation_created(result),
            ServiceEvent::NotificationsLoaded(result) => self.notifications.loaded(result),
            ServiceEvent::NotificationRead {
                notification_id,
                result,
            } => self.notifications.marked_read(notification_id, result),
            ServiceEvent::AllNotificationsRead(result) => {
                self.notifications.all_marked_read(result)
            }
        }
    }

    fn forget_session(&self) {
        if let Err(err) = self.session.clear() {
            log::warn!("Failed to remove session file: {err}");
        }
    }
}
