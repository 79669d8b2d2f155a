use std::collections::HashMap;

use super::request::RequestState;
use crate::common::{Conversation, ConversationId, ConversationPatch, Message, UserId};
use crate::services::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRequest {
    Conversations,
    Messages,
    Send,
    Create,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRequests {
    pub conversations: RequestState,
    pub messages: RequestState,
    pub send: RequestState,
    pub create: RequestState,
}

impl ChatRequests {
    fn get_mut(&mut self, kind: ChatRequest) -> &mut RequestState {
        match kind {
            ChatRequest::Conversations => &mut self.conversations,
            ChatRequest::Messages => &mut self.messages,
            ChatRequest::Send => &mut self.send,
            ChatRequest::Create => &mut self.create,
        }
    }
}

/// Conversations, their loaded threads, and the current selection.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub conversations: Vec<Conversation>,
    pub active_conversation: Option<ConversationId>,
    pub messages: HashMap<ConversationId, Vec<Message>>,
    pub requests: ChatRequests,
    pub last_error: Option<String>,
    local_user_id: Option<UserId>,
}

impl ChatState {
    /// Set from the auth session; messages from this id never count as
    /// unread.
    pub fn local_user_id(&self) -> Option<&str> {
        self.local_user_id.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.requests.conversations.is_pending() || self.requests.messages.is_pending()
    }

    pub fn conversation(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == conversation_id)
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active_conversation
            .as_deref()
            .and_then(|id| self.conversation(id))
    }

    /// Loaded messages for a conversation; empty when nothing is loaded yet.
    pub fn messages_for(&self, conversation_id: &str) -> &[Message] {
        self.messages
            .get(conversation_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn total_unread(&self) -> u32 {
        self.conversations.iter().map(|c| c.unread_count).sum()
    }

    pub fn set_active(&mut self, conversation_id: Option<ConversationId>) {
        self.active_conversation = conversation_id;
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Appends a message to its thread and refreshes the owning
    /// conversation. Messages from anyone but the local user bump the unread
    /// counter, whatever their own `is_read` flag says.
    pub fn insert_message(&mut self, message: Message) {
        let incoming = self.local_user_id.as_deref() != Some(message.sender_id.as_str());

        if let Some(conversation) = self
            .conversations
            .iter_mut()
            .find(|c| c.id == message.conversation_id)
        {
            conversation.last_message = Some(message.clone());
            conversation.updated_at = message.timestamp;
            if incoming {
                conversation.unread_count += 1;
            }
        }

        self.messages
            .entry(message.conversation_id.clone())
            .or_default()
            .push(message);
    }

    /// Marks every loaded message of the conversation read and zeroes its
    /// counter. Returns how many messages flipped.
    pub fn mark_read(&mut self, conversation_id: &str) -> usize {
        let mut flipped = 0;
        if let Some(messages) = self.messages.get_mut(conversation_id) {
            for message in messages.iter_mut().filter(|m| !m.is_read) {
                message.is_read = true;
                flipped += 1;
            }
        }

        if let Some(conversation) = self
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
        {
            conversation.unread_count = 0;
        }
        flipped
    }

    /// Returns false when no conversation has the patch's id.
    pub fn update_conversation(&mut self, patch: ConversationPatch) -> bool {
        let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == patch.id) else {
            return false;
        };
        if let Some(title) = patch.title {
            conversation.title = Some(title);
        }
        if let Some(participants) = patch.participants {
            conversation.participants = participants;
        }
        if let Some(is_group) = patch.is_group {
            conversation.is_group = is_group;
        }
        true
    }

    pub(crate) fn set_local_user(&mut self, user_id: Option<UserId>) {
        self.local_user_id = user_id;
    }

    pub(crate) fn begin(&mut self, kind: ChatRequest) {
        self.last_error = None;
        self.requests.get_mut(kind).begin();
    }

    pub(crate) fn conversations_loaded(&mut self, result: Result<Vec<Conversation>, ServiceError>) {
        match result {
            Ok(conversations) => {
                self.conversations = conversations;
                self.requests.conversations.fulfil();
            }
            Err(error) => self.fail(ChatRequest::Conversations, error),
        }
    }

    pub(crate) fn messages_loaded(
        &mut self,
        conversation_id: ConversationId,
        result: Result<Vec<Message>, ServiceError>,
    ) {
        match result {
            Ok(messages) => {
                self.messages.insert(conversation_id, messages);
                self.requests.messages.fulfil();
            }
            Err(error) => self.fail(ChatRequest::Messages, error),
        }
    }

    pub(crate) fn message_sent(&mut self, result: Result<Message, ServiceError>) {
        match result {
            Ok(message) => {
                self.insert_message(message);
                self.requests.send.fulfil();
            }
            Err(error) => self.fail(ChatRequest::Send, error),
        }
    }

    pub(crate) fn conversation_created(&mut self, result: Result<Conversation, ServiceError>) {
        match result {
            Ok(conversation) => {
                self.active_conversation = Some(conversation.id.clone());
                self.conversations.insert(0, conversation);
                self.requests.create.fulfil();
            }
            Err(error) => self.fail(ChatRequest::Create, error),
        }
    }

    /// Everything but the local user id, which follows the auth slice.
    pub(crate) fn reset(&mut self) {
        *self = Self {
            local_user_id: self.local_user_id.take(),
            ..Self::default()
        };
    }

    fn fail(&mut self, kind: ChatRequest, error: ServiceError) {
        let message = error.to_string();
        log::warn!("Chat request {kind:?} failed: {message}");
        self.requests.get_mut(kind).reject(message.clone());
        self.last_error = Some(message);
    }
}
