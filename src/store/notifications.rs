use super::request::RequestState;
use crate::common::{Notification, NotificationId};
use crate::services::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationRequest {
    List,
    MarkOne,
    MarkAll,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationRequests {
    pub list: RequestState,
    pub mark_one: RequestState,
    pub mark_all: RequestState,
}

/// The notification panel. `unread_count` never goes below zero.
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    pub notifications: Vec<Notification>,
    pub unread_count: u32,
    pub is_open: bool,
    pub requests: NotificationRequests,
    pub last_error: Option<String>,
}

impl NotificationState {
    pub fn toggle_panel(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn close_panel(&mut self) {
        self.is_open = false;
    }

    /// Newest first.
    pub fn add(&mut self, notification: Notification) {
        if !notification.is_read {
            self.unread_count += 1;
        }
        self.notifications.insert(0, notification);
    }

    pub fn remove(&mut self, notification_id: &str) -> Option<Notification> {
        let index = self
            .notifications
            .iter()
            .position(|n| n.id == notification_id)?;
        let removed = self.notifications.remove(index);
        if !removed.is_read {
            self.unread_count = self.unread_count.saturating_sub(1);
        }
        Some(removed)
    }

    pub(crate) fn begin(&mut self, kind: NotificationRequest) {
        self.last_error = None;
        self.request_mut(kind).begin();
    }

    pub(crate) fn loaded(&mut self, result: Result<Vec<Notification>, ServiceError>) {
        match result {
            Ok(notifications) => {
                self.unread_count = notifications.iter().filter(|n| !n.is_read).count() as u32;
                self.notifications = notifications;
                self.requests.list.fulfil();
            }
            Err(error) => self.fail(NotificationRequest::List, error),
        }
    }

    pub(crate) fn marked_read(
        &mut self,
        notification_id: NotificationId,
        result: Result<(), ServiceError>,
    ) {
        if let Err(error) = result {
            self.fail(NotificationRequest::MarkOne, error);
            return;
        }
        if let Some(notification) = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id && !n.is_read)
        {
            notification.is_read = true;
            self.unread_count = self.unread_count.saturating_sub(1);
        }
        self.requests.mark_one.fulfil();
    }

    pub(crate) fn all_marked_read(&mut self, result: Result<(), ServiceError>) {
        if let Err(error) = result {
            self.fail(NotificationRequest::MarkAll, error);
            return;
        }
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
        self.unread_count = 0;
        self.requests.mark_all.fulfil();
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    fn request_mut(&mut self, kind: NotificationRequest) -> &mut RequestState {
        match kind {
            NotificationRequest::List => &mut self.requests.list,
            NotificationRequest::MarkOne => &mut self.requests.mark_one,
            NotificationRequest::MarkAll => &mut self.requests.mark_all,
        }
    }

    fn fail(&mut self, kind: NotificationRequest, error: ServiceError) {
        let message = error.to_string();
        log::warn!("Notification request {kind:?} failed: {message}");
        self.request_mut(kind).reject(message.clone());
        self.last_error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::common::NotificationKind;
    use crate::services::seed;

    fn loaded() -> NotificationState {
        let mut state = NotificationState::default();
        state.loaded(Ok(seed::notifications(Utc::now())));
        state
    }

    fn unread(id: &str) -> Notification {
        Notification {
            id: id.into(),
            kind: NotificationKind::System,
            title: "Heads up".into(),
            message: "Something happened".into(),
            timestamp: Utc::now(),
            is_read: false,
            action_url: None,
        }
    }

    #[test]
    fn load_recomputes_unread_count() {
        let mut state = NotificationState::default();
        state.unread_count = 40;
        state.loaded(Ok(seed::notifications(Utc::now())));
        assert_eq!(state.unread_count, 2);
        assert_eq!(state.notifications.len(), 4);
    }

    #[test]
    fn marking_one_read_decrements_once() {
        let mut state = loaded();
        state.marked_read("1".into(), Ok(()));
        assert_eq!(state.unread_count, 1);

        state.marked_read("1".into(), Ok(()));
        assert_eq!(state.unread_count, 1);

        state.marked_read("3".into(), Ok(()));
        assert_eq!(state.unread_count, 1);
    }

    #[test]
    fn mark_all_then_one_stays_at_zero() {
        let mut state = loaded();
        state.all_marked_read(Ok(()));
        assert_eq!(state.unread_count, 0);
        assert!(state.notifications.iter().all(|n| n.is_read));

        for id in ["1", "2", "3", "4", "unknown"] {
            state.marked_read(id.into(), Ok(()));
        }
        assert_eq!(state.unread_count, 0);
    }

    #[test]
    fn failed_mark_leaves_flags_alone() {
        let mut state = loaded();
        state.begin(NotificationRequest::MarkOne);
        state.marked_read(
            "1".into(),
            Err(ServiceError::Rejected("Failed to mark notification as read".into())),
        );
        assert_eq!(state.unread_count, 2);
        assert!(!state.notifications[0].is_read);
        assert_eq!(
            state.last_error.as_deref(),
            Some("Failed to mark notification as read")
        );
    }

    #[test]
    fn add_prepends_and_counts_unread() {
        let mut state = loaded();
        state.add(unread("5"));
        assert_eq!(state.notifications[0].id, "5");
        assert_eq!(state.unread_count, 3);
    }

    #[test]
    fn remove_only_decrements_for_unread() {
        let mut state = loaded();
        assert!(state.remove("3").is_some());
        assert_eq!(state.unread_count, 2);
        assert!(state.remove("2").is_some());
        assert_eq!(state.unread_count, 1);
        assert!(state.remove("2").is_none());
    }

    #[test]
    fn panel_visibility() {
        let mut state = NotificationState::default();
        state.toggle_panel();
        assert!(state.is_open);
        state.toggle_panel();
        assert!(!state.is_open);
        state.toggle_panel();
        state.close_panel();
        assert!(!state.is_open);
    }
}
