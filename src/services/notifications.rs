use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use super::NotificationService;
use super::seed;
use crate::common::{Envelope, Notification, NotificationId};
use crate::config::{LatencyConfig, millis};

pub struct MockNotificationService {
    list_delay: Duration,
    mark_delay: Duration,
    mark_all_delay: Duration,
}

impl MockNotificationService {
    pub fn new(latency: &LatencyConfig) -> Self {
        Self {
            list_delay: millis(latency.notifications_ms),
            mark_delay: millis(latency.mark_read_ms),
            mark_all_delay: millis(latency.mark_all_read_ms),
        }
    }
}

#[async_trait]
impl NotificationService for MockNotificationService {
    async fn get_notifications(&self) -> Envelope<Vec<Notification>> {
        tokio::time::sleep(self.list_delay).await;
        Envelope::ok(seed::notifications(Utc::now()))
    }

    async fn mark_as_read(&self, notification_id: NotificationId) -> Envelope<()> {
        tokio::time::sleep(self.mark_delay).await;
        log::debug!("Notification {notification_id} acknowledged");
        Envelope::ok(())
    }

    async fn mark_all_as_read(&self) -> Envelope<()> {
        tokio::time::sleep(self.mark_all_delay).await;
        Envelope::ok(())
    }
}
