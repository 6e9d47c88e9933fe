//! Dismissible, self-expiring error notices.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::view::UploadView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: NoticeId,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Shows notices through the view and takes them down again after `ttl`.
#[derive(Clone)]
pub struct Notifier {
    view: Arc<dyn UploadView>,
    ttl: Duration,
    next_id: Arc<AtomicU64>,
    attached: Arc<Mutex<HashSet<NoticeId>>>,
}

impl Notifier {
    pub fn new(view: Arc<dyn UploadView>, ttl: Duration) -> Self {
        Self {
            view,
            ttl,
            next_id: Arc::new(AtomicU64::new(1)),
            attached: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Displays `message` and schedules its removal. Must be called within a tokio runtime.
    pub fn show(&self, message: impl Into<String>) -> NoticeId {
        let notice = Notice {
            id: NoticeId(self.next_id.fetch_add(1, Ordering::Relaxed)),
            message: message.into(),
            created_at: Utc::now(),
        };
        let id = notice.id;
        self.attached.lock().insert(id);
        self.view.show_notice(&notice);

        let notifier = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(notifier.ttl).await;
            if notifier.detach(id) {
                debug!(notice = id.0, "notice expired");
            }
        });
        id
    }

    /// Removes the notice ahead of its timer. Returns false if it was already gone.
    pub fn dismiss(&self, id: NoticeId) -> bool {
        self.detach(id)
    }

    pub fn is_attached(&self, id: NoticeId) -> bool {
        self.attached.lock().contains(&id)
    }

    fn detach(&self, id: NoticeId) -> bool {
        if !self.attached.lock().remove(&id) {
            return false;
        }
        self.view.remove_notice(id);
        true
    }
}
