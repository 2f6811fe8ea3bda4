/// Identifies a live notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Persistent, at most one live at a time
    Connection,
    /// Transient, may stack
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
}

/// Live notifications in display order
#[derive(Debug, Default)]
pub struct Notifications {
    next_id: u64,
    live: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NotificationKind, message: String) -> Notification {
        self.next_id += 1;
        let notification = Notification {
            id: NotificationId(self.next_id),
            kind,
            message,
        };
        self.live.push(notification.clone());
        notification
    }

    /// Add a transient error
    pub fn error(&mut self, message: impl Into<String>) -> Notification {
        self.push(NotificationKind::Error, message.into())
    }

    /// Add the connection error unless one is already showing
    pub fn connection_error(&mut self, message: impl Into<String>) -> Option<Notification> {
        if self.connection_error_id().is_some() {
            return None;
        }
        Some(self.push(NotificationKind::Connection, message.into()))
    }

    pub fn connection_error_id(&self) -> Option<NotificationId> {
        self.live
            .iter()
            .find(|n| n.kind == NotificationKind::Connection)
            .map(|n| n.id)
    }

    /// Remove a notification; false when it was already gone
    pub fn remove(&mut self, id: NotificationId) -> bool {
        let before = self.live.len();
        self.live.retain(|n| n.id != id);
        self.live.len() != before
    }

    pub fn live(&self) -> &[Notification] {
        &self.live
    }
}
