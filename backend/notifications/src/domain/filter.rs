use std::str::FromStr;

use crate::domain::notification::{Notification, NotificationCategory};

/// Restricts a listing by category and/or read state. `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    pub category: Option<NotificationCategory>,
    pub read: Option<bool>,
}

impl NotificationFilter {
    pub fn unread() -> Self {
        Self { category: None, read: Some(false) }
    }

    pub fn with_category(mut self, category: NotificationCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matches(&self, notification: &Notification) -> bool {
        self.category.is_none_or(|c| c == notification.category)
            && self.read.is_none_or(|r| r == notification.read)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListOrder {
    #[default]
    Insertion,
    NewestFirst,
}

impl FromStr for ListOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insertion" => Ok(ListOrder::Insertion),
            "newest" | "newest_first" => Ok(ListOrder::NewestFirst),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}
