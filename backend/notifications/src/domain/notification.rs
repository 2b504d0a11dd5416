use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Medication,
    Appointment,
    Message,
    System,
}

impl NotificationCategory {
    pub const ALL: [NotificationCategory; 4] = [
        NotificationCategory::Medication,
        NotificationCategory::Appointment,
        NotificationCategory::Message,
        NotificationCategory::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Medication => "medication",
            NotificationCategory::Appointment => "appointment",
            NotificationCategory::Message => "message",
            NotificationCategory::System => "system",
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notification category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for NotificationCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        category: NotificationCategory,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            message: message.into(),
            category,
            read: false,
            created_at,
        }
    }

    /// Builds an unread notification with a fresh id, stamped with the current time.
    pub fn generate(
        title: impl Into<String>,
        message: impl Into<String>,
        category: NotificationCategory,
    ) -> Self {
        Self::new(Uuid::new_v4().to_string(), title, message, category, Utc::now())
    }

    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_is_unread() {
        let n = Notification::new("1", "Title", "Body", NotificationCategory::System, Utc::now());
        assert!(!n.read);
        assert!(n.is_unread());
        assert_eq!(n.id, "1");
    }

    #[test]
    fn test_generate_assigns_distinct_ids() {
        let a = Notification::generate("a", "a", NotificationCategory::Message);
        let b = Notification::generate("b", "b", NotificationCategory::Message);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_category_parse_and_display() {
        for category in NotificationCategory::ALL {
            let parsed: NotificationCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }

        let err = "billing".parse::<NotificationCategory>().unwrap_err();
        assert_eq!(err, UnknownCategory("billing".to_string()));
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&NotificationCategory::Appointment).unwrap();
        assert_eq!(json, "\"appointment\"");
    }
}
