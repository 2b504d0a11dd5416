use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::notification::{Notification, NotificationCategory};

/// Display metadata for a notification category: icon name, accent colour
/// for the icon itself, and the background tint behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub icon: &'static str,
    pub accent: &'static str,
    pub tint: &'static str,
}

impl CategoryStyle {
    pub const FALLBACK: CategoryStyle = CategoryStyle {
        icon: "bell",
        accent: "muted",
        tint: "gray",
    };

    pub fn for_category(category: NotificationCategory) -> Self {
        match category {
            NotificationCategory::Medication => CategoryStyle {
                icon: "pill",
                accent: "primary",
                tint: "primary",
            },
            NotificationCategory::Appointment => CategoryStyle {
                icon: "calendar",
                accent: "blue",
                tint: "blue",
            },
            NotificationCategory::Message => CategoryStyle {
                icon: "message-square",
                accent: "purple",
                tint: "purple",
            },
            NotificationCategory::System => CategoryStyle {
                icon: "clock",
                accent: "amber",
                tint: "amber",
            },
        }
    }

    /// Like [`CategoryStyle::for_category`], for a raw kind name coming from
    /// outside. Unknown kinds get the generic bell.
    pub fn for_kind(kind: &str) -> Self {
        kind.parse::<NotificationCategory>()
            .map(Self::for_category)
            .unwrap_or(Self::FALLBACK)
    }
}

pub fn format_relative(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }
    if hours < 48 {
        return "Yesterday".to_string();
    }

    plural(elapsed.num_days(), "day")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationView {
    pub id: String,
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub time: String,
    pub style: CategoryStyle,
}

pub fn present(notification: &Notification, now: DateTime<Utc>) -> NotificationView {
    NotificationView {
        id: notification.id.clone(),
        title: notification.title.clone(),
        message: notification.message.clone(),
        category: notification.category,
        read: notification.read,
        created_at: notification.created_at,
        time: format_relative(notification.created_at, now),
        style: CategoryStyle::for_category(notification.category),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::usecase::seed::demo_inbox;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_every_category_has_its_own_icon() {
        let icons: Vec<&str> = NotificationCategory::ALL
            .into_iter()
            .map(|c| CategoryStyle::for_category(c).icon)
            .collect();

        assert_eq!(icons, vec!["pill", "calendar", "message-square", "clock"]);
        assert!(!icons.contains(&CategoryStyle::FALLBACK.icon));
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        assert_eq!(CategoryStyle::for_kind("billing"), CategoryStyle::FALLBACK);
        assert_eq!(CategoryStyle::for_kind(""), CategoryStyle::FALLBACK);
        assert_eq!(
            CategoryStyle::for_kind("appointment"),
            CategoryStyle::for_category(NotificationCategory::Appointment)
        );
    }

    #[test]
    fn test_format_relative_boundaries() {
        let now = now();
        let cases = [
            (Duration::seconds(-30), "Just now"),
            (Duration::seconds(59), "Just now"),
            (Duration::minutes(1), "1 minute ago"),
            (Duration::minutes(30), "30 minutes ago"),
            (Duration::minutes(60), "1 hour ago"),
            (Duration::hours(23), "23 hours ago"),
            (Duration::hours(24), "Yesterday"),
            (Duration::hours(47), "Yesterday"),
            (Duration::hours(48), "2 days ago"),
            (Duration::days(9), "9 days ago"),
        ];

        for (age, expected) in cases {
            assert_eq!(format_relative(now - age, now), expected, "age {:?}", age);
        }
    }

    #[test]
    fn test_present_demo_inbox_times() {
        let now = now();
        let times: Vec<String> = demo_inbox(now)
            .iter()
            .map(|n| present(n, now).time)
            .collect();

        assert_eq!(
            times,
            vec!["Just now", "30 minutes ago", "2 hours ago", "Yesterday", "2 days ago"]
        );
    }

    #[test]
    fn test_present_is_deterministic() {
        let now = now();
        let inbox = demo_inbox(now);

        let first = present(&inbox[2], now);
        let second = present(&inbox[2], now);

        assert_eq!(first, second);
        assert_eq!(first.style.icon, "calendar");
        assert_eq!(first.style.tint, "blue");
        assert!(!first.read);
    }

    #[test]
    fn test_view_serialization() {
        let now = now();
        let inbox = demo_inbox(now);
        let view = present(&inbox[0], now);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["category"], "medication");
        assert_eq!(json["time"], "Just now");
        assert_eq!(json["style"]["icon"], "pill");
    }
}
