use chrono::{DateTime, Duration, Utc};

use crate::domain::notification::{Notification, NotificationCategory};

/// The patient demo inbox shown by the portal before any live feed is wired in.
pub fn demo_inbox(now: DateTime<Utc>) -> Vec<Notification> {
    let entry = |id: &str, title: &str, message: &str, category, age: Duration, read: bool| {
        let mut notification = Notification::new(id, title, message, category, now - age);
        notification.read = read;
        notification
    };

    vec![
        entry(
            "1",
            "Medication Reminder",
            "Time to take your Metformin (500mg)",
            NotificationCategory::Medication,
            Duration::zero(),
            false,
        ),
        entry(
            "2",
            "Dosage Adjustment",
            "Your doctor has approved a new Lisinopril dosage (20mg)",
            NotificationCategory::Medication,
            Duration::minutes(30),
            false,
        ),
        entry(
            "3",
            "Upcoming Appointment",
            "Reminder: Dr. Johnson tomorrow at 10:00 AM",
            NotificationCategory::Appointment,
            Duration::hours(2),
            false,
        ),
        entry(
            "4",
            "New Message",
            "Dr. Smith: How are you feeling with the new medication?",
            NotificationCategory::Message,
            Duration::days(1),
            true,
        ),
        entry(
            "5",
            "AI Recommendation",
            "Based on your recent data, we suggest adjusting your insulin timing",
            NotificationCategory::System,
            Duration::days(2),
            true,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::NotificationStore;
    use crate::usecase::contracts::NotificationRepository;

    #[test]
    fn test_demo_inbox_seeds_cleanly() {
        let store = NotificationStore::seeded(demo_inbox(Utc::now())).unwrap();

        assert_eq!(store.len(), 5);
        assert_eq!(store.unread_count(), 3);
    }

    #[test]
    fn test_demo_inbox_is_newest_first() {
        let inbox = demo_inbox(Utc::now());
        assert!(inbox.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }
}
