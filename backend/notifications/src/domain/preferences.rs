use serde::{Deserialize, Serialize};

use crate::domain::notification::NotificationCategory;

/// Patient notification settings. The master switch mutes everything; the
/// per-category toggles apply only while it is on. Channel flags are kept for
/// the delivery side and do not affect what enters the inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPreferences {
    pub enabled: bool,
    pub email: bool,
    pub push: bool,
    pub sms: bool,
    pub medication: bool,
    pub appointment: bool,
    pub message: bool,
    pub system: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            email: true,
            push: true,
            sms: false,
            medication: true,
            appointment: true,
            message: true,
            system: true,
        }
    }
}

impl NotificationPreferences {
    pub fn allows(&self, category: NotificationCategory) -> bool {
        self.enabled
            && match category {
                NotificationCategory::Medication => self.medication,
                NotificationCategory::Appointment => self.appointment,
                NotificationCategory::Message => self.message,
                NotificationCategory::System => self.system,
            }
    }
}
