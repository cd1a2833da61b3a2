use eventura_domain::ID;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ReminderPathParams {
    pub event_id: ID,
    pub user_id: String,
}

pub mod toggle_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub success: bool,
        pub is_applied: bool,
        pub message: String,
    }

    impl APIResponse {
        pub fn new(is_applied: bool) -> Self {
            let message = if is_applied {
                "Reminder set! You'll receive email reminders before the event."
            } else {
                "Reminder removed."
            };
            Self {
                success: true,
                is_applied,
                message: message.into(),
            }
        }
    }
}

pub mod send_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
    }
}
