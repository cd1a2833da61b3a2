use serde::{Deserialize, Serialize};

pub mod transition_past_events {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        /// Number of events that were moved from upcoming to past
        pub transitioned: usize,
    }
}

pub mod send_upcoming_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        /// Number of reminders that were delivered and recorded
        pub sent: usize,
    }

    impl APIResponse {
        pub fn new(candidates: usize, sent: usize) -> Self {
            let message = if candidates == 0 {
                "No pending reminders.".to_string()
            } else {
                format!("Sent {} deadline reminder(s).", sent)
            };
            Self {
                success: true,
                message,
                sent,
            }
        }
    }
}
