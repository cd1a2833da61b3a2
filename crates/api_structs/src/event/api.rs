use crate::dtos::EventDTO;
use eventura_domain::{Event, EventCategory, EventStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct EventResponse {
    pub event: EventDTO,
}

impl EventResponse {
    pub fn new(event: Event) -> Self {
        Self {
            event: EventDTO::new(event),
        }
    }
}

pub mod create_event {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        pub title: String,
        pub event_date: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub event_time: Option<String>,
        #[serde(default)]
        pub application_deadline: Option<String>,
        /// Defaults to `upcoming`
        #[serde(default)]
        pub status: Option<EventStatus>,
        #[serde(default)]
        pub location: Option<String>,
        #[serde(default)]
        pub category: Option<EventCategory>,
        #[serde(default)]
        pub organizer: Option<String>,
        #[serde(default)]
        pub registration_link: Option<String>,
        #[serde(default)]
        pub max_participants: Option<i64>,
        #[serde(default)]
        pub created_by: Option<String>,
    }

    pub type APIResponse = EventResponse;
}

pub mod update_event {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    /// Fields left out are kept as they are
    #[derive(Debug, Default, Deserialize, Serialize)]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub event_date: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub event_time: Option<String>,
        #[serde(default)]
        pub application_deadline: Option<String>,
        #[serde(default)]
        pub status: Option<EventStatus>,
        #[serde(default)]
        pub location: Option<String>,
        #[serde(default)]
        pub category: Option<EventCategory>,
        #[serde(default)]
        pub organizer: Option<String>,
        #[serde(default)]
        pub registration_link: Option<String>,
        #[serde(default)]
        pub max_participants: Option<i64>,
    }

    pub type APIResponse = EventResponse;
}
