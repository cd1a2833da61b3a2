use eventura_domain::{Event, EventCategory, EventStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct EventDTO {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub event_date: String,
    pub event_time: Option<String>,
    pub application_deadline: Option<String>,
    pub status: EventStatus,
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub organizer: Option<String>,
    pub registration_link: Option<String>,
    pub max_participants: Option<i64>,
    pub created_by: Option<String>,
}

impl EventDTO {
    pub fn new(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            event_date: event.event_date,
            event_time: event.event_time,
            application_deadline: event.application_deadline,
            status: event.status,
            location: event.location,
            category: event.category,
            organizer: event.organizer,
            registration_link: event.registration_link,
            max_participants: event.max_participants,
            created_by: event.created_by,
        }
    }
}
