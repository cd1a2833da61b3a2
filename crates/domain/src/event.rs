use crate::{
    cutoff::{effective_cutoff, Cutoff},
    shared::{
        entity::{Entity, ID},
        errors::UnknownVariantError,
    },
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Past,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Past => "past",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for EventStatus {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnknownVariantError::new("event status", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    Hackathon,
    Workshop,
    TechTalk,
    Seminar,
    Conference,
    Competition,
    Webinar,
    General,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hackathon => "hackathon",
            Self::Workshop => "workshop",
            Self::TechTalk => "tech-talk",
            Self::Seminar => "seminar",
            Self::Conference => "conference",
            Self::Competition => "competition",
            Self::Webinar => "webinar",
            Self::General => "general",
        }
    }
}

impl FromStr for EventCategory {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hackathon" => Ok(Self::Hackathon),
            "workshop" => Ok(Self::Workshop),
            "tech-talk" => Ok(Self::TechTalk),
            "seminar" => Ok(Self::Seminar),
            "conference" => Ok(Self::Conference),
            "competition" => Ok(Self::Competition),
            "webinar" => Ok(Self::Webinar),
            "general" => Ok(Self::General),
            _ => Err(UnknownVariantError::new("event category", s)),
        }
    }
}

/// A campus `Event` that users can set reminders for.
///
/// Dates are kept as entered by the administrator. They are only
/// interpreted when the effective cutoff is computed, see `Event::cutoff`.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    /// Day the event takes place, e.g. `2025-03-10`
    pub event_date: String,
    /// Free text time of day, e.g. `10:00 AM`. Only used for display.
    pub event_time: Option<String>,
    /// Last moment to apply. When set it takes precedence over `event_date`
    /// for both lifecycle transitions and reminders.
    pub application_deadline: Option<String>,
    pub status: EventStatus,
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub organizer: Option<String>,
    pub registration_link: Option<String>,
    pub max_participants: Option<i64>,
    pub created_by: Option<String>,
}

impl Event {
    pub fn new(title: impl Into<String>, event_date: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            title: title.into(),
            description: None,
            event_date: event_date.into(),
            event_time: None,
            application_deadline: None,
            status: EventStatus::Upcoming,
            location: None,
            category: None,
            organizer: None,
            registration_link: None,
            max_participants: None,
            created_by: None,
        }
    }

    pub fn cutoff(&self) -> Cutoff {
        effective_cutoff(
            self.application_deadline.as_deref(),
            &self.event_date,
            self.status,
        )
    }
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_through_str() {
        for status in [EventStatus::Upcoming, EventStatus::Past, EventStatus::Cancelled] {
            assert_eq!(status.as_str().parse::<EventStatus>(), Ok(status));
        }
        assert!("archived".parse::<EventStatus>().is_err());
    }

    #[test]
    fn category_uses_kebab_case() {
        assert_eq!(
            "tech-talk".parse::<EventCategory>(),
            Ok(EventCategory::TechTalk)
        );
        assert_eq!(EventCategory::TechTalk.as_str(), "tech-talk");
    }

    #[test]
    fn new_events_are_upcoming() {
        let event = Event::new("Hack Night", "2025-03-10");
        assert_eq!(event.status, EventStatus::Upcoming);
        assert!(event.application_deadline.is_none());
    }
}
