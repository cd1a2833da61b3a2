use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use anyhow::anyhow;
use eventura_domain::{Event, EventStatus, ID};

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<Event>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        insert(e, &self.events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        find(event_id, &self.events)
    }

    async fn find_by_status(&self, status: EventStatus) -> anyhow::Result<Vec<Event>> {
        Ok(find_by(&self.events, |event| event.status == status))
    }

    async fn save(&self, e: &Event) -> anyhow::Result<()> {
        update_one(&e.id, &self.events, |event| *event = e.clone())
            .ok_or_else(|| anyhow!("Event with id: {} was not found", e.id))
    }

    async fn set_status(&self, event_id: &ID, status: EventStatus) -> anyhow::Result<()> {
        update_one(event_id, &self.events, |event| event.status = status)
            .ok_or_else(|| anyhow!("Event with id: {} was not found", event_id))
    }
}
