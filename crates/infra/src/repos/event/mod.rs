mod inmemory;
mod postgres;

use eventura_domain::{Event, EventStatus, ID};
pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &Event) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<Event>;
    async fn find_by_status(&self, status: EventStatus) -> anyhow::Result<Vec<Event>>;
    /// Overwrites every field of an existing event
    async fn save(&self, e: &Event) -> anyhow::Result<()>;
    /// Patches only the status, other fields edited in the meantime are kept
    async fn set_status(&self, event_id: &ID, status: EventStatus) -> anyhow::Result<()>;
}
