use super::IEventRepo;
use anyhow::anyhow;
use eventura_domain::{Event, EventCategory, EventStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    title: String,
    description: Option<String>,
    event_date: String,
    event_time: Option<String>,
    application_deadline: Option<String>,
    status: String,
    location: Option<String>,
    category: Option<String>,
    organizer: Option<String>,
    registration_link: Option<String>,
    max_participants: Option<i64>,
    created_by: Option<String>,
}

impl TryFrom<EventRaw> for Event {
    type Error = anyhow::Error;

    fn try_from(raw: EventRaw) -> anyhow::Result<Self> {
        Ok(Event {
            id: raw.event_uid.into(),
            title: raw.title,
            description: raw.description,
            event_date: raw.event_date,
            event_time: raw.event_time,
            application_deadline: raw.application_deadline,
            status: raw.status.parse::<EventStatus>()?,
            location: raw.location,
            category: raw
                .category
                .as_deref()
                .map(str::parse::<EventCategory>)
                .transpose()?,
            organizer: raw.organizer,
            registration_link: raw.registration_link,
            max_participants: raw.max_participants,
            created_by: raw.created_by,
        })
    }
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events
            (event_uid, title, description, event_date, event_time, application_deadline,
             status, location, category, organizer, registration_link, max_participants, created_by)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(*e.id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(&e.event_date)
        .bind(&e.event_time)
        .bind(&e.application_deadline)
        .bind(e.status.as_str())
        .bind(&e.location)
        .bind(e.category.map(|c| c.as_str()))
        .bind(&e.organizer)
        .bind(&e.registration_link)
        .bind(e.max_participants)
        .bind(&e.created_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        let res = sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT * FROM events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(*event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(raw) => raw.and_then(|raw| match Event::try_from(raw) {
                Ok(event) => Some(event),
                Err(e) => {
                    error!("Stored event {} is invalid: {:?}", event_id, e);
                    None
                }
            }),
            Err(e) => {
                error!("Unable to find event {}: {:?}", event_id, e);
                None
            }
        }
    }

    async fn find_by_status(&self, status: EventStatus) -> anyhow::Result<Vec<Event>> {
        let events = sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT * FROM events AS e
            WHERE e.status = $1
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .filter_map(|raw| {
            let event_uid = raw.event_uid;
            match Event::try_from(raw) {
                Ok(event) => Some(event),
                Err(e) => {
                    error!("Skipping invalid stored event {}: {:?}", event_uid, e);
                    None
                }
            }
        })
        .collect::<Vec<_>>();

        Ok(events)
    }

    async fn save(&self, e: &Event) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE events
            SET title = $2, description = $3, event_date = $4, event_time = $5,
                application_deadline = $6, status = $7, location = $8, category = $9,
                organizer = $10, registration_link = $11, max_participants = $12,
                created_by = $13
            WHERE event_uid = $1
            "#,
        )
        .bind(*e.id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(&e.event_date)
        .bind(&e.event_time)
        .bind(&e.application_deadline)
        .bind(e.status.as_str())
        .bind(&e.location)
        .bind(e.category.map(|c| c.as_str()))
        .bind(&e.organizer)
        .bind(&e.registration_link)
        .bind(e.max_participants)
        .bind(&e.created_by)
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            return Err(anyhow!("Event with id: {} was not found", e.id));
        }
        Ok(())
    }

    async fn set_status(&self, event_id: &ID, status: EventStatus) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE events
            SET status = $2
            WHERE event_uid = $1
            "#,
        )
        .bind(*event_id.inner_ref())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            return Err(anyhow!("Event with id: {} was not found", event_id));
        }
        Ok(())
    }
}
