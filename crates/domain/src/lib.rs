mod cutoff;
mod event;
mod reminder;
pub mod reminder_email;
mod shared;
mod user;

pub use cutoff::{
    effective_cutoff, format_date, parse_timestamp, Cutoff, CutoffSource, EffectiveCutoff,
    ReminderWindow, REMINDER_WINDOW_MILLIS,
};
pub use event::{Event, EventCategory, EventStatus};
pub use reminder::ReminderSubscription;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::errors::UnknownVariantError;
pub use user::{AdminEmails, Role, UserProfile};
