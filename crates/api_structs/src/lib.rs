mod event;
mod jobs;
mod profile;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::event::dtos::*;
    pub use crate::profile::dtos::*;
}

pub use crate::event::api::*;
pub use crate::jobs::api::*;
pub use crate::profile::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
