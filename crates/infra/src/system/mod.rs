use chrono::Utc;

/// Source of the current time, replaced by a fixed clock in tests so that
/// cutoffs and reminder windows can be checked deterministically.
pub trait ISys: Send + Sync {
    /// Milliseconds since the unix epoch
    fn get_timestamp_millis(&self) -> i64;
}

/// Wall clock used by the running service
#[derive(Debug, Default, Clone, Copy)]
pub struct RealSys {}

impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
