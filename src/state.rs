use crate::db::{DbPool, OrmConn};

/// Operating-hours window applied to reservation times, `[opening, closing)`.
#[derive(Debug, Clone, Copy)]
pub struct OperatingHours {
    pub opening: u32,
    pub closing: u32,
}

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub hours: OperatingHours,
}
