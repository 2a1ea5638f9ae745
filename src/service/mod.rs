pub mod ics_service;
pub mod schedule_cache;
pub mod schedule_service;
