pub mod match_event;
pub mod schedule;
