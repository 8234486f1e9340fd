pub mod schedule_api;
