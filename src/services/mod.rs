// Service module exports

pub mod birthday;
pub mod calendar;
pub mod countdown;
pub mod database;
pub mod recurrence;
pub mod settings;
pub mod wish;
