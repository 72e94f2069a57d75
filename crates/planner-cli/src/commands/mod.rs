pub mod agenda;
pub mod config;
pub mod schedule;
pub mod seed;
pub mod task;
