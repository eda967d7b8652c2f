pub mod app;
pub mod config;
pub mod coords;
pub mod error;
pub mod form;
pub mod map;
pub mod store;
pub mod workout;
pub mod workout_log;
