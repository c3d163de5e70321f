//! Monthly shift generation.
//!
//! The generator walks a calendar month day by day, picking who works
//! from everyone who has not asked for the day off and would not exceed
//! the consecutive-day limit, and writes the month back atomically.

pub mod availability;
pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod model;
pub mod name_generator;
pub mod ports;
pub mod report;
pub mod rng;
pub mod selector;
pub mod staffing;
pub mod store;
pub mod streak;
pub mod types;
