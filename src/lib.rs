// src/lib.rs
#[macro_use]
pub mod macros;

#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod specs;

pub mod data;
pub mod error;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod sheets;
