//! EpiLab - Offline-capable incubation tracker
//!
//! Tracks timed lab samples with local persistence, status derivation,
//! calendar/CSV export, and a cache-backed fetch proxy for offline use.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod proxy;
pub mod sample;
pub mod ui;

pub use error::{EpilabError, EpilabResult};
