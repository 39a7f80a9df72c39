//! Domain services used by the collector's HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own persistence and rendering so route handlers stay
//! focused on protocol translation.

pub mod export;
pub mod scans;
