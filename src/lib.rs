//! Data pipeline behind the bike sharing dashboard.

pub mod config;
pub mod data;
pub mod error;
