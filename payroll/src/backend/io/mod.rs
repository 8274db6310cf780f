//! # IO Module
//!
//! Thin adapters between the payroll domain and the outside world: the
//! scheduling provider that supplies appointments, and the sinks that receive
//! the finished report. No payroll rules live here.

pub mod delivery;
pub mod email_service;
pub mod mappers;
pub mod schedule_client;

pub use delivery::*;
pub use email_service::*;
pub use schedule_client::*;
