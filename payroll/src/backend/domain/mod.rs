//! # Domain Module
//!
//! Contains the payroll reconciliation logic for the clinic.
//!
//! Appointments flow one way through the services in this module:
//!
//! - **rate_table**: effective-dated pay scales, priced per duration label
//! - **visit_rank**: per-client visit counts and running visit ordinals
//! - **period_segmenter**: bi-weekly pay periods from the anchor date to today
//! - **income_aggregator**: income and per-(duration, rate) counts per period
//! - **report_renderer**: the plain-text report built from all of the above
//! - **payroll_service**: runs the steps above for one report
//! - **config_service**: loads and validates the run configuration
//!
//! Everything here is a pure function of the fetched appointments, the
//! configuration and the date passed in as "today".

pub mod config_service;
pub mod income_aggregator;
pub mod models;
pub mod payroll_service;
pub mod period_segmenter;
pub mod rate_table;
pub mod report_renderer;
pub mod visit_rank;

pub use config_service::*;
pub use income_aggregator::*;
pub use payroll_service::*;
pub use period_segmenter::*;
pub use rate_table::*;
pub use report_renderer::*;
pub use visit_rank::*;
