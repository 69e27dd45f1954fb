//! GreenBuild - construction material sustainability ledger
//!
//! Keeps a per-project ledger of construction materials and derives
//! LEED-style credit points, a certification tier and embodied-carbon
//! estimates from it.
//!
//! - [`models`] - materials, tiers, sync status and the dashboard report
//! - [`scoring`] - credit scorer, carbon estimator, category aggregator
//! - [`store`] - persistence behind [`store::MaterialStore`]
//! - [`ledger`] - the in-memory collection and its sync indicator
//! - [`reporters`] - text, JSON and Markdown dashboards plus the audit CSV

pub mod cli;
pub mod config;
pub mod ledger;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod store;
