//! Marketing spend reporting.
//!
//! Reads a snapshot CSV of campaign spend and revenue, derives ROAS, CPC,
//! CPA, CTR and CVR, aggregates them overall and by channel, month and
//! campaign, ranks and flags campaigns, and writes a JSON summary with
//! templated recommendations for the dashboard.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod insights;
pub mod loader;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod rank;
pub mod types;
pub mod util;

pub use config::{InsightRules, ReportConfig, Thresholds};
pub use error::{ReportError, Result};
pub use pipeline::{build_report, run};
pub use types::Report;
