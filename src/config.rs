// Static configuration: file locations, business thresholds and output
// precision. Every threshold is a named field so stages receive them
// explicitly instead of reaching for literals.
use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "marketing_spend_data.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "data/summary_data.json";

/// Decimal places for currency amounts, ROAS/CPA/CPC and growth figures.
pub const CURRENCY_DECIMALS: u32 = 2;
/// Decimal places for click-through and conversion rates.
pub const RATE_DECIMALS: u32 = 4;

pub const UNKNOWN_CAMPAIGN: &str = "Unknown Campaign";
pub const UNKNOWN_CHANNEL: &str = "Unknown Channel";

/// Rules used to rank and flag per-campaign aggregates.
///
/// All comparisons are strict: a campaign spending exactly 50 000 is never
/// underperforming, one at exactly ROAS 5 is never a scaling opportunity.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub top_n: usize,
    pub underperforming_min_spend: f64,
    pub underperforming_max_roas: f64,
    pub scaling_min_roas: f64,
    pub scaling_max_spend: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            top_n: 3,
            underperforming_min_spend: 50_000.0,
            underperforming_max_roas: 2.0,
            scaling_min_roas: 5.0,
            scaling_max_spend: 20_000.0,
        }
    }
}

/// Boundaries of the insight rule cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightRules {
    /// Overall ROAS strictly above this is "healthy".
    pub healthy_roas: f64,
    /// Overall ROAS strictly below this is "low"; the closed band between
    /// the two bounds is "stable".
    pub low_roas: f64,
    pub high_cpa: f64,
    pub max_named_campaigns: usize,
    pub min_insights: usize,
}

impl Default for InsightRules {
    fn default() -> Self {
        Self {
            healthy_roas: 4.0,
            low_roas: 2.0,
            high_cpa: 50.0,
            max_named_campaigns: 2,
            min_insights: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub thresholds: Thresholds,
    pub insight_rules: InsightRules,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            thresholds: Thresholds::default(),
            insight_rules: InsightRules::default(),
        }
    }
}

impl ReportConfig {
    pub fn with_paths(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }
}
