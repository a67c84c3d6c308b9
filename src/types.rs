// Record and report shapes shared by every stage of the pipeline.
//
// In-memory values are never rounded. The `serialize_with` helpers from
// `util` apply the fixed output precision when the report is written, and
// the `display_with` helpers do the same for console previews.
use crate::util::{
    display_count, display_money, display_rate, display_ratio, serialize_count, serialize_money,
    serialize_rate,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One CSV row exactly as it appears on disk. Every column is optional so a
/// missing or blank cell never fails deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub campaign: Option<String>,
    /// Legacy header used by older exports.
    #[serde(default)]
    pub campaign_name: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub spend: Option<String>,
    #[serde(default)]
    pub revenue: Option<String>,
    #[serde(default)]
    pub impressions: Option<String>,
    #[serde(default)]
    pub clicks: Option<String>,
    #[serde(default)]
    pub conversions: Option<String>,
}

/// Base measures of a record or of a group of records. All values are
/// finite and non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measures {
    pub spend: f64,
    pub revenue: f64,
    pub impressions: f64,
    pub clicks: f64,
    pub conversions: f64,
}

impl Measures {
    pub fn add(&mut self, other: &Measures) {
        self.spend += other.spend;
        self.revenue += other.revenue;
        self.impressions += other.impressions;
        self.clicks += other.clicks;
        self.conversions += other.conversions;
    }
}

/// Derived performance ratios. A ratio whose denominator is zero is `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ratios {
    pub roas: f64,
    pub cpc: f64,
    pub cpa: f64,
    pub ctr: f64,
    pub cvr: f64,
}

/// A cleaned input row with its parsed timestamp and year-month label.
/// Date-only cells carry a midnight timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendRecord {
    pub campaign: String,
    pub channel: String,
    pub timestamp: NaiveDateTime,
    pub month: String,
    pub measures: Measures,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredRecord {
    pub record: SpendRecord,
    pub ratios: Ratios,
}

/// Summed measures of one group with ratios re-derived from the sums.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateGroup {
    pub measures: Measures,
    pub ratios: Ratios,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OverallSummary {
    #[serde(serialize_with = "serialize_money")]
    pub total_spend: f64,
    #[serde(serialize_with = "serialize_money")]
    pub total_revenue: f64,
    #[serde(serialize_with = "serialize_count")]
    pub total_conversions: f64,
    #[serde(serialize_with = "serialize_money")]
    pub overall_roas: f64,
    #[serde(serialize_with = "serialize_money")]
    pub overall_cpa: f64,
    #[serde(serialize_with = "serialize_money")]
    pub overall_cpc: f64,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ChannelSummary {
    #[tabled(rename = "Channel")]
    pub channel: String,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "Spend", display_with = "display_money")]
    pub spend: f64,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "Revenue", display_with = "display_money")]
    pub revenue: f64,
    #[serde(serialize_with = "serialize_count")]
    #[tabled(rename = "Conversions", display_with = "display_count")]
    pub conversions: f64,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "ROAS", display_with = "display_ratio")]
    pub roas: f64,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "CPA", display_with = "display_ratio")]
    pub cpa: f64,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "CPC", display_with = "display_ratio")]
    pub cpc: f64,
    #[serde(serialize_with = "serialize_rate")]
    #[tabled(rename = "CTR", display_with = "display_rate")]
    pub avg_ctr: f64,
    #[serde(serialize_with = "serialize_rate")]
    #[tabled(rename = "CVR", display_with = "display_rate")]
    pub avg_cvr: f64,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct MonthlySummary {
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "Spend", display_with = "display_money")]
    pub spend: f64,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "Revenue", display_with = "display_money")]
    pub revenue: f64,
    #[serde(serialize_with = "serialize_count")]
    #[tabled(rename = "Conversions", display_with = "display_count")]
    pub conversions: f64,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "ROAS", display_with = "display_ratio")]
    pub roas: f64,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "SpendGrowth%", display_with = "display_ratio")]
    pub mom_spend_growth: f64,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "RevenueGrowth%", display_with = "display_ratio")]
    pub mom_revenue_growth: f64,
}

/// Peak months of a non-empty monthly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPeaks {
    pub highest_spend_month: String,
    pub best_roas_month: String,
    #[serde(serialize_with = "serialize_money")]
    pub best_roas_value: f64,
    pub worst_roas_month: String,
    #[serde(serialize_with = "serialize_money")]
    pub worst_roas_value: f64,
}

/// Serializes to `{}` when there were no months to rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthHighlights {
    #[serde(flatten)]
    pub peaks: Option<MonthPeaks>,
}

impl MonthHighlights {
    pub fn is_empty(&self) -> bool {
        self.peaks.is_none()
    }
}

/// Aggregate of one (campaign, channel) pair.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CampaignSummary {
    #[tabled(rename = "Campaign")]
    pub campaign: String,
    #[tabled(rename = "Channel")]
    pub channel: String,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "Spend", display_with = "display_money")]
    pub spend: f64,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "Revenue", display_with = "display_money")]
    pub revenue: f64,
    #[serde(serialize_with = "serialize_count")]
    #[tabled(rename = "Conversions", display_with = "display_count")]
    pub conversions: f64,
    #[serde(serialize_with = "serialize_money")]
    #[tabled(rename = "ROAS", display_with = "display_ratio")]
    pub roas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRoas {
    pub campaign: String,
    #[serde(serialize_with = "serialize_money")]
    pub roas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRevenue {
    pub campaign: String,
    #[serde(serialize_with = "serialize_money")]
    pub revenue: f64,
}

/// A campaign singled out by one of the spend/ROAS rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignFlag {
    pub campaign: String,
    #[serde(serialize_with = "serialize_money")]
    pub spend: f64,
    #[serde(serialize_with = "serialize_money")]
    pub roas: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CampaignAnalysis {
    pub top_roas_campaigns: Vec<CampaignRoas>,
    pub top_revenue_campaigns: Vec<CampaignRevenue>,
    pub underperforming_campaigns: Vec<CampaignFlag>,
    pub scaling_opportunities: Vec<CampaignFlag>,
    pub all_campaigns: Vec<CampaignSummary>,
}

/// Month peaks plus the ranked and flagged campaign lists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Highlights {
    pub month: MonthHighlights,
    pub top_roas_campaigns: Vec<CampaignRoas>,
    pub top_revenue_campaigns: Vec<CampaignRevenue>,
    pub underperforming_campaigns: Vec<CampaignFlag>,
    pub scaling_opportunities: Vec<CampaignFlag>,
}

/// The JSON document handed to the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub overall: OverallSummary,
    pub channels: Vec<ChannelSummary>,
    pub monthly: Vec<MonthlySummary>,
    pub campaigns: Vec<CampaignSummary>,
    pub highlights: Highlights,
    pub insights: Vec<String>,
    pub generated_at: String,
}
