// Templated recommendations derived from the computed summaries.
//
// Values are compared and quoted at output precision (2 decimals).
use crate::config::{InsightRules, CURRENCY_DECIMALS};
use crate::types::{CampaignAnalysis, CampaignFlag, MonthHighlights, OverallSummary};
use crate::util::{format_value, round_to};

pub const DIVERSIFY_MESSAGE: &str =
    "Diversify channel mix to reduce dependency on top performing channel.";

fn presented(value: f64) -> f64 {
    round_to(value, CURRENCY_DECIMALS)
}

fn first_names(flags: &[CampaignFlag], max: usize) -> String {
    flags
        .iter()
        .take(max)
        .map(|c| c.campaign.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn roas_tier_message(roas: f64, rules: &InsightRules) -> String {
    let shown = format_value(roas);
    if roas > rules.healthy_roas {
        format!(
            "Overall ROAS is healthy at {}. Consider increasing budget to scale.",
            shown
        )
    } else if roas < rules.low_roas {
        format!(
            "Overall ROAS is low at {}. Review high-spend, low-performance channels.",
            shown
        )
    } else {
        format!(
            "Overall ROAS is stable at {}. Optimize creatives to improve margins.",
            shown
        )
    }
}

/// Run the rule cascade. The diversification filler is appended once when
/// fewer than `min_insights` rules fired.
pub fn generate_insights(
    overall: &OverallSummary,
    highlights: &MonthHighlights,
    campaigns: &CampaignAnalysis,
    rules: &InsightRules,
) -> Vec<String> {
    let mut insights = Vec::new();

    insights.push(roas_tier_message(presented(overall.overall_roas), rules));

    if let Some(peaks) = &highlights.peaks {
        insights.push(format!(
            "Best performance was in {} with ROAS of {}. Analyze what worked that month.",
            peaks.best_roas_month,
            format_value(presented(peaks.best_roas_value))
        ));
    }

    if !campaigns.scaling_opportunities.is_empty() {
        insights.push(format!(
            "Scaling Opportunities: Campaigns like {} have high ROAS but low spend. Increase budget here.",
            first_names(&campaigns.scaling_opportunities, rules.max_named_campaigns)
        ));
    }

    if !campaigns.underperforming_campaigns.is_empty() {
        insights.push(format!(
            "Budget Waste Risk: Campaigns like {} are spending heavily (>50k) with low ROAS (<2). Pause or restructure immediately.",
            first_names(&campaigns.underperforming_campaigns, rules.max_named_campaigns)
        ));
    }

    let cpa = presented(overall.overall_cpa);
    if cpa > rules.high_cpa {
        insights.push(format!(
            "CPA is relatively high at ${}. Focus on CRO (Conversion Rate Optimization) to lower acquisition costs.",
            format_value(cpa)
        ));
    }

    if insights.len() < rules.min_insights {
        insights.push(DIVERSIFY_MESSAGE.to_string());
    }

    insights
}
