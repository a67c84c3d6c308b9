// Top-N rankings, rule-based campaign flags and month highlights.
use crate::config::Thresholds;
use crate::types::{
    CampaignAnalysis, CampaignFlag, CampaignRevenue, CampaignRoas, CampaignSummary,
    MonthHighlights, MonthPeaks, MonthlySummary,
};
use std::cmp::Ordering;

/// Pick the highest-spend, best-ROAS and worst-ROAS months. On ties the
/// earliest month wins. An empty series gives empty highlights.
pub fn month_highlights(months: &[MonthlySummary]) -> MonthHighlights {
    let Some(first) = months.first() else {
        return MonthHighlights::default();
    };
    let (mut top_spend, mut best, mut worst) = (first, first, first);
    for m in &months[1..] {
        if m.spend > top_spend.spend {
            top_spend = m;
        }
        if m.roas > best.roas {
            best = m;
        }
        if m.roas < worst.roas {
            worst = m;
        }
    }
    MonthHighlights {
        peaks: Some(MonthPeaks {
            highest_spend_month: top_spend.month.clone(),
            best_roas_month: best.month.clone(),
            best_roas_value: best.roas,
            worst_roas_month: worst.month.clone(),
            worst_roas_value: worst.roas,
        }),
    }
}

// Stable descending sort so equal values keep aggregate order.
fn top_by<'a, F>(campaigns: &'a [CampaignSummary], n: usize, value: F) -> Vec<&'a CampaignSummary>
where
    F: Fn(&CampaignSummary) -> f64,
{
    let mut sorted: Vec<&CampaignSummary> = campaigns.iter().collect();
    sorted.sort_by(|a, b| value(*b).partial_cmp(&value(*a)).unwrap_or(Ordering::Equal));
    sorted.truncate(n);
    sorted
}

pub fn is_underperforming(c: &CampaignSummary, t: &Thresholds) -> bool {
    c.spend > t.underperforming_min_spend && c.roas < t.underperforming_max_roas
}

pub fn is_scaling_opportunity(c: &CampaignSummary, t: &Thresholds) -> bool {
    c.roas > t.scaling_min_roas && c.spend < t.scaling_max_spend
}

fn flag(c: &CampaignSummary) -> CampaignFlag {
    CampaignFlag {
        campaign: c.campaign.clone(),
        spend: c.spend,
        roas: c.roas,
    }
}

/// Rank and flag per-campaign aggregates. Flagged lists keep the input order.
pub fn analyze_campaigns(campaigns: Vec<CampaignSummary>, t: &Thresholds) -> CampaignAnalysis {
    let top_roas_campaigns = top_by(&campaigns, t.top_n, |c| c.roas)
        .into_iter()
        .map(|c| CampaignRoas {
            campaign: c.campaign.clone(),
            roas: c.roas,
        })
        .collect();
    let top_revenue_campaigns = top_by(&campaigns, t.top_n, |c| c.revenue)
        .into_iter()
        .map(|c| CampaignRevenue {
            campaign: c.campaign.clone(),
            revenue: c.revenue,
        })
        .collect();
    let underperforming_campaigns = campaigns
        .iter()
        .filter(|c| is_underperforming(c, t))
        .map(flag)
        .collect();
    let scaling_opportunities = campaigns
        .iter()
        .filter(|c| is_scaling_opportunity(c, t))
        .map(flag)
        .collect();

    CampaignAnalysis {
        top_roas_campaigns,
        top_revenue_campaigns,
        underperforming_campaigns,
        scaling_opportunities,
        all_campaigns: campaigns,
    }
}
