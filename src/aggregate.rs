// Grouping of measured records by overall / channel / month / campaign.
//
// Groups always sum base measures first and re-derive ratios from the sums,
// never from an average of per-record ratios.
use crate::types::{
    AggregateGroup, CampaignSummary, ChannelSummary, MeasuredRecord, Measures, MonthlySummary,
    OverallSummary,
};
use crate::util::pct_change;
use std::cmp::Ordering;
use std::collections::BTreeMap;

impl AggregateGroup {
    pub fn from_measures(measures: Measures) -> Self {
        Self {
            ratios: measures.ratios(),
            measures,
        }
    }
}

/// Sum records into one group per key. Keys come back in ascending order.
pub fn group_by<K, F>(data: &[MeasuredRecord], key: F) -> BTreeMap<K, AggregateGroup>
where
    K: Ord,
    F: Fn(&MeasuredRecord) -> K,
{
    let mut sums: BTreeMap<K, Measures> = BTreeMap::new();
    for r in data {
        sums.entry(key(r)).or_default().add(&r.record.measures);
    }
    sums.into_iter()
        .map(|(k, m)| (k, AggregateGroup::from_measures(m)))
        .collect()
}

pub fn total(data: &[MeasuredRecord]) -> AggregateGroup {
    let mut sum = Measures::default();
    for r in data {
        sum.add(&r.record.measures);
    }
    AggregateGroup::from_measures(sum)
}

pub fn summarize_overall(data: &[MeasuredRecord]) -> OverallSummary {
    let g = total(data);
    OverallSummary {
        total_spend: g.measures.spend,
        total_revenue: g.measures.revenue,
        total_conversions: g.measures.conversions,
        overall_roas: g.ratios.roas,
        overall_cpa: g.ratios.cpa,
        overall_cpc: g.ratios.cpc,
    }
}

/// One row per channel, best ROAS first. Equal ROAS keeps channel-name order.
pub fn summarize_by_channel(data: &[MeasuredRecord]) -> Vec<ChannelSummary> {
    let mut rows: Vec<ChannelSummary> = group_by(data, |r| r.record.channel.clone())
        .into_iter()
        .map(|(channel, g)| ChannelSummary {
            channel,
            spend: g.measures.spend,
            revenue: g.measures.revenue,
            conversions: g.measures.conversions,
            roas: g.ratios.roas,
            cpa: g.ratios.cpa,
            cpc: g.ratios.cpc,
            avg_ctr: g.ratios.ctr,
            avg_cvr: g.ratios.cvr,
        })
        .collect();
    // `sort_by` is stable, which is what keeps the tie order.
    rows.sort_by(|a, b| b.roas.partial_cmp(&a.roas).unwrap_or(Ordering::Equal));
    rows
}

/// One row per `YYYY-MM` label in chronological order, with month-over-month
/// growth of spend and revenue. The first month has no baseline and reports 0.
pub fn summarize_by_month(data: &[MeasuredRecord]) -> Vec<MonthlySummary> {
    let mut rows: Vec<MonthlySummary> = Vec::new();
    let mut previous: Option<Measures> = None;
    for (month, g) in group_by(data, |r| r.record.month.clone()) {
        let (mom_spend_growth, mom_revenue_growth) = match previous {
            Some(p) => (
                pct_change(p.spend, g.measures.spend),
                pct_change(p.revenue, g.measures.revenue),
            ),
            None => (0.0, 0.0),
        };
        rows.push(MonthlySummary {
            month,
            spend: g.measures.spend,
            revenue: g.measures.revenue,
            conversions: g.measures.conversions,
            roas: g.ratios.roas,
            mom_spend_growth,
            mom_revenue_growth,
        });
        previous = Some(g.measures);
    }
    rows
}

/// One row per (campaign, channel) pair, ordered by campaign then channel.
pub fn summarize_by_campaign(data: &[MeasuredRecord]) -> Vec<CampaignSummary> {
    group_by(data, |r| (r.record.campaign.clone(), r.record.channel.clone()))
        .into_iter()
        .map(|((campaign, channel), g)| CampaignSummary {
            campaign,
            channel,
            spend: g.measures.spend,
            revenue: g.measures.revenue,
            conversions: g.measures.conversions,
            roas: g.ratios.roas,
        })
        .collect()
}
