// Per-record performance ratios.
use crate::types::{MeasuredRecord, Measures, Ratios, SpendRecord};
use crate::util::safe_ratio;

impl Measures {
    /// Derive ROAS, CPC, CPA, CTR and CVR. A zero denominator yields `0.0`.
    pub fn ratios(&self) -> Ratios {
        Ratios {
            roas: safe_ratio(self.revenue, self.spend),
            cpc: safe_ratio(self.spend, self.clicks),
            cpa: safe_ratio(self.spend, self.conversions),
            ctr: safe_ratio(self.clicks, self.impressions),
            cvr: safe_ratio(self.conversions, self.clicks),
        }
    }
}

pub fn calculate_metrics(records: Vec<SpendRecord>) -> Vec<MeasuredRecord> {
    records
        .into_iter()
        .map(|record| {
            let ratios = record.measures.ratios();
            MeasuredRecord { record, ratios }
        })
        .collect()
}
