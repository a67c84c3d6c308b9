use crate::config::{UNKNOWN_CAMPAIGN, UNKNOWN_CHANNEL};
use crate::error::{ReportError, Result};
use crate::types::{Measures, RawRow, SpendRecord};
use crate::util::{month_key, parse_measure, parse_timestamp_safe, text_or};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub parse_errors: usize,
    pub dropped_dates: usize,
    pub duplicates: usize,
    pub kept_rows: usize,
}

// Identity of a record for duplicate removal. Floats compare by bit pattern
// so two rows are duplicates only if every field matches exactly.
#[derive(Hash, PartialEq, Eq)]
struct RowKey {
    campaign: String,
    channel: String,
    timestamp: NaiveDateTime,
    measures: [u64; 5],
}

impl RowKey {
    fn of(record: &SpendRecord) -> Self {
        let m = &record.measures;
        Self {
            campaign: record.campaign.clone(),
            channel: record.channel.clone(),
            timestamp: record.timestamp,
            measures: [
                m.spend.to_bits(),
                m.revenue.to_bits(),
                m.impressions.to_bits(),
                m.clicks.to_bits(),
                m.conversions.to_bits(),
            ],
        }
    }
}

/// Load the snapshot CSV at `path` and clean it into typed records.
///
/// A missing file is reported as [`ReportError::InputNotFound`].
pub fn load_and_clean(path: &Path) -> Result<(Vec<SpendRecord>, LoadReport)> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReportError::InputNotFound(path.to_path_buf()),
        _ => ReportError::Io(e),
    })?;
    load_from_reader(file)
}

/// Clean CSV rows from any reader. Rows are kept in file order.
pub fn load_from_reader<R: Read>(reader: R) -> Result<(Vec<SpendRecord>, LoadReport)> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);
    let mut report = LoadReport::default();
    let mut seen: HashSet<RowKey> = HashSet::new();
    let mut records: Vec<SpendRecord> = Vec::new();

    for result in rdr.deserialize::<RawRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                debug!(row = report.total_rows, error = %e, "skipping undecodable row");
                report.parse_errors += 1;
                continue;
            }
        };

        let Some(record) = clean_row(row) else {
            report.dropped_dates += 1;
            continue;
        };

        if !seen.insert(RowKey::of(&record)) {
            report.duplicates += 1;
            continue;
        }
        records.push(record);
    }

    report.kept_rows = records.len();
    Ok((records, report))
}

/// Normalize one raw row. Returns `None` when the date is missing or
/// unparseable; every other defect is coerced to a default.
pub fn clean_row(row: RawRow) -> Option<SpendRecord> {
    let timestamp = parse_timestamp_safe(row.date.as_deref())?;

    // Prefer the current header; fall back to the legacy one.
    let campaign = match row.campaign.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => text_or(row.campaign_name.as_deref(), UNKNOWN_CAMPAIGN),
    };
    let channel = text_or(row.channel.as_deref(), UNKNOWN_CHANNEL);

    let measures = Measures {
        spend: parse_measure(row.spend.as_deref()),
        revenue: parse_measure(row.revenue.as_deref()),
        impressions: parse_measure(row.impressions.as_deref()),
        clicks: parse_measure(row.clicks.as_deref()),
        conversions: parse_measure(row.conversions.as_deref()),
    };

    Some(SpendRecord {
        campaign,
        channel,
        timestamp,
        month: month_key(timestamp.date()),
        measures,
    })
}
