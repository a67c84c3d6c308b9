// Stage wiring: load -> metrics -> aggregates -> rankings -> insights -> export.
use crate::aggregate::{
    summarize_by_campaign, summarize_by_channel, summarize_by_month, summarize_overall,
};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::insights::generate_insights;
use crate::loader::{load_and_clean, LoadReport};
use crate::metrics::calculate_metrics;
use crate::output::write_json;
use crate::rank::{analyze_campaigns, month_highlights};
use crate::types::{Highlights, Report, SpendRecord};
use crate::util::format_int;
use chrono::Local;
use tracing::{info, warn};

/// Build the full report from cleaned records. Pure apart from the
/// `generated_at` timestamp.
pub fn build_report(records: Vec<SpendRecord>, config: &ReportConfig) -> Report {
    info!("Calculating metrics...");
    let data = calculate_metrics(records);

    info!("Generating summaries...");
    let overall = summarize_overall(&data);
    let channels = summarize_by_channel(&data);
    let monthly = summarize_by_month(&data);
    let month = month_highlights(&monthly);
    let analysis = analyze_campaigns(summarize_by_campaign(&data), &config.thresholds);

    info!("Generating insights...");
    let insights = generate_insights(&overall, &month, &analysis, &config.insight_rules);

    Report {
        overall,
        channels,
        monthly,
        campaigns: analysis.all_campaigns,
        highlights: Highlights {
            month,
            top_roas_campaigns: analysis.top_roas_campaigns,
            top_revenue_campaigns: analysis.top_revenue_campaigns,
            underperforming_campaigns: analysis.underperforming_campaigns,
            scaling_opportunities: analysis.scaling_opportunities,
        },
        insights,
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

fn log_load_report(report: &LoadReport) {
    info!(
        "Processing dataset... ({} rows read, {} kept)",
        format_int(report.total_rows as u64),
        format_int(report.kept_rows as u64)
    );
    if report.parse_errors > 0 {
        warn!(
            "{} rows skipped due to CSV decode errors",
            format_int(report.parse_errors as u64)
        );
    }
    if report.dropped_dates > 0 {
        warn!(
            "{} rows dropped for missing or unparseable dates",
            format_int(report.dropped_dates as u64)
        );
    }
    if report.duplicates > 0 {
        info!("{} duplicate rows removed", format_int(report.duplicates as u64));
    }
}

/// Run the whole batch: read `config.input_path`, write the JSON report to
/// `config.output_path`, and hand the report back for console previews.
pub fn run(config: &ReportConfig) -> Result<Report> {
    info!("Loading data from {}...", config.input_path.display());
    let (records, load_report) = load_and_clean(&config.input_path)?;
    log_load_report(&load_report);

    let report = build_report(records, config);

    info!("Exporting data...");
    write_json(&config.output_path, &report)?;
    info!("Summary exported to {}", config.output_path.display());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Measures;
    use chrono::NaiveDate;

    fn rec(channel: &str, m: [f64; 5]) -> SpendRecord {
        SpendRecord {
            campaign: format!("{} Always On", channel),
            channel: channel.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            month: "2024-06".to_string(),
            measures: Measures {
                spend: m[0],
                revenue: m[1],
                impressions: m[2],
                clicks: m[3],
                conversions: m[4],
            },
        }
    }

    #[test]
    fn build_report_wires_every_stage() {
        let records = vec![
            rec("Search", [1000.0, 4000.0, 2000.0, 100.0, 10.0]),
            rec("Social", [2000.0, 3000.0, 5000.0, 50.0, 5.0]),
        ];
        let report = build_report(records, &ReportConfig::default());

        assert!((report.overall.overall_roas - 7000.0 / 3000.0).abs() < 1e-12);
        assert_eq!(report.channels[0].channel, "Search");
        assert_eq!(report.channels[1].channel, "Social");
        assert_eq!(report.monthly.len(), 1);
        assert_eq!(report.campaigns.len(), 2);
        assert_eq!(
            report.highlights.month.peaks.as_ref().unwrap().best_roas_month,
            "2024-06"
        );
        assert_eq!(report.highlights.top_roas_campaigns[0].campaign, "Search Always On");
        // tier + best month + CPA 200 + filler
        assert_eq!(report.insights.len(), 4);
        assert_eq!(report.generated_at.len(), "2024-06-01 12:00:00".len());
    }

    #[test]
    fn empty_records_produce_empty_sections() {
        let report = build_report(Vec::new(), &ReportConfig::default());
        assert!(report.monthly.is_empty());
        assert!(report.highlights.month.is_empty());
        assert!(report.channels.is_empty());
        assert!(report.campaigns.is_empty());
        assert_eq!(report.insights.len(), 2);
    }
}
