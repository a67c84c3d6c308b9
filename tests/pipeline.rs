//! End-to-end runs from a CSV on disk to the exported JSON document.

use serde_json::Value;
use spend_report::{run, ReportConfig, ReportError};
use std::fs;
use std::path::Path;

const HEADER: &str = "campaign,channel,date,spend,revenue,impressions,clicks,conversions\n";

fn run_csv(dir: &Path, body: &str) -> Value {
    let input = dir.join("marketing_spend_data.csv");
    let output = dir.join("data").join("summary_data.json");
    fs::write(&input, format!("{}{}", HEADER, body)).unwrap();

    run(&ReportConfig::with_paths(&input, &output)).unwrap();
    serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap()
}

#[test]
fn two_channel_month_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let doc = run_csv(
        dir.path(),
        "Brand,Search,2024-01-05,1000,4000,2000,100,10\n\
         Launch,Social,2024-01-20,2000,3000,5000,50,5\n",
    );

    for key in ["overall", "channels", "monthly", "campaigns", "insights", "generated_at"] {
        assert!(doc.get(key).is_some(), "missing top-level key {}", key);
    }

    let overall = &doc["overall"];
    assert_eq!(overall["total_spend"], 3000.0);
    assert_eq!(overall["total_revenue"], 7000.0);
    assert_eq!(overall["total_conversions"], 15);
    assert_eq!(overall["overall_roas"], 2.33);
    assert_eq!(overall["overall_cpa"], 200.0);
    assert_eq!(overall["overall_cpc"], 20.0);

    let channels = doc["channels"].as_array().unwrap();
    assert_eq!(channels[0]["channel"], "Search");
    assert_eq!(channels[0]["roas"], 4.0);
    assert_eq!(channels[0]["avg_ctr"], 0.05);
    assert_eq!(channels[1]["channel"], "Social");
    assert_eq!(channels[1]["roas"], 1.5);
    assert_eq!(channels[1]["avg_ctr"], 0.01);

    let monthly = doc["monthly"].as_array().unwrap();
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0]["month"], "2024-01");
    assert_eq!(monthly[0]["mom_spend_growth"], 0.0);
    assert_eq!(monthly[0]["mom_revenue_growth"], 0.0);

    assert_eq!(doc["highlights"]["month"]["best_roas_month"], "2024-01");
    assert_eq!(doc["highlights"]["month"]["best_roas_value"], 2.33);

    let insights = doc["insights"].as_array().unwrap();
    assert_eq!(
        insights[0],
        "Overall ROAS is stable at 2.33. Optimize creatives to improve margins."
    );
    assert_eq!(
        insights[insights.len() - 1],
        "Diversify channel mix to reduce dependency on top performing channel."
    );

    let generated_at = doc["generated_at"].as_str().unwrap();
    assert!(chrono::NaiveDateTime::parse_from_str(generated_at, "%Y-%m-%d %H:%M:%S").is_ok());
}

#[test]
fn duplicate_rows_count_once() {
    let dir = tempfile::tempdir().unwrap();
    let doc = run_csv(
        dir.path(),
        "Brand,Search,2024-01-05,1000,4000,2000,100,10\n\
         Brand,Search,2024-01-05,1000,4000,2000,100,10\n",
    );
    assert_eq!(doc["overall"]["total_spend"], 1000.0);
    assert_eq!(doc["campaigns"].as_array().unwrap().len(), 1);
}

#[test]
fn rows_without_dates_leave_empty_months() {
    let dir = tempfile::tempdir().unwrap();
    let doc = run_csv(
        dir.path(),
        "Brand,Search,,1000,4000,2000,100,10\n\
         Launch,Social,someday,2000,3000,5000,50,5\n",
    );
    assert_eq!(doc["monthly"], serde_json::json!([]));
    assert_eq!(doc["highlights"]["month"], serde_json::json!({}));
    assert_eq!(doc["overall"]["total_spend"], 0.0);
    assert!(doc["insights"].as_array().unwrap().len() >= 2);
}

#[test]
fn flags_and_growth_across_months() {
    let dir = tempfile::tempdir().unwrap();
    let doc = run_csv(
        dir.path(),
        "Mega,TV,2024-01-10,60000,60000,100000,1000,100\n\
         Niche,Email,2024-02-03,1000,8000,3000,300,30\n\
         Mega,TV,2024-02-10,30000,45000,60000,500,40\n",
    );

    let monthly = doc["monthly"].as_array().unwrap();
    assert_eq!(monthly[0]["month"], "2024-01");
    assert_eq!(monthly[1]["month"], "2024-02");
    assert_eq!(monthly[1]["mom_spend_growth"], -48.33);
    assert_eq!(monthly[1]["mom_revenue_growth"], -11.67);

    let highlights = &doc["highlights"];
    assert_eq!(highlights["month"]["highest_spend_month"], "2024-01");
    assert_eq!(highlights["month"]["worst_roas_month"], "2024-01");
    assert_eq!(highlights["underperforming_campaigns"][0]["campaign"], "Mega");
    assert_eq!(highlights["scaling_opportunities"][0]["campaign"], "Niche");
    assert_eq!(highlights["top_roas_campaigns"][0]["campaign"], "Niche");
    assert_eq!(highlights["top_revenue_campaigns"][0]["campaign"], "Mega");

    let insights: Vec<&str> = doc["insights"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(insights.iter().any(|i| i.starts_with("Scaling Opportunities: Campaigns like Niche ")));
    assert!(insights.iter().any(|i| i.starts_with("Budget Waste Risk: Campaigns like Mega ")));
}

#[test]
fn missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("data").join("summary_data.json");
    let config = ReportConfig::with_paths(dir.path().join("absent.csv"), &output);

    let err = run(&config).unwrap_err();
    assert!(matches!(err, ReportError::InputNotFound(_)));
    assert!(!output.exists());
    assert!(!dir.path().join("data").exists());
}
