// Entry point: one batch run per invocation.
//
// Loads the fixed input CSV, writes the JSON summary, then prints Markdown
// previews of the channel, month and campaign tables. A missing input file
// is reported and the run ends without producing output.
use spend_report::output::preview_table;
use spend_report::{logging, pipeline, ReportConfig, ReportError};
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    logging::init_logging();
    let config = ReportConfig::default();

    let report = match pipeline::run(&config) {
        Ok(report) => report,
        Err(ReportError::InputNotFound(path)) => {
            error!("Error: File {} not found.", path.display());
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            error!("Report generation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!();
    preview_table("Channel Performance (by ROAS)", &report.channels, 10);
    preview_table("Monthly Trend", &report.monthly, 12);
    preview_table("Campaigns", &report.campaigns, 10);

    println!("Insights:");
    for (idx, insight) in report.insights.iter().enumerate() {
        println!("  {}. {}", idx + 1, insight);
    }
    println!();
    ExitCode::SUCCESS
}
