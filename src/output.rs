use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

/// Write `value` as pretty JSON.
///
/// The document goes to a temp file beside `path` first and is renamed into
/// place on success, so a failed run never leaves a partial report behind.
/// Missing parent directories are created.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension(format!(
        "{}.tmp",
        path.extension().and_then(|e| e.to_str()).unwrap_or("")
    ));

    let result = (|| -> Result<()> {
        let s = serde_json::to_string_pretty(value)?;
        fs::write(&tmp_path, s)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Render the first `max_rows` rows as a markdown table.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table<T>(title: &str, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}", title);
    if rows.len() > max_rows {
        println!("(showing {} of {} rows)", max_rows, rows.len());
    }
    println!();
    println!("{}\n", render_table(rows, max_rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChannelSummary;

    fn channel(name: &str, spend: f64) -> ChannelSummary {
        ChannelSummary {
            channel: name.to_string(),
            spend,
            revenue: 0.0,
            conversions: 0.0,
            roas: 0.0,
            cpa: 0.0,
            cpc: 0.0,
            avg_ctr: 0.0,
            avg_cvr: 0.0,
        }
    }

    #[test]
    fn write_json_creates_parent_dirs_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("summary.json");
        write_json(&path, &serde_json::json!({ "ok": true })).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["ok"], true);

        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn render_table_limits_rows_and_formats_money() {
        let rows = vec![channel("Search", 1234567.891), channel("Social", 5.0)];
        let table = render_table(&rows, 1);
        assert!(table.contains("Search"));
        assert!(table.contains("1,234,567.89"));
        assert!(!table.contains("Social"));
        assert_eq!(render_table::<ChannelSummary>(&[], 3), "(no rows)");
    }

    #[test]
    fn render_table_shows_whole_conversions() {
        let mut row = channel("Search", 10.0);
        row.conversions = 15.7;
        let table = render_table(&[row], 5);
        assert!(table.contains(" 15 "));
        assert!(!table.contains("15.70"));
        assert!(!table.contains("15.00"));
    }
}
