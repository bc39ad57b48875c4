//! # Terminal Rendering
//!
//! Plain-text tables and the developer bar chart, plus JSON output.
//! Every function returns a `String`; printing is left to `main.rs`.

use serde::Serialize;

use crate::commands::catalog::BrowseReport;
use crate::commands::status::StatusReport;
use crate::error::ApiError;
use discoverease_core::{AppAggregate, Application, CommandOutcome, FreeApp, TopDeveloper, TopRatedApp};

/// Width of the longest bar in the developer chart.
pub const BAR_WIDTH: usize = 40;

/// Pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::internal(format!("Could not serialize output: {}", e)))
}

/// Confirmation line followed by the affected records.
pub fn outcome(outcome: &CommandOutcome) -> String {
    format!("{}\n\n{}", outcome.message(), aggregate(outcome.aggregate()))
}

/// The three records of one app.
pub fn aggregate(agg: &AppAggregate) -> String {
    let mut out = String::from("Application\n");
    out.push_str(&apps_table(std::slice::from_ref(&agg.application)));

    out.push_str("\nDeveloper\n");
    match &agg.developer {
        Some(dev) => out.push_str(&table(
            &["Developer_Id", "Developer"],
            vec![vec![dev.developer_id.clone(), dev.developer.clone()]],
        )),
        None => out.push_str("(no developer record)\n"),
    }

    out.push_str("\nPricing\n");
    match &agg.pricing {
        Some(p) => out.push_str(&table(
            &["App_Id", "Price", "Currency"],
            vec![vec![p.app_id.clone(), format!("{:.2}", p.price), p.currency.clone()]],
        )),
        None => out.push_str("(no pricing record)\n"),
    }

    out
}

/// Application rows.
pub fn apps_table(apps: &[Application]) -> String {
    let rows = apps
        .iter()
        .map(|a| {
            vec![
                a.app_id.clone(),
                a.app_name.clone(),
                a.developer_id.clone(),
                a.genre.clone(),
                format!("{:.1}", a.size),
                a.app_version.clone(),
                a.ios_version.clone(),
                a.released_date.to_string(),
                a.updated_date.map(|d| d.to_string()).unwrap_or_default(),
                a.avg_user_rating.map(|r| format!("{:.1}", r)).unwrap_or_default(),
                a.age_group.clone(),
            ]
        })
        .collect();

    table(
        &[
            "App_Id",
            "App_name",
            "Developer_Id",
            "Genre",
            "Size",
            "App_version",
            "IOS_version",
            "Released_date",
            "Updated_date",
            "Avg_user_rating",
            "Age_group",
        ],
        rows,
    )
}

/// Horizontal bar chart of apps per developer.
///
/// Bars scale against the largest count; any non-zero count gets at least
/// one block.
pub fn developer_chart(rows: &[TopDeveloper]) -> String {
    let Some(max) = rows.iter().map(|r| r.total_apps).max().filter(|m| *m > 0) else {
        return "(no developers)\n".to_string();
    };
    let name_width = rows
        .iter()
        .map(|r| r.developer.chars().count())
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|r| {
            let len = if r.total_apps > 0 {
                ((r.total_apps as f64 / max as f64) * BAR_WIDTH as f64).round().max(1.0) as usize
            } else {
                0
            };
            format!(
                "{:<width$} | {} {}\n",
                r.developer,
                "█".repeat(len),
                r.total_apps,
                width = name_width
            )
        })
        .collect()
}

pub fn free_apps_table(rows: &[FreeApp]) -> String {
    table(
        &["App_name", "Developer"],
        rows.iter()
            .map(|r| vec![r.app_name.clone(), r.developer.clone()])
            .collect(),
    )
}

pub fn top_rated_table(rows: &[TopRatedApp]) -> String {
    table(
        &["genre", "App_Id", "App_name", "Developer", "Avg_user_rating"],
        rows.iter()
            .map(|r| {
                vec![
                    r.genre.clone(),
                    r.app_id.clone(),
                    r.app_name.clone(),
                    r.developer.clone().unwrap_or_default(),
                    r.avg_user_rating.map(|v| format!("{:.1}", v)).unwrap_or_default(),
                ]
            })
            .collect(),
    )
}

/// The full browse screen.
pub fn browse(report: &BrowseReport) -> String {
    let view = &report.view;
    let genre = view.selected_genre.as_deref().unwrap_or("-");

    let mut out = String::new();
    out.push_str("Sampled App Data\n");
    out.push_str(&apps_table(&view.preview));

    out.push_str(&format!("\nGenres: {}\n", view.genres.join(", ")));
    out.push_str(&format!(
        "\nTop 10 apps based on filters (genre: {}, {} matching)\n",
        genre, view.matched
    ));
    out.push_str(&apps_table(&view.filtered));

    if let Some(results) = &view.search {
        out.push_str("\nSearch results\n");
        out.push_str(&apps_table(results));
    }

    out.push_str("\nTop Developers by Total Apps Developed\n");
    out.push_str(&developer_chart(&report.top_developers));

    out.push_str(&format!("\nFree Applications Based on {} Genre\n", genre));
    out.push_str(&free_apps_table(&report.free_apps));

    out
}

pub fn status(report: &StatusReport) -> String {
    format!(
        "Database:     {}\nMigrations:   {}/{} applied\nApplications: {}\nDevelopers:   {}\nPricing:      {}\n",
        if report.healthy { "ok" } else { "unreachable" },
        report.migrations_applied,
        report.migrations_total,
        report.applications,
        report.developers,
        report.pricing,
    )
}

/// Left-aligned columns sized to their widest cell.
fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = line(headers.to_vec());
    out.push_str(&line(separator.iter().map(String::as_str).collect()));
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    for row in &rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev(name: &str, total: i64) -> TopDeveloper {
        TopDeveloper {
            developer: name.to_string(),
            total_apps: total,
        }
    }

    #[test]
    fn test_chart_scales_to_largest() {
        let chart = developer_chart(&[dev("Acme", 4), dev("Bo", 1)]);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("Acme | {} 4", "█".repeat(BAR_WIDTH)));
        assert_eq!(lines[1], format!("Bo   | {} 1", "█".repeat(BAR_WIDTH / 4)));
    }

    #[test]
    fn test_empty_chart() {
        assert_eq!(developer_chart(&[]), "(no developers)\n");
    }

    #[test]
    fn test_table_pads_columns() {
        let out = free_apps_table(&[FreeApp {
            app_name: "Block Drop".to_string(),
            developer: "Acme".to_string(),
        }]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "App_name    Developer");
        assert_eq!(lines[1], "----------  ---------");
        assert_eq!(lines[2], "Block Drop  Acme");
    }

    #[test]
    fn test_empty_table_says_so() {
        assert!(free_apps_table(&[]).ends_with("(no rows)\n"));
    }
}
