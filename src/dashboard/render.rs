// file: src/dashboard/render.rs
// description: terminal rendering of dashboard sections
// reference: pipeline health kpis, insight tables and charts

use crate::dashboard::analytics::{self, ConfidenceBin};
use crate::exporter::Table;
use crate::models::{InsightRecord, Priority, ProcessingMetrics, ReviewItem};
use crate::utils::format::{
    format_amount, format_confidence, format_ratio_percent, format_thousands, format_usd,
    format_usd_whole, review_flag,
};
use colored::Colorize;

pub const NO_MATCHES: &str = "No documents match the selected filters.";
pub const REVIEW_QUEUE_EMPTY: &str = "✅ No documents currently require manual review!";

/// One headline number with its caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    pub label: &'static str,
    pub value: String,
    pub delta: String,
}

pub fn kpis(metrics: &ProcessingMetrics) -> Vec<Kpi> {
    vec![
        Kpi {
            label: "Pipeline Health",
            value: metrics.pipeline_health_status.clone(),
            delta: format!("{:.1}% Complete", metrics.completion_percentage),
        },
        Kpi {
            label: "Documents Processed",
            value: format_thousands(metrics.insight_documents),
            delta: format!("of {} raw", format_thousands(metrics.raw_documents)),
        },
        Kpi {
            label: "Avg Confidence",
            value: format_ratio_percent(metrics.avg_overall_confidence),
            delta: "Quality Score".to_string(),
        },
        Kpi {
            label: "Manual Review Queue",
            value: format_thousands(metrics.documents_needing_review),
            delta: format!("{:.1}% of total", metrics.manual_review_percentage),
        },
        Kpi {
            label: "Total Value Processed",
            value: format_usd_whole(metrics.total_value_processed_usd),
            delta: "USD".to_string(),
        },
    ]
}

pub fn render_kpis(kpis: &[Kpi]) -> String {
    kpis.iter()
        .map(|k| format!("  {:<24}{:>18}   {}", k.label, k.value, k.delta.dimmed()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn insights_table(insights: &[InsightRecord]) -> Table {
    let mut table = Table::new([
        "Type",
        "Vendor/Territory",
        "Amount",
        "Date",
        "Priority",
        "Confidence",
        "Needs Review",
    ]);
    for insight in insights {
        table.push_row([
            insight.document_type.clone(),
            insight.vendor_territory.clone().unwrap_or_default(),
            format_amount(insight.total_amount),
            insight.document_date.clone().unwrap_or_default(),
            insight.priority_level.clone().unwrap_or_default(),
            format_confidence(insight.confidence_score),
            review_flag(insight.requires_manual_review).to_string(),
        ]);
    }
    table
}

pub fn review_table(items: &[ReviewItem]) -> Table {
    let mut table = Table::new([
        "Type",
        "Vendor/Territory",
        "Amount",
        "Priority",
        "Confidence",
        "Created",
    ]);
    for item in items {
        table.push_row([
            item.document_type.clone(),
            item.vendor_territory.clone().unwrap_or_default(),
            format_amount(item.total_amount),
            item.priority_level.clone().unwrap_or_default(),
            format_confidence(item.confidence_score),
            item.insight_created_at.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub fn insights_header(count: usize, limit: usize) -> String {
    format!(
        "Showing {} documents (max {})",
        format_thousands(count as i64),
        format_thousands(limit as i64)
    )
}

pub fn review_header(count: usize, limit: usize) -> String {
    format!(
        "{} documents require manual review (showing top {} by priority)",
        count, limit
    )
}

/// Plain-text grid with columns padded to their widest cell.
pub fn render_table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| {
                let pad = w.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let separator = widths
        .iter()
        .map(|&w| "-".repeat(w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut out = vec![line(table.headers.as_slice()), separator];
    out.extend(table.rows.iter().map(|r| line(r.as_slice())));
    out.join("\n")
}

/// Horizontal bar chart scaled so the largest value spans `width` cells.
pub fn render_bar_chart(
    entries: &[(String, f64)],
    width: usize,
    value_fmt: fn(f64) -> String,
) -> String {
    render_colored_bar_chart(entries, width, value_fmt, |_| None)
}

/// Same as [`render_bar_chart`], with a per-label RGB colour for the bar.
pub fn render_colored_bar_chart(
    entries: &[(String, f64)],
    width: usize,
    value_fmt: fn(f64) -> String,
    bar_color: impl Fn(&str) -> Option<(u8, u8, u8)>,
) -> String {
    let max = entries.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let label_width = entries.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

    entries
        .iter()
        .map(|(label, value)| {
            let cells = if max > 0.0 {
                ((value / max) * width as f64).round() as usize
            } else {
                0
            };
            let pad = label_width - label.chars().count();
            let bar = "█".repeat(cells);
            let bar = match bar_color(label) {
                Some((r, g, b)) => bar.truecolor(r, g, b).to_string(),
                None => bar,
            };
            format!(
                "  {}{}  {} {}",
                label,
                " ".repeat(pad),
                bar,
                value_fmt(*value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn count_fmt(value: f64) -> String {
    format_thousands(value as i64)
}

pub fn value_by_type_chart(insights: &[InsightRecord], width: usize) -> String {
    let entries: Vec<(String, f64)> = analytics::value_by_type(insights).into_iter().collect();
    render_bar_chart(&entries, width, format_usd)
}

pub fn priority_chart(insights: &[InsightRecord], width: usize) -> String {
    let entries: Vec<(String, f64)> = analytics::priority_counts(insights)
        .into_iter()
        .map(|(label, count)| (label, count as f64))
        .collect();
    render_colored_bar_chart(&entries, width, count_fmt, priority_bar_color)
}

fn priority_bar_color(label: &str) -> Option<(u8, u8, u8)> {
    let priority = label.parse::<Priority>().ok()?;
    hex_rgb(priority.color_hex())
}

/// `#RRGGBB` to an RGB triple.
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Only bins between the first and last non-empty one are drawn.
pub fn confidence_chart(insights: &[InsightRecord], width: usize) -> String {
    let bins = analytics::confidence_histogram(insights);
    let first = bins.iter().position(|b| b.count > 0);
    let last = bins.iter().rposition(|b| b.count > 0);

    let visible: &[ConfidenceBin] = match (first, last) {
        (Some(f), Some(l)) => &bins[f..=l],
        _ => &[],
    };

    let entries: Vec<(String, f64)> = visible
        .iter()
        .map(|b| (b.label(), b.count as f64))
        .collect();
    render_bar_chart(&entries, width, count_fmt)
}

pub fn section(title: &str) -> String {
    format!("\n{}\n{}", title.bold(), "─".repeat(title.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metrics() -> ProcessingMetrics {
        ProcessingMetrics {
            pipeline_health_status: "HEALTHY".to_string(),
            completion_percentage: 94.44,
            insight_documents: 1700,
            raw_documents: 1800,
            avg_overall_confidence: 0.9123,
            documents_needing_review: 3,
            manual_review_percentage: 17.64,
            total_value_processed_usd: 1_250_000.5,
        }
    }

    #[test]
    fn test_kpi_formatting() {
        let kpis = kpis(&metrics());
        assert_eq!(kpis.len(), 5);
        assert_eq!(kpis[0].delta, "94.4% Complete");
        assert_eq!(kpis[1].value, "1,700");
        assert_eq!(kpis[1].delta, "of 1,800 raw");
        assert_eq!(kpis[2].value, "91.23%");
        assert_eq!(kpis[3].delta, "17.6% of total");
        assert_eq!(kpis[4].value, "$1,250,000");
    }

    #[test]
    fn test_headers() {
        assert_eq!(insights_header(12, 1000), "Showing 12 documents (max 1,000)");
        assert_eq!(
            review_header(3, 50),
            "3 documents require manual review (showing top 50 by priority)"
        );
    }

    #[test]
    fn test_insight_row_formatting() {
        let insight = InsightRecord {
            insight_id: Some("I1".to_string()),
            document_id: "DOC_1".to_string(),
            document_type: "Invoice".to_string(),
            total_amount: None,
            currency: None,
            document_date: Some("2024-05-01".to_string()),
            vendor_territory: Some("Acme Corp".to_string()),
            confidence_score: Some(0.875),
            requires_manual_review: true,
            priority_level: Some("High".to_string()),
            business_category: None,
            processing_time_seconds: None,
            insight_created_at: None,
        };
        let table = insights_table(&[insight]);
        assert_eq!(
            table.rows[0],
            vec!["Invoice", "Acme Corp", "N/A", "2024-05-01", "High", "87.50%", "⚠️ Yes"]
        );
    }

    #[test]
    fn test_render_table_pads_columns() {
        let mut table = Table::new(["A", "Long header"]);
        table.push_row(["value", "x"]);
        assert_eq!(
            render_table(&table),
            "A     | Long header\n------+------------\nvalue | x"
        );
    }

    #[test]
    fn test_bar_chart_scales_to_max() {
        let entries = vec![("High".to_string(), 4.0), ("Low".to_string(), 2.0)];
        let chart = render_bar_chart(&entries, 10, count_fmt);
        assert_eq!(
            chart,
            format!("  High  {} 4\n  Low   {} 2", "█".repeat(10), "█".repeat(5))
        );
    }

    #[test]
    fn test_priority_bar_colors() {
        assert_eq!(hex_rgb("#FF6B6B"), Some((255, 107, 107)));
        assert_eq!(hex_rgb("FFA500"), None);
        assert_eq!(hex_rgb("#FFA5"), None);
        assert_eq!(priority_bar_color("Medium"), Some((255, 165, 0)));
        assert_eq!(priority_bar_color("low"), Some((78, 205, 196)));
        assert_eq!(priority_bar_color("Urgent"), None);
    }

    #[test]
    fn test_colored_chart_keeps_bar_lengths() {
        let entries = vec![("High".to_string(), 3.0), ("Low".to_string(), 1.0)];
        let chart = render_colored_bar_chart(&entries, 6, count_fmt, priority_bar_color);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0].matches('█').count(), 6);
        assert_eq!(lines[1].matches('█').count(), 2);
        assert!(lines[0].starts_with("  High  "));
        assert!(lines[1].ends_with(" 1"));
    }

    #[test]
    fn test_confidence_chart_empty() {
        assert_eq!(confidence_chart(&[], 20), "");
    }
}
