//! Text rendering of the metrics panel and company record.

use std::fmt::Write as _;

use market_data::models::{bar_series::BarSeries, company::CompanyInfo};

use crate::analytics::{DerivedSeries, ReturnSummary};
use crate::pipeline::DisplayOptions;

fn opt_text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn opt_fmt(value: Option<f64>, render: impl Fn(f64) -> String) -> String {
    value.map_or_else(|| "N/A".to_string(), render)
}

/// Renders the full analysis report for one completed cycle.
///
/// Statistical blocks degrade to `N/A` rather than failing: a two-bar
/// series still renders, as does a company record with every field absent.
#[must_use]
pub fn render_report(
    series: &BarSeries,
    derived: &DerivedSeries,
    summary: Option<&ReturnSummary>,
    company: Option<&CompanyInfo>,
    options: &DisplayOptions,
) -> String {
    let mut out = String::new();

    let title = format!("{} ({}) Analysis", series.symbol, series.period);
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.len()));

    if let Some(info) = company {
        let _ = writeln!(out);
        let _ = writeln!(out, "Company Information");
        let _ = writeln!(out, "  Name:        {}", opt_text(&info.name));
        let _ = writeln!(out, "  Sector:      {}", opt_text(&info.sector));
        let _ = writeln!(out, "  Industry:    {}", opt_text(&info.industry));
        let _ = writeln!(out, "  Country:     {}", opt_text(&info.country));
        let _ = writeln!(
            out,
            "  Market Cap:  {}",
            opt_fmt(info.market_cap, |v| format!("${:.2}B", v / 1e9))
        );
        let _ = writeln!(
            out,
            "  52 Week High: {}",
            opt_fmt(info.fifty_two_week_high, |v| format!("${v:.2}"))
        );
        let _ = writeln!(
            out,
            "  52 Week Low:  {}",
            opt_fmt(info.fifty_two_week_low, |v| format!("${v:.2}"))
        );
        let _ = writeln!(out, "  Beta:        {}", opt_fmt(info.beta, |v| format!("{v:.2}")));
    }

    let Some(last) = series.bars.last() else {
        let _ = writeln!(out);
        let _ = writeln!(out, "No data available for this period.");
        return out;
    };
    let first = &series.bars[0];

    let change_pct = derived
        .daily_return
        .last()
        .copied()
        .flatten()
        .map(|r| r * 100.0);
    let total_return_pct = if first.close != 0.0 {
        Some((last.close / first.close - 1.0) * 100.0)
    } else {
        None
    };
    let avg_volume = series.bars.iter().map(|b| b.volume as f64).sum::<f64>()
        / series.bars.len() as f64;

    let _ = writeln!(out);
    let _ = writeln!(out, "Key Metrics");
    let _ = writeln!(
        out,
        "  Current Price:    ${:.2} ({})",
        last.close,
        opt_fmt(change_pct, |v| format!("{v:+.2}%"))
    );
    let _ = writeln!(
        out,
        "  Total Return:     {}",
        opt_fmt(total_return_pct, |v| format!("{v:+.2}%"))
    );
    let _ = writeln!(out, "  Avg Daily Volume: {:.2}M", avg_volume / 1e6);
    let _ = writeln!(
        out,
        "  Volatility (20d): {}",
        opt_fmt(derived.latest_volatility(), |v| format!("{:.2}%", v * 100.0))
    );

    if options.returns {
        if let Some(summary) = summary {
            let _ = writeln!(out);
            let _ = writeln!(out, "Daily Return Statistics");
            let _ = writeln!(out, "  Mean Return:   {:.4}%", summary.mean * 100.0);
            let _ = writeln!(
                out,
                "  Std Deviation: {}",
                opt_fmt(summary.std_dev, |v| format!("{:.4}%", v * 100.0))
            );
            let _ = writeln!(out, "  Min Return:    {:.2}%", summary.min * 100.0);
            let _ = writeln!(out, "  Max Return:    {:.2}%", summary.max * 100.0);
            let _ = writeln!(
                out,
                "  Sharpe Ratio (approx): {}",
                opt_fmt(summary.sharpe, |v| format!("{v:.2}"))
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use market_data::models::{bar::Bar, period::Period};

    fn series_from_closes(closes: &[f64]) -> BarSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: (start + chrono::Days::new(i as u64))
                    .and_time(NaiveTime::MIN)
                    .and_utc(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 2_000_000,
            })
            .collect();
        BarSeries {
            symbol: "TEST".to_string(),
            period: Period::SixMonths,
            bars,
        }
    }

    fn render(closes: &[f64], company: Option<&CompanyInfo>) -> String {
        let series = series_from_closes(closes);
        let derived = DerivedSeries::compute(&series);
        let summary = ReturnSummary::from_daily_returns(&derived.daily_return);
        render_report(
            &series,
            &derived,
            summary.as_ref(),
            company,
            &DisplayOptions::default(),
        )
    }

    #[test]
    fn renders_key_metrics_for_a_short_series() {
        let report = render(&[100.0, 102.0], None);

        assert!(report.contains("TEST (6mo) Analysis"));
        assert!(report.contains("Current Price:    $102.00 (+2.00%)"));
        assert!(report.contains("Total Return:     +2.00%"));
        assert!(report.contains("Avg Daily Volume: 2.00M"));
        // Two bars cannot fill a 20-day volatility window.
        assert!(report.contains("Volatility (20d): N/A"));
    }

    #[test]
    fn company_block_prints_absent_fields_as_na() {
        let info = CompanyInfo {
            symbol: "TEST".to_string(),
            name: Some("Test Corp".to_string()),
            ..CompanyInfo::default()
        };
        let report = render(&[100.0, 102.0], Some(&info));

        assert!(report.contains("Name:        Test Corp"));
        assert!(report.contains("Sector:      N/A"));
        assert!(report.contains("Market Cap:  N/A"));
    }

    #[test]
    fn company_block_is_omitted_without_a_record() {
        let report = render(&[100.0, 102.0], None);
        assert!(!report.contains("Company Information"));
    }

    #[test]
    fn degenerate_statistics_render_as_na() {
        // Identical returns: std defined but zero, Sharpe undefined.
        let report = render(&[100.0, 200.0, 400.0], None);
        assert!(report.contains("Sharpe Ratio (approx): N/A"));
    }

    #[test]
    fn returns_toggle_hides_the_statistics_block() {
        let series = series_from_closes(&[100.0, 102.0]);
        let derived = DerivedSeries::compute(&series);
        let summary = ReturnSummary::from_daily_returns(&derived.daily_return);
        let options = DisplayOptions {
            returns: false,
            ..DisplayOptions::default()
        };
        let report = render_report(&series, &derived, summary.as_ref(), None, &options);

        assert!(!report.contains("Daily Return Statistics"));
        assert!(report.contains("Key Metrics"));
    }

    #[test]
    fn single_bar_renders_without_change_or_statistics() {
        let report = render(&[100.0], None);
        assert!(report.contains("Current Price:    $100.00 (N/A)"));
        assert!(report.contains("Total Return:     +0.00%"));
    }
}
