// =============================================================================
// Report rendering — plain-text messages for delivery
// =============================================================================

use std::fmt::Write as _;

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_BORDERS_ONLY, Cell, Table};

use crate::analysis::AnalysisReport;
use crate::news::NewsEvent;
use crate::screener::ScreenResult;

/// Render one analysis plus any upcoming events as a multi-line message.
pub fn render_analysis(report: &AnalysisReport, news: &[NewsEvent]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", report.symbol, report.timeframe);
    let _ = writeln!(out, "Price: {:.4}", report.current_price);
    let _ = writeln!(out, "MA{}: {:.4}", report.ma_short_window, report.ma_short);
    let _ = writeln!(out, "MA{}: {:.4}", report.ma_long_window, report.ma_long);
    let _ = writeln!(out, "{}", report.rsi_condition_text);
    let _ = writeln!(out, "Trend: {}", report.regime_text);
    let _ = write!(out, "Signal: {}", report.signal);

    if !news.is_empty() {
        out.push_str("\nUpcoming events:");
        for event in news {
            let _ = write!(out, "\n  {} {}", event.date.format("%Y-%m-%d"), event.label);
        }
    }

    out
}

/// Render screener matches as a two-column table, one symbol per row in
/// input order.
pub fn render_screen(results: &[ScreenResult]) -> String {
    if results.is_empty() {
        return "No candidates.".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_BORDERS_ONLY)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![Cell::new("Symbol"), Cell::new("Signal")]);

    for r in results {
        table.add_row(vec![Cell::new(&r.symbol), Cell::new(r.signal)]);
    }

    table.to_string()
}
