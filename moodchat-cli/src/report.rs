use anyhow::Result;
use moodchat_core::{AlertStatus, HealthReport, TrendDirection};

/// Render the report for a terminal. `--json` callers get the serialized
/// struct instead.
pub fn print_report(report: &HealthReport) -> Result<()> {
    println!("# Mood report\n");
    println!("Generated: {}", report.generated_at.to_rfc3339());

    let s = &report.statistics;
    println!("\n## Statistics\n");
    println!("- Total entries: {}", s.total_entries);
    println!(
        "- Positive / neutral / negative: {} / {} / {}",
        s.positive_entries, s.neutral_entries, s.negative_entries
    );
    println!("- Positive share: {:.1}%", s.positive_percentage);
    println!("- Avg classifier confidence: {:.1}%", s.avg_confidence * 100.0);
    println!("- Trend: {}", trend_word(s.trend));

    let w = &report.window;
    println!("\n## Rolling window ({} days ending {})\n", w.window_days, w.as_of);
    println!("- Days with data: {}", w.days_with_data);
    println!("- Negative days: {}", w.negative_days);
    println!("- Negative ratio: {:.0}%", w.negative_ratio * 100.0);

    println!("\n## Alert\n");
    match report.alert.status {
        AlertStatus::Normal => println!("- Status: NORMAL (mood is stable)"),
        AlertStatus::Watch => println!("- Status: WATCH (soft signal, keep an eye on it)"),
        AlertStatus::Alerted => {
            println!("- Status: ALERTED");
            println!("  Please consider reaching out to a mental health professional.");
        }
    }
    if let Some(day) = report.alert.last_alert_at {
        println!("- Last alert: {day}");
    }

    println!("\n## Recommendation\n");
    println!("{}", report.recommendation);
    Ok(())
}

fn trend_word(t: TrendDirection) -> &'static str {
    match t {
        TrendDirection::Improving => "improving",
        TrendDirection::Declining => "declining",
        TrendDirection::Stable => "stable",
        TrendDirection::Unknown => "not enough data",
    }
}
