//! Report command implementations (dashboard, analytics, coach)

use anyhow::{Context, Result};
use axe_core::coach::weekday_name;
use axe_core::{Config, CoachReport, LedgerStore, Period, Severity};
use chrono::Datelike;

use super::{progress_bar, truncate};

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "🎉",
        Severity::Info => "💡",
        Severity::Warning => "⚠️ ",
        Severity::Critical => "🚨",
    }
}

pub fn cmd_dashboard(store: &LedgerStore, config: &Config, json: bool) -> Result<()> {
    let dashboard = store.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&*dashboard)?);
        return Ok(());
    }

    let summary = &dashboard.summary;

    println!();
    println!("📊 {} ({} days left)", dashboard.period, dashboard.days_left);
    println!("   ─────────────────────────────────────────────");

    if summary.has_budget() {
        println!(
            "   {} of {} spent {}",
            config.format_money(summary.total_spent),
            config.format_money(summary.total_budget),
            progress_bar(summary.progress, 20)
        );
        println!(
            "   Remaining:      {}",
            config.format_money(summary.remaining)
        );
        println!(
            "   Safe today:     {}",
            config.format_money(dashboard.safe_to_spend_today)
        );
    } else {
        println!(
            "   {} spent, no budget set",
            config.format_money(summary.total_spent)
        );
    }
    println!(
        "   Daily average:  {}",
        config.format_money(dashboard.daily_average)
    );
    println!("   {}", dashboard.pace_message);

    if let Some(insight) = dashboard.coach.headline() {
        println!();
        println!(
            "   {} {}: {}",
            severity_icon(insight.severity),
            insight.title,
            insight.description
        );
    }

    if !dashboard.recent.is_empty() {
        println!();
        println!("   Recent:");
        for tx in &dashboard.recent {
            println!(
                "   {} │ {:>10} │ {}",
                tx.date,
                config.format_money(tx.amount),
                truncate(&tx.title, 30)
            );
        }
    }

    Ok(())
}

pub fn cmd_analytics(
    store: &LedgerStore,
    config: &Config,
    month: Option<u32>,
    year: Option<i32>,
    json: bool,
) -> Result<()> {
    let today = store.today();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());
    let period = Period::new(year, month)
        .with_context(|| format!("Invalid month: {}-{:02}", year, month))?;

    let report = store.analytics(period, config.daily_window_days);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.clamped {
        println!("   (future month requested, showing {})", report.period);
    }

    println!();
    println!("📈 Analytics for {}", report.period);
    println!("   ─────────────────────────────────────────────");
    println!(
        "   Spent:          {}",
        config.format_money(report.total_spent)
    );
    if report.total_budget > 0.0 {
        println!(
            "   Budget:         {}",
            config.format_money(report.total_budget)
        );
    }
    println!("   Transactions:   {}", report.transaction_count);
    println!(
        "   Daily average:  {}",
        config.format_money(report.daily_average)
    );

    if !report.breakdown.items.is_empty() || report.breakdown.uncategorized.amount > 0.0 {
        println!();
        println!("   By category:");
        for item in &report.breakdown.items {
            println!(
                "   {:<20} {:>10} {:>5.1}%",
                truncate(&item.name, 20),
                config.format_money(item.amount),
                item.percentage
            );
        }
        let uncategorized = &report.breakdown.uncategorized;
        if uncategorized.amount > 0.0 {
            println!(
                "   {:<20} {:>10} {:>5.1}%",
                "Uncategorized",
                config.format_money(uncategorized.amount),
                uncategorized.percentage
            );
        }
    }

    let peak = report
        .daily
        .iter()
        .map(|d| d.amount)
        .fold(0.0_f64, f64::max);
    if peak > 0.0 {
        println!();
        println!("   Last {} days:", report.daily.len());
        for day in &report.daily {
            let marker = if day.is_today { " ◀" } else { "" };
            println!(
                "   {} {:>10} {}{}",
                day.date.format("%a %d"),
                config.format_money(day.amount),
                progress_bar(day.amount / peak, 20),
                marker
            );
        }
    }

    if !report.highlights.is_empty() {
        println!();
        for highlight in &report.highlights {
            println!("   • {}", highlight);
        }
    }

    Ok(())
}

pub fn cmd_coach(store: &LedgerStore, json: bool) -> Result<()> {
    let dashboard = store.snapshot();
    let report: &CoachReport = &dashboard.coach;

    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!();
    println!("🧠 Coach");
    println!("   ─────────────────────────────────────────────");

    if report.insights.is_empty() {
        println!("   Nothing to flag yet. Keep logging purchases.");
    }
    for insight in &report.insights {
        println!(
            "   {} {} - {}",
            severity_icon(insight.severity),
            insight.title,
            insight.description
        );
    }

    if !report.triggers.is_empty() {
        println!();
        println!("   Triggers:");
        for trigger in &report.triggers {
            println!("   • {}: {}", trigger.title, trigger.description);
        }
    }

    if !report.recommendations.is_empty() {
        println!();
        println!("   Try this:");
        for tip in &report.recommendations {
            println!("   • {}", tip);
        }
    }

    let patterns = &report.patterns;
    if patterns.highest_weekday.is_some() || patterns.average_transaction.is_some() {
        println!();
        println!("   Patterns:");
        if let Some(day) = patterns.highest_weekday {
            println!("   • You spend the most on {}s", weekday_name(day));
        }
        if let Some(avg) = patterns.average_transaction {
            println!("   • Average purchase: {:.2}", avg);
        }
    }

    Ok(())
}
