//! Run summary table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::RunSummary;

/// Print the summary table and list any failures
pub fn display_summary(summary: &RunSummary) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("RUN SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("📁 Planned Conversions"),
        Cell::new(summary.records.len() + summary.not_attempted),
    ]);

    table.add_row(vec![
        Cell::new("⏭️  Already Present"),
        Cell::new(summary.skipped()),
    ]);

    if summary.planned() > 0 {
        table.add_row(vec![
            Cell::new("📝 Would Generate"),
            Cell::new(summary.planned()).fg(Color::Yellow),
        ]);
    }

    table.add_row(vec![
        Cell::new("✅ Generated"),
        Cell::new(summary.generated())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("❌ Failed"),
        Cell::new(summary.failed()).fg(if summary.is_success() {
            Color::White
        } else {
            Color::Red
        }),
    ]);

    if summary.not_attempted > 0 {
        table.add_row(vec![
            Cell::new("⏹️  Not Attempted"),
            Cell::new(summary.not_attempted).fg(Color::Yellow),
        ]);
    }

    // Indent the table
    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    if !summary.is_success() {
        println!();
        println!(
            "    {} {}",
            style("📝").cyan(),
            style("FAILED CONVERSIONS").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());

        for (task, failure) in summary.failures() {
            println!();
            println!(
                "      {} {}",
                style(task.label()).yellow(),
                style(format!("({})", failure)).dim()
            );
            if let Some(stderr) = failure.stderr() {
                for line in stderr.lines() {
                    println!("        {} {}", style("│").dim(), line);
                }
            }
        }
    }
}
