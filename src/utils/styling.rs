//! Terminal styling utilities for console output

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static BOOK: Emoji<'_, '_> = Emoji("📖 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("🔧 ", "");
pub static SHIELD: Emoji<'_, '_> = Emoji("🛡️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("teigen").cyan().bold(),
        style("TEI dictionary generator").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Settings shown in the configuration card
pub struct ConfigCard<'a> {
    pub base_dir: &'a Path,
    pub catalog: Option<&'a Path>,
    pub transform_tool: &'a str,
    pub format_tool: &'a str,
    pub policy: &'a str,
    pub task_count: usize,
}

/// Print configuration card
pub fn print_config(card: &ConfigCard<'_>) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    let catalog = card
        .catalog
        .map(|p| truncate_path(p, 38))
        .unwrap_or_else(|| "built-in".to_string());

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Base:    {:<38}│",
        FOLDER,
        truncate_path(card.base_dir, 38)
    );
    println!("    │  {} Catalog: {:<38}│", BOOK, catalog);
    println!("    ├{}┤", line);
    println!(
        "    │  {} Tools:   {:<38}│",
        GEAR,
        truncate_string(&format!("{} | {}", card.transform_tool, card.format_tool), 38)
    );
    println!(
        "    │  {} Mode:    {:<38}│",
        SHIELD,
        style(format!("{} ({} conversions)", card.policy, card.task_count)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print a failure message
pub fn print_failure(message: &str) {
    println!("    {} {}", style("✗").red().bold(), style(message).red());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print a skipped-task line
pub fn print_skipped(label: &str) {
    println!(
        "    {} {} {}",
        style("·").dim(),
        style(label).dim(),
        style("(already present)").dim()
    );
}

/// Print a dry-run line for a task that would be generated
pub fn print_planned(label: &str, output: &Path) {
    println!(
        "    {} {} {} {}",
        style("○").yellow(),
        style(label).yellow(),
        style("→").dim(),
        style(output.display()).dim()
    );
}

/// Print the final completion message
pub fn print_completion(success: bool) {
    println!();
    if success {
        println!(
            "    {} {}",
            ROCKET,
            style("teigen run complete!").green().bold()
        );
    } else {
        println!(
            "    {} {}",
            WARN,
            style("teigen run finished with failures").red().bold()
        );
    }
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let tail: String = s
            .chars()
            .rev()
            .take(max_len - 3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_keeps_short_values() {
        assert_eq!(truncate_string("xsltproc", 38), "xsltproc");
    }

    #[test]
    fn test_truncate_string_keeps_tail() {
        let long = "/very/long/base/directory/for/dictionaries";
        let truncated = truncate_string(long, 20);
        assert_eq!(truncated.chars().count(), 20);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with("dictionaries"));
    }
}
