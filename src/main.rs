//! teigen: TEI Dictionary Generator
//!
//! Generates every missing bilingual TEI dictionary listed in the conversion
//! catalog by running an XSLT processor and an XML formatter per language.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::ProgressBar;

use teigen::cli::Cli;
use teigen::pipeline::{plan_tasks, run_tasks, Layout, TaskEvent, TaskStatus};
use teigen::report::{display_summary, export_run_report, RunReport};
use teigen::utils::{
    create_spinner, print_banner, print_completion, print_config, print_failure, print_info,
    print_planned, print_skipped, print_step_header, print_success, print_warning, ConfigCard,
};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let layout = Layout::new(cli.base_dir()?);
    let catalog = cli.catalog()?;
    let options = cli.run_options();
    let policy = options.policy.to_string();

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    print_config(&ConfigCard {
        base_dir: layout.base_dir(),
        catalog: cli.catalog.as_deref(),
        transform_tool: &cli.transform_tool,
        format_tool: &cli.format_tool,
        policy: &policy,
        task_count: catalog.task_count(),
    });

    // Step 1: Resolve every language before anything touches the disk
    print_step_header(1, "Plan Conversions");

    let tasks = plan_tasks(&catalog, &layout)?;
    let satisfied = tasks.iter().filter(|t| t.is_satisfied()).count();
    print_success(&format!("Resolved {} conversion(s)", tasks.len()));
    println!(
        "      {} already present, {} to generate",
        style(satisfied).cyan(),
        style(tasks.len() - satisfied).yellow().bold()
    );

    if satisfied < tasks.len() && !layout.tei_dir().is_dir() {
        print_warning(&format!(
            "Output directory {} does not exist; conversions will fail",
            layout.tei_dir().display()
        ));
    }

    // Step 2: Run the tools for every missing output, one at a time
    print_step_header(2, if options.dry_run { "Dry Run" } else { "Generate Dictionaries" });

    let step_start = Instant::now();
    let mut runner = cli.runner();
    let mut spinner: Option<ProgressBar> = None;

    let summary = run_tasks(tasks, &mut runner, options, |event| match event {
        TaskEvent::Started(task) => {
            spinner = Some(create_spinner(&format!("Generating {}...", task.label())));
        }
        TaskEvent::Finished(record) => {
            let label = record.task.label();
            match &record.status {
                TaskStatus::Skipped => print_skipped(&label),
                TaskStatus::Planned => print_planned(&label, &record.task.output_path),
                TaskStatus::Generated => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    print_success(&format!(
                        "{} ({:.1}s)",
                        label,
                        record.elapsed.as_secs_f64()
                    ));
                }
                TaskStatus::Failed(failure) => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    print_failure(&format!("{}: {}", label, failure));
                }
            }
            if let Some(err) = &record.cleanup_error {
                print_warning(err);
            }
        }
    });

    if summary.records.is_empty() {
        print_info("Nothing to do");
    }
    println!(
        "    {} {:.2}s",
        style("⏱").dim(),
        step_start.elapsed().as_secs_f64()
    );

    display_summary(&summary);

    if let Some(report_path) = &cli.report {
        let report = RunReport::new(&summary, layout.base_dir(), &options);
        export_run_report(&report, report_path)?;
        println!();
        print_success(&format!("Report written to {}", report_path.display()));
    }

    print_completion(summary.is_success());

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
