//! Conversion driver: plans every task and runs the ones whose output is missing
//!
//! Tasks run strictly one after another in catalog order. They all share the
//! same draft file, so a task's draft is removed before the next one starts.

use std::time::{Duration, Instant};

use super::catalog::Catalog;
use super::draft::{remove_if_present, DraftGuard};
use super::error::{PipelineError, TaskFailure};
use super::task::{plan_tasks, ConversionTask, Layout};
use super::tools::{FormatInvocation, ToolRunner, ToolStatus, TransformInvocation};

/// What happens after the transform tool fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Skip formatting, and delete any partial output left by a failed format
    /// so the next run regenerates it.
    #[default]
    Strict,
    /// Format whatever draft is on disk even after a failed transform, and
    /// leave partial outputs in place.
    Lenient,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Strict => write!(f, "strict"),
            FailurePolicy::Lenient => write!(f, "lenient"),
        }
    }
}

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub policy: FailurePolicy,
    /// Stop after the first failed task instead of continuing
    pub fail_fast: bool,
    /// Report what would run without starting any tool
    pub dry_run: bool,
}

/// Final state of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Output was produced during this run
    Generated,
    /// Output already existed
    Skipped,
    /// Output is missing but this was a dry run
    Planned,
    Failed(TaskFailure),
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Generated => "generated",
            TaskStatus::Skipped => "skipped",
            TaskStatus::Planned => "planned",
            TaskStatus::Failed(_) => "failed",
        }
    }
}

/// A task together with how it ended.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub task: ConversionTask,
    pub status: TaskStatus,
    pub elapsed: Duration,
    /// Set when the draft could not be removed after the task
    pub cleanup_error: Option<String>,
}

/// Progress notifications handed to the caller while the run is going.
#[derive(Debug)]
pub enum TaskEvent<'a> {
    /// The tools are about to be started for this task
    Started(&'a ConversionTask),
    Finished(&'a TaskRecord),
}

/// Everything a run did, in execution order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub records: Vec<TaskRecord>,
    /// Tasks never attempted because `fail_fast` stopped the run
    pub not_attempted: usize,
}

impl RunSummary {
    fn count(&self, status: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.status.as_str() == status)
            .count()
    }

    pub fn generated(&self) -> usize {
        self.count("generated")
    }

    pub fn skipped(&self) -> usize {
        self.count("skipped")
    }

    pub fn planned(&self) -> usize {
        self.count("planned")
    }

    pub fn failed(&self) -> usize {
        self.count("failed")
    }

    /// Failed tasks with their failure.
    pub fn failures(&self) -> impl Iterator<Item = (&ConversionTask, &TaskFailure)> {
        self.records.iter().filter_map(|r| match &r.status {
            TaskStatus::Failed(failure) => Some((&r.task, failure)),
            _ => None,
        })
    }

    /// True when no task failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Plan every task of `catalog` and run the unsatisfied ones.
///
/// Language codes are all resolved before the first tool starts, so a bad
/// catalog entry fails the run without touching the filesystem.
pub fn run_all<R, F>(
    catalog: &Catalog,
    layout: &Layout,
    runner: &mut R,
    options: RunOptions,
    observer: F,
) -> Result<RunSummary, PipelineError>
where
    R: ToolRunner,
    F: FnMut(TaskEvent<'_>),
{
    let tasks = plan_tasks(catalog, layout)?;
    Ok(run_tasks(tasks, runner, options, observer))
}

/// Run already planned tasks in order.
pub fn run_tasks<R, F>(
    tasks: Vec<ConversionTask>,
    runner: &mut R,
    options: RunOptions,
    mut observer: F,
) -> RunSummary
where
    R: ToolRunner,
    F: FnMut(TaskEvent<'_>),
{
    let mut summary = RunSummary::default();
    let total = tasks.len();

    for (index, task) in tasks.into_iter().enumerate() {
        let start = Instant::now();

        let (status, cleanup_error) = if task.is_satisfied() {
            (TaskStatus::Skipped, None)
        } else if options.dry_run {
            (TaskStatus::Planned, None)
        } else {
            observer(TaskEvent::Started(&task));
            run_task(&task, runner, options.policy)
        };

        let failed = matches!(status, TaskStatus::Failed(_));
        let record = TaskRecord {
            task,
            status,
            elapsed: start.elapsed(),
            cleanup_error,
        };
        observer(TaskEvent::Finished(&record));
        summary.records.push(record);

        if failed && options.fail_fast {
            summary.not_attempted = total - index - 1;
            break;
        }
    }

    summary
}

/// Transform, format, and clean up a single task.
///
/// Returns the task status and, if the draft could not be removed, why.
pub fn run_task<R: ToolRunner>(
    task: &ConversionTask,
    runner: &mut R,
    policy: FailurePolicy,
) -> (TaskStatus, Option<String>) {
    let draft = DraftGuard::new(&task.draft_path);

    let transform_failure = match runner.transform(&TransformInvocation::for_task(task)) {
        Ok(status) => check(status, |code, stderr| TaskFailure::Transform { code, stderr }),
        Err(err) => Some(TaskFailure::Spawn {
            message: err.to_string(),
        }),
    };

    let failure = match transform_failure {
        Some(failure) if policy == FailurePolicy::Strict => Some(failure),
        transform_failure => {
            let format_failure = match runner.format(&FormatInvocation::for_task(task)) {
                Ok(status) => check(status, |code, stderr| TaskFailure::Format { code, stderr }),
                Err(err) => Some(TaskFailure::Spawn {
                    message: err.to_string(),
                }),
            };

            if format_failure.is_some() && policy == FailurePolicy::Strict {
                // The output did not exist before this task, so anything there is ours.
                let _ = remove_if_present(&task.output_path);
            }

            transform_failure.or(format_failure)
        }
    };

    let cleanup_error = draft
        .release()
        .err()
        .map(|err| format!("Failed to remove {}: {}", task.draft_path.display(), err));

    let status = match failure {
        Some(failure) => TaskStatus::Failed(failure),
        None => TaskStatus::Generated,
    };

    (status, cleanup_error)
}

fn check(status: ToolStatus, failure: impl FnOnce(Option<i32>, String) -> TaskFailure) -> Option<TaskFailure> {
    if status.is_success() {
        None
    } else {
        Some(failure(status.code, status.stderr))
    }
}
