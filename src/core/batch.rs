use crate::app::pipelines::race_pipeline::RacePipeline;
use crate::config::settings::Settings;
use crate::core::etl::EtlEngine;
use crate::domain::model::Leaderboard;
use crate::domain::ports::{ReportRenderer, Storage};
use crate::utils::error::{ErrorSeverity, EtlError, Result};
use crate::utils::monitor::SystemMonitor;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{Id, JoinSet};

/// What happened to one input file.
#[derive(Debug)]
pub struct FileOutcome<T> {
    pub input: String,
    pub result: Result<T>,
}

/// Outcomes in completion order.
#[derive(Debug)]
pub struct BatchReport<T> {
    pub outcomes: Vec<FileOutcome<T>>,
}

impl<T> BatchReport<T> {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Worst severity among failed files, if any failed.
    pub fn worst_severity(&self) -> Option<ErrorSeverity> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err())
            .map(EtlError::severity)
            .max()
    }
}

/// Runs one independent pipeline task per input file.
pub struct BatchRunner<S, R> {
    storage: S,
    renderer: Arc<R>,
    settings: Arc<Settings>,
    monitor: Arc<SystemMonitor>,
}

impl<S, R> BatchRunner<S, R>
where
    S: Storage + Clone + 'static,
    R: ReportRenderer + 'static,
{
    pub fn new(storage: S, renderer: R, settings: Settings) -> Self {
        Self {
            storage,
            renderer: Arc::new(renderer),
            settings: Arc::new(settings),
            monitor: Arc::new(SystemMonitor::new(false)),
        }
    }

    pub fn with_monitor(mut self, monitor: Arc<SystemMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    fn engine(&self, input: &str) -> EtlEngine<RacePipeline<S, R>> {
        let pipeline = RacePipeline::new(
            self.storage.clone(),
            Arc::clone(&self.renderer),
            Arc::clone(&self.settings),
            input.to_string(),
        );
        EtlEngine::with_monitor(pipeline, Arc::clone(&self.monitor))
    }

    /// Converts every input and writes one artifact per successful file.
    pub async fn run(&self, inputs: &[String]) -> BatchReport<String> {
        let report = self
            .dispatch(inputs, |engine| async move { engine.run().await })
            .await;
        self.monitor.log_final_stats();
        report
    }

    /// Decodes every input without writing anything.
    pub async fn preview(&self, inputs: &[String]) -> BatchReport<Leaderboard> {
        self.dispatch(inputs, |engine| async move { engine.preview().await })
            .await
    }

    async fn dispatch<T, F, Fut>(&self, inputs: &[String], work: F) -> BatchReport<T>
    where
        T: Send + 'static,
        F: Fn(EtlEngine<RacePipeline<S, R>>) -> Fut,
        Fut: std::future::Future<Output = Result<T>> + Send + 'static,
    {
        let jobs = inputs
            .iter()
            .map(|input| (input.clone(), work(self.engine(input))))
            .collect::<Vec<_>>();
        join_all(jobs).await
    }
}

/// Spawns one task per named job and collects outcomes as tasks finish.
///
/// A task that panics is reported under its input name as a `TaskError`.
async fn join_all<T, Fut>(jobs: Vec<(String, Fut)>) -> BatchReport<T>
where
    T: Send + 'static,
    Fut: std::future::Future<Output = Result<T>> + Send + 'static,
{
    let mut tasks = JoinSet::new();
    let mut names: HashMap<Id, String> = HashMap::with_capacity(jobs.len());
    for (input, job) in jobs {
        let handle = tasks.spawn(job);
        names.insert(handle.id(), input);
    }

    let mut outcomes = Vec::with_capacity(names.len());
    while let Some(joined) = tasks.join_next_with_id().await {
        let outcome = match joined {
            Ok((id, result)) => FileOutcome {
                input: input_name(&mut names, id),
                result,
            },
            Err(e) => FileOutcome {
                input: input_name(&mut names, e.id()),
                result: Err(EtlError::TaskError {
                    message: e.to_string(),
                }),
            },
        };

        if let Err(e) = &outcome.result {
            tracing::error!("❌ {}: {}", outcome.input, e.user_friendly_message());
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        }
        outcomes.push(outcome);
    }

    BatchReport { outcomes }
}

fn input_name(names: &mut HashMap<Id, String>, id: Id) -> String {
    names.remove(&id).unwrap_or_else(|| format!("<task {}>", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_and_severity() {
        let report = BatchReport {
            outcomes: vec![
                FileOutcome {
                    input: "a.csv".to_string(),
                    result: Ok("a.xlsx".to_string()),
                },
                FileOutcome {
                    input: "b.csv".to_string(),
                    result: Err(EtlError::InputNotFound {
                        path: "b.csv".to_string(),
                    }),
                },
                FileOutcome {
                    input: "c.csv".to_string(),
                    result: Err(EtlError::MalformedHeader {
                        message: "no 'NumSplits' column in header".to_string(),
                    }),
                },
            ],
        };

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.worst_severity(), Some(ErrorSeverity::High));
    }

    #[tokio::test]
    async fn test_panicked_task_keeps_its_input_name() {
        async fn job(fail: bool) -> Result<String> {
            if fail {
                panic!("decoder blew up");
            }
            Ok("a.xlsx".to_string())
        }

        let report = join_all(vec![
            ("a.csv".to_string(), job(false)),
            ("b.csv".to_string(), job(true)),
        ])
        .await;

        assert_eq!(report.succeeded(), 1);
        let failed = report
            .outcomes
            .iter()
            .find(|o| o.result.is_err())
            .unwrap();
        assert_eq!(failed.input, "b.csv");
        assert!(matches!(failed.result, Err(EtlError::TaskError { .. })));
        assert_eq!(report.worst_severity(), Some(ErrorSeverity::Critical));
    }

    #[test]
    fn test_clean_report_has_no_severity() {
        let report: BatchReport<String> = BatchReport {
            outcomes: Vec::new(),
        };
        assert_eq!(report.worst_severity(), None);
    }
}
