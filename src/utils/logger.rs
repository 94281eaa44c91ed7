use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("race_sheets=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("race_sheets=info"))
    }
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Structured output for log collectors; one JSON object per line.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
