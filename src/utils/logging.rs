use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the filter given on the command line.
pub fn initialize_logging(default_filter: &str) -> Result<(), tracing_subscriber::filter::ParseError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}
