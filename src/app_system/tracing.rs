/// Configure tracing once at startup for the whole process.
///
/// `RUST_LOG` controls verbosity and defaults to `info`:
///
/// ```bash
/// RUST_LOG=debug roster list
/// RUST_LOG=roster::store=debug,roster::remote=info roster session
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
