use tracing_subscriber::EnvFilter;

const QUIET_TARGETS: &str = "rmcp=warn,serve_inner=warn";

/// Log filter from `INTERVALS_ICU_LOG_LEVEL`, then `RUST_LOG`, then `info`,
/// with rmcp internals kept at `warn`.
pub fn filter_directives(get: impl Fn(&str) -> Option<String>) -> String {
    let level = get("INTERVALS_ICU_LOG_LEVEL")
        .or_else(|| get("RUST_LOG"))
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "info".to_string());
    format!("{level},{QUIET_TARGETS}")
}

/// Install the compact stderr subscriber. Stdout stays free for the stdio
/// transport.
pub fn init() -> String {
    let directives = filter_directives(|k| std::env::var(k).ok());
    let env_filter = EnvFilter::try_new(&directives)
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{QUIET_TARGETS}")));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    directives
}
