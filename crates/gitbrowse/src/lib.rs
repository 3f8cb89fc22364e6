pub mod app;
pub mod domain;
pub mod infra;

/// Install the global tracing subscriber.
///
/// Logs go to stderr; stdout is reserved for resolved URLs.
pub fn init() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
}
