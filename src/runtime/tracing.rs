/// Initializes the tracing subscriber for the application.
///
/// Verbosity comes from `RUST_LOG`, e.g. `RUST_LOG=shopfront=debug` to see
/// every store transition or `RUST_LOG=resource_store=debug` for the store
/// actors alone. Output is compact and omits targets; store and client events
/// carry `entity_type` and `op` fields instead.
///
/// Call once at startup. A second call panics, as with any global subscriber.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
