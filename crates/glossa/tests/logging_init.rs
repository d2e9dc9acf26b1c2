//! Global subscriber installation. Kept in its own test binary because it
//! claims the process-wide dispatcher.

#[test]
fn init_installs_once() {
    assert!(glossa::logging::init());
    assert!(!glossa::logging::init());
    tracing::info!(target: "glossa.language", "subscriber is live");
}
