//! Skip policy for suites that need an embedded PostgreSQL cluster.
//!
//! Cluster bootstrap downloads binaries and needs a writable workspace, which
//! many sandboxes lack. Suites therefore skip with a `SKIP-TEST-CLUSTER`
//! marker unless `REQUIRE_TEST_CLUSTER` is truthy, in which case a bootstrap
//! failure fails the test so CI breakage is not masked.

/// Returns true when `REQUIRE_TEST_CLUSTER` is set to "1", "true", or "yes"
/// (case-insensitive).
pub fn test_cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles embedded cluster setup failures consistently across integration tests.
///
/// Prints a skip marker and returns `None`, or panics when the cluster is
/// required.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if test_cluster_required() {
        panic!("Test cluster setup failed: {reason}. Unset REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
