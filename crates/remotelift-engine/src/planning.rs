//! Planning-phase detection
//!
//! The host engine does not tell the proxy whether an operation runs inside
//! a dry-run plan, so the original heuristic is kept: trace-level logging
//! plus non-interactive execution, observed through two environment flags.
//! The flag is passed through to the remote function informationally and
//! never alters local control flow.

/// Environment variable carrying the host engine's log level.
pub const ENV_LOG: &str = "REMOTELIFT_LOG";

/// Environment variable set to `1` when the host engine runs non-interactively.
pub const ENV_IN_AUTOMATION: &str = "REMOTELIFT_IN_AUTOMATION";

/// Whether the current run looks like a planning phase.
pub fn planning_enabled() -> bool {
    std::env::var(ENV_LOG).is_ok_and(|value| value == "TRACE")
        && std::env::var(ENV_IN_AUTOMATION).is_ok_and(|value| value == "1")
}
