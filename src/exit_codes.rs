/// Exit codes for gshlint, following Ruff's convention
///
/// These exit codes allow users and CI/CD systems to distinguish between
/// different types of failures.
/// Success - No shellcheck findings in any fragment
pub const SUCCESS: i32 = 0;

/// Findings reported - shellcheck flagged at least one embedded fragment
pub const FINDINGS_FOUND: i32 = 1;

/// Tool error - Bad arguments, unreadable input, or shellcheck could not run
pub const TOOL_ERROR: i32 = 2;
