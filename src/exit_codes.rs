//! Process exit codes used by the `mdlite` binary.

/// At least one rule reported an issue
pub const VIOLATIONS_FOUND: i32 = 1;

/// Invalid configuration, unreadable input or another tool failure
pub const TOOL_ERROR: i32 = 2;

/// Convenience functions that terminate the process with the matching code
pub mod exit {
    use super::{TOOL_ERROR, VIOLATIONS_FOUND};

    pub fn violations_found() -> ! {
        std::process::exit(VIOLATIONS_FOUND)
    }

    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR)
    }
}
