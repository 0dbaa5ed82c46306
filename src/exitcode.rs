//! Process exit codes

/// Any handled error: configuration, remote or transport failure
pub const FAILURE: i32 = 1;
