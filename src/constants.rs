/// Crate-wide defaults and exit codes for the synchronization job.
/// Everything here can be overridden through config.toml or the CLI.

// Default locations
pub const DEFAULT_DROP_DIR: &str = "/root";
pub const DEFAULT_MANAGER_BIN: &str = "/opt/rustymanager/manager";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Extension the locator accepts when scanning the drop directory
pub const PENDING_FILE_EXT: &str = "txt";

/// Fixed pause between provisioning commands, in milliseconds
pub const DEFAULT_PAUSE_MS: u64 = 1000;

// Process exit codes. The scheduler tells "nothing to do" apart from a
// failed run by status alone.
pub const EXIT_OK: i32 = 0;
pub const EXIT_RUN_FAILED: i32 = 1;
pub const EXIT_NO_PENDING_FILE: i32 = 2;
