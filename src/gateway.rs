use crate::error::Result;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Captured result of one provisioning invocation: the exact command
/// line issued and the tool's trimmed stdout. Display-only; never
/// parsed or branched on.
#[derive(Debug, Clone)]
pub struct ProvisionCommandResult {
    pub command: String,
    pub output: String,
}

/// Boundary around the external account-management tool.
///
/// Both operations block until the tool exits and report whatever it
/// printed; success is not verified here.
pub trait ProvisionerGateway: Send + Sync {
    /// Removes an account.
    fn remove_user(&self, username: &str) -> Result<ProvisionCommandResult>;

    /// Creates or updates an account with the given expiry and
    /// connection limit.
    fn create_user(
        &self,
        username: &str,
        password: &str,
        days: i64,
        limit: &str,
    ) -> Result<ProvisionCommandResult>;
}

/// Gateway implementation that shells out to the manager binary.
pub struct ManagerCli {
    bin: PathBuf,
}

impl ManagerCli {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    fn invoke(&self, args: &[&str]) -> Result<ProvisionCommandResult> {
        let command = format!("{} {}", self.bin.display(), args.join(" "));

        let output = Command::new(&self.bin)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        // Exit status is logged for the operator but never acted upon.
        debug!("{} exited with {}", command, output.status);

        Ok(ProvisionCommandResult {
            command,
            output: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        })
    }
}

impl ProvisionerGateway for ManagerCli {
    fn remove_user(&self, username: &str) -> Result<ProvisionCommandResult> {
        self.invoke(&["remove-user", username])
    }

    fn create_user(
        &self,
        username: &str,
        password: &str,
        days: i64,
        limit: &str,
    ) -> Result<ProvisionCommandResult> {
        let days = days.to_string();
        self.invoke(&["create-user", username, password, &days, limit])
    }
}
