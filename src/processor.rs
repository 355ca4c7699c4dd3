use crate::error::Result;
use crate::gateway::ProvisionerGateway;
use crate::parser::{self, PendingFile};
use crate::types::{AccountRecord, ParsedLine, RawRecord};
use serde::Serialize;
use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of one complete pass over a pending file
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub file: String,
    pub total_lines: usize,
    pub provisioned: usize,
    pub suppressed: usize,
    pub errors: Vec<String>,
}

/// Walks a pending file line by line, in file order, and drives the
/// provisioner for every record that survives validation.
pub struct Processor {
    gateway: Arc<dyn ProvisionerGateway>,
    pause: Duration,
    remove_first: bool,
}

impl Processor {
    pub fn new(gateway: Arc<dyn ProvisionerGateway>, pause: Duration, remove_first: bool) -> Self {
        Self {
            gateway,
            pause,
            remove_first,
        }
    }

    /// Validate one raw record.
    ///
    /// `Ok(Some)` is ready to provision. `Ok(None)` is a suppressed
    /// record (negative remaining days) that is dropped without any
    /// output. `Err` carries a record-level diagnostic; the run
    /// continues with the next line.
    fn validate_record(raw: &RawRecord) -> std::result::Result<Option<AccountRecord>, String> {
        // 4-token and 5-token forms both bind the first four fields; a
        // 5th token is accepted but ignored.
        let username = raw.tokens[0].trim();
        let password = raw.tokens[1].trim();
        let days_text = raw.tokens[2].trim();
        let limit = raw.tokens[3].trim();

        if username.is_empty() || password.is_empty() || days_text.is_empty() || limit.is_empty() {
            return Err(format!("missing or invalid data for user '{username}'"));
        }

        let remaining_days: i64 = days_text
            .parse()
            .map_err(|_| format!("remaining days '{days_text}' is not an integer"))?;

        if remaining_days < 0 {
            return Ok(None);
        }

        Ok(Some(AccountRecord {
            username: username.to_string(),
            password: password.to_string(),
            remaining_days,
            connection_limit: limit.to_string(),
            source_line: raw.line_number,
        }))
    }

    /// Issue the provisioning commands for one validated record:
    /// remove-then-create in removal mode, create only otherwise, with
    /// the fixed pause after every invocation.
    fn provision(&self, record: &AccountRecord) -> std::result::Result<(), String> {
        if self.remove_first {
            let removal = self.gateway.remove_user(&record.username).map_err(|e| {
                format!(
                    "remove-user failed for '{}': {}",
                    record.username, e
                )
            })?;
            println!("[line {}] executing: {}", record.source_line, removal.command);
            thread::sleep(self.pause);
        }

        let creation = self
            .gateway
            .create_user(
                &record.username,
                &record.password,
                record.adjusted_days(),
                &record.connection_limit,
            )
            .map_err(|e| format!("create-user failed for '{}': {}", record.username, e))?;
        println!("[line {}] executing: {}", record.source_line, creation.command);
        if !creation.output.is_empty() {
            println!("{}", creation.output);
        }
        thread::sleep(self.pause);

        Ok(())
    }

    /// Runs the full pass: classify, validate and provision every line
    /// in order, then delete the consumed file.
    pub fn run(&self, pending: &PendingFile) -> Result<RunReport> {
        info!(
            "Processing {} lines from {}",
            pending.lines.len(),
            pending.path.display()
        );
        println!("🔄 Processing {}", pending.path.display());

        let mut provisioned = 0;
        let mut suppressed = 0;
        let mut errors = Vec::new();

        for (i, line) in pending.lines.iter().enumerate() {
            let raw = match parser::classify_line(i + 1, line) {
                ParsedLine::Record(raw) => raw,
                ParsedLine::Malformed { line_number, text } => {
                    let msg = format!("[line {line_number}] malformed record: '{text}'");
                    warn!("Malformed record on line {}", line_number);
                    println!("⚠️  {msg}");
                    errors.push(msg);
                    continue;
                }
            };

            match Self::validate_record(&raw) {
                Ok(Some(record)) => match self.provision(&record) {
                    Ok(()) => provisioned += 1,
                    Err(reason) => {
                        let msg = format!("[line {}] {}", raw.line_number, reason);
                        warn!("Provisioning failed on line {}", raw.line_number);
                        println!("⚠️  {msg}");
                        errors.push(msg);
                    }
                },
                Ok(None) => {
                    suppressed += 1;
                }
                Err(reason) => {
                    let msg = format!("[line {}] {}", raw.line_number, reason);
                    warn!("Validation failed on line {}", raw.line_number);
                    println!("⚠️  {msg}");
                    errors.push(msg);
                }
            }
        }

        // The file is consumed exactly once, even when lines failed
        // validation; a bad file must not be re-picked on the next run.
        fs::remove_file(&pending.path)?;
        debug!("Deleted {}", pending.path.display());

        info!(
            "Pass complete: {} provisioned, {} suppressed, {} errors",
            provisioned,
            suppressed,
            errors.len()
        );

        Ok(RunReport {
            file: pending.path.display().to_string(),
            total_lines: pending.lines.len(),
            provisioned,
            suppressed,
            errors,
        })
    }
}
