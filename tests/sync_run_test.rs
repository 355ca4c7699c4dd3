use anyhow::Result;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use subsync::gateway::{ProvisionCommandResult, ProvisionerGateway};
use subsync::locator;
use subsync::parser;
use subsync::processor::{Processor, RunReport};
use tempfile::tempdir;

/// Test double that records every provisioning call in issue order.
#[derive(Default)]
struct RecordingGateway {
    calls: Mutex<Vec<String>>,
}

impl RecordingGateway {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProvisionerGateway for RecordingGateway {
    fn remove_user(&self, username: &str) -> subsync::error::Result<ProvisionCommandResult> {
        let call = format!("remove-user {username}");
        self.calls.lock().unwrap().push(call.clone());
        Ok(ProvisionCommandResult {
            command: format!("manager {call}"),
            output: String::new(),
        })
    }

    fn create_user(
        &self,
        username: &str,
        password: &str,
        days: i64,
        limit: &str,
    ) -> subsync::error::Result<ProvisionCommandResult> {
        let call = format!("create-user {username} {password} {days} {limit}");
        self.calls.lock().unwrap().push(call.clone());
        Ok(ProvisionCommandResult {
            command: format!("manager {call}"),
            output: "account ready".to_string(),
        })
    }
}

/// Writes `content` as the pending file in a fresh drop directory, runs
/// a full pass with zero pacing, and reports what the gateway saw and
/// whether the file survived.
fn run_drop_file(
    content: &str,
    remove_first: bool,
) -> Result<(Arc<RecordingGateway>, RunReport, bool)> {
    let dir = tempdir()?;
    let path = dir.path().join("accounts.txt");
    fs::write(&path, content)?;

    let gateway = Arc::new(RecordingGateway::default());
    let processor = Processor::new(gateway.clone(), Duration::ZERO, remove_first);
    let pending = parser::read_pending_file(&path)?;
    let report = processor.run(&pending)?;

    Ok((gateway, report, path.exists()))
}

#[test]
fn test_valid_record_creates_account_with_aged_expiry() -> Result<()> {
    let (gateway, report, file_exists) = run_drop_file("alice pw1 5 10\n", false)?;

    assert_eq!(gateway.calls(), vec!["create-user alice pw1 6 10"]);
    assert_eq!(report.provisioned, 1);
    assert_eq!(report.suppressed, 0);
    assert!(report.errors.is_empty());
    assert!(!file_exists, "pending file must be deleted after the pass");
    Ok(())
}

#[test]
fn test_negative_days_is_a_quiet_skip() -> Result<()> {
    let (gateway, report, file_exists) = run_drop_file("bob pw2 -3 5\n", false)?;

    assert!(gateway.calls().is_empty(), "no command for suppressed records");
    assert!(report.errors.is_empty(), "no diagnostic for suppressed records");
    assert_eq!(report.suppressed, 1);
    assert_eq!(report.provisioned, 0);
    assert!(!file_exists);
    Ok(())
}

#[test]
fn test_malformed_line_is_reported_and_file_still_deleted() -> Result<()> {
    let (gateway, report, file_exists) = run_drop_file("onlythree fields here\n", false)?;

    assert!(gateway.calls().is_empty());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("[line 1]"));
    assert!(report.errors[0].contains("onlythree fields here"));
    assert!(!file_exists);
    Ok(())
}

#[test]
fn test_removal_mode_removes_then_creates() -> Result<()> {
    let (gateway, report, _) = run_drop_file("carol pw3 2 7 extra\n", true)?;

    assert_eq!(
        gateway.calls(),
        vec!["remove-user carol", "create-user carol pw3 3 7"]
    );
    assert_eq!(report.provisioned, 1);
    Ok(())
}

#[test]
fn test_create_only_mode_never_removes() -> Result<()> {
    let (gateway, _, _) = run_drop_file("carol pw3 2 7\n", false)?;

    assert!(gateway.calls().iter().all(|c| c.starts_with("create-user")));
    Ok(())
}

#[test]
fn test_mixed_file_processes_every_line_in_order() -> Result<()> {
    let content = "alice pw1 5 10\n\
                   bad line\n\
                   bob pw2 -3 5\n\
                   carol pw3 0 7\n\
                   dave pw4 soon 2\n";
    let (gateway, report, file_exists) = run_drop_file(content, false)?;

    assert_eq!(
        gateway.calls(),
        vec!["create-user alice pw1 6 10", "create-user carol pw3 1 7"]
    );
    assert_eq!(report.total_lines, 5);
    assert_eq!(report.provisioned, 2);
    assert_eq!(report.suppressed, 1);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].contains("[line 2]"));
    assert!(report.errors[1].contains("[line 5]"));
    assert!(!file_exists, "deletion is unconditional after a full pass");
    Ok(())
}

#[test]
fn test_all_invalid_lines_still_consume_the_file() -> Result<()> {
    let (gateway, report, file_exists) = run_drop_file("x\ny z\n", false)?;

    assert!(gateway.calls().is_empty());
    assert_eq!(report.errors.len(), 2);
    assert!(!file_exists);
    Ok(())
}

#[test]
fn test_repeated_usernames_are_not_deduplicated() -> Result<()> {
    let content = "alice pw1 5 10\nalice pw9 1 2\n";
    let (gateway, _, _) = run_drop_file(content, false)?;

    assert_eq!(
        gateway.calls(),
        vec!["create-user alice pw1 6 10", "create-user alice pw9 2 2"]
    );
    Ok(())
}

#[test]
fn test_empty_drop_directory_has_nothing_to_do() -> Result<()> {
    let dir = tempdir()?;
    assert!(locator::find_pending_file(dir.path())?.is_none());
    Ok(())
}

#[test]
fn test_unreadable_pending_file_deletes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("accounts.txt");
    fs::write(&path, "alice pw1 5 10\n")?;

    // Simulate the file vanishing between discovery and read.
    let stale = dir.path().join("gone.txt");
    let err = parser::read_pending_file(&stale).unwrap_err();
    assert!(matches!(
        err,
        subsync::error::SyncError::PendingFileUnreadable { .. }
    ));

    // The fatal path never reached the processor; the real file stays.
    assert!(path.exists());
    Ok(())
}
