use crate::error::{Result, SyncError};
use crate::types::{ParsedLine, RawRecord};
use std::fs;
use std::path::{Path, PathBuf};

/// The single input artifact for one run, read fully into memory.
#[derive(Debug)]
pub struct PendingFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

/// Reads the pending file into ordered lines.
///
/// An open/read failure is fatal for the run: nothing has been
/// provisioned yet and the file must stay in place untouched.
pub fn read_pending_file(path: &Path) -> Result<PendingFile> {
    let content =
        fs::read_to_string(path).map_err(|e| SyncError::PendingFileUnreadable {
            path: path.display().to_string(),
            source: e,
        })?;

    Ok(PendingFile {
        path: path.to_path_buf(),
        lines: content.lines().map(str::to_string).collect(),
    })
}

/// Splits one line on runs of whitespace and classifies it.
///
/// Valid records carry exactly 4 or 5 tokens; a 5th token is accepted
/// but ignored downstream. Anything else, blank lines included, is
/// malformed.
pub fn classify_line(line_number: usize, line: &str) -> ParsedLine {
    let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if tokens.len() == 4 || tokens.len() == 5 {
        ParsedLine::Record(RawRecord {
            line_number,
            tokens,
        })
    } else {
        ParsedLine::Malformed {
            line_number,
            text: line.trim().to_string(),
        }
    }
}
