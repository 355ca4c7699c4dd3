use serde::{Deserialize, Serialize};

/// One line of the pending file, split into whitespace-delimited tokens
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// 1-based line number in the source file
    pub line_number: usize,
    pub tokens: Vec<String>,
}

/// Classification of a single input line
#[derive(Debug, Clone)]
pub enum ParsedLine {
    /// A line with a valid token count (4 or 5 fields)
    Record(RawRecord),
    /// Wrong number of fields; carries the trimmed original text
    Malformed { line_number: usize, text: String },
}

/// A validated account row, ready for provisioning.
///
/// Never mutated after construction; discarded once its provisioning
/// commands have been issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub username: String,
    pub password: String,
    pub remaining_days: i64,
    /// Opaque to this job; handed to the provisioner verbatim
    pub connection_limit: String,
    pub source_line: usize,
}

impl AccountRecord {
    /// Expiry sent to the provisioner: the stored value plus one day.
    pub fn adjusted_days(&self) -> i64 {
        self.remaining_days + 1
    }
}
