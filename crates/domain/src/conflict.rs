/// Number of leading log-row fields shown next to each conflict identifier.
pub const CONFLICT_ROW_FIELDS: usize = 4;

/// One correlated (identifier, log row) tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictPair {
    conflict_id: String,
    fields: [String; CONFLICT_ROW_FIELDS],
}

impl ConflictPair {
    /// Creates a pair from an identifier and the first four fields of a log row.
    ///
    /// Missing trailing fields become empty strings and extra fields are dropped.
    #[must_use]
    pub fn from_row(conflict_id: impl Into<String>, row: Vec<String>) -> Self {
        let mut row = row.into_iter();
        let fields = std::array::from_fn(|_| row.next().unwrap_or_default());

        Self {
            conflict_id: conflict_id.into(),
            fields,
        }
    }

    /// Returns the opaque conflict identifier.
    #[must_use]
    pub fn conflict_id(&self) -> &str {
        self.conflict_id.as_str()
    }

    /// Returns the four positional log fields.
    #[must_use]
    pub fn fields(&self) -> &[String; CONFLICT_ROW_FIELDS] {
        &self.fields
    }

    /// Returns the identifier followed by the four fields, as a display row.
    #[must_use]
    pub fn to_row(&self) -> [&str; CONFLICT_ROW_FIELDS + 1] {
        [
            self.conflict_id.as_str(),
            self.fields[0].as_str(),
            self.fields[1].as_str(),
            self.fields[2].as_str(),
            self.fields[3].as_str(),
        ]
    }
}

/// Lengths of the two parallel arrays when they disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    /// Number of conflict identifiers received.
    pub conflict_ids: usize,
    /// Number of log rows received.
    pub log_rows: usize,
}

/// Zips identifiers and rows by shared index.
///
/// Unequal lengths truncate to the shorter array; the mismatch is returned
/// so callers can report it.
#[must_use]
pub fn zip_conflict_pairs(
    conflict_ids: Vec<String>,
    logs: Vec<Vec<String>>,
) -> (Vec<ConflictPair>, Option<LengthMismatch>) {
    let mismatch = (conflict_ids.len() != logs.len()).then(|| LengthMismatch {
        conflict_ids: conflict_ids.len(),
        log_rows: logs.len(),
    });

    let pairs = conflict_ids
        .into_iter()
        .zip(logs)
        .map(|(conflict_id, row)| ConflictPair::from_row(conflict_id, row))
        .collect();

    (pairs, mismatch)
}

/// Result of one server-side detection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    detect_time_label: String,
    pairs: Vec<ConflictPair>,
    mismatch: Option<LengthMismatch>,
}

impl ConflictReport {
    /// Builds a report from the raw detection response arrays.
    #[must_use]
    pub fn new(
        detect_time_label: impl Into<String>,
        conflict_ids: Vec<String>,
        logs: Vec<Vec<String>>,
    ) -> Self {
        let (pairs, mismatch) = zip_conflict_pairs(conflict_ids, logs);
        Self {
            detect_time_label: detect_time_label.into(),
            pairs,
            mismatch,
        }
    }

    /// Returns the server's timing summary.
    #[must_use]
    pub fn detect_time_label(&self) -> &str {
        self.detect_time_label.as_str()
    }

    /// Returns the correlated pairs in response order.
    #[must_use]
    pub fn pairs(&self) -> &[ConflictPair] {
        &self.pairs
    }

    /// Returns true when no conflicts were reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the array lengths when they disagreed.
    #[must_use]
    pub fn mismatch(&self) -> Option<LengthMismatch> {
        self.mismatch
    }
}
