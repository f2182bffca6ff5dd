/// One nucleotide sequence plus its FASTA identifier.
///
/// After [`crate::normalize::normalize`] has run, `bases` holds only
/// uppercase `A`, `T`, `C`, `G`, `N` with no whitespace, and the record is
/// treated as immutable for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// First whitespace-delimited token of the header line, never empty.
    pub id: String,
    /// Concatenated sequence lines.
    pub bases: String,
}

/// The ordered sequences of one species, tagged with its label.
///
/// Created by ingestion, consumed by the metrics and codon-usage stages,
/// and discarded at the end of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSet {
    /// Species label, used to name per-species output columns.
    pub label: String,
    pub records: Vec<SequenceRecord>,
}

impl SequenceSet {
    pub fn new(label: impl Into<String>, records: Vec<SequenceRecord>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
