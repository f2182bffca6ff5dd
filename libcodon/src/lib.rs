//! Comparative codon-usage and sequence-composition analysis.
//!
//! The crate turns two raw FASTA byte buffers (one per species) into three
//! kinds of output: a per-sequence metrics table (length, GC%), a merged
//! codon-usage comparison table, and a fixed registry of chart data
//! contracts consumed by an external renderer. Everything is synchronous,
//! in-memory, and deterministic; hosts own file transport, concurrency and
//! rendering.
//!
//! The usual entry point is [`pipeline::run`]:
//!
//! ```
//! use libcodon::pipeline::{self, AnalysisConfig, SpeciesInput};
//!
//! let a = SpeciesInput::new("salmonella", "salmonella.fasta", b">g1\nATGGCCATT\n");
//! let b = SpeciesInput::new("gallus", "gallus.fasta", b">h1\nATGGCCATG\n");
//! let output = pipeline::run(a, b, &AnalysisConfig::default()).unwrap();
//! assert_eq!(output.metrics.rows.len(), 2);
//! ```

pub mod aggregate;
pub mod charts;
pub mod codon;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod record;

pub use error::{Error, Result};
pub use record::{SequenceRecord, SequenceSet};
