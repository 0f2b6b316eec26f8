//! Batch decoding of many match-info files.
//!
//! Each file is decoded independently with its own cursor; a failure is
//! handed to the sink and the batch moves on to the next file.

use std::path::Path;

use crate::decode::{DecodeFileError, decode_info_file};
use crate::DemoInfo;

/// Receives the outcome of every file in a batch.
pub trait RecordSink {
    fn record(&mut self, path: &Path, result: Result<DemoInfo, DecodeFileError>);
}

impl<F> RecordSink for F
where
    F: FnMut(&Path, Result<DemoInfo, DecodeFileError>),
{
    fn record(&mut self, path: &Path, result: Result<DemoInfo, DecodeFileError>) {
        (*self)(path, result)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub decoded: usize,
    pub failed: usize,
}

/// Decode every path in order, reporting each result to `sink`.
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
///
/// use demoinfo_core::{DecodeFileError, DemoInfo, decode_batch};
///
/// let mut failures = Vec::new();
/// let summary = decode_batch(
///     [PathBuf::from("does-not-exist.info")],
///     &mut |path: &Path, result: Result<DemoInfo, DecodeFileError>| {
///         if result.is_err() {
///             failures.push(path.to_path_buf());
///         }
///     },
/// );
/// assert_eq!(summary.failed, 1);
/// assert_eq!(failures.len(), 1);
/// ```
pub fn decode_batch<I, P, S>(paths: I, sink: &mut S) -> BatchSummary
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    S: RecordSink + ?Sized,
{
    let mut summary = BatchSummary::default();
    for path in paths {
        let path = path.as_ref();
        let result = decode_info_file(path);
        if result.is_ok() {
            summary.decoded += 1;
        } else {
            summary.failed += 1;
        }
        sink.record(path, result);
    }
    summary
}
