use crate::classifier::classify;
use crate::log::ParsedEvent;
use memchr::memchr_iter;
use memmap2::Mmap;
use rayon::prelude::*;
use std::fs;
use std::io::Result;
use std::path::Path;

/// Classify every line of an existing log in one pass.
///
/// Returns the events in line order together with the end offset, so a
/// tailer can pick up from where the bulk read stopped.
pub fn read_log_file<P: AsRef<Path>>(path: P) -> Result<(Vec<ParsedEvent>, u64)> {
    let file = fs::File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok((Vec::new(), 0));
    }
    // SAFETY: the chat log is append-only; bytes already written are never rewritten.
    let mmap = unsafe { Mmap::map(&file)? };
    let bytes = mmap.as_ref();
    let end_pos = bytes.len() as u64;

    let events = classify_bytes(bytes);
    tracing::debug!(events = events.len(), bytes = end_pos, "Read log file");

    Ok((events, end_pos))
}

/// Split a byte buffer into lines and classify them in parallel.
pub fn classify_bytes(bytes: &[u8]) -> Vec<ParsedEvent> {
    line_ranges(bytes)
        .par_iter()
        .filter_map(|&(start, end)| {
            let line = String::from_utf8_lossy(&bytes[start..end]);
            classify(&line)
        })
        .collect()
}

/// Find all non-empty line boundaries, stripping a trailing `\r`.
pub(crate) fn line_ranges(bytes: &[u8]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    for end in memchr_iter(b'\n', bytes) {
        push_range(&mut ranges, bytes, start, end);
        start = end + 1;
    }
    if start < bytes.len() {
        push_range(&mut ranges, bytes, start, bytes.len());
    }
    ranges
}

fn push_range(ranges: &mut Vec<(usize, usize)>, bytes: &[u8], start: usize, mut end: usize) {
    if end > start && bytes[end - 1] == b'\r' {
        end -= 1;
    }
    if end > start {
        ranges.push((start, end));
    }
}
