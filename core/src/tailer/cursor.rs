use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use memchr::memrchr;

use crate::log::line_ranges;

/// Read position in a single append-only log file.
///
/// Only whole lines are consumed: bytes after the last `\n` stay unread until
/// their terminator is written.
#[derive(Debug, Clone)]
pub struct TailCursor {
    path: PathBuf,
    offset: u64,
    stopped: bool,
}

impl TailCursor {
    /// Cursor positioned at the current end of the file (0 if it does not exist yet).
    pub fn at_end(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let offset = match std::fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "Log file not found yet, tailing from start");
                0
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            path,
            offset,
            stopped: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    fn reset(&mut self) {
        self.offset = 0;
    }

    /// Rewind and refuse further reads. Set under the same lock the triggers
    /// take, so a trigger already past its await cannot read after a stop.
    pub fn halt(&mut self) {
        self.stopped = true;
        self.reset();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Read every complete line appended since the last call.
    ///
    /// A file shorter than the cursor has been truncated or rotated and is
    /// re-read from the start.
    pub fn read_new_lines(&mut self) -> io::Result<Vec<String>> {
        if self.stopped {
            return Ok(Vec::new());
        }
        let mut file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let len = file.metadata()?.len();
        if len < self.offset {
            tracing::info!(
                path = %self.path.display(),
                offset = self.offset,
                len,
                "Log file shrank, restarting from the beginning"
            );
            self.offset = 0;
        }
        if len == self.offset {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(self.offset))?;
        let mut buf = Vec::with_capacity((len - self.offset) as usize);
        file.take(len - self.offset).read_to_end(&mut buf)?;

        let Some(last_newline) = memrchr(b'\n', &buf) else {
            return Ok(Vec::new());
        };
        let complete = &buf[..=last_newline];
        self.offset += complete.len() as u64;

        let lines: Vec<String> = line_ranges(complete)
            .into_iter()
            .map(|(start, end)| String::from_utf8_lossy(&complete[start..end]).into_owned())
            .collect();
        tracing::debug!(lines = lines.len(), offset = self.offset, "Read appended lines");
        Ok(lines)
    }
}
