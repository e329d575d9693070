//! Chunk scanning: one positioned bulk read per chunk (plus slack),
//! line-boundary ownership resolution, and parsing into a private table.

use crate::aggregate::{Aggregate, ChunkTable};
use crate::chunker::ChunkRange;
use crate::config::StatsOptions;
use crate::error::{StatsError, StatsResult};
use memchr::memchr;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(unix)]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.read_at(buf, offset)
}

#[cfg(windows)]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_read(buf, offset)
}

/// Append up to `len` bytes read at `offset` to `buf`, tolerating short
/// reads. Returns the number of bytes appended; fewer than `len` means end
/// of file was reached.
fn read_into(file: &File, buf: &mut Vec<u8>, offset: u64, len: usize) -> io::Result<usize> {
    let old = buf.len();
    buf.resize(old + len, 0);
    let mut filled = 0;
    while filled < len {
        let n = read_at(file, &mut buf[old + filled..], offset + filled as u64)?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    buf.truncate(old + filled);
    Ok(filled)
}

/// Scan one chunk of the file into a private per-chunk table.
///
/// Ownership discipline: a non-first chunk begins parsing after the first
/// newline in its buffer (the previous chunk's slack read captured the line
/// straddling the shared boundary), and every chunk keeps consuming lines
/// until a line terminator lands at or past its nominal end. Both sides
/// derive from the same rule, so every line is folded exactly once.
pub(crate) fn scan_chunk(
    file: &File,
    range: ChunkRange,
    idx: usize,
    file_size: u64,
    opts: &StatsOptions,
    cancel: &AtomicBool,
) -> StatsResult<ChunkTable> {
    let mut table = ChunkTable::default();
    if range.is_empty() {
        return Ok(table);
    }

    let nominal = range.len() as usize;
    let want = (nominal + opts.slack_bytes).min((file_size - range.start) as usize);
    let mut buf = Vec::with_capacity(want);
    read_into(file, &mut buf, range.start, want)?;
    let mut at_eof = range.start + buf.len() as u64 == file_size;

    let mut pos = 0usize;
    if range.start > 0 {
        // Skip the partial line carried over from the previous chunk. No
        // newline in view, or one past the nominal end, means this chunk's
        // bytes are interior to lines owned by its neighbours.
        match memchr(b'\n', &buf) {
            Some(i) => pos = i + 1,
            None => return Ok(table),
        }
        if pos > nominal {
            return Ok(table);
        }
    }

    // Consume lines starting at or before the nominal end. The last such
    // line may run past it into the slack (the boundary line); when even the
    // slack is not enough, the buffer grows until the terminator or EOF
    // shows up, so overlong lines are parsed whole rather than truncated.
    while pos <= nominal {
        if cancel.load(Ordering::Relaxed) {
            return Ok(table);
        }
        match memchr(b'\n', &buf[pos..]) {
            Some(rel) => {
                let end = pos + rel;
                fold_line(&mut table, &buf[pos..end], idx, opts)?;
                pos = end + 1;
            }
            None if at_eof => {
                // File without a trailing newline: the remainder is one
                // final line.
                fold_line(&mut table, &buf[pos..], idx, opts)?;
                return Ok(table);
            }
            None => {
                let offset = range.start + buf.len() as u64;
                let grown = read_into(file, &mut buf, offset, opts.slack_bytes)?;
                at_eof = grown < opts.slack_bytes;
            }
        }
    }

    Ok(table)
}

/// Parse one raw line and fold it into the table. Blank lines and comments
/// are skipped; anything else must be exactly `key<delim>value` with a
/// numeric value.
fn fold_line(
    table: &mut ChunkTable,
    raw: &[u8],
    chunk: usize,
    opts: &StatsOptions,
) -> StatsResult<()> {
    // Tolerate CRLF input.
    let raw = match raw {
        [head @ .., b'\r'] => head,
        _ => raw,
    };
    if raw.is_empty() || raw[0] == opts.comment_marker {
        return Ok(());
    }

    let line = std::str::from_utf8(raw).map_err(|_| StatsError::Format {
        chunk,
        line: String::from_utf8_lossy(raw).into_owned(),
    })?;

    let mut fields = line.split(opts.delimiter as char);
    let (key, value) = match (fields.next(), fields.next(), fields.next()) {
        (Some(k), Some(v), None) => (k, v),
        _ => {
            return Err(StatsError::Format { chunk, line: line.to_string() });
        }
    };

    let parsed: f64 = value.parse().map_err(|_| StatsError::Parse {
        chunk,
        value: value.to_string(),
        line: line.to_string(),
    })?;

    match table.entry(key.to_string()) {
        Entry::Occupied(mut e) => e.get_mut().observe(parsed),
        Entry::Vacant(e) => {
            e.insert(Aggregate::seed(parsed));
        }
    }
    Ok(())
}
