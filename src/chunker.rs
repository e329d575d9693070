//! Byte-range partitioning of the input file.

use crate::error::{StatsError, StatsResult};

/// One contiguous byte range of the input, half-open `[start, end)`.
/// Immutable once computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkRange {
    pub start: u64,
    pub end: u64,
}

impl ChunkRange {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `[0, file_size)` into `num_chunks` contiguous ranges.
///
/// Each range spans `file_size / num_chunks` bytes (integer division); the
/// last range is stretched to `file_size` so the division remainder is
/// absorbed there. When `num_chunks` exceeds `file_size` the leading ranges
/// come out empty, which the scanner treats as a no-op.
pub fn compute_ranges(file_size: u64, num_chunks: usize) -> StatsResult<Vec<ChunkRange>> {
    if num_chunks < 1 {
        return Err(StatsError::InvalidChunkCount(num_chunks));
    }

    let chunk_size = file_size / num_chunks as u64;

    let mut ranges = Vec::with_capacity(num_chunks);
    for i in 0..num_chunks as u64 {
        let start = i * chunk_size;
        ranges.push(ChunkRange { start, end: start + chunk_size });
    }

    // 100 bytes over 3 chunks is 33 each with the last ending at byte 99;
    // stretch the final chunk to cover the remainder.
    ranges[num_chunks - 1].end = file_size;

    Ok(ranges)
}
