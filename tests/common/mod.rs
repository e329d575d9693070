use chunkstats::{ChunkStats, StatsResult, StatsTable};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a measurement file with exactly the given raw content (no implicit
/// trailing newline). Keep the returned `TempDir` alive while the path is
/// in use.
pub fn write_measurements(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("measurements.txt");
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    (dir, path)
}

/// Aggregate `content` with the given chunk count and default options.
pub fn aggregate(content: &str, chunks: usize) -> StatsResult<StatsTable> {
    let (_dir, path) = write_measurements(content);
    ChunkStats::new().chunk_count(chunks).progress(false).process_path(&path)
}

/// Sum of per-key observation counts, i.e. the number of data lines.
pub fn total_count(table: &StatsTable) -> u64 {
    table.values().map(|r| r.count).sum()
}

/// Deterministic pseudo-random measurement file: `lines` rows spread over
/// `keys` distinct keys with varied fractional values.
pub fn synthetic_measurements(keys: usize, lines: usize) -> String {
    let mut out = String::new();
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    for i in 0..lines {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let key = i % keys;
        let value = ((state >> 33) % 2000) as f64 / 10.0 - 100.0;
        out.push_str(&format!("station_{key:03};{value:.1}\n"));
    }
    out
}
