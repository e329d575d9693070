use crate::aggregate::{merge_tables, ChunkTable, StatsTable};
use crate::chunker::compute_ranges;
use crate::config::StatsOptions;
use crate::error::StatsResult;
use crate::progress::make_count_progress;
use crate::scan::scan_chunk;
use crate::util::init_tracing_once;
use rayon::prelude::*;
use std::fs::File;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// The chunked aggregation engine, configured through builder chaining:
///
/// ```no_run
/// # use chunkstats::ChunkStats;
/// let table = ChunkStats::new()
///     .chunk_count(8)
///     .progress(false)
///     .process_path("data/measurements.txt")?;
/// # Ok::<(), chunkstats::StatsError>(())
/// ```
#[derive(Clone)]
pub struct ChunkStats {
    pub(crate) opts: StatsOptions,
}

impl ChunkStats {
    pub fn new() -> Self {
        Self { opts: StatsOptions::default() }
    }

    // -------- Builder methods --------
    pub fn chunk_count(mut self, n: usize) -> Self { self.opts = self.opts.with_chunk_count(n); self }
    pub fn slack_bytes(mut self, bytes: usize) -> Self { self.opts = self.opts.with_slack_bytes(bytes); self }
    pub fn delimiter(mut self, delim: u8) -> Self { self.opts = self.opts.with_delimiter(delim); self }
    pub fn comment_marker(mut self, marker: u8) -> Self { self.opts = self.opts.with_comment_marker(marker); self }
    pub fn parallelism(mut self, threads: usize) -> Self { self.opts = self.opts.with_parallelism(threads); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }

    /// Convenience: open `path` and aggregate it.
    pub fn process_path(&self, path: impl AsRef<Path>) -> StatsResult<StatsTable> {
        let file = File::open(path.as_ref())?;
        self.process_file(&file)
    }

    /// Aggregate the whole file into the global per-key table.
    ///
    /// One task per chunk, each writing only into its own pre-allocated
    /// slot; all tasks join before the merge runs. On any chunk failure the
    /// remaining in-flight chunks are cancelled and the failure with the
    /// lowest chunk index is returned, never a partial table.
    pub fn process_file(&self, file: &File) -> StatsResult<StatsTable> {
        init_tracing_once();
        if let Some(n) = self.opts.parallelism {
            if n > 0 {
                rayon::ThreadPoolBuilder::new().num_threads(n).build_global().ok();
            }
        }

        let file_size = file.metadata()?.len();
        let ranges = compute_ranges(file_size, self.opts.chunk_count)?;
        tracing::info!("Planned {} chunks over {} bytes.", ranges.len(), file_size);

        let pb = if self.opts.progress {
            let label = self.opts.progress_label.as_deref().unwrap_or("Scanning chunks");
            Some(make_count_progress(ranges.len() as u64, label))
        } else {
            None
        };

        let cancel = AtomicBool::new(false);

        // Arena of per-chunk slots: disjoint by construction, so the tasks
        // need no locking on the collection of partial tables.
        let mut slots: Vec<StatsResult<ChunkTable>> =
            (0..ranges.len()).map(|_| Ok(ChunkTable::default())).collect();

        ranges
            .par_iter()
            .zip(slots.par_iter_mut())
            .enumerate()
            .for_each(|(idx, (range, slot))| {
                if cancel.load(Ordering::Relaxed) {
                    return;
                }
                let res = scan_chunk(file, *range, idx, file_size, &self.opts, &cancel);
                if let Err(e) = &res {
                    tracing::warn!("chunk {} failed, cancelling remaining work: {}", idx, e);
                    cancel.store(true, Ordering::Relaxed);
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                *slot = res;
            });
        // The par_iter scope is the join barrier: nothing below runs until
        // every chunk task has finished.

        if let Some(pb) = pb {
            pb.finish_with_message("scan done");
        }

        let mut tables = Vec::with_capacity(slots.len());
        for (idx, slot) in slots.into_iter().enumerate() {
            let table = slot?;
            tracing::debug!("chunk {}: {} keys", idx, table.len());
            tables.push(table);
        }
        Ok(merge_tables(tables))
    }
}

impl Default for ChunkStats {
    fn default() -> Self {
        Self::new()
    }
}
