mod aggregate;
mod chunker;
mod config;
mod error;
mod pipeline;
mod progress;
mod report;
mod scan;
mod util;

pub use crate::aggregate::{merge_tables, Aggregate, ChunkTable, StatsTable};
pub use crate::chunker::{compute_ranges, ChunkRange};
pub use crate::config::StatsOptions;
pub use crate::error::{StatsError, StatsResult};
pub use crate::pipeline::ChunkStats;

// Expose the report formatters so binaries can print the final table.
pub use crate::report::{render_report, write_report};

// Expose tracing init so binaries share the subscriber setup.
pub use crate::util::init_tracing_once;
