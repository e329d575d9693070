/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct StatsOptions {
    pub chunk_count: usize,           // number of byte-range chunks / concurrent tasks
    pub slack_bytes: usize,           // read-ahead past each chunk's nominal end
    pub delimiter: u8,                // key/value separator within a line
    pub comment_marker: u8,           // lines starting with this byte are skipped
    pub parallelism: Option<usize>,   // Some(N) to set rayon threads, None to use default
    pub progress: bool,               // show progress bar
    pub progress_label: Option<String>, // optional label for progress bar
}

impl Default for StatsOptions {
    fn default() -> Self {
        let hw = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(8);
        Self {
            chunk_count: hw,
            // Enough for any plausible key;value line; the scanner grows its
            // buffer when a line outruns the margin.
            slack_bytes: 128,
            delimiter: b';',
            comment_marker: b'#',
            parallelism: None,
            progress: true,
            progress_label: None,
        }
    }
}

impl StatsOptions {
    /// Not clamped: zero must reach the pipeline and fail with an explicit
    /// invalid-configuration error, never a division by zero.
    pub fn with_chunk_count(mut self, n: usize) -> Self {
        self.chunk_count = n;
        self
    }
    pub fn with_slack_bytes(mut self, bytes: usize) -> Self {
        self.slack_bytes = bytes.max(1);
        self
    }
    pub fn with_delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }
    pub fn with_comment_marker(mut self, marker: u8) -> Self {
        self.comment_marker = marker;
        self
    }
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
}
