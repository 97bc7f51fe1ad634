/// Knobs for one scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Upper bound on requests in flight for the whole run.
    pub threads: usize,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Probe every target, whatever its baseline status.
    pub force: bool,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threads: 4,
            timeout_secs: 10,
            connect_timeout_secs: 5,
            force: false,
            max_redirects: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl ScanConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self.connect_timeout_secs = self.connect_timeout_secs.min(self.timeout_secs);
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
