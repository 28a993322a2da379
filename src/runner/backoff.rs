use rand::Rng;
use std::time::Duration;

use crate::runner::runner::RunnerConfig;

/// Exponent cap keeps the worst-case wait bounded even when a stage is
/// allowed a very high attempt count.
const MAX_BACKOFF_EXPONENT: u32 = 10;

impl RunnerConfig {
    /// Delay before retrying a failed stage: `base * 2^attempt`, with ±30%
    /// jitter so simultaneous retries don't stampede the upstream API.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(MAX_BACKOFF_EXPONENT);
        let base_delay = self
            .base_backoff_secs
            .saturating_mul(2_u32.saturating_pow(exponent));

        let jitter_factor = rand::thread_rng().gen_range(0.7..1.3);
        let delay_with_jitter = (base_delay as f64 * jitter_factor).round() as u64;

        Duration::from_secs(delay_with_jitter)
    }
}
