/// Linear reconnect backoff: attempt `n` waits `n * base_delay_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub base_delay_ms: u32,
    pub max_attempts: u32,
}

impl ReconnectPolicy {
    pub const DEFAULT_BASE_DELAY_MS: u32 = 2_000;
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

    pub fn delay_for(&self, attempt: u32) -> u32 {
        self.base_delay_ms.saturating_mul(attempt)
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            base_delay_ms: Self::DEFAULT_BASE_DELAY_MS,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Attempt counter driven by the policy
#[derive(Debug, Clone)]
pub struct Reconnect {
    policy: ReconnectPolicy,
    attempts: u32,
}

impl Reconnect {
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            policy,
            attempts: 0,
        }
    }

    /// Delay before the next attempt, or `None` once the attempts are used up
    pub fn next_delay(&mut self) -> Option<u32> {
        if self.is_exhausted() {
            return None;
        }
        self.attempts += 1;
        Some(self.policy.delay_for(self.attempts))
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.policy.max_attempts
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}
