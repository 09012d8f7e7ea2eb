//! Retry policy for generation calls.
//!
//! A retrying call is a small state machine: it starts at attempt 1 on the
//! primary model, and each failure either ends it (attempts exhausted) or moves
//! it to the next attempt, possibly on the fallback model, after a backoff
//! delay. The transitions live here so they can be tested without a clock.

use rand::Rng;
use std::time::Duration;

pub const MAX_ATTEMPTS: u32 = 5;
pub const BASE_DELAY: Duration = Duration::from_secs(5);
pub const RATE_LIMIT_STEP: Duration = Duration::from_secs(60);
pub const RATE_LIMIT_JITTER: Duration = Duration::from_secs(10);
pub const BACKOFF_JITTER: Duration = Duration::from_secs(3);
/// Attempt number from which a failed call moves to the fallback model.
pub const FALLBACK_FROM_ATTEMPT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RateLimited,
    Transient,
}

/// Classify a failed call by its error message.
///
/// Anything mentioning "rate limit", "429", or both "tokens" and "limit" counts
/// as rate limiting. The last rule over-approximates: a validation error such
/// as "max tokens limit exceeded" is also treated as retryable rate limiting.
#[must_use]
pub fn classify_error(message: &str) -> FailureKind {
    let lowered = message.to_lowercase();
    let rate_limited = lowered.contains("rate limit")
        || lowered.contains("429")
        || (lowered.contains("tokens") && lowered.contains("limit"));

    if rate_limited {
        FailureKind::RateLimited
    } else {
        FailureKind::Transient
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub rate_limit_step: Duration,
    pub rate_limit_jitter: Duration,
    pub backoff_jitter: Duration,
    pub fallback_from_attempt: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: BASE_DELAY,
            rate_limit_step: RATE_LIMIT_STEP,
            rate_limit_jitter: RATE_LIMIT_JITTER,
            backoff_jitter: BACKOFF_JITTER,
            fallback_from_attempt: FALLBACK_FROM_ATTEMPT,
        }
    }
}

impl RetryPolicy {
    /// Deterministic part of the delay after failed attempt `attempt` (1-based).
    ///
    /// Rate limiting grows linearly (`step * attempt`), everything else
    /// exponentially (`base * 2^(attempt - 1)`).
    #[must_use]
    pub fn base_delay_for(&self, kind: FailureKind, attempt: u32) -> Duration {
        match kind {
            FailureKind::RateLimited => self.rate_limit_step.saturating_mul(attempt),
            FailureKind::Transient => self
                .base_delay
                .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1))),
        }
    }

    #[must_use]
    pub fn jitter_for(&self, kind: FailureKind) -> Duration {
        match kind {
            FailureKind::RateLimited => self.rate_limit_jitter,
            FailureKind::Transient => self.backoff_jitter,
        }
    }

    /// Full delay: the deterministic part plus uniform jitter in `[0, jitter]`.
    pub fn delay_for<R: Rng>(&self, kind: FailureKind, attempt: u32, rng: &mut R) -> Duration {
        let jitter_secs = self.jitter_for(kind).as_secs_f64();
        let jitter = if jitter_secs > 0.0 {
            Duration::from_secs_f64(rng.gen_range(0.0..=jitter_secs))
        } else {
            Duration::ZERO
        };
        self.base_delay_for(kind, attempt) + jitter
    }
}

/// Attempt counter and model for one retrying call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptState {
    attempt: u32,
    model: String,
    on_fallback: bool,
}

impl AttemptState {
    #[must_use]
    pub fn first(primary_model: &str) -> Self {
        Self {
            attempt: 1,
            model: primary_model.to_string(),
            on_fallback: false,
        }
    }

    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub const fn on_fallback(&self) -> bool {
        self.on_fallback
    }

    #[must_use]
    pub const fn is_last(&self, policy: &RetryPolicy) -> bool {
        self.attempt >= policy.max_attempts
    }

    /// Move to the next attempt after a failure.
    ///
    /// Once the failed attempt reaches `fallback_from_attempt` and a fallback
    /// model is configured, every later attempt uses the fallback. The switch
    /// never reverts.
    #[must_use]
    pub fn after_failure(self, policy: &RetryPolicy, fallback_model: Option<&str>) -> Self {
        let mut next = self;
        if let Some(fallback) = fallback_model
            && next.attempt >= policy.fallback_from_attempt
            && !next.on_fallback
        {
            next.model = fallback.to_string();
            next.on_fallback = true;
        }
        next.attempt += 1;
        next
    }
}
