//! Bounded polling with a fallback.
//!
//! Page initialization tries an operation a fixed number of times at a fixed
//! interval and, when every attempt fails, degrades to a fallback value
//! instead of failing. The progress is tracked as an explicit state machine:
//!
//! ```text
//! Pending -> Polling { attempt } -> Ready
//!                                \-> FellBack
//! ```

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// How often and how many times to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first one)
    pub max_attempts: u32,
    /// Wait between two attempts
    pub interval: Duration,
}

impl RetryConfig {
    /// Poll at a constant interval
    pub fn fixed_interval(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Preset: page initialization poll (40 attempts every 50ms, ~2s total)
    pub fn init_poll() -> Self {
        Self::fixed_interval(40, Duration::from_millis(50))
    }

    /// Delay before a given attempt number (0-indexed)
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            Duration::ZERO
        } else {
            self.interval
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::init_poll()
    }
}

/// Where a [`Bootstrap`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// Not started yet.
    Pending,
    /// Attempt number `attempt` (1-based) is in flight or has just failed.
    Polling { attempt: u32 },
    /// An attempt succeeded.
    Ready,
    /// Every attempt failed and the fallback was used.
    FellBack,
}

/// Result of a bootstrap run: the value and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootOutcome<T> {
    Ready(T),
    FellBack(T),
}

impl<T> BootOutcome<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, BootOutcome::FellBack(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            BootOutcome::Ready(value) | BootOutcome::FellBack(value) => value,
        }
    }
}

/// Try-repeatedly-then-degrade state machine.
#[derive(Debug)]
pub struct Bootstrap {
    name: String,
    config: RetryConfig,
    state: BootstrapState,
}

impl Bootstrap {
    pub fn new(name: impl Into<String>, config: RetryConfig) -> Self {
        Self {
            name: name.into(),
            config,
            state: BootstrapState::Pending,
        }
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Run `operation` up to `max_attempts` times; on exhaustion return
    /// `fallback()`. A configuration with zero attempts falls back at once.
    pub async fn run<T, E, F, Fut, G>(&mut self, mut operation: F, fallback: G) -> BootOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        G: FnOnce() -> T,
    {
        for attempt in 0..self.config.max_attempts {
            let delay = self.config.delay_for_attempt(attempt);
            if !delay.is_zero() {
                sleep(delay).await;
            }

            self.state = BootstrapState::Polling {
                attempt: attempt + 1,
            };

            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(
                            "{}: Succeeded on attempt {}/{}",
                            self.name,
                            attempt + 1,
                            self.config.max_attempts
                        );
                    }
                    self.state = BootstrapState::Ready;
                    return BootOutcome::Ready(value);
                }
                Err(e) => {
                    debug!(
                        "{}: Attempt {}/{} failed ({})",
                        self.name,
                        attempt + 1,
                        self.config.max_attempts,
                        e
                    );
                    if attempt + 1 == self.config.max_attempts {
                        warn!(
                            "{}: All {} attempts failed. Last error: {}",
                            self.name, self.config.max_attempts, e
                        );
                    }
                }
            }
        }

        info!("{}: falling back", self.name);
        self.state = BootstrapState::FellBack;
        BootOutcome::FellBack(fallback())
    }
}
