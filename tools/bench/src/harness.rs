// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Latency-sampling harness for smoke benchmarks
//! OWNERS: @power
//! STATUS: Functional
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests below, end-to-end scenarios in `tests/harness.rs`
//!
//! A run invokes one operation a fixed number of times, strictly one after the
//! other, and divides the elapsed time by the repetition count. The mean is the
//! whole signal: no percentiles, no warm-up, no retries. It exists to catch
//! gross regressions, not to profile.
//!
//! INVARIANTS:
//! - Zero repetitions are rejected before the clock is read
//! - An operation error aborts the run; no partial measurement is produced
//! - Async runs keep exactly one operation in flight

use core::future::Future;
use core::time::Duration;
use std::error::Error as StdError;

use serde::Serialize;

use crate::clock::{Clock, HostClock};

/// Boxed error raised by a measured operation.
pub type OperationError = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias for harness operations.
pub type Result<T> = core::result::Result<T, BenchError>;

/// Errors produced by a benchmark run.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// Repetitions or threshold are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    /// The measured operation failed; later repetitions were not issued.
    #[error("operation failed at iteration {iteration}: {source}")]
    OperationFailed {
        /// Zero-based index of the failing invocation.
        iteration: u32,
        /// Error returned by the operation.
        #[source]
        source: OperationError,
    },
    /// The run completed but its mean latency reached the threshold.
    #[error("average latency {average_micros:.3}us not below threshold {threshold_micros}us")]
    ThresholdExceeded {
        /// Measured mean latency.
        average_micros: f64,
        /// Configured bound.
        threshold_micros: f64,
    },
}

/// Raw timing of one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    repetitions: u32,
    total_elapsed: Duration,
}

impl Measurement {
    /// Number of invocations timed.
    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    /// Wall-clock time spent across all invocations.
    pub fn total_elapsed(&self) -> Duration {
        self.total_elapsed
    }

    /// Elapsed time in milliseconds.
    pub fn total_elapsed_millis(&self) -> f64 {
        self.total_elapsed.as_nanos() as f64 / 1_000_000.0
    }

    /// Mean per-call latency in microseconds: `total_ms * 1000 / repetitions`.
    pub fn average_micros(&self) -> f64 {
        self.total_elapsed_millis() * 1000.0 / f64::from(self.repetitions)
    }
}

/// Returns true iff the mean latency is strictly below `threshold_micros`.
pub fn evaluate(measurement: &Measurement, threshold_micros: f64) -> bool {
    measurement.average_micros() < threshold_micros
}

fn check_repetitions(repetitions: u32) -> Result<()> {
    if repetitions == 0 {
        return Err(BenchError::InvalidConfiguration("repetitions must be positive"));
    }
    Ok(())
}

fn finish(repetitions: u32, start_ns: u64, end_ns: u64) -> Measurement {
    let measurement = Measurement {
        repetitions,
        total_elapsed: Duration::from_nanos(end_ns.saturating_sub(start_ns)),
    };
    log::debug!(
        "bench: {} calls in {:.3} ms ({:.3} us/call)",
        repetitions,
        measurement.total_elapsed_millis(),
        measurement.average_micros()
    );
    measurement
}

/// Times `repetitions` sequential calls of `op` on the host clock.
pub fn measure_sync<T, E, F>(repetitions: u32, op: F) -> Result<Measurement>
where
    F: FnMut() -> core::result::Result<T, E>,
    E: Into<OperationError>,
{
    measure_sync_with(&HostClock::new(), repetitions, op)
}

/// Times `repetitions` sequential calls of `op` on `clock`.
///
/// The value returned by `op` is discarded.
pub fn measure_sync_with<C, T, E, F>(clock: &C, repetitions: u32, mut op: F) -> Result<Measurement>
where
    C: Clock,
    F: FnMut() -> core::result::Result<T, E>,
    E: Into<OperationError>,
{
    check_repetitions(repetitions)?;
    let start = clock.now_ns();
    for iteration in 0..repetitions {
        match op() {
            Ok(value) => {
                std::hint::black_box(value);
            }
            Err(err) => return Err(BenchError::OperationFailed { iteration, source: err.into() }),
        }
    }
    Ok(finish(repetitions, start, clock.now_ns()))
}

/// Times `repetitions` sequentially awaited calls of `op` on the host clock.
pub async fn measure_async<T, E, F, Fut>(repetitions: u32, op: F) -> Result<Measurement>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = core::result::Result<T, E>>,
    E: Into<OperationError>,
{
    measure_async_with(&HostClock::new(), repetitions, op).await
}

/// Times `repetitions` sequentially awaited calls of `op` on `clock`.
///
/// Each future is driven to completion before the next one is created.
/// Dropping the returned future abandons the run.
pub async fn measure_async_with<C, T, E, F, Fut>(
    clock: &C,
    repetitions: u32,
    mut op: F,
) -> Result<Measurement>
where
    C: Clock,
    F: FnMut() -> Fut,
    Fut: Future<Output = core::result::Result<T, E>>,
    E: Into<OperationError>,
{
    check_repetitions(repetitions)?;
    let start = clock.now_ns();
    for iteration in 0..repetitions {
        match op().await {
            Ok(value) => {
                std::hint::black_box(value);
            }
            Err(err) => return Err(BenchError::OperationFailed { iteration, source: err.into() }),
        }
    }
    Ok(finish(repetitions, start, clock.now_ns()))
}

/// Repetition count and latency bound for one benchmark case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchConfig {
    repetitions: u32,
    timeout_micros: f64,
}

impl BenchConfig {
    /// Validates and builds a configuration.
    pub fn new(repetitions: u32, timeout_micros: f64) -> Result<Self> {
        check_repetitions(repetitions)?;
        if !timeout_micros.is_finite() || timeout_micros <= 0.0 {
            return Err(BenchError::InvalidConfiguration("threshold must be positive and finite"));
        }
        Ok(Self { repetitions, timeout_micros })
    }

    /// Configured repetition count.
    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    /// Configured latency bound in microseconds.
    pub fn timeout_micros(&self) -> f64 {
        self.timeout_micros
    }

    /// Measures `op` on the host clock and evaluates the result.
    pub fn run_sync<T, E, F>(&self, op: F) -> Result<BenchResult>
    where
        F: FnMut() -> core::result::Result<T, E>,
        E: Into<OperationError>,
    {
        self.run_sync_with(&HostClock::new(), op)
    }

    /// Measures `op` on `clock` and evaluates the result.
    pub fn run_sync_with<C, T, E, F>(&self, clock: &C, op: F) -> Result<BenchResult>
    where
        C: Clock,
        F: FnMut() -> core::result::Result<T, E>,
        E: Into<OperationError>,
    {
        let measurement = measure_sync_with(clock, self.repetitions, op)?;
        Ok(self.verdict(&measurement))
    }

    /// Measures the async `op` on the host clock and evaluates the result.
    pub async fn run_async<T, E, F, Fut>(&self, op: F) -> Result<BenchResult>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = core::result::Result<T, E>>,
        E: Into<OperationError>,
    {
        self.run_async_with(&HostClock::new(), op).await
    }

    /// Measures the async `op` on `clock` and evaluates the result.
    pub async fn run_async_with<C, T, E, F, Fut>(&self, clock: &C, op: F) -> Result<BenchResult>
    where
        C: Clock,
        F: FnMut() -> Fut,
        Fut: Future<Output = core::result::Result<T, E>>,
        E: Into<OperationError>,
    {
        let measurement = measure_async_with(clock, self.repetitions, op).await?;
        Ok(self.verdict(&measurement))
    }

    fn verdict(&self, measurement: &Measurement) -> BenchResult {
        BenchResult {
            repetitions: measurement.repetitions(),
            total_elapsed_millis: measurement.total_elapsed_millis(),
            average_micros: measurement.average_micros(),
            threshold_micros: self.timeout_micros,
            passed: evaluate(measurement, self.timeout_micros),
        }
    }
}

/// Evaluated outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchResult {
    /// Number of invocations timed.
    pub repetitions: u32,
    /// Wall-clock time for all invocations, in milliseconds.
    pub total_elapsed_millis: f64,
    /// Mean latency per invocation, in microseconds.
    pub average_micros: f64,
    /// Bound the mean was compared against.
    pub threshold_micros: f64,
    /// Whether the mean stayed strictly below the bound.
    pub passed: bool,
}

impl BenchResult {
    /// Turns a failing verdict into [`BenchError::ThresholdExceeded`].
    pub fn assert_passed(self) -> Result<Self> {
        if self.passed {
            Ok(self)
        } else {
            Err(BenchError::ThresholdExceeded {
                average_micros: self.average_micros,
                threshold_micros: self.threshold_micros,
            })
        }
    }
}
