//! CONTEXT: Battery statistics latency smoke benchmarks
//! INTENT: Catch gross latency regressions of the battery statistics client
//! IDL (target): measure_sync(op), measure_async(op), evaluate(result), run_suite()
//! DEPS: batterystats (client contract), std::time (timing), tokio (async driver in the CLI)
//! READINESS: Library + `stats-bench` CLI; host backend only
//! TESTS: Harness properties; suite cases against the host backend; CLI exit status

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod clock;
pub mod config;
pub mod harness;
pub mod suite;

pub use cli::{execute, execute_with, run, Args};
pub use clock::{Clock, HostClock, ManualClock};
pub use config::{ConfigError, SuiteConfig};
pub use harness::{
    evaluate, measure_async, measure_async_with, measure_sync, measure_sync_with, BenchConfig,
    BenchError, BenchResult, Measurement, OperationError,
};
pub use suite::{
    find_case, run_case, run_case_with, run_cases, run_suite, BenchCase, CaseReport, StatsApi, CASES,
};
