mod exec_log;
pub use exec_log::ExecLog;

mod fixture;
pub use fixture::{Fixture, Seed};

mod logging_driver;
pub use logging_driver::{DriverOp, LoggingConnection, LoggingDriver};

pub use roster::{Connection, Db};

/// Routes `tracing` output of the crates under test through `env_logger`.
/// Set `RUST_LOG=roster=debug` to see every statement.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
