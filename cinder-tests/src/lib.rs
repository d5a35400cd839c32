mod batch;
mod binding;
mod classify;
mod encoding;
mod lifecycle;
mod metadata;
mod scenario;

use crate::{
    batch::batch,
    binding::{bind_mixed, bind_named, bind_unknown, bind_out_of_range},
    classify::{blobs, classify},
    lifecycle::{closed, compile_error, reexecute, remainder},
    metadata::metadata,
    scenario::scenario,
};
use cinder::{Connection, Error, StatementError};
use log::LevelFilter;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Statement error kind of `error`, panics if it has none.
pub fn kind(error: &Error) -> &StatementError {
    StatementError::of(error)
        .unwrap_or_else(|| panic!("Expected a statement error, got: {:#}", error))
}

pub fn execute_tests<C: Connection>(connection: &C) {
    batch(connection);
    remainder(connection);
    closed(connection);
    compile_error(connection);
    reexecute(connection);
    scenario(connection);
    metadata(connection);
    bind_mixed(connection);
    bind_named(connection);
    bind_unknown(connection);
    bind_out_of_range(connection);
    classify(connection);
    blobs(connection);
    #[cfg(not(feature = "disable-utf16"))]
    encoding::utf16(connection);
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
