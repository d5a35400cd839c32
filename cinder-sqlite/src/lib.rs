mod cbox;
mod connection;
mod driver;
mod extract;
mod prepared;

use cinder_core::EngineError;
use libsqlite3_sys::{sqlite3, sqlite3_errmsg, sqlite3_extended_errcode};
use std::{
    ffi::{CStr, c_char},
    ptr,
};

pub(crate) use cbox::*;
pub use connection::*;
pub use driver::*;
pub use prepared::*;

pub(crate) fn error_message_from_ptr(ptr: &'_ *const c_char) -> &'_ str {
    unsafe {
        if *ptr != ptr::null() {
            CStr::from_ptr(*ptr)
                .to_str()
                .unwrap_or("Unknown error (the error message was not a valid C string)")
        } else {
            "Unknown error (could not extract the error message)"
        }
    }
}

/// Build the engine error for the last failed call on `connection`.
pub(crate) fn engine_error(connection: *mut sqlite3, rc: i32) -> EngineError {
    unsafe {
        let code = if connection.is_null() {
            rc
        } else {
            sqlite3_extended_errcode(connection)
        };
        EngineError::new(
            code,
            error_message_from_ptr(&sqlite3_errmsg(connection)).to_string(),
        )
    }
}
