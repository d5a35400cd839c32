use crate::{CBox, engine_error};
use cinder_core::{EngineError, EngineResult};
use libsqlite3_sys::{SQLITE_OK, SQLITE_RANGE, sqlite3_db_handle, sqlite3_stmt};
use std::ffi::c_int;

/// Native SQLite statement handle, finalized on drop.
pub struct SqlitePrepared {
    pub(crate) statement: CBox<*mut sqlite3_stmt>,
}

impl SqlitePrepared {
    pub(crate) fn new(statement: CBox<*mut sqlite3_stmt>) -> Self {
        Self { statement }
    }

    pub(crate) fn as_ptr(&self) -> *mut sqlite3_stmt {
        *self.statement
    }

    /// Turn a result code of a call on this statement into a `Result`.
    pub(crate) fn check(&self, rc: c_int) -> EngineResult<()> {
        if rc != SQLITE_OK {
            return Err(unsafe { engine_error(sqlite3_db_handle(self.as_ptr()), rc) });
        }
        Ok(())
    }

    pub(crate) fn index(&self, index: usize) -> EngineResult<c_int> {
        c_int::try_from(index).map_err(|_| {
            EngineError::new(
                SQLITE_RANGE,
                format!("Parameter index {} is out of range", index),
            )
        })
    }
}
