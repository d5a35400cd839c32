use crate::{
    CBox, SqliteConnection, SqlitePrepared, engine_error,
    extract::{extract_decltype, extract_name, extract_value},
};
use cinder_core::{Driver, Encoding, EngineError, EngineResult, Prepared, Step, Value};
use libsqlite3_sys::*;
use std::{
    ffi::{CString, c_char, c_int, c_void},
    ptr,
};

// Not part of the generated bindings, the bundled library exports it.
unsafe extern "C" {
    fn sqlite3_prepare16_v2(
        db: *mut sqlite3,
        sql: *const c_void,
        n: c_int,
        stmt: *mut *mut sqlite3_stmt,
        tail: *mut *const c_void,
    ) -> c_int;
}

#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteDriver {}

impl SqliteDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

fn new_statement() -> CBox<*mut sqlite3_stmt> {
    CBox::new(ptr::null_mut(), |p| unsafe {
        sqlite3_finalize(p);
    })
}

fn no_statement() -> EngineError {
    EngineError::new(
        SQLITE_MISUSE,
        "The SQL text does not contain any statement",
    )
}

fn too_big(len: usize) -> EngineError {
    EngineError::new(
        SQLITE_TOOBIG,
        format!("Value of {} bytes is too big to be bound", len),
    )
}

fn prepare_utf8(connection: *mut sqlite3, sql: &str) -> EngineResult<Prepared<SqlitePrepared>> {
    let query = CString::new(sql).map_err(|e| {
        EngineError::new(
            SQLITE_MISUSE,
            format!("The query contains a nul byte at position {}", e.nul_position()),
        )
    })?;
    let len = c_int::try_from(sql.len() + 1).map_err(|_| too_big(sql.len()))?;
    let mut statement = new_statement();
    let mut tail: *const c_char = ptr::null();
    unsafe {
        let rc = sqlite3_prepare_v2(connection, query.as_ptr(), len, &mut *statement, &mut tail);
        if rc != SQLITE_OK {
            return Err(engine_error(connection, rc));
        }
        if statement.is_null() {
            return Err(no_statement());
        }
        let offset = if tail.is_null() {
            sql.len()
        } else {
            tail.offset_from(query.as_ptr()) as usize
        };
        Ok(Prepared {
            statement: SqlitePrepared::new(statement),
            remainder: sql.get(offset..).unwrap_or_default().to_owned(),
        })
    }
}

fn prepare_utf16(connection: *mut sqlite3, sql: &str) -> EngineResult<Prepared<SqlitePrepared>> {
    let query: Vec<u16> = sql.encode_utf16().collect();
    let len = c_int::try_from(query.len() * 2).map_err(|_| too_big(query.len() * 2))?;
    let base = query.as_ptr() as *const c_void;
    let mut statement = new_statement();
    let mut tail: *const c_void = ptr::null();
    unsafe {
        let rc = sqlite3_prepare16_v2(connection, base, len, &mut *statement, &mut tail);
        if rc != SQLITE_OK {
            return Err(engine_error(connection, rc));
        }
        if statement.is_null() {
            return Err(no_statement());
        }
        let offset = if tail.is_null() {
            query.len()
        } else {
            (tail as usize - base as usize) / 2
        };
        Ok(Prepared {
            statement: SqlitePrepared::new(statement),
            remainder: String::from_utf16_lossy(&query[offset.min(query.len())..]),
        })
    }
}

impl Driver for SqliteDriver {
    type Connection = SqliteConnection;
    type Statement = SqlitePrepared;

    const NAME: &'static str = "sqlite";

    fn prepare(
        &self,
        connection: &SqliteConnection,
        sql: &str,
        encoding: Encoding,
    ) -> EngineResult<Prepared<SqlitePrepared>> {
        match encoding {
            Encoding::Utf8 => prepare_utf8(*connection.connection, sql),
            Encoding::Utf16 => prepare_utf16(*connection.connection, sql),
        }
    }

    fn finalize(&self, mut statement: SqlitePrepared) {
        let rc = unsafe { sqlite3_finalize(statement.statement.release()) };
        if rc != SQLITE_OK {
            log::warn!("The last evaluation of the finalized statement failed with code {}", rc);
        }
    }

    /// Errors from the previous evaluation are reported again by the engine here, they were
    /// already surfaced by `step` so they are only logged.
    fn reset(&self, statement: &mut SqlitePrepared) -> EngineResult<()> {
        let rc = unsafe { sqlite3_reset(statement.as_ptr()) };
        if rc != SQLITE_OK {
            log::debug!("The previous evaluation of the statement failed with code {}", rc);
        }
        Ok(())
    }

    fn clear_bindings(&self, statement: &mut SqlitePrepared) -> EngineResult<()> {
        statement.check(unsafe { sqlite3_clear_bindings(statement.as_ptr()) })
    }

    fn step(&self, statement: &mut SqlitePrepared) -> EngineResult<Step> {
        match unsafe { sqlite3_step(statement.as_ptr()) } {
            SQLITE_ROW => Ok(Step::Row),
            SQLITE_DONE => Ok(Step::Done),
            rc => Err(unsafe { engine_error(sqlite3_db_handle(statement.as_ptr()), rc) }),
        }
    }

    fn bind_int(
        &self,
        statement: &mut SqlitePrepared,
        index: usize,
        value: i64,
    ) -> EngineResult<()> {
        let index = statement.index(index)?;
        statement.check(unsafe { sqlite3_bind_int64(statement.as_ptr(), index, value) })
    }

    fn bind_double(
        &self,
        statement: &mut SqlitePrepared,
        index: usize,
        value: f64,
    ) -> EngineResult<()> {
        let index = statement.index(index)?;
        statement.check(unsafe { sqlite3_bind_double(statement.as_ptr(), index, value) })
    }

    fn bind_text(
        &self,
        statement: &mut SqlitePrepared,
        index: usize,
        value: &str,
    ) -> EngineResult<()> {
        let index = statement.index(index)?;
        let len = c_int::try_from(value.len()).map_err(|_| too_big(value.len()))?;
        statement.check(unsafe {
            sqlite3_bind_text(
                statement.as_ptr(),
                index,
                value.as_ptr() as *const c_char,
                len,
                SQLITE_TRANSIENT(),
            )
        })
    }

    fn bind_blob(
        &self,
        statement: &mut SqlitePrepared,
        index: usize,
        value: &[u8],
    ) -> EngineResult<()> {
        let index = statement.index(index)?;
        let len = c_int::try_from(value.len()).map_err(|_| too_big(value.len()))?;
        statement.check(unsafe {
            sqlite3_bind_blob(
                statement.as_ptr(),
                index,
                value.as_ptr() as *const c_void,
                len,
                SQLITE_TRANSIENT(),
            )
        })
    }

    fn bind_null(&self, statement: &mut SqlitePrepared, index: usize) -> EngineResult<()> {
        let index = statement.index(index)?;
        statement.check(unsafe { sqlite3_bind_null(statement.as_ptr(), index) })
    }

    fn bind_parameter_index(&self, statement: &SqlitePrepared, name: &str) -> usize {
        let Ok(name) = CString::new(name) else {
            return 0;
        };
        unsafe { sqlite3_bind_parameter_index(statement.as_ptr(), name.as_ptr()) as usize }
    }

    fn bind_parameter_count(&self, statement: &SqlitePrepared) -> usize {
        unsafe { sqlite3_bind_parameter_count(statement.as_ptr()) as usize }
    }

    fn column_count(&self, statement: &SqlitePrepared) -> usize {
        unsafe { sqlite3_column_count(statement.as_ptr()) as usize }
    }

    fn column_name(&self, statement: &SqlitePrepared, index: usize) -> EngineResult<String> {
        extract_name(statement.as_ptr(), statement.index(index)?)
    }

    fn column_decltype(&self, statement: &SqlitePrepared, index: usize) -> Option<String> {
        extract_decltype(statement.as_ptr(), statement.index(index).ok()?)
    }

    fn column_value(&self, statement: &SqlitePrepared, index: usize) -> EngineResult<Value> {
        extract_value(statement.as_ptr(), statement.index(index)?)
    }
}
