use crate::engine_error;
use cinder_core::{EngineError, EngineResult, Value};
use libsqlite3_sys::*;
use std::{
    ffi::{CStr, c_int},
    slice,
};

unsafe fn column_bytes<'a>(ptr: *const u8, len: c_int) -> &'a [u8] {
    if ptr.is_null() || len <= 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(ptr, len as usize) }
    }
}

pub(crate) fn extract_value(statement: *mut sqlite3_stmt, index: c_int) -> EngineResult<Value> {
    unsafe {
        let column_type = sqlite3_column_type(statement, index);
        Ok(match column_type {
            SQLITE_NULL => Value::Null,
            SQLITE_INTEGER => Value::Integer(sqlite3_column_int64(statement, index)),
            SQLITE_FLOAT => Value::Float(sqlite3_column_double(statement, index)),
            SQLITE_BLOB => {
                let ptr = sqlite3_column_blob(statement, index) as *const u8;
                let len = sqlite3_column_bytes(statement, index);
                Value::Blob(column_bytes(ptr, len).into())
            }
            SQLITE_TEXT => {
                let ptr = sqlite3_column_text(statement, index);
                let len = sqlite3_column_bytes(statement, index);
                Value::Text(String::from_utf8_lossy(column_bytes(ptr, len)).into_owned())
            }
            _ => {
                return Err(EngineError::new(
                    SQLITE_MISMATCH,
                    format!("Unexpected column type {}", column_type),
                ));
            }
        })
    }
}

pub(crate) fn extract_name(statement: *mut sqlite3_stmt, index: c_int) -> EngineResult<String> {
    unsafe {
        let name = sqlite3_column_name(statement, index);
        if name.is_null() {
            return Err(engine_error(sqlite3_db_handle(statement), SQLITE_NOMEM));
        }
        Ok(CStr::from_ptr(name).to_string_lossy().into_owned())
    }
}

pub(crate) fn extract_decltype(statement: *mut sqlite3_stmt, index: c_int) -> Option<String> {
    unsafe {
        let decltype = sqlite3_column_decltype(statement, index);
        if decltype.is_null() {
            return None;
        }
        Some(CStr::from_ptr(decltype).to_string_lossy().into_owned())
    }
}
