use crate::{CBox, SqliteDriver, error_message_from_ptr};
use cinder_core::{Connection, Context, Driver, EngineError, Error, Result};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI, sqlite3,
    sqlite3_close, sqlite3_errmsg, sqlite3_errstr, sqlite3_open_v2,
};
use std::{
    ffi::{CString, c_int},
    ptr,
};

/// An open SQLite database.
///
/// The url is `sqlite://` followed by a path or `:memory:`, optionally with URI parameters like
/// `?mode=ro`, `?mode=rw`, `?mode=rwc` or `?cache=shared`.
pub struct SqliteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

impl SqliteConnection {
    pub fn connect(url: &str) -> Result<SqliteConnection> {
        let prefix = format!("{}://", SqliteDriver::NAME);
        let Some(path) = url.strip_prefix(&prefix) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                &prefix
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        let path = match path {
            "" => ":memory:",
            path => path,
        };
        let uri = if path.starts_with("file:") {
            path.to_owned()
        } else {
            format!("file:{}", path)
        };
        let context = || format!("Error while decoding connection URL: `{}`", url);
        let uri = CString::new(uri).with_context(context)?;
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        let flags: c_int = SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI;
        unsafe {
            let rc = sqlite3_open_v2(uri.as_ptr(), &mut *connection, flags, ptr::null());
            if rc != SQLITE_OK {
                let message = if connection.is_null() {
                    error_message_from_ptr(&sqlite3_errstr(rc)).to_string()
                } else {
                    error_message_from_ptr(&sqlite3_errmsg(*connection)).to_string()
                };
                let error = Error::new(EngineError::new(rc, message))
                    .context(format!("Could not open the database `{}`", url));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        log::debug!("Opened the sqlite database `{}`", url);
        Ok(Self { connection })
    }
}

impl Connection for SqliteConnection {
    type Driver = SqliteDriver;

    fn driver(&self) -> &SqliteDriver {
        &SqliteDriver {}
    }
}
