use crate::{
    AsValue, Cursor, Driver, Encoding, EngineError, EngineResult, Error, PARAMETER_PREFIXES,
    Param, ParamRef, Result, RowLabeled, RowNames, StatementError, Step, Value,
    has_parameter_prefix, log_error, truncate_long,
};
use std::{
    fmt::{self, Debug, Display},
    marker::PhantomData,
    sync::Arc,
};

/// Declared types of the result columns, aligned with the column names.
pub type ColumnTypes = Arc<[Option<String>]>;

#[derive(Debug, Clone)]
struct Metadata {
    columns: RowNames,
    types: ColumnTypes,
}

fn closed_error() -> Error {
    log_error!(Error::new(StatementError::InvalidState(
        "Cannot use a closed statement"
    )))
}

fn engine_error(error: EngineError, context: String) -> Error {
    log_error!(Error::new(StatementError::Engine(error)).context(context))
}

/// A compiled SQL statement.
///
/// A statement is `Open` from a successful [`Statement::compile`] until [`Statement::close`],
/// then it is `Closed` for good and every operation fails with
/// [`StatementError::InvalidState`]. It borrows the connection it was compiled against, so it
/// cannot outlive it. Dropping an open statement finalizes it.
///
/// ```rust,ignore
/// let mut statement = connection.prepare("select id, name from t where id = ?")?;
/// for row in statement.execute(params![5])? {
///     let row = row?;
///     assert_eq!(row.get::<i64>("id")?, 5);
/// }
/// statement.close()?;
/// ```
pub struct Statement<'c, D: Driver> {
    driver: &'c D,
    connection: PhantomData<&'c D::Connection>,
    handle: Option<D::Statement>,
    sql: String,
    remainder: String,
    metadata: Option<Metadata>,
    executed: bool,
}

impl<'c, D: Driver> Statement<'c, D> {
    /// Compile the first statement of `sql` against `connection`.
    ///
    /// Any text after it is kept in [`Statement::remainder`].
    pub fn compile(
        driver: &'c D,
        connection: &'c D::Connection,
        sql: impl Into<String>,
        encoding: Encoding,
    ) -> Result<Self> {
        let sql = sql.into();
        let prepared = driver
            .prepare(connection, &sql, encoding)
            .map_err(|e| {
                log_error!(
                    Error::new(StatementError::Compile(e))
                        .context(format!("While preparing the query:\n{}", truncate_long!(sql)))
                )
            })?;
        log::debug!(
            "Compiled a {} statement ({:?}): {}",
            D::NAME,
            encoding,
            truncate_long!(sql)
        );
        Ok(Self {
            driver,
            connection: PhantomData,
            handle: Some(prepared.statement),
            sql,
            remainder: prepared.remainder,
            metadata: None,
            executed: false,
        })
    }

    /// Finalize the native statement. The statement must not be used afterwards.
    pub fn close(&mut self) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            return Err(log_error!(Error::new(StatementError::InvalidState(
                "The statement is already closed"
            ))));
        };
        self.driver.finalize(handle);
        self.executed = false;
        log::debug!("Closed the statement: {}", truncate_long!(self.sql));
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }

    /// The SQL text this statement was compiled from, remainder included.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Text following the first statement in the compiled SQL, empty if there was none.
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    fn must_be_open(&self) -> Result<()> {
        if self.handle.is_none() {
            return Err(closed_error());
        }
        Ok(())
    }

    /// Number of placeholders in the statement (highest position for `?NNN`).
    pub fn parameter_count(&self) -> Result<usize> {
        let Some(handle) = self.handle.as_ref() else {
            return Err(closed_error());
        };
        Ok(self.driver.bind_parameter_count(handle))
    }

    /// Position of the named placeholder.
    ///
    /// A name without prefix is looked up verbatim, then with each of `:`, `@` and `$`.
    pub fn parameter_index(&self, name: &str) -> Result<Option<usize>> {
        let Some(handle) = self.handle.as_ref() else {
            return Err(closed_error());
        };
        let index = self.driver.bind_parameter_index(handle, name);
        if index > 0 {
            return Ok(Some(index));
        }
        if !has_parameter_prefix(name) {
            for prefix in PARAMETER_PREFIXES {
                let index = self
                    .driver
                    .bind_parameter_index(handle, &format!("{}{}", prefix, name));
                if index > 0 {
                    return Ok(Some(index));
                }
            }
        }
        Ok(None)
    }

    /// Bind a list of parameters.
    ///
    /// Positional elements are bound to 1, 2, 3... in order, mapping elements bind each entry by
    /// reference without consuming a position.
    pub fn bind_params<'p>(
        &mut self,
        params: impl IntoIterator<Item = Param<'p>>,
    ) -> Result<&mut Self> {
        let mut index: usize = 1;
        for param in params {
            match param {
                Param::Positional(value) => {
                    self.bind_param(index, &*value)?;
                    index += 1;
                }
                Param::Named(entries) => {
                    for (param, value) in entries {
                        self.bind_param(param, &*value)?;
                    }
                }
            }
        }
        Ok(self)
    }

    /// Bind `value` to the placeholder referenced by `param`.
    ///
    /// A name is resolved first, an unknown one fails with [`StatementError::UnknownParameter`]
    /// before anything is bound.
    pub fn bind_param<'r>(
        &mut self,
        param: impl Into<ParamRef<'r>>,
        value: impl AsValue,
    ) -> Result<&mut Self> {
        self.must_be_open()?;
        let index = match param.into() {
            ParamRef::Index(index) => index,
            ParamRef::Name(name) => match self.parameter_index(&name)? {
                Some(index) => index,
                None => {
                    return Err(log_error!(
                        Error::new(StatementError::UnknownParameter(name.into_owned())).context(
                            format!("While binding the query:\n{}", truncate_long!(self.sql))
                        )
                    ));
                }
            },
        };
        let value = value.as_value().map_err(|e| {
            log_error!(e.context(format!("Cannot bind parameter {}", index)))
        })?;
        self.bind_value(index, &value)
    }

    /// Bind an already encoded value at a 1 based position.
    ///
    /// The engine refuses bindings while a previous execution is pending, the statement is reset
    /// first in that case. Other bindings are kept.
    pub fn bind_value(&mut self, index: usize, value: &Value) -> Result<&mut Self> {
        if self.executed {
            self.reset()?;
        }
        let driver = self.driver;
        let Some(handle) = self.handle.as_mut() else {
            return Err(closed_error());
        };
        log::trace!("Binding {} to parameter {}", value, index);
        driver.bind_value(handle, index, value).map_err(|e| {
            engine_error(
                e,
                format!(
                    "Cannot bind parameter {} to query:\n{}",
                    index,
                    truncate_long!(self.sql)
                ),
            )
        })?;
        Ok(self)
    }

    /// Set every parameter back to null.
    pub fn clear_bindings(&mut self) -> Result<&mut Self> {
        let driver = self.driver;
        let Some(handle) = self.handle.as_mut() else {
            return Err(closed_error());
        };
        driver.clear_bindings(handle).map_err(|e| {
            engine_error(
                e,
                format!("While clearing the bindings of:\n{}", truncate_long!(self.sql)),
            )
        })?;
        Ok(self)
    }

    /// Rewind the statement to its first row, bindings are kept.
    pub fn reset(&mut self) -> Result<&mut Self> {
        let driver = self.driver;
        let Some(handle) = self.handle.as_mut() else {
            return Err(closed_error());
        };
        driver.reset(handle).map_err(|e| {
            engine_error(e, format!("While resetting the query:\n{}", truncate_long!(self.sql)))
        })?;
        self.executed = false;
        log::debug!("Reset the statement: {}", truncate_long!(self.sql));
        Ok(self)
    }

    /// Run the statement and return a cursor over its rows.
    ///
    /// A previous execution is reset first. Parameters, when any is given, are bound with
    /// [`Statement::bind_params`], otherwise the current bindings are used.
    pub fn execute<'p>(
        &mut self,
        params: impl IntoIterator<Item = Param<'p>>,
    ) -> Result<Cursor<'_, 'c, D>> {
        self.must_be_open()?;
        if self.executed {
            self.reset()?;
        }
        let mut params = params.into_iter().peekable();
        if params.peek().is_some() {
            self.bind_params(params)?;
        }
        let Metadata { columns, types } = self.metadata()?.clone();
        self.executed = true;
        Cursor::new(self, columns, types)
    }

    /// Run the statement and hand the cursor to `f`, returning what it returns.
    pub fn execute_with<'p, R>(
        &mut self,
        params: impl IntoIterator<Item = Param<'p>>,
        f: impl FnOnce(Cursor<'_, 'c, D>) -> R,
    ) -> Result<R> {
        Ok(f(self.execute(params)?))
    }

    /// Run the statement and collect every row.
    pub fn execute_collect<'p>(
        &mut self,
        params: impl IntoIterator<Item = Param<'p>>,
    ) -> Result<Vec<RowLabeled>> {
        self.execute(params)?.collect()
    }

    /// Run the statement and call `f` for each row, nothing is collected.
    pub fn execute_each<'p>(
        &mut self,
        params: impl IntoIterator<Item = Param<'p>>,
        mut f: impl FnMut(RowLabeled) -> Result<()>,
    ) -> Result<()> {
        for row in self.execute(params)? {
            f(row?)?;
        }
        Ok(())
    }

    /// Names of the result columns.
    ///
    /// The first call (of this or [`Statement::types`]) asks the engine for the column metadata,
    /// which may cost as much as a partial execution. Later calls return the cached value.
    pub fn columns(&mut self) -> Result<RowNames> {
        Ok(self.metadata()?.columns.clone())
    }

    /// Declared types of the result columns, `None` where the engine has no declared type.
    pub fn types(&mut self) -> Result<ColumnTypes> {
        Ok(self.metadata()?.types.clone())
    }

    fn metadata(&mut self) -> Result<&Metadata> {
        self.must_be_open()?;
        let metadata = match self.metadata.take() {
            Some(metadata) => metadata,
            None => self.compute_metadata()?,
        };
        Ok(self.metadata.insert(metadata))
    }

    fn compute_metadata(&self) -> Result<Metadata> {
        let Some(handle) = self.handle.as_ref() else {
            return Err(closed_error());
        };
        let count = self.driver.column_count(handle);
        let mut columns = Vec::with_capacity(count);
        let mut types = Vec::with_capacity(count);
        for i in 0..count {
            columns.push(self.driver.column_name(handle, i).map_err(|e| {
                engine_error(
                    e,
                    format!("While reading the name of column {}", i),
                )
            })?);
            types.push(self.driver.column_decltype(handle, i));
        }
        log::debug!(
            "Computed the metadata of {} columns for: {}",
            count,
            truncate_long!(self.sql)
        );
        Ok(Metadata {
            columns: columns.into(),
            types: types.into(),
        })
    }

    pub(crate) fn step_row(&mut self, labels: &RowNames) -> Result<Option<RowLabeled>> {
        let driver = self.driver;
        let Some(handle) = self.handle.as_mut() else {
            return Err(closed_error());
        };
        let context = || format!("While executing the query:\n{}", truncate_long!(self.sql));
        match driver.step(handle).map_err(|e| engine_error(e, context()))? {
            Step::Done => Ok(None),
            Step::Row => {
                let values = (0..labels.len())
                    .map(|i| driver.column_value(handle, i))
                    .collect::<EngineResult<Box<[Value]>>>()
                    .map_err(|e| engine_error(e, context()))?;
                Ok(Some(RowLabeled::new(labels.clone(), values)))
            }
        }
    }
}

impl<D: Driver> Display for Statement<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.sql))
    }
}

impl<D: Driver> Debug for Statement<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("driver", &D::NAME)
            .field("sql", &self.sql)
            .field("remainder", &self.remainder)
            .field("closed", &self.is_closed())
            .field("metadata", &self.metadata)
            .finish()
    }
}
