use crate::{EngineResult, Value};

/// Text encoding of the SQL handed to [`Driver::prepare`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16,
}

/// Outcome of a single engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A row is available through the column accessors.
    Row,
    /// The statement ran to completion.
    Done,
}

/// A successfully compiled statement handle and the SQL text following it.
#[derive(Debug)]
pub struct Prepared<S> {
    pub statement: S,
    pub remainder: String,
}

/// The engine call surface.
///
/// A driver is a thin, stateless translation of these calls to the native engine API. It never
/// keeps track of the statement state, that is the job of [`Statement`](crate::Statement).
/// Positional indexes are 1 based, column indexes are 0 based.
pub trait Driver {
    /// Native connection the statements are compiled against.
    type Connection;
    /// Native statement handle. Dropping it must release the native resources.
    type Statement;

    const NAME: &'static str;

    /// Compile the first statement of `sql`.
    fn prepare(
        &self,
        connection: &Self::Connection,
        sql: &str,
        encoding: Encoding,
    ) -> EngineResult<Prepared<Self::Statement>>;
    fn finalize(&self, statement: Self::Statement);
    fn reset(&self, statement: &mut Self::Statement) -> EngineResult<()>;
    fn clear_bindings(&self, statement: &mut Self::Statement) -> EngineResult<()>;
    fn step(&self, statement: &mut Self::Statement) -> EngineResult<Step>;

    fn bind_int(&self, statement: &mut Self::Statement, index: usize, value: i64)
    -> EngineResult<()>;
    fn bind_double(
        &self,
        statement: &mut Self::Statement,
        index: usize,
        value: f64,
    ) -> EngineResult<()>;
    fn bind_text(&self, statement: &mut Self::Statement, index: usize, value: &str)
    -> EngineResult<()>;
    fn bind_blob(
        &self,
        statement: &mut Self::Statement,
        index: usize,
        value: &[u8],
    ) -> EngineResult<()>;
    fn bind_null(&self, statement: &mut Self::Statement, index: usize) -> EngineResult<()>;
    /// Position of the named placeholder, 0 when there is none.
    fn bind_parameter_index(&self, statement: &Self::Statement, name: &str) -> usize;
    fn bind_parameter_count(&self, statement: &Self::Statement) -> usize;

    fn column_count(&self, statement: &Self::Statement) -> usize;
    fn column_name(&self, statement: &Self::Statement, index: usize) -> EngineResult<String>;
    /// Declared type of the column, `None` for expressions.
    fn column_decltype(&self, statement: &Self::Statement, index: usize) -> Option<String>;
    /// Value of a column of the current row.
    fn column_value(&self, statement: &Self::Statement, index: usize) -> EngineResult<Value>;

    /// Encode `value` with the matching bind call.
    fn bind_value(
        &self,
        statement: &mut Self::Statement,
        index: usize,
        value: &Value,
    ) -> EngineResult<()> {
        match value {
            Value::Null => self.bind_null(statement, index),
            Value::Integer(v) => self.bind_int(statement, index, *v),
            Value::Float(v) => self.bind_double(statement, index, *v),
            Value::Text(v) => self.bind_text(statement, index, v),
            Value::Blob(v) => self.bind_blob(statement, index, v),
        }
    }
}
