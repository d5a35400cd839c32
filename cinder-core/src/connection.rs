use crate::{Driver, Encoding, Result, Statement, params, skip_blank};

/// An open connection to the engine, the thing statements are compiled against.
///
/// Opening and closing the native connection is up to the implementor, dropping it must close it.
pub trait Connection: Sized {
    type Driver: Driver<Connection = Self>;

    fn driver(&self) -> &Self::Driver;

    /// Compile the first statement of `sql`.
    fn prepare(&self, sql: &str) -> Result<Statement<'_, Self::Driver>> {
        self.prepare_with(sql, Encoding::Utf8)
    }

    /// Compile the first statement of `sql`, handing it to the engine in the given encoding.
    fn prepare_with(&self, sql: &str, encoding: Encoding) -> Result<Statement<'_, Self::Driver>> {
        Statement::compile(self.driver(), self, sql, encoding)
    }

    /// Execute every statement in `sql`, one after the other, discarding the rows.
    fn execute_batch(&self, sql: &str) -> Result<()> {
        let mut sql = skip_blank(sql).to_owned();
        while !sql.is_empty() {
            let mut statement = self.prepare(&sql)?;
            statement.execute_each(params![], |_| Ok(()))?;
            let remainder = skip_blank(statement.remainder()).to_owned();
            statement.close()?;
            sql = remainder;
        }
        Ok(())
    }
}
