use crate::{ColumnTypes, Driver, Error, FromValue, Result, Statement, Value};
use std::sync::Arc;

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(names: RowNames, values: Row) -> Self {
        Self {
            labels: names,
            values,
        }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values()[i])
    }
    /// Decode the column `name` into `T`.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T> {
        let value = self
            .get_column(name)
            .ok_or_else(|| Error::msg(format!("No column named `{}` in the row", name)))?;
        T::try_from_value(value.clone())
            .map_err(|e| e.context(format!("While decoding the column `{}`", name)))
    }
    /// Decode the column at `index` into `T`.
    pub fn get_index<T: FromValue>(&self, index: usize) -> Result<T> {
        let value = self.values.get(index).ok_or_else(|| {
            Error::msg(format!(
                "Column index {} is out of range, the row has {} columns",
                index,
                self.values.len()
            ))
        })?;
        T::try_from_value(value.clone())
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

/// Forward only sequence of the rows produced by one execution of a [`Statement`].
///
/// The cursor mutably borrows its statement: it cannot be used once the statement is executed
/// again or closed. The first engine step already happened when the cursor is handed out.
pub struct Cursor<'s, 'c, D: Driver> {
    statement: &'s mut Statement<'c, D>,
    labels: RowNames,
    types: ColumnTypes,
    first: Option<RowLabeled>,
    done: bool,
}

impl<'s, 'c, D: Driver> Cursor<'s, 'c, D> {
    pub(crate) fn new(
        statement: &'s mut Statement<'c, D>,
        labels: RowNames,
        types: ColumnTypes,
    ) -> Result<Self> {
        let first = statement.step_row(&labels)?;
        Ok(Self {
            statement,
            labels,
            types,
            done: first.is_none(),
            first,
        })
    }

    pub fn columns(&self) -> &RowNames {
        &self.labels
    }

    pub fn types(&self) -> &ColumnTypes {
        &self.types
    }

    /// True once every row was pulled.
    pub fn is_done(&self) -> bool {
        self.done && self.first.is_none()
    }

    pub fn statement(&self) -> &Statement<'c, D> {
        self.statement
    }
}

impl<D: Driver> Iterator for Cursor<'_, '_, D> {
    type Item = Result<RowLabeled>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(row) = self.first.take() {
            return Some(Ok(row));
        }
        if self.done {
            return None;
        }
        match self.statement.step_row(&self.labels) {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
