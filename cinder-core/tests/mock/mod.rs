#![allow(dead_code)]
use cinder_core::{
    Connection, Driver, Encoding, EngineError, EngineResult, Prepared, Step, Value,
};
use std::{cell::RefCell, rc::Rc};

/// Engine call observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Prepare(String),
    Finalize,
    Release,
    Reset,
    ClearBindings,
    Step,
    Bind(usize, Value),
    ColumnCount,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// Scripted engine.
///
/// The SQL understood is `SELECT col [TYPE], ... [WHERE ...]` plus `INSERT`, `UPDATE`, `DELETE`
/// (no columns) and `BUSY` (every step fails). Anything else does not compile. Placeholders
/// (`?`, `?NNN`, `:name`, `@name`, `$name`) are found anywhere in the text. A `SELECT` produces
/// `rows` rows: the first column is the 1 based row number, column `j` echoes binding `j`.
#[derive(Debug, Default)]
pub struct MockDriver {
    pub calls: CallLog,
    pub rows: usize,
}

#[derive(Debug)]
pub struct MockStatement {
    calls: CallLog,
    placeholders: Vec<String>,
    bindings: Vec<Value>,
    columns: Vec<(String, Option<String>)>,
    rows: usize,
    busy: bool,
    position: usize,
}

impl Drop for MockStatement {
    fn drop(&mut self) {
        self.calls.borrow_mut().push(Call::Release);
    }
}

#[derive(Debug, Default)]
pub struct MockConnection {
    pub driver: MockDriver,
}

impl MockConnection {
    pub fn new(rows: usize) -> Self {
        Self {
            driver: MockDriver {
                calls: Default::default(),
                rows,
            },
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.driver.calls.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.driver
            .calls
            .borrow()
            .iter()
            .filter(|c| *c == call)
            .count()
    }

    pub fn binds(&self) -> Vec<(usize, Value)> {
        self.driver
            .calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Bind(i, v) => Some((*i, v.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn forget(&self) {
        self.driver.calls.borrow_mut().clear();
    }
}

impl Connection for MockConnection {
    type Driver = MockDriver;

    fn driver(&self) -> &MockDriver {
        &self.driver
    }
}

fn placeholders(sql: &str) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    let mut chars = sql.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if !matches!(c, '?' | ':' | '@' | '$') {
            continue;
        }
        let mut end = start + c.len_utf8();
        while let Some(&(i, c)) = chars.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }
        let name = &sql[start..end];
        match name {
            "?" => result.push(String::new()),
            ":" | "@" | "$" => {}
            name if name.starts_with('?') => {
                let Ok(position) = name[1..].parse::<usize>() else {
                    continue;
                };
                if result.len() < position {
                    result.resize(position, String::new());
                }
                result[position - 1] = name.to_string();
            }
            name => {
                if !result.iter().any(|p| p == name) {
                    result.push(name.to_string());
                }
            }
        }
    }
    result
}

fn columns(sql: &str) -> Vec<(String, Option<String>)> {
    let list = sql["SELECT".len()..]
        .split(" WHERE ")
        .next()
        .unwrap_or_default();
    list.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| match c.split_once(' ') {
            Some((name, ty)) => (name.to_string(), Some(ty.trim().to_string())),
            _ => (c.to_string(), None),
        })
        .collect()
}

impl Driver for MockDriver {
    type Connection = MockConnection;
    type Statement = MockStatement;

    const NAME: &'static str = "mock";

    fn prepare(
        &self,
        _connection: &MockConnection,
        sql: &str,
        _encoding: Encoding,
    ) -> EngineResult<Prepared<MockStatement>> {
        self.calls.borrow_mut().push(Call::Prepare(sql.to_string()));
        let (text, remainder) = match sql.find(';') {
            Some(i) => (&sql[..i], &sql[i + 1..]),
            None => (sql, ""),
        };
        let text = text.trim();
        if text.is_empty() {
            return Err(EngineError::new(21, "no statement"));
        }
        let keyword = text.split_whitespace().next().unwrap_or_default();
        let (columns, rows, busy) = match keyword {
            "SELECT" => (columns(text), self.rows, false),
            "INSERT" | "UPDATE" | "DELETE" => (Vec::new(), 0, false),
            "BUSY" => (Vec::new(), 0, true),
            other => {
                return Err(EngineError::new(
                    1,
                    format!("near \"{}\": syntax error", other),
                ));
            }
        };
        let placeholders = placeholders(text);
        Ok(Prepared {
            statement: MockStatement {
                calls: self.calls.clone(),
                bindings: vec![Value::Null; placeholders.len()],
                placeholders,
                columns,
                rows,
                busy,
                position: 0,
            },
            remainder: remainder.to_string(),
        })
    }

    fn finalize(&self, statement: MockStatement) {
        self.calls.borrow_mut().push(Call::Finalize);
        drop(statement);
    }

    fn reset(&self, statement: &mut MockStatement) -> EngineResult<()> {
        self.calls.borrow_mut().push(Call::Reset);
        statement.position = 0;
        Ok(())
    }

    fn clear_bindings(&self, statement: &mut MockStatement) -> EngineResult<()> {
        self.calls.borrow_mut().push(Call::ClearBindings);
        statement.bindings.fill(Value::Null);
        Ok(())
    }

    fn step(&self, statement: &mut MockStatement) -> EngineResult<Step> {
        self.calls.borrow_mut().push(Call::Step);
        if statement.busy {
            return Err(EngineError::new(5, "database is locked"));
        }
        if statement.position < statement.rows {
            statement.position += 1;
            Ok(Step::Row)
        } else {
            Ok(Step::Done)
        }
    }

    fn bind_int(&self, statement: &mut MockStatement, index: usize, value: i64) -> EngineResult<()> {
        bind(self, statement, index, Value::Integer(value))
    }

    fn bind_double(
        &self,
        statement: &mut MockStatement,
        index: usize,
        value: f64,
    ) -> EngineResult<()> {
        bind(self, statement, index, Value::Float(value))
    }

    fn bind_text(&self, statement: &mut MockStatement, index: usize, value: &str) -> EngineResult<()> {
        bind(self, statement, index, Value::Text(value.into()))
    }

    fn bind_blob(
        &self,
        statement: &mut MockStatement,
        index: usize,
        value: &[u8],
    ) -> EngineResult<()> {
        bind(self, statement, index, Value::Blob(value.into()))
    }

    fn bind_null(&self, statement: &mut MockStatement, index: usize) -> EngineResult<()> {
        bind(self, statement, index, Value::Null)
    }

    fn bind_parameter_index(&self, statement: &MockStatement, name: &str) -> usize {
        statement
            .placeholders
            .iter()
            .position(|p| p == name)
            .map_or(0, |i| i + 1)
    }

    fn bind_parameter_count(&self, statement: &MockStatement) -> usize {
        statement.placeholders.len()
    }

    fn column_count(&self, statement: &MockStatement) -> usize {
        self.calls.borrow_mut().push(Call::ColumnCount);
        statement.columns.len()
    }

    fn column_name(&self, statement: &MockStatement, index: usize) -> EngineResult<String> {
        statement
            .columns
            .get(index)
            .map(|(name, _)| name.clone())
            .ok_or_else(|| EngineError::new(25, "column index out of range"))
    }

    fn column_decltype(&self, statement: &MockStatement, index: usize) -> Option<String> {
        statement.columns.get(index).and_then(|(_, ty)| ty.clone())
    }

    fn column_value(&self, statement: &MockStatement, index: usize) -> EngineResult<Value> {
        if statement.position == 0 || statement.position > statement.rows {
            return Err(EngineError::new(21, "no row available"));
        }
        match index {
            0 => Ok(Value::Integer(statement.position as i64)),
            i => Ok(statement.bindings.get(i - 1).cloned().unwrap_or_default()),
        }
    }
}

fn bind(
    driver: &MockDriver,
    statement: &mut MockStatement,
    index: usize,
    value: Value,
) -> EngineResult<()> {
    if index == 0 || index > statement.bindings.len() {
        return Err(EngineError::new(25, "column index out of range"));
    }
    driver.calls.borrow_mut().push(Call::Bind(index, value.clone()));
    statement.bindings[index - 1] = value;
    Ok(())
}
