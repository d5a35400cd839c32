#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            &$query[..$crate::floor_char_boundary(&$query, 497)].trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}

/// Largest index not greater than `index` that lies on a char boundary of `value`.
pub fn floor_char_boundary(value: &str, index: usize) -> usize {
    if index >= value.len() {
        return value.len();
    }
    (0..=index)
        .rev()
        .find(|&i| value.is_char_boundary(i))
        .unwrap_or(0)
}

/// Sql placeholder prefixes, in the order they are tried for a bare name.
pub const PARAMETER_PREFIXES: [char; 3] = [':', '@', '$'];

/// True if `name` already starts with a placeholder prefix (including `?` for `?NNN`).
pub fn has_parameter_prefix(name: &str) -> bool {
    name.starts_with(PARAMETER_PREFIXES) || name.starts_with('?')
}

/// Log the error at `error` level and return it.
#[macro_export]
macro_rules! log_error {
    ($error:expr) => {{
        let error: $crate::Error = $error;
        log::error!("{:#}", error);
        error
    }};
}

/// Skip the leading whitespace and SQL comments (`-- line` and `/* block */`).
pub fn skip_blank(mut sql: &str) -> &str {
    loop {
        sql = sql.trim_start();
        if let Some(rest) = sql.strip_prefix("--") {
            sql = rest.find('\n').map_or("", |i| &rest[i + 1..]);
        } else if let Some(rest) = sql.strip_prefix("/*") {
            sql = rest.find("*/").map_or("", |i| &rest[i + 2..]);
        } else {
            return sql;
        }
    }
}
