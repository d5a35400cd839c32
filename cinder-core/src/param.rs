use crate::AsValue;
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    fmt::{self, Debug, Display},
};

/// Reference to a placeholder: a 1 based position or a name.
///
/// Names are matched against `:name`, `@name` and `$name` placeholders. The prefix may be
/// omitted, in that case each prefix is tried in that order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamRef<'a> {
    Index(usize),
    Name(Cow<'a, str>),
}

impl Display for ParamRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamRef::Index(v) => write!(f, "{}", v),
            ParamRef::Name(v) => f.write_str(v),
        }
    }
}

impl From<usize> for ParamRef<'_> {
    fn from(value: usize) -> Self {
        ParamRef::Index(value)
    }
}

impl From<u32> for ParamRef<'_> {
    fn from(value: u32) -> Self {
        ParamRef::Index(value as usize)
    }
}

/// Negative positions map to 0, which no placeholder has.
impl From<i32> for ParamRef<'_> {
    fn from(value: i32) -> Self {
        ParamRef::Index(usize::try_from(value).unwrap_or_default())
    }
}

impl<'a> From<&'a str> for ParamRef<'a> {
    fn from(value: &'a str) -> Self {
        ParamRef::Name(Cow::Borrowed(value))
    }
}

impl From<String> for ParamRef<'_> {
    fn from(value: String) -> Self {
        ParamRef::Name(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for ParamRef<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        ParamRef::Name(value)
    }
}

impl<'a> From<&'a String> for ParamRef<'a> {
    fn from(value: &'a String) -> Self {
        ParamRef::Name(Cow::Borrowed(value))
    }
}

/// One element of a parameter list.
///
/// A positional element takes the next free position (starting at 1). A mapping element binds
/// each of its entries by reference and does not consume a position. Build lists with
/// [`params!`](crate::params).
pub enum Param<'a> {
    Positional(Box<dyn AsValue + 'a>),
    Named(Vec<(ParamRef<'a>, Box<dyn AsValue + 'a>)>),
}

impl<'a> Param<'a> {
    pub fn positional(value: impl AsValue + 'a) -> Self {
        Param::Positional(Box::new(value))
    }

    /// Mapping element, entries are bound in iteration order.
    pub fn named<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<ParamRef<'a>>,
        V: AsValue + 'a,
    {
        Param::Named(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), Box::new(v) as Box<dyn AsValue + 'a>))
                .collect(),
        )
    }
}

impl Debug for Param<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Positional(v) => f.debug_tuple("Positional").field(&v.as_value()).finish(),
            Param::Named(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(k, v)| (k, v.as_value())))
                .finish(),
        }
    }
}

impl<'a, K, V> From<BTreeMap<K, V>> for Param<'a>
where
    K: Into<ParamRef<'a>>,
    V: AsValue + 'a,
{
    fn from(value: BTreeMap<K, V>) -> Self {
        Param::named(value)
    }
}

impl<'a, K, V, S> From<HashMap<K, V, S>> for Param<'a>
where
    K: Into<ParamRef<'a>>,
    V: AsValue + 'a,
{
    fn from(value: HashMap<K, V, S>) -> Self {
        Param::named(value)
    }
}

/// Build a parameter list, mixing positional values and `{ name => value }` mappings.
///
/// ```rust
/// use cinder_core::{Param, params};
/// let params = params![10, { ":name" => "x" }, 20];
/// assert_eq!(params.len(), 3);
/// assert!(matches!(params[1], Param::Named(..)));
/// ```
#[macro_export]
macro_rules! params {
    (@acc [$($out:expr),*]) => {{
        let params: ::std::vec::Vec<$crate::Param<'_>> = ::std::vec![$($out),*];
        params
    }};
    (@acc [$($out:expr),*] { $($key:expr => $value:expr),* $(,)? } $(, $($rest:tt)*)?) => {
        $crate::params!(@acc [$($out,)* $crate::Param::Named(::std::vec![$((
            $crate::ParamRef::from($key),
            ::std::boxed::Box::new($value) as ::std::boxed::Box<dyn $crate::AsValue + '_>
        )),*])] $($($rest)*)?)
    };
    (@acc [$($out:expr),*] $value:expr $(, $($rest:tt)*)?) => {
        $crate::params!(@acc [$($out,)* $crate::Param::positional($value)] $($($rest)*)?)
    };
    ($($args:tt)*) => {
        $crate::params!(@acc [] $($args)*)
    };
}
