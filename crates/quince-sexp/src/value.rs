use std::fmt;

use crate::escape;

/// A value that renders its own literal form.
///
/// The encoder emits the returned text verbatim, so implementors are
/// responsible for producing a well-formed literal.
pub trait CustomSexp: fmt::Debug + Send + Sync {
    fn to_sexp(&self) -> String;
}

/// A value in the archive literal format.
///
/// Every shape the protocol can emit is a variant here, so rendering is
/// total and infallible.
#[derive(Debug)]
pub enum Sexp {
    Nil,
    /// `t` or `nil`.
    Bool(bool),
    Int(i64),
    Float(f64),
    /// A double-quoted string literal.
    Str(String),
    Symbol(String),
    /// A symbol prefixed with `:`, denoting a label rather than a name.
    Keyword(String),
    List(Vec<Sexp>),
    Vector(Vec<Sexp>),
    /// Ordered key-value pairs. Keys are always rendered as symbols,
    /// entries in insertion order.
    Alist(Vec<(String, Sexp)>),
    /// Escape hatch: the wrapped value renders itself.
    Custom(Box<dyn CustomSexp>),
}

impl Sexp {
    pub fn string(text: impl Into<String>) -> Self {
        Sexp::Str(text.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Sexp::Symbol(name.into())
    }

    pub fn keyword(name: impl Into<String>) -> Self {
        Sexp::Keyword(name.into())
    }

    pub fn list(items: impl IntoIterator<Item = Sexp>) -> Self {
        Sexp::List(items.into_iter().collect())
    }

    pub fn vector(items: impl IntoIterator<Item = Sexp>) -> Self {
        Sexp::Vector(items.into_iter().collect())
    }

    pub fn alist<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Sexp)>) -> Self {
        Sexp::Alist(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn custom(value: impl CustomSexp + 'static) -> Self {
        Sexp::Custom(Box::new(value))
    }

    /// Renders the value as literal text.
    pub fn render(&self) -> String {
        match self {
            Sexp::Nil => "nil".to_string(),
            Sexp::Bool(true) => "t".to_string(),
            Sexp::Bool(false) => "nil".to_string(),
            Sexp::Int(n) => n.to_string(),
            Sexp::Float(n) => n.to_string(),
            Sexp::Str(text) => escape::string_literal(text),
            Sexp::Symbol(name) => escape::symbol(name),
            Sexp::Keyword(name) => format!(":{}", escape::symbol(name)),
            Sexp::List(items) => format!("({})", render_joined(items)),
            Sexp::Vector(items) => format!("[{}]", render_joined(items)),
            Sexp::Alist(pairs) => {
                if pairs.is_empty() {
                    return "()".to_string();
                }
                pairs
                    .iter()
                    .map(|(key, value)| format!("({} . {})", escape::symbol(key), value.render()))
                    .collect()
            }
            Sexp::Custom(value) => value.to_sexp(),
        }
    }
}

fn render_joined(items: &[Sexp]) -> String {
    items
        .iter()
        .map(Sexp::render)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<bool> for Sexp {
    fn from(value: bool) -> Self {
        Sexp::Bool(value)
    }
}

impl From<i64> for Sexp {
    fn from(value: i64) -> Self {
        Sexp::Int(value)
    }
}

impl From<i32> for Sexp {
    fn from(value: i32) -> Self {
        Sexp::Int(value.into())
    }
}

impl From<f64> for Sexp {
    fn from(value: f64) -> Self {
        Sexp::Float(value)
    }
}

impl From<&str> for Sexp {
    fn from(value: &str) -> Self {
        Sexp::Str(value.to_string())
    }
}

impl From<String> for Sexp {
    fn from(value: String) -> Self {
        Sexp::Str(value)
    }
}

impl From<Vec<Sexp>> for Sexp {
    fn from(items: Vec<Sexp>) -> Self {
        Sexp::List(items)
    }
}

/// `None` renders as `nil`.
impl<T: Into<Sexp>> From<Option<T>> for Sexp {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Sexp::Nil,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_and_booleans() {
        assert_eq!(Sexp::Nil.render(), "nil");
        assert_eq!(Sexp::Bool(true).render(), "t");
        assert_eq!(Sexp::Bool(false).render(), "nil");
        assert_eq!(Sexp::from(None::<i64>).render(), "nil");
    }

    #[test]
    fn numbers_use_canonical_decimal_form() {
        assert_eq!(Sexp::Int(42).render(), "42");
        assert_eq!(Sexp::Int(-7).render(), "-7");
        assert_eq!(Sexp::Float(1.5).render(), "1.5");
    }

    #[test]
    fn strings_symbols_and_keywords() {
        assert_eq!(Sexp::string("hello").render(), "\"hello\"");
        assert_eq!(Sexp::string("").render(), "\"\"");
        assert_eq!(Sexp::symbol("my-package").render(), "my-package");
        assert_eq!(Sexp::keyword("url").render(), ":url");
        assert_eq!(Sexp::keyword("2fa").render(), r":\2fa");
    }

    #[test]
    fn lists_and_vectors() {
        assert_eq!(Sexp::list([]).render(), "()");
        assert_eq!(Sexp::vector([]).render(), "[]");
        assert_eq!(
            Sexp::list([Sexp::Int(1), Sexp::symbol("a"), Sexp::string("b")]).render(),
            "(1 a \"b\")"
        );
        assert_eq!(
            Sexp::vector([Sexp::Int(1), Sexp::Int(2)]).render(),
            "[1 2]"
        );
    }

    #[test]
    fn nested_lists() {
        let value = Sexp::list([
            Sexp::Int(1),
            Sexp::list([Sexp::symbol("quince"), Sexp::vector([Sexp::Int(0), Sexp::Int(9)])]),
        ]);
        assert_eq!(value.render(), "(1 (quince [0 9]))");
    }

    #[test]
    fn alist_preserves_insertion_order() {
        let value = Sexp::alist([("a", Sexp::Int(1)), ("b", Sexp::Int(2))]);
        assert_eq!(value.render(), "(a . 1)(b . 2)");
    }

    #[test]
    fn empty_alist_renders_as_empty_list() {
        assert_eq!(Sexp::alist(Vec::<(String, Sexp)>::new()).render(), "()");
    }

    #[test]
    fn alist_keys_are_symbol_escaped() {
        let value = Sexp::alist([("weird key", Sexp::Nil)]);
        assert_eq!(value.render(), r"(weird\ key . nil)");
    }

    #[test]
    fn custom_values_render_verbatim() {
        #[derive(Debug)]
        struct Raw;

        impl CustomSexp for Raw {
            fn to_sexp(&self) -> String {
                "(raw . form)".to_string()
            }
        }

        assert_eq!(Sexp::custom(Raw).render(), "(raw . form)");
    }

    #[test]
    fn display_matches_render() {
        let value = Sexp::list([Sexp::symbol("x"), Sexp::Int(3)]);
        assert_eq!(value.to_string(), value.render());
    }
}
