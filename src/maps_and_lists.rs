use std::collections::HashMap;
use crate::context::{Context, ContextRef, Lambda, LambdaResult};


enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Mapping(HashMap<String, MapsAndLists>),
    Sequence(Vec<MapsAndLists>),
    Lambda0(Box<dyn Fn() -> LambdaResult>),
    Lambda1(Box<dyn Fn(&str) -> LambdaResult>),
}

/// In-memory data built from Rust values, the only provided [Context] able
/// to hold lambdas.
///
/// ```
/// use mustache::{MapsAndLists, Template};
///
/// let data = MapsAndLists::mapping([
///     ("name", MapsAndLists::text("world")),
///     ("bold", MapsAndLists::lambda1(|text| format!("<b>{}</b>", text))),
/// ]);
/// let template = Template::from("{{#bold}}hello {{name}}{{/bold}}").unwrap();
/// assert_eq!(template.render(&data).unwrap(), "<b>hello world</b>");
/// ```
pub struct MapsAndLists(Value);

impl MapsAndLists {
    pub fn null() -> MapsAndLists {
        MapsAndLists(Value::Null)
    }

    pub fn bool(b: bool) -> MapsAndLists {
        MapsAndLists(Value::Bool(b))
    }

    pub fn number(n: f64) -> MapsAndLists {
        MapsAndLists(Value::Number(n))
    }

    pub fn text(t: &str) -> MapsAndLists {
        MapsAndLists(Value::Text(t.to_owned()))
    }

    pub fn mapping<'k, I>(entries: I) -> MapsAndLists
    where I: IntoIterator<Item = (&'k str, MapsAndLists)> {
        MapsAndLists(Value::Mapping(
            entries.into_iter()
                .map(|(name, value)| (name.to_owned(), value))
                .collect()
        ))
    }

    pub fn sequence(sequence: Vec<MapsAndLists>) -> MapsAndLists {
        MapsAndLists(Value::Sequence(sequence))
    }

    pub fn lambda0<T>(fun: T) -> MapsAndLists
    where T: Fn() -> String + 'static {
        MapsAndLists::try_lambda0(move || Ok(fun()))
    }

    pub fn lambda1<T>(fun: T) -> MapsAndLists
    where T: Fn(&str) -> String + 'static {
        MapsAndLists::try_lambda1(move |text: &str| Ok(fun(text)))
    }

    /// A lambda whose failure aborts rendering with [`Error::Adapter`](crate::Error::Adapter).
    pub fn try_lambda0<T>(fun: T) -> MapsAndLists
    where T: Fn() -> LambdaResult + 'static {
        MapsAndLists(Value::Lambda0(Box::new(fun)))
    }

    pub fn try_lambda1<T>(fun: T) -> MapsAndLists
    where T: Fn(&str) -> LambdaResult + 'static {
        MapsAndLists(Value::Lambda1(Box::new(fun)))
    }
}

impl Context for MapsAndLists {
    fn child<'a>(&'a self, name: &str) -> Option<ContextRef<'a>> {
        match &self.0 {
            Value::Mapping(obj) => obj.get(name).map(
                |it| it as ContextRef<'a>
            ),
            _ => None
        }
    }

    fn children<'a>(&'a self) -> Option<Vec<ContextRef<'a>>> {
        match &self.0 {
            Value::Sequence(seq) =>
                Some(
                    seq.iter().map(
                        |it| it as ContextRef<'a>
                    ).collect::<Vec<_>>()
                ),
            _ => None
        }
    }

    fn value(&self) -> String {
        match &self.0 {
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Text(text) => text.to_owned(),
            _ => String::new()
        }
    }

    fn is_falsy(&self) -> bool {
        matches!(self.0, Value::Null | Value::Bool(false))
    }

    fn is_bool(&self) -> bool {
        matches!(self.0, Value::Bool(_))
    }

    fn lambda(&self) -> Option<Lambda<'_>> {
        match &self.0 {
            Value::Lambda0(fun) => Some(Lambda::Nullary(fun.as_ref())),
            Value::Lambda1(fun) => Some(Lambda::Unary(fun.as_ref())),
            _ => None
        }
    }
}
