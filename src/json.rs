use crate::context::{Context, ContextRef};
pub use serde_json::Value as JsonValue;


impl Context for JsonValue {
    fn child<'a>(&'a self, name: &str) -> Option<ContextRef<'a>> {
        match self {
            JsonValue::Object(map) => map.get(name).map(
                |value| value as ContextRef<'a>
            ),
            _ => None
        }
    }

    fn children<'a>(&'a self) -> Option<Vec<ContextRef<'a>>> {
        match self {
            JsonValue::Array(seq) =>
                Some(
                    seq.iter()
                        .map(|value| value as ContextRef<'a>)
                        .collect::<_>()
                ),
            _ => None
        }
    }

    fn value(&self) -> String {
        match self {
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) => n.to_string(),
            JsonValue::Bool(b) => b.to_string(),
            _ => String::new()
        }
    }

    fn is_falsy(&self) -> bool {
        matches!(self, JsonValue::Null | JsonValue::Bool(false))
    }

    fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }
}
