use crate::context::{Context, ContextRef};
pub use serde_yaml::Value as YamlValue;


impl Context for YamlValue {
    fn child<'a>(&'a self, name: &str) -> Option<ContextRef<'a>> {
        match self {
            YamlValue::Mapping(map) => map.get(name).map(
                |value| value as ContextRef<'a>
            ),
            YamlValue::Tagged(tagged) => tagged.value.child(name),
            _ => None
        }
    }

    fn children<'a>(&'a self) -> Option<Vec<ContextRef<'a>>> {
        match self {
            YamlValue::Sequence(seq) =>
                Some(
                    seq.iter()
                        .map(|value| value as ContextRef<'a>)
                        .collect::<_>()
                ),
            YamlValue::Tagged(tagged) => tagged.value.children(),
            _ => None
        }
    }

    fn value(&self) -> String {
        match self {
            YamlValue::String(s) => s.clone(),
            YamlValue::Number(n) => n.to_string(),
            YamlValue::Bool(b) => b.to_string(),
            YamlValue::Tagged(tagged) => tagged.value.value(),
            _ => String::new()
        }
    }

    fn is_falsy(&self) -> bool {
        match self {
            YamlValue::Null | YamlValue::Bool(false) => true,
            YamlValue::Tagged(tagged) => tagged.value.is_falsy(),
            _ => false
        }
    }

    fn is_bool(&self) -> bool {
        matches!(self, YamlValue::Bool(_))
    }
}
