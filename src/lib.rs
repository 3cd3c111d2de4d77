//! A Mustache implementation.
//!
//! A mustache [Template] compiled from source is rendered by navigating
//! in a [Context], getting partials from a [TemplateStore].
//!
//! This implementation supports the core modules of the Mustache
//! specification (interpolation, sections, inverted sections, comments,
//! partials, set delimiters) and the optional lambdas module, passing the
//! relevant tests in [`specs`].
//!
//! The [Context] trait is the only thing the renderer knows about data.
//! It is implemented for [JsonValue], [YamlValue] and [MapsAndLists];
//! an implementation providing lambdas returns them from
//! [`Context::lambda`], as [MapsAndLists] does.
//!
//! Compiling reports malformed tags and unbalanced sections with their
//! position in the source. Rendering fails only on recursive partials that
//! would never end, on lambda failures, or on lambda output that does not
//! compile. Missing names and missing partials render as nothing.
//!
//!
//! # Samples
//!
//! ## Hello world
//!
//! ```
//! use mustache::{Template, JsonValue};
//!
//! let text = "hello, {{you}}!";
//! let data = r#"{
//!     "you": "world"
//! }"#;
//!
//! let template = Template::from(text).unwrap();
//! let context = serde_json::from_str::<JsonValue>(data).unwrap();
//!
//! let result = template.render(&context).unwrap();
//!
//! assert_eq!(result, "hello, world!")
//! ```
//!
//! ## Hello team
//!
//! ```
//! use mustache::{Template, YamlValue};
//! let text = r#"
//!   {{#team}}
//!   hello, {{address}} {{name}}!
//!   {{/team}}
//! "#;
//! let data = r#"
//!   team:
//!     - name: john
//!       address: little
//!     - name: 42
//!       address: citizen
//! "#;
//!
//! let template = Template::from(text).unwrap();
//! let context = serde_yaml::from_str::<YamlValue>(data).unwrap();
//!
//! let result = template.render(&context).unwrap();
//! assert_eq!(result, r#"
//!   hello, little john!
//!   hello, citizen 42!
//! "#);
//! ```
//!
//! ## Partials
//!
//! ```
//! use mustache::{Template, TemplateMap, JsonValue};
//! use serde_json::json;
//!
//! let partials = TemplateMap::from_sources([
//!     ("user", "- {{name}}\n"),
//! ]).unwrap();
//! let template = Template::from("users:\n{{#users}}\n  {{>user}}\n{{/users}}\n").unwrap();
//! let context: JsonValue = json!({"users": [{"name": "ann"}, {"name": "bob"}]});
//!
//! let result = template.render_with_partials(&context, &partials).unwrap();
//! assert_eq!(result, "users:\n  - ann\n  - bob\n");
//! ```
//!
//!
//! [`specs`]: https://github.com/mustache/spec
mod template;
mod reader;
mod parser;
mod processor;
mod context;
mod error;
mod json;
mod yaml;
mod maps_and_lists;

pub use self::template::{Template, Part, Section, TemplateStore, TemplateMap};
pub use self::reader::Delimiters;
pub use self::context::{Context, ContextRef, Lambda, LambdaResult};
pub use self::error::{Error, Position, AdapterError};
pub use self::json::JsonValue;
pub use self::yaml::YamlValue;
pub use self::maps_and_lists::MapsAndLists;
