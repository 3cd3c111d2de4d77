use std::collections::HashMap;
use std::str::FromStr;
use tracing::trace;
use crate::ContextRef;
use crate::context::Stack;
use crate::error::Error;
use crate::parser::parse;
use crate::processor::Processor;
use crate::reader::Delimiters;


/// A compiled template.
///
/// Compilation happens once; the compiled parts are immutable and the same
/// template may be rendered any number of times, from any thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    parts: Vec<Part>
}

impl Template {
    pub fn from(input: &str) -> Result<Self, Error> {
        let parts = parse(input, Delimiters::default())?;
        trace!(parts = parts.len(), "compiled template");
        Ok(Template {
            source: input.to_owned(),
            parts
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Renders without partials: every partial tag renders as nothing.
    pub fn render(&self, context: ContextRef) -> Result<String, Error> {
        self.render_internal(context, None)
    }

    pub fn render_with_partials(
        &self, context: ContextRef, partials: &dyn TemplateStore
    ) -> Result<String, Error> {
        self.render_internal(context, Some(partials))
    }

    fn render_internal(
        &self, context: ContextRef, partials: Option<&dyn TemplateStore>
    ) -> Result<String, Error> {
        let mut stack = Stack::new(context);
        let mut result = String::with_capacity(self.source.len());
        Processor::new(partials).render(&self.parts, &mut stack, &mut result)?;
        Ok(result)
    }

    /// Recompiles the template with `indent` in front of every source line.
    pub(crate) fn indented(&self, indent: &str) -> Result<Template, Error> {
        let mut source = String::with_capacity(self.source.len());
        for line in self.source.split_inclusive('\n') {
            source.push_str(indent);
            source.push_str(line);
        }
        Template::from(&source)
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Error> {
        Template::from(input)
    }
}


/// A node of a compiled template.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Literal(String),
    /// `{{name}}` is escaped, `{{{name}}}` and `{{&name}}` are not.
    Variable { path: String, escaped: bool },
    Section(Section),
    InvertedSection(Section),
    /// `indent` is the leading whitespace of a standalone partial tag.
    Partial { name: String, indent: String },
    DelimiterChange(Delimiters)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub path: String,
    pub children: Vec<Part>,
    /// Unrendered text between the open and close tags, passed to lambdas.
    pub raw_source: String,
    /// Delimiters in effect at the open tag, used to compile lambda output.
    pub delimiters: Delimiters
}


/// Resolves partial names to compiled templates.
pub trait TemplateStore {
    fn get(&self, name: &str) -> Option<&Template>;
}

impl TemplateStore for HashMap<String, Template> {
    fn get(&self, name: &str) -> Option<&Template> {
        HashMap::get(self, name)
    }
}


#[derive(Debug, Default)]
pub struct TemplateMap {
    templates: HashMap<String, Template>
}

impl TemplateMap {
    pub fn new() -> Self {
        TemplateMap { templates: HashMap::new() }
    }

    /// Compiles every `(name, source)` pair, failing on the first invalid one.
    pub fn from_sources<'s, I>(sources: I) -> Result<Self, Error>
    where I: IntoIterator<Item = (&'s str, &'s str)> {
        let mut map = TemplateMap::new();
        for (name, input) in sources {
            map.load(name, input)?;
        }
        Ok(map)
    }

    pub fn load(&mut self, name: &str, input: &str) -> Result<(), Error> {
        let template = Template::from(input)?;
        self.insert(name, template);
        Ok(())
    }

    pub fn insert(&mut self, name: &str, template: Template) {
        self.templates.insert(name.to_owned(), template);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for TemplateMap {
    fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }
}
