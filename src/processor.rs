use std::collections::HashMap;
use std::ptr;
use std::rc::Rc;
use tracing::debug;
use crate::ContextRef;
use crate::context::Stack;
use crate::error::Error;
use crate::parser::parse;
use crate::template::{Part, Section, Template, TemplateStore};


struct OpenPartial<'c> {
    name: String,
    frame: Option<ContextRef<'c>>
}

/// Walks compiled parts against a context stack.
pub(crate) struct Processor<'p, 'c> {
    partials: Option<&'p dyn TemplateStore>,
    open_partials: Vec<OpenPartial<'c>>,
    /// Standalone partials recompiled with their indent, keyed by name and indent.
    indented: HashMap<(String, String), Rc<Template>>
}

impl<'p, 'c> Processor<'p, 'c> {
    pub(crate) fn new(partials: Option<&'p dyn TemplateStore>) -> Self {
        Processor {
            partials,
            open_partials: Vec::new(),
            indented: HashMap::new()
        }
    }

    pub(crate) fn render(
        &mut self, parts: &[Part], stack: &mut Stack<'c>, out: &mut String
    ) -> Result<(), Error> {
        for part in parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Variable { path, escaped } => {
                    if let Some(text) = interpolate(stack, path)? {
                        if *escaped {
                            html_escape(&text, out);
                        } else {
                            out.push_str(&text);
                        }
                    }
                },
                Part::Section(section) => self.render_section(section, stack, out)?,
                Part::InvertedSection(section) => {
                    if renders_nothing(stack.resolve(&section.path)) {
                        self.render(&section.children, stack, out)?;
                    }
                },
                Part::Partial { name, indent } => self.render_partial(name, indent, stack, out)?,
                Part::DelimiterChange(_) => {}
            }
        }
        Ok(())
    }

    fn render_section(
        &mut self, section: &Section, stack: &mut Stack<'c>, out: &mut String
    ) -> Result<(), Error> {
        let Some(value) = stack.resolve(&section.path) else {
            return Ok(());
        };
        if let Some(lambda) = value.lambda() {
            debug!(path = %section.path, "calling section lambda");
            let text = lambda.call(&section.raw_source)?;
            let parts = parse(&text, section.delimiters.clone())?;
            return self.render(&parts, stack, out);
        }
        if let Some(items) = value.children() {
            for item in items {
                stack.push(item);
                self.render(&section.children, stack, out)?;
                stack.pop();
            }
        } else if value.is_falsy() {
            return Ok(());
        } else if value.is_bool() {
            self.render(&section.children, stack, out)?;
        } else {
            stack.push(value);
            self.render(&section.children, stack, out)?;
            stack.pop();
        }
        Ok(())
    }

    fn render_partial(
        &mut self, name: &str, indent: &str, stack: &mut Stack<'c>, out: &mut String
    ) -> Result<(), Error> {
        let Some(template) = self.partials.and_then(|store| store.get(name)) else {
            debug!(partial = name, "partial not found");
            return Ok(());
        };
        // reopening a partial on a frame it is already open on can only recurse forever
        let frame = stack.top();
        if self.open_partials.iter().any(
            |open| open.name == name && same_frame(open.frame, frame)
        ) {
            let mut chain = self.open_partials.iter()
                .map(|open| open.name.clone())
                .collect::<Vec<_>>();
            chain.push(name.to_owned());
            return Err(Error::PartialCycle { chain });
        }

        self.open_partials.push(OpenPartial { name: name.to_owned(), frame });
        let result = if indent.is_empty() {
            self.render(template.parts(), stack, out)
        } else {
            self.indented(name, indent, template)
                .and_then(|indented| self.render(indented.parts(), stack, out))
        };
        self.open_partials.pop();
        result
    }

    fn indented(
        &mut self, name: &str, indent: &str, template: &Template
    ) -> Result<Rc<Template>, Error> {
        let key = (name.to_owned(), indent.to_owned());
        if let Some(indented) = self.indented.get(&key) {
            return Ok(Rc::clone(indented));
        }
        debug!(partial = name, indent = indent.len(), "indenting partial");
        let indented = Rc::new(template.indented(indent)?);
        self.indented.insert(key, Rc::clone(&indented));
        Ok(indented)
    }
}


fn interpolate(stack: &Stack, path: &str) -> Result<Option<String>, Error> {
    let Some(value) = stack.resolve(path) else {
        return Ok(None);
    };
    match value.lambda() {
        Some(lambda) => {
            debug!(path, "calling lambda");
            Ok(Some(lambda.call("")?))
        },
        None => Ok(Some(value.value()))
    }
}

/// Whether a section over this value renders nothing, which is exactly when
/// the inverted section renders its children.
fn renders_nothing(value: Option<ContextRef>) -> bool {
    match value {
        None => true,
        Some(value) if value.lambda().is_some() => false,
        Some(value) => match value.children() {
            Some(items) => items.is_empty(),
            None => value.is_falsy()
        }
    }
}

fn same_frame(a: Option<ContextRef>, b: Option<ContextRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => ptr::addr_eq(a, b),
        _ => false
    }
}

fn html_escape(input: &str, out: &mut String) {
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c)
        }
    }
}
