use crate::error::AdapterError;


/// Data a template is rendered against.
///
/// Implementations exist for [`JsonValue`](crate::JsonValue),
/// [`YamlValue`](crate::YamlValue) and [`MapsAndLists`](crate::MapsAndLists);
/// any host data type can take part in rendering by implementing it.
pub trait Context {
    /// Member lookup, `None` when missing or when this is not a mapping.
    fn child<'a>(&'a self, name: &str) -> Option<ContextRef<'a>>;

    /// Elements of a list-like value, `None` for anything else.
    fn children<'a>(&'a self) -> Option<Vec<ContextRef<'a>>>;

    /// Text rendered by an interpolation tag.
    fn value(&self) -> String;

    /// `true` for null and `false`. Empty lists are handled through
    /// [`children`](Context::children).
    fn is_falsy(&self) -> bool;

    /// Booleans render a truthy section without becoming its context.
    fn is_bool(&self) -> bool {
        false
    }

    fn lambda(&self) -> Option<Lambda<'_>> {
        None
    }
}

pub type ContextRef<'a> = &'a (dyn Context + 'a);


pub type LambdaResult = Result<String, AdapterError>;

/// A callable value.
///
/// As an interpolation a lambda is called without argument and its result is
/// used as the value. As a section it receives the unrendered section text and
/// its result is compiled and rendered in place of the section.
pub enum Lambda<'a> {
    Nullary(&'a dyn Fn() -> LambdaResult),
    Unary(&'a dyn Fn(&str) -> LambdaResult)
}

impl<'a> Lambda<'a> {
    /// Unary lambdas called as interpolations receive an empty string.
    pub(crate) fn call(&self, text: &str) -> LambdaResult {
        match self {
            Lambda::Nullary(fun) => fun(),
            Lambda::Unary(fun) => fun(text)
        }
    }
}


pub(crate) struct Stack<'a> {
    frames: Vec<ContextRef<'a>>
}

impl<'a> Stack<'a> {
    pub(crate) fn new(root: ContextRef<'a>) -> Self {
        Stack {
            frames: vec![root]
        }
    }

    pub(crate) fn push(&mut self, frame: ContextRef<'a>) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    pub(crate) fn top(&self) -> Option<ContextRef<'a>> {
        self.frames.last().copied()
    }

    /// The first segment of a dotted name is searched from the innermost
    /// frame outwards; the remaining segments only inside what it found.
    pub(crate) fn resolve(&self, name: &str) -> Option<ContextRef<'a>> {
        if name == "." {
            return self.top();
        }
        let mut segments = name.split('.');
        let first = segments.next()?;
        let found = self.frames.iter()
            .rev()
            .copied()
            .find_map(|frame| frame.child(first))?;
        segments.try_fold(found, |value, segment| value.child(segment))
    }
}
