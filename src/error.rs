use std::fmt;


/// Error raised by a host [`Context`](crate::Context) implementation,
/// typically from inside a lambda.
pub type AdapterError = Box<dyn std::error::Error + Send + Sync>;


#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("malformed tag at {position}: {message}")]
    MalformedTag { position: Position, message: String },

    #[error("unbalanced section `{name}` at {position}")]
    UnbalancedSection { name: String, position: Position },

    #[error("unclosed section `{name}` opened at {position}")]
    UnclosedSection { name: String, position: Position },

    #[error("partial cycle: {}", chain.join(" > "))]
    PartialCycle { chain: Vec<String> },

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}


/// Location in template source. Lines and columns are 1-based, columns
/// count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub(crate) fn of(input: &str, offset: usize) -> Self {
        let before = &input[..offset];
        let line_start = before.rfind('\n').map_or(0, |p| p + 1);
        Position {
            offset,
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_first_line() {
        let position = Position::of("abc{{", 3);
        assert_eq!(position, Position { offset: 3, line: 1, column: 4 });
    }

    #[test]
    fn position_after_newlines() {
        let position = Position::of("a\nbé\n  {{", 8);
        assert_eq!(position, Position { offset: 8, line: 3, column: 3 });
    }

    #[test]
    fn display_mentions_position() {
        let error = Error::UnclosedSection {
            name: "a".to_owned(),
            position: Position::of("x\n{{#a}}", 2),
        };
        assert_eq!(error.to_string(), "unclosed section `a` opened at line 2, column 1");
    }
}
