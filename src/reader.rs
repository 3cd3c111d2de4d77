use crate::error::{Error, Position};


/// Open and close tag markers, `{{` and `}}` unless changed by a
/// `{{=open close=}}` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String
}

impl Delimiters {
    pub fn new(open: &str, close: &str) -> Self {
        Delimiters {
            open: open.to_owned(),
            close: close.to_owned()
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters::new("{{", "}}")
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize
}


#[derive(PartialEq, Debug)]
pub(crate) enum Token<'a> {
    Text(Span),
    Value(&'a str, bool, Span),
    Section(&'a str, Span),
    InvertedSection(&'a str, Span),
    EndSection(&'a str, Span),
    Partial(&'a str, Span),
    Comment(Span),
    Delimiters(&'a str, &'a str, Span)
}

impl<'a> Token<'a> {
    pub(crate) fn span(&self) -> Span {
        match self {
            Token::Text(span)
            | Token::Value(_, _, span)
            | Token::Section(_, span)
            | Token::InvertedSection(_, span)
            | Token::EndSection(_, span)
            | Token::Partial(_, span)
            | Token::Comment(span)
            | Token::Delimiters(_, _, span) => *span
        }
    }

    /// Tags that are elided together with their line when alone on it.
    pub(crate) fn may_stand_alone(&self) -> bool {
        !matches!(self, Token::Text(_) | Token::Value(..))
    }
}


/// Splits template text into tokens, switching delimiters as soon as a
/// delimiters tag is read.
pub(crate) struct Reader<'a> {
    input: &'a str,
    delimiters: Delimiters,
    pos: usize
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a str, delimiters: Delimiters) -> Self {
        Reader {
            input,
            delimiters,
            pos: 0
        }
    }

    fn read_text(&mut self, tail: &str) -> Token<'a> {
        let start = self.pos;
        self.pos = match tail.find(&self.delimiters.open) {
            Some(p) => start + p,
            None => self.input.len()
        };
        Token::Text(Span { start, end: self.pos })
    }

    fn read_tag(&mut self) -> Result<Token<'a>, Error> {
        let input = self.input;
        let start = self.pos;
        let after_open = start + self.delimiters.open.len();
        let terminator = match input[after_open..].chars().next() {
            Some('{') => format!("{}{}", '}', self.delimiters.close),
            Some('=') => format!("{}{}", '=', self.delimiters.close),
            Some(_) => self.delimiters.close.clone(),
            None => return Err(self.malformed(start, "missing close delimiter"))
        };
        let Some(p) = input[after_open..].find(&terminator) else {
            return Err(self.malformed(start, "missing close delimiter"));
        };
        let text = input[after_open..after_open + p].trim();
        let span = Span { start, end: after_open + p + terminator.len() };
        self.pos = span.end;

        let token = match text.chars().next() {
            Some('#') => Token::Section(self.tag(text.trim_sigil(), start)?, span),
            Some('^') => Token::InvertedSection(self.tag(text.trim_sigil(), start)?, span),
            Some('/') => Token::EndSection(self.tag(text.trim_sigil(), start)?, span),
            Some('>') => Token::Partial(self.tag(text.trim_sigil(), start)?, span),
            Some('!') => Token::Comment(span),
            Some('=') => {
                let (od, cd) = maybe_delimiters(text.trim_sigil())
                    .map_err(|message| self.malformed(start, message))?;
                self.delimiters = Delimiters::new(od, cd);
                Token::Delimiters(od, cd, span)
            },
            Some('&') | Some('{') => Token::Value(self.tag(text.trim_sigil(), start)?, false, span),
            Some(_) => Token::Value(self.tag(text, start)?, true, span),
            None => return Err(self.malformed(start, "missing tag"))
        };
        Ok(token)
    }

    fn tag(&self, text: &'a str, start: usize) -> Result<&'a str, Error> {
        maybe_tag(text).map_err(|message| self.malformed(start, message))
    }

    fn malformed(&self, offset: usize, message: &str) -> Error {
        Error::MalformedTag {
            position: Position::of(self.input, offset),
            message: message.to_owned()
        }
    }
}

impl<'a> Iterator for Reader<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.input;
        if self.pos >= input.len() {
            return None;
        }
        let tail = &input[self.pos..];
        let token = if tail.starts_with(&self.delimiters.open) {
            self.read_tag()
        } else {
            Ok(self.read_text(tail))
        };
        if token.is_err() {
            self.pos = self.input.len();
        }
        Some(token)
    }
}


fn maybe_tag(text: &str) -> Result<&str, &'static str> {
    if text == "." {
        Ok(text)
    } else if text.is_empty() {
        Err("missing tag")
    } else if text.starts_with('.')
        || text.ends_with('.')
        || text.contains("..")
        || text.contains(char::is_whitespace) {
        Err("invalid tag")
    } else {
        Ok(text)
    }
}

fn maybe_delimiters(text: &str) -> Result<(&str, &str), &'static str> {
    let text = text.strip_suffix('=').unwrap_or(text);
    let words = text.split_ascii_whitespace().collect::<Vec<_>>();
    if text.contains('=') || words.len() != 2 {
        Err("invalid delimiters tag")
    } else {
        Ok((words[0], words[1]))
    }
}

trait ReaderStringOps {
    fn trim_sigil(&self) -> &str;
}

impl ReaderStringOps for str {
    fn trim_sigil(&self) -> &str {
        self[1..].trim_start()
    }
}
