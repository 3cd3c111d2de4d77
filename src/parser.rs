use crate::error::{Error, Position};
use crate::reader::{Delimiters, Reader, Span, Token};
use crate::template::{Part, Section};


/// Compiles template text into parts, starting with the given delimiters.
pub(crate) fn parse(input: &str, delimiters: Delimiters) -> Result<Vec<Part>, Error> {
    let tokens = Reader::new(input, delimiters.clone())
        .collect::<Result<Vec<_>, _>>()?;
    let lines = tokens.iter()
        .map(|token| match token.may_stand_alone() {
            true => standalone_line(input, token.span()),
            false => None
        })
        .collect::<Vec<_>>();

    let mut parser = Parser::new(input, delimiters);
    let mut cursor = 0;
    for (i, token) in tokens.iter().enumerate() {
        if let Token::Text(span) = token {
            let start = span.start.max(cursor);
            let end = match lines.get(i + 1) {
                Some(Some(line)) => line.start,
                _ => span.end
            };
            if start < end {
                parser.push(Part::Literal(input[start..end].to_owned()));
            }
        } else {
            cursor = lines[i].map_or(token.span().end, |line| line.end);
            parser.tag(token, lines[i])?;
        }
    }
    parser.finish()
}


struct OpenSection<'a> {
    name: &'a str,
    inverted: bool,
    start: usize,
    after_tag: usize,
    delimiters: Delimiters,
    children: Vec<Part>
}

struct Parser<'a> {
    input: &'a str,
    delimiters: Delimiters,
    root: Vec<Part>,
    open: Vec<OpenSection<'a>>
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, delimiters: Delimiters) -> Self {
        Parser {
            input,
            delimiters,
            root: Vec::new(),
            open: Vec::new()
        }
    }

    fn push(&mut self, part: Part) {
        match self.open.last_mut() {
            Some(section) => section.children.push(part),
            None => self.root.push(part)
        }
    }

    fn tag(&mut self, token: &Token<'a>, line: Option<Span>) -> Result<(), Error> {
        match *token {
            Token::Value(name, escaped, _) => {
                self.push(Part::Variable { path: name.to_owned(), escaped });
            },
            Token::Section(name, span) => self.open(name, false, span),
            Token::InvertedSection(name, span) => self.open(name, true, span),
            Token::EndSection(name, span) => self.close(name, span)?,
            Token::Partial(name, span) => {
                let indent = match line {
                    Some(line) => &self.input[line.start..span.start],
                    None => ""
                };
                self.push(Part::Partial { name: name.to_owned(), indent: indent.to_owned() });
            },
            Token::Delimiters(od, cd, _) => {
                self.delimiters = Delimiters::new(od, cd);
                self.push(Part::DelimiterChange(self.delimiters.clone()));
            },
            Token::Comment(_) | Token::Text(_) => {}
        }
        Ok(())
    }

    fn open(&mut self, name: &'a str, inverted: bool, span: Span) {
        self.open.push(OpenSection {
            name,
            inverted,
            start: span.start,
            after_tag: span.end,
            delimiters: self.delimiters.clone(),
            children: Vec::new()
        });
    }

    fn close(&mut self, name: &str, span: Span) -> Result<(), Error> {
        let section = match self.open.pop() {
            Some(section) if section.name == name => section,
            _ => return Err(Error::UnbalancedSection {
                name: name.to_owned(),
                position: Position::of(self.input, span.start)
            })
        };
        let inverted = section.inverted;
        let section = Section {
            path: section.name.to_owned(),
            children: section.children,
            raw_source: self.input[section.after_tag..span.start].to_owned(),
            delimiters: section.delimiters
        };
        self.push(match inverted {
            true => Part::InvertedSection(section),
            false => Part::Section(section)
        });
        Ok(())
    }

    fn finish(self) -> Result<Vec<Part>, Error> {
        match self.open.last() {
            Some(section) => Err(Error::UnclosedSection {
                name: section.name.to_owned(),
                position: Position::of(self.input, section.start)
            }),
            None => Ok(self.root)
        }
    }
}


/// Returns the whole line holding the tag, trailing newline included, when
/// nothing but horizontal whitespace shares the line with it.
fn standalone_line(input: &str, tag: Span) -> Option<Span> {
    let start = input[..tag.start].rfind('\n').map_or(0, |p| p + 1);
    if !is_blank(&input[start..tag.start]) {
        return None;
    }
    let rest = &input[tag.end..];
    let after_blank = tag.end + rest.len() - rest.trim_start_matches([' ', '\t']).len();
    let tail = &input[after_blank..];
    let end = if tail.is_empty() {
        input.len()
    } else if tail.starts_with("\r\n") {
        after_blank + 2
    } else if tail.starts_with('\n') {
        after_blank + 1
    } else {
        return None;
    };
    Some(Span { start, end })
}

fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c == ' ' || c == '\t')
}
