//! Indentation-aware tokenizer for the script subset
//!
//! Produces a flat token stream with explicit `Indent`/`Dedent` markers the
//! way the Python grammar expects, so the parser can treat suites as plain
//! bracketed regions. Blank and comment-only lines generate no tokens and
//! do not participate in indentation.

use turtlekit_core::ScriptError;

/// One lexical token
#[derive(Debug, Clone, PartialEq)]
pub enum Tok {
    Number(f64),
    Str(String),
    Name(String),

    // Keywords
    For,
    In,
    While,
    If,
    Elif,
    Else,
    Pass,
    True,
    False,

    // Layout
    Newline,
    Indent,
    Dedent,

    // Punctuation
    LParen,
    RParen,
    Comma,
    Colon,
    Dot,

    // Operators
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    Plus,
    Minus,
    Star,
    Slash,
    FloorDiv,
    Percent,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    Eof,
}

/// A token plus the 1-based source line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub tok: Tok,
    pub line: usize,
}

impl Token {
    fn new(tok: Tok, line: usize) -> Self {
        Self { tok, line }
    }
}

fn keyword(name: &str) -> Option<Tok> {
    match name {
        "for" => Some(Tok::For),
        "in" => Some(Tok::In),
        "while" => Some(Tok::While),
        "if" => Some(Tok::If),
        "elif" => Some(Tok::Elif),
        "else" => Some(Tok::Else),
        "pass" => Some(Tok::Pass),
        "True" => Some(Tok::True),
        "False" => Some(Tok::False),
        _ => None,
    }
}

/// Tokenize scrubbed source into a stream ending with `Eof`
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScriptError> {
    let mut tokens = Vec::new();
    let mut indents: Vec<usize> = vec![0];
    let mut last_line = 1;

    for (idx, raw_line) in source.lines().enumerate() {
        let line = idx + 1;
        last_line = line;

        let trimmed = raw_line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Indentation width; a tab advances to the next 4-column stop.
        let mut width = 0usize;
        for ch in raw_line.chars() {
            match ch {
                ' ' => width += 1,
                '\t' => width += 4 - width % 4,
                _ => break,
            }
        }

        let current = *indents.last().unwrap_or(&0);
        if width > current {
            indents.push(width);
            tokens.push(Token::new(Tok::Indent, line));
        } else if width < current {
            while width < *indents.last().unwrap_or(&0) {
                indents.pop();
                tokens.push(Token::new(Tok::Dedent, line));
            }
            if width != *indents.last().unwrap_or(&0) {
                return Err(ScriptError::Syntax {
                    line,
                    reason: "unindent does not match any outer indentation level".to_string(),
                });
            }
        }

        tokenize_line(trimmed, line, &mut tokens)?;
        tokens.push(Token::new(Tok::Newline, line));
    }

    while indents.len() > 1 {
        indents.pop();
        tokens.push(Token::new(Tok::Dedent, last_line));
    }
    tokens.push(Token::new(Tok::Eof, last_line));
    Ok(tokens)
}

fn tokenize_line(text: &str, line: usize, tokens: &mut Vec<Token>) -> Result<(), ScriptError> {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            ' ' | '\t' => {
                i += 1;
            }
            '#' => break,
            '0'..='9' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text.parse::<f64>().map_err(|_| ScriptError::Syntax {
                    line,
                    reason: format!("invalid number: '{}'", text),
                })?;
                tokens.push(Token::new(Tok::Number(value), line));
            }
            '\'' | '"' => {
                let quote = ch;
                i += 1;
                let mut value = String::new();
                loop {
                    if i >= chars.len() {
                        return Err(ScriptError::Syntax {
                            line,
                            reason: "unterminated string literal".to_string(),
                        });
                    }
                    match chars[i] {
                        c if c == quote => {
                            i += 1;
                            break;
                        }
                        '\\' if i + 1 < chars.len() => {
                            let escaped = chars[i + 1];
                            value.push(match escaped {
                                'n' => '\n',
                                't' => '\t',
                                '\\' => '\\',
                                '\'' => '\'',
                                '"' => '"',
                                other => other,
                            });
                            i += 2;
                        }
                        c => {
                            value.push(c);
                            i += 1;
                        }
                    }
                }
                tokens.push(Token::new(Tok::Str(value), line));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                let tok = keyword(&name).unwrap_or(Tok::Name(name));
                tokens.push(Token::new(tok, line));
            }
            _ => {
                let next = chars.get(i + 1).copied();
                let (tok, width) = match (ch, next) {
                    ('=', Some('=')) => (Tok::EqEq, 2),
                    ('=', _) => (Tok::Assign, 1),
                    ('!', Some('=')) => (Tok::NotEq, 2),
                    ('<', Some('=')) => (Tok::LtEq, 2),
                    ('<', _) => (Tok::Lt, 1),
                    ('>', Some('=')) => (Tok::GtEq, 2),
                    ('>', _) => (Tok::Gt, 1),
                    ('+', Some('=')) => (Tok::PlusAssign, 2),
                    ('+', _) => (Tok::Plus, 1),
                    ('-', Some('=')) => (Tok::MinusAssign, 2),
                    ('-', _) => (Tok::Minus, 1),
                    ('*', Some('=')) => (Tok::StarAssign, 2),
                    ('*', _) => (Tok::Star, 1),
                    ('/', Some('/')) => (Tok::FloorDiv, 2),
                    ('/', Some('=')) => (Tok::SlashAssign, 2),
                    ('/', _) => (Tok::Slash, 1),
                    ('%', _) => (Tok::Percent, 1),
                    ('(', _) => (Tok::LParen, 1),
                    (')', _) => (Tok::RParen, 1),
                    (',', _) => (Tok::Comma, 1),
                    (':', _) => (Tok::Colon, 1),
                    ('.', _) => (Tok::Dot, 1),
                    _ => {
                        return Err(ScriptError::Syntax {
                            line,
                            reason: format!("unexpected character: '{}'", ch),
                        })
                    }
                };
                tokens.push(Token::new(tok, line));
                i += width;
            }
        }
    }
    Ok(())
}
