use super::{Column, Row};
use std::rc::Rc;

/// ## Where a token came from

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub source: Rc<str>,
    pub row: Row,
    pub column: Column,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.row, self.column.start + 1)
    }
}

/// ## Raw word tagged with its location
///
/// Quoted strings keep their surrounding quote characters in `text`
/// with escapes already processed.

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub source: Rc<str>,
    pub row: Row,
    pub column: Column,
    pub text: String,
}

impl Token {
    pub fn location(&self) -> Location {
        Location {
            source: self.source.clone(),
            row: self.row,
            column: self.column.clone(),
        }
    }

    pub fn is_quoted(&self) -> bool {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next_back()) {
            (Some(first), Some(last)) => first == last && (first == '"' || first == '\''),
            _ => false,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str) -> Token {
        Token {
            source: Rc::from("t"),
            row: 1,
            column: 0..text.chars().count(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_quoted() {
        assert!(token("\"hi\"").is_quoted());
        assert!(token("''").is_quoted());
        assert!(!token("\"").is_quoted());
        assert!(!token("\"hi'").is_quoted());
        assert!(!token("hi").is_quoted());
    }
}
