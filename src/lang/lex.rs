use super::{Column, Token};
use std::iter::Peekable;
use std::rc::Rc;
use std::str::Chars;

/// Lazily split one line of source into `(column, word)` pairs.
pub fn lex(line: &str) -> Lexer<'_> {
    Lexer {
        chars: line.chars().peekable(),
        col: 0,
        done: false,
    }
}

/// Tokenize every line of a source, tagging each word with its
/// source name, one-based row, and column.
pub fn lex_lines<I>(source: &str, lines: I) -> impl Iterator<Item = Token>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let source: Rc<str> = Rc::from(source);
    lines
        .into_iter()
        .enumerate()
        .flat_map(move |(index, line)| {
            let source = source.clone();
            lex(line.as_ref())
                .map(move |(column, text)| Token {
                    source: source.clone(),
                    row: index + 1,
                    column,
                    text,
                })
                .collect::<Vec<Token>>()
        })
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    col: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.col += 1;
        Some(ch)
    }

    fn at_comment(&self) -> bool {
        let mut ahead = self.chars.clone();
        matches!((ahead.next(), ahead.next()), (Some('/'), Some('/')))
    }

    fn whitespace(&mut self) {
        while let Some(pk) = self.chars.peek() {
            if !pk.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn string(&mut self, quote: char) -> (Column, String) {
        let start = self.col;
        self.bump();
        let mut s = String::new();
        s.push(quote);
        while let Some(ch) = self.bump() {
            if ch == quote {
                break;
            }
            if ch == '\\' {
                if let Some(esc) = self.bump() {
                    s.push(match esc {
                        'n' => '\n',
                        't' => '\t',
                        _ => esc,
                    });
                    continue;
                }
            }
            s.push(ch);
        }
        s.push(quote);
        (start..self.col, s)
    }

    fn word(&mut self) -> (Column, String) {
        let start = self.col;
        let mut s = String::new();
        while let Some(&pk) = self.chars.peek() {
            if pk.is_whitespace() || is_quote(pk) || self.at_comment() {
                break;
            }
            s.push(pk);
            self.bump();
        }
        (start..self.col, s)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = (Column, String);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.whitespace();
        let pk = match self.chars.peek() {
            Some(pk) => *pk,
            None => {
                self.done = true;
                return None;
            }
        };
        if self.at_comment() {
            self.done = true;
            return None;
        }
        if is_quote(pk) {
            return Some(self.string(pk));
        }
        Some(self.word())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        lex(line).map(|(_, w)| w).collect()
    }

    #[test]
    fn test_comment_inside_quotes() {
        let line = r#"name = "John // not a comment" // actual comment"#;
        assert_eq!(
            words(line),
            vec!["name", "=", "\"John // not a comment\""]
        );
    }

    #[test]
    fn test_columns() {
        let cols: Vec<Column> = lex("  2 3  +").map(|(c, _)| c).collect();
        assert_eq!(cols, vec![2..3, 4..5, 7..8]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(words(r#""a\nb\tc\\d\"e\q""#), vec!["\"a\nb\tc\\d\"eq\""]);
        assert_eq!(words(r#"'it\'s'"#), vec!["'it's'"]);
        assert_eq!(words(r#"'say "hi"'"#), vec!["'say \"hi\"'"]);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(words("\"open ended"), vec!["\"open ended\""]);
    }

    #[test]
    fn test_trailing_backslash_is_kept() {
        assert_eq!(words("\"a\\"), vec!["\"a\\\""]);
    }

    #[test]
    fn test_word_stops_at_quote_and_comment() {
        assert_eq!(words("abc\"d e\"f//x y"), vec!["abc", "\"d e\"", "f"]);
    }

    #[test]
    fn test_line_comment_only() {
        assert!(words("   // nothing here").is_empty());
        assert!(words("").is_empty());
    }

    #[test]
    fn test_single_slash_is_a_word() {
        assert_eq!(words("10 2 / ."), vec!["10", "2", "/", "."]);
    }

    #[test]
    fn test_lex_lines_rows() {
        let tokens: Vec<Token> = lex_lines("m.funny", &["1 2", "", "  +"]).collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].row, 1);
        assert_eq!(tokens[2].row, 3);
        assert_eq!(tokens[2].column, 2..3);
        assert_eq!(&*tokens[2].source, "m.funny");
    }
}
