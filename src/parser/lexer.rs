//! Tokenization of annotated source text
//!
//! A program is written as a single dense line of glyphs, optionally spread
//! over several lines with trailing comments. A comment starts at the first
//! tab or `⍝` on a line; comment text is carried on the next token so that
//! diagnostics and listings can show it.
//!
//! Token classes:
//! - spaces and commas: separators, never tokens themselves
//! - `Ø`: the null literal
//! - numbers: `0`, a nonzero digit run, `~`-prefixed negatives, and the
//!   single-glyph shortcuts (`ḣ`=100, `ḳ`=1000, `Ḳ`=1024, `ṁ`=10⁶,
//!   `ḃ`=10⁹, `ṫ`=10, `Ḷ`=50, `ḟ`=15, `Ḟ`=255, `ẓ`=0, `ṅ`=-1)
//! - `` `nl ``: a literal newline string
//! - word literals: ASCII letter runs, with `` ` `` escaping any single
//!   character into the word (so `` Hello` World`! `` is one token)
//! - `)` and `;`: block terminators
//! - anything else: a one-glyph command symbol

use crate::parser::Span;
use crate::values::Value;

/// Lexical token classes consumed by the tree builder.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A literal pushed verbatim when evaluated.
    Value(Value),
    /// A one-glyph command; its arity comes from the registry.
    Symbol(char),
    /// `)` or `;`: terminates the innermost block context.
    BlockEnd,
}

/// A lexical token with its source span and any attached comment text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub comment: String,
}

/// Numeric value of a single-glyph number shortcut, if the glyph is one.
fn shortcut_number(ch: char) -> Option<i64> {
    match ch {
        'ḣ' => Some(100),
        'ḳ' => Some(1_000),
        'Ḳ' => Some(1_024),
        'ṁ' => Some(1_000_000),
        'ḃ' => Some(1_000_000_000),
        'ṫ' => Some(10),
        'Ḷ' => Some(50),
        'ḟ' => Some(15),
        'Ḟ' => Some(255),
        'ẓ' => Some(0),
        'ṅ' => Some(-1),
        _ => None,
    }
}

/// Split comments off each source line.
///
/// Returns the concatenated code text and a list of `(offset, comment)`
/// pairs, where `offset` is the length of the code collected up to and
/// including the line carrying the comment.
fn separate_comments(source: &str) -> (Vec<char>, Vec<(usize, String)>) {
    let mut code: Vec<char> = Vec::new();
    let mut comments: Vec<(usize, String)> = Vec::new();

    for line in source.lines() {
        let (fragment, comment) = match line.find(['\t', '⍝']) {
            Some(pos) => {
                let (code_part, rest) = line.split_at(pos);
                let comment = rest
                    .trim_start_matches(['\t', '⍝'])
                    .trim_matches([' ', '\t'])
                    .to_string();
                (code_part.trim_start_matches([' ', '\t']), comment)
            }
            None => (line.trim_matches([' ', '\t']), String::new()),
        };

        code.extend(fragment.chars());
        if !comment.is_empty() {
            comments.push((code.len(), comment));
        }
    }

    (code, comments)
}

/// Collect the comments attached to code consumed in `start..end`.
fn comments_for(comments: &[(usize, String)], start: usize, end: usize) -> Vec<&str> {
    comments
        .iter()
        .filter(|(offset, _)| start < *offset && *offset <= end)
        .map(|(_, text)| text.as_str())
        .collect()
}

/// Break annotated source into lexical tokens.
///
/// Scanning cannot fail: any glyph that is not a separator, literal or
/// block terminator is emitted as a symbol token, and it is the tree
/// builder's job to reject symbols the registry does not know.
pub fn tokenize(source: &str) -> Vec<Token> {
    let (code, comments) = separate_comments(source);

    let mut tokens = Vec::new();
    let mut carried: Vec<String> = Vec::new();
    let mut pos = 0;

    while pos < code.len() {
        let start = pos;
        let kind = scan_token(&code, &mut pos);

        let mut comment_parts: Vec<String> = std::mem::take(&mut carried);
        comment_parts.extend(
            comments_for(&comments, start, pos)
                .into_iter()
                .map(str::to_string),
        );
        let comment = comment_parts.join("; ");

        match kind {
            None => {
                // Separator: keep its comment for the next real token.
                if !comment.is_empty() {
                    carried.push(comment);
                }
            }
            Some(kind) => tokens.push(Token {
                kind,
                span: Span::new(start, pos),
                comment,
            }),
        }
    }

    tokens
}

/// Scan one token starting at `*pos`, advancing past it.
///
/// Returns `None` for separator characters.
fn scan_token(code: &[char], pos: &mut usize) -> Option<TokenKind> {
    let ch = code[*pos];

    // Separators
    if ch == ' ' || ch == ',' {
        *pos += 1;
        return None;
    }

    // Null literal
    if ch == 'Ø' {
        *pos += 1;
        return Some(TokenKind::Value(Value::Absent));
    }

    // Numbers: 0 stands alone so programs can write digit runs like `10`
    // only via a nonzero lead.
    if ch == '0' {
        *pos += 1;
        return Some(TokenKind::Value(Value::Number(0)));
    }
    if ch.is_ascii_digit() {
        let n = scan_digits(code, pos);
        return Some(TokenKind::Value(Value::Number(n)));
    }
    if ch == '~' && *pos + 1 < code.len() && ('1'..='9').contains(&code[*pos + 1]) {
        *pos += 1;
        let n = scan_digits(code, pos);
        return Some(TokenKind::Value(Value::Number(-n)));
    }
    if let Some(n) = shortcut_number(ch) {
        // A shortcut immediately followed by a letter reads as a stray
        // symbol, not a number, so that it cannot glue onto a word.
        if !code.get(*pos + 1).is_some_and(|c| c.is_ascii_alphabetic()) {
            *pos += 1;
            return Some(TokenKind::Value(Value::Number(n)));
        }
    }

    // Literal newline
    if ch == '`' && code.get(*pos + 1) == Some(&'n') && code.get(*pos + 2) == Some(&'l') {
        *pos += 3;
        return Some(TokenKind::Value(Value::Text("\n".to_string())));
    }

    // Word literals: letter runs with backquote escapes
    if ch.is_ascii_alphabetic() || ch == '`' {
        if let Some(word) = scan_word(code, pos) {
            return Some(TokenKind::Value(Value::Text(word)));
        }
    }

    // Block terminators
    if ch == ')' || ch == ';' {
        *pos += 1;
        return Some(TokenKind::BlockEnd);
    }

    // Everything else is a one-glyph command
    *pos += 1;
    Some(TokenKind::Symbol(ch))
}

fn scan_digits(code: &[char], pos: &mut usize) -> i64 {
    let mut n: i64 = 0;
    while *pos < code.len() && code[*pos].is_ascii_digit() {
        n = n * 10 + (code[*pos] as i64 - '0' as i64);
        *pos += 1;
    }
    n
}

/// Scan a word literal: `([a-zA-Z]|` + "`" + `.)+` with backquotes removed.
///
/// Returns `None` (without consuming) when a lone backquote ends the code,
/// in which case the caller falls through to the symbol case.
fn scan_word(code: &[char], pos: &mut usize) -> Option<String> {
    let mut word = String::new();
    let mut cursor = *pos;

    while cursor < code.len() {
        let ch = code[cursor];
        if ch.is_ascii_alphabetic() {
            word.push(ch);
            cursor += 1;
        } else if ch == '`' && cursor + 1 < code.len() {
            word.push(code[cursor + 1]);
            cursor += 2;
        } else {
            break;
        }
    }

    if word.is_empty() {
        return None;
    }
    *pos = cursor;
    Some(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_numbers_and_separators() {
        let tokens = kinds("3,4 17~12");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Value(Value::Number(3)),
                TokenKind::Value(Value::Number(4)),
                TokenKind::Value(Value::Number(17)),
                TokenKind::Value(Value::Number(-12)),
            ]
        );
    }

    #[test]
    fn test_number_shortcuts() {
        let tokens = kinds("ḣḳṅ");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Value(Value::Number(100)),
                TokenKind::Value(Value::Number(1000)),
                TokenKind::Value(Value::Number(-1)),
            ]
        );
    }

    #[test]
    fn test_word_literals_with_escapes() {
        let tokens = kinds("Hello` World`!");
        assert_eq!(
            tokens,
            vec![TokenKind::Value(Value::Text("Hello World!".to_string()))]
        );
    }

    #[test]
    fn test_null_symbols_and_block_end() {
        let tokens = kinds("Ø3+;");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Value(Value::Absent),
                TokenKind::Value(Value::Number(3)),
                TokenKind::Symbol('+'),
                TokenKind::BlockEnd,
            ]
        );
    }

    #[test]
    fn test_tilde_alone_is_a_symbol() {
        let tokens = kinds("3~");
        assert_eq!(
            tokens,
            vec![TokenKind::Value(Value::Number(3)), TokenKind::Symbol('~')]
        );
    }

    #[test]
    fn test_comments_attach_to_tokens() {
        let tokens = tokenize("3\tpush three\n4+");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].comment, "push three");
        assert_eq!(tokens[1].comment, "");
    }

    #[test]
    fn test_newline_literal() {
        let tokens = kinds("`nl");
        assert_eq!(tokens, vec![TokenKind::Value(Value::Text("\n".to_string()))]);
    }
}
