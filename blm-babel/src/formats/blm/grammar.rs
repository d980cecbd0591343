//! BLM token grammar
//!
//! Every control token is introduced by a backslash and recognised at the
//! current scan position, highest priority first:
//!
//! | Token                    | Meaning                                   |
//! |--------------------------|-------------------------------------------|
//! | `\{p}`                   | page break                                |
//! | `\{@literal@`            | open literal span                         |
//! | `\{l` `\{r` `\{c` `\{j`  | open alignment, optional indent digits    |
//! | `\{h`N                   | open heading (one digit)                  |
//! | `\{b` `\{i` `\{u` `\{s` `\{^` `\{_` | open inline style              |
//! | `\l}` `\r}` `\c}` `\j}`  | close alignment                           |
//! | `\h`N`}`                 | close heading                             |
//! | `\b}` `\i}` `\u}` `\s}` `\^}` `\_}` | close inline style             |
//!
//! The literal close marker `\@literal@}` is only meaningful inside a literal
//! span and is deliberately not a token here.
//!
//! The decoder and the escaper both go through [`scan_token`]; anything it does
//! not match is plain text.

use crate::model::nodes::{Alignment, BlockFormat, StyleFlag};

/// Header line every BLM stream starts with.
pub const MAGIC: &str = "::BLM1::";
pub const LITERAL_OPEN: &str = "\\{@literal@";
pub const LITERAL_CLOSE: &str = "\\@literal@}";
pub const PAGE_BREAK: &str = "\\{p}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    PageBreak,
    LiteralOpen,
    AlignOpen { alignment: Alignment, indent: u8 },
    AlignClose(Alignment),
    /// Raw digit, 0..=9. Levels outside 1..=6 are still tokens.
    HeadingOpen(u8),
    HeadingClose(u8),
    InlineOpen(StyleFlag),
    InlineClose(StyleFlag),
}

pub fn alignment_marker(alignment: Alignment) -> char {
    match alignment {
        Alignment::Left => 'l',
        Alignment::Right => 'r',
        Alignment::Center => 'c',
        Alignment::Justify => 'j',
    }
}

fn alignment_from_marker(marker: u8) -> Option<Alignment> {
    match marker {
        b'l' => Some(Alignment::Left),
        b'r' => Some(Alignment::Right),
        b'c' => Some(Alignment::Center),
        b'j' => Some(Alignment::Justify),
        _ => None,
    }
}

pub fn style_marker(flag: StyleFlag) -> char {
    match flag {
        StyleFlag::Bold => 'b',
        StyleFlag::Italic => 'i',
        StyleFlag::Underline => 'u',
        StyleFlag::Strike => 's',
        StyleFlag::Superscript => '^',
        StyleFlag::Subscript => '_',
    }
}

fn style_from_marker(marker: u8) -> Option<StyleFlag> {
    match marker {
        b'b' => Some(StyleFlag::Bold),
        b'i' => Some(StyleFlag::Italic),
        b'u' => Some(StyleFlag::Underline),
        b's' => Some(StyleFlag::Strike),
        b'^' => Some(StyleFlag::Superscript),
        b'_' => Some(StyleFlag::Subscript),
        _ => None,
    }
}

fn digit(byte: Option<&u8>) -> Option<u8> {
    byte.filter(|b| b.is_ascii_digit()).map(|b| b - b'0')
}

/// Recognises a token at the start of `input`, returning it with its length
/// in bytes. All tokens are ASCII, so the length is always a char boundary.
pub fn scan_token(input: &str) -> Option<(Token, usize)> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'\\') {
        return None;
    }

    if input.starts_with(PAGE_BREAK) {
        return Some((Token::PageBreak, PAGE_BREAK.len()));
    }
    if input.starts_with(LITERAL_OPEN) {
        return Some((Token::LiteralOpen, LITERAL_OPEN.len()));
    }

    match bytes.get(1) {
        Some(b'{') => scan_open(bytes),
        Some(_) => scan_close(bytes),
        None => None,
    }
}

fn scan_open(bytes: &[u8]) -> Option<(Token, usize)> {
    let marker = *bytes.get(2)?;

    if let Some(alignment) = alignment_from_marker(marker) {
        let digits = bytes[3..].iter().take_while(|b| b.is_ascii_digit()).count();
        let indent = bytes[3..3 + digits].iter().fold(0u8, |acc, b| {
            acc.saturating_mul(10)
                .saturating_add(b - b'0')
                .min(BlockFormat::MAX_INDENT)
        });
        return Some((Token::AlignOpen { alignment, indent }, 3 + digits));
    }

    if marker == b'h' {
        return digit(bytes.get(3)).map(|level| (Token::HeadingOpen(level), 4));
    }

    style_from_marker(marker).map(|flag| (Token::InlineOpen(flag), 3))
}

fn scan_close(bytes: &[u8]) -> Option<(Token, usize)> {
    let marker = bytes[1];

    if let Some(alignment) = alignment_from_marker(marker) {
        return (bytes.get(2) == Some(&b'}')).then_some((Token::AlignClose(alignment), 3));
    }

    if marker == b'h' {
        let level = digit(bytes.get(2))?;
        return (bytes.get(3) == Some(&b'}')).then_some((Token::HeadingClose(level), 4));
    }

    let flag = style_from_marker(marker)?;
    (bytes.get(2) == Some(&b'}')).then_some((Token::InlineClose(flag), 3))
}
