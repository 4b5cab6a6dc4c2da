use crate::entity::Block;
use crate::entity::InlineSpan;
use crate::entity::InlineText;

use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_until},
    combinator::{map, not},
    multi::{many0, many1},
    sequence::{delimited, preceded},
    IResult,
};

/// Splits `content` into display blocks, one pass over the lines.
///
/// Total over all inputs: a line that matches no structured form is a
/// paragraph, and the empty string yields an empty sequence.
pub fn parse(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    // Language and accumulated raw lines of the currently open fence.
    let mut fence: Option<(String, Vec<String>)> = None;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            match fence.take() {
                // Closing fence: flush the accumulator. Any text after the
                // closing backticks is discarded.
                Some((language, lines)) => blocks.push(Block::Codeblock(language, lines)),
                None => fence = Some((trimmed[3..].trim().to_string(), Vec::new())),
            }
        } else if let Some((_, lines)) = fence.as_mut() {
            lines.push(line.to_string());
        } else {
            blocks.push(classify(line));
        }
    }
    // A fence that never closes drops its accumulated lines.
    blocks
}

// Ordered rules, first match wins. Heading remainders keep their whitespace;
// list markers are matched against the trimmed line.
fn classify(line: &str) -> Block {
    if let Some(rest) = line.strip_prefix("# ") {
        return Block::Heading(1, parse_inline(rest));
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Block::Heading(2, parse_inline(rest));
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return Block::Heading(3, parse_inline(rest));
    }
    let trimmed = line.trim();
    if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
        return Block::ListItem(parse_inline(&trimmed[2..]));
    }
    if trimmed.is_empty() {
        return Block::Spacer;
    }
    Block::Paragraph(parse_inline(line))
}

fn parse_boldtext(i: &str) -> IResult<&str, &str> {
    delimited(tag("**"), take_until("**"), tag("**"))(i)
}

fn parse_inline_code(i: &str) -> IResult<&str, &str> {
    delimited(tag("`"), take_until("`"), tag("`"))(i)
}

// Consume characters one at a time wherever neither delimited form begins at
// the current position, so an unmatched marker stays literal plain text.
fn parse_plaintext(i: &str) -> IResult<&str, String> {
    map(
        many1(preceded(
            not(alt((parse_boldtext, parse_inline_code))),
            take(1u8),
        )),
        |v| v.join(""),
    )(i)
}

fn parse_span(i: &str) -> IResult<&str, InlineSpan> {
    // Bold before code: at equal positions the double-asterisk form wins.
    alt((
        map(parse_boldtext, |s: &str| InlineSpan::Bold(s.to_string())),
        map(parse_inline_code, |s: &str| {
            InlineSpan::InlineCode(s.to_string())
        }),
        map(parse_plaintext, InlineSpan::Plaintext),
    ))(i)
}

/// Splits a line into styled spans. Shortest-match, leftmost-first; nested
/// markers are kept as literal characters inside the outer span. Empty plain
/// segments are never emitted.
pub fn parse_inline(line: &str) -> InlineText {
    match many0(parse_span)(line) {
        Ok((_, spans)) => spans,
        Err(_) => vec![InlineSpan::Plaintext(line.to_string())],
    }
}
