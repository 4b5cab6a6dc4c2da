pub type InlineText = Vec<InlineSpan>;

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Heading(u8, InlineText),
    ListItem(InlineText),
    Codeblock(String, Vec<String>),
    Spacer,
    Paragraph(InlineText),
}

#[derive(Clone, Debug, PartialEq)]
pub enum InlineSpan {
    Bold(String),
    InlineCode(String),
    Plaintext(String),
}
