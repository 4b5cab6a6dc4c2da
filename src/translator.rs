use crate::entity::Block;
use crate::entity::InlineSpan;
use crate::entity::InlineText;

use html_escape::encode_text;

/// Renders the block sequence to HTML, one fragment per block, in block
/// order. Inline spans concatenate left to right with no separators.
pub fn translate(blocks: Vec<Block>) -> String {
    blocks
        .into_iter()
        .map(|block| translate_block(&block))
        .collect::<Vec<String>>()
        .join("\n")
}

fn translate_block(block: &Block) -> String {
    match block {
        Block::Heading(level, text) => {
            format!("<h{}>{}</h{}>", level, translate_inline(text), level)
        }
        Block::ListItem(text) => format!("<li>{}</li>", translate_inline(text)),
        Block::Codeblock(language, lines) => {
            let code = encode_text(&lines.join("\n")).to_string();
            if language.is_empty() {
                // Untagged fence: the language label is omitted.
                format!("<pre><code>{}</code></pre>", code)
            } else {
                format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    encode_text(language),
                    code
                )
            }
        }
        Block::Spacer => String::from("<div class=\"spacer\"></div>"),
        Block::Paragraph(text) => format!("<p>{}</p>", translate_inline(text)),
    }
}

fn translate_inline(text: &InlineText) -> String {
    text.iter()
        .map(|span| match span {
            InlineSpan::Bold(s) => format!("<strong>{}</strong>", encode_text(s)),
            InlineSpan::InlineCode(s) => format!("<code>{}</code>", encode_text(s)),
            InlineSpan::Plaintext(s) => encode_text(s).to_string(),
        })
        .collect::<Vec<String>>()
        .join("")
}
