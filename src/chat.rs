use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::parser;
use crate::translator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A citation attached to a model turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    /// Unix millis.
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grounding_sources: Vec<GroundingSource>,
    /// Base64 payloads, user-uploaded or model-generated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Message {
    /// The message body alone, Markdown-rendered.
    pub fn body_html(&self) -> String {
        translator::translate(parser::parse(&self.text))
    }

    /// The body plus attached images and grounding sources.
    pub fn render_html(&self) -> String {
        let mut html = self.body_html();
        for image in &self.images {
            html.push_str(&format!(
                "\n<img src=\"data:image/png;base64,{}\" alt=\"attached\">",
                encode_double_quoted_attribute(image)
            ));
        }
        if !self.grounding_sources.is_empty() {
            html.push_str("\n<ul class=\"sources\">");
            for source in &self.grounding_sources {
                html.push_str(&format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    encode_double_quoted_attribute(&source.uri),
                    encode_text(&source.title)
                ));
            }
            html.push_str("</ul>");
        }
        html
    }
}

/// Ordered transcript of user and model turns. Derived output is computed
/// fresh from the message text on every render; nothing here is persisted.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    generating: bool,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True between a user turn being submitted and the model reply landing.
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn push_user(&mut self, text: impl Into<String>, images: Vec<String>) -> &Message {
        self.generating = true;
        self.push(Role::User, text.into(), Vec::new(), images)
    }

    pub fn push_model(
        &mut self,
        text: impl Into<String>,
        grounding_sources: Vec<GroundingSource>,
        images: Vec<String>,
    ) -> &Message {
        self.generating = false;
        self.push(Role::Model, text.into(), grounding_sources, images)
    }

    /// Failure path: the error lands in the transcript as a model turn.
    pub fn push_error(&mut self, message: &str) -> &Message {
        self.generating = false;
        self.push(
            Role::Model,
            format!("**Error:** {}", message),
            Vec::new(),
            Vec::new(),
        )
    }

    pub fn render_html(&self) -> String {
        self.messages
            .iter()
            .map(|m| {
                let class = match m.role {
                    Role::User => "user",
                    Role::Model => "model",
                };
                format!("<div class=\"message {}\">{}</div>", class, m.render_html())
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn push(
        &mut self,
        role: Role,
        text: String,
        grounding_sources: Vec<GroundingSource>,
        images: Vec<String>,
    ) -> &Message {
        self.next_id += 1;
        self.messages.push(Message {
            id: self.next_id.to_string(),
            role,
            text,
            timestamp: now_millis(),
            thinking_duration_ms: None,
            grounding_sources,
            images,
        });
        self.messages.last().unwrap()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
