use thiserror::Error;

/// Variables available to the channel-name template.
#[derive(Debug, Clone, Copy)]
pub struct ChannelVars<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub event: &'a str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unterminated '{{{{' at byte {at}")]
    Unterminated { at: usize },
    #[error("unknown template field '{field}' (expected .Owner, .Repo or .Event)")]
    UnknownField { field: String },
    #[error("template rendered an empty channel name")]
    EmptyChannel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Owner,
    Repo,
    Event,
}

/// A channel-name template, compiled once at startup.
///
/// Syntax: literal text with `{{.Owner}}`, `{{.Repo}}` and `{{.Event}}`
/// placeholders; whitespace inside the braces is accepted. A template
/// without placeholders names a single static channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTemplate {
    segments: Vec<Segment>,
}

impl ChannelTemplate {
    /// Compile a template source string.
    ///
    /// An unknown field or an unterminated placeholder is a parse error;
    /// the process must refuse to start on one.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                return Err(TemplateError::Unterminated { at: offset + start });
            };
            segments.push(match after[..end].trim() {
                ".Owner" => Segment::Owner,
                ".Repo" => Segment::Repo,
                ".Event" => Segment::Event,
                field => {
                    return Err(TemplateError::UnknownField {
                        field: field.to_string(),
                    });
                }
            });
            offset += start + 2 + end + 2;
            rest = &after[end + 2..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Render the channel name for one event.
    ///
    /// The rendered name must be non-empty; streams cannot carry a message
    /// on an empty subject.
    pub fn render(&self, vars: &ChannelVars<'_>) -> Result<String, TemplateError> {
        let mut name = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => name.push_str(text),
                Segment::Owner => name.push_str(vars.owner),
                Segment::Repo => name.push_str(vars.repo),
                Segment::Event => name.push_str(vars.event),
            }
        }
        if name.is_empty() {
            return Err(TemplateError::EmptyChannel);
        }
        Ok(name)
    }
}
