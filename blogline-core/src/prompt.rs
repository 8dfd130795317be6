//! Prompt templates with `{name}` slots.
//!
//! `{{` and `}}` escape literal braces. Values are inserted as-is, so a
//! topic containing braces is never re-read as a slot.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};

/// The blog outline template. The leading newline and indentation are part of
/// the prompt the model sees.
pub const OUTLINE_TEMPLATE: &str = "
    As an experienced data scientist and technical writer, generate an outline for a blog about {topic}.

    Format the outline as a list of headings and subheadings, with a short description of each section.
    ";

pub const TOPIC_VARIABLE: &str = "topic";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
    input_variables: Vec<String>,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn new<S: Into<String>>(
        template: impl Into<String>,
        input_variables: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let template = template.into();
        let input_variables: Vec<String> = input_variables.into_iter().map(Into::into).collect();
        let segments = parse(&template)?;

        let declared: BTreeSet<&str> = input_variables.iter().map(String::as_str).collect();
        let found: BTreeSet<&str> = segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Variable(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect();

        if declared != found {
            return Err(Error::TemplateVariables {
                declared: declared.into_iter().map(String::from).collect(),
                found: found.into_iter().map(String::from).collect(),
            });
        }

        Ok(Self {
            template,
            input_variables,
            segments,
        })
    }

    /// The fixed blog outline template with its single `topic` slot.
    pub fn outline() -> Self {
        Self {
            template: OUTLINE_TEMPLATE.to_string(),
            input_variables: vec![TOPIC_VARIABLE.to_string()],
            segments: parse(OUTLINE_TEMPLATE).unwrap_or_else(|_| {
                unreachable!("the outline template is a well formed constant")
            }),
        }
    }

    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    pub fn format(&self, values: &HashMap<&str, &str>) -> Result<String> {
        let mut prompt = String::with_capacity(self.template.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => prompt.push_str(text),
                Segment::Variable(name) => {
                    let value = values
                        .get(name.as_str())
                        .ok_or_else(|| Error::MissingVariable(name.clone()))?;
                    prompt.push_str(value);
                }
            }
        }
        Ok(prompt)
    }
}

/// Formats the blog outline prompt for `topic`.
pub fn outline_prompt(topic: &str) -> String {
    let values = HashMap::from([(TOPIC_VARIABLE, topic)]);
    PromptTemplate::outline()
        .format(&values)
        .unwrap_or_else(|_| unreachable!("the outline template only needs `topic`"))
}

fn parse(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' if chars.peek().map(|(_, next)| *next) == Some('{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek().map(|(_, next)| *next) == Some('}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, '{')) | None => return Err(Error::TemplateSyntax { position }),
                        Some((_, c)) => name.push(c),
                    }
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable(name));
            }
            '}' => return Err(Error::TemplateSyntax { position }),
            c => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}
