//! A small logic-less template language for the namespace templates.
//!
//! # Syntax
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `{{name}}` | Insert a text variable |
//! | `{{#name}}...{{/name}}` | Repeat for each list item, or render once for a true flag / non-empty text |
//! | `{{^name}}...{{/name}}` | Render when the list is empty, the flag false, or the text empty |
//!
//! Variables resolve in the innermost scope first, so inside `{{#fields}}` a
//! `{{doc}}` refers to the field's doc and `{{name}}` can still reach the
//! enclosing object.
//!
//! Templates are parsed before anything is rendered. Unbalanced or empty tags
//! are reported by [`Template::parse`]; references to unknown variables by
//! [`Template::render`].

use thiserror::Error;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Errors raised while parsing or rendering a template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("{template}:{line}: unterminated tag")]
    UnterminatedTag { template: String, line: usize },

    #[error("{template}:{line}: empty tag")]
    EmptyTag { template: String, line: usize },

    #[error("{template}: section '{section}' opened on line {line} is never closed")]
    UnclosedSection {
        template: String,
        section: String,
        line: usize,
    },

    #[error("{template}:{line}: closing tag '{found}' does not match open section '{expected}'")]
    MismatchedClose {
        template: String,
        expected: String,
        found: String,
        line: usize,
    },

    #[error("{template}:{line}: closing tag '{found}' without an open section")]
    UnexpectedClose {
        template: String,
        found: String,
        line: usize,
    },

    #[error("{template}: unknown variable '{name}'")]
    UnknownVariable { template: String, name: String },

    #[error("{template}: variable '{name}' is a {kind} and cannot be inserted as text")]
    NotText {
        template: String,
        name: String,
        kind: &'static str,
    },
}

/// A value bound to a template variable
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Flag(bool),
    List(Vec<Context>),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Flag(_) => "flag",
            Value::List(_) => "list",
        }
    }
}

/// One scope of variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    vars: Vec<(&'static str, Value)>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a text variable
    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.vars.push((name, Value::Text(value.into())));
        self
    }

    /// Bind a boolean flag
    pub fn flag(mut self, name: &'static str, value: bool) -> Self {
        self.vars.push((name, Value::Flag(value)));
        self
    }

    /// Bind a list of nested scopes
    pub fn list(mut self, name: &'static str, items: Vec<Context>) -> Self {
        self.vars.push((name, Value::List(items)));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Var(String),
    Section {
        name: String,
        inverted: bool,
        body: Vec<Node>,
    },
}

/// A parsed template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

struct OpenSection {
    name: String,
    inverted: bool,
    line: usize,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source; `name` is used in error messages
    pub fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut stack: Vec<OpenSection> = Vec::new();
        let mut nodes: Vec<Node> = Vec::new();
        let mut rest = source;
        let mut line = 1;

        while let Some(start) = rest.find(OPEN) {
            let (text, after_open) = rest.split_at(start);
            if !text.is_empty() {
                current(&mut stack, &mut nodes).push(Node::Text(text.to_string()));
            }
            line += text.matches('\n').count();

            let after_open = &after_open[OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                return Err(TemplateError::UnterminatedTag {
                    template: name.to_string(),
                    line,
                });
            };
            let tag = after_open[..end].trim();
            let tag_line = line;
            line += after_open[..end].matches('\n').count();
            rest = &after_open[end + CLOSE.len()..];

            let (sigil, tag_name) = match tag.chars().next() {
                Some(c @ ('#' | '^' | '/')) => (Some(c), tag[1..].trim()),
                _ => (None, tag),
            };
            if tag_name.is_empty() {
                return Err(TemplateError::EmptyTag {
                    template: name.to_string(),
                    line: tag_line,
                });
            }

            match sigil {
                Some(c @ ('#' | '^')) => stack.push(OpenSection {
                    name: tag_name.to_string(),
                    inverted: c == '^',
                    line: tag_line,
                    nodes: Vec::new(),
                }),
                Some(_) => {
                    let Some(open) = stack.pop() else {
                        return Err(TemplateError::UnexpectedClose {
                            template: name.to_string(),
                            found: tag_name.to_string(),
                            line: tag_line,
                        });
                    };
                    if open.name != tag_name {
                        return Err(TemplateError::MismatchedClose {
                            template: name.to_string(),
                            expected: open.name,
                            found: tag_name.to_string(),
                            line: tag_line,
                        });
                    }
                    current(&mut stack, &mut nodes).push(Node::Section {
                        name: open.name,
                        inverted: open.inverted,
                        body: open.nodes,
                    });
                }
                None => current(&mut stack, &mut nodes).push(Node::Var(tag_name.to_string())),
            }
        }

        if let Some(open) = stack.pop() {
            return Err(TemplateError::UnclosedSection {
                template: name.to_string(),
                section: open.name,
                line: open.line,
            });
        }
        if !rest.is_empty() {
            nodes.push(Node::Text(rest.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            nodes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render with `context` as the outermost scope
    pub fn render(&self, context: &Context) -> Result<String, TemplateError> {
        let mut out = String::new();
        self.render_into(context, &mut out)?;
        Ok(out)
    }

    /// Render, appending to `out`
    pub fn render_into(&self, context: &Context, out: &mut String) -> Result<(), TemplateError> {
        let mut scopes = vec![context];
        self.render_nodes(&self.nodes, &mut scopes, out)
    }

    fn render_nodes<'c>(
        &self,
        nodes: &[Node],
        scopes: &mut Vec<&'c Context>,
        out: &mut String,
    ) -> Result<(), TemplateError> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Var(name) => match self.lookup(scopes, name)? {
                    Value::Text(text) => out.push_str(text),
                    other => {
                        return Err(TemplateError::NotText {
                            template: self.name.clone(),
                            name: name.clone(),
                            kind: other.kind(),
                        });
                    }
                },
                Node::Section {
                    name,
                    inverted,
                    body,
                } => match self.lookup(scopes, name)? {
                    Value::List(items) if !inverted => {
                        for item in items {
                            scopes.push(item);
                            let result = self.render_nodes(body, scopes, out);
                            scopes.pop();
                            result?;
                        }
                    }
                    value => {
                        if is_truthy(value) != *inverted {
                            self.render_nodes(body, scopes, out)?;
                        }
                    }
                },
            }
        }
        Ok(())
    }

    fn lookup<'c>(&self, scopes: &[&'c Context], name: &str) -> Result<&'c Value, TemplateError> {
        scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .ok_or_else(|| TemplateError::UnknownVariable {
                template: self.name.clone(),
                name: name.to_string(),
            })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Text(text) => !text.is_empty(),
        Value::Flag(flag) => *flag,
        Value::List(items) => !items.is_empty(),
    }
}

/// Node list currently being filled: the innermost open section, or the root
fn current<'a>(stack: &'a mut [OpenSection], root: &'a mut Vec<Node>) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(open) => &mut open.nodes,
        None => root,
    }
}
