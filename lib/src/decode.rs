/// Decoding of untyped JSON into an `EmailRequest`.
///
/// Errors are collected into trees and drawn as text, e.g.
///
/// ```text
/// MissingKeys
/// ├─ to
/// └─ body
/// ```
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::email::EmailRequest;

/// Keys that must be present, in the order they are reported
pub const REQUIRED_KEYS: [&str; 6] = ["to", "to_name", "from", "from_name", "subject", "body"];

/// A labelled node with children, drawn like `tree(1)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    pub value: String,
    pub forest: Vec<Tree>,
}

impl Tree {
    pub fn leaf(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            forest: Vec::new(),
        }
    }

    pub fn node(value: impl Into<String>, forest: Vec<Tree>) -> Self {
        Self {
            value: value.into(),
            forest,
        }
    }

    pub fn draw(&self) -> String {
        let mut out = self.value.clone();
        draw_forest(&mut out, "\n", &self.forest);
        out
    }
}

fn draw_forest(out: &mut String, indentation: &str, forest: &[Tree]) {
    let len = forest.len();

    for (i, tree) in forest.iter().enumerate() {
        let is_last = i + 1 == len;

        out.push_str(indentation);
        out.push_str(if is_last { "└" } else { "├" });
        out.push_str("─ ");
        out.push_str(&tree.value);

        let next = format!("{}{}", indentation, if is_last { "   " } else { "│  " });
        draw_forest(out, &next, &tree.forest);
    }
}

/// One or more error trees produced while decoding
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeErrors(pub Vec<Tree>);

impl DecodeErrors {
    pub fn draw(&self) -> String {
        self.0
            .iter()
            .map(Tree::draw)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for DecodeErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.draw())
    }
}

/// Outcome of a decode.
///
/// `Warning` carries a usable value alongside problems that should be
/// reported but do not stop the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded<T> {
    Failure(DecodeErrors),
    Warning(DecodeErrors, T),
    Value(T),
}

impl<T> Decoded<T> {
    pub fn is_failure(&self) -> bool {
        matches!(self, Decoded::Failure(_))
    }
}

/// Decode a JSON value into an `EmailRequest`.
///
/// No coercion is done: every required key must hold a string.
pub fn decode_email_request(input: &Value) -> Decoded<EmailRequest> {
    let object = match input.as_object() {
        Some(o) => o,
        None => {
            return Decoded::Failure(DecodeErrors(vec![Tree::leaf(format!(
                "cannot decode {}, should be Record<string, unknown>",
                input
            ))]))
        }
    };

    let mut missing = Vec::new();
    let mut mistyped = Vec::new();

    for key in REQUIRED_KEYS.iter() {
        match object.get(*key) {
            None => missing.push(Tree::leaf(*key)),
            Some(Value::String(_)) => (),
            Some(other) => mistyped.push(Tree::node(
                format!("required property \"{}\"", key),
                vec![Tree::leaf(format!("cannot decode {}, should be string", other))],
            )),
        }
    }

    let mut errors = Vec::new();
    if !missing.is_empty() {
        errors.push(Tree::node("MissingKeys", missing));
    }
    errors.extend(mistyped);

    if !errors.is_empty() {
        return Decoded::Failure(DecodeErrors(errors));
    }

    let request = match EmailRequest::deserialize(input) {
        Ok(r) => r,
        Err(e) => return Decoded::Failure(DecodeErrors(vec![Tree::leaf(e.to_string())])),
    };

    // Object keys keep insertion order, so extras are reported as they appeared
    let unexpected: Vec<Tree> = object
        .keys()
        .filter(|k| !REQUIRED_KEYS.contains(&k.as_str()))
        .map(|k| Tree::leaf(k.as_str()))
        .collect();

    if unexpected.is_empty() {
        Decoded::Value(request)
    } else {
        Decoded::Warning(
            DecodeErrors(vec![Tree::node("UnexpectedKeys", unexpected)]),
            request,
        )
    }
}
