//! Schema violations and their diagnostics.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// One step into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Location of a value inside a response, e.g. `data[3].name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        FieldPath::default()
    }

    /// Path to a named field below this one.
    pub fn field(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.to_string()));
        FieldPath { segments }
    }

    /// Path to an array element below this one.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        FieldPath { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// What went wrong at a given path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Value present but of the wrong primitive type.
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    /// Required field absent.
    Missing,

    /// A string outside the allowed set.
    NotAllowed {
        value: String,
        allowed: &'static [&'static str],
    },

    /// None of a group of alternative fields is present.
    MissingAlternative { fields: &'static [&'static str] },

    /// The first failing element of an array, with its own issues.
    InvalidElement { index: usize, causes: Vec<Issue> },

    /// Structurally valid, but the typed decode still failed.
    Decode(String),
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::WrongType { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            IssueKind::Missing => f.write_str("missing required field"),
            IssueKind::NotAllowed { value, allowed } => {
                write!(f, "'{}' is not one of: {}", value, allowed.join(", "))
            }
            IssueKind::MissingAlternative { fields } => {
                write!(f, "expected at least one of: {}", fields.join(", "))
            }
            IssueKind::InvalidElement { index, causes } => {
                write!(f, "element {} is invalid", index)?;
                for (i, cause) in causes.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{}{}", sep, cause)?;
                }
                Ok(())
            }
            IssueKind::Decode(message) => write!(f, "could not decode: {}", message),
        }
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{path}: {kind}")]
pub struct Issue {
    pub path: FieldPath,
    pub kind: IssueKind,
}

impl Issue {
    pub fn new(path: FieldPath, kind: IssueKind) -> Self {
        Issue { path, kind }
    }
}

/// A normalized response that does not match its declared schema.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("response does not match schema ({})", count_issues(.issues))]
#[diagnostic(
    code(ballot::schema::mismatch),
    help("The backend contract may have changed; compare the payload against the declared schema")
)]
pub struct SchemaViolation {
    #[related]
    pub issues: Vec<Issue>,
}

impl SchemaViolation {
    pub fn new(issues: Vec<Issue>) -> Self {
        SchemaViolation { issues }
    }

    /// All issue messages, in the order they were found.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.to_string()).collect()
    }
}

fn count_issues(issues: &[Issue]) -> String {
    match issues.len() {
        1 => "1 issue".to_string(),
        n => format!("{} issues", n),
    }
}

/// Short name for the JSON type of a value, used in issue messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
