//! Schema validation for normalized responses.
//!
//! A [`Schema`] describes the shape an endpoint's data must have after
//! normalization. Validation never panics: it either yields the typed value or
//! every issue it could find.
//!
//! # Rules
//!
//! - Objects check every declared field and report all issues together.
//! - Arrays stop at the first failing element and report it with its index.
//! - Optional fields accept absence and `null`; a present value of the wrong
//!   type is still an issue.
//! - `Number` is any JSON number that is not NaN, `Count` is a non-negative
//!   integer, `String` accepts the empty string.

pub mod declared;
pub mod errors;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use errors::{json_kind, FieldPath, Issue, IssueKind, PathSegment, SchemaViolation};

/// Declared shape of a JSON value.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Anything, including `null`.
    Any,
    String,
    Number,
    /// Non-negative integer.
    Count,
    Bool,
    /// A string from a fixed set.
    OneOf(&'static [&'static str]),
    Array(Box<Schema>),
    Object(ObjectSchema),
}

/// A field declared on an object schema.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
    pub required: bool,
}

/// Declared fields of an object. Undeclared fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<Field>,
    /// Groups of fields of which at least one must be present.
    alternatives: Vec<&'static [&'static str]>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field that must be present and non-null.
    pub fn required(mut self, name: &'static str, schema: Schema) -> Self {
        self.fields.push(Field {
            name,
            schema,
            required: true,
        });
        self
    }

    /// Declare a field that may be absent or null.
    pub fn optional(mut self, name: &'static str, schema: Schema) -> Self {
        self.fields.push(Field {
            name,
            schema,
            required: false,
        });
        self
    }

    /// Require at least one of `names` to be present and non-null.
    pub fn at_least_one_of(mut self, names: &'static [&'static str]) -> Self {
        self.alternatives.push(names);
        self
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }
}

impl Schema {
    /// Array of `element`.
    pub fn array_of(element: impl Into<Schema>) -> Self {
        Schema::Array(Box::new(element.into()))
    }

    /// Check `value` and return every issue found, in document order.
    pub fn check(&self, value: &Value) -> Vec<Issue> {
        let mut issues = Vec::new();
        self.check_at(value, &FieldPath::root(), &mut issues);
        issues
    }

    fn check_at(&self, value: &Value, path: &FieldPath, issues: &mut Vec<Issue>) {
        match self {
            Schema::Any => {}
            Schema::String => {
                if !value.is_string() {
                    issues.push(wrong_type(path, "string", value));
                }
            }
            Schema::Number => {
                let is_number = value.as_f64().is_some_and(|n| !n.is_nan());
                if !is_number {
                    issues.push(wrong_type(path, "number", value));
                }
            }
            Schema::Count => {
                if value.as_u64().is_none() {
                    issues.push(wrong_type(path, "non-negative integer", value));
                }
            }
            Schema::Bool => {
                if !value.is_boolean() {
                    issues.push(wrong_type(path, "boolean", value));
                }
            }
            Schema::OneOf(allowed) => match value.as_str() {
                Some(s) if allowed.contains(&s) => {}
                Some(s) => issues.push(Issue::new(
                    path.clone(),
                    IssueKind::NotAllowed {
                        value: s.to_string(),
                        allowed: *allowed,
                    },
                )),
                None => issues.push(wrong_type(path, "string", value)),
            },
            Schema::Array(element) => {
                let Some(items) = value.as_array() else {
                    issues.push(wrong_type(path, "array", value));
                    return;
                };

                for (index, item) in items.iter().enumerate() {
                    let mut causes = Vec::new();
                    element.check_at(item, &path.index(index), &mut causes);
                    if !causes.is_empty() {
                        issues.push(Issue::new(
                            path.clone(),
                            IssueKind::InvalidElement { index, causes },
                        ));
                        break;
                    }
                }
            }
            Schema::Object(object) => object.check_at(value, path, issues),
        }
    }
}

impl ObjectSchema {
    fn check_at(&self, value: &Value, path: &FieldPath, issues: &mut Vec<Issue>) {
        let Some(map) = value.as_object() else {
            issues.push(wrong_type(path, "object", value));
            return;
        };

        for field in &self.fields {
            let field_path = path.field(field.name);
            match map.get(field.name) {
                None => {
                    if field.required {
                        issues.push(Issue::new(field_path, IssueKind::Missing));
                    }
                }
                Some(Value::Null) if !field.required => {}
                Some(v) => field.schema.check_at(v, &field_path, issues),
            }
        }

        for group in &self.alternatives {
            let present = group
                .iter()
                .any(|name| map.get(*name).is_some_and(|v| !v.is_null()));
            if !present {
                issues.push(Issue::new(
                    path.clone(),
                    IssueKind::MissingAlternative { fields: *group },
                ));
            }
        }
    }
}

fn wrong_type(path: &FieldPath, expected: &'static str, found: &Value) -> Issue {
    Issue::new(
        path.clone(),
        IssueKind::WrongType {
            expected,
            found: json_kind(found),
        },
    )
}

/// Validate `value` against `schema` and decode it into `T`.
///
/// A decode failure after a clean structural pass is reported as an issue at
/// the root rather than raised.
pub fn validate<T: DeserializeOwned>(schema: &Schema, value: &Value) -> Result<T, SchemaViolation> {
    let issues = schema.check(value);
    if !issues.is_empty() {
        return Err(SchemaViolation::new(issues));
    }

    T::deserialize(value).map_err(|e: serde_json::Error| {
        SchemaViolation::new(vec![Issue::new(
            FieldPath::root(),
            IssueKind::Decode(e.to_string()),
        )])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> Schema {
        ObjectSchema::new()
            .required("id", Schema::String)
            .optional("age", Schema::Count)
            .optional("score", Schema::Number)
            .into()
    }

    #[test]
    fn test_primitives() {
        assert!(Schema::String.check(&json!("")).is_empty());
        assert!(Schema::Number.check(&json!(-1.5)).is_empty());
        assert!(Schema::Count.check(&json!(0)).is_empty());
        assert!(Schema::Bool.check(&json!(false)).is_empty());
        assert!(Schema::Any.check(&json!(null)).is_empty());

        assert_eq!(Schema::Count.check(&json!(-1)).len(), 1);
        assert_eq!(Schema::Count.check(&json!(1.5)).len(), 1);
        assert_eq!(Schema::Number.check(&json!("1")).len(), 1);
        assert_eq!(Schema::String.check(&json!(1)).len(), 1);
    }

    #[test]
    fn test_object_aggregates_all_issues() {
        let issues = person().check(&json!({ "age": "old", "score": "high" }));

        let messages: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "id: missing required field",
                "age: expected non-negative integer, found string",
                "score: expected number, found string",
            ]
        );
    }

    #[test]
    fn test_optional_accepts_null_and_absence() {
        assert!(person().check(&json!({ "id": "a", "age": null })).is_empty());
        assert!(person().check(&json!({ "id": "a" })).is_empty());
    }

    #[test]
    fn test_required_null_is_wrong_type() {
        let issues = person().check(&json!({ "id": null }));
        assert_eq!(
            issues[0].kind,
            IssueKind::WrongType {
                expected: "string",
                found: "null"
            }
        );
    }

    #[test]
    fn test_array_reports_first_failing_element() {
        let schema = Schema::array_of(person());
        let issues = schema.check(&json!([{ "id": "a" }, { "id": 2 }, { "id": 3 }]));

        assert_eq!(issues.len(), 1);
        match &issues[0].kind {
            IssueKind::InvalidElement { index, causes } => {
                assert_eq!(*index, 1);
                assert_eq!(causes[0].path.to_string(), "[1].id");
            }
            other => panic!("unexpected issue: {:?}", other),
        }
    }

    #[test]
    fn test_one_of() {
        let schema = Schema::OneOf(&["Male", "Female"]);
        assert!(schema.check(&json!("Female")).is_empty());
        assert!(matches!(
            schema.check(&json!("other"))[0].kind,
            IssueKind::NotAllowed { .. }
        ));
    }

    #[test]
    fn test_at_least_one_of() {
        let schema: Schema = ObjectSchema::new()
            .optional("name", Schema::String)
            .optional("alias", Schema::String)
            .at_least_one_of(&["name", "alias"])
            .into();

        assert!(schema.check(&json!({ "alias": "x" })).is_empty());
        assert!(matches!(
            schema.check(&json!({ "name": null }))[0].kind,
            IssueKind::MissingAlternative { .. }
        ));
    }

    #[test]
    fn test_validate_decodes() {
        #[derive(Debug, serde::Deserialize)]
        struct Person {
            id: String,
        }

        let person_value: Person = validate(&person(), &json!({ "id": "p1" })).unwrap();
        assert_eq!(person_value.id, "p1");

        let err = validate::<Person>(&person(), &json!([])).unwrap_err();
        assert_eq!(err.messages(), vec!["(root): expected object, found array"]);
    }

    #[test]
    fn test_validate_reports_decode_failure() {
        // Structurally fine for the schema, but `Vec<u8>` cannot hold a string.
        let err = validate::<Vec<u8>>(&Schema::Any, &json!("nope")).unwrap_err();
        assert!(matches!(err.issues[0].kind, IssueKind::Decode(_)));
    }
}
