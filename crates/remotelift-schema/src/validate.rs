//! JSON Schema validation against a side of the remote contract

use jsonschema::{Draft, Validator};
use remotelift_core::{ProxyError, Result, SchemaSide};
use serde_json::Value;

/// Validate a document against an optional schema.
///
/// No schema (or an empty schema object) means validation is disabled for
/// that side and the document passes. On failure every individual violation
/// is collected into one [`ProxyError::Validation`].
pub fn validate(schema: Option<&Value>, document: &Value, side: SchemaSide) -> Result<()> {
    let Some(schema) = schema else {
        tracing::debug!("skipping {side} schema validation: no schema provided");
        return Ok(());
    };
    if schema.as_object().is_some_and(serde_json::Map::is_empty) {
        tracing::debug!("skipping {side} schema validation: empty schema");
        return Ok(());
    }

    let validator = compile(schema, side)?;
    let violations: Vec<String> = validator
        .iter_errors(document)
        .map(|err| {
            let path = err.instance_path().to_string();
            if path.is_empty() {
                err.to_string()
            } else {
                format!("{path}: {err}")
            }
        })
        .collect();

    if violations.is_empty() {
        tracing::debug!("{side} passed schema validation");
        Ok(())
    } else {
        Err(ProxyError::Validation { side, violations })
    }
}

fn compile(schema: &Value, side: SchemaSide) -> Result<Validator> {
    jsonschema::options()
        .with_draft(Draft::Draft7)
        .build(schema)
        .map_err(|err| ProxyError::Validation {
            side,
            violations: vec![format!("schema did not compile: {err}")],
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person_schema() -> Value {
        json!({
            "type": "object",
            "required": ["name", "age"],
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer"}
            }
        })
    }

    #[test]
    fn no_schema_is_a_no_op() {
        assert!(validate(None, &json!({"anything": true}), SchemaSide::Request).is_ok());
        assert!(validate(Some(&json!({})), &json!(42), SchemaSide::Response).is_ok());
    }

    #[test]
    fn valid_document_passes() {
        let schema = person_schema();
        let doc = json!({"name": "ada", "age": 36});
        assert!(validate(Some(&schema), &doc, SchemaSide::Request).is_ok());
    }

    #[test]
    fn every_violation_is_reported() {
        let schema = person_schema();
        let doc = json!({"age": "old"});
        let err = validate(Some(&schema), &doc, SchemaSide::Request).unwrap_err();
        let ProxyError::Validation { side, violations } = err else {
            panic!("expected a validation error");
        };
        assert_eq!(side, SchemaSide::Request);
        // missing "name" plus wrong type for "age"
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn uncompilable_schema_is_a_validation_error() {
        let schema = json!({"type": "no-such-type"});
        let err = validate(Some(&schema), &json!({}), SchemaSide::Response).unwrap_err();
        assert!(err.to_string().contains("schema did not compile"));
    }
}
