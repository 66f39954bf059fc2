//! Change-set validation and partial-update query construction
//!
//! A change set is the caller-supplied map of field/value pairs for a
//! selective update. Every key must be explicitly enumerated in the field
//! whitelist before an update operation is built: omission-is-safe is the
//! default, so `username`, `password_hash`, and `is_admin` can never be
//! smuggled in through an open-ended payload. Values are only ever bound as
//! parameters, never spliced into statement text.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{DirectoryError, Result};

/// Caller-supplied field/value pairs proposed for an update.
///
/// A `BTreeMap` keeps the generated statement deterministic for a given
/// set of keys.
pub type ChangeSet = BTreeMap<String, Value>;

/// The fixed set of fields a change set is ever permitted to target.
pub const UPDATABLE_FIELDS: &[&str] = &["first_name", "last_name", "email", "phone"];

/// A validated update operation: assignments over exactly the supplied
/// keys, with the row predicate pinned to `key_field = key_value`.
///
/// Stores execute this either by rendering it to a parameterized statement
/// ([`UpdateQuery::sql`] / [`UpdateQuery::params`]) or by applying the
/// assignments directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateQuery {
    pub table: String,
    /// Whitelist-validated (field, value) pairs
    pub assignments: Vec<(String, String)>,
    pub key_field: String,
    pub key_value: String,
}

impl UpdateQuery {
    /// Render to a `$n`-parameterized UPDATE statement. The key value is
    /// always the final placeholder.
    pub fn sql(&self) -> String {
        let assignments: Vec<String> = self
            .assignments
            .iter()
            .enumerate()
            .map(|(idx, (field, _))| format!("{field} = ${}", idx + 1))
            .collect();

        format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING *",
            self.table,
            assignments.join(", "),
            self.key_field,
            self.assignments.len() + 1,
        )
    }

    /// Bind values in placeholder order.
    pub fn params(&self) -> Vec<&str> {
        let mut params: Vec<&str> = self
            .assignments
            .iter()
            .map(|(_, value)| value.as_str())
            .collect();
        params.push(self.key_value.as_str());
        params
    }
}

/// Validate a change set against `whitelist` and build the update
/// operation for it.
///
/// Fails with `InvalidField` for any key outside the whitelist and with
/// `InvalidInput` for an empty change set or a non-string value; the
/// whitelist check runs first, before values are even inspected.
pub fn build_partial_update(
    table: &str,
    changes: &ChangeSet,
    key_field: &str,
    key_value: &str,
    whitelist: &[&str],
) -> Result<UpdateQuery> {
    if changes.is_empty() {
        return Err(DirectoryError::InvalidInput(
            "Nothing to update".to_string(),
        ));
    }

    for field in changes.keys() {
        if !whitelist.contains(&field.as_str()) {
            return Err(DirectoryError::InvalidField(field.clone()));
        }
    }

    let mut assignments = Vec::with_capacity(changes.len());
    for (field, value) in changes {
        let value = value.as_str().ok_or_else(|| {
            DirectoryError::InvalidInput(format!("Field '{field}' must be a string"))
        })?;
        assignments.push((field.clone(), value.to_string()));
    }

    Ok(UpdateQuery {
        table: table.to_string(),
        assignments,
        key_field: key_field.to_string(),
        key_value: key_value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn changes(pairs: &[(&str, Value)]) -> ChangeSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn builds_update_over_exactly_the_supplied_keys() {
        let set = changes(&[
            ("email", json!("new@example.com")),
            ("first_name", json!("Alice")),
        ]);

        let query =
            build_partial_update("users", &set, "username", "alice", UPDATABLE_FIELDS).unwrap();

        assert_eq!(
            query.sql(),
            "UPDATE users SET email = $1, first_name = $2 WHERE username = $3 RETURNING *"
        );
        assert_eq!(query.params(), vec!["new@example.com", "Alice", "alice"]);
    }

    #[test]
    fn rejects_fields_outside_the_whitelist() {
        for field in ["is_admin", "username", "password_hash", "no_such_column"] {
            let set = changes(&[(field, json!("x"))]);
            let err = build_partial_update("users", &set, "username", "alice", UPDATABLE_FIELDS)
                .unwrap_err();
            match err {
                DirectoryError::InvalidField(name) => assert_eq!(name, field),
                other => panic!("expected InvalidField, got {other:?}"),
            }
        }
    }

    #[test]
    fn whitelist_is_checked_before_value_types() {
        // A forbidden field with a non-string value is still an
        // InvalidField, not an InvalidInput.
        let set = changes(&[("is_admin", json!(true))]);
        let err =
            build_partial_update("users", &set, "username", "alice", UPDATABLE_FIELDS).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidField(_)));
    }

    #[test]
    fn empty_change_set_is_invalid_input() {
        let err = build_partial_update(
            "users",
            &ChangeSet::new(),
            "username",
            "alice",
            UPDATABLE_FIELDS,
        )
        .unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidInput(_)));
    }

    #[test]
    fn non_string_values_are_invalid_input() {
        let set = changes(&[("phone", json!(5550100))]);
        let err =
            build_partial_update("users", &set, "username", "alice", UPDATABLE_FIELDS).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidInput(_)));
    }

    #[test]
    fn values_are_bound_not_spliced() {
        let set = changes(&[("email", json!("'; DROP TABLE users; --"))]);
        let query =
            build_partial_update("users", &set, "username", "alice", UPDATABLE_FIELDS).unwrap();

        assert!(!query.sql().contains("DROP TABLE"));
        assert_eq!(query.params()[0], "'; DROP TABLE users; --");
    }
}
