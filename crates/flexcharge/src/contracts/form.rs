//! Form error reporting for contract create/update.

use serde_json::Value;

use crate::http::{FieldErrorNode, FieldErrorTree};

/// Fallback for fields without a translation and unrecognized error shapes.
const GENERIC_ERROR: &str = "Something is wrong";

/// Collects named field errors from a rejected contract submission.
///
/// The billing API reports per-field validation errors; reconciliation
/// maps them onto this object using a fixed field-to-message-code table
/// so the caller can surface them next to its own form fields.
#[derive(Debug, Clone, Default)]
pub struct ContractForm {
    errors: Vec<String>,
}

impl ContractForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error message code.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Returns the recorded error message codes.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// True iff no errors have been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors joined into one newline-separated string.
    pub fn combined(&self) -> String {
        self.errors.join("\n")
    }
}

/// Translation table from API field names to frontend message codes.
fn field_error_code(field: &str) -> Option<&'static str> {
    match field {
        "company" => Some("flexcharge_company_error"),
        "first_name" => Some("flexcharge_first_name_error"),
        "last_name" => Some("flexcharge_last_name_error"),
        "zip_code" => Some("flexcharge_zip_code_error"),
        "city" => Some("flexcharge_city_error"),
        "phone_number" => Some("flexcharge_phone_number_error"),
        "email" => Some("flexcharge_email_error"),
        "country" => Some("flexcharge_country_error"),
        _ => None,
    }
}

/// Map a rejected submission's `errors` payload onto the form.
///
/// Recognized shape: `{"children": {"<field>": {"errors": [...]}}}`. Each
/// field with at least one reported error contributes one message code;
/// fields outside the translation table and payloads without the expected
/// structure degrade to the generic error.
pub(crate) fn apply_field_errors(form: &mut ContractForm, errors: Option<&Value>) {
    let tree = errors.and_then(|v| serde_json::from_value::<FieldErrorTree>(v.clone()).ok());

    match tree {
        Some(tree) => {
            for (field, raw) in &tree.children {
                let Ok(node) = serde_json::from_value::<FieldErrorNode>(raw.clone()) else {
                    continue;
                };
                if !node.errors.is_empty() {
                    form.add_error(field_error_code(field).unwrap_or(GENERIC_ERROR));
                }
            }
        }
        None => form.add_error(GENERIC_ERROR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_known_fields_through_the_table() {
        let mut form = ContractForm::new();
        let errors = json!({
            "children": {
                "email": {"errors": ["invalid"]},
                "city": {"errors": ["required"]}
            }
        });
        apply_field_errors(&mut form, Some(&errors));

        assert_eq!(
            form.errors(),
            ["flexcharge_city_error", "flexcharge_email_error"]
        );
    }

    #[test]
    fn unknown_field_gets_the_generic_message() {
        let mut form = ContractForm::new();
        let errors = json!({"children": {"tax_id": {"errors": ["invalid"]}}});
        apply_field_errors(&mut form, Some(&errors));

        assert_eq!(form.errors(), [GENERIC_ERROR]);
    }

    #[test]
    fn fields_without_errors_are_skipped() {
        let mut form = ContractForm::new();
        let errors = json!({
            "children": {
                "email": {"errors": []},
                "city": "not-an-object"
            }
        });
        apply_field_errors(&mut form, Some(&errors));

        assert!(form.is_empty());
    }

    #[test]
    fn unrecognized_shape_degrades_to_one_generic_error() {
        let mut form = ContractForm::new();
        apply_field_errors(&mut form, Some(&json!(["flat", "list"])));
        assert_eq!(form.errors(), [GENERIC_ERROR]);

        let mut form = ContractForm::new();
        apply_field_errors(&mut form, None);
        assert_eq!(form.errors(), [GENERIC_ERROR]);
    }

    #[test]
    fn combined_joins_with_newlines() {
        let mut form = ContractForm::new();
        form.add_error("a");
        form.add_error("b");
        assert_eq!(form.combined(), "a\nb");
    }
}
