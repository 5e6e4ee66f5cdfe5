// src/policy.rs

//! Who may update apartment rows.
//!
//! The same allow-list is enforced by the web server against the local store
//! and rendered into the row-level-security policy of the hosted database.

const UPDATE_POLICY_TEMPLATE: &str = include_str!("../sql/policies/apartments_update.sql");
const EDITORS_PLACEHOLDER: &str = "{{editors}}";

/// Fixed set of email identities allowed to mutate apartments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorAllowList {
    emails: Vec<String>,
}

impl EditorAllowList {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for email in emails {
            let email = email.as_ref().trim().to_lowercase();
            if !email.is_empty() && !out.contains(&email) {
                out.push(email);
            }
        }
        Self { emails: out }
    }

    /// Parse a comma-separated list such as `APARTMENT_EDITORS`.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn permits(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.emails.iter().any(|e| *e == email)
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn editors_array(list: &EditorAllowList) -> String {
    if list.is_empty() {
        return "ARRAY[]::text[]".to_string();
    }
    let items: Vec<String> = list.emails().iter().map(|e| quote_literal(e)).collect();
    format!("ARRAY[{}]::text[]", items.join(", "))
}

/// Render the update-policy migration for `list`.
pub fn render_update_policy(list: &EditorAllowList) -> String {
    UPDATE_POLICY_TEMPLATE.replace(EDITORS_PLACEHOLDER, &editors_array(list))
}
