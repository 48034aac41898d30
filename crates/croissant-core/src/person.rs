use std::fmt;

use serde::{Deserialize, Serialize};

/// Someone whose missed submissions are tracked.
///
/// The ledger only cares about identity and display; everything else about
/// a person (mail delivery, screens) lives outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Person {
    /// First name, also the primary sort key.
    pub first_name: String,
    pub last_name: String,
    /// Stable identifier, usually derived from the name.
    pub perso_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Person {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        perso_id: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            perso_id: perso_id.into(),
            email,
        }
    }

    /// Identifier derived from the name: `first.last`, lowercased, with
    /// inner whitespace removed.
    pub fn derive_id(first_name: &str, last_name: &str) -> String {
        let squash = |s: &str| {
            s.chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase()
        };
        format!("{}.{}", squash(first_name), squash(last_name))
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_full_name() {
        let p = Person::new("Ada", "Lovelace", "ada.lovelace", None);
        assert_eq!(p.to_string(), "Ada Lovelace");
    }

    #[test]
    fn derive_id_lowercases_and_squashes() {
        assert_eq!(Person::derive_id("Jean Pierre", "De La Cour"), "jeanpierre.delacour");
    }

    #[test]
    fn orders_by_first_name_first() {
        let a = Person::new("Ada", "Zuse", "ada.zuse", None);
        let b = Person::new("Blaise", "Pascal", "blaise.pascal", None);
        assert!(a < b);
    }

    #[test]
    fn missing_email_deserializes_as_none() {
        let p: Person = serde_json::from_str(
            r#"{"first_name":"Ada","last_name":"Lovelace","perso_id":"ada.lovelace"}"#,
        )
        .unwrap();
        assert_eq!(p.email, None);
    }
}
