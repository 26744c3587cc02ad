use serde::{Deserialize, Serialize};

use clientes_core::{CustomerId, DomainError, DomainResult, Entity};

/// A customer record.
///
/// The id is assigned by the store and never changes; names are replaced
/// wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "sobrenome")]
    pub last_name: String,
}

impl Customer {
    pub fn new(id: CustomerId, draft: CustomerDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
        }
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Customer names as they will be stored (surrounding whitespace removed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
}

impl CustomerDraft {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
        }
    }

    /// Build a draft for a new customer: both names must be non-blank.
    pub fn required(first_name: &str, last_name: &str) -> DomainResult<Self> {
        let draft = Self::new(first_name, last_name);
        if draft.first_name.is_empty() || draft.last_name.is_empty() {
            return Err(DomainError::validation("first and last name are required"));
        }
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn draft_trims_names() {
        let draft = CustomerDraft::new("  Carla ", "\tDias\n");
        assert_eq!(draft.first_name, "Carla");
        assert_eq!(draft.last_name, "Dias");
    }

    #[test]
    fn required_rejects_blank_names() {
        assert!(matches!(
            CustomerDraft::required("   ", "Dias"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            CustomerDraft::required("Carla", ""),
            Err(DomainError::Validation(_))
        ));
        assert!(CustomerDraft::required("Carla", "Dias").is_ok());
    }

    #[test]
    fn wire_format_uses_portuguese_field_names() {
        let customer = Customer::new(CustomerId::new(1), CustomerDraft::new("Ana", "Silva"));
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 1, "nome": "Ana", "sobrenome": "Silva" }));
        assert_eq!(customer.id(), &CustomerId::new(1));
    }

    proptest! {
        /// Property: a name made only of whitespace never passes validation,
        /// whatever the other name is.
        #[test]
        fn whitespace_only_names_are_never_accepted(
            blank in "[ \t\n]{0,8}",
            other in "[A-Za-z]{1,12}",
        ) {
            prop_assert!(CustomerDraft::required(&blank, &other).is_err());
            prop_assert!(CustomerDraft::required(&other, &blank).is_err());
            prop_assert!(CustomerDraft::required(&other, &other).is_ok());
        }
    }
}
