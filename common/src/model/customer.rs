use crate::model::UnknownLabel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Legal nature of a customer: private individual (CPF) or company (CNPJ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PersonKind {
    #[default]
    #[serde(rename = "Física")]
    Individual,
    #[serde(rename = "Jurídica")]
    Company,
}

impl PersonKind {
    pub fn label(&self) -> &'static str {
        match self {
            PersonKind::Individual => "Física",
            PersonKind::Company => "Jurídica",
        }
    }
}

impl fmt::Display for PersonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PersonKind {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Física" => Ok(PersonKind::Individual),
            "Jurídica" => Ok(PersonKind::Company),
            other => Err(UnknownLabel {
                kind: "person kind",
                value: other.to_string(),
            }),
        }
    }
}

/// A registered customer.
///
/// `customer_number` is a human-facing sequential number, distinct from the
/// row id. `name` is unique ignoring case and `tax_id` (CPF/CNPJ) is unique
/// when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub customer_number: i64,
    pub name: String,
    pub phone: Option<String>,
    pub person_kind: PersonKind,
    pub tax_id: Option<String>,
    pub referral_source: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub notes: Option<String>,
}

/// One autocomplete suggestion for the customer picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSuggestion {
    pub id: i64,
    pub label: String,
    pub value: String,
}

impl From<&Customer> for CustomerSuggestion {
    fn from(customer: &Customer) -> Self {
        CustomerSuggestion {
            id: customer.id,
            label: format!("{} ({})", customer.name, customer.customer_number),
            value: customer.name.clone(),
        }
    }
}
