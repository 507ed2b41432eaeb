// ============================================================================
// Companies Core - Company Entity
// File: crates/companies-core/src/domain/company.rs
// Description: Company entity, company type and sparse patch
// ============================================================================

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Legal form of a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    Corporations,
    NonProfit,
    Cooperative,
    #[serde(rename = "Sole Proprietorship")]
    SoleProprietorship,
}

impl CompanyType {
    pub const ALL: [CompanyType; 4] = [
        CompanyType::Corporations,
        CompanyType::NonProfit,
        CompanyType::Cooperative,
        CompanyType::SoleProprietorship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Corporations => "Corporations",
            CompanyType::NonProfit => "NonProfit",
            CompanyType::Cooperative => "Cooperative",
            CompanyType::SoleProprietorship => "Sole Proprietorship",
        }
    }
}

impl FromStr for CompanyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompanyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::ValidationError(format!("unknown company type: {}", s)))
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Company entity
///
/// `id` is assigned by the caller and never changes. The audit timestamps are
/// owned by storage and stay `None` until the company has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub description: String,
    pub employees_amount: i32,
    pub registered: bool,
    #[serde(rename = "type")]
    pub company_type: CompanyType,

    // Audit fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Company {
    pub fn new(
        id: String,
        name: String,
        description: String,
        employees_amount: i32,
        registered: bool,
        company_type: CompanyType,
    ) -> Self {
        Self {
            id,
            name,
            description,
            employees_amount,
            registered,
            company_type,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Sparse update of a company. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees_amount: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered: Option<bool>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub company_type: Option<CompanyType>,
}

impl CompanyPatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_type_wire_names() {
        let json = serde_json::to_string(&CompanyType::SoleProprietorship).unwrap();
        assert_eq!(json, "\"Sole Proprietorship\"");

        let parsed: CompanyType = serde_json::from_str("\"NonProfit\"").unwrap();
        assert_eq!(parsed, CompanyType::NonProfit);

        assert!(serde_json::from_str::<CompanyType>("\"Partnership\"").is_err());
    }

    #[test]
    fn test_company_type_from_str_matches_as_str() {
        for t in CompanyType::ALL {
            assert_eq!(t.as_str().parse::<CompanyType>().unwrap(), t);
        }
        assert!("cooperative".parse::<CompanyType>().is_err());
    }

    #[test]
    fn test_company_json_omits_unset_audit_fields() {
        let company = Company::new(
            "u1".to_string(),
            "Acme".to_string(),
            String::new(),
            17,
            true,
            CompanyType::Cooperative,
        );
        let value = serde_json::to_value(&company).unwrap();

        assert_eq!(value["type"], "Cooperative");
        assert_eq!(value["employees_amount"], 17);
        assert!(value.get("created_at").is_none());
        assert!(value.get("updated_at").is_none());
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let mut patch = CompanyPatch::new("u1");
        patch.description = Some(String::new());

        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(value["description"], "");
    }
}
