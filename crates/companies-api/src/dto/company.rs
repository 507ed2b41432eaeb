// ============================================================================
// Companies API - Company DTOs
// File: crates/companies-api/src/dto/company.rs
// ============================================================================

use serde::Deserialize;
use validator::{Validate, ValidationError};

use companies_core::{Company, CompanyPatch, CompanyType};
use companies_shared::utils::is_valid_uuid;

fn validate_uuid(id: &str) -> Result<(), ValidationError> {
    if is_valid_uuid(id) {
        Ok(())
    } else {
        Err(ValidationError::new("uuid"))
    }
}

/// Body of `POST /api/v1/secured/companies`
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(custom(function = "validate_uuid"))]
    pub id: String,

    #[validate(length(min = 1, max = 15))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 3000))]
    pub description: String,

    #[validate(required)]
    pub employees_amount: Option<i32>,

    #[validate(required)]
    pub registered: Option<bool>,

    #[serde(rename = "type")]
    #[validate(required)]
    pub company_type: Option<CompanyType>,
}

impl CreateCompanyRequest {
    /// Converts a validated request. Ids are stored lowercase so that path
    /// lookups, which are lowercased too, find them.
    pub fn into_domain(self) -> Option<Company> {
        Some(Company::new(
            self.id.to_lowercase(),
            self.name,
            self.description,
            self.employees_amount?,
            self.registered?,
            self.company_type?,
        ))
    }
}

/// Body of `PATCH /api/v1/secured/companies/{uuid}`. An empty `name` is
/// accepted and leaves the stored name unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(length(max = 15))]
    pub name: Option<String>,

    #[validate(length(max = 3000))]
    pub description: Option<String>,

    pub employees_amount: Option<i32>,

    pub registered: Option<bool>,

    #[serde(rename = "type")]
    pub company_type: Option<CompanyType>,
}

impl UpdateCompanyRequest {
    pub fn into_patch(self, id: String) -> CompanyPatch {
        CompanyPatch {
            id,
            name: self.name,
            description: self.description,
            employees_amount: self.employees_amount,
            registered: self.registered,
            company_type: self.company_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ID: &str = "6f9619ff-8b86-d011-b42d-00c04fc964ff";

    fn create(value: serde_json::Value) -> CreateCompanyRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_create_request() {
        let req = create(json!({
            "id": ID.to_uppercase(),
            "name": "Acme",
            "employees_amount": 10,
            "registered": false,
            "type": "Sole Proprietorship"
        }));
        assert!(req.validate().is_ok());

        let company = req.into_domain().unwrap();
        assert_eq!(company.id, ID);
        assert_eq!(company.description, "");
        assert_eq!(company.company_type, CompanyType::SoleProprietorship);
    }

    #[test]
    fn test_create_rejects_bad_fields() {
        let base = json!({
            "id": ID,
            "name": "Acme",
            "employees_amount": 10,
            "registered": true,
            "type": "Cooperative"
        });

        let mut bad_id = base.clone();
        bad_id["id"] = json!("not-a-uuid");
        assert!(create(bad_id).validate().is_err());

        let mut long_name = base.clone();
        long_name["name"] = json!("a".repeat(16));
        assert!(create(long_name).validate().is_err());

        let mut empty_name = base.clone();
        empty_name["name"] = json!("");
        assert!(create(empty_name).validate().is_err());

        let mut long_description = base.clone();
        long_description["description"] = json!("d".repeat(3001));
        assert!(create(long_description).validate().is_err());

        let mut missing_amount = base.clone();
        missing_amount.as_object_mut().unwrap().remove("employees_amount");
        assert!(create(missing_amount).validate().is_err());
    }

    #[test]
    fn test_create_rejects_non_hyphenated_ids() {
        for id in [
            format!("{{{}}}", ID),
            format!("urn:uuid:{}", ID),
            ID.replace('-', ""),
        ] {
            let req = create(json!({
                "id": id,
                "name": "Acme",
                "employees_amount": 1,
                "registered": true,
                "type": "Cooperative"
            }));
            assert!(req.validate().is_err(), "{} accepted", id);
        }
    }

    #[test]
    fn test_name_length_counts_characters() {
        let req = create(json!({
            "id": ID,
            "name": "ÄÖÜäöüÄÖÜäöüÄÖÜ",
            "employees_amount": 1,
            "registered": true,
            "type": "NonProfit"
        }));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_unknown_type_fails_to_parse() {
        let result = serde_json::from_value::<CreateCompanyRequest>(json!({
            "id": ID,
            "name": "Acme",
            "employees_amount": 1,
            "registered": true,
            "type": "Partnership"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_allows_empty_name_and_maps_to_patch() {
        let req: UpdateCompanyRequest =
            serde_json::from_value(json!({"name": "", "employees_amount": 0})).unwrap();
        assert!(req.validate().is_ok());

        let patch = req.into_patch(ID.to_string());
        assert_eq!(patch.id, ID);
        assert_eq!(patch.name.as_deref(), Some(""));
        assert_eq!(patch.employees_amount, Some(0));
        assert!(patch.description.is_none());
    }

    #[test]
    fn test_update_rejects_long_name() {
        let req = UpdateCompanyRequest {
            name: Some("n".repeat(16)),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
