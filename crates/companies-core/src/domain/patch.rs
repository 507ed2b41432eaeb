//! Patch builder: turns a sparse [`CompanyPatch`] into the columns to write.

use chrono::{DateTime, Utc};

use super::company::{CompanyPatch, CompanyType};

pub const COLUMN_UPDATED_AT: &str = "updated_at";
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_DESCRIPTION: &str = "description";
pub const COLUMN_EMPLOYEES_AMOUNT: &str = "employees_amount";
pub const COLUMN_REGISTERED: &str = "registered";
pub const COLUMN_TYPE: &str = "type";

/// Storage-ready update record. Only the fields listed by [`build_update`]
/// carry meaning; the rest stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyUpdate {
    pub id: String,
    pub updated_at: DateTime<Utc>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub employees_amount: Option<i32>,
    pub registered: Option<bool>,
    pub company_type: Option<CompanyType>,
}

impl CompanyUpdate {
    fn new(id: String, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            updated_at,
            name: None,
            description: None,
            employees_amount: None,
            registered: None,
            company_type: None,
        }
    }
}

/// Builds the update record and the ordered column list for `patch`.
///
/// The list always starts with `updated_at` and then follows declaration
/// order (name, description, employees_amount, registered, type), so
/// statements can be built positionally from it. An empty `name` counts as
/// absent; every other present value is written as given.
pub fn build_update(patch: &CompanyPatch, now: DateTime<Utc>) -> (CompanyUpdate, Vec<&'static str>) {
    let mut record = CompanyUpdate::new(patch.id.clone(), now);
    let mut fields = vec![COLUMN_UPDATED_AT];

    if let Some(name) = patch.name.as_ref().filter(|n| !n.is_empty()) {
        record.name = Some(name.clone());
        fields.push(COLUMN_NAME);
    }
    if let Some(description) = &patch.description {
        record.description = Some(description.clone());
        fields.push(COLUMN_DESCRIPTION);
    }
    if let Some(amount) = patch.employees_amount {
        record.employees_amount = Some(amount);
        fields.push(COLUMN_EMPLOYEES_AMOUNT);
    }
    if let Some(registered) = patch.registered {
        record.registered = Some(registered);
        fields.push(COLUMN_REGISTERED);
    }
    if let Some(company_type) = patch.company_type {
        record.company_type = Some(company_type);
        fields.push(COLUMN_TYPE);
    }

    (record, fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_empty_patch_only_touches_updated_at() {
        let at = now();
        let (record, fields) = build_update(&CompanyPatch::new("u1"), at);

        assert_eq!(fields, vec!["updated_at"]);
        assert_eq!(record.updated_at, at);
        assert_eq!(record.id, "u1");
        assert!(record.name.is_none());
        assert!(record.company_type.is_none());
    }

    #[test]
    fn test_empty_name_is_treated_as_absent() {
        let mut patch = CompanyPatch::new("u1");
        patch.name = Some(String::new());

        let (record, fields) = build_update(&patch, now());

        assert_eq!(fields, vec!["updated_at"]);
        assert!(record.name.is_none());
    }

    #[test]
    fn test_name_lands_second() {
        let mut patch = CompanyPatch::new("u1");
        patch.name = Some("X".to_string());

        let (record, fields) = build_update(&patch, now());

        assert_eq!(fields, vec!["updated_at", "name"]);
        assert_eq!(record.name.as_deref(), Some("X"));
    }

    #[test]
    fn test_empty_description_is_written() {
        let mut patch = CompanyPatch::new("u1");
        patch.description = Some(String::new());

        let (record, fields) = build_update(&patch, now());

        assert_eq!(fields, vec!["updated_at", "description"]);
        assert_eq!(record.description.as_deref(), Some(""));
    }

    #[test]
    fn test_zero_values_are_written() {
        let mut patch = CompanyPatch::new("u1");
        patch.employees_amount = Some(0);
        patch.registered = Some(false);

        let (record, fields) = build_update(&patch, now());

        assert_eq!(fields, vec!["updated_at", "employees_amount", "registered"]);
        assert_eq!(record.employees_amount, Some(0));
        assert_eq!(record.registered, Some(false));
    }

    #[test]
    fn test_declaration_order_for_every_combination() {
        let order = ["name", "description", "employees_amount", "registered", "type"];

        for mask in 0u8..32 {
            // Set fields back to front so assignment order never matches column order.
            let mut patch = CompanyPatch::new("u1");
            if mask & 0b10000 != 0 {
                patch.company_type = Some(CompanyType::NonProfit);
            }
            if mask & 0b01000 != 0 {
                patch.registered = Some(true);
            }
            if mask & 0b00100 != 0 {
                patch.employees_amount = Some(42);
            }
            if mask & 0b00010 != 0 {
                patch.description = Some("desc".to_string());
            }
            if mask & 0b00001 != 0 {
                patch.name = Some("Acme".to_string());
            }

            let (_, fields) = build_update(&patch, now());

            let expected: Vec<&str> = std::iter::once("updated_at")
                .chain(
                    order
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| mask & (1 << i) != 0)
                        .map(|(_, c)| *c),
                )
                .collect();
            assert_eq!(fields, expected, "mask {:05b}", mask);
        }
    }
}
