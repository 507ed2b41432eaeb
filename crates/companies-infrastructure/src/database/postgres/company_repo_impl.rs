// ============================================================================
// Companies Infrastructure - PostgreSQL Company Repository
// File: crates/companies-infrastructure/src/database/postgres/company_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info};

use companies_core::domain::patch::{
    build_update, COLUMN_DESCRIPTION, COLUMN_EMPLOYEES_AMOUNT, COLUMN_NAME, COLUMN_REGISTERED,
    COLUMN_TYPE, COLUMN_UPDATED_AT,
};
use companies_core::domain::{Company, CompanyPatch};
use companies_core::error::DomainError;
use companies_core::repositories::CompanyRepository;

pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct CompanyRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub employees_amount: i32,
    pub registered: bool,
    #[sqlx(rename = "type")]
    pub company_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<CompanyRow> for Company {
    type Error = DomainError;

    fn try_from(row: CompanyRow) -> Result<Self, Self::Error> {
        Ok(Company {
            id: row.id,
            name: row.name,
            description: row.description,
            employees_amount: row.employees_amount,
            registered: row.registered,
            company_type: row.company_type.parse()?,
            created_at: Some(row.created_at),
            updated_at: row.updated_at,
        })
    }
}

fn database_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(format!("{}: {}", context, e))
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn create_company(&self, company: &Company) -> Result<(), DomainError> {
        debug!(
            id = %company.id,
            name = %company.name,
            employees_amount = company.employees_amount,
            registered = company.registered,
            company_type = %company.company_type,
            "PgCompanyRepository.create_company"
        );

        sqlx::query(
            r#"
            INSERT INTO companies (id, name, description, employees_amount, registered, type)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&company.id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.employees_amount)
        .bind(company.registered)
        .bind(company.company_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("inserting company", e))?;

        info!("Company created: {}", company.id);
        Ok(())
    }

    async fn update_company(&self, patch: &CompanyPatch) -> Result<u64, DomainError> {
        let (update, fields) = build_update(patch, Utc::now());
        debug!(id = %update.id, fields = ?fields, "PgCompanyRepository.update_company");

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE companies SET ");
        {
            let mut set = query.separated(", ");
            for field in &fields {
                set.push(format!("\"{}\" = ", field));
                match *field {
                    COLUMN_UPDATED_AT => set.push_bind_unseparated(update.updated_at),
                    COLUMN_NAME => set.push_bind_unseparated(update.name.clone()),
                    COLUMN_DESCRIPTION => set.push_bind_unseparated(update.description.clone()),
                    COLUMN_EMPLOYEES_AMOUNT => set.push_bind_unseparated(update.employees_amount),
                    COLUMN_REGISTERED => set.push_bind_unseparated(update.registered),
                    COLUMN_TYPE => set.push_bind_unseparated(update.company_type.map(|t| t.as_str())),
                    other => {
                        return Err(DomainError::InternalError(format!("unknown column: {}", other)));
                    }
                };
            }
        }
        query.push(" WHERE id = ").push_bind(update.id.clone());

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("updating company", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_company(&self, id: &str) -> Result<u64, DomainError> {
        debug!(id = %id, "PgCompanyRepository.delete_company");

        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("deleting company", e))?;

        Ok(result.rows_affected())
    }

    async fn get_company(&self, id: &str) -> Result<Option<Company>, DomainError> {
        debug!(id = %id, "PgCompanyRepository.get_company");

        let row: Option<CompanyRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, description, employees_amount, registered, type,
                created_at, updated_at
            FROM companies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("selecting company", e))?;

        row.map(Company::try_from).transpose()
    }
}
