//! Youth organization repository

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{parse_timestamp, OrganizationFields, YouthOrganization};

#[derive(Debug, sqlx::FromRow)]
struct YouthOrganizationRow {
    id: i64,
    number: i64,
    municipality: String,
    educational_institution: String,
    organization_name: String,
    contact_details: String,
    participants_count: i64,
    activity_direction: String,
    local_act_details: String,
    website_url: Option<String>,
    created_at: String,
    updated_at: String,
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, number, municipality, educational_institution, organization_name,
           contact_details, participants_count, activity_direction, local_act_details,
           website_url, created_at, updated_at
    FROM youth_organizations
"#;

pub struct YouthOrganizationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> YouthOrganizationRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All records, ordered by their display number
    pub async fn list(&self) -> Result<Vec<YouthOrganization>> {
        let rows = sqlx::query_as::<_, YouthOrganizationRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY number ASC, id ASC"
        ))
        .fetch_all(self.pool)
        .await
        .context("Failed to list youth organizations")?;

        Ok(rows.into_iter().map(row_to_organization).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<YouthOrganization>> {
        let row = sqlx::query_as::<_, YouthOrganizationRow>(&format!(
            "{SELECT_COLUMNS} WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .context("Failed to get youth organization")?;

        Ok(row.map(row_to_organization))
    }

    pub async fn create(&self, fields: &OrganizationFields) -> Result<YouthOrganization> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO youth_organizations (
                number, municipality, educational_institution, organization_name,
                contact_details, participants_count, activity_direction,
                local_act_details, website_url, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(fields.number)
        .bind(&fields.municipality)
        .bind(&fields.educational_institution)
        .bind(&fields.organization_name)
        .bind(&fields.contact_details)
        .bind(fields.participants_count)
        .bind(&fields.activity_direction)
        .bind(&fields.local_act_details)
        .bind(&fields.website_url)
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await
        .context("Failed to create youth organization")?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .context("Failed to retrieve created youth organization")
    }

    /// Overwrite every field of an existing record; `None` when it does not exist
    pub async fn update(
        &self,
        id: i64,
        fields: &OrganizationFields,
    ) -> Result<Option<YouthOrganization>> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE youth_organizations
            SET number = ?, municipality = ?, educational_institution = ?,
                organization_name = ?, contact_details = ?, participants_count = ?,
                activity_direction = ?, local_act_details = ?, website_url = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(fields.number)
        .bind(&fields.municipality)
        .bind(&fields.educational_institution)
        .bind(&fields.organization_name)
        .bind(&fields.contact_details)
        .bind(fields.participants_count)
        .bind(&fields.activity_direction)
        .bind(&fields.local_act_details)
        .bind(&fields.website_url)
        .bind(&now)
        .bind(id)
        .execute(self.pool)
        .await
        .context("Failed to update youth organization")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM youth_organizations WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .context("Failed to delete youth organization")?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_organization(row: YouthOrganizationRow) -> YouthOrganization {
    YouthOrganization {
        id: Some(row.id),
        fields: OrganizationFields {
            number: row.number,
            municipality: row.municipality,
            educational_institution: row.educational_institution,
            organization_name: row.organization_name,
            contact_details: row.contact_details,
            participants_count: row.participants_count,
            activity_direction: row.activity_direction,
            local_act_details: row.local_act_details,
            website_url: row.website_url.unwrap_or_default(),
        },
        created_at: parse_timestamp(&row.created_at),
        updated_at: parse_timestamp(&row.updated_at),
    }
}
