//! Bilingual reference tables and keyword maintenance.

use crate::error::AppError;
use crate::models::{Keyword, KeywordParams, Lookup};
use sqlx::PgPool;

/// Reference tables served by the `all-*` routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupTable {
    Faculty,
    MemberType,
    OrgType,
    OrgScope,
    Keyword,
}

impl LookupTable {
    pub fn table_name(self) -> &'static str {
        match self {
            LookupTable::Faculty => "faculty",
            LookupTable::MemberType => "member_type",
            LookupTable::OrgType => "org_type",
            LookupTable::OrgScope => "org_scope",
            LookupTable::Keyword => "keyword",
        }
    }
}

pub struct LookupService;

impl LookupService {
    pub async fn list(pool: &PgPool, table: LookupTable) -> Result<Vec<Lookup>, AppError> {
        let sql = format!(
            "SELECT id, name_en, name_fr FROM {} ORDER BY name_en, id",
            table.table_name()
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as(&sql).fetch_all(pool).await?)
    }

    pub async fn register_keyword(pool: &PgPool, params: &KeywordParams) -> Result<Keyword, AppError> {
        let keyword: Keyword = sqlx::query_as(
            "INSERT INTO keyword (name_en, name_fr) VALUES ($1, $2) RETURNING id, name_en, name_fr",
        )
        .bind(&params.name_en)
        .bind(&params.name_fr)
        .fetch_one(pool)
        .await?;
        tracing::info!(keyword_id = keyword.id, "keyword registered");
        Ok(keyword)
    }

    pub async fn update_keyword(pool: &PgPool, id: i32, params: &KeywordParams) -> Result<Keyword, AppError> {
        let keyword: Option<Keyword> = sqlx::query_as(
            "UPDATE keyword SET name_en = $2, name_fr = $3 WHERE id = $1 RETURNING id, name_en, name_fr",
        )
        .bind(id)
        .bind(&params.name_en)
        .bind(&params.name_fr)
        .fetch_optional(pool)
        .await?;
        let keyword = keyword.ok_or_else(|| AppError::NotFound(format!("keyword {}", id)))?;
        tracing::info!(keyword_id = id, "keyword updated");
        Ok(keyword)
    }
}
