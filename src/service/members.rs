//! Member profile reads and per-section updates (public, private, insight).

use crate::error::AppError;
use crate::models::{
    Keyword, MemberInsight, MemberPrivateInfo, MemberPublicInfo, Problem, UpdateMemberInsightParams,
    UpdateMemberPrivateParams, UpdateMemberPublicParams,
};
use crate::service::validation::blank_to_none;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;

const PUBLIC_SELECT: &str = r#"
    SELECT m.id, a.id AS account_id,
           COALESCE(a.first_name, '') AS first_name, COALESCE(a.last_name, '') AS last_name,
           m.about_me, m.work_email, m.work_phone, m.website,
           m.faculty_id, m.member_type_id, m.is_active
    FROM member m
    LEFT JOIN account a ON a.member_id = m.id
"#;

const PRIVATE_COLUMNS: &str =
    "id, address, city, province, country, postal_code, mobile_phone, date_joined, is_active, last_active";

pub struct MemberService;

impl MemberService {
    /// Public profiles, with keywords and problems batch-loaded. Inactive members are hidden unless requested.
    pub async fn list_public(pool: &PgPool, include_inactive: bool) -> Result<Vec<MemberPublicInfo>, AppError> {
        let sql = format!(
            "{} WHERE ($1 OR m.is_active) ORDER BY a.last_name, a.first_name, m.id",
            PUBLIC_SELECT
        );
        tracing::debug!(sql = %sql, include_inactive, "query");
        let mut members: Vec<MemberPublicInfo> = sqlx::query_as(&sql)
            .bind(include_inactive)
            .fetch_all(pool)
            .await?;
        let ids: Vec<i32> = members.iter().map(|m| m.id).collect();
        let mut keywords = Self::keywords_for(pool, &ids).await?;
        let mut problems = Self::problems_for(pool, &ids).await?;
        for m in &mut members {
            m.keywords = keywords.remove(&m.id).unwrap_or_default();
            m.problems = problems.remove(&m.id).unwrap_or_default();
        }
        Ok(members)
    }

    pub async fn public_info(pool: &PgPool, id: i32) -> Result<MemberPublicInfo, AppError> {
        let sql = format!("{} WHERE m.id = $1", PUBLIC_SELECT);
        tracing::debug!(sql = %sql, id, "query");
        let mut member: MemberPublicInfo = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("member {}", id)))?;
        member.keywords = Self::keywords_for(pool, &[id]).await?.remove(&id).unwrap_or_default();
        member.problems = Self::problems_for(pool, &[id]).await?.remove(&id).unwrap_or_default();
        Ok(member)
    }

    pub async fn private_info(pool: &PgPool, id: i32) -> Result<MemberPrivateInfo, AppError> {
        let sql = format!("SELECT {} FROM member WHERE id = $1", PRIVATE_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("member {}", id)))
    }

    pub async fn insight(pool: &PgPool, id: i32) -> Result<MemberInsight, AppError> {
        sqlx::query_as("SELECT id, notes FROM member WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("member {}", id)))
    }

    /// Write only the fields present in `params`; keywords and problems are applied as set operations.
    pub async fn update_public(
        pool: &PgPool,
        id: i32,
        params: UpdateMemberPublicParams,
    ) -> Result<MemberPublicInfo, AppError> {
        let mut tx = pool.begin().await?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE member SET id = id");
        for (column, value) in [
            ("about_me", params.about_me),
            ("work_email", params.work_email.map(|e| e.trim().to_lowercase())),
            ("work_phone", params.work_phone),
            ("website", params.website),
        ] {
            if let Some(v) = value {
                qb.push(format!(", {} = ", column));
                qb.push_bind(blank_to_none(Some(v)));
            }
        }
        for (column, value) in [
            ("faculty_id", params.faculty_id),
            ("member_type_id", params.member_type_id),
        ] {
            if let Some(v) = value {
                qb.push(format!(", {} = ", column));
                qb.push_bind(v);
            }
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" RETURNING id");
        tracing::debug!(sql = %qb.sql(), id, "query (tx)");
        let updated = qb.build_query_as::<(i32,)>().fetch_optional(&mut *tx).await?;
        updated.ok_or_else(|| AppError::NotFound(format!("member {}", id)))?;

        if !params.remove_keywords.is_empty() {
            sqlx::query("DELETE FROM member_keyword WHERE member_id = $1 AND keyword_id = ANY($2)")
                .bind(id)
                .bind(&params.remove_keywords)
                .execute(&mut *tx)
                .await?;
        }
        if !params.add_keywords.is_empty() {
            sqlx::query(
                "INSERT INTO member_keyword (member_id, keyword_id) \
                 SELECT $1, k FROM UNNEST($2::int[]) AS k ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(&params.add_keywords)
            .execute(&mut *tx)
            .await?;
        }
        if let Some(problems) = params.problems {
            sqlx::query("DELETE FROM problem WHERE member_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for p in &problems {
                sqlx::query("INSERT INTO problem (member_id, name_en, name_fr) VALUES ($1, $2, $3)")
                    .bind(id)
                    .bind(p.name_en.trim())
                    .bind(p.name_fr.trim())
                    .execute(&mut *tx)
                    .await?;
            }
        }
        tx.commit().await?;
        tracing::info!(member_id = id, "public profile updated");
        Self::public_info(pool, id).await
    }

    /// Text fields are overwritten; `activate`/`deactivate` flip the status and stamp `last_active` on deactivation.
    pub async fn update_private(
        pool: &PgPool,
        id: i32,
        params: UpdateMemberPrivateParams,
    ) -> Result<MemberPrivateInfo, AppError> {
        let sql = format!(
            r#"
            UPDATE member SET
                address = $2, city = $3, province = $4, country = $5, postal_code = $6,
                mobile_phone = $7, date_joined = $8,
                is_active = CASE WHEN $9 THEN TRUE WHEN $10 THEN FALSE ELSE is_active END,
                last_active = CASE WHEN $10 THEN NOW() ELSE last_active END
            WHERE id = $1
            RETURNING {}
            "#,
            PRIVATE_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<MemberPrivateInfo> = sqlx::query_as(&sql)
            .bind(id)
            .bind(blank_to_none(params.address))
            .bind(blank_to_none(params.city))
            .bind(blank_to_none(params.province))
            .bind(blank_to_none(params.country))
            .bind(blank_to_none(params.postal_code))
            .bind(blank_to_none(params.mobile_phone))
            .bind(params.date_joined)
            .bind(params.activate)
            .bind(params.deactivate)
            .fetch_optional(pool)
            .await?;
        let row = row.ok_or_else(|| AppError::NotFound(format!("member {}", id)))?;
        tracing::info!(
            member_id = id,
            activated = params.activate,
            deactivated = params.deactivate,
            "private profile updated"
        );
        Ok(row)
    }

    pub async fn update_insight(
        pool: &PgPool,
        id: i32,
        params: UpdateMemberInsightParams,
    ) -> Result<MemberInsight, AppError> {
        let row: Option<MemberInsight> =
            sqlx::query_as("UPDATE member SET notes = $2 WHERE id = $1 RETURNING id, notes")
                .bind(id)
                .bind(blank_to_none(params.notes))
                .fetch_optional(pool)
                .await?;
        let row = row.ok_or_else(|| AppError::NotFound(format!("member {}", id)))?;
        tracing::info!(member_id = id, "insight updated");
        Ok(row)
    }

    async fn keywords_for(pool: &PgPool, member_ids: &[i32]) -> Result<HashMap<i32, Vec<Keyword>>, AppError> {
        if member_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(i32, i32, String, String)> = sqlx::query_as(
            "SELECT mk.member_id, k.id, k.name_en, k.name_fr \
             FROM member_keyword mk JOIN keyword k ON k.id = mk.keyword_id \
             WHERE mk.member_id = ANY($1) ORDER BY k.name_en",
        )
        .bind(member_ids)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().fold(HashMap::new(), |mut m, (member_id, id, name_en, name_fr)| {
            m.entry(member_id)
                .or_insert_with(Vec::new)
                .push(Keyword { id, name_en, name_fr });
            m
        }))
    }

    async fn problems_for(pool: &PgPool, member_ids: &[i32]) -> Result<HashMap<i32, Vec<Problem>>, AppError> {
        if member_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(i32, String, String)> = sqlx::query_as(
            "SELECT member_id, name_en, name_fr FROM problem WHERE member_id = ANY($1) ORDER BY id",
        )
        .bind(member_ids)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().fold(HashMap::new(), |mut m, (member_id, name_en, name_fr)| {
            m.entry(member_id)
                .or_insert_with(Vec::new)
                .push(Problem { name_en, name_fr });
            m
        }))
    }
}
