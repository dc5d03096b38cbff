/// AreaStore implementation for PostgreSQL
///
/// Bulk reorder and participant replacement each run inside a single
/// transaction so concurrent writers cannot interleave half-applied
/// sets.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::area::{Area, AreaOrder, CreateArea, UpdateArea};
use crate::models::responsibility::{CreateResponsibility, Responsibility};
use crate::store::{AreaStore, StoreError};

use super::PgStore;

const AREA_COLUMNS: &str = "id, project_id, name, description, lead_id, display_order, \
                            created_at, updated_at";

impl PgStore {
    async fn enrich_area(&self, mut area: Area) -> Result<Area, StoreError> {
        area.participant_ids = self.area_participant_ids(area.id).await?;
        Ok(area)
    }
}

#[async_trait]
impl AreaStore for PgStore {
    async fn create_area(&self, data: CreateArea) -> Result<Area, StoreError> {
        let mut tx = self.pool.begin().await?;

        let area = sqlx::query_as::<_, Area>(&format!(
            r#"
            INSERT INTO areas (project_id, name, description, lead_id, display_order)
            VALUES ($1, $2, $3, $4,
                    (SELECT COALESCE(MAX(display_order), 0) + 1 FROM areas WHERE project_id = $1))
            RETURNING {AREA_COLUMNS}
            "#,
        ))
        .bind(data.project_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.lead_id)
        .fetch_one(&mut *tx)
        .await?;

        for user_id in &data.participant_ids {
            sqlx::query(
                "INSERT INTO area_participants (area_id, user_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(area.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.enrich_area(area).await
    }

    async fn get_area(&self, id: Uuid) -> Result<Option<Area>, StoreError> {
        let area = sqlx::query_as::<_, Area>(&format!(
            "SELECT {AREA_COLUMNS} FROM areas WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match area {
            Some(a) => Ok(Some(self.enrich_area(a).await?)),
            None => Ok(None),
        }
    }

    async fn list_areas(&self, project_id: Uuid) -> Result<Vec<Area>, StoreError> {
        let areas = sqlx::query_as::<_, Area>(&format!(
            "SELECT {AREA_COLUMNS} FROM areas WHERE project_id = $1 \
             ORDER BY display_order, created_at",
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        futures::future::try_join_all(areas.into_iter().map(|a| self.enrich_area(a))).await
    }

    async fn update_area(&self, id: Uuid, data: UpdateArea) -> Result<Option<Area>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let area = sqlx::query_as::<_, Area>(&format!(
            r#"
            UPDATE areas SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                lead_id = COALESCE($4, lead_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {AREA_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.lead_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(area) = area else {
            return Ok(None);
        };

        if let Some(participant_ids) = &data.participant_ids {
            sqlx::query("DELETE FROM area_participants WHERE area_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for user_id in participant_ids {
                sqlx::query(
                    "INSERT INTO area_participants (area_id, user_id) VALUES ($1, $2) \
                     ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(Some(self.enrich_area(area).await?))
    }

    async fn delete_area(&self, id: Uuid) -> Result<bool, StoreError> {
        // tasks pointing here are detached by ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM areas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reorder_areas(&self, orders: &[AreaOrder]) -> Result<Vec<Area>, StoreError> {
        let mut tx = self.pool.begin().await?;

        for entry in orders {
            sqlx::query("UPDATE areas SET display_order = $2, updated_at = NOW() WHERE id = $1")
                .bind(entry.id)
                .bind(entry.order)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let mut updated = Vec::with_capacity(orders.len());
        for entry in orders {
            if let Some(area) = self.get_area(entry.id).await? {
                updated.push(area);
            }
        }
        Ok(updated)
    }

    async fn create_responsibility(
        &self,
        data: CreateResponsibility,
    ) -> Result<Responsibility, StoreError> {
        let responsibility = sqlx::query_as::<_, Responsibility>(
            r#"
            INSERT INTO responsibilities (area_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, area_id, name, description, created_at
            "#,
        )
        .bind(data.area_id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(responsibility)
    }

    async fn list_responsibilities(
        &self,
        area_id: Uuid,
    ) -> Result<Vec<Responsibility>, StoreError> {
        let responsibilities = sqlx::query_as::<_, Responsibility>(
            "SELECT id, area_id, name, description, created_at \
             FROM responsibilities WHERE area_id = $1 ORDER BY created_at",
        )
        .bind(area_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(responsibilities)
    }
}
