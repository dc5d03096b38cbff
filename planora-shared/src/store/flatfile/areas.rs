/// AreaStore implementation for the flat-file backend

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::area::{Area, AreaOrder, CreateArea, UpdateArea};
use crate::models::responsibility::{CreateResponsibility, Responsibility};
use crate::models::task::Task;
use crate::store::{AreaStore, StoreError};

use super::{FileStore, AREAS, RESPONSIBILITIES, TASKS};

#[async_trait]
impl AreaStore for FileStore {
    async fn create_area(&self, data: CreateArea) -> Result<Area, StoreError> {
        let _guard = self.lock_writes().await;
        let mut areas: Vec<Area> = self.read_collection(AREAS).await?;

        let next_order = areas
            .iter()
            .filter(|a| a.project_id == data.project_id)
            .map(|a| a.display_order)
            .max()
            .unwrap_or(0)
            + 1;

        let now = Utc::now();
        let area = Area {
            id: Uuid::new_v4(),
            project_id: data.project_id,
            name: data.name,
            description: data.description,
            lead_id: data.lead_id,
            display_order: next_order,
            participant_ids: data.participant_ids,
            created_at: now,
            updated_at: now,
        };

        areas.push(area.clone());
        self.write_collection(AREAS, &areas).await?;

        Ok(area)
    }

    async fn get_area(&self, id: Uuid) -> Result<Option<Area>, StoreError> {
        let areas: Vec<Area> = self.read_collection(AREAS).await?;
        Ok(areas.into_iter().find(|a| a.id == id))
    }

    async fn list_areas(&self, project_id: Uuid) -> Result<Vec<Area>, StoreError> {
        let mut areas: Vec<Area> = self.read_collection(AREAS).await?;
        areas.retain(|a| a.project_id == project_id);
        areas.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(areas)
    }

    async fn update_area(&self, id: Uuid, data: UpdateArea) -> Result<Option<Area>, StoreError> {
        let _guard = self.lock_writes().await;
        let mut areas: Vec<Area> = self.read_collection(AREAS).await?;

        let Some(area) = areas.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        if let Some(name) = data.name {
            area.name = name;
        }
        if let Some(description) = data.description {
            area.description = Some(description);
        }
        if let Some(lead_id) = data.lead_id {
            area.lead_id = Some(lead_id);
        }
        if let Some(participant_ids) = data.participant_ids {
            area.participant_ids = participant_ids;
        }
        area.updated_at = Utc::now();
        let updated = area.clone();

        self.write_collection(AREAS, &areas).await?;
        Ok(Some(updated))
    }

    async fn delete_area(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.lock_writes().await;
        let mut areas: Vec<Area> = self.read_collection(AREAS).await?;

        let before = areas.len();
        areas.retain(|a| a.id != id);
        if areas.len() == before {
            return Ok(false);
        }
        self.write_collection(AREAS, &areas).await?;

        // detach tasks, matching the relational ON DELETE SET NULL
        let mut tasks: Vec<Task> = self.read_collection(TASKS).await?;
        let mut touched = false;
        for task in tasks.iter_mut() {
            if task.area_id == Some(id) {
                task.area_id = None;
                task.updated_at = Utc::now();
                touched = true;
            }
        }
        if touched {
            self.write_collection(TASKS, &tasks).await?;
        }

        // responsibilities go with the area
        let mut responsibilities: Vec<Responsibility> =
            self.read_collection(RESPONSIBILITIES).await?;
        let before = responsibilities.len();
        responsibilities.retain(|r| r.area_id != id);
        if responsibilities.len() != before {
            self.write_collection(RESPONSIBILITIES, &responsibilities)
                .await?;
        }

        Ok(true)
    }

    async fn reorder_areas(&self, orders: &[AreaOrder]) -> Result<Vec<Area>, StoreError> {
        let _guard = self.lock_writes().await;
        let mut areas: Vec<Area> = self.read_collection(AREAS).await?;

        let now = Utc::now();
        let mut updated = Vec::with_capacity(orders.len());
        for entry in orders {
            if let Some(area) = areas.iter_mut().find(|a| a.id == entry.id) {
                area.display_order = entry.order;
                area.updated_at = now;
                updated.push(area.clone());
            }
        }

        self.write_collection(AREAS, &areas).await?;
        Ok(updated)
    }

    async fn create_responsibility(
        &self,
        data: CreateResponsibility,
    ) -> Result<Responsibility, StoreError> {
        let _guard = self.lock_writes().await;
        let mut responsibilities: Vec<Responsibility> =
            self.read_collection(RESPONSIBILITIES).await?;

        let responsibility = Responsibility {
            id: Uuid::new_v4(),
            area_id: data.area_id,
            name: data.name,
            description: data.description,
            created_at: Utc::now(),
        };

        responsibilities.push(responsibility.clone());
        self.write_collection(RESPONSIBILITIES, &responsibilities)
            .await?;

        Ok(responsibility)
    }

    async fn list_responsibilities(
        &self,
        area_id: Uuid,
    ) -> Result<Vec<Responsibility>, StoreError> {
        let mut responsibilities: Vec<Responsibility> =
            self.read_collection(RESPONSIBILITIES).await?;
        responsibilities.retain(|r| r.area_id == area_id);
        responsibilities.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(responsibilities)
    }
}
