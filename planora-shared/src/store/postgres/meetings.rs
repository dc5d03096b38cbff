/// MeetingStore implementation for PostgreSQL

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::meeting::{CreateMeeting, Meeting, UpdateMeeting};
use crate::models::meeting_note::{CreateMeetingNote, MeetingNote, UpdateMeetingNote};
use crate::store::{MeetingStore, StoreError};

use super::PgStore;

const MEETING_COLUMNS: &str =
    "id, project_id, title, meeting_date, meeting_time, created_at, updated_at";

const NOTE_COLUMNS: &str = "id, meeting_id, content, agenda, decisions, action_items, \
                            created_by, created_at, updated_at";

impl PgStore {
    async fn enrich_meeting(&self, mut meeting: Meeting) -> Result<Meeting, StoreError> {
        meeting.attendee_ids = self.meeting_attendee_ids(meeting.id).await?;
        Ok(meeting)
    }
}

#[async_trait]
impl MeetingStore for PgStore {
    async fn create_meeting(&self, data: CreateMeeting) -> Result<Meeting, StoreError> {
        let mut tx = self.pool.begin().await?;

        let meeting = sqlx::query_as::<_, Meeting>(&format!(
            r#"
            INSERT INTO meetings (project_id, title, meeting_date, meeting_time)
            VALUES ($1, $2, $3, $4)
            RETURNING {MEETING_COLUMNS}
            "#,
        ))
        .bind(data.project_id)
        .bind(&data.title)
        .bind(data.date)
        .bind(data.time)
        .fetch_one(&mut *tx)
        .await?;

        for user_id in &data.attendee_ids {
            sqlx::query(
                "INSERT INTO meeting_attendees (meeting_id, user_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(meeting.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.enrich_meeting(meeting).await
    }

    async fn get_meeting(&self, id: Uuid) -> Result<Option<Meeting>, StoreError> {
        let meeting = sqlx::query_as::<_, Meeting>(&format!(
            "SELECT {MEETING_COLUMNS} FROM meetings WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match meeting {
            Some(m) => Ok(Some(self.enrich_meeting(m).await?)),
            None => Ok(None),
        }
    }

    async fn list_meetings(&self, project_id: Uuid) -> Result<Vec<Meeting>, StoreError> {
        let meetings = sqlx::query_as::<_, Meeting>(&format!(
            "SELECT {MEETING_COLUMNS} FROM meetings WHERE project_id = $1 \
             ORDER BY meeting_date, meeting_time",
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        futures::future::try_join_all(meetings.into_iter().map(|m| self.enrich_meeting(m))).await
    }

    async fn update_meeting(
        &self,
        id: Uuid,
        data: UpdateMeeting,
    ) -> Result<Option<Meeting>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let meeting = sqlx::query_as::<_, Meeting>(&format!(
            r#"
            UPDATE meetings SET
                title = COALESCE($2, title),
                meeting_date = COALESCE($3, meeting_date),
                meeting_time = COALESCE($4, meeting_time),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {MEETING_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&data.title)
        .bind(data.date)
        .bind(data.time)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(meeting) = meeting else {
            return Ok(None);
        };

        if let Some(attendee_ids) = &data.attendee_ids {
            sqlx::query("DELETE FROM meeting_attendees WHERE meeting_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for user_id in attendee_ids {
                sqlx::query(
                    "INSERT INTO meeting_attendees (meeting_id, user_id) VALUES ($1, $2) \
                     ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(Some(self.enrich_meeting(meeting).await?))
    }

    async fn delete_meeting(&self, id: Uuid) -> Result<bool, StoreError> {
        // attendees and the note go with the meeting via CASCADE
        let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_meeting_note(
        &self,
        data: CreateMeetingNote,
    ) -> Result<MeetingNote, StoreError> {
        if self.get_note_for_meeting(data.meeting_id).await?.is_some() {
            return Err(StoreError::Conflict(
                "Meeting already has a note".to_string(),
            ));
        }

        let note = sqlx::query_as::<_, MeetingNote>(&format!(
            r#"
            INSERT INTO meeting_notes (meeting_id, content, agenda, decisions, action_items, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {NOTE_COLUMNS}
            "#,
        ))
        .bind(data.meeting_id)
        .bind(&data.content)
        .bind(&data.agenda)
        .bind(&data.decisions)
        .bind(&data.action_items)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(note)
    }

    async fn get_meeting_note(&self, id: Uuid) -> Result<Option<MeetingNote>, StoreError> {
        let note = sqlx::query_as::<_, MeetingNote>(&format!(
            "SELECT {NOTE_COLUMNS} FROM meeting_notes WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }

    async fn get_note_for_meeting(
        &self,
        meeting_id: Uuid,
    ) -> Result<Option<MeetingNote>, StoreError> {
        let note = sqlx::query_as::<_, MeetingNote>(&format!(
            "SELECT {NOTE_COLUMNS} FROM meeting_notes WHERE meeting_id = $1",
        ))
        .bind(meeting_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }

    async fn update_meeting_note(
        &self,
        id: Uuid,
        data: UpdateMeetingNote,
    ) -> Result<Option<MeetingNote>, StoreError> {
        let note = sqlx::query_as::<_, MeetingNote>(&format!(
            r#"
            UPDATE meeting_notes SET
                content = COALESCE($2, content),
                agenda = COALESCE($3, agenda),
                decisions = COALESCE($4, decisions),
                action_items = COALESCE($5, action_items),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {NOTE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&data.content)
        .bind(&data.agenda)
        .bind(&data.decisions)
        .bind(&data.action_items)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }
}
