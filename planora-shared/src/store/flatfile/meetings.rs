/// MeetingStore implementation for the flat-file backend

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::meeting::{CreateMeeting, Meeting, UpdateMeeting};
use crate::models::meeting_note::{CreateMeetingNote, MeetingNote, UpdateMeetingNote};
use crate::store::{MeetingStore, StoreError};

use super::{FileStore, MEETINGS, MEETING_NOTES};

#[async_trait]
impl MeetingStore for FileStore {
    async fn create_meeting(&self, data: CreateMeeting) -> Result<Meeting, StoreError> {
        let _guard = self.lock_writes().await;
        let mut meetings: Vec<Meeting> = self.read_collection(MEETINGS).await?;

        let now = Utc::now();
        let meeting = Meeting {
            id: Uuid::new_v4(),
            project_id: data.project_id,
            title: data.title,
            date: data.date,
            time: data.time,
            attendee_ids: data.attendee_ids,
            created_at: now,
            updated_at: now,
        };

        meetings.push(meeting.clone());
        self.write_collection(MEETINGS, &meetings).await?;

        Ok(meeting)
    }

    async fn get_meeting(&self, id: Uuid) -> Result<Option<Meeting>, StoreError> {
        let meetings: Vec<Meeting> = self.read_collection(MEETINGS).await?;
        Ok(meetings.into_iter().find(|m| m.id == id))
    }

    async fn list_meetings(&self, project_id: Uuid) -> Result<Vec<Meeting>, StoreError> {
        let mut meetings: Vec<Meeting> = self.read_collection(MEETINGS).await?;
        meetings.retain(|m| m.project_id == project_id);
        meetings.sort_by(|a, b| a.date.cmp(&b.date).then(a.time.cmp(&b.time)));
        Ok(meetings)
    }

    async fn update_meeting(
        &self,
        id: Uuid,
        data: UpdateMeeting,
    ) -> Result<Option<Meeting>, StoreError> {
        let _guard = self.lock_writes().await;
        let mut meetings: Vec<Meeting> = self.read_collection(MEETINGS).await?;

        let Some(meeting) = meetings.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };

        if let Some(title) = data.title {
            meeting.title = title;
        }
        if let Some(date) = data.date {
            meeting.date = date;
        }
        if let Some(time) = data.time {
            meeting.time = time;
        }
        if let Some(attendee_ids) = data.attendee_ids {
            meeting.attendee_ids = attendee_ids;
        }
        meeting.updated_at = Utc::now();
        let updated = meeting.clone();

        self.write_collection(MEETINGS, &meetings).await?;
        Ok(Some(updated))
    }

    async fn delete_meeting(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.lock_writes().await;
        let mut meetings: Vec<Meeting> = self.read_collection(MEETINGS).await?;

        let before = meetings.len();
        meetings.retain(|m| m.id != id);
        if meetings.len() == before {
            return Ok(false);
        }
        self.write_collection(MEETINGS, &meetings).await?;

        // the note goes with the meeting
        let mut notes: Vec<MeetingNote> = self.read_collection(MEETING_NOTES).await?;
        let before = notes.len();
        notes.retain(|n| n.meeting_id != id);
        if notes.len() != before {
            self.write_collection(MEETING_NOTES, &notes).await?;
        }

        Ok(true)
    }

    async fn create_meeting_note(
        &self,
        data: CreateMeetingNote,
    ) -> Result<MeetingNote, StoreError> {
        let _guard = self.lock_writes().await;
        let mut notes: Vec<MeetingNote> = self.read_collection(MEETING_NOTES).await?;

        if notes.iter().any(|n| n.meeting_id == data.meeting_id) {
            return Err(StoreError::Conflict(
                "Meeting already has a note".to_string(),
            ));
        }

        let now = Utc::now();
        let note = MeetingNote {
            id: Uuid::new_v4(),
            meeting_id: data.meeting_id,
            content: data.content,
            agenda: data.agenda,
            decisions: data.decisions,
            action_items: data.action_items,
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
        };

        notes.push(note.clone());
        self.write_collection(MEETING_NOTES, &notes).await?;

        Ok(note)
    }

    async fn get_meeting_note(&self, id: Uuid) -> Result<Option<MeetingNote>, StoreError> {
        let notes: Vec<MeetingNote> = self.read_collection(MEETING_NOTES).await?;
        Ok(notes.into_iter().find(|n| n.id == id))
    }

    async fn get_note_for_meeting(
        &self,
        meeting_id: Uuid,
    ) -> Result<Option<MeetingNote>, StoreError> {
        let notes: Vec<MeetingNote> = self.read_collection(MEETING_NOTES).await?;
        Ok(notes.into_iter().find(|n| n.meeting_id == meeting_id))
    }

    async fn update_meeting_note(
        &self,
        id: Uuid,
        data: UpdateMeetingNote,
    ) -> Result<Option<MeetingNote>, StoreError> {
        let _guard = self.lock_writes().await;
        let mut notes: Vec<MeetingNote> = self.read_collection(MEETING_NOTES).await?;

        let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };

        if let Some(content) = data.content {
            note.content = content;
        }
        if let Some(agenda) = data.agenda {
            note.agenda = Some(agenda);
        }
        if let Some(decisions) = data.decisions {
            note.decisions = Some(decisions);
        }
        if let Some(action_items) = data.action_items {
            note.action_items = Some(action_items);
        }
        note.updated_at = Utc::now();
        let updated = note.clone();

        self.write_collection(MEETING_NOTES, &notes).await?;
        Ok(Some(updated))
    }
}
