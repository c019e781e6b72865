use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use meet_datastore::{DataStore, Transcript};

#[derive(Clone, Default)]
pub struct MockDataStore {
    /// room_name -> creator_id
    pub rooms: Arc<Mutex<HashMap<String, String>>>,
    /// transcript_id -> latest upserted record
    pub transcripts: Arc<Mutex<HashMap<String, Transcript>>>,
    pub upsert_calls: Arc<Mutex<Vec<Transcript>>>,
    pub fail_room_inserts: bool,
}

impl MockDataStore {
    pub fn with_room(self, room_name: &str, creator_id: &str) -> Self {
        self.rooms
            .lock()
            .unwrap()
            .insert(room_name.to_string(), creator_id.to_string());
        self
    }

    pub fn with_transcript(self, transcript: Transcript) -> Self {
        self.transcripts
            .lock()
            .unwrap()
            .insert(transcript.transcript_id.clone(), transcript);
        self
    }
}

impl DataStore for MockDataStore {
    async fn insert_room(&self, room_name: &str, creator_id: &str) -> anyhow::Result<()> {
        if self.fail_room_inserts {
            anyhow::bail!("room insert failed");
        }
        self.rooms
            .lock()
            .unwrap()
            .entry(room_name.to_string())
            .or_insert_with(|| creator_id.to_string());
        Ok(())
    }

    async fn room_creator(&self, room_name: &str) -> anyhow::Result<Option<String>> {
        Ok(self.rooms.lock().unwrap().get(room_name).cloned())
    }

    async fn rooms_by_creator(&self, creator_id: &str) -> anyhow::Result<Vec<String>> {
        Ok(self
            .rooms
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, creator)| creator.as_str() == creator_id)
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn upsert_transcript(&self, transcript: &Transcript) -> anyhow::Result<()> {
        self.upsert_calls.lock().unwrap().push(transcript.clone());
        self.transcripts
            .lock()
            .unwrap()
            .insert(transcript.transcript_id.clone(), transcript.clone());
        Ok(())
    }

    async fn get_transcript(&self, transcript_id: &str) -> anyhow::Result<Option<Transcript>> {
        Ok(self.transcripts.lock().unwrap().get(transcript_id).cloned())
    }
}
