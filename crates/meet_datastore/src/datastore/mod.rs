use std::future::Future;

pub mod postgres;

use crate::Transcript;

pub trait DataStore {
    /// Record which user created a room. Inserting the same room twice is a
    /// no-op; the first writer wins.
    fn insert_room(
        &self,
        room_name: &str,
        creator_id: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn room_creator(
        &self,
        room_name: &str,
    ) -> impl Future<Output = anyhow::Result<Option<String>>> + Send;

    fn rooms_by_creator(
        &self,
        creator_id: &str,
    ) -> impl Future<Output = anyhow::Result<Vec<String>>> + Send;

    /// Insert or overwrite a transcript record keyed on `transcript_id`.
    fn upsert_transcript(
        &self,
        transcript: &Transcript,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn get_transcript(
        &self,
        transcript_id: &str,
    ) -> impl Future<Output = anyhow::Result<Option<Transcript>>> + Send;
}

impl<T: DataStore + Send + Sync> DataStore for &T {
    async fn insert_room(&self, room_name: &str, creator_id: &str) -> anyhow::Result<()> {
        (**self).insert_room(room_name, creator_id).await
    }

    async fn room_creator(&self, room_name: &str) -> anyhow::Result<Option<String>> {
        (**self).room_creator(room_name).await
    }

    async fn rooms_by_creator(&self, creator_id: &str) -> anyhow::Result<Vec<String>> {
        (**self).rooms_by_creator(creator_id).await
    }

    async fn upsert_transcript(&self, transcript: &Transcript) -> anyhow::Result<()> {
        (**self).upsert_transcript(transcript).await
    }

    async fn get_transcript(&self, transcript_id: &str) -> anyhow::Result<Option<Transcript>> {
        (**self).get_transcript(transcript_id).await
    }
}
