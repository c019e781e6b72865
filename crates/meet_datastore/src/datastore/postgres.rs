use anyhow::Context;
use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};

use crate::{datastore::DataStore, Transcript};

static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Debug, Clone)]
pub struct PgDataStore {
    pub pool: PgPool,
}

impl PgDataStore {
    /// Establish connection to database and run pending migrations
    pub async fn init(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .inspect_err(
                |e| tracing::error!(error = ?e, "Failed to establish connection to database"),
            )
            .context("Failed to connect to postgres database")?;

        MIGRATOR
            .run(&pool)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to run database migrations"))
            .context("Failed to run database migrations")?;

        Ok(PgDataStore { pool })
    }
}

impl DataStore for PgDataStore {
    async fn insert_room(&self, room_name: &str, creator_id: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO rooms (room_name, creator_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(room_name)
        .bind(creator_id)
        .execute(&self.pool)
        .await
        .inspect_err(|err| {
            tracing::error!(
                error = ?err,
                room_name = %room_name,
                "Failed to insert room"
            )
        })
        .context("Failed to insert room")?;

        Ok(())
    }

    async fn room_creator(&self, room_name: &str) -> anyhow::Result<Option<String>> {
        #[derive(sqlx::FromRow)]
        struct CreatorId {
            creator_id: String,
        }

        let row =
            sqlx::query_as::<_, CreatorId>("SELECT creator_id FROM rooms WHERE room_name = $1")
                .bind(room_name)
                .fetch_optional(&self.pool)
                .await
                .inspect_err(|e| {
                    tracing::error!(error = ?e, room_name = %room_name, "Failed to fetch room creator");
                })
                .context("Failed to fetch room creator")?;

        Ok(row.map(|r| r.creator_id))
    }

    async fn rooms_by_creator(&self, creator_id: &str) -> anyhow::Result<Vec<String>> {
        #[derive(sqlx::FromRow)]
        struct RoomName {
            room_name: String,
        }

        let rooms =
            sqlx::query_as::<_, RoomName>("SELECT room_name FROM rooms WHERE creator_id = $1")
                .bind(creator_id)
                .fetch_all(&self.pool)
                .await
                .inspect_err(|e| {
                    tracing::error!(error = ?e, "Failed to fetch rooms for creator");
                })
                .context("Failed to fetch rooms for creator")?;

        Ok(rooms.into_iter().map(|r| r.room_name).collect())
    }

    async fn upsert_transcript(&self, transcript: &Transcript) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transcripts (
                transcript_id, room_name, meeting_date, duration, status, content,
                title, description, executive_summary, key_points, important_numbers,
                action_items, speaker_insights, questions_raised, open_questions,
                participants, transcript_language
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (transcript_id) DO UPDATE SET
                room_name = EXCLUDED.room_name,
                meeting_date = EXCLUDED.meeting_date,
                duration = EXCLUDED.duration,
                status = EXCLUDED.status,
                content = EXCLUDED.content,
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                executive_summary = EXCLUDED.executive_summary,
                key_points = EXCLUDED.key_points,
                important_numbers = EXCLUDED.important_numbers,
                action_items = EXCLUDED.action_items,
                speaker_insights = EXCLUDED.speaker_insights,
                questions_raised = EXCLUDED.questions_raised,
                open_questions = EXCLUDED.open_questions,
                participants = EXCLUDED.participants,
                transcript_language = EXCLUDED.transcript_language,
                updated_at = now()
            "#,
        )
        .bind(&transcript.transcript_id)
        .bind(&transcript.room_name)
        .bind(transcript.meeting_date)
        .bind(transcript.duration)
        .bind(&transcript.status)
        .bind(&transcript.content)
        .bind(&transcript.title)
        .bind(&transcript.description)
        .bind(&transcript.executive_summary)
        .bind(&transcript.key_points)
        .bind(&transcript.important_numbers)
        .bind(&transcript.action_items)
        .bind(&transcript.speaker_insights)
        .bind(&transcript.questions_raised)
        .bind(&transcript.open_questions)
        .bind(&transcript.participants)
        .bind(&transcript.transcript_language)
        .execute(&self.pool)
        .await
        .inspect_err(|err| {
            tracing::error!(
                error = ?err,
                transcript_id = %transcript.transcript_id,
                "Failed to upsert transcript"
            )
        })
        .context("Failed to upsert transcript")?;

        Ok(())
    }

    async fn get_transcript(&self, transcript_id: &str) -> anyhow::Result<Option<Transcript>> {
        let transcript = sqlx::query_as::<_, Transcript>(
            "SELECT * FROM transcripts WHERE transcript_id = $1",
        )
        .bind(transcript_id)
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| {
            tracing::error!(error = ?e, transcript_id = %transcript_id, "Failed to fetch transcript");
        })
        .context("Failed to fetch transcript")?;

        Ok(transcript)
    }
}
