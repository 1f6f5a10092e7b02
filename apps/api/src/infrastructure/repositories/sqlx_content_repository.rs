use crate::domain::{
    entry::{
        entity::{Entry, EntryKind},
        media::MediaReference,
        repository::{ContentRepository, media_in_use},
    },
    shared::errors::DomainError,
    social::{
        comment::Comment,
        reaction::{ReactionKind, ReactionSet, Reactor},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, types::Json};
use uuid::Uuid;

const ENTRY_COLUMNS: &str =
    "id, kind, title, description, media, author_id, comments, reactions, created_at";

pub struct SqlxContentRepository {
    pub pool: PgPool,
}

impl SqlxContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EntryRow {
    id: Uuid,
    kind: String,
    title: String,
    description: String,
    media: Json<MediaReference>,
    author_id: Option<Uuid>,
    comments: Json<Vec<Comment>>,
    reactions: Json<ReactionSet>,
    created_at: DateTime<Utc>,
}

impl TryFrom<EntryRow> for Entry {
    type Error = DomainError;

    fn try_from(r: EntryRow) -> Result<Self, Self::Error> {
        Ok(Entry {
            id: r.id,
            kind: r.kind.parse()?,
            title: r.title,
            description: r.description,
            media: r.media.0,
            author_id: r.author_id,
            comments: r.comments.0,
            reactions: r.reactions.0,
            created_at: r.created_at,
        })
    }
}

fn infra(e: sqlx::Error) -> DomainError {
    DomainError::InfrastructureError(e.to_string())
}

#[async_trait]
impl ContentRepository for SqlxContentRepository {
    async fn create(&self, entry: &Entry) -> Result<Entry, DomainError> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            "INSERT INTO entries (id, kind, title, description, media, author_id, comments, reactions, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {}",
            ENTRY_COLUMNS
        ))
        .bind(entry.id)
        .bind(entry.kind.as_str())
        .bind(&entry.title)
        .bind(&entry.description)
        .bind(Json(&entry.media))
        .bind(entry.author_id)
        .bind(Json(&entry.comments))
        .bind(Json(&entry.reactions))
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err)
                if db_err.constraint() == Some("idx_entries_media_storage_key") =>
            {
                media_in_use()
            }
            _ => infra(e),
        })?;
        row.try_into()
    }

    async fn find_all(&self, kind: EntryKind) -> Result<Vec<Entry>, DomainError> {
        let rows = sqlx::query_as::<_, EntryRow>(&format!(
            "SELECT {} FROM entries WHERE kind = $1 ORDER BY created_at DESC, id DESC",
            ENTRY_COLUMNS
        ))
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.into_iter().map(Entry::try_from).collect()
    }

    async fn find_by_id(&self, kind: EntryKind, id: Uuid) -> Result<Option<Entry>, DomainError> {
        sqlx::query_as::<_, EntryRow>(&format!(
            "SELECT {} FROM entries WHERE id = $1 AND kind = $2",
            ENTRY_COLUMNS
        ))
        .bind(id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?
        .map(Entry::try_from)
        .transpose()
    }

    async fn delete(&self, kind: EntryKind, id: Uuid) -> Result<Option<Entry>, DomainError> {
        sqlx::query_as::<_, EntryRow>(&format!(
            "DELETE FROM entries WHERE id = $1 AND kind = $2 RETURNING {}",
            ENTRY_COLUMNS
        ))
        .bind(id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?
        .map(Entry::try_from)
        .transpose()
    }

    async fn toggle_reaction(
        &self,
        kind: EntryKind,
        id: Uuid,
        reaction: ReactionKind,
        reactor: &Reactor,
    ) -> Result<Option<ReactionSet>, DomainError> {
        // Single statement: the row lock taken by UPDATE serialises
        // concurrent toggles on the same document.
        let field = ReactionSet::field_name(reaction, reactor.is_guest());
        let updated = sqlx::query_scalar::<_, Json<ReactionSet>>(
            r#"UPDATE entries
               SET reactions = jsonb_set(
                   reactions,
                   ARRAY[$3::text],
                   CASE
                       WHEN COALESCE(reactions -> $3::text, '[]'::jsonb) ? $4::text
                           THEN COALESCE(reactions -> $3::text, '[]'::jsonb) - $4::text
                       ELSE COALESCE(reactions -> $3::text, '[]'::jsonb) || jsonb_build_array($4::text)
                   END,
                   true
               )
               WHERE id = $1 AND kind = $2
               RETURNING reactions"#,
        )
        .bind(id)
        .bind(kind.as_str())
        .bind(field)
        .bind(reactor.key())
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        Ok(updated.map(|json| json.0))
    }

    async fn append_comment(
        &self,
        kind: EntryKind,
        id: Uuid,
        comment: &Comment,
    ) -> Result<Option<Vec<Comment>>, DomainError> {
        let updated = sqlx::query_scalar::<_, Json<Vec<Comment>>>(
            "UPDATE entries SET comments = comments || jsonb_build_array($3::jsonb)
             WHERE id = $1 AND kind = $2
             RETURNING comments",
        )
        .bind(id)
        .bind(kind.as_str())
        .bind(Json(comment))
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        Ok(updated.map(|json| json.0))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }
}
