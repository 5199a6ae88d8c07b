use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use sqlx::PgPool;

use crate::domain::{
    Activity, ActivityId, EntryId, LogEntry, LogEntryDetails, LogbookSnapshot,
    LogbookStore, LogbookStoreError, Member, MemberId, MemberName, NewLogEntry,
};

const MEMBER_FOREIGN_KEY: &str = "log_entries_member_id_fkey";
const ACTIVITY_FOREIGN_KEY: &str = "log_entries_activity_id_fkey";

const ENTRY_DETAILS_QUERY: &str = r#"
    SELECT log_entries.id, log_entries.member_id, members.name AS member_name,
           log_entries.activity_id, activities.name AS activity_name, log_entries.date
    FROM log_entries
    INNER JOIN members ON members.id = log_entries.member_id
    INNER JOIN activities ON activities.id = log_entries.activity_id
"#;

pub struct PostgresLogbookStore {
    pool: PgPool,
}

impl PostgresLogbookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i32,
    name: String,
}

impl TryFrom<MemberRow> for Member {
    type Error = LogbookStoreError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Member {
            id: MemberId::new(row.id),
            name: MemberName::parse(row.name)
                .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: i32,
    name: String,
}

#[derive(sqlx::FromRow)]
struct LogEntryRow {
    id: i32,
    member_id: i32,
    activity_id: i32,
    date: NaiveDate,
}

impl From<LogEntryRow> for LogEntry {
    fn from(row: LogEntryRow) -> Self {
        LogEntry {
            id: EntryId::new(row.id),
            member_id: MemberId::new(row.member_id),
            activity_id: ActivityId::new(row.activity_id),
            date: row.date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LogEntryDetailsRow {
    id: i32,
    member_id: i32,
    member_name: String,
    activity_id: i32,
    activity_name: String,
    date: NaiveDate,
}

impl From<LogEntryDetailsRow> for LogEntryDetails {
    fn from(row: LogEntryDetailsRow) -> Self {
        LogEntryDetails {
            id: EntryId::new(row.id),
            member_id: MemberId::new(row.member_id),
            member_name: row.member_name,
            activity_id: ActivityId::new(row.activity_id),
            activity_name: row.activity_name,
            date: row.date,
        }
    }
}

#[async_trait::async_trait]
impl LogbookStore for PostgresLogbookStore {
    #[tracing::instrument(name = "Getting members from PostgreSQL", skip_all)]
    async fn get_members(&self) -> Result<Vec<Member>, LogbookStoreError> {
        sqlx::query_as::<_, MemberRow>(
            r#"
                SELECT id, name
                FROM members
                ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?
        .into_iter()
        .map(Member::try_from)
        .collect()
    }

    #[tracing::instrument(name = "Getting member from PostgreSQL", skip_all)]
    async fn get_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Member, LogbookStoreError> {
        sqlx::query_as::<_, MemberRow>(
            r#"
                SELECT id, name
                FROM members
                WHERE id = $1
            "#,
        )
        .bind(member_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => LogbookStoreError::MemberNotFound,
            e => LogbookStoreError::UnexpectedError(eyre!(e)),
        })?
        .try_into()
    }

    #[tracing::instrument(
        name = "Getting member by name from PostgreSQL",
        skip_all
    )]
    async fn get_member_by_name(
        &self,
        name: &str,
    ) -> Result<Member, LogbookStoreError> {
        sqlx::query_as::<_, MemberRow>(
            r#"
                SELECT id, name
                FROM members
                WHERE name = $1
                ORDER BY id
                LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => LogbookStoreError::MemberNotFound,
            e => LogbookStoreError::UnexpectedError(eyre!(e)),
        })?
        .try_into()
    }

    #[tracing::instrument(name = "Adding member to PostgreSQL", skip_all)]
    async fn add_member(
        &mut self,
        name: &MemberName,
    ) -> Result<Member, LogbookStoreError> {
        let exists: bool = sqlx::query_scalar(
            r#"
                SELECT EXISTS(SELECT 1 FROM members WHERE lower(name) = lower($1))
            "#,
        )
        .bind(name.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        if exists {
            return Err(LogbookStoreError::MemberAlreadyExists);
        }

        // The unique index on lower(name) catches a concurrent insert that
        // slipped past the check above.
        sqlx::query_as::<_, MemberRow>(
            r#"
            INSERT INTO members (name) VALUES ($1) RETURNING id, name
            "#,
        )
        .bind(name.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                LogbookStoreError::MemberAlreadyExists
            }
            e => LogbookStoreError::UnexpectedError(eyre!(e)),
        })?
        .try_into()
    }

    #[tracing::instrument(name = "Deleting member from PostgreSQL", skip_all)]
    async fn delete_member(
        &mut self,
        member_id: &MemberId,
    ) -> Result<(), LogbookStoreError> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        let deleted_entries = sqlx::query(
            r#"
                DELETE FROM log_entries WHERE member_id = $1
            "#,
        )
        .bind(member_id.as_ref())
        .execute(&mut *transaction)
        .await
        .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        let result = sqlx::query(
            r#"
                DELETE FROM members WHERE id = $1
            "#,
        )
        .bind(member_id.as_ref())
        .execute(&mut *transaction)
        .await
        .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(LogbookStoreError::MemberNotFound);
        }

        transaction
            .commit()
            .await
            .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        tracing::debug!(
            "deleted member {} and {} entries",
            member_id,
            deleted_entries.rows_affected()
        );
        Ok(())
    }

    #[tracing::instrument(name = "Getting activities from PostgreSQL", skip_all)]
    async fn get_activities(&self) -> Result<Vec<Activity>, LogbookStoreError> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
                SELECT id, name
                FROM activities
                ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        Ok(rows
            .into_iter()
            .map(|row| Activity::new(ActivityId::new(row.id), row.name))
            .collect())
    }

    #[tracing::instrument(name = "Adding log entry to PostgreSQL", skip_all)]
    async fn add_entry(
        &mut self,
        entry: &NewLogEntry,
    ) -> Result<LogEntry, LogbookStoreError> {
        let row = sqlx::query_as::<_, LogEntryRow>(
            r#"
            INSERT INTO log_entries (member_id, activity_id, date) VALUES ($1, $2, $3)
            RETURNING id, member_id, activity_id, date
            "#,
        )
        .bind(entry.member_id.as_ref())
        .bind(entry.activity_id.as_ref())
        .bind(entry.date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err)
                if db_err.is_foreign_key_violation() =>
            {
                match db_err.constraint() {
                    Some(MEMBER_FOREIGN_KEY) => {
                        LogbookStoreError::MemberNotFound
                    }
                    Some(ACTIVITY_FOREIGN_KEY) => {
                        LogbookStoreError::ActivityNotFound
                    }
                    _ => LogbookStoreError::UnexpectedError(eyre!(
                        "foreign key violation: {db_err}"
                    )),
                }
            }
            e => LogbookStoreError::UnexpectedError(eyre!(e)),
        })?;

        Ok(row.into())
    }

    #[tracing::instrument(name = "Getting log entries from PostgreSQL", skip_all)]
    async fn get_entries(
        &self,
    ) -> Result<Vec<LogEntryDetails>, LogbookStoreError> {
        let query = format!(
            "{ENTRY_DETAILS_QUERY} ORDER BY log_entries.date DESC, log_entries.id DESC"
        );
        let rows = sqlx::query_as::<_, LogEntryDetailsRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        Ok(rows.into_iter().map(LogEntryDetails::from).collect())
    }

    #[tracing::instrument(
        name = "Getting member log entries from PostgreSQL",
        skip_all
    )]
    async fn get_member_entries(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<LogEntryDetails>, LogbookStoreError> {
        let query = format!(
            "{ENTRY_DETAILS_QUERY} WHERE log_entries.member_id = $1 ORDER BY log_entries.date, log_entries.id"
        );
        let rows = sqlx::query_as::<_, LogEntryDetailsRow>(&query)
            .bind(member_id.as_ref())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        Ok(rows.into_iter().map(LogEntryDetails::from).collect())
    }

    #[tracing::instrument(name = "Deleting log entry from PostgreSQL", skip_all)]
    async fn delete_entry(
        &mut self,
        entry_id: &EntryId,
    ) -> Result<(), LogbookStoreError> {
        let result = sqlx::query(
            r#"
                DELETE FROM log_entries WHERE id = $1
            "#,
        )
        .bind(entry_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(LogbookStoreError::EntryNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Getting logbook snapshot from PostgreSQL", skip_all)]
    async fn get_snapshot(&self) -> Result<LogbookSnapshot, LogbookStoreError> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        // All three reads must see the same committed state
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *transaction)
            .await
            .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        let members = sqlx::query_as::<_, MemberRow>(
            r#"
                SELECT id, name
                FROM members
                ORDER BY id
            "#,
        )
        .fetch_all(&mut *transaction)
        .await
        .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?
        .into_iter()
        .map(Member::try_from)
        .collect::<Result<Vec<_>, _>>()?;

        let activities = sqlx::query_as::<_, ActivityRow>(
            r#"
                SELECT id, name
                FROM activities
                ORDER BY id
            "#,
        )
        .fetch_all(&mut *transaction)
        .await
        .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?
        .into_iter()
        .map(|row| Activity::new(ActivityId::new(row.id), row.name))
        .collect();

        let entries = sqlx::query_as::<_, LogEntryRow>(
            r#"
                SELECT id, member_id, activity_id, date
                FROM log_entries
                ORDER BY id
            "#,
        )
        .fetch_all(&mut *transaction)
        .await
        .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?
        .into_iter()
        .map(LogEntry::from)
        .collect();

        transaction
            .commit()
            .await
            .map_err(|e| LogbookStoreError::UnexpectedError(eyre!(e)))?;

        Ok(LogbookSnapshot {
            members,
            activities,
            entries,
        })
    }
}
