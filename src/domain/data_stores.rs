use super::{
    Activity, EntryId, LogEntry, LogEntryDetails, LogbookSnapshot, Member,
    MemberId, MemberName, NewLogEntry,
};
use color_eyre::eyre::Report;
use thiserror::Error;

#[async_trait::async_trait]
pub trait LogbookStore {
    async fn get_members(&self) -> Result<Vec<Member>, LogbookStoreError>;
    async fn get_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Member, LogbookStoreError>;
    async fn get_member_by_name(
        &self,
        name: &str,
    ) -> Result<Member, LogbookStoreError>;
    async fn add_member(
        &mut self,
        name: &MemberName,
    ) -> Result<Member, LogbookStoreError>;
    async fn delete_member(
        &mut self,
        member_id: &MemberId,
    ) -> Result<(), LogbookStoreError>;

    async fn get_activities(&self) -> Result<Vec<Activity>, LogbookStoreError>;

    async fn add_entry(
        &mut self,
        entry: &NewLogEntry,
    ) -> Result<LogEntry, LogbookStoreError>;
    async fn get_entries(
        &self,
    ) -> Result<Vec<LogEntryDetails>, LogbookStoreError>;
    async fn get_member_entries(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<LogEntryDetails>, LogbookStoreError>;
    async fn delete_entry(
        &mut self,
        entry_id: &EntryId,
    ) -> Result<(), LogbookStoreError>;

    async fn get_snapshot(&self) -> Result<LogbookSnapshot, LogbookStoreError>;
}

#[derive(Debug, Error)]
pub enum LogbookStoreError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Entry not found")]
    EntryNotFound,
    #[error("Member already exists")]
    MemberAlreadyExists,
    #[error("Member not found")]
    MemberNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for LogbookStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ActivityNotFound, Self::ActivityNotFound)
                | (Self::EntryNotFound, Self::EntryNotFound)
                | (Self::MemberAlreadyExists, Self::MemberAlreadyExists)
                | (Self::MemberNotFound, Self::MemberNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
