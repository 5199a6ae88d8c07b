use std::collections::HashMap;

use crate::domain::{
    Activity, ActivityId, EntryId, LogEntry, LogEntryDetails, LogbookSnapshot,
    LogbookStore, LogbookStoreError, Member, MemberId, MemberName, NewLogEntry,
};

pub const DEFAULT_ACTIVITIES: [&str; 3] = ["race", "ood", "safety"];

pub struct HashmapLogbookStore {
    members: HashMap<MemberId, Member>,
    activities: HashMap<ActivityId, Activity>,
    entries: HashMap<EntryId, LogEntry>,
    next_member_id: i32,
    next_entry_id: i32,
}

impl HashmapLogbookStore {
    pub fn with_activities(names: &[&str]) -> Self {
        let activities = names
            .iter()
            .zip(1..)
            .map(|(name, id)| {
                let id = ActivityId::new(id);
                (id, Activity::new(id, *name))
            })
            .collect();

        Self {
            members: HashMap::new(),
            activities,
            entries: HashMap::new(),
            next_member_id: 1,
            next_entry_id: 1,
        }
    }

    fn details(
        &self,
        entry: &LogEntry,
    ) -> Result<LogEntryDetails, LogbookStoreError> {
        let member = self
            .members
            .get(&entry.member_id)
            .ok_or(LogbookStoreError::MemberNotFound)?;
        let activity = self
            .activities
            .get(&entry.activity_id)
            .ok_or(LogbookStoreError::ActivityNotFound)?;

        Ok(LogEntryDetails {
            id: entry.id,
            member_id: member.id,
            member_name: member.name.as_ref().to_owned(),
            activity_id: activity.id,
            activity_name: activity.name.clone(),
            date: entry.date,
        })
    }
}

impl Default for HashmapLogbookStore {
    fn default() -> Self {
        Self::with_activities(&DEFAULT_ACTIVITIES)
    }
}

#[async_trait::async_trait]
impl LogbookStore for HashmapLogbookStore {
    async fn get_members(&self) -> Result<Vec<Member>, LogbookStoreError> {
        let mut members: Vec<Member> = self.members.values().cloned().collect();
        members.sort_by_key(|m| m.id);
        Ok(members)
    }

    async fn get_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Member, LogbookStoreError> {
        match self.members.get(member_id) {
            Some(member) => Ok(member.clone()),
            None => Err(LogbookStoreError::MemberNotFound),
        }
    }

    async fn get_member_by_name(
        &self,
        name: &str,
    ) -> Result<Member, LogbookStoreError> {
        self.get_members()
            .await?
            .into_iter()
            .find(|m| m.name.as_ref() == name)
            .ok_or(LogbookStoreError::MemberNotFound)
    }

    async fn add_member(
        &mut self,
        name: &MemberName,
    ) -> Result<Member, LogbookStoreError> {
        if self
            .members
            .values()
            .any(|m| name.matches_ignoring_case(m.name.as_ref()))
        {
            return Err(LogbookStoreError::MemberAlreadyExists);
        }

        let member = Member::new(MemberId::new(self.next_member_id), name.clone());
        self.next_member_id += 1;
        self.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn delete_member(
        &mut self,
        member_id: &MemberId,
    ) -> Result<(), LogbookStoreError> {
        if !self.members.contains_key(member_id) {
            return Err(LogbookStoreError::MemberNotFound);
        }
        self.entries.retain(|_, entry| entry.member_id != *member_id);
        self.members.remove(member_id);
        Ok(())
    }

    async fn get_activities(&self) -> Result<Vec<Activity>, LogbookStoreError> {
        let mut activities: Vec<Activity> =
            self.activities.values().cloned().collect();
        activities.sort_by_key(|a| a.id);
        Ok(activities)
    }

    async fn add_entry(
        &mut self,
        entry: &NewLogEntry,
    ) -> Result<LogEntry, LogbookStoreError> {
        if !self.members.contains_key(&entry.member_id) {
            return Err(LogbookStoreError::MemberNotFound);
        }
        if !self.activities.contains_key(&entry.activity_id) {
            return Err(LogbookStoreError::ActivityNotFound);
        }

        let stored = LogEntry {
            id: EntryId::new(self.next_entry_id),
            member_id: entry.member_id,
            activity_id: entry.activity_id,
            date: entry.date,
        };
        self.next_entry_id += 1;
        self.entries.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_entries(
        &self,
    ) -> Result<Vec<LogEntryDetails>, LogbookStoreError> {
        let mut entries = self
            .entries
            .values()
            .map(|entry| self.details(entry))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    async fn get_member_entries(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<LogEntryDetails>, LogbookStoreError> {
        let mut entries = self
            .entries
            .values()
            .filter(|entry| entry.member_id == *member_id)
            .map(|entry| self.details(entry))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    async fn delete_entry(
        &mut self,
        entry_id: &EntryId,
    ) -> Result<(), LogbookStoreError> {
        match self.entries.remove(entry_id) {
            Some(_) => Ok(()),
            None => Err(LogbookStoreError::EntryNotFound),
        }
    }

    async fn get_snapshot(&self) -> Result<LogbookSnapshot, LogbookStoreError> {
        let mut entries: Vec<LogEntry> = self.entries.values().cloned().collect();
        entries.sort_by_key(|e| e.id);

        Ok(LogbookSnapshot {
            members: self.get_members().await?,
            activities: self.get_activities().await?,
            entries,
        })
    }
}
