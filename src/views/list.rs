//! List screen: loading, client-side filtering and confirmed deletes.

use std::fmt;
use std::str::FromStr;

use crate::client::PersonnelApi;
use crate::errors::AppError;
use crate::models::{Department, Record};
use crate::notify::Notifier;
use crate::store::{Action, Store};

pub const LOAD_FAILED: &str = "Failed to load personnel records";
pub const DELETE_FAILED: &str = "Failed to delete the record";
pub const DELETED: &str = "Record deleted";

/// Active-status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    ActiveOnly,
    InactiveOnly,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::ActiveOnly => "active",
            StatusFilter::InactiveOnly => "inactive",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::ActiveOnly),
            "inactive" => Ok(StatusFilter::InactiveOnly),
            other => Err(format!("unknown status filter {:?}", other)),
        }
    }
}

/// Conjunction of the three list filters. Each one is a no-op at its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub text: String,
    pub department: Option<Department>,
    pub status: StatusFilter,
}

impl ListFilter {
    /// Case-insensitive substring match on first name, last name or email.
    pub fn matches_text(&self, record: &Record) -> bool {
        if self.text.is_empty() {
            return true;
        }
        let needle = self.text.to_lowercase();
        record.first_name.to_lowercase().contains(&needle)
            || record.last_name.to_lowercase().contains(&needle)
            || record.email.to_lowercase().contains(&needle)
    }

    pub fn matches_department(&self, record: &Record) -> bool {
        self.department.map_or(true, |d| record.department == d)
    }

    pub fn matches_status(&self, record: &Record) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::ActiveOnly => record.active,
            StatusFilter::InactiveOnly => !record.active,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_text(record) && self.matches_department(record) && self.matches_status(record)
    }

    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Server-side listing used to fill the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RemoteQuery {
    #[default]
    All,
    Active,
    Department(Department),
    Name { first: String, last: String },
}

impl RemoteQuery {
    pub async fn run(&self, api: &dyn PersonnelApi) -> Result<Vec<Record>, AppError> {
        match self {
            RemoteQuery::All => api.list_all().await,
            RemoteQuery::Active => api.list_active().await,
            RemoteQuery::Department(department) => api.list_by_department(*department).await,
            RemoteQuery::Name { first, last } => api.search_by_name(first, last).await,
        }
    }
}

impl fmt::Display for RemoteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteQuery::All => f.write_str("all"),
            RemoteQuery::Active => f.write_str("active"),
            RemoteQuery::Department(d) => write!(f, "department {}", d),
            RemoteQuery::Name { first, last } => write!(f, "name {} {}", first, last),
        }
    }
}

/// A delete the user asked for but has not confirmed yet.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a delete only happens once the pending request is confirmed"]
pub struct PendingDelete {
    id: i64,
}

impl PendingDelete {
    pub fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Default)]
pub struct ListView {
    filter: ListFilter,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.filter.text = text.into();
    }

    pub fn set_department(&mut self, department: Option<Department>) {
        self.filter.department = department;
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn clear_filters(&mut self) {
        self.filter = ListFilter::default();
    }

    /// Records that pass the current filter, in store order.
    pub fn visible<'a>(&self, store: &'a Store) -> Vec<&'a Record> {
        self.filter.apply(store.records())
    }

    /// Count shown in the list header.
    pub fn visible_count(&self, store: &Store) -> usize {
        store.records().iter().filter(|r| self.filter.matches(r)).count()
    }

    /// Fetch the full collection into the store. Runs on mount and on refresh.
    pub async fn load(
        &self,
        store: &mut Store,
        api: &dyn PersonnelApi,
        notifier: &dyn Notifier,
    ) -> Result<(), AppError> {
        self.load_query(&RemoteQuery::All, store, api, notifier).await
    }

    /// Replace the store contents with the result of a server-side query.
    pub async fn load_query(
        &self,
        query: &RemoteQuery,
        store: &mut Store,
        api: &dyn PersonnelApi,
        notifier: &dyn Notifier,
    ) -> Result<(), AppError> {
        store.dispatch(Action::SetLoading(true));
        match query.run(api).await {
            Ok(records) => {
                tracing::info!("Loaded {} personnel records ({})", records.len(), query);
                store.dispatch(Action::SetAll(records));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Loading records ({}) failed: {}", query, e);
                store.dispatch(Action::SetError(Some(LOAD_FAILED.to_string())));
                notifier.error(LOAD_FAILED);
                Err(e)
            }
        }
    }

    /// First step of a delete. Nothing is sent until [`ListView::confirm_delete`].
    pub fn request_delete(&self, id: i64) -> PendingDelete {
        PendingDelete { id }
    }

    pub async fn confirm_delete(
        &self,
        pending: PendingDelete,
        store: &mut Store,
        api: &dyn PersonnelApi,
        notifier: &dyn Notifier,
    ) -> Result<(), AppError> {
        let id = pending.id;
        store.dispatch(Action::SetLoading(true));
        match api.delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted record {}", id);
                store.dispatch(Action::Delete(id));
                notifier.success(DELETED);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Deleting record {} failed: {}", id, e);
                store.dispatch(Action::SetError(Some(DELETE_FAILED.to_string())));
                notifier.error(DELETE_FAILED);
                Err(e)
            }
        }
    }
}
