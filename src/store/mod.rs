//! Local store for personnel records.
//!
//! State changes only through [`reduce`], a pure function of the current state and an
//! [`Action`]. [`Store`] owns one state value and is handed to views by `&mut` reference.

use crate::models::Record;

/// Snapshot of everything the screens read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub records: Vec<Record>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: Option<Record>,
}

/// Transitions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    SetError(Option<String>),
    SetAll(Vec<Record>),
    Add(Record),
    Update(Record),
    Delete(i64),
    SetSelected(Option<Record>),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetLoading(_) => "set_loading",
            Action::SetError(_) => "set_error",
            Action::SetAll(_) => "set_all",
            Action::Add(_) => "add",
            Action::Update(_) => "update",
            Action::Delete(_) => "delete",
            Action::SetSelected(_) => "set_selected",
        }
    }
}

/// Apply one action to a state, producing the next state.
pub fn reduce(state: StoreState, action: Action) -> StoreState {
    match action {
        Action::SetLoading(loading) => StoreState { loading, ..state },
        Action::SetError(error) => StoreState {
            error,
            loading: false,
            ..state
        },
        Action::SetAll(records) => StoreState {
            records,
            loading: false,
            error: None,
            ..state
        },
        Action::Add(record) => {
            let mut records = state.records;
            records.push(record);
            StoreState {
                records,
                loading: false,
                error: None,
                ..state
            }
        }
        Action::Update(record) => {
            let records = state
                .records
                .into_iter()
                .map(|r| if r.id == record.id { record.clone() } else { r })
                .collect();
            let selected = match state.selected {
                Some(s) if s.id == record.id => Some(record),
                other => other,
            };
            StoreState {
                records,
                selected,
                loading: false,
                error: None,
            }
        }
        Action::Delete(id) => {
            let mut records = state.records;
            records.retain(|r| r.id != id);
            let selected = state.selected.filter(|s| s.id != id);
            StoreState {
                records,
                selected,
                loading: false,
                error: None,
            }
        }
        Action::SetSelected(selected) => StoreState { selected, ..state },
    }
}

/// Handle owning the current [`StoreState`].
#[derive(Debug, Default)]
pub struct Store {
    state: StoreState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn records(&self) -> &[Record] {
        &self.state.records
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn selected(&self) -> Option<&Record> {
        self.state.selected.as_ref()
    }

    pub fn find(&self, id: i64) -> Option<&Record> {
        self.state.records.iter().find(|r| r.id == id)
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.name(), "dispatch");
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn record(id: i64, first: &str) -> Record {
        Record {
            id,
            first_name: first.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: "555 0100".to_string(),
            department: Department::Sales,
            position: "Clerk".to_string(),
            salary: 1000.0 * id as f64,
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            active: id % 2 == 0,
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded(ids: &[i64]) -> StoreState {
        StoreState {
            records: ids.iter().map(|id| record(*id, "Rec")).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_loading_touches_nothing_else() {
        let state = StoreState {
            error: Some("old".into()),
            ..loaded(&[1])
        };
        let next = reduce(state.clone(), Action::SetLoading(true));
        assert!(next.loading);
        assert_eq!(next.error, state.error);
        assert_eq!(next.records, state.records);
    }

    #[test]
    fn test_set_error_clears_loading() {
        let state = StoreState {
            loading: true,
            ..Default::default()
        };
        let next = reduce(state, Action::SetError(Some("Failed".into())));
        assert!(!next.loading);
        assert_eq!(next.error.as_deref(), Some("Failed"));

        let cleared = reduce(next, Action::SetError(None));
        assert!(cleared.error.is_none());
        assert!(!cleared.loading);
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut state = loaded(&[1, 2]);
        state.selected = Some(record(1, "Rec"));
        let next = reduce(state.clone(), Action::Update(record(9, "Grace")));
        assert_eq!(next.records, state.records);
        assert_eq!(next.selected, state.selected);
    }

    #[test]
    fn test_set_all_resets_flags() {
        let state = StoreState {
            loading: true,
            error: Some("x".into()),
            ..Default::default()
        };
        let next = reduce(state, Action::SetAll(vec![record(1, "Ada")]));
        assert_eq!(next.records.len(), 1);
        assert!(!next.loading);
        assert!(next.error.is_none());
    }

    #[test]
    fn test_update_replaces_record_and_selection() {
        let mut state = loaded(&[1, 2]);
        state.selected = Some(record(2, "Rec"));
        let changed = record(2, "Grace");

        let next = reduce(state, Action::Update(changed.clone()));
        assert_eq!(next.records[1], changed);
        assert_eq!(next.records[0].first_name, "Rec");
        assert_eq!(next.selected, Some(changed));
    }

    #[test]
    fn test_update_keeps_unrelated_selection() {
        let mut state = loaded(&[1, 2]);
        state.selected = Some(record(1, "Rec"));
        let next = reduce(state, Action::Update(record(2, "Grace")));
        assert_eq!(next.selected.map(|r| r.id), Some(1));
    }

    #[test]
    fn test_delete_clears_matching_selection() {
        let mut state = loaded(&[1, 2]);
        state.selected = Some(record(2, "Rec"));
        let next = reduce(state, Action::Delete(2));
        assert_eq!(next.records.len(), 1);
        assert!(next.selected.is_none());
    }

    #[test]
    fn test_delete_missing_id_is_noop_on_records() {
        let state = StoreState {
            loading: true,
            ..loaded(&[1, 2])
        };
        let next = reduce(state.clone(), Action::Delete(99));
        assert_eq!(next.records, state.records);
        assert!(!next.loading);
    }

    #[test]
    fn test_set_selected() {
        let next = reduce(loaded(&[1]), Action::SetSelected(Some(record(1, "Rec"))));
        assert_eq!(next.selected.as_ref().map(|r| r.id), Some(1));
        let cleared = reduce(next, Action::SetSelected(None));
        assert!(cleared.selected.is_none());
        assert_eq!(cleared.records.len(), 1);
    }

    #[test]
    fn test_store_dispatch() {
        let mut store = Store::new();
        store.dispatch(Action::SetLoading(true));
        assert!(store.is_loading());
        store.dispatch(Action::Add(record(5, "Ada")));
        assert!(!store.is_loading());
        assert_eq!(store.find(5).map(|r| r.first_name.as_str()), Some("Ada"));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Update(i64, String),
        Delete(i64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0i64..12, "[A-Z][a-z]{1,6}").prop_map(|(id, name)| Op::Update(id, name)),
            (0i64..12).prop_map(Op::Delete),
        ]
    }

    proptest! {
        #[test]
        fn prop_update_delete_never_duplicates_ids(
            ids in prop::collection::hash_set(0i64..12, 0..10),
            ops in prop::collection::vec(op(), 0..40),
        ) {
            let ids: Vec<i64> = ids.into_iter().collect();
            let mut state = loaded(&ids);
            for op in ops {
                let action = match op {
                    Op::Update(id, name) => Action::Update(record(id, &name)),
                    Op::Delete(id) => Action::Delete(id),
                };
                state = reduce(state, action);
                let unique: HashSet<i64> = state.records.iter().map(|r| r.id).collect();
                prop_assert_eq!(unique.len(), state.records.len());
            }
        }

        #[test]
        fn prop_add_then_delete_round_trips(
            ids in prop::collection::hash_set(0i64..50, 0..10),
            fresh in 100i64..200,
        ) {
            let ids: Vec<i64> = ids.into_iter().collect();
            let before = loaded(&ids);
            let added = reduce(before.clone(), Action::Add(record(fresh, "New")));
            let after = reduce(added, Action::Delete(fresh));
            prop_assert_eq!(after.records, before.records);
        }
    }
}
