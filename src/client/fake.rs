//! In-memory [`PersonnelApi`] used by unit tests to observe calls without a network.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::{ApiResult, PersonnelApi};
use crate::errors::AppError;
use crate::models::{CreateInput, Department, Record, UpdateInput};

/// A remote call as observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListAll,
    GetById(i64),
    Create(CreateInput),
    Update(i64, UpdateInput),
    Delete(i64),
    ListByDepartment(Department),
    ListActive,
    SearchByName(String, String),
    ListDepartments,
    ListPositions,
}

#[derive(Default)]
struct Inner {
    records: Vec<Record>,
    calls: Vec<Call>,
    fail_with: Option<(u16, String)>,
    next_id: i64,
}

#[derive(Default)]
pub struct FakeApi {
    inner: Mutex<Inner>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(Inner {
                records,
                next_id,
                ..Default::default()
            }),
        }
    }

    /// Make every subsequent call fail with the given status and message.
    pub fn fail_with(&self, status: u16, message: &str) {
        self.inner.lock().unwrap().fail_with = Some((status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn record_call(&self, call: Call) -> ApiResult<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        match inner.fail_with.clone() {
            Some((404, message)) => Err(AppError::NotFound(message)),
            Some((status, message)) => Err(AppError::Transport {
                status: Some(status),
                message,
            }),
            None => Ok(inner),
        }
    }
}

fn stamp() -> Option<NaiveDateTime> {
    chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Record {} not found", id))
}

#[async_trait]
impl PersonnelApi for FakeApi {
    async fn list_all(&self) -> ApiResult<Vec<Record>> {
        let inner = self.record_call(Call::ListAll)?;
        Ok(inner.records.clone())
    }

    async fn get_by_id(&self, id: i64) -> ApiResult<Record> {
        let inner = self.record_call(Call::GetById(id))?;
        inner
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, input: &CreateInput) -> ApiResult<Record> {
        let mut inner = self.record_call(Call::Create(input.clone()))?;
        let id = inner.next_id;
        inner.next_id += 1;
        let record = Record {
            id,
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            department: input.department,
            position: input.position.clone(),
            salary: input.salary,
            start_date: input.start_date,
            active: input.active,
            created_at: stamp(),
            updated_at: stamp(),
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, input: &UpdateInput) -> ApiResult<Record> {
        let mut inner = self.record_call(Call::Update(id, input.clone()))?;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        if let Some(v) = &input.first_name {
            record.first_name = v.clone();
        }
        if let Some(v) = &input.last_name {
            record.last_name = v.clone();
        }
        if let Some(v) = &input.email {
            record.email = v.clone();
        }
        if let Some(v) = &input.phone {
            record.phone = v.clone();
        }
        if let Some(v) = input.department {
            record.department = v;
        }
        if let Some(v) = &input.position {
            record.position = v.clone();
        }
        if let Some(v) = input.salary {
            record.salary = v;
        }
        if let Some(v) = input.start_date {
            record.start_date = v;
        }
        if let Some(v) = input.active {
            record.active = v;
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        let mut inner = self.record_call(Call::Delete(id))?;
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        if inner.records.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn list_by_department(&self, department: Department) -> ApiResult<Vec<Record>> {
        let inner = self.record_call(Call::ListByDepartment(department))?;
        Ok(inner
            .records
            .iter()
            .filter(|r| r.department == department)
            .cloned()
            .collect())
    }

    async fn list_active(&self) -> ApiResult<Vec<Record>> {
        let inner = self.record_call(Call::ListActive)?;
        Ok(inner.records.iter().filter(|r| r.active).cloned().collect())
    }

    async fn search_by_name(&self, first: &str, last: &str) -> ApiResult<Vec<Record>> {
        let inner = self.record_call(Call::SearchByName(first.to_string(), last.to_string()))?;
        Ok(inner
            .records
            .iter()
            .filter(|r| r.first_name == first && r.last_name == last)
            .cloned()
            .collect())
    }

    async fn list_departments(&self) -> ApiResult<Vec<String>> {
        let inner = self.record_call(Call::ListDepartments)?;
        let mut names: Vec<String> = inner
            .records
            .iter()
            .map(|r| r.department.as_str().to_string())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn list_positions(&self) -> ApiResult<Vec<String>> {
        let inner = self.record_call(Call::ListPositions)?;
        let mut names: Vec<String> = inner.records.iter().map(|r| r.position.clone()).collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}
