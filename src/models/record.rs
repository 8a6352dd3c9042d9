//! Personnel record model and its create/update request bodies.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Department;

/// A persisted personnel record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: Department,
    pub position: String,
    pub salary: f64,
    pub start_date: NaiveDate,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Record {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Request body for creating a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: Department,
    pub position: String,
    pub salary: f64,
    pub start_date: NaiveDate,
    pub active: bool,
}

impl From<&Record> for CreateInput {
    fn from(record: &Record) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            department: record.department,
            position: record.position.clone(),
            salary: record.salary,
            start_date: record.start_date,
            active: record.active,
        }
    }
}

/// Request body for updating an existing record. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateInput {
    /// Build a patch holding only the fields of `input` that differ from `current`.
    pub fn diff(current: &Record, input: &CreateInput) -> Self {
        fn changed<T: PartialEq + Clone>(old: &T, new: &T) -> Option<T> {
            (old != new).then(|| new.clone())
        }

        Self {
            first_name: changed(&current.first_name, &input.first_name),
            last_name: changed(&current.last_name, &input.last_name),
            email: changed(&current.email, &input.email),
            phone: changed(&current.phone, &input.phone),
            department: changed(&current.department, &input.department),
            position: changed(&current.position, &input.position),
            salary: changed(&current.salary, &input.salary),
            start_date: changed(&current.start_date, &input.start_date),
            active: changed(&current.active, &input.active),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<CreateInput> for UpdateInput {
    fn from(input: CreateInput) -> Self {
        Self {
            first_name: Some(input.first_name),
            last_name: Some(input.last_name),
            email: Some(input.email),
            phone: Some(input.phone),
            department: Some(input.department),
            position: Some(input.position),
            salary: Some(input.salary),
            start_date: Some(input.start_date),
            active: Some(input.active),
        }
    }
}
