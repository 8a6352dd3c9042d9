//! Create/edit form: typed fields, eager validation and submission.
//!
//! Submission is split in three steps so the network call borrows nothing mutable:
//! [`FormView::prepare`] validates and captures a [`RequestToken`], [`Submission::send`]
//! performs the call, and [`FormView::finish`] applies the outcome to the store and the
//! controller.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex_lite::Regex;

use crate::client::{ApiResult, PersonnelApi};
use crate::controller::{RequestToken, ViewController, ViewMode};
use crate::errors::{AppError, FieldErrors, FormField};
use crate::models::{CreateInput, Department, Record, UpdateInput};
use crate::notify::Notifier;
use crate::store::{Action, Store};

pub const CREATED: &str = "Record created";
pub const UPDATED: &str = "Record updated";
pub const SUBMIT_FAILED: &str = "The operation could not be completed";
pub const SUBMIT_IN_PROGRESS: &str = "A submission is already in progress";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern compiles")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("phone pattern compiles"));

/// Raw form input, one field per control. Text stays unparsed until [`PersonnelForm::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonnelForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub salary: String,
    pub start_date: String,
    pub active: bool,
}

impl PersonnelForm {
    /// Pre-fill from an existing record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            department: record.department.as_str().to_string(),
            position: record.position.clone(),
            salary: record.salary.to_string(),
            start_date: record.start_date.format(DATE_FORMAT).to_string(),
            active: record.active,
        }
    }

    /// Current text of a field.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Department => &self.department,
            FormField::Position => &self.position,
            FormField::Salary => &self.salary,
            FormField::StartDate => &self.start_date,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::FirstName => self.first_name = value,
            FormField::LastName => self.last_name = value,
            FormField::Email => self.email = value,
            FormField::Phone => self.phone = value,
            FormField::Department => self.department = value,
            FormField::Position => self.position = value,
            FormField::Salary => self.salary = value,
            FormField::StartDate => self.start_date = value,
        }
    }

    /// Check every field and build the create body, or report all failures at once.
    pub fn validate(&self) -> Result<CreateInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let first_name = check(&mut errors, FormField::FirstName, min_chars(&self.first_name, 2));
        let last_name = check(&mut errors, FormField::LastName, min_chars(&self.last_name, 2));
        let email = check(
            &mut errors,
            FormField::Email,
            pattern(&self.email, &EMAIL_PATTERN, "Enter a valid email address"),
        );
        let phone = check(
            &mut errors,
            FormField::Phone,
            pattern(&self.phone, &PHONE_PATTERN, "Enter a valid phone number"),
        );
        let department = check(
            &mut errors,
            FormField::Department,
            department_rule(&self.department),
        );
        let position = check(&mut errors, FormField::Position, min_chars(&self.position, 2));
        let salary = check(&mut errors, FormField::Salary, salary_rule(&self.salary));
        let start_date = check(&mut errors, FormField::StartDate, date_rule(&self.start_date));

        match (first_name, last_name, email, phone, department, position, salary, start_date) {
            (
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(phone),
                Some(department),
                Some(position),
                Some(salary),
                Some(start_date),
            ) => Ok(CreateInput {
                first_name,
                last_name,
                email,
                phone,
                department,
                position,
                salary,
                start_date,
                active: self.active,
            }),
            _ => Err(errors),
        }
    }
}

/// Outcome of a single field rule; the message is completed with the field label.
enum Rule<T> {
    Valid(T),
    Missing,
    Invalid(String),
}

fn check<T>(errors: &mut FieldErrors, field: FormField, rule: Rule<T>) -> Option<T> {
    match rule {
        Rule::Valid(value) => Some(value),
        Rule::Missing => {
            errors.insert(field, format!("{} is required", field.label()));
            None
        }
        Rule::Invalid(message) => {
            errors.insert(field, message.replace("{field}", field.label()));
            None
        }
    }
}

fn required(raw: &str) -> Option<&str> {
    let value = raw.trim();
    (!value.is_empty()).then_some(value)
}

fn min_chars(raw: &str, min: usize) -> Rule<String> {
    match required(raw) {
        None => Rule::Missing,
        Some(v) if v.chars().count() < min => {
            Rule::Invalid(format!("{{field}} must be at least {} characters", min))
        }
        Some(v) => Rule::Valid(v.to_string()),
    }
}

fn pattern(raw: &str, re: &Regex, message: &str) -> Rule<String> {
    match required(raw) {
        None => Rule::Missing,
        Some(v) if !re.is_match(v) => Rule::Invalid(message.to_string()),
        Some(v) => Rule::Valid(v.to_string()),
    }
}

fn department_rule(raw: &str) -> Rule<Department> {
    match required(raw) {
        None => Rule::Missing,
        Some(v) => Department::from_label(v)
            .map(Rule::Valid)
            .unwrap_or_else(|| Rule::Invalid("Select one of the listed departments".to_string())),
    }
}

fn salary_rule(raw: &str) -> Rule<f64> {
    match required(raw) {
        None => Rule::Missing,
        Some(v) => match v.parse::<f64>() {
            Ok(n) if !n.is_finite() => Rule::Invalid("{field} must be a number".to_string()),
            Ok(n) if n < 0.0 => Rule::Invalid("{field} must be 0 or greater".to_string()),
            Ok(n) => Rule::Valid(n),
            Err(_) => Rule::Invalid("{field} must be a number".to_string()),
        },
    }
}

fn date_rule(raw: &str) -> Rule<NaiveDate> {
    match required(raw) {
        None => Rule::Missing,
        Some(v) => NaiveDate::parse_from_str(v, DATE_FORMAT)
            .map(Rule::Valid)
            .unwrap_or_else(|_| {
                Rule::Invalid("{field} must be a valid date (YYYY-MM-DD)".to_string())
            }),
    }
}

/// Remote call a validated form turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRequest {
    Create(CreateInput),
    Update { id: i64, patch: UpdateInput },
}

/// A validated request tagged with the controller generation it was issued from.
#[derive(Debug, Clone)]
pub struct Submission {
    request: SubmitRequest,
    token: RequestToken,
}

impl Submission {
    pub fn request(&self) -> &SubmitRequest {
        &self.request
    }

    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub async fn send(self, api: &dyn PersonnelApi) -> SubmitOutcome {
        let result = match &self.request {
            SubmitRequest::Create(input) => api.create(input).await,
            SubmitRequest::Update { id, patch } => api.update(*id, patch).await,
        };
        SubmitOutcome {
            editing: matches!(self.request, SubmitRequest::Update { .. }),
            token: self.token,
            result,
        }
    }
}

/// Server answer to a [`Submission`], not yet applied.
#[derive(Debug)]
pub struct SubmitOutcome {
    editing: bool,
    token: RequestToken,
    result: ApiResult<Record>,
}

/// State of the create/edit screen.
#[derive(Debug, Clone, Default)]
pub struct FormView {
    form: PersonnelForm,
    target: Option<Record>,
    errors: FieldErrors,
    submitting: bool,
}

impl FormView {
    pub fn for_create() -> Self {
        Self::default()
    }

    pub fn for_edit(record: Record) -> Self {
        Self {
            form: PersonnelForm::from_record(&record),
            target: Some(record),
            ..Default::default()
        }
    }

    /// Form for the current mode; `None` on screens without a form.
    pub fn from_mode(mode: &ViewMode) -> Option<Self> {
        match mode {
            ViewMode::Create => Some(Self::for_create()),
            ViewMode::Edit(record) => Some(Self::for_edit(record.clone())),
            ViewMode::List | ViewMode::View(_) => None,
        }
    }

    pub fn form(&self) -> &PersonnelForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PersonnelForm {
        &mut self.form
    }

    pub fn target(&self) -> Option<&Record> {
        self.target.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.target.is_some()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Clear input back to the initial values of this form.
    pub fn reset(&mut self) {
        self.form = self
            .target
            .as_ref()
            .map(PersonnelForm::from_record)
            .unwrap_or_default();
        self.errors = FieldErrors::new();
    }

    /// Validate and build the request. On failure nothing is sent and the field
    /// messages are kept for display.
    pub fn prepare(&mut self, controller: &ViewController) -> Result<Submission, AppError> {
        if self.submitting {
            return Err(AppError::transport(SUBMIT_IN_PROGRESS));
        }
        let input = match self.form.validate() {
            Ok(input) => input,
            Err(errors) => {
                tracing::debug!("Form rejected with {} field errors", errors.len());
                self.errors = errors.clone();
                return Err(AppError::Validation(errors));
            }
        };
        self.errors = FieldErrors::new();
        self.submitting = true;

        let request = match &self.target {
            Some(record) => SubmitRequest::Update {
                id: record.id,
                patch: UpdateInput::diff(record, &input),
            },
            None => SubmitRequest::Create(input),
        };
        Ok(Submission {
            request,
            token: controller.token(),
        })
    }

    /// Apply a server answer: store transition, notification and navigation.
    pub fn finish(
        &mut self,
        outcome: SubmitOutcome,
        store: &mut Store,
        controller: &mut ViewController,
        notifier: &dyn Notifier,
        discard_stale: bool,
    ) -> Result<Record, AppError> {
        self.submitting = false;

        if !controller.is_current(outcome.token) {
            if discard_stale {
                tracing::warn!(
                    generation = outcome.token.generation(),
                    current = controller.generation(),
                    "Discarding response for a screen that is no longer shown"
                );
                return outcome.result;
            }
            tracing::warn!(
                generation = outcome.token.generation(),
                current = controller.generation(),
                "Applying response for a screen that is no longer shown"
            );
        }

        match outcome.result {
            Ok(record) => {
                if outcome.editing {
                    store.dispatch(Action::Update(record.clone()));
                    notifier.success(UPDATED);
                } else {
                    store.dispatch(Action::Add(record.clone()));
                    notifier.success(CREATED);
                }
                controller.on_success();
                Ok(record)
            }
            Err(e) => {
                let message = match &e {
                    AppError::Transport { status: None, .. } => SUBMIT_FAILED.to_string(),
                    other => other.user_message(SUBMIT_FAILED),
                };
                tracing::warn!("Submit failed: {}", e);
                store.dispatch(Action::SetError(Some(message.clone())));
                notifier.error(&message);
                Err(e)
            }
        }
    }

    /// Validate, send and apply in one go.
    pub async fn submit(
        &mut self,
        store: &mut Store,
        controller: &mut ViewController,
        api: &dyn PersonnelApi,
        notifier: &dyn Notifier,
        discard_stale: bool,
    ) -> Result<Record, AppError> {
        let submission = self.prepare(controller)?;
        let outcome = submission.send(api).await;
        self.finish(outcome, store, controller, notifier, discard_stale)
    }
}
