//! Session wiring.
//!
//! A [`Session`] owns the store, the view-mode controller and the per-screen view state,
//! and holds handles to the remote client and the notifier. Presentation layers call into
//! it and render whatever [`Session::mode`] says.

use std::sync::Arc;

use crate::client::PersonnelApi;
use crate::config::Config;
use crate::controller::{InvalidTransition, ViewController, ViewMode};
use crate::errors::AppError;
use crate::models::Record;
use crate::notify::Notifier;
use crate::store::{Action, Store};
use crate::views::{FormView, ListView, PendingDelete, RemoteQuery};

pub struct Session {
    api: Arc<dyn PersonnelApi>,
    notifier: Arc<dyn Notifier>,
    store: Store,
    controller: ViewController,
    list: ListView,
    form: Option<FormView>,
    discard_stale: bool,
}

impl Session {
    pub fn new(api: Arc<dyn PersonnelApi>, notifier: Arc<dyn Notifier>, config: &Config) -> Self {
        Self {
            api,
            notifier,
            store: Store::new(),
            controller: ViewController::new(),
            list: ListView::new(),
            form: None,
            discard_stale: config.discard_stale_responses,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn mode(&self) -> &ViewMode {
        self.controller.mode()
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView {
        &mut self.list
    }

    pub fn form(&self) -> Option<&FormView> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormView> {
        self.form.as_mut()
    }

    pub fn api(&self) -> &dyn PersonnelApi {
        self.api.as_ref()
    }

    /// Initial load of the list screen.
    pub async fn mount(&mut self) -> Result<(), AppError> {
        self.query(RemoteQuery::All).await
    }

    pub async fn query(&mut self, query: RemoteQuery) -> Result<(), AppError> {
        self.list
            .load_query(&query, &mut self.store, self.api.as_ref(), self.notifier.as_ref())
            .await
    }

    pub fn show_create(&mut self) {
        self.controller.request_create();
        self.sync_screen();
    }

    pub fn show_edit(&mut self, id: i64) -> Result<(), AppError> {
        let record = self.loaded(id)?;
        self.controller.request_edit(record);
        self.sync_screen();
        Ok(())
    }

    pub fn show_view(&mut self, id: i64) -> Result<(), AppError> {
        let record = self.loaded(id)?;
        self.controller.request_view(record);
        self.sync_screen();
        Ok(())
    }

    /// Edit action of the detail screen.
    pub fn edit_viewed(&mut self) -> Result<(), InvalidTransition> {
        self.controller.edit_viewed()?;
        self.sync_screen();
        Ok(())
    }

    /// Leave the current screen for the list.
    pub fn cancel(&mut self) {
        self.controller.on_cancel();
        self.sync_screen();
    }

    /// Submit the open form. Returns `None` when the current screen has no form.
    pub async fn submit(&mut self) -> Option<Result<Record, AppError>> {
        let form = self.form.as_mut()?;
        let result = form
            .submit(
                &mut self.store,
                &mut self.controller,
                self.api.as_ref(),
                self.notifier.as_ref(),
                self.discard_stale,
            )
            .await;
        if result.is_ok() {
            self.sync_screen();
        }
        Some(result)
    }

    pub fn request_delete(&self, id: i64) -> PendingDelete {
        self.list.request_delete(id)
    }

    /// Run a confirmed delete. A screen showing the deleted record falls back to the list.
    pub async fn confirm_delete(&mut self, pending: PendingDelete) -> Result<(), AppError> {
        let id = pending.id();
        self.list
            .confirm_delete(
                pending,
                &mut self.store,
                self.api.as_ref(),
                self.notifier.as_ref(),
            )
            .await?;

        if self.controller.target().is_some_and(|r| r.id == id) {
            tracing::debug!("Record {} was open on the {} screen", id, self.mode().name());
            self.controller.on_cancel();
            self.sync_screen();
        }
        Ok(())
    }

    fn loaded(&self, id: i64) -> Result<Record, AppError> {
        self.store
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Record {} is not in the list", id)))
    }

    /// Rebuild per-screen state after a controller transition.
    fn sync_screen(&mut self) {
        self.form = FormView::from_mode(self.controller.mode());
        let target = self.controller.target().cloned();
        if self.store.selected() != target.as_ref() {
            self.store.dispatch(Action::SetSelected(target));
        }
    }
}
