use tracing::{info, instrument};

use super::{expire_on_unauthorized, rejection_message};
use crate::{
    api::{ClientError, TaskDeckClient},
    auth::AuthContext,
    models::{Task, TaskDraft, TaskStatus},
    notify::{FlowError, Notification},
    session::KeyValueStore,
};

const TITLE_REQUIRED: &str = "Title is required";
const DESCRIPTION_REQUIRED: &str = "Description is required";
const TASK_ADDED: &str = "Task Added Successfully!";
const ADD_FAILED: &str = "Error Adding Task";
const LOAD_FAILED: &str = "Failed to load task";
const TASK_UPDATED: &str = "Task Updated Successfully!";
const UPDATE_FAILED: &str = "Error Updating Task";

/// Editable fields shared by the add and edit views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl TaskForm {
    /// Pre-fill from an existing task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
        }
    }

    /// # Errors
    /// Fails when the title or description is blank after trimming.
    pub fn validate(&self) -> Result<TaskDraft, FlowError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FlowError::validation(TITLE_REQUIRED));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(FlowError::validation(DESCRIPTION_REQUIRED));
        }
        Ok(TaskDraft {
            title: title.to_string(),
            description: description.to_string(),
            status: self.status,
        })
    }

    /// # Errors
    /// Returns a notification-ready [`FlowError`]; no request is sent when
    /// validation fails.
    #[instrument(level = "debug", skip_all)]
    pub async fn create<S: KeyValueStore>(
        &self,
        client: &TaskDeckClient,
        auth: &AuthContext<S>,
    ) -> Result<(Task, Notification), FlowError> {
        let draft = self.validate()?;
        let task = client
            .create_task(&draft)
            .await
            .map_err(|err| failure(auth, &err, ADD_FAILED))?;
        info!(id = %task.id, "task created");
        Ok((task, Notification::success(TASK_ADDED)))
    }

    /// # Errors
    /// Returns a notification-ready [`FlowError`]; no request is sent when
    /// validation fails.
    #[instrument(level = "debug", skip(self, client, auth))]
    pub async fn update<S: KeyValueStore>(
        &self,
        client: &TaskDeckClient,
        auth: &AuthContext<S>,
        id: &str,
    ) -> Result<(Task, Notification), FlowError> {
        let draft = self.validate()?;
        let task = client
            .update_task(id, &draft)
            .await
            .map_err(|err| failure(auth, &err, UPDATE_FAILED))?;
        info!(id = %task.id, "task updated");
        Ok((task, Notification::success(TASK_UPDATED)))
    }
}

/// Fetch a task for the edit view.
///
/// # Errors
/// Any failure maps to "Failed to load task".
#[instrument(level = "debug", skip(client, auth))]
pub async fn load_task<S: KeyValueStore>(
    client: &TaskDeckClient,
    auth: &AuthContext<S>,
    id: &str,
) -> Result<TaskForm, FlowError> {
    match client.get_task(id).await {
        Ok(task) => Ok(TaskForm::from_task(&task)),
        Err(err) => {
            expire_on_unauthorized(auth, &err);
            Err(FlowError::new(err.kind(), LOAD_FAILED))
        }
    }
}

fn failure<S: KeyValueStore>(
    auth: &AuthContext<S>,
    error: &ClientError,
    fallback: &str,
) -> FlowError {
    expire_on_unauthorized(auth, error);
    FlowError::new(error.kind(), rejection_message(error, fallback))
}
