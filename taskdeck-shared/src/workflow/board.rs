use tracing::{debug, info, instrument, warn};

use super::{expire_on_unauthorized, rejection_message};
use crate::{
    api::TaskDeckClient,
    auth::AuthContext,
    models::{BoardStats, DEFAULT_PAGE_SIZE, PageQuery, Task, TaskPage},
    notify::{ErrorKind, FlowError, Notification},
    session::KeyValueStore,
};

pub const FETCH_FAILED: &str = "Failed to fetch tasks. Please try again.";
pub const ACCESS_DENIED: &str = "Access denied: Only administrators can delete tasks.";
pub const LOGIN_AGAIN: &str = "Please log in again to perform this action.";

const TASK_DELETED: &str = "Task deleted successfully!";
const DELETE_FAILED: &str = "Failed to delete task. Please try again.";

/// Fetch one page of tasks.
///
/// # Errors
/// Any failure maps to the retry message; a `401` also ends the session.
#[instrument(level = "debug", skip(client, auth))]
pub async fn fetch_page<S: KeyValueStore>(
    client: &TaskDeckClient,
    auth: &AuthContext<S>,
    query: PageQuery,
) -> Result<TaskPage, FlowError> {
    client.list_tasks(query).await.map_err(|err| {
        expire_on_unauthorized(auth, &err);
        FlowError::new(err.kind(), FETCH_FAILED)
    })
}

/// Delete a task. Non-admin sessions are refused without a request.
///
/// # Errors
/// Returns the access, re-login or generic failure message.
#[instrument(level = "debug", skip(client, auth))]
pub async fn remove_task<S: KeyValueStore>(
    client: &TaskDeckClient,
    auth: &AuthContext<S>,
    id: &str,
) -> Result<Notification, FlowError> {
    if !auth.is_admin() {
        debug!("delete refused for non-admin session");
        return Err(FlowError::new(ErrorKind::Authorization, ACCESS_DENIED));
    }
    match client.delete_task(id).await {
        Ok(()) => {
            info!(id, "task deleted");
            Ok(Notification::success(TASK_DELETED))
        }
        Err(err) if err.is_forbidden() => {
            Err(FlowError::new(ErrorKind::Authorization, ACCESS_DENIED))
        }
        Err(err) if err.is_unauthorized() => {
            expire_on_unauthorized(auth, &err);
            Err(FlowError::new(ErrorKind::Authentication, LOGIN_AGAIN))
        }
        Err(err) => Err(FlowError::new(
            ErrorKind::Server,
            rejection_message(&err, DELETE_FAILED),
        )),
    }
}

/// Dashboard state: the current page, a loading flag and the retry error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoard {
    page: TaskPage,
    page_size: u32,
    loading: bool,
    error: Option<String>,
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TaskBoard {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page: TaskPage::default(),
            page_size: page_size.max(1),
            loading: false,
            error: None,
        }
    }

    #[must_use]
    pub fn page(&self) -> &TaskPage {
        &self.page
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.page.tasks
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.page.page
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn stats(&self) -> BoardStats {
        self.page.stats()
    }

    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.page.has_next().then(|| self.page.page + 1)
    }

    #[must_use]
    pub fn previous_page(&self) -> Option<u32> {
        self.page.has_previous().then(|| self.page.page - 1)
    }

    /// Enter the loading state and return the query to send.
    pub fn begin_load(&mut self, page: u32) -> PageQuery {
        self.loading = true;
        self.error = None;
        PageQuery::new(page, self.page_size)
    }

    /// Apply a fetch result. Failures keep the previous page.
    pub fn finish_load(&mut self, result: Result<TaskPage, FlowError>) -> Option<Notification> {
        self.loading = false;
        match result {
            Ok(page) => {
                self.page = page;
                self.error = None;
                None
            }
            Err(err) => {
                warn!(error = %err, "keeping previous task page");
                self.error = Some(err.message.clone());
                Some(err.notification())
            }
        }
    }

    /// Load `page`. Returns an error notification on failure.
    pub async fn load<S: KeyValueStore>(
        &mut self,
        client: &TaskDeckClient,
        auth: &AuthContext<S>,
        page: u32,
    ) -> Option<Notification> {
        let query = self.begin_load(page);
        let result = fetch_page(client, auth, query).await;
        self.finish_load(result)
    }

    /// Reload the current page.
    pub async fn refresh<S: KeyValueStore>(
        &mut self,
        client: &TaskDeckClient,
        auth: &AuthContext<S>,
    ) -> Option<Notification> {
        self.load(client, auth, self.current_page()).await
    }

    /// Delete a task and refetch the current page on success. Returns the
    /// delete notification and, if the refetch failed, its error notification.
    ///
    /// # Errors
    /// See [`remove_task`]; the board is left untouched on failure.
    pub async fn delete<S: KeyValueStore>(
        &mut self,
        client: &TaskDeckClient,
        auth: &AuthContext<S>,
        id: &str,
    ) -> Result<(Notification, Option<Notification>), FlowError> {
        let note = remove_task(client, auth, id).await?;
        let refetch = self.refresh(client, auth).await;
        if refetch.is_some() {
            warn!(id, "task deleted but the page could not be refetched");
        }
        Ok((note, refetch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    fn page(number: u32, total_pages: u32, ids: &[&str]) -> TaskPage {
        TaskPage {
            tasks: ids
                .iter()
                .map(|id| Task {
                    id: (*id).to_string(),
                    title: format!("task {id}"),
                    description: String::new(),
                    status: TaskStatus::Pending,
                    created_at: None,
                })
                .collect(),
            page: number,
            total: u64::from(total_pages) * 10,
            total_pages,
        }
    }

    #[test]
    fn begin_load_clamps_and_flags() {
        let mut board = TaskBoard::new(0);
        assert_eq!(board.page_size(), 1);

        let query = board.begin_load(0);
        assert!(board.is_loading());
        assert_eq!(query, PageQuery { page: 1, limit: 1 });
    }

    #[test]
    fn failure_keeps_previous_page() {
        let mut board = TaskBoard::default();
        board.begin_load(1);
        assert!(board.finish_load(Ok(page(1, 2, &["a", "b"]))).is_none());

        board.begin_load(2);
        let note = board
            .finish_load(Err(FlowError::new(ErrorKind::Server, FETCH_FAILED)))
            .unwrap();

        assert!(note.is_error());
        assert_eq!(note.message, FETCH_FAILED);
        assert!(!board.is_loading());
        assert_eq!(board.error(), Some(FETCH_FAILED));
        assert_eq!(board.current_page(), 1);
        assert_eq!(board.tasks().len(), 2);
    }

    #[test]
    fn navigation_follows_page_metadata() {
        let mut board = TaskBoard::default();
        assert_eq!(board.next_page(), None);
        assert_eq!(board.previous_page(), None);

        board.finish_load(Ok(page(2, 3, &["x"])));
        assert_eq!(board.next_page(), Some(3));
        assert_eq!(board.previous_page(), Some(1));
        assert_eq!(board.stats().on_page, 1);
    }
}
