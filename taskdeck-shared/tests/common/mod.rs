//! In-process stand-in for the TaskDeck backend.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Account {
    id: String,
    name: String,
    email: String,
    password: String,
    role: String,
}

impl Account {
    fn to_json(&self) -> Value {
        json!({
            "_id": self.id,
            "name": self.name,
            "email": self.email,
            "role": self.role,
        })
    }
}

#[derive(Debug, Default)]
struct Db {
    accounts: Vec<Account>,
    tokens: Vec<(String, String)>,
    tasks: Vec<Value>,
    next_id: u64,
    requests: usize,
    listing_down: bool,
}

impl Db {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn account_for(&self, headers: &HeaderMap) -> Option<Account> {
        let token = headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        let (_, account_id) = self.tokens.iter().find(|(t, _)| t == token)?;
        self.accounts.iter().find(|a| &a.id == account_id).cloned()
    }

    fn issue(&mut self, account: &Account) -> Value {
        let token = self.next_id("jwt-");
        self.tokens.push((token.clone(), account.id.clone()));
        json!({ "token": token, "user": account.to_json() })
    }
}

/// Handle to a running mock backend.
#[derive(Clone)]
pub struct MockBackend {
    pub base_url: String,
    db: Arc<Mutex<Db>>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let db = Arc::new(Mutex::new(Db::default()));
        let router = Router::new()
            .route("/api/auth/signin", post(sign_in))
            .route("/api/auth/signup", post(sign_up))
            .route("/api/tasks", get(list_tasks).post(create_task))
            .route(
                "/api/tasks/{id}",
                get(show_task).put(update_task).delete(delete_task),
            )
            .with_state(Arc::clone(&db));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            db,
        }
    }

    fn db(&self) -> MutexGuard<'_, Db> {
        self.db.lock().unwrap()
    }

    pub fn add_account(&self, name: &str, email: &str, password: &str, role: &str) {
        let mut db = self.db();
        let id = db.next_id("user-");
        db.accounts.push(Account {
            id,
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: role.into(),
        });
    }

    pub fn seed_tasks(&self, count: usize) {
        let mut db = self.db();
        for n in 1..=count {
            let id = db.next_id("task-");
            db.tasks.push(json!({
                "_id": id,
                "title": format!("Task {n}"),
                "description": format!("Details for task {n}"),
                "status": "Pending",
                "createdAt": "2024-05-01T10:00:00Z",
            }));
        }
    }

    /// Add a task under a caller-chosen id.
    pub fn insert_task(&self, id: &str, title: &str) {
        self.db().tasks.push(json!({
            "_id": id,
            "title": title,
            "description": "Inserted directly",
            "status": "Pending",
        }));
    }

    pub fn task_ids(&self) -> Vec<String> {
        self.db()
            .tasks
            .iter()
            .filter_map(|task| task["_id"].as_str().map(str::to_string))
            .collect()
    }

    /// Number of requests served so far.
    pub fn requests(&self) -> usize {
        self.db().requests
    }

    /// Make `GET /tasks` answer `500` from now on.
    pub fn break_listing(&self) {
        self.db().listing_down = true;
    }

    /// Invalidate every issued token.
    pub fn revoke_tokens(&self) {
        self.db().tokens.clear();
    }
}

type Shared = State<Arc<Mutex<Db>>>;

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn unauthorized() -> Response {
    reply(
        StatusCode::UNAUTHORIZED,
        json!({ "message": "Token is not valid" }),
    )
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

async fn sign_in(State(db): Shared, Json(body): Json<Credentials>) -> Response {
    let mut db = db.lock().unwrap();
    db.requests += 1;
    let account = db
        .accounts
        .iter()
        .find(|a| a.email == body.email && a.password == body.password)
        .cloned();
    match account {
        Some(account) => {
            let payload = db.issue(&account);
            reply(StatusCode::OK, payload)
        }
        None => reply(
            StatusCode::BAD_REQUEST,
            json!({ "msg": "Invalid credentials" }),
        ),
    }
}

#[derive(Deserialize)]
struct Registration {
    name: String,
    email: String,
    password: String,
    role: String,
}

async fn sign_up(State(db): Shared, Json(body): Json<Registration>) -> Response {
    let mut db = db.lock().unwrap();
    db.requests += 1;
    if db.accounts.iter().any(|a| a.email == body.email) {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "msg": "User already exists" }),
        );
    }
    let account = Account {
        id: db.next_id("user-"),
        name: body.name,
        email: body.email,
        password: body.password,
        role: body.role,
    };
    db.accounts.push(account.clone());
    let payload = db.issue(&account);
    reply(StatusCode::CREATED, payload)
}

#[derive(Deserialize)]
struct Paging {
    page: Option<usize>,
    limit: Option<usize>,
}

async fn list_tasks(State(db): Shared, headers: HeaderMap, Query(paging): Query<Paging>) -> Response {
    let mut db = db.lock().unwrap();
    db.requests += 1;
    if db.account_for(&headers).is_none() {
        return unauthorized();
    }
    if db.listing_down {
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "message": "Server Error" }),
        );
    }
    let page = paging.page.unwrap_or(1).max(1);
    let limit = paging.limit.unwrap_or(10).max(1);
    let total = db.tasks.len();
    let total_pages = total.div_ceil(limit).max(1);
    let tasks: Vec<Value> = db
        .tasks
        .iter()
        .skip((page - 1) * limit)
        .take(limit)
        .cloned()
        .collect();
    reply(
        StatusCode::OK,
        json!({ "tasks": tasks, "page": page, "total": total, "totalPages": total_pages }),
    )
}

async fn show_task(State(db): Shared, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let mut db = db.lock().unwrap();
    db.requests += 1;
    if db.account_for(&headers).is_none() {
        return unauthorized();
    }
    match db.tasks.iter().find(|task| task["_id"] == id.as_str()) {
        Some(task) => reply(StatusCode::OK, task.clone()),
        None => reply(
            StatusCode::NOT_FOUND,
            json!({ "message": "Task not found" }),
        ),
    }
}

#[derive(Deserialize)]
struct Draft {
    title: String,
    description: String,
    status: String,
}

async fn create_task(State(db): Shared, headers: HeaderMap, Json(draft): Json<Draft>) -> Response {
    let mut db = db.lock().unwrap();
    db.requests += 1;
    if db.account_for(&headers).is_none() {
        return unauthorized();
    }
    let id = db.next_id("task-");
    let task = json!({
        "_id": id,
        "title": draft.title,
        "description": draft.description,
        "status": draft.status,
        "createdAt": "2024-05-02T08:30:00Z",
    });
    db.tasks.push(task.clone());
    reply(StatusCode::CREATED, task)
}

async fn update_task(
    State(db): Shared,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(draft): Json<Draft>,
) -> Response {
    let mut db = db.lock().unwrap();
    db.requests += 1;
    if db.account_for(&headers).is_none() {
        return unauthorized();
    }
    let Some(task) = db.tasks.iter_mut().find(|task| task["_id"] == id.as_str()) else {
        return reply(
            StatusCode::NOT_FOUND,
            json!({ "message": "Task not found" }),
        );
    };
    task["title"] = json!(draft.title);
    task["description"] = json!(draft.description);
    task["status"] = json!(draft.status);
    reply(StatusCode::OK, task.clone())
}

async fn delete_task(State(db): Shared, headers: HeaderMap, Path(id): Path<String>) -> Response {
    let mut db = db.lock().unwrap();
    db.requests += 1;
    let Some(account) = db.account_for(&headers) else {
        return unauthorized();
    };
    if account.role != "admin" {
        return reply(
            StatusCode::FORBIDDEN,
            json!({ "message": "Access denied" }),
        );
    }
    let before = db.tasks.len();
    db.tasks.retain(|task| task["_id"] != id.as_str());
    if db.tasks.len() == before {
        return reply(
            StatusCode::NOT_FOUND,
            json!({ "message": "Task not found" }),
        );
    }
    reply(StatusCode::OK, json!({ "message": "Task removed" }))
}
