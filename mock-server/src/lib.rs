//! In-memory stand-in for a Backlog tenant.
//!
//! Serves a subset of `/api/v2` (space, users, groups, issues) the way the
//! real service does: every request must carry `apiKey` in its query string,
//! writes arrive as multipart forms, list fields use the `key[]` form, and
//! failures answer with `{"errors":[{"message":..}]}`.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

/// Key accepted by [`app`].
pub const API_KEY: &str = "test-key";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub user_id: String,
    pub name: String,
    pub mail_address: String,
    pub role_type: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: u64,
    pub issue_key: String,
    pub project_id: u64,
    pub summary: String,
    pub description: Option<String>,
    pub priority_id: u64,
    pub issue_type_id: u64,
    pub status_id: u64,
    pub category_id: Vec<u64>,
    pub assignee_id: Option<u64>,
    pub estimated_hours: Option<f64>,
    /// `customField_{id}` values exactly as received.
    pub custom_fields: BTreeMap<String, String>,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    users: BTreeMap<u64, User>,
    groups: BTreeMap<u64, Group>,
    issues: BTreeMap<u64, Issue>,
}

impl Store {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    api_key: Arc<str>,
}

/// Router accepting [`API_KEY`].
pub fn app() -> Router {
    app_with_key(API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        api_key: Arc::from(api_key),
    };
    Router::new()
        .route("/api/v2/space", get(get_space))
        .route("/api/v2/users", get(list_users).post(create_user))
        .route(
            "/api/v2/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/api/v2/groups", get(list_groups).post(create_group))
        .route(
            "/api/v2/groups/{id}",
            get(get_group).patch(update_group).delete(delete_group),
        )
        .route("/api/v2/issues", get(list_issues).post(create_issue))
        .route("/api/v2/issues/{key}", get(get_issue).patch(update_issue))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Errors and request decoding
// ---------------------------------------------------------------------------

/// Error response in the service's JSON shape.
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    message: String,
}

impl Failure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("No {what}."))
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = json!({ "errors": [{ "message": self.message }] });
        (self.status, Json(body)).into_response()
    }
}

async fn require_api_key(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = pairs
        .iter()
        .any(|(k, v)| k == "apiKey" && v.as_str() == &*state.api_key);
    if !authorized {
        tracing::debug!(uri = %request.uri().path(), "rejecting request without a valid apiKey");
        return Failure::new(StatusCode::UNAUTHORIZED, "Authentication failure.").into_response();
    }
    next.run(request).await
}

/// Decoded `key=value` pairs of a query string or multipart form.
struct Fields(Vec<(String, String)>);

impl Fields {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, Failure> {
        let mut fields = Vec::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Failure::bad_request(format!("malformed form: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let value = field
                .text()
                .await
                .map_err(|e| Failure::bad_request(format!("malformed field: {e}")))?;
            fields.push((name, value));
        }
        Ok(Self(fields))
    }

    fn text(&self, name: &str) -> Option<String> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    }

    fn texts(&self, name: &str) -> Vec<String> {
        let key = format!("{name}[]");
        self.0
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    fn required(&self, name: &str) -> Result<String, Failure> {
        self.text(name)
            .ok_or_else(|| Failure::bad_request(format!("Please specify {name}.")))
    }

    fn number<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>, Failure> {
        self.text(name)
            .map(|v| {
                v.parse()
                    .map_err(|_| Failure::bad_request(format!("Invalid {name}: {v}")))
            })
            .transpose()
    }

    fn required_number<T: std::str::FromStr>(&self, name: &str) -> Result<T, Failure> {
        self.number(name)?
            .ok_or_else(|| Failure::bad_request(format!("Please specify {name}.")))
    }

    fn numbers(&self, name: &str) -> Result<Vec<u64>, Failure> {
        self.texts(name)
            .into_iter()
            .map(|v| {
                v.parse()
                    .map_err(|_| Failure::bad_request(format!("Invalid {name}[]: {v}")))
            })
            .collect()
    }

    fn custom_fields(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.0
            .iter()
            .filter(|(k, _)| k.starts_with("customField_"))
            .cloned()
    }
}

// ---------------------------------------------------------------------------
// Space
// ---------------------------------------------------------------------------

async fn get_space() -> Json<serde_json::Value> {
    Json(json!({
        "spaceKey": "acme",
        "name": "Acme",
        "ownerId": 1,
        "lang": "en",
        "timezone": "UTC",
        "textFormattingRule": "markdown"
    }))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let store = state.db.read().await;
    Json(store.users.values().cloned().collect())
}

async fn create_user(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<User>), Failure> {
    let form = Fields::from_multipart(multipart).await?;
    let user_id = form.required("userId")?;
    form.required("password")?;
    let name = form.required("name")?;
    let mail_address = form.required("mailAddress")?;
    let role_type = form.required_number("roleType")?;

    let mut store = state.db.write().await;
    let user = User {
        id: store.allocate_id(),
        user_id,
        name,
        mail_address,
        role_type,
    };
    store.users.insert(user.id, user.clone());
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<User>, Failure> {
    let store = state.db.read().await;
    store
        .users
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure::not_found("user"))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    multipart: Multipart,
) -> Result<Json<User>, Failure> {
    let form = Fields::from_multipart(multipart).await?;
    let mut store = state.db.write().await;
    let user = store.users.get_mut(&id).ok_or_else(|| Failure::not_found("user"))?;
    if let Some(name) = form.text("name") {
        user.name = name;
    }
    if let Some(mail) = form.text("mailAddress") {
        user.mail_address = mail;
    }
    if let Some(role) = form.number("roleType")? {
        user.role_type = role;
    }
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, Failure> {
    let mut store = state.db.write().await;
    store
        .users
        .remove(&id)
        .map(Json)
        .ok_or_else(|| Failure::not_found("user"))
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

async fn list_groups(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Group>>, Failure> {
    let query = Fields(pairs);
    let count: usize = query.number("count")?.unwrap_or(20);
    let offset: usize = query.number("offset")?.unwrap_or(0);
    let store = state.db.read().await;
    let mut groups: Vec<Group> = store.groups.values().cloned().collect();
    if query.text("order").as_deref() == Some("desc") {
        groups.reverse();
    }
    Ok(Json(groups.into_iter().skip(offset).take(count).collect()))
}

async fn create_group(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Group>), Failure> {
    let form = Fields::from_multipart(multipart).await?;
    let name = form.required("name")?;
    let mut store = state.db.write().await;
    let group = Group {
        id: store.allocate_id(),
        name,
        members: form.texts("members"),
    };
    store.groups.insert(group.id, group.clone());
    Ok((StatusCode::CREATED, Json(group)))
}

async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Group>, Failure> {
    let store = state.db.read().await;
    store
        .groups
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure::not_found("group"))
}

async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    multipart: Multipart,
) -> Result<Json<Group>, Failure> {
    let form = Fields::from_multipart(multipart).await?;
    let mut store = state.db.write().await;
    let group = store.groups.get_mut(&id).ok_or_else(|| Failure::not_found("group"))?;
    if let Some(name) = form.text("name") {
        group.name = name;
    }
    let members = form.texts("members");
    if !members.is_empty() {
        group.members = members;
    }
    Ok(Json(group.clone()))
}

async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Group>, Failure> {
    let mut store = state.db.write().await;
    store
        .groups
        .remove(&id)
        .map(Json)
        .ok_or_else(|| Failure::not_found("group"))
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

async fn list_issues(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Issue>>, Failure> {
    let query = Fields(pairs);
    let project_ids = query.numbers("projectId")?;
    let status_ids = query.numbers("statusId")?;
    let keyword = query.text("keyword");
    let count: usize = query.number("count")?.unwrap_or(20);
    let offset: usize = query.number("offset")?.unwrap_or(0);

    let store = state.db.read().await;
    let issues = store
        .issues
        .values()
        .filter(|i| project_ids.is_empty() || project_ids.contains(&i.project_id))
        .filter(|i| status_ids.is_empty() || status_ids.contains(&i.status_id))
        .filter(|i| keyword.as_deref().map_or(true, |k| i.summary.contains(k)))
        .skip(offset)
        .take(count)
        .cloned()
        .collect();
    Ok(Json(issues))
}

async fn create_issue(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Issue>), Failure> {
    let form = Fields::from_multipart(multipart).await?;
    let mut issue = Issue {
        id: 0,
        issue_key: String::new(),
        project_id: form.required_number("projectId")?,
        summary: form.required("summary")?,
        description: form.text("description"),
        priority_id: form.required_number("priorityId")?,
        issue_type_id: form.required_number("issueTypeId")?,
        status_id: 1,
        category_id: form.numbers("categoryId")?,
        assignee_id: form.number("assigneeId")?,
        estimated_hours: form.number("estimatedHours")?,
        custom_fields: form.custom_fields().collect(),
    };
    let mut store = state.db.write().await;
    issue.id = store.allocate_id();
    issue.issue_key = format!("PRJ-{}", issue.id);
    store.issues.insert(issue.id, issue.clone());
    Ok((StatusCode::CREATED, Json(issue)))
}

/// Id of the issue addressed by `key`, either its issue key or its numeric id.
fn issue_id(store: &Store, key: &str) -> Result<u64, Failure> {
    store
        .issues
        .values()
        .find(|i| i.issue_key == key || i.id.to_string() == key)
        .map(|i| i.id)
        .ok_or_else(|| Failure::not_found("issue"))
}

async fn get_issue(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Issue>, Failure> {
    let store = state.db.read().await;
    let id = issue_id(&store, &key)?;
    store
        .issues
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure::not_found("issue"))
}

async fn update_issue(
    State(state): State<AppState>,
    Path(key): Path<String>,
    multipart: Multipart,
) -> Result<Json<Issue>, Failure> {
    let form = Fields::from_multipart(multipart).await?;
    let mut store = state.db.write().await;
    let id = issue_id(&store, &key)?;
    let issue = store
        .issues
        .get_mut(&id)
        .ok_or_else(|| Failure::not_found("issue"))?;
    if let Some(summary) = form.text("summary") {
        issue.summary = summary;
    }
    if let Some(description) = form.text("description") {
        issue.description = Some(description);
    }
    if let Some(status_id) = form.number("statusId")? {
        issue.status_id = status_id;
    }
    if let Some(assignee_id) = form.number("assigneeId")? {
        issue.assignee_id = Some(assignee_id);
    }
    let categories = form.numbers("categoryId")?;
    if !categories.is_empty() {
        issue.category_id = categories;
    }
    issue.custom_fields.extend(form.custom_fields());
    Ok(Json(issue.clone()))
}
