use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// Path the vendor serves its API on.
pub const API_PATH: &str = "/panel/api";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub group_id: Option<u64>,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub shared_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: u64,
    pub keyword: String,
    pub category_id: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
}

/// In-memory account data behind the fake endpoint.
#[derive(Debug, Default)]
pub struct Store {
    projects: BTreeMap<u64, Project>,
    groups: BTreeMap<u64, Group>,
    next_id: u64,
}

/// Application-level failure, reported inside a 200 response like the
/// vendor does.
#[derive(Debug, PartialEq)]
pub struct Failure {
    pub code: u16,
    pub message: String,
}

impl Failure {
    fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn to_json(&self) -> Value {
        json!({"status": "error", "error": {"code": self.code, "message": self.message}})
    }
}

pub struct AppState {
    token: String,
    store: RwLock<Store>,
}

pub type Shared = Arc<AppState>;

pub fn app(token: &str) -> Router {
    let state: Shared = Arc::new(AppState {
        token: token.to_string(),
        store: RwLock::new(Store::default()),
    });
    Router::new().route(API_PATH, post(handle)).with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

async fn handle(State(state): State<Shared>, headers: HeaderMap, body: String) -> (StatusCode, Json<Value>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.starts_with("text/plain") {
        let failure = Failure::new(415, format!("unsupported content type {content_type:?}"));
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, Json(failure.to_json()));
    }

    let request = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => map,
        _ => {
            let failure = Failure::new(400, "request body must be a JSON object");
            return (StatusCode::BAD_REQUEST, Json(failure.to_json()));
        }
    };

    if request.get("token").and_then(Value::as_str) != Some(state.token.as_str()) {
        return (StatusCode::OK, Json(Failure::new(401, "invalid token").to_json()));
    }
    let method = request.get("method").and_then(Value::as_str).unwrap_or("");

    let outcome = {
        let mut store = state.store.write().await;
        store.dispatch(method, &request)
    };
    match outcome {
        Ok(result) => {
            info!(method, "handled");
            (StatusCode::OK, Json(json!({"status": "ok", "result": result})))
        }
        Err(failure) => {
            debug!(method, code = failure.code, message = %failure.message, "rejected");
            (StatusCode::OK, Json(failure.to_json()))
        }
    }
}

impl Store {
    /// Run one vendor method against the store.
    pub fn dispatch(&mut self, method: &str, req: &Map<String, Value>) -> Result<Value, Failure> {
        match method {
            "balance" => Ok(json!([{"currency": "RUB", "amount": 1500.0}])),
            "projects" => Ok(json!(self.projects.values().collect::<Vec<_>>())),
            "project" => {
                let project = self.project(required_id(req, "project_id")?)?;
                Ok(json!({
                    "id": project.id,
                    "name": project.name,
                    "group_id": project.group_id,
                    "keywords": project.keywords.len(),
                }))
            }
            "projectCreate" => {
                let name = required_str(req, "name")?;
                let group_id = optional_id(req, "group_id");
                if let Some(group_id) = group_id {
                    if !self.groups.contains_key(&group_id) {
                        return Err(Failure::new(404, "group not found"));
                    }
                }
                let id = self.next_id();
                self.projects.insert(
                    id,
                    Project {
                        id,
                        name: name.to_string(),
                        group_id,
                        keywords: Vec::new(),
                        shared_url: None,
                    },
                );
                Ok(json!({"id": id}))
            }
            "projectRename" => {
                let name = required_str(req, "name")?.to_string();
                let project = self.project_mut(required_id(req, "project_id")?)?;
                project.name = name;
                Ok(json!(true))
            }
            "projectDelete" => {
                let id = required_id(req, "project_id")?;
                self.projects
                    .remove(&id)
                    .map(|_| json!(true))
                    .ok_or_else(|| Failure::new(404, "project not found"))
            }
            "groups" => {
                let groups: Vec<&Group> = self.groups.values().collect();
                Ok(json!(paginate(&groups, req)))
            }
            "groupAdd" => {
                let name = required_str(req, "group")?.to_string();
                let id = self.next_id();
                self.groups.insert(id, Group { id, name });
                Ok(json!({"id": id}))
            }
            "groupDelete" => {
                let id = required_id(req, "groupId")?;
                self.groups
                    .remove(&id)
                    .ok_or_else(|| Failure::new(404, "group not found"))?;
                for project in self.projects.values_mut() {
                    if project.group_id == Some(id) {
                        project.group_id = None;
                    }
                }
                Ok(json!(true))
            }
            "projectKeywordsAdd" => self.keywords_add(req),
            "projectKeywords" => {
                let project = self.project(required_id(req, "project_id")?)?;
                let category_id = optional_id(req, "category_id");
                let key_ids: Option<Vec<u64>> = req
                    .get("key_ids")
                    .and_then(Value::as_array)
                    .map(|ids| ids.iter().filter_map(Value::as_u64).collect());
                let search = req.get("search").and_then(Value::as_str).map(str::to_lowercase);
                let keywords: Vec<&Keyword> = project
                    .keywords
                    .iter()
                    .filter(|k| category_id.is_none() || k.category_id == category_id)
                    .filter(|k| key_ids.as_ref().is_none_or(|ids| ids.contains(&k.id)))
                    .filter(|k| search.as_ref().is_none_or(|s| k.keyword.to_lowercase().contains(s)))
                    .collect();
                Ok(json!(paginate(&keywords, req)))
            }
            "projectKeywordsDelete" => {
                let ids = required_ids(req, "keyword_ids")?;
                let project = self.project_mut(required_id(req, "project_id")?)?;
                let before = project.keywords.len();
                project.keywords.retain(|k| !ids.contains(&k.id));
                Ok(json!({"deleted": before - project.keywords.len()}))
            }
            "projectSharedUrlCreate" => {
                let project = self.project_mut(required_id(req, "project_id")?)?;
                let url = format!("https://spyserp.com/shared/{}", Uuid::new_v4());
                project.shared_url = Some(url.clone());
                Ok(json!({"url": url}))
            }
            "projectSharedUrlGet" => {
                let project = self.project(required_id(req, "project_id")?)?;
                Ok(json!({"url": project.shared_url}))
            }
            "" => Err(Failure::new(400, "method is missing")),
            other => Err(Failure::new(404, format!("unknown method {other}"))),
        }
    }

    fn keywords_add(&mut self, req: &Map<String, Value>) -> Result<Value, Failure> {
        let project_id = required_id(req, "project_id")?;
        let keywords = req
            .get("keywords")
            .and_then(Value::as_array)
            .ok_or_else(|| Failure::new(422, "keywords must be an array"))?;
        if keywords.len() > 1000 {
            return Err(Failure::new(422, "no more than 1000 keywords per call"));
        }
        let category_id = optional_id(req, "category_id");
        let skip_failed = flag(req, "skipFailed");

        let mut accepted = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            match keyword.as_str().map(str::trim).filter(|k| !k.is_empty()) {
                Some(k) => accepted.push(k.to_string()),
                None if skip_failed => continue,
                None => return Err(Failure::new(422, format!("invalid keyword {keyword}"))),
            }
        }

        self.project(project_id)?;
        let mut ids = Vec::with_capacity(accepted.len());
        for keyword in accepted {
            let id = self.next_id();
            ids.push(id);
            self.project_mut(project_id)?.keywords.push(Keyword {
                id,
                keyword,
                category_id,
            });
        }
        Ok(json!({"added": ids.len(), "ids": ids}))
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn project(&self, id: u64) -> Result<&Project, Failure> {
        self.projects
            .get(&id)
            .ok_or_else(|| Failure::new(404, "project not found"))
    }

    fn project_mut(&mut self, id: u64) -> Result<&mut Project, Failure> {
        self.projects
            .get_mut(&id)
            .ok_or_else(|| Failure::new(404, "project not found"))
    }
}

/// `false` is how clients spell "not supplied".
fn present<'a>(req: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    req.get(key).filter(|v| !matches!(v, Value::Bool(false) | Value::Null))
}

fn required_id(req: &Map<String, Value>, key: &str) -> Result<u64, Failure> {
    present(req, key)
        .and_then(as_id)
        .ok_or_else(|| Failure::new(422, format!("{key} is required")))
}

fn optional_id(req: &Map<String, Value>, key: &str) -> Option<u64> {
    present(req, key).and_then(as_id)
}

fn required_ids(req: &Map<String, Value>, key: &str) -> Result<Vec<u64>, Failure> {
    present(req, key)
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(as_id).collect())
        .ok_or_else(|| Failure::new(422, format!("{key} must be an array of ids")))
}

fn required_str<'a>(req: &'a Map<String, Value>, key: &str) -> Result<&'a str, Failure> {
    present(req, key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| Failure::new(422, format!("{key} is required")))
}

fn flag(req: &Map<String, Value>, key: &str) -> bool {
    match present(req, key) {
        Some(Value::Bool(b)) => *b,
        Some(v) => as_id(v).is_some_and(|n| n != 0),
        None => false,
    }
}

/// Ids arrive as numbers or numeric strings.
fn as_id(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

/// One page of `items`; `page` is 1-based, `pageSize` defaults to 100.
fn paginate<T: Serialize>(items: &[T], req: &Map<String, Value>) -> Value {
    let page = optional_id(req, "page").unwrap_or(1).max(1) as usize;
    let page_size = optional_id(req, "pageSize").unwrap_or(100).max(1) as usize;
    let start = (page - 1).saturating_mul(page_size);
    let slice: Vec<&T> = items.iter().skip(start).take(page_size).collect();
    json!({"total": items.len(), "page": page, "pageSize": page_size, "items": slice})
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn false_counts_as_absent() {
        let r = req(json!({"group_id": false, "page": 2}));
        assert_eq!(optional_id(&r, "group_id"), None);
        assert_eq!(optional_id(&r, "page"), Some(2));
    }

    #[test]
    fn ids_accept_numeric_strings() {
        let r = req(json!({"project_id": "17"}));
        assert_eq!(required_id(&r, "project_id"), Ok(17));
    }

    #[test]
    fn missing_required_id_is_422() {
        let err = required_id(&req(json!({"project_id": false})), "project_id").unwrap_err();
        assert_eq!(err.code, 422);
    }

    #[test]
    fn flags_accept_bool_and_numbers() {
        let r = req(json!({"a": true, "b": 1, "c": 0, "d": false}));
        assert!(flag(&r, "a"));
        assert!(flag(&r, "b"));
        assert!(!flag(&r, "c"));
        assert!(!flag(&r, "d"));
        assert!(!flag(&r, "missing"));
    }

    #[test]
    fn paginate_slices_items() {
        let items: Vec<u64> = (1..=5).collect();
        let page = paginate(&items, &req(json!({"page": 2, "pageSize": 2})));
        assert_eq!(page["total"], 5);
        assert_eq!(page["items"], json!([3, 4]));
    }

    #[test]
    fn paginate_defaults_when_unset() {
        let items = vec!["a", "b"];
        let page = paginate(&items, &req(json!({"page": false, "pageSize": false})));
        assert_eq!(page["page"], 1);
        assert_eq!(page["pageSize"], 100);
        assert_eq!(page["items"], json!(["a", "b"]));
    }

    #[test]
    fn project_serializes_without_internal_fields() {
        let project = Project {
            id: 1,
            name: "Test".to_string(),
            group_id: None,
            keywords: vec![Keyword {
                id: 2,
                keyword: "coffee".to_string(),
                category_id: None,
            }],
            shared_url: Some("https://spyserp.com/shared/x".to_string()),
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json, json!({"id": 1, "name": "Test", "group_id": null}));
    }

    #[test]
    fn keywords_add_rejects_blank_unless_skipped() {
        let mut store = Store::default();
        let created = store.dispatch("projectCreate", &req(json!({"name": "P"}))).unwrap();
        let id = created["id"].as_u64().unwrap();

        let err = store
            .dispatch(
                "projectKeywordsAdd",
                &req(json!({"project_id": id, "keywords": ["ok", " "], "skipFailed": false})),
            )
            .unwrap_err();
        assert_eq!(err.code, 422);

        let added = store
            .dispatch(
                "projectKeywordsAdd",
                &req(json!({"project_id": id, "keywords": ["ok", " "], "skipFailed": true})),
            )
            .unwrap();
        assert_eq!(added["added"], 1);
    }

    #[test]
    fn deleting_group_detaches_projects() {
        let mut store = Store::default();
        let group = store.dispatch("groupAdd", &req(json!({"group": "G"}))).unwrap();
        let group_id = group["id"].as_u64().unwrap();
        let project = store
            .dispatch("projectCreate", &req(json!({"name": "P", "group_id": group_id})))
            .unwrap();
        store.dispatch("groupDelete", &req(json!({"groupId": group_id}))).unwrap();

        let fetched = store
            .dispatch("project", &req(json!({"project_id": project["id"]})))
            .unwrap();
        assert_eq!(fetched["group_id"], Value::Null);
    }

    #[test]
    fn unknown_method_is_404() {
        let err = Store::default().dispatch("nope", &Map::new()).unwrap_err();
        assert_eq!(err.code, 404);
    }
}
