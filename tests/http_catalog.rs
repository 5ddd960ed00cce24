//! HTTP-level tests for the catalog transport and the Appwrite trending store,
//! run against a local axum server.

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use cinefind::domain::GENERIC_QUERY_ERROR;
use cinefind::storage::{AppwriteConfig, AppwriteTrendingStore, NewTrendingRecord, TrendingStore};
use cinefind::{HttpCatalog, MovieQueryService, QueryResult};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct Captured {
    method: String,
    path: String,
    query: String,
    headers: HeaderMap,
    body: Option<Value>,
}

type Log = Arc<Mutex<Vec<Captured>>>;

async fn start_test_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn capture(log: &Log, request: &Request, body: Option<Value>) {
    log.lock().unwrap().push(Captured {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().unwrap_or_default().to_string(),
        headers: request.headers().clone(),
        body,
    });
}

fn header<'a>(captured: &'a Captured, name: &str) -> Option<&'a str> {
    captured.headers.get(name).and_then(|v| v.to_str().ok())
}

// ---- catalog ----

async fn catalog_server(log: Log) -> SocketAddr {
    async fn search(State(log): State<Log>, request: Request) -> (StatusCode, String) {
        capture(&log, &request, None);
        let query = request.uri().query().unwrap_or_default();
        if query.contains("broken") {
            return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded".to_string());
        }
        let body = json!({
            "page": 1,
            "results": [
                { "id": 603, "title": "The Matrix", "vote_average": 8.2, "release_date": "1999-03-30" },
                { "id": 604, "title": "The Matrix Reloaded", "vote_average": 7.0 }
            ],
            "total_results": 2
        });
        (StatusCode::OK, body.to_string())
    }

    async fn discover(State(log): State<Log>, request: Request) -> Json<Value> {
        capture(&log, &request, None);
        Json(json!({ "results": [{ "id": 1, "title": "Popular" }] }))
    }

    let app = Router::new()
        .route("/3/search/movie", get(search))
        .route("/3/discover/movie", get(discover))
        .with_state(log);
    start_test_server(app).await
}

#[tokio::test]
async fn search_sends_bearer_token_and_accept_header() {
    let log = Log::default();
    let addr = catalog_server(log.clone()).await;
    let service = MovieQueryService::with_base_url(Arc::new(HttpCatalog::new("secret-token")), format!("http://{addr}/3"));

    let result = service.search("the matrix").await;

    let QueryResult::Success(movies) = result else {
        panic!("expected success, got {result:?}");
    };
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].release_year(), Some("1999"));

    let requests = log.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/3/search/movie");
    assert_eq!(requests[0].query, "query=the%20matrix");
    assert_eq!(header(&requests[0], "authorization"), Some("Bearer secret-token"));
    assert_eq!(header(&requests[0], "accept"), Some("application/json"));
}

#[tokio::test]
async fn empty_term_discovers_by_popularity() {
    let log = Log::default();
    let addr = catalog_server(log.clone()).await;
    let service = MovieQueryService::with_base_url(Arc::new(HttpCatalog::new("t")), format!("http://{addr}/3"));

    let result = service.search("").await;

    assert!(result.is_success());
    let requests = log.lock().unwrap().clone();
    assert_eq!(requests[0].path, "/3/discover/movie");
    assert_eq!(requests[0].query, "sort_by=popularity.desc");
}

#[tokio::test]
async fn server_error_becomes_generic_failure() {
    let log = Log::default();
    let addr = catalog_server(log).await;
    let service = MovieQueryService::with_base_url(Arc::new(HttpCatalog::new("t")), format!("http://{addr}/3"));

    assert_eq!(service.search("broken").await, QueryResult::Failure(GENERIC_QUERY_ERROR.to_string()));
}

#[tokio::test]
async fn unreachable_catalog_becomes_generic_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = MovieQueryService::with_base_url(Arc::new(HttpCatalog::new("t")), format!("http://{addr}/3"));

    assert_eq!(service.search("batman").await, QueryResult::Failure(GENERIC_QUERY_ERROR.to_string()));
}

// ---- appwrite ----

const DOCUMENTS: &str = "/v1/databases/db/collections/trending/documents";

fn document(id: &str, term: &str, count: u32) -> Value {
    json!({
        "$id": id,
        "$createdAt": "2025-03-01T10:00:00.000+00:00",
        "$updatedAt": "2025-03-01T10:05:00.000+00:00",
        "searchTerm": term,
        "count": count,
        "poster_url": "https://image.tmdb.org/t/p/w500/poster.jpg",
        "movie_id": 603
    })
}

async fn appwrite_server(log: Log) -> SocketAddr {
    async fn list(State(log): State<Log>, request: Request) -> Json<Value> {
        capture(&log, &request, None);
        let query = urlencoding::decode(request.uri().query().unwrap_or_default())
            .map(|q| q.into_owned())
            .unwrap_or_default();

        let documents = if query.contains("\"equal\"") {
            if query.contains("\"matrix\"") {
                vec![document("doc-1", "matrix", 4)]
            } else {
                vec![]
            }
        } else {
            vec![document("doc-2", "dune", 9), document("doc-1", "matrix", 4)]
        };
        Json(json!({ "total": documents.len(), "documents": documents }))
    }

    async fn create(State(log): State<Log>, request: Request) -> (StatusCode, Json<Value>) {
        let (parts, body) = request.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let request = Request::from_parts(parts, axum::body::Body::empty());
        capture(&log, &request, Some(body.clone()));

        let term = body["data"]["searchTerm"].as_str().unwrap_or_default();
        if term == "forbidden" {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "The current user is not authorized", "code": 401 })),
            );
        }
        (StatusCode::CREATED, Json(document("doc-new", term, 1)))
    }

    async fn update(State(log): State<Log>, Path(id): Path<String>, request: Request) -> Json<Value> {
        let (parts, body) = request.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let request = Request::from_parts(parts, axum::body::Body::empty());
        capture(&log, &request, Some(body.clone()));

        let count = u32::try_from(body["data"]["count"].as_u64().unwrap_or_default()).unwrap();
        Json(document(&id, "matrix", count))
    }

    let app = Router::new()
        .route(DOCUMENTS, get(list).post(create))
        .route(&format!("{DOCUMENTS}/{{id}}"), axum::routing::patch(update))
        .with_state(log);
    start_test_server(app).await
}

fn appwrite_store(addr: SocketAddr) -> AppwriteTrendingStore {
    AppwriteTrendingStore::new(AppwriteConfig {
        endpoint: format!("http://{addr}/v1"),
        project_id: "cinefind-project".to_string(),
        database_id: "db".to_string(),
        collection_id: "trending".to_string(),
        api_key: Some("server-key".to_string()),
    })
}

#[tokio::test]
async fn appwrite_lookup_sends_project_headers_and_equal_query() {
    let log = Log::default();
    let store = appwrite_store(appwrite_server(log.clone()).await);

    let found = store.find_by_term("matrix").await.unwrap().unwrap();
    assert_eq!(found.id, "doc-1");
    assert_eq!(found.count, 4);
    assert!(store.find_by_term("alien").await.unwrap().is_none());

    let requests = log.lock().unwrap().clone();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, DOCUMENTS);
    assert_eq!(header(&requests[0], "x-appwrite-project"), Some("cinefind-project"));
    assert_eq!(header(&requests[0], "x-appwrite-key"), Some("server-key"));

    let query = urlencoding::decode(&requests[0].query).unwrap().into_owned();
    assert!(query.starts_with("queries[]="), "query was {query}");
    assert!(query.contains(r#""attribute":"searchTerm""#));
}

#[tokio::test]
async fn appwrite_create_and_increment() {
    let log = Log::default();
    let store = appwrite_store(appwrite_server(log.clone()).await);

    let created = store
        .create(NewTrendingRecord::new("the matrix", "https://image.tmdb.org/t/p/w500/poster.jpg", 603))
        .await
        .unwrap();
    assert_eq!(created.count, 1);
    assert_eq!(created.search_term, "the matrix");

    let existing = store.find_by_term("matrix").await.unwrap().unwrap();
    let updated = store.increment_count(&existing).await.unwrap();
    assert_eq!(updated.count, 5);

    let requests = log.lock().unwrap().clone();
    let post = requests.iter().find(|r| r.method == "POST").unwrap();
    let post_body = post.body.as_ref().unwrap();
    assert_eq!(post_body["documentId"], "unique()");
    assert_eq!(post_body["data"]["count"], 1);
    assert_eq!(post_body["data"]["movie_id"], 603);

    let patch = requests.iter().find(|r| r.method == "PATCH").unwrap();
    assert_eq!(patch.path, format!("{DOCUMENTS}/doc-1"));
    assert_eq!(patch.body.as_ref().unwrap()["data"]["count"], 5);
}

#[tokio::test]
async fn appwrite_top_list_orders_by_count() {
    let log = Log::default();
    let store = appwrite_store(appwrite_server(log.clone()).await);

    let top = store.list_top(5).await.unwrap();
    assert_eq!(top.iter().map(|r| r.count).collect::<Vec<_>>(), vec![9, 4]);

    let requests = log.lock().unwrap().clone();
    let query = urlencoding::decode(&requests[0].query).unwrap().into_owned();
    assert!(query.contains(r#""method":"orderDesc""#), "query was {query}");
    assert!(query.contains(r#""method":"limit""#));
}

#[tokio::test]
async fn appwrite_errors_carry_server_message() {
    let log = Log::default();
    let store = appwrite_store(appwrite_server(log).await);

    let error = store
        .create(NewTrendingRecord::new("forbidden", "/no-movie.png", 1))
        .await
        .unwrap_err();
    let message = error.to_string();
    assert!(message.contains("401"), "{message}");
    assert!(message.contains("The current user is not authorized"), "{message}");
}
