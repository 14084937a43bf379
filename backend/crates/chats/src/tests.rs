//! Router-level tests for the chats crate, backed by an in-memory store
//! that enforces the owner foreign key.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, TimeZone, Utc};
use kernel::id::{ChatId, UserId};
use platform::token::{TokenConfig, TokenService};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::{CreateChatInput, CreateChatUseCase, ListChatsInput, ListChatsUseCase};
use crate::domain::entity::chat::Chat;
use crate::domain::repository::ChatRepository;
use crate::domain::value_object::chat_title::ChatTitle;
use crate::error::{ChatError, ChatResult};
use crate::presentation::router::chats_router_generic;

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone, Default)]
struct MemoryChatRepository {
    /// Users that exist; inserts for anyone else fail like the FK would
    owners: Arc<Mutex<HashSet<UserId>>>,
    chats: Arc<Mutex<Vec<Chat>>>,
}

impl MemoryChatRepository {
    fn with_owner(owner: UserId) -> Self {
        let repo = Self::default();
        repo.owners.lock().unwrap().insert(owner);
        repo
    }

    fn len(&self) -> usize {
        self.chats.lock().unwrap().len()
    }
}

impl ChatRepository for MemoryChatRepository {
    async fn create(&self, chat: &Chat) -> ChatResult<()> {
        if !self.owners.lock().unwrap().contains(&chat.owner_id) {
            return Err(ChatError::OwnerNotFound);
        }
        self.chats.lock().unwrap().push(chat.clone());
        Ok(())
    }

    async fn find_by_id(&self, chat_id: &ChatId) -> ChatResult<Option<Chat>> {
        Ok(self
            .chats
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.chat_id == chat_id)
            .cloned())
    }

    async fn find_by_owner(
        &self,
        owner_id: &UserId,
        skip: i64,
        limit: i64,
    ) -> ChatResult<Vec<Chat>> {
        let mut chats: Vec<Chat> = self
            .chats
            .lock()
            .unwrap()
            .iter()
            .filter(|c| &c.owner_id == owner_id)
            .cloned()
            .collect();
        chats.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.chat_id.as_uuid().cmp(a.chat_id.as_uuid()))
        });

        Ok(chats
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn update(&self, chat: &Chat) -> ChatResult<()> {
        let mut chats = self.chats.lock().unwrap();
        let stored = chats
            .iter_mut()
            .find(|c| c.chat_id == chat.chat_id)
            .ok_or(ChatError::NotFound)?;
        *stored = chat.clone();
        Ok(())
    }

    async fn delete(&self, chat_id: &ChatId) -> ChatResult<()> {
        let mut chats = self.chats.lock().unwrap();
        let before = chats.len();
        chats.retain(|c| &c.chat_id != chat_id);
        if chats.len() == before {
            return Err(ChatError::NotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(&TokenConfig::new(15, 7, "test-secret", "HS256")).unwrap())
}

struct TestApp {
    router: Router,
    repo: MemoryChatRepository,
    tokens: Arc<TokenService>,
}

impl TestApp {
    fn new(owners: &[UserId]) -> Self {
        let repo = MemoryChatRepository::default();
        repo.owners.lock().unwrap().extend(owners.iter().copied());
        let tokens = token_service();
        let router = chats_router_generic(repo.clone(), tokens.clone());
        Self {
            router,
            repo,
            tokens,
        }
    }

    fn token_for(&self, user_id: &UserId) -> String {
        self.tokens.create_access_token(*user_id.as_uuid()).unwrap()
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        user_id: &UserId,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token_for(user_id)));
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn create(&self, owner: &UserId, title: &str) -> String {
        let (status, body) = self
            .send("POST", "/chats", owner, Some(json!({"title": title})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }
}

fn seeded_chat(owner: UserId, index: i64) -> Chat {
    let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let at = base + Duration::seconds(index);
    Chat {
        chat_id: ChatId::new(),
        owner_id: owner,
        title: ChatTitle::new(format!("chat {index}")).unwrap(),
        description: None,
        created_at: at,
        updated_at: at,
    }
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_and_get() {
    let owner = UserId::new();
    let app = TestApp::new(&[owner]);

    let (status, created) = app
        .send(
            "POST",
            "/chats",
            &owner,
            Some(json!({"title": "Weekly sync", "description": "Mondays"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Weekly sync");
    assert_eq!(created["description"], "Mondays");

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = app.send("GET", &format!("/chats/{id}"), &owner, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_for_missing_owner_leaves_store_unchanged() {
    let ghost = UserId::new();
    let app = TestApp::new(&[]);

    let (status, body) = app
        .send("POST", "/chats", &ghost, Some(json!({"title": "orphan"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
    assert_eq!(app.repo.len(), 0);
}

#[tokio::test]
async fn test_create_validation() {
    let owner = UserId::new();
    let app = TestApp::new(&[owner]);

    let (status, body) = app
        .send("POST", "/chats", &owner, Some(json!({"title": "x".repeat(251)})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "Title invalid");

    let (status, _) = app
        .send(
            "POST",
            "/chats",
            &owner,
            Some(json!({"title": "t", "user_id": owner.to_string()})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.repo.len(), 0);
}

#[tokio::test]
async fn test_requires_bearer() {
    let app = TestApp::new(&[]);
    let request = Request::builder().uri("/chats").body(Body::empty()).unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_pages_are_ordered_and_disjoint() {
    let owner = UserId::new();
    let repo = MemoryChatRepository::with_owner(owner);
    for i in 0..25 {
        repo.chats.lock().unwrap().push(seeded_chat(owner, i));
    }
    repo.chats.lock().unwrap().push(seeded_chat(UserId::new(), 100));

    let use_case = ListChatsUseCase::new(Arc::new(repo));
    let first = use_case
        .execute(&owner, ListChatsInput { skip: 0, limit: 10 })
        .await
        .unwrap();
    let second = use_case
        .execute(&owner, ListChatsInput { skip: 10, limit: 10 })
        .await
        .unwrap();

    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 10);
    assert!(first.windows(2).all(|w| w[0].created_at > w[1].created_at));
    assert!(second.windows(2).all(|w| w[0].created_at > w[1].created_at));
    assert!(first.last().unwrap().created_at > second[0].created_at);
    assert!(first.iter().all(|c| c.owner_id == owner));
    assert!(
        first
            .iter()
            .all(|a| second.iter().all(|b| a.chat_id != b.chat_id))
    );
    assert_eq!(first[0].title.as_str(), "chat 24");
}

#[tokio::test]
async fn test_list_query_bounds() {
    let owner = UserId::new();
    let app = TestApp::new(&[owner]);
    app.create(&owner, "a").await;

    let (status, body) = app.send("GET", "/chats", &owner, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    for uri in ["/chats?skip=-1", "/chats?limit=0", "/chats?limit=101", "/chats?skip=abc"] {
        let (status, _) = app.send("GET", uri, &owner, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }

    let (status, body) = app.send("GET", "/chats?skip=1&limit=100", &owner, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_only_returns_own_chats() {
    let alice = UserId::new();
    let bob = UserId::new();
    let app = TestApp::new(&[alice, bob]);
    app.create(&alice, "alice's").await;
    app.create(&bob, "bob's").await;

    let (_, body) = app.send("GET", "/chats", &bob, None).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["bob's"]);
}

// ============================================================================
// Ownership
// ============================================================================

#[tokio::test]
async fn test_non_owner_sees_not_found() {
    let alice = UserId::new();
    let mallory = UserId::new();
    let app = TestApp::new(&[alice, mallory]);
    let id = app.create(&alice, "private").await;
    let uri = format!("/chats/{id}");

    let (status, body) = app.send("GET", &uri, &mallory, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Chat not found");

    let (status, _) = app
        .send("PATCH", &uri, &mallory, Some(json!({"title": "pwned"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            "PUT",
            &uri,
            &mallory,
            Some(json!({"title": "pwned", "description": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("DELETE", &uri, &mallory, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.send("GET", &uri, &alice, None).await;
    assert_eq!(body["title"], "private");
    assert_eq!(app.repo.len(), 1);
}

#[tokio::test]
async fn test_unknown_chat() {
    let owner = UserId::new();
    let app = TestApp::new(&[owner]);
    let uri = format!("/chats/{}", ChatId::new());

    let (status, body) = app.send("GET", &uri, &owner, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Chat not found");
}

#[tokio::test]
async fn test_malformed_chat_id_is_problem_document() {
    let owner = UserId::new();
    let app = TestApp::new(&[owner]);

    for method in ["GET", "DELETE"] {
        let (status, body) = app.send(method, "/chats/not-a-uuid", &owner, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{method}");
        assert_eq!(body["status"], 422);
        assert_eq!(body["title"], "Unprocessable Entity");
    }

    let (status, body) = app
        .send("PATCH", "/chats/42", &owner, Some(json!({"title": "x"})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

// ============================================================================
// Updates and deletion
// ============================================================================

#[tokio::test]
async fn test_partial_update() {
    let owner = UserId::new();
    let app = TestApp::new(&[owner]);
    let (_, created) = app
        .send(
            "POST",
            "/chats",
            &owner,
            Some(json!({"title": "t", "description": "d"})),
        )
        .await;
    let uri = format!("/chats/{}", created["id"].as_str().unwrap());

    let (status, body) = app.send("PATCH", &uri, &owner, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (_, body) = app
        .send("PATCH", &uri, &owner, Some(json!({"title": "renamed"})))
        .await;
    assert_eq!(body["title"], "renamed");
    assert_eq!(body["description"], "d");

    let (_, body) = app
        .send(
            "PATCH",
            &uri,
            &owner,
            Some(json!({"title": null, "description": null})),
        )
        .await;
    assert_eq!(body["title"], "renamed");
    assert_eq!(body["description"], Value::Null);
}

#[tokio::test]
async fn test_full_update() {
    let owner = UserId::new();
    let app = TestApp::new(&[owner]);
    let id = app.create(&owner, "t").await;
    let uri = format!("/chats/{id}");

    let (status, _) = app
        .send("PUT", &uri, &owner, Some(json!({"title": "only title"})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = app
        .send(
            "PUT",
            &uri,
            &owner,
            Some(json!({"title": "new", "description": "desc"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "new");
    assert_eq!(body["description"], "desc");
}

#[tokio::test]
async fn test_delete() {
    let owner = UserId::new();
    let app = TestApp::new(&[owner]);
    let id = app.create(&owner, "t").await;
    let uri = format!("/chats/{id}");

    let (status, _) = app.send("DELETE", &uri, &owner, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.repo.len(), 0);

    let (status, _) = app.send("DELETE", &uri, &owner, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_use_case_for_missing_owner() {
    let repo = Arc::new(MemoryChatRepository::default());
    let result = CreateChatUseCase::new(repo.clone())
        .execute(
            &UserId::new(),
            CreateChatInput {
                title: "t".into(),
                description: None,
            },
        )
        .await;

    assert!(matches!(result, Err(ChatError::OwnerNotFound)));
    assert_eq!(repo.len(), 0);
}
