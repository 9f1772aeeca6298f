use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use event_service::domain::category::errors::CategoryError;
use event_service::domain::category::models::Category;
use event_service::domain::category::models::CategoryId;
use event_service::domain::category::models::CategoryName;
use event_service::domain::category::models::NewCategory;
use event_service::domain::category::ports::CategoryRepository;
use event_service::domain::category::service::CategoryService;
use event_service::domain::event::errors::EventError;
use event_service::domain::event::models::DateRange;
use event_service::domain::event::models::Event;
use event_service::domain::event::models::EventId;
use event_service::domain::event::models::NewEvent;
use event_service::domain::event::ports::EventRepository;
use event_service::domain::event::service::EventService;
use event_service::domain::user::models::UserId;
use event_service::inbound::http::create_router;
use serde_json::Value;
use tokio::sync::Mutex;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const JWT_ISSUER: &str = "calendar-auth";

/// Event row as stored: the category is a reference, joined on read.
#[derive(Clone)]
struct StoredEvent {
    event: Event,
    category_id: Option<CategoryId>,
}

#[derive(Default)]
struct StoreState {
    categories: Vec<Category>,
    events: Vec<StoredEvent>,
    next_category_id: i64,
    next_event_id: i64,
}

impl StoreState {
    fn join(&self, stored: &StoredEvent) -> Event {
        let category = stored
            .category_id
            .and_then(|id| self.categories.iter().find(|c| c.id == id).cloned());
        Event {
            category,
            ..stored.event.clone()
        }
    }

    fn category_exists(&self, category: Option<&Category>) -> bool {
        category.map_or(true, |c| self.categories.iter().any(|s| s.id == c.id))
    }
}

/// In-memory tables with the same unique key and `ON DELETE SET NULL`
/// behavior as the PostgreSQL schema.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

pub struct InMemoryCategoryRepository {
    store: InMemoryStore,
}

pub struct InMemoryEventRepository {
    store: InMemoryStore,
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: NewCategory) -> Result<Category, CategoryError> {
        let mut state = self.store.state.lock().await;
        if state
            .categories
            .iter()
            .any(|c| c.user_id == category.user_id && c.name == category.name)
        {
            return Err(CategoryError::DuplicateCategory(category.name.to_string()));
        }
        state.next_category_id += 1;
        let category = category.into_category(CategoryId(state.next_category_id));
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn find_by_id_and_owner(
        &self,
        id: CategoryId,
        user_id: UserId,
    ) -> Result<Option<Category>, CategoryError> {
        let state = self.store.state.lock().await;
        Ok(state
            .categories
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned())
    }

    async fn find_by_name_and_owner(
        &self,
        name: &CategoryName,
        user_id: UserId,
    ) -> Result<Option<Category>, CategoryError> {
        let state = self.store.state.lock().await;
        Ok(state
            .categories
            .iter()
            .find(|c| &c.name == name && c.user_id == user_id)
            .cloned())
    }

    async fn list_by_owner(&self, user_id: UserId) -> Result<Vec<Category>, CategoryError> {
        let state = self.store.state.lock().await;
        Ok(state
            .categories
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, category: Category) -> Result<Category, CategoryError> {
        let mut state = self.store.state.lock().await;
        if state.categories.iter().any(|c| {
            c.id != category.id && c.user_id == category.user_id && c.name == category.name
        }) {
            return Err(CategoryError::DuplicateCategory(category.name.to_string()));
        }
        let slot = state
            .categories
            .iter_mut()
            .find(|c| c.id == category.id && c.user_id == category.user_id)
            .ok_or(CategoryError::NotFound(category.id))?;
        *slot = category.clone();
        Ok(category)
    }

    async fn delete_by_id_and_owner(
        &self,
        id: CategoryId,
        user_id: UserId,
    ) -> Result<bool, CategoryError> {
        let mut state = self.store.state.lock().await;
        let before = state.categories.len();
        state
            .categories
            .retain(|c| !(c.id == id && c.user_id == user_id));
        let deleted = state.categories.len() < before;
        if deleted {
            for stored in state.events.iter_mut() {
                if stored.category_id == Some(id) {
                    stored.category_id = None;
                }
            }
        }
        Ok(deleted)
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event, EventError> {
        let mut state = self.store.state.lock().await;
        if !state.category_exists(event.category.as_ref()) {
            return Err(EventError::DatabaseError("foreign key violation".to_string()));
        }
        state.next_event_id += 1;
        let event = event.into_event(EventId(state.next_event_id));
        state.events.push(StoredEvent {
            category_id: event.category.as_ref().map(|c| c.id),
            event: event.clone(),
        });
        Ok(event)
    }

    async fn find_by_id_and_owner(
        &self,
        id: EventId,
        user_id: UserId,
    ) -> Result<Option<Event>, EventError> {
        let state = self.store.state.lock().await;
        Ok(state
            .events
            .iter()
            .find(|s| s.event.id == id && s.event.user_id == user_id)
            .map(|s| state.join(s)))
    }

    async fn list_by_owner(&self, user_id: UserId) -> Result<Vec<Event>, EventError> {
        let state = self.store.state.lock().await;
        let mut events: Vec<Event> = state
            .events
            .iter()
            .filter(|s| s.event.user_id == user_id)
            .map(|s| state.join(s))
            .collect();
        events.sort_by_key(|e| (e.start_date_time, e.id.0));
        Ok(events)
    }

    async fn list_by_owner_in_range(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Vec<Event>, EventError> {
        let events = self.list_by_owner(user_id).await?;
        Ok(events
            .into_iter()
            .filter(|e| range.contains(&e.start_date_time))
            .collect())
    }

    async fn update(&self, event: Event) -> Result<Event, EventError> {
        let mut state = self.store.state.lock().await;
        if !state.category_exists(event.category.as_ref()) {
            return Err(EventError::DatabaseError("foreign key violation".to_string()));
        }
        let slot = state
            .events
            .iter_mut()
            .find(|s| s.event.id == event.id && s.event.user_id == event.user_id)
            .ok_or(EventError::NotFound(event.id))?;
        *slot = StoredEvent {
            category_id: event.category.as_ref().map(|c| c.id),
            event: event.clone(),
        };
        Ok(event)
    }

    async fn delete_by_id_and_owner(
        &self,
        id: EventId,
        user_id: UserId,
    ) -> Result<bool, EventError> {
        let mut state = self.store.state.lock().await;
        let before = state.events.len();
        state
            .events
            .retain(|s| !(s.event.id == id && s.event.user_id == user_id));
        Ok(state.events.len() < before)
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Authenticator,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = InMemoryStore::default();
        let category_repository = Arc::new(InMemoryCategoryRepository {
            store: store.clone(),
        });
        let event_repository = Arc::new(InMemoryEventRepository { store });

        let category_service = Arc::new(CategoryService::new(Arc::clone(&category_repository)));
        let event_service = Arc::new(EventService::new(event_repository, category_repository));
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, JWT_ISSUER));

        let router = create_router(category_service, event_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator: Authenticator::new(JWT_SECRET, JWT_ISSUER),
        }
    }

    /// Token as auth-service would issue it for `user_id`
    pub fn token_for(&self, user_id: i64) -> String {
        let claims = Claims::for_user(
            user_id,
            format!("user{}", user_id),
            format!("user{}@example.com", user_id),
            JWT_ISSUER,
            24,
        );
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> String {
        self.authenticator
            .generate_token(claims)
            .expect("Failed to sign token")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path)).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path)).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Create a category and return its id
    pub async fn create_category(&self, token: &str, name: &str, color: &str) -> i64 {
        let response = self
            .post_authenticated("/categories", token)
            .json(&serde_json::json!({ "name": name, "color": color }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["id"].as_i64().expect("category id")
    }

    /// Create an event and return the response body
    pub async fn create_event(&self, token: &str, body: Value) -> Value {
        let response = self
            .post_authenticated("/events", token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }
}
