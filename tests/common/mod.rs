//! Test helpers for Web API tests.
//!
//! Provides a TestApp wrapping `axum_test::TestServer`, image part builders
//! and a RecordingModel that counts calls into the record model.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum_test::multipart::Part;
use axum_test::TestServer;
use jsonwebtoken::{encode, EncodingKey, Header};
use tempfile::TempDir;

use tattoo_api::tattoo::{Category, NewCategory, NewTattoo, Tattoo, TattooModel, TattooUpdate};
use tattoo_api::web::middleware::JwtClaims;
use tattoo_api::{Config, Database, Result, SqliteTattooModel, WebServer};

/// JWT secret used by every test server.
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// A running test server and the uploads directory it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub uploads: TempDir,
}

impl TestApp {
    /// Names of the files currently stored in the uploads directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Create a test configuration writing uploads into `uploads`.
pub fn create_test_config(uploads: &TempDir) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    config.uploads.destination_dir = uploads.path().to_string_lossy().into_owned();
    config
}

/// Create a test server around `model`, with `configure` applied to the config.
pub fn create_test_app_with(
    model: Arc<dyn TattooModel>,
    configure: impl FnOnce(&mut Config),
) -> TestApp {
    let uploads = TempDir::new().expect("Failed to create uploads dir");
    let mut config = create_test_config(&uploads);
    configure(&mut config);

    let router = WebServer::new(&config, model)
        .expect("Failed to create web server")
        .into_router();
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, uploads }
}

/// Create a test server backed by an in-memory SQLite model.
pub async fn create_test_app() -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    create_test_app_with(Arc::new(SqliteTattooModel::new(db)), |_| {})
}

/// A file part under the given MIME type.
pub fn image_part(file_name: &str, mime_type: &str, content: &[u8]) -> Part {
    Part::bytes(content.to_vec())
        .file_name(file_name)
        .mime_type(mime_type)
}

/// A small PNG file part.
pub fn png_part(file_name: &str) -> Part {
    image_part(file_name, "image/png", b"\x89PNG\r\n\x1a\nfake-png")
}

/// A small JPEG file part.
pub fn jpeg_part(file_name: &str) -> Part {
    image_part(file_name, "image/jpeg", b"\xff\xd8\xff\xe0fake-jpeg")
}

/// Sign a bearer token for `user_id` with the test secret.
pub fn bearer_token(user_id: i64, username: &str) -> String {
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = JwtClaims {
        sub: user_id,
        username: username.to_string(),
        iat: now,
        exp: now + 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to sign token");
    format!("Bearer {token}")
}

/// A call received by [`RecordingModel`].
#[derive(Debug, Clone, PartialEq)]
pub enum ModelCall {
    ListAll,
    ListAllCategories,
    GetById(i64),
    GetCategoryById(i64),
    Delete(i64),
    Create {
        name: String,
        stored_file_name: Option<String>,
    },
    CreateCategory(String),
    Update {
        id: i64,
        stored_file_name: Option<String>,
    },
}

/// A record model that records every call and answers with canned data.
#[derive(Default)]
pub struct RecordingModel {
    calls: Mutex<Vec<ModelCall>>,
}

impl RecordingModel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ModelCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn tattoo(id: i64, name: &str, image: Option<String>) -> Tattoo {
        Tattoo {
            id,
            name: name.to_string(),
            description: None,
            category_id: None,
            image,
            created_at: "2024-01-01 00:00:00".to_string(),
            updated_at: "2024-01-01 00:00:00".to_string(),
        }
    }
}

#[axum::async_trait]
impl TattooModel for RecordingModel {
    async fn list_all(&self) -> Result<Vec<Tattoo>> {
        self.record(ModelCall::ListAll);
        Ok(vec![])
    }

    async fn list_all_categories(&self) -> Result<Vec<Category>> {
        self.record(ModelCall::ListAllCategories);
        Ok(vec![])
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Tattoo>> {
        self.record(ModelCall::GetById(id));
        Ok(None)
    }

    async fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        self.record(ModelCall::GetCategoryById(id));
        Ok(None)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.record(ModelCall::Delete(id));
        Ok(false)
    }

    async fn create(&self, data: NewTattoo, stored_file_name: Option<String>) -> Result<Tattoo> {
        self.record(ModelCall::Create {
            name: data.name.clone(),
            stored_file_name: stored_file_name.clone(),
        });
        Ok(Self::tattoo(1, &data.name, stored_file_name))
    }

    async fn create_category(&self, data: NewCategory) -> Result<Category> {
        self.record(ModelCall::CreateCategory(data.name.clone()));
        Ok(Category {
            id: 1,
            name: data.name,
            created_at: "2024-01-01 00:00:00".to_string(),
        })
    }

    async fn update(
        &self,
        id: i64,
        data: TattooUpdate,
        stored_file_name: Option<String>,
    ) -> Result<Option<Tattoo>> {
        self.record(ModelCall::Update {
            id,
            stored_file_name: stored_file_name.clone(),
        });
        let name = data.name.unwrap_or_else(|| "unchanged".to_string());
        Ok(Some(Self::tattoo(id, &name, stored_file_name)))
    }
}
