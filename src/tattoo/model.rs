//! The record model consumed by the HTTP handlers.
//!
//! Handlers only see [`TattooModel`], so the router can be built over the
//! SQLite implementation in production and over a test double in tests.

use async_trait::async_trait;

use super::{
    Category, CategoryRepository, NewCategory, NewTattoo, Tattoo, TattooRepository, TattooUpdate,
};
use crate::{Database, Result, TattooError};

/// CRUD operations over tattoo records and categories.
#[async_trait]
pub trait TattooModel: Send + Sync {
    /// List every tattoo.
    async fn list_all(&self) -> Result<Vec<Tattoo>>;

    /// List every category.
    async fn list_all_categories(&self) -> Result<Vec<Category>>;

    /// Get a tattoo by ID.
    async fn get_by_id(&self, id: i64) -> Result<Option<Tattoo>>;

    /// Get a category by ID.
    async fn get_category_by_id(&self, id: i64) -> Result<Option<Category>>;

    /// Delete a tattoo. Returns `false` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Create a tattoo, recording the stored image name if one was uploaded.
    async fn create(&self, data: NewTattoo, stored_file_name: Option<String>) -> Result<Tattoo>;

    /// Create a category.
    async fn create_category(&self, data: NewCategory) -> Result<Category>;

    /// Update a tattoo. Returns `None` if it does not exist.
    async fn update(
        &self,
        id: i64,
        data: TattooUpdate,
        stored_file_name: Option<String>,
    ) -> Result<Option<Tattoo>>;
}

/// [`TattooModel`] backed by the SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteTattooModel {
    db: Database,
}

impl SqliteTattooModel {
    /// Create a model over the given database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn ensure_category(&self, category_id: Option<i64>) -> Result<()> {
        if let Some(id) = category_id {
            if !CategoryRepository::new(self.db.pool()).exists(id).await? {
                return Err(TattooError::Validation(format!("category {id} does not exist")));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TattooModel for SqliteTattooModel {
    async fn list_all(&self) -> Result<Vec<Tattoo>> {
        TattooRepository::new(self.db.pool()).list().await
    }

    async fn list_all_categories(&self) -> Result<Vec<Category>> {
        CategoryRepository::new(self.db.pool()).list().await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Tattoo>> {
        TattooRepository::new(self.db.pool()).get_by_id(id).await
    }

    async fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        CategoryRepository::new(self.db.pool()).get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        TattooRepository::new(self.db.pool()).delete(id).await
    }

    async fn create(&self, data: NewTattoo, stored_file_name: Option<String>) -> Result<Tattoo> {
        self.ensure_category(data.category_id).await?;
        TattooRepository::new(self.db.pool())
            .create(&data, stored_file_name.as_deref())
            .await
    }

    async fn create_category(&self, data: NewCategory) -> Result<Category> {
        CategoryRepository::new(self.db.pool()).create(&data).await
    }

    async fn update(
        &self,
        id: i64,
        data: TattooUpdate,
        stored_file_name: Option<String>,
    ) -> Result<Option<Tattoo>> {
        if let Some(category_id) = data.category_id {
            self.ensure_category(category_id).await?;
        }
        TattooRepository::new(self.db.pool())
            .update(id, &data, stored_file_name.as_deref())
            .await
    }
}
