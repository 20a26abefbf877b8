//! Tattoo record types and repository.

use sqlx::{QueryBuilder, SqlitePool};

use crate::{Result, TattooError};

/// A tattoo record.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Tattoo {
    /// Unique tattoo ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Category the tattoo belongs to.
    pub category_id: Option<i64>,
    /// Stored image file name inside the uploads directory.
    pub image: Option<String>,
    /// When the record was created.
    pub created_at: String,
    /// When the record was last updated.
    pub updated_at: String,
}

/// Data for creating a new tattoo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTattoo {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Category the tattoo belongs to.
    pub category_id: Option<i64>,
}

impl NewTattoo {
    /// Create a new tattoo with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            category_id: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Builder for updating a tattoo. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TattooUpdate {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New category.
    pub category_id: Option<Option<i64>>,
}

impl TattooUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set or clear the description.
    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(|s| s.into()));
        self
    }

    /// Set or clear the category.
    pub fn category_id(mut self, category_id: Option<i64>) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

const TATTOO_COLUMNS: &str =
    "id, name, description, category_id, image, created_at, updated_at";

/// Repository for tattoo operations.
pub struct TattooRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TattooRepository<'a> {
    /// Create a new TattooRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new tattoo, optionally pointing at a stored image.
    pub async fn create(&self, tattoo: &NewTattoo, image: Option<&str>) -> Result<Tattoo> {
        let result = sqlx::query(
            "INSERT INTO tattoos (name, description, category_id, image) VALUES (?, ?, ?, ?)",
        )
        .bind(&tattoo.name)
        .bind(&tattoo.description)
        .bind(tattoo.category_id)
        .bind(image)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| TattooError::NotFound("tattoo".to_string()))
    }

    /// Get a tattoo by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Tattoo>> {
        let query = format!("SELECT {TATTOO_COLUMNS} FROM tattoos WHERE id = ?");
        let tattoo = sqlx::query_as::<_, Tattoo>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(tattoo)
    }

    /// List all tattoos ordered by ID.
    pub async fn list(&self) -> Result<Vec<Tattoo>> {
        let query = format!("SELECT {TATTOO_COLUMNS} FROM tattoos ORDER BY id");
        let tattoos = sqlx::query_as::<_, Tattoo>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(tattoos)
    }

    /// Update a tattoo.
    ///
    /// `image` replaces the stored image only when `Some`. Returns `None` if
    /// the tattoo does not exist.
    pub async fn update(
        &self,
        id: i64,
        update: &TattooUpdate,
        image: Option<&str>,
    ) -> Result<Option<Tattoo>> {
        let mut query: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("UPDATE tattoos SET updated_at = datetime('now')");

        if let Some(ref name) = update.name {
            query.push(", name = ");
            query.push_bind(name.clone());
        }

        if let Some(ref description) = update.description {
            query.push(", description = ");
            query.push_bind(description.clone());
        }

        if let Some(category_id) = update.category_id {
            query.push(", category_id = ");
            query.push_bind(category_id);
        }

        if let Some(image) = image {
            query.push(", image = ");
            query.push_bind(image.to_string());
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a tattoo by ID.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tattoos WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
