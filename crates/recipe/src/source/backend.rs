use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{SourceError, SourceResult};
use crate::types::{CategoryTile, RecipeDetail, RecipeSummary};

use super::RecipeSource;

/// Client for the REST collaborator service. Every response is wrapped in
/// a `{ success, message?, ... }` envelope which this client unwraps.
pub struct BackendSource {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ListEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    recipes: Vec<RecipeSummary>,
}

#[derive(Deserialize)]
struct DetailEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    recipe: Option<RecipeDetail>,
}

#[derive(Deserialize)]
struct CategoriesEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
}

fn rejected(message: Option<String>) -> SourceError {
    SourceError::Rejected(message.unwrap_or_else(|| "request failed".to_string()))
}

impl BackendSource {
    /// `base_url` points at the API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> SourceResult<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RecipeSource for BackendSource {
    async fn list(&self) -> SourceResult<Vec<RecipeSummary>> {
        let envelope: ListEnvelope = self.fetch("/recipes", &[]).await?;
        if !envelope.success {
            return Err(rejected(envelope.message));
        }
        Ok(envelope.recipes)
    }

    async fn search(&self, term: &str) -> SourceResult<Vec<RecipeSummary>> {
        let envelope: ListEnvelope = self.fetch("/recipes/search", &[("q", term)]).await?;
        if !envelope.success {
            return Err(rejected(envelope.message));
        }
        Ok(envelope.recipes)
    }

    async fn by_category(&self, category: &str) -> SourceResult<Vec<RecipeSummary>> {
        let envelope: ListEnvelope = self
            .fetch(&format!("/recipes/category/{category}"), &[])
            .await?;
        if !envelope.success {
            return Err(rejected(envelope.message));
        }
        Ok(envelope.recipes)
    }

    async fn by_id(&self, id: &str) -> SourceResult<Option<RecipeDetail>> {
        let url = format!("{}/recipes/{id}", self.base_url);
        let response = self.client.get(&url).send().await?;
        // an unknown id is an empty state, not an error
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: DetailEnvelope = response.error_for_status()?.json().await?;
        if !envelope.success {
            return Err(rejected(envelope.message));
        }
        Ok(envelope.recipe)
    }

    async fn categories(&self) -> SourceResult<Vec<CategoryTile>> {
        let envelope: CategoriesEnvelope = self.fetch("/recipes/categories", &[]).await?;
        if !envelope.success {
            return Err(rejected(envelope.message));
        }
        Ok(envelope
            .categories
            .into_iter()
            .map(CategoryTile::named)
            .collect())
    }
}
