//! HTTP client for the Mealie API.
//!
//! One `MealieClient` is constructed at process start and injected into
//! everything that talks upstream; there is no global instance.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde_json::{json, Value};

use crate::types::{
    IngredientFood, IngredientUnit, MealieError, MealieResult, Page, ParsedIngredient, Recipe,
    RecipePatch,
};

/// Per-request timeout. A failed or slow request fails the whole tool call.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection establishment timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Maximum number of characters of an error response body kept in the error.
const BODY_SNIPPET_MAX: usize = 1000;

/// The typed upstream surface the formalization flow depends on.
///
/// `MealieClient` is the production implementation; tests substitute a fake.
/// `parse_ingredients` must return one entry per input text, in input order.
#[async_trait]
pub trait MealieApi: Send + Sync {
    async fn get_recipe(&self, slug: &str) -> MealieResult<Recipe>;
    async fn patch_recipe(&self, slug: &str, patch: &RecipePatch) -> MealieResult<Recipe>;
    async fn get_foods(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> MealieResult<Page<IngredientFood>>;
    async fn create_food(&self, name: &str, description: &str) -> MealieResult<IngredientFood>;
    async fn get_units(&self, page: u32, per_page: u32) -> MealieResult<Page<IngredientUnit>>;
    async fn create_unit(
        &self,
        name: &str,
        abbreviation: &str,
        fraction: bool,
    ) -> MealieResult<IngredientUnit>;
    async fn parse_ingredients(&self, texts: &[String]) -> MealieResult<Vec<ParsedIngredient>>;
}

/// Authenticated client for one Mealie instance.
#[derive(Debug)]
pub struct MealieClient {
    http: reqwest::Client,
    base_url: String,
}

impl MealieClient {
    /// Build a client for `base_url` authenticating with `api_token`.
    pub fn new(base_url: &str, api_token: &str) -> MealieResult<Self> {
        if api_token.is_empty() {
            return Err(MealieError::MissingToken);
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_token}"))
            .map_err(|_| MealieError::MissingToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> MealieResult<Value> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, %url, "mealie request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let snippet: String = text.trim().chars().take(BODY_SNIPPET_MAX).collect();
            return Err(MealieError::Http {
                method: method.to_string(),
                url,
                status: status.as_u16(),
                body: snippet,
            });
        }

        // Some endpoints return an empty body on success.
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| MealieError::UnexpectedShape(format!("invalid JSON from {url}: {e}")))
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> MealieResult<Value> {
        self.send(Method::GET, path, query, None).await
    }

    /// Send a POST request.
    pub async fn post(&self, path: &str, body: Option<&Value>) -> MealieResult<Value> {
        self.send(Method::POST, path, &[], body).await
    }

    /// Send a PUT request.
    pub async fn put(&self, path: &str, body: Option<&Value>) -> MealieResult<Value> {
        self.send(Method::PUT, path, &[], body).await
    }

    /// Send a PATCH request.
    pub async fn patch(&self, path: &str, body: Option<&Value>) -> MealieResult<Value> {
        self.send(Method::PATCH, path, &[], body).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> MealieResult<Value> {
        self.send(Method::DELETE, path, &[], None).await
    }

    fn typed<T: serde::de::DeserializeOwned>(value: Value, what: &str) -> MealieResult<T> {
        serde_json::from_value(value)
            .map_err(|e| MealieError::UnexpectedShape(format!("{what}: {e}")))
    }

    // ------------------------------------------------------------------
    // Recipes
    // ------------------------------------------------------------------

    /// Get a paginated list of recipes, optionally filtered.
    pub async fn get_recipes(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
        categories: &[String],
        tags: &[String],
    ) -> MealieResult<Value> {
        let mut query = vec![
            ("page", page.to_string()),
            ("perPage", per_page.to_string()),
        ];
        if let Some(search) = search {
            if !search.is_empty() {
                query.push(("search", search.to_string()));
            }
        }
        for category in categories {
            query.push(("categories", category.clone()));
        }
        for tag in tags {
            query.push(("tags", tag.clone()));
        }
        self.get("/api/recipes", &query).await
    }

    /// Get a single recipe by slug or id.
    pub async fn get_recipe(&self, slug: &str) -> MealieResult<Recipe> {
        let value = self.get(&format!("/api/recipes/{slug}"), &[]).await?;
        Self::typed(value, "recipe")
    }

    /// Create a recipe. Returns the upstream response (the new slug).
    pub async fn create_recipe(&self, data: &Value) -> MealieResult<Value> {
        self.post("/api/recipes", Some(data)).await
    }

    /// Full update of a recipe.
    pub async fn update_recipe(&self, slug: &str, data: &Value) -> MealieResult<Value> {
        self.put(&format!("/api/recipes/{slug}"), Some(data)).await
    }

    /// Partial update of a recipe with arbitrary fields.
    pub async fn patch_recipe_fields(&self, slug: &str, updates: &Value) -> MealieResult<Value> {
        self.patch(&format!("/api/recipes/{slug}"), Some(updates))
            .await
    }

    /// Partial update of a recipe's ingredient/instruction lists.
    pub async fn patch_recipe(&self, slug: &str, patch: &RecipePatch) -> MealieResult<Recipe> {
        let body = serde_json::to_value(patch)
            .map_err(|e| MealieError::UnexpectedShape(format!("recipe patch: {e}")))?;
        let value = self
            .patch(&format!("/api/recipes/{slug}"), Some(&body))
            .await?;
        Self::typed(value, "recipe")
    }

    /// Delete a recipe.
    pub async fn delete_recipe(&self, slug: &str) -> MealieResult<Value> {
        self.delete(&format!("/api/recipes/{slug}")).await
    }

    /// Duplicate a recipe and return the new recipe's slug.
    ///
    /// Some Mealie builds return the slug as a bare string, others as a
    /// recipe object; anything else is a shape error.
    pub async fn duplicate_recipe(&self, slug: &str) -> MealieResult<String> {
        // Some Mealie builds require a JSON body (even if empty) here.
        let result = self
            .post(&format!("/api/recipes/{slug}/duplicate"), Some(&json!({})))
            .await?;
        match result {
            Value::String(slug) => Ok(slug),
            Value::Object(ref map) => match map.get("slug") {
                Some(Value::String(slug)) => Ok(slug.clone()),
                _ => Err(MealieError::UnexpectedShape(
                    "duplicate recipe response object has no slug".to_string(),
                )),
            },
            _ => Err(MealieError::UnexpectedShape(
                "duplicate recipe endpoint returned neither a slug nor an object".to_string(),
            )),
        }
    }

    /// Import a recipe from a website URL.
    pub async fn import_recipe_from_url(
        &self,
        url: &str,
        include_tags: bool,
    ) -> MealieResult<Value> {
        self.post(
            "/api/recipes/create/url",
            Some(&json!({ "url": url, "includeTags": include_tags })),
        )
        .await
    }

    /// Test-scrape a URL without saving the recipe.
    pub async fn test_scrape_url(&self, url: &str) -> MealieResult<Value> {
        self.post("/api/recipes/test-scrape-url", Some(&json!({ "url": url })))
            .await
    }

    /// Set when a recipe was last made. `date` is `YYYY-MM-DD`.
    pub async fn set_recipe_last_made(&self, slug: &str, date: &str) -> MealieResult<Value> {
        self.patch(
            &format!("/api/recipes/{slug}/last-made"),
            Some(&json!({ "timestamp": date })),
        )
        .await
    }

    /// Get recipe suggestions based on mealplan rules.
    pub async fn get_recipe_suggestions(&self) -> MealieResult<Value> {
        self.get("/api/recipes/suggestions", &[]).await
    }

    // ------------------------------------------------------------------
    // Recipe bulk actions
    // ------------------------------------------------------------------

    /// Add tags to multiple recipes.
    pub async fn bulk_tag_recipes(
        &self,
        recipe_ids: &[String],
        tags: &Value,
    ) -> MealieResult<Value> {
        self.post(
            "/api/recipes/bulk-actions/tag",
            Some(&json!({ "recipes": recipe_ids, "tags": tags })),
        )
        .await
    }

    /// Add categories to multiple recipes.
    pub async fn bulk_categorize_recipes(
        &self,
        recipe_ids: &[String],
        categories: &Value,
    ) -> MealieResult<Value> {
        self.post(
            "/api/recipes/bulk-actions/categorize",
            Some(&json!({ "recipes": recipe_ids, "categories": categories })),
        )
        .await
    }

    /// Delete multiple recipes.
    pub async fn bulk_delete_recipes(&self, recipe_ids: &[String]) -> MealieResult<Value> {
        self.post(
            "/api/recipes/bulk-actions/delete",
            Some(&json!({ "recipes": recipe_ids })),
        )
        .await
    }

    /// Export multiple recipes.
    pub async fn bulk_export_recipes(&self, recipe_ids: &[String]) -> MealieResult<Value> {
        self.post(
            "/api/recipes/bulk-actions/export",
            Some(&json!({ "recipeIds": recipe_ids })),
        )
        .await
    }

    /// Update settings on multiple recipes.
    pub async fn bulk_update_recipe_settings(
        &self,
        recipe_ids: &[String],
        settings: &Value,
    ) -> MealieResult<Value> {
        self.post(
            "/api/recipes/bulk-actions/settings",
            Some(&json!({ "recipeIds": recipe_ids, "settings": settings })),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Shopping lists
    // ------------------------------------------------------------------

    pub async fn get_shopping_lists(&self, page: u32, per_page: u32) -> MealieResult<Value> {
        self.get("/api/households/shopping/lists", &page_query(page, per_page))
            .await
    }

    pub async fn get_shopping_list(&self, list_id: &str) -> MealieResult<Value> {
        self.get(&format!("/api/households/shopping/lists/{list_id}"), &[])
            .await
    }

    pub async fn create_shopping_list(&self, name: &str) -> MealieResult<Value> {
        self.post(
            "/api/households/shopping/lists",
            Some(&json!({ "name": name })),
        )
        .await
    }

    pub async fn update_shopping_list(&self, list_id: &str, data: &Value) -> MealieResult<Value> {
        self.put(
            &format!("/api/households/shopping/lists/{list_id}"),
            Some(data),
        )
        .await
    }

    pub async fn delete_shopping_list(&self, list_id: &str) -> MealieResult<Value> {
        self.delete(&format!("/api/households/shopping/lists/{list_id}"))
            .await
    }

    /// Add all ingredients from a recipe to a shopping list.
    pub async fn add_recipe_to_shopping_list(
        &self,
        list_id: &str,
        recipe_id: &str,
        scale: f64,
    ) -> MealieResult<Value> {
        self.post(
            &format!("/api/households/shopping/lists/{list_id}/recipe"),
            Some(&json!([{ "recipeId": recipe_id, "scale": scale }])),
        )
        .await
    }

    /// Remove a recipe's ingredients from a shopping list.
    pub async fn remove_recipe_from_shopping_list(
        &self,
        list_id: &str,
        recipe_id: &str,
    ) -> MealieResult<Value> {
        self.post(
            &format!("/api/households/shopping/lists/{list_id}/recipe/{recipe_id}/delete"),
            None,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Shopping items
    // ------------------------------------------------------------------

    pub async fn get_shopping_items(&self, page: u32, per_page: u32) -> MealieResult<Value> {
        self.get("/api/households/shopping/items", &page_query(page, per_page))
            .await
    }

    pub async fn get_shopping_item(&self, item_id: &str) -> MealieResult<Value> {
        self.get(&format!("/api/households/shopping/items/{item_id}"), &[])
            .await
    }

    /// Add an item to a shopping list. Unit and food are attached by name.
    pub async fn add_shopping_item(
        &self,
        shopping_list_id: &str,
        note: &str,
        quantity: f64,
        unit: Option<&str>,
        food: Option<&str>,
        checked: bool,
    ) -> MealieResult<Value> {
        let mut data = json!({
            "shoppingListId": shopping_list_id,
            "note": note,
            "quantity": quantity,
            "checked": checked,
        });
        if let Some(unit) = unit {
            data["unit"] = json!({ "name": unit });
        }
        if let Some(food) = food {
            data["food"] = json!({ "name": food });
        }
        self.post("/api/households/shopping/items", Some(&data))
            .await
    }

    pub async fn add_shopping_items_bulk(&self, items: &Value) -> MealieResult<Value> {
        self.post("/api/households/shopping/items/create-bulk", Some(items))
            .await
    }

    pub async fn update_shopping_item(&self, item_id: &str, data: &Value) -> MealieResult<Value> {
        self.put(
            &format!("/api/households/shopping/items/{item_id}"),
            Some(data),
        )
        .await
    }

    pub async fn delete_shopping_item(&self, item_id: &str) -> MealieResult<Value> {
        self.delete(&format!("/api/households/shopping/items/{item_id}"))
            .await
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn get_categories(&self, page: u32, per_page: u32) -> MealieResult<Value> {
        self.get("/api/organizers/categories", &page_query(page, per_page))
            .await
    }

    pub async fn get_category(&self, category_id: &str) -> MealieResult<Value> {
        self.get(&format!("/api/organizers/categories/{category_id}"), &[])
            .await
    }

    pub async fn get_category_by_slug(&self, slug: &str) -> MealieResult<Value> {
        self.get(&format!("/api/organizers/categories/slug/{slug}"), &[])
            .await
    }

    pub async fn get_empty_categories(&self) -> MealieResult<Value> {
        self.get("/api/organizers/categories/empty", &[]).await
    }

    pub async fn create_category(&self, name: &str) -> MealieResult<Value> {
        self.post("/api/organizers/categories", Some(&json!({ "name": name })))
            .await
    }

    pub async fn update_category(&self, category_id: &str, data: &Value) -> MealieResult<Value> {
        self.put(
            &format!("/api/organizers/categories/{category_id}"),
            Some(data),
        )
        .await
    }

    pub async fn delete_category(&self, category_id: &str) -> MealieResult<Value> {
        self.delete(&format!("/api/organizers/categories/{category_id}"))
            .await
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    pub async fn get_tags(&self, page: u32, per_page: u32) -> MealieResult<Value> {
        self.get("/api/organizers/tags", &page_query(page, per_page))
            .await
    }

    pub async fn get_tag(&self, tag_id: &str) -> MealieResult<Value> {
        self.get(&format!("/api/organizers/tags/{tag_id}"), &[]).await
    }

    pub async fn get_tag_by_slug(&self, slug: &str) -> MealieResult<Value> {
        self.get(&format!("/api/organizers/tags/slug/{slug}"), &[])
            .await
    }

    pub async fn get_empty_tags(&self) -> MealieResult<Value> {
        self.get("/api/organizers/tags/empty", &[]).await
    }

    pub async fn create_tag(&self, name: &str) -> MealieResult<Value> {
        self.post("/api/organizers/tags", Some(&json!({ "name": name })))
            .await
    }

    pub async fn update_tag(&self, tag_id: &str, data: &Value) -> MealieResult<Value> {
        self.put(&format!("/api/organizers/tags/{tag_id}"), Some(data))
            .await
    }

    pub async fn delete_tag(&self, tag_id: &str) -> MealieResult<Value> {
        self.delete(&format!("/api/organizers/tags/{tag_id}")).await
    }

    // ------------------------------------------------------------------
    // Kitchen tools
    // ------------------------------------------------------------------

    pub async fn get_tools(&self, page: u32, per_page: u32) -> MealieResult<Value> {
        self.get("/api/organizers/tools", &page_query(page, per_page))
            .await
    }

    pub async fn get_tool(&self, tool_id: &str) -> MealieResult<Value> {
        self.get(&format!("/api/organizers/tools/{tool_id}"), &[])
            .await
    }

    pub async fn get_tool_by_slug(&self, slug: &str) -> MealieResult<Value> {
        self.get(&format!("/api/organizers/tools/slug/{slug}"), &[])
            .await
    }

    pub async fn create_tool(&self, name: &str) -> MealieResult<Value> {
        self.post("/api/organizers/tools", Some(&json!({ "name": name })))
            .await
    }

    pub async fn update_tool(&self, tool_id: &str, data: &Value) -> MealieResult<Value> {
        self.put(&format!("/api/organizers/tools/{tool_id}"), Some(data))
            .await
    }

    pub async fn delete_tool(&self, tool_id: &str) -> MealieResult<Value> {
        self.delete(&format!("/api/organizers/tools/{tool_id}")).await
    }

    // ------------------------------------------------------------------
    // Foods
    // ------------------------------------------------------------------

    pub async fn get_foods(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> MealieResult<Page<IngredientFood>> {
        let mut query = page_query(page, per_page);
        if let Some(search) = search {
            if !search.is_empty() {
                query.push(("search", search.to_string()));
            }
        }
        let value = self.get("/api/foods", &query).await?;
        Self::typed(value, "foods page")
    }

    pub async fn get_food(&self, food_id: &str) -> MealieResult<Value> {
        self.get(&format!("/api/foods/{food_id}"), &[]).await
    }

    pub async fn create_food(&self, name: &str, description: &str) -> MealieResult<IngredientFood> {
        let value = self
            .post(
                "/api/foods",
                Some(&json!({ "name": name, "description": description })),
            )
            .await?;
        Self::typed(value, "created food")
    }

    pub async fn update_food(&self, food_id: &str, data: &Value) -> MealieResult<Value> {
        self.put(&format!("/api/foods/{food_id}"), Some(data)).await
    }

    pub async fn delete_food(&self, food_id: &str) -> MealieResult<Value> {
        self.delete(&format!("/api/foods/{food_id}")).await
    }

    /// Merge one food into another; all references move to the target.
    pub async fn merge_foods(&self, from_food_id: &str, to_food_id: &str) -> MealieResult<Value> {
        self.put(
            "/api/foods/merge",
            Some(&json!({ "fromFood": from_food_id, "toFood": to_food_id })),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Units
    // ------------------------------------------------------------------

    pub async fn get_units(&self, page: u32, per_page: u32) -> MealieResult<Page<IngredientUnit>> {
        let value = self.get("/api/units", &page_query(page, per_page)).await?;
        Self::typed(value, "units page")
    }

    pub async fn get_unit(&self, unit_id: &str) -> MealieResult<Value> {
        self.get(&format!("/api/units/{unit_id}"), &[]).await
    }

    pub async fn create_unit(
        &self,
        name: &str,
        abbreviation: &str,
        fraction: bool,
    ) -> MealieResult<IngredientUnit> {
        let value = self
            .post(
                "/api/units",
                Some(&json!({
                    "name": name,
                    "abbreviation": abbreviation,
                    "description": "",
                    "fraction": fraction,
                })),
            )
            .await?;
        Self::typed(value, "created unit")
    }

    pub async fn update_unit(&self, unit_id: &str, data: &Value) -> MealieResult<Value> {
        self.put(&format!("/api/units/{unit_id}"), Some(data)).await
    }

    pub async fn delete_unit(&self, unit_id: &str) -> MealieResult<Value> {
        self.delete(&format!("/api/units/{unit_id}")).await
    }

    /// Merge one unit into another; all references move to the target.
    pub async fn merge_units(&self, from_unit_id: &str, to_unit_id: &str) -> MealieResult<Value> {
        self.put(
            "/api/units/merge",
            Some(&json!({ "fromUnit": from_unit_id, "toUnit": to_unit_id })),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Labels
    // ------------------------------------------------------------------

    pub async fn get_labels(&self, page: u32, per_page: u32) -> MealieResult<Value> {
        self.get("/api/groups/labels", &page_query(page, per_page))
            .await
    }

    pub async fn get_label(&self, label_id: &str) -> MealieResult<Value> {
        self.get(&format!("/api/groups/labels/{label_id}"), &[]).await
    }

    pub async fn create_label(&self, name: &str, color: &str) -> MealieResult<Value> {
        self.post(
            "/api/groups/labels",
            Some(&json!({ "name": name, "color": color })),
        )
        .await
    }

    pub async fn update_label(&self, label_id: &str, data: &Value) -> MealieResult<Value> {
        self.put(&format!("/api/groups/labels/{label_id}"), Some(data))
            .await
    }

    pub async fn delete_label(&self, label_id: &str) -> MealieResult<Value> {
        self.delete(&format!("/api/groups/labels/{label_id}")).await
    }

    // ------------------------------------------------------------------
    // Ingredient parser
    // ------------------------------------------------------------------

    /// Parse a single ingredient string into structured data.
    pub async fn parse_ingredient(&self, ingredient_text: &str) -> MealieResult<Value> {
        self.post(
            "/api/parser/ingredient",
            Some(&json!({ "ingredient": ingredient_text })),
        )
        .await
    }

    /// Parse multiple ingredient strings in one request.
    ///
    /// The response must be a list; a mis-shaped element within it is
    /// treated as an empty parse rather than failing the whole batch.
    pub async fn parse_ingredients(&self, texts: &[String]) -> MealieResult<Vec<ParsedIngredient>> {
        let value = self
            .post(
                "/api/parser/ingredients",
                Some(&json!({ "ingredients": texts })),
            )
            .await?;
        let Value::Array(items) = value else {
            return Err(MealieError::UnexpectedShape(
                "ingredient parser did not return a list".to_string(),
            ));
        };
        Ok(items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect())
    }
}

#[async_trait]
impl MealieApi for MealieClient {
    async fn get_recipe(&self, slug: &str) -> MealieResult<Recipe> {
        MealieClient::get_recipe(self, slug).await
    }

    async fn patch_recipe(&self, slug: &str, patch: &RecipePatch) -> MealieResult<Recipe> {
        MealieClient::patch_recipe(self, slug, patch).await
    }

    async fn get_foods(
        &self,
        page: u32,
        per_page: u32,
        search: Option<&str>,
    ) -> MealieResult<Page<IngredientFood>> {
        MealieClient::get_foods(self, page, per_page, search).await
    }

    async fn create_food(&self, name: &str, description: &str) -> MealieResult<IngredientFood> {
        MealieClient::create_food(self, name, description).await
    }

    async fn get_units(&self, page: u32, per_page: u32) -> MealieResult<Page<IngredientUnit>> {
        MealieClient::get_units(self, page, per_page).await
    }

    async fn create_unit(
        &self,
        name: &str,
        abbreviation: &str,
        fraction: bool,
    ) -> MealieResult<IngredientUnit> {
        MealieClient::create_unit(self, name, abbreviation, fraction).await
    }

    async fn parse_ingredients(&self, texts: &[String]) -> MealieResult<Vec<ParsedIngredient>> {
        MealieClient::parse_ingredients(self, texts).await
    }
}

fn page_query(page: u32, per_page: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("perPage", per_page.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = MealieClient::new("http://mealie.local:9000/", "token").unwrap();
        assert_eq!(client.base_url(), "http://mealie.local:9000");
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = MealieClient::new("http://mealie.local", "").unwrap_err();
        assert!(matches!(err, MealieError::MissingToken));
    }
}
