//! Data model for the slice of the Mealie API this crate works with.
//!
//! Upstream objects carry far more fields than the formalization flow
//! touches. Every model keeps the unmodeled remainder in a flattened
//! passthrough map so a full-list write-back never drops server data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of a paginated Mealie listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A food entry in the upstream catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientFood {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IngredientFood {
    /// Minimal `{id, name}` form written onto a recipe ingredient.
    pub fn embedded(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            extra: Map::new(),
        }
    }
}

/// A measurement unit in the upstream catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientUnit {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IngredientUnit {
    /// Minimal `{id, name, abbreviation}` form written onto a recipe ingredient.
    pub fn embedded(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            abbreviation: self.abbreviation.clone(),
            extra: Map::new(),
        }
    }
}

/// One line item of a recipe's ingredient list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<IngredientUnit>,
    #[serde(default)]
    pub food: Option<IngredientFood>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub original_text: Option<String>,
    #[serde(default)]
    pub unit_id: Option<String>,
    #[serde(default)]
    pub food_id: Option<String>,
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecipeIngredient {
    /// The text sent to the ingredient parser: first non-empty of
    /// note, display, originalText.
    pub fn parser_text(&self) -> &str {
        for field in [&self.note, &self.display, &self.original_text] {
            if let Some(text) = field.as_deref() {
                if !text.is_empty() {
                    return text;
                }
            }
        }
        ""
    }
}

/// A reference from an instruction step to an ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientReference {
    pub reference_id: String,
}

/// One step of a recipe's method.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub ingredient_references: Vec<IngredientReference>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A recipe, modeled only as deeply as formalization needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub recipe_ingredient: Vec<RecipeIngredient>,
    #[serde(default)]
    pub recipe_instructions: Vec<RecipeStep>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial-update payload for a recipe. Only the populated lists are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_ingredient: Option<Vec<RecipeIngredient>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_instructions: Option<Vec<RecipeStep>>,
}

/// One result from the batch ingredient parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedIngredient {
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub confidence: Option<Value>,
    #[serde(default)]
    pub ingredient: ParsedEntry,
}

/// The structured fields the parser extracted from one text line.
/// Everything is optional; the parser is free-text and best-effort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedEntry {
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub unit: Option<ParsedUnit>,
    #[serde(default)]
    pub food: Option<ParsedFood>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedFood {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedUnit {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" | body: {body}")
    }
}

/// Errors that can occur talking to a Mealie instance.
#[derive(thiserror::Error, Debug)]
pub enum MealieError {
    #[error("MEALIE_API_TOKEN is required; generate one in Mealie under User Settings > API Tokens")]
    MissingToken,

    #[error("{method} {url} -> {status}{}", body_suffix(.body))]
    Http {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// Convenience result type.
pub type MealieResult<T> = Result<T, MealieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_text_priority() {
        let ing = RecipeIngredient {
            note: Some("2 cups flour".to_string()),
            display: Some("ignored".to_string()),
            ..Default::default()
        };
        assert_eq!(ing.parser_text(), "2 cups flour");

        let ing = RecipeIngredient {
            note: Some(String::new()),
            display: Some("1 tsp salt".to_string()),
            ..Default::default()
        };
        assert_eq!(ing.parser_text(), "1 tsp salt");

        let ing = RecipeIngredient {
            original_text: Some("a pinch of saffron".to_string()),
            ..Default::default()
        };
        assert_eq!(ing.parser_text(), "a pinch of saffron");

        assert_eq!(RecipeIngredient::default().parser_text(), "");
    }

    #[test]
    fn ingredient_roundtrip_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "note": "flour",
            "quantity": 2.0,
            "title": "Dry",
            "disableAmount": false,
            "referenceId": "ref-1"
        });
        let ing: RecipeIngredient = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(ing.reference_id.as_deref(), Some("ref-1"));
        assert_eq!(ing.extra.get("title"), Some(&Value::String("Dry".into())));

        let back = serde_json::to_value(&ing).unwrap();
        assert_eq!(back.get("title"), raw.get("title"));
        assert_eq!(back.get("disableAmount"), raw.get("disableAmount"));
    }

    #[test]
    fn embedded_forms_are_minimal() {
        let mut extra = Map::new();
        extra.insert("description".to_string(), Value::String("x".into()));
        let food = IngredientFood {
            id: "f1".to_string(),
            name: "Flour".to_string(),
            extra,
        };
        let embedded = serde_json::to_value(food.embedded()).unwrap();
        assert_eq!(
            embedded,
            serde_json::json!({"id": "f1", "name": "Flour"})
        );
    }

    #[test]
    fn http_error_carries_context() {
        let err = MealieError::Http {
            method: "GET".to_string(),
            url: "http://mealie.local/api/recipes/pie".to_string(),
            status: 404,
            body: "{\"detail\":\"Not Found\"}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("GET"));
        assert!(msg.contains("/api/recipes/pie"));
        assert!(msg.contains("404"));
        assert!(msg.contains("Not Found"));

        let bare = MealieError::Http {
            method: "DELETE".to_string(),
            url: "http://mealie.local/api/units/u1".to_string(),
            status: 500,
            body: String::new(),
        };
        assert!(!bare.to_string().contains("body:"));
    }
}
