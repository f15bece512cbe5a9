//! Explicit tool registry: a static table of names, profile availability,
//! and schema builders, plus programmatic dispatch.

use std::sync::Arc;

use mealie_client::MealieClient;
use serde_json::Value;

use crate::config::Profile;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::{foods, labels, organizers, parser, recipes, shopping, units};

/// One registered tool. Every tool is exposed by the `full` profile;
/// `core` marks additional membership in the leaner default workflows.
pub struct ToolSpec {
    pub name: &'static str,
    pub core: bool,
    pub definition: fn() -> ToolDefinition,
}

macro_rules! tool {
    ($name:literal, core, $def:path) => {
        ToolSpec {
            name: $name,
            core: true,
            definition: $def,
        }
    };
    ($name:literal, full, $def:path) => {
        ToolSpec {
            name: $name,
            core: false,
            definition: $def,
        }
    };
}

/// The complete tool surface, in the order advertised to clients.
pub static TOOLS: &[ToolSpec] = &[
    // Recipes
    tool!("get_recipes", core, recipes::get_recipes_def),
    tool!("get_recipe", core, recipes::get_recipe_def),
    tool!("create_recipe", core, recipes::create_recipe_def),
    tool!("update_recipe", core, recipes::update_recipe_def),
    tool!("patch_recipe", core, recipes::patch_recipe_def),
    tool!("delete_recipe", core, recipes::delete_recipe_def),
    tool!("duplicate_recipe", core, recipes::duplicate_recipe_def),
    tool!("set_recipe_last_made", core, recipes::set_recipe_last_made_def),
    tool!("import_recipe_from_url", core, recipes::import_recipe_from_url_def),
    tool!(
        "import_or_get_recipe_from_url",
        core,
        recipes::import_or_get_recipe_from_url_def
    ),
    tool!("test_scrape_url", core, recipes::test_scrape_url_def),
    tool!("suggest_recipes", core, recipes::suggest_recipes_def),
    // Shopping lists
    tool!("get_shopping_lists", core, shopping::get_shopping_lists_def),
    tool!("get_shopping_list", core, shopping::get_shopping_list_def),
    tool!("create_shopping_list", core, shopping::create_shopping_list_def),
    tool!("update_shopping_list", core, shopping::update_shopping_list_def),
    tool!("delete_shopping_list", core, shopping::delete_shopping_list_def),
    tool!(
        "add_recipe_to_shopping_list",
        core,
        shopping::add_recipe_to_shopping_list_def
    ),
    tool!(
        "remove_recipe_from_shopping_list",
        core,
        shopping::remove_recipe_from_shopping_list_def
    ),
    // Shopping items
    tool!("get_shopping_items", core, shopping::get_shopping_items_def),
    tool!("get_shopping_item", core, shopping::get_shopping_item_def),
    tool!("add_shopping_item", core, shopping::add_shopping_item_def),
    tool!("add_shopping_items_bulk", core, shopping::add_shopping_items_bulk_def),
    tool!("update_shopping_item", core, shopping::update_shopping_item_def),
    tool!("delete_shopping_item", core, shopping::delete_shopping_item_def),
    // Categories
    tool!("get_categories", core, organizers::get_categories_def),
    tool!("get_category", core, organizers::get_category_def),
    tool!("get_category_by_slug", full, organizers::get_category_by_slug_def),
    tool!("get_empty_categories", full, organizers::get_empty_categories_def),
    tool!("create_category", core, organizers::create_category_def),
    tool!("update_category", core, organizers::update_category_def),
    tool!("delete_category", core, organizers::delete_category_def),
    // Tags
    tool!("get_tags", core, organizers::get_tags_def),
    tool!("get_tag", core, organizers::get_tag_def),
    tool!("get_tag_by_slug", full, organizers::get_tag_by_slug_def),
    tool!("get_empty_tags", full, organizers::get_empty_tags_def),
    tool!("create_tag", core, organizers::create_tag_def),
    tool!("update_tag", core, organizers::update_tag_def),
    tool!("delete_tag", core, organizers::delete_tag_def),
    // Kitchen tools
    tool!("get_tools", core, organizers::get_tools_def),
    tool!("get_tool", core, organizers::get_tool_def),
    tool!("get_tool_by_slug", full, organizers::get_tool_by_slug_def),
    tool!("create_tool", core, organizers::create_tool_def),
    tool!("update_tool", core, organizers::update_tool_def),
    tool!("delete_tool", core, organizers::delete_tool_def),
    tool!("set_recipe_tools", core, organizers::set_recipe_tools_def),
    // Foods
    tool!("get_foods", core, foods::get_foods_def),
    tool!("get_food", core, foods::get_food_def),
    tool!("create_food", core, foods::create_food_def),
    tool!("update_food", core, foods::update_food_def),
    tool!("delete_food", core, foods::delete_food_def),
    tool!("merge_foods", core, foods::merge_foods_def),
    // Units
    tool!("get_units", core, units::get_units_def),
    tool!("get_unit", core, units::get_unit_def),
    tool!("create_unit", core, units::create_unit_def),
    tool!("update_unit", core, units::update_unit_def),
    tool!("delete_unit", core, units::delete_unit_def),
    tool!("merge_units", core, units::merge_units_def),
    // Labels
    tool!("get_labels", full, labels::get_labels_def),
    tool!("get_label", full, labels::get_label_def),
    tool!("create_label", full, labels::create_label_def),
    tool!("update_label", full, labels::update_label_def),
    tool!("delete_label", full, labels::delete_label_def),
    // Ingredient parser
    tool!("parse_ingredient", core, parser::parse_ingredient_def),
    tool!("parse_ingredients", core, parser::parse_ingredients_def),
    tool!(
        "formalize_recipe_ingredients",
        core,
        parser::formalize_recipe_ingredients_def
    ),
];

/// Profile-aware tool dispatcher bound to one upstream client.
pub struct ToolRegistry {
    client: Arc<MealieClient>,
    profile: Profile,
}

impl ToolRegistry {
    pub fn new(client: Arc<MealieClient>, profile: Profile) -> Self {
        Self { client, profile }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    fn enabled(profile: Profile, spec: &ToolSpec) -> bool {
        profile == Profile::Full || spec.core
    }

    /// Definitions of every tool the given profile exposes.
    pub fn definitions(profile: Profile) -> Vec<ToolDefinition> {
        TOOLS
            .iter()
            .filter(|spec| Self::enabled(profile, spec))
            .map(|spec| (spec.definition)())
            .collect()
    }

    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        Self::definitions(self.profile)
    }

    /// Invoke a tool by name. A name missing from the table, or excluded by
    /// the active profile, is tool-not-found either way.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> McpResult<ToolCallResult> {
        let known = TOOLS
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?;
        if !Self::enabled(self.profile, known) {
            return Err(McpError::ToolNotFound(name.to_string()));
        }

        let args = arguments.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        dispatch(name, args, &self.client).await
    }
}

async fn dispatch(name: &str, args: Value, client: &MealieClient) -> McpResult<ToolCallResult> {
    match name {
        "get_recipes" => recipes::get_recipes(args, client).await,
        "get_recipe" => recipes::get_recipe(args, client).await,
        "create_recipe" => recipes::create_recipe(args, client).await,
        "update_recipe" => recipes::update_recipe(args, client).await,
        "patch_recipe" => recipes::patch_recipe(args, client).await,
        "delete_recipe" => recipes::delete_recipe(args, client).await,
        "duplicate_recipe" => recipes::duplicate_recipe(args, client).await,
        "set_recipe_last_made" => recipes::set_recipe_last_made(args, client).await,
        "import_recipe_from_url" => recipes::import_recipe_from_url(args, client).await,
        "import_or_get_recipe_from_url" => {
            recipes::import_or_get_recipe_from_url(args, client).await
        }
        "test_scrape_url" => recipes::test_scrape_url(args, client).await,
        "suggest_recipes" => recipes::suggest_recipes(args, client).await,
        "get_shopping_lists" => shopping::get_shopping_lists(args, client).await,
        "get_shopping_list" => shopping::get_shopping_list(args, client).await,
        "create_shopping_list" => shopping::create_shopping_list(args, client).await,
        "update_shopping_list" => shopping::update_shopping_list(args, client).await,
        "delete_shopping_list" => shopping::delete_shopping_list(args, client).await,
        "add_recipe_to_shopping_list" => shopping::add_recipe_to_shopping_list(args, client).await,
        "remove_recipe_from_shopping_list" => {
            shopping::remove_recipe_from_shopping_list(args, client).await
        }
        "get_shopping_items" => shopping::get_shopping_items(args, client).await,
        "get_shopping_item" => shopping::get_shopping_item(args, client).await,
        "add_shopping_item" => shopping::add_shopping_item(args, client).await,
        "add_shopping_items_bulk" => shopping::add_shopping_items_bulk(args, client).await,
        "update_shopping_item" => shopping::update_shopping_item(args, client).await,
        "delete_shopping_item" => shopping::delete_shopping_item(args, client).await,
        "get_categories" => organizers::get_categories(args, client).await,
        "get_category" => organizers::get_category(args, client).await,
        "get_category_by_slug" => organizers::get_category_by_slug(args, client).await,
        "get_empty_categories" => organizers::get_empty_categories(args, client).await,
        "create_category" => organizers::create_category(args, client).await,
        "update_category" => organizers::update_category(args, client).await,
        "delete_category" => organizers::delete_category(args, client).await,
        "get_tags" => organizers::get_tags(args, client).await,
        "get_tag" => organizers::get_tag(args, client).await,
        "get_tag_by_slug" => organizers::get_tag_by_slug(args, client).await,
        "get_empty_tags" => organizers::get_empty_tags(args, client).await,
        "create_tag" => organizers::create_tag(args, client).await,
        "update_tag" => organizers::update_tag(args, client).await,
        "delete_tag" => organizers::delete_tag(args, client).await,
        "get_tools" => organizers::get_tools(args, client).await,
        "get_tool" => organizers::get_tool(args, client).await,
        "get_tool_by_slug" => organizers::get_tool_by_slug(args, client).await,
        "create_tool" => organizers::create_tool(args, client).await,
        "update_tool" => organizers::update_tool(args, client).await,
        "delete_tool" => organizers::delete_tool(args, client).await,
        "set_recipe_tools" => organizers::set_recipe_tools(args, client).await,
        "get_foods" => foods::get_foods(args, client).await,
        "get_food" => foods::get_food(args, client).await,
        "create_food" => foods::create_food(args, client).await,
        "update_food" => foods::update_food(args, client).await,
        "delete_food" => foods::delete_food(args, client).await,
        "merge_foods" => foods::merge_foods(args, client).await,
        "get_units" => units::get_units(args, client).await,
        "get_unit" => units::get_unit(args, client).await,
        "create_unit" => units::create_unit(args, client).await,
        "update_unit" => units::update_unit(args, client).await,
        "delete_unit" => units::delete_unit(args, client).await,
        "merge_units" => units::merge_units(args, client).await,
        "get_labels" => labels::get_labels(args, client).await,
        "get_label" => labels::get_label(args, client).await,
        "create_label" => labels::create_label(args, client).await,
        "update_label" => labels::update_label(args, client).await,
        "delete_label" => labels::delete_label(args, client).await,
        "parse_ingredient" => parser::parse_ingredient(args, client).await,
        "parse_ingredients" => parser::parse_ingredients(args, client).await,
        "formalize_recipe_ingredients" => {
            parser::formalize_recipe_ingredients(args, client).await
        }
        _ => Err(McpError::ToolNotFound(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tool_names_are_unique() {
        let mut seen = HashSet::new();
        for spec in TOOLS {
            assert!(seen.insert(spec.name), "duplicate tool name {}", spec.name);
        }
    }

    #[test]
    fn definitions_match_registered_names() {
        for spec in TOOLS {
            assert_eq!((spec.definition)().name, spec.name);
        }
    }

    #[test]
    fn core_profile_is_a_strict_subset() {
        let core = ToolRegistry::definitions(Profile::Core);
        let full = ToolRegistry::definitions(Profile::Full);
        assert!(core.len() < full.len());

        let full_names: HashSet<_> = full.iter().map(|d| d.name.as_str()).collect();
        for def in &core {
            assert!(full_names.contains(def.name.as_str()));
        }
    }

    #[test]
    fn labels_and_slug_helpers_are_full_only() {
        let core = ToolRegistry::definitions(Profile::Core);
        let core_names: HashSet<_> = core.iter().map(|d| d.name.as_str()).collect();
        for hidden in [
            "get_labels",
            "get_label",
            "create_label",
            "update_label",
            "delete_label",
            "get_category_by_slug",
            "get_empty_categories",
            "get_tag_by_slug",
            "get_empty_tags",
        ] {
            assert!(!core_names.contains(hidden), "{hidden} leaked into core");
        }
        assert!(core_names.contains("formalize_recipe_ingredients"));
    }
}
