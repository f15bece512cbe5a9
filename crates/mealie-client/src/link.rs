//! Heuristic linking of ingredients to instruction steps.
//!
//! A token matches a step when it appears as a substring of the step text,
//! or when any sufficiently long word of the token does. Substring matching
//! is cheap, order-independent, and tolerant of minor text variation, at
//! the cost of occasional false positives on common words and misses on
//! synonyms. Tokens under three characters never match anything.

use std::collections::HashSet;

use crate::types::{IngredientReference, RecipeStep};

/// Tokens shorter than this are ignored entirely.
const MIN_TOKEN_LEN: usize = 3;

/// Individual words of a token must be at least this long to match alone.
const MIN_WORD_LEN: usize = 4;

/// A lower-cased ingredient token paired with its stable reference id.
#[derive(Debug, Clone)]
pub struct LinkToken {
    pub token: String,
    pub reference_id: String,
}

fn token_matches(token: &str, step_text: &str) -> bool {
    if step_text.contains(token) {
        return true;
    }
    token
        .split_whitespace()
        .any(|word| word.chars().count() >= MIN_WORD_LEN && step_text.contains(word))
}

/// Assign ingredient references to every step by token matching.
///
/// Each step's reference list is replaced (possibly with an empty list);
/// matches are de-duplicated preserving first-seen order over `tokens`.
/// Returns the number of steps that ended up with at least one reference.
pub fn link_ingredient_references(steps: &mut [RecipeStep], tokens: &[LinkToken]) -> usize {
    let mut linked = 0;

    for step in steps.iter_mut() {
        let text = step.text.as_deref().unwrap_or("").to_lowercase();

        let mut seen: HashSet<&str> = HashSet::new();
        let mut references = Vec::new();
        for link in tokens {
            if link.token.chars().count() < MIN_TOKEN_LEN {
                continue;
            }
            if token_matches(&link.token, &text) && seen.insert(link.reference_id.as_str()) {
                references.push(IngredientReference {
                    reference_id: link.reference_id.clone(),
                });
            }
        }

        if !references.is_empty() {
            linked += 1;
        }
        step.ingredient_references = references;
    }

    linked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(text: &str) -> RecipeStep {
        RecipeStep {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    fn token(token: &str, reference_id: &str) -> LinkToken {
        LinkToken {
            token: token.to_string(),
            reference_id: reference_id.to_string(),
        }
    }

    fn ref_ids(step: &RecipeStep) -> Vec<&str> {
        step.ingredient_references
            .iter()
            .map(|r| r.reference_id.as_str())
            .collect()
    }

    #[test]
    fn matches_in_token_iteration_order() {
        let mut steps = vec![step("Mix the flour and salt together")];
        let tokens = vec![token("flour", "ref1"), token("salt", "ref2")];

        let linked = link_ingredient_references(&mut steps, &tokens);

        assert_eq!(linked, 1);
        assert_eq!(ref_ids(&steps[0]), vec!["ref1", "ref2"]);
    }

    #[test]
    fn short_tokens_never_match() {
        let mut steps = vec![step("Brown the ox tail in oil")];
        let tokens = vec![token("ox", "ref1")];

        let linked = link_ingredient_references(&mut steps, &tokens);

        assert_eq!(linked, 0);
        assert!(steps[0].ingredient_references.is_empty());
    }

    #[test]
    fn duplicate_reference_ids_collapse() {
        // Both tokens resolve to the same ingredient.
        let mut steps = vec![step("Add the chicken stock and more stock if dry")];
        let tokens = vec![token("chicken stock", "ref1"), token("stock", "ref1")];

        link_ingredient_references(&mut steps, &tokens);

        assert_eq!(ref_ids(&steps[0]), vec!["ref1"]);
    }

    #[test]
    fn long_words_of_multiword_tokens_match_alone() {
        let mut steps = vec![step("Sprinkle the pepper on top")];
        // "black pepper" is not a substring, but "pepper" (len >= 4) is.
        let tokens = vec![token("black pepper", "ref1")];

        let linked = link_ingredient_references(&mut steps, &tokens);

        assert_eq!(linked, 1);
        assert_eq!(ref_ids(&steps[0]), vec!["ref1"]);
    }

    #[test]
    fn short_words_of_multiword_tokens_do_not_match() {
        // No word of length >= 4 appears, and the full token is absent.
        let mut steps = vec![step("Top with a fried egg")];
        let tokens = vec![token("ox eye bean", "ref1")];

        let linked = link_ingredient_references(&mut steps, &tokens);

        assert_eq!(linked, 0);
    }

    #[test]
    fn unmatched_steps_get_empty_reference_lists() {
        let mut steps = vec![
            step("Whisk the eggs"),
            RecipeStep {
                text: Some("Rest the dough".to_string()),
                ingredient_references: vec![IngredientReference {
                    reference_id: "stale".to_string(),
                }],
                ..Default::default()
            },
        ];
        let tokens = vec![token("eggs", "ref1")];

        let linked = link_ingredient_references(&mut steps, &tokens);

        assert_eq!(linked, 1);
        assert_eq!(ref_ids(&steps[0]), vec!["ref1"]);
        assert!(steps[1].ingredient_references.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive_on_step_text() {
        let mut steps = vec![step("FOLD IN THE FLOUR GENTLY")];
        let tokens = vec![token("flour", "ref1")];

        assert_eq!(link_ingredient_references(&mut steps, &tokens), 1);
    }
}
