use crate::pantry::PantrySet;
use crate::recipes::RecipeRecord;
use std::collections::BTreeSet;

/// Everything the recipes need that the pantry does not already cover.
///
/// Ingredients are deduplicated on their exact text, dropped when their
/// lower-cased name contains a pantry entry, and returned in code-point
/// order.
pub fn consolidate(recipes: &[RecipeRecord], pantry: &PantrySet) -> Vec<String> {
    let required: BTreeSet<&str> = recipes
        .iter()
        .flat_map(|recipe| recipe.required_ingredients.iter())
        .map(String::as_str)
        .collect();

    required
        .into_iter()
        .filter(|ingredient| !pantry.covers(ingredient))
        .map(String::from)
        .collect()
}
