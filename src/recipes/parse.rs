use super::RecipeRecord;
use crate::error::GenerationError;
use serde_json::{Map, Value};

/// Trim the model text and drop markdown code fences around the JSON
pub fn sanitize_response(text: &str) -> String {
    text.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse the model text into recipes.
///
/// The top level must be a JSON array; `[]` is a valid empty list.
/// Objects missing fields still produce a record (empty strings, no
/// ingredients) and stray non-object entries are skipped, but an array
/// holding nothing but non-objects is the wrong shape.
pub fn parse_recipes(text: &str) -> Result<Vec<RecipeRecord>, GenerationError> {
    let cleaned = sanitize_response(text);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| GenerationError::InvalidResponse(format!("not valid JSON: {}", e)))?;

    let entries = value.as_array().ok_or_else(|| {
        GenerationError::InvalidResponse("expected a JSON array of recipes".to_string())
    })?;

    let recipes: Vec<RecipeRecord> = entries
        .iter()
        .filter_map(Value::as_object)
        .map(recipe_from_object)
        .collect();

    if recipes.is_empty() && !entries.is_empty() {
        return Err(GenerationError::InvalidResponse(
            "expected recipe objects in the JSON array".to_string(),
        ));
    }

    Ok(recipes)
}

fn recipe_from_object(object: &Map<String, Value>) -> RecipeRecord {
    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let required_ingredients = object
        .get("required_ingredients")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    RecipeRecord {
        title: text("title"),
        desc: text("desc"),
        baby_tip: text("baby_tip"),
        required_ingredients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_fences() {
        let text = "  ```json\n[{\"title\": \"Soupe\"}]\n```  ";
        assert_eq!(sanitize_response(text), "[{\"title\": \"Soupe\"}]");
    }

    #[test]
    fn test_sanitize_plain_fence() {
        assert_eq!(sanitize_response("```\n[]\n```"), "[]");
    }

    #[test]
    fn test_parse_full_recipe() {
        let text = r#"```json
        [{
            "title": "Pâté chinois",
            "desc": "Classique québécois",
            "baby_tip": "Écraser finement",
            "required_ingredients": ["Porc haché", "Patates", "Maïs en crème"]
        }]
        ```"#;
        let recipes = parse_recipes(text).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Pâté chinois");
        assert_eq!(recipes[0].baby_tip, "Écraser finement");
        assert_eq!(
            recipes[0].required_ingredients,
            vec!["Porc haché", "Patates", "Maïs en crème"]
        );
    }

    #[test]
    fn test_parse_tolerates_missing_fields() {
        let recipes = parse_recipes(r#"[{"title": "Tacos"}, {"desc": "Sans titre"}]"#).unwrap();
        assert_eq!(recipes.len(), 2);
        assert!(recipes[0].required_ingredients.is_empty());
        assert_eq!(recipes[0].desc, "");
        assert_eq!(recipes[1].title, "");
    }

    #[test]
    fn test_parse_drops_non_string_ingredients() {
        let recipes =
            parse_recipes(r#"[{"title": "Pad thaï", "required_ingredients": ["Nouilles", 3, null, " "]}]"#)
                .unwrap();
        assert_eq!(recipes[0].required_ingredients, vec!["Nouilles", " "]);
    }

    #[test]
    fn test_parse_keeps_ingredients_as_authored() {
        let recipes =
            parse_recipes(r#"[{"title": "A", "required_ingredients": ["Ail", "Ail ", " Lime"]}]"#)
                .unwrap();
        assert_eq!(recipes[0].required_ingredients, vec!["Ail", "Ail ", " Lime"]);

        let list = crate::shopping::consolidate(&recipes, &crate::pantry::PantrySet::default());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_recipes("[]").unwrap().is_empty());
        assert!(parse_recipes("```json\n[]\n```").unwrap().is_empty());
    }

    #[test]
    fn test_parse_skips_non_objects() {
        let recipes = parse_recipes(r#"["oops", {"title": "Chili"}, 42]"#).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Chili");
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_recipes("not json").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_recipes(r#"{"title": "Chili"}"#).is_err());
        assert!(parse_recipes(r#""Chili""#).is_err());

        let err = parse_recipes("[1, 2]").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }
}
