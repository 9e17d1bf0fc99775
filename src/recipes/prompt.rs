use crate::config::PlannerConfig;

/// Number of meals requested per report
pub const MEAL_COUNT: usize = 4;

/// The instruction template sent to the text generator.
///
/// Loaded from `prompt.txt` at compile time. Contains `{{COUNT}}`,
/// `{{INGREDIENTS}}`, `{{THEMES}}`, `{{BABY_AGE}}` and `{{CONSTRAINTS}}`
/// placeholders filled by `build_recipe_prompt`.
pub const RECIPE_PROMPT: &str = include_str!("prompt.txt");

/// Fill the template with this week's discounted items and the household settings
pub fn build_recipe_prompt(items: &[String], config: &PlannerConfig) -> String {
    let ingredients = if items.is_empty() {
        "les ingrédients de ton choix".to_string()
    } else {
        items.join(", ")
    };

    RECIPE_PROMPT
        .replace("{{COUNT}}", &MEAL_COUNT.to_string())
        .replace("{{INGREDIENTS}}", &ingredients)
        .replace("{{THEMES}}", &config.themes.join(", "))
        .replace("{{BABY_AGE}}", &config.baby_age)
        .replace("{{CONSTRAINTS}}", &constraints(config))
}

fn constraints(config: &PlannerConfig) -> String {
    let mut lines = Vec::new();
    if let Some(max_prep_time) = non_blank(config.max_prep_time.as_deref()) {
        lines.push(format!("Temps de préparation maximal : {}.", max_prep_time));
    }
    if let Some(allergies) = non_blank(config.allergies.as_deref()) {
        lines.push(format!("Allergies à respecter : {}.", allergies));
    }
    lines.join("\n")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
