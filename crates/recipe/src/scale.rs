use std::sync::LazyLock;

use regex::Regex;

use crate::Recipe;

static LEADING_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(\d+)\s+(\d+)/(\d+)|(\d+)/(\d+)|(\d+(?:\.\d+)?))(.*)$")
        .expect("leading quantity pattern is valid")
});

fn leading_quantity(text: &str) -> Option<(f64, &str)> {
    let caps = LEADING_QUANTITY.captures(text)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<f64>().ok());

    let value = if let (Some(whole), Some(n), Some(d)) = (num(1), num(2), num(3)) {
        if d == 0.0 {
            return None;
        }
        whole + n / d
    } else if let (Some(n), Some(d)) = (num(4), num(5)) {
        if d == 0.0 {
            return None;
        }
        n / d
    } else {
        num(6)?
    };

    let rest = caps.get(7).map(|m| m.as_str()).unwrap_or_default();
    Some((value, rest))
}

fn format_quantity(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        return format!("{}", rounded as i64);
    }

    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Multiplies the quantity an ingredient line starts with.
///
/// Understands integers, decimals, `a/b` and `n a/b`; any other line is
/// returned unchanged.
pub fn scale_ingredient(text: &str, factor: f64) -> String {
    if !factor.is_finite() || factor <= 0.0 {
        return text.to_owned();
    }

    match leading_quantity(text) {
        Some((value, rest)) => format!("{}{rest}", format_quantity(value * factor)),
        None => text.to_owned(),
    }
}

/// Ingredient lines scaled from the recipe's servings to `servings`.
pub fn scale_recipe(recipe: &Recipe, servings: u32) -> Vec<String> {
    if recipe.servings == 0 || servings == 0 {
        return recipe.ingredients.clone();
    }

    let factor = servings as f64 / recipe.servings as f64;
    recipe
        .ingredients
        .iter()
        .map(|i| scale_ingredient(i, factor))
        .collect()
}
