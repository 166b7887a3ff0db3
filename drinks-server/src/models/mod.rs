use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Longest accepted drink title
pub const MAX_TITLE_LEN: usize = 80;

/// One ingredient of a recipe, drawn as a colored layer of the drink
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Ingredient {
    /// Display color of the layer
    pub color: String,
    /// Ingredient name
    pub name: String,
    /// Relative amount of the ingredient
    pub parts: u32,
}

/// A drink with its full recipe, serialized as the long representation
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Drink {
    /// Server assigned identifier
    pub id: i64,
    /// Unique title
    pub title: String,
    /// Ordered ingredient layers
    pub recipe: Vec<Ingredient>,
}

/// Recipe layer without the ingredient name
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// Drink as shown on the public menu: the recipe only reveals colors and proportions
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct ShortDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

impl Drink {
    /// The short representation, hiding ingredient names
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| ShortIngredient {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }
}

/// Reasons a drink title is rejected
pub fn validate_title(title: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("Drink title must not be empty");
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err("Drink title must be at most 80 characters");
    }
    Ok(())
}
