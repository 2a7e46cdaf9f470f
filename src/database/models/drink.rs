use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One menu entry as stored. The recipe is kept as a serialized text blob
/// and only deserialized when building a wire projection.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    pub recipe: Option<String>,
}

/// One recipe component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub color: String,
    pub parts: i64,
}

/// Full-detail projection for privileged views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkLong {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Public listing projection: quantities are withheld.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinkShort {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortIngredient {
    pub color: String,
}

impl Drink {
    /// Parsed recipe; a NULL column reads as an empty recipe.
    pub fn ingredients(&self) -> Result<Vec<Ingredient>, serde_json::Error> {
        match &self.recipe {
            Some(raw) => serde_json::from_str(raw),
            None => Ok(Vec::new()),
        }
    }

    pub fn long(&self) -> Result<DrinkLong, serde_json::Error> {
        Ok(DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.ingredients()?,
        })
    }

    pub fn short(&self) -> Result<DrinkShort, serde_json::Error> {
        let recipe = self
            .ingredients()?
            .into_iter()
            .map(|i| ShortIngredient { color: i.color })
            .collect();

        Ok(DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe,
        })
    }
}
