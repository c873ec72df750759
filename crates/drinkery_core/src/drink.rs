use serde::{Deserialize, Serialize};

/// A single ingredient of a drink recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: i64,
}

/// A drink in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Drink {
    /// Assigned by the [`DrinkStore`](crate::traits::DrinkStore) on creation.
    pub id: i64,
    /// Unique across the catalog.
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// The public projection of a [`Drink`], without ingredient names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: i64,
}

/// The detailed projection of a [`Drink`].
pub type LongDrink = Drink;

impl Drink {
    /// Recipe colors and proportions only.
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|i| ShortIngredient {
                    color: i.color.clone(),
                    parts: i.parts,
                })
                .collect(),
        }
    }

    /// Full detail, including ingredient names.
    pub fn long(&self) -> LongDrink {
        self.clone()
    }
}

/// Request body of both `POST /drinks` and `PATCH /drinks/{id}`.
///
/// On creation `title` is required and a missing `recipe` means an empty one.
/// On update only the supplied fields change.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DrinkInput {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

impl DrinkInput {
    /// The supplied title, rejected when blank.
    pub fn title(&self) -> Result<Option<&str>, crate::error::StoreError> {
        match self.title.as_deref() {
            Some(title) if title.trim().is_empty() => Err(crate::error::StoreError::Validation(
                "title must not be blank".into(),
            )),
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn espresso() -> Drink {
        Drink {
            id: 7,
            title: "espresso".into(),
            recipe: vec![Ingredient {
                name: "shot".into(),
                color: "brown".into(),
                parts: 1,
            }],
        }
    }

    #[test]
    fn short_omits_ingredient_names() {
        let value = serde_json::to_value(espresso().short()).unwrap();
        assert_eq!(
            value,
            json!({"id": 7, "title": "espresso", "recipe": [{"color": "brown", "parts": 1}]})
        );
    }

    #[test]
    fn long_keeps_ingredient_names() {
        let value = serde_json::to_value(espresso().long()).unwrap();
        assert_eq!(value["recipe"][0]["name"], "shot");
    }

    #[test]
    fn input_rejects_incomplete_ingredients() {
        let res = serde_json::from_value::<DrinkInput>(json!({
            "title": "latte",
            "recipe": [{"name": "milk", "color": "white"}]
        }));
        assert!(res.is_err());
    }

    #[test]
    fn blank_title_is_invalid() {
        let input = DrinkInput {
            title: Some("   ".into()),
            recipe: None,
        };
        assert!(input.title().is_err());
        assert_eq!(DrinkInput::default().title().unwrap(), None);
    }
}
