//! # Menu Catalog
//!
//! The static dish catalog, provided once at startup and read-only after.
//!
//! Dishes keep the order they were listed in, and categories are reported in
//! the order they first appear, so the dish picker renders the menu the way
//! the restaurant printed it.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Dish;
use crate::validation::validate_dish;

/// Catalog shipped with Mesa, used when no menu file is configured.
pub const BUNDLED_MENU: &str = include_str!("../menu.json");

/// Read-only dish catalog indexed by code.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    dishes: Vec<Dish>,
    by_code: HashMap<String, usize>,
}

impl Menu {
    /// Builds a catalog, validating every entry and rejecting duplicate codes.
    pub fn new(dishes: Vec<Dish>) -> CoreResult<Self> {
        let mut by_code = HashMap::with_capacity(dishes.len());

        for (idx, dish) in dishes.iter().enumerate() {
            validate_dish(dish)?;
            if by_code.insert(dish.code.clone(), idx).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "dish code".to_string(),
                    value: dish.code.clone(),
                }
                .into());
            }
        }

        Ok(Menu { dishes, by_code })
    }

    /// Parses a catalog from its JSON form (an array of dishes).
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let dishes: Vec<Dish> =
            serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
                field: "menu".to_string(),
                reason: e.to_string(),
            })?;
        Menu::new(dishes)
    }

    /// Loads [`BUNDLED_MENU`].
    pub fn bundled() -> CoreResult<Self> {
        Menu::from_json(BUNDLED_MENU)
    }

    pub fn get(&self, code: &str) -> Option<&Dish> {
        self.by_code.get(code).map(|&idx| &self.dishes[idx])
    }

    /// Like [`Menu::get`], but a missing code is an error.
    pub fn require(&self, code: &str) -> CoreResult<&Dish> {
        self.get(code)
            .ok_or_else(|| CoreError::DishNotFound(code.to_string()))
    }

    /// Categories in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for dish in &self.dishes {
            if !seen.contains(&dish.category.as_str()) {
                seen.push(dish.category.as_str());
            }
        }
        seen
    }

    pub fn dishes_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Dish> + 'a {
        self.dishes.iter().filter(move |d| d.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dish> {
        self.dishes.iter()
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"code": "E1", "name": "Wantán Frito", "price": 12, "category": "Entradas"},
        {"code": "A1", "name": "Arroz Chaufa", "price": 18.5, "category": "Arroces",
         "keywords": ["chaufa"]},
        {"code": "E2", "name": "Tequeños", "price": 14, "category": "Entradas"}
    ]"#;

    #[test]
    fn test_from_json_and_lookup() {
        let menu = Menu::from_json(SAMPLE).unwrap();
        assert_eq!(menu.len(), 3);
        assert_eq!(menu.get("A1").unwrap().price.cents(), 1850);
        assert!(menu.get("Z9").is_none());
        assert!(matches!(menu.require("Z9"), Err(CoreError::DishNotFound(_))));
    }

    #[test]
    fn test_categories_keep_first_appearance_order() {
        let menu = Menu::from_json(SAMPLE).unwrap();
        assert_eq!(menu.categories(), vec!["Entradas", "Arroces"]);

        let entradas: Vec<&str> = menu.dishes_in("Entradas").map(|d| d.code.as_str()).collect();
        assert_eq!(entradas, vec!["E1", "E2"]);
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let json = r#"[
            {"code": "E1", "name": "Uno", "price": 1, "category": "X"},
            {"code": "E1", "name": "Dos", "price": 2, "category": "X"}
        ]"#;
        let err = Menu::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_bundled_menu_is_valid() {
        let menu = Menu::bundled().unwrap();
        assert_eq!(menu.categories()[0], "Entradas");
        assert_eq!(menu.require("A1").unwrap().price.cents(), 1850);
        assert!(menu.iter().any(|d| d.has_variations()));
    }

    #[test]
    fn test_absurd_price_rejected() {
        let json = r#"[{"code": "X1", "name": "Oro", "price": 90000000000000000, "category": "X"}]"#;
        assert!(matches!(
            Menu::from_json(json),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(Menu::from_json("{not json").is_err());
        assert!(Menu::from_json(r#"[{"code": "E1"}]"#).is_err());
    }
}
