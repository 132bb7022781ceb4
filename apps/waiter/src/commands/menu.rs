//! # Menu Commands
//!
//! Read-only access to the dish catalog for the dish picker.

use serde::Serialize;
use tracing::debug;

use mesa_core::Dish;

use crate::error::ApiError;
use crate::state::MenuState;

/// One menu section.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub name: String,
    pub dishes: Vec<Dish>,
}

/// Gets the menu grouped by category, in printed order.
pub fn get_menu(menu: &MenuState) -> Vec<MenuCategory> {
    debug!("get_menu command");
    let menu = menu.menu();
    menu.categories()
        .into_iter()
        .map(|category| MenuCategory {
            name: category.to_string(),
            dishes: menu.dishes_in(category).cloned().collect(),
        })
        .collect()
}

/// Gets a single dish by code.
pub fn get_dish(menu: &MenuState, code: String) -> Result<Dish, ApiError> {
    debug!(code = %code, "get_dish command");
    Ok(menu.menu().require(&code)?.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_get_menu_groups_by_category() {
        let menu = MenuState::bundled().unwrap();
        let categories = get_menu(&menu);

        assert_eq!(categories[0].name, "Entradas");
        let total: usize = categories.iter().map(|c| c.dishes.len()).sum();
        assert_eq!(total, menu.menu().len());
        assert!(categories
            .iter()
            .all(|c| c.dishes.iter().all(|d| d.category == c.name)));
    }

    #[test]
    fn test_get_dish() {
        let menu = MenuState::bundled().unwrap();
        assert_eq!(get_dish(&menu, "S1".into()).unwrap().name, "Sopa Wantán");
        assert_eq!(get_dish(&menu, "nope".into()).unwrap_err().code, ErrorCode::NotFound);
    }
}
