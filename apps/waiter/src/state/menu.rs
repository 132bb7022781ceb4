//! # Menu State
//!
//! The dish catalog, loaded once at startup and read-only afterwards.

use std::path::Path;

use tracing::info;

use mesa_core::{CoreResult, Menu};

use crate::error::ApiError;

/// Read-only menu state.
#[derive(Debug, Clone)]
pub struct MenuState {
    menu: Menu,
}

impl MenuState {
    pub fn new(menu: Menu) -> Self {
        MenuState { menu }
    }

    /// Loads the catalog bundled with mesa-core.
    pub fn bundled() -> CoreResult<Self> {
        Ok(MenuState::new(Menu::bundled()?))
    }

    /// Loads the catalog from `path`, or the bundled one when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ApiError> {
        let state = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    ApiError::internal(format!("Cannot read menu {}: {}", path.display(), e))
                })?;
                MenuState::new(Menu::from_json(&json)?)
            }
            None => MenuState::bundled()?,
        };

        info!(
            dishes = state.menu.len(),
            categories = state.menu.categories().len(),
            "Menu loaded"
        );
        Ok(state)
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_menu_is_valid() {
        let state = MenuState::bundled().unwrap();
        assert!(!state.menu().is_empty());
        assert_eq!(state.menu().categories()[0], "Entradas");
        assert_eq!(state.menu().require("A1").unwrap().price.cents(), 1850);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = MenuState::load(Some(Path::new("/nonexistent/menu.json"))).unwrap_err();
        assert!(err.message.contains("Cannot read menu"));
    }
}
