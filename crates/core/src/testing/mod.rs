//! Testing utilities and mock implementations.
//!
//! This module provides a mock catalog so the resolver and the HTTP service
//! can be exercised without talking to Rebrickable.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use brickfind_core::{SetResolver, testing::{MockSetCatalog, fixtures}};
//!
//! let catalog = Arc::new(MockSetCatalog::new());
//! catalog.add_set(8014, fixtures::default_set()).await;
//!
//! let resolver = SetResolver::new(catalog.clone());
//! resolver.init().await?;
//! ```

mod mock_set_catalog;

pub use mock_set_catalog::MockSetCatalog;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::external_catalog::LegoSet;

    /// Create a test set with reasonable defaults derived from `id`.
    pub fn lego_set(id: i32, name: &str) -> LegoSet {
        LegoSet {
            set_num: format!("{}-1", id),
            name: name.to_string(),
            year: 2000 + id.rem_euclid(25) as u32,
            num_parts: 50 + id.rem_euclid(950) as u32,
            set_img_url: Some(format!(
                "https://cdn.rebrickable.com/media/sets/{}-1.jpg",
                id
            )),
            theme_id: Some(158),
            set_url: None,
            last_modified_dt: None,
        }
    }

    /// The default fallback set, 8014-1.
    pub fn default_set() -> LegoSet {
        LegoSet {
            set_num: "8014-1".to_string(),
            name: "Clone Walker Battle Pack".to_string(),
            year: 2009,
            num_parts: 74,
            set_img_url: Some("https://cdn.rebrickable.com/media/sets/8014-1.jpg".to_string()),
            theme_id: Some(158),
            set_url: Some(
                "https://rebrickable.com/sets/8014-1/clone-walker-battle-pack/".to_string(),
            ),
            last_modified_dt: None,
        }
    }
}
