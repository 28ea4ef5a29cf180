//! Types for catalog lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A LEGO set as described by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegoSet {
    /// Set number including variant suffix (e.g. "8014-1").
    pub set_num: String,
    /// Human-readable set name.
    pub name: String,
    /// Release year.
    pub year: u32,
    /// Number of parts in the set.
    pub num_parts: u32,
    /// Box art image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_img_url: Option<String>,
    /// Catalog theme ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<u32>,
    /// Catalog page for this set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_url: Option<String>,
    /// When the catalog entry was last modified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_dt: Option<DateTime<Utc>>,
}

/// Outcome of looking up a single identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", content = "set", rename_all = "snake_case")]
pub enum SetLookup {
    /// The catalog has a set for this identifier.
    Found(LegoSet),
    /// The catalog has no set for this identifier.
    NotFound,
}

impl SetLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, SetLookup::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SetLookup::NotFound)
    }

    /// Borrow the set, if any.
    pub fn as_set(&self) -> Option<&LegoSet> {
        match self {
            SetLookup::Found(set) => Some(set),
            SetLookup::NotFound => None,
        }
    }

    /// Take the set, if any.
    pub fn into_set(self) -> Option<LegoSet> {
        match self {
            SetLookup::Found(set) => Some(set),
            SetLookup::NotFound => None,
        }
    }
}

impl From<Option<LegoSet>> for SetLookup {
    fn from(set: Option<LegoSet>) -> Self {
        match set {
            Some(set) => SetLookup::Found(set),
            None => SetLookup::NotFound,
        }
    }
}
