use serde::{Deserialize, Serialize};

/// Page sizes offered when a registration does not name its own
pub const DEFAULT_ALLOWED_ITEMS_PER_PAGE: [i64; 5] = [10, 20, 50, 100, 200];

/// State of one pagination use-site, keyed by `id`.
///
/// Everything but the id is optional: an id that was never registered
/// reads back as the bare `{id}` record. Page numbers are signed because
/// the values are written straight from UI state and may be stale or
/// out of range; the calculator corrects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PaginationConfig {
    /// Pagination-instance identifier
    pub id: String,
    /// One-based page currently shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<i64>,
    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<i64>,
    /// Page sizes the UI may offer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_items_per_page: Option<Vec<i64>>,
    /// Show the jump back/forward controls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_jump: Option<bool>,
    /// Show the page size selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_set_per_page: Option<bool>,
}

impl PaginationConfig {
    /// Record holding nothing but its id
    #[must_use]
    pub fn bare<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            current_page: None,
            items_per_page: None,
            allowed_items_per_page: None,
            allow_jump: None,
            allow_set_per_page: None,
        }
    }
}

/// Registration payload: caller-supplied values that win over defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Overrides {
    /// Required at registration, kept optional so its absence can be reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// See [`PaginationConfig::current_page`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<i64>,
    /// Must be one of the allowed page sizes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<i64>,
    /// Fixed at registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_items_per_page: Option<Vec<i64>>,
    /// UI toggle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_jump: Option<bool>,
    /// UI toggle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_set_per_page: Option<bool>,
}

impl Overrides {
    /// Overrides naming only the id
    #[must_use]
    pub fn with_id<S: Into<String>>(id: S) -> Self {
        Self { id: Some(id.into()), ..Self::default() }
    }
}

/// Values filling the gaps of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Defaults {
    /// Page a fresh registration starts on
    pub current_page: i64,
    /// Page sizes offered when the registration names none
    pub allowed_items_per_page: Vec<i64>,
    /// UI toggle
    pub allow_jump: bool,
    /// UI toggle
    pub allow_set_per_page: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            current_page: 1,
            allowed_items_per_page: DEFAULT_ALLOWED_ITEMS_PER_PAGE.to_vec(),
            allow_jump: true,
            allow_set_per_page: true,
        }
    }
}
