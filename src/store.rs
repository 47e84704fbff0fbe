use std::collections::hash_map::{Entry, HashMap};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::instance::{Defaults, Overrides, PaginationConfig};

/// Pagination configs keyed by instance id.
///
/// Owned by whatever composition root hosts the paginated views. Writes are
/// never bounds-checked here: the content length is unknown to the store,
/// so clamping is left to [`crate::calculate`].
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Default)]
pub struct ConfigStore {
    defaults: Defaults,
    configs: HashMap<String, PaginationConfig>,
}

impl ConfigStore {
    /// Empty store filling registrations from `defaults`
    #[must_use]
    pub fn new(defaults: Defaults) -> Self {
        Self { defaults, configs: HashMap::new() }
    }

    /// Defaults applied at registration
    #[must_use]
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Register a pagination instance.
    ///
    /// Layers defaults, then whatever is already stored for the id, then the
    /// explicit overrides, so a late or repeated registration never clobbers
    /// values set earlier by another registration or by the user.
    /// # Errors
    /// `InvalidConfig` when the id is missing, the allowed page sizes are
    /// empty or non-positive, or the supplied page size is not allowed
    pub fn register(&mut self, overrides: Overrides) -> Result<&PaginationConfig> {
        let Some(id) = overrides.id else {
            warn!("registration without id rejected");
            return Err(Error::InvalidConfig("registration requires an `id`".to_string()));
        };
        let existing = self.configs.get(&id);

        let allowed = overrides
            .allowed_items_per_page
            .or_else(|| existing.and_then(|c| c.allowed_items_per_page.clone()))
            .unwrap_or_else(|| self.defaults.allowed_items_per_page.clone());
        if allowed.is_empty() || allowed.iter().any(|n| *n <= 0) {
            warn!(%id, ?allowed, "illegal allowed-items-per-page");
            return Err(Error::InvalidConfig(format!(
                "`{id}`: allowed-items-per-page must be non-empty and positive, got {allowed:?}"
            )));
        }
        if let Some(count) = overrides.items_per_page {
            if !allowed.contains(&count) {
                warn!(%id, count, ?allowed, "items-per-page not allowed");
                return Err(Error::InvalidConfig(format!(
                    "`{id}`: items-per-page {count} is not one of {allowed:?}"
                )));
            }
        }

        // A carried-over page size must still be offered by the allowed list
        let items_per_page = overrides
            .items_per_page
            .or_else(|| existing.and_then(|c| c.items_per_page).filter(|n| allowed.contains(n)))
            .or_else(|| allowed.first().copied());
        let merged = PaginationConfig {
            current_page: overrides
                .current_page
                .or_else(|| existing.and_then(|c| c.current_page))
                .or(Some(self.defaults.current_page)),
            items_per_page,
            allowed_items_per_page: Some(allowed),
            allow_jump: overrides
                .allow_jump
                .or_else(|| existing.and_then(|c| c.allow_jump))
                .or(Some(self.defaults.allow_jump)),
            allow_set_per_page: overrides
                .allow_set_per_page
                .or_else(|| existing.and_then(|c| c.allow_set_per_page))
                .or(Some(self.defaults.allow_set_per_page)),
            id: id.clone(),
        };

        info!(%id, items_per_page = ?merged.items_per_page, "pagination registered");
        let stored = match self.configs.entry(id) {
            Entry::Occupied(mut slot) => {
                let _ = slot.insert(merged);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(merged),
        };
        Ok(stored)
    }

    /// Stored config for `id`, or the bare `{id}` record if never registered
    #[must_use]
    pub fn get_config(&self, id: &str) -> PaginationConfig {
        self.configs.get(id).cloned().unwrap_or_else(|| PaginationConfig::bare(id))
    }

    /// Overwrite the current page, creating the entry if needed
    pub fn set_current_page(&mut self, id: &str, page: i64) {
        debug!(id, page, "set current page");
        self.entry(id).current_page = Some(page);
    }

    /// Overwrite the page size, creating the entry if needed
    pub fn set_items_per_page(&mut self, id: &str, count: i64) {
        debug!(id, count, "set items per page");
        self.entry(id).items_per_page = Some(count);
    }

    /// Drop the entry for `id`
    pub fn remove(&mut self, id: &str) -> Option<PaginationConfig> {
        let removed = self.configs.remove(id);
        if removed.is_some() {
            debug!(id, "pagination removed");
        }
        removed
    }

    /// Iterate stored configs
    pub fn iter(&self) -> impl Iterator<Item = &PaginationConfig> {
        self.configs.values()
    }

    /// Number of stored configs
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// No config stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    fn entry(&mut self, id: &str) -> &mut PaginationConfig {
        self.configs.entry(id.to_string()).or_insert_with(|| PaginationConfig::bare(id))
    }
}
