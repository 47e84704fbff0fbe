use anyhow::{Context, Result};

use crate::instance::Defaults;

/// Listen address used when `PAGEWISE_LISTEN` is unset
pub const DEFAULT_LISTEN: &str = ":::3000";

/// Host settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Socket address the HTTP host binds
    pub listen: String,
    /// Registration defaults
    pub defaults: Defaults,
}

impl Settings {
    /// Read `PAGEWISE_LISTEN` and `PAGEWISE_ITEMS_PER_PAGE`
    /// # Errors
    /// Malformed page size list
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an arbitrary variable source
    /// # Errors
    /// Malformed page size list
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen = lookup("PAGEWISE_LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let mut defaults = Defaults::default();
        if let Some(raw) = lookup("PAGEWISE_ITEMS_PER_PAGE") {
            defaults.allowed_items_per_page = parse_page_sizes(&raw)
                .with_context(|| format!("PAGEWISE_ITEMS_PER_PAGE={raw:?}"))?;
        }
        Ok(Self { listen, defaults })
    }
}

fn parse_page_sizes(raw: &str) -> Result<Vec<i64>> {
    let sizes = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().with_context(|| format!("bad page size {s:?}")))
        .collect::<Result<Vec<_>>>()?;
    anyhow::ensure!(!sizes.is_empty(), "no page sizes given");
    anyhow::ensure!(sizes.iter().all(|n| *n > 0), "page sizes must be positive");
    Ok(sizes)
}
