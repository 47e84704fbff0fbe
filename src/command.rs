use serde::{Deserialize, Serialize};

use enum_dispatch::enum_dispatch;

use crate::error::Result;
use crate::instance::Overrides;
use crate::store::ConfigStore;

/// Mutation accepted on the command channel
#[enum_dispatch]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Command {
    /// Merge a registration into the store
    Register(Register),
    /// Move to another page
    SetCurrentPage(SetCurrentPage),
    /// Change the page size
    SetItemsPerPage(SetItemsPerPage),
}

/// Trait to implement store commands
#[enum_dispatch(Command)]
pub trait Apply {
    /// Apply the command to the store
    /// # Errors
    /// `InvalidConfig` for rejected registrations
    fn apply(self, store: &mut ConfigStore) -> Result<()>;
}

/// Register a pagination instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    /// Values overriding the store defaults
    #[serde(flatten)]
    pub overrides: Overrides,
}

impl Apply for Register {
    fn apply(self, store: &mut ConfigStore) -> Result<()> {
        store.register(self.overrides).map(|_| ())
    }
}

/// Set the current page of `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCurrentPage {
    /// Pagination instance
    pub id: String,
    /// One-based page, unchecked
    pub page: i64,
}

impl Apply for SetCurrentPage {
    fn apply(self, store: &mut ConfigStore) -> Result<()> {
        store.set_current_page(&self.id, self.page);
        Ok(())
    }
}

/// Set the page size of `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetItemsPerPage {
    /// Pagination instance
    pub id: String,
    /// Page size, unchecked
    pub count: i64,
}

impl Apply for SetItemsPerPage {
    fn apply(self, store: &mut ConfigStore) -> Result<()> {
        store.set_items_per_page(&self.id, self.count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn commands_decode_from_tagged_json() {
        let register: Command = serde_json::from_value(json!({
            "command": "register",
            "id": "orders",
            "items-per-page": 20,
        }))
        .unwrap();
        let expected = Overrides { items_per_page: Some(20), ..Overrides::with_id("orders") };
        assert_eq!(register, Command::Register(Register { overrides: expected }));

        let page: Command =
            serde_json::from_value(json!({ "command": "set-current-page", "id": "orders", "page": 3 }))
                .unwrap();
        assert_eq!(page, Command::SetCurrentPage(SetCurrentPage { id: "orders".into(), page: 3 }));

        let size: Command =
            serde_json::from_value(json!({ "command": "set-items-per-page", "id": "orders", "count": 50 }))
                .unwrap();
        assert_eq!(size, Command::SetItemsPerPage(SetItemsPerPage { id: "orders".into(), count: 50 }));
    }

    #[test]
    fn unknown_command_is_rejected() {
        let res = serde_json::from_value::<Command>(json!({ "command": "reset", "id": "orders" }));
        assert!(res.is_err());
    }

    #[test]
    fn commands_apply_in_order() {
        let mut store = ConfigStore::default();
        let commands = vec![
            Command::from(Register { overrides: Overrides::with_id("x") }),
            Command::from(SetCurrentPage { id: "x".into(), page: 9 }),
            Command::from(SetItemsPerPage { id: "x".into(), count: 50 }),
        ];
        for command in commands {
            command.apply(&mut store).unwrap();
        }

        let config = store.get_config("x");
        assert_eq!(config.current_page, Some(9));
        assert_eq!(config.items_per_page, Some(50));
    }

    #[test]
    fn register_command_surfaces_invalid_config() {
        let mut store = ConfigStore::default();
        let err = Command::from(Register { overrides: Overrides::default() }).apply(&mut store);
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }
}
