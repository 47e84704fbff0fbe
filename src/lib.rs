//! Pagination state for in-memory collections: a store of per-instance
//! configs, the commands that mutate it, and a calculator deriving page
//! boundaries, navigation targets and the visible slice.

// Lints
#![warn(unsafe_code)]
#![deny(unused_results)]
#![warn(missing_docs)]
// Clippy lint options
// https://rust-lang.github.io/rust-clippy/master/index.html
#![deny(
    // Pedantic
    clippy::pedantic,
)]
#![warn(
    // Restriction
    clippy::allow_attributes_without_reason,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::if_then_some_else_none,
    clippy::let_underscore_must_use,
    clippy::map_err_ignore,
    clippy::mod_module_files,
    clippy::same_name_method,
    clippy::separated_literal_suffix,
    clippy::shadow_unrelated,
    clippy::try_err,
    clippy::unneeded_field_pattern,
    clippy::unseparated_literal_suffix,
    clippy::mixed_read_write_in_expression,

    // Nursery
    clippy::cognitive_complexity,
    clippy::future_not_send,

    // Cargo
    clippy::wildcard_dependencies,
)]
#![allow(clippy::match_bool)]

pub mod api;
pub mod command;
pub mod error;
pub mod instance;
pub mod pagination;
pub mod settings;
pub mod store;

pub use command::{Apply, Command};
pub use error::{Error, Result};
pub use instance::{Defaults, Overrides, PaginationConfig};
pub use pagination::{calculate, calculate_value, PaginationResult};
pub use store::ConfigStore;
