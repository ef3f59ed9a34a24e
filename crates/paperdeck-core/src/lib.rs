//! paperdeck-core: Derived library views and the application facade.
//!
//! [`LibraryQuery`] turns the full saved-paper collection into what a list
//! screen shows: searched, filtered, sorted, optionally grouped. [`AppCore`]
//! wires the catalog, swipe ledger, and meta store together and is the only
//! surface presentation code talks to.

pub mod app;
pub mod query;

pub use app::*;
pub use query::*;
