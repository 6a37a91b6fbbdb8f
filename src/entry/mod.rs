//! Finance entries: the domain types, the service that runs the use cases,
//! and the JSON endpoints.

mod create;
mod delete;
mod domain;
mod edit;
mod list;
mod service;
mod view;

pub use create::create_entry_endpoint;
pub use delete::delete_entry_endpoint;
pub use domain::{Amount, Category, Description, EntryDate, EntryFields, EntryId, FinanceEntry};
pub use edit::update_entry_endpoint;
pub use list::get_entries_endpoint;
pub use service::{EntryService, running_total};
pub use view::get_entry_endpoint;
