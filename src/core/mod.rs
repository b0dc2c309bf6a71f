/// Core functionality modules
///
/// Contains the list operations, catalog search and the command
/// dispatcher that ties them to the interpreter.

pub mod assistant;
pub mod list_manager;
pub mod searcher;

pub use assistant::{Assistant, Outcome, DEFAULT_SEARCH_LIMIT};
pub use list_manager::{AddedItem, ListManager, RemoveOutcome};
pub use searcher::Searcher;
