/// Intelligence module
///
/// The pure core: understanding commands, categorizing items, ranking the
/// catalog and building suggestions. Nothing in here owns state.

pub mod categorizer;
pub mod interpreter;
pub mod price_filter;
pub mod ranker;
pub mod suggestion_engine;

pub use categorizer::categorize;
pub use interpreter::{parse, Intent, IntentKind};
pub use price_filter::{detect_price_filter, PriceQuery};
pub use ranker::{parse_price_filter, Ranker, SearchFilters};
pub use suggestion_engine::{substitutes_for, suggest, SuggestionEngine, STAPLES, SUBSTITUTES};
