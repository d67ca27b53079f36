/*!
 * Translation memory persistence.
 *
 * SQLite-backed store of validated (source, translation) pairs with exact
 * hash lookup and bounded fuzzy search.
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;
pub mod similarity;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::{MatchType, TmEntry, TmMatch, TmStats};
pub use repository::{FUZZY_CANDIDATE_LIMIT, PendingEntry, TranslationMemory};
