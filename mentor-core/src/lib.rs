//! mentor-core: message understanding and aggregation for the finance
//! mentor bot.
//!
//! Everything here is a synchronous, pure transform over in-memory data.
//! Persistence is reached only through the [`Store`] port, and the
//! transport layer drives the whole crate through the [`Engine`] facade.

pub mod amount;
pub mod category;
pub mod engine;
pub mod evaluate;
pub mod intent;
pub mod ledger;
pub mod model;
pub mod parser;
pub mod reply;
pub mod store;
pub mod vocab;

pub use amount::{AmountExtractor, AmountMatch};
pub use engine::Engine;
pub use evaluate::EvaluationResult;
pub use intent::IntentClassifier;
pub use ledger::{
    BUDGET_WINDOW_DAYS, SUMMARY_WINDOW_DAYS, WindowTotals, balance, breakdown_by_category,
    totals_by_type,
};
pub use model::{
    Budget, Goal, Intent, ParsedTransaction, Transaction, TxnType, UserId, UserProfile,
    normalize_key,
};
pub use parser::TransactionParser;
pub use reply::Replies;
pub use store::Store;
pub use vocab::Vocabulary;
