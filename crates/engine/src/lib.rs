//! Core of Pocketbook: transaction rules, totals and currency conversion.
//!
//! The pure parts ([`validate_new`], [`validate_patch`], [`summarize`],
//! [`convert_record`]) never touch storage. Stateful operations go through
//! [`Engine`], which validates before delegating to a [`TransactionStore`].

pub use auth::Credentials;
pub use currency::{Conversion, Currency, convert_amount, convert_record};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use store::{MemoryStore, PatchCheck, SqlStore, TransactionStore};
pub use summary::{Summary, summarize};
pub use transactions::{NewTransaction, Transaction, TransactionKind, TransactionPatch};
pub use validation::{TransactionDraft, ValidationError, validate_new, validate_patch};

mod auth;
mod currency;
mod error;
mod ops;
mod store;
mod summary;
mod transactions;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;
