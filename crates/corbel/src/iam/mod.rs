//! IAM service operations.
//!
//! Token lifecycle (acquire, upgrade, refresh) plus user and group CRUD
//! and search. All operations are methods on [`crate::Client`].

mod authorization;
mod groups;
mod search;
mod users;

pub use groups::IamGroup;
pub use search::{Search, SortOrder};
pub use users::IamUser;
