//! Admin authentication: ordered-fallback credential resolution and the
//! account management the dashboard's admin-users pages sit on.

pub mod accounts;
pub mod domain;
pub mod resolver;
pub mod router;
pub mod store;

#[cfg(test)]
mod tests;

pub use accounts::{
    AccountError, AdminAccountService, AdminAccountUpdate, AdminDirectoryPage, NewAdminAccount,
};
pub use domain::{AdminId, AdminUser, CredentialRecord, Principal};
pub use resolver::{CredentialResolver, Rejected};
pub use router::{auth_router, AuthState};
pub use store::{AdminPage, AdminStore, StoreError};
