//! User directory port - resolves subscribers to mail addresses.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Mail address of a user, `None` if unknown or without address.
    async fn email_of(&self, user: &str) -> Result<Option<String>, DomainError>;

    /// Users belonging to a group. Unknown groups have no members.
    async fn members_of(&self, group: &str) -> Result<Vec<String>, DomainError>;
}
