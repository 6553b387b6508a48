//! In-Memory User Directory

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::UserDirectory;

/// Users and groups registered in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    emails: Arc<RwLock<HashMap<String, String>>>,
    groups: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a user's mail address
    pub async fn add_user(&self, user: impl Into<String>, email: impl Into<String>) {
        self.emails.write().await.insert(user.into(), email.into());
    }

    /// Adds a user to a group, creating the group if needed
    pub async fn add_to_group(&self, group: impl Into<String>, user: impl Into<String>) {
        let user = user.into();
        let mut groups = self.groups.write().await;
        let members = groups.entry(group.into()).or_default();
        if !members.contains(&user) {
            members.push(user);
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn email_of(&self, user: &str) -> Result<Option<String>, DomainError> {
        Ok(self.emails.read().await.get(user).cloned())
    }

    async fn members_of(&self, group: &str) -> Result<Vec<String>, DomainError> {
        Ok(self
            .groups
            .read()
            .await
            .get(group)
            .cloned()
            .unwrap_or_default())
    }
}
