use std::collections::HashMap;

use brisport_shared::User;

use crate::StoreError;

/// Users keyed by lowercased email; lookups are case-insensitive.
#[derive(Debug, Default)]
pub struct UserRepo {
    users: HashMap<String, User>,
}

impl UserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, user: User) -> Result<(), StoreError> {
        let key = user.email.to_lowercase();
        if self.users.contains_key(&key) {
            return Err(StoreError::DuplicateEmail(user.email.clone()));
        }
        tracing::debug!(email = %user.email, "user registered");
        self.users.insert(key, user);
        Ok(())
    }

    pub fn get(&self, email: &str) -> Option<&User> {
        self.users.get(&email.to_lowercase())
    }

    pub fn get_mut(&mut self, email: &str) -> Option<&mut User> {
        self.users.get_mut(&email.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brisport_shared::Role;

    fn user(email: &str) -> User {
        User::new("Ada", 35, email, "0400000001", String::new(), Role::Traveller)
    }

    #[test]
    fn test_duplicate_email_is_case_insensitive() {
        let mut repo = UserRepo::new();
        repo.add(user("ada@example.com")).unwrap();

        let err = repo.add(user("ADA@example.com")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut repo = UserRepo::new();
        repo.add(user("Ada@Example.com")).unwrap();

        assert!(repo.get("ada@example.com").is_some());
        assert!(repo.get_mut("ADA@EXAMPLE.COM").is_some());
        assert!(repo.get("missing@example.com").is_none());
    }
}
