//! In-memory roster of simulated users.
//!
//! The roster exists purely so the developer can choose "who sent this
//! message" while testing. It is never persisted.

use dashmap::DashMap;

use crate::message::User;

/// Id of the user seeded into every fresh roster.
pub const DEFAULT_USER_ID: &str = "user-1";

/// Mutable roster of simulated users.
#[derive(Debug, Default)]
pub struct UserRoster {
    /// User id → user.
    users: DashMap<String, User>,
}

impl UserRoster {
    /// Creates a roster seeded with a default developer user, so a fresh
    /// checkout can post messages immediately.
    pub fn new() -> Self {
        let roster = Self::default();
        roster.upsert(User {
            id: DEFAULT_USER_ID.to_string(),
            name: "Developer".to_string(),
            avatar_url: None,
        });
        roster
    }

    /// Looks up a user by id.
    pub fn get(&self, id: &str) -> Option<User> {
        self.users.get(id).map(|u| u.clone())
    }

    /// Inserts or replaces a user.
    pub fn upsert(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Removes a user. Returns whether one was present.
    pub fn remove(&self, id: &str) -> bool {
        self.users.remove(id).is_some()
    }

    /// All users, sorted by id for stable listings.
    pub fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.clone()).collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }
}
