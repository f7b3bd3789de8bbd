//! Mock sign-in session.
//!
//! There is no credential validation anywhere: a session is fabricated
//! from whatever display name the user typed, lives in memory, and is
//! dropped on sign-out. Real authentication is explicitly out of scope.

use ulid::Ulid;

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: String,
}

impl Session {
    /// Fabricates a session for the given display name. The email and
    /// avatar are derived from the name so repeated sign-ins look the
    /// same to the user.
    pub fn sign_in(name: &str) -> Self {
        let handle = name.trim().to_lowercase().replace(' ', ".");
        Self {
            id: Ulid::new().to_string(),
            name: name.trim().to_string(),
            email: format!("{handle}@example.com"),
            picture: format!("https://i.pravatar.cc/150?u={}", name.trim()),
        }
    }
}

/// Holder for the at-most-one active session of a client instance.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: Option<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, name: &str) -> &Session {
        self.current = Some(Session::sign_in(name));
        self.current.as_ref().expect("session just created")
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_derives_email_and_avatar() {
        let session = Session::sign_in("Abhishek Kumar");
        assert_eq!(session.email, "abhishek.kumar@example.com");
        assert_eq!(session.picture, "https://i.pravatar.cc/150?u=Abhishek Kumar");
        assert!(!session.id.is_empty());
    }

    #[test]
    fn store_lifecycle_is_create_then_clear() {
        let mut store = SessionStore::new();
        assert!(!store.is_signed_in());

        store.sign_in("Chef");
        assert!(store.is_signed_in());
        assert_eq!(store.current().unwrap().name, "Chef");

        store.clear();
        assert!(store.current().is_none());
    }

    #[test]
    fn repeat_sign_in_replaces_the_session() {
        let mut store = SessionStore::new();
        store.sign_in("First");
        store.sign_in("Second");
        assert_eq!(store.current().unwrap().name, "Second");
    }
}
