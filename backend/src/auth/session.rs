use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use chrono::Utc;
use common::model::user::User;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "entradas_session";

#[derive(Debug, Clone)]
pub struct SessionData {
    pub user: User,
    pub created_at: i64,
}

/// In-memory sessions keyed by a random id carried in an HttpOnly cookie.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
    max_age_secs: i64,
}

impl SessionStore {
    pub fn new(max_age_secs: i64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_age_secs,
        }
    }

    pub fn max_age_secs(&self) -> i64 {
        self.max_age_secs
    }

    pub fn create(&self, user: User) -> String {
        let session_id = Uuid::new_v4().to_string();
        let data = SessionData {
            user,
            created_at: Utc::now().timestamp(),
        };
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(session_id.clone(), data);
        }
        session_id
    }

    /// Looks a session up; expired sessions are treated as absent.
    pub fn get(&self, session_id: &str) -> Option<SessionData> {
        let cutoff = Utc::now().timestamp() - self.max_age_secs;
        let sessions = self.sessions.read().ok()?;
        sessions
            .get(session_id)
            .filter(|s| s.created_at > cutoff)
            .cloned()
    }

    pub fn remove(&self, session_id: &str) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(session_id);
        }
    }

    /// Drops every session of a user, e.g. after the account was deleted.
    pub fn remove_user(&self, user_id: i64) -> usize {
        match self.sessions.write() {
            Ok(mut sessions) => {
                let before = sessions.len();
                sessions.retain(|_, s| s.user.id != user_id);
                before - sessions.len()
            }
            Err(_) => 0,
        }
    }

    pub fn cleanup_expired(&self) -> usize {
        let cutoff = Utc::now().timestamp() - self.max_age_secs;
        match self.sessions.write() {
            Ok(mut sessions) => {
                let before = sessions.len();
                sessions.retain(|_, s| s.created_at > cutoff);
                before - sessions.len()
            }
            Err(_) => 0,
        }
    }
}

pub fn session_cookie(session_id: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE_NAME, session_id)
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(max_age_secs))
        .path("/")
        .finish()
}

pub fn logout_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE_NAME, "")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(0))
        .path("/")
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> User {
        User {
            id,
            username: format!("user{}", id),
            is_admin: false,
        }
    }

    #[test]
    fn sessions_resolve_until_removed() {
        let store = SessionStore::new(60);
        let id = store.create(user(1));
        assert_eq!(store.get(&id).unwrap().user.id, 1);
        store.remove(&id);
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn expired_sessions_are_invisible_and_purged() {
        let store = SessionStore::new(-1);
        let id = store.create(user(1));
        assert!(store.get(&id).is_none());
        assert_eq!(store.cleanup_expired(), 1);
    }

    #[test]
    fn removing_a_user_revokes_all_of_their_sessions() {
        let store = SessionStore::new(60);
        let a = store.create(user(1));
        let b = store.create(user(1));
        let other = store.create(user(2));
        assert_eq!(store.remove_user(1), 2);
        assert!(store.get(&a).is_none());
        assert!(store.get(&b).is_none());
        assert!(store.get(&other).is_some());
    }

    #[test]
    fn cookie_is_http_only() {
        let cookie = session_cookie("abc".to_string(), 30);
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(30)));
    }
}
