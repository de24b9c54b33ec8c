//! Session context
//!
//! The bearer token and the signed-in profile live in durable browser
//! storage so the session survives reloads. Access goes through an
//! explicit context object handed to the API client and the route guard
//! at construction time - no ambient lookups.
//!
//! The storage itself sits behind [`SessionStore`] so session logic runs
//! under plain `cargo test` with the in-memory backend.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_storage::{LocalStorage, Storage};
use pop_core::model::PerfilUsuario;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// Durable key/value storage for the session credential.
pub trait SessionStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `localStorage`-backed store used in the browser.
#[derive(Debug, Default)]
pub struct BrowserStore;

impl SessionStore for BrowserStore {
    fn read(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn write(&self, key: &str, value: &str) {
        let _ = LocalStorage::set(key, value.to_string());
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore(RefCell<HashMap<String, String>>);

impl SessionStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

/// Global logout signal: raised by [`SessionContext::expire`] through the
/// hook the router shell installs, observed by the protected shell.
#[derive(Clone, Copy)]
pub struct LogoutSignal(pub leptos::RwSignal<bool>);

type ExpireHook = Box<dyn Fn()>;

/// Explicit session handle: token + profile storage, plus the expiry hook
/// the router shell installs so a 401 anywhere funnels into one redirect.
#[derive(Clone)]
pub struct SessionContext {
    store: Rc<dyn SessionStore>,
    on_expire: Rc<RefCell<Option<ExpireHook>>>,
}

impl SessionContext {
    pub fn new(store: Rc<dyn SessionStore>) -> Self {
        Self {
            store,
            on_expire: Rc::new(RefCell::new(None)),
        }
    }

    pub fn browser() -> Self {
        Self::new(Rc::new(BrowserStore))
    }

    pub fn token(&self) -> Option<String> {
        self.store.read(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn user(&self) -> Option<PerfilUsuario> {
        self.store
            .read(USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    /// Begins a session after a successful login.
    pub fn start(&self, token: &str, user: &PerfilUsuario) {
        self.store.write(TOKEN_KEY, token);
        if let Ok(raw) = serde_json::to_string(user) {
            self.store.write(USER_KEY, &raw);
        }
    }

    /// Explicit logout.
    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }

    /// Installs the observer the router shell uses to redirect on expiry.
    pub fn set_expire_hook(&self, hook: impl Fn() + 'static) {
        *self.on_expire.borrow_mut() = Some(Box::new(hook));
    }

    /// Session expiry (401 anywhere): clear the credential and notify the
    /// router shell.
    pub fn expire(&self) {
        self.clear();
        if let Some(hook) = self.on_expire.borrow().as_ref() {
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn memory_session() -> SessionContext {
        SessionContext::new(Rc::new(MemoryStore::default()))
    }

    #[test]
    fn test_start_persists_token_and_profile() {
        let session = memory_session();
        assert!(!session.is_authenticated());

        let perfil = PerfilUsuario {
            nome: "Maria".into(),
            email: "maria@pop.com".into(),
            cargo: "ADMIN".into(),
        };
        session.start("T", &perfil);

        assert_eq!(session.token().as_deref(), Some("T"));
        assert_eq!(session.user(), Some(perfil));
    }

    #[test]
    fn test_clear_removes_everything() {
        let session = memory_session();
        session.start("T", &PerfilUsuario::default());
        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_expire_clears_and_notifies() {
        let session = memory_session();
        session.start("T", &PerfilUsuario::default());

        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        session.set_expire_hook(move || flag.set(true));

        session.expire();
        assert!(fired.get());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_blank_token_is_not_a_session() {
        let session = memory_session();
        session.start("", &PerfilUsuario::default());
        assert!(!session.is_authenticated());
    }
}
