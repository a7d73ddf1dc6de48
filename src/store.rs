use std::sync::Arc;

use dashmap::{DashMap, Entry};
use nanoid::nanoid;
use tokio::sync::Mutex;
use tracing::debug;

use crate::logic::GameSession;

pub type SessionId = String;

/// Shared handle to a session. Every move on a session goes through its lock.
pub type SessionHandle = Arc<Mutex<GameSession>>;

/// Where sessions live between moves.
pub trait SessionStore: Send + Sync {
    /// Stores a new session under a fresh id.
    fn create(&self, session: GameSession) -> SessionId;

    fn find(&self, id: &str) -> Option<SessionHandle>;

    /// Removes the session, returning it if it existed.
    fn end(&self, id: &str) -> Option<SessionHandle>;
}

const INITIAL_ID_LENGTH: usize = 5;
const MAX_ATTEMPTS_PER_LENGTH: usize = 10;

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, SessionHandle>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Removes every session `evict` returns `true` for and returns their ids.
    /// Sessions that are locked right now are left for the next sweep.
    pub fn sweep<F>(&self, mut evict: F) -> Vec<SessionId>
    where
        F: FnMut(&GameSession) -> bool,
    {
        let mut to_remove = Vec::new();

        for entry in self.sessions.iter() {
            if let Ok(session) = entry.value().try_lock()
                && evict(&*session)
            {
                to_remove.push(entry.key().clone());
            }
        }

        for id in &to_remove {
            self.sessions.remove(id);
            debug!("Evicted session {}", id);
        }

        to_remove
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, session: GameSession) -> SessionId {
        let handle = Arc::new(Mutex::new(session));
        let mut id_length = INITIAL_ID_LENGTH;

        loop {
            for _ in 0..MAX_ATTEMPTS_PER_LENGTH {
                let id = nanoid!(id_length);
                match self.sessions.entry(id.clone()) {
                    Entry::Occupied(_) => continue,
                    Entry::Vacant(entry) => {
                        entry.insert(handle);
                        return id;
                    }
                }
            }

            id_length += 1;
        }
    }

    fn find(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    fn end(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.remove(id).map(|(_, handle)| handle)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn create(&self, session: GameSession) -> SessionId {
        (**self).create(session)
    }

    fn find(&self, id: &str) -> Option<SessionHandle> {
        (**self).find(id)
    }

    fn end(&self, id: &str) -> Option<SessionHandle> {
        (**self).end(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{Board, Coordinate},
        model::{GameStatus, Outcome},
    };

    fn session() -> GameSession {
        let board = Board::from_mine_coordinates(2, 2, &[Coordinate::new(1, 1)]).unwrap();
        GameSession::from_board(board, Coordinate::new(0, 0)).unwrap().0
    }

    #[test]
    fn create_then_find_returns_same_session() {
        let store = InMemorySessionStore::new();

        let id = store.create(session());
        let handle = store.find(&id).unwrap();

        assert_eq!(id.len(), INITIAL_ID_LENGTH);
        assert_eq!(handle.try_lock().unwrap().uncovered(), 1);
        assert!(Arc::ptr_eq(&handle, &store.find(&id).unwrap()));
    }

    #[test]
    fn ids_are_unique() {
        let store = InMemorySessionStore::new();

        for _ in 0..200 {
            store.create(session());
        }

        assert_eq!(store.len(), 200);
    }

    #[test]
    fn end_removes_session() {
        let store = InMemorySessionStore::new();
        let id = store.create(session());

        assert!(store.end(&id).is_some());
        assert!(store.find(&id).is_none());
        assert!(store.end(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn sweep_skips_locked_sessions() {
        let store = InMemorySessionStore::new();
        let finished = store.create(session());
        let busy = store.create(session());
        store
            .find(&finished)
            .unwrap()
            .try_lock()
            .unwrap()
            .record_result(Outcome::Victory)
            .unwrap();

        let busy_handle = store.find(&busy).unwrap();
        let _guard = busy_handle.try_lock().unwrap();
        let evicted = store.sweep(|_| true);

        assert_eq!(evicted, vec![finished]);
        assert!(store.find(&busy).is_some());
    }

    #[test]
    fn sweep_applies_predicate() {
        let store = InMemorySessionStore::new();
        let active = store.create(session());
        let lost = store.create(session());
        store
            .find(&lost)
            .unwrap()
            .try_lock()
            .unwrap()
            .record_result(Outcome::Defeat)
            .unwrap();

        let evicted = store.sweep(|session| session.status() == GameStatus::Defeat);

        assert_eq!(evicted, vec![lost]);
        assert!(store.find(&active).is_some());
    }
}
