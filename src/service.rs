use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::{
    data::Coordinate,
    error::{GameError, Result},
    logic::GameSession,
    model::{GameParams, Outcome, Started, Uncovered},
    store::{InMemorySessionStore, SessionHandle, SessionStore},
};

/// Id-based entry points for the layer that serves games to players.
///
/// Sessions are looked up in the store and mutated under their own lock, so
/// moves on different games never wait on each other.
pub struct GameService<S = InMemorySessionStore> {
    store: S,
    rng: Mutex<StdRng>,
}

impl<S: SessionStore> GameService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Service whose boards are reproducible from `seed`.
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn start_game(&self, params: GameParams, first: Coordinate) -> Result<Started> {
        let (session, cells) = {
            let mut rng = self.rng.lock().await;
            GameSession::start(params, first, &mut *rng)?
        };

        let status = session.status();
        let id = self.store.create(session);
        info!("Game {} started with {} cells uncovered", id, cells.len());

        Ok(Started { id, cells, status })
    }

    #[instrument(level = "trace", skip(self), fields(x = coordinate.x, y = coordinate.y))]
    pub async fn uncover(&self, id: &str, coordinate: Coordinate) -> Result<Uncovered> {
        let handle = self.session(id)?;
        let mut session = handle.lock().await;
        let uncovered = session.uncover(coordinate)?;

        if let Some(outcome) = uncovered.status.outcome() {
            info!("Game {} ended in {}", id, outcome);
        }
        Ok(uncovered)
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn pause(&self, id: &str, elapsed: Duration) -> Result<()> {
        let handle = self.session(id)?;
        let mut session = handle.lock().await;
        session.pause(elapsed)
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn resume(&self, id: &str) -> Result<()> {
        let handle = self.session(id)?;
        let mut session = handle.lock().await;
        session.resume()
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn record_result(&self, id: &str, outcome: Outcome) -> Result<()> {
        let handle = self.session(id)?;
        let mut session = handle.lock().await;
        session.record_result(outcome)
    }

    pub fn session(&self, id: &str) -> Result<SessionHandle> {
        self.store.find(id).ok_or_else(|| {
            warn!("Unknown game session {}", id);
            GameError::SessionNotFound(id.to_string())
        })
    }

    /// Drops the session from the store. Later calls with this id fail.
    pub fn end(&self, id: &str) -> Result<()> {
        match self.store.end(id) {
            Some(_) => {
                info!("Game {} removed", id);
                Ok(())
            }
            None => Err(GameError::SessionNotFound(id.to_string())),
        }
    }
}
