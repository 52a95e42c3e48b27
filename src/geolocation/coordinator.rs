use log::{debug, info, warn};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::GeolocationError;
use crate::geolocation::{FailureReason, GeolocationProvider};
use crate::models::{Coordinates, UserPosition};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoState {
    Idle,
    Locating,
    Resolved(UserPosition),
    /// A lookup failed; the user may now accept the default location.
    ManualFallbackOffered(FailureReason),
    DefaultLocationAccepted(UserPosition),
}

/// What a finished lookup changed, for the view to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoOutcome {
    Located(UserPosition),
    Failed(FailureReason),
}

struct Completion {
    generation: u64,
    result: Result<Coordinates, GeolocationError>,
}

/// Runs position lookups on worker threads and applies only the newest one.
///
/// Each request bumps a generation counter; completions tagged with an older
/// generation are dropped when they arrive.
pub struct GeolocationCoordinator {
    provider: Arc<dyn GeolocationProvider>,
    default_center: Coordinates,
    state: GeoState,
    position: Option<UserPosition>,
    generation: u64,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl GeolocationCoordinator {
    pub fn new(provider: Arc<dyn GeolocationProvider>, default_center: Coordinates) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            provider,
            default_center,
            state: GeoState::Idle,
            position: None,
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> GeoState {
        self.state
    }

    /// Last known position, real or default.
    pub fn position(&self) -> Option<UserPosition> {
        self.position
    }

    pub fn is_locating(&self) -> bool {
        self.state == GeoState::Locating
    }

    pub fn fallback_offered(&self) -> bool {
        matches!(self.state, GeoState::ManualFallbackOffered(_))
    }

    /// Starts a lookup, superseding any still in flight.
    pub fn request(&mut self) {
        self.generation += 1;
        self.state = GeoState::Locating;

        let generation = self.generation;
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        debug!("geolocation request #{} started", generation);
        thread::spawn(move || {
            let result = provider.current_position();
            // Receiver gone means the view shut down; nothing to report to
            let _ = tx.send(Completion { generation, result });
        });
    }

    /// Uses the fixed reference point as the user's position. Any lookup still
    /// in flight is superseded.
    pub fn accept_default_location(&mut self) -> UserPosition {
        self.generation += 1;
        let position = UserPosition::default_at(self.default_center);
        self.position = Some(position);
        self.state = GeoState::DefaultLocationAccepted(position);
        info!(
            "using default location {:.4}, {:.4}",
            position.lat, position.lng
        );
        position
    }

    /// Applies completions that arrived since the last call without blocking.
    /// Returns the outcome of the current request if it finished.
    pub fn poll(&mut self) -> Option<GeoOutcome> {
        let mut outcome = None;
        while let Ok(completion) = self.rx.try_recv() {
            if let Some(applied) = self.accept(completion) {
                outcome = Some(applied);
            }
        }
        outcome
    }

    /// Blocks until the current request finishes or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> Option<GeoOutcome> {
        let deadline = Instant::now() + timeout;
        while self.is_locating() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    if let Some(applied) = self.accept(completion) {
                        return Some(applied);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None;
                }
            }
        }
        None
    }

    fn accept(&mut self, completion: Completion) -> Option<GeoOutcome> {
        if completion.generation != self.generation {
            debug!(
                "dropping stale geolocation result #{} (current #{})",
                completion.generation, self.generation
            );
            return None;
        }

        match completion.result {
            Ok(coords) => {
                let position = UserPosition::from_device(coords);
                self.position = Some(position);
                self.state = GeoState::Resolved(position);
                info!("located at {:.4}, {:.4}", coords.lat, coords.lng);
                Some(GeoOutcome::Located(position))
            }
            Err(err) => {
                // Previous position, if any, stays as it was
                warn!("geolocation failed: {}", err);
                self.state = GeoState::ManualFallbackOffered(err.reason);
                Some(GeoOutcome::Failed(err.reason))
            }
        }
    }
}
