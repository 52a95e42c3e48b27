use log::{debug, info, warn};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::RoutingError;
use crate::models::{Coordinates, Location, RouteInfo, RouteSummary, UserPosition};
use crate::routing::RoutingEngine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteState {
    NoRoute,
    Requesting,
    Displayed(RouteInfo),
}

/// Inputs a route was requested for. Any difference means the old route no
/// longer applies.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RouteKey {
    origin: UserPosition,
    destination_id: i64,
    destination: Coordinates,
}

struct Completion {
    generation: u64,
    result: Result<RouteSummary, RoutingError>,
}

/// Keeps at most one route alive between the user and the selected location.
///
/// Requests run on worker threads. Every input change bumps the generation,
/// which detaches the previous route and makes its late result unusable.
pub struct RouteCoordinator {
    engine: Option<Arc<dyn RoutingEngine>>,
    state: RouteState,
    key: Option<RouteKey>,
    generation: u64,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl RouteCoordinator {
    /// `engine` is `None` when the configured engine could not be built; the
    /// coordinator then stays in `NoRoute`.
    pub fn new(engine: Option<Arc<dyn RoutingEngine>>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            engine,
            state: RouteState::NoRoute,
            key: None,
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    pub fn info(&self) -> Option<RouteInfo> {
        match self.state {
            RouteState::Displayed(info) => Some(info),
            _ => None,
        }
    }

    pub fn is_requesting(&self) -> bool {
        self.state == RouteState::Requesting
    }

    /// Reconciles with the current user position and destination.
    ///
    /// Unchanged inputs are a no-op unless the last request for them failed.
    /// Otherwise the old route is detached and cleared, and a new request
    /// starts if both inputs are present.
    pub fn update(&mut self, user: Option<UserPosition>, destination: Option<&Location>) {
        let key = match (user, destination) {
            (Some(origin), Some(dest)) => Some(RouteKey {
                origin,
                destination_id: dest.id,
                destination: dest.coordinates(),
            }),
            _ => None,
        };
        if key == self.key {
            return;
        }

        self.detach();
        self.key = key;
        if let Some(key) = key {
            self.start(key);
        }
    }

    fn detach(&mut self) {
        if self.state != RouteState::NoRoute {
            debug!("detaching route #{}", self.generation);
        }
        self.generation += 1;
        self.state = RouteState::NoRoute;
    }

    fn start(&mut self, key: RouteKey) {
        let Some(engine) = self.engine.as_ref().map(Arc::clone) else {
            debug!("no routing engine; route to #{} skipped", key.destination_id);
            return;
        };

        self.state = RouteState::Requesting;
        let generation = self.generation;
        let tx = self.tx.clone();
        debug!(
            "route #{} requested to location {}",
            generation, key.destination_id
        );
        thread::spawn(move || {
            let result = engine.compute_route(key.origin.coordinates(), key.destination);
            let _ = tx.send(Completion { generation, result });
        });
    }

    /// Applies finished requests without blocking. Returns true if the
    /// published state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.accept(completion);
        }
        changed
    }

    /// Blocks until the current request settles or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> Option<RouteInfo> {
        let deadline = Instant::now() + timeout;
        while self.is_requesting() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    self.accept(completion);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.info()
    }

    fn accept(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation || !self.is_requesting() {
            debug!(
                "dropping stale route result #{} (current #{})",
                completion.generation, self.generation
            );
            return false;
        }

        match completion.result {
            Ok(summary) => {
                let info = RouteInfo::from(summary);
                info!(
                    "route #{}: {} km, {} min",
                    completion.generation,
                    info.distance_label(),
                    info.minutes
                );
                self.state = RouteState::Displayed(info);
            }
            Err(err) => {
                warn!("route #{} failed: {}", completion.generation, err);
                self.state = RouteState::NoRoute;
                // Same inputs must be able to ask again
                self.key = None;
            }
        }
        true
    }
}
