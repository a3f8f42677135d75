use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any domain entity must implement to be served by a [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Apply a patch in place. An `Err` leaves the stored entity untouched.
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
}

/// Errors raised by the actor plumbing itself, independent of any domain.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Simulated round-trip delay per request kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Latency {
    pub list: Duration,
    pub get: Duration,
    pub update: Duration,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// Responds with `None` when no entity has the given id.
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<Option<T>>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// In-memory store actor. Entities keep the order they were seeded in.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    ordering: Vec<T::Id>,
    latency: Latency,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        latency: Latency,
        seed: impl IntoIterator<Item = T>,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let mut store = HashMap::new();
        let mut ordering = Vec::new();
        for item in seed {
            let id = item.id().clone();
            if store.insert(id.clone(), item).is_none() {
                ordering.push(id);
            } else {
                warn!(id = %id, "Duplicate seed id, keeping the last one");
            }
        }
        let actor = Self {
            receiver,
            store,
            ordering,
            latency,
        };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!(items = self.ordering.len(), "ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    self.handle_list(respond_to).await;
                }
                ResourceRequest::Get { id, respond_to } => {
                    self.handle_get(id, respond_to).await;
                }
                ResourceRequest::Update {
                    id,
                    patch,
                    respond_to,
                } => {
                    self.handle_update(id, patch, respond_to).await;
                }
                ResourceRequest::Shutdown => {
                    info!("ResourceActor shutting down");
                    break;
                }
            }
        }

        info!("ResourceActor stopped");
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_list(&self, respond_to: Response<Vec<T>>) {
        debug!("Processing list request");
        tokio::time::sleep(self.latency.list).await;

        let items: Vec<T> = self
            .ordering
            .iter()
            .filter_map(|id| self.store.get(id).cloned())
            .collect();
        info!(count = items.len(), "Listed items");

        let _ = respond_to.send(Ok(items));
    }

    #[instrument(fields(id = %id), skip(self, id, respond_to))]
    async fn handle_get(&self, id: T::Id, respond_to: Response<Option<T>>) {
        debug!("Processing get request");
        tokio::time::sleep(self.latency.get).await;

        let item = self.store.get(&id).cloned();
        if item.is_none() {
            debug!("Item not found");
        }

        let _ = respond_to.send(Ok(item));
    }

    #[instrument(fields(id = %id), skip(self, id, respond_to))]
    async fn handle_update(&mut self, id: T::Id, patch: T::Patch, respond_to: Response<Option<T>>) {
        debug!("Processing update request");
        tokio::time::sleep(self.latency.update).await;

        let result = match self.store.get_mut(&id) {
            Some(item) => {
                // Patch a copy so a rejected patch never leaves a half-applied entity.
                let mut updated = item.clone();
                match updated.on_update(patch) {
                    Ok(()) => {
                        *item = updated.clone();
                        info!("Item updated");
                        Ok(Some(updated))
                    }
                    Err(e) => {
                        warn!(error = %e, "Patch rejected");
                        Err(FrameworkError::Rejected(e))
                    }
                }
            }
            None => {
                debug!("Item not found for update");
                Ok(None)
            }
        };

        let _ = respond_to.send(result);
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Debug)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: a derive would demand `T: Clone` on the client as well.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update {
                id,
                patch,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: String,
        value: i64,
    }

    #[derive(Debug)]
    enum CounterPatch {
        Add(i64),
        Fail,
    }

    impl Entity for Counter {
        type Id = String;
        type Patch = CounterPatch;

        fn id(&self) -> &String {
            &self.id
        }

        fn on_update(&mut self, patch: CounterPatch) -> Result<(), String> {
            match patch {
                CounterPatch::Add(n) => {
                    self.value += n;
                    Ok(())
                }
                CounterPatch::Fail => {
                    self.value = -1;
                    Err("refused".to_string())
                }
            }
        }
    }

    fn counter(id: &str, value: i64) -> Counter {
        Counter {
            id: id.to_string(),
            value,
        }
    }

    fn start(seed: Vec<Counter>, latency: Latency) -> ResourceClient<Counter> {
        let (actor, client) = ResourceActor::new(10, latency, seed);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_list_keeps_seed_order() {
        let client = start(vec![counter("b", 1), counter("a", 2), counter("c", 3)], Latency::default());

        let ids: Vec<String> = client.list().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_get_missing_is_none_not_error() {
        let client = start(vec![counter("a", 1)], Latency::default());

        assert_eq!(client.get("zzz".to_string()).await, Ok(None));
        assert_eq!(client.get("a".to_string()).await, Ok(Some(counter("a", 1))));
    }

    #[tokio::test]
    async fn test_update_applies_and_persists() {
        let client = start(vec![counter("a", 1)], Latency::default());

        let updated = client.update("a".to_string(), CounterPatch::Add(4)).await.unwrap();
        assert_eq!(updated, Some(counter("a", 5)));
        assert_eq!(client.get("a".to_string()).await.unwrap(), Some(counter("a", 5)));

        let missing = client.update("b".to_string(), CounterPatch::Add(1)).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_rejected_patch_leaves_entity_untouched() {
        let client = start(vec![counter("a", 1)], Latency::default());

        let result = client.update("a".to_string(), CounterPatch::Fail).await;
        assert_eq!(result, Err(FrameworkError::Rejected("refused".to_string())));
        assert_eq!(client.get("a".to_string()).await.unwrap(), Some(counter("a", 1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied_per_request_kind() {
        let latency = Latency {
            list: Duration::from_millis(800),
            get: Duration::from_millis(500),
            update: Duration::from_millis(600),
        };
        let client = start(vec![counter("a", 1)], latency);

        let started = tokio::time::Instant::now();
        client.list().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(800));

        let started = tokio::time::Instant::now();
        client.get("a".to_string()).await.unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(500) && elapsed < Duration::from_millis(600));
    }

    #[tokio::test]
    async fn test_shutdown_closes_actor() {
        let (actor, client) = ResourceActor::new(10, Latency::default(), vec![counter("a", 1)]);
        let handle = tokio::spawn(actor.run());

        client.shutdown().await.unwrap();
        handle.await.unwrap();

        assert_eq!(client.list().await, Err(FrameworkError::ActorClosed));
    }
}
