//! # Mock Framework
//!
//! Utilities for testing repository consumers in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_list`] or [`expect_update`] to assert behavior
//! and answer each request with whatever outcome the test needs.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

pub type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// Nothing serves the receiver until the test reads from it, so the test
/// decides when a request resolves and what it resolves to.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Responder<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Patch, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::OrderClient;
    use crate::domain::{Order, OrderStatus};
    use crate::order_actor::{mock_orders, OrderError, OrderPatch};
    use chrono::Utc;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);

        let update_task = tokio::spawn(async move {
            orders.set_order_status("1001".to_string(), OrderStatus::Completed).await
        });

        let (id, patch, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, "1001");
        assert!(matches!(patch, OrderPatch::Status(OrderStatus::Completed)));
        responder.send(Err(FrameworkError::Rejected("disk full".to_string()))).unwrap();

        let result = update_task.await.unwrap();
        assert_eq!(result, Err(OrderError::Repository("disk full".to_string())));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);

        let get_task = tokio::spawn(async move { orders.get_order("1002".to_string()).await });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, "1002");
        drop(responder);

        let result = get_task.await.unwrap();
        assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
    }

    #[tokio::test]
    async fn test_list_passes_orders_through() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);

        let list_task = tokio::spawn(async move { orders.list_orders().await });

        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        responder.send(Ok(mock_orders(Utc::now()))).unwrap();

        let listed = list_task.await.unwrap().unwrap();
        assert_eq!(listed.len(), 5);
        assert_eq!(listed[0].id, "1001");
    }
}
