//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and the receiver it talks to.
//! Then pull requests off the receiver with [`expect_create`], [`expect_get`],
//! [`expect_list`], [`expect_delete`] or [`expect_action`], assert on them,
//! and answer through the returned responder.
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_client::<Order>(10);
//! let tables = TableClient::new(client, 6);
//!
//! let task = tokio::spawn(async move { tables.add_line(table, FoodKind::Tea, 2).await });
//! let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
//! responder.send(Ok(OrderActionResult::AddLine(1))).unwrap();
//! ```

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest, Response};
use tokio::sync::mpsc;

/// Creates a client whose requests land on the returned receiver instead of an actor.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a `Create`.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Create, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create {
            id,
            params,
            respond_to,
        }) => Some((id, params, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns its responder if it is a `List`.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a `Delete`.
pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Answers a request with an entity-level failure, as the real actor would.
pub fn reply_entity_error<R, E>(respond_to: Response<R>, error: E)
where
    E: std::error::Error + Send + Sync + 'static,
{
    let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(error))));
}
