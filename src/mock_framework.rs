//! # Mock Framework
//!
//! A [`RemoteUserService`] whose calls land on a channel the test controls.
//!
//! Use [`create_mock_remote`] to get the service and a receiver, then helpers like
//! [`expect_list_users`] or [`expect_create_user`] to assert each call and answer
//! it. Answers can be delayed, reordered or dropped, so success, failure and
//! stale-response paths are all deterministic.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{CreatedUser, NewUser, UserRecord};
use crate::error::RemoteError;
use crate::remote::RemoteUserService;

pub type Reply<T> = oneshot::Sender<Result<T, RemoteError>>;

#[derive(Debug)]
pub enum RemoteCall {
    ListUsers {
        page: u32,
        respond_to: Reply<Vec<UserRecord>>,
    },
    CreateUser {
        user: NewUser,
        respond_to: Reply<CreatedUser>,
    },
}

pub struct MockRemote {
    sender: mpsc::Sender<RemoteCall>,
}

/// Creates a mock remote and the receiver its calls arrive on.
pub fn create_mock_remote(buffer_size: usize) -> (MockRemote, mpsc::Receiver<RemoteCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockRemote { sender }, receiver)
}

#[async_trait]
impl RemoteUserService for MockRemote {
    async fn list_users(&self, page: u32) -> Result<Vec<UserRecord>, RemoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RemoteCall::ListUsers { page, respond_to })
            .await
            .map_err(|_| RemoteError::Transport("mock closed".to_string()))?;
        response
            .await
            .map_err(|_| RemoteError::Transport("mock dropped".to_string()))?
    }

    async fn create_user(&self, user: NewUser) -> Result<CreatedUser, RemoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RemoteCall::CreateUser { user, respond_to })
            .await
            .map_err(|_| RemoteError::Transport("mock closed".to_string()))?;
        response
            .await
            .map_err(|_| RemoteError::Transport("mock dropped".to_string()))?
    }
}

/// Helper to verify that the next call is a list request
pub async fn expect_list_users(
    receiver: &mut mpsc::Receiver<RemoteCall>,
) -> Option<(u32, Reply<Vec<UserRecord>>)> {
    match receiver.recv().await {
        Some(RemoteCall::ListUsers { page, respond_to }) => Some((page, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is a create request
pub async fn expect_create_user(
    receiver: &mut mpsc::Receiver<RemoteCall>,
) -> Option<(NewUser, Reply<CreatedUser>)> {
    match receiver.recv().await {
        Some(RemoteCall::CreateUser { user, respond_to }) => Some((user, respond_to)),
        _ => None,
    }
}

/// reqres page 1, trimmed to three users.
pub fn page_one() -> Vec<UserRecord> {
    vec![
        UserRecord::listed(1, "George", "Bluth", "george.bluth@reqres.in", "https://reqres.in/img/faces/1-image.jpg"),
        UserRecord::listed(2, "Janet", "Weaver", "janet.weaver@reqres.in", "https://reqres.in/img/faces/2-image.jpg"),
        UserRecord::listed(3, "Emma", "Wong", "emma.wong@reqres.in", "https://reqres.in/img/faces/3-image.jpg"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_remote() {
        let (remote, mut receiver) = create_mock_remote(10);

        let create_task = tokio::spawn(async move {
            let user = NewUser {
                name: "Test".to_string(),
                job: "QA".to_string(),
            };
            remote.create_user(user).await
        });

        let (user, responder) = expect_create_user(&mut receiver)
            .await
            .expect("Expected CreateUser call");
        assert_eq!(user.name, "Test");
        responder
            .send(Ok(CreatedUser {
                id: "99".to_string(),
                name: user.name,
                job: user.job,
            }))
            .unwrap();

        let result = create_task.await.unwrap().unwrap();
        assert_eq!(result.id, "99");
    }

    #[tokio::test]
    async fn test_dropped_reply_is_transport_error() {
        let (remote, mut receiver) = create_mock_remote(10);
        let list_task = tokio::spawn(async move { remote.list_users(1).await });

        let (page, responder) = expect_list_users(&mut receiver).await.unwrap();
        assert_eq!(page, 1);
        drop(responder);

        assert!(matches!(
            list_task.await.unwrap(),
            Err(RemoteError::Transport(_))
        ));
    }
}
