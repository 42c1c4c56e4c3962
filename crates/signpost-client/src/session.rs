//! Admin session gate.
//!
//! One object owns the authenticated flag as an observable boolean; views
//! subscribe to it instead of polling. The flag lives for the process only —
//! it is never persisted, so closing the admin surface ends the session.
//! This is deliberately minimal and not a hardened security boundary.

use serde_json::json;
use tokio::sync::watch;

use crate::error::ClientError;
use crate::transport::ContentTransport;

pub struct AdminSession<T: ContentTransport> {
    api: T,
    authenticated: watch::Sender<bool>,
}

impl<T: ContentTransport> AdminSession<T> {
    pub fn new(api: T) -> Self {
        let (authenticated, _) = watch::channel(false);
        Self { api, authenticated }
    }

    /// Verify the credential pair against the gateway and raise the flag.
    ///
    /// A 401 surfaces as `AuthRejected` with the gateway's message; other
    /// failures (network down) keep their own error so the UI can distinguish
    /// "wrong password" from "could not reach the server".
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let body = json!({ "username": username, "password": password });
        match self.api.post("/auth/login", body).await {
            Ok(_) => {
                // send_replace updates even when nothing subscribes yet
                self.authenticated.send_replace(true);
                Ok(())
            }
            Err(ClientError::Api { status: 401, message }) => {
                Err(ClientError::AuthRejected(message))
            }
            Err(e) => Err(e),
        }
    }

    /// Drop the flag. Purely local; the gateway holds no session state.
    pub fn logout(&self) {
        self.authenticated.send_replace(false);
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    /// Observable for route guards: fires on every login/logout transition.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;

    struct FakeAuthApi {
        accept: bool,
        reachable: bool,
    }

    #[async_trait]
    impl ContentTransport for FakeAuthApi {
        async fn get(&self, _path: &str) -> Result<Value, ClientError> {
            unreachable!("session only posts")
        }

        async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError> {
            assert_eq!(path, "/auth/login");
            assert!(body.get("username").is_some() && body.get("password").is_some());
            if !self.reachable {
                return Err(ClientError::Unavailable("connection refused".into()));
            }
            if self.accept {
                Ok(serde_json::json!({ "authenticated": true }))
            } else {
                Err(ClientError::Api {
                    status: 401,
                    message: "invalid credentials".into(),
                })
            }
        }

        async fn put(&self, _path: &str, _body: Value) -> Result<Value, ClientError> {
            unreachable!("session only posts")
        }

        async fn delete(&self, _path: &str) -> Result<Value, ClientError> {
            unreachable!("session only posts")
        }
    }

    #[tokio::test]
    async fn successful_login_raises_the_flag_and_notifies_subscribers() {
        let session = AdminSession::new(FakeAuthApi {
            accept: true,
            reachable: true,
        });
        let mut guard = session.subscribe();
        assert!(!session.is_authenticated());

        session.login("admin", "uisn2026").await.unwrap();
        assert!(session.is_authenticated());
        assert!(guard.has_changed().unwrap());
        assert!(*guard.borrow_and_update());

        session.logout();
        assert!(!session.is_authenticated());
        assert!(!*guard.borrow_and_update());
    }

    #[tokio::test]
    async fn rejected_credentials_leave_the_flag_down() {
        let session = AdminSession::new(FakeAuthApi {
            accept: false,
            reachable: true,
        });

        let result = session.login("admin", "wrong").await;
        assert!(matches!(result, Err(ClientError::AuthRejected(_))));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn unreachable_gateway_is_not_reported_as_bad_credentials() {
        let session = AdminSession::new(FakeAuthApi {
            accept: true,
            reachable: false,
        });

        let result = session.login("admin", "uisn2026").await;
        assert!(matches!(result, Err(ClientError::Unavailable(_))));
        assert!(!session.is_authenticated());
    }
}
