//! Status service
//!
//! Pushes the current user's status to the chat server and feeds server
//! snapshots and events into the local store.

use std::sync::Arc;

use status_core::{
    PostRequest, ServerEvent, ServerUpdateRequest, StatusTransport, UserStatusSnapshot,
};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Endpoint that updates the requesting user's own status
pub const USER_STATUS_PATH: &str = "/json/users/me/status";

/// Continuation run after the server accepted an update
pub type SuccessCallback = Box<dyn FnOnce() + Send + 'static>;

/// Status service
pub struct StatusService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatusService<'a> {
    /// Create a new StatusService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send the current user's status change to the server.
    ///
    /// One idempotent request is issued. Absent fields are left unchanged
    /// server-side. The local store is not touched.
    #[instrument(skip(self))]
    pub async fn server_update(&self, request: ServerUpdateRequest) -> ServiceResult<()> {
        send(self.ctx.transport().as_ref(), request).await
    }

    /// Mark the current user away
    #[instrument(skip(self))]
    pub async fn server_set_away(&self) -> ServiceResult<()> {
        self.server_update(ServerUpdateRequest::away(true)).await
    }

    /// Clear the current user's away flag
    #[instrument(skip(self))]
    pub async fn server_revoke_away(&self) -> ServiceResult<()> {
        self.server_update(ServerUpdateRequest::away(false)).await
    }

    /// Fire-and-forget form of [`Self::server_update`].
    ///
    /// `on_success` runs only once the server accepted the update; failures
    /// are logged and otherwise dropped. Must be called inside a tokio
    /// runtime.
    pub fn spawn_server_update(
        &self,
        request: ServerUpdateRequest,
        on_success: Option<SuccessCallback>,
    ) -> JoinHandle<()> {
        let transport = Arc::clone(self.ctx.transport());
        tokio::spawn(async move {
            match send(transport.as_ref(), request).await {
                Ok(()) => {
                    if let Some(callback) = on_success {
                        callback();
                    }
                }
                Err(e) => warn!(error = %e, "Status update was not applied"),
            }
        })
    }

    /// Replace the local store contents with a registration snapshot
    #[instrument(skip_all, fields(users = snapshot.user_status.len()))]
    pub fn initialize(&self, snapshot: &UserStatusSnapshot) {
        self.ctx.store().write().initialize(snapshot);
    }

    /// Apply a server event; events other than `user_status` are ignored
    pub fn handle_event(&self, event: &ServerEvent) {
        match event {
            ServerEvent::UserStatus(ev) => {
                debug!(user_id = %ev.user_id, "Applying user_status event");
                self.ctx.store().write().apply_event(ev);
            }
            ServerEvent::Other => {}
        }
    }
}

async fn send(transport: &dyn StatusTransport, request: ServerUpdateRequest) -> ServiceResult<()> {
    transport
        .post(PostRequest {
            path: USER_STATUS_PATH,
            data: request,
            idempotent: true,
        })
        .await?;

    debug!("Status update accepted");
    Ok(())
}
