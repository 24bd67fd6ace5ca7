//! # status-service
//!
//! Application layer: wires the status store to its collaborators and
//! pushes the current user's status changes to the chat server.

pub mod services;
pub mod transport;

pub use services::{
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, StatusService,
    SuccessCallback, USER_STATUS_PATH,
};
pub use transport::HttpStatusTransport;
