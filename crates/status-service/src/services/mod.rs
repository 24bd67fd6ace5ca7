//! Business logic services
//!
//! The status service and the context that carries its dependencies.

pub mod context;
pub mod error;
pub mod status;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use status::{StatusService, SuccessCallback, USER_STATUS_PATH};
