pub mod error;
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "mock")]
mod mock;
pub mod path;
pub mod wire;

mod entity;
mod protected;
mod service;

pub use crate::entity::{Entity, EntityKind};
pub use crate::error::{ErrorKind, Result};
#[cfg(feature = "http")]
pub use crate::http::HttpBackend;
#[cfg(feature = "mock")]
pub use crate::mock::MockBackend;
pub use crate::protected::{PROTECTED_FOLDERS, is_protected};
pub use crate::service::InventoryService;
use std::sync::Arc;

pub type ServiceHandle = Arc<dyn InventoryService + Send + Sync>;
