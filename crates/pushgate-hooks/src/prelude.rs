//! Everything a native hook script needs, in one import.
//!
//! ```ignore
//! use pushgate_hooks::prelude::*;
//! ```

pub use async_trait::async_trait;
pub use serde_json::{Value, json};

pub use pushgate_entity::{
    CommandKind, CommandStatus, NotificationMessage, ObjectId, RefUpdateCommand, RepositoryModel,
    TeamModel, UserModel,
};

pub use crate::api::facade::ServiceFacade;
pub use crate::api::logger::HookLogger;
pub use crate::context::BindingContext;
pub use crate::error::{BoxError, DeliveryError};
pub use crate::notify::DeliveryOutcome;
pub use crate::runtime::{HookOutcome, NativeScript};
