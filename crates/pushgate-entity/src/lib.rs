//! # pushgate-entity
//!
//! Domain models for PushGate. Repository, team and user descriptors are
//! owned by the hosting service and read-only to the hook engine; the
//! ref-update command is the one model whose status the hook chain
//! mutates.

pub mod command;
pub mod notification;
pub mod object_id;
pub mod repository;
pub mod team;
pub mod user;

pub use command::{CommandKind, CommandStatus, RefUpdateCommand};
pub use notification::NotificationMessage;
pub use object_id::ObjectId;
pub use repository::RepositoryModel;
pub use team::TeamModel;
pub use user::UserModel;
