//! Collaborator interfaces the hook engine calls but does not implement.

pub mod facade;
pub mod logger;

pub use facade::ServiceFacade;
pub use logger::{HookLogger, TracingHookLogger};
