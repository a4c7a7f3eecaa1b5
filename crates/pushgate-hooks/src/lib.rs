//! # pushgate-hooks
//!
//! Hook engine for PushGate. Provides:
//!
//! - The binding context handed to every script of one push
//! - Mailing list resolution across repository, team and ad-hoc sources
//! - Best-effort notification dispatch through the service facade
//! - A script runtime that resolves scripts by name and normalizes results
//! - The orchestrator that runs a hook chain with veto semantics
//! - Bundled native scripts (`sendmail`, `blockpush`, `protect-refs`)

pub mod api;
pub mod context;
pub mod error;
pub mod mailing;
pub mod notify;
pub mod orchestrator;
pub mod prelude;
pub mod runtime;
pub mod scripts;

pub use api::facade::ServiceFacade;
pub use api::logger::{HookLogger, TracingHookLogger};
pub use context::{BINDING_NAMES, Binding, BindingContext};
pub use error::{BoxError, DeliveryError, HookError};
pub use mailing::MailingListResolver;
pub use notify::{DeliveryOutcome, DeliveryReport, NotificationDispatcher};
pub use orchestrator::{ChainReport, ChainState, HookOrchestrator, HookPhase, ScriptRun};
pub use runtime::{
    HookOutcome, NativeInterpreter, NativeScript, ProcessInterpreter, ScriptInterpreter,
    ScriptRuntime, ScriptSource,
};
