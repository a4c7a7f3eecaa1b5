//! Script runtime — resolves scripts by name and normalizes their results.

pub mod adapter;
pub mod interpreter;
pub mod native;
pub mod outcome;
pub mod process;

pub use adapter::ScriptRuntime;
pub use interpreter::{ScriptInterpreter, ScriptSource};
pub use native::{NativeInterpreter, NativeScript};
pub use outcome::HookOutcome;
pub use process::ProcessInterpreter;
