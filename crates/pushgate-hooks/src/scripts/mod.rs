//! Hook scripts bundled with PushGate.
//!
//! Each script is enabled by placing a file with its name in the script
//! directory and listing it in a chain.

pub mod blockpush;
pub mod protect_refs;
pub mod sendmail;

use std::sync::Arc;

use crate::runtime::NativeInterpreter;

pub use blockpush::BlockPush;
pub use protect_refs::ProtectRefs;
pub use sendmail::SendMail;

/// A native interpreter with every bundled script registered.
pub fn bundled() -> NativeInterpreter {
    NativeInterpreter::new()
        .with_script("sendmail", Arc::new(SendMail::default()))
        .with_script("blockpush", Arc::new(BlockPush))
        .with_script("protect-refs", Arc::new(ProtectRefs::default()))
}
