//! `blockpush` — vetoes every push it is attached to.

use async_trait::async_trait;
use serde_json::Value;

use crate::context::BindingContext;
use crate::error::BoxError;
use crate::runtime::NativeScript;

/// Rejects the whole push.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockPush;

#[async_trait]
impl NativeScript for BlockPush {
    async fn run(&self, context: &mut BindingContext<'_>) -> Result<Value, BoxError> {
        context.logger().info(&format!(
            "{} is not allowed to push to {}",
            context.user().username,
            context.repository().name
        ));
        Ok(Value::Bool(false))
    }
}
