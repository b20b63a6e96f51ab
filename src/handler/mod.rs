pub mod adapter;
pub mod types;

pub use adapter::*;
pub use types::*;

use crate::config::Config;
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use std::{
    sync::Arc,
    time::{Duration, UNIX_EPOCH},
};
use tracing::info;

/// Serves invocations until the runtime shuts the function down.
///
/// The payload is taken as raw JSON so that an event which does not fit
/// [`InboundEvent`] still produces an error envelope instead of a runtime
/// deserialization failure.
pub async fn run(config: Config) -> Result<(), lambda_runtime::Error> {
    let adapter = Arc::new(RequestAdapter::new(&config)?);

    info!("Starting Lambda runtime loop");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let adapter = Arc::clone(&adapter);
        async move {
            let deadline = UNIX_EPOCH + Duration::from_millis(event.context.deadline);
            Ok::<_, lambda_runtime::Error>(adapter.handle(event.payload, Some(deadline)).await)
        }
    }))
    .await
}
