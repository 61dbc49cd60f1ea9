//! Operation Invoker: the single blocking call site for remote operations.

use super::projector::Request;
use crate::client::ServiceClient;
use crate::error::{AdapterError, ClientError};
use crate::schema::OperationSchema;
use serde_json::Value;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::error;

/// Invoke `operation` and wait for it to finish.
///
/// The client call is async; it is always driven to completion here so callers
/// only ever observe a finished response or an error. Network failures are
/// rewritten to name the endpoint and region the client was configured with.
pub fn invoke_blocking(
    client: &dyn ServiceClient,
    operation: &OperationSchema,
    request: &Request,
) -> Result<Value, AdapterError> {
    let result = block_on_call(client, operation, request)?;
    result.map_err(|err| match err {
        ClientError::Network { .. } => {
            let endpoint = client.endpoint();
            error!(
                operation = %operation.name,
                endpoint = %endpoint.url,
                region = %endpoint.region,
                "Service endpoint unreachable"
            );
            AdapterError::Endpoint {
                message: err.to_string(),
                endpoint: endpoint.url.clone(),
                region: endpoint.region.clone(),
            }
        }
        other => AdapterError::from(other),
    })
}

fn block_on_call(
    client: &dyn ServiceClient,
    operation: &OperationSchema,
    request: &Request,
) -> Result<Result<Value, ClientError>, AdapterError> {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => Ok(
            tokio::task::block_in_place(|| handle.block_on(client.call(operation, request))),
        ),
        // Inside a current-thread runtime: drive the call on a scoped thread.
        Ok(_) => std::thread::scope(|scope| {
            scope
                .spawn(|| run_on_fresh_runtime(client, operation, request))
                .join()
                .map_err(|_| AdapterError::Runtime("Invoker thread panicked".to_string()))?
        }),
        Err(_) => run_on_fresh_runtime(client, operation, request),
    }
}

fn run_on_fresh_runtime(
    client: &dyn ServiceClient,
    operation: &OperationSchema,
    request: &Request,
) -> Result<Result<Value, ClientError>, AdapterError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AdapterError::Runtime(format!("Failed to create runtime: {}", e)))?;
    Ok(runtime.block_on(client.call(operation, request)))
}
