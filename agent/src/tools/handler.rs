//! Tool handlers
//!
//! A handler receives the validated argument object of a tool call. Handlers
//! written against a typed parameter struct go through [`typed_handler`],
//! which deserializes the arguments before invoking the closure.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// Error type returned by handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// The callable a tool delegates to
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: Map<String, Value>) -> Result<Value, HandlerError>;
}

/// Handlers keyed by the `operationId` they serve
pub type HandlerMap = HashMap<String, Arc<dyn ToolHandler>>;

/// Adapter binding a JSON argument object to a typed parameter struct
pub struct TypedHandler<P, F> {
    func: F,
    _params: PhantomData<fn() -> P>,
}

#[async_trait]
impl<P, F, Fut, R, E> ToolHandler for TypedHandler<P, F>
where
    P: DeserializeOwned + Send + 'static,
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Serialize + 'static,
    E: Into<HandlerError> + 'static,
{
    async fn call(&self, args: Map<String, Value>) -> Result<Value, HandlerError> {
        let params: P = serde_json::from_value(Value::Object(args))?;
        let result = (self.func)(params).await.map_err(Into::into)?;
        Ok(serde_json::to_value(result)?)
    }
}

/// Wrap an async closure taking typed parameters as a shareable handler
pub fn typed_handler<P, F, Fut, R, E>(func: F) -> Arc<dyn ToolHandler>
where
    P: DeserializeOwned + Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Serialize + 'static,
    E: Into<HandlerError> + 'static,
{
    Arc::new(TypedHandler {
        func,
        _params: PhantomData,
    })
}
