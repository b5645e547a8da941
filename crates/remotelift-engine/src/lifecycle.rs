//! Lifecycle orchestrator

use crate::planning::planning_enabled;
use crate::record::ResourceRecord;
use remotelift_core::{
    Action, InvokeRequest, InvokeResponse, ProxyError, RemoteInvoker, Result, SchemaSide, args,
    store,
};
use remotelift_schema::{SchemaCache, SchemaPair, validate};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Inputs for one lifecycle operation, recovered from the host engine.
///
/// `args` and `prior_args` accept any of the argument forms (fragment list,
/// legacy single string, merged object); `prior_args` is `Null` for a
/// resource that has never been created. `store` is the serialized store
/// blob persisted by the previous operation, empty when there is none.
#[derive(Debug, Clone)]
pub struct ResourceInput {
    pub args: Value,
    pub prior_args: Value,
    pub store: String,
}

impl ResourceInput {
    pub fn new(args: Value) -> Self {
        Self {
            args,
            prior_args: Value::Null,
            store: String::new(),
        }
    }

    pub fn with_prior_args(mut self, prior_args: Value) -> Self {
        self.prior_args = prior_args;
        self
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = store.into();
        self
    }
}

/// Everything an operation needs before it may talk to the remote function.
pub(crate) struct PreparedCall {
    pub args: Map<String, Value>,
    pub state: Map<String, Value>,
    pub store: Map<String, Value>,
    pub schemas: Arc<SchemaPair>,
}

/// Translates host-engine lifecycle calls into remote invocations.
///
/// One proxy corresponds to one provider configuration: all operations
/// issued through it share its schema cache, and nothing else. The proxy is
/// safe to share across tasks.
pub struct LifecycleProxy<I> {
    invoker: I,
    schemas: SchemaCache,
}

impl<I: RemoteInvoker> LifecycleProxy<I> {
    pub fn new(invoker: I) -> Self {
        Self {
            invoker,
            schemas: SchemaCache::new(),
        }
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// The schema pair for this provider configuration, fetched from the
    /// remote function on first use and cached afterwards (failures
    /// included).
    pub async fn schemas(&self) -> Result<Arc<SchemaPair>> {
        self.schemas
            .get_or_fetch(|| async {
                tracing::info!("requesting schemas from the remote function for the first time");
                let request = InvokeRequest::new(Action::Schema, Map::new());
                let payload = self.invoker.invoke(&request).await?;
                let response = InvokeResponse::from_payload(&payload)?;
                Ok(SchemaPair::from_result(&response.result))
            })
            .await
    }

    /// Create the resource. The reply must carry a non-empty id; any failure
    /// leaves the resource absent.
    pub async fn create(&self, input: &ResourceInput) -> Result<ResourceRecord> {
        self.create_inner(input)
            .await
            .map_err(|err| err.for_action(Action::Create))
    }

    async fn create_inner(&self, input: &ResourceInput) -> Result<ResourceRecord> {
        let prepared = self.prepare(input, false).await?;
        let response = self.call(Action::Create, &prepared).await?;
        require_id(&response, Action::Create)?;
        validate(
            prepared.schemas.response.as_ref(),
            &Value::Object(response.result.clone()),
            SchemaSide::Response,
        )?;
        Ok(ResourceRecord::from_response(&response))
    }

    /// Refresh the resource from its remote truth.
    ///
    /// `Ok(None)` means the remote function reported an empty id: the
    /// resource is gone and the host engine must clear its record. That is a
    /// success, not an error.
    pub async fn read(&self, input: &ResourceInput) -> Result<Option<ResourceRecord>> {
        self.read_inner(input)
            .await
            .map_err(|err| err.for_action(Action::Read))
    }

    async fn read_inner(&self, input: &ResourceInput) -> Result<Option<ResourceRecord>> {
        let prepared = self.prepare(input, true).await?;
        let response = self.call(Action::Read, &prepared).await?;
        if response.id.is_empty() {
            tracing::info!("remote resource no longer exists, clearing persisted state");
            return Ok(None);
        }
        validate(
            prepared.schemas.response.as_ref(),
            &Value::Object(response.result.clone()),
            SchemaSide::Response,
        )?;
        Ok(Some(ResourceRecord::from_response(&response)))
    }

    /// Update the resource in place. The record is replaced only after every
    /// step succeeds; on failure the previous record stands untouched.
    pub async fn update(&self, input: &ResourceInput) -> Result<ResourceRecord> {
        self.update_inner(input)
            .await
            .map_err(|err| err.for_action(Action::Update))
    }

    async fn update_inner(&self, input: &ResourceInput) -> Result<ResourceRecord> {
        let prepared = self.prepare(input, true).await?;
        let response = self.call(Action::Update, &prepared).await?;
        require_id(&response, Action::Update)?;
        validate(
            prepared.schemas.response.as_ref(),
            &Value::Object(response.result.clone()),
            SchemaSide::Response,
        )?;
        Ok(ResourceRecord::from_response(&response))
    }

    /// Delete the resource.
    ///
    /// The reply is never validated against the response schema, and a
    /// successful invocation clears the record no matter what the reply
    /// carries. Only a failed invocation leaves the previous record in
    /// place.
    pub async fn delete(&self, input: &ResourceInput) -> Result<()> {
        self.delete_inner(input)
            .await
            .map_err(|err| err.for_action(Action::Delete))
    }

    async fn delete_inner(&self, input: &ResourceInput) -> Result<()> {
        let prepared = self.prepare(input, true).await?;
        self.call(Action::Delete, &prepared).await?;
        Ok(())
    }

    /// Merge, recover prior state, acquire schemas, and validate the request.
    pub(crate) async fn prepare(
        &self,
        input: &ResourceInput,
        include_prior: bool,
    ) -> Result<PreparedCall> {
        let merged = args::merge_args(&input.args)?;
        let state = if include_prior {
            recover_prior_args(&input.prior_args)
        } else {
            Map::new()
        };
        let store = store::decode(&input.store);
        let schemas = self.schemas().await?;
        validate(
            schemas.request.as_ref(),
            &Value::Object(merged.clone()),
            SchemaSide::Request,
        )?;
        Ok(PreparedCall {
            args: merged,
            state,
            store,
            schemas,
        })
    }

    pub(crate) async fn call(
        &self,
        action: Action,
        prepared: &PreparedCall,
    ) -> Result<InvokeResponse> {
        let mut request = InvokeRequest::new(action, prepared.args.clone());
        if !prepared.state.is_empty() {
            request = request.with_state(prepared.state.clone());
        }
        if !prepared.store.is_empty() {
            request = request.with_store(prepared.store.clone());
        }
        request = request.with_planning(planning_enabled());
        let payload = self.invoker.invoke(&request).await?;
        InvokeResponse::from_payload(&payload)
    }
}

fn require_id(response: &InvokeResponse, action: Action) -> Result<()> {
    if response.id.is_empty() {
        return Err(ProxyError::Contract(format!(
            "{action} reply is missing the required 'id' field or returned an empty id"
        )));
    }
    Ok(())
}

/// Recover the previous merged arguments from persisted state.
///
/// Prior arguments are advisory context for the remote function; anything
/// that does not parse is treated as empty rather than failing the
/// operation.
pub(crate) fn recover_prior_args(prior_args: &Value) -> Map<String, Value> {
    if prior_args.is_null() {
        return Map::new();
    }
    match args::merge_args(prior_args) {
        Ok(map) => map,
        Err(err) => {
            tracing::debug!("prior args did not parse, treating as empty: {err}");
            Map::new()
        }
    }
}
