//! Planning-time replacement decision

use crate::lifecycle::{LifecycleProxy, ResourceInput};
use remotelift_core::{
    Action, InvokeRequest, InvokeResponse, RemoteInvoker, Result, args, store,
};
use serde_json::Value;

/// Outcome of a replacement check.
///
/// When `replace` is true the host engine must mark the resource's argument
/// set for forced replacement (destroy, then recreate), surfacing `reason`
/// to the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceDecision {
    pub replace: bool,
    pub reason: String,
}

impl<I: RemoteInvoker> LifecycleProxy<I> {
    /// Ask the remote function whether the proposed arguments force a
    /// replacement.
    ///
    /// The decision policy belongs entirely to the remote function; the
    /// proxy only carries the previous arguments as `state` and the new ones
    /// as `args`. A brand-new resource (no prior arguments) is never a
    /// replacement and triggers no remote call.
    pub async fn decide_replacement(&self, input: &ResourceInput) -> Result<ReplaceDecision> {
        self.decide_replacement_inner(input)
            .await
            .map_err(|err| err.for_action(Action::Diff))
    }

    async fn decide_replacement_inner(&self, input: &ResourceInput) -> Result<ReplaceDecision> {
        if prior_is_trivial(&input.prior_args) {
            tracing::debug!("skipping remote diff: no previous state, this is a create");
            return Ok(ReplaceDecision::default());
        }

        let proposed = args::merge_args(&input.args)?;
        // Unlike the lifecycle actions, unparseable prior args are fatal
        // here: a diff against a wrong baseline could silently skip a
        // required replacement.
        let previous = args::merge_args(&input.prior_args)?;
        let decoded = store::decode(&input.store);

        let mut request = InvokeRequest::new(Action::Diff, proposed).with_state(previous);
        if !decoded.is_empty() {
            request = request.with_store(decoded);
        }

        let payload = self.invoker().invoke(&request).await?;
        let response = InvokeResponse::from_payload(&payload)?;
        if response.replace {
            tracing::info!("remote function requested replacement: {}", response.reason);
        }
        Ok(ReplaceDecision {
            replace: response.replace,
            reason: response.reason,
        })
    }
}

/// Prior arguments that mean "this resource has never existed".
fn prior_is_trivial(prior_args: &Value) -> bool {
    match prior_args {
        Value::Null => true,
        Value::String(text) => text.is_empty() || text == "{}",
        Value::Object(map) => map.is_empty(),
        Value::Array(fragments) => fragments.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trivial_prior_args() {
        assert!(prior_is_trivial(&Value::Null));
        assert!(prior_is_trivial(&json!("")));
        assert!(prior_is_trivial(&json!("{}")));
        assert!(prior_is_trivial(&json!({})));
        assert!(prior_is_trivial(&json!([])));
        assert!(!prior_is_trivial(&json!({"a": 1})));
        assert!(!prior_is_trivial(&json!([r#"{"a": 1}"#])));
    }
}
