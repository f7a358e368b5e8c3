use std::sync::Arc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::extract::extract_json;
use crate::generator::TextGenerator;
use crate::models::{Suggestion, SuggestionParams, SuggestionRequest};
use crate::prompt::build_prompt;
use crate::{CoreError, CoreResult};

/// How model output is checked once it has been decoded
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionPolicy {
    /// Reject anything that is not an array of complete suggestions
    #[serde(default)]
    pub strict_shape: bool,

    /// Number of suggestions the prompt asks for. Advisory only.
    #[serde(default = "default_expected_count")]
    pub expected_count: usize,
}

fn default_expected_count() -> usize { 4 }

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            strict_shape: false,
            expected_count: default_expected_count(),
        }
    }
}

impl ExtractionPolicy {
    /// Check a decoded value against the policy. The value is returned
    /// untouched on success.
    pub fn apply(&self, value: Value) -> CoreResult<Value> {
        if self.strict_shape {
            Vec::<Suggestion>::deserialize(&value).map_err(|e| {
                CoreError::Extraction(format!("output is not a suggestion list: {}", e))
            })?;
        }

        match value.as_array() {
            Some(items) if items.len() != self.expected_count => warn!(
                expected = self.expected_count,
                received = items.len(),
                "Model returned an unexpected number of suggestions"
            ),
            Some(_) => {}
            None => warn!("Model output decoded to a non-array value, forwarding as-is"),
        }

        Ok(value)
    }
}

/// Runs one suggestion request end to end: validate, prompt, call the model
/// once, extract.
pub struct SuggestionService {
    generator: Arc<dyn TextGenerator>,
    policy: ExtractionPolicy,
}

impl SuggestionService {
    pub fn new(generator: Arc<dyn TextGenerator>, policy: ExtractionPolicy) -> Self {
        Self { generator, policy }
    }

    pub async fn suggest(&self, params: SuggestionParams) -> CoreResult<Value> {
        // 1. Validate before anything leaves the process
        let req = SuggestionRequest::try_from(params)?;

        // 2. Build prompt and call the model
        let prompt = build_prompt(&req);
        debug!(location = %req.location, time = %req.time, budget = %req.budget, "Requesting suggestions");
        let text = self.generator.generate(&prompt).await?;

        // 3. Recover JSON from the reply
        let value = extract_json(&text)?;
        self.policy.apply(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Returns a canned reply and records every prompt it receives
    struct CannedGenerator {
        reply: CoreResult<String>,
        prompts: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl CannedGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self { reply: Ok(text.to_string()), prompts: Mutex::new(Vec::new()), calls: AtomicUsize::new(0) })
        }

        fn failing(msg: &str) -> Arc<Self> {
            Arc::new(Self { reply: Err(CoreError::Upstream(msg.to_string())), prompts: Mutex::new(Vec::new()), calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str) -> CoreResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(CoreError::Upstream(e.to_string())),
            }
        }
    }

    fn params() -> SuggestionParams {
        SuggestionParams {
            location: Some("Washington D.C.".into()),
            time: Some("Morning".into()),
            budget: Some("Free".into()),
        }
    }

    #[tokio::test]
    async fn test_suggest_happy_path() {
        let generator = CannedGenerator::replying(r#"Sure: [{"name":"A","description":"B","estimated_cost":"Free","location_hint":"C"}]"#);
        let service = SuggestionService::new(generator.clone(), ExtractionPolicy::default());

        let value = service.suggest(params()).await.unwrap();

        assert_eq!(value, json!([{"name":"A","description":"B","estimated_cost":"Free","location_hint":"C"}]));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("- Location: Washington D.C."));
    }

    #[tokio::test]
    async fn test_validation_skips_model() {
        let generator = CannedGenerator::replying("[]");
        let service = SuggestionService::new(generator.clone(), ExtractionPolicy::default());

        let mut missing = params();
        missing.budget = Some(String::new());
        let result = service.suggest(missing).await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let service = SuggestionService::new(CannedGenerator::failing("quota exceeded"), ExtractionPolicy::default());
        let result = service.suggest(params()).await;
        assert!(matches!(result, Err(CoreError::Upstream(msg)) if msg.contains("quota exceeded")));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_extraction_error() {
        let service = SuggestionService::new(CannedGenerator::replying("I cannot help with that."), ExtractionPolicy::default());
        assert!(matches!(service.suggest(params()).await, Err(CoreError::Extraction(_))));
    }

    #[test]
    fn test_permissive_policy_forwards_any_shape() {
        let policy = ExtractionPolicy::default();
        assert_eq!(policy.apply(json!([1, 2, 3])).unwrap(), json!([1, 2, 3]));
        assert_eq!(policy.apply(json!({"a": 1})).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_count_is_advisory() {
        let policy = ExtractionPolicy { strict_shape: true, expected_count: 4 };
        let one = json!([{"name":"A","description":"B","estimated_cost":"Free","location_hint":"C"}]);
        assert_eq!(policy.apply(one.clone()).unwrap(), one);
    }

    #[test]
    fn test_strict_policy_rejects_wrong_shape() {
        let policy = ExtractionPolicy { strict_shape: true, ..Default::default() };
        assert!(matches!(policy.apply(json!(["hike", "bike"])), Err(CoreError::Extraction(_))));
        assert!(matches!(policy.apply(json!([{"name": "A"}])), Err(CoreError::Extraction(_))));
        assert!(matches!(policy.apply(json!({"name": "A"})), Err(CoreError::Extraction(_))));
    }
}
