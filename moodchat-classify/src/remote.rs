//! HTTP adapter for a hosted text-classification model.
//!
//! Speaks the HuggingFace Inference API shape: POST the raw text, get
//! back label/score candidates (e.g. a DistilBERT SST-2 deployment).
//! The model must answer with one of the three mood labels; anything
//! else is a classification failure, never a silent fallback.

use anyhow::{bail, Context as _};
use moodchat_core::{Classification, Classifier, MoodError, MoodLabel};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout. Latency beyond this surfaces to the caller
/// as a classification error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    endpoint: String,
    api_token: Option<String>,
}

impl RemoteClassifier {
    /// `endpoint` is the full model URL, e.g.
    /// `https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english`.
    pub fn new(endpoint: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_token,
        }
    }
}

impl Classifier for RemoteClassifier {
    fn classify(&self, text: &str) -> moodchat_core::Result<Classification> {
        classify_blocking(&self.endpoint, self.api_token.as_deref(), text)
            .map_err(|e| MoodError::Classification(format!("{e:#}")))
    }
}

/// Callers are often already inside a tokio runtime (the CLI uses
/// `#[tokio::main]`); creating a nested runtime and calling block_on
/// would panic.
///
/// Strategy:
/// - If a runtime is already running: use block_in_place + Handle::block_on
/// - Otherwise: create a runtime and block_on
fn classify_blocking(
    endpoint: &str,
    api_token: Option<&str>,
    text: &str,
) -> anyhow::Result<Classification> {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        tokio::task::block_in_place(|| {
            handle.block_on(async { classify_async(endpoint, api_token, text).await })
        })
    } else {
        let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
        rt.block_on(async { classify_async(endpoint, api_token, text).await })
    }
}

async fn classify_async(
    endpoint: &str,
    api_token: Option<&str>,
    text: &str,
) -> anyhow::Result<Classification> {
    #[derive(Serialize)]
    struct Req<'a> {
        inputs: &'a str,
    }

    #[derive(Deserialize)]
    struct Candidate {
        label: String,
        score: f64,
    }

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("build http client")?;

    let mut req = client.post(endpoint).json(&Req { inputs: text });
    if let Some(token) = api_token {
        req = req.bearer_auth(token);
    }

    let resp = req.send().await.context("classifier request")?;
    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("classifier error: {status} {txt}");
    }

    // The API wraps candidates in an outer array, one inner list per input.
    let out: Vec<Vec<Candidate>> = resp.json().await.context("parse classifier response")?;
    let candidates = out.into_iter().next().unwrap_or_default();

    let best = candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .context("classifier returned no candidates")?;

    let Some(label) = MoodLabel::parse(&best.label) else {
        bail!("unrecognized label from classifier: {:?}", best.label);
    };
    if !(0.0..=1.0).contains(&best.score) {
        bail!("classifier score out of range: {}", best.score);
    }

    Ok(Classification {
        label,
        confidence: best.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Network behavior is covered by the error-mapping contract; response
    // decoding is exercised against captured payload shapes here.

    #[derive(Deserialize)]
    struct Candidate {
        label: String,
        score: f64,
    }

    #[test]
    fn decodes_sst2_payload_shape() {
        let payload = r#"[[{"label":"NEGATIVE","score":0.9991},{"label":"POSITIVE","score":0.0009}]]"#;
        let out: Vec<Vec<Candidate>> = serde_json::from_str(payload).unwrap();
        let best = out[0]
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .unwrap();
        assert_eq!(MoodLabel::parse(&best.label), Some(MoodLabel::Negative));
        assert!(best.score > 0.99);
    }

    #[test]
    fn unrecognized_label_is_rejected() {
        assert_eq!(MoodLabel::parse("LABEL_1"), None);
    }

    #[test]
    fn unreachable_endpoint_maps_to_classification_error() {
        // Reserved TEST-NET address; connection fails fast without a
        // runtime already active.
        let c = RemoteClassifier::new("http://192.0.2.1:9/models/x", None);
        let err = c.classify("hello").unwrap_err();
        assert!(matches!(err, MoodError::Classification(_)));
    }
}
