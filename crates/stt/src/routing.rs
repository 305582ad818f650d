//! Result routing for the synchronous operations

use murmur_blob::Persister;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{
    error::Result,
    types::{OutputConfig, TranscriptionResult},
};

/// Whether the transcript goes back to the caller
///
/// An explicit `return` wins. Otherwise the transcript is returned only
/// when it is not persisted anywhere.
pub fn should_return(output: &OutputConfig) -> bool {
    output.return_result.unwrap_or(output.destination.is_none())
}

/// Encode a value as JSON indented by four spaces
///
/// # Errors
///
/// Returns an error if the value cannot be encoded
pub fn render<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Persist the transcript if requested and decide what to hand back
///
/// The caller receives the full transcript, or an empty one when it must
/// be withheld.
///
/// # Errors
///
/// Returns an error if encoding or persisting fails
pub async fn route(
    output: &OutputConfig,
    result: TranscriptionResult,
    persister: &dyn Persister,
) -> Result<TranscriptionResult> {
    if let Some(ref destination) = output.destination {
        persister.persist(destination, render(&result)?).await?;
        tracing::info!(destination = %destination, "persisted transcript");
    }

    if should_return(output) {
        Ok(result)
    } else {
        Ok(TranscriptionResult::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use murmur_blob::{BlobError, FileReference};

    use super::*;

    #[derive(Default)]
    struct RecordingPersister {
        writes: Mutex<Vec<(String, Vec<u8>)>>,
    }

    #[async_trait]
    impl Persister for RecordingPersister {
        async fn persist(&self, reference: &FileReference, src: Vec<u8>) -> std::result::Result<(), BlobError> {
            self.writes.lock().unwrap().push((reference.to_string(), src));
            Ok(())
        }
    }

    fn output(destination: Option<&str>, return_result: Option<bool>) -> OutputConfig {
        OutputConfig {
            destination: destination.map(|d| d.parse().unwrap()),
            return_result,
        }
    }

    fn transcript() -> TranscriptionResult {
        TranscriptionResult {
            language_code: Some("eng".to_string()),
            text: Some("hello".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn return_decision_truth_table() {
        let dest = Some("s3://bucket/out.json");

        assert!(should_return(&output(None, None)));
        assert!(!should_return(&output(dest, None)));
        assert!(should_return(&output(dest, Some(true))));
        assert!(!should_return(&output(dest, Some(false))));
        assert!(should_return(&output(None, Some(true))));
        assert!(!should_return(&output(None, Some(false))));
    }

    #[test]
    fn render_indents_by_four_spaces() {
        let rendered = String::from_utf8(render(&transcript()).unwrap()).unwrap();
        assert_eq!(rendered, "{\n    \"language_code\": \"eng\",\n    \"text\": \"hello\"\n}");
    }

    #[tokio::test]
    async fn destination_without_return_persists_and_withholds() {
        let persister = RecordingPersister::default();

        let routed = route(&output(Some("s3://bucket/out.json"), None), transcript(), &persister)
            .await
            .unwrap();

        assert_eq!(routed, TranscriptionResult::default());
        let writes = persister.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, "s3://bucket/out.json");
        let persisted: TranscriptionResult = serde_json::from_slice(&writes[0].1).unwrap();
        assert_eq!(persisted, transcript());
    }

    #[tokio::test]
    async fn destination_with_return_persists_and_returns() {
        let persister = RecordingPersister::default();

        let routed = route(&output(Some("out.json"), Some(true)), transcript(), &persister)
            .await
            .unwrap();

        assert_eq!(routed, transcript());
        assert_eq!(persister.writes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn no_destination_never_persists() {
        let persister = RecordingPersister::default();

        let routed = route(&output(None, None), transcript(), &persister).await.unwrap();
        assert_eq!(routed, transcript());

        let routed = route(&output(None, Some(false)), transcript(), &persister).await.unwrap();
        assert_eq!(routed, TranscriptionResult::default());

        assert!(persister.writes.lock().unwrap().is_empty());
    }
}
