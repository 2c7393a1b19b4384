//! Model-based detection: a pretrained NER tagger run via ONNX Runtime.
//!
//! The model directory must hold `model.onnx` (token classification over
//! hashed-vocabulary ids) and `labels.json` (the BIO tag list, index ==
//! logit column). Missing or unloadable files abort startup. Per call the
//! text is split into word spans, framed with [CLS]/[SEP], windowed, and
//! tagged; BIO runs collapse into entity spans and only allow-listed
//! categories become findings.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;

use super::super::detector::PiiDetector;
use crate::config::DetectorKind;
use crate::detection::{DetectError, Finding};

const MODEL_FILE: &str = "model.onnx";
const LABELS_FILE: &str = "labels.json";

/// Hashed-vocabulary range for token ids (BERT-style vocab size).
const VOCAB_BUCKETS: u32 = 29_999;
const CLS_ID: i64 = 101;
const SEP_ID: i64 = 102;

/// Words per inference window, leaving room for [CLS]/[SEP] inside the
/// model's positional limit.
const WINDOW_WORDS: usize = 254;

/// A word's byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WordSpan {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug)]
pub struct NerDetector {
    /// `Session::run` takes `&mut self`; the Mutex satisfies the `&self`
    /// trait contract. Execution stays single-threaded.
    session: Mutex<Session>,
    labels: Vec<String>,
    allowed: Vec<String>,
    model_name: String,
}

impl NerDetector {
    /// Load the model and its label list from `model_dir`.
    pub fn load(model_dir: &Path, allowed: &[String]) -> Result<Self, DetectError> {
        let model_path = model_dir.join(MODEL_FILE);
        if !model_path.exists() {
            return Err(DetectError::ModelLoad {
                path: model_path.display().to_string(),
                reason: "model file not found (set --model-dir or PIICHECKR_MODEL_DIR)"
                    .to_string(),
            });
        }

        let session = Session::builder()
            .map_err(|e| load_error(&model_path, e))?
            .with_intra_threads(1)
            .map_err(|e| load_error(&model_path, e.into()))?
            .commit_from_file(&model_path)
            .map_err(|e| load_error(&model_path, e))?;

        let labels = read_labels(&model_dir.join(LABELS_FILE))?;

        let model_name = model_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("ner-model")
            .to_string();

        log::debug!(
            "NER model loaded: {} ({} labels)",
            model_name,
            labels.len()
        );

        Ok(Self {
            session: Mutex::new(session),
            labels,
            allowed: allowed.to_vec(),
            model_name,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Tag one window of words, returning a label index per word.
    fn infer_window(&self, text: &str, words: &[WordSpan]) -> Result<Vec<usize>, DetectError> {
        let mut input_ids: Vec<i64> = Vec::with_capacity(words.len() + 2);
        input_ids.push(CLS_ID);
        for word in words {
            input_ids.push(i64::from(hash_token_id(&text[word.start..word.end])));
        }
        input_ids.push(SEP_ID);

        let seq_len = input_ids.len();
        let attention_mask: Vec<i64> = vec![1i64; seq_len];

        let ids_tensor = Tensor::from_array((vec![1i64, seq_len as i64], input_ids)).map_err(
            |e| DetectError::Inference {
                reason: format!("tensor creation error: {e}"),
            },
        )?;
        let mask_tensor = Tensor::from_array((vec![1i64, seq_len as i64], attention_mask))
            .map_err(|e| DetectError::Inference {
                reason: format!("tensor creation error: {e}"),
            })?;

        let mut session = self.session.lock().map_err(|e| DetectError::Inference {
            reason: format!("session lock poisoned: {e}"),
        })?;

        let outputs =
            session
                .run(ort::inputs![ids_tensor, mask_tensor])
                .map_err(|e| DetectError::Inference {
                    reason: e.to_string(),
                })?;

        let (_name, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| DetectError::Inference {
                reason: "no output tensor".to_string(),
            })?;

        let (shape, data) =
            output
                .try_extract_tensor::<f32>()
                .map_err(|e| DetectError::Inference {
                    reason: format!("tensor extraction failed: {e}"),
                })?;

        if shape.len() != 3 {
            return Err(DetectError::Inference {
                reason: format!("unexpected output shape: {shape:?}"),
            });
        }
        let out_seq = shape[1] as usize;
        let n_labels = shape[2] as usize;
        if out_seq < words.len() + 2 || n_labels != self.labels.len() {
            return Err(DetectError::Inference {
                reason: format!(
                    "output shape {shape:?} does not match {} words / {} labels",
                    words.len(),
                    self.labels.len()
                ),
            });
        }

        // Position 0 is [CLS]; word w maps to position w + 1.
        let mut tags = Vec::with_capacity(words.len());
        for w in 0..words.len() {
            let logits = &data[(w + 1) * n_labels..(w + 2) * n_labels];
            tags.push(argmax(logits));
        }
        Ok(tags)
    }
}

impl PiiDetector for NerDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Ner
    }

    fn detect(&self, text: &str) -> Result<BTreeSet<Finding>, DetectError> {
        let words = word_spans(text);
        let mut findings = BTreeSet::new();

        for window in words.chunks(WINDOW_WORDS) {
            let tag_indices = self.infer_window(text, window)?;
            let tags: Vec<&str> = tag_indices
                .iter()
                .map(|&i| self.labels.get(i).map(String::as_str).unwrap_or("O"))
                .collect();

            for (category, value) in collapse_entities(text, window, &tags) {
                if self.allowed.iter().any(|a| *a == category) {
                    findings.insert(Finding::new(category, value));
                }
            }
        }

        Ok(findings)
    }
}

fn load_error(path: &Path, e: ort::Error) -> DetectError {
    DetectError::ModelLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn read_labels(path: &Path) -> Result<Vec<String>, DetectError> {
    let raw = fs::read_to_string(path).map_err(|e| DetectError::ModelLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let labels: Vec<String> = serde_json::from_str(&raw).map_err(|e| DetectError::ModelLoad {
        path: path.display().to_string(),
        reason: format!("invalid label list: {e}"),
    })?;
    if labels.is_empty() {
        return Err(DetectError::ModelLoad {
            path: path.display().to_string(),
            reason: "label list is empty".to_string(),
        });
    }
    Ok(labels)
}

/// Split text into word spans: runs of alphanumerics (plus '_'), by byte
/// offset.
pub(crate) fn word_spans(text: &str) -> Vec<WordSpan> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_alphanumeric() || c == '_' {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            spans.push(WordSpan { start: s, end: i });
        }
    }
    if let Some(s) = start {
        spans.push(WordSpan {
            start: s,
            end: text.len(),
        });
    }
    spans
}

/// FNV-1a hash of the lowercased word, folded into the vocab range and
/// offset past the reserved special ids.
pub(crate) fn hash_token_id(word: &str) -> u32 {
    let mut h: u32 = 0x811c_9dc5;
    for b in word.to_lowercase().as_bytes() {
        h ^= u32::from(*b);
        h = h.wrapping_mul(0x0100_0193);
    }
    1000 + (h % VOCAB_BUCKETS)
}

fn argmax(logits: &[f32]) -> usize {
    let mut best = 0;
    for (i, v) in logits.iter().enumerate() {
        if *v > logits[best] {
            best = i;
        }
    }
    best
}

/// Collapse per-word BIO tags into (category, text) entity pairs. An I- tag
/// without a matching open run starts a new one (tolerant decode).
pub(crate) fn collapse_entities(
    text: &str,
    words: &[WordSpan],
    tags: &[&str],
) -> Vec<(String, String)> {
    let mut entities = Vec::new();
    let mut current: Option<(String, usize, usize)> = None;

    for (word, tag) in words.iter().zip(tags) {
        match tag.split_once('-') {
            // I- tag continuing the open run of the same category.
            Some(("I", category)) if matches!(&current, Some((cat, _, _)) if cat.as_str() == category) => {
                if let Some((_, _, end)) = current.as_mut() {
                    *end = word.end;
                }
            }
            // B- tag, or an I- tag with no matching open run.
            Some((prefix, category)) if prefix == "B" || prefix == "I" => {
                if let Some((cat, start, end)) = current.take() {
                    entities.push((cat, text[start..end].to_string()));
                }
                current = Some((category.to_string(), word.start, word.end));
            }
            // O or anything unparseable closes the open run.
            _ => {
                if let Some((cat, start, end)) = current.take() {
                    entities.push((cat, text[start..end].to_string()));
                }
            }
        }
    }

    if let Some((cat, start, end)) = current {
        entities.push((cat, text[start..end].to_string()));
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_spans_offsets() {
        let text = "Call Jane O'Neil.";
        let spans = word_spans(text);
        let words: Vec<&str> = spans.iter().map(|s| &text[s.start..s.end]).collect();
        assert_eq!(words, vec!["Call", "Jane", "O", "Neil"]);
    }

    #[test]
    fn test_word_spans_handles_trailing_word() {
        let spans = word_spans("hello world");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].end, 11);
    }

    #[test]
    fn test_hash_token_is_deterministic_and_cased() {
        assert_eq!(hash_token_id("London"), hash_token_id("london"));
        assert!(hash_token_id("London") >= 1000);
        assert!(hash_token_id("London") < 1000 + VOCAB_BUCKETS);
    }

    #[test]
    fn test_collapse_multiword_entity() {
        let text = "Acme Corp hired John Ronald Smith";
        let words = word_spans(text);
        let tags = vec!["B-ORG", "I-ORG", "O", "B-PERSON", "I-PERSON", "I-PERSON"];

        let entities = collapse_entities(text, &words, &tags);
        assert_eq!(
            entities,
            vec![
                ("ORG".to_string(), "Acme Corp".to_string()),
                ("PERSON".to_string(), "John Ronald Smith".to_string()),
            ]
        );
    }

    #[test]
    fn test_collapse_adjacent_runs_split_on_b_tag() {
        let text = "Paris London";
        let words = word_spans(text);
        let tags = vec!["B-GPE", "B-GPE"];

        let entities = collapse_entities(text, &words, &tags);
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].1, "Paris");
        assert_eq!(entities[1].1, "London");
    }

    #[test]
    fn test_collapse_tolerates_dangling_i_tag() {
        let text = "visited Berlin";
        let words = word_spans(text);
        let tags = vec!["O", "I-GPE"];

        let entities = collapse_entities(text, &words, &tags);
        assert_eq!(entities, vec![("GPE".to_string(), "Berlin".to_string())]);
    }

    #[test]
    fn test_missing_model_dir_is_fatal() {
        let err = NerDetector::load(Path::new("/nonexistent/models"), &["PERSON".to_string()])
            .unwrap_err();
        assert!(matches!(err, DetectError::ModelLoad { .. }));
    }

    // Requires real model files; run with
    //   PIICHECKR_MODEL_DIR=... cargo test -- --ignored
    #[test]
    #[ignore]
    fn test_inference_tags_a_person() {
        let model_dir = std::env::var("PIICHECKR_MODEL_DIR").expect("PIICHECKR_MODEL_DIR not set");
        let detector = NerDetector::load(
            Path::new(&model_dir),
            &["PERSON".to_string(), "GPE".to_string(), "ORG".to_string()],
        )
        .unwrap();

        let findings = detector
            .detect("Barack Obama visited Berlin last spring.")
            .unwrap();
        assert!(findings.iter().any(|f| f.label == "PERSON"));
    }
}
