#![allow(dead_code)]

pub mod onnx;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ndarray::Array2;
use nervease::{Classifier, ClassifierError, SequenceModel, NUM_CLASSES};
use tokenizers::Tokenizer;

pub const TOKENIZER_JSON: &str = r#"{
    "version": "1.0",
    "truncation": null,
    "padding": null,
    "added_tokens": [],
    "normalizer": {
        "type": "Sequence",
        "normalizers": [
            { "type": "Lowercase" },
            { "type": "Replace", "pattern": { "Regex": "[^\\w\\s]" }, "content": " " }
        ]
    },
    "pre_tokenizer": { "type": "Whitespace" },
    "post_processor": null,
    "decoder": null,
    "model": {
        "type": "WordLevel",
        "vocab": {
            "[PAD]": 0,
            "<OOV>": 1,
            "saya": 2,
            "merasa": 3,
            "sedih": 4,
            "cemas": 5,
            "tidak": 6,
            "bisa": 7,
            "tidur": 8,
            "halusinasi": 9,
            "marah": 10
        },
        "unk_token": "<OOV>"
    }
}"#;

pub fn tokenizer() -> Tokenizer {
    Tokenizer::from_bytes(TOKENIZER_JSON.as_bytes()).expect("fixture tokenizer must parse")
}

/// Scores classes by the first keyword id found in the sequence, standing in
/// for a trained network.
#[derive(Debug, Default)]
pub struct KeywordModel {
    pub calls: AtomicUsize,
}

impl KeywordModel {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SequenceModel for KeywordModel {
    fn predict_proba(&self, input: &Array2<i64>) -> Result<Vec<f32>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let class = input.row(0).iter().find_map(|&id| match id {
            10 => Some(0), // marah
            8 => Some(1),  // tidur
            4 => Some(2),  // sedih
            5 => Some(3),  // cemas
            9 => Some(4),  // halusinasi
            _ => None,
        }).unwrap_or(5);

        let mut scores = vec![0.02; NUM_CLASSES];
        scores[class] = 0.9;
        Ok(scores)
    }
}

/// A model whose every forward pass fails.
#[derive(Debug, Default)]
pub struct BrokenModel {
    pub armed: std::sync::atomic::AtomicBool,
}

impl SequenceModel for BrokenModel {
    fn predict_proba(&self, _input: &Array2<i64>) -> Result<Vec<f32>, ClassifierError> {
        if self.armed.load(Ordering::SeqCst) {
            return Err(ClassifierError::ModelError("Failed to run model: device lost".into()));
        }
        Ok(vec![1.0 / NUM_CLASSES as f32; NUM_CLASSES])
    }
}

pub fn classifier_with(model: Arc<dyn SequenceModel>) -> Classifier {
    Classifier::builder()
        .with_tokenizer(tokenizer())
        .and_then(|b| b.with_model(model))
        .map(|b| b.with_oov_token("<OOV>"))
        .and_then(|b| b.build())
        .expect("Failed to create classifier")
}
