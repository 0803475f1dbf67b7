use ndarray::Array2;
use tokenizers::Tokenizer;

use super::error::ClassifierError;

/// Value used to fill sequences shorter than the model input length.
pub const PAD_ID: i64 = 0;

/// Turns text into the fixed-length id sequence the model was trained on.
///
/// The conversion mirrors a word-index tokenizer followed by post-padding:
/// 1. Tokenize the text with the loaded tokenizer; its normalizer is expected
///    to lowercase and strip punctuation the way the word index was built
/// 2. Drop out-of-vocabulary ids when an OOV token is configured
/// 3. Keep the first `max_sequence_length` ids and pad the tail with [`PAD_ID`]
pub(crate) trait TextSequencing {
    /// Returns the initialized tokenizer if available
    fn tokenizer(&self) -> Option<&Tokenizer>;

    /// Returns the fixed sequence length of the model input
    fn max_sequence_length(&self) -> Option<usize>;

    /// Id of the out-of-vocabulary token, if such ids should be skipped
    fn oov_token_id(&self) -> Option<u32>;

    /// Converts text into word ids without truncation or padding.
    ///
    /// # Errors
    /// - `TokenizerError` if the tokenizer is not initialized
    /// - `TokenizerError` if the text cannot be encoded
    fn text_to_sequence(&self, text: &str) -> Result<Vec<u32>, ClassifierError> {
        let tokenizer = self.tokenizer()
            .ok_or_else(|| ClassifierError::TokenizerError("Tokenizer not initialized".into()))?;

        let encoding = tokenizer.encode(text, false)
            .map_err(|e| ClassifierError::TokenizerError(e.to_string()))?;

        let oov = self.oov_token_id();
        Ok(encoding.get_ids()
            .iter()
            .copied()
            .filter(|&id| Some(id) != oov)
            .collect())
    }

    /// Converts text into a `[1, max_sequence_length]` model input.
    ///
    /// # Errors
    /// - Forwards all errors from `text_to_sequence()`
    /// - `TokenizerError` if the max sequence length is not set
    /// - `ModelError` if the input array cannot be shaped
    fn to_padded_sequence(&self, text: &str) -> Result<Array2<i64>, ClassifierError> {
        let max_length = self.max_sequence_length()
            .ok_or_else(|| ClassifierError::TokenizerError("Max sequence length not set".into()))?;

        let ids = self.text_to_sequence(text)?;
        if ids.len() > max_length {
            log::debug!("Truncating sequence of {} tokens to {}", ids.len(), max_length);
        }

        Array2::from_shape_vec((1, max_length), pad_sequence(&ids, max_length))
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create input array: {}", e)))
    }
}

/// Keeps the first `max_length` ids and fills the remainder with [`PAD_ID`].
pub fn pad_sequence(ids: &[u32], max_length: usize) -> Vec<i64> {
    let mut padded: Vec<i64> = ids.iter()
        .take(max_length)
        .map(|&id| i64::from(id))
        .collect();
    padded.resize(max_length, PAD_ID);
    padded
}

/// Resolves the id of an out-of-vocabulary token in the tokenizer vocabulary.
pub(crate) fn resolve_oov_id(tokenizer: &Tokenizer, oov_token: &str) -> Result<u32, ClassifierError> {
    tokenizer.token_to_id(oov_token)
        .ok_or_else(|| ClassifierError::ValidationError(
            format!("OOV token '{}' is not part of the tokenizer vocabulary", oov_token)
        ))
}

/// Guards against vocabularies that do not fit the model's integer input.
pub(crate) fn check_vocab_size(tokenizer: &Tokenizer) -> Result<usize, ClassifierError> {
    let size = tokenizer.get_vocab_size(true);
    i64::try_from(size)
        .map_err(|_| ClassifierError::TokenizerError("Vocabulary size exceeds system limits".into()))?;
    Ok(size)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use tokenizers::Tokenizer;

    /// A word-level vocabulary in the shape a word-index tokenizer exports to:
    /// lowercased, punctuation replaced by spaces, split on whitespace.
    pub(crate) const TOKENIZER_JSON: &str = r#"{
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
                "tidur": 8
            },
            "unk_token": "<OOV>"
        }
    }"#;

    pub(crate) fn test_tokenizer() -> Tokenizer {
        Tokenizer::from_bytes(TOKENIZER_JSON.as_bytes()).expect("fixture tokenizer must parse")
    }
}
