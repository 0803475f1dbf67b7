//! Writes tiny ONNX graphs so the ONNX Runtime path can be exercised without
//! shipping a binary model in the repository.
//!
//! Each graph multiplies the padded id row by a `[sequence_length, 6]` weight
//! matrix and applies a softmax. Only the first row of the weights is set, with
//! `W[0][j] = j`, so the logits are `first_id * j`.

use nervease::NUM_CLASSES;

const ELEM_FLOAT: u64 = 1;
const ELEM_INT64: u64 = 7;
const ATTR_INT: u64 = 2;

const WIRE_VARINT: u64 = 0;
const WIRE_LEN: u64 = 2;

/// Shape of the graph built by [`model_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Graph {
    /// `float32 [1, len]` input
    FloatInput,
    /// `int64 [1, len]` input, cast to float before the matmul
    Int64Input,
    /// `float32 [1, len]` input duplicated into two rows, giving a `[2, 6]` output
    TwoRows,
}

#[derive(Default)]
struct Message(Vec<u8>);

impl Message {
    fn varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.0.push((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        self.0.push(value as u8);
    }

    fn key(&mut self, field: u64, wire: u64) {
        self.varint((field << 3) | wire);
    }

    fn int(mut self, field: u64, value: u64) -> Self {
        self.key(field, WIRE_VARINT);
        self.varint(value);
        self
    }

    fn bytes(mut self, field: u64, data: &[u8]) -> Self {
        self.key(field, WIRE_LEN);
        self.varint(data.len() as u64);
        self.0.extend_from_slice(data);
        self
    }

    fn string(self, field: u64, value: &str) -> Self {
        self.bytes(field, value.as_bytes())
    }

    fn message(self, field: u64, inner: Message) -> Self {
        self.bytes(field, &inner.0)
    }
}

fn tensor_info(name: &str, elem_type: u64, dims: &[u64]) -> Message {
    let shape = dims.iter().fold(Message::default(), |shape, &d| {
        shape.message(1, Message::default().int(1, d))
    });
    let tensor_type = Message::default().int(1, elem_type).message(2, shape);
    Message::default()
        .string(1, name)
        .message(2, Message::default().message(1, tensor_type))
}

fn node(op_type: &str, inputs: &[&str], output: &str, attributes: Vec<Message>) -> Message {
    let node = inputs.iter().fold(Message::default(), |node, input| node.string(1, input));
    let node = node.string(2, output).string(3, output).string(4, op_type);
    attributes.into_iter().fold(node, |node, attribute| node.message(5, attribute))
}

fn int_attribute(name: &str, value: u64) -> Message {
    Message::default().string(1, name).int(3, value).int(20, ATTR_INT)
}

fn weights(sequence_length: usize) -> Message {
    let mut raw = Vec::with_capacity(sequence_length * NUM_CLASSES * 4);
    for row in 0..sequence_length {
        for class in 0..NUM_CLASSES {
            let w = if row == 0 { class as f32 } else { 0.0 };
            raw.extend_from_slice(&w.to_le_bytes());
        }
    }
    Message::default()
        .int(1, sequence_length as u64)
        .int(1, NUM_CLASSES as u64)
        .int(2, ELEM_FLOAT)
        .string(8, "weights")
        .bytes(9, &raw)
}

/// Serializes an ONNX model for `sequence_length`-long inputs.
pub fn model_bytes(graph: Graph, sequence_length: usize) -> Vec<u8> {
    let len = sequence_length as u64;
    let classes = NUM_CLASSES as u64;

    let (input_type, rows, mut nodes) = match graph {
        Graph::FloatInput => (ELEM_FLOAT, 1, Vec::new()),
        Graph::Int64Input => (
            ELEM_INT64,
            1,
            vec![node("Cast", &["ids"], "features", vec![int_attribute("to", ELEM_FLOAT)])],
        ),
        Graph::TwoRows => (
            ELEM_FLOAT,
            2,
            vec![node("Concat", &["ids", "ids"], "features", vec![int_attribute("axis", 0)])],
        ),
    };
    let features = if nodes.is_empty() { "ids" } else { "features" };
    nodes.push(node("MatMul", &[features, "weights"], "logits", Vec::new()));
    nodes.push(node("Softmax", &["logits"], "probabilities", Vec::new()));

    let graph = nodes.into_iter()
        .fold(Message::default(), |g, n| g.message(1, n))
        .string(2, "sequence_classifier")
        .message(5, weights(sequence_length))
        .message(11, tensor_info("ids", input_type, &[1, len]))
        .message(12, tensor_info("probabilities", ELEM_FLOAT, &[rows, classes]));

    Message::default()
        .int(1, 8)
        .string(2, "nervease-tests")
        .message(7, graph)
        .message(8, Message::default().string(1, "").int(2, 13))
        .0
}
