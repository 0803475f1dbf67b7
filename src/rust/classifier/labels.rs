use std::collections::HashMap;

use lazy_static::lazy_static;

/// Class labels in model output order.
pub const CLASS_NAMES: [&str; 6] = [
    "Borderline Personality Disorder (BPD)",
    "Bipolar",
    "Depression",
    "Anxiety",
    "Schizophrenia",
    "Mentalillness",
];

pub const NUM_CLASSES: usize = CLASS_NAMES.len();

lazy_static! {
    /// Static first-step recommendation shown for each predicted class.
    pub static ref RECOMMENDATIONS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::with_capacity(NUM_CLASSES);
        m.insert(
            CLASS_NAMES[0],
            "Lakukan terapi reguler, pelajari manajemen emosi, dan jaga hubungan interpersonal yang sehat.",
        );
        m.insert(
            CLASS_NAMES[1],
            "Jaga pola tidur dan aktivitas harian, dan konsultasikan dengan psikiater untuk pengobatan dan terapi.",
        );
        m.insert(
            CLASS_NAMES[2],
            "Coba aktivitas fisik ringan, jaga komunikasi sosial, dan pertimbangkan bantuan profesional.",
        );
        m.insert(
            CLASS_NAMES[3],
            "Latihan pernapasan, mindfulness, dan hindari konsumsi kafein berlebihan. Konsultasi jika cemas berkepanjangan.",
        );
        m.insert(
            CLASS_NAMES[4],
            "Terapi dan pengobatan rutin sangat penting. Dukungan keluarga dan lingkungan aman sangat membantu.",
        );
        m.insert(
            CLASS_NAMES[5],
            "Langkah awal seperti journaling, curhat, dan konsultasi psikolog bisa membantu mengidentifikasi masalah.",
        );
        m
    };
}

/// Maps a model output index to its class label.
pub fn label_for_index(index: usize) -> Option<&'static str> {
    CLASS_NAMES.get(index).copied()
}

pub fn recommendation_for(label: &str) -> Option<&'static str> {
    RECOMMENDATIONS.get(label).copied()
}
