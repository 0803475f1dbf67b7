//! Server-side rendering of the single NervEase page.

use std::fmt::Write;

use crate::classifier::Prediction;

pub const PAGE_TITLE: &str = "NervEase – Deteksi Awal Kesehatan Mental";

/// What to show below the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Validation message, no prediction was attempted
    Warning(String),
    /// A successful prediction
    Result(Prediction),
    /// A downstream failure
    Failure(String),
}

/// Everything the page needs to render one response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    /// Text echoed back into the text area
    pub input: String,
    pub outcome: Option<Outcome>,
}

impl PageView {
    pub fn with_outcome(input: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            input: input.into(),
            outcome: Some(outcome),
        }
    }
}

/// Escapes text for use in HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render(view: &PageView) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str(HEAD);
    html.push_str(INTRO);

    let _ = write!(
        html,
        r#"<h3>📝 Masukkan Curhatan Anda</h3>
<form method="post" action="/">
<textarea name="text" rows="6" placeholder="Contoh: Saya merasa tertekan, tidak punya semangat, dan tidak bisa tidur...">{}</textarea>
<button type="submit">🔍 Prediksi Sekarang</button>
</form>
"#,
        escape_html(&view.input)
    );

    match &view.outcome {
        None => {}
        Some(Outcome::Warning(message)) => {
            let _ = writeln!(html, r#"<div class="box warning">⚠️ {}</div>"#, escape_html(message));
        }
        Some(Outcome::Result(prediction)) => {
            let _ = write!(
                html,
                r#"<hr>
<h2>🔎 Hasil Analisis</h2>
<div class="box success">Jenis Gangguan Mental: <b>{}</b> ({:.2}%)</div>
<div class="box info">💡 Rekomendasi:<br>{}</div>
"#,
                escape_html(&prediction.label),
                prediction.confidence,
                escape_html(&prediction.recommendation)
            );
        }
        Some(Outcome::Failure(message)) => {
            let _ = writeln!(html, r#"<div class="box error">❌ {}</div>"#, escape_html(message));
        }
    }

    html.push_str(FOOTER);
    html
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="id">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>NervEase – Deteksi Awal Kesehatan Mental</title>
<style>
body { max-width: 730px; margin: 0 auto; padding: 2rem 1rem; font-family: sans-serif; }
textarea { width: 100%; box-sizing: border-box; font: inherit; }
button { margin-top: .5rem; padding: .5rem 1rem; font: inherit; }
.center { text-align: center; }
.box { margin: 1rem 0; padding: 1rem; border-radius: .5rem; }
.warning { background: #fffce7; color: #926c05; }
.success { background: #ecf9f1; color: #177233; }
.info { background: #e8f1fb; color: #004280; }
.error { background: #fdeded; color: #7d1a1a; }
</style>
</head>
<body>
"#;

const INTRO: &str = r#"<h1 class="center">🧠 NervEase</h1>
<p class="center" style="font-size: 18px;">Selamat datang di <b>NervEase</b> – platform skrining awal kesehatan mental berbasis AI.<br>Tuliskan curhatan atau deskripsi singkat tentang perasaan dan kondisi mental Anda saat ini.<br>Sistem akan memprediksi kemungkinan gangguan mental dan memberikan rekomendasi awal penanganan.</p>
<hr>
"#;

const FOOTER: &str = r#"<hr>
<p class="center" style="font-size: 14px;">NervEase © 2025 – Untuk Kesehatan Mental yang Lebih Baik</p>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction() -> Prediction {
        Prediction {
            label: "Anxiety".into(),
            confidence: 87.654,
            recommendation: "Latihan pernapasan".into(),
            probabilities: vec![("Anxiety".into(), 0.87654)],
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<b>"a" & 'b'</b>"#), "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;");
        assert_eq!(escape_html("biasa saja"), "biasa saja");
    }

    #[test]
    fn test_empty_page_has_form_and_no_result() {
        let html = render(&PageView::default());
        assert!(html.contains(PAGE_TITLE));
        assert!(html.contains(r#"<textarea name="text""#));
        assert!(html.contains("Prediksi Sekarang"));
        assert!(!html.contains("Hasil Analisis"));
        assert!(!html.contains("box warning"));
    }

    #[test]
    fn test_result_page() {
        let html = render(&PageView::with_outcome("aku cemas", Outcome::Result(prediction())));
        assert!(html.contains("Jenis Gangguan Mental: <b>Anxiety</b> (87.65%)"));
        assert!(html.contains("💡 Rekomendasi:<br>Latihan pernapasan"));
        assert!(html.contains(">aku cemas</textarea>"));
    }

    #[test]
    fn test_warning_page() {
        let html = render(&PageView::with_outcome("  ", Outcome::Warning("Masukkan tidak boleh kosong.".into())));
        assert!(html.contains("⚠️ Masukkan tidak boleh kosong."));
        assert!(!html.contains("Hasil Analisis"));
    }

    #[test]
    fn test_user_input_is_escaped() {
        let html = render(&PageView::with_outcome(
            "</textarea><script>alert(1)</script>",
            Outcome::Failure("<oops>".into()),
        ));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;"));
        assert!(html.contains("❌ &lt;oops&gt;"));
    }
}
