//! Answer texts and generated-PDF fixtures shared across suites.

/// Answer key with two well-formed answers.
pub const KEY_TEXT: &str = "1. Photosynthesis converts light energy into \
     chemical energy inside chloroplasts. 2. Mitochondria produce ATP through \
     cellular respiration.";

/// Submission with different wording for both answers.
pub const OTHER_TEXT: &str = "1. Plants use sunlight to build sugars during \
     photosynthesis reactions. 2. The cell nucleus stores genetic material as \
     chromosomes.";

/// Short and marker-free, so segmentation recovers nothing from it.
pub const UNREADABLE_TEXT: &str = "scanned page";

/// Builds a one-page PDF with `text` as a single embedded text run.
///
/// Plain PDF 1.4 with an uncompressed content stream and a classic xref
/// table, which is all the direct extraction path needs. `text` must be
/// ASCII to survive the Helvetica standard encoding.
pub fn minimal_pdf(text: &str) -> Vec<u8> {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)");
    let content = format!("BT /F1 12 Tf 72 720 Td ({escaped}) Tj ET");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{body}\nendobj\n", index + 1));
    }

    let xref_offset = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    pdf.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF",
        objects.len() + 1
    ));

    pdf.into_bytes()
}
