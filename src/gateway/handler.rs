use axum::{
    Json,
    extract::{Multipart, State, multipart::Field},
};
use tracing::{debug, instrument, warn};

use crate::extract::TextExtractor;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{AnalyzeResponse, UploadedFile};
use crate::gateway::state::HandlerState;
use crate::scoring::StudentResult;
use crate::segment::split_answers;

/// `POST /analyze`: compare every student upload against the teacher's
/// answer key.
///
/// Validation happens in a fixed order so clients get a stable message for
/// each failure mode: missing teacher field, then empty student list, then a
/// teacher document with no recoverable answers. The key is embedded exactly
/// once; students are processed sequentially in upload order and each one
/// degrades independently, so the response always carries one result per
/// student.
#[instrument(
    skip(state, multipart),
    fields(students = tracing::field::Empty, key_answers = tracing::field::Empty)
)]
pub async fn analyze_handler<E>(
    State(state): State<HandlerState<E>>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, GatewayError>
where
    E: TextExtractor + 'static,
{
    let (teacher, students) = collect_uploads(multipart).await?;

    let teacher = teacher.ok_or(GatewayError::TeacherKeyMissing)?;
    if students.is_empty() {
        return Err(GatewayError::NoStudentFiles);
    }
    tracing::Span::current().record("students", students.len());

    let key_text = state.extractor.extract_text(&teacher.bytes);
    let key_answers = split_answers(&key_text);
    if key_answers.is_empty() {
        return Err(GatewayError::TeacherKeyUnreadable);
    }
    tracing::Span::current().record("key_answers", key_answers.len());

    debug!(pdf = %teacher.name, answers = key_answers.len(), "Answer key segmented");

    // Embedded once, reused for every student in the batch.
    let key_vectors = state.embedder.embed_batch(&key_answers)?;

    let mut results = Vec::with_capacity(students.len());
    for student in students {
        results.push(score_student(&state, &key_vectors, student));
    }

    Ok(Json(AnalyzeResponse::new(results)))
}

/// Scores one student upload against the already-embedded answer key.
///
/// Never fails: a document with no scoreable answers, and any embedding
/// failure, degrade to [`StudentResult::empty`] so a single bad upload
/// cannot sink the rest of the batch.
pub(crate) fn score_student<E>(
    state: &HandlerState<E>,
    key_vectors: &[Vec<f32>],
    student: UploadedFile,
) -> StudentResult
where
    E: TextExtractor + 'static,
{
    let text = state.extractor.extract_text(&student.bytes);
    let answers = split_answers(&text);
    if answers.is_empty() {
        debug!(pdf = %student.name, "No scoreable answers in student upload");
        return StudentResult::empty(student.name);
    }

    let vectors = match state.embedder.embed_batch(&answers) {
        Ok(vectors) => vectors,
        Err(e) => {
            warn!(pdf = %student.name, error = %e, "Embedding student answers failed");
            return StudentResult::empty(student.name);
        }
    };

    state
        .scorer
        .score_pairs(key_vectors, &vectors)
        .into_student_result(student.name)
}

/// Drains the multipart form into the teacher key and the student uploads.
///
/// The first `teacher` field wins if the form repeats it; `students` fields
/// keep their order. Unknown fields are skipped.
pub async fn collect_uploads(
    mut multipart: Multipart,
) -> Result<(Option<UploadedFile>, Vec<UploadedFile>), GatewayError> {
    let mut teacher = None;
    let mut students = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "teacher" => {
                let file = read_field(field).await?;
                if teacher.is_none() {
                    teacher = Some(file);
                }
            }
            "students" => students.push(read_field(field).await?),
            other => debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    Ok((teacher, students))
}

async fn read_field(field: Field<'_>) -> Result<UploadedFile, GatewayError> {
    let name = field.file_name().unwrap_or_default().to_string();
    let bytes = field.bytes().await?;
    Ok(UploadedFile { name, bytes })
}
