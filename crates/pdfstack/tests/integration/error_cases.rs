//! Integration tests for error handling and edge cases.

use pdfstack::MergeSession;
use pdfstack::admission::{AdmissionFilter, RawInput};
use pdfstack::codec::PdfCodec;
use pdfstack::error::PdfStackError;
use tempfile::TempDir;

use crate::common::{pdf_input, pdf_with_pages, write_file};

fn names(session: &MergeSession<PdfCodec>) -> Vec<String> {
    session
        .current_order()
        .iter()
        .map(|d| d.display_name().to_string())
        .collect()
}

#[tokio::test]
async fn test_single_document_is_insufficient() {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![pdf_input("only.pdf", pdf_with_pages(&[100]))]);

    let err = session.merge().await.unwrap_err();
    assert!(matches!(
        err,
        PdfStackError::InsufficientInput {
            required: 2,
            actual: 1
        }
    ));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(names(&session), vec!["only.pdf"]);
    assert!(session.last_error().is_some());
    assert!(session.current_artifact().is_none());
}

#[tokio::test]
async fn test_empty_collection_is_insufficient() {
    let mut session = MergeSession::new(PdfCodec::new());
    let err = session.merge().await.unwrap_err();
    assert!(matches!(
        err,
        PdfStackError::InsufficientInput { actual: 0, .. }
    ));
}

#[tokio::test]
async fn test_malformed_second_document() {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("good.pdf", pdf_with_pages(&[100])),
        pdf_input("broken.pdf", b"this is not a pdf body".to_vec()),
    ]);

    let err = session.merge().await.unwrap_err();
    match &err {
        PdfStackError::Decode { name, .. } => assert_eq!(name, "broken.pdf"),
        other => panic!("expected decode error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 3);

    assert!(session.current_artifact().is_none());
    assert_eq!(names(&session), vec!["good.pdf", "broken.pdf"]);

    let message = session.last_error().unwrap();
    assert!(message.contains("broken.pdf"));
    assert!(message.contains("Remove or replace"));
}

#[tokio::test]
async fn test_fix_by_removing_offending_document() {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[100])),
        pdf_input("broken.pdf", b"garbage".to_vec()),
        pdf_input("b.pdf", pdf_with_pages(&[200])),
    ]);
    assert!(session.merge().await.is_err());

    let broken = session.current_order()[1].id();
    session.remove(&broken);

    assert!(session.merge().await.is_ok());
    assert!(session.last_error().is_none());
}

#[tokio::test]
async fn test_input_deleted_after_admission() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.pdf", &pdf_with_pages(&[100]));
    let b = write_file(dir.path(), "b.pdf", &pdf_with_pages(&[200]));

    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        RawInput::from_path(&a).await.unwrap(),
        RawInput::from_path(&b).await.unwrap(),
    ]);
    std::fs::remove_file(&b).unwrap();

    let err = session.merge().await.unwrap_err();
    assert!(matches!(err, PdfStackError::ReadFailed { ref name, .. } if name == "b.pdf"));
    assert_eq!(names(&session), vec!["a.pdf", "b.pdf"]);
}

#[tokio::test]
async fn test_missing_input_path() {
    let dir = TempDir::new().unwrap();
    let err = RawInput::from_path(&dir.path().join("missing.pdf"))
        .await
        .unwrap_err();
    assert!(matches!(err, PdfStackError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_admission_skips_other_media_types() {
    let admitted = AdmissionFilter::pdf().admit(vec![
        pdf_input("first.pdf", pdf_with_pages(&[100])),
        RawInput::from_bytes("photo.png", "image/png", vec![0x89, b'P', b'N', b'G']),
        pdf_input("second.pdf", pdf_with_pages(&[200])),
    ]);

    let names: Vec<&str> = admitted.iter().map(|d| d.display_name()).collect();
    assert_eq!(names, vec!["first.pdf", "second.pdf"]);
}

#[test]
fn test_admitting_only_unsupported_inputs() {
    let mut session = MergeSession::new(PdfCodec::new());
    let count = session.admit(vec![RawInput::from_bytes(
        "notes.txt",
        "text/plain",
        b"hello".to_vec(),
    )]);

    assert_eq!(count, 0);
    assert!(session.current_order().is_empty());
    assert!(session.last_error().is_none());
}

#[test]
fn test_out_of_range_move_changes_nothing() {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[100])),
        pdf_input("b.pdf", pdf_with_pages(&[200])),
    ]);

    let err = session.move_to(0, 5).unwrap_err();
    assert!(matches!(err, PdfStackError::InvalidMove { index: 5, len: 2 }));
    assert_eq!(names(&session), vec!["a.pdf", "b.pdf"]);
}
