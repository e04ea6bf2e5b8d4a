//! Integration tests for the artifact lifecycle.

use pdfstack::MergeSession;
use pdfstack::codec::PdfCodec;

use crate::common::{page_widths, pdf_input, pdf_with_pages};

fn session_with_two_documents() -> MergeSession<PdfCodec> {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[100])),
        pdf_input("b.pdf", pdf_with_pages(&[200])),
    ]);
    session
}

#[tokio::test]
async fn test_second_merge_revokes_first_artifact() {
    let mut session = session_with_two_documents();

    let first = session.merge().await.unwrap();
    session.move_to(1, 0).unwrap();
    let second = session.merge().await.unwrap();

    assert_ne!(first.id(), second.id());
    assert!(session.resolve_artifact(&first).is_none());
    assert_eq!(session.current_artifact(), Some(&second));

    let bytes = session.resolve_artifact(&second).unwrap();
    assert_eq!(page_widths(&bytes), vec![200, 100]);
}

#[tokio::test]
async fn test_reset_revokes_and_clears() {
    let mut session = session_with_two_documents();
    session.set_requested_name("report");
    let handle = session.merge().await.unwrap();

    session.reset();

    assert!(session.resolve_artifact(&handle).is_none());
    assert!(session.current_artifact().is_none());
    assert!(session.current_order().is_empty());
    assert_eq!(session.requested_name(), "");
    assert!(!session.can_merge());
}

#[tokio::test]
async fn test_explicit_revoke_is_idempotent() {
    let mut session = session_with_two_documents();
    let handle = session.merge().await.unwrap();

    assert!(session.revoke_artifact(&handle));
    assert!(!session.revoke_artifact(&handle));
    assert!(session.current_artifact().is_none());
}

#[tokio::test]
async fn test_artifact_describes_merge() {
    let mut session = session_with_two_documents();
    session.set_requested_name("  quarterly report ");
    let handle = session.merge().await.unwrap();

    assert_eq!(handle.suggested_name(), "quarterly report.pdf");
    assert!(handle.uri().ends_with("/quarterly report.pdf"));

    let stats = session.artifact_statistics(&handle).unwrap();
    assert_eq!(stats.files_merged, 2);
    assert_eq!(stats.total_pages, 2);
    assert_eq!(stats.output_size, handle.len() as u64);
}

#[tokio::test]
async fn test_default_name_is_eight_digit_date() {
    let mut session = session_with_two_documents();
    let handle = session.merge().await.unwrap();

    let name = handle.suggested_name();
    let (base, extension) = name.split_once('.').unwrap();
    assert_eq!(extension, "pdf");
    assert_eq!(base.len(), 8);
    assert!(base.chars().all(|c| c.is_ascii_digit()));
}
