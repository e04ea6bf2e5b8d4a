//! Integration tests for order-preserving merges.

use pdfstack::MergeSession;
use pdfstack::admission::RawInput;
use pdfstack::codec::PdfCodec;
use pdfstack::config::{CompressionLevel, Metadata};
use pdfstack::io::ArtifactWriter;
use pdfstack::merge::MetadataManager;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{
    every_page_has_font, page_tree_nodes, page_widths, pdf_input, pdf_with_inherited_attributes,
    pdf_with_internal_link, pdf_with_pages, pdf_without_pages, write_file,
};

async fn merged_widths(session: &mut MergeSession<PdfCodec>) -> Vec<i64> {
    let handle = session.merge().await.expect("merge failed");
    let bytes = session
        .resolve_artifact(&handle)
        .expect("artifact was revoked");
    page_widths(&bytes)
}

#[tokio::test]
async fn test_two_documents_in_admission_order() {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[100])),
        pdf_input("b.pdf", pdf_with_pages(&[200])),
    ]);

    assert_eq!(merged_widths(&mut session).await, vec![100, 200]);
}

#[tokio::test]
async fn test_reordered_before_merge() {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[100])),
        pdf_input("b.pdf", pdf_with_pages(&[200])),
    ]);
    session.move_to(1, 0).unwrap();

    assert_eq!(merged_widths(&mut session).await, vec![200, 100]);
}

#[tokio::test]
async fn test_pages_keep_document_order() {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[101, 102, 103])),
        pdf_input("b.pdf", pdf_with_pages(&[201, 202])),
    ]);
    assert_eq!(
        merged_widths(&mut session).await,
        vec![101, 102, 103, 201, 202]
    );

    session.move_to(0, 1).unwrap();
    assert_eq!(
        merged_widths(&mut session).await,
        vec![201, 202, 101, 102, 103]
    );
}

#[tokio::test]
async fn test_same_document_twice() {
    let bytes = pdf_with_pages(&[100, 150]);
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("a.pdf", bytes.clone()),
        pdf_input("a.pdf", bytes),
    ]);

    assert_eq!(session.current_order().len(), 2);
    assert_eq!(merged_widths(&mut session).await, vec![100, 150, 100, 150]);
}

#[tokio::test]
async fn test_drag_then_merge() {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[100])),
        pdf_input("b.pdf", pdf_with_pages(&[200])),
        pdf_input("c.pdf", pdf_with_pages(&[300])),
    ]);

    session.begin_drag(2).unwrap();
    session.drag_over(1).unwrap();
    session.drag_over(0).unwrap();
    session.end_drag();

    assert_eq!(merged_widths(&mut session).await, vec![300, 100, 200]);
}

#[tokio::test]
async fn test_removed_document_is_skipped() {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[100])),
        pdf_input("b.pdf", pdf_with_pages(&[200])),
        pdf_input("c.pdf", pdf_with_pages(&[300])),
    ]);
    let b = session.current_order()[1].id();
    session.remove(&b);

    assert_eq!(merged_widths(&mut session).await, vec![100, 300]);
}

#[tokio::test]
async fn test_inherited_attributes_survive_merge() {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[100])),
        pdf_input("inherited.pdf", pdf_with_inherited_attributes(333)),
    ]);

    let handle = session.merge().await.unwrap();
    let bytes = session.resolve_artifact(&handle).unwrap();
    assert_eq!(page_widths(&bytes), vec![100, 333]);
    assert!(every_page_has_font(&bytes));
}

#[tokio::test]
async fn test_zero_page_document_contributes_nothing() {
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[100])),
        pdf_input("empty.pdf", pdf_without_pages()),
        pdf_input("b.pdf", pdf_with_pages(&[200])),
    ]);

    assert_eq!(merged_widths(&mut session).await, vec![100, 200]);
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_order_independent_of_compression(#[case] compression: CompressionLevel) {
    let mut session = MergeSession::new(PdfCodec::new().with_compression(compression));
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[110, 120])),
        pdf_input("b.pdf", pdf_with_pages(&[210])),
    ]);
    session.move_to(1, 0).unwrap();

    let handle = session.merge().await.unwrap();
    let bytes = session.resolve_artifact(&handle).unwrap();
    assert_eq!(page_widths(&bytes), vec![210, 110, 120]);
    assert!(every_page_has_font(&bytes));
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_internal_links_keep_single_page_tree(#[case] compression: CompressionLevel) {
    let mut session = MergeSession::new(PdfCodec::new().with_compression(compression));
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_internal_link(101, 102)),
        pdf_input("b.pdf", pdf_with_internal_link(201, 202)),
    ]);
    session.move_to(1, 0).unwrap();

    let handle = session.merge().await.unwrap();
    let bytes = session.resolve_artifact(&handle).unwrap();
    assert_eq!(page_widths(&bytes), vec![201, 202, 101, 102]);
    assert_eq!(page_tree_nodes(&bytes), 1);
}

#[tokio::test]
async fn test_metadata_written_to_output() {
    let metadata = Metadata::new(Some("Combined".to_string()), None, None, None);
    let mut session = MergeSession::new(PdfCodec::new().with_metadata(metadata));
    session.admit(vec![
        pdf_input("a.pdf", pdf_with_pages(&[100])),
        pdf_input("b.pdf", pdf_with_pages(&[200])),
    ]);

    let handle = session.merge().await.unwrap();
    let bytes = session.resolve_artifact(&handle).unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();

    let read_back = MetadataManager::new().get_metadata(&doc);
    assert_eq!(read_back.title.as_deref(), Some("Combined"));
}

#[tokio::test]
async fn test_files_on_disk_to_written_artifact() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.pdf", &pdf_with_pages(&[100, 101]));
    let b = write_file(dir.path(), "b.PDF", &pdf_with_pages(&[200]));
    let notes = write_file(dir.path(), "notes.txt", b"not a pdf");

    let mut inputs = Vec::new();
    for path in [&b, &notes, &a] {
        inputs.push(RawInput::from_path(path).await.unwrap());
    }

    let mut session = MergeSession::new(PdfCodec::new());
    assert_eq!(session.admit(inputs), 2);
    session.set_requested_name("bundle");

    let handle = session.merge().await.unwrap();
    assert_eq!(handle.suggested_name(), "bundle.pdf");

    let output = dir.path().join(handle.suggested_name());
    let bytes = session.resolve_artifact(&handle).unwrap();
    let stats = ArtifactWriter::new().write(bytes, &output).await.unwrap();

    assert_eq!(stats.file_size, handle.len() as u64);
    assert_eq!(
        page_widths(&std::fs::read(&output).unwrap()),
        vec![200, 100, 101]
    );
}
