#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfstack::MergeSession;
use pdfstack::admission::{PDF_MEDIA_TYPE, RawInput};
use pdfstack::codec::PdfCodec;
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| Builder::new_current_thread().enable_all().build().unwrap())
}

// Arbitrary bytes split in two declared PDFs: a merge either succeeds with a
// live artifact or fails leaving the order intact and no artifact.
fuzz_target!(|data: &[u8]| {
    let split = data.len() / 2;
    let mut session = MergeSession::new(PdfCodec::new());
    session.admit(vec![
        RawInput::from_bytes("first.pdf", PDF_MEDIA_TYPE, data[..split].to_vec()),
        RawInput::from_bytes("second.pdf", PDF_MEDIA_TYPE, data[split..].to_vec()),
    ]);

    match runtime().block_on(session.merge()) {
        Ok(handle) => assert!(session.resolve_artifact(&handle).is_some()),
        Err(_) => {
            assert!(session.current_artifact().is_none());
            assert_eq!(session.current_order().len(), 2);
            assert!(session.last_error().is_some());
        }
    }
});
