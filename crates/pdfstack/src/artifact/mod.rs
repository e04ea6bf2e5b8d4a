//! Artifact lifecycle.
//!
//! A successful merge publishes its bytes as the single live artifact. The
//! host addresses it through an [`ArtifactHandle`] for download or preview.
//! Publishing a new artifact revokes the previous one, and revoking releases
//! the bytes. At most one artifact is alive at any time.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::merge::{MergeResult, MergeStatistics};

/// Identity of a published artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactId(Uuid);

impl ArtifactId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Descriptor of a published artifact.
///
/// Holding a handle does not keep the bytes alive; once revoked it resolves
/// to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHandle {
    id: ArtifactId,
    suggested_name: String,
    len: usize,
}

impl ArtifactHandle {
    /// Identity of the artifact.
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    /// File name suggested for downloads.
    pub fn suggested_name(&self) -> &str {
        &self.suggested_name
    }

    /// Size of the artifact in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the artifact has no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Address of the artifact, `artifact:<id>/<suggested name>`.
    pub fn uri(&self) -> String {
        format!("artifact:{}/{}", self.id, self.suggested_name)
    }
}

#[derive(Debug)]
struct LiveArtifact {
    handle: ArtifactHandle,
    bytes: Arc<[u8]>,
    statistics: MergeStatistics,
}

/// Owner of the single live artifact.
#[derive(Debug, Default)]
pub struct ArtifactManager {
    current: Option<LiveArtifact>,
}

impl ArtifactManager {
    /// Create a manager with no live artifact.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a merge result, revoking the current artifact first.
    pub fn publish(&mut self, result: MergeResult) -> ArtifactHandle {
        if let Some(previous) = self.current.take() {
            tracing::debug!(id = %previous.handle.id, "revoking superseded artifact");
        }

        let bytes = Arc::clone(result.artifact_bytes());
        let handle = ArtifactHandle {
            id: ArtifactId::new(),
            suggested_name: result.suggested_name().to_string(),
            len: bytes.len(),
        };
        tracing::debug!(uri = %handle.uri(), len = handle.len, "published artifact");

        self.current = Some(LiveArtifact {
            handle: handle.clone(),
            bytes,
            statistics: result.statistics().clone(),
        });

        handle
    }

    /// Revoke `handle` and release its bytes.
    ///
    /// Revoking an artifact that is not live does nothing. Returns whether
    /// anything was released.
    pub fn revoke(&mut self, handle: &ArtifactHandle) -> bool {
        if self.is_live(handle) {
            self.current = None;
            tracing::debug!(id = %handle.id, "revoked artifact");
            true
        } else {
            false
        }
    }

    /// Handle of the live artifact, if any.
    pub fn current(&self) -> Option<&ArtifactHandle> {
        self.current.as_ref().map(|live| &live.handle)
    }

    /// Bytes of `handle`, or `None` once it has been revoked.
    pub fn resolve(&self, handle: &ArtifactHandle) -> Option<Arc<[u8]>> {
        self.live(handle).map(|live| Arc::clone(&live.bytes))
    }

    /// Statistics of the merge that produced `handle`, while it is live.
    pub fn statistics(&self, handle: &ArtifactHandle) -> Option<&MergeStatistics> {
        self.live(handle).map(|live| &live.statistics)
    }

    /// Revoke the live artifact, if any.
    pub fn reset(&mut self) {
        if let Some(handle) = self.current().cloned() {
            self.revoke(&handle);
        }
    }

    /// Number of live artifacts: zero or one.
    pub fn live_count(&self) -> usize {
        usize::from(self.current.is_some())
    }

    fn is_live(&self, handle: &ArtifactHandle) -> bool {
        self.live(handle).is_some()
    }

    fn live(&self, handle: &ArtifactHandle) -> Option<&LiveArtifact> {
        self.current
            .as_ref()
            .filter(|live| live.handle.id == handle.id)
    }
}
