use gallery_graphics::InvalidGeometry;

/// Failure of a gallery operation.
///
/// Geometry errors abandon the operation that raised them; the touch and
/// frame entry points of [`Gallery`](crate::Gallery) report them to the host.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GalleryError {
    #[error(transparent)]
    Geometry(#[from] InvalidGeometry),
    #[error("page {page} does not exist (page count {page_count})")]
    UnknownPage { page: usize, page_count: usize },
}

/// Failure reported by a [`SizeProbe`](crate::SizeProbe). Recorded on the page,
/// never propagated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to read the size of {uri}: {reason}")]
    Failed { uri: String, reason: String },
    #[error("image {0} reported an empty size")]
    EmptySize(String),
}
