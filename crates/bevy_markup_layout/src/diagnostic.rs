use thiserror::Error;

/// A recoverable markup problem found during a layout pass.
///
/// The pass never aborts on one of these; it logs it, substitutes a safe
/// rendering and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum LayoutDiagnostic {
    #[error("linked property `{name}` (index {index}) has no preceding single-line texture host")]
    UnclaimedLink { name: String, index: usize },
    #[error("single-line texture markup on non-texture property `{name}` (index {index})")]
    SingleLineOnNonTexture { name: String, index: usize },
    #[error("minimal rendering has no widget for `{name}` (index {index}) of type `{ty}`")]
    UnmappedType {
        name: String,
        index: usize,
        ty: String,
    },
}

impl LayoutDiagnostic {
    /// List index of the property the diagnostic is about.
    pub fn index(&self) -> usize {
        match self {
            LayoutDiagnostic::UnclaimedLink { index, .. }
            | LayoutDiagnostic::SingleLineOnNonTexture { index, .. }
            | LayoutDiagnostic::UnmappedType { index, .. } => *index,
        }
    }
}
