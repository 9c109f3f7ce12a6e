use thiserror::Error;
use vdm_diagnostic::{Diagnostic, ErrorCode};
use vdm_ir::{ItemTag, PatternTag, Span};

/// A lowering table without a rule for some node shape.
///
/// Tables are validated when they are built, so this is a construction
/// error in the calling code rather than a problem with the source.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoweringError {
    #[error("{stage} lowering has no rule for {tag} patterns")]
    MissingPattern {
        stage: &'static str,
        tag: PatternTag,
    },
    #[error("{stage} lowering has no rule for the {tag}")]
    MissingItem { stage: &'static str, tag: ItemTag },
}

impl LoweringError {
    /// Report as an internal error at `span`.
    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        Diagnostic::error(ErrorCode::E9001)
            .with_message(self.to_string())
            .with_label(span, "while lowering this definition")
            .with_note("this is a bug in the stage configuration, not in the source")
    }
}
