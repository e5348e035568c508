use std::fmt;

use swc_core::common::{Span, Spanned};

/// A fatal lowering failure.
///
/// The first error encountered aborts the whole compilation unit: there is
/// no recovery and no partial output. The span points at the offending
/// construct, except for the deferred pragma-pair check which reports the
/// whole program.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformError {
    pub span: Span,
    pub kind: TransformErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformErrorKind {
    /// `<ns:tag>` or `ns:attr`; the call-based representation has no
    /// namespace concept
    NamespacedName,
    /// Fragment syntax under the legacy calling convention
    FragmentInCompatMode,
    /// The `@jsx React.DOM` annotation
    DeprecatedPragma,
    /// Element constructor overridden and a fragment lowered, but no
    /// fragment marker override declared
    PragmaPairMismatch,
    /// Spread children are not representable as call arguments
    SpreadChild,
    /// `return` whose nearest returnable construct is a collecting container
    ReturnInsideCollector,
    /// Options were not passed as an object
    OptionsNotAnObject,
    /// `pragma`/`pragmaFrag` option with a non-string value
    PragmaNotAString,
    /// `useBuiltIns` option with a non-boolean value
    UseBuiltInsNotBoolean,
    /// `compat` option with a non-boolean value
    CompatNotABoolean,
}

impl TransformErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            TransformErrorKind::NamespacedName => {
                "Namespace tags are not supported. JSX is not XML."
            }
            TransformErrorKind::FragmentInCompatMode => {
                "Fragment tags are only supported in React 16 and up."
            }
            TransformErrorKind::DeprecatedPragma => {
                "The @jsx React.DOM pragma has been deprecated as of React 0.12"
            }
            TransformErrorKind::PragmaPairMismatch => {
                "pragma has been set but pragmaFrag has not been set"
            }
            TransformErrorKind::SpreadChild => "Spread children are not supported.",
            TransformErrorKind::ReturnInsideCollector => {
                "return is not supported inside a collecting expression"
            }
            TransformErrorKind::OptionsNotAnObject => "transform options must be an object",
            TransformErrorKind::PragmaNotAString => {
                "the pragma options accept only dotted-path strings"
            }
            TransformErrorKind::UseBuiltInsNotBoolean => {
                "the useBuiltIns option accepts only a boolean"
            }
            TransformErrorKind::CompatNotABoolean => "the compat option accepts only a boolean",
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.message())
    }
}

impl std::error::Error for TransformError {}

impl Spanned for TransformError {
    fn span(&self) -> Span {
        self.span
    }
}
