use candent_core::member_path;
use regex::Regex;
use swc_core::{
    common::{comments::Comment, Span, DUMMY_SP},
    ecma::ast::Expr,
};

use crate::{
    error::{TransformError, TransformErrorKind},
    options::JsxOptions,
};

const DEFAULT_ELEMENT_CTOR: &str = "React.createElement";
const DEFAULT_FRAGMENT_MARKER: &str = "React.Fragment";
const DEPRECATED_ELEMENT_CTOR: &str = "React.DOM";

lazy_static! {
    static ref JSX_ANNOTATION_RE: Regex = Regex::new(r"@jsx\s+(\S+)").unwrap();
    static ref JSX_FRAG_ANNOTATION_RE: Regex = Regex::new(r"@jsxFrag\s+(\S+)").unwrap();
}

/// Per-program lowering context: the element-constructor and fragment-marker
/// expressions resolved once on program entry from options and comment
/// annotations, plus the bookkeeping for the exit-time consistency check.
///
/// Its lifetime is exactly one program compilation; it is created by the
/// driver and discarded with it.
#[derive(Debug)]
pub struct ProgramContext {
    element_ctor: Box<Expr>,
    fragment_marker: Box<Expr>,
    pragma_set: bool,
    pragma_frag_set: bool,
    used_fragment: bool,
}

impl ProgramContext {
    /// Scans every program comment for `@jsx <dotted.path>` and
    /// `@jsxFrag <dotted.path>` annotations. Comments are scanned in order
    /// and the last match wins for each annotation kind.
    pub fn resolve(comments: &[Comment], options: &JsxOptions) -> Result<ProgramContext, TransformError> {
        let mut pragma = options
            .pragma
            .clone()
            .unwrap_or_else(|| DEFAULT_ELEMENT_CTOR.into());
        let mut pragma_frag = options
            .pragma_frag
            .clone()
            .unwrap_or_else(|| DEFAULT_FRAGMENT_MARKER.into());
        let mut pragma_set = options.pragma.is_some();
        let mut pragma_frag_set = options.pragma_frag.is_some();

        for comment in comments {
            if let Some(captures) = JSX_ANNOTATION_RE.captures(&comment.text) {
                pragma = captures[1].to_string();
                pragma_set = true;

                if pragma == DEPRECATED_ELEMENT_CTOR {
                    return Err(TransformError {
                        span: comment.span,
                        kind: TransformErrorKind::DeprecatedPragma,
                    });
                }
            }

            if let Some(captures) = JSX_FRAG_ANNOTATION_RE.captures(&comment.text) {
                pragma_frag = captures[1].to_string();
                pragma_frag_set = true;
            }
        }

        Ok(ProgramContext {
            element_ctor: member_path(&pragma, DUMMY_SP),
            fragment_marker: member_path(&pragma_frag, DUMMY_SP),
            pragma_set,
            pragma_frag_set,
            used_fragment: false,
        })
    }

    /// A fresh element-constructor expression. Cloned per use, so the same
    /// node is never reachable from two parents.
    pub fn element_ctor(&self) -> Box<Expr> {
        self.element_ctor.clone()
    }

    /// A fresh fragment-marker expression.
    pub fn fragment_marker(&self) -> Box<Expr> {
        self.fragment_marker.clone()
    }

    pub(crate) fn mark_fragment_used(&mut self) {
        self.used_fragment = true;
    }

    /// The deferred consistency check, run when leaving the program:
    /// overriding the element constructor without declaring a fragment
    /// marker is rejected once a fragment has actually been lowered.
    pub(crate) fn finish(&self, program_span: Span) -> Result<(), TransformError> {
        if self.pragma_set && self.used_fragment && !self.pragma_frag_set {
            return Err(TransformError {
                span: program_span,
                kind: TransformErrorKind::PragmaPairMismatch,
            });
        }

        Ok(())
    }
}
