//! Normalization of markup names and attribute values into generic
//! expression and property nodes.

use candent_core::{is_ident_name, is_valid_ident, member_expr, str_lit};
use regex::Regex;
use swc_core::{
    common::Spanned,
    ecma::ast::{
        ComputedPropName, Expr, Ident, JSXAttrName, JSXElementName, JSXMemberExpr,
        JSXNamespacedName, JSXObject, MemberExpr, MemberProp, PropName, Str, ThisExpr,
    },
    ecma::atoms::JsWord,
};

use crate::error::{TransformError, TransformErrorKind};

lazy_static! {
    static ref LINE_FOLD_RE: Regex = Regex::new(r"\n\s+").unwrap();
}

/// Normalizes an element tag into a callable expression.
///
/// `this` in tag position is a real self-reference; a name with plain
/// identifier syntax stays an identifier; anything else (e.g. a hyphenated
/// name) is carried verbatim as a string literal.
pub(crate) fn convert_element_name(name: JSXElementName) -> Result<Box<Expr>, TransformError> {
    match name {
        JSXElementName::Ident(tag) => Ok(convert_referenced_ident(tag)),
        JSXElementName::JSXMemberExpr(member) => Ok(convert_member(member)),
        JSXElementName::JSXNamespacedName(namespaced) => Err(namespaced_error(&namespaced)),
    }
}

fn convert_referenced_ident(id: Ident) -> Box<Expr> {
    if &*id.sym == "this" {
        Box::new(Expr::This(ThisExpr { span: id.span }))
    } else if is_ident_name(&id.sym) {
        Box::new(Expr::Ident(id))
    } else {
        str_lit(id.sym, id.span)
    }
}

/// A dotted markup name recurses into its object and property parts
/// independently. The property is not a reference, so `this` stays a plain
/// name there.
fn convert_member(member: JSXMemberExpr) -> Box<Expr> {
    let obj = match member.obj {
        JSXObject::Ident(obj_ident) => convert_referenced_ident(obj_ident),
        JSXObject::JSXMemberExpr(inner) => convert_member(*inner),
    };

    let span = obj.span().to(member.prop.span);
    let prop = member.prop;

    if is_ident_name(&prop.sym) {
        member_expr(obj, prop.into(), span)
    } else {
        Box::new(Expr::Member(MemberExpr {
            span,
            obj,
            prop: MemberProp::Computed(ComputedPropName {
                span: prop.span,
                expr: str_lit(prop.sym, prop.span),
            }),
        }))
    }
}

/// Normalizes an attribute name into an object-literal key. Names that are
/// not plain identifiers (reserved words included) become string keys.
pub(crate) fn convert_attr_name(name: JSXAttrName) -> Result<PropName, TransformError> {
    match name {
        JSXAttrName::Ident(attr_ident) => {
            if is_valid_ident(&attr_ident.sym) {
                Ok(PropName::Ident(attr_ident))
            } else {
                Ok(PropName::Str(Str {
                    span: attr_ident.span,
                    value: attr_ident.sym,
                    raw: None,
                }))
            }
        }
        JSXAttrName::JSXNamespacedName(namespaced) => Err(namespaced_error(&namespaced)),
    }
}

pub(crate) fn namespaced_error(name: &JSXNamespacedName) -> TransformError {
    TransformError {
        span: name.ns.span.to(name.name.span),
        kind: TransformErrorKind::NamespacedName,
    }
}

/// Folds markup line continuations inside a plain string value: a newline
/// plus the following indentation collapse into one space. Values that came
/// from an expression container never go through this.
pub(crate) fn fold_line_breaks(value: &mut Str) {
    if !value.value.contains('\n') {
        return;
    }

    let folded = LINE_FOLD_RE.replace_all(&value.value, " ");
    value.value = JsWord::from(&*folded);
    value.raw = None;
}

#[cfg(test)]
mod tests {
    use swc_core::common::DUMMY_SP;

    use super::*;

    fn str_node(value: &str) -> Str {
        Str {
            span: DUMMY_SP,
            value: value.into(),
            raw: None,
        }
    }

    #[test]
    fn it_folds_line_continuations() {
        let mut value = str_node("one\n      two\n      three");
        fold_line_breaks(&mut value);
        assert_eq!(&*value.value, "one two three");
    }

    #[test]
    fn it_keeps_single_line_values() {
        let mut value = str_node("one  two");
        fold_line_breaks(&mut value);
        assert_eq!(&*value.value, "one  two");
    }

    #[test]
    fn it_resets_raw_after_folding() {
        let mut value = str_node("a\n b");
        value.raw = Some("'a\n b'".into());
        fold_line_breaks(&mut value);
        assert_eq!(&*value.value, "a b");
        assert!(value.raw.is_none());
    }
}
