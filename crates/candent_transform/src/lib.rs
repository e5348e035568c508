//! Lowers markup literals into plain call expressions.
//!
//! The pass rewrites JSX elements and fragments into element-constructor
//! calls (pragma-overridable, `React.createElement` by default) and rewrites
//! collecting expression containers into immediately invoked accumulator
//! functions. It is a pure AST-to-AST transform over `swc_core`'s
//! ECMAScript tree: no code generation, no runtime component, no I/O.

#[macro_use]
extern crate lazy_static;

mod atoms;
mod attributes;
mod collector;
mod convert;
mod element;
mod error;
mod options;
mod pragma;
mod visitor;

#[cfg(test)]
mod test_utils;

pub use element::{CompatHooks, ElementBuildState, ElementHooks, StandardHooks};
pub use error::{TransformError, TransformErrorKind};
pub use options::JsxOptions;
pub use pragma::ProgramContext;

use swc_core::{
    common::{
        comments::{Comment, SingleThreadedComments},
        Span,
    },
    ecma::{ast::Module, visit::VisitMutWith},
};
use visitor::TransformJsxContext;

/// What the pass reports back besides the rewritten tree.
#[derive(Debug, Default)]
pub struct JsxTransformResult {
    /// Spans of lowered calls that accumulated three or more arguments.
    /// A printer may render those multi-line; the annotation has no
    /// semantic effect.
    pub pretty_calls: Vec<Span>,
}

/// Lowers every markup construct in `module`, in place, using the calling
/// convention selected by `options.compat`.
///
/// `comments` are the program's comments in source order; they are scanned
/// once for `@jsx` / `@jsxFrag` annotations.
pub fn transform_jsx(
    module: &mut Module,
    comments: &[Comment],
    options: &JsxOptions,
) -> Result<JsxTransformResult, TransformError> {
    if options.compat {
        transform_jsx_with_hooks(module, comments, options, &CompatHooks)
    } else {
        transform_jsx_with_hooks(module, comments, options, &StandardHooks)
    }
}

/// Same as [`transform_jsx`], with caller-supplied calling-convention hooks.
pub fn transform_jsx_with_hooks(
    module: &mut Module,
    comments: &[Comment],
    options: &JsxOptions,
    hooks: &dyn ElementHooks,
) -> Result<JsxTransformResult, TransformError> {
    let mut ctx = TransformJsxContext::new(module, comments, options, hooks)?;
    module.visit_mut_with(&mut ctx);
    ctx.finish(module.span)
}

/// Flattens a parser comment store into the position-ordered list the pass
/// scans for pragma annotations.
pub fn collect_comments(comments: SingleThreadedComments) -> Vec<Comment> {
    let (leading, trailing) = comments.take_all();

    let mut all: Vec<Comment> = Vec::new();
    for comment_list in leading.borrow().values() {
        all.extend(comment_list.iter().cloned());
    }
    for comment_list in trailing.borrow().values() {
        all.extend(comment_list.iter().cloned());
    }
    all.sort_by_key(|comment| comment.span.lo);

    all
}

#[cfg(test)]
mod tests {
    use candent_core::{call_expr, ident, ident_expr, member_path, str_lit};
    use swc_core::{
        common::DUMMY_SP,
        ecma::ast::{
            Expr, ExprOrSpread, ExprStmt, JSXElement, JSXElementName, JSXNamespacedName,
            JSXOpeningElement, KeyValueProp, Module, ModuleItem, ObjectLit, Prop, PropName,
            PropOrSpread, Stmt,
        },
    };

    use crate::test_utils::{jsx, normalize, to_str, transform_str};

    use super::*;

    #[test]
    fn it_leaves_markup_free_modules_unchanged() {
        let src = r#"
            var a = 1 + 2;
            function min(x, y) { return x < y ? x : y; }
            class Queue { push(v) { this.items.push(v); } }
        "#;

        let actual = transform_str(src, &JsxOptions::default()).unwrap();
        assert_eq!(actual, normalize(src));
    }

    #[test]
    fn it_honors_pragma_annotations() {
        let actual = transform_str("/* @jsx h */\n<div/>;", &JsxOptions::default()).unwrap();
        assert_eq!(actual, normalize(r#"h("div", null);"#));
    }

    #[test]
    fn it_honors_both_annotations_for_fragments() {
        let actual = transform_str(
            "/* @jsx h */\n/* @jsxFrag Frag */\n<>text</>;",
            &JsxOptions::default(),
        )
        .unwrap();
        assert_eq!(actual, normalize(r#"h(Frag, null, "text");"#));
    }

    #[test]
    fn it_fails_on_the_deprecated_pragma_annotation() {
        let error = transform_str("/* @jsx React.DOM */\n<div/>;", &JsxOptions::default())
            .unwrap_err();
        assert_eq!(error.kind, TransformErrorKind::DeprecatedPragma);
    }

    #[test]
    fn it_rejects_a_pragma_override_without_a_fragment_marker() {
        let options = JsxOptions {
            pragma: Some("h".into()),
            ..Default::default()
        };

        // the check is deferred to program exit and only fires when a
        // fragment was actually lowered
        let error = transform_str("<></>;", &options).unwrap_err();
        assert_eq!(error.kind, TransformErrorKind::PragmaPairMismatch);

        let element_only = transform_str("<div/>;", &options).unwrap();
        assert_eq!(element_only, normalize(r#"h("div", null);"#));

        let options = JsxOptions {
            pragma: Some("h".into()),
            pragma_frag: Some("Frag".into()),
            ..Default::default()
        };
        let both_set = transform_str("<></>;", &options).unwrap();
        assert_eq!(both_set, normalize("h(Frag, null);"));
    }

    #[test]
    fn it_rejects_namespaced_element_names() {
        let mut module = namespaced_module(true);
        let error = transform_jsx(&mut module, &[], &JsxOptions::default()).unwrap_err();
        assert_eq!(error.kind, TransformErrorKind::NamespacedName);
    }

    #[test]
    fn it_rejects_namespaced_attribute_names() {
        let mut module = namespaced_module(false);
        let error = transform_jsx(&mut module, &[], &JsxOptions::default()).unwrap_err();
        assert_eq!(error.kind, TransformErrorKind::NamespacedName);
    }

    #[test]
    fn it_matches_a_hand_built_call_tree() {
        let lowered = transform_str("<Tag a={x} {...y}>child</Tag>;", &JsxOptions::default())
            .unwrap();

        // the same call expression, built directly from the construction
        // primitives
        let attrs = Expr::Call(call_expr(
            ident_expr("_extends".into(), DUMMY_SP),
            vec![
                ExprOrSpread {
                    spread: None,
                    expr: Box::new(Expr::Object(ObjectLit {
                        span: DUMMY_SP,
                        props: vec![PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                            key: PropName::Ident(ident("a".into(), DUMMY_SP).into()),
                            value: ident_expr("x".into(), DUMMY_SP),
                        })))],
                    })),
                },
                ExprOrSpread {
                    spread: None,
                    expr: ident_expr("y".into(), DUMMY_SP),
                },
            ],
            DUMMY_SP,
        ));
        let call = Expr::Call(call_expr(
            member_path("React.createElement", DUMMY_SP),
            vec![
                ExprOrSpread {
                    spread: None,
                    expr: ident_expr("Tag".into(), DUMMY_SP),
                },
                ExprOrSpread {
                    spread: None,
                    expr: Box::new(attrs),
                },
                ExprOrSpread {
                    spread: None,
                    expr: str_lit("child".into(), DUMMY_SP),
                },
            ],
            DUMMY_SP,
        ));
        let mut hand_built = module_of(call);

        assert_eq!(lowered, to_str(&hand_built));

        // re-running the pass over the hand-built call tree changes nothing
        let before = to_str(&hand_built);
        transform_jsx(&mut hand_built, &[], &JsxOptions::default()).unwrap();
        assert_eq!(before, to_str(&hand_built));
    }

    #[test]
    fn it_reads_options_from_json() {
        let options = JsxOptions::from_json(&serde_json::json!({ "pragma": "m" })).unwrap();
        let actual = transform_str("<div/>;", &options).unwrap();
        assert_eq!(actual, normalize(r#"m("div", null);"#));
    }

    #[test]
    fn it_collects_comments_in_source_order() {
        let (_, comments) = jsx("/* one */ var a = 1; // two\nvar b = 2; /* three */");
        let texts: Vec<String> = comments
            .iter()
            .map(|comment| comment.text.trim().to_string())
            .collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    fn module_of(expr: Expr) -> Module {
        Module {
            span: DUMMY_SP,
            body: vec![ModuleItem::Stmt(Stmt::Expr(ExprStmt {
                span: DUMMY_SP,
                expr: Box::new(expr),
            }))],
            shebang: None,
        }
    }

    /// `<ns:tag/>` or `<div ns:attr="1"/>`, built by hand since the
    /// construct never makes it through a lenient parse in one piece.
    fn namespaced_module(on_element: bool) -> Module {
        use swc_core::ecma::ast::{JSXAttr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue, Lit, Str};

        let namespaced = JSXNamespacedName {
            span: DUMMY_SP,
            ns: ident("ns".into(), DUMMY_SP).into(),
            name: ident("tag".into(), DUMMY_SP).into(),
        };

        let (name, attrs) = if on_element {
            (JSXElementName::JSXNamespacedName(namespaced), vec![])
        } else {
            (
                JSXElementName::Ident(ident("div".into(), DUMMY_SP)),
                vec![JSXAttrOrSpread::JSXAttr(JSXAttr {
                    span: DUMMY_SP,
                    name: JSXAttrName::JSXNamespacedName(namespaced),
                    value: Some(JSXAttrValue::Lit(Lit::Str(Str {
                        span: DUMMY_SP,
                        value: "1".into(),
                        raw: None,
                    }))),
                })],
            )
        };

        let element = JSXElement {
            span: DUMMY_SP,
            opening: JSXOpeningElement {
                name,
                span: DUMMY_SP,
                attrs,
                self_closing: true,
                type_args: None,
            },
            children: vec![],
            closing: None,
        };

        module_of(Expr::JSXElement(Box::new(element)))
    }
}
