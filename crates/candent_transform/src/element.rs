//! Lowering of markup elements and fragments into call expressions.

use candent_core::{call_expr, clean_jsx_text, ident, ident_expr, is_compat_tag, member_expr, null_lit, str_lit};
use swc_core::{
    common::{Span, Spanned},
    ecma::{
        ast::{
            CallExpr, ComputedPropName, Expr, ExprOrSpread, JSXElement, JSXElementChild, JSXExpr,
            JSXFragment, Lit, MemberExpr, MemberProp,
        },
        atoms::JsWord,
    },
};

use crate::{
    atoms,
    convert,
    error::{TransformError, TransformErrorKind},
    pragma::ProgramContext,
    visitor::TransformJsxContext,
};

/// Transient per-element build state, created at the start of lowering one
/// element and discarded once the call expression is produced. The two hook
/// points receive it by mutable reference.
pub struct ElementBuildState {
    /// Tag descriptor, already normalized into a generic expression
    pub tag_expr: Box<Expr>,
    /// Raw tag name, when the tag reduced to an identifier or a literal.
    /// Only consulted for compat-tag classification.
    pub tag_name: Option<JsWord>,
    /// Accumulated call arguments
    pub args: Vec<ExprOrSpread>,
    /// Overrides the callee; the element constructor is used otherwise
    pub callee: Option<Box<Expr>>,
    /// Substitutes the whole call expression, bypassing callee + arguments
    /// composition
    pub call: Option<CallExpr>,
}

/// The two extension points of element lowering. Calling conventions are
/// policy injected here; the lowering algorithm itself stays
/// convention-agnostic.
pub trait ElementHooks {
    /// Invoked after tag normalization, before the attributes argument is
    /// built. The usual job is pushing the tag descriptor (or a string form
    /// of it) as the first call argument.
    fn before_attributes(&self, _state: &mut ElementBuildState, _ctx: &ProgramContext) {}

    /// Invoked once the attributes argument has been pushed. May override
    /// the callee or substitute a fully custom call.
    fn after_attributes(&self, _state: &mut ElementBuildState, _ctx: &ProgramContext) {}
}

/// The standard calling convention: compat tags are passed as string
/// literals, component tags as the normalized tag expression, and every
/// call goes through the element constructor.
pub struct StandardHooks;

impl ElementHooks for StandardHooks {
    fn before_attributes(&self, state: &mut ElementBuildState, _ctx: &ProgramContext) {
        let span = state.tag_expr.span();

        match &state.tag_name {
            Some(tag_name) if is_compat_tag(tag_name) => {
                state.args.push(ExprOrSpread {
                    spread: None,
                    expr: str_lit(tag_name.clone(), span),
                });
            }
            _ => {
                state.args.push(ExprOrSpread {
                    spread: None,
                    expr: state.tag_expr.clone(),
                });
            }
        }
    }
}

/// The legacy calling convention: component tags are invoked directly and
/// compat tags are routed through the `React.DOM` namespace.
pub struct CompatHooks;

impl ElementHooks for CompatHooks {
    fn before_attributes(&self, state: &mut ElementBuildState, _ctx: &ProgramContext) {
        state.callee = Some(state.tag_expr.clone());
    }

    fn after_attributes(&self, state: &mut ElementBuildState, _ctx: &ProgramContext) {
        let Some(tag_name) = &state.tag_name else {
            return;
        };
        if !is_compat_tag(tag_name) {
            return;
        }

        let span = state.tag_expr.span();
        let react_dom = member_expr(
            ident_expr(atoms::REACT.clone(), span),
            ident(atoms::DOM.clone(), span),
            span,
        );
        let prop = match &*state.tag_expr {
            Expr::Ident(tag_ident) => MemberProp::Ident(tag_ident.clone().into()),
            _ => MemberProp::Computed(ComputedPropName {
                span,
                expr: state.tag_expr.clone(),
            }),
        };

        state.call = Some(call_expr(
            Box::new(Expr::Member(MemberExpr {
                span,
                obj: react_dom,
                prop,
            })),
            std::mem::take(&mut state.args),
            span,
        ));
    }
}

impl TransformJsxContext<'_> {
    pub(crate) fn lower_jsx_expr(&mut self, expr: Expr) -> Result<Expr, TransformError> {
        match expr {
            Expr::JSXElement(el) => self.lower_element(*el),
            Expr::JSXFragment(frag) => self.lower_fragment(frag),
            other => Ok(other),
        }
    }

    pub(crate) fn lower_element(&mut self, el: JSXElement) -> Result<Expr, TransformError> {
        let JSXElement {
            span,
            opening,
            children,
            ..
        } = el;

        let tag_expr = convert::convert_element_name(opening.name)?;
        let tag_name = match &*tag_expr {
            Expr::Ident(tag_ident) => Some(tag_ident.sym.clone()),
            Expr::Lit(Lit::Str(tag_str)) => Some(tag_str.value.clone()),
            _ => None,
        };

        let mut state = ElementBuildState {
            tag_expr,
            tag_name,
            args: Vec::new(),
            callee: None,
            call: None,
        };

        self.hooks.before_attributes(&mut state, &self.pragma);

        let attrs_expr = if opening.attrs.is_empty() {
            null_lit(span)
        } else {
            self.build_attributes(opening.attrs, span)?
        };
        state.args.push(ExprOrSpread {
            spread: None,
            expr: attrs_expr,
        });

        self.hooks.after_attributes(&mut state, &self.pragma);

        let call = match state.call {
            Some(call) => call,
            None => {
                let callee = state
                    .callee
                    .unwrap_or_else(|| self.pragma.element_ctor());
                call_expr(callee, state.args, span)
            }
        };

        self.finish_call(call, children, span)
    }

    pub(crate) fn lower_fragment(&mut self, frag: JSXFragment) -> Result<Expr, TransformError> {
        let JSXFragment { span, children, .. } = frag;

        if self.options.compat {
            return Err(TransformError {
                span,
                kind: TransformErrorKind::FragmentInCompatMode,
            });
        }

        let marker = self.pragma.fragment_marker();
        let mut state = ElementBuildState {
            tag_expr: marker.clone(),
            tag_name: None,
            args: vec![
                ExprOrSpread {
                    spread: None,
                    expr: marker,
                },
                // fragments can never carry attributes
                ExprOrSpread {
                    spread: None,
                    expr: null_lit(span),
                },
            ],
            callee: None,
            call: None,
        };

        self.hooks.after_attributes(&mut state, &self.pragma);
        self.pragma.mark_fragment_used();

        let call = match state.call {
            Some(call) => call,
            None => {
                let callee = state
                    .callee
                    .unwrap_or_else(|| self.pragma.element_ctor());
                call_expr(callee, state.args, span)
            }
        };

        self.finish_call(call, children, span)
    }

    /// Appends the normalized child list as trailing call arguments and
    /// flags calls with three or more arguments for multi-line rendering.
    fn finish_call(
        &mut self,
        mut call: CallExpr,
        children: Vec<JSXElementChild>,
        span: Span,
    ) -> Result<Expr, TransformError> {
        self.push_child_args(children, &mut call.args)?;

        call.span = span;
        if call.args.len() >= 3 {
            self.pretty_calls.push(span);
        }

        Ok(Expr::Call(call))
    }

    fn push_child_args(
        &mut self,
        children: Vec<JSXElementChild>,
        args: &mut Vec<ExprOrSpread>,
    ) -> Result<(), TransformError> {
        for child in children {
            let expr = match child {
                JSXElementChild::JSXText(text) => {
                    let Some(cleaned) = clean_jsx_text(&text.value) else {
                        continue;
                    };
                    str_lit(JsWord::from(cleaned), text.span)
                }
                JSXElementChild::JSXExprContainer(container) => match container.expr {
                    JSXExpr::JSXEmptyExpr(_) => continue,
                    JSXExpr::Expr(expr) => expr,
                },
                JSXElementChild::JSXElement(child_el) => Box::new(self.lower_element(*child_el)?),
                JSXElementChild::JSXFragment(child_frag) => {
                    Box::new(self.lower_fragment(child_frag)?)
                }
                JSXElementChild::JSXSpreadChild(spread_child) => {
                    return Err(TransformError {
                        span: spread_child.span,
                        kind: TransformErrorKind::SpreadChild,
                    });
                }
            };

            args.push(ExprOrSpread { spread: None, expr });
        }

        Ok(())
    }
}
