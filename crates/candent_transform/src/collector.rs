//! Rewriting of collecting expression containers.
//!
//! A collecting container is an expression-position block whose body can
//! yield values; the whole construct evaluates to the array of yielded
//! values. SWC's tree has no dedicated node kind for it, so the interchange
//! convention with the markup parser is: a JSX expression container holding
//! an anonymous, zero-parameter generator function expression *is* a
//! collecting container, and the function's body is the container body.
//!
//! The rewrite turns the container into an immediately invoked function
//! that declares a fresh accumulator array, pushes every owned yield onto
//! it, turns every owned unlabeled break into an early return of the
//! accumulator, and returns the accumulator at the end. Ownership follows
//! nearest-enclosing-construct rules:
//!
//! - breaks are owned unless a loop (or `switch`) sits in between;
//! - yields and returns are owned unless a function boundary sits in
//!   between; a yield inside a nested generator function is a true
//!   generator yield and stays untouched, while an owned `return` is a
//!   hard error;
//! - self-references are rebound across the newly introduced function
//!   boundary to a hoisted alias of the enclosing context, at any depth,
//!   except under a construct with its own self-reference binding. Arrow
//!   functions and nested containers are transparent here.

use candent_core::{
    append_stmt, empty_array, ident, ident_expr, iife, member_expr, prepend_stmt, return_stmt,
    var_stmt, void_zero,
};
use swc_core::{
    common::Span,
    ecma::{
        ast::{
            ArrowExpr, BlockStmt, Constructor, Expr, ExprOrSpread, Function, GetterProp,
            JSXExprContainer, JSXExpr, SetterProp, StaticBlock, Stmt,
        },
        atoms::JsWord,
        visit::{VisitMut, VisitMutWith},
    },
};

use crate::{
    atoms,
    error::{TransformError, TransformErrorKind},
    visitor::{ScopeKind, TransformJsxContext},
};

/// Recognizes the container encoding inside a JSX expression container.
pub(crate) fn is_collecting_container(expr: &Expr) -> bool {
    let Expr::Fn(fn_expr) = expr else {
        return false;
    };

    fn_expr.ident.is_none()
        && fn_expr.function.is_generator
        && fn_expr.function.params.is_empty()
        && fn_expr.function.body.is_some()
}

impl TransformJsxContext<'_> {
    /// Rewrites one container body into the immediately invoked accumulator
    /// function. Runs before the driver descends into the body, so nested
    /// containers are processed outer to inner; once this container has
    /// become a plain function, it is a boundary of its own for everything
    /// processed later inside it.
    pub(crate) fn rewrite_collector(&mut self, span: Span, mut body: BlockStmt) -> Expr {
        let acc = self.uids.generate("yields");

        let mut rewriter = CollectorRewriter {
            ctx: self,
            acc: acc.clone(),
            fn_depth: 0,
            loop_depth: 0,
            this_fn_depth: 0,
        };
        body.visit_mut_with(&mut rewriter);

        prepend_stmt(&mut body, var_stmt(ident(acc.clone(), span), empty_array(span), span));
        append_stmt(&mut body, return_stmt(Some(ident_expr(acc, span)), span));

        iife(body, span)
    }
}

/// The bounded sub-traversal over one container body.
///
/// The three depth counters implement the nearest-enclosing-construct
/// search: a construct is owned by the container exactly when no relevant
/// boundary was entered on the way down to it.
struct CollectorRewriter<'a, 'o> {
    ctx: &'a mut TransformJsxContext<'o>,
    /// The accumulator variable of this container
    acc: JsWord,
    /// Function-like boundaries entered; owns yields, breaks and returns
    fn_depth: u32,
    /// Loop and switch boundaries entered; owns unlabeled breaks
    loop_depth: u32,
    /// Boundaries that bind their own self-reference; arrows and nested
    /// containers do not count
    this_fn_depth: u32,
}

impl CollectorRewriter<'_, '_> {
    /// Replaces an owned self-reference. At the program root the reference
    /// has no meaning and collapses to `void 0`; anywhere else it becomes
    /// one hoisted alias per enclosing context, declared at the head of
    /// that context's body by the driver when it unwinds.
    fn rebind_this(&mut self, span: Span) -> Expr {
        let ctx = &mut *self.ctx;

        let at_program_root = ctx
            .scopes
            .last()
            .map_or(true, |frame| frame.kind == ScopeKind::Program);
        if at_program_root {
            return *void_zero(span);
        }

        let existing = ctx.scopes.last().and_then(|frame| frame.this_alias.clone());
        let alias = match existing {
            Some(alias) => alias,
            None => {
                let fresh = ctx.uids.generate("this");
                if let Some(frame) = ctx.scopes.last_mut() {
                    frame.this_alias = Some(fresh.clone());
                }
                fresh
            }
        };

        Expr::Ident(ident(alias, span))
    }
}

impl VisitMut for CollectorRewriter<'_, '_> {
    fn visit_mut_expr(&mut self, n: &mut Expr) {
        if self.ctx.error.is_some() {
            return;
        }

        match n {
            // An owned yield becomes a push onto the accumulator
            Expr::Yield(yield_expr) if self.fn_depth == 0 => {
                // the yielded value may itself contain owned constructs
                if let Some(arg) = yield_expr.arg.as_mut() {
                    arg.visit_mut_with(self);
                }

                let span = yield_expr.span;
                let push_arg = match yield_expr.arg.take() {
                    // a delegated yield contributes its whole sequence
                    Some(arg) if yield_expr.delegate => ExprOrSpread {
                        spread: Some(span),
                        expr: arg,
                    },
                    Some(arg) => ExprOrSpread { spread: None, expr: arg },
                    None => ExprOrSpread {
                        spread: None,
                        expr: void_zero(span),
                    },
                };

                let push = member_expr(
                    ident_expr(self.acc.clone(), span),
                    ident(atoms::PUSH.clone(), span),
                    span,
                );
                *n = Expr::Call(candent_core::call_expr(push, vec![push_arg], span));
            }

            Expr::This(this_expr) if self.this_fn_depth == 0 => {
                *n = self.rebind_this(this_expr.span);
            }

            _ => n.visit_mut_children_with(self),
        }
    }

    fn visit_mut_stmt(&mut self, n: &mut Stmt) {
        if self.ctx.error.is_some() {
            return;
        }

        match n {
            // An owned break returns the accumulator immediately
            Stmt::Break(break_stmt)
                if break_stmt.label.is_none() && self.fn_depth == 0 && self.loop_depth == 0 =>
            {
                let span = break_stmt.span;
                *n = return_stmt(Some(ident_expr(self.acc.clone(), span)), span);
            }

            Stmt::Return(return_node) if self.fn_depth == 0 => {
                self.ctx.fail(TransformError {
                    span: return_node.span,
                    kind: TransformErrorKind::ReturnInsideCollector,
                });
            }

            Stmt::For(_)
            | Stmt::While(_)
            | Stmt::DoWhile(_)
            | Stmt::ForIn(_)
            | Stmt::ForOf(_)
            | Stmt::Switch(_) => {
                self.loop_depth += 1;
                n.visit_mut_children_with(self);
                self.loop_depth -= 1;
            }

            _ => n.visit_mut_children_with(self),
        }
    }

    fn visit_mut_function(&mut self, n: &mut Function) {
        self.fn_depth += 1;
        self.this_fn_depth += 1;
        n.visit_mut_children_with(self);
        self.fn_depth -= 1;
        self.this_fn_depth -= 1;
    }

    // Arrows keep the lexical self-reference, so they only stop yields,
    // breaks and returns
    fn visit_mut_arrow_expr(&mut self, n: &mut ArrowExpr) {
        self.fn_depth += 1;
        n.visit_mut_children_with(self);
        self.fn_depth -= 1;
    }

    fn visit_mut_constructor(&mut self, n: &mut Constructor) {
        self.fn_depth += 1;
        self.this_fn_depth += 1;
        n.visit_mut_children_with(self);
        self.fn_depth -= 1;
        self.this_fn_depth -= 1;
    }

    fn visit_mut_getter_prop(&mut self, n: &mut GetterProp) {
        self.fn_depth += 1;
        self.this_fn_depth += 1;
        n.visit_mut_children_with(self);
        self.fn_depth -= 1;
        self.this_fn_depth -= 1;
    }

    fn visit_mut_setter_prop(&mut self, n: &mut SetterProp) {
        self.fn_depth += 1;
        self.this_fn_depth += 1;
        n.visit_mut_children_with(self);
        self.fn_depth -= 1;
        self.this_fn_depth -= 1;
    }

    fn visit_mut_static_block(&mut self, n: &mut StaticBlock) {
        self.fn_depth += 1;
        self.this_fn_depth += 1;
        n.visit_mut_children_with(self);
        self.fn_depth -= 1;
        self.this_fn_depth -= 1;
    }

    fn visit_mut_jsx_expr_container(&mut self, n: &mut JSXExprContainer) {
        if let JSXExpr::Expr(expr) = &mut n.expr {
            if is_collecting_container(expr) {
                // A nested container owns its own yields, breaks and
                // returns, but stays transparent for self-references
                let Expr::Fn(fn_expr) = &mut **expr else {
                    return;
                };
                let Some(body) = fn_expr.function.body.as_mut() else {
                    return;
                };

                self.fn_depth += 1;
                body.visit_mut_with(self);
                self.fn_depth -= 1;
                return;
            }
        }

        n.visit_mut_children_with(self);
    }
}
