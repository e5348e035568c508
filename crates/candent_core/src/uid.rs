use fxhash::FxHashSet;
use swc_core::ecma::{
    ast::{Ident, Module},
    atoms::JsWord,
    visit::{Visit, VisitWith},
};

/// Hands out identifier names that are guaranteed not to collide with any
/// identifier already present in the program, nor with each other.
///
/// The pool of taken names is collected once, with a single read-only pass
/// over the module, before any rewriting starts. Every generated name is
/// added to the pool, so repeated requests with the same hint keep yielding
/// fresh names.
#[derive(Debug, Default)]
pub struct UidGenerator {
    taken: FxHashSet<JsWord>,
}

impl UidGenerator {
    pub fn for_module(module: &Module) -> Self {
        let mut collector = IdentCollector {
            taken: FxHashSet::default(),
        };
        module.visit_with(&mut collector);

        UidGenerator {
            taken: collector.taken,
        }
    }

    /// Produces a fresh name from a human-readable hint:
    /// `yields` becomes `_yields`, then `_yields2`, `_yields3` and so on.
    pub fn generate(&mut self, hint: &str) -> JsWord {
        let base = hint.trim_start_matches('_');

        let mut candidate = JsWord::from(format!("_{base}"));
        let mut suffix = 1_u32;
        while self.taken.contains(&candidate) {
            suffix += 1;
            candidate = JsWord::from(format!("_{base}{suffix}"));
        }

        self.taken.insert(candidate.clone());
        candidate
    }
}

struct IdentCollector {
    taken: FxHashSet<JsWord>,
}

impl Visit for IdentCollector {
    fn visit_ident(&mut self, n: &Ident) {
        self.taken.insert(n.sym.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_generates_fresh_names() {
        let mut uids = UidGenerator::default();

        assert_eq!(&*uids.generate("yields"), "_yields");
        assert_eq!(&*uids.generate("yields"), "_yields2");
        assert_eq!(&*uids.generate("yields"), "_yields3");
        assert_eq!(&*uids.generate("this"), "_this");
    }

    #[test]
    fn it_avoids_taken_names() {
        let mut uids = UidGenerator::default();
        uids.taken.insert(JsWord::from("_this"));

        assert_eq!(&*uids.generate("this"), "_this2");
    }

    #[test]
    fn it_normalizes_hints() {
        let mut uids = UidGenerator::default();

        assert_eq!(&*uids.generate("__acc"), "_acc");
    }
}
