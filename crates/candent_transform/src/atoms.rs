//! Commonly used symbols of the lowering pass as interned atoms.

use swc_core::ecma::atoms::JsWord;

lazy_static! {
    pub static ref ASSIGN: JsWord = JsWord::from("assign");
    pub static ref DOM: JsWord = JsWord::from("DOM");
    pub static ref EXTENDS_HELPER: JsWord = JsWord::from("_extends");
    pub static ref OBJECT: JsWord = JsWord::from("Object");
    pub static ref PUSH: JsWord = JsWord::from("push");
    pub static ref REACT: JsWord = JsWord::from("React");
    pub static ref THIS: JsWord = JsWord::from("this");
}
