mod ast;
mod children;
mod tags;
mod uid;

pub use ast::*;
pub use children::clean_jsx_text;
pub use tags::is_compat_tag;
pub use uid::UidGenerator;
