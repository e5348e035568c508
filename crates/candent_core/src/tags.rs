/// The fixed set of lowercase built-in element names routed through the
/// legacy calling convention. Anything outside this set is treated as a
/// component reference.
static COMPAT_TAGS: phf::Set<&'static str> = phf::phf_set! {
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base",
    "bdi", "bdo", "big", "blockquote", "body", "br", "button", "canvas",
    "caption", "cite", "code", "col", "colgroup", "data", "datalist", "dd",
    "del", "details", "dfn", "dialog", "div", "dl", "dt", "em", "embed",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html", "i", "iframe",
    "img", "input", "ins", "kbd", "keygen", "label", "legend", "li", "link",
    "main", "map", "mark", "menu", "menuitem", "meta", "meter", "nav",
    "noscript", "object", "ol", "optgroup", "option", "output", "p", "param",
    "picture", "pre", "progress", "q", "rp", "rt", "ruby", "s", "samp",
    "script", "section", "select", "small", "source", "span", "strong",
    "style", "sub", "summary", "sup", "table", "tbody", "td", "textarea",
    "tfoot", "th", "thead", "time", "title", "tr", "track", "u", "ul", "var",
    "video", "wbr",
    // SVG and MathML entry points
    "circle", "clipPath", "defs", "ellipse", "g", "image", "line",
    "linearGradient", "mask", "math", "path", "pattern", "polygon",
    "polyline", "radialGradient", "rect", "stop", "svg", "text", "tspan",
};

pub fn is_compat_tag(tag_name: &str) -> bool {
    COMPAT_TAGS.contains(tag_name)
}
