//! Known element types and property names.
//!
//! The in-memory document validates every element it creates and every
//! property it assigns against these lists, so a tree cannot inject
//! arbitrary properties into the host.

/// HTML element names accepted in strict mode.
pub const HTML_TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col",
    "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl",
    "dt", "em", "embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html", "i", "iframe", "img",
    "input", "ins", "kbd", "label", "legend", "li", "link", "main", "map", "mark", "menu",
    "meta", "meter", "nav", "noscript", "object", "ol", "optgroup", "option", "output", "p",
    "picture", "pre", "progress", "q", "rp", "rt", "ruby", "s", "samp", "section", "select",
    "slot", "small", "source", "span", "strong", "style", "sub", "summary", "sup", "table",
    "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time", "title", "tr",
    "track", "u", "ul", "var", "video", "wbr",
];

/// Elements that never have a closing tag when serialized.
pub const VOID_TAGS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Property names accepted in strict mode, besides `data-*`, `aria-*` and
/// `on*` handlers.
pub const PROPERTIES: &[&str] = &[
    "accept", "action", "alt", "autocomplete", "autofocus", "checked", "class", "className",
    "cols", "colspan", "content", "contenteditable", "dir", "disabled", "download",
    "draggable", "for", "form", "height", "hidden", "href", "htmlFor", "id", "lang", "list",
    "max", "maxlength", "method", "min", "minlength", "multiple", "name", "open", "pattern",
    "placeholder", "readonly", "rel", "required", "role", "rows", "rowspan", "selected",
    "size", "span", "src", "srcset", "step", "style", "tabindex", "target", "textContent",
    "title", "type", "value", "width",
];

/// Whether `tag` is a syntactically valid element name.
pub fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Custom element names must contain a hyphen.
pub fn is_custom_element(tag: &str) -> bool {
    tag.contains('-')
}

pub fn is_html_tag(tag: &str) -> bool {
    let lower = tag.to_ascii_lowercase();
    HTML_TAGS.contains(&lower.as_str())
}

pub fn is_void_tag(tag: &str) -> bool {
    let lower = tag.to_ascii_lowercase();
    VOID_TAGS.contains(&lower.as_str())
}

/// Whether `key` is a syntactically valid property name.
pub fn is_valid_property_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| !c.is_whitespace() && !c.is_control() && !matches!(c, '"' | '\'' | '<' | '>' | '/' | '='))
}

/// Event handler properties look like `onclick`.
pub fn is_handler_property(key: &str) -> bool {
    key.len() > 2 && key.starts_with("on")
}

pub fn is_known_property(key: &str) -> bool {
    PROPERTIES.contains(&key)
        || key.starts_with("data-")
        || key.starts_with("aria-")
        || is_handler_property(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_syntax() {
        assert!(is_valid_tag("div"));
        assert!(is_valid_tag("my-widget"));
        assert!(is_valid_tag("h1"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag("1div"));
        assert!(!is_valid_tag("di v"));
        assert!(!is_valid_tag("<div>"));
    }

    #[test]
    fn html_tags_are_case_insensitive() {
        assert!(is_html_tag("DIV"));
        assert!(is_html_tag("span"));
        assert!(!is_html_tag("blink"));
    }

    #[test]
    fn property_allowlist() {
        assert!(is_known_property("id"));
        assert!(is_known_property("data-row"));
        assert!(is_known_property("aria-label"));
        assert!(is_known_property("onclick"));
        assert!(!is_known_property("on"));
        assert!(!is_known_property("innerHTML"));
    }

    #[test]
    fn property_name_syntax() {
        assert!(is_valid_property_name("data-x"));
        assert!(!is_valid_property_name(""));
        assert!(!is_valid_property_name("a b"));
        assert!(!is_valid_property_name("x=\"y\""));
    }
}
