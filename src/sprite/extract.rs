//! Finding sprite-eligible image references in a stylesheet.
//!
//! Only `background` declarations whose whole value is a single `url(...)`
//! are considered. The referenced file must be named `<group>.<name>.png`;
//! the `<group>` segment decides which sprite it joins.

use crate::css::{Stylesheet, TokenId, TokenKind};

/// An image referenced by a `background` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// The `url(...)` token to rewrite.
    pub token: TokenId,
    /// The reference as written, quotes removed.
    pub url: String,
    /// Sprite group, or empty when the file does not follow the convention.
    pub group: String,
}

impl ImageReference {
    pub fn is_eligible(&self) -> bool {
        !self.group.is_empty()
    }
}

/// Collect every `background: url(...)` reference, in stream order.
///
/// Pure: reads nothing but the token stream.
pub fn scan(sheet: &Stylesheet) -> Vec<ImageReference> {
    sheet
        .declarations()
        .into_iter()
        .filter(|decl| sheet.text(decl.property).eq_ignore_ascii_case("background"))
        .filter_map(|decl| match decl.value.as_slice() {
            [only] if sheet.kind(*only) == TokenKind::Url => {
                let url = url_target(sheet.text(*only)).to_string();
                let group = group_key(&url).to_string();
                Some(ImageReference {
                    token: *only,
                    url,
                    group,
                })
            }
            _ => None,
        })
        .collect()
}

/// Extract the target of a `url(...)` token, stripping one pair of quotes.
pub fn url_target(raw: &str) -> &str {
    let inner = raw
        .get(4..raw.len().saturating_sub(1))
        .unwrap_or("")
        .trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C'));

    for quote in ['"', '\''] {
        if inner.len() >= 2 && inner.starts_with(quote) && inner.ends_with(quote) {
            return &inner[1..inner.len() - 1];
        }
    }
    inner
}

/// Group name of a `<group>.<name>.png` reference, or `""`.
///
/// Absolute references (`/x`, `http://...`, `data:...`) never group.
pub fn group_key(url: &str) -> &str {
    if url.starts_with('/') || url.contains(':') {
        return "";
    }

    let basename = url.rsplit('/').next().unwrap_or(url);
    let parts: Vec<&str> = basename.split('.').collect();
    match parts.as_slice() {
        [group, _, "png"] => *group,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(source: &str) -> Vec<(String, String)> {
        let sheet = Stylesheet::parse(source).unwrap();
        scan(&sheet).into_iter().map(|r| (r.url, r.group)).collect()
    }

    #[test]
    fn test_url_target() {
        assert_eq!(url_target("url(g1.a.png)"), "g1.a.png");
        assert_eq!(url_target("url('g1.a.png')"), "g1.a.png");
        assert_eq!(url_target("url(\"g1.a.png\")"), "g1.a.png");
        assert_eq!(url_target("url(  image/g1.a.png )"), "image/g1.a.png");
        assert_eq!(url_target("url()"), "");
    }

    #[test]
    fn test_group_key() {
        assert_eq!(group_key("g1.a.png"), "g1");
        assert_eq!(group_key("image/icons/g1.a.png"), "g1");
        assert_eq!(group_key("bar.png"), "");
        assert_eq!(group_key("g1.a.b.png"), "");
        assert_eq!(group_key("g1.a.gif"), "");
        assert_eq!(group_key("g1.a.PNG"), "");
        assert_eq!(group_key("g1.a.png?v=2"), "");
        assert_eq!(group_key("/img/g1.a.png"), "");
        assert_eq!(group_key("http://example.com/g1.a.png"), "");
        assert_eq!(group_key("//cdn.example.com/g1.a.png"), "");
        assert_eq!(group_key("data:image/png;base64,AAAA"), "");
    }

    #[test]
    fn test_scan_empty() {
        assert!(refs("").is_empty());
        assert!(refs(".a { color: red }").is_empty());
    }

    #[test]
    fn test_scan_keeps_stream_order_and_inert_refs() {
        let found = refs(
            ".a { background: url(g1.b.png); }\n.b { background: url(bar.png); }\n.c { background: url('g2.a.png') }",
        );
        assert_eq!(
            found,
            vec![
                ("g1.b.png".to_string(), "g1".to_string()),
                ("bar.png".to_string(), "".to_string()),
                ("g2.a.png".to_string(), "g2".to_string()),
            ]
        );
    }

    #[test]
    fn test_scan_ignores_other_properties_and_shapes() {
        let found = refs(
            r#"
            .a { bkg: url(g1.a.png); }
            .b { background-image: url(g1.a.png); }
            .c { background: #fff url(g1.a.png); }
            .d { background: url(g1.a.png), url(g1.b.png); }
            .e { background: url(g1.a.png) no-repeat; }
            "#,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_scan_property_case_insensitive() {
        let found = refs(".a { BACKGROUND : url(g1.a.png) }");
        assert_eq!(found, vec![("g1.a.png".to_string(), "g1".to_string())]);
    }
}
