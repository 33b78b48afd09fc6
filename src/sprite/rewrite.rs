//! Rewriting matched declarations to point at their sprite.

use crate::css::{Stylesheet, TokenId};

/// The replacement for a member's `url(...)` token.
///
/// The leftmost member needs no position; every other member shifts the
/// sprite left by its offset so its own slice shows through.
pub fn declaration_value(sprite_name: &str, offset_x: u32) -> String {
    if offset_x == 0 {
        format!("url({}) no-repeat", sprite_name)
    } else {
        format!("url({}) no-repeat -{}px 0", sprite_name, offset_x)
    }
}

/// Point the declaration owning `token` at `sprite_name`.
pub fn rewrite(sheet: &mut Stylesheet, token: TokenId, sprite_name: &str, offset_x: u32) {
    sheet.replace(token, declaration_value(sprite_name, offset_x));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_value() {
        assert_eq!(declaration_value("abc.png", 0), "url(abc.png) no-repeat");
        assert_eq!(declaration_value("abc.png", 16), "url(abc.png) no-repeat -16px 0");
    }

    #[test]
    fn test_rewrite_preserves_surroundings() {
        let mut sheet = Stylesheet::parse("\t.foo {background :  url('g1.a.png')  }").unwrap();
        let url = sheet.declarations()[0].value[0];

        rewrite(&mut sheet, url, "abc.png", 24);

        assert_eq!(
            sheet.to_css(),
            "\t.foo {background :  url(abc.png) no-repeat -24px 0  }"
        );
    }
}
