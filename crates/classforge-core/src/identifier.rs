//! Identifier alphabet of the generated language
//!
//! A C# identifier starts with `_` or a letter (Lu, Ll, Lt, Lm, Lo, Nl) and
//! continues with those plus Nd, Pc, Mn, Mc and Cf. The Unicode XID
//! properties cover the same classes except for a handful of
//! `Other_ID_Start`/`Other_ID_Continue` code points, which are removed here.
//! Format characters outside XID are rejected, so this alphabet is a
//! subset of what the language accepts.

use unicode_ident::{is_xid_continue, is_xid_start};

/// Whether `c` may start an identifier.
#[must_use]
pub fn is_identifier_start(c: char) -> bool {
    c == '_' || (is_xid_start(c) && !is_foreign_start(c))
}

/// Whether `c` may appear after the first character of an identifier.
#[must_use]
pub fn is_identifier_part(c: char) -> bool {
    c == '_' || (is_xid_continue(c) && !is_symbol(c) && !is_foreign_continue(c))
}

/// `Other_ID_Start` code points. The Mongolian marks are Mn and only
/// valid after the first character.
fn is_foreign_start(c: char) -> bool {
    matches!(c, '\u{1885}' | '\u{1886}') || is_symbol(c)
}

/// `℘` (Sm) and `℮` (So)
fn is_symbol(c: char) -> bool {
    matches!(c, '\u{2118}' | '\u{212E}')
}

/// `Other_ID_Continue` code points that are punctuation (Po) or other numbers (No).
fn is_foreign_continue(c: char) -> bool {
    matches!(
        c,
        '\u{00B7}' | '\u{0387}' | '\u{1369}'..='\u{1371}' | '\u{19DA}' | '\u{30FB}' | '\u{FF65}'
    )
}
