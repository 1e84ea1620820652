//! Pattern syntax checks.

use regex_syntax::hir::Hir;

/// Parse a pattern terminal with its flags.
pub(crate) fn parse(value: &str, flags: Option<&str>) -> Result<Hir, String> {
    let mut parser = regex_syntax::ParserBuilder::new();
    for flag in flags.unwrap_or_default().chars() {
        match flag {
            'i' => {
                parser.case_insensitive(true);
            }
            's' => {
                parser.dot_matches_new_line(true);
            }
            'm' => {
                parser.multi_line(true);
            }
            'u' | 'v' | 'g' => {}
            other => return Err(format!("unsupported regex flag '{other}'")),
        }
    }
    parser.build().parse(value).map_err(|e| e.to_string())
}

/// Invalid patterns count as non-nullable; `symbols` reports them first.
pub(super) fn is_nullable(value: &str, flags: Option<&str>) -> bool {
    parse(value, flags).is_ok_and(|hir| hir.properties().minimum_len() == Some(0))
}
