//! Question list pagination.

/// Questions returned per page of `GET /questions`
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Resolve the raw `page` query value.
///
/// Values that do not parse fall back to page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(1)
}

/// Row offset of the first question on `page`.
///
/// `None` when the page cannot hold any question (zero, negative, or so
/// large the offset overflows).
pub fn page_offset(page: i64) -> Option<usize> {
    let index = usize::try_from(page.checked_sub(1)?).ok()?;
    index.checked_mul(QUESTIONS_PER_PAGE)
}

/// Number of pages needed for `total` questions
pub fn total_pages(total: usize) -> usize {
    total.div_ceil(QUESTIONS_PER_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_defaults() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("3")), 3);
        assert_eq!(parse_page(Some("-2")), -2);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1), Some(0));
        assert_eq!(page_offset(3), Some(20));
        assert_eq!(page_offset(0), None);
        assert_eq!(page_offset(-4), None);
        assert_eq!(page_offset(i64::MIN), None);
    }

    #[test]
    fn test_total_pages_exact_multiple() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(20), 2);
    }
}
