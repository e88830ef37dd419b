//! Page slicing

/// Number of pages needed for `total_rows` rows
pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1))
}

/// Rows `[(page-1)*size, page*size)` of `rows`, clipped to its length.
///
/// `page` is 1-based; page 0 is read as page 1.
pub fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let size = page_size.max(1);
    let start = (page.max(1) - 1).saturating_mul(size).min(rows.len());
    let end = start.saturating_add(size).min(rows.len());
    &rows[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn test_last_page_holds_remainder() {
        let rows: Vec<u32> = (1..=12).collect();
        assert_eq!(page_slice(&rows, 1, 5), &[1, 2, 3, 4, 5]);
        assert_eq!(page_slice(&rows, 3, 5), &[11, 12]);
        assert!(page_slice(&rows, 4, 5).is_empty());
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let rows = [1, 2, 3];
        assert!(page_slice(&rows, usize::MAX, usize::MAX).is_empty());
    }
}
