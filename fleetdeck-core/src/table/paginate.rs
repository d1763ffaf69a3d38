//! Paginator: fixed-size windowing over the filtered+sorted list

/// Total page count: `ceil(total / page_size)`, never less than 1 so an
/// empty result still renders "page 1 of 1".
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// The contiguous slice `[(page-1)*size, page*size)`, empty past the last
/// page. `page` is 1-based.
pub fn page_slice<T>(list: &[T], page: usize, page_size: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    if start >= list.len() {
        return &[];
    }
    let end = (start + page_size).min(list.len());
    &list[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_drivers_default_page_size() {
        let list: Vec<u32> = (1..=12).collect();
        assert_eq!(total_pages(list.len(), 10), 2);
        assert_eq!(page_slice(&list, 1, 10).len(), 10);
        assert_eq!(page_slice(&list, 2, 10).len(), 2);
        assert_eq!(page_slice(&list, 3, 10).len(), 0);
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let list: Vec<u32> = vec![];
        assert_eq!(total_pages(0, 25), 1);
        assert!(page_slice(&list, 1, 25).is_empty());
    }

    #[test]
    fn test_exact_multiple() {
        let list: Vec<u32> = (1..=20).collect();
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(page_slice(&list, 2, 10), &list[10..20]);
    }

    #[test]
    fn test_pages_partition_the_list() {
        let list: Vec<u32> = (1..=23).collect();
        let size = 5;
        let pages = total_pages(list.len(), size);
        let mut rebuilt = Vec::new();
        for p in 1..=pages {
            rebuilt.extend_from_slice(page_slice(&list, p, size));
        }
        assert_eq!(rebuilt, list);
    }

    #[test]
    fn test_page_zero_treated_as_first() {
        let list: Vec<u32> = (1..=5).collect();
        assert_eq!(page_slice(&list, 0, 10), &list[..]);
    }
}
