//! Helpers for views that render rows and pagination.

use crate::i18n::Translations;
use crate::types::PaginationInfo;

/// Pages above this count are collapsed with ellipses.
const MAX_PLAIN_PAGES: u64 = 7;

/// Escape text for insertion into HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// One element of a pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Previous { target: u64, disabled: bool },
    Page { number: u64, current: bool },
    Ellipsis,
    Next { target: u64, disabled: bool },
}

/// Pagination bar for `meta`. Empty when everything fits on one page.
///
/// With more than seven pages only the first two, the last two and the
/// neighbours of the current page are listed; gaps become one ellipsis.
pub fn pagination_controls(meta: &PaginationInfo) -> Vec<PageControl> {
    let last = meta.last_page;
    if last <= 1 {
        return Vec::new();
    }
    let current = meta.page.min(last);

    let mut controls = vec![PageControl::Previous {
        target: current.saturating_sub(1).max(1),
        disabled: current <= 1,
    }];
    for number in 1..=last {
        let collapsed = last > MAX_PLAIN_PAGES
            && number > 2
            && number < last - 1
            && number.abs_diff(current) > 1;
        if collapsed {
            if controls.last() != Some(&PageControl::Ellipsis) {
                controls.push(PageControl::Ellipsis);
            }
            continue;
        }
        controls.push(PageControl::Page {
            number,
            current: number == current,
        });
    }
    controls.push(PageControl::Next {
        target: (current + 1).min(last),
        disabled: current >= last,
    });
    controls
}

/// "Showing {from} to {to} of {total} results", translated when the table
/// has `pagination.showing`.
pub fn pagination_summary(meta: &PaginationInfo, tr: &Translations) -> String {
    let (from, to, total) = (meta.from.to_string(), meta.to.to_string(), meta.total.to_string());
    tr.t_replace(
        "pagination.showing",
        Some("Showing {from} to {to} of {total} results"),
        &[("from", &from), ("to", &to), ("total", &total)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbers(controls: &[PageControl]) -> Vec<Option<u64>> {
        controls
            .iter()
            .filter_map(|c| match c {
                PageControl::Page { number, .. } => Some(Some(*number)),
                PageControl::Ellipsis => Some(None),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_single_page_has_no_controls() {
        assert!(pagination_controls(&PaginationInfo::new(8, 1, 10)).is_empty());
        assert!(pagination_controls(&PaginationInfo::new(0, 1, 10)).is_empty());
    }

    #[test]
    fn test_few_pages_listed_in_full() {
        let controls = pagination_controls(&PaginationInfo::new(47, 2, 10));
        assert_eq!(numbers(&controls), vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
        assert_eq!(
            controls.first(),
            Some(&PageControl::Previous { target: 1, disabled: false })
        );
        assert_eq!(
            controls.last(),
            Some(&PageControl::Next { target: 3, disabled: false })
        );
        assert!(controls.contains(&PageControl::Page { number: 2, current: true }));
    }

    #[test]
    fn test_many_pages_collapse_around_current() {
        let controls = pagination_controls(&PaginationInfo::new(200, 10, 10));
        assert_eq!(
            numbers(&controls),
            vec![Some(1), Some(2), None, Some(9), Some(10), Some(11), None, Some(19), Some(20)]
        );
    }

    #[test]
    fn test_first_page_has_single_gap() {
        let controls = pagination_controls(&PaginationInfo::new(100, 1, 10));
        assert_eq!(numbers(&controls), vec![Some(1), Some(2), None, Some(9), Some(10)]);
        assert_eq!(
            controls.first(),
            Some(&PageControl::Previous { target: 1, disabled: true })
        );
    }

    #[test]
    fn test_last_page_disables_next() {
        let controls = pagination_controls(&PaginationInfo::new(100, 10, 10));
        assert_eq!(
            controls.last(),
            Some(&PageControl::Next { target: 10, disabled: true })
        );
    }

    #[test]
    fn test_pagination_summary() {
        let meta = PaginationInfo::new(47, 2, 25);
        let built_in = Translations::built_in("en");
        assert_eq!(pagination_summary(&meta, &built_in), "Showing 26 to 47 of 47 results");

        let tr = Translations::new(
            "ar",
            json!({ "pagination": { "showing": "{from}-{to} من {total}" } }),
        );
        assert_eq!(pagination_summary(&meta, &tr), "26-47 من 47");
    }
}
