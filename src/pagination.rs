use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

#[allow(clippy::unwrap_used)]
static NEXT_ARROW: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".pagination .prev-next a.link .next-arrow.icon-right-arrow-line").unwrap()
});

pub fn has_next(markup: &str) -> bool {
    has_next_document(&Html::parse_document(markup))
}

/// Whether the pagination bar links to a further page: some "next" arrow must
/// sit inside an anchor carrying a non-empty `href`. Page numbers are never
/// consulted.
pub fn has_next_document(html: &Html) -> bool {
    html.select(&NEXT_ARROW).any(|arrow| enclosing_link(arrow).is_some())
}

fn enclosing_link(element: ElementRef<'_>) -> Option<&str> {
    core::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|e| e.value().name() == "a" && e.value().attr("href").is_some())?
        .value()
        .attr("href")
        .filter(|href| !href.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(pagination: &str) -> String {
        format!(r#"<html><body><div class="reviews"></div>{pagination}</body></html>"#)
    }

    #[test]
    fn next_link_present() {
        let markup = page(
            r#"<div class="pagination">
                <div class="prev-next">
                    <a class="link" href="?p=1"><span class="prev-arrow icon-left-arrow-line"></span></a>
                    <a class="link" href="?p=3"><span class="next-arrow icon-right-arrow-line"></span></a>
                </div>
            </div>"#,
        );
        assert!(has_next(&markup));
    }

    #[test]
    fn last_page_has_only_prev() {
        let markup = page(
            r#"<div class="pagination">
                <div class="prev-next">
                    <a class="link" href="?p=4"><span class="prev-arrow icon-left-arrow-line"></span></a>
                </div>
            </div>"#,
        );
        assert!(!has_next(&markup));
    }

    #[test]
    fn disabled_arrow_without_href() {
        let markup = page(
            r#"<div class="pagination">
                <div class="prev-next">
                    <a class="link"><span class="next-arrow icon-right-arrow-line"></span></a>
                </div>
            </div>"#,
        );
        assert!(!has_next(&markup));

        let markup = page(
            r#"<div class="pagination">
                <div class="prev-next">
                    <a class="link" href=" "><span class="next-arrow icon-right-arrow-line"></span></a>
                </div>
            </div>"#,
        );
        assert!(!has_next(&markup));
    }

    #[test]
    fn arrow_outside_pagination_ignored() {
        let markup = page(
            r#"<div class="prev-next">
                <a class="link" href="?p=2"><span class="next-arrow icon-right-arrow-line"></span></a>
            </div>"#,
        );
        assert!(!has_next(&markup));
    }

    #[test]
    fn no_pagination_at_all() {
        assert!(!has_next(&page("")));
    }
}
