use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::{
    review::ReviewRecord,
    util::{first_text, select_text, split_trimmed},
};

/// Separator between the parts of the "travelled as / when / how long / why" line.
pub const TRAVEL_INFO_DELIMITER: &str = " • ";

#[allow(clippy::unwrap_used)]
static PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[()]").unwrap());

pub static SELECTORS: LazyLock<Selectors> = LazyLock::new(Selectors::new);

pub struct Selectors {
    pub review: Selector,
    pub first_name: Selector,
    pub age_group: Selector,
    pub travel_info: Selector,
    pub title: Selector,
    pub body: Selector,
    pub hotel_name: Selector,
    pub hotel_location: Selector,
}

impl Selectors {
    #[allow(clippy::unwrap_used)]
    fn new() -> Self {
        Self {
            review: Selector::parse(".recent-hotel-review.row").unwrap(),
            first_name: Selector::parse(".hotelReviewHeader-firstName").unwrap(),
            age_group: Selector::parse(".ageGroup").unwrap(),
            travel_info: Selector::parse(".css-b1qje2").unwrap(),
            title: Selector::parse("h2").unwrap(),
            body: Selector::parse(".text").unwrap(),
            hotel_name: Selector::parse(".hotel-name-container > a").unwrap(),
            hotel_location: Selector::parse(".hotel-name-container .parents").unwrap(),
        }
    }
}

pub fn extract(markup: &str) -> Vec<ReviewRecord> {
    extract_document(&Html::parse_document(markup))
}

/// Every review block of one listing page, in document order. Blocks whose
/// fields are missing still yield a record, with those fields left empty.
pub fn extract_document(html: &Html) -> Vec<ReviewRecord> {
    let sel = &*SELECTORS;
    let records = html
        .select(&sel.review)
        .map(|block| parse_block(block, sel))
        .collect::<Vec<_>>();
    tracing::debug!(target: "extract", "{} review blocks", records.len());
    records
}

fn parse_block(block: ElementRef, sel: &Selectors) -> ReviewRecord {
    let age_group = select_text(block, &sel.age_group);
    let travel_info = select_text(block, &sel.travel_info);
    let mut travel = split_trimmed(&travel_info, TRAVEL_INFO_DELIMITER);

    ReviewRecord {
        name: select_text(block, &sel.first_name),
        age_group: PARENS.replace_all(&age_group, "").into_owned(),
        travel_type: travel.next().unwrap_or_default().to_owned(),
        travel_date: travel.next().unwrap_or_default().to_owned(),
        travel_duration: travel.next().map(ToOwned::to_owned),
        travel_topic: travel.next().map(ToOwned::to_owned),
        review_title: first_text(block, &sel.title),
        review_body: select_text(block, &sel.body).trim().to_owned(),
        hotel_name: first_text(block, &sel.hotel_name),
        hotel_location: select_text(block, &sel.hotel_location).trim().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(inner: &str) -> String {
        format!(r#"<div class="recent-hotel-review row">{inner}</div>"#)
    }

    const ANNA: &str = r#"
        <span class="hotelReviewHeader-firstName">Anna</span>
        <span class="ageGroup">(25-34)</span>
        <div class="css-b1qje2">Family • June 2023 • 7 nights • Beach</div>
        <h2> Great stay </h2>
        <div class="text">
            Loved it
        </div>
        <div class="hotel-name-container">
            <a href="/hi/hotel-x">Hotel X</a>
            <span class="parents"> Punta Cana </span>
        </div>
    "#;

    #[test]
    fn selectors_compile() {
        let _ = &*SELECTORS;
    }

    #[test]
    fn full_block() {
        let records = extract(&block(ANNA));
        assert_eq!(
            records,
            [ReviewRecord {
                name: "Anna".into(),
                age_group: "25-34".into(),
                travel_type: "Family".into(),
                travel_date: "June 2023".into(),
                travel_duration: Some("7 nights".into()),
                travel_topic: Some("Beach".into()),
                review_title: "Great stay".into(),
                review_body: "Loved it".into(),
                hotel_name: "Hotel X".into(),
                hotel_location: "Punta Cana".into(),
            }]
        );
    }

    #[test]
    fn optional_travel_parts() {
        let inner = ANNA.replace("Family • June 2023 • 7 nights • Beach", "Couple • May 2022");
        let records = extract(&block(&inner));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].travel_type, "Couple");
        assert_eq!(records[0].travel_date, "May 2022");
        assert_eq!(records[0].travel_duration, None);
        assert_eq!(records[0].travel_topic, None);
    }

    #[test]
    fn duration_without_topic() {
        let inner = ANNA.replace("Family • June 2023 • 7 nights • Beach", "Solo • April 2021 • 3 nights");
        let records = extract(&block(&inner));
        assert_eq!(records[0].travel_duration.as_deref(), Some("3 nights"));
        assert_eq!(records[0].travel_topic, None);
    }

    #[test]
    fn short_travel_info_is_not_an_error() {
        let inner = ANNA.replace("Family • June 2023 • 7 nights • Beach", "Friends");
        let records = extract(&block(&inner));
        assert_eq!(records[0].travel_type, "Friends");
        assert_eq!(records[0].travel_date, "");

        let inner = ANNA.replace(r#"<div class="css-b1qje2">Family • June 2023 • 7 nights • Beach</div>"#, "");
        let records = extract(&block(&inner));
        assert_eq!(records[0].travel_type, "");
        assert_eq!(records[0].travel_date, "");
        assert_eq!(records[0].travel_duration, None);
    }

    #[test]
    fn empty_block_still_emitted() {
        let records = extract(&block(""));
        assert_eq!(records, [ReviewRecord::default()]);
    }

    #[test]
    fn first_hotel_link_only() {
        let inner = ANNA.replace(
            r#"<a href="/hi/hotel-x">Hotel X</a>"#,
            r#"<a href="/hi/hotel-x"> Hotel X </a><a href="/hi/other">Other</a>"#,
        );
        let records = extract(&block(&inner));
        assert_eq!(records[0].hotel_name, "Hotel X");
    }

    #[test]
    fn multiple_blocks_in_order() {
        let page = format!(
            "<html><body>{}{}<div class=\"recent-hotel-review\">not a row</div></body></html>",
            block(ANNA),
            block(&ANNA.replace("Anna", "Ben")),
        );
        let names = extract(&page).into_iter().map(|r| r.name).collect::<Vec<_>>();
        assert_eq!(names, ["Anna", "Ben"]);
    }

    #[test]
    fn page_without_reviews() {
        assert!(extract("<html><body><p>nothing here</p></body></html>").is_empty());
    }
}
