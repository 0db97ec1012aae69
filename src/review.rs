use serde::Serialize;

/// Stands in for a missing travel duration inside identity keys. Keys already
/// stored by earlier deployments carry this literal, so it must not change.
pub const ABSENT_DURATION: &str = "undefined";

/// One review block as rendered on a listing page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub name: String,
    pub age_group: String,
    pub travel_type: String,
    pub travel_date: String,
    pub travel_duration: Option<String>,
    pub travel_topic: Option<String>,
    pub review_title: String,
    pub review_body: String,
    pub hotel_name: String,
    pub hotel_location: String,
}

impl ReviewRecord {
    /// Deduplication key: `name-travelType-travelDate-travelDuration-hotelName`.
    ///
    /// Two reviews without a duration and otherwise equal in these fields
    /// produce the same key and are stored once.
    pub fn identity(&self) -> String {
        let duration = self.travel_duration.as_deref().unwrap_or(ABSENT_DURATION);
        format!(
            "{}-{}-{}-{duration}-{}",
            self.name, self.travel_type, self.travel_date, self.hotel_name,
        )
    }

    pub fn identified(self) -> IdentifiedReview {
        IdentifiedReview {
            unique_review_identifier: self.identity(),
            record: self,
        }
    }
}

/// A record tagged with its deduplication key, ready to be persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedReview {
    pub unique_review_identifier: String,
    #[serde(flatten)]
    pub record: ReviewRecord,
}

/// Tags a whole batch in one pass; nothing is persisted until this returns.
pub fn identify_all(records: Vec<ReviewRecord>) -> Vec<IdentifiedReview> {
    records.into_iter().map(ReviewRecord::identified).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anna() -> ReviewRecord {
        ReviewRecord {
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
        }
    }

    #[test]
    fn identity_layout() {
        assert_eq!(anna().identity(), "Anna-Family-June 2023-7 nights-Hotel X");
    }

    #[test]
    fn identity_is_deterministic() {
        let (a, b) = (anna(), anna());
        assert_eq!(a, b);
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn hotel_name_changes_identity() {
        let mut other = anna();
        other.hotel_name = "Hotel Y".into();
        assert_ne!(anna().identity(), other.identity());
    }

    #[test]
    fn fields_outside_key_do_not_change_identity() {
        let mut other = anna();
        other.review_body = "Something else entirely".into();
        other.travel_topic = None;
        assert_eq!(anna().identity(), other.identity());
    }

    #[test]
    fn absent_duration_uses_placeholder() {
        let mut r = anna();
        r.travel_duration = None;
        assert_eq!(r.identity(), "Anna-Family-June 2023-undefined-Hotel X");
        assert_ne!(r.identity(), anna().identity());
    }

    #[test]
    fn identify_all_tags_every_record() {
        let mut second = anna();
        second.name = "Ben".into();
        let batch = identify_all(vec![anna(), second]);
        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(|r| r.unique_review_identifier == r.record.identity()));
    }

    #[test]
    fn serializes_camel_case_flat() {
        let json = serde_json::to_value(anna().identified()).unwrap();
        assert_eq!(json["uniqueReviewIdentifier"], "Anna-Family-June 2023-7 nights-Hotel X");
        assert_eq!(json["ageGroup"], "25-34");
        assert_eq!(json["hotelLocation"], "Punta Cana");
    }
}
