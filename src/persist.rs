use serde::Serialize;
use tokio_postgres::Client;

use crate::{
    db::{Pool, ToSqlIter},
    error::PersistError,
    review::IdentifiedReview,
};

const SQL: &str = "with tmp_insert(u, n, a, tt, td, du, tp, rt, rb, hn, hl) as (select * from unnest($1::varchar[], $2::varchar[], $3::varchar[], $4::varchar[], $5::varchar[], $6::varchar[], $7::varchar[], $8::varchar[], $9::text[], $10::varchar[], $11::varchar[])) insert into review (\"uniqueReviewIdentifier\", \"name\", \"ageGroup\", \"travelType\", \"travelDate\", \"travelDuration\", \"travelTopic\", \"reviewTitle\", \"reviewBody\", \"hotelName\", \"hotelLocation\") select u, n, a, tt, td, du, tp, rt, rb, hn, hl from tmp_insert on conflict (\"uniqueReviewIdentifier\") do nothing returning id";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PersistOutcome {
    pub attempted: usize,
    pub inserted: usize,
    pub skipped: usize,
    /// Generated ids of the newly inserted rows.
    pub identifiers: Vec<i64>,
}

/// Inserts the batch in one statement. Rows whose identity already exists,
/// in the table or earlier in the same batch, are skipped silently.
pub async fn save(conn: &Client, batch: &[IdentifiedReview]) -> Result<PersistOutcome, PersistError> {
    let stmt = conn.prepare(SQL).await?;
    let rows = conn
        .query(
            &stmt,
            &[
                &ToSqlIter(batch.iter().map(|x| &*x.unique_review_identifier)),
                &ToSqlIter(batch.iter().map(|x| &*x.record.name)),
                &ToSqlIter(batch.iter().map(|x| &*x.record.age_group)),
                &ToSqlIter(batch.iter().map(|x| &*x.record.travel_type)),
                &ToSqlIter(batch.iter().map(|x| &*x.record.travel_date)),
                &ToSqlIter(batch.iter().map(|x| x.record.travel_duration.as_deref())),
                &ToSqlIter(batch.iter().map(|x| x.record.travel_topic.as_deref())),
                &ToSqlIter(batch.iter().map(|x| &*x.record.review_title)),
                &ToSqlIter(batch.iter().map(|x| &*x.record.review_body)),
                &ToSqlIter(batch.iter().map(|x| &*x.record.hotel_name)),
                &ToSqlIter(batch.iter().map(|x| &*x.record.hotel_location)),
            ],
        )
        .await?;

    let identifiers = rows
        .iter()
        .map(|row| row.try_get(0))
        .collect::<Result<Vec<i64>, _>>()?;

    Ok(PersistOutcome {
        attempted: batch.len(),
        inserted: identifiers.len(),
        skipped: batch.len() - identifiers.len(),
        identifiers,
    })
}

pub async fn save_pooled(pool: &Pool, batch: &[IdentifiedReview]) -> Result<PersistOutcome, PersistError> {
    let res: Result<_, PersistError> = async {
        let conn = pool.get().await?;
        save(&conn, batch).await
    }
    .await;

    match &res {
        Ok(outcome) => tracing::info!(
            target: "db",
            "\x1b[36minsert {}/{} reviews ({} duplicates)\x1b[0m",
            outcome.inserted, outcome.attempted, outcome.skipped,
        ),
        Err(e) => tracing::error!(target: "db", "\x1b[31m{e}\x1b[0m"),
    }
    res
}
