use core::fmt::Debug;

use bb8_postgres::{PostgresConnectionManager, bb8};
use tokio_postgres::{
    Client, NoTls,
    types::{IsNull, Kind, ToSql, Type, to_sql_checked},
};

use crate::config::{CONNECTION_TIMEOUT, DbConfig};

pub type ConnectionManager = PostgresConnectionManager<NoTls>;
pub type Pool = bb8::Pool<ConnectionManager>;
pub type DBError = tokio_postgres::Error;
pub type BB8Error = bb8::RunError<DBError>;
pub type DBResult<T> = Result<T, DBError>;

const SCHEMA: &str = include_str!("../sql/schema.sql");

pub async fn connect(config: &DbConfig) -> DBResult<Pool> {
    let manager = PostgresConnectionManager::new(config.to_postgres(), NoTls);

    let pool = Pool::builder()
        .max_size(1)
        .connection_timeout(CONNECTION_TIMEOUT)
        .build(manager)
        .await?;

    tracing::info!(target: "db", "connected to {}:{}/{}", config.host, config.port, config.dbname);
    Ok(pool)
}

/// Creates the review table and its unique index when they are missing.
pub async fn init_schema(conn: &Client) -> DBResult<()> {
    conn.batch_execute(SCHEMA).await?;
    tracing::info!(target: "db", "schema ready");
    Ok(())
}

/// Binds any exact-size iterator as a PostgreSQL array parameter, so a whole
/// batch can be passed to `unnest` without collecting it into a `Vec` first.
#[derive(Debug)]
#[repr(transparent)]
pub struct ToSqlIter<T>(pub T);

impl<T, U> ToSql for ToSqlIter<T>
where
    T: ExactSizeIterator<Item = U> + Clone + Debug,
    U: ToSql,
{
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut bytes::BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        let Kind::Array(member_type) = ty.kind() else {
            return Err(format!("expected array type, got {ty}").into());
        };

        let dimension = postgres_protocol::types::ArrayDimension {
            len: self.0.len().try_into()?,
            lower_bound: 1,
        };

        postgres_protocol::types::array_to_sql(
            Some(dimension),
            member_type.oid(),
            self.0.clone(),
            |e, w| match e.to_sql(member_type, w)? {
                IsNull::No => Ok(postgres_protocol::IsNull::No),
                IsNull::Yes => Ok(postgres_protocol::IsNull::Yes),
            },
            out,
        )?;
        Ok(IsNull::No)
    }

    #[inline]
    fn accepts(ty: &Type) -> bool {
        matches!(ty.kind(), Kind::Array(_))
    }

    to_sql_checked!();
}
