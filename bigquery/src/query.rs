use std::collections::VecDeque;

use crate::http::bigquery_job_client::BigqueryJobClient;
use crate::http::job::get_query_results::GetQueryResultsRequest;
use crate::http::job::query::{QueryRequest, QueryResponse};
use crate::http::job::JobReference;
use crate::http::table::TableSchema;
use crate::http::tabledata::list::Tuple;
use crate::http::Error as HttpError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Row(#[from] row::Error),
}

/// Rows of a query job across every result page.
///
/// Pages are fetched with `jobs.getQueryResults` as the buffered rows run out. When the
/// first response came back before the job completed, the first call to [`QueryIterator::next`]
/// keeps asking until it has.
pub struct QueryIterator {
    client: BigqueryJobClient,
    job_reference: JobReference,
    request: GetQueryResultsRequest,
    chunk: VecDeque<Tuple>,
    schema: Option<TableSchema>,
    /// Row count of the whole result. Zero until the job completes.
    pub total_size: i64,
    complete: bool,
    exhausted: bool,
}

impl QueryIterator {
    pub(crate) fn new(client: BigqueryJobClient, request: &QueryRequest, response: QueryResponse) -> Self {
        let location = match &response.job_reference.location {
            Some(location) => Some(location.clone()),
            None if !request.location.is_empty() => Some(request.location.clone()),
            None => None,
        };
        let mut iter = Self {
            client,
            request: GetQueryResultsRequest {
                max_results: request.max_results,
                timeout_ms: request.timeout_ms,
                location,
                ..Default::default()
            },
            job_reference: response.job_reference,
            chunk: VecDeque::new(),
            schema: None,
            total_size: 0,
            complete: false,
            exhausted: false,
        };
        if response.job_complete {
            iter.fill(response.schema, response.total_rows, response.rows, response.page_token);
        }
        iter
    }

    pub fn job_reference(&self) -> &JobReference {
        &self.job_reference
    }

    /// `None` until the job completes.
    pub fn schema(&self) -> Option<&TableSchema> {
        self.schema.as_ref()
    }

    pub async fn next<T: TryFrom<Tuple, Error = row::Error>>(&mut self) -> Result<Option<T>, Error> {
        loop {
            if let Some(v) = self.chunk.pop_front() {
                return Ok(Some(T::try_from(v)?));
            }
            if self.exhausted {
                return Ok(None);
            }
            let response = self
                .client
                .get_query_results(
                    self.job_reference.project_id.as_str(),
                    self.job_reference.job_id.as_str(),
                    &self.request,
                    None,
                )
                .await?;
            if !response.job_complete {
                tracing::trace!("query job {} is not complete yet", self.job_reference.job_id);
                continue;
            }
            self.fill(response.schema, response.total_rows, response.rows, response.page_token);
        }
    }

    fn fill(
        &mut self,
        schema: Option<TableSchema>,
        total_rows: Option<i64>,
        rows: Option<Vec<Tuple>>,
        page_token: Option<String>,
    ) {
        if !self.complete {
            self.complete = true;
            self.schema = schema;
            self.total_size = total_rows.unwrap_or_default();
        }
        self.chunk = VecDeque::from(rows.unwrap_or_default());
        match page_token {
            Some(token) if !token.is_empty() => {
                self.request.page_token = Some(token);
                self.request.start_index = None;
            }
            _ => self.exhausted = true,
        }
    }
}

pub mod row {
    use std::str::FromStr;

    use base64::prelude::*;
    use time::error::ComponentRange;
    use time::OffsetDateTime;

    use crate::http::tabledata::list::{Cell, Tuple, Value};

    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        #[error("no data found at column {0}")]
        NoDataFound(usize),
        #[error("invalid type")]
        InvalidType,
        #[error("unexpected null value")]
        UnexpectedNullValue,
        #[error(transparent)]
        Timestamp(#[from] ComponentRange),
        #[error("invalid number {0}")]
        InvalidNumber(String),
        #[error("invalid bool {0}")]
        InvalidBool(String),
        #[error(transparent)]
        Base64(#[from] base64::DecodeError),
    }

    /// A result row. Columns are read by position with [`Row::column`].
    #[derive(Clone, Debug, PartialEq)]
    pub struct Row {
        inner: Vec<Cell>,
    }

    impl Row {
        pub fn column<'a, T: TryFrom<&'a Value, Error = Error>>(&'a self, index: usize) -> Result<T, Error> {
            let cell: &Cell = self.inner.get(index).ok_or(Error::NoDataFound(index))?;
            T::try_from(&cell.v)
        }

        pub fn len(&self) -> usize {
            self.inner.len()
        }

        pub fn is_empty(&self) -> bool {
            self.inner.is_empty()
        }
    }

    impl TryFrom<Tuple> for Row {
        type Error = Error;

        fn try_from(value: Tuple) -> Result<Self, Self::Error> {
            Ok(Self { inner: value.f })
        }
    }

    /// A `STRUCT` column.
    impl<'a> TryFrom<&'a Value> for Row {
        type Error = Error;

        fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
            match value {
                Value::Struct(tuple) => Ok(Self {
                    inner: tuple.f.clone(),
                }),
                Value::Null => Err(Error::UnexpectedNullValue),
                _ => Err(Error::InvalidType),
            }
        }
    }

    fn string(value: &Value) -> Result<&str, Error> {
        match value {
            Value::String(v) => Ok(v.as_str()),
            Value::Null => Err(Error::UnexpectedNullValue),
            _ => Err(Error::InvalidType),
        }
    }

    fn number<T: FromStr>(value: &Value) -> Result<T, Error> {
        let v = string(value)?;
        v.parse::<T>().map_err(|_| Error::InvalidNumber(v.to_string()))
    }

    impl<'a> TryFrom<&'a Value> for &'a str {
        type Error = Error;

        fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
            string(value)
        }
    }

    impl<'a> TryFrom<&'a Value> for String {
        type Error = Error;

        fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
            string(value).map(|v| v.to_string())
        }
    }

    impl<'a> TryFrom<&'a Value> for i64 {
        type Error = Error;

        fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
            number(value)
        }
    }

    /// `Infinity`, `-Infinity` and `NaN` are accepted.
    impl<'a> TryFrom<&'a Value> for f64 {
        type Error = Error;

        fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
            number(value)
        }
    }

    impl<'a> TryFrom<&'a Value> for bool {
        type Error = Error;

        fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
            match string(value)? {
                "true" => Ok(true),
                "false" => Ok(false),
                v => Err(Error::InvalidBool(v.to_string())),
            }
        }
    }

    /// `BYTES` columns arrive base64 encoded.
    impl<'a> TryFrom<&'a Value> for Vec<u8> {
        type Error = Error;

        fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
            Ok(BASE64_STANDARD.decode(string(value)?)?)
        }
    }

    /// `TIMESTAMP` columns arrive as floating seconds since the epoch.
    impl<'a> TryFrom<&'a Value> for OffsetDateTime {
        type Error = Error;

        fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
            let f: f64 = number(value)?;
            let sec = f.trunc();
            // Microsecond precision.
            let micro = ((f - sec) * 1_000_000.0).round();
            Ok(OffsetDateTime::from_unix_timestamp_nanos(
                sec as i128 * 1_000_000_000 + micro as i128 * 1000,
            )?)
        }
    }

    macro_rules! nullable {
        ($($t:ty),*) => {
            $(
                impl<'a> TryFrom<&'a Value> for Option<$t> {
                    type Error = Error;

                    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
                        match value {
                            Value::Null => Ok(None),
                            v => <$t>::try_from(v).map(Some),
                        }
                    }
                }
            )*
        };
    }

    nullable!(String, i64, f64, bool, Vec<u8>, OffsetDateTime, Row);

    /// A `REPEATED` column.
    impl<'a, T> TryFrom<&'a Value> for Vec<T>
    where
        T: TryFrom<&'a Value, Error = Error>,
        T: Repeatable,
    {
        type Error = Error;

        fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
            match value {
                Value::Array(cells) => cells.iter().map(|c| T::try_from(&c.v)).collect(),
                Value::Null => Ok(vec![]),
                _ => Err(Error::InvalidType),
            }
        }
    }

    /// Element types of `REPEATED` columns.
    pub trait Repeatable {}
    impl Repeatable for String {}
    impl Repeatable for i64 {}
    impl Repeatable for f64 {}
    impl Repeatable for bool {}
    impl Repeatable for OffsetDateTime {}
    impl Repeatable for Row {}
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use time::macros::datetime;

    use crate::http::tabledata::list::Tuple;
    use crate::query::row::{Error, Row};

    fn row() -> Row {
        let tuple: Tuple = serde_json::from_value(json!({"f": [
            {"v": "alice"},
            {"v": "42"},
            {"v": "1.5"},
            {"v": "true"},
            {"v": null},
            {"v": "1.700000000123456E9"},
            {"v": [{"v": "a"}, {"v": "b"}]},
            {"v": {"f": [{"v": "nested"}]}},
            {"v": "aGVsbG8="}
        ]}))
        .unwrap();
        Row::try_from(tuple).unwrap()
    }

    #[test]
    fn test_columns() {
        let row = row();
        assert_eq!(row.len(), 9);
        assert_eq!(row.column::<&str>(0).unwrap(), "alice");
        assert_eq!(row.column::<String>(0).unwrap(), "alice");
        assert_eq!(row.column::<i64>(1).unwrap(), 42);
        assert_eq!(row.column::<f64>(2).unwrap(), 1.5);
        assert!(row.column::<bool>(3).unwrap());
        assert_eq!(row.column::<Option<String>>(4).unwrap(), None);
        assert_eq!(row.column::<Option<i64>>(1).unwrap(), Some(42));
        assert_eq!(
            row.column::<time::OffsetDateTime>(5).unwrap(),
            datetime!(2023-11-14 22:13:20.123456 UTC)
        );
        assert_eq!(row.column::<Vec<String>>(6).unwrap(), vec!["a", "b"]);
        let nested = row.column::<Row>(7).unwrap();
        assert_eq!(nested.column::<&str>(0).unwrap(), "nested");
        assert_eq!(row.column::<Vec<u8>>(8).unwrap(), b"hello".to_vec());
    }

    #[test]
    fn test_column_errors() {
        let row = row();
        assert!(matches!(row.column::<String>(4), Err(Error::UnexpectedNullValue)));
        assert!(matches!(row.column::<i64>(0), Err(Error::InvalidNumber(_))));
        assert!(matches!(row.column::<bool>(0), Err(Error::InvalidBool(_))));
        assert!(matches!(row.column::<String>(6), Err(Error::InvalidType)));
        assert!(matches!(row.column::<String>(20), Err(Error::NoDataFound(20))));
    }
}
