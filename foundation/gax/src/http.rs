use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Response;
use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use token_source::TokenSource;

use crate::error::{Error, ErrorWrapper};

/// Shared transport of every REST client: endpoint, authorization and response decoding.
#[derive(Debug, Clone)]
pub struct HttpClient {
    ts: Option<Arc<dyn TokenSource>>,
    endpoint: String,
    http: Client,
    user_agent: &'static str,
    debug: bool,
}

impl HttpClient {
    /// `ts` of `None` sends unauthenticated requests.
    pub fn new(
        ts: Option<Arc<dyn TokenSource>>,
        endpoint: impl Into<String>,
        http: Client,
        user_agent: &'static str,
        debug: bool,
    ) -> Self {
        Self {
            ts,
            endpoint: endpoint.into(),
            http,
            user_agent,
            debug,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    async fn with_headers(&self, builder: RequestBuilder) -> Result<RequestBuilder, Error> {
        let builder = builder
            .header("X-Goog-Api-Client", "rust")
            .header(reqwest::header::USER_AGENT, self.user_agent);
        match &self.ts {
            Some(ts) => {
                let token = ts.token().await.map_err(Error::TokenSource)?;
                Ok(builder.header(reqwest::header::AUTHORIZATION, token))
            }
            None => Ok(builder),
        }
    }

    /// Sends the request and decodes the JSON body.
    pub async fn send<T>(&self, builder: RequestBuilder) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send_raw(builder).await?;
        if self.debug {
            let text = response.text().await?;
            tracing::info!("{}", text);
            Ok(serde_json::from_str(text.as_str())?)
        } else {
            Ok(response.json().await?)
        }
    }

    /// Sends the request and discards the body.
    pub async fn send_get_empty(&self, builder: RequestBuilder) -> Result<(), Error> {
        self.send_raw(builder).await?;
        Ok(())
    }

    /// Sends the request and returns the successful response untouched.
    pub async fn send_raw(&self, builder: RequestBuilder) -> Result<Response, Error> {
        let request = self.with_headers(builder).await?;
        let response = request.send().await?;
        check_response_status(response).await
    }
}

/// Checks whether an HTTP response is successful and returns it, or returns an error.
pub async fn check_response_status(response: Response) -> Result<Response, Error> {
    // Check the status code, returning the response if it is not an error.
    let error = match response.error_for_status_ref() {
        Ok(_) => return Ok(response),
        Err(error) => error,
    };

    // try to extract a response error, falling back to the status error if it can not be parsed.
    Err(response
        .json::<ErrorWrapper>()
        .await
        .map(|wrapper| Error::Response(wrapper.error))
        .unwrap_or(Error::HttpClient(error)))
}

pub trait Escape {
    fn escape(&self) -> String;
}

impl Escape for String {
    fn escape(&self) -> String {
        self.as_str().escape()
    }
}

impl Escape for str {
    fn escape(&self) -> String {
        utf8_percent_encode(self, ENCODE_SET).to_string()
    }
}

const ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'*').remove(b'-').remove(b'.').remove(b'_');

/// Deserializes int64 values that Google encodes as JSON strings.
pub fn from_str_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    let s: Result<Value, _> = Deserialize::deserialize(deserializer);
    match s {
        Ok(Value::String(s)) => T::from_str(&s).map_err(de::Error::custom).map(Some),
        Ok(Value::Number(num)) => T::from_str(&num.to_string()).map_err(de::Error::custom).map(Some),
        Ok(Value::Null) => Ok(None),
        Ok(_) => Err(de::Error::custom("Incorrect type")),
        Err(_) => Ok(None),
    }
}

pub fn from_str<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: de::Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    match v {
        Value::String(s) => T::from_str(&s).map_err(de::Error::custom),
        Value::Number(num) => T::from_str(&num.to_string()).map_err(de::Error::custom),
        _ => Err(de::Error::custom("Incorrect type")),
    }
}

pub fn is_i64_zero(num: &i64) -> bool {
    *num == 0
}

/// Provides serialization and deserialization for base64 encoded fields.
pub mod base64 {
    use base64::prelude::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        BASE64_STANDARD.encode(value.as_ref()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        BASE64_STANDARD
            .decode(String::deserialize(deserializer)?)
            .map_err(serde::de::Error::custom)
    }
}
