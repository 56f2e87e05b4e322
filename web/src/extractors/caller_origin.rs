use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        header::{ORIGIN, REFERER},
        request::Parts,
        HeaderMap,
    },
};
use log::*;
use url::Url;

/// The `scheme://host[:port]` of the page that sent the browser here, if known.
///
/// Taken from `Referer`, falling back to `Origin`. Anything unparseable or opaque
/// (such as `Origin: null`) yields `None`.
pub(crate) struct CallerOrigin(pub Option<String>);

impl<S> FromRequestParts<S> for CallerOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let origin = origin_from_headers(&parts.headers);
        trace!("Caller origin: {:?}", origin);
        Ok(CallerOrigin(origin))
    }
}

fn origin_from_headers(headers: &HeaderMap) -> Option<String> {
    [REFERER, ORIGIN]
        .iter()
        .filter_map(|name| headers.get(name)?.to_str().ok())
        .find_map(origin_of)
}

fn origin_of(value: &str) -> Option<String> {
    let origin = Url::parse(value).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}
