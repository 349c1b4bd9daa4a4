use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use log::trace;
use rocket::Request;
use rocket::http::hyper::header;
use rocket::request::{FromRequest, Outcome};

/// The bearer credential of a request, if it carries one.
///
/// Tokens are opaque and never checked: a missing or malformed header is
/// not a reason to reject the request.
#[derive(Debug)]
pub struct MaybeBearer(Option<String>);

impl Display for MaybeBearer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(_) => f.write_str("bearer client"),
            None => f.write_str("anonymous client"),
        }
    }
}

fn parse_bearer(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty())
        .then_some(token)
}

#[async_trait]
impl<'r> FromRequest<'r> for MaybeBearer {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = request.headers()
            .get_one(header::AUTHORIZATION.as_str())
            .and_then(parse_bearer);
        trace!("bearer credential on {}: {token:?}", request.uri());
        Outcome::Success(MaybeBearer(token.map(str::to_owned)))
    }
}
