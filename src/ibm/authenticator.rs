//! Request authenticators

use std::fmt;

/// How requests are authenticated
///
/// Token acquisition is out of scope: a bearer token must already be valid.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Authenticator {
    /// No `Authorization` header
    #[default]
    NoAuth,
    /// `Authorization: Bearer <token>`
    BearerToken(String),
    /// HTTP basic authentication
    Basic { username: String, password: String },
}

impl Authenticator {
    /// Apply credentials to a request builder
    pub(crate) fn authenticate(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Authenticator::NoAuth => builder,
            Authenticator::BearerToken(token) => builder.bearer_auth(token),
            Authenticator::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
        }
    }

    /// Short name matching the `AUTH_TYPE` config values
    pub fn auth_type(&self) -> &'static str {
        match self {
            Authenticator::NoAuth => "noauth",
            Authenticator::BearerToken(_) => "bearertoken",
            Authenticator::Basic { .. } => "basic",
        }
    }
}

// Keep secrets out of debug logs.
impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authenticator::NoAuth => write!(f, "NoAuth"),
            Authenticator::BearerToken(_) => write!(f, "BearerToken(***)"),
            Authenticator::Basic { username, .. } => {
                write!(f, "Basic {{ username: {:?}, password: *** }}", username)
            }
        }
    }
}
