//! The request value shared by every provider, plus the encoders used to
//! fill it.
//!
//! A [`Query`](struct.Query.html) is rendered the same way every time, which is what
//! lets error messages embed an exact, reproducible URL.
use std::fmt;
use url::form_urlencoded;

// Pushes a parameter only when the option is configured
macro_rules! add_optional_param {
    ($query:expr, $param:expr, $name:expr) => {
        if let Some(p) = $param {
            $query.push($name, p)
        }
    };
}
pub(crate) use add_optional_param;

/// A fully built request: scheme, endpoint and ordered, already-encoded parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    secure: bool,
    base: String,
    params: Vec<(&'static str, String)>,
}

impl Query {
    /// Create an empty query against a scheme-less endpoint,
    /// e.g. `maps.googleapis.com/maps/api/geocode/json`
    pub fn new<S: Into<String>>(base: S, secure: bool) -> Self {
        Query {
            secure,
            base: base.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter. The value is used verbatim and must already be encoded.
    pub fn push<S: Into<String>>(&mut self, name: &'static str, value: S) {
        self.params.push((name, value.into()));
    }

    /// Builder flavour of [`push`](#method.push)
    pub fn with<S: Into<String>>(mut self, name: &'static str, value: S) -> Self {
        self.push(name, value);
        self
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Render the full request URL
    pub fn url(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = if self.secure { "https" } else { "http" };
        write!(f, "{}://{}", scheme, self.base)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, name, value)?;
        }
        Ok(())
    }
}

/// Percent-encode following RFC 3986: spaces become `%20`, only
/// `A-Z a-z 0-9 - _ . ~` are left untouched.
pub fn encode_raw(value: &str) -> String {
    // byte_serialize emits `+` only for spaces; a literal plus is `%2B`
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

/// Percent-encode as an HTML form value: spaces become `+`.
pub fn encode_form(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}

/// Fixed six-decimal rendering used for coordinates in every query
pub fn format_coordinate(value: f64) -> String {
    format!("{:.6}", value)
}
