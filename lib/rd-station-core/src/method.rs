//! HTTP method types.

use derive_more::Display;

/// HTTP method of a CRM call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET - list or fetch resources.
    #[display("GET")]
    Get,
    /// POST - create a resource.
    #[display("POST")]
    Post,
    /// PUT - update a resource.
    #[display("PUT")]
    Put,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
        }
    }
}

impl TryFrom<http::Method> for Method {
    type Error = crate::Error;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        match method {
            http::Method::GET => Ok(Self::Get),
            http::Method::POST => Ok(Self::Post),
            http::Method::PUT => Ok(Self::Put),
            other => Err(crate::Error::invalid_input(format!(
                "unsupported HTTP method: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Put.to_string(), "PUT");
    }

    #[test]
    fn method_http_conversions() {
        assert_eq!(http::Method::from(Method::Put), http::Method::PUT);
        assert_eq!(
            Method::try_from(http::Method::POST).expect("POST"),
            Method::Post
        );
        assert!(Method::try_from(http::Method::HEAD).is_err());
        assert!(Method::try_from(http::Method::DELETE).is_err());
    }
}
