//! HTTP status codes the service answers with.
//!
//! The service only ever says `200` or `404`: there is no `405` for other
//! methods and no `500` path.
//!
//! ```rust
//! use kiosk::Status;
//!
//! assert_eq!(u16::from(Status::NotFound), 404);
//! ```

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,       // 200
    NotFound, // 404
}

impl Status {
    /// The numeric code, e.g. `404`.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok       => 200,
            Self::NotFound => 404,
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        s.code()
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> Self {
        match s {
            Status::Ok       => http::StatusCode::OK,
            Status::NotFound => http::StatusCode::NOT_FOUND,
        }
    }
}
