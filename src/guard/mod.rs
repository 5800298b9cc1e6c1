use rocket::async_trait;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

/// the header the access gate in front of this server writes the verified
/// user id into after it has checked the caller's credentials
pub static IDENTITY_HEADER: &str = "X-Verified-User";

/// the verified identity of the user making the request. Credential checking
/// happens upstream; by the time a request reaches this server the gate has
/// either attached this header or rejected the request. Every service
/// operation takes the identity as an explicit argument - nothing reads it
/// from ambient state
#[derive(Debug, PartialEq)]
pub struct CallerIdentity {
    pub user_id: String,
}

impl CallerIdentity {
    fn from(header: &str) -> Result<CallerIdentity, CallerIdentityError> {
        let trimmed = header.trim();
        if trimmed.is_empty() {
            return Err(CallerIdentityError::Blank);
        }
        Ok(CallerIdentity {
            user_id: trimmed.to_string(),
        })
    }
}

#[async_trait]
impl<'a> FromRequest<'a> for CallerIdentity {
    type Error = CallerIdentityError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        match request.headers().get_one(IDENTITY_HEADER) {
            None => Outcome::Error((Status::Unauthorized, CallerIdentityError::Missing)),
            Some(value) => match CallerIdentity::from(value) {
                Ok(identity) => Outcome::Success(identity),
                Err(e) => Outcome::Error((Status::Unauthorized, e)),
            },
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CallerIdentityError {
    Missing,
    Blank,
}
