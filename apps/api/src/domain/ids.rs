use bson::oid::ObjectId;

use super::errors::{DomainError, DomainResult};

/// Parses a hex-encoded document id supplied by a client
///
/// `what` names the parameter in the error message ("user id",
/// "product id").
pub fn parse_object_id(raw: &str, what: &str) -> DomainResult<ObjectId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::InvalidArgument(format!("{} is empty", what)));
    }
    ObjectId::parse_str(raw)
        .map_err(|_| DomainError::InvalidArgument(format!("{} is not valid", what)))
}
