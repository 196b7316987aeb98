//! Authentication: JWT issuing/validation and the `CurrentUser` extractor

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};

use crate::booking::Actor;

/// Authenticated user, extracted from a bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub is_staff: bool,
}

impl CurrentUser {
    /// The acting user passed into authorization checks
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.id,
            is_staff: self.is_staff,
        }
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|e| format!("Invalid user ID in sub: {e}"))?;
        Ok(Self {
            id,
            username: claims.username,
            is_staff: claims.is_staff,
        })
    }
}
