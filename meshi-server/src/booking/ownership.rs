//! Ownership guard
//!
//! Only the user who created a review, reservation or favorite may change
//! or remove it. Staff get no bypass here; staff powers are limited to
//! shop and category writes.

use shared::error::AppError;
use shared::models::{Favorite, Reservation, Review};

/// The authenticated user performing an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub is_staff: bool,
}

impl Actor {
    /// `Err(StaffRequired)` unless the actor is staff
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.is_staff {
            Ok(())
        } else {
            tracing::warn!(user_id = self.user_id, "Staff-only operation denied");
            Err(AppError::staff_required())
        }
    }
}

/// A resource owned by exactly one user
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for Review {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl Owned for Reservation {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl Owned for Favorite {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// True iff `actor` owns `resource`
pub fn can_mutate<R: Owned + ?Sized>(actor: &Actor, resource: &R) -> bool {
    actor.user_id == resource.owner_id()
}

/// `Err(PermissionDenied)` unless `actor` owns `resource`
pub fn ensure_owner<R: Owned + ?Sized>(actor: &Actor, resource: &R) -> Result<(), AppError> {
    if can_mutate(actor, resource) {
        Ok(())
    } else {
        tracing::warn!(
            user_id = actor.user_id,
            owner_id = resource.owner_id(),
            "Mutation denied: not the owner"
        );
        Err(AppError::forbidden("You can only modify your own entries"))
    }
}
