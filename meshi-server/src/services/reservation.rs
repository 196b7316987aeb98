//! Reservations: admission rule, uniqueness and owner-only access

use chrono::NaiveDateTime;
use shared::error::{AppError, ErrorCode};
use shared::models::{Page, Reservation, ReservationRequest, ReservationWithShop};
use sqlx::SqlitePool;

use super::RESERVATIONS_PER_PAGE;
use super::shop as shop_service;
use crate::booking::{Actor, Rejection, RejectionKind, admit, ensure_owner};
use crate::db::repository::{RepoError, reservation};
use crate::error::{ServiceError, ServiceResult};

/// Admit and persist a reservation for `actor`
///
/// `now` is the current civil time in the shops' zone.
pub async fn make(
    pool: &SqlitePool,
    actor: &Actor,
    shop_id: i64,
    req: ReservationRequest,
    now: NaiveDateTime,
) -> ServiceResult<Reservation> {
    let shop = shop_service::find(pool, shop_id).await?;

    admit(&shop.opening_hours, req.date, req.time, req.num_people, now)
        .into_result()
        .map_err(|r| rejected(shop_id, actor, r))?;

    if reservation::exists(pool, shop_id, actor.user_id, req.date, req.time).await? {
        return Err(already_booked(shop_id, actor));
    }

    match reservation::create(pool, shop_id, actor.user_id, req.date, req.time, req.num_people)
        .await
    {
        Ok(created) => {
            tracing::info!(
                reservation_id = created.id,
                shop_id,
                user_id = actor.user_id,
                date = %created.date,
                time = %created.time,
                "Reservation made"
            );
            Ok(created)
        }
        Err(RepoError::Duplicate(_)) => Err(already_booked(shop_id, actor)),
        Err(e) => Err(e.into()),
    }
}

fn rejected(shop_id: i64, actor: &Actor, rejection: Rejection) -> ServiceError {
    match rejection.kind() {
        RejectionKind::DataIntegrity => tracing::error!(
            shop_id,
            reason = %rejection.reason(),
            "Shop opening hours unusable"
        ),
        RejectionKind::InputInvalid => tracing::warn!(
            shop_id,
            user_id = actor.user_id,
            reason = %rejection.reason(),
            "Reservation rejected"
        ),
    }
    AppError::from(rejection).into()
}

fn already_booked(shop_id: i64, actor: &Actor) -> ServiceError {
    tracing::warn!(shop_id, user_id = actor.user_id, "Duplicate reservation");
    AppError::new(ErrorCode::ReservationAlreadyExists)
        .with_detail("shop_id", shop_id)
        .into()
}

/// The actor's reservations, latest first
pub async fn list_mine(
    pool: &SqlitePool,
    actor: &Actor,
    page: Option<u32>,
) -> ServiceResult<Page<ReservationWithShop>> {
    let page = page.unwrap_or(1).max(1);
    let (items, total) =
        reservation::list_for_user(pool, actor.user_id, page, RESERVATIONS_PER_PAGE).await?;
    Ok(Page {
        items,
        total,
        page,
        per_page: RESERVATIONS_PER_PAGE,
    })
}

/// A single reservation, visible to its owner only
pub async fn get(pool: &SqlitePool, actor: &Actor, id: i64) -> ServiceResult<Reservation> {
    let found = reservation::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::ReservationNotFound,
            format!("Reservation {id} not found"),
        )
    })?;
    ensure_owner(actor, &found)?;
    Ok(found)
}

pub async fn cancel(pool: &SqlitePool, actor: &Actor, id: i64) -> ServiceResult<()> {
    get(pool, actor, id).await?;
    reservation::delete(pool, id).await?;
    tracing::info!(reservation_id = id, user_id = actor.user_id, "Reservation cancelled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support;
    use chrono::{NaiveDate, NaiveTime};
    use shared::models::ShopUpdate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn req(y: i32, m: u32, d: u32, h: u32, min: u32, n: i32) -> ReservationRequest {
        ReservationRequest {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            time: NaiveTime::from_hms_opt(h, min, 0).unwrap(),
            num_people: n,
        }
    }

    fn code(e: ServiceError) -> ErrorCode {
        AppError::from(e).code
    }

    async fn setup(hours: &str) -> (SqlitePool, Actor, i64) {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "booker").await;
        let shop = test_support::shop(&pool, "Hitsumabushi", hours).await;
        let actor = Actor {
            user_id: user.id,
            is_staff: false,
        };
        (pool, actor, shop.id)
    }

    #[tokio::test]
    async fn test_scenario_hours_and_past() {
        let (pool, actor, shop_id) = setup("11:00-22:00").await;

        make(&pool, &actor, shop_id, req(2024, 1, 1, 21, 59, 2), now())
            .await
            .unwrap();

        let err = make(&pool, &actor, shop_id, req(2024, 1, 1, 22, 0, 2), now())
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::ReservationOutsideHours);

        let err = make(&pool, &actor, shop_id, req(2023, 12, 31, 12, 0, 2), now())
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::ReservationInPast);
    }

    #[tokio::test]
    async fn test_duplicate_is_conflict_not_validation() {
        let (pool, actor, shop_id) = setup("11:00-22:00").await;
        make(&pool, &actor, shop_id, req(2024, 2, 1, 12, 0, 2), now())
            .await
            .unwrap();

        let err = AppError::from(
            make(&pool, &actor, shop_id, req(2024, 2, 1, 12, 0, 3), now())
                .await
                .unwrap_err(),
        );
        assert_eq!(err.code, ErrorCode::ReservationAlreadyExists);
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);

        let (rows, total) = reservation::list_for_user(&pool, actor.user_id, 1, 10)
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].num_people, 2);
    }

    #[tokio::test]
    async fn test_concurrent_same_slot_one_wins() {
        let (pool, actor, shop_id) = setup("11:00-22:00").await;

        let (a, b) = tokio::join!(
            make(&pool, &actor, shop_id, req(2024, 3, 1, 19, 0, 2), now()),
            make(&pool, &actor, shop_id, req(2024, 3, 1, 19, 0, 4), now()),
        );
        let codes: Vec<_> = [a, b]
            .into_iter()
            .map(|r| r.map(|_| ()).map_err(code))
            .collect();
        assert_eq!(codes.iter().filter(|r| r.is_ok()).count(), 1, "{codes:?}");
        assert!(
            codes.contains(&Err(ErrorCode::ReservationAlreadyExists)),
            "{codes:?}"
        );

        let (_, total) = reservation::list_for_user(&pool, actor.user_id, 1, 10)
            .await
            .unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_unconfigured_hours_is_data_integrity() {
        let (pool, actor, shop_id) = setup("").await;
        let err = AppError::from(
            make(&pool, &actor, shop_id, req(2024, 2, 1, 12, 0, 2), now())
                .await
                .unwrap_err(),
        );
        assert_eq!(err.code, ErrorCode::ShopHoursNotConfigured);
        assert_eq!(err.http_status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_overnight_hours_stored_directly_are_rejected() {
        let (pool, actor, shop_id) = setup("").await;
        crate::db::repository::shop::update(
            &pool,
            shop_id,
            ShopUpdate {
                opening_hours: Some("22:00-02:00".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let err = make(&pool, &actor, shop_id, req(2024, 2, 1, 23, 0, 2), now())
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::ShopHoursNotConfigured);
    }

    #[tokio::test]
    async fn test_party_size_and_unknown_shop() {
        let (pool, actor, shop_id) = setup("11:00-22:00").await;
        let err = make(&pool, &actor, shop_id, req(2024, 2, 1, 12, 0, 0), now())
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::InvalidPartySize);

        let err = make(&pool, &actor, 404, req(2024, 2, 1, 12, 0, 2), now())
            .await
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::ShopNotFound);
    }

    #[tokio::test]
    async fn test_only_owner_can_view_or_cancel() {
        let (pool, actor, shop_id) = setup("11:00-22:00").await;
        let other = test_support::user(&pool, "other").await;
        let other = Actor {
            user_id: other.id,
            is_staff: true,
        };
        let made = make(&pool, &actor, shop_id, req(2024, 2, 1, 12, 0, 2), now())
            .await
            .unwrap();

        assert_eq!(get(&pool, &actor, made.id).await.unwrap().id, made.id);
        let err = get(&pool, &other, made.id).await.unwrap_err();
        assert_eq!(code(err), ErrorCode::PermissionDenied);
        let err = cancel(&pool, &other, made.id).await.unwrap_err();
        assert_eq!(code(err), ErrorCode::PermissionDenied);

        cancel(&pool, &actor, made.id).await.unwrap();
        let err = get(&pool, &actor, made.id).await.unwrap_err();
        assert_eq!(code(err), ErrorCode::ReservationNotFound);
    }

    #[tokio::test]
    async fn test_list_mine_only_own() {
        let (pool, actor, shop_id) = setup("11:00-22:00").await;
        let other = test_support::user(&pool, "other").await;
        let other = Actor {
            user_id: other.id,
            is_staff: false,
        };
        make(&pool, &actor, shop_id, req(2024, 2, 1, 12, 0, 2), now())
            .await
            .unwrap();
        make(&pool, &other, shop_id, req(2024, 2, 1, 12, 0, 2), now())
            .await
            .unwrap();

        let page = list_mine(&pool, &actor, None).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.per_page, RESERVATIONS_PER_PAGE);
        assert_eq!(page.items[0].shop_name, "Hitsumabushi");
    }
}
