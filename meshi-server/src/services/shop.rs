//! Shop listing, detail and staff maintenance

use shared::error::{AppError, ErrorCode};
use shared::models::{Page, Shop, ShopCreate, ShopDetail, ShopQuery, ShopUpdate};
use sqlx::SqlitePool;

use super::SHOPS_PER_PAGE;
use crate::booking::{Actor, OpeningHours};
use crate::db::repository::{category, review, shop};
use crate::error::ServiceResult;

pub async fn list(pool: &SqlitePool, query: &ShopQuery) -> ServiceResult<Page<Shop>> {
    let page = query.page.unwrap_or(1).max(1);
    let filter = shop::ShopFilter {
        keyword: query.keyword.as_deref(),
        category_id: query.category_id,
    };
    let (items, total) = shop::list(pool, &filter, page, SHOPS_PER_PAGE).await?;
    Ok(Page {
        items,
        total,
        page,
        per_page: SHOPS_PER_PAGE,
    })
}

pub async fn find(pool: &SqlitePool, id: i64) -> ServiceResult<Shop> {
    Ok(shop::find_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::ShopNotFound, format!("Shop {id} not found"))
        })?)
}

pub async fn detail(pool: &SqlitePool, id: i64) -> ServiceResult<ShopDetail> {
    let shop = find(pool, id).await?;
    let category = match shop.category_id {
        Some(category_id) => category::find_by_id(pool, category_id).await?,
        None => None,
    };
    let reviews = review::list_for_shop(pool, id).await?;
    Ok(ShopDetail {
        budget_label: shop.budget.label().to_string(),
        shop,
        category,
        reviews,
    })
}

pub async fn create(pool: &SqlitePool, actor: &Actor, mut data: ShopCreate) -> ServiceResult<Shop> {
    actor.require_staff()?;
    data.name = data.name.trim().to_string();
    data.opening_hours = data.opening_hours.trim().to_string();
    validate_name(&data.name)?;
    validate_hours(&data.opening_hours)?;
    validate_price(data.price)?;
    ensure_category(pool, data.category_id).await?;

    let created = shop::create(pool, data).await?;
    tracing::info!(shop_id = created.id, user_id = actor.user_id, "Shop created");
    Ok(created)
}

pub async fn update(
    pool: &SqlitePool,
    actor: &Actor,
    id: i64,
    mut data: ShopUpdate,
) -> ServiceResult<Shop> {
    actor.require_staff()?;
    find(pool, id).await?;
    if let Some(name) = data.name.as_mut() {
        *name = name.trim().to_string();
        validate_name(name)?;
    }
    if let Some(hours) = data.opening_hours.as_mut() {
        *hours = hours.trim().to_string();
        validate_hours(hours)?;
    }
    validate_price(data.price)?;
    ensure_category(pool, data.category_id).await?;

    let updated = shop::update(pool, id, data).await?;
    tracing::info!(shop_id = id, user_id = actor.user_id, "Shop updated");
    Ok(updated)
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::field("name", ErrorCode::ShopNameRequired, "Shop name is required"));
    }
    Ok(())
}

/// Blank hours are allowed (the shop takes no reservations until set)
fn validate_hours(hours: &str) -> Result<(), AppError> {
    if hours.is_empty() {
        return Ok(());
    }
    OpeningHours::parse(hours).map(|_| ()).map_err(|e| {
        AppError::field(
            "opening_hours",
            ErrorCode::InvalidOpeningHours,
            format!("Opening hours must look like 11:00-22:00 ({e})"),
        )
    })
}

fn validate_price(price: Option<i64>) -> Result<(), AppError> {
    match price {
        Some(p) if p < 0 => Err(AppError::field(
            "price",
            ErrorCode::InvalidShopPrice,
            "Price must not be negative",
        )),
        _ => Ok(()),
    }
}

async fn ensure_category(pool: &SqlitePool, category_id: Option<i64>) -> ServiceResult<()> {
    if let Some(id) = category_id
        && category::find_by_id(pool, id).await?.is_none()
    {
        return Err(AppError::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category {id} not found"),
        )
        .into());
    }
    Ok(())
}
