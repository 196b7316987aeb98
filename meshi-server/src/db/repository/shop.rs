//! Shop Repository

use super::{RepoError, RepoResult, page_bounds};
use shared::models::{DEFAULT_SHOP_PRICE, NO_IMAGE, Shop, ShopCreate, ShopUpdate};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub const SHOP_COLUMNS: &str = "id, name, category_id, img, address, budget, closed_days, opening_hours, detail, price, created_at, updated_at";

/// Listing filter
#[derive(Debug, Clone, Default)]
pub struct ShopFilter<'a> {
    /// Case-insensitive substring of the name
    pub keyword: Option<&'a str>,
    pub category_id: Option<i64>,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Shop>> {
    let shop = sqlx::query_as::<_, Shop>(&format!("SELECT {SHOP_COLUMNS} FROM shops WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(shop)
}

/// One page of shops ordered by id, plus the total match count
pub async fn list(
    pool: &SqlitePool,
    filter: &ShopFilter<'_>,
    page: u32,
    per_page: u32,
) -> RepoResult<(Vec<Shop>, i64)> {
    let pattern = filter
        .keyword
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(|k| format!("%{}%", escape_like(k)));

    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM shops");
    push_filter(&mut count, pattern.as_deref(), filter.category_id);
    let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

    let (limit, offset) = page_bounds(page, per_page);
    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {SHOP_COLUMNS} FROM shops"));
    push_filter(&mut query, pattern.as_deref(), filter.category_id);
    query
        .push(" ORDER BY id LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    let shops = query.build_query_as::<Shop>().fetch_all(pool).await?;

    Ok((shops, total))
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, pattern: Option<&str>, category_id: Option<i64>) {
    let mut sep = " WHERE ";
    if let Some(pattern) = pattern {
        qb.push(sep)
            .push("name LIKE ")
            .push_bind(pattern.to_string())
            .push(" ESCAPE '\\'");
        sep = " AND ";
    }
    if let Some(category_id) = category_id {
        qb.push(sep).push("category_id = ").push_bind(category_id);
    }
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub async fn create(pool: &SqlitePool, data: ShopCreate) -> RepoResult<Shop> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO shops (name, category_id, img, address, budget, closed_days, opening_hours, detail, price, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10) RETURNING id",
    )
    .bind(&data.name)
    .bind(data.category_id)
    .bind(data.img.as_deref().unwrap_or(NO_IMAGE))
    .bind(&data.address)
    .bind(data.budget)
    .bind(&data.closed_days)
    .bind(&data.opening_hours)
    .bind(&data.detail)
    .bind(data.price.unwrap_or(DEFAULT_SHOP_PRICE))
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create shop".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ShopUpdate) -> RepoResult<Shop> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE shops SET name = COALESCE(?1, name), category_id = COALESCE(?2, category_id), img = COALESCE(?3, img), address = COALESCE(?4, address), budget = COALESCE(?5, budget), closed_days = COALESCE(?6, closed_days), opening_hours = COALESCE(?7, opening_hours), detail = COALESCE(?8, detail), price = COALESCE(?9, price), updated_at = ?10 WHERE id = ?11",
    )
    .bind(data.name)
    .bind(data.category_id)
    .bind(data.img)
    .bind(data.address)
    .bind(data.budget)
    .bind(data.closed_days)
    .bind(data.opening_hours)
    .bind(data.detail)
    .bind(data.price)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Shop {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Shop {id} not found")))
}
