use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use meshi_server::api;
use meshi_server::config::Config;
use meshi_server::db::DbService;
use meshi_server::db::repository::{company, member, user};
use meshi_server::error::BoxError;
use meshi_server::state::AppState;
use meshi_server::stripe::{BillingGateway, PaymentCheckout, SubscriptionCheckout};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

struct StubGateway;

#[async_trait]
impl BillingGateway for StubGateway {
    async fn create_customer(
        &self,
        _email: &str,
        _name: &str,
        user_id: i64,
    ) -> Result<String, BoxError> {
        Ok(format!("cus_{user_id}"))
    }

    async fn create_payment_checkout(
        &self,
        _req: &PaymentCheckout<'_>,
    ) -> Result<String, BoxError> {
        Ok("https://checkout.test/pay".into())
    }

    async fn create_subscription_checkout(
        &self,
        _req: &SubscriptionCheckout<'_>,
    ) -> Result<String, BoxError> {
        Ok("https://checkout.test/sub".into())
    }

    async fn create_billing_portal_session(
        &self,
        _customer_id: &str,
        _return_url: &str,
    ) -> Result<String, BoxError> {
        Ok("https://billing.test/portal".into())
    }
}

struct TestApp {
    app: Router,
    pool: SqlitePool,
}

impl TestApp {
    async fn new() -> Self {
        let db = DbService::in_memory().await.unwrap();
        let config = Config {
            stripe_subscription_price_id: "price_test".into(),
            ..Config::default()
        };
        let state = AppState::from_parts(db.pool.clone(), &config, Arc::new(StubGateway)).unwrap();
        Self {
            app: api::build_app(state),
            pool: db.pool,
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Register and log in, returning (user id, token)
    async fn sign_up(&self, username: &str) -> (i64, String) {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": "correct-horse",
                    "first_name": "Taro",
                    "last_name": "Yamada",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        self.login(username).await
    }

    async fn login(&self, username: &str) -> (i64, String) {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "username": username, "password": "correct-horse" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        (
            body["user_id"].as_i64().unwrap(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    async fn staff(&self, username: &str) -> String {
        let (id, _) = self.sign_up(username).await;
        user::set_staff(&self.pool, id, true).await.unwrap();
        // staff flag is carried in the token
        self.login(username).await.1
    }

    async fn shop(&self, staff_token: &str, name: &str, hours: &str) -> i64 {
        let (status, body) = self
            .send(
                "POST",
                "/api/shops",
                Some(staff_token),
                Some(json!({ "name": name, "opening_hours": hours, "address": "Nagoya" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], true);
}

#[tokio::test]
async fn test_register_login_and_bad_password() {
    let app = TestApp::new().await;
    app.sign_up("hanako").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "hanako", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": "hanako",
                "email": "other@example.com",
                "password": "correct-horse",
                "first_name": "Hanako",
                "last_name": "Sato",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": "jiro",
                "email": "not-an-email",
                "password": "correct-horse",
                "first_name": "Jiro",
                "last_name": "Sato",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "email");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;
    let (status, _) = app.send("GET", "/api/favorites", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send("GET", "/api/member", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_shop_create_is_staff_only() {
    let app = TestApp::new().await;
    let (_, member) = app.sign_up("member").await;
    let (status, body) = app
        .send("POST", "/api/shops", Some(&member), Some(json!({ "name": "Misokatsu" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    let staff = app.staff("admin").await;
    let id = app.shop(&staff, "Misokatsu", "11:00-21:00").await;

    let (status, body) = app.send("GET", "/api/shops?keyword=miso", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], id);

    let (status, body) = app.send("GET", &format!("/api/shops/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["budget_label"], "1,000~2,999");

    let (status, _) = app.send("GET", "/api/shops/9999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reservation_flow() {
    let app = TestApp::new().await;
    let staff = app.staff("admin").await;
    let shop_id = app.shop(&staff, "Hitsumabushi", "11:00-21:00").await;
    let (_, token) = app.sign_up("diner").await;
    let uri = format!("/api/shops/{shop_id}/reservations");
    let request = json!({ "date": "2099-06-01", "time": "18:00:00", "num_people": 2 });

    let (status, created) = app.send("POST", &uri, Some(&token), Some(request.clone())).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["num_people"], 2);

    let (status, body) = app.send("POST", &uri, Some(&token), Some(request)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4005);

    let (status, body) = app
        .send(
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "date": "2099-06-01", "time": "23:00:00", "num_people": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);

    let (status, body) = app
        .send(
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "date": "2000-01-01", "time": "12:00:00", "num_people": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    let (status, body) = app.send("GET", "/api/reservations", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["shop_name"], "Hitsumabushi");

    // Someone else cannot see or cancel it
    let (_, other) = app.sign_up("stranger").await;
    let id = created["id"].as_i64().unwrap();
    let (status, _) = app
        .send("DELETE", &format!("/api/reservations/{id}"), Some(&other), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send("DELETE", &format!("/api/reservations/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.send("GET", "/api/reservations", Some(&token), None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_reservation_without_hours_is_unprocessable() {
    let app = TestApp::new().await;
    let staff = app.staff("admin").await;
    let shop_id = app.shop(&staff, "Yatai", "").await;
    let (_, token) = app.sign_up("diner").await;

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/shops/{shop_id}/reservations"),
            Some(&token),
            Some(json!({ "date": "2099-06-01", "time": "12:00:00", "num_people": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 3003);
}

#[tokio::test]
async fn test_review_owner_only() {
    let app = TestApp::new().await;
    let staff = app.staff("admin").await;
    let shop_id = app.shop(&staff, "Tebasaki", "17:00-23:00").await;
    let (_, author) = app.sign_up("author").await;
    let (_, other) = app.sign_up("other").await;

    let (status, review) = app
        .send(
            "POST",
            &format!("/api/shops/{shop_id}/reviews"),
            Some(&author),
            Some(json!({ "content": "Crispy", "rating": 5 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{review}");
    let uri = format!("/api/reviews/{}", review["id"]);

    let (status, _) = app
        .send("PUT", &uri, Some(&other), Some(json!({ "content": "Meh", "rating": 1 })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send("DELETE", &uri, Some(&staff), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send("PUT", &uri, Some(&author), Some(json!({ "content": "Very crispy", "rating": 4 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 4);

    let (status, body) = app
        .send("PUT", &uri, Some(&author), Some(json!({ "content": "x", "rating": 9 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "rating");

    let (status, _) = app.send("DELETE", &uri, Some(&author), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send("DELETE", &uri, Some(&author), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorites_are_idempotent() {
    let app = TestApp::new().await;
    let staff = app.staff("admin").await;
    let shop_id = app.shop(&staff, "Kishimen", "10:00-20:00").await;
    let (_, token) = app.sign_up("fan").await;
    let uri = format!("/api/favorites/{shop_id}");

    let (status, first) = app.send("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, second) = app.send("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);

    let (_, list) = app.send("GET", "/api/favorites", Some(&token), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["shop"]["name"], "Kishimen");

    let (status, _) = app.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.send("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, list) = app.send("GET", "/api/favorites", Some(&token), None).await;
    assert!(list.as_array().unwrap().is_empty());

    let (status, _) = app.send("POST", "/api/favorites/9999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_member_profile_and_billing() {
    let app = TestApp::new().await;
    let staff = app.staff("admin").await;
    let shop_id = app.shop(&staff, "Tenmusu", "10:00-20:00").await;
    let (_, token) = app.sign_up("payer").await;

    let (status, body) = app
        .send("PUT", "/api/member", Some(&token), Some(json!({ "display_name": "Payer" })))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["display_name"], "Payer");

    let (status, body) = app
        .send("POST", &format!("/api/shops/{shop_id}/checkout"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://checkout.test/pay");

    let (status, body) = app.send("POST", "/api/subscription", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://checkout.test/sub");

    let (status, body) = app.send("POST", "/api/billing/portal", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://billing.test/portal");

    let (id, _) = app.login("payer").await;
    let profile = member::find_by_user(&app.pool, id).await.unwrap().unwrap();
    assert_eq!(profile.stripe_customer_id.as_deref(), Some(format!("cus_{id}").as_str()));
}

#[tokio::test]
async fn test_company_not_found_until_seeded() {
    let app = TestApp::new().await;
    let (status, body) = app.send("GET", "/api/company", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3201);

    company::create(&app.pool, "meshi Inc.", 2020, "Food guide", "Nagoya")
        .await
        .unwrap();
    let (status, body) = app.send("GET", "/api/company", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "meshi Inc.");
}

#[tokio::test]
async fn test_malformed_body_reports_field() {
    let app = TestApp::new().await;
    let staff = app.staff("admin").await;
    let shop_id = app.shop(&staff, "Miso-nikomi", "11:00-21:00").await;
    let (_, token) = app.sign_up("diner").await;
    let uri = format!("/api/shops/{shop_id}/reservations");

    let (status, body) = app
        .send(
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "date": "tomorrow", "time": "12:00:00", "num_people": 2 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert_eq!(body["details"]["field"], "date");

    let (status, body) = app
        .send(
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "date": "2099-06-01", "time": "12:00:00" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "num_people");
}
