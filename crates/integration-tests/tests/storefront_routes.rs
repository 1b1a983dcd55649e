//! Storefront router smoke tests via `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use miga_integration_tests::{product_json, storefront_app};

#[tokio::test]
async fn test_home_renders_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/productos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            product_json(1, "Torta de chocolate", 14500, "TC"),
        ])))
        .mount(&server)
        .await;

    let app = storefront_app(&server.uri());
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(html.contains("Torta de chocolate"));
    assert!(html.contains("$14.500"));
}

#[tokio::test]
async fn test_home_survives_backend_outage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/productos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = storefront_app(&server.uri());
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    // The home page degrades to an empty featured section
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cart_page_renders_empty_cart() {
    let server = MockServer::start().await;
    let app = storefront_app(&server.uri());

    let response = app
        .oneshot(Request::get("/cart").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(html.contains("Tu carrito está vacío"));
}

#[tokio::test]
async fn test_account_redirects_anonymous_to_login() {
    let server = MockServer::start().await;
    let app = storefront_app(&server.uri());

    let response = app
        .oneshot(
            Request::get("/account")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok());
    assert_eq!(location, Some("/auth/login"));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_redirects_to_cart() {
    let server = MockServer::start().await;
    let app = storefront_app(&server.uri());

    let response = app
        .oneshot(
            Request::get("/checkout")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok());
    assert_eq!(location, Some("/cart"));
}

#[tokio::test]
async fn test_missing_product_renders_not_found_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/productos/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let app = storefront_app(&server.uri());
    let response = app
        .oneshot(
            Request::get("/products/99")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(html.contains("No encontramos ese producto"));
}

#[tokio::test]
async fn test_decrementing_a_single_item_line_empties_the_cart() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/productos/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_json(1, "Pan amasado", 1800, "PAN")),
        )
        .mount(&server)
        .await;

    let app = storefront_app(&server.uri());

    let add_response = app
        .clone()
        .oneshot(
            Request::post("/cart/add")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("product_id=1&quantity=1"))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(add_response.status(), StatusCode::SEE_OTHER);

    let cookie = add_response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_string();

    // One decrement on a quantity-1 line removes it, not quantity zero
    let update_response = app
        .clone()
        .oneshot(
            Request::post("/cart/update")
                .header(header::COOKIE, &cookie)
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("product_id=1&signature=&action=decrement"))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(update_response.status(), StatusCode::SEE_OTHER);

    let cart_response = app
        .oneshot(
            Request::get("/cart")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let body = axum::body::to_bytes(cart_response.into_body(), usize::MAX)
        .await
        .expect("body");
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(html.contains("Tu carrito está vacío"));
}

#[tokio::test]
async fn test_checkout_validation_failure_issues_no_backend_request() {
    let server = MockServer::start().await;

    // Product fetch for the add-to-cart step
    Mock::given(method("GET"))
        .and(path("/productos/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_json(1, "Torta de chocolate", 14500, "TC")),
        )
        .mount(&server)
        .await;

    // The order endpoint must never be hit with an invalid form
    Mock::given(method("POST"))
        .and(path("/pedidos"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let app = storefront_app(&server.uri());

    // Add an item so the cart is non-empty, carrying the session cookie on
    let add_response = app
        .clone()
        .oneshot(
            Request::post("/cart/add")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("product_id=1&quantity=1"))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(add_response.status(), StatusCode::SEE_OTHER);

    let cookie = add_response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_string();

    // Submit a checkout form that fails validation (name contains digits,
    // phone too short, bad email, past date)
    let response = app
        .oneshot(
            Request::post("/checkout")
                .header(header::COOKIE, &cookie)
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from(
                    "name=Ana123&phone=12&email=bad&address=&delivery_date=2000-01-01",
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    // Form re-renders with field errors
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(html.contains("El nombre solo puede contener letras"));
    assert!(html.contains("El teléfono debe tener al menos 8 dígitos"));

    // Dropping the server verifies the expect(0) on POST /pedidos
}
