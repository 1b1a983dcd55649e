//! Management client tests against a mocked bakery API.

use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use miga_admin::backend::{AdminClient, BackendError, ProductPayload};
use miga_core::{OrderId, OrderStatus, Price, ProductId, UserId, UserRole};
use miga_integration_tests::{admin_config, order_json, product_json, user_json};

fn client_for(server: &MockServer) -> AdminClient {
    let config = admin_config(&server.uri());
    AdminClient::new(&config.backend)
}

fn payload() -> ProductPayload {
    ProductPayload {
        name: "Torta de mora".to_string(),
        description: "Con crema chantilly".to_string(),
        price: Price::new(15500),
        category: "TC".to_string(),
        image: None,
        featured: false,
    }
}

#[tokio::test]
async fn test_create_product_sends_spanish_fields() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/productos"))
        .and(body_partial_json(serde_json::json!({
            "nombre": "Torta de mora",
            "precio": 15500,
            "categoria": "TC",
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(product_json(10, "Torta de mora", 15500, "TC")),
        )
        .mount(&server)
        .await;

    let product = client.create_product(&payload()).await.expect("create");
    assert_eq!(product.id, ProductId::new(10));
}

#[tokio::test]
async fn test_update_product_patches_by_id() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("PATCH"))
        .and(path("/productos/10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json(10, "Torta de mora", 15500, "TC")),
        )
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_product(ProductId::new(10), &payload())
        .await
        .expect("update");
}

#[tokio::test]
async fn test_delete_product_accepts_empty_body() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("DELETE"))
        .and(path("/productos/10"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client
        .delete_product(ProductId::new(10))
        .await
        .expect("delete");
}

#[tokio::test]
async fn test_delete_missing_product_maps_to_not_found() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("DELETE"))
        .and(path("/productos/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client
        .delete_product(ProductId::new(99))
        .await
        .expect_err("missing product");
    assert!(matches!(err, BackendError::NotFound(_)));
}

#[tokio::test]
async fn test_list_orders_with_user_filter() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/pedidos"))
        .and(query_param("usuario", "ana@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            order_json(3, "ana@example.com", 9000, "pendiente"),
        ])))
        .mount(&server)
        .await;

    let orders = client
        .list_orders(Some("ana@example.com"))
        .await
        .expect("filtered orders");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_update_order_status_sends_wire_value() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("PATCH"))
        .and(path("/pedidos/3"))
        .and(body_partial_json(serde_json::json!({ "estado": "preparando" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(order_json(3, "ana@example.com", 9000, "preparando")),
        )
        .mount(&server)
        .await;

    let order = client
        .update_order_status(OrderId::new(3), OrderStatus::Preparing)
        .await
        .expect("status change");
    assert_eq!(order.status, OrderStatus::Preparing);
}

#[tokio::test]
async fn test_update_user_role_sends_wire_value() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("PATCH"))
        .and(path("/usuarios/7"))
        .and(body_partial_json(serde_json::json!({ "rol": "admin" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_json(7, "Ana Rojas", "ana@example.com", "admin")),
        )
        .mount(&server)
        .await;

    let user = client
        .update_user_role(UserId::new(7), UserRole::Admin)
        .await
        .expect("role change");
    assert!(user.role.is_admin());
}

#[tokio::test]
async fn test_list_users() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/usuarios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            user_json(1, "Admin", "admin@migabakery.cl", "admin"),
            user_json(7, "Ana Rojas", "ana@example.com", "customer"),
        ])))
        .mount(&server)
        .await;

    let users = client.list_users().await.expect("users");
    assert_eq!(users.len(), 2);
    assert!(users[0].role.is_admin());
    assert!(!users[1].role.is_admin());
}
