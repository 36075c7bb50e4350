use crate::handlers::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    patch_user_handler, publish_handler, update_user_handler,
};
use crate::state::ApiContext;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use userbus_users::producer::{TextPublisher, UserPublisher};

/// Builds the router for every API route.
pub fn router<P, Q>(ctx: ApiContext<P, Q>) -> Router
where
    P: UserPublisher,
    Q: TextPublisher,
{
    Router::new()
        // ** Users **
        .route("/api/v1/users/post", post(create_user_handler::<P, Q>))
        .route("/api/v1/users/get", get(list_users_handler::<P, Q>))
        .route("/api/v1/users/get/{id}", get(get_user_handler::<P, Q>))
        .route("/api/v1/users/put/{id}", put(update_user_handler::<P, Q>))
        .route("/api/v1/users/patch/{id}", patch(patch_user_handler::<P, Q>))
        .route("/api/v1/users/delete/{id}", delete(delete_user_handler::<P, Q>))
        // ** Raw text **
        .route("/api/v1/publish", get(publish_handler::<P, Q>))
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;
    use std::string::FromUtf8Error;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use userbus_messaging::broker::Broker;
    use userbus_messaging::destination::Destination;
    use userbus_messaging::topology::Topology;
    use userbus_messaging_memory::{MemoryBroker, MemoryPublisher};
    use userbus_users::producer::{TextProducer, UserProducer};
    use userbus_users::{TextMessage, User, UserService};

    type JsonPublisher = MemoryPublisher<User, serde_json::Error, serde_json::Error>;
    type PlainPublisher = MemoryPublisher<TextMessage, FromUtf8Error, Infallible>;

    async fn declared_broker() -> MemoryBroker {
        let broker = MemoryBroker::new();
        broker
            .declare(
                &Topology::new()
                    .bind("text", "users", "text-key")
                    .bind("json", "users", "json-key"),
            )
            .await
            .unwrap();
        broker
    }

    fn app(broker: &MemoryBroker) -> Router {
        let users: JsonPublisher = broker.publisher(Destination::new("users", "json-key"));
        let text: PlainPublisher = broker.publisher(Destination::new("users", "text-key"));

        router(ApiContext {
            users: UserService::new(UserProducer::new(users)),
            text: TextProducer::new(text),
        })
    }

    fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_walk_through() {
        let app = app(&declared_broker().await);

        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/users/post",
                r#"{"id":"g1","name":"Alice","email":"a@x.com"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, "User created and JSON message sent to RabbitMQ: g1");

        let (status, body) = send(&app, empty_request(Method::GET, "/api/v1/users/get/g1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"id":"g1","name":"Alice","email":"a@x.com"}"#);

        let (status, body) = send(
            &app,
            json_request(
                Method::PATCH,
                "/api/v1/users/patch/g1",
                r#"{"email":"alice@x.com"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            "User partially updated and JSON message sent to RabbitMQ: g1"
        );

        let (_, body) = send(&app, empty_request(Method::GET, "/api/v1/users/get/g1")).await;
        assert_eq!(body, r#"{"id":"g1","name":"Alice","email":"alice@x.com"}"#);

        let (status, body) =
            send(&app, empty_request(Method::DELETE, "/api/v1/users/delete/g1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User deleted and notification sent to RabbitMQ: g1");

        let (status, body) = send(&app, empty_request(Method::GET, "/api/v1/users/get/g1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_create_generates_id() {
        let app = app(&declared_broker().await);

        let (status, body) = send(
            &app,
            json_request(Method::POST, "/api/v1/users/post", r#"{"name":"Bob"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let id = body
            .strip_prefix("User created and JSON message sent to RabbitMQ: ")
            .unwrap();
        assert!(!id.is_empty());

        let (status, body) = send(
            &app,
            empty_request(Method::GET, &format!("/api/v1/users/get/{id}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let user: User = serde_json::from_str(&body).unwrap();
        assert_eq!(user.name.as_deref(), Some("Bob"));
    }

    #[tokio::test]
    async fn test_list_users() {
        let app = app(&declared_broker().await);

        let (status, body) = send(&app, empty_request(Method::GET, "/api/v1/users/get")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        for id in ["a", "b"] {
            send(
                &app,
                json_request(
                    Method::POST,
                    "/api/v1/users/post",
                    &format!(r#"{{"id":"{id}"}}"#),
                ),
            )
            .await;
        }

        let (status, body) = send(&app, empty_request(Method::GET, "/api/v1/users/get")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"[{"id":"a"},{"id":"b"}]"#);
    }

    #[tokio::test]
    async fn test_update_keeps_null_fields() {
        let app = app(&declared_broker().await);
        send(
            &app,
            json_request(
                Method::POST,
                "/api/v1/users/post",
                r#"{"id":"u1","name":"Bob","email":"b@x.com"}"#,
            ),
        )
        .await;

        let (status, body) = send(
            &app,
            json_request(
                Method::PUT,
                "/api/v1/users/put/u1",
                r#"{"name":"Robert","email":null}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User updated and JSON message sent to RabbitMQ: u1");

        let (_, body) = send(&app, empty_request(Method::GET, "/api/v1/users/get/u1")).await;
        assert_eq!(body, r#"{"id":"u1","name":"Robert","email":"b@x.com"}"#);
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let app = app(&declared_broker().await);

        for request in [
            json_request(Method::PUT, "/api/v1/users/put/nope", "{}"),
            json_request(Method::PATCH, "/api/v1/users/patch/nope", "{}"),
            empty_request(Method::DELETE, "/api/v1/users/delete/nope"),
        ] {
            let (status, body) = send(&app, request).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, "User not found with ID: nope");
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let app = app(&declared_broker().await);

        let (status, _) = send(
            &app,
            json_request(Method::POST, "/api/v1/users/post", "{not json"),
        )
        .await;

        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_publish_text() {
        let app = app(&declared_broker().await);

        let (status, body) = send(
            &app,
            empty_request(Method::GET, "/api/v1/publish?message=hello"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Message sent to RabbitMQ ...");
    }

    #[tokio::test]
    async fn test_broker_failure_is_server_error() {
        let app = app(&MemoryBroker::new());

        let (status, body) = send(
            &app,
            json_request(Method::POST, "/api/v1/users/post", r#"{"id":"u1"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.is_empty());
    }
}
