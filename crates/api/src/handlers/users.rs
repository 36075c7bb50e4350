//! Handlers for the `/api/v1/users` routes.

use crate::Error;
use crate::state::ApiContext;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use userbus_users::producer::{TextPublisher, UserPublisher};
use userbus_users::{NewUser, UserPatch, UserUpdate};

fn not_found(id: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("User not found with ID: {id}")).into_response()
}

pub(crate) async fn create_user_handler<P, Q>(
    State(ApiContext { users, .. }): State<ApiContext<P, Q>>,
    Json(new_user): Json<NewUser>,
) -> Result<Response, Error>
where
    P: UserPublisher,
    Q: TextPublisher,
{
    let user = users.create(new_user).await?;

    Ok((
        StatusCode::CREATED,
        format!("User created and JSON message sent to RabbitMQ: {}", user.id),
    )
        .into_response())
}

pub(crate) async fn get_user_handler<P, Q>(
    State(ApiContext { users, .. }): State<ApiContext<P, Q>>,
    Path(id): Path<String>,
) -> Response
where
    P: UserPublisher,
    Q: TextPublisher,
{
    users.get(&id).map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |user| Json(user).into_response(),
    )
}

/// Lists every user, or responds 204 with no body when there are none.
pub(crate) async fn list_users_handler<P, Q>(
    State(ApiContext { users, .. }): State<ApiContext<P, Q>>,
) -> Response
where
    P: UserPublisher,
    Q: TextPublisher,
{
    let list = users.list();

    if list.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(list).into_response()
    }
}

pub(crate) async fn update_user_handler<P, Q>(
    State(ApiContext { users, .. }): State<ApiContext<P, Q>>,
    Path(id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> Result<Response, Error>
where
    P: UserPublisher,
    Q: TextPublisher,
{
    Ok(match users.update(&id, update).await? {
        Some(_) => format!("User updated and JSON message sent to RabbitMQ: {id}").into_response(),
        None => not_found(&id),
    })
}

pub(crate) async fn patch_user_handler<P, Q>(
    State(ApiContext { users, .. }): State<ApiContext<P, Q>>,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Response, Error>
where
    P: UserPublisher,
    Q: TextPublisher,
{
    Ok(match users.patch(&id, patch).await? {
        Some(_) => {
            format!("User partially updated and JSON message sent to RabbitMQ: {id}")
                .into_response()
        }
        None => not_found(&id),
    })
}

pub(crate) async fn delete_user_handler<P, Q>(
    State(ApiContext { users, .. }): State<ApiContext<P, Q>>,
    Path(id): Path<String>,
) -> Result<Response, Error>
where
    P: UserPublisher,
    Q: TextPublisher,
{
    Ok(match users.delete(&id).await? {
        Some(_) => format!("User deleted and notification sent to RabbitMQ: {id}").into_response(),
        None => not_found(&id),
    })
}
