use crate::Error;
use crate::state::ApiContext;

use axum::extract::{Query, State};
use serde::Deserialize;
use userbus_users::producer::{TextPublisher, UserPublisher};

#[derive(Debug, Deserialize)]
pub(crate) struct PublishParams {
    message: String,
}

/// Publishes the `message` query parameter as raw text.
pub(crate) async fn publish_handler<P, Q>(
    State(ApiContext { text, .. }): State<ApiContext<P, Q>>,
    Query(PublishParams { message }): Query<PublishParams>,
) -> Result<&'static str, Error>
where
    P: UserPublisher,
    Q: TextPublisher,
{
    text.send(&message).await?;

    Ok("Message sent to RabbitMQ ...")
}
