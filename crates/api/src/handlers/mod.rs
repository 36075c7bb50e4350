mod publish;
mod users;

pub(crate) use publish::publish_handler;
pub(crate) use users::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    patch_user_handler, update_user_handler,
};
