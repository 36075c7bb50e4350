use userbus_users::UserService;
use userbus_users::producer::TextProducer;

/// Shared state for every route.
#[derive(Clone, Debug)]
pub struct ApiContext<P, Q> {
    /// User CRUD, publishing every mutation as JSON.
    pub users: UserService<P>,

    /// Publisher for the raw text flow.
    pub text: TextProducer<Q>,
}
