pub mod error;
pub mod identity;
pub mod routes;
pub mod state;

pub use error::JsonBody;
pub use identity::Owner;
pub use routes::create_router;
pub use state::{AppState, DEFAULT_IDENTITY_HEADER};
