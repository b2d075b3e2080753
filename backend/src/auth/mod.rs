//! Authentication gate: password hashing, cookie sessions and the request
//! extractors that expose the logged-in user to handlers.

pub mod extractors;
pub mod password;
pub mod session;

pub use extractors::{AdminUser, CurrentUser};
pub use session::SessionStore;
