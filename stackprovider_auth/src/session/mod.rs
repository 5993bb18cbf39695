mod config;
mod cookie;
mod errors;
mod provider;

pub use config::{CookieConfig, SameSite};
pub use cookie::{clear_session_cookie_header, session_cookie_header};
pub use errors::SessionError;
pub use provider::{CookieSessionProvider, SessionProvider};
