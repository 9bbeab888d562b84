mod cookie;
mod log_in;
mod middleware;
mod redirect;
mod token;

pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::{get_log_in_page, post_log_in};
pub use middleware::{auth_guard, auth_guard_hx};
pub(super) use redirect::build_log_in_redirect_url;
pub(super) use token::Token;

#[cfg(test)]
pub use cookie::COOKIE_TOKEN;

#[cfg(test)]
pub use middleware::AuthState;
