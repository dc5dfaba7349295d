mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod register;

pub use cookie::DEFAULT_COOKIE_DURATION;
pub(crate) use cookie::{get_token_from_cookies, invalidate_token_cookie, set_flash_cookie};
pub use log_in::{LogInState, get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use redirect::{
    build_log_in_redirect_url, build_log_in_redirect_url_from_target, is_htmx_request,
    normalize_redirect_url, redirect_target,
};
pub use register::{get_register_page, register_user};

#[cfg(test)]
pub(crate) use cookie::{COOKIE_FLASH, COOKIE_TOKEN, set_token_cookie};
