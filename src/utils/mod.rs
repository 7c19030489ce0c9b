pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{fetchable_url, is_valid_url, path_extension, resolve_url};
