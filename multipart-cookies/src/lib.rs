#![forbid(unsafe_code)]
#![warn(
    missing_copy_implementations,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    unused_qualifications
)]

/*!

# multipart cookies for trillium

Browsers limit a single cookie to about 4096 bytes. This crate stores
a value of any length, such as a bearer token, across as many cookies
as it needs: `name`, `name_1`, `name_2`, and so on. Reading only
succeeds when every chunk is present, and clearing always removes the
base cookie along with every chunk the client presented.

[`MultipartCookie`] computes the cookies to set or remove and can be
used with any cookie jar or string map through [`ExistingCookies`].
[`MultipartCookieConnExt`] applies it to a trillium [`Conn`](trillium::Conn)
through the [`trillium_cookies::CookiesHandler`].

## example
```
use std::time::{Duration, SystemTime};
use trillium::Conn;
use trillium_cookies::CookiesHandler;
use trillium_multipart_cookies::{MultipartCookie, MultipartCookieConnExt};

let multipart = MultipartCookie::new("token");

let handler = (CookiesHandler::new(), move |conn: Conn| {
    let multipart = multipart.clone();
    async move {
        match conn.multipart_cookie(&multipart) {
            Some(token) => conn.ok(format!("token: {token}")),
            None => {
                let expiration = SystemTime::now() + Duration::from_secs(60 * 60);
                conn.with_multipart_cookie(&multipart, "new-token", expiration)
                    .ok("no token")
            }
        }
    }
});

use trillium_testing::prelude::*;

assert_ok!(get("/").on(&handler), "no token");

assert_ok!(
    get("/")
        .with_request_header("cookie", "token=abc; token_1=def")
        .on(&handler),
    "token: abcdef"
);

assert_ok!(
    get("/")
        .with_request_header("cookie", "token=abc; token_2=def")
        .on(&handler),
    "no token"
);
```
*/

mod chunks;

mod existing_cookies;
pub use existing_cookies::ExistingCookies;

mod multipart_cookie;
pub use multipart_cookie::{MultipartCookie, COOKIE_LENGTH_LIMIT, DELETED_COOKIE_VALUE};

mod multipart_cookie_conn_ext;
pub use multipart_cookie_conn_ext::MultipartCookieConnExt;

pub use trillium_cookies::cookie;
