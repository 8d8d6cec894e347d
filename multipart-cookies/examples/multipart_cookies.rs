use std::time::{Duration, SystemTime};
use trillium::Conn;
use trillium_cookies::CookiesHandler;
use trillium_multipart_cookies::{MultipartCookie, MultipartCookieConnExt};

pub fn main() {
    env_logger::init();

    let multipart = MultipartCookie::new("trillium.token");

    trillium_smol::run((CookiesHandler::new(), move |conn: Conn| {
        let multipart = multipart.clone();
        async move {
            let path = conn.path().to_owned();
            match path.as_str() {
                "/logout" => conn.without_multipart_cookie(&multipart).ok("logged out"),

                "/login" => {
                    let token = "a-very-long-token.".repeat(500);
                    let expiration = SystemTime::now() + Duration::from_secs(60 * 60);
                    conn.with_multipart_cookie(&multipart, &token, expiration)
                        .ok("logged in")
                }

                _ => match conn.multipart_cookie(&multipart) {
                    Some(token) => conn.ok(format!("token is {} characters long", token.len())),
                    None => conn.ok("no token, visit /login"),
                },
            }
        }
    }));
}
