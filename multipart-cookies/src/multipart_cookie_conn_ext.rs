use crate::MultipartCookie;
use trillium::Conn;
use trillium_cookies::{cookie::time::OffsetDateTime, CookiesConnExt};

/**
Extension trait adding multipart cookie capacities to [`Conn`].

Important: The [`CookiesHandler`](trillium_cookies::CookiesHandler)
must be called before any of these functions can be called on a conn.
Cookies added here are sent as `set-cookie` headers by the
`CookiesHandler` before the response is sent.
*/
pub trait MultipartCookieConnExt {
    /// reassembles the token stored in `multipart` from the request cookies
    fn multipart_cookie(&self, multipart: &MultipartCookie) -> Option<String>;

    /**
    stores `token` in `multipart`, expiring at `expiration`, and
    removes any chunk cookies left over from a longer token
    */
    fn with_multipart_cookie(
        self,
        multipart: &MultipartCookie,
        token: &str,
        expiration: impl Into<OffsetDateTime>,
    ) -> Self;

    /**
    removes every chunk cookie of `multipart`. The jar keeps these as
    `delete` cookies with a zero max-age rather than through
    `CookieJar::remove`, and [`MultipartCookieConnExt::multipart_cookie`]
    treats them as absent.
    */
    fn without_multipart_cookie(self, multipart: &MultipartCookie) -> Self;
}

impl MultipartCookieConnExt for Conn {
    fn multipart_cookie(&self, multipart: &MultipartCookie) -> Option<String> {
        multipart.decode(self.cookies())
    }

    fn with_multipart_cookie(
        mut self,
        multipart: &MultipartCookie,
        token: &str,
        expiration: impl Into<OffsetDateTime>,
    ) -> Self {
        let cookies = multipart.replace(self.cookies(), token, expiration);
        let jar = self.cookies_mut();
        for cookie in cookies {
            jar.add(cookie);
        }
        self
    }

    fn without_multipart_cookie(mut self, multipart: &MultipartCookie) -> Self {
        let cookies = multipart.clear(self.cookies());
        let jar = self.cookies_mut();
        for cookie in cookies {
            jar.add(cookie);
        }
        self
    }
}
