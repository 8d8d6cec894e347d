use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};
use trillium_cookies::cookie::{time::Duration, Cookie, CookieJar};

/**
The cookies a client presented on a request, as name-value pairs.

[`MultipartCookie::decode`](crate::MultipartCookie::decode) and
[`MultipartCookie::clear`](crate::MultipartCookie::clear) accept
anything implementing this trait. It is implemented for the
[`CookieJar`] that [`trillium_cookies::CookiesHandler`] populates from
the request `Cookie` header, and for plain string maps.

Removal cookies already added to a [`CookieJar`] (those with a zero
max-age) are not treated as present.
*/
pub trait ExistingCookies {
    /// every cookie name present, each yielded once
    fn cookie_names(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// the value of the cookie with exactly this name, if present
    fn cookie_value(&self, name: &str) -> Option<&str>;
}

fn is_pending_removal(cookie: &Cookie<'_>) -> bool {
    cookie.max_age() == Some(Duration::ZERO)
}

impl ExistingCookies for CookieJar {
    fn cookie_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(
            self.iter()
                .filter(|cookie| !is_pending_removal(cookie))
                .map(|cookie| cookie.name()),
        )
    }

    fn cookie_value(&self, name: &str) -> Option<&str> {
        self.get(name)
            .filter(|cookie| !is_pending_removal(cookie))
            .map(|cookie| cookie.value())
    }
}

impl<S: BuildHasher> ExistingCookies for HashMap<String, String, S> {
    fn cookie_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.keys().map(String::as_str))
    }

    fn cookie_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ExistingCookies for BTreeMap<String, String> {
    fn cookie_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.keys().map(String::as_str))
    }

    fn cookie_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<T: ExistingCookies + ?Sized> ExistingCookies for &T {
    fn cookie_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        (**self).cookie_names()
    }

    fn cookie_value(&self, name: &str) -> Option<&str> {
        (**self).cookie_value(name)
    }
}
