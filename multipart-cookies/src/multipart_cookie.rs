use crate::{chunks::split_by_chars, ExistingCookies};
use std::collections::BTreeSet;
use trillium_cookies::cookie::{
    time::{Duration, OffsetDateTime},
    Cookie,
};

/// The largest number of characters stored in a single chunk.
///
/// Browsers commonly reject a `Set-Cookie` header larger than this,
/// see <https://chromestatus.com/feature/4946713618939904>
pub const COOKIE_LENGTH_LIMIT: usize = 4096;

/// The value carried by deletion cookies.
pub const DELETED_COOKIE_VALUE: &str = "delete";

const CHUNK_SEPARATOR: char = '_';

/**
A logical cookie whose value may be spread over several cookies.

The first chunk is stored under the base name, chunk `i > 0` under
`{name}_{i}`. All cookies produced are `Secure` and `HttpOnly`, scoped
to the configured path and carry no domain.

```
use std::{collections::HashMap, time::SystemTime};
use trillium_multipart_cookies::MultipartCookie;

let multipart = MultipartCookie::new("X");
let token = "0123456789".repeat(900);

let cookies = multipart.encode(&token, SystemTime::now());
let names: Vec<_> = cookies.iter().map(|cookie| cookie.name()).collect();
assert_eq!(names, ["X", "X_1", "X_2"]);

let presented: HashMap<String, String> = cookies
    .iter()
    .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
    .collect();
assert_eq!(multipart.decode(&presented), Some(token));
assert_eq!(multipart.clear(&presented).len(), 3);
```
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultipartCookie {
    name: String,
    cookie_path: String,
    chunk_length: usize,
}

impl MultipartCookie {
    /**
    Constructs a MultipartCookie with the given base name.

    # Panics

    `MultipartCookie::new` will panic if the name is empty.

    # Defaults

    * cookie path: "/"
    * chunk length: [`COOKIE_LENGTH_LIMIT`]
    */
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "multipart cookie name must not be empty");
        Self {
            name,
            cookie_path: "/".into(),
            chunk_length: COOKIE_LENGTH_LIMIT,
        }
    }

    /// Sets the path that every chunk cookie is scoped to.
    /// The default for this value is "/"
    pub fn with_cookie_path(mut self, cookie_path: impl AsRef<str>) -> Self {
        cookie_path.as_ref().clone_into(&mut self.cookie_path);
        self
    }

    /**
    Sets the maximum number of characters per chunk. The default is
    [`COOKIE_LENGTH_LIMIT`], and there is rarely a reason to change
    it.

    # Panics

    Panics if `chunk_length` is zero.
    */
    pub fn with_chunk_length(mut self, chunk_length: usize) -> Self {
        assert!(chunk_length > 0, "chunk length must be positive");
        self.chunk_length = chunk_length;
        self
    }

    /// the base name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// the path chunk cookies are scoped to
    pub fn cookie_path(&self) -> &str {
        &self.cookie_path
    }

    /// the maximum number of characters per chunk
    pub fn chunk_length(&self) -> usize {
        self.chunk_length
    }

    /// The cookie name used for the chunk at `index`.
    pub fn cookie_name(&self, index: usize) -> String {
        if index == 0 {
            self.name.clone()
        } else {
            format!("{}{CHUNK_SEPARATOR}{index}", self.name)
        }
    }

    /// The chunk index that `name` is stored under, or None if `name`
    /// is not a chunk name for this cookie. This is the inverse of
    /// [`MultipartCookie::cookie_name`].
    pub fn chunk_index(&self, name: &str) -> Option<usize> {
        let suffix = name.strip_prefix(self.name.as_str())?;
        if suffix.is_empty() {
            return Some(0);
        }

        let index = suffix.strip_prefix(CHUNK_SEPARATOR)?.parse().ok()?;
        (index > 0 && self.cookie_name(index) == name).then_some(index)
    }

    /**
    Splits `token` into chunks and builds one cookie per chunk, in
    index order. Every cookie expires at `expiration`.

    An empty token still produces a single cookie with an empty value.
    */
    pub fn encode(&self, token: &str, expiration: impl Into<OffsetDateTime>) -> Vec<Cookie<'static>> {
        let expiration = expiration.into();
        let chunks = split_by_chars(token, self.chunk_length);

        if chunks.len() > 1 {
            log::debug!("splitting {} into {} cookies", self.name, chunks.len());
        }

        chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| {
                Cookie::build((self.cookie_name(index), chunk.to_string()))
                    .path(self.cookie_path.clone())
                    .secure(true)
                    .http_only(true)
                    .expires(expiration)
                    .build()
            })
            .collect()
    }

    /**
    Reassembles the token from the presented cookies.

    Returns None if no presented cookie name starts with the base name,
    or if any chunk below that count is missing. A partial chunk set is
    never decoded.

    The count is taken over every name sharing the base name as a
    prefix, so an unrelated cookie such as `{name}_other` raises the
    number of chunks expected and will make this return None. Choose a
    base name that no other cookie extends.
    */
    pub fn decode(&self, existing: impl ExistingCookies) -> Option<String> {
        let count = self.matching_names(&existing).count();
        if count == 0 {
            return None;
        }

        let mut token = String::new();
        for index in 0..count {
            let Some(chunk) = existing.cookie_value(&self.cookie_name(index)) else {
                log::trace!(
                    "{} has {count} candidate cookies but chunk {index} is missing",
                    self.name
                );
                return None;
            };
            token.push_str(chunk);
        }

        Some(token)
    }

    /**
    Builds removal cookies for every presented name that starts with
    the base name, plus the base name itself even if it was not
    presented. Each name appears once; the result is sorted by name.

    Like [`MultipartCookie::decode`], this matches by prefix, so a
    presented `{name}_other` cookie is removed as well.
    */
    pub fn clear(&self, existing: impl ExistingCookies) -> Vec<Cookie<'static>> {
        let mut names = BTreeSet::new();
        names.insert(self.name.clone());
        names.extend(self.matching_names(&existing).map(String::from));

        names
            .into_iter()
            .map(|name| self.removal_cookie(name))
            .collect()
    }

    /**
    Encodes `token` like [`MultipartCookie::encode`] and additionally
    builds removal cookies for presented chunk names beyond the new
    chunk count, so that replacing a long token with a shorter one
    does not leave stale chunks behind.

    Only exact chunk names (see [`MultipartCookie::chunk_index`]) are
    removed here.
    */
    pub fn replace(
        &self,
        existing: impl ExistingCookies,
        token: &str,
        expiration: impl Into<OffsetDateTime>,
    ) -> Vec<Cookie<'static>> {
        let mut cookies = self.encode(token, expiration);
        let count = cookies.len();

        let stale: BTreeSet<usize> = existing
            .cookie_names()
            .filter_map(|name| self.chunk_index(name))
            .filter(|index| *index >= count)
            .collect();

        cookies.extend(
            stale
                .into_iter()
                .map(|index| self.removal_cookie(self.cookie_name(index))),
        );

        cookies
    }

    fn matching_names<'a>(
        &'a self,
        existing: &'a impl ExistingCookies,
    ) -> impl Iterator<Item = &'a str> + 'a {
        let names: BTreeSet<&str> = existing
            .cookie_names()
            .filter(|name| name.starts_with(self.name.as_str()))
            .collect();
        names.into_iter()
    }

    fn removal_cookie(&self, name: String) -> Cookie<'static> {
        Cookie::build((name, DELETED_COOKIE_VALUE))
            .path(self.cookie_path.clone())
            .secure(true)
            .http_only(true)
            .max_age(Duration::ZERO)
            .build()
    }
}
