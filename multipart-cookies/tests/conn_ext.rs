use std::time::{Duration, SystemTime};
use trillium::Conn;
use trillium_cookies::{CookiesConnExt, CookiesHandler};
use trillium_multipart_cookies::{MultipartCookie, MultipartCookieConnExt};
use trillium_testing::prelude::*;

fn multipart() -> MultipartCookie {
    MultipartCookie::new("token").with_chunk_length(4)
}

/// lists the cookies a handler added to the jar, sorted by name
fn outgoing(conn: &Conn) -> String {
    let mut cookies: Vec<_> = conn
        .cookies()
        .delta()
        .map(|cookie| format!("{}={}", cookie.name(), cookie.value()))
        .collect();
    cookies.sort();
    cookies.join(" ")
}

fn expiration() -> SystemTime {
    SystemTime::now() + Duration::from_secs(60)
}

#[test]
fn reads_a_chunked_token() {
    let handler = (CookiesHandler::new(), |conn: Conn| async move {
        let body = conn
            .multipart_cookie(&multipart())
            .unwrap_or_else(|| String::from("absent"));
        conn.ok(body)
    });

    assert_ok!(get("/").on(&handler), "absent");

    assert_ok!(
        get("/")
            .with_request_header("cookie", "token=abcd; token_1=efgh; token_2=ij")
            .on(&handler),
        "abcdefghij"
    );

    assert_ok!(
        get("/")
            .with_request_header("cookie", "token=abcd; token_2=ij; other=value")
            .on(&handler),
        "absent"
    );

    assert_ok!(
        get("/")
            .with_request_header("cookie", "token=abcd; other=value")
            .on(&handler),
        "abcd"
    );
}

#[test]
fn writes_a_chunked_token() {
    let handler = (CookiesHandler::new(), |conn: Conn| async move {
        let conn = conn.with_multipart_cookie(&multipart(), "abcdefghij", expiration());
        let body = outgoing(&conn);
        conn.ok(body)
    });

    assert_ok!(
        get("/").on(&handler),
        "token=abcd token_1=efgh token_2=ij"
    );
}

#[test]
fn replacing_with_a_shorter_token_removes_stale_chunks() {
    let handler = (CookiesHandler::new(), |conn: Conn| async move {
        let conn = conn.with_multipart_cookie(&multipart(), "xyz", expiration());
        let body = outgoing(&conn);
        conn.ok(body)
    });

    assert_ok!(
        get("/")
            .with_request_header("cookie", "token=abcd; token_1=efgh; token_2=ij")
            .on(&handler),
        "token=xyz token_1=delete token_2=delete"
    );
}

#[test]
fn clears_every_chunk() {
    let handler = (CookiesHandler::new(), |conn: Conn| async move {
        let conn = conn.without_multipart_cookie(&multipart());
        let body = outgoing(&conn);
        conn.ok(body)
    });

    assert_ok!(get("/").on(&handler), "token=delete");

    assert_ok!(
        get("/")
            .with_request_header("cookie", "token=abcd; token_1=efgh; token_3=kl; other=value")
            .on(&handler),
        "token=delete token_1=delete token_3=delete"
    );
}

#[test]
fn reading_after_clearing_is_absent() {
    let handler = (CookiesHandler::new(), |conn: Conn| async move {
        let conn = conn.without_multipart_cookie(&multipart());
        let body = conn
            .multipart_cookie(&multipart())
            .unwrap_or_else(|| String::from("absent"));
        conn.ok(body)
    });

    assert_ok!(
        get("/")
            .with_request_header("cookie", "token=abcd")
            .on(&handler),
        "absent"
    );
}

#[test]
fn reading_after_replacing_returns_the_new_token() {
    let handler = (CookiesHandler::new(), |conn: Conn| async move {
        let conn = conn.with_multipart_cookie(&multipart(), "xyz", expiration());
        let body = conn
            .multipart_cookie(&multipart())
            .unwrap_or_else(|| String::from("absent"));
        conn.ok(body)
    });

    assert_ok!(
        get("/")
            .with_request_header("cookie", "token=abcd; token_1=efgh")
            .on(&handler),
        "xyz"
    );
}
