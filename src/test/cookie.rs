// +-----------------------------------------------------------------------------------------------+
// | Copyright 2016 Sean Kerr                                                                      |
// |                                                                                               |
// | Licensed under the Apache License, Version 2.0 (the "License");                               |
// | you may not use this file except in compliance with the License.                              |
// | You may obtain a copy of the License at                                                       |
// |                                                                                               |
// |  http://www.apache.org/licenses/LICENSE-2.0                                                   |
// |                                                                                               |
// | Unless required by applicable law or agreed to in writing, software                           |
// | distributed under the License is distributed on an "AS IS" BASIS,                             |
// | WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.                      |
// | See the License for the specific language governing permissions and                           |
// | limitations under the License.                                                                |
// +-----------------------------------------------------------------------------------------------+

use cookie::{ parse_cookies, parse_set_cookie, Cookie };
use status::ParseError;

#[test]
fn single_cookie() {
    let cookies = parse_cookies(b"foo=bar").unwrap();

    assert_eq!(1, cookies.len());
    assert_eq!("foo", cookies[0].name());
    assert_eq!(b"bar", cookies[0].value());
    assert_eq!(0, cookies[0].version());
}

#[test]
fn multiple_cookies_both_separators() {
    let cookies = parse_cookies(b"a=1; b=2, c=3").unwrap();

    assert_eq!(3, cookies.len());
    assert_eq!("b", cookies[1].name());
    assert_eq!(b"3", cookies[2].value());
}

#[test]
fn rfc2109_reserved_attributes() {
    let cookies = parse_cookies(b"$Version=\"1\"; foo=\"bar\"; $Path=/; baz=qux").unwrap();

    assert_eq!(2, cookies.len());

    assert_eq!("foo", cookies[0].name());
    assert_eq!(b"bar", cookies[0].value());
    assert_eq!(1, cookies[0].version());
    assert_eq!(Some("/"), cookies[0].path());

    assert_eq!("baz", cookies[1].name());
    assert_eq!(1, cookies[1].version());
    assert_eq!(None, cookies[1].path());
}

#[test]
fn reserved_attribute_before_any_cookie() {
    assert_eq!(Err(ParseError::BadHeader),
               parse_cookies(b"$Path=/; foo=bar").map(|_| ()));
}

#[test]
fn domain_and_port_attach() {
    let cookies = parse_cookies(b"$Version=1; a=1; $Domain=.example.com; $Port=\"80\"").unwrap();

    assert_eq!(1, cookies.len());
    assert_eq!(Some(".example.com"), cookies[0].domain());
    assert_eq!(Some("80"), cookies[0].port());
}

#[test]
fn valueless_cookie() {
    let cookies = parse_cookies(b"empty; foo=bar").unwrap();

    assert_eq!(2, cookies.len());
    assert_eq!("empty", cookies[0].name());
    assert_eq!(b"", cookies[0].value());
}

#[test]
fn tainted_value() {
    let cookies = parse_cookies(b"a=caf\xE9").unwrap();

    assert!(cookies[0].is_tainted());
    assert_eq!(Err(ParseError::BadUtf8), cookies[0].value_str());
}

#[test]
fn serialize_version_0() {
    let mut cookie = Cookie::new("foo");

    cookie.set_value(b"bar")
          .set_path("/app")
          .set_expires("Wed, 09 Nov 2026 10:00:00 GMT")
          .set_secure(true);

    assert_eq!("foo=bar; path=/app; expires=Wed, 09 Nov 2026 10:00:00 GMT; secure",
               cookie.to_string());
}

#[test]
fn serialize_version_1() {
    let mut cookie = Cookie::new("foo");

    cookie.set_value(b"bar")
          .set_version(1)
          .set_path("/app")
          .set_domain(".example.com")
          .set_max_age(3600)
          .set_http_only(true);

    assert_eq!("foo=\"bar\"; Version=1; path=/app; domain=.example.com; max-age=3600; HttpOnly",
               cookie.to_string());
}

#[test]
fn serialize_version_1_prefers_max_age() {
    let mut cookie = Cookie::new("foo");

    cookie.set_value(b"bar")
          .set_version(1)
          .set_expires("Wed, 09 Nov 2026 10:00:00 GMT")
          .set_max_age(60);

    assert_eq!("foo=\"bar\"; Version=1; max-age=60", cookie.to_string());
}

#[test]
fn round_trip_version_0() {
    let mut cookie = Cookie::new("session");

    cookie.set_value(b"0123abcd")
          .set_path("/")
          .set_expires("Wed, 09 Nov 2026 10:00:00 GMT")
          .set_secure(true);

    let reparsed = parse_set_cookie(cookie.to_string().as_bytes()).unwrap();

    assert_eq!(cookie, reparsed);
}

#[test]
fn round_trip_version_1() {
    let mut cookie = Cookie::new("session");

    cookie.set_value(b"0123abcd")
          .set_version(1)
          .set_path("/")
          .set_domain(".example.com")
          .set_port("80")
          .set_comment("state")
          .set_comment_url("http://example.com/c")
          .set_max_age(3600)
          .set_secure(true)
          .set_http_only(true);

    let reparsed = parse_set_cookie(cookie.to_string().as_bytes()).unwrap();

    assert_eq!(cookie, reparsed);
}
