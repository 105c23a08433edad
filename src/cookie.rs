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
// | Author: Sean Kerr <sean@code-box.org>                                                         |
// +-----------------------------------------------------------------------------------------------+

//! Cookie support.
//!
//! Version 0 (Netscape) and version 1 (RFC 2109) cookies are parsed from `Cookie` and
//! `Set-Cookie` header values and serialized back; the version decides the output format.

use header::{ parse_attrs, AttrSegment };
use status::ParseError;

use std::fmt;
use std::str;

/// HTTP cookie.
#[derive(Clone,Eq,PartialEq)]
pub struct Cookie {
    /// Comment.
    comment: Option<String>,

    /// Comment URL.
    comment_url: Option<String>,

    /// Domain.
    domain: Option<String>,

    /// Expiration date and time.
    expires: Option<String>,

    /// Indicates the cookie is for HTTP only.
    http_only: bool,

    /// Maximum age in seconds.
    max_age: Option<i64>,

    /// Name.
    name: String,

    /// Path.
    path: Option<String>,

    /// Port list.
    port: Option<String>,

    /// Indicates that the cookie is secure.
    secure: bool,

    /// Indicates that the value carries bytes outside 7-bit ASCII.
    tainted: bool,

    /// Value.
    value: Vec<u8>,

    /// Cookie specification version: 0 is Netscape, 1 is RFC 2109.
    version: u8
}

impl Cookie {
    /// Create a new `Cookie`.
    pub fn new(name: &str) -> Cookie {
        Cookie{
            comment:     None,
            comment_url: None,
            domain:      None,
            expires:     None,
            http_only:   false,
            max_age:     None,
            name:        name.to_string(),
            path:        None,
            port:        None,
            secure:      false,
            tainted:     false,
            value:       Vec::new(),
            version:     0
        }
    }

    /// Create a new `Cookie` from a byte slice name.
    ///
    /// Cookie names are tokens, so anything outside ASCII is replaced.
    pub fn new_from_slice(name: &[u8]) -> Cookie {
        Cookie::new(&String::from_utf8_lossy(name))
    }

    /// Retrieve the comment.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_ref().map(|x| &x[..])
    }

    /// Retrieve the comment URL.
    pub fn comment_url(&self) -> Option<&str> {
        self.comment_url.as_ref().map(|x| &x[..])
    }

    /// Retrieve the domain.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_ref().map(|x| &x[..])
    }

    /// Retrieve the expiration date and time.
    pub fn expires(&self) -> Option<&str> {
        self.expires.as_ref().map(|x| &x[..])
    }

    /// Indicates that the cookie is for HTTP only.
    pub fn is_http_only(&self) -> bool {
        self.http_only
    }

    /// Indicates that the cookie is secure.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Indicates that the value carries bytes outside 7-bit ASCII.
    pub fn is_tainted(&self) -> bool {
        self.tainted
    }

    /// Retrieve the maximum age.
    pub fn max_age(&self) -> Option<i64> {
        self.max_age
    }

    /// Retrieve the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retrieve the path.
    pub fn path(&self) -> Option<&str> {
        self.path.as_ref().map(|x| &x[..])
    }

    /// Retrieve the port list.
    pub fn port(&self) -> Option<&str> {
        self.port.as_ref().map(|x| &x[..])
    }

    /// Set the comment.
    pub fn set_comment(&mut self, comment: &str) -> &mut Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// Set the comment URL.
    pub fn set_comment_url(&mut self, comment_url: &str) -> &mut Self {
        self.comment_url = Some(comment_url.to_string());
        self
    }

    /// Set the domain.
    pub fn set_domain(&mut self, domain: &str) -> &mut Self {
        self.domain = Some(domain.to_string());
        self
    }

    /// Set the expiration date and time.
    pub fn set_expires(&mut self, expires: &str) -> &mut Self {
        self.expires = Some(expires.to_string());
        self
    }

    /// Set the HTTP only status.
    pub fn set_http_only(&mut self, http_only: bool) -> &mut Self {
        self.http_only = http_only;
        self
    }

    /// Set the maximum age.
    pub fn set_max_age(&mut self, max_age: i64) -> &mut Self {
        self.max_age = Some(max_age);
        self
    }

    /// Set the path.
    pub fn set_path(&mut self, path: &str) -> &mut Self {
        self.path = Some(path.to_string());
        self
    }

    /// Set the port list.
    pub fn set_port(&mut self, port: &str) -> &mut Self {
        self.port = Some(port.to_string());
        self
    }

    /// Set the secure status.
    pub fn set_secure(&mut self, secure: bool) -> &mut Self {
        self.secure = secure;
        self
    }

    /// Set the value.
    pub fn set_value(&mut self, value: &[u8]) -> &mut Self {
        self.tainted = value.iter().any(|&byte| byte > 0x7F);
        self.value   = value.to_vec();
        self
    }

    /// Set the version.
    pub fn set_version(&mut self, version: u8) -> &mut Self {
        self.version = version;
        self
    }

    /// Retrieve the value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Retrieve the value as a string.
    ///
    /// # Errors
    ///
    /// - [`ParseError::BadUtf8`](../status/enum.ParseError.html#variant.BadUtf8)
    pub fn value_str(&self) -> Result<&str, ParseError> {
        str::from_utf8(&self.value).map_err(|_| ParseError::BadUtf8)
    }

    /// Retrieve the version.
    pub fn version(&self) -> u8 {
        self.version
    }
}

impl fmt::Debug for Cookie {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter,
               "Cookie(name=\"{}\", value=\"{}\", version={}, domain=\"{}\", path=\"{}\", \
                       port=\"{}\", expires=\"{}\", max-age={}, http-only={}, secure={})",
               self.name,
               String::from_utf8_lossy(&self.value),
               self.version,
               self.domain.clone().unwrap_or_else(String::new),
               self.path.clone().unwrap_or_else(String::new),
               self.port.clone().unwrap_or_else(String::new),
               self.expires.clone().unwrap_or_else(String::new),
               self.max_age.unwrap_or(-1),
               self.http_only,
               self.secure)
    }
}

impl fmt::Display for Cookie {
    /// Serialize the cookie.
    ///
    /// Attributes are emitted in a fixed order: `Version`, `path`, `domain`, `port`, `comment`,
    /// `commentURL`, `max-age`/`expires`, `secure`, `HttpOnly`. Version 0 cookies never emit a
    /// `Version` attribute; version 1 cookies always do, and prefer `max-age` over `expires`.
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        if self.version == 0 {
            write!(formatter, "{}={}", self.name, String::from_utf8_lossy(&self.value))?;
        } else {
            write!(formatter,
                   "{}=\"{}\"; Version={}",
                   self.name,
                   String::from_utf8_lossy(&self.value),
                   self.version)?;
        }

        if let Some(ref path) = self.path {
            write!(formatter, "; path={}", path)?;
        }

        if let Some(ref domain) = self.domain {
            write!(formatter, "; domain={}", domain)?;
        }

        if let Some(ref port) = self.port {
            write!(formatter, "; port=\"{}\"", port)?;
        }

        if let Some(ref comment) = self.comment {
            write!(formatter, "; comment=\"{}\"", comment)?;
        }

        if let Some(ref comment_url) = self.comment_url {
            write!(formatter, "; commentURL=\"{}\"", comment_url)?;
        }

        if self.version > 0 && self.max_age.is_some() {
            write!(formatter, "; max-age={}", self.max_age.unwrap())?;
        } else if let Some(ref expires) = self.expires {
            write!(formatter, "; expires={}", expires)?;
        } else if let Some(max_age) = self.max_age {
            write!(formatter, "; max-age={}", max_age)?;
        }

        if self.secure {
            write!(formatter, "; secure")?;
        }

        if self.http_only {
            write!(formatter, "; HttpOnly")?;
        }

        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

/// Parse a `Cookie` header value into cookie records.
///
/// Both `;` and `,` separate cookies. The RFC 2109 reserved attributes `$Path`, `$Domain` and
/// `$Port` attach to the most recent cookie; `$Version` sets the version of every cookie that
/// follows it. A reserved attribute that arrives before any cookie fails the header, with the
/// exception of the `$Version` prologue.
///
/// # Errors
///
/// - [`ParseError::BadAttr`](../status/enum.ParseError.html#variant.BadAttr)
/// - [`ParseError::BadChar`](../status/enum.ParseError.html#variant.BadChar)
/// - [`ParseError::BadHeader`](../status/enum.ParseError.html#variant.BadHeader)
/// - [`ParseError::BadSeq`](../status/enum.ParseError.html#variant.BadSeq)
///
/// # Example
///
/// ```
/// use request_box::cookie::parse_cookies;
///
/// let cookies = parse_cookies(b"$Version=\"1\"; foo=\"bar\"; $Path=/; baz=qux").unwrap();
///
/// assert_eq!(2, cookies.len());
/// assert_eq!("foo", cookies[0].name());
/// assert_eq!(Some("/"), cookies[0].path());
/// assert_eq!(1, cookies[1].version());
/// assert_eq!(None, cookies[1].path());
/// ```
pub fn parse_cookies(header: &[u8]) -> Result<Vec<Cookie>, ParseError> {
    let mut cookies: Vec<Cookie> = Vec::new();
    let mut version              = 0;
    let mut error                = None;

    parse_attrs(header, b";,",
        |segment| {
            let (name, value) = split_segment(&segment);

            if name.first() == Some(&b'$') {
                let attr = &name[1..];

                if attr.eq_ignore_ascii_case(b"version") {
                    version = parse_version(value);

                    return true;
                }

                let reserved = if attr.eq_ignore_ascii_case(b"path") {
                    Some(0)
                } else if attr.eq_ignore_ascii_case(b"domain") {
                    Some(1)
                } else if attr.eq_ignore_ascii_case(b"port") {
                    Some(2)
                } else {
                    None
                };

                if let Some(reserved) = reserved {
                    match cookies.last_mut() {
                        Some(cookie) => {
                            let value = String::from_utf8_lossy(value).into_owned();

                            match reserved {
                                0 => cookie.set_path(&value),
                                1 => cookie.set_domain(&value),
                                _ => cookie.set_port(&value)
                            };
                        },
                        None => {
                            // reserved attribute before any cookie
                            error = Some(ParseError::BadHeader);

                            return false;
                        }
                    }

                    return true;
                }
            }

            // ordinary cookie; unknown `$` names fall through to here as Netscape cookies
            let mut cookie = Cookie::new_from_slice(name);

            cookie.set_value(value)
                  .set_version(version);

            cookies.push(cookie);

            true
        }
    )?;

    if let Some(error) = error {
        return Err(error);
    }

    Ok(cookies)
}

/// Parse a `Set-Cookie` header value into a cookie record.
///
/// The first segment names the cookie; the remaining `;` delimited attributes are matched
/// case-insensitively, and unknown attributes are ignored.
///
/// # Errors
///
/// - [`ParseError::BadAttr`](../status/enum.ParseError.html#variant.BadAttr)
/// - [`ParseError::BadChar`](../status/enum.ParseError.html#variant.BadChar)
/// - [`ParseError::BadSeq`](../status/enum.ParseError.html#variant.BadSeq)
/// - [`ParseError::NoToken`](../status/enum.ParseError.html#variant.NoToken)
pub fn parse_set_cookie(header: &[u8]) -> Result<Cookie, ParseError> {
    let mut cookie: Option<Cookie> = None;

    parse_attrs(header, b";",
        |segment| {
            let (name, value) = split_segment(&segment);

            match cookie {
                None => {
                    let mut new = Cookie::new_from_slice(name);

                    new.set_value(value);

                    cookie = Some(new);
                },
                Some(ref mut cookie) => {
                    if name.eq_ignore_ascii_case(b"version") {
                        cookie.set_version(parse_version(value));
                    } else if name.eq_ignore_ascii_case(b"path") {
                        cookie.set_path(&String::from_utf8_lossy(value));
                    } else if name.eq_ignore_ascii_case(b"domain") {
                        cookie.set_domain(&String::from_utf8_lossy(value));
                    } else if name.eq_ignore_ascii_case(b"port") {
                        cookie.set_port(&String::from_utf8_lossy(value));
                    } else if name.eq_ignore_ascii_case(b"comment") {
                        cookie.set_comment(&String::from_utf8_lossy(value));
                    } else if name.eq_ignore_ascii_case(b"commenturl") {
                        cookie.set_comment_url(&String::from_utf8_lossy(value));
                    } else if name.eq_ignore_ascii_case(b"expires") {
                        cookie.set_expires(&String::from_utf8_lossy(value));
                    } else if name.eq_ignore_ascii_case(b"max-age") {
                        if let Ok(max_age) = String::from_utf8_lossy(value).parse() {
                            cookie.set_max_age(max_age);
                        }
                    } else if name.eq_ignore_ascii_case(b"secure") {
                        cookie.set_secure(true);
                    } else if name.eq_ignore_ascii_case(b"httponly") {
                        cookie.set_http_only(true);
                    }
                }
            }

            true
        }
    )?;

    cookie.ok_or(ParseError::NoToken)
}

/// Split an attribute segment into its name and value.
fn split_segment<'a>(segment: &AttrSegment<'a>) -> (&'a [u8], &'a [u8]) {
    match *segment {
        AttrSegment::Name(name) => (name, b""),
        AttrSegment::NameValue(name, value) => (name, value)
    }
}

/// Parse a cookie version attribute value, tolerating junk.
fn parse_version(value: &[u8]) -> u8 {
    str::from_utf8(value)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}
