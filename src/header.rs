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

//! Structured header value handling.
//!
//! One tokenizer covers the shared grammar of Cookie, Content-Type, and Content-Disposition
//! values: a leading token, then `;` delimited attributes whose values are tokens or quoted
//! strings.

use byte::{ is_header_field, is_quoted_header_field, is_token };
use status::ParseError;

use byte_slice::ByteStream;

use std::fmt;
use std::slice;

/// If the stream is EOS, exit with Ok status. Otherwise do nothing.
macro_rules! exit_if_eos {
    ($context:expr) => ({
        if bs_is_eos!($context) {
            exit_ok!($context);
        }
    });
}

/// Exit with Ok status.
macro_rules! exit_ok {
    ($context:expr) => ({
        return Ok($context.stream_index);
    });
}

// -------------------------------------------------------------------------------------------------

/// Attribute segments.
pub enum AttrSegment<'a> {
    /// Name without a value.
    Name(&'a [u8]),

    /// Name and value pair.
    NameValue(&'a [u8], &'a [u8])
}

impl<'a> fmt::Debug for AttrSegment<'a> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AttrSegment::Name(x) => {
                write!(formatter,
                       "AttrSegment::Name({:?})",
                       String::from_utf8_lossy(x))
            },
            AttrSegment::NameValue(x, y) => {
                write!(formatter,
                       "AttrSegment::NameValue({:?}, {:?})",
                       String::from_utf8_lossy(x),
                       String::from_utf8_lossy(y))
            }
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Ordered attribute multimap with case-insensitive name lookup.
#[derive(Clone,Default,PartialEq)]
pub struct HeaderBag {
    entries: Vec<(Vec<u8>, Vec<u8>)>
}

impl HeaderBag {
    /// Create a new `HeaderBag`.
    pub fn new() -> HeaderBag {
        HeaderBag{
            entries: Vec::new()
        }
    }

    /// Retrieve attribute `name`.
    ///
    /// # Errors
    ///
    /// - [`ParseError::NoAttr`](../status/enum.ParseError.html#variant.NoAttr)
    pub fn attribute<T: AsRef<[u8]>>(&self, name: T) -> Result<&[u8], ParseError> {
        self.get(name).ok_or(ParseError::NoAttr)
    }

    /// Retrieve the first attribute value whose name matches `name` case-insensitively.
    pub fn get<T: AsRef<[u8]>>(&self, name: T) -> Option<&[u8]> {
        let name = name.as_ref();

        self.entries
            .iter()
            .find(|&&(ref n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, ref v)| &v[..])
    }

    /// Indicates that `name` exists within the collection.
    pub fn has<T: AsRef<[u8]>>(&self, name: T) -> bool {
        self.get(name).is_some()
    }

    /// Indicates that the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retrieve an iterator over the `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> slice::Iter<(Vec<u8>, Vec<u8>)> {
        self.entries.iter()
    }

    /// Retrieve the attribute count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Append attribute `name` with `value`.
    pub fn push(&mut self, name: &[u8], value: &[u8]) -> &mut Self {
        self.entries.push((name.to_vec(), value.to_vec()));
        self
    }
}

impl fmt::Debug for HeaderBag {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.entries
                         .iter()
                         .map(|&(ref n, ref v)| {
                             (String::from_utf8_lossy(n), String::from_utf8_lossy(v))
                         }))
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------

/// Parse the attributes of a structured header value.
///
/// Attribute names keep their original casing. Values may be tokens or quoted strings; backslash
/// escapes are honored only inside quotes. Any byte in `delimiters` separates segments, which
/// covers both `;` attribute lists and the `,`/`;` mix of cookie headers.
///
/// `segment_fn` receives each [`AttrSegment`](enum.AttrSegment.html) and returns `true` to keep
/// parsing.
///
/// # Returns
///
/// **`usize`**
///
/// The amount of data that was parsed.
///
/// # Errors
///
/// - [`ParseError::BadAttr`](../status/enum.ParseError.html#variant.BadAttr)
/// - [`ParseError::BadChar`](../status/enum.ParseError.html#variant.BadChar)
/// - [`ParseError::BadSeq`](../status/enum.ParseError.html#variant.BadSeq)
///
/// # Example
///
/// ```
/// use request_box::header::{ AttrSegment, parse_attrs };
///
/// let mut boundary = Vec::new();
///
/// parse_attrs(b"multipart/form-data; boundary=\"AaB03x\"", b";",
///     |segment| {
///         if let AttrSegment::NameValue(name, value) = segment {
///             if name == b"boundary" {
///                 boundary.extend_from_slice(value);
///             }
///         }
///
///         true
///     }
/// ).unwrap();
///
/// assert_eq!(b"AaB03x", &boundary[..]);
/// ```
pub fn parse_attrs<F>(field: &[u8], delimiters: &[u8], mut segment_fn: F)
-> Result<usize, ParseError>
where F : FnMut(AttrSegment) -> bool {
    let mut context = ByteStream::new(field);
    let mut name    = Vec::new();
    let mut value   = Vec::new();

    macro_rules! is_delimiter {
        ($byte:expr) => (
            delimiters.contains(&$byte)
        );
    }

    loop {
        // parsing name
        consume_spaces!(context,
            // on end-of-stream
            {
                if !name.is_empty() {
                    segment_fn(AttrSegment::Name(&name));
                }

                exit_ok!(context);
            }
        );

        bs_mark!(context, context.stream_index);

        collect_tokens!(context,
            // on end-of-stream
            {
                if bs_slice_length!(context) > 0 {
                    name.extend_from_slice(bs_slice!(context));
                }

                if !name.is_empty() {
                    segment_fn(AttrSegment::Name(&name));
                }

                exit_ok!(context);
            }
        );

        name.extend_from_slice(bs_slice_ignore!(context));

        if context.byte == b'=' {
            // parsing value
            if bs_is_eos!(context) {
                segment_fn(AttrSegment::NameValue(&name, &value));

                exit_ok!(context);
            }

            bs_next!(context);

            if context.byte == b'"' {
                // quoted value
                loop {
                    bs_mark!(context, context.stream_index);

                    collect_quoted_field!(context,
                        // on end-of-stream
                        // didn't find an ending quote
                        {
                            return Err(ParseError::BadSeq(b'"'));
                        }
                    );

                    if context.byte == b'"' {
                        // found end quote
                        value.extend_from_slice(bs_slice_ignore!(context));

                        if !segment_fn(AttrSegment::NameValue(&name, &value)) {
                            exit_ok!(context);
                        }

                        name.clear();
                        value.clear();

                        consume_spaces!(context,
                            // on end-of-stream
                            {
                                exit_ok!(context);
                            }
                        );

                        exit_if_eos!(context);
                        bs_next!(context);

                        if is_delimiter!(context.byte) {
                            break;
                        }

                        // expected a delimiter to end the value
                        return Err(ParseError::BadAttr(context.byte));
                    } else if context.byte == b'\\' {
                        // escaped byte
                        if bs_is_eos!(context) {
                            return Err(ParseError::BadSeq(b'\\'));
                        }

                        value.extend_from_slice(bs_slice_ignore!(context));

                        bs_next!(context);

                        // escaped bytes must be 7-bit, and cannot be control characters
                        if context.byte > 0x1F && context.byte < 0x7F {
                            value.push(context.byte);
                        } else {
                            return Err(ParseError::BadSeq(context.byte));
                        }
                    } else {
                        // disallowed byte within the quoted string
                        return Err(ParseError::BadChar(context.byte));
                    }
                }
            } else {
                // unquoted value
                bs_replay!(context);

                consume_spaces!(context,
                    // on end-of-stream
                    {
                        segment_fn(AttrSegment::NameValue(&name, &value));

                        exit_ok!(context);
                    }
                );

                bs_mark!(context, context.stream_index);

                collect_field!(context,
                    // stop on these bytes
                    is_delimiter!(context.byte),

                    // on end-of-stream
                    {
                        if bs_slice_length!(context) > 0 {
                            value.extend_from_slice(bs_slice!(context));
                        }

                        trim_trailing_space(&mut value);

                        segment_fn(AttrSegment::NameValue(&name, &value));

                        exit_ok!(context);
                    }
                );

                if !is_delimiter!(context.byte) {
                    // disallowed byte within the value
                    return Err(ParseError::BadChar(context.byte));
                }

                value.extend_from_slice(bs_slice_ignore!(context));

                trim_trailing_space(&mut value);

                if !segment_fn(AttrSegment::NameValue(&name, &value)) {
                    exit_ok!(context);
                }

                name.clear();
                value.clear();
            }
        } else if context.byte == b'/' {
            // this isn't allowed as a token, but main header values such as content types carry
            // it, and they're parsed as name-only segments
            name.push(b'/');
        } else if is_delimiter!(context.byte) {
            // name without a value
            if !name.is_empty() {
                if !segment_fn(AttrSegment::Name(&name)) {
                    exit_ok!(context);
                }

                name.clear();
            }
        } else if context.byte == b' ' || context.byte == b'\t' {
            // OWS between the name and whatever ends it
            consume_spaces!(context,
                // on end-of-stream
                {
                    if !name.is_empty() {
                        segment_fn(AttrSegment::Name(&name));
                    }

                    exit_ok!(context);
                }
            );

            bs_next!(context);

            if is_delimiter!(context.byte) {
                if !name.is_empty() {
                    if !segment_fn(AttrSegment::Name(&name)) {
                        exit_ok!(context);
                    }

                    name.clear();
                }
            } else if context.byte == b'=' {
                bs_replay!(context);
            } else {
                return Err(ParseError::BadAttr(context.byte));
            }
        } else {
            // disallowed byte within the name
            return Err(ParseError::BadChar(context.byte));
        }
    }
}

/// Parse a structured header value into its main value and attributes.
///
/// # Errors
///
/// - [`ParseError::BadAttr`](../status/enum.ParseError.html#variant.BadAttr)
/// - [`ParseError::BadChar`](../status/enum.ParseError.html#variant.BadChar)
/// - [`ParseError::BadHeader`](../status/enum.ParseError.html#variant.BadHeader)
/// - [`ParseError::BadSeq`](../status/enum.ParseError.html#variant.BadSeq)
/// - [`ParseError::NoToken`](../status/enum.ParseError.html#variant.NoToken)
///
/// # Example
///
/// ```
/// use request_box::header::parse_header_value;
///
/// let (main, attrs) = parse_header_value(
///     b"form-data; name=\"file1\"; filename=\"a.txt\""
/// ).unwrap();
///
/// assert_eq!(b"form-data", &main[..]);
/// assert_eq!(b"file1", attrs.get(b"name").unwrap());
/// assert_eq!(b"a.txt", attrs.get(b"filename").unwrap());
/// ```
pub fn parse_header_value(value: &[u8]) -> Result<(Vec<u8>, HeaderBag), ParseError> {
    let mut main      = Vec::new();
    let mut bag       = HeaderBag::new();
    let mut first     = true;
    let mut malformed = false;

    parse_attrs(value, b";",
        |segment| {
            match segment {
                AttrSegment::Name(name) => {
                    if first {
                        main.extend_from_slice(name);
                    } else {
                        // flag attribute, e.g. a bare `secure`
                        bag.push(name, b"");
                    }
                },
                AttrSegment::NameValue(name, value) => {
                    if first {
                        // the main value cannot be an attribute pair
                        malformed = true;

                        return false;
                    }

                    bag.push(name, value);
                }
            }

            first = false;
            true
        }
    )?;

    if malformed {
        return Err(ParseError::BadHeader);
    }

    if main.is_empty() {
        return Err(ParseError::NoToken);
    }

    Ok((main, bag))
}

/// Strip trailing OWS left behind by an unquoted value collection.
fn trim_trailing_space(value: &mut Vec<u8>) {
    while value.last() == Some(&b' ') || value.last() == Some(&b'\t') {
        value.pop();
    }
}
