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

//! Body parser selection.
//!
//! The two body parsers share one contract: `feed(brigade, table)` returning a sticky
//! [`ParseStatus`](../status/enum.ParseStatus.html). [`BodyParser`](enum.BodyParser.html) wraps
//! them as tagged variants selected by the request's Content-Type.

use brigade::Brigade;
use config::Config;
use header::parse_header_value;
use multipart;
use status::{ ParseError, ParseStatus };
use table::Table;
use upload::Upload;
use urlencoded;

use std::cell::RefCell;
use std::rc::Rc;

/// Upload hook callback.
///
/// Receives the upload and the data chunk about to be spooled. Returning `false` aborts parsing
/// with `Interrupt`. Hook state lives in the closure itself.
pub type UploadHook = Box<dyn FnMut(&Upload, &[u8]) -> bool>;

/// Upload hook chain, invoked in registration order and shared with nested parsers.
pub type HookChain = Rc<RefCell<Vec<UploadHook>>>;

// -------------------------------------------------------------------------------------------------

/// Body parser variants.
pub enum BodyParser {
    /// `multipart/*` parser.
    Multipart(multipart::Parser),

    /// `application/x-www-form-urlencoded` parser.
    UrlEncoded(urlencoded::Parser)
}

impl BodyParser {
    /// Select a body parser for `content_type`.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Mismatch`](../status/enum.ParseError.html#variant.Mismatch) on a
    ///   multipart content type without a boundary attribute
    /// - [`ParseError::NoParser`](../status/enum.ParseError.html#variant.NoParser) on anything
    ///   that is neither URL encoded nor multipart
    pub fn for_content_type(content_type: &[u8], config: &Config)
    -> Result<BodyParser, ParseError> {
        let (main, attrs) = parse_header_value(content_type)?;

        if main.eq_ignore_ascii_case(b"application/x-www-form-urlencoded") {
            debug!("body parser: url encoded");

            Ok(BodyParser::UrlEncoded(urlencoded::Parser::new(config.clone())))
        } else if main.len() >= 10 && main[..10].eq_ignore_ascii_case(b"multipart/") {
            let boundary = match attrs.get(b"boundary") {
                Some(boundary) => boundary,
                None => return Err(ParseError::Mismatch)
            };

            debug!("body parser: multipart, boundary {:?}",
                   String::from_utf8_lossy(boundary));

            Ok(BodyParser::Multipart(multipart::Parser::new(boundary, config.clone())))
        } else {
            Err(ParseError::NoParser)
        }
    }

    /// Append `hook` onto the upload hook chain.
    ///
    /// URL encoded bodies never carry uploads, so the hook is meaningful for the multipart
    /// variant only.
    pub fn add_hook<F>(&mut self, hook: F)
    where F : FnMut(&Upload, &[u8]) -> bool + 'static {
        if let BodyParser::Multipart(ref mut parser) = *self {
            parser.add_hook(hook);
        }
    }

    /// Retrieve the total byte count processed.
    pub fn byte_count(&self) -> usize {
        match *self {
            BodyParser::Multipart(ref parser) => parser.byte_count(),
            BodyParser::UrlEncoded(ref parser) => parser.byte_count()
        }
    }

    /// Feed brigade data through the parser, appending results onto `table`.
    pub fn feed(&mut self, brigade: &mut Brigade, table: &mut Table) -> ParseStatus {
        match *self {
            BodyParser::Multipart(ref mut parser) => parser.feed(brigade, table),
            BodyParser::UrlEncoded(ref mut parser) => parser.feed(brigade, table)
        }
    }

    /// Retrieve the sticky status.
    pub fn status(&self) -> ParseStatus {
        match *self {
            BodyParser::Multipart(ref parser) => parser.status(),
            BodyParser::UrlEncoded(ref parser) => parser.status()
        }
    }
}
