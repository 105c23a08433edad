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

//! Request facade.
//!
//! A [`Request`](struct.Request.html) owns the per-request parse state: the query string table,
//! the body table, the body parser, and the cookie jar. The query string is parsed once on
//! first access; body parsing is lazy and driven by lookups, pulling only as much of the
//! brigade through the parser as a lookup needs. Each stream keeps its own sticky status, so a
//! failed body never hides a healthy query string or the other way around.

use brigade::Brigade;
use config::Config;
use cookie::{ parse_cookies, Cookie };
use parser::BodyParser;
use status::{ ParseError, ParseStatus };
use table::{ Param, Table };
use upload::Upload;

/// Request facade.
pub struct Request {
    /// Parsed query string table.
    args: Option<Table>,

    /// Query string parse status.
    args_status: ParseStatus,

    /// Parsed body table.
    body: Table,

    /// Body parser, created on first body access.
    body_parser: Option<BodyParser>,

    /// Body parse status.
    body_status: ParseStatus,

    /// Unparsed body data.
    brigade: Brigade,

    /// Configured limits.
    config: Config,

    /// Content-Type header value.
    content_type: Option<Vec<u8>>,

    /// Cookie header value.
    cookie_header: Option<Vec<u8>>,

    /// Parsed cookie jar.
    cookies: Option<Vec<Cookie>>,

    /// Request method.
    method: Option<Vec<u8>>,

    /// Upload hooks registered before the body parser existed.
    pending_hooks: Vec<Box<dyn FnMut(&Upload, &[u8]) -> bool>>,

    /// Query string bytes.
    query_string: Option<Vec<u8>>
}

impl Request {
    /// Create a new `Request`.
    pub fn new(config: Config) -> Request {
        Request{
            args:          None,
            args_status:   ParseStatus::Incomplete,
            body:          Table::new(),
            body_parser:   None,
            body_status:   ParseStatus::Incomplete,
            brigade:       Brigade::new(),
            config:        config,
            content_type:  None,
            cookie_header: None,
            cookies:       None,
            method:        None,
            pending_hooks: Vec::new(),
            query_string:  None
        }
    }

    /// Register an upload hook.
    ///
    /// Hooks registered before the body parser exists are replayed onto it once it is created.
    pub fn add_upload_hook<F>(&mut self, hook: F)
    where F : FnMut(&Upload, &[u8]) -> bool + 'static {
        match self.body_parser {
            Some(ref mut parser) => parser.add_hook(hook),
            None => self.pending_hooks.push(Box::new(hook))
        }
    }

    /// Retrieve the query string table, parsing it on first access.
    pub fn args(&mut self) -> &Table {
        self.ensure_args();

        self.args.as_ref().expect("args table missing")
    }

    /// Retrieve the query string parse status.
    pub fn args_status(&self) -> ParseStatus {
        self.args_status
    }

    /// Retrieve the body table, first feeding the body parser everything available.
    pub fn body(&mut self) -> &Table {
        self.drive_body();

        &self.body
    }

    /// Retrieve the body parse status.
    pub fn body_status(&self) -> ParseStatus {
        self.body_status
    }

    /// Mark the body stream complete.
    pub fn close_body(&mut self) {
        self.brigade.close();
    }

    /// Retrieve the cookie jar, parsing the Cookie header on first access.
    ///
    /// # Errors
    ///
    /// - [`ParseError::NoHeader`](../status/enum.ParseError.html#variant.NoHeader) when the
    ///   request carried no Cookie header
    /// - any error raised by [`parse_cookies()`](../cookie/fn.parse_cookies.html)
    pub fn cookies(&mut self) -> Result<&[Cookie], ParseError> {
        if self.cookies.is_none() {
            let cookies = match self.cookie_header {
                Some(ref header) => parse_cookies(header)?,
                None => return Err(ParseError::NoHeader)
            };

            self.cookies = Some(cookies);
        }

        match self.cookies {
            Some(ref cookies) => Ok(cookies),
            None => Err(ParseError::NoHeader)
        }
    }

    /// Append a chunk of body data.
    pub fn feed_body(&mut self, chunk: &[u8]) {
        self.brigade.append(chunk);
    }

    /// Retrieve the request method.
    pub fn method(&self) -> Option<&[u8]> {
        self.method.as_ref().map(|x| &x[..])
    }

    /// Look up `name` across the query string and the body.
    ///
    /// The query string wins when both tables carry the name. Body parsing advances only as far
    /// as the lookup requires; once the name shows up, the rest of the brigade stays unparsed
    /// until something else asks for it.
    ///
    /// A name that is found is always returned, whatever the other stream's status. A name that
    /// is not found surfaces the error of whichever parser failed.
    pub fn param<T: AsRef<[u8]>>(&mut self, name: T) -> Result<Option<&Param>, ParseError> {
        let name = name.as_ref();

        self.ensure_args();

        let in_args = match self.args {
            Some(ref args) => args.has(name),
            None => false
        };

        if !in_args {
            loop {
                if self.body.has(name) || self.body_status.is_terminal() {
                    break;
                }

                if self.brigade.is_empty() {
                    if self.brigade.is_closed() {
                        // nothing left; let the parser finalize
                        self.drive_body_once();
                    }

                    break;
                }

                self.drive_body_once();
            }
        }

        if let Some(ref args) = self.args {
            if let Some(param) = args.first(name) {
                return Ok(Some(param));
            }
        }

        if let Some(param) = self.body.first(name) {
            return Ok(Some(param));
        }

        if let Some(error) = self.args_status.error() {
            return Err(error);
        }

        if let Some(error) = self.body_status.error() {
            return Err(error);
        }

        Ok(None)
    }

    /// Produce the union view of query string and body parameters.
    ///
    /// The overlay is a fresh table holding the query string entries followed by the body
    /// entries; changing it affects neither source.
    pub fn params(&mut self) -> Table {
        self.ensure_args();
        self.drive_body();

        match self.args {
            Some(ref args) => args.merge_overlay(&self.body),
            None => Table::new()
        }
    }

    /// Set the Content-Type header value.
    pub fn set_content_type(&mut self, content_type: &[u8]) -> &mut Self {
        self.content_type = Some(content_type.to_vec());
        self
    }

    /// Set the Cookie header value.
    pub fn set_cookie_header(&mut self, cookie_header: &[u8]) -> &mut Self {
        self.cookie_header = Some(cookie_header.to_vec());
        self
    }

    /// Set the request method.
    pub fn set_method(&mut self, method: &[u8]) -> &mut Self {
        self.method = Some(method.to_vec());
        self
    }

    /// Set the query string.
    pub fn set_query_string(&mut self, query_string: &[u8]) -> &mut Self {
        self.query_string = Some(query_string.to_vec());
        self
    }

    /// Parse the query string, once.
    fn ensure_args(&mut self) {
        if self.args.is_some() {
            return;
        }

        let mut table   = Table::new();
        let mut brigade = Brigade::new();

        if let Some(ref query_string) = self.query_string {
            brigade.append(query_string);
        }

        brigade.close();

        let mut parser = ::urlencoded::Parser::new(self.config.clone());

        self.args_status = parser.feed(&mut brigade, &mut table);

        debug!("args: {} entries, status {:?}", table.len(), self.args_status);

        self.args = Some(table);
    }

    /// Create the body parser if the request can have one.
    fn ensure_parser(&mut self) {
        if self.body_parser.is_some() || self.body_status.is_terminal() {
            return;
        }

        let content_type = match self.content_type {
            Some(ref content_type) => content_type.clone(),
            None => {
                if !self.brigade.is_empty() {
                    // body data with no content type to route it by
                    self.body_status = ParseStatus::Error(ParseError::NoParser);
                }

                return;
            }
        };

        match BodyParser::for_content_type(&content_type, &self.config) {
            Ok(mut parser) => {
                for hook in self.pending_hooks.drain(..) {
                    parser.add_hook(hook);
                }

                self.body_parser = Some(parser);
            },
            Err(error) => {
                self.body_status = ParseStatus::Error(error);
            }
        }
    }

    /// Feed the body parser everything the brigade holds.
    fn drive_body(&mut self) {
        self.ensure_parser();

        if let Some(ref mut parser) = self.body_parser {
            parser.feed(&mut self.brigade, &mut self.body);

            self.body_status = parser.status();
        }
    }

    /// Feed the body parser a single chunk.
    fn drive_body_once(&mut self) {
        self.ensure_parser();

        let parser = match self.body_parser {
            Some(ref mut parser) => parser,
            None => return
        };

        if parser.status().is_terminal() {
            self.body_status = parser.status();

            return;
        }

        let mut step = Brigade::new();

        if let Some(chunk) = self.brigade.pop_chunk() {
            step.append(&chunk);
        }

        if self.brigade.is_empty() && self.brigade.is_closed() {
            step.close();
        }

        parser.feed(&mut step, &mut self.body);

        self.body_status = parser.status();
    }
}
