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

//! Multipart stream parser.
//!
//! Parses `multipart/form-data` bodies arriving in arbitrary chunks. The preamble is skipped
//! liberally, part headers are unfolded and tokenized, form fields land in the destination
//! table, and file uploads are spooled with an optional per-chunk hook chain. Nested
//! `multipart/*` parts are handled by a child parser up to a configured depth.
//!
//! The boundary matcher holds candidate bytes in parser state until they are confirmed either
//! way, so a partial boundary is never committed to part data.

use byte::{ is_header_field, is_quoted_header_field, is_token };
use charset;
use charset::Charset;
use brigade::Brigade;
use config::Config;
use fsm::{ ParserValue, Success };
use header::{ parse_header_value, HeaderBag };
use parser::HookChain;
use status::{ ParseError, ParseStatus };
use table::{ Param, Table };
use upload::Upload;

use byte_slice::ByteStream;

use std::rc::Rc;

/// State function type.
type StateFunction = fn(&mut Parser, &mut Table, &mut ByteStream)
                        -> Result<ParserValue, ParseError>;

/// Parser states.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum ParserState {
    /// Comparing stream bytes against the boundary.
    Boundary,

    /// Parsing the byte that ends a fully matched boundary.
    BoundaryEnd,

    /// Parsing the line feed that follows a boundary.
    BoundaryLf,

    /// Parsing has failed.
    Dead,

    /// Parsing has finished; remaining stream data is epilogue.
    Epilogue,

    /// Parsing the second hyphen of a terminal boundary.
    FinalHyphen,

    /// Detecting a header name, header fold, or end of headers.
    HeaderCheck,

    /// Parsing an escaped header value byte.
    HeaderEscapedValue,

    /// Parsing the line feed that ends a header line.
    HeaderLf,

    /// Parsing a header name.
    HeaderName,

    /// Parsing a quoted header value.
    HeaderQuotedValue,

    /// Parsing a header value.
    HeaderValue,

    /// Parsing the line feed that ends the part headers.
    HeadersEndLf,

    /// Parsing the first hyphen of a boundary candidate.
    Hyphen1,

    /// Parsing the second hyphen of a boundary candidate.
    Hyphen2,

    /// A nested parser owns the stream.
    Nested,

    /// Collecting part body data.
    PartData,

    /// Parsing the line feed within part body data.
    PartDataLf,

    /// Stripping whitespace ahead of a header value.
    StripHeaderValue
}

// -------------------------------------------------------------------------------------------------

/// Part classifications.
enum PartKind {
    /// Form field or file upload.
    Data,

    /// Nested multipart container.
    Nested
}

/// Part under construction.
struct PartBuilder {
    /// Character set claimed by the part's content type.
    charset: Option<Charset>,

    /// Field data.
    data: Vec<u8>,

    /// Raw part headers, unfolded.
    headers: HeaderBag,

    /// Parsed Content-Disposition attributes.
    info: HeaderBag,

    /// Field name.
    name: Vec<u8>,

    /// Upload spool, present when the part carries a filename.
    upload: Option<Upload>
}

impl PartBuilder {
    fn new() -> PartBuilder {
        PartBuilder{
            charset: None,
            data:    Vec::new(),
            headers: HeaderBag::new(),
            info:    HeaderBag::new(),
            name:    Vec::new(),
            upload:  None
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Multipart parser.
pub struct Parser {
    /// Boundary, without the leading hyphens.
    boundary: Vec<u8>,

    /// Total byte count processed.
    byte_count: usize,

    /// Total byte count fed, for the body limit.
    bytes_fed: u64,

    /// Nested parser.
    child: Option<Box<Parser>>,

    /// Configured limits.
    config: Config,

    /// Nesting depth of this parser.
    depth: u8,

    /// Indicates that emitted data is discarded: the preamble, and container slack that trails a
    /// nested body.
    discard: bool,

    /// Headers seen within the current part.
    header_count: u32,

    /// Upload hook chain, shared with nested parsers.
    hooks: HookChain,

    /// Boundary comparison progress.
    match_index: usize,

    /// Pending header name.
    name_buf: Vec<u8>,

    /// Part under construction.
    part: Option<PartBuilder>,

    /// Current state.
    state: ParserState,

    /// Current state function.
    state_function: StateFunction,

    /// Sticky status.
    status: ParseStatus,

    /// Pending header value.
    value_buf: Vec<u8>
}

impl Parser {
    /// Create a new `Parser`.
    ///
    /// `boundary` is the bare boundary token from the Content-Type header, without the leading
    /// hyphens.
    pub fn new(boundary: &[u8], config: Config) -> Parser {
        Parser::with_depth(boundary, config, 0, Rc::new(::std::cell::RefCell::new(Vec::new())))
    }

    /// Create a nested `Parser` that shares the hook chain of its parent.
    fn with_depth(boundary: &[u8], config: Config, depth: u8, hooks: HookChain) -> Parser {
        Parser{
            boundary:       boundary.to_vec(),
            byte_count:     0,
            bytes_fed:      0,
            child:          None,
            config:         config,
            depth:          depth,
            discard:        true,
            header_count:   0,
            hooks:          hooks,
            match_index:    0,
            name_buf:       Vec::new(),
            part:           None,
            state:          ParserState::Hyphen1,
            state_function: Parser::hyphen1,
            status:         ParseStatus::Incomplete,
            value_buf:      Vec::new()
        }
    }

    /// Append `hook` onto the upload hook chain.
    ///
    /// Hooks run in registration order for every chunk of upload data, before the chunk is
    /// spooled. The first hook that returns `false` stops the chain and fails the parser with
    /// `Interrupt`.
    pub fn add_hook<F>(&mut self, hook: F)
    where F : FnMut(&Upload, &[u8]) -> bool + 'static {
        self.hooks.borrow_mut().push(Box::new(hook));
    }

    /// Retrieve the total byte count processed.
    pub fn byte_count(&self) -> usize {
        self.byte_count
    }

    /// Feed brigade data through the parser, appending finished parts onto `table`.
    ///
    /// Returns `Ok` once the terminal boundary has been parsed; any remaining stream data is
    /// epilogue and is ignored. The terminal status is sticky.
    pub fn feed(&mut self, brigade: &mut Brigade, table: &mut Table) -> ParseStatus {
        if self.status.is_terminal() {
            return self.status;
        }

        if brigade.is_empty() && !brigade.is_closed() {
            return ParseStatus::NoData;
        }

        while let Some(mut chunk) = brigade.pop_chunk() {
            let mut over_limit = false;

            if let Some(max) = self.config.max_body_bytes() {
                let allowed = max.saturating_sub(self.bytes_fed);

                if chunk.len() as u64 > allowed {
                    chunk.truncate(allowed as usize);

                    over_limit = true;
                }
            }

            self.bytes_fed += chunk.len() as u64;

            if !chunk.is_empty() {
                match self.resume_slice(table, &chunk) {
                    Ok(Success::Finished(_)) => {
                        debug!("multipart: finished, {} entries", table.len());

                        self.status = ParseStatus::Ok;

                        return self.status;
                    },
                    Ok(_) => {
                    },
                    Err(error) => {
                        self.fail(table, error);

                        return self.status;
                    }
                }
            }

            if over_limit {
                self.fail(table, ParseError::OverLimit);

                return self.status;
            }
        }

        self.status = ParseStatus::Incomplete;
        self.status
    }

    /// Retrieve the current state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Retrieve the sticky status.
    pub fn status(&self) -> ParseStatus {
        self.status
    }

    /// Parse a slice of data, handing the stream to the nested parser whenever one is active.
    fn resume_slice(&mut self, table: &mut Table, stream: &[u8])
    -> Result<Success, ParseError> {
        let mut offset = 0;

        loop {
            if self.child.is_some() {
                let result = self.child
                                 .as_mut()
                                 .expect("nested parser vanished")
                                 .resume_slice(table, &stream[offset..]);

                let result = match result {
                    Ok(result) => result,
                    Err(error) => {
                        // let the nested parser keep its partial part before unwinding
                        if let Some(ref mut child) = self.child {
                            child.fail(table, error);
                        }

                        return Err(error);
                    }
                };

                match result {
                    Success::Eos(_) => {
                        return Ok(Success::Eos(stream.len()));
                    },
                    Success::Finished(length)
                    | Success::Yield(length) => {
                        offset += length;

                        self.child   = None;
                        self.discard = true;

                        set_state!(self, PartData, part_data);
                    }
                }

                continue;
            }

            let mut context = ByteStream::new(&stream[offset..]);

            match self.parse(table, &mut context)? {
                Success::Eos(length) => {
                    return Ok(Success::Eos(offset + length));
                },
                Success::Finished(length) => {
                    return Ok(Success::Finished(offset + length));
                },
                Success::Yield(length) => {
                    // a nested parser was installed
                    offset += length;
                }
            }
        }
    }

    /// Main parser loop.
    fn parse(&mut self, table: &mut Table, context: &mut ByteStream)
    -> Result<Success, ParseError> {
        loop {
            let state_function = self.state_function;

            match state_function(self, table, context) {
                Ok(ParserValue::Continue) => {
                },
                Ok(ParserValue::Exit(success)) => {
                    self.byte_count += context.stream_index;

                    return Ok(success);
                },
                Err(error) => {
                    self.byte_count += context.stream_index;

                    set_state!(self, Dead, dead);

                    return Err(error);
                }
            }
        }
    }

    /// Fail the parser, keeping a partially parsed part in the table marked with its own status
    /// so that callers can tell complete parts from truncated ones.
    fn fail(&mut self, table: &mut Table, error: ParseError) {
        self.status = ParseStatus::Error(error);

        set_state!(self, Dead, dead);

        if let Some(part) = self.part.take() {
            let mut param = match part.upload {
                Some(mut upload) => {
                    upload.set_status(ParseStatus::Error(error));

                    let filename = upload.filename().to_vec();

                    let mut param = Param::new(&part.name, &filename);

                    param.set_upload(Rc::new(upload));
                    param
                },
                None => Param::new(&part.name, &part.data)
            };

            param.set_info(part.info)
                 .set_status(ParseStatus::Error(error));

            table.push(param);
        }
    }

    /// Commit part body data.
    ///
    /// Upload data runs through the hook chain and is then spooled; field data accumulates on
    /// the part. Preamble and container slack are discarded.
    fn commit_data(&mut self, data: &[u8]) -> Result<(), ParseError> {
        if data.is_empty() || self.discard {
            return Ok(());
        }

        let part = match self.part {
            Some(ref mut part) => part,
            None => return Ok(())
        };

        if let Some(ref mut upload) = part.upload {
            for hook in self.hooks.borrow_mut().iter_mut() {
                if !hook(upload, data) {
                    return Err(ParseError::Interrupt);
                }
            }

            upload.append(data, &self.config)?;
        } else {
            part.data.extend_from_slice(data);
        }

        Ok(())
    }

    /// Begin a new part.
    fn begin_part(&mut self) {
        self.discard      = false;
        self.header_count = 0;
        self.part         = Some(PartBuilder::new());
    }

    /// Flush the pending header line onto the current part.
    fn flush_header(&mut self) -> Result<(), ParseError> {
        if self.name_buf.is_empty() {
            return Ok(());
        }

        self.header_count += 1;

        if self.header_count > self.config.max_headers() {
            return Err(ParseError::OverLimit);
        }

        if let Some(ref mut part) = self.part {
            part.headers.push(&self.name_buf, &self.value_buf);
        }

        self.name_buf.clear();
        self.value_buf.clear();

        Ok(())
    }

    /// Classify the finished part headers.
    ///
    /// `Content-Disposition: form-data` supplies the mandatory `name` attribute and an optional
    /// `filename` that promotes the part to an upload. A nested `multipart/*` content type
    /// installs a child parser instead.
    fn classify_part(&mut self) -> Result<PartKind, ParseError> {
        let mut part = match self.part.take() {
            Some(part) => part,
            None => return Err(ParseError::BadHeader)
        };

        let disposition = match part.headers.get(b"content-disposition") {
            Some(disposition) => disposition.to_vec(),
            None => return Err(ParseError::BadHeader)
        };

        let (_, info) = parse_header_value(&disposition)?;

        part.name = match info.get(b"name") {
            Some(name) => name.to_vec(),
            None => return Err(ParseError::BadHeader)
        };

        part.info = info;

        let content_type = part.headers.get(b"content-type").map(|value| value.to_vec());

        if let Some(ref content_type) = content_type {
            let (main, attrs) = parse_header_value(content_type)?;

            if main.len() > 10 && main[..10].eq_ignore_ascii_case(b"multipart/") {
                // nested multipart container; its parts land in the same table
                let boundary = match attrs.get(b"boundary") {
                    Some(boundary) => boundary.to_vec(),
                    None => return Err(ParseError::Mismatch)
                };

                if self.depth as u32 + 1 >= self.config.max_nesting() as u32 {
                    return Err(ParseError::OverLimit);
                }

                debug!("multipart: nesting into {:?} at depth {}",
                       String::from_utf8_lossy(&boundary),
                       self.depth + 1);

                self.child = Some(Box::new(Parser::with_depth(&boundary,
                                                              self.config.clone(),
                                                              self.depth + 1,
                                                              Rc::clone(&self.hooks))));

                return Ok(PartKind::Nested);
            }

            if let Some(name) = attrs.get(b"charset") {
                part.charset = Some(Charset::from_name(name));
            }
        }

        if let Some(filename) = part.info.get(b"filename").map(|value| value.to_vec()) {
            if self.config.disable_uploads() {
                return Err(ParseError::OverLimit);
            }

            let content_type = content_type.unwrap_or_else(Vec::new);

            part.upload = Some(Upload::new(&filename, &content_type));
        }

        self.part = Some(part);

        Ok(PartKind::Data)
    }

    /// Finish the current part and append it onto `table`.
    fn finish_part(&mut self, table: &mut Table) -> Result<(), ParseError> {
        self.discard = false;

        let part = match self.part.take() {
            Some(part) => part,
            None => return Ok(())
        };

        if table.len() as u32 >= self.config.max_params() {
            return Err(ParseError::OverLimit);
        }

        let mut param = match part.upload {
            Some(mut upload) => {
                upload.finish()?;

                debug!("multipart: upload part {:?}, {} bytes",
                       String::from_utf8_lossy(&part.name),
                       upload.size());

                let filename = upload.filename().to_vec();

                let mut param = Param::new(&part.name, &filename);

                param.set_upload(Rc::new(upload));
                param
            },
            None => {
                let divined = charset::divine(&part.data);

                let charset = part.charset.unwrap_or(divined);

                let validated = match part.charset {
                    None => divined.is_validated(),
                    Some(Charset::Utf8) => {
                        divined == Charset::Utf8 || divined == Charset::Ascii
                    },
                    Some(Charset::Ascii) => divined == Charset::Ascii,
                    Some(_) => false
                };

                let mut param = Param::new(&part.name, &part.data);

                param.set_charset(charset)
                     .set_tainted(!validated);
                param
            }
        };

        param.set_info(part.info);

        table.push(param);

        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // BOUNDARY STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn hyphen1(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'-' {
            transition!(self, context, Hyphen2, hyphen2);
        }

        // not a boundary; the line break belongs to the data
        self.commit_data(b"\r\n")?;

        bs_replay!(context);

        transition!(self, context, PartData, part_data);
    }

    #[inline]
    fn hyphen2(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'-' {
            self.match_index = 0;

            transition!(self, context, Boundary, boundary);
        }

        self.commit_data(b"\r\n-")?;

        bs_replay!(context);

        transition!(self, context, PartData, part_data);
    }

    #[inline]
    fn boundary(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);

        let (length, finished) = {
            let boundary = &self.boundary;

            let slice =
                if boundary.len() - self.match_index <= bs_available!(context) {
                    // compare remainder of boundary
                    &boundary[self.match_index..]
                } else {
                    // compare remainder of stream
                    &boundary[
                        self.match_index..
                        self.match_index + bs_available!(context)
                    ]
                };

            if bs_starts_with!(context, slice) {
                (slice.len(), self.match_index + slice.len() == boundary.len())
            } else {
                (0, false)
            }
        };

        if length == 0 {
            // mismatch; everything compared so far goes back to the data
            let mut data = Vec::with_capacity(4 + self.match_index);

            data.extend_from_slice(b"\r\n--");
            data.extend_from_slice(&self.boundary[..self.match_index]);

            self.match_index = 0;

            self.commit_data(&data)?;

            // the mismatch byte is left in the stream for the data scan
            transition!(self, context, PartData, part_data);
        }

        bs_jump!(context, length);

        if finished {
            self.match_index = 0;

            transition!(self, context, BoundaryEnd, boundary_end);
        }

        self.match_index += length;

        exit_eos!(self, context);
    }

    #[inline]
    fn boundary_end(&mut self, table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'\r' {
            self.finish_part(table)?;

            transition!(self, context, BoundaryLf, boundary_lf);
        } else if context.byte == b'-' {
            transition!(self, context, FinalHyphen, final_hyphen);
        }

        // a boundary followed by junk is data after all
        let mut data = Vec::with_capacity(4 + self.boundary.len());

        data.extend_from_slice(b"\r\n--");
        data.extend_from_slice(&self.boundary);

        self.commit_data(&data)?;

        bs_replay!(context);

        transition!(self, context, PartData, part_data);
    }

    #[inline]
    fn final_hyphen(&mut self, table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'-' {
            self.finish_part(table)?;

            transition!(self, context, Epilogue, epilogue);
        }

        let mut data = Vec::with_capacity(5 + self.boundary.len());

        data.extend_from_slice(b"\r\n--");
        data.extend_from_slice(&self.boundary);
        data.push(b'-');

        self.commit_data(&data)?;

        bs_replay!(context);

        transition!(self, context, PartData, part_data);
    }

    #[inline]
    fn boundary_lf(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'\n' {
            self.begin_part();

            transition!(self, context, HeaderCheck, header_check);
        }

        exit_error!(BadData, context.byte);
    }

    #[inline]
    fn epilogue(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        // everything past the terminal boundary is ignored
        exit_finished!(self, context);
    }

    // ---------------------------------------------------------------------------------------------
    // PART HEADER STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn header_check(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b' ' || context.byte == b'\t' {
            // folded header line; unfold with a single space
            if self.name_buf.is_empty() {
                exit_error!(BadHeader);
            }

            self.value_buf.push(b' ');

            transition!(self, context, StripHeaderValue, strip_header_value);
        }

        self.flush_header()?;

        if context.byte == b'\r' {
            transition!(self, context, HeadersEndLf, headers_end_lf);
        }

        bs_replay!(context);

        transition!(self, context, HeaderName, header_name);
    }

    #[inline]
    fn header_name(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        collect_tokens!(context,
            // on end-of-stream
            {
                self.name_buf.extend_from_slice(bs_slice!(context));

                exit_eos!(self, context);
            }
        );

        if context.byte == b':' {
            self.name_buf.extend_from_slice(bs_slice_ignore!(context));

            transition!(self, context, StripHeaderValue, strip_header_value);
        }

        exit_error!(BadChar, context.byte);
    }

    #[inline]
    fn strip_header_value(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        consume_spaces!(context,
            // on end-of-stream
            exit_eos!(self, context)
        );

        transition!(self, context, HeaderValue, header_value);
    }

    #[inline]
    fn header_value(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        collect_field!(context,
            // on end-of-stream
            {
                self.value_buf.extend_from_slice(bs_slice!(context));

                exit_eos!(self, context);
            }
        );

        if context.byte == b'\r' {
            self.value_buf.extend_from_slice(bs_slice_ignore!(context));

            transition!(self, context, HeaderLf, header_lf);
        } else if context.byte == b'"' {
            // quoted section is kept raw; attribute parsing unquotes later
            transition_no_remark!(self, context, HeaderQuotedValue, header_quoted_value);
        }

        exit_error!(BadChar, context.byte);
    }

    #[inline]
    fn header_quoted_value(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        collect_quoted_field!(context,
            // on end-of-stream
            {
                self.value_buf.extend_from_slice(bs_slice!(context));

                exit_eos!(self, context);
            }
        );

        if context.byte == b'"' {
            transition_no_remark!(self, context, HeaderValue, header_value);
        } else if context.byte == b'\\' {
            transition_no_remark!(self, context, HeaderEscapedValue, header_escaped_value);
        }

        exit_error!(BadChar, context.byte);
    }

    #[inline]
    fn header_escaped_value(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        if bs_available!(context) == 0 {
            self.value_buf.extend_from_slice(bs_slice!(context));

            exit_eos!(self, context);
        }

        bs_next!(context);

        // escaped bytes must be 7-bit, and cannot be control characters
        if context.byte > 0x1F && context.byte < 0x7F {
            transition_no_remark!(self, context, HeaderQuotedValue, header_quoted_value);
        }

        exit_error!(BadSeq, context.byte);
    }

    #[inline]
    fn header_lf(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'\n' {
            transition!(self, context, HeaderCheck, header_check);
        }

        exit_error!(BadData, context.byte);
    }

    #[inline]
    fn headers_end_lf(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'\n' {
            match self.classify_part()? {
                PartKind::Data => {
                    transition!(self, context, PartData, part_data);
                },
                PartKind::Nested => {
                    set_state!(self, Nested, nested);

                    exit_yield!(self, context);
                }
            }
        }

        exit_error!(BadData, context.byte);
    }

    // ---------------------------------------------------------------------------------------------
    // PART DATA STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    fn part_data(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        bs_collect!(context,
            if context.byte == b'\r' {
                break;
            },

            // on end-of-stream
            {
                self.commit_data(bs_slice!(context))?;

                exit_eos!(self, context);
            }
        );

        self.commit_data(bs_slice_ignore!(context))?;

        transition!(self, context, PartDataLf, part_data_lf);
    }

    #[inline]
    fn part_data_lf(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'\n' {
            transition!(self, context, Hyphen1, hyphen1);
        }

        // a lone carriage return within the data
        self.commit_data(b"\r")?;

        bs_replay!(context);

        transition!(self, context, PartData, part_data);
    }

    #[inline]
    fn nested(&mut self, _table: &mut Table, context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_yield!(self, context);
    }

    #[inline]
    fn dead(&mut self, _table: &mut Table, _context: &mut ByteStream)
    -> Result<ParserValue, ParseError> {
        exit_error!(Generic);
    }
}
