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

use config::Config;
use multipart::Parser;
use status::{ ParseError, ParseStatus };
use table::Table;
use test::{ chunked_brigade, parse_multipart };

use std::cell::RefCell;
use std::rc::Rc;

const BOUNDARY: &'static [u8] = b"AaB03x";

/// Standard two part body: one form field, one file upload.
fn two_part_body() -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(b"--AaB03x\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"foo\"\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"bar\r\n");
    body.extend_from_slice(b"--AaB03x\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"file\"; filename=\"a.txt\"\r\n");
    body.extend_from_slice(b"Content-Type: text/plain\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"contents of a.txt\r\n");
    body.extend_from_slice(b"--AaB03x--\r\n");
    body
}

#[test]
fn two_parts_with_upload() {
    let (table, status) = parse_multipart(&two_part_body(), BOUNDARY, 1024);

    assert_eq!(ParseStatus::Ok, status);
    assert_eq!(2, table.len());

    let foo = table.first(b"foo").unwrap();

    assert_eq!(b"bar", foo.value());
    assert_eq!(ParseStatus::Ok, foo.status());
    assert!(!foo.is_upload());

    let file = table.first(b"file").unwrap();

    assert!(file.is_upload());
    assert_eq!(b"a.txt", file.value());

    let upload = file.upload().unwrap();

    assert_eq!(b"a.txt", upload.filename());
    assert_eq!(b"text/plain", upload.content_type());
    assert_eq!(17, upload.size());
    assert_eq!(b"contents of a.txt", &upload.spool().contents().unwrap()[..]);
    assert_eq!(ParseStatus::Ok, upload.status());
}

#[test]
fn byte_at_a_time_matches_single_chunk() {
    let body = two_part_body();

    let (reference, reference_status) = parse_multipart(&body, BOUNDARY, body.len());

    for step in &[1, 2, 3, 7] {
        let (table, status) = parse_multipart(&body, BOUNDARY, *step);

        assert_eq!(reference_status, status);
        assert_eq!(reference.len(), table.len());

        for (expected, actual) in reference.iter().zip(table.iter()) {
            assert_eq!(expected.name(), actual.name());
            assert_eq!(expected.value(), actual.value());
        }

        let upload = table.first(b"file").unwrap().upload().unwrap();

        assert_eq!(b"contents of a.txt", &upload.spool().contents().unwrap()[..]);
    }
}

#[test]
fn preamble_is_skipped() {
    let mut body = Vec::new();

    body.extend_from_slice(b"This is the preamble.\r\nIt is ignored.\r\n");
    body.extend_from_slice(&two_part_body());

    let (table, status) = parse_multipart(&body, BOUNDARY, 1024);

    assert_eq!(ParseStatus::Ok, status);
    assert_eq!(2, table.len());
    assert_eq!(b"bar", table.first(b"foo").unwrap().value());
}

#[test]
fn epilogue_is_ignored() {
    let mut body = two_part_body();

    body.extend_from_slice(b"This is the epilogue. It is also ignored.\r\n");

    let (table, status) = parse_multipart(&body, BOUNDARY, 1024);

    assert_eq!(ParseStatus::Ok, status);
    assert_eq!(2, table.len());
}

#[test]
fn boundary_lookalike_within_data() {
    let mut body = Vec::new();

    body.extend_from_slice(b"--AaB03x\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"text\"\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"line one\r\n--AaB03 not quite\r\n--AaB03xtail\r\nlast\r\n");
    body.extend_from_slice(b"--AaB03x--\r\n");

    let (table, status) = parse_multipart(&body, BOUNDARY, 1024);

    assert_eq!(ParseStatus::Ok, status);
    assert_eq!(1, table.len());

    // every byte of the lookalikes is preserved in the part data
    assert_eq!(&b"line one\r\n--AaB03 not quite\r\n--AaB03xtail\r\nlast"[..],
               table.first(b"text").unwrap().value());
}

#[test]
fn folded_header_unfolds_to_single_space() {
    let mut body = Vec::new();

    body.extend_from_slice(b"--AaB03x\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data;\r\n \t  name=\"folded\"\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"data\r\n");
    body.extend_from_slice(b"--AaB03x--\r\n");

    let (table, status) = parse_multipart(&body, BOUNDARY, 1024);

    assert_eq!(ParseStatus::Ok, status);
    assert_eq!(b"data", table.first(b"folded").unwrap().value());

    let info = table.first(b"folded").unwrap().info().unwrap();

    assert_eq!(b"folded", info.get(b"name").unwrap());
}

#[test]
fn part_headers_in_info() {
    let (table, _) = parse_multipart(&two_part_body(), BOUNDARY, 1024);

    let info = table.first(b"file").unwrap().info().unwrap();

    assert_eq!(b"file", info.get(b"name").unwrap());
    assert_eq!(b"a.txt", info.get(b"filename").unwrap());
}

#[test]
fn missing_disposition_name() {
    let mut body = Vec::new();

    body.extend_from_slice(b"--AaB03x\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"data\r\n");
    body.extend_from_slice(b"--AaB03x--\r\n");

    let (_, status) = parse_multipart(&body, BOUNDARY, 1024);

    assert_eq!(ParseStatus::Error(ParseError::BadHeader), status);
}

#[test]
fn missing_disposition_header() {
    let mut body = Vec::new();

    body.extend_from_slice(b"--AaB03x\r\n");
    body.extend_from_slice(b"Content-Type: text/plain\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"data\r\n");
    body.extend_from_slice(b"--AaB03x--\r\n");

    let (_, status) = parse_multipart(&body, BOUNDARY, 1024);

    assert_eq!(ParseStatus::Error(ParseError::BadHeader), status);
}

#[test]
fn empty_body_with_terminal_boundary() {
    let (table, status) = parse_multipart(b"--AaB03x--\r\n", BOUNDARY, 1024);

    assert_eq!(ParseStatus::Ok, status);
    assert_eq!(0, table.len());
}

#[test]
fn truncated_stream_stays_incomplete() {
    let body = &two_part_body()[..40];

    let (table, status) = parse_multipart(body, BOUNDARY, 1024);

    assert_eq!(ParseStatus::Incomplete, status);
    assert_eq!(0, table.len());
}

#[test]
fn nested_multipart_flattens() {
    let mut body = Vec::new();

    body.extend_from_slice(b"--outer\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"container\"\r\n");
    body.extend_from_slice(b"Content-Type: multipart/mixed; boundary=inner\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"--inner\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"x\"\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"1\r\n");
    body.extend_from_slice(b"--inner--\r\n");
    body.extend_from_slice(b"--outer\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"y\"\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"2\r\n");
    body.extend_from_slice(b"--outer--\r\n");

    for step in &[1024, 1] {
        let (table, status) = parse_multipart(&body, b"outer", *step);

        assert_eq!(ParseStatus::Ok, status);
        assert_eq!(2, table.len());
        assert_eq!(b"1", table.first(b"x").unwrap().value());
        assert_eq!(b"2", table.first(b"y").unwrap().value());
    }
}

#[test]
fn nesting_ceiling() {
    let mut body = Vec::new();

    body.extend_from_slice(b"--outer\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"container\"\r\n");
    body.extend_from_slice(b"Content-Type: multipart/mixed; boundary=inner\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"--inner--\r\n");
    body.extend_from_slice(b"--outer--\r\n");

    let mut config = Config::new();

    config.set_max_nesting(1);

    let mut brigade = chunked_brigade(&body, 1024);
    let mut parser  = Parser::new(b"outer", config);
    let mut table   = Table::new();

    assert_eq!(ParseStatus::Error(ParseError::OverLimit),
               parser.feed(&mut brigade, &mut table));
}

#[test]
fn max_headers() {
    let mut body = Vec::new();

    body.extend_from_slice(b"--AaB03x\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"a\"\r\n");
    body.extend_from_slice(b"X-One: 1\r\n");
    body.extend_from_slice(b"X-Two: 2\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"data\r\n");
    body.extend_from_slice(b"--AaB03x--\r\n");

    let mut config = Config::new();

    config.set_max_headers(2);

    let mut brigade = chunked_brigade(&body, 1024);
    let mut parser  = Parser::new(BOUNDARY, config);
    let mut table   = Table::new();

    assert_eq!(ParseStatus::Error(ParseError::OverLimit),
               parser.feed(&mut brigade, &mut table));
}

#[test]
fn disable_uploads() {
    let mut config = Config::new();

    config.set_disable_uploads(true);

    let mut brigade = chunked_brigade(&two_part_body(), 1024);
    let mut parser  = Parser::new(BOUNDARY, config);
    let mut table   = Table::new();

    assert_eq!(ParseStatus::Error(ParseError::OverLimit),
               parser.feed(&mut brigade, &mut table));

    // the form field ahead of the upload was still committed
    assert_eq!(1, table.len());
    assert_eq!(b"bar", table.first(b"foo").unwrap().value());
}

#[test]
fn body_limit_keeps_finished_parts() {
    let body = two_part_body();

    let mut config = Config::new();

    // cut the stream partway through the upload's data
    config.set_max_body_bytes(body.len() as u64 - 20);

    let mut brigade = chunked_brigade(&body, 1024);
    let mut parser  = Parser::new(BOUNDARY, config);
    let mut table   = Table::new();

    assert_eq!(ParseStatus::Error(ParseError::OverLimit),
               parser.feed(&mut brigade, &mut table));

    // the first part was complete before the limit and keeps its own status
    let foo = table.first(b"foo").unwrap();

    assert_eq!(b"bar", foo.value());
    assert_eq!(ParseStatus::Ok, foo.status());

    // the truncated upload is kept, marked with the limit error
    let file = table.first(b"file").unwrap();

    assert_eq!(ParseStatus::Error(ParseError::OverLimit), file.status());
    assert_eq!(ParseStatus::Error(ParseError::OverLimit),
               file.upload().unwrap().status());
}

#[test]
fn upload_spools_to_disk() {
    let mut config = Config::new();

    config.set_max_brigade_bytes(8);

    let mut brigade = chunked_brigade(&two_part_body(), 1024);
    let mut parser  = Parser::new(BOUNDARY, config);
    let mut table   = Table::new();

    assert_eq!(ParseStatus::Ok, parser.feed(&mut brigade, &mut table));

    let file = table.first(b"file").unwrap();
    let upload = file.upload().unwrap();

    assert!(upload.spool().is_file());
    assert!(upload.spool().path().unwrap().exists());
    assert_eq!(17, upload.size());
    assert_eq!(b"contents of a.txt", &upload.spool().contents().unwrap()[..]);
}

#[test]
fn upload_hook_sees_chunks_in_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_by_hook = Rc::clone(&seen);

    let mut brigade = chunked_brigade(&two_part_body(), 7);
    let mut parser  = Parser::new(BOUNDARY, Config::new());
    let mut table   = Table::new();

    parser.add_hook(move |_upload, chunk: &[u8]| {
        seen_by_hook.borrow_mut().extend_from_slice(chunk);
        true
    });

    assert_eq!(ParseStatus::Ok, parser.feed(&mut brigade, &mut table));
    assert_eq!(&b"contents of a.txt"[..], &seen.borrow()[..]);
}

#[test]
fn upload_hook_interrupt() {
    let mut brigade = chunked_brigade(&two_part_body(), 1024);
    let mut parser  = Parser::new(BOUNDARY, Config::new());
    let mut table   = Table::new();

    parser.add_hook(|_upload, _chunk: &[u8]| false);

    assert_eq!(ParseStatus::Error(ParseError::Interrupt),
               parser.feed(&mut brigade, &mut table));

    // the partial upload is kept, marked interrupted
    let file = table.first(b"file").unwrap();

    assert_eq!(ParseStatus::Error(ParseError::Interrupt), file.status());
}

#[test]
fn sticky_status_after_finish() {
    let mut brigade = chunked_brigade(&two_part_body(), 1024);
    let mut parser  = Parser::new(BOUNDARY, Config::new());
    let mut table   = Table::new();

    assert_eq!(ParseStatus::Ok, parser.feed(&mut brigade, &mut table));

    brigade.append(b"--AaB03x\r\nmore");

    assert_eq!(ParseStatus::Ok, parser.feed(&mut brigade, &mut table));
    assert_eq!(2, table.len());
}
