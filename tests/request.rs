extern crate request_box;

use request_box::config::Config;
use request_box::request::Request;
use request_box::status::{ ParseError, ParseStatus };

#[test]
fn query_string_args() {
    let mut r = Request::new(Config::new());

    r.set_query_string(b"a=1&b=2&a=3");

    {
        let args = r.args();

        assert_eq!(3, args.len());
        assert_eq!(b"1", args.first(b"a").unwrap().value());

        let all: Vec<&[u8]> = args.all(b"a").map(|p| p.value()).collect();

        assert_eq!(vec![&b"1"[..], &b"3"[..]], all);
    }

    assert_eq!(ParseStatus::Ok, r.args_status());
}

#[test]
fn no_query_string() {
    let mut r = Request::new(Config::new());

    assert_eq!(0, r.args().len());
    assert_eq!(ParseStatus::Ok, r.args_status());
}

#[test]
fn urlencoded_body() {
    let mut r = Request::new(Config::new());

    r.set_content_type(b"application/x-www-form-urlencoded");
    r.feed_body(b"name=Hello%20");
    r.feed_body(b"World&x=1");
    r.close_body();

    {
        let body = r.body();

        assert_eq!(2, body.len());
        assert_eq!(b"Hello World", body.first(b"name").unwrap().value());
    }

    assert_eq!(ParseStatus::Ok, r.body_status());
}

#[test]
fn param_lookup_stops_early() {
    let mut r = Request::new(Config::new());

    r.set_content_type(b"application/x-www-form-urlencoded");
    r.feed_body(b"a=1&");
    r.feed_body(b"b=2&");
    r.feed_body(b"c=3");
    r.close_body();

    // the lookup only pulls as much body as it needs
    assert_eq!(b"1", r.param(b"a").unwrap().unwrap().value());
    assert_eq!(ParseStatus::Incomplete, r.body_status());

    // later lookups keep pulling
    assert_eq!(b"3", r.param(b"c").unwrap().unwrap().value());
    assert_eq!(ParseStatus::Ok, r.body_status());
}

#[test]
fn args_win_over_body() {
    let mut r = Request::new(Config::new());

    r.set_query_string(b"a=args");
    r.set_content_type(b"application/x-www-form-urlencoded");
    r.feed_body(b"a=body");
    r.close_body();

    assert_eq!(b"args", r.param(b"a").unwrap().unwrap().value());
}

#[test]
fn params_overlay() {
    let mut r = Request::new(Config::new());

    r.set_query_string(b"a=1");
    r.set_content_type(b"application/x-www-form-urlencoded");
    r.feed_body(b"b=2&a=3");
    r.close_body();

    let params = r.params();

    let entries: Vec<(&[u8], &[u8])> = params.iter()
                                             .map(|p| (p.name(), p.value()))
                                             .collect();

    // args first, then body, nothing deduplicated
    assert_eq!(vec![(&b"a"[..], &b"1"[..]),
                    (&b"b"[..], &b"2"[..]),
                    (&b"a"[..], &b"3"[..])],
               entries);

    // the overlay is detached from both sources
    let mut params = params;

    params.insert(b"z", b"9");

    assert_eq!(1, r.args().len());
    assert_eq!(2, r.body().len());
}

#[test]
fn stream_statuses_are_independent() {
    let mut r = Request::new(Config::new());

    // the query string fails, the body is healthy
    r.set_query_string(b"x=%ZZ");
    r.set_content_type(b"application/x-www-form-urlencoded");
    r.feed_body(b"a=1");
    r.close_body();

    // a name that exists is returned no matter what the other stream did
    assert_eq!(b"1", r.param(b"a").unwrap().unwrap().value());

    assert_eq!(ParseStatus::Error(ParseError::BadSeq(b'Z')), r.args_status());
    assert_eq!(ParseStatus::Ok, r.body_status());

    // a miss surfaces the failed parser's error
    assert_eq!(Err(ParseError::BadSeq(b'Z')), r.param(b"missing").map(|_| ()));
}

#[test]
fn unknown_content_type() {
    let mut r = Request::new(Config::new());

    r.set_content_type(b"application/json");
    r.feed_body(b"{}");
    r.close_body();

    assert_eq!(0, r.body().len());
    assert_eq!(ParseStatus::Error(ParseError::NoParser), r.body_status());
    assert_eq!(Err(ParseError::NoParser), r.param(b"a").map(|_| ()));
}

#[test]
fn multipart_body_with_upload() {
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

    let mut r = Request::new(Config::new());

    r.set_content_type(b"multipart/form-data; boundary=AaB03x");

    for chunk in body.chunks(16) {
        r.feed_body(chunk);
    }

    r.close_body();

    {
        let table = r.body();

        assert_eq!(2, table.len());
        assert_eq!(b"bar", table.first(b"foo").unwrap().value());

        let upload = table.first(b"file").unwrap().upload().unwrap();

        assert_eq!(17, upload.size());
        assert_eq!(b"contents of a.txt", &upload.spool().contents().unwrap()[..]);
    }

    assert_eq!(ParseStatus::Ok, r.body_status());
}

#[test]
fn multipart_missing_boundary() {
    let mut r = Request::new(Config::new());

    r.set_content_type(b"multipart/form-data");
    r.feed_body(b"--x\r\n");
    r.close_body();

    r.body();

    assert_eq!(ParseStatus::Error(ParseError::Mismatch), r.body_status());
}

#[test]
fn upload_hook_via_request() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen = Rc::new(RefCell::new(0usize));
    let seen_by_hook = Rc::clone(&seen);

    let mut body = Vec::new();

    body.extend_from_slice(b"--AaB03x\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"f\"; filename=\"f.bin\"\r\n");
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(b"0123456789\r\n");
    body.extend_from_slice(b"--AaB03x--\r\n");

    let mut r = Request::new(Config::new());

    // registered before the parser exists; replayed onto it at creation
    r.add_upload_hook(move |_upload, chunk: &[u8]| {
        *seen_by_hook.borrow_mut() += chunk.len();
        true
    });

    r.set_content_type(b"multipart/form-data; boundary=AaB03x");
    r.feed_body(&body);
    r.close_body();

    r.body();

    assert_eq!(ParseStatus::Ok, r.body_status());
    assert_eq!(10, *seen.borrow());
}

#[test]
fn cookies_header() {
    let mut r = Request::new(Config::new());

    r.set_cookie_header(b"$Version=\"1\"; foo=\"bar\"; $Path=/; baz=qux");

    let cookies = r.cookies().unwrap();

    assert_eq!(2, cookies.len());
    assert_eq!("foo", cookies[0].name());
    assert_eq!(Some("/"), cookies[0].path());
    assert_eq!(1, cookies[1].version());
}

#[test]
fn cookies_without_header() {
    let mut r = Request::new(Config::new());

    assert_eq!(Err(ParseError::NoHeader), r.cookies().map(|_| ()));
}
