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

use brigade::Brigade;

#[test]
fn append_and_len() {
    let mut brigade = Brigade::new();

    assert!(brigade.is_empty());

    brigade.append(b"abc");
    brigade.append(b"");
    brigade.append(b"de");

    assert_eq!(5, brigade.len());
    assert!(!brigade.is_empty());
}

#[test]
fn close() {
    let mut brigade = Brigade::new();

    assert!(!brigade.is_closed());

    brigade.close();

    assert!(brigade.is_closed());
}

#[test]
fn consume_across_chunks() {
    let mut brigade = Brigade::new();

    brigade.append(b"abc");
    brigade.append(b"def");

    brigade.consume(4);

    assert_eq!(2, brigade.len());
    assert_eq!(Some(&b"ef"[..]), brigade.peek(2));
}

#[test]
fn consume_past_end() {
    let mut brigade = Brigade::new();

    brigade.append(b"abc");

    brigade.consume(10);

    assert!(brigade.is_empty());
}

#[test]
fn find() {
    let mut brigade = Brigade::new();

    brigade.append(b"abc");
    brigade.append(b"def");

    assert_eq!(Some(0), brigade.find(b'a'));
    assert_eq!(Some(4), brigade.find(b'e'));
    assert_eq!(None, brigade.find(b'z'));
}

#[test]
fn find_delim_straddling() {
    let mut brigade = Brigade::new();

    brigade.append(b"ab--bou");
    brigade.append(b"ndary--");

    assert_eq!(Some(2), brigade.find_delim(b"--boundary--"));
    assert_eq!(None, brigade.find_delim(b"--other--"));
    assert_eq!(None, brigade.find_delim(b""));
}

#[test]
fn peek_contiguous() {
    let mut brigade = Brigade::new();

    brigade.append(b"abcdef");

    assert_eq!(Some(&b"abc"[..]), brigade.peek(3));

    // peeking never consumes
    assert_eq!(6, brigade.len());
}

#[test]
fn peek_coalesces() {
    let mut brigade = Brigade::new();

    brigade.append(b"ab");
    brigade.append(b"cd");
    brigade.append(b"ef");

    assert_eq!(Some(&b"abcde"[..]), brigade.peek(5));
    assert_eq!(6, brigade.len());
}

#[test]
fn peek_past_end() {
    let mut brigade = Brigade::new();

    brigade.append(b"ab");

    assert_eq!(None, brigade.peek(3));
}

#[test]
fn pop_chunk_respects_consumed() {
    let mut brigade = Brigade::new();

    brigade.append(b"abcd");

    brigade.consume(2);

    assert_eq!(Some(b"cd".to_vec()), brigade.pop_chunk());
    assert_eq!(None, brigade.pop_chunk());
}

#[test]
fn split_at() {
    let mut brigade = Brigade::new();

    brigade.append(b"abc");
    brigade.append(b"def");

    let head = brigade.split_at(4);

    assert_eq!(4, head.len());
    assert_eq!(2, brigade.len());
    assert!(head.is_closed());
    assert_eq!(Some(&b"ef"[..]), brigade.peek(2));
}

#[test]
fn split_at_clamps() {
    let mut brigade = Brigade::new();

    brigade.append(b"ab");

    let head = brigade.split_at(10);

    assert_eq!(2, head.len());
    assert!(brigade.is_empty());
}
