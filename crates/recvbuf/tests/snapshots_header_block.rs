#![allow(missing_docs)]

mod common;

use recvbuf::{BufferOptions, ReceiveBuffer, produce_chunks};

use crate::common::{REQUEST, STREAM, render_request};

#[test]
fn snapshot_request_stream() {
    let mut buf = ReceiveBuffer::new();
    insta::assert_snapshot!(render_request(&mut buf, &STREAM), @r#"
    waiting len=15
    waiting len=22
    request-line "POST /upload HTTP/1.1\r\n"
    waiting len=9
    waiting len=45
    waiting len=66
    header "Host: example.com\r\n"
    header "Content-Type: text/plain\r\n"
    header "Content-Length: 11\r\n"
    body "hello"
    waiting len=0
    body " world"
    complete
    "#);
    assert!(buf.is_empty());
}

#[test]
fn snapshot_request_in_one_chunk() {
    let mut buf = ReceiveBuffer::new();
    insta::assert_snapshot!(render_request(&mut buf, &[REQUEST]), @r#"
    request-line "POST /upload HTTP/1.1\r\n"
    header "Host: example.com\r\n"
    header "Content-Type: text/plain\r\n"
    header "Content-Length: 11\r\n"
    body "hello world"
    complete
    "#);
}

#[test]
fn every_chunking_renders_the_same_request() {
    let whole = render_request(&mut ReceiveBuffer::new(), &[REQUEST]);
    let extracted = |rendered: &str| {
        rendered
            .lines()
            .filter(|line| !line.starts_with("waiting") && !line.starts_with("body"))
            .map(str::to_owned)
            .collect::<Vec<_>>()
    };
    for parts in 1..=REQUEST.len() {
        let chunks = produce_chunks(REQUEST, parts);
        let mut buf = ReceiveBuffer::with_options(BufferOptions {
            compact_threshold: 8,
            ..Default::default()
        });
        let rendered = render_request(&mut buf, &chunks);
        assert_eq!(extracted(&rendered), extracted(&whole), "{parts} parts");
        assert!(buf.is_empty(), "{parts} parts left {buf:?}");
    }
}
