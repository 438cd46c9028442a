#![allow(missing_docs)]

use bstr::BStr;
use recvbuf::ReceiveBuffer;

pub const REQUEST: &[u8] = b"POST /upload HTTP/1.1\r\nHost: example.com\r\nContent-Type: text/plain\r\nContent-Length: 11\r\n\r\nhello world";

// The request above as a transport might deliver it. Chunks are cut on the
// seams that matter to framing: inside the request line, between CR and LF,
// inside a header, and across the blank line that ends the header block.
#[rustfmt::skip]
pub const STREAM: [&[u8]; 7] = [
    b"POST /upload HT",                                   // request line incomplete
    b"TP/1.1\r",                                          // CR without its LF
    b"\nHost: exa",                                       // completes the request line
    b"mple.com\r\nContent-Type: text/plain\r\n",          // two whole header lines
    b"Content-Length: 11\r\n\r",                          // blank line split after CR
    b"\nhello",                                           // header block ends, body starts
    b" world",                                            // rest of the body
];

#[derive(Debug, Clone, Copy)]
enum Phase {
    RequestLine,
    Headers,
    Body(usize),
    Done,
}

fn content_length(lines: &[Vec<u8>]) -> usize {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(b"Content-Length:"))
        .and_then(|value| std::str::from_utf8(value).ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Drives a minimal HTTP/1.1 request reader over `stream`, recording what it
/// extracted after every chunk.
pub fn render_request(buf: &mut ReceiveBuffer, stream: &[&[u8]]) -> String {
    let mut out = Vec::new();
    let mut phase = Phase::RequestLine;
    for chunk in stream {
        buf.append(chunk);
        loop {
            let next = match phase {
                Phase::RequestLine => buf.take_line().map(|line| {
                    out.push(format!("request-line {:?}", BStr::new(&line)));
                    Phase::Headers
                }),
                Phase::Headers => buf.take_header_block().map(|lines| {
                    for line in &lines {
                        out.push(format!("header {:?}", BStr::new(line)));
                    }
                    match content_length(&lines) {
                        0 => Phase::Done,
                        n => Phase::Body(n),
                    }
                }),
                Phase::Body(remaining) => buf.take_at_most(remaining).map(|body| {
                    out.push(format!("body {:?}", BStr::new(&body)));
                    match remaining - body.len() {
                        0 => Phase::Done,
                        n => Phase::Body(n),
                    }
                }),
                Phase::Done => None,
            };
            match next {
                Some(Phase::Done) => {
                    out.push("complete".to_string());
                    phase = Phase::Done;
                }
                Some(next) => phase = next,
                None => {
                    if !matches!(phase, Phase::Done) {
                        out.push(format!("waiting len={}", buf.len()));
                    }
                    break;
                }
            }
        }
    }
    out.join("\n")
}
