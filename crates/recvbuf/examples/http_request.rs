//! Frames an HTTP/1.1 request that arrives a few bytes at a time.
#![allow(missing_docs)]

use bstr::BStr;
use recvbuf::{ReceiveBuffer, produce_chunks};

const REQUEST: &[u8] = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nUser-Agent: demo\r\nAccept: */*\r\n\r\n";

fn main() {
    let mut buf = ReceiveBuffer::new();
    let mut request_line = None;

    for (i, chunk) in produce_chunks(REQUEST, 9).into_iter().enumerate() {
        buf.append(chunk);
        println!("chunk {i}: {:?} ({} bytes buffered)", BStr::new(chunk), buf.len());

        if request_line.is_none() {
            request_line = buf.take_line();
            let Some(line) = &request_line else {
                continue;
            };
            println!("  request line: {:?}", BStr::new(line));
        }

        if let Some(headers) = buf.take_header_block() {
            for header in &headers {
                println!("  header: {:?}", BStr::new(header));
            }
            break;
        }
    }

    println!("searched {} bytes in total", buf.bytes_scanned());
}
