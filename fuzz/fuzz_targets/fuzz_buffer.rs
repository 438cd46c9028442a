#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use recvbuf::{BufferOptions, ReceiveBuffer, split_at_seed};

#[derive(Debug, Arbitrary)]
enum Op {
    Append(Vec<u8>),
    Fill { hint: u8, written: u8, byte: u8 },
    TakeAtMost(u16),
    TakeUntil(Vec<u8>),
    TakeLine,
    TakeThroughBlankLine,
    TakeHeaderBlock,
    Compact,
}

#[derive(Debug, Arbitrary)]
struct Input {
    allow_bare_lf: bool,
    compact_threshold: u8,
    ops: Vec<Op>,
}

/// Every byte appended is either still held or was returned exactly once.
fn run(input: Input) {
    let mut buf = ReceiveBuffer::with_options(BufferOptions {
        allow_bare_lf: input.allow_bare_lf,
        compact_threshold: usize::from(input.compact_threshold),
        ..Default::default()
    });
    let mut appended: Vec<u8> = Vec::new();
    let mut delivered: Vec<u8> = Vec::new();
    // Lines parked by an unfinished header block are delivered out of band.
    let mut in_block = false;

    for op in input.ops {
        match op {
            Op::Append(data) => {
                for chunk in split_at_seed(&data, &[3, 1, 4, 1, 5]) {
                    buf.append(chunk);
                }
                appended.extend_from_slice(&data);
            }
            Op::Fill {
                hint,
                written,
                byte,
            } => {
                let chunk = buf.chunk_mut(usize::from(hint));
                let written = usize::from(written) % (chunk.len() + 1);
                chunk[..written].fill(byte);
                buf.commit(written).unwrap();
                appended.extend(std::iter::repeat_n(byte, written));
            }
            Op::TakeAtMost(n) if !in_block => {
                if let Some(out) = buf.take_at_most(usize::from(n)) {
                    delivered.extend(out);
                }
            }
            Op::TakeUntil(needle) if !in_block => {
                let before = buf.as_bytes().to_vec();
                match buf.try_take_until(&needle) {
                    Ok(Some(out)) => {
                        assert!(out.ends_with(&needle));
                        delivered.extend(out);
                    }
                    Ok(None) | Err(_) => assert_eq!(buf.as_bytes(), before),
                }
            }
            Op::TakeLine if !in_block => {
                if let Some(line) = buf.take_line() {
                    assert!(line.ends_with(b"\n"));
                    delivered.extend(line);
                }
            }
            Op::TakeThroughBlankLine if !in_block => {
                if let Some(out) = buf.take_through_blank_line() {
                    delivered.extend(out);
                }
            }
            Op::TakeHeaderBlock => match buf.take_header_block() {
                Some(lines) => {
                    in_block = false;
                    for line in lines {
                        assert!(line.ends_with(b"\n"));
                        delivered.extend(line);
                    }
                    // The blank line itself is not returned.
                    let at = delivered.len();
                    let consumed = appended.len() - at - buf.len();
                    assert!(consumed == 1 || consumed == 2);
                    delivered.extend_from_slice(&appended[at..at + consumed]);
                }
                None => in_block = buf.len() != buf.as_bytes().len(),
            },
            Op::Compact => buf.compact(),
            _ => {}
        }
        assert_eq!(appended.len(), delivered.len() + buf.len());
        if !in_block {
            assert_eq!(delivered.as_slice(), &appended[..delivered.len()]);
            assert_eq!(buf.as_bytes(), &appended[delivered.len()..]);
        }
    }
}

fuzz_target!(|input: Input| run(input));
