//! Table-driven JSON string encoding.
//!
//! [`encode_string`] turns an arbitrary byte sequence into a quoted JSON
//! string literal. The byte machine walks the RFC 3629 UTF-8 grammar and the
//! JSON escape rules at the same time, so it never fails: verified sequences
//! are copied through verbatim, control characters become `\u00xx` escapes,
//! and every byte of a broken sequence is replaced with a `\ufffd` escape.
//!
//! Grammar for UTF-8 from RFC 3629:
//!
//! ```text
//! UTF8-char   = UTF8-1 / UTF8-2 / UTF8-3 / UTF8-4
//! UTF8-1      = %x00-7F
//! UTF8-2      = %xC2-DF UTF8-tail
//! UTF8-3      = %xE0 %xA0-BF UTF8-tail / %xE1-EC 2( UTF8-tail ) /
//!               %xED %x80-9F UTF8-tail / %xEE-EF 2( UTF8-tail )
//! UTF8-4      = %xF0 %x90-BF 2( UTF8-tail ) / %xF1-F3 3( UTF8-tail ) /
//!               %xF4 %x80-8F 2( UTF8-tail )
//! UTF8-tail   = %x80-BF
//! ```

use alloc::string::String;
use alloc::vec::Vec;

const STATES: usize = 23;

/// Transition values 1..=9 double as action codes: 1 = `\u00xx` control
/// escape, 2..=8 = the two-character escapes, 9 = invalid byte. States
/// 10..=22 track a multi-byte sequence in flight; 11, 16 and 22 complete a
/// 2-, 3- and 4-byte sequence respectively.
static STEP: [[u8; 256]; STATES] = build_table();

static HEX_LOWER: [u8; 16] = *b"0123456789abcdef";

const fn set_escapable(table: &mut [[u8; 256]; STATES], state: usize) {
    let mut byte = 0;
    while byte <= 0x1f {
        table[state][byte] = 1;
        byte += 1;
    }
    table[state][b'"' as usize] = 2;
    table[state][b'\\' as usize] = 3;
    table[state][0x08] = 4;
    table[state][0x0c] = 5;
    table[state][b'\n' as usize] = 6;
    table[state][b'\r' as usize] = 7;
    table[state][b'\t' as usize] = 8;
}

const fn fill(table: &mut [[u8; 256]; STATES], state: usize, lo: usize, hi: usize, next: u8) {
    let mut byte = lo;
    while byte <= hi {
        table[state][byte] = next;
        byte += 1;
    }
}

const fn build_table() -> [[u8; 256]; STATES] {
    let mut t = [[0u8; 256]; STATES];
    set_escapable(&mut t, 0);
    // Bytes that can never start a sequence.
    fill(&mut t, 0, 0x80, 0xc1, 9);
    fill(&mut t, 0, 0xf5, 0xff, 9);
    // Two-byte lead.
    fill(&mut t, 0, 0xc2, 0xdf, 10);
    // Three-byte leads with their restricted second bytes.
    t[0][0xe0] = 12;
    fill(&mut t, 12, 0xa0, 0xbf, 15);
    fill(&mut t, 0, 0xe1, 0xec, 13);
    t[0][0xee] = 13;
    t[0][0xef] = 13;
    t[0][0xed] = 14;
    fill(&mut t, 14, 0x80, 0x9f, 15);
    // Four-byte leads with their restricted second bytes.
    t[0][0xf0] = 17;
    fill(&mut t, 17, 0x90, 0xbf, 20);
    t[0][0xf1] = 18;
    t[0][0xf2] = 18;
    t[0][0xf3] = 18;
    t[0][0xf4] = 19;
    fill(&mut t, 19, 0x80, 0x8f, 20);
    // Unrestricted continuation bytes.
    fill(&mut t, 10, 0x80, 0xbf, 11);
    fill(&mut t, 13, 0x80, 0xbf, 15);
    fill(&mut t, 15, 0x80, 0xbf, 16);
    fill(&mut t, 18, 0x80, 0xbf, 20);
    fill(&mut t, 20, 0x80, 0xbf, 21);
    fill(&mut t, 21, 0x80, 0xbf, 22);
    // A byte outside a restricted second-byte range breaks the sequence.
    set_escapable(&mut t, 12);
    fill(&mut t, 12, 0x80, 0x9f, 9);
    fill(&mut t, 12, 0xc0, 0xff, 9);
    set_escapable(&mut t, 14);
    fill(&mut t, 14, 0xa0, 0xff, 9);
    set_escapable(&mut t, 17);
    fill(&mut t, 17, 0x80, 0x8f, 9);
    fill(&mut t, 17, 0xc0, 0xff, 9);
    set_escapable(&mut t, 19);
    fill(&mut t, 19, 0x90, 0xff, 9);
    // Same for the unrestricted continuation states.
    set_escapable(&mut t, 10);
    set_escapable(&mut t, 13);
    set_escapable(&mut t, 15);
    set_escapable(&mut t, 18);
    set_escapable(&mut t, 20);
    set_escapable(&mut t, 21);
    fill(&mut t, 10, 0xc0, 0xff, 9);
    fill(&mut t, 13, 0xc0, 0xff, 9);
    fill(&mut t, 15, 0xc0, 0xff, 9);
    fill(&mut t, 18, 0xc0, 0xff, 9);
    fill(&mut t, 20, 0xc0, 0xff, 9);
    fill(&mut t, 21, 0xc0, 0xff, 9);
    // Every state that ends a byte's handling behaves like state 0 again.
    let mut state = 1;
    while state <= 9 {
        t[state] = t[0];
        state += 1;
    }
    t[11] = t[0];
    t[16] = t[0];
    t[22] = t[0];
    t
}

fn push_control_escape(out: &mut Vec<u8>, byte: u8) {
    out.extend_from_slice(b"\\u00");
    out.push(HEX_LOWER[(byte >> 4) as usize]);
    out.push(HEX_LOWER[(byte & 0x0f) as usize]);
}

fn push_replacements(out: &mut Vec<u8>, count: usize) {
    for _ in 0..count {
        out.extend_from_slice(b"\\ufffd");
    }
}

/// Encodes arbitrary bytes as a quoted JSON string literal.
///
/// Valid UTF-8 passes through verbatim (control characters and the
/// characters JSON requires escaped become escapes); each byte that cannot
/// be part of a valid sequence is replaced with a `\ufffd` escape. This
/// never fails.
///
/// # Examples
///
/// ```
/// use ordjson::encode_string;
///
/// assert_eq!(encode_string("say \"hi\"\n"), r#""say \"hi\"\n""#);
/// assert_eq!(encode_string(b"\xff"), r#""\ufffd""#);
/// ```
#[must_use]
pub fn encode_string(input: impl AsRef<[u8]>) -> String {
    let bytes = input.as_ref();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len() + 2);
    out.push(b'"');
    let mut state = 0usize;
    // Lead and continuation bytes of a sequence still being verified; a
    // 4-byte sequence holds back at most its first three bytes.
    let mut pending = [0u8; 3];
    let mut held = 0usize;
    for &byte in bytes {
        let next = STEP[state][byte as usize];
        match next {
            0 => {
                push_replacements(&mut out, held);
                held = 0;
                out.push(byte);
            }
            1 => {
                push_replacements(&mut out, held);
                held = 0;
                push_control_escape(&mut out, byte);
            }
            2..=8 => {
                push_replacements(&mut out, held);
                held = 0;
                out.push(b'\\');
                out.push(match next {
                    2 => b'"',
                    3 => b'\\',
                    4 => b'b',
                    5 => b'f',
                    6 => b'n',
                    7 => b'r',
                    _ => b't',
                });
            }
            9 => {
                push_replacements(&mut out, held + 1);
                held = 0;
            }
            11 | 16 | 22 => {
                out.extend_from_slice(&pending[..held]);
                out.push(byte);
                held = 0;
            }
            _ => {
                pending[held] = byte;
                held += 1;
            }
        }
        state = next as usize;
    }
    // Input ended inside a sequence.
    push_replacements(&mut out, held);
    out.push(b'"');
    String::from_utf8(out).expect("encoder output is valid UTF-8")
}
