//! Table-driven JSON parsing.
//!
//! The grammar lives in a 69-state byte-transition table built at compile
//! time. State 0 is the failure state and state 1 the entry state; a parse
//! succeeds when input ends in an accepting state with no container still
//! open. A finite-state machine cannot match the recursive part of JSON on
//! its own, so the driver overlays a stack of in-flight containers plus a
//! placeholder for the object key being assembled, and the container states
//! consult that stack.
//!
//! Strings are validated against the RFC 3629 UTF-8 grammar byte by byte
//! inside the same table (states 49..=56). `\uXXXX` escapes branch on their
//! hex digits so that each terminating state fixes the number of output
//! bytes: 46 emits one, 47 two, 48 three. Surrogate halves are handled in
//! the action code at state 48: a high half is held back and must be
//! followed by a `\uXXXX` low half, the pair then emitting one 4-byte
//! sequence.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use crate::value::{Map, Value};

const STATES: usize = 69;

struct Tables {
    step: [[u8; 256]; STATES],
    accepting: [bool; STATES],
}

static TABLES: Tables = build_tables();

/// Maps ASCII hex digits to their value; every other byte maps to 0 and is
/// never consulted because the table only routes hex digits here.
static HEX_VALUES: [u8; 256] = build_hex_values();

const fn build_hex_values() -> [u8; 256] {
    let mut t = [0u8; 256];
    let mut c = b'0';
    while c <= b'9' {
        t[c as usize] = c - b'0';
        c += 1;
    }
    let mut c = b'A';
    while c <= b'F' {
        t[c as usize] = c - b'A' + 10;
        c += 1;
    }
    let mut c = b'a';
    while c <= b'f' {
        t[c as usize] = c - b'a' + 10;
        c += 1;
    }
    t
}

const fn fill(step: &mut [[u8; 256]; STATES], state: usize, lo: usize, hi: usize, next: u8) {
    let mut byte = lo;
    while byte <= hi {
        step[state][byte] = next;
        byte += 1;
    }
}

const fn copy_row(step: &mut [[u8; 256]; STATES], from: usize, to: usize) {
    let row = step[from];
    step[to] = row;
}

const fn set_whitespace(step: &mut [[u8; 256]; STATES], at: usize, next: u8) {
    step[at][b'\t' as usize] = next;
    step[at][b'\n' as usize] = next;
    step[at][b'\r' as usize] = next;
    step[at][b' ' as usize] = next;
}

const fn set_hex(step: &mut [[u8; 256]; STATES], at: usize, next: u8) {
    fill(step, at, b'0' as usize, b'9' as usize, next);
    fill(step, at, b'A' as usize, b'F' as usize, next);
    fill(step, at, b'a' as usize, b'f' as usize, next);
}

const fn build_tables() -> Tables {
    let mut step = [[0u8; 256]; STATES];
    let mut accepting = [false; STATES];
    // null
    step[1][b'n' as usize] = 2;
    step[2][b'u' as usize] = 3;
    step[3][b'l' as usize] = 4;
    step[4][b'l' as usize] = 5;
    accepting[5] = true;
    // false
    step[1][b'f' as usize] = 6;
    step[6][b'a' as usize] = 7;
    step[7][b'l' as usize] = 8;
    step[8][b's' as usize] = 9;
    step[9][b'e' as usize] = 10;
    accepting[10] = true;
    // true
    step[1][b't' as usize] = 11;
    step[11][b'r' as usize] = 12;
    step[12][b'u' as usize] = 13;
    step[13][b'e' as usize] = 14;
    accepting[14] = true;
    // Numbers: a leading zero stands alone, other digits may continue.
    step[1][b'0' as usize] = 15;
    accepting[15] = true;
    fill(&mut step, 1, b'1' as usize, b'9' as usize, 16);
    accepting[16] = true;
    step[1][b'-' as usize] = 17;
    fill(&mut step, 16, b'0' as usize, b'9' as usize, 19);
    accepting[19] = true;
    fill(&mut step, 19, b'0' as usize, b'9' as usize, 19);
    step[17][b'0' as usize] = 18;
    accepting[18] = true;
    fill(&mut step, 17, b'1' as usize, b'9' as usize, 19);
    step[15][b'.' as usize] = 20;
    step[16][b'.' as usize] = 20;
    step[18][b'.' as usize] = 20;
    step[19][b'.' as usize] = 20;
    fill(&mut step, 20, b'0' as usize, b'9' as usize, 21);
    accepting[21] = true;
    fill(&mut step, 21, b'0' as usize, b'9' as usize, 21);
    step[15][b'E' as usize] = 22;
    step[15][b'e' as usize] = 22;
    step[16][b'E' as usize] = 22;
    step[16][b'e' as usize] = 22;
    step[18][b'E' as usize] = 22;
    step[18][b'e' as usize] = 22;
    step[19][b'E' as usize] = 22;
    step[19][b'e' as usize] = 22;
    step[21][b'E' as usize] = 22;
    step[21][b'e' as usize] = 22;
    fill(&mut step, 22, b'0' as usize, b'9' as usize, 23);
    accepting[23] = true;
    step[22][b'+' as usize] = 24;
    step[22][b'-' as usize] = 24;
    fill(&mut step, 23, b'0' as usize, b'9' as usize, 23);
    fill(&mut step, 24, b'0' as usize, b'9' as usize, 23);
    // Strings: state 26 is the looping body, state 25 the just-opened quote
    // (its row is copied from 26 below).
    step[1][b'"' as usize] = 25;
    step[26][b'"' as usize] = 27;
    accepting[27] = true;
    step[26][b'\\' as usize] = 28;
    let mut byte = 32;
    while byte <= 127 {
        if byte != b'"' as usize && byte != b'\\' as usize {
            step[26][byte] = 26;
        }
        byte += 1;
    }
    // Matched escape characters resume the string body (rows copied below).
    step[28][b'"' as usize] = 29;
    step[28][b'\\' as usize] = 30;
    step[28][b'/' as usize] = 31;
    step[28][b'b' as usize] = 32;
    step[28][b'f' as usize] = 33;
    step[28][b'n' as usize] = 34;
    step[28][b'r' as usize] = 35;
    step[28][b't' as usize] = 36;
    // The \uXXXX subtree. The states branch on the hex digits so that the
    // width of the decoded UTF-8 comes out of the path taken: 46, 47 and 48
    // terminate escapes decoding to 1, 2 and 3 output bytes.
    step[28][b'u' as usize] = 37;
    set_hex(&mut step, 37, 39);
    set_hex(&mut step, 39, 40);
    set_hex(&mut step, 40, 45);
    set_hex(&mut step, 41, 43);
    set_hex(&mut step, 43, 47);
    set_hex(&mut step, 44, 46);
    set_hex(&mut step, 45, 48);
    // A leading '0' keeps the width undecided.
    step[37][b'0' as usize] = 38;
    fill(&mut step, 38, b'0' as usize, b'7' as usize, 41);
    fill(&mut step, 42, b'0' as usize, b'7' as usize, 44);
    step[38][b'0' as usize] = 42;
    step[38][b'8' as usize] = 40;
    step[42][b'8' as usize] = 43;
    step[38][b'9' as usize] = 40;
    step[42][b'9' as usize] = 43;
    fill(&mut step, 38, b'A' as usize, b'F' as usize, 40);
    fill(&mut step, 42, b'A' as usize, b'F' as usize, 43);
    fill(&mut step, 38, b'a' as usize, b'f' as usize, 40);
    fill(&mut step, 42, b'a' as usize, b'f' as usize, 43);
    // Raw UTF-8 inside a string body, per the RFC 3629 ranges. State 52
    // terminates every valid sequence and resumes the body.
    fill(&mut step, 26, 0xc2, 0xdf, 49);
    fill(&mut step, 49, 0x80, 0xbf, 52);
    step[26][0xe0] = 53;
    fill(&mut step, 53, 0xa0, 0xbf, 49);
    fill(&mut step, 26, 0xe1, 0xec, 50);
    step[26][0xee] = 50;
    step[26][0xef] = 50;
    fill(&mut step, 50, 0x80, 0xbf, 49);
    step[26][0xed] = 54;
    fill(&mut step, 54, 0x80, 0x9f, 49);
    step[26][0xf0] = 55;
    fill(&mut step, 55, 0x90, 0xbf, 50);
    step[26][0xf1] = 51;
    step[26][0xf2] = 51;
    step[26][0xf3] = 51;
    fill(&mut step, 51, 0x80, 0xbf, 50);
    step[26][0xf4] = 56;
    fill(&mut step, 56, 0x80, 0x8f, 50);
    // States that continue the string body after a handled special case.
    copy_row(&mut step, 26, 25);
    copy_row(&mut step, 26, 29);
    copy_row(&mut step, 26, 30);
    copy_row(&mut step, 26, 31);
    copy_row(&mut step, 26, 32);
    copy_row(&mut step, 26, 33);
    copy_row(&mut step, 26, 34);
    copy_row(&mut step, 26, 35);
    copy_row(&mut step, 26, 36);
    copy_row(&mut step, 26, 46);
    copy_row(&mut step, 26, 47);
    copy_row(&mut step, 26, 48);
    copy_row(&mut step, 26, 52);
    // Whitespace may precede any value; state 66 runs it out before an
    // object key, 67 after a string that may turn out to be a key, 68 after
    // every other accepted value.
    set_whitespace(&mut step, 1, 1);
    // Containers. The comma and colon states behave like the entry state so
    // nested values can begin there; the driver enforces the recursive
    // structure the table cannot express.
    step[1][b'[' as usize] = 57;
    accepting[58] = true;
    accepting[59] = true;
    step[1][b'{' as usize] = 61;
    step[61][b'}' as usize] = 62;
    accepting[62] = true;
    accepting[63] = true;
    step[61][b'"' as usize] = 25;
    step[64][b'"' as usize] = 25;
    step[66][b'"' as usize] = 25;
    set_whitespace(&mut step, 61, 66);
    set_whitespace(&mut step, 64, 66);
    set_whitespace(&mut step, 66, 66);
    step[27][b':' as usize] = 65;
    step[67][b':' as usize] = 65;
    set_whitespace(&mut step, 27, 67);
    set_whitespace(&mut step, 67, 67);
    accepting[67] = true;
    copy_row(&mut step, 1, 57);
    step[57][b']' as usize] = 58;
    copy_row(&mut step, 1, 60);
    copy_row(&mut step, 1, 65);
    accepting[68] = true;
    // Every accepting state may be followed by a separator or a closing
    // bracket; trailing whitespace goes to 68 except after strings, which
    // keep state 67 for a potential key colon.
    let mut state = 0;
    while state < STATES {
        if accepting[state] {
            step[state][b']' as usize] = 59;
            step[state][b',' as usize] = 60;
            step[state][b'}' as usize] = 63;
            if state != 27 && state != 67 {
                set_whitespace(&mut step, state, 68);
            }
        }
        state += 1;
    }
    Tables { step, accepting }
}

/// One open container. A frame owns everything parsed into it so far; the
/// value under construction moves into its parent when the container closes.
enum Frame {
    Array(Vec<Value>),
    Object {
        map: Map,
        pending_key: Option<Vec<u8>>,
    },
}

struct Machine {
    state: u8,
    frames: Vec<Frame>,
    current: Option<Value>,
    number: String,
    text: Vec<u8>,
    hex: u32,
    pending_surrogate: Option<u32>,
}

impl Machine {
    fn new() -> Self {
        Self {
            state: 1,
            frames: Vec::new(),
            current: None,
            number: String::new(),
            text: Vec::new(),
            hex: 0,
            pending_surrogate: None,
        }
    }

    fn run(mut self, input: &[u8]) -> Result<Value, String> {
        for (offset, &byte) in input.iter().enumerate() {
            self.step(byte, offset)?;
        }
        self.finish(input.len())
    }

    fn step(&mut self, byte: u8, offset: usize) -> Result<(), String> {
        let state = self.state;
        let next = TABLES.step[state as usize][byte as usize];
        if next == 0 {
            return Err(format!(
                "unexpected byte 0x{byte:02x} at offset {offset} (state {state})"
            ));
        }
        if self.pending_surrogate.is_some() {
            // A held high surrogate admits exactly one continuation: an
            // immediate \uXXXX that decodes to a low surrogate.
            let legal = match state {
                48 => next == 28,
                28 => next == 37,
                _ => next != 46 && next != 47,
            };
            if !legal {
                return Err(format!("unpaired surrogate escape at offset {offset}"));
            }
        }
        match next {
            15..=24 => {
                if !matches!(state, 15..=24) {
                    self.number.clear();
                }
                self.number.push(byte as char);
            }
            25 => self.text.clear(),
            26 | 49..=56 => self.text.push(byte),
            27 => self.close_string(),
            29 => self.text.push(b'"'),
            30 => self.text.push(b'\\'),
            31 => self.text.push(b'/'),
            32 => self.text.push(0x08),
            33 => self.text.push(0x0c),
            34 => self.text.push(b'\n'),
            35 => self.text.push(b'\r'),
            36 => self.text.push(b'\t'),
            37 => self.hex = 0,
            38..=45 => self.hex = (self.hex << 4) | u32::from(HEX_VALUES[byte as usize]),
            46 | 47 => {
                self.hex = (self.hex << 4) | u32::from(HEX_VALUES[byte as usize]);
                push_utf8(&mut self.text, self.hex);
            }
            48 => {
                self.hex = (self.hex << 4) | u32::from(HEX_VALUES[byte as usize]);
                self.finish_three_byte_escape(offset)?;
            }
            57 => self.frames.push(Frame::Array(Vec::new())),
            61 => self.frames.push(Frame::Object {
                map: Map::new(),
                pending_key: None,
            }),
            58 => self.close_array(offset)?,
            59 => {
                self.end_scalar(state);
                self.close_array(offset)?;
            }
            62 => self.close_object(offset)?,
            63 => {
                self.end_scalar(state);
                self.close_object(offset)?;
            }
            60 => {
                self.end_scalar(state);
                self.comma(offset)?;
            }
            65 => self.colon(offset)?,
            67 | 68 => self.end_scalar(state),
            _ => {}
        }
        self.state = next;
        // The table lets a comma begin any value; inside an object only a
        // key string may follow, so the driver narrows the state.
        if next == 60 {
            if let Some(Frame::Object { .. }) = self.frames.last() {
                self.state = 64;
            }
        }
        Ok(())
    }

    /// Materializes the scalar accepted by `state`, if any, into `current`.
    fn end_scalar(&mut self, state: u8) {
        let value = match state {
            5 => Value::Null,
            10 => Value::Boolean(false),
            14 => Value::Boolean(true),
            15 | 16 | 18 | 19 | 21 | 23 => Value::Number(mem::take(&mut self.number)),
            _ => return,
        };
        self.current = Some(value);
    }

    /// A string closed: inside an object with no key yet it becomes the
    /// pending key, otherwise it is a value.
    fn close_string(&mut self) {
        let text = mem::take(&mut self.text);
        match self.frames.last_mut() {
            Some(Frame::Object { pending_key, .. }) if pending_key.is_none() => {
                *pending_key = Some(text);
            }
            _ => self.current = Some(Value::String(text)),
        }
    }

    fn finish_three_byte_escape(&mut self, offset: usize) -> Result<(), String> {
        let code = self.hex;
        match self.pending_surrogate.take() {
            Some(high) => {
                if (0xdc00..=0xdfff).contains(&code) {
                    let combined = 0x10000 + ((high - 0xd800) << 10) + (code - 0xdc00);
                    push_utf8(&mut self.text, combined);
                    Ok(())
                } else {
                    Err(format!("unpaired surrogate escape at offset {offset}"))
                }
            }
            None => {
                if (0xd800..=0xdbff).contains(&code) {
                    self.pending_surrogate = Some(code);
                    Ok(())
                } else if (0xdc00..=0xdfff).contains(&code) {
                    Err(format!("lone low surrogate escape at offset {offset}"))
                } else {
                    push_utf8(&mut self.text, code);
                    Ok(())
                }
            }
        }
    }

    /// Moves the completed value, if any, into the innermost container.
    fn attach(&mut self, offset: usize) -> Result<(), String> {
        let Some(value) = self.current.take() else {
            return Ok(());
        };
        match self.frames.last_mut() {
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Object { map, pending_key }) => match pending_key.take() {
                Some(key) => {
                    map.insert(key, value);
                }
                None => {
                    return Err(format!("object value without a key at offset {offset}"));
                }
            },
            None => {
                return Err(format!("value outside any container at offset {offset}"));
            }
        }
        Ok(())
    }

    fn close_array(&mut self, offset: usize) -> Result<(), String> {
        self.attach(offset)?;
        match self.frames.pop() {
            Some(Frame::Array(items)) => {
                self.current = Some(Value::Array(items));
                Ok(())
            }
            Some(Frame::Object { .. }) => {
                Err(format!("']' inside an unterminated object at offset {offset}"))
            }
            None => Err(format!("']' outside any container at offset {offset}")),
        }
    }

    fn close_object(&mut self, offset: usize) -> Result<(), String> {
        self.attach(offset)?;
        match self.frames.pop() {
            Some(Frame::Object {
                map,
                pending_key: None,
            }) => {
                self.current = Some(Value::Object(map));
                Ok(())
            }
            Some(Frame::Object { .. }) => {
                Err(format!("object key without a value at offset {offset}"))
            }
            Some(Frame::Array(_)) => {
                Err(format!("'}}' inside an unterminated array at offset {offset}"))
            }
            None => Err(format!("'}}' outside any container at offset {offset}")),
        }
    }

    fn comma(&mut self, offset: usize) -> Result<(), String> {
        if self.frames.is_empty() {
            return Err(format!("',' outside any container at offset {offset}"));
        }
        self.attach(offset)?;
        if let Some(Frame::Object { pending_key, .. }) = self.frames.last() {
            if pending_key.is_some() {
                return Err(format!("',' after an object key at offset {offset}"));
            }
        }
        Ok(())
    }

    fn colon(&mut self, offset: usize) -> Result<(), String> {
        match self.frames.last() {
            Some(Frame::Object {
                pending_key: Some(_),
                ..
            }) if self.current.is_none() => Ok(()),
            _ => Err(format!("misplaced ':' at offset {offset}")),
        }
    }

    fn finish(mut self, length: usize) -> Result<Value, String> {
        let state = self.state;
        if !TABLES.accepting[state as usize] {
            if length == 0 {
                return Err(String::from("empty input"));
            }
            return Err(format!(
                "unexpected end of input at offset {length} (state {state})"
            ));
        }
        self.end_scalar(state);
        if !self.frames.is_empty() {
            return Err(format!("unterminated container at offset {length}"));
        }
        self.current
            .take()
            .ok_or_else(|| format!("no value at offset {length}"))
    }
}

fn push_utf8(text: &mut Vec<u8>, code: u32) {
    if code < 0x80 {
        text.push(code as u8);
    } else if code < 0x800 {
        text.push(0xc0 | (code >> 6) as u8);
        text.push(0x80 | (code & 0x3f) as u8);
    } else if code < 0x10000 {
        text.push(0xe0 | (code >> 12) as u8);
        text.push(0x80 | ((code >> 6) & 0x3f) as u8);
        text.push(0x80 | (code & 0x3f) as u8);
    } else {
        text.push(0xf0 | (code >> 18) as u8);
        text.push(0x80 | ((code >> 12) & 0x3f) as u8);
        text.push(0x80 | ((code >> 6) & 0x3f) as u8);
        text.push(0x80 | (code & 0x3f) as u8);
    }
}

/// Parses a JSON document from bytes.
///
/// Malformed input (bad syntax, invalid UTF-8 inside a string, an unpaired
/// surrogate escape, an unterminated container) comes back as
/// [`Value::Error`] carrying a diagnostic with the byte offset; parsing
/// never panics. Exactly one root value is accepted.
///
/// # Examples
///
/// ```
/// use ordjson::parse;
///
/// assert!(parse(br#"{"a":1}"#).is_object());
/// assert!(parse(b"[1,]").is_error());
/// ```
#[must_use]
pub fn parse(input: &[u8]) -> Value {
    match Machine::new().run(input) {
        Ok(value) => value,
        Err(message) => Value::Error(message),
    }
}

/// Parses a JSON document from a string slice. See [`parse`].
#[must_use]
pub fn parse_str(input: &str) -> Value {
    parse(input.as_bytes())
}
