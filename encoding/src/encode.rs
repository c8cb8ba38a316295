//! Canonical encoder: deterministic value-to-bytes mapping.

use crate::value::Value;

/// Encode a value into its canonical byte form.
///
/// Map entries are sorted lexicographically by key and zero-valued entries
/// are dropped, recursively, before emission. Re-encoding a decoded
/// encoding always reproduces the original bytes.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    write_value(&mut buf, &canonical_form(value));
    buf
}

/// Normalize a value tree: sort map entries, drop zero-valued entries.
///
/// Array elements are normalized but never dropped — only map entries carry
/// the omit-if-zero rule (an empty map inside an array stays an empty map).
fn canonical_form(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(canonical_form).collect()),
        Value::Map(entries) => {
            let mut normalized: Vec<(String, Value)> = entries
                .iter()
                .map(|(k, v)| (k.clone(), canonical_form(v)))
                .filter(|(_, v)| !v.is_zero())
                .collect();
            normalized.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Map(normalized)
        }
        other => other.clone(),
    }
}

fn write_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Uint(n) => write_uint(buf, *n),
        Value::Bool(b) => buf.push(if *b { 0xC3 } else { 0xC2 }),
        Value::Bytes(bytes) => write_bytes(buf, bytes),
        Value::Str(s) => write_str(buf, s),
        Value::Array(items) => {
            write_array_header(buf, items.len());
            for item in items {
                write_value(buf, item);
            }
        }
        Value::Map(entries) => {
            write_map_header(buf, entries.len());
            for (key, val) in entries {
                write_str(buf, key);
                write_value(buf, val);
            }
        }
    }
}

/// Smallest-width unsigned integer format.
fn write_uint(buf: &mut Vec<u8>, n: u64) {
    if n <= 0x7F {
        buf.push(n as u8);
    } else if n <= 0xFF {
        buf.push(0xCC);
        buf.push(n as u8);
    } else if n <= 0xFFFF {
        buf.push(0xCD);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xFFFF_FFFF {
        buf.push(0xCE);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(0xCF);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

fn write_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    let len = bytes.len();
    if len <= 0xFF {
        buf.push(0xC4);
        buf.push(len as u8);
    } else if len <= 0xFFFF {
        buf.push(0xC5);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(0xC6);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.extend_from_slice(bytes);
}

fn write_str(buf: &mut Vec<u8>, s: &str) {
    let len = s.len();
    if len <= 31 {
        buf.push(0xA0 | len as u8);
    } else if len <= 0xFF {
        buf.push(0xD9);
        buf.push(len as u8);
    } else if len <= 0xFFFF {
        buf.push(0xDA);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(0xDB);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.extend_from_slice(s.as_bytes());
}

fn write_array_header(buf: &mut Vec<u8>, len: usize) {
    if len <= 15 {
        buf.push(0x90 | len as u8);
    } else if len <= 0xFFFF {
        buf.push(0xDC);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(0xDD);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
}

fn write_map_header(buf: &mut Vec<u8>, len: usize) {
    if len <= 15 {
        buf.push(0x80 | len as u8);
    } else if len <= 0xFFFF {
        buf.push(0xDE);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(0xDF);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
}
