//! Decoder: inverse of the canonical encoder.
//!
//! Decoding is permissive about map ordering — it reproduces the order
//! found in the bytes — because only the encoder carries the canonical
//! contract. Everything else is strict: truncated input, trailing bytes,
//! and markers outside the protocol's value set are errors.

use crate::error::EncodingError;
use crate::value::Value;

/// Decode a canonical byte string into a value.
pub fn decode(bytes: &[u8]) -> Result<Value, EncodingError> {
    let mut reader = Reader { bytes, pos: 0 };
    let value = reader.read_value()?;
    let remaining = bytes.len() - reader.pos;
    if remaining != 0 {
        return Err(EncodingError::TrailingBytes(remaining));
    }
    Ok(value)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn read_value(&mut self) -> Result<Value, EncodingError> {
        let marker = self.take_byte()?;
        match marker {
            // positive fixint
            0x00..=0x7F => Ok(Value::Uint(marker as u64)),
            // fixmap
            0x80..=0x8F => self.read_map((marker & 0x0F) as usize),
            // fixarray
            0x90..=0x9F => self.read_array((marker & 0x0F) as usize),
            // fixstr
            0xA0..=0xBF => self.read_str((marker & 0x1F) as usize),
            0xC2 => Ok(Value::Bool(false)),
            0xC3 => Ok(Value::Bool(true)),
            0xC4 => {
                let len = self.take_byte()? as usize;
                self.read_bytes(len)
            }
            0xC5 => {
                let len = self.take_u16()? as usize;
                self.read_bytes(len)
            }
            0xC6 => {
                let len = self.take_u32()? as usize;
                self.read_bytes(len)
            }
            0xCC => Ok(Value::Uint(self.take_byte()? as u64)),
            0xCD => Ok(Value::Uint(self.take_u16()? as u64)),
            0xCE => Ok(Value::Uint(self.take_u32()? as u64)),
            0xCF => Ok(Value::Uint(self.take_u64()?)),
            0xD9 => {
                let len = self.take_byte()? as usize;
                self.read_str(len)
            }
            0xDA => {
                let len = self.take_u16()? as usize;
                self.read_str(len)
            }
            0xDB => {
                let len = self.take_u32()? as usize;
                self.read_str(len)
            }
            0xDC => {
                let len = self.take_u16()? as usize;
                self.read_array(len)
            }
            0xDD => {
                let len = self.take_u32()? as usize;
                self.read_array(len)
            }
            0xDE => {
                let len = self.take_u16()? as usize;
                self.read_map(len)
            }
            0xDF => {
                let len = self.take_u32()? as usize;
                self.read_map(len)
            }
            other => Err(EncodingError::UnknownMarker(other)),
        }
    }

    fn read_map(&mut self, len: usize) -> Result<Value, EncodingError> {
        let mut entries = Vec::with_capacity(len.min(64));
        for _ in 0..len {
            let key = match self.read_value()? {
                Value::Str(s) => s,
                _ => return Err(EncodingError::InvalidMapKey),
            };
            let value = self.read_value()?;
            entries.push((key, value));
        }
        Ok(Value::Map(entries))
    }

    fn read_array(&mut self, len: usize) -> Result<Value, EncodingError> {
        let mut items = Vec::with_capacity(len.min(64));
        for _ in 0..len {
            items.push(self.read_value()?);
        }
        Ok(Value::Array(items))
    }

    fn read_str(&mut self, len: usize) -> Result<Value, EncodingError> {
        let slice = self.take_slice(len)?;
        let s = std::str::from_utf8(slice).map_err(|_| EncodingError::InvalidUtf8)?;
        Ok(Value::Str(s.to_string()))
    }

    fn read_bytes(&mut self, len: usize) -> Result<Value, EncodingError> {
        Ok(Value::Bytes(self.take_slice(len)?.to_vec()))
    }

    fn take_byte(&mut self) -> Result<u8, EncodingError> {
        let b = *self.bytes.get(self.pos).ok_or(EncodingError::Truncated)?;
        self.pos += 1;
        Ok(b)
    }

    fn take_slice(&mut self, len: usize) -> Result<&'a [u8], EncodingError> {
        let end = self.pos.checked_add(len).ok_or(EncodingError::Truncated)?;
        if end > self.bytes.len() {
            return Err(EncodingError::Truncated);
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_u16(&mut self) -> Result<u16, EncodingError> {
        let slice = self.take_slice(2)?;
        Ok(u16::from_be_bytes([slice[0], slice[1]]))
    }

    fn take_u32(&mut self) -> Result<u32, EncodingError> {
        let slice = self.take_slice(4)?;
        Ok(u32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]]))
    }

    fn take_u64(&mut self) -> Result<u64, EncodingError> {
        let slice = self.take_slice(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(slice);
        Ok(u64::from_be_bytes(arr))
    }
}
