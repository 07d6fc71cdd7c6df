//! Wire encode/decode for telemetry frames.
//!
//! Integers and doubles are network-byte-order (big-endian). Strings are
//! prefixed with a single unsigned length byte; `0x00` denotes a null (or
//! empty — the two are not distinguishable on the wire) string. A string
//! of 256 bytes or more is truncated to its first 255 bytes, written with
//! a length byte of 255, and followed by a trailing `0x00` sentinel byte
//! marking the truncation.

use std::io::{Read, Write};

use crate::error::TelemetryError;
use crate::frame::*;

const TRUNCATED_LEN: u8 = 255;

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), TelemetryError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a big-endian f64.
pub fn write_f64_be(w: &mut dyn Write, v: f64) -> Result<(), TelemetryError> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

/// Write a length-prefixed string, truncating to 255 bytes with a
/// trailing sentinel if longer, per the wire format above.
pub fn write_short_string(w: &mut dyn Write, s: Option<&str>) -> Result<(), TelemetryError> {
    let s = match s {
        Some(s) if !s.is_empty() => s,
        _ => {
            write_u8(w, 0)?;
            return Ok(());
        }
    };

    let bytes = s.as_bytes();
    if bytes.len() < 256 {
        write_u8(w, bytes.len() as u8)?;
        w.write_all(bytes)?;
    } else {
        // Raw byte truncation; a multi-byte char straddling the cut is
        // resolved lossily on decode rather than rewinding to a char
        // boundary, keeping the wire length exactly 255 regardless.
        write_u8(w, TRUNCATED_LEN)?;
        w.write_all(&bytes[..255])?;
        write_u8(w, 0)?; // truncation sentinel
    }
    Ok(())
}

/// Read a length-prefixed string written by [`write_short_string`].
pub fn read_short_string(r: &mut dyn Read) -> Result<Option<String>, TelemetryError> {
    let mut len_buf = [0u8; 1];
    r.read_exact(&mut len_buf)?;
    let len = len_buf[0];
    if len == 0 {
        return Ok(None);
    }

    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf)?;

    if len == TRUNCATED_LEN {
        let mut sentinel = [0u8; 1];
        r.read_exact(&mut sentinel)?;
        if sentinel[0] != 0 {
            return Err(TelemetryError::MalformedFrame {
                detail: format!("expected truncation sentinel 0x00, found {:#04x}", sentinel[0]),
            });
        }
        // The truncation cut may land mid-character; resolve lossily
        // rather than reject an otherwise well-formed frame.
        return Ok(Some(String::from_utf8_lossy(&buf).into_owned()));
    }

    String::from_utf8(buf)
        .map(Some)
        .map_err(|e| TelemetryError::MalformedFrame { detail: format!("invalid UTF-8 string: {e}") })
}

/// Encode a single telemetry frame: tag byte, then the frame's fields.
pub fn encode_frame(w: &mut dyn Write, frame: &TelemetryFrame) -> Result<(), TelemetryError> {
    write_u8(w, frame.tag())?;
    match frame {
        TelemetryFrame::Position { name, x, y } => {
            write_short_string(w, name.as_deref())?;
            write_f64_be(w, *x)?;
            write_f64_be(w, *y)?;
        }
        TelemetryFrame::Vector { name, x, y, dx, dy } => {
            write_short_string(w, name.as_deref())?;
            write_f64_be(w, *x)?;
            write_f64_be(w, *y)?;
            write_f64_be(w, *dx)?;
            write_f64_be(w, *dy)?;
        }
        TelemetryFrame::Transform { name, x, y, heading } => {
            write_short_string(w, name.as_deref())?;
            write_f64_be(w, *x)?;
            write_f64_be(w, *y)?;
            write_f64_be(w, *heading)?;
        }
        TelemetryFrame::UpdatableObject { id, x, y, heading } => {
            write_short_string(w, id.as_deref())?;
            write_f64_be(w, *x)?;
            write_f64_be(w, *y)?;
            write_f64_be(w, *heading)?;
        }
        TelemetryFrame::Log { message } => {
            write_short_string(w, message.as_deref())?;
        }
    }
    Ok(())
}

fn read_f64_be(r: &mut dyn Read) -> Result<f64, TelemetryError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_be_bytes(buf))
}

/// Decode a single telemetry frame from its tag byte onward.
pub fn decode_frame(r: &mut dyn Read) -> Result<TelemetryFrame, TelemetryError> {
    let mut tag_buf = [0u8; 1];
    r.read_exact(&mut tag_buf)?;

    Ok(match tag_buf[0] {
        TAG_POSITION => TelemetryFrame::Position {
            name: read_short_string(r)?,
            x: read_f64_be(r)?,
            y: read_f64_be(r)?,
        },
        TAG_VECTOR => TelemetryFrame::Vector {
            name: read_short_string(r)?,
            x: read_f64_be(r)?,
            y: read_f64_be(r)?,
            dx: read_f64_be(r)?,
            dy: read_f64_be(r)?,
        },
        TAG_TRANSFORM => TelemetryFrame::Transform {
            name: read_short_string(r)?,
            x: read_f64_be(r)?,
            y: read_f64_be(r)?,
            heading: read_f64_be(r)?,
        },
        TAG_UPDATABLE_OBJECT => TelemetryFrame::UpdatableObject {
            id: read_short_string(r)?,
            x: read_f64_be(r)?,
            y: read_f64_be(r)?,
            heading: read_f64_be(r)?,
        },
        TAG_LOG => TelemetryFrame::Log { message: read_short_string(r)? },
        tag => return Err(TelemetryError::UnknownFrameTag { tag }),
    })
}
