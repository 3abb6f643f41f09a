//! CSV encoding for a single document record.
//!
//! Output is always two lines: an unquoted header of field names and one data
//! line where every value is quoted and inner quotes are doubled. Commas,
//! quotes and line breaks inside a value therefore survive any RFC 4180 reader.

use crate::DocumentRecord;

/// Media type declared for every CSV payload.
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// Encodes an ordered list of `(name, value)` pairs as a header line plus one
/// data line, each terminated by `\n`.
pub fn encode_fields<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let fields: Vec<(&str, &str)> = fields.into_iter().collect();

    let mut out = String::new();
    for (i, (name, _)) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(name);
    }
    out.push('\n');

    for (i, (_, value)) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_quoted(&mut out, value);
    }
    out.push('\n');
    out
}

/// Encodes a record in [`crate::DocumentField::ALL`] order as UTF-8 bytes.
pub fn encode_record(record: &DocumentRecord) -> Vec<u8> {
    encode_fields(record.iter().map(|(field, value)| (field.name(), value))).into_bytes()
}

fn push_quoted(out: &mut String, value: &str) {
    out.reserve(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}
