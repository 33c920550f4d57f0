//! Attraction record model and field-level decoding.
//!
//! The feature service wraps each record's fields in an `attributes` object
//! whose keys do not match ours (`GlobalID`, `address_street`, ...), and the
//! text fields arrive HTML-escaped. The hand-written [`Deserialize`] impl is
//! the single place where mapping, sanitization, and id assignment happen, so
//! every record past this boundary is clean.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::geo::Coordinate;

/// Stable identifier of a single record.
///
/// Carries the server's `GlobalID` verbatim when one was present, otherwise a
/// freshly generated uuid. Opaque to everything downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// A fresh, unique id for records the server did not identify.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One sanitized point-of-interest entry.
///
/// All text fields have been entity-unescaped exactly once during decode;
/// `image` and `url` are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct AttractionRecord {
    pub id: RecordId,
    pub name: Option<String>,
    pub text: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl AttractionRecord {
    /// The record's position, present iff both components are present.
    ///
    /// Recomputed on every call so it can never go stale relative to the
    /// stored latitude/longitude.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Display name, falling back to the empty string for sorting purposes.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Server-side field names, before mapping.
#[derive(Deserialize)]
struct RawAttributes {
    #[serde(rename = "GlobalID", default)]
    global_id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(rename = "address_street", default)]
    street: Option<String>,
    #[serde(rename = "address_city", default)]
    city: Option<String>,
    #[serde(rename = "contact_phone", default)]
    phone: Option<String>,
    #[serde(rename = "contact_email", default)]
    email: Option<String>,
    #[serde(default)]
    latitude: Option<Value>,
    #[serde(default)]
    longitude: Option<Value>,
}

impl<'de> Deserialize<'de> for AttractionRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawAttributes::deserialize(deserializer)?;

        let id = raw
            .global_id
            .as_ref()
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(RecordId::from)
            .unwrap_or_else(RecordId::fresh);

        Ok(Self {
            id,
            name: raw.name.map(|value| unescape_html_entities(&value)),
            text: raw.text.map(|value| unescape_html_entities(&value)),
            image: raw.image,
            url: raw.url,
            address: raw.address.map(|value| unescape_html_entities(&value)),
            street: raw.street.map(|value| unescape_html_entities(&value)),
            city: raw.city.map(|value| unescape_html_entities(&value)),
            phone: raw.phone.map(|value| unescape_html_entities(&value)),
            email: raw.email.map(|value| unescape_html_entities(&value)),
            latitude: lenient_number(raw.latitude.as_ref()),
            longitude: lenient_number(raw.longitude.as_ref()),
        })
    }
}

/// Coordinates decode as numbers or are treated as absent; a non-numeric
/// value in these fields is bad data, not a malformed payload.
fn lenient_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|number| number.is_finite())
}

/// Decodes HTML entity references in `raw`.
///
/// Handles the named entities that show up in feature-service text plus
/// decimal (`&#233;`) and hex (`&#xE9;`) numeric references. Total: anything
/// unrecognized is passed through unchanged.
pub fn unescape_html_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_owned();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        match take_entity(rest) {
            Some((decoded, consumed)) => {
                out.push_str(&decoded);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Tries to decode a single entity at the start of `input` (which begins with
/// `&`), returning the decoded text and the number of bytes consumed.
fn take_entity(input: &str) -> Option<(String, usize)> {
    let semi = input[1..].find(';')?;
    let body = &input[1..=semi];
    if body.is_empty() || body.len() > 24 {
        return None;
    }
    let decoded = if let Some(reference) = body.strip_prefix('#') {
        let code = if let Some(hex) = reference
            .strip_prefix('x')
            .or_else(|| reference.strip_prefix('X'))
        {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            reference.parse::<u32>().ok()?
        };
        char::from_u32(code)?.to_string()
    } else {
        named_entity(body)?.to_owned()
    };
    Some((decoded, semi + 2))
}

fn named_entity(name: &str) -> Option<&'static str> {
    let decoded = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "aacute" => "á",
        "agrave" => "à",
        "auml" => "ä",
        "ccedil" => "ç",
        "eacute" => "é",
        "egrave" => "è",
        "iacute" => "í",
        "oacute" => "ó",
        "ouml" => "ö",
        "scaron" => "š",
        "uacute" => "ú",
        "uuml" => "ü",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "copy" => "©",
        "reg" => "®",
        "deg" => "°",
        "middot" => "·",
        "times" => "×",
        _ => return None,
    };
    Some(decoded)
}
