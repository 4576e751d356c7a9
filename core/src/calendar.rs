use crate::error::{CoreError, CoreResult};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Wall-clock "now" without an offset. Record timestamps are naive and
/// compared against calendar-day bounds, so the offset is dropped here.
pub fn now_naive_utc() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// `YYYY-MM-DD HH:MM:SS`, the only timestamp layout that leaves the crate.
pub fn format_timestamp(ts: PrimitiveDateTime) -> CoreResult<String> {
    ts.format(TIMESTAMP_FORMAT)
        .map_err(|e| CoreError::InvalidInput(format!("cannot format timestamp {}: {}", ts, e)))
}

pub fn parse_timestamp(s: &str) -> CoreResult<PrimitiveDateTime> {
    PrimitiveDateTime::parse(s.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        CoreError::InvalidInput(format!(
            "timestamp '{}' is not YYYY-MM-DD HH:MM:SS: {}",
            s, e
        ))
    })
}

pub fn format_date(date: Date) -> CoreResult<String> {
    date.format(DATE_FORMAT)
        .map_err(|e| CoreError::InvalidInput(format!("cannot format date {}: {}", date, e)))
}

pub fn parse_date(s: &str) -> CoreResult<Date> {
    Date::parse(s.trim(), DATE_FORMAT)
        .map_err(|e| CoreError::InvalidInput(format!("date '{}' is not YYYY-MM-DD: {}", s, e)))
}

/// Exclusive upper bound covering the whole of `end_date`: midnight of the
/// following day. `None` when `end_date` is the last representable date.
pub fn end_of_day_exclusive(end_date: Date) -> Option<PrimitiveDateTime> {
    end_date.next_day().map(|d| d.midnight())
}

/// Serde adapter for `YYYY-MM-DD HH:MM:SS` timestamps.
pub mod timestamp_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    pub fn serialize<S: Serializer>(ts: &PrimitiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        let text = super::format_timestamp(*ts).map_err(serde::ser::Error::custom)?;
        s.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<PrimitiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `YYYY-MM-DD` calendar dates.
pub mod date_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
        let text = super::format_date(*date).map_err(serde::ser::Error::custom)?;
        s.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
