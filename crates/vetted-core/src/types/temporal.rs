use time::{
    Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

pub(super) fn check_date_time(s: &str) -> Result<(), &'static str> {
    OffsetDateTime::parse(s, &Rfc3339)
        .map(|_| ())
        .map_err(|_| "expected an RFC 3339 timestamp with offset")
}

// YYYY-MM-DD, optionally followed by "Z" or "±hh:mm"
pub(super) fn check_date(s: &str) -> Result<(), &'static str> {
    let (Some(date), Some(zone)) = (s.get(..10), s.get(10..)) else {
        return Err("expected YYYY-MM-DD");
    };

    Date::parse(date, format_description!("[year]-[month]-[day]"))
        .map_err(|_| "expected a calendar date as YYYY-MM-DD")?;

    if zone.is_empty() || zone == "Z" {
        return Ok(());
    }

    UtcOffset::parse(
        zone,
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .map(|_| ())
    .map_err(|_| "invalid timezone offset")
}
