use chrono::{DateTime, TimeZone, Utc};

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

/// Header, route, departure marker, any free lines, arrival marker.
pub fn itinerary(
    header: &str,
    route: &str,
    departure: &str,
    arrival: &str,
    notes: &[&str],
) -> String {
    let mut lines = vec![
        header.to_string(),
        route.to_string(),
        format!("↗ {}", departure),
    ];
    lines.extend(notes.iter().map(|n| n.to_string()));
    lines.push(format!("↘ {}", arrival));
    lines.join("\n")
}

pub fn paris_tokyo(departure: &str, arrival: &str) -> String {
    itinerary(
        "AB123 on 01.05.2024",
        "Paris to Tokyo",
        departure,
        arrival,
        &[],
    )
}
