use crate::itinerary::tests::utils::itinerary;
use crate::itinerary::{ItineraryError, extract};
use chrono::{Duration, NaiveDate, Timelike};
use proptest::prelude::*;
use proptest::proptest;

fn arb_time() -> impl Strategy<Value = (u32, u32, i32)> {
    (0..24u32, 0..60u32, -12..=14i32)
}

fn render((hour, minute, offset): (u32, u32, i32)) -> String {
    format!("{:02}:{:02} GMT{:+}", hour, minute, offset)
}

fn arb_note() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 :,]{0,30}".prop_map(|s| s.trim().to_string())
}

proptest! {
    #[test]
    fn test_accepted_events_arrive_after_departure(dep in arb_time(), arr in arb_time()) {
        let text = itinerary("QZ77 on 15.03.2025", "Lima to Quito", &render(dep), &render(arr), &[]);

        match extract(&text) {
            Ok(event) => {
                prop_assert!(event.arrival_utc() > event.departure_utc());

                let arrival_local = event.arrival_utc().naive_utc() + Duration::hours(arr.2 as i64);
                let expected_day = if arr.0 < dep.0 { 16 } else { 15 };
                prop_assert_eq!(
                    NaiveDate::from_ymd_opt(2025, 3, expected_day).unwrap(),
                    arrival_local.date()
                );
                prop_assert_eq!(arr.0, arrival_local.hour());
            }
            Err(ItineraryError::InvertedTimes { departure, arrival }) => {
                prop_assert!(arrival <= departure);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_free_lines_survive_as_description(
        notes in prop::collection::vec(arb_note(), 0..6)
    ) {
        let notes = notes
            .into_iter()
            .filter(|n| !n.is_empty() && !n.contains(" to "))
            .collect::<Vec<String>>();
        let refs = notes.iter().map(String::as_str).collect::<Vec<&str>>();
        let text = itinerary("QZ77 on 15.03.2025", "Lima to Quito", "08:00 GMT-5", "10:30 GMT-5", &refs);

        let event = extract(&text).unwrap();
        prop_assert_eq!(notes.join("\n"), event.description());
    }
}
