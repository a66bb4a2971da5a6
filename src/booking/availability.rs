use chrono::{Datelike, NaiveDate, Weekday};

/// The fixed business day: twenty half-hour slots from 9:00 AM to 6:30 PM.
pub const BUSINESS_DAY_SLOTS: [&str; 20] = [
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "12:00 PM", "12:30 PM", "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM",
    "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM", "5:00 PM", "5:30 PM",
    "6:00 PM", "6:30 PM",
];

/// Decides which candidate slots are bookable on a given date. The policy is
/// a pure function of (weekday, slot index); it never validates date bounds —
/// keeping past dates unselectable is the caller's precondition.
///
/// Implementations that consult persisted appointments can be swapped in
/// without touching the state machine.
pub trait AvailabilityPolicy {
    fn is_available(&self, date: NaiveDate, slot_index: usize) -> bool;

    /// The subsequence of `candidates` not excluded by the policy, in the
    /// original candidate order.
    fn available_slots<'a>(&self, date: NaiveDate, candidates: &'a [&'a str]) -> Vec<&'a str> {
        candidates
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_available(date, *index))
            .map(|(_, slot)| *slot)
            .collect()
    }
}

/// The default simulated schedule. Weekends thin the day out more aggressively
/// than weekdays; Sundays only keep a late-morning/midday band.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayPatternPolicy;

impl AvailabilityPolicy for DayPatternPolicy {
    fn is_available(&self, date: NaiveDate, index: usize) -> bool {
        match date.weekday() {
            Weekday::Sun => !(index < 2 || index > 10 || index % 3 == 0),
            Weekday::Sat => index % 4 != 0,
            _ => index % 5 != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-06-10 is a Monday, 2024-06-15 a Saturday, 2024-06-16 a Sunday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 16).unwrap()
    }

    #[test]
    fn weekday_excludes_every_fifth_slot() {
        let policy = DayPatternPolicy;
        assert!(!policy.is_available(monday(), 0));
        assert!(policy.is_available(monday(), 1));

        let slots = policy.available_slots(monday(), &BUSINESS_DAY_SLOTS);
        assert!(!slots.contains(&"9:00 AM"));
        assert!(slots.contains(&"9:30 AM"));
        assert_eq!(slots.len(), 16);
    }

    #[test]
    fn sunday_keeps_a_narrow_midday_band() {
        let policy = DayPatternPolicy;
        assert!(!policy.is_available(sunday(), 0));
        assert!(!policy.is_available(sunday(), 1));
        assert!(!policy.is_available(sunday(), 3));
        assert!(policy.is_available(sunday(), 4));
        assert!(!policy.is_available(sunday(), 11));

        let slots = policy.available_slots(sunday(), &BUSINESS_DAY_SLOTS);
        assert_eq!(
            slots,
            vec!["10:00 AM", "11:00 AM", "11:30 AM", "12:30 PM", "1:00 PM", "2:00 PM"]
        );
    }

    #[test]
    fn saturday_excludes_every_fourth_slot() {
        let policy = DayPatternPolicy;
        let slots = policy.available_slots(saturday(), &BUSINESS_DAY_SLOTS);
        assert!(!slots.contains(&"9:00 AM"));
        assert!(!slots.contains(&"11:00 AM"));
        assert!(slots.contains(&"2:00 PM"));
        assert_eq!(slots.len(), 15);
    }

    #[test]
    fn candidate_order_is_preserved() {
        let policy = DayPatternPolicy;
        let slots = policy.available_slots(monday(), &BUSINESS_DAY_SLOTS);
        let mut indices = slots
            .iter()
            .map(|slot| BUSINESS_DAY_SLOTS.iter().position(|c| c == slot).unwrap());
        let mut previous = indices.next().unwrap();
        for index in indices {
            assert!(index > previous);
            previous = index;
        }
    }
}
