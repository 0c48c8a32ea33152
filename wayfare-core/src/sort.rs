use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::trip::{SavedTrip, Trip};

/// Sort preference accepted by search and listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Ascending duration.
    Fastest,
    /// Ascending cost.
    Cheapest,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Fastest => "fastest",
            SortBy::Cheapest => "cheapest",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortBy {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fastest" => Ok(SortBy::Fastest),
            "cheapest" => Ok(SortBy::Cheapest),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// Anything that carries a cost and a duration can be ranked.
pub trait Rankable {
    fn cost(&self) -> f64;
    fn duration(&self) -> f64;
}

impl Rankable for Trip {
    fn cost(&self) -> f64 {
        self.cost
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}

impl Rankable for SavedTrip {
    fn cost(&self) -> f64 {
        self.cost
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}

/// Orders trips by the given key. `None` keeps the incoming order.
///
/// The sort is stable, so trips with equal keys stay in their original
/// relative order.
pub fn sort_trips<T: Rankable>(mut trips: Vec<T>, sort_by: Option<SortBy>) -> Vec<T> {
    match sort_by {
        Some(SortBy::Fastest) => trips.sort_by(|a, b| a.duration().total_cmp(&b.duration())),
        Some(SortBy::Cheapest) => trips.sort_by(|a, b| a.cost().total_cmp(&b.cost())),
        None => {}
    }
    trips
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Leg {
        tag: &'static str,
        duration: f64,
        cost: f64,
    }

    impl Rankable for Leg {
        fn cost(&self) -> f64 {
            self.cost
        }

        fn duration(&self) -> f64 {
            self.duration
        }
    }

    fn leg(tag: &'static str, duration: f64, cost: f64) -> Leg {
        Leg { tag, duration, cost }
    }

    fn sample() -> Vec<Leg> {
        vec![leg("a", 3.0, 20.0), leg("b", 1.0, 90.0), leg("c", 2.0, 50.0)]
    }

    #[test]
    fn test_fastest_orders_by_duration() {
        let sorted = sort_trips(sample(), Some(SortBy::Fastest));
        let durations: Vec<f64> = sorted.iter().map(|l| l.duration).collect();
        assert_eq!(durations, vec![1.0, 2.0, 3.0]);
        assert_eq!(sorted[0].cost, 90.0);
    }

    #[test]
    fn test_cheapest_orders_by_cost() {
        let sorted = sort_trips(sample(), Some(SortBy::Cheapest));
        let costs: Vec<f64> = sorted.iter().map(|l| l.cost).collect();
        assert_eq!(costs, vec![20.0, 50.0, 90.0]);
    }

    #[test]
    fn test_no_key_keeps_order() {
        assert_eq!(sort_trips(sample(), None), sample());
    }

    #[test]
    fn test_ties_keep_relative_order() {
        let legs = vec![
            leg("first", 2.0, 10.0),
            leg("second", 1.0, 10.0),
            leg("third", 2.0, 5.0),
        ];

        let fastest: Vec<&str> = sort_trips(legs.clone(), Some(SortBy::Fastest))
            .iter()
            .map(|l| l.tag)
            .collect();
        assert_eq!(fastest, vec!["second", "first", "third"]);

        let cheapest: Vec<&str> = sort_trips(legs, Some(SortBy::Cheapest))
            .iter()
            .map(|l| l.tag)
            .collect();
        assert_eq!(cheapest, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let once = sort_trips(sample(), Some(SortBy::Cheapest));
        let twice = sort_trips(once.clone(), Some(SortBy::Cheapest));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        let sorted: Vec<Leg> = sort_trips(Vec::new(), Some(SortBy::Fastest));
        assert!(sorted.is_empty());
    }

    #[test]
    fn test_parse_sort_keys() {
        assert_eq!("fastest".parse::<SortBy>().unwrap(), SortBy::Fastest);
        assert_eq!("cheapest".parse::<SortBy>().unwrap(), SortBy::Cheapest);
        assert!("Fastest".parse::<SortBy>().is_err());
        assert!("slowest".parse::<SortBy>().is_err());
    }
}
