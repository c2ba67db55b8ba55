//! Extremum scan over timestamped samples

use crate::WxQueryError;
use std::fmt;
use std::str::FromStr;

/// Which extremum a query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Max,
    Min,
}

impl Limit {
    /// Whether `candidate` replaces `best`. Strict, so ties keep the earlier sample.
    #[must_use]
    pub fn improves(self, candidate: f64, best: f64) -> bool {
        match self {
            Limit::Max => candidate > best,
            Limit::Min => candidate < best,
        }
    }
}

impl FromStr for Limit {
    type Err = WxQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MAX" => Ok(Limit::Max),
            "MIN" => Ok(Limit::Min),
            other => Err(WxQueryError::validation(format!(
                "Unknown limit '{other}', expected MAX or MIN"
            ))),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Max => f.write_str("MAX"),
            Limit::Min => f.write_str("MIN"),
        }
    }
}

/// The winning sample of a scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum<T> {
    pub value: f64,
    pub timestamp: T,
}

/// Scan `samples` left to right and keep the best one for `limit`.
///
/// Returns `None` for an empty sequence.
pub fn reduce<T, I>(samples: I, limit: Limit) -> Option<Extremum<T>>
where
    I: IntoIterator<Item = (f64, T)>,
{
    samples
        .into_iter()
        .fold(None, |best: Option<Extremum<T>>, (value, timestamp)| match best {
            Some(current) if !limit.improves(value, current.value) => Some(current),
            _ => Some(Extremum { value, timestamp }),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_empty_sequence_has_no_extremum() {
        let samples: Vec<(f64, u32)> = Vec::new();
        assert!(reduce(samples.clone(), Limit::Max).is_none());
        assert!(reduce(samples, Limit::Min).is_none());
    }

    #[rstest]
    #[case(Limit::Max, 9.5, 'c')]
    #[case(Limit::Min, -3.0, 'b')]
    fn test_picks_extremum_with_its_timestamp(
        #[case] limit: Limit,
        #[case] value: f64,
        #[case] timestamp: char,
    ) {
        let samples = vec![(1.0, 'a'), (-3.0, 'b'), (9.5, 'c'), (4.0, 'd')];
        let best = reduce(samples, limit).unwrap();
        assert_eq!(best, Extremum { value, timestamp });
    }

    #[rstest]
    #[case(Limit::Max)]
    #[case(Limit::Min)]
    fn test_ties_keep_first_sample(#[case] limit: Limit) {
        let best = reduce(vec![(5.0, "t1"), (5.0, "t2")], limit).unwrap();
        assert_eq!(best.timestamp, "t1");
    }

    #[test]
    fn test_result_bounds_every_sample() {
        let values = [12.0, 3.5, 77.25, -8.0, 77.25, 0.0, 41.0];
        let samples = || values.iter().copied().zip(0..);

        let max = reduce(samples(), Limit::Max).unwrap();
        let min = reduce(samples(), Limit::Min).unwrap();

        assert!(values.iter().all(|v| max.value >= *v));
        assert!(values.iter().all(|v| min.value <= *v));
        assert_eq!(max.timestamp, 2);
        assert_eq!(min.timestamp, 3);
    }

    #[test]
    fn test_single_sample() {
        let best = reduce(vec![(42.0, ())], Limit::Min).unwrap();
        assert_eq!(best.value, 42.0);
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!("MAX".parse::<Limit>().unwrap(), Limit::Max);
        assert_eq!("MIN".parse::<Limit>().unwrap(), Limit::Min);
        assert!("max".parse::<Limit>().is_err());
    }
}
