//! Parsing of the line-oriented query script read from stdin
//!
//! ```text
//! TARGET NOMINATIM <location> | TARGET FILE <path>
//! WEATHER NWS                 | WEATHER FILE <path>
//! <query>*
//! NO MORE QUERIES
//! REVERSE NOMINATIM           | REVERSE FILE <path>
//! ```

use crate::conversion::TemperatureScale;
use crate::extremum::Limit;
use crate::metrics::Metric;
use crate::{Result, WxQueryError};
use std::fmt;
use std::io::BufRead;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// Line that ends the query list
pub const END_OF_QUERIES: &str = "NO MORE QUERIES";

/// Where the target location comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetChoice {
    /// Free-text search against Nominatim
    Nominatim(String),
    /// Saved forward geocoding results
    File(PathBuf),
}

/// Where the forecast comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherChoice {
    Nws,
    File(PathBuf),
}

/// Where the forecast location's address comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReverseChoice {
    Nominatim,
    File(PathBuf),
}

/// One extremum query, e.g. `TEMPERATURE AIR F 12 MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub metric: Metric,
    /// Requested window length in hours
    pub hours: usize,
    pub limit: Limit,
}

impl FromStr for Query {
    type Err = WxQueryError;

    fn from_str(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let (metric, rest) = match tokens.as_slice() {
            ["TEMPERATURE", kind, scale, rest @ ..] => {
                let scale: TemperatureScale = scale.parse()?;
                let metric = match *kind {
                    "AIR" => Metric::AirTemperature(scale),
                    "FEELS" => Metric::FeelsLike(scale),
                    other => {
                        return Err(WxQueryError::validation(format!(
                            "Unknown temperature kind '{other}' in '{line}'"
                        )));
                    }
                };
                (metric, rest)
            }
            ["HUMIDITY", rest @ ..] => (Metric::Humidity, rest),
            ["WIND", rest @ ..] => (Metric::WindSpeed, rest),
            ["PRECIPITATION", rest @ ..] => (Metric::Precipitation, rest),
            _ => {
                return Err(WxQueryError::validation(format!(
                    "Unrecognized query '{line}'"
                )));
            }
        };

        let [hours, limit] = rest else {
            return Err(WxQueryError::validation(format!(
                "Query '{line}' needs an hour count and MAX or MIN"
            )));
        };

        let hours = hours.parse().map_err(|_| {
            WxQueryError::validation(format!("Invalid hour count '{hours}' in '{line}'"))
        })?;

        Ok(Query {
            metric,
            hours,
            limit: limit.parse()?,
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.metric, self.hours, self.limit)
    }
}

/// Everything the query script asks for
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub target: TargetChoice,
    pub weather: WeatherChoice,
    pub queries: Vec<Query>,
    pub reverse: ReverseChoice,
}

impl QueryPlan {
    /// Read a script from `reader`, stopping after the `REVERSE` line
    pub fn read(reader: impl BufRead) -> Result<Self> {
        let mut lines = reader.lines();
        let mut next_line = |expected: &str| -> Result<String> {
            match lines.next() {
                Some(line) => Ok(line?),
                None => Err(WxQueryError::validation(format!(
                    "Input ended before the {expected} line"
                ))),
            }
        };

        let target = parse_target(&next_line("TARGET")?)?;
        let weather = parse_weather(&next_line("WEATHER")?)?;

        let mut queries = Vec::new();
        loop {
            let line = next_line(END_OF_QUERIES)?;
            if line.trim_end() == END_OF_QUERIES {
                break;
            }
            queries.push(line.parse()?);
        }

        let reverse = parse_reverse(&next_line("REVERSE")?)?;

        let plan = QueryPlan {
            target,
            weather,
            queries,
            reverse,
        };
        debug!("Parsed query plan: {:?}", plan);
        Ok(plan)
    }
}

/// Split `<KEYWORD> <SOURCE> [argument]`, keeping spaces inside the argument
fn split_choice<'a>(line: &'a str, keyword: &str) -> Result<(&'a str, Option<&'a str>)> {
    let line = line.trim_end();
    let mut parts = line.splitn(3, ' ');

    if parts.next() != Some(keyword) {
        return Err(WxQueryError::validation(format!(
            "Expected a {keyword} line, got '{line}'"
        )));
    }
    let source = parts.next().unwrap_or_default();
    let argument = parts.next().filter(|argument| !argument.trim().is_empty());

    Ok((source, argument))
}

fn required<'a>(argument: Option<&'a str>, line: &str) -> Result<&'a str> {
    argument.ok_or_else(|| WxQueryError::validation(format!("Missing argument in '{line}'")))
}

fn parse_target(line: &str) -> Result<TargetChoice> {
    match split_choice(line, "TARGET")? {
        ("NOMINATIM", argument) => Ok(TargetChoice::Nominatim(
            required(argument, line)?.to_string(),
        )),
        ("FILE", argument) => Ok(TargetChoice::File(required(argument, line)?.into())),
        _ => Err(WxQueryError::validation(format!(
            "Unknown target source in '{line}'"
        ))),
    }
}

fn parse_weather(line: &str) -> Result<WeatherChoice> {
    match split_choice(line, "WEATHER")? {
        ("NWS", None) => Ok(WeatherChoice::Nws),
        ("FILE", argument) => Ok(WeatherChoice::File(required(argument, line)?.into())),
        _ => Err(WxQueryError::validation(format!(
            "Unknown weather source in '{line}'"
        ))),
    }
}

fn parse_reverse(line: &str) -> Result<ReverseChoice> {
    match split_choice(line, "REVERSE")? {
        ("NOMINATIM", None) => Ok(ReverseChoice::Nominatim),
        ("FILE", argument) => Ok(ReverseChoice::File(required(argument, line)?.into())),
        _ => Err(WxQueryError::validation(format!(
            "Unknown reverse geocoding source in '{line}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn read(script: &str) -> Result<QueryPlan> {
        QueryPlan::read(Cursor::new(script))
    }

    #[test]
    fn test_read_full_plan() {
        let plan = read(
            "TARGET NOMINATIM Bren Events Center, Irvine, CA\n\
             WEATHER NWS\n\
             TEMPERATURE AIR F 12 MAX\n\
             HUMIDITY 24 MIN\n\
             NO MORE QUERIES\n\
             REVERSE NOMINATIM\n",
        )
        .unwrap();

        assert_eq!(
            plan.target,
            TargetChoice::Nominatim("Bren Events Center, Irvine, CA".to_string())
        );
        assert_eq!(plan.weather, WeatherChoice::Nws);
        assert_eq!(plan.reverse, ReverseChoice::Nominatim);
        assert_eq!(plan.queries.len(), 2);
        assert_eq!(
            plan.queries[0],
            Query {
                metric: Metric::AirTemperature(TemperatureScale::Fahrenheit),
                hours: 12,
                limit: Limit::Max,
            }
        );
    }

    #[test]
    fn test_file_paths_keep_spaces() {
        let plan = read(
            "TARGET FILE my data/target.json\n\
             WEATHER FILE my data/forecast.json\n\
             NO MORE QUERIES\n\
             REVERSE FILE my data/reverse.json",
        )
        .unwrap();

        assert_eq!(plan.target, TargetChoice::File("my data/target.json".into()));
        assert_eq!(plan.weather, WeatherChoice::File("my data/forecast.json".into()));
        assert_eq!(plan.reverse, ReverseChoice::File("my data/reverse.json".into()));
        assert!(plan.queries.is_empty());
    }

    #[rstest]
    #[case("TEMPERATURE FEELS C 5 MIN", Metric::FeelsLike(TemperatureScale::Celsius), 5, Limit::Min)]
    #[case("HUMIDITY 10 MAX", Metric::Humidity, 10, Limit::Max)]
    #[case("WIND 3 MIN", Metric::WindSpeed, 3, Limit::Min)]
    #[case("PRECIPITATION 48 MAX", Metric::Precipitation, 48, Limit::Max)]
    fn test_parse_query(
        #[case] line: &str,
        #[case] metric: Metric,
        #[case] hours: usize,
        #[case] limit: Limit,
    ) {
        let query: Query = line.parse().unwrap();
        assert_eq!(query, Query { metric, hours, limit });
        assert_eq!(query.to_string(), line);
    }

    #[rstest]
    #[case("TEMPERATURE WET F 5 MAX")]
    #[case("TEMPERATURE AIR K 5 MAX")]
    #[case("HUMIDITY ten MAX")]
    #[case("WIND -3 MAX")]
    #[case("WIND 3 MEDIAN")]
    #[case("WIND 3")]
    #[case("SNOW 3 MAX")]
    #[case("")]
    fn test_invalid_query(#[case] line: &str) {
        assert!(matches!(
            line.parse::<Query>(),
            Err(WxQueryError::Validation { .. })
        ));
    }

    #[test]
    fn test_missing_terminator() {
        let err = read("TARGET FILE t.json\nWEATHER NWS\nWIND 3 MAX\n").unwrap_err();
        assert!(matches!(err, WxQueryError::Validation { .. }));
        assert!(err.to_string().contains(END_OF_QUERIES));
    }

    #[rstest]
    #[case("WEATHER NWS\n")]
    #[case("TARGET NOMINATIM\nWEATHER NWS\nNO MORE QUERIES\nREVERSE NOMINATIM\n")]
    #[case("TARGET FILE t.json\nWEATHER OPENMETEO\nNO MORE QUERIES\nREVERSE NOMINATIM\n")]
    #[case("TARGET FILE t.json\nWEATHER NWS\nNO MORE QUERIES\nREVERSE FILE\n")]
    #[case("TARGET FILE t.json\nWEATHER NWS\nNO MORE QUERIES\n")]
    fn test_invalid_source_lines(#[case] script: &str) {
        assert!(matches!(read(script), Err(WxQueryError::Validation { .. })));
    }

    #[test]
    fn test_crlf_line_endings() {
        let plan = read(
            "TARGET FILE t.json\r\nWEATHER NWS\r\nWIND 3 MAX\r\nNO MORE QUERIES\r\nREVERSE NOMINATIM\r\n",
        )
        .unwrap();
        assert_eq!(plan.target, TargetChoice::File("t.json".into()));
        assert_eq!(plan.queries.len(), 1);
    }
}
