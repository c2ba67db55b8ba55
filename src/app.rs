//! Runs a query script: fetch the three documents, answer every query and
//! print the report

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::geo;
use crate::metrics;
use crate::query::{QueryPlan, ReverseChoice, TargetChoice, WeatherChoice};
use crate::report::{Attributions, Report};
use crate::sources::{
    DataSource, ForecastSource, ForwardGeocodeSource, JsonFile, NominatimReverse, NominatimSearch,
    NwsForecast, ReverseGeocodeSource, Source,
};
use crate::{Result, WxQueryError};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// Read a script from `input` and write its report (or failure report) to `out`.
///
/// A document that cannot be fetched ends the run with the `FAILED` report,
/// which is not an error. Anything else is returned.
pub async fn run(input: impl BufRead, out: &mut impl Write, config: &AppConfig) -> Result<()> {
    let plan = QueryPlan::read(input)?;
    writeln!(out)?;

    match execute(&plan, config).await {
        Ok(report) => write!(out, "{report}")?,
        Err(err @ WxQueryError::Fetch { .. }) => {
            warn!("Stopping after fetch failure: {}", err);
            writeln!(out, "{}", err.user_message())?;
        }
        Err(err) => return Err(err),
    }

    out.flush()?;
    Ok(())
}

/// Fetch forward geocoding, forecast and reverse geocoding in that order and
/// answer the plan's queries.
#[instrument(skip_all, fields(queries = plan.queries.len()))]
pub async fn execute(plan: &QueryPlan, config: &AppConfig) -> Result<Report> {
    let client = ApiClient::new(&config.http)
        .map_err(|e| WxQueryError::api(format!("Failed to build HTTP client: {e:#}")))?;
    let mut attributions = Attributions::default();

    let forward: ForwardGeocodeSource = match &plan.target {
        TargetChoice::Nominatim(query) => Source::Api(NominatimSearch::new(
            client.clone(),
            &config.nominatim,
            query.clone(),
        )),
        TargetChoice::File(path) => Source::File(JsonFile::new(path.clone())),
    };
    attributions.forward_geocoding = forward.is_remote();
    let target = geo::first_geocode_point(&forward.fetch().await?)?;
    info!("Target location: {}", target);
    if !target.is_valid() {
        warn!("Target location {} is outside the valid coordinate range", target);
    }

    let weather: ForecastSource = match &plan.weather {
        WeatherChoice::Nws => Source::Api(NwsForecast::new(client.clone(), &config.nws, target)),
        WeatherChoice::File(path) => Source::File(JsonFile::new(path.clone())),
    };
    attributions.weather = weather.is_remote();
    let forecast = weather.fetch().await?;
    let forecast_point = geo::centroid_of(&forecast.polygon)?;
    info!(
        "Forecast area centroid: {} ({} periods)",
        forecast_point,
        forecast.available_periods()
    );

    let reverse: ReverseGeocodeSource = match &plan.reverse {
        ReverseChoice::Nominatim => Source::Api(NominatimReverse::new(
            client,
            &config.nominatim,
            forecast_point,
        )),
        ReverseChoice::File(path) => Source::File(JsonFile::new(path.clone())),
    };
    attributions.reverse_geocoding = reverse.is_remote();
    let address = geo::reverse_address(&reverse.fetch().await?)?;

    let results = plan
        .queries
        .iter()
        .map(|query| {
            debug!("Running query: {}", query);
            metrics::compute_extremum(query.metric, &forecast, query.hours, query.limit)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Report {
        target,
        forecast: forecast_point,
        address,
        results,
        attributions,
    })
}
