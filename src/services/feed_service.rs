use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::api::neows::{FeedResponse, NeoObject, NeoWsClient};
use crate::models::NeoRecord;
use crate::utils::{NeoError, TimeScale};

/// Format of `close_approach_date_full`, e.g. `2023-Oct-05 12:00`
const CLOSE_APPROACH_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Headline numbers for a fetched day
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSummary {
    pub count: usize,
    pub closest_name: String,
    pub closest_miles: f64,
    pub largest_name: String,
    pub largest_miles: f64,
}

/// Fetch today's close approaches (local calendar date)
pub async fn fetch_today(
    client: &NeoWsClient,
    time_scale: TimeScale,
) -> Result<(NaiveDate, Vec<NeoRecord>), NeoError> {
    let today = Local::now().date_naive();
    let records = fetch_day(client, today, time_scale).await?;
    Ok((today, records))
}

/// Fetch the close approaches for a single day
pub async fn fetch_day(
    client: &NeoWsClient,
    date: NaiveDate,
    time_scale: TimeScale,
) -> Result<Vec<NeoRecord>, NeoError> {
    info!(
        "Fetching near-Earth objects for {} from {} ({} time)",
        date,
        client.base_url(),
        time_scale
    );
    let feed = client.get_feed(date, date).await?;
    records_from_feed(feed, date, time_scale)
}

/// Turn a feed body into ordered, validated records
pub fn records_from_feed(
    feed: FeedResponse,
    date: NaiveDate,
    time_scale: TimeScale,
) -> Result<Vec<NeoRecord>, NeoError> {
    debug!("Feed reports {:?} objects in total", feed.element_count);
    let mut neos = feed
        .near_earth_objects
        .ok_or_else(|| NeoError::FeedMalformed("response has no near_earth_objects".to_string()))?;

    if neos.is_empty() {
        return Err(NeoError::FeedMalformed(
            "near_earth_objects mapping is empty".to_string(),
        ));
    }

    // The feed keys by date even though only one date was requested
    let requested = date.format("%Y-%m-%d").to_string();
    let objects = match neos.remove(&requested) {
        Some(objects) => objects,
        None => {
            let (key, objects) = neos
                .into_iter()
                .next()
                .ok_or_else(|| NeoError::FeedMalformed("near_earth_objects mapping is empty".to_string()))?;
            warn!("Feed has no entry for {}, using {} instead", requested, key);
            objects
        }
    };

    debug!("Feed returned {} objects for {}", objects.len(), requested);

    objects
        .iter()
        .map(|obj| record_from_object(obj, time_scale))
        .collect()
}

/// Extract one record from the first close-approach event of an object
pub fn record_from_object(obj: &NeoObject, time_scale: TimeScale) -> Result<NeoRecord, NeoError> {
    let approach = obj.close_approach_data.first().ok_or_else(|| {
        NeoError::FeedMalformed(format!("{} has no close_approach_data", obj.name))
    })?;

    let raw_time = approach.close_approach_date_full.as_deref().ok_or_else(|| {
        NeoError::FeedMalformed(format!("{} has no close_approach_date_full", obj.name))
    })?;
    let close_approach_time = time_scale.normalize(parse_close_approach_time(raw_time)?);

    let miss_distance_miles: f64 = approach.miss_distance.miles.trim().parse().map_err(|_| {
        NeoError::ParseError(format!(
            "Invalid miss distance for {}: '{}'",
            obj.name, approach.miss_distance.miles
        ))
    })?;

    NeoRecord::new(
        obj.name.clone(),
        close_approach_time,
        miss_distance_miles,
        obj.estimated_diameter.miles.estimated_diameter_max,
        obj.nasa_jpl_url.clone(),
    )
}

/// Parse the feed's close-approach timestamp (dynamical time, minute precision)
pub fn parse_close_approach_time(raw: &str) -> Result<NaiveDateTime, NeoError> {
    NaiveDateTime::parse_from_str(raw.trim(), CLOSE_APPROACH_FORMAT)
        .map_err(|e| NeoError::ParseError(format!("Invalid close-approach time '{}': {}", raw, e)))
}

/// Closest and largest objects of the day, `None` when there are none
pub fn summarize(records: &[NeoRecord]) -> Option<FeedSummary> {
    let closest = records
        .iter()
        .min_by(|a, b| a.miss_distance_miles().total_cmp(&b.miss_distance_miles()))?;
    let largest = records
        .iter()
        .max_by(|a, b| a.diameter_miles().total_cmp(&b.diameter_miles()))?;

    Some(FeedSummary {
        count: records.len(),
        closest_name: closest.name().to_string(),
        closest_miles: closest.miss_distance_miles(),
        largest_name: largest.name().to_string(),
        largest_miles: largest.diameter_miles(),
    })
}
