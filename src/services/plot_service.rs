use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

use crate::models::{NeoRecord, PlotData, PlotPoint, Rgb};

/// Miles of diameter to x-axis milliseconds; keeps sub-mile objects visible
pub const SCALE_FACTOR: f64 = 1e7;

pub const MOON_LABEL: &str = "Moon";
pub const MOON_DIAMETER_MILES: f64 = 2158.8;
pub const MOON_DISTANCE_MILES: f64 = 238_900.0;
/// Arbitrary, the real Moon would cover the whole chart
pub const MOON_RADIUS: f64 = 1e6;
pub const MOON_HOURS_AFTER_MIDNIGHT: i64 = 4;
pub const MOON_COLOR: Rgb = Rgb(0x0E, 0xBF, 0xE9);
pub const MOON_URL: &str = "https://moon.nasa.gov/";

pub const CITATION: &str = "Data From NASA NeoW API";

/// Map records to chart points, append the Moon and build the captions
pub fn build_plot_points(records: &[NeoRecord], reference_date: NaiveDate) -> PlotData {
    let midnight = reference_date.and_time(chrono::NaiveTime::MIN);
    let range = distance_range(records);

    let mut points: Vec<PlotPoint> = records
        .iter()
        .map(|record| {
            let offset = record.close_approach_time() - midnight;
            PlotPoint {
                label: label_for(record.name(), record.diameter_miles()),
                x: Duration::seconds(offset.num_seconds()),
                y: record.miss_distance_miles(),
                radius: record.diameter_miles() * SCALE_FACTOR,
                color: range
                    .map(|(min, max)| distance_color(record.miss_distance_miles(), min, max))
                    .unwrap_or(Rgb::RED),
                url: record.reference_url().to_string(),
            }
        })
        .collect();

    points.push(moon_point());

    let annotation = scale_annotation(records);
    debug!(
        "Built {} plot points, annotation {}",
        points.len(),
        if annotation.is_some() { "present" } else { "omitted" }
    );

    PlotData {
        title: format!("Near Earth Objects Passing Earth On {}", reference_date.format("%Y-%m-%d")),
        annotation,
        citation: CITATION.to_string(),
        points,
    }
}

/// `<name> <diameter> M wide`
pub fn label_for(name: &str, diameter_miles: f64) -> String {
    format!("{} {:.2} M wide", name, diameter_miles)
}

/// Min and max miss distance over the real records
fn distance_range(records: &[NeoRecord]) -> Option<(f64, f64)> {
    let mut distances = records.iter().map(|r| r.miss_distance_miles());
    let first = distances.next()?;
    Some(distances.fold((first, first), |(min, max), d| (min.min(d), max.max(d))))
}

/// Red for the closest object, green for the farthest, a gradient in between.
///
/// The minimum test comes first, so equal distances (including a single
/// record) are all red.
pub fn distance_color(distance: f64, min_dist: f64, max_dist: f64) -> Rgb {
    if distance == min_dist {
        return Rgb::RED;
    }
    if distance == max_dist {
        return Rgb::GREEN;
    }

    let range = max_dist - min_dist;
    if range <= 0.0 {
        return Rgb::RED;
    }

    let perc = ((distance - min_dist) / range).clamp(0.0, 1.0);
    let num = (perc * 500.0).floor() as i64;
    if num > 255 {
        Rgb(0, (num - 255).min(255) as u8, 0)
    } else {
        Rgb((255 - num) as u8, 0, 0)
    }
}

/// How much larger the Moon is than the biggest object on the chart
pub fn scale_annotation(records: &[NeoRecord]) -> Option<String> {
    let max_size = records
        .iter()
        .map(|r| r.diameter_miles())
        .fold(0.0_f64, f64::max);

    if max_size <= 0.0 {
        warn!("No object with a positive diameter, omitting Moon scale note");
        return None;
    }

    Some(format!(
        "Moon diameter not to scale; it is {:.2}x larger than largest NEO on this plot.",
        MOON_DIAMETER_MILES / max_size
    ))
}

/// Fixed reference point for scale
pub fn moon_point() -> PlotPoint {
    PlotPoint {
        label: MOON_LABEL.to_string(),
        x: Duration::hours(MOON_HOURS_AFTER_MIDNIGHT),
        y: MOON_DISTANCE_MILES,
        radius: MOON_RADIUS,
        color: MOON_COLOR,
        url: MOON_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, 5).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn record(name: &str, miles: f64, diameter: f64) -> NeoRecord {
        NeoRecord::new(name, at(12, 0), miles, diameter, format!("https://jpl/{}", name)).unwrap()
    }

    #[test]
    fn test_single_known_object() {
        let records = vec![record("2023 XA", 1_000_000.0, 0.5)];
        let plot = build_plot_points(&records, day());

        assert_eq!(plot.points.len(), 2);
        let point = &plot.points[0];
        assert_eq!(point.label, "2023 XA 0.50 M wide");
        assert_eq!(point.radius, 0.5e7);
        assert_eq!(point.y, 1_000_000.0);
        assert_eq!(point.x, Duration::hours(12));
        assert_eq!(point.color, Rgb::RED);
        assert_eq!(point.url, "https://jpl/2023 XA");
    }

    #[test]
    fn test_length_is_input_plus_moon() {
        let records: Vec<NeoRecord> = (0..7)
            .map(|i| record(&format!("neo {}", i), 100_000.0 * (i + 1) as f64, 0.01))
            .collect();
        let plot = build_plot_points(&records, day());
        assert_eq!(plot.points.len(), records.len() + 1);
        assert_eq!(plot.points.last().unwrap(), &moon_point());
    }

    #[test]
    fn test_extremes_are_red_and_green() {
        let records = vec![
            record("mid", 500_000.0, 0.1),
            record("near", 100_000.0, 0.1),
            record("far", 900_000.0, 0.1),
        ];
        let plot = build_plot_points(&records, day());

        assert_eq!(plot.points[1].color, Rgb::RED);
        assert_eq!(plot.points[2].color, Rgb::GREEN);
        // perc 0.5 -> num 250 -> still in the red half
        assert_eq!(plot.points[0].color, Rgb(5, 0, 0));
        // The Moon is outside the range and keeps its own color
        assert_eq!(plot.points[3].color, MOON_COLOR);
    }

    #[test]
    fn test_gradient_halves() {
        assert_eq!(distance_color(16.0, 0.0, 128.0), Rgb(193, 0, 0));
        assert_eq!(distance_color(64.0, 0.0, 128.0), Rgb(5, 0, 0));
        assert_eq!(distance_color(96.0, 0.0, 128.0), Rgb(0, 120, 0));
        assert_eq!(distance_color(127.0, 0.0, 128.0), Rgb(0, 241, 0));
    }

    #[test]
    fn test_equal_distances_all_red() {
        let records = vec![
            record("a", 250_000.0, 0.1),
            record("b", 250_000.0, 0.2),
            record("c", 250_000.0, 0.3),
        ];
        let first = build_plot_points(&records, day());
        let second = build_plot_points(&records, day());

        for (a, b) in first.points.iter().zip(second.points.iter()).take(3) {
            assert_eq!(a.color, Rgb::RED);
            assert_eq!(a.color, b.color);
        }
    }

    #[test]
    fn test_ties_at_extremes() {
        let records = vec![
            record("near1", 1.0, 0.1),
            record("near2", 1.0, 0.1),
            record("far1", 9.0, 0.1),
            record("far2", 9.0, 0.1),
        ];
        let colors: Vec<Rgb> = build_plot_points(&records, day())
            .points
            .iter()
            .map(|p| p.color)
            .collect();
        assert_eq!(&colors[..4], &[Rgb::RED, Rgb::RED, Rgb::GREEN, Rgb::GREEN]);
    }

    #[test]
    fn test_radius_monotonic_in_diameter() {
        let diameters = [0.001, 0.01, 0.05, 0.3, 1.2];
        let records: Vec<NeoRecord> = diameters
            .iter()
            .map(|d| record("x", 1000.0, *d))
            .collect();
        let plot = build_plot_points(&records, day());

        for pair in plot.points[..diameters.len()].windows(2) {
            assert!(pair[1].radius > pair[0].radius);
        }
    }

    #[test]
    fn test_moon_invariant_except_annotation() {
        let small = build_plot_points(&[record("s", 10.0, 0.1)], day());
        let large = build_plot_points(&[record("l", 10.0, 2.0), record("m", 20.0, 0.4)], day());

        assert_eq!(small.points.last(), large.points.last());
        assert_eq!(
            small.annotation.as_deref(),
            Some("Moon diameter not to scale; it is 21588.00x larger than largest NEO on this plot.")
        );
        assert_eq!(
            large.annotation.as_deref(),
            Some("Moon diameter not to scale; it is 1079.40x larger than largest NEO on this plot.")
        );
    }

    #[test]
    fn test_empty_input_only_moon() {
        let plot = build_plot_points(&[], day());
        assert_eq!(plot.points, vec![moon_point()]);
        assert!(plot.annotation.is_none());
        assert_eq!(plot.title, "Near Earth Objects Passing Earth On 2023-10-05");
        assert_eq!(plot.citation, CITATION);
    }

    #[test]
    fn test_zero_diameter_suppresses_annotation() {
        let plot = build_plot_points(&[record("dust", 10.0, 0.0)], day());
        assert!(plot.annotation.is_none());
        assert_eq!(plot.points[0].radius, 0.0);
    }

    #[test]
    fn test_x_offset_drops_subseconds_and_crosses_midnight() {
        let precise = day().and_hms_milli_opt(1, 2, 3, 816).unwrap();
        let late = NeoRecord::new("late", precise, 1.0, 0.1, "u").unwrap();
        let before = NeoRecord::new(
            "before",
            day().pred_opt().unwrap().and_hms_opt(23, 59, 0).unwrap(),
            2.0,
            0.1,
            "u",
        )
        .unwrap();

        let plot = build_plot_points(&[late, before], day());
        assert_eq!(plot.points[0].x, Duration::seconds(3723));
        assert_eq!(plot.points[1].x, Duration::seconds(-60));
    }

    #[test]
    fn test_label_format() {
        assert_eq!(label_for("(2019 OK)", 0.08249), "(2019 OK) 0.08 M wide");
        assert_eq!(label_for("Big", 1.0), "Big 1.00 M wide");
    }
}
