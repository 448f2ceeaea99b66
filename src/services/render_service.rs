use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::models::{PlotData, Rgb};
use crate::utils::{escape_html, NeoError};

pub const DEFAULT_WIDTH: u32 = 1250;
pub const DEFAULT_HEIGHT: u32 = 650;
pub const DEFAULT_OUTPUT: &str = "neos_today.html";
pub const DOCUMENT_TITLE: &str = "NEOs Demo";

const FILL_ALPHA: f64 = 0.6;
const LABEL_FONT_SIZE: u32 = 11;
const NOTE_FONT_SIZE: u32 = 12;

/// Clickable circle laid over the rendered chart, in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub cx: i32,
    pub cy: i32,
    pub r: u32,
    pub color: Rgb,
    pub label: String,
    pub url: String,
}

/// Draw the chart as SVG and report where each circle landed
pub fn render_chart_svg(
    plot: &PlotData,
    width: u32,
    height: u32,
) -> Result<(String, Vec<Hotspot>), NeoError> {
    let mut svg = String::new();
    let mut hotspots = Vec::with_capacity(plot.points.len());

    {
        let backend = SVGBackend::with_string(&mut svg, (width, height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| NeoError::RenderError(format!("Failed to fill canvas: {}", e)))?;

        let (x_min, x_max) = x_bounds(plot);
        let y_max = y_upper(plot);

        let mut chart = ChartBuilder::on(&root)
            .caption(&plot.title, ("sans-serif", 24).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(|e| NeoError::RenderError(format!("Failed to build chart: {}", e)))?;

        chart
            .configure_mesh()
            .x_desc("Hours After Midnight")
            .y_desc("Miles From Earth")
            .x_label_formatter(&|h| format_hours(*h))
            .y_label_formatter(&|miles| format!("{:.0}", miles))
            .draw()
            .map_err(|e| NeoError::RenderError(format!("Failed to draw mesh: {}", e)))?;

        // Radii are in x-axis units, so measure them through the x mapping
        for point in &plot.points {
            let (cx, cy) = chart.backend_coord(&(point.x_hours(), point.y));
            let (edge, _) = chart.backend_coord(&(point.x_hours() + point.radius_hours(), point.y));
            hotspots.push(Hotspot {
                cx,
                cy,
                r: (edge - cx).unsigned_abs().max(1),
                color: point.color,
                label: point.label.clone(),
                url: point.url.clone(),
            });
        }

        chart
            .draw_series(plot.points.iter().zip(hotspots.iter()).map(|(point, spot)| {
                let rgb = RGBColor(point.color.0, point.color.1, point.color.2);
                Circle::new((point.x_hours(), point.y), spot.r, rgb.mix(FILL_ALPHA).filled())
            }))
            .map_err(|e| NeoError::RenderError(format!("Failed to draw points: {}", e)))?;

        chart
            .draw_series(plot.points.iter().map(|point| {
                Text::new(
                    point.label.clone(),
                    (point.x_hours(), point.y),
                    ("sans-serif", LABEL_FONT_SIZE).into_font(),
                )
            }))
            .map_err(|e| NeoError::RenderError(format!("Failed to draw labels: {}", e)))?;

        let notes_y = height as i32 - 110;
        draw_note(&root, &plot.citation, (width as i32 - 260, notes_y))?;
        if let Some(annotation) = &plot.annotation {
            draw_note(&root, annotation, (130, notes_y))?;
        }

        root.present()
            .map_err(|e| NeoError::RenderError(format!("Failed to render chart: {}", e)))?;
    }

    debug!("Rendered {} bytes of SVG with {} hotspots", svg.len(), hotspots.len());
    Ok((svg, hotspots))
}

/// Drag to pan, wheel to zoom, buttons to step or reset. Only the
/// `viewBox` of `#neo-chart` changes, so the chart and its links move together.
const VIEWER_SCRIPT: &str = r#"(function () {
  var svg = document.getElementById("neo-chart");
  var base = svg.viewBox.baseVal;
  var home = { x: base.x, y: base.y, w: base.width, h: base.height };
  var view = { x: home.x, y: home.y, w: home.w, h: home.h };
  var drag = null;
  var moved = false;

  function apply() {
    svg.setAttribute("viewBox", view.x + " " + view.y + " " + view.w + " " + view.h);
  }

  function toChart(evt) {
    var rect = svg.getBoundingClientRect();
    return {
      x: view.x + (evt.clientX - rect.left) / rect.width * view.w,
      y: view.y + (evt.clientY - rect.top) / rect.height * view.h
    };
  }

  function zoom(factor, cx, cy) {
    view.x = cx - (cx - view.x) * factor;
    view.y = cy - (cy - view.y) * factor;
    view.w *= factor;
    view.h *= factor;
    apply();
  }

  svg.addEventListener("wheel", function (evt) {
    evt.preventDefault();
    var p = toChart(evt);
    zoom(evt.deltaY < 0 ? 0.8 : 1.25, p.x, p.y);
  }, { passive: false });

  svg.addEventListener("mousedown", function (evt) {
    if (evt.button !== 0) return;
    drag = { sx: evt.clientX, sy: evt.clientY, x: view.x, y: view.y };
    moved = false;
    svg.classList.add("panning");
    evt.preventDefault();
  });

  window.addEventListener("mousemove", function (evt) {
    if (!drag) return;
    var rect = svg.getBoundingClientRect();
    var dx = evt.clientX - drag.sx;
    var dy = evt.clientY - drag.sy;
    if (Math.abs(dx) + Math.abs(dy) > 3) moved = true;
    view.x = drag.x - dx / rect.width * view.w;
    view.y = drag.y - dy / rect.height * view.h;
    apply();
  });

  window.addEventListener("mouseup", function () {
    drag = null;
    svg.classList.remove("panning");
  });

  // A drag that ends on a circle is not a click on its link
  svg.addEventListener("click", function (evt) {
    if (moved) {
      evt.preventDefault();
      evt.stopPropagation();
      moved = false;
    }
  }, true);

  document.getElementById("neo-zoom-in").addEventListener("click", function () {
    zoom(0.8, view.x + view.w / 2, view.y + view.h / 2);
  });
  document.getElementById("neo-zoom-out").addEventListener("click", function () {
    zoom(1.25, view.x + view.w / 2, view.y + view.h / 2);
  });
  document.getElementById("neo-reset").addEventListener("click", function () {
    view = { x: home.x, y: home.y, w: home.w, h: home.h };
    apply();
  });
})();
"#;

/// Build the standalone HTML page: the chart, a layer of links, and pan/zoom controls
pub fn render_document(plot: &PlotData, width: u32, height: u32) -> Result<String, NeoError> {
    let (svg, hotspots) = render_chart_svg(plot, width, height)?;

    let mut links = String::new();
    for spot in &hotspots {
        links.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\"><circle cx=\"{}\" cy=\"{}\" r=\"{}\" stroke=\"{}\"><title>{}</title></circle></a>\n",
            escape_html(&spot.url),
            spot.cx,
            spot.cy,
            spot.r,
            spot.color.hex(),
            escape_html(&spot.label)
        ));
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 16px; }}
.toolbar {{ margin-bottom: 8px; }}
.toolbar .hint {{ color: #666; font-size: 12px; margin-left: 8px; }}
#neo-chart {{ border: 1px solid #ddd; cursor: grab; user-select: none; }}
#neo-chart.panning {{ cursor: grabbing; }}
.hotspots circle {{ fill: transparent; stroke-width: 2; stroke-opacity: 0; pointer-events: all; cursor: pointer; }}
.hotspots circle:hover {{ stroke-opacity: 1; }}
</style>
</head>
<body>
<div class="toolbar">
<button type="button" id="neo-zoom-in">Zoom in</button>
<button type="button" id="neo-zoom-out">Zoom out</button>
<button type="button" id="neo-reset">Reset</button>
<span class="hint">Drag to pan, scroll to zoom, click a circle to open its page.</span>
</div>
<svg id="neo-chart" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{caption}">
{svg}
<g class="hotspots">
{links}</g>
</svg>
<script>
{script}</script>
</body>
</html>
"#,
        title = DOCUMENT_TITLE,
        caption = escape_html(&plot.title),
        w = width,
        h = height,
        svg = svg,
        links = links,
        script = VIEWER_SCRIPT,
    ))
}

/// Render and write the document, returning the path written
pub fn render_to_file(
    plot: &PlotData,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<PathBuf, NeoError> {
    let document = render_document(plot, width, height)?;
    fs::write(path, document)
        .map_err(|e| NeoError::RenderError(format!("Failed to write {}: {}", path.display(), e)))?;

    info!("Wrote chart to {}", path.display());
    Ok(path.to_path_buf())
}

/// Hand the written file to the platform's default browser
pub fn open_in_browser(path: &Path) -> Result<(), NeoError> {
    #[cfg(target_os = "macos")]
    let mut command = std::process::Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = std::process::Command::new("xdg-open");

    command
        .arg(path)
        .spawn()
        .map(|_| ())
        .map_err(|e| NeoError::RenderError(format!("Failed to open {}: {}", path.display(), e)))
}

/// Boxed note in screen coordinates
fn draw_note<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    (x, y): (i32, i32),
) -> Result<(), NeoError> {
    // Rough width, plenty for a sans-serif face at this size
    let w = (text.chars().count() as f64 * NOTE_FONT_SIZE as f64 * 0.55) as i32 + 12;
    let h = NOTE_FONT_SIZE as i32 + 10;

    area.draw(&Rectangle::new([(x, y), (x + w, y + h)], WHITE.mix(0.6).filled()))
        .map_err(|e| NeoError::RenderError(format!("Failed to draw note: {}", e)))?;
    area.draw(&Rectangle::new([(x, y), (x + w, y + h)], BLACK.mix(0.6).stroke_width(1)))
        .map_err(|e| NeoError::RenderError(format!("Failed to draw note: {}", e)))?;
    area.draw(&Text::new(
        text.to_string(),
        (x + 6, y + 5),
        ("sans-serif", NOTE_FONT_SIZE).into_font(),
    ))
    .map_err(|e| NeoError::RenderError(format!("Failed to draw note: {}", e)))?;

    Ok(())
}

/// A full day, stretched to fit anything plotted outside it
fn x_bounds(plot: &PlotData) -> (f64, f64) {
    plot.points.iter().fold((0.0, 24.0), |(lo, hi), p| {
        (lo.min(p.x_hours() - 1.0), hi.max(p.x_hours() + 1.0))
    })
}

fn y_upper(plot: &PlotData) -> f64 {
    let max = plot.points.iter().map(|p| p.y).fold(0.0_f64, f64::max);
    (max * 1.1).max(1.0)
}

/// `HH:MM` after midnight, negative before it
fn format_hours(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as i64;
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.abs();
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}
