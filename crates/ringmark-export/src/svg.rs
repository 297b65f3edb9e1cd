//! SVG scene renderer.
//!
//! Draws the drawing surface the way the player sees it, as an SVG
//! string built with the [`svg`] crate (document construction, XML
//! escaping and path data formatting). Layers, bottom to top:
//!
//! 1. white background
//! 2. grid (optional)
//! 3. translucent reference logo with a caption (only on an empty canvas)
//! 4. the player's stroke
//! 5. result overlay with score, message and session counters
//!
//! Optional [`SvgMetadata`] embeds `<title>`, `<desc>` and the scoring
//! configuration for reproducibility.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Description, Element, Group, Line, Path, Rectangle, Title};
use svg::node::{Node, Text, Value};

use ringmark_scoring::{DisplayExtent, DrawingGame, Evaluation, Point, Session, reference_logo};

/// Grid spacing in logical pixels.
const GRID_SPACING: f64 = 40.0;
const GRID_COLOR: &str = "#f0f0f0";
const FONT_FAMILY: &str = "system-ui, -apple-system, sans-serif";
/// Caption shown above the guide.
const GUIDE_CAPTION: &str = "Draw the logo";

/// Metadata to embed in the SVG document.
///
/// All fields are optional. Text values are XML-escaped automatically
/// by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    pub description: Option<&'a str>,

    /// Serialized scoring configuration, emitted inside `<metadata>`
    /// wrapped in a namespaced `<ringmark:config>` element.
    pub config_json: Option<&'a str>,
}

/// Everything visible on the drawing surface at one moment.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Surface size; also the SVG `viewBox`.
    pub display: DisplayExtent,
    /// The player's stroke, in progress or finished.
    pub stroke: &'a [Point],
    /// Draw the background grid.
    pub show_grid: bool,
    /// Draw the reference logo under the stroke.
    pub show_guide: bool,
    /// Result overlay, if a stroke has been scored.
    pub result: Option<&'a Evaluation>,
    /// Counters shown in the overlay.
    pub session: Session,
}

impl<'a> Scene<'a> {
    /// Snapshot the visible state of `game`.
    #[must_use]
    pub fn from_game(game: &'a DrawingGame, display: DisplayExtent) -> Self {
        Self {
            display,
            stroke: game.points(),
            show_grid: game.grid_visible(),
            show_guide: game.guide_visible(),
            result: game.result(),
            session: game.session(),
        }
    }
}

/// Build an SVG path `d` attribute string from a sequence of points.
///
/// Uses `M` for the first point and `L` for subsequent points.
/// Returns an empty string for fewer than 2 points.
///
/// # Examples
///
/// ```
/// use ringmark_scoring::Point;
/// use ringmark_export::build_path_data;
///
/// let d = build_path_data(&[Point::new(10.0, 20.0), Point::new(30.0, 40.0)]);
/// assert_eq!(d, "M10,20 L30,40");
/// ```
#[must_use]
pub fn build_path_data(points: &[Point]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    if rest.is_empty() {
        return String::new();
    }

    let mut data = Data::new().move_to((first.x, first.y));
    for p in rest {
        data = data.line_to((p.x, p.y));
    }
    String::from(Value::from(data))
}

/// Render `scene` as a standalone SVG document.
#[must_use]
pub fn render_scene(scene: &Scene<'_>, metadata: &SvgMetadata<'_>) -> String {
    let DisplayExtent { width, height } = scene.display;
    let mut doc = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, width, height));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }
    if let Some(config_json) = metadata.config_json {
        let mut config_el = Element::new("ringmark:config");
        config_el.assign("xmlns:ringmark", "https://github.com/ringmark/ringmark/ns/1");
        config_el.append(Text::new(config_json));
        let mut metadata_el = Element::new("metadata");
        metadata_el.append(config_el);
        doc = doc.add(metadata_el);
    }

    doc = doc.add(
        Rectangle::new()
            .set("id", "background")
            .set("width", width)
            .set("height", height)
            .set("fill", "#fff"),
    );

    if scene.show_grid {
        doc = doc.add(grid(scene.display));
    }
    if scene.show_guide {
        doc = doc.add(guide(scene.display));
    }

    let d = build_path_data(scene.stroke);
    if !d.is_empty() {
        doc = doc.add(stroke_path(d).set("id", "stroke").set("stroke", "#000"));
    }

    if let Some(result) = scene.result {
        doc = doc.add(overlay(scene.display, result, scene.session));
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

/// A round-capped 3px path with no fill.
fn stroke_path(d: String) -> Path {
    Path::new()
        .set("d", d)
        .set("fill", "none")
        .set("stroke-width", 3)
        .set("stroke-linejoin", "round")
        .set("stroke-linecap", "round")
}

fn grid(display: DisplayExtent) -> Group {
    let mut group = Group::new()
        .set("id", "grid")
        .set("stroke", GRID_COLOR)
        .set("stroke-width", 1);

    let mut x = 0.0;
    while x < display.width {
        group = group.add(
            Line::new()
                .set("x1", x)
                .set("y1", 0)
                .set("x2", x)
                .set("y2", display.height),
        );
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < display.height {
        group = group.add(
            Line::new()
                .set("x1", 0)
                .set("y1", y)
                .set("x2", display.width)
                .set("y2", y),
        );
        y += GRID_SPACING;
    }
    group
}

fn guide(display: DisplayExtent) -> Group {
    let logo = reference_logo(display);
    let center = display.center();
    // The logo spans 0.3 of the shorter side; the caption sits just above.
    let caption_y = 0.2f64.mul_add(-display.width.min(display.height), center.y);

    Group::new()
        .set("id", "guide")
        .add(
            stroke_path(build_path_data(logo.points()))
                .set("stroke", "#000")
                .set("opacity", 0.25),
        )
        .add(text(GUIDE_CAPTION, center.x, caption_y, 16, "normal", "#666"))
}

fn overlay(display: DisplayExtent, result: &Evaluation, session: Session) -> Group {
    let center = display.center();
    Group::new()
        .set("id", "result")
        .add(
            Rectangle::new()
                .set("width", display.width)
                .set("height", display.height)
                .set("fill", "#fff")
                .set("fill-opacity", 0.9),
        )
        .add(text(
            &format!("{}/100", result.score),
            center.x,
            center.y - 50.0,
            72,
            "bold",
            "#000",
        ))
        .add(text(
            &result.message,
            center.x,
            center.y + 30.0,
            24,
            "normal",
            "#000",
        ))
        .add(text(
            &format!(
                "Best score: {} | Attempts: {}",
                session.best_score, session.attempts
            ),
            center.x,
            center.y + 70.0,
            18,
            "normal",
            "#000",
        ))
}

/// Centered single-line `<text>`.
fn text(content: &str, x: f64, y: f64, size: u32, weight: &str, fill: &str) -> Element {
    let mut el = Element::new("text");
    el.assign("x", x);
    el.assign("y", y);
    el.assign("text-anchor", "middle");
    el.assign("dominant-baseline", "middle");
    el.assign("font-family", FONT_FAMILY);
    el.assign("font-size", size);
    el.assign("font-weight", weight);
    el.assign("fill", fill);
    el.append(Text::new(content));
    el
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ringmark_scoring::Feedback;

    fn display(width: f64, height: f64) -> DisplayExtent {
        DisplayExtent::new(width, height).unwrap()
    }

    fn empty_scene(width: f64, height: f64) -> Scene<'static> {
        Scene {
            display: display(width, height),
            stroke: &[],
            show_grid: false,
            show_guide: false,
            result: None,
            session: Session::default(),
        }
    }

    fn no_meta() -> SvgMetadata<'static> {
        SvgMetadata::default()
    }

    // --- build_path_data ---

    #[test]
    fn path_data_needs_two_points() {
        assert_eq!(build_path_data(&[]), "");
        assert_eq!(build_path_data(&[Point::new(1.0, 1.0)]), "");
    }

    #[test]
    fn path_data_three_points() {
        let d = build_path_data(&[
            Point::new(10.0, 15.0),
            Point::new(12.5, 18.0),
            Point::new(14.0, 20.0),
        ]);
        assert_eq!(d, "M10,15 L12.5,18 L14,20");
    }

    // --- Document structure ---

    #[test]
    fn viewbox_reflects_display() {
        let svg = render_scene(&empty_scene(800.0, 600.0), &no_meta());
        assert!(svg.contains(r#"width="800""#));
        assert!(svg.contains(r#"height="600""#));
        assert!(svg.contains(r#"viewBox="0 0 800 600""#));
    }

    #[test]
    fn svg_has_xml_declaration_and_namespace() {
        let svg = render_scene(&empty_scene(100.0, 100.0), &no_meta());
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn background_is_always_present() {
        let svg = render_scene(&empty_scene(100.0, 100.0), &no_meta());
        assert!(svg.contains(r#"id="background""#));
        assert!(!svg.contains(r#"id="grid""#));
        assert!(!svg.contains(r#"id="guide""#));
        assert!(!svg.contains(r#"id="stroke""#));
        assert!(!svg.contains(r#"id="result""#));
    }

    // --- Layers ---

    #[test]
    fn grid_lines_every_forty_pixels() {
        let scene = Scene {
            show_grid: true,
            ..empty_scene(120.0, 80.0)
        };
        let svg = render_scene(&scene, &no_meta());
        // x = 0, 40, 80 and y = 0, 40.
        assert_eq!(svg.matches("<line").count(), 5);
        assert!(svg.contains(GRID_COLOR));
    }

    #[test]
    fn guide_shows_reference_and_caption() {
        let scene = Scene {
            show_guide: true,
            ..empty_scene(600.0, 600.0)
        };
        let svg = render_scene(&scene, &no_meta());
        assert!(svg.contains(r#"id="guide""#));
        assert!(svg.contains(r#"opacity="0.25""#));
        assert!(svg.contains(GUIDE_CAPTION));
    }

    #[test]
    fn stroke_is_black_round_and_three_pixels() {
        let points = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        let scene = Scene {
            stroke: &points,
            ..empty_scene(100.0, 100.0)
        };
        let svg = render_scene(&scene, &no_meta());
        assert!(svg.contains(r#"d="M1,2 L3,4""#));
        assert!(svg.contains(r#"stroke-width="3""#));
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(svg.contains(r#"stroke-linejoin="round""#));
    }

    #[test]
    fn single_point_stroke_is_not_drawn() {
        let points = [Point::new(1.0, 2.0)];
        let scene = Scene {
            stroke: &points,
            ..empty_scene(100.0, 100.0)
        };
        assert!(!render_scene(&scene, &no_meta()).contains(r#"id="stroke""#));
    }

    #[test]
    fn overlay_shows_score_message_and_session() {
        let result = Evaluation::new(87, Feedback::Excellent);
        let scene = Scene {
            result: Some(&result),
            session: Session {
                best_score: 91,
                attempts: 4,
            },
            ..empty_scene(600.0, 600.0)
        };
        let svg = render_scene(&scene, &no_meta());
        assert!(svg.contains(r#"fill-opacity="0.9""#));
        assert!(svg.contains(">87/100<"));
        assert!(svg.contains("Excellent! Nearly perfect logo!"));
        assert!(svg.contains("Best score: 91 | Attempts: 4"));
        assert!(svg.contains(r#"font-size="72""#));
        assert!(svg.contains(r#"font-weight="bold""#));
    }

    #[test]
    fn message_with_plus_sign_is_escaped_safely() {
        let result = Evaluation::new(40, Feedback::GettingThere);
        let scene = Scene {
            result: Some(&result),
            ..empty_scene(600.0, 600.0)
        };
        let svg = render_scene(&scene, &no_meta());
        assert!(svg.contains("Strengthen ring + arrow!"));
    }

    #[test]
    fn layers_are_ordered() {
        let points = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        let result = Evaluation::new(10, Feedback::KeepTrying);
        let scene = Scene {
            display: display(600.0, 600.0),
            stroke: &points,
            show_grid: true,
            show_guide: true,
            result: Some(&result),
            session: Session::default(),
        };
        let svg = render_scene(&scene, &no_meta());
        let pos = |id: &str| svg.find(&format!(r#"id="{id}""#)).unwrap();
        assert!(pos("background") < pos("grid"));
        assert!(pos("grid") < pos("guide"));
        assert!(pos("guide") < pos("stroke"));
        assert!(pos("stroke") < pos("result"));
    }

    // --- Metadata ---

    #[test]
    fn title_and_desc_emitted_when_present() {
        let meta = SvgMetadata {
            title: Some("attempt-3"),
            description: Some("score 72"),
            ..SvgMetadata::default()
        };
        let svg = render_scene(&empty_scene(100.0, 100.0), &meta);
        assert!(svg.contains("<title>attempt-3</title>"));
        assert!(svg.contains("<desc>score 72</desc>"));
    }

    #[test]
    fn title_and_desc_omitted_when_none() {
        let svg = render_scene(&empty_scene(100.0, 100.0), &no_meta());
        assert!(!svg.contains("<title>"));
        assert!(!svg.contains("<desc>"));
        assert!(!svg.contains("<metadata>"));
    }

    #[test]
    fn special_characters_in_title_are_escaped() {
        let meta = SvgMetadata {
            title: Some("A <B> & C"),
            ..SvgMetadata::default()
        };
        let svg = render_scene(&empty_scene(100.0, 100.0), &meta);
        assert!(svg.contains("<title>A &lt;B&gt; &amp; C</title>"));
    }

    #[test]
    fn config_json_is_embedded_in_metadata() {
        let meta = SvgMetadata {
            config_json: Some(r#"{"min_points":15}"#),
            ..SvgMetadata::default()
        };
        let svg = render_scene(&empty_scene(100.0, 100.0), &meta);
        assert!(svg.contains("<metadata>"));
        assert!(svg.contains("<ringmark:config"));
        assert!(svg.contains("min_points"));
    }

    // --- Game snapshot ---

    #[test]
    fn fresh_game_shows_grid_and_guide_only() {
        let game = DrawingGame::default();
        let scene = Scene::from_game(&game, display(600.0, 600.0));
        assert!(scene.show_grid);
        assert!(scene.show_guide);
        assert!(scene.stroke.is_empty());
        assert!(scene.result.is_none());
    }
}
