use svg::node::element::path::Data;
use svg::node::element::{Circle, Group as SvgGroup, Line, Path as SvgPath, Rectangle, Style, Text as TextEl};
use svg::Document;

use crate::bezier::BezierCurve;
use crate::clip::ClipRegion;
use crate::scene::{Element, Group, Scene};
use crate::types::PlanarPoint;

// Half-length of a directional tick mark, canvas units.
const TICK_HALF: f64 = 2.0;

fn mag2size(mag: f64) -> f64 {
    2.0 * (-mag / std::f64::consts::E).exp() + 0.1
}

fn path_data(curve: &BezierCurve) -> Data {
    let mut d = Data::new().move_to((curve[0].p.x, curve[0].p.y));
    for pair in curve.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        d = d.cubic_curve_to((
            prev.cp.x, prev.cp.y, next.cm.x, next.cm.y, next.p.x, next.p.y,
        ));
    }
    d
}

fn render_group(group: &Group, region: &ClipRegion) -> SvgGroup {
    let mut g = SvgGroup::new()
        .set("class", group.class.as_str())
        .set("id", group.id.as_str());
    for element in &group.elements {
        g = render_element(g, element, region);
    }
    g
}

fn render_element(g: SvgGroup, element: &Element, region: &ClipRegion) -> SvgGroup {
    match element {
        Element::Group(inner) => g.add(render_group(inner, region)),
        Element::Object { id, pos, mag } => {
            if !region.contains(*pos) {
                return g;
            }
            let radius = mag2size(*mag);
            g.add(
                Circle::new()
                    .set("id", id.as_str())
                    .set("cx", pos.x)
                    .set("cy", pos.y)
                    .set("r", radius)
                    .set("stroke-width", 0.2 * radius),
            )
        }
        Element::ProportionalObject { pos, radius, label } => {
            let g = g.add(
                Circle::new()
                    .set("class", "proportional")
                    .set("cx", pos.x)
                    .set("cy", pos.y)
                    .set("r", *radius),
            );
            g.add(
                TextEl::new(label.as_str())
                    .set("x", pos.x + radius + 1.0)
                    .set("y", pos.y),
            )
        }
        Element::DirectedObject { pos, dir } => g.add(
            Line::new()
                .set("x1", pos.x - dir.x * TICK_HALF)
                .set("y1", pos.y - dir.y * TICK_HALF)
                .set("x2", pos.x + dir.x * TICK_HALF)
                .set("y2", pos.y + dir.y * TICK_HALF),
        ),
        Element::Rect { start, size } => g.add(
            Rectangle::new()
                .set("x", start.x)
                .set("y", start.y)
                .set("width", size.x)
                .set("height", size.y),
        ),
        Element::Path(curve) => {
            if curve.len() < 2 {
                return g;
            }
            g.add(
                SvgPath::new()
                    .set("fill", "none")
                    .set("d", path_data(curve)),
            )
        }
        Element::Text { body, pos } => {
            g.add(TextEl::new(body.as_str()).set("x", pos.x).set("y", pos.y))
        }
    }
}

/// Serialize a scene onto a centered canvas. Point objects outside the
/// margin-expanded canvas are culled; curves were already clipped during
/// assembly.
pub fn render_document(scene: &Scene, canvas: PlanarPoint, margin: f64, css: &str) -> Document {
    let region = ClipRegion::for_canvas(canvas, margin);

    let mut doc = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("width", format!("{}mm", canvas.x))
        .set("height", format!("{}mm", canvas.y))
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                -canvas.x / 2.0,
                -canvas.y / 2.0,
                canvas.x,
                canvas.y
            ),
        )
        .set("class", "chart");

    if !css.is_empty() {
        doc = doc.add(Style::new(css));
    }

    doc.add(render_group(scene.root(), &region))
}
