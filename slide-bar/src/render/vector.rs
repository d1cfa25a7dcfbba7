use std::path::Path;

use svg::node::element::{Circle, Line, Rectangle, Text};
use svg::{Document, Node};

use color_lib::color::to_string;
use color_lib::sRGB;

use super::{draw_scene, Anchor, Canvas};
use crate::error::Result;
use crate::layout::Scene;

pub struct VectorCanvas {
    document: Document,
    font_family: String,
    font_px: f64,
}

impl VectorCanvas {
    pub fn new(scene: &Scene) -> Self {
        let (w, h) = (scene.frame.width as f64, scene.frame.height as f64);
        let background = Rectangle::new()
            .set("width", w)
            .set("height", h)
            .set("fill", to_string(&scene.style.background));

        Self {
            document: Document::new()
                .set("width", w)
                .set("height", h)
                .set("viewBox", (0.0, 0.0, w, h))
                .add(background),
            // generic fallback in case the named face is missing
            font_family: format!("{}, monospace", scene.style.font_family),
            font_px: scene.style.font_px(scene.dpi),
        }
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl Canvas for VectorCanvas {
    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: sRGB, width: f64) -> Result<()> {
        self.document.append(
            Line::new()
                .set("x1", from.0)
                .set("y1", from.1)
                .set("x2", to.0)
                .set("y2", to.1)
                .set("stroke", to_string(&color))
                .set("stroke-width", width),
        );
        Ok(())
    }

    fn circle(
        &mut self,
        center: (f64, f64),
        radius: f64,
        fill: sRGB,
        outline: Option<(sRGB, f64)>,
    ) -> Result<()> {
        let mut circle = Circle::new()
            .set("cx", center.0)
            .set("cy", center.1)
            .set("r", radius)
            .set("fill", to_string(&fill));
        if let Some((color, width)) = outline {
            circle = circle
                .set("stroke", to_string(&color))
                .set("stroke-width", width);
        }
        self.document.append(circle);
        Ok(())
    }

    fn text(&mut self, at: (f64, f64), content: &str, color: sRGB, anchor: Anchor) -> Result<()> {
        let (text_anchor, baseline) = match anchor {
            Anchor::Above => ("middle", "auto"),
            Anchor::Below => ("middle", "hanging"),
            Anchor::Left => ("end", "central"),
        };
        self.document.append(
            Text::new(content)
                .set("x", at.0)
                .set("y", at.1)
                .set("fill", to_string(&color))
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_px)
                .set("text-anchor", text_anchor)
                .set("dominant-baseline", baseline),
        );
        Ok(())
    }
}

pub fn make_document(scene: &Scene) -> Result<Document> {
    let mut canvas = VectorCanvas::new(scene);
    draw_scene(scene, &mut canvas)?;
    Ok(canvas.into_document())
}

pub fn save_svg<T>(scene: &Scene, path: T) -> Result<()>
where
    T: AsRef<Path>,
{
    let document = make_document(scene)?;
    svg::save(path, &document)?;
    Ok(())
}
