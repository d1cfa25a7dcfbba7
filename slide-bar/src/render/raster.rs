use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use color_lib::sRGB;

use super::{draw_scene, Anchor, Canvas};
use crate::error::{Result, SlideBarError};
use crate::layout::Scene;

fn draw_err<E: std::fmt::Display>(e: E) -> SlideBarError {
    SlideBarError::Draw(e.to_string())
}

fn rgb(c: sRGB) -> RGBColor {
    RGBColor(c[0], c[1], c[2])
}

fn point((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn stroke(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

pub struct RasterCanvas<'a> {
    root: DrawingArea<BitMapBackend<'a>, Shift>,
    font_family: String,
    font_px: f64,
}

impl<'a> RasterCanvas<'a> {
    /// Wraps an RGB buffer of `width * height * 3` bytes and paints the
    /// background.
    pub fn new(buf: &'a mut [u8], scene: &Scene) -> Result<Self> {
        let size = (scene.frame.width, scene.frame.height);
        let root = BitMapBackend::with_buffer(buf, size).into_drawing_area();
        root.fill(&rgb(scene.style.background)).map_err(draw_err)?;
        Ok(Self {
            root,
            font_family: scene.style.font_family.clone(),
            font_px: scene.style.font_px(scene.dpi),
        })
    }

    pub fn present(self) -> Result<()> {
        self.root.present().map_err(draw_err)
    }
}

impl Canvas for RasterCanvas<'_> {
    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: sRGB, width: f64) -> Result<()> {
        self.root
            .draw(&PathElement::new(
                vec![point(from), point(to)],
                rgb(color).stroke_width(stroke(width)),
            ))
            .map_err(draw_err)
    }

    fn circle(
        &mut self,
        center: (f64, f64),
        radius: f64,
        fill: sRGB,
        outline: Option<(sRGB, f64)>,
    ) -> Result<()> {
        let center = point(center);
        let r = radius.round() as i32;
        self.root
            .draw(&Circle::new(center, r, rgb(fill).filled()))
            .map_err(draw_err)?;
        if let Some((color, width)) = outline {
            self.root
                .draw(&Circle::new(center, r, rgb(color).stroke_width(stroke(width))))
                .map_err(draw_err)?;
        }
        Ok(())
    }

    fn text(&mut self, at: (f64, f64), content: &str, color: sRGB, anchor: Anchor) -> Result<()> {
        let pos = match anchor {
            Anchor::Above => Pos::new(HPos::Center, VPos::Bottom),
            Anchor::Below => Pos::new(HPos::Center, VPos::Top),
            Anchor::Left => Pos::new(HPos::Right, VPos::Center),
        };
        let color = rgb(color);
        let style = FontDesc::new(
            FontFamily::Name(&self.font_family),
            self.font_px,
            FontStyle::Normal,
        )
        .color(&color)
        .pos(pos);
        self.root
            .draw(&Text::new(content.to_string(), point(at), style))
            .map_err(draw_err)
    }
}

/// Renders into an in-memory RGB buffer, then encodes it in the format the
/// file extension asks for.
pub fn save_raster<T>(scene: &Scene, path: T) -> Result<()>
where
    T: AsRef<Path>,
{
    let (width, height) = (scene.frame.width, scene.frame.height);
    let mut buf = vec![0u8; width as usize * height as usize * 3];
    {
        let mut canvas = RasterCanvas::new(&mut buf, scene)?;
        draw_scene(scene, &mut canvas)?;
        canvas.present()?;
    }
    image::save_buffer(path, &buf, width, height, image::ExtendedColorType::Rgb8)?;
    Ok(())
}
