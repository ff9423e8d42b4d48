use std::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point as PixelPoint, Size},
    pixelcolor::{Rgb888, RgbColor},
    primitives::{Circle, Line, Polyline, Primitive, PrimitiveStyle, Rectangle},
    Drawable, Pixel,
};
use image::{Rgb, RgbImage};
use u8g2_fonts::{
    fonts,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
    FontRenderer,
};

use super::overlay::{compose, compose_hands, DrawCommand, TextBox, TextScale};
use super::sprite::FoodSprite;
use crate::error::RenderError;
use crate::game::{GameConfig, GameState, Point};
use crate::vision::Hand;

/// Exposes an RGB frame as an embedded-graphics draw target
struct FrameTarget<'a> {
    frame: &'a mut RgbImage,
}

impl OriginDimensions for FrameTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.frame.width(), self.frame.height())
    }
}

impl DrawTarget for FrameTarget<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.frame.dimensions();
        for Pixel(p, color) in pixels {
            if p.x < 0 || p.y < 0 || p.x as u32 >= width || p.y as u32 >= height {
                continue;
            }
            self.frame
                .put_pixel(p.x as u32, p.y as u32, Rgb([color.r(), color.g(), color.b()]));
        }
        Ok(())
    }
}

fn drawn(result: Result<(), Infallible>) {
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

fn pixel(p: Point) -> PixelPoint {
    PixelPoint::new(p.x, p.y)
}

fn font(scale: TextScale) -> FontRenderer {
    match scale {
        TextScale::Small => FontRenderer::new::<fonts::u8g2_font_helvB12_tf>(),
        TextScale::Medium => FontRenderer::new::<fonts::u8g2_font_helvB18_tf>(),
        TextScale::Large => FontRenderer::new::<fonts::u8g2_font_helvB24_tf>(),
    }
}

/// Rasterizes draw commands onto camera frames
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the current game state over `frame`
    pub fn render(
        &self,
        frame: &mut RgbImage,
        state: &GameState,
        config: &GameConfig,
        sprite: &FoodSprite,
    ) -> Result<(), RenderError> {
        let commands = compose(state, config);
        self.draw(frame, &commands, Some(sprite))
    }

    /// Draw the tracked hands over `frame`
    pub fn render_hands(&self, frame: &mut RgbImage, hands: &[Hand]) -> Result<(), RenderError> {
        self.draw(frame, &compose_hands(hands), None)
    }

    /// Apply commands in order; anything off-frame is clipped
    ///
    /// Food commands are skipped when no sprite is given.
    pub fn draw(
        &self,
        frame: &mut RgbImage,
        commands: &[DrawCommand],
        sprite: Option<&FoodSprite>,
    ) -> Result<(), RenderError> {
        for command in commands {
            match command {
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    thickness,
                } => {
                    let mut target = FrameTarget { frame: &mut *frame };
                    self.draw_thick_line(&mut target, *from, *to, *color, *thickness);
                }
                DrawCommand::Polyline {
                    points,
                    color,
                    thickness,
                } => {
                    let mut target = FrameTarget { frame: &mut *frame };
                    let vertices: Vec<PixelPoint> = points.iter().copied().map(pixel).collect();
                    if let [single] = vertices.as_slice() {
                        drawn(Pixel(*single, *color).draw(&mut target));
                    } else {
                        drawn(
                            Polyline::new(&vertices)
                                .into_styled(PrimitiveStyle::with_stroke(*color, *thickness))
                                .draw(&mut target),
                        );
                    }
                }
                DrawCommand::FilledCircle {
                    center,
                    radius,
                    color,
                } => {
                    let mut target = FrameTarget { frame: &mut *frame };
                    drawn(
                        Circle::with_center(pixel(*center), radius * 2 + 1)
                            .into_styled(PrimitiveStyle::with_fill(*color))
                            .draw(&mut target),
                    );
                }
                DrawCommand::Rectangle {
                    top_left,
                    bottom_right,
                    color,
                    thickness,
                } => {
                    let mut target = FrameTarget { frame: &mut *frame };
                    drawn(
                        Rectangle::with_corners(pixel(*top_left), pixel(*bottom_right))
                            .into_styled(PrimitiveStyle::with_stroke(*color, *thickness))
                            .draw(&mut target),
                    );
                }
                DrawCommand::Food { top_left } => {
                    if let Some(sprite) = sprite {
                        sprite.blend_onto(frame, *top_left);
                    }
                }
                DrawCommand::Text(text_box) => {
                    let mut target = FrameTarget { frame: &mut *frame };
                    self.draw_text_box(&mut target, text_box)?;
                }
                DrawCommand::Label {
                    text,
                    origin,
                    scale,
                    color,
                } => {
                    let mut target = FrameTarget { frame: &mut *frame };
                    font(*scale)
                        .render_aligned(
                            text.as_str(),
                            pixel(*origin),
                            VerticalPosition::Baseline,
                            HorizontalAlignment::Left,
                            FontColor::Transparent(*color),
                            &mut target,
                        )
                        .map_err(|e| RenderError::Text(format!("{e:?}")))?;
                }
            }
        }
        Ok(())
    }

    /// Stroke a wide segment with rounded ends
    fn draw_thick_line(
        &self,
        target: &mut FrameTarget<'_>,
        from: Point,
        to: Point,
        color: Rgb888,
        thickness: u32,
    ) {
        drawn(
            Line::new(pixel(from), pixel(to))
                .into_styled(PrimitiveStyle::with_stroke(color, thickness))
                .draw(target),
        );
        let cap = PrimitiveStyle::with_fill(color);
        for end in [from, to] {
            drawn(Circle::with_center(pixel(end), thickness).into_styled(cap).draw(target));
        }
    }

    fn draw_text_box(
        &self,
        target: &mut FrameTarget<'_>,
        text_box: &TextBox,
    ) -> Result<(), RenderError> {
        let renderer = font(text_box.scale);
        let origin = pixel(text_box.origin);

        let bounds = renderer
            .get_rendered_dimensions_aligned(
                text_box.text.as_str(),
                origin,
                VerticalPosition::Baseline,
                HorizontalAlignment::Left,
            )
            .map_err(|_| RenderError::MissingGlyph {
                text: text_box.text.clone(),
            })?;

        if let Some(bounds) = bounds {
            let pad = text_box.offset as i32;
            let backdrop = Rectangle::new(
                bounds.top_left - PixelPoint::new(pad, pad),
                bounds.size + Size::new(text_box.offset * 2, text_box.offset * 2),
            );
            drawn(
                backdrop
                    .into_styled(PrimitiveStyle::with_fill(text_box.box_color))
                    .draw(target),
            );
        }

        renderer
            .render_aligned(
                text_box.text.as_str(),
                origin,
                VerticalPosition::Baseline,
                HorizontalAlignment::Left,
                FontColor::Transparent(text_box.text_color),
                target,
            )
            .map_err(|e| RenderError::Text(format!("{e:?}")))?;
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
