//! Ticks, gridlines and spines of a skewed surface.
//!
//! A y tick at data value `p` sits at different heights on the two side
//! edges, so each of its parts gets its own visibility rule:
//!
//! | part                     | visible iff                    |
//! |--------------------------|--------------------------------|
//! | left tick and label      | `p` in the left interval       |
//! | right tick and label     | `p` in the right interval      |
//! | gridline                 | `p` in the envelope of both    |
//!
//! The rule is evaluated on every pass and ANDed with whatever flags the
//! caller set on the tick; the caller's flags are restored after drawing.

use crate::error::Result;
use crate::render::{draw_polyline, LineStyle, Renderer, Rgb, TextStyle};
use crate::scale::{util::interval_contains, Linear, Scale};
use crate::transform::{PlotPoint, ScreenPoint};

use super::SkewSurface;

/// Per-part visibility flags of one y tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickVisibility {
    pub gridline: bool,
    /// Tick mark on the left edge.
    pub tick1line: bool,
    /// Tick mark on the right edge.
    pub tick2line: bool,
    pub label1: bool,
    pub label2: bool,
}

impl Default for TickVisibility {
    fn default() -> Self {
        Self {
            gridline: true,
            tick1line: true,
            tick2line: true,
            label1: true,
            label2: false,
        }
    }
}

impl TickVisibility {
    /// These flags ANDed with the edge/grid rule for a tick at `loc`.
    pub fn masked(self, surface: &SkewSurface, loc: f64) -> Self {
        let needs_left = interval_contains(surface.left_interval(), loc);
        let needs_right = interval_contains(surface.right_interval(), loc);
        let needs_grid = interval_contains(surface.view_interval(), loc);
        Self {
            gridline: self.gridline && needs_grid,
            tick1line: self.tick1line && needs_left,
            tick2line: self.tick2line && needs_right,
            label1: self.label1 && needs_left,
            label2: self.label2 && needs_right,
        }
    }
}

/// Cosmetics shared by the axes of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStyle {
    pub spine: LineStyle,
    pub tick: LineStyle,
    pub major_grid: LineStyle,
    pub minor_grid: LineStyle,
    pub text: TextStyle,
    /// Tick mark length in device units.
    pub tick_length: f64,
    /// Gap between a tick's edge point and its label.
    pub label_pad: f64,
    pub grid: bool,
    pub minor_grid_visible: bool,
    pub labels: bool,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let spine = LineStyle {
            color: Rgb::BLACK,
            width: 1.0,
            z_order: 2.5,
        };
        let grid = LineStyle {
            color: Rgb::GRAY,
            width: 0.8,
            z_order: 0.5,
        };
        Self {
            spine,
            tick: spine,
            major_grid: grid,
            minor_grid: grid.width(0.4),
            text: TextStyle::default(),
            tick_length: 4.0,
            label_pad: 3.0,
            grid: true,
            minor_grid_visible: true,
            labels: true,
        }
    }
}

/// Formats a tick value with at most six decimals and no trailing zeros.
pub fn format_tick(value: f64) -> String {
    let text = format!("{value:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" => "0".to_owned(),
        other => other.to_owned(),
    }
}

/// One y tick of a skewed surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SkewTick {
    loc: f64,
    major: bool,
    pub visibility: TickVisibility,
    label_rotation: f64,
}

impl SkewTick {
    pub fn new(loc: f64, major: bool, visibility: TickVisibility) -> Self {
        Self {
            loc,
            major,
            visibility,
            label_rotation: 0.0,
        }
    }

    pub fn loc(&self) -> f64 {
        self.loc
    }

    pub fn is_major(&self) -> bool {
        self.major
    }

    /// Label rotation from the last layout pass, degrees counter-clockwise.
    pub fn label_rotation(&self) -> f64 {
        self.label_rotation
    }

    /// Moves the tick and re-reads the label rotation from the surface.
    pub fn update_position(&mut self, loc: f64, surface: &SkewSurface) {
        self.loc = loc;
        self.label_rotation = surface.tick_label_rotation();
    }

    /// Draws the tick with the edge/grid rule applied for this pass only.
    pub fn draw(
        &mut self,
        surface: &SkewSurface,
        style: &AxisStyle,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        let saved = self.visibility;
        self.visibility = saved.masked(surface, self.loc);
        let drawn = self.draw_visible(surface, style, renderer);
        self.visibility = saved;
        drawn
    }

    fn draw_visible(
        &self,
        surface: &SkewSurface,
        style: &AxisStyle,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        let to_device = surface.data_to_device();
        let left = to_device.transform_to_screen(surface.y_axis_point(0.0, self.loc));
        let right = to_device.transform_to_screen(surface.y_axis_point(1.0, self.loc));

        // Tick marks point inward along the sheared x direction.
        let angle = (-self.label_rotation).to_radians();
        let (dx, dy) = (
            style.tick_length * angle.cos(),
            style.tick_length * angle.sin(),
        );

        let vis = self.visibility;
        if vis.gridline {
            let grid = if self.major {
                &style.major_grid
            } else {
                &style.minor_grid
            };
            draw_polyline(renderer, &[left, right], grid)?;
        }
        if vis.tick1line {
            let inner = ScreenPoint::new(left.x + dx, left.y + dy);
            draw_polyline(renderer, &[left, inner], &style.tick)?;
        }
        if vis.tick2line {
            let inner = ScreenPoint::new(right.x - dx, right.y - dy);
            draw_polyline(renderer, &[right, inner], &style.tick)?;
        }
        if style.labels && self.major {
            let text = format_tick(self.loc);
            if vis.label1 {
                let at = ScreenPoint::new(left.x - style.label_pad, left.y);
                renderer.draw_text(&text, at, self.label_rotation, &style.text)?;
            }
            if vis.label2 {
                let at = ScreenPoint::new(right.x + style.label_pad, right.y);
                renderer.draw_text(&text, at, self.label_rotation, &style.text)?;
            }
        }
        Ok(())
    }
}

/// The y axis: ticks generated over the envelope of both edge intervals.
#[derive(Debug, Clone, Default)]
pub struct YAxis {
    /// Flags given to newly generated ticks.
    pub visibility: TickVisibility,
    ticks: Vec<SkewTick>,
}

impl YAxis {
    pub fn ticks(&self) -> &[SkewTick] {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut [SkewTick] {
        &mut self.ticks
    }

    /// Regenerates tick locations for the current view, reusing tick
    /// objects so flags set on them survive while their count is stable.
    pub fn update_ticks(&mut self, surface: &SkewSurface) {
        let (lower, upper) = surface.view_interval();
        let locs = Linear::<f64, f64>::new(lower, upper).ticks();

        self.ticks.truncate(locs.len());
        for (i, tick) in locs.iter().enumerate() {
            match self.ticks.get_mut(i) {
                Some(existing) => {
                    existing.major = tick.is_major();
                    existing.update_position(tick.value, surface);
                }
                None => {
                    let mut new = SkewTick::new(tick.value, tick.is_major(), self.visibility);
                    new.update_position(tick.value, surface);
                    self.ticks.push(new);
                }
            }
        }
    }

    pub fn draw(
        &mut self,
        surface: &SkewSurface,
        style: &AxisStyle,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        self.update_ticks(surface);
        for tick in &mut self.ticks {
            if !style.grid || (!tick.is_major() && !style.minor_grid_visible) {
                let saved = tick.visibility;
                tick.visibility.gridline = false;
                let drawn = tick.draw(surface, style, renderer);
                tick.visibility = saved;
                drawn?;
            } else {
                tick.draw(surface, style, renderer)?;
            }
        }
        Ok(())
    }
}

/// Spines, y axis and the unskewed x axis of one chart.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub y_axis: YAxis,
    pub style: AxisStyle,
}

impl Frame {
    pub fn draw(&mut self, surface: &SkewSurface, renderer: &mut dyn Renderer) -> Result<()> {
        draw_spines(surface, &self.style, renderer)?;
        self.y_axis.draw(surface, &self.style, renderer)?;
        draw_x_axis(surface, &self.style, renderer)
    }
}

/// Device end points of the left and right spines, bottom first.
///
/// Their data extents are the left and right intervals, so they always
/// coincide with the edges of the plotting area.
pub fn side_spines(surface: &SkewSurface) -> [[ScreenPoint<f64>; 2]; 2] {
    let to_device = surface.data_to_device();
    let spine = |x_fraction: f64, (a, b): (f64, f64)| {
        [
            to_device.transform_to_screen(surface.y_axis_point(x_fraction, a)),
            to_device.transform_to_screen(surface.y_axis_point(x_fraction, b)),
        ]
    };
    [
        spine(0.0, surface.left_interval()),
        spine(1.0, surface.right_interval()),
    ]
}

pub fn draw_spines(
    surface: &SkewSurface,
    style: &AxisStyle,
    renderer: &mut dyn Renderer,
) -> Result<()> {
    for spine in side_spines(surface) {
        draw_polyline(renderer, &spine, &style.spine)?;
    }
    let to_device = surface.surface_to_device();
    for y in [0.0, 1.0] {
        let edge = [
            to_device.transform_to_screen(PlotPoint::new(0.0, y)),
            to_device.transform_to_screen(PlotPoint::new(1.0, y)),
        ];
        draw_polyline(renderer, &edge, &style.spine)?;
    }
    Ok(())
}

/// X ticks, labels and vertical gridlines; the shear leaves x untouched.
pub fn draw_x_axis(
    surface: &SkewSurface,
    style: &AxisStyle,
    renderer: &mut dyn Renderer,
) -> Result<()> {
    let to_device = surface.surface_to_device();
    for tick in surface.x_scale().ticks() {
        let u = surface.x_scale().normalize(&tick.value);
        let bottom = to_device.transform_to_screen(PlotPoint::new(u, 0.0));

        if style.grid && (tick.is_major() || style.minor_grid_visible) {
            let top = to_device.transform_to_screen(PlotPoint::new(u, 1.0));
            let grid = if tick.is_major() {
                &style.major_grid
            } else {
                &style.minor_grid
            };
            draw_polyline(renderer, &[bottom, top], grid)?;
        }
        if tick.is_major() {
            let inner = ScreenPoint::new(bottom.x, bottom.y - style.tick_length);
            draw_polyline(renderer, &[bottom, inner], &style.tick)?;
            if style.labels {
                let at = ScreenPoint::new(bottom.x, bottom.y + style.label_pad);
                renderer.draw_text(&format_tick(tick.value), at, 0.0, &style.text)?;
            }
        }
    }
    Ok(())
}
