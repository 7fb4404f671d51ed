//! Path descriptors: the moveto/lineto/arcto mini-language shared with SVG
//! `d` attributes.
//!
//! Built with a fluent API (`PathData::new().m(..).l(..).z()`) and rendered
//! through `Display`.

use std::fmt;

use crate::types::Point;

/// One drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Relative lineto (`l`)
    LineBy(Point),
    ArcTo(Arc),
    /// Relative arcto (`a`)
    ArcBy(Arc),
    Close,
}

/// Elliptical arc parameters. `to` is absolute for `ArcTo`, relative for
/// `ArcBy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub rx: f64,
    pub ry: f64,
    pub rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Point,
}

/// A sequence of path commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn m(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn l(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    pub fn rel_l(mut self, dx: f64, dy: f64) -> Self {
        self.commands.push(PathCommand::LineBy(Point::new(dx, dy)));
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn a(mut self, rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::ArcTo(Arc {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            to: Point::new(x, y),
        }));
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rel_a(mut self, rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, dx: f64, dy: f64) -> Self {
        self.commands.push(PathCommand::ArcBy(Arc {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            to: Point::new(dx, dy),
        }));
        self
    }

    pub fn z(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Shorthand for `m` with a [`Point`].
    pub fn move_to(self, p: Point) -> Self {
        self.m(p.x, p.y)
    }

    /// Shorthand for `l` with a [`Point`].
    pub fn line_to(self, p: Point) -> Self {
        self.l(p.x, p.y)
    }

    /// Append every command of `other`.
    pub fn append(mut self, other: PathData) -> Self {
        self.commands.extend(other.commands);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// First absolute point of the path (the initial moveto).
    pub fn start(&self) -> Option<Point> {
        match self.commands.first() {
            Some(PathCommand::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    /// End point of the first subpath when it is made of absolute commands.
    pub fn end(&self) -> Option<Point> {
        let mut end = None;
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(_) if end.is_some() => break,
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => end = Some(*p),
                PathCommand::ArcTo(arc) => end = Some(arc.to),
                PathCommand::LineBy(_) | PathCommand::ArcBy(_) => return None,
                PathCommand::Close => break,
            }
        }
        end
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) => write!(f, "M{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::LineTo(p) => write!(f, "L{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::LineBy(p) => write!(f, "l{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::ArcTo(arc) => write_arc(f, 'A', arc)?,
                PathCommand::ArcBy(arc) => write_arc(f, 'a', arc)?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

fn write_arc(f: &mut fmt::Formatter<'_>, cmd: char, arc: &Arc) -> fmt::Result {
    write!(
        f,
        "{}{},{},{},{},{},{},{}",
        cmd,
        fmt_num(arc.rx),
        fmt_num(arc.ry),
        fmt_num(arc.rotation),
        u8::from(arc.large_arc),
        u8::from(arc.sweep),
        fmt_num(arc.to.x),
        fmt_num(arc.to.y)
    )
}

/// Decimal places kept when printing coordinates.
const DECIMALS: usize = 6;

/// Format a coordinate: at most six decimals, trailing zeros trimmed, no
/// negative zero. Trig noise such as `6.1e-16` prints as `0`.
pub(crate) fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let s = format!("{:.prec$}", value, prec = DECIMALS);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}
