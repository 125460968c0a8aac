use std::f32::consts::TAU;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use boid_core::PointerTarget;

/// Scripted pointer movement standing in for a real pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetPath {
    /// Stay at the plane center.
    Center,
    /// Stay at one point.
    Fixed(PointerTarget),
    /// Orbit the plane center, one lap every `period` ticks.
    Circle { radius: f32, period: u64 },
    /// Cross the horizontal mid-line left to right every `period` ticks.
    Sweep { period: u64 },
}

impl TargetPath {
    /// Pointer position at `tick` on a `width` x `height` plane.
    pub fn position(&self, tick: u64, width: f32, height: f32) -> PointerTarget {
        let center = PointerTarget::center_of(width, height);
        match *self {
            TargetPath::Center => center,
            TargetPath::Fixed(target) => target,
            TargetPath::Circle { radius, period } => {
                let angle = TAU * (tick % period) as f32 / period as f32;
                // Radii beyond the i32 range pin the pointer to the extreme.
                PointerTarget::new(
                    center.x.saturating_add((radius * angle.cos()) as i32),
                    center.y.saturating_add((radius * angle.sin()) as i32),
                )
            }
            TargetPath::Sweep { period } => {
                let fraction = (tick % period) as f32 / period as f32;
                PointerTarget::new((fraction * width) as i32, center.y)
            }
        }
    }
}

fn parse_period(raw: &str) -> Result<u64> {
    let period: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid period '{}'", raw))?;
    if period == 0 {
        bail!("period must be at least one tick");
    }
    Ok(period)
}

impl FromStr for TargetPath {
    type Err = anyhow::Error;

    /// Accepts `center`, `fixed:X,Y`, `circle:RADIUS,PERIOD` and
    /// `sweep:PERIOD`.
    fn from_str(s: &str) -> Result<Self> {
        let (kind, args) = match s.split_once(':') {
            Some((kind, args)) => (kind, Some(args)),
            None => (s, None),
        };

        match (kind.trim(), args) {
            ("center", None) => Ok(TargetPath::Center),
            ("fixed", Some(args)) => {
                let (x, y) = args
                    .split_once(',')
                    .ok_or_else(|| anyhow!("fixed path needs X,Y"))?;
                let x: i32 = x.trim().parse().context("invalid x coordinate")?;
                let y: i32 = y.trim().parse().context("invalid y coordinate")?;
                Ok(TargetPath::Fixed(PointerTarget::new(x, y)))
            }
            ("circle", Some(args)) => {
                let (radius, period) = args
                    .split_once(',')
                    .ok_or_else(|| anyhow!("circle path needs RADIUS,PERIOD"))?;
                let radius: f32 = radius.trim().parse().context("invalid radius")?;
                if !radius.is_finite() || radius < 0.0 {
                    bail!("radius must be finite and non-negative");
                }
                Ok(TargetPath::Circle {
                    radius,
                    period: parse_period(period)?,
                })
            }
            ("sweep", Some(args)) => Ok(TargetPath::Sweep {
                period: parse_period(args)?,
            }),
            _ => bail!(
                "unknown target path '{}' (expected center, fixed:X,Y, circle:R,PERIOD or sweep:PERIOD)",
                s
            ),
        }
    }
}
