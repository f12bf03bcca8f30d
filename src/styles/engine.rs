/*
 * Style objects as the rendering engine holds them. The lifecycle layer treats
 * these as opaque: it only creates, stores and hands them out. Unlike the
 * descriptions in `primitives`, these are only ever produced by a factory that
 * has validated its input.
 */
use super::primitives::{Color, LineCap, LineJoin};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub line_dash: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleImage {
    pub radius: f32,
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub src: PathBuf,
    pub byte_len: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    pub circle: Option<CircleImage>,
    pub z_index: Option<i32>,
}
