/*
 * Concrete style factories. Each one turns an engine-agnostic description
 * into an engine object and is plugged into a `StyleLifecycle`, which takes
 * care of when the object is created, replaced and released.
 *
 * Validation happens here, at creation time: a description the engine cannot
 * honour (zero-width stroke, negative radius, unreadable icon) surfaces as
 * `LifecycleError::EngineRejected` from `mount`/`refresh`, or through the
 * deferred value for the icon.
 */
use super::engine::{CircleImage, Fill, Icon, Stroke, Style};
use super::primitives::{BoxSpec, CircleSpec, FillSpec, StrokeSpec};
use crate::lifecycle::{Creation, Deferred, LifecycleError, LifecycleResult, StyleFactory};
use std::fs;
use std::path::PathBuf;
use std::thread;

pub const FILL_COMPONENT: &str = "vl-style-fill";
pub const STROKE_COMPONENT: &str = "vl-style-stroke";
pub const CIRCLE_COMPONENT: &str = "vl-style-circle";
pub const BOX_COMPONENT: &str = "vl-style-box";
pub const ICON_COMPONENT: &str = "vl-style-icon";

pub(crate) fn build_fill(spec: &FillSpec) -> Fill {
    Fill { color: spec.color }
}

pub(crate) fn build_stroke(spec: &StrokeSpec) -> LifecycleResult<Stroke> {
    if !spec.width.is_finite() || spec.width <= 0.0 {
        log::error!("StrokeStyle: rejected stroke width {}", spec.width);
        return Err(LifecycleError::EngineRejected(format!(
            "stroke width must be positive, got {}",
            spec.width
        )));
    }
    if spec.line_dash.iter().any(|d| !d.is_finite() || *d < 0.0) {
        log::error!("StrokeStyle: rejected line dash {:?}", spec.line_dash);
        return Err(LifecycleError::EngineRejected(format!(
            "line dash entries must be non-negative, got {:?}",
            spec.line_dash
        )));
    }
    Ok(Stroke {
        color: spec.color,
        width: spec.width,
        line_cap: spec.line_cap,
        line_join: spec.line_join,
        line_dash: spec.line_dash.clone(),
    })
}

pub(crate) fn build_circle(spec: &CircleSpec) -> LifecycleResult<CircleImage> {
    if !spec.radius.is_finite() || spec.radius <= 0.0 {
        log::error!("CircleStyle: rejected radius {}", spec.radius);
        return Err(LifecycleError::EngineRejected(format!(
            "circle radius must be positive, got {}",
            spec.radius
        )));
    }
    Ok(CircleImage {
        radius: spec.radius,
        fill: spec.fill.as_ref().map(build_fill),
        stroke: spec.stroke.as_ref().map(build_stroke).transpose()?,
    })
}

pub struct FillStyle {
    spec: FillSpec,
}

impl FillStyle {
    pub fn new(spec: FillSpec) -> Self {
        FillStyle { spec }
    }
}

impl StyleFactory for FillStyle {
    type Style = Fill;

    fn create(&mut self) -> LifecycleResult<Creation<Fill>> {
        Ok(Creation::Ready(build_fill(&self.spec)))
    }
}

pub struct StrokeStyle {
    spec: StrokeSpec,
}

impl StrokeStyle {
    pub fn new(spec: StrokeSpec) -> Self {
        StrokeStyle { spec }
    }
}

impl StyleFactory for StrokeStyle {
    type Style = Stroke;

    fn create(&mut self) -> LifecycleResult<Creation<Stroke>> {
        build_stroke(&self.spec).map(Creation::Ready)
    }
}

pub struct CircleStyle {
    spec: CircleSpec,
}

impl CircleStyle {
    pub fn new(spec: CircleSpec) -> Self {
        CircleStyle { spec }
    }
}

impl StyleFactory for CircleStyle {
    type Style = CircleImage;

    fn create(&mut self) -> LifecycleResult<Creation<CircleImage>> {
        build_circle(&self.spec).map(Creation::Ready)
    }
}

pub struct BoxStyle {
    spec: BoxSpec,
}

impl BoxStyle {
    pub fn new(spec: BoxSpec) -> Self {
        BoxStyle { spec }
    }
}

impl StyleFactory for BoxStyle {
    type Style = Style;

    fn create(&mut self) -> LifecycleResult<Creation<Style>> {
        Ok(Creation::Ready(Style {
            fill: self.spec.fill.as_ref().map(build_fill),
            stroke: self.spec.stroke.as_ref().map(build_stroke).transpose()?,
            circle: self.spec.circle.as_ref().map(build_circle).transpose()?,
            z_index: self.spec.z_index,
        }))
    }
}

/*
 * An icon whose source is inspected on a worker thread. `create` returns a
 * deferred value right away; the icon appears once the worker has read the
 * file's metadata, or the deferred is rejected if the file cannot be read.
 */
pub struct IconStyle {
    src: PathBuf,
}

impl IconStyle {
    pub fn new(src: PathBuf) -> Self {
        IconStyle { src }
    }
}

impl StyleFactory for IconStyle {
    type Style = Icon;

    fn create(&mut self) -> LifecycleResult<Creation<Icon>> {
        let (resolver, deferred) = Deferred::channel();
        let src = self.src.clone();

        thread::spawn(move || match fs::metadata(&src) {
            Ok(meta) if meta.is_file() => {
                log::trace!("IconStyle: loaded {:?} ({} bytes)", src, meta.len());
                resolver.resolve(Icon {
                    byte_len: meta.len(),
                    src,
                });
            }
            Ok(_) => {
                log::warn!("IconStyle: {:?} is not a file", src);
                resolver.reject(LifecycleError::EngineRejected(format!(
                    "icon source {src:?} is not a file"
                )));
            }
            Err(e) => {
                log::warn!("IconStyle: failed to read {:?}: {}", src, e);
                resolver.reject(LifecycleError::EngineRejected(format!(
                    "icon source {src:?} unreadable: {e}"
                )));
            }
        });

        Ok(Creation::Deferred(deferred))
    }
}
