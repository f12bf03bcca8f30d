/*
 * Serializable definitions of style components, as they appear in a style
 * sheet, and the object-safe `StyleNode` view that lets a host drive a mixed
 * list of style lifecycles without knowing their engine object types.
 */
use super::concrete::{
    BOX_COMPONENT, BoxStyle, CIRCLE_COMPONENT, CircleStyle, FILL_COMPONENT, FillStyle,
    ICON_COMPONENT, IconStyle, STROKE_COMPONENT, StrokeStyle,
};
use super::primitives::{BoxSpec, CircleSpec, FillSpec, StrokeSpec};
use crate::lifecycle::{
    ComponentBase, Deferred, LifecycleResult, LifecycleState, ServiceBag, StyleLifecycle,
};
use futures::executor::block_on;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Debug;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleDefinition {
    Fill(FillSpec),
    Stroke(StrokeSpec),
    Circle(CircleSpec),
    Box(BoxSpec),
    Icon { src: PathBuf },
}

impl StyleDefinition {
    pub fn component_name(&self) -> &'static str {
        match self {
            StyleDefinition::Fill(_) => FILL_COMPONENT,
            StyleDefinition::Stroke(_) => STROKE_COMPONENT,
            StyleDefinition::Circle(_) => CIRCLE_COMPONENT,
            StyleDefinition::Box(_) => BOX_COMPONENT,
            StyleDefinition::Icon { .. } => ICON_COMPONENT,
        }
    }

    /// Creates an unmounted style component for this definition.
    pub fn instantiate(&self) -> Box<dyn StyleNode> {
        let name = self.component_name();
        log::trace!("StyleDefinition: instantiating {name}");
        match self {
            StyleDefinition::Fill(spec) => {
                Box::new(StyleLifecycle::standard(name, FillStyle::new(spec.clone())))
            }
            StyleDefinition::Stroke(spec) => {
                Box::new(StyleLifecycle::standard(name, StrokeStyle::new(spec.clone())))
            }
            StyleDefinition::Circle(spec) => {
                Box::new(StyleLifecycle::standard(name, CircleStyle::new(spec.clone())))
            }
            StyleDefinition::Box(spec) => {
                Box::new(StyleLifecycle::standard(name, BoxStyle::new(spec.clone())))
            }
            StyleDefinition::Icon { src } => {
                Box::new(StyleLifecycle::standard(name, IconStyle::new(src.clone())))
            }
        }
    }
}

pub trait StyleNode {
    fn name(&self) -> &str;
    fn state(&self) -> LifecycleState;
    fn init(&mut self) -> Deferred<()>;
    fn mount(&mut self) -> LifecycleResult<()>;
    fn unmount(&mut self) -> LifecycleResult<()>;
    fn refresh(&mut self) -> LifecycleResult<()>;
    fn deinit(&mut self) -> LifecycleResult<()>;
    fn poll_pending(&mut self) -> LifecycleResult<bool>;
    /// Blocks until a deferred creation settles, then installs it if still current.
    fn wait_pending(&mut self) -> LifecycleResult<bool>;
    fn inject_services(&mut self, services: ServiceBag);
    fn services(&self) -> ServiceBag;
    /// Debug rendering of the live engine object, if there is one.
    fn describe_style(&self) -> Option<String>;
}

impl<S: Any + Debug> StyleNode for StyleLifecycle<S, ComponentBase> {
    fn name(&self) -> &str {
        StyleLifecycle::name(self)
    }

    fn state(&self) -> LifecycleState {
        StyleLifecycle::state(self)
    }

    fn init(&mut self) -> Deferred<()> {
        StyleLifecycle::init(self)
    }

    fn mount(&mut self) -> LifecycleResult<()> {
        StyleLifecycle::mount(self)
    }

    fn unmount(&mut self) -> LifecycleResult<()> {
        StyleLifecycle::unmount(self)
    }

    fn refresh(&mut self) -> LifecycleResult<()> {
        StyleLifecycle::refresh(self)
    }

    fn deinit(&mut self) -> LifecycleResult<()> {
        StyleLifecycle::deinit(self)
    }

    fn poll_pending(&mut self) -> LifecycleResult<bool> {
        StyleLifecycle::poll_pending(self)
    }

    fn wait_pending(&mut self) -> LifecycleResult<bool> {
        let Some(pending) = self.take_pending() else {
            return Ok(false);
        };
        let generation = pending.generation();
        match block_on(pending.resolve()) {
            Ok(resolved) => Ok(self.install_resolved(resolved)),
            Err(e) => Err(self.fail_pending(generation, e)),
        }
    }

    fn inject_services(&mut self, services: ServiceBag) {
        self.base_mut().inject_services(services);
    }

    fn services(&self) -> ServiceBag {
        self.get_services()
    }

    fn describe_style(&self) -> Option<String> {
        self.get_style().map(|style| format!("{style:?}"))
    }
}
