/*
 * Lifecycle plumbing for style components of a map UI.
 *
 * `lifecycle` holds the generic machinery: the base lifecycle a component
 * delegates to, the service bag shared down the component tree, deferred
 * values, and `StyleLifecycle`, which owns one engine style object from mount
 * to unmount. `styles` builds concrete fill, stroke, circle, box and icon
 * styles on top of it. `core` and `logging` carry the configuration and
 * logging used by the demo binary.
 */
pub mod core;
pub mod lifecycle;
pub mod logging;
pub mod styles;

pub use logging::initialize_logging;
