/*
 * The component lifecycle layer. `style_lifecycle` holds the composition of a
 * base lifecycle with a style factory; the sibling modules supply the pieces
 * it is built from (errors, deferred values, the base contract, service bags
 * and placeholder rendering). Unit tests for `StyleLifecycle` with mocked
 * collaborators are in `style_lifecycle_tests.rs`.
 */
pub mod base;
pub mod deferred;
pub mod error;
pub mod render;
pub mod services;
pub mod style_lifecycle;


pub use base::{BaseLifecycle, ComponentBase, LifecycleState};
pub use deferred::{Deferred, Resolver};
pub use error::{LifecycleError, Result as LifecycleResult};
pub use render::{Placeholder, RenderOutput};
pub use services::{MAP_SERVICE, STYLE_SERVICE, ServiceBag, merge_bags};
pub use style_lifecycle::{
    Creation, PendingStyle, ResolvedStyle, StyleFactory, StyleLifecycle, StyleLifecycleBuilder,
};
