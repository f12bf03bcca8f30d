/*
 * The style lifecycle: composes a `BaseLifecycle` with a style factory so that
 * any concrete style only has to say how its engine object is built. The
 * lifecycle owns the engine object for the duration of one mount cycle,
 * exposes it through `get_style`/`style`, and layers a `style` capability on
 * top of the inherited service bag for descendants.
 *
 * Factories may answer with a ready object or with a `Deferred`. Deferred
 * creations are tagged with the generation that started them; every mount,
 * unmount and deinit bumps the generation, and only a result whose tag matches
 * the current generation is ever installed. A stale result that resolves late
 * is dropped.
 */
use super::base::{BaseLifecycle, ComponentBase, LifecycleState};
use super::deferred::Deferred;
use super::error::{LifecycleError, Result as LifecycleResult};
use super::render::{RenderOutput, render_or_placeholder};
use super::services::{MAP_SERVICE, STYLE_SERVICE, ServiceBag, merge_bags};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// Builds the engine object for a concrete style.
pub trait StyleFactory {
    type Style: Any;

    fn create(&mut self) -> LifecycleResult<Creation<Self::Style>>;
}

/// Result of a factory call: either the engine object itself or a promise of it.
#[derive(Debug)]
pub enum Creation<S> {
    Ready(S),
    Deferred(Deferred<S>),
}

/// A deferred creation detached from its component, tagged with its generation.
#[derive(Debug)]
pub struct PendingStyle<S> {
    generation: u64,
    deferred: Deferred<S>,
}

impl<S> PendingStyle<S> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub async fn resolve(self) -> LifecycleResult<ResolvedStyle<S>> {
        let style = self.deferred.await?;
        Ok(ResolvedStyle {
            generation: self.generation,
            style,
        })
    }
}

#[derive(Debug)]
pub struct ResolvedStyle<S> {
    generation: u64,
    style: S,
}

impl<S> ResolvedStyle<S> {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

type EngineSlot<S> = Rc<RefCell<Option<Rc<S>>>>;

pub struct StyleLifecycle<S: Any, B: BaseLifecycle> {
    name: String,
    base: B,
    factory: Option<Box<dyn StyleFactory<Style = S>>>,
    // Shared with the `style` provider handed out by `get_services`.
    engine_object: EngineSlot<S>,
    pending: Option<PendingStyle<S>>,
    generation: u64,
    state: LifecycleState,
    // State to return to if a deferred creation of the current mount fails.
    pre_mount_state: LifecycleState,
}

pub struct StyleLifecycleBuilder<S: Any, B: BaseLifecycle> {
    name: String,
    base: B,
    factory: Option<Box<dyn StyleFactory<Style = S>>>,
}

impl<S: Any, B: BaseLifecycle> StyleLifecycleBuilder<S, B> {
    pub fn new(name: &str, base: B) -> Self {
        StyleLifecycleBuilder {
            name: name.to_string(),
            base,
            factory: None,
        }
    }

    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: StyleFactory<Style = S> + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    pub fn build(self) -> StyleLifecycle<S, B> {
        if self.factory.is_none() {
            log::warn!(
                "StyleLifecycle[{}]: built without a style factory, mounting will fail.",
                self.name
            );
        }
        StyleLifecycle {
            name: self.name,
            base: self.base,
            factory: self.factory,
            engine_object: Rc::new(RefCell::new(None)),
            pending: None,
            generation: 0,
            state: LifecycleState::Created,
            pre_mount_state: LifecycleState::Created,
        }
    }
}

impl<S: Any> StyleLifecycle<S, ComponentBase> {
    /// A lifecycle over the stock `ComponentBase`, named after the component.
    pub fn standard<F>(name: &str, factory: F) -> Self
    where
        F: StyleFactory<Style = S> + 'static,
    {
        StyleLifecycleBuilder::new(name, ComponentBase::new(name))
            .factory(factory)
            .build()
    }
}

impl<S: Any, B: BaseLifecycle> StyleLifecycle<S, B> {
    pub fn builder(name: &str, base: B) -> StyleLifecycleBuilder<S, B> {
        StyleLifecycleBuilder::new(name, base)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut B {
        &mut self.base
    }

    fn invalid_state(&self, operation: &'static str) -> LifecycleError {
        LifecycleError::InvalidState {
            component: self.name.clone(),
            operation,
            state: self.state.as_str(),
        }
    }

    /*
     * Asks the factory for a new engine object. A lifecycle built without a
     * factory fails here with `NotImplemented` rather than yielding nothing.
     */
    pub fn create_ol_object(&mut self) -> LifecycleResult<Creation<S>> {
        match self.factory.as_mut() {
            Some(factory) => factory.create(),
            None => {
                log::error!(
                    "StyleLifecycle[{}]: no style factory supplied.",
                    self.name
                );
                Err(LifecycleError::NotImplemented {
                    component: self.name.clone(),
                })
            }
        }
    }

    /*
     * Runs the base initialization. Only a freshly created component can be
     * initialized. The state advances to `Initialized` once the base reports
     * success; a base initialization that is still in flight leaves the state
     * at `Created` (mounting from there is allowed), and a failed one leaves it
     * unchanged so `init` may be retried.
     */
    pub fn init(&mut self) -> Deferred<()> {
        if self.state != LifecycleState::Created {
            return Deferred::failed(self.invalid_state("init"));
        }
        log::debug!("StyleLifecycle[{}]: init", self.name);
        let mut completion = self.base.init();
        match completion.try_take() {
            Ok(Some(())) => {
                self.state = LifecycleState::Initialized;
                Deferred::ready(())
            }
            Ok(None) => {
                log::debug!(
                    "StyleLifecycle[{}]: base initialization still in flight",
                    self.name
                );
                completion
            }
            Err(e) => {
                log::warn!("StyleLifecycle[{}]: init failed: {}", self.name, e);
                Deferred::failed(e)
            }
        }
    }

    /*
     * Deinitializes the base, unmounting first if still mounted. Local state is
     * only committed once the base has accepted each step, so a failing base
     * leaves the component where it was and the call can be retried.
     */
    pub fn deinit(&mut self) -> LifecycleResult<()> {
        if self.state == LifecycleState::Deinitialized {
            return Err(self.invalid_state("deinit"));
        }
        if self.state == LifecycleState::Mounted {
            log::warn!(
                "StyleLifecycle[{}]: deinit while mounted, unmounting first.",
                self.name
            );
            self.unmount()?;
        }
        log::debug!("StyleLifecycle[{}]: deinit", self.name);
        self.base.deinit()?;
        self.release();
        self.state = LifecycleState::Deinitialized;
        Ok(())
    }

    /*
     * Creates a fresh engine object and mounts the base. A failing factory
     * aborts before the base is touched; a failing base mount discards the
     * object that was just created.
     */
    pub fn mount(&mut self) -> LifecycleResult<()> {
        if matches!(
            self.state,
            LifecycleState::Mounted | LifecycleState::Deinitialized
        ) {
            return Err(self.invalid_state("mount"));
        }
        self.generation += 1;
        log::debug!(
            "StyleLifecycle[{}]: mount (generation {})",
            self.name,
            self.generation
        );

        let creation = self.create_ol_object()?;
        self.base.mount()?;
        self.pre_mount_state = self.state;
        self.state = LifecycleState::Mounted;

        match creation {
            Creation::Ready(style) => self.install(style),
            Creation::Deferred(deferred) => {
                log::trace!(
                    "StyleLifecycle[{}]: style creation deferred (generation {})",
                    self.name,
                    self.generation
                );
                self.pending = Some(PendingStyle {
                    generation: self.generation,
                    deferred,
                });
            }
        }
        Ok(())
    }

    pub fn unmount(&mut self) -> LifecycleResult<()> {
        if self.state != LifecycleState::Mounted {
            return Err(self.invalid_state("unmount"));
        }
        log::debug!("StyleLifecycle[{}]: unmount", self.name);
        self.base.unmount()?;
        self.release();
        self.state = LifecycleState::Unmounted;
        Ok(())
    }

    /// Tears the current engine object down and mounts a fresh one.
    pub fn refresh(&mut self) -> LifecycleResult<()> {
        log::debug!("StyleLifecycle[{}]: refresh", self.name);
        self.unmount()?;
        self.mount()
    }

    /// The current engine object, absent until created or after teardown.
    pub fn get_style(&self) -> Option<Rc<S>> {
        self.engine_object.borrow().clone()
    }

    pub fn style(&self) -> Option<Rc<S>> {
        self.get_style()
    }

    /// The `map` capability of the injected services, read at call time.
    pub fn map<M: Any>(&self) -> Option<Rc<M>> {
        self.base.injected_services()?.get::<M>(MAP_SERVICE)
    }

    /*
     * The bag handed to descendants: the base's services with a `style`
     * capability on top. The capability reads the shared slot each time it is
     * resolved, so it tracks the live engine object even after the bag has
     * been handed out.
     */
    pub fn get_services(&self) -> ServiceBag {
        let slot = Rc::clone(&self.engine_object);
        let style_layer = ServiceBag::new().with_provider(STYLE_SERVICE, move || {
            slot.borrow()
                .clone()
                .map(|style| style as Rc<dyn Any>)
        });
        merge_bags(&[&self.base.get_services(), &style_layer])
    }

    /*
     * Installs a parked deferred creation if it has resolved.
     * Returns `Ok(true)` when a new engine object was installed, `Ok(false)`
     * when nothing was pending or the value is not ready yet. A rejected
     * creation is returned as the error and is not retried; it aborts the
     * mount it belongs to (see `fail_pending`).
     */
    pub fn poll_pending(&mut self) -> LifecycleResult<bool> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(false);
        };
        match pending.deferred.try_take() {
            Ok(None) => Ok(false),
            Ok(Some(style)) => {
                let generation = pending.generation;
                self.pending = None;
                Ok(self.install_resolved(ResolvedStyle { generation, style }))
            }
            Err(e) => {
                let generation = pending.generation;
                self.pending = None;
                Err(self.fail_pending(generation, e))
            }
        }
    }

    /*
     * Reports a deferred creation of `generation` as failed and hands the
     * error back. If it belongs to the current mount, that mount is aborted:
     * the base is unmounted and the component returns to the state it was
     * mounted from, so it is never left mounted without an engine object.
     * A failure of a superseded creation changes nothing.
     */
    pub fn fail_pending(&mut self, generation: u64, error: LifecycleError) -> LifecycleError {
        log::error!(
            "StyleLifecycle[{}]: deferred style creation failed (generation {}): {}",
            self.name,
            generation,
            error
        );
        if generation != self.generation || self.state != LifecycleState::Mounted {
            return error;
        }
        if let Err(e) = self.base.unmount() {
            log::error!(
                "StyleLifecycle[{}]: base unmount after failed creation also failed: {}",
                self.name,
                e
            );
        }
        self.release();
        self.state = self.pre_mount_state;
        error
    }

    /// Detaches the parked creation so the host can await it outside any borrow.
    pub fn take_pending(&mut self) -> Option<PendingStyle<S>> {
        self.pending.take()
    }

    /*
     * Installs a resolved creation. Refused (returns `false`) unless the
     * component is mounted and the creation belongs to the current generation.
     */
    pub fn install_resolved(&mut self, resolved: ResolvedStyle<S>) -> bool {
        if resolved.generation != self.generation || self.state != LifecycleState::Mounted {
            log::debug!(
                "StyleLifecycle[{}]: discarding stale style (generation {}, current {}, {})",
                self.name,
                resolved.generation,
                self.generation,
                self.state.as_str()
            );
            return false;
        }
        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.generation == resolved.generation)
        {
            self.pending = None;
        }
        self.install(resolved.style);
        true
    }

    pub fn render<'a, C>(&self, children: &'a [C]) -> RenderOutput<'a, C> {
        render_or_placeholder(&self.name, children)
    }

    fn install(&mut self, style: S) {
        log::trace!(
            "StyleLifecycle[{}]: engine object installed (generation {})",
            self.name,
            self.generation
        );
        *self.engine_object.borrow_mut() = Some(Rc::new(style));
    }

    fn release(&mut self) {
        self.engine_object.borrow_mut().take();
        self.pending = None;
        self.generation += 1;
    }
}
