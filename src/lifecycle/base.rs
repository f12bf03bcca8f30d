/*
 * Defines the generic component lifecycle that style components are composed
 * with. `BaseLifecycle` is the contract a host supplies; `ComponentBase` is the
 * stock implementation used when no host-specific behaviour is needed. It
 * tracks the lifecycle state, holds the service bag injected by an ancestor,
 * and re-exposes that bag to descendants.
 */
use super::deferred::Deferred;
use super::error::{LifecycleError, Result as LifecycleResult};
use super::services::ServiceBag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Initialized,
    Mounted,
    Unmounted,
    Deinitialized,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Created => "created",
            LifecycleState::Initialized => "initialized",
            LifecycleState::Mounted => "mounted",
            LifecycleState::Unmounted => "unmounted",
            LifecycleState::Deinitialized => "deinitialized",
        }
    }
}

/*
 * The lifecycle hooks a style component delegates to. Implementations must not
 * create the engine object themselves; that is the style lifecycle's job.
 * `injected_services` is the bag provided by an ancestor, if any, and is read
 * on every access so late injection is observed.
 */
pub trait BaseLifecycle {
    fn init(&mut self) -> Deferred<()>;
    fn deinit(&mut self) -> LifecycleResult<()>;
    fn mount(&mut self) -> LifecycleResult<()>;
    fn unmount(&mut self) -> LifecycleResult<()>;
    fn get_services(&self) -> ServiceBag;
    fn injected_services(&self) -> Option<ServiceBag>;
}

#[derive(Debug)]
pub struct ComponentBase {
    name: String,
    state: LifecycleState,
    injected: Option<ServiceBag>,
}

impl ComponentBase {
    pub fn new(name: &str) -> Self {
        ComponentBase {
            name: name.to_string(),
            state: LifecycleState::Created,
            injected: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Makes an ancestor's service bag available to this component.
    pub fn inject_services(&mut self, services: ServiceBag) {
        log::trace!(
            "ComponentBase[{}]: services injected: {:?}",
            self.name,
            services
        );
        self.injected = Some(services);
    }

    fn invalid_state(&self, operation: &'static str) -> LifecycleError {
        LifecycleError::InvalidState {
            component: self.name.clone(),
            operation,
            state: self.state.as_str(),
        }
    }

    fn ensure_alive(&self, operation: &'static str) -> LifecycleResult<()> {
        if self.state == LifecycleState::Deinitialized {
            return Err(self.invalid_state(operation));
        }
        Ok(())
    }
}

impl BaseLifecycle for ComponentBase {
    fn init(&mut self) -> Deferred<()> {
        // Initialization happens once, before the first mount.
        if self.state != LifecycleState::Created {
            return Deferred::failed(self.invalid_state("init"));
        }
        log::debug!("ComponentBase[{}]: init", self.name);
        self.state = LifecycleState::Initialized;
        Deferred::ready(())
    }

    fn deinit(&mut self) -> LifecycleResult<()> {
        self.ensure_alive("deinit")?;
        log::debug!("ComponentBase[{}]: deinit", self.name);
        self.state = LifecycleState::Deinitialized;
        Ok(())
    }

    fn mount(&mut self) -> LifecycleResult<()> {
        self.ensure_alive("mount")?;
        log::debug!("ComponentBase[{}]: mount", self.name);
        self.state = LifecycleState::Mounted;
        Ok(())
    }

    fn unmount(&mut self) -> LifecycleResult<()> {
        self.ensure_alive("unmount")?;
        log::debug!("ComponentBase[{}]: unmount", self.name);
        self.state = LifecycleState::Unmounted;
        Ok(())
    }

    fn get_services(&self) -> ServiceBag {
        self.injected.clone().unwrap_or_default()
    }

    fn injected_services(&self) -> Option<ServiceBag> {
        self.injected.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::services::MAP_SERVICE;
    use std::rc::Rc;

    #[test]
    fn test_state_transitions() {
        let mut base = ComponentBase::new("vl-style-fill");
        assert_eq!(base.state(), LifecycleState::Created);

        assert_eq!(base.init().try_take(), Ok(Some(())));
        assert_eq!(base.state(), LifecycleState::Initialized);

        base.mount().unwrap();
        assert_eq!(base.state(), LifecycleState::Mounted);

        base.unmount().unwrap();
        assert_eq!(base.state(), LifecycleState::Unmounted);

        base.deinit().unwrap();
        assert_eq!(base.state(), LifecycleState::Deinitialized);
    }

    #[test]
    fn test_operations_after_deinit_fail() {
        let mut base = ComponentBase::new("vl-style-fill");
        base.deinit().unwrap();

        assert!(matches!(
            base.mount(),
            Err(LifecycleError::InvalidState { operation: "mount", .. })
        ));
        assert!(matches!(
            base.init().try_take(),
            Err(LifecycleError::InvalidState { operation: "init", .. })
        ));
    }

    #[test]
    fn test_init_only_from_created() {
        let mut base = ComponentBase::new("vl-style-circle");
        base.init().try_take().unwrap();
        base.mount().unwrap();

        assert!(matches!(
            base.init().try_take(),
            Err(LifecycleError::InvalidState { operation: "init", state: "mounted", .. })
        ));
        assert_eq!(base.state(), LifecycleState::Mounted);
    }

    #[test]
    fn test_services_pass_through_injected_bag() {
        let mut base = ComponentBase::new("vl-style-box");
        assert!(base.injected_services().is_none());
        assert!(base.get_services().is_empty());

        base.inject_services(ServiceBag::new().with_value(MAP_SERVICE, Rc::new(5i32)));

        assert!(base.get_services().contains(MAP_SERVICE));
        assert_eq!(
            base.injected_services()
                .and_then(|bag| bag.get::<i32>(MAP_SERVICE))
                .as_deref(),
            Some(&5)
        );
    }
}
