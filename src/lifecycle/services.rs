/*
 * The service bag propagated down the component tree. Each capability is
 * registered under a name and backed by a provider closure, so a capability
 * can either be a fixed value or be computed at the moment it is read (the
 * `style` capability of a style component resolves to whatever engine object
 * is live at that instant).
 *
 * `merge_bags` combines several bags into a new one: later layers override
 * earlier ones and the inputs are never touched, so an ancestor's bag can be
 * layered upon without being mutated.
 */
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub const MAP_SERVICE: &str = "map";
pub const STYLE_SERVICE: &str = "style";

pub type ServiceProvider = Rc<dyn Fn() -> Option<Rc<dyn Any>>>;

#[derive(Clone, Default)]
pub struct ServiceBag {
    providers: BTreeMap<String, ServiceProvider>,
}

impl ServiceBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a capability that always resolves to `value`.
    pub fn with_value<T: Any>(mut self, name: &str, value: Rc<T>) -> Self {
        self.insert_value(name, value);
        self
    }

    /// Registers a capability computed on every access.
    pub fn with_provider<F>(mut self, name: &str, provider: F) -> Self
    where
        F: Fn() -> Option<Rc<dyn Any>> + 'static,
    {
        self.insert_provider(name, provider);
        self
    }

    pub fn insert_value<T: Any>(&mut self, name: &str, value: Rc<T>) {
        let value: Rc<dyn Any> = value;
        self.providers
            .insert(name.to_string(), Rc::new(move || Some(Rc::clone(&value))));
    }

    pub fn insert_provider<F>(&mut self, name: &str, provider: F)
    where
        F: Fn() -> Option<Rc<dyn Any>> + 'static,
    {
        self.providers.insert(name.to_string(), Rc::new(provider));
    }

    /// Resolves a capability without assuming its concrete type.
    pub fn resolve(&self, name: &str) -> Option<Rc<dyn Any>> {
        self.providers.get(name).and_then(|provider| provider())
    }

    /*
     * Resolves a capability and downcasts it to `T`.
     * Returns `None` if the capability is missing, currently resolves to
     * nothing, or holds a value of another type.
     */
    pub fn get<T: Any>(&self, name: &str) -> Option<Rc<T>> {
        let value = self.resolve(name)?;
        match value.downcast::<T>() {
            Ok(typed) => Some(typed),
            Err(_) => {
                log::trace!("ServiceBag: capability '{name}' has an unexpected type.");
                None
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for ServiceBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Combines the given bags into a new one. Later layers win on name clashes.
pub fn merge_bags(layers: &[&ServiceBag]) -> ServiceBag {
    let mut merged = ServiceBag::new();
    for layer in layers {
        for (name, provider) in &layer.providers {
            merged.providers.insert(name.clone(), Rc::clone(provider));
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, PartialEq)]
    struct FakeMap(&'static str);

    #[test]
    fn test_get_downcasts_to_registered_type() {
        let bag = ServiceBag::new().with_value(MAP_SERVICE, Rc::new(FakeMap("main")));
        assert_eq!(bag.get::<FakeMap>(MAP_SERVICE).as_deref(), Some(&FakeMap("main")));
        assert!(bag.get::<String>(MAP_SERVICE).is_none());
        assert!(bag.get::<FakeMap>("missing").is_none());
    }

    #[test]
    fn test_provider_is_evaluated_on_every_access() {
        let counter = Rc::new(Cell::new(0u32));
        let source = Rc::clone(&counter);
        let bag = ServiceBag::new().with_provider("tick", move || {
            source.set(source.get() + 1);
            Some(Rc::new(source.get()) as Rc<dyn Any>)
        });

        assert_eq!(bag.get::<u32>("tick").as_deref(), Some(&1));
        assert_eq!(bag.get::<u32>("tick").as_deref(), Some(&2));
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_merge_later_layers_override_and_inputs_untouched() {
        let ancestor = ServiceBag::new()
            .with_value(MAP_SERVICE, Rc::new(FakeMap("ancestor")))
            .with_value(STYLE_SERVICE, Rc::new(1u8));
        let layer = ServiceBag::new().with_value(STYLE_SERVICE, Rc::new(2u8));

        let merged = merge_bags(&[&ancestor, &layer]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get::<u8>(STYLE_SERVICE).as_deref(), Some(&2));
        assert_eq!(
            merged.get::<FakeMap>(MAP_SERVICE).as_deref(),
            Some(&FakeMap("ancestor"))
        );
        assert_eq!(ancestor.get::<u8>(STYLE_SERVICE).as_deref(), Some(&1));
    }

    #[test]
    fn test_names_are_sorted() {
        let bag = ServiceBag::new()
            .with_value(STYLE_SERVICE, Rc::new(()))
            .with_value(MAP_SERVICE, Rc::new(()));
        assert_eq!(bag.names().collect::<Vec<_>>(), vec!["map", "style"]);
        assert_eq!(format!("{bag:?}"), r#"{"map", "style"}"#);
    }
}
