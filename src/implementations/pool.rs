use std::fmt;
use std::rc::Rc;

use chrono::Utc;
use indexmap::IndexMap;
use log::{debug, warn};

use crate::config::PoolConfig;
use crate::errors::{PropertyError, PropertyResult};
use crate::implementations::pattern::Pattern;
use crate::implementations::property::Property;
use crate::models::snapshot::{PoolSnapshot, PropertySnapshot};
use crate::models::value::PropertyValue;
use crate::traits::erased_property::ErasedProperty;
use crate::traits::listener::{ChangeListener, PropertyListener, TypedListener};

/// Registry of properties by name.
///
/// The pool holds properties of any payload type behind [`ErasedProperty`].
/// At most one property is registered per name; registering another property
/// under a taken name replaces the old entry in place. The replaced property
/// keeps its subscribers but can no longer be reached through the pool.
///
/// Iteration, rendering and snapshots follow first-registration order.
pub struct PropertyPool {
    registry: IndexMap<String, Box<dyn ErasedProperty>>,
    config: PoolConfig,
}

impl Default for PropertyPool {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyPool {
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            registry: IndexMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Register `property` under its name, returning the entry it replaced
    pub fn register<T: PropertyValue>(
        &mut self,
        property: &Property<T>,
    ) -> Option<Box<dyn ErasedProperty>> {
        let replaced = self
            .registry
            .insert(property.name().to_string(), Box::new(property.clone()));

        match &replaced {
            Some(old) if old.subscriber_count() > 0 => warn!(
                "Replaced property {} (id {}) with id {}; {} subscribers stay on the old instance",
                property.name(),
                old.id(),
                property.id(),
                old.subscriber_count()
            ),
            Some(old) => debug!(
                "Replaced property {} (id {}) with id {}",
                property.name(),
                old.id(),
                property.id()
            ),
            None => debug!("Registered property {} (id {})", property.name(), property.id()),
        }

        replaced
    }

    /// Create a property with this pool's policies and register it
    pub fn register_new<T: PropertyValue>(
        &mut self,
        name: &str,
        value: T,
        group: &str,
        locked: bool,
    ) -> Property<T> {
        let property = Property::with_options(name, value, self.config.property_options(group, locked));
        self.register(&property);
        property
    }

    /// Remove the entry under the property's name. The property itself is left intact.
    pub fn unregister<T: PropertyValue>(&mut self, property: &Property<T>) -> bool {
        self.unregister_name(property.name())
    }

    pub fn unregister_name(&mut self, name: &str) -> bool {
        let removed = self.registry.shift_remove(name).is_some();
        if removed {
            debug!("Unregistered property {}", name);
        }
        removed
    }

    /// Look up a property by name and payload type
    pub fn pull<T: PropertyValue>(&self, name: &str) -> PropertyResult<Property<T>> {
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| PropertyError::KeyNotFound(name.to_string()))?;

        entry
            .as_any()
            .downcast_ref::<Property<T>>()
            .cloned()
            .ok_or_else(|| PropertyError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>().to_string(),
                found: entry.type_name().to_string(),
            })
    }

    /// Look up a property by name without knowing its payload type
    pub fn get(&self, name: &str) -> Option<&dyn ErasedProperty> {
        self.registry.get(name).map(|entry| &**entry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    /// Names of the properties `pattern` resolves to, in registry order
    pub fn matching(&self, pattern: &str) -> PropertyResult<Vec<&str>> {
        let pattern = Pattern::parse(pattern)?;
        Ok(self
            .registry
            .iter()
            .filter(|&(key, property)| pattern.matches(key, &**property))
            .map(|(key, _)| key.as_str())
            .collect())
    }

    /// Attach `listener` to every property matching `pattern`.
    ///
    /// Only properties registered now are affected; later registrations are
    /// not picked up. Returns the number of properties subscribed to.
    pub fn add_subscription(
        &self,
        listener: Rc<dyn ChangeListener>,
        pattern: &str,
    ) -> PropertyResult<usize> {
        let pattern = Pattern::parse(pattern)?;
        let mut count = 0;
        for (key, property) in &self.registry {
            if pattern.matches(key, &**property) {
                property.subscribe_untyped(Rc::clone(&listener));
                count += 1;
            }
        }
        debug!(
            "Subscription {:?} ({:?} mode) attached to {} properties",
            pattern.source(),
            pattern.target(),
            count
        );
        Ok(count)
    }

    /// Attach a typed listener through `pattern`.
    ///
    /// Matching properties with another payload type never notify it. The
    /// returned adapter is what was subscribed; pass it to
    /// [`remove_subscription`](PropertyPool::remove_subscription) to detach.
    pub fn add_typed_subscription<T: PropertyValue>(
        &self,
        listener: Rc<dyn PropertyListener<T>>,
        pattern: &str,
    ) -> PropertyResult<Rc<dyn ChangeListener>> {
        let adapter: Rc<dyn ChangeListener> = Rc::new(TypedListener::new(listener));
        self.add_subscription(Rc::clone(&adapter), pattern)?;
        Ok(adapter)
    }

    /// Detach `listener` once from every property matching `pattern`
    pub fn remove_subscription(
        &self,
        listener: &Rc<dyn ChangeListener>,
        pattern: &str,
    ) -> PropertyResult<usize> {
        let pattern = Pattern::parse(pattern)?;
        let mut removed = 0;
        for (key, property) in &self.registry {
            if pattern.matches(key, &**property) && property.unsubscribe_untyped(listener) {
                removed += 1;
            }
        }
        debug!("Subscription {:?} removed from {} properties", pattern.source(), removed);
        Ok(removed)
    }

    /// Every property rendered and joined with `", "`, in registry order
    pub fn as_string(&self) -> String {
        self.registry
            .values()
            .map(|property| property.describe())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            taken_at: Utc::now(),
            properties: self
                .registry
                .iter()
                .map(|(key, property)| PropertySnapshot {
                    id: property.id(),
                    name: key.clone(),
                    group: property.group().to_string(),
                    type_name: property.type_name().to_string(),
                    kind: property.value_kind(),
                    value: property.value_text(),
                    mod_count: property.mod_count(),
                    subscribers: property.subscriber_count(),
                    locked: property.is_locked(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for PropertyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl fmt::Debug for PropertyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyPool")
            .field("names", &self.registry.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}
