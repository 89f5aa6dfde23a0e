use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{trace, warn};

use crate::config::{LockPolicy, PropertyOptions, TransformCommit};
use crate::errors::{CallbackError, PropertyError, PropertyResult};
use crate::implementations::format;
use crate::models::change::{ErasedChange, PropertyChange};
use crate::models::value::{PropertyValue, ValueKind};
use crate::traits::erased_property::ErasedProperty;
use crate::traits::listener::{ChangeListener, PropertyListener};

/// ID given to the first property created in the process
pub const FIRST_PROPERTY_ID: u64 = 100;

static NEXT_ID: AtomicU64 = AtomicU64::new(FIRST_PROPERTY_ID);

type Predicate<T> = Rc<dyn Fn(&T) -> bool>;
type Effect<T> = Rc<dyn Fn(&T) -> Result<(), CallbackError>>;
type Transform<T> = Rc<dyn Fn(&T) -> T>;

struct Trigger<T> {
    predicate: Predicate<T>,
    effect: Effect<T>,
}

impl<T> Clone for Trigger<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Rc::clone(&self.predicate),
            effect: Rc::clone(&self.effect),
        }
    }
}

struct TransformTrigger<T> {
    predicate: Predicate<T>,
    transform: Transform<T>,
}

impl<T> Clone for TransformTrigger<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Rc::clone(&self.predicate),
            transform: Rc::clone(&self.transform),
        }
    }
}

enum Subscriber<T: PropertyValue> {
    Typed(Rc<dyn PropertyListener<T>>),
    Erased(Rc<dyn ChangeListener>),
}

impl<T: PropertyValue> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        match self {
            Subscriber::Typed(listener) => Subscriber::Typed(Rc::clone(listener)),
            Subscriber::Erased(listener) => Subscriber::Erased(Rc::clone(listener)),
        }
    }
}

impl<T: PropertyValue> Subscriber<T> {
    fn address(&self) -> *const () {
        match self {
            Subscriber::Typed(listener) => Rc::as_ptr(listener) as *const (),
            Subscriber::Erased(listener) => Rc::as_ptr(listener) as *const (),
        }
    }
}

struct PropertyInner<T: PropertyValue> {
    id: u64,
    name: String,
    group: String,
    locked: bool,
    lock_policy: LockPolicy,
    transform_commit: TransformCommit,
    format: RefCell<String>,
    value: RefCell<T>,
    mod_count: Cell<u64>,
    triggers: RefCell<Vec<Trigger<T>>>,
    transforms: RefCell<Vec<TransformTrigger<T>>>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
}

/// A named, typed, observable value.
///
/// `Property` is a handle: clones share the same underlying cell, so a
/// producer and the pool can both hold one. Every write goes through
/// [`set_value`](Property::set_value), which runs the trigger chain, the
/// transform chain and then notifies subscribers before storing the value.
///
/// Handles are single-threaded (`!Send`). Callback lists are copied before
/// dispatch, so callbacks may freely read the property, add triggers,
/// subscribe, or write to it again. Re-entrant writes are not guarded.
pub struct Property<T: PropertyValue> {
    inner: Rc<PropertyInner<T>>,
}

impl<T: PropertyValue> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: PropertyValue> Property<T> {
    /// Create an unlocked, ungrouped property
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self::with_options(name, value, PropertyOptions::default())
    }

    pub fn with_options(name: impl Into<String>, value: T, options: PropertyOptions) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            inner: Rc::new(PropertyInner {
                id,
                name: name.into(),
                group: options.group,
                locked: options.locked,
                lock_policy: options.lock_policy,
                transform_commit: options.transform_commit,
                format: RefCell::new(options.format),
                value: RefCell::new(value),
                mod_count: Cell::new(0),
                triggers: RefCell::new(Vec::new()),
                transforms: RefCell::new(Vec::new()),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn builder(name: impl Into<String>, value: T) -> PropertyBuilder<T> {
        PropertyBuilder {
            name: name.into(),
            value,
            options: PropertyOptions::default(),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn group(&self) -> &str {
        &self.inner.group
    }

    pub fn is_locked(&self) -> bool {
        self.inner.locked
    }

    pub fn lock_policy(&self) -> LockPolicy {
        self.inner.lock_policy
    }

    pub fn transform_commit(&self) -> TransformCommit {
        self.inner.transform_commit
    }

    /// Number of completed writes
    pub fn mod_count(&self) -> u64 {
        self.inner.mod_count.get()
    }

    pub fn value(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Read the value without cloning it.
    ///
    /// The value stays borrowed while `f` runs, so `f` must not write to this
    /// property.
    pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn format(&self) -> String {
        self.inner.format.borrow().clone()
    }

    pub fn set_format(&self, format: impl Into<String>) {
        *self.inner.format.borrow_mut() = format.into();
    }

    /// The value rendered through the format, or its `Display` form if there is none
    pub fn formatted(&self) -> String {
        let template = self.inner.format.borrow();
        let value = self.inner.value.borrow();
        if template.is_empty() {
            value.to_string()
        } else {
            format::render(&template, &*value)
        }
    }

    /// Write a new value.
    ///
    /// Steps, in order: triggers whose predicate holds on `value` run their
    /// side effect; the transform chain runs; subscribers are notified with
    /// the old and new value; the modification count is bumped; the value is
    /// stored. Under [`TransformCommit::Discard`] the transform output is
    /// dropped and `value` itself is notified and stored.
    ///
    /// A failing trigger aborts the write. Triggers that ran before it are
    /// not undone.
    pub fn set_value(&self, value: T) -> PropertyResult<()> {
        let inner = &self.inner;
        if inner.locked && inner.lock_policy == LockPolicy::Enforce {
            warn!("Rejected write to locked property {}", inner.name);
            return Err(PropertyError::Locked(inner.name.clone()));
        }

        let triggers = inner.triggers.borrow().clone();
        for (index, trigger) in triggers.iter().enumerate() {
            if (trigger.predicate)(&value) {
                trace!("{}: trigger {} fired", inner.name, index);
                (trigger.effect)(&value).map_err(|source| PropertyError::Callback {
                    name: inner.name.clone(),
                    source,
                })?;
            }
        }

        let value = self.run_transforms(value);

        let change = PropertyChange {
            old: self.value(),
            new: value,
        };
        self.notify(&change);

        inner.mod_count.set(inner.mod_count.get() + 1);
        trace!("{}: committed {}", inner.name, change.new);
        *inner.value.borrow_mut() = change.new;
        Ok(())
    }

    fn run_transforms(&self, value: T) -> T {
        let transforms = self.inner.transforms.borrow().clone();
        if transforms.is_empty() {
            return value;
        }

        let mut candidate = value.clone();
        for (index, entry) in transforms.iter().enumerate() {
            if (entry.predicate)(&value) {
                candidate = (entry.transform)(&candidate);
                trace!("{}: transform {} produced {}", self.inner.name, index, candidate);
            }
        }

        match self.inner.transform_commit {
            TransformCommit::Discard => {
                trace!("{}: discarding transformed value {}", self.inner.name, candidate);
                value
            }
            TransformCommit::Commit => candidate,
        }
    }

    fn notify(&self, change: &PropertyChange<T>) {
        let subscribers = self.inner.subscribers.borrow().clone();
        trace!("{}: notifying {} subscribers", self.inner.name, subscribers.len());
        for subscriber in &subscribers {
            match subscriber {
                Subscriber::Typed(listener) => listener.on_property_change(self, change),
                Subscriber::Erased(listener) => {
                    listener.on_change(self, &ErasedChange::new(&change.old, &change.new))
                }
            }
        }
    }

    /// Run `effect` on every write whose value satisfies `predicate`
    pub fn add_trigger(
        &self,
        predicate: impl Fn(&T) -> bool + 'static,
        effect: impl Fn(&T) + 'static,
    ) {
        self.try_add_trigger(predicate, move |value| {
            effect(value);
            Ok(())
        });
    }

    /// Like [`add_trigger`](Property::add_trigger), but an `Err` from `effect` aborts the write
    pub fn try_add_trigger(
        &self,
        predicate: impl Fn(&T) -> bool + 'static,
        effect: impl Fn(&T) -> Result<(), CallbackError> + 'static,
    ) {
        self.inner.triggers.borrow_mut().push(Trigger {
            predicate: Rc::new(predicate),
            effect: Rc::new(effect),
        });
    }

    /// Predicates see the written value; each matching transform receives the
    /// previous transform's output.
    pub fn add_transform_trigger(
        &self,
        predicate: impl Fn(&T) -> bool + 'static,
        transform: impl Fn(&T) -> T + 'static,
    ) {
        self.inner.transforms.borrow_mut().push(TransformTrigger {
            predicate: Rc::new(predicate),
            transform: Rc::new(transform),
        });
    }

    /// Subscribing the same listener twice delivers each event twice
    pub fn subscribe(&self, listener: Rc<dyn PropertyListener<T>>) {
        self.inner.subscribers.borrow_mut().push(Subscriber::Typed(listener));
    }

    pub fn subscribe_erased(&self, listener: Rc<dyn ChangeListener>) {
        self.inner.subscribers.borrow_mut().push(Subscriber::Erased(listener));
    }

    /// Remove the most recent subscription of `listener`
    pub fn unsubscribe(&self, listener: &Rc<dyn PropertyListener<T>>) -> bool {
        self.remove_subscriber(Rc::as_ptr(listener) as *const ())
    }

    pub fn unsubscribe_erased(&self, listener: &Rc<dyn ChangeListener>) -> bool {
        self.remove_subscriber(Rc::as_ptr(listener) as *const ())
    }

    fn remove_subscriber(&self, address: *const ()) -> bool {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        match subscribers.iter().rposition(|s| s.address() == address) {
            Some(index) => {
                subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// True if both handles refer to the same property
    pub fn ptr_eq(&self, other: &Property<T>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: PropertyValue> fmt::Display for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.group.is_empty() {
            write!(f, "{}: {}", self.inner.name, self.formatted())
        } else {
            write!(f, "{}[{}]: {}", self.inner.name, self.inner.group, self.formatted())
        }
    }
}

impl<T: PropertyValue> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("group", &self.inner.group)
            .field("value", &*self.inner.value.borrow())
            .field("mod_count", &self.inner.mod_count.get())
            .field("locked", &self.inner.locked)
            .finish()
    }
}

impl<T: PropertyValue> ErasedProperty for Property<T> {
    fn id(&self) -> u64 {
        self.inner.id
    }

    fn name(&self) -> &str {
        &self.inner.name
    }

    fn group(&self) -> &str {
        &self.inner.group
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn value_kind(&self) -> ValueKind {
        T::kind()
    }

    fn value_text(&self) -> String {
        self.formatted()
    }

    fn mod_count(&self) -> u64 {
        self.inner.mod_count.get()
    }

    fn subscriber_count(&self) -> usize {
        Property::subscriber_count(self)
    }

    fn is_locked(&self) -> bool {
        self.inner.locked
    }

    fn subscribe_untyped(&self, listener: Rc<dyn ChangeListener>) {
        self.subscribe_erased(listener);
    }

    fn unsubscribe_untyped(&self, listener: &Rc<dyn ChangeListener>) -> bool {
        self.unsubscribe_erased(listener)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Fluent construction of a [`Property`]
pub struct PropertyBuilder<T: PropertyValue> {
    name: String,
    value: T,
    options: PropertyOptions,
}

impl<T: PropertyValue> PropertyBuilder<T> {
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.options.group = group.into();
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.options.locked = locked;
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.options.format = format.into();
        self
    }

    pub fn lock_policy(mut self, policy: LockPolicy) -> Self {
        self.options.lock_policy = policy;
        self
    }

    pub fn transform_commit(mut self, commit: TransformCommit) -> Self {
        self.options.transform_commit = commit;
        self
    }

    pub fn build(self) -> Property<T> {
        Property::with_options(self.name, self.value, self.options)
    }
}
