#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::config::{LockPolicy, PoolConfig, TransformCommit};
    use crate::errors::PropertyError;
    use crate::implementations::pool::PropertyPool;
    use crate::implementations::property::Property;
    use crate::models::change::{ErasedChange, PropertyChange};
    use crate::models::value::ValueKind;
    use crate::tests::{setup, Recorder, TextRecorder};
    use crate::traits::erased_property::ErasedProperty;
    use crate::traits::listener::ChangeListener;

    fn game_pool() -> PropertyPool {
        let mut pool = PropertyPool::new();
        pool.register(&Property::new("main.score", 0));
        pool.register(&Property::new("main.lives", 3));
        pool.register(&Property::new("other.score", 0));
        pool.register(&Property::new("mainX", 0));
        pool
    }

    #[test]
    fn pull_returns_the_registered_instance() {
        setup();
        let mut pool = PropertyPool::new();
        let lives = Property::new("lives", 3);
        pool.register(&lives);

        let pulled = pool.pull::<i32>("lives").unwrap();

        assert!(pulled.ptr_eq(&lives));
        pulled.set_value(1).unwrap();
        assert_eq!(lives.value(), 1);
    }

    #[test]
    fn pull_with_wrong_type_is_a_mismatch() {
        let mut pool = PropertyPool::new();
        pool.register(&Property::new("lives", 3));

        match pool.pull::<String>("lives") {
            Err(PropertyError::TypeMismatch { name, expected, found }) => {
                assert_eq!(name, "lives");
                assert_eq!(expected, std::any::type_name::<String>());
                assert_eq!(found, "i32");
            }
            other => panic!("expected type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn pull_of_unknown_name_is_key_not_found() {
        let pool = PropertyPool::new();
        assert!(matches!(
            pool.pull::<i32>("missing"),
            Err(PropertyError::KeyNotFound(ref name)) if name == "missing"
        ));
    }

    #[test]
    fn registering_a_taken_name_replaces_the_entry() {
        let mut pool = PropertyPool::new();
        let old = Property::new("lives", 3);
        let new = Property::new("lives", 9);
        pool.register(&old);
        let recorder = Rc::new(Recorder::<i32>::new());
        pool.add_typed_subscription::<i32>(recorder.clone(), "lives").unwrap();

        let replaced = pool.register(&new);

        assert_eq!(replaced.map(|p| p.id()), Some(old.id()));
        assert!(pool.pull::<i32>("lives").unwrap().ptr_eq(&new));
        assert_eq!(pool.len(), 1);

        // The old instance still works and keeps its subscriber.
        old.set_value(2).unwrap();
        new.set_value(8).unwrap();
        assert_eq!(old.value(), 2);
        assert_eq!(recorder.events(), vec![PropertyChange { old: 3, new: 2 }]);
    }

    #[test]
    fn unregister_leaves_the_property_usable() {
        let mut pool = PropertyPool::new();
        let lives = Property::new("lives", 3);
        pool.register(&lives);

        assert!(pool.unregister(&lives));
        assert!(!pool.unregister(&lives));
        assert!(!pool.unregister_name("never-registered"));

        assert!(pool.is_empty());
        assert!(matches!(pool.pull::<i32>("lives"), Err(PropertyError::KeyNotFound(_))));
        lives.set_value(4).unwrap();
        assert_eq!(lives.value(), 4);
    }

    #[test]
    fn register_new_applies_pool_policies() {
        let mut pool = PropertyPool::with_config(PoolConfig {
            lock_policy: LockPolicy::Advisory,
            transform_commit: TransformCommit::Commit,
        });

        let seed = pool.register_new("seed", 42_u64, "world", true);

        assert_eq!(pool.config().lock_policy, LockPolicy::Advisory);
        assert!(pool.contains("seed"));
        assert!(seed.is_locked());
        assert_eq!(seed.lock_policy(), LockPolicy::Advisory);
        assert_eq!(seed.group(), "world");
        seed.add_transform_trigger(|v| *v > 100, |_| 100);
        seed.set_value(500).unwrap();
        assert_eq!(seed.value(), 100);
        assert!(pool.pull::<u64>("seed").unwrap().ptr_eq(&seed));
    }

    #[test]
    fn register_new_rejects_locked_writes_by_default() {
        let mut pool = PropertyPool::new();
        let seed = pool.register_new("seed", 42, "", true);

        assert!(matches!(seed.set_value(1), Err(PropertyError::Locked(_))));
    }

    #[test]
    fn name_pattern_subscription_reaches_only_matching_properties() {
        setup();
        let pool = game_pool();
        let recorder = Rc::new(Recorder::<i32>::new());

        pool.add_typed_subscription::<i32>(recorder.clone(), "main.*").unwrap();
        assert_eq!(pool.matching("main.*").unwrap(), vec!["main.score", "main.lives"]);

        pool.pull::<i32>("main.score").unwrap().set_value(10).unwrap();
        assert_eq!(recorder.events(), vec![PropertyChange { old: 0, new: 10 }]);

        pool.pull::<i32>("other.score").unwrap().set_value(5).unwrap();
        pool.pull::<i32>("mainX").unwrap().set_value(5).unwrap();
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn group_pattern_subscription_matches_groups() {
        let mut pool = PropertyPool::new();
        let hud = pool.register_new("score", 0, "ui.hud", false);
        let world = pool.register_new("gravity", 9.8, "world", false);
        let listener = Rc::new(TextRecorder::new());

        let count = pool.add_subscription(listener.clone(), "$ui.*").unwrap();

        assert_eq!(count, 1);
        hud.set_value(1).unwrap();
        world.set_value(1.6).unwrap();
        assert_eq!(listener.names(), vec!["score".to_string()]);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let pool = game_pool();
        let listener = Rc::new(TextRecorder::new());

        let result = pool.add_subscription(listener, "main.[");

        match result {
            Err(PropertyError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "main.["),
            other => panic!("expected invalid pattern, got {:?}", other),
        }
    }

    #[test]
    fn erased_listener_can_downcast_the_change() {
        let mut pool = PropertyPool::new();
        let lives = pool.register_new("lives", 3, "", false);
        let paused = pool.register_new("paused", false, "", false);
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let listener: Rc<dyn ChangeListener> =
            Rc::new(move |sender: &dyn ErasedProperty, change: &ErasedChange<'_>| {
                if let Some(change) = change.downcast::<i32>() {
                    sink.borrow_mut().push(format!("{} int {}->{}", sender.name(), change.old, change.new));
                } else {
                    sink.borrow_mut()
                        .push(format!("{} {}->{}", sender.name(), change.old_text(), change.new_text()));
                }
            });

        assert_eq!(pool.add_subscription(listener, "*").unwrap(), 2);
        lives.set_value(2).unwrap();
        paused.invert().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec!["lives int 3->2".to_string(), "paused false->true".to_string()]
        );
    }

    #[test]
    fn typed_subscription_ignores_other_payload_types() {
        let mut pool = PropertyPool::new();
        let lives = pool.register_new("lives", 3, "", false);
        let paused = pool.register_new("paused", false, "", false);
        let recorder = Rc::new(Recorder::<i32>::new());

        pool.add_typed_subscription::<i32>(recorder.clone(), "*").unwrap();
        paused.set_value(true).unwrap();
        lives.set_value(1).unwrap();

        assert_eq!(recorder.events(), vec![PropertyChange { old: 3, new: 1 }]);
        assert_eq!(paused.subscriber_count(), 1);
    }

    #[test]
    fn subscriptions_only_cover_properties_registered_at_the_time() {
        let mut pool = PropertyPool::new();
        let listener = Rc::new(TextRecorder::new());
        pool.add_subscription(listener.clone(), "main.*").unwrap();

        let late = pool.register_new("main.late", 0, "", false);
        late.set_value(1).unwrap();

        assert_eq!(listener.count(), 0);
    }

    #[test]
    fn remove_subscription_detaches_once_per_property() {
        let pool = game_pool();
        let listener: Rc<dyn ChangeListener> = Rc::new(TextRecorder::new());
        pool.add_subscription(Rc::clone(&listener), "main.*").unwrap();
        pool.add_subscription(Rc::clone(&listener), "main.score").unwrap();

        assert_eq!(pool.remove_subscription(&listener, "main.*").unwrap(), 2);
        assert_eq!(pool.get("main.score").unwrap().subscriber_count(), 1);
        assert_eq!(pool.get("main.lives").unwrap().subscriber_count(), 0);
        assert_eq!(pool.remove_subscription(&listener, "main.lives").unwrap(), 0);
    }

    #[test]
    fn as_string_follows_registration_order() {
        let mut pool = PropertyPool::new();
        pool.register(&Property::new("lives", 3));
        pool.register(&Property::builder("score", 10).group("ui.hud").build());
        pool.register(&Property::new("paused", false));
        pool.register(&Property::new("lives", 5));

        assert_eq!(pool.as_string(), "lives: 5, score[ui.hud]: 10, paused: false");
        assert_eq!(pool.to_string(), pool.as_string());
        assert_eq!(pool.names().collect::<Vec<_>>(), vec!["lives", "score", "paused"]);
        assert_eq!(PropertyPool::new().as_string(), "");
    }

    #[test]
    fn snapshot_serializes_every_property() {
        let mut pool = PropertyPool::new();
        let score = pool.register_new("main.score", 7, "ui.hud", false);
        score.set_format("{:>3}");
        score.add(1).unwrap();
        pool.add_subscription(Rc::new(TextRecorder::new()), "main.*").unwrap();

        let snapshot = pool.snapshot();

        assert_eq!(snapshot.properties.len(), 1);
        let entry = &snapshot.properties[0];
        assert_eq!(entry.id, score.id());
        assert_eq!(entry.name, "main.score");
        assert_eq!(entry.group, "ui.hud");
        assert_eq!(entry.type_name, "i32");
        assert_eq!(entry.kind, ValueKind::SignedInteger);
        assert_eq!(entry.value, "  8");
        assert_eq!(entry.mod_count, 1);
        assert_eq!(entry.subscribers, 1);
        assert!(!entry.locked);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["properties"][0]["name"], "main.score");
        assert_eq!(json["properties"][0]["kind"], "signed_integer");
        assert!(json["taken_at"].is_string());
    }
}
