//! Event Bus
//!
//! Routes UI events to subscribed components and runs them to completion.
//! Components never call each other: they return [`Effect`]s, which the bus
//! turns into queued follow-up events and timer operations.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;
use uuid::Uuid;

use super::messages::{Effect, Topic, UiEvent};
use super::timers::TimerQueue;

/// Unique identifier for a registered component
pub type SubscriptionId = Uuid;

/// A stateful widget that reacts to events
pub trait Component {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Topics this component is subscribed to
    fn topics(&self) -> &'static [Topic];

    /// Handle one event and report follow-up effects
    fn handle(&mut self, event: &UiEvent) -> Vec<Effect>;

    /// Effects to apply once the component is registered
    fn on_mount(&mut self) -> Vec<Effect> {
        Vec::new()
    }
}

/// Shared handle to a registered component
pub type SharedComponent = Rc<RefCell<dyn Component>>;

/// Configuration for the bus
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Maximum events processed for one published event, follow-ups included
    pub max_cascade: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self { max_cascade: 64 }
    }
}

/// Outcome of one dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Events processed, including follow-ups
    pub processed: usize,
    /// Handler invocations
    pub delivered: usize,
    /// Events discarded after the cascade limit was hit
    pub dropped: usize,
}

impl DispatchReport {
    pub fn merge(&mut self, other: DispatchReport) {
        self.processed += other.processed;
        self.delivered += other.delivered;
        self.dropped += other.dropped;
    }
}

struct Registration {
    name: &'static str,
    component: SharedComponent,
    topics: &'static [Topic],
}

/// Single-threaded event bus with a logical clock
pub struct EventBus {
    /// Registered components: SubscriptionId → Registration
    components: HashMap<SubscriptionId, Registration>,
    /// Topic subscriptions in registration order
    subscriptions: HashMap<Topic, Vec<SubscriptionId>>,
    timers: TimerQueue,
    /// Logical time since page load
    now: Duration,
    config: BusConfig,
}

impl EventBus {
    pub fn new(config: BusConfig) -> Self {
        Self {
            components: HashMap::new(),
            subscriptions: HashMap::new(),
            timers: TimerQueue::new(),
            now: Duration::ZERO,
            config,
        }
    }

    /// Register a component on all of its topics and apply its mount effects
    pub fn register(&mut self, component: SharedComponent) -> SubscriptionId {
        let id = Uuid::new_v4();
        let (name, topics, mount_effects) = {
            let mut inner = component.borrow_mut();
            (inner.name(), inner.topics(), inner.on_mount())
        };

        for topic in topics {
            self.subscriptions.entry(*topic).or_default().push(id);
        }
        self.components.insert(
            id,
            Registration {
                name,
                component,
                topics,
            },
        );

        tracing::debug!(component = name, topics = ?topics, "Component registered");

        let mut queue = VecDeque::new();
        self.apply_effects(mount_effects, &mut queue);
        if !queue.is_empty() {
            self.drain(queue);
        }
        id
    }

    /// Remove a component and its subscriptions
    pub fn unregister(&mut self, id: &SubscriptionId) -> bool {
        let Some(registration) = self.components.remove(id) else {
            return false;
        };

        for topic in registration.topics {
            if let Some(subscribers) = self.subscriptions.get_mut(topic) {
                subscribers.retain(|sub| sub != id);
                if subscribers.is_empty() {
                    self.subscriptions.remove(topic);
                }
            }
        }

        tracing::debug!(component = registration.name, "Component unregistered");
        true
    }

    /// Publish an event and process it with all follow-ups
    pub fn publish(&mut self, event: UiEvent) -> DispatchReport {
        let mut queue = VecDeque::new();
        queue.push_back(event);
        self.drain(queue)
    }

    /// Move the logical clock forward, firing due timers in deadline order
    pub fn advance(&mut self, elapsed: Duration) -> DispatchReport {
        let target = self.now + elapsed;
        self.advance_to(target)
    }

    /// Move the logical clock to `target` (never backwards)
    pub fn advance_to(&mut self, target: Duration) -> DispatchReport {
        let mut report = DispatchReport::default();
        if target < self.now {
            return report;
        }

        while let Some((deadline, timer)) = self.timers.pop_due(target) {
            self.now = deadline;
            tracing::trace!(timer = ?timer, at_ms = deadline.as_millis() as u64, "Timer fired");
            report.merge(self.publish(UiEvent::TimerFired { timer }));
        }
        self.now = target;
        report
    }

    /// Logical time since page load
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Names of registered components
    pub fn component_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.components.values().map(|r| r.name).collect();
        names.sort_unstable();
        names
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscriptions.get(&topic).map(Vec::len).unwrap_or(0)
    }

    fn drain(&mut self, mut queue: VecDeque<UiEvent>) -> DispatchReport {
        let mut report = DispatchReport::default();

        while let Some(event) = queue.pop_front() {
            if report.processed >= self.config.max_cascade {
                report.dropped = queue.len() + 1;
                tracing::warn!(
                    limit = self.config.max_cascade,
                    dropped = report.dropped,
                    "Event cascade limit reached, dropping remaining events"
                );
                break;
            }
            report.processed += 1;

            let topic = event.topic();
            let subscribers = match self.subscriptions.get(&topic) {
                Some(subscribers) => subscribers.clone(),
                None => continue,
            };

            for id in subscribers {
                let Some(registration) = self.components.get(&id) else {
                    continue;
                };
                let name = registration.name;
                let component = Rc::clone(&registration.component);

                let effects = match component.try_borrow_mut() {
                    Ok(mut inner) => inner.handle(&event),
                    Err(_) => {
                        tracing::warn!(component = name, "Component busy, event skipped");
                        continue;
                    }
                };
                report.delivered += 1;
                self.apply_effects(effects, &mut queue);
            }
        }

        report
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, queue: &mut VecDeque<UiEvent>) {
        for effect in effects {
            match effect {
                Effect::Emit(event) => queue.push_back(event),
                Effect::Schedule {
                    timer,
                    after,
                    repeat,
                } => {
                    let every = repeat.then_some(after);
                    self.timers.schedule(timer, self.now + after, every);
                }
                Effect::Cancel(timer) => {
                    self.timers.cancel(&timer);
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(BusConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::messages::{Key, TimerId};

    /// Records every event it sees and answers Escape with a follow-up
    struct Recorder {
        seen: Vec<UiEvent>,
        topics: &'static [Topic],
    }

    impl Component for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn topics(&self) -> &'static [Topic] {
            self.topics
        }

        fn handle(&mut self, event: &UiEvent) -> Vec<Effect> {
            self.seen.push(event.clone());
            match event {
                UiEvent::KeyPressed { key: Key::Escape, .. } => {
                    vec![Effect::Emit(UiEvent::SliderNext)]
                }
                UiEvent::SliderPrev => vec![Effect::Schedule {
                    timer: TimerId::SliderAdvance,
                    after: Duration::from_millis(100),
                    repeat: true,
                }],
                UiEvent::TabSelected { .. } => vec![Effect::Cancel(TimerId::SliderAdvance)],
                _ => Vec::new(),
            }
        }
    }

    /// Re-emits every slider event, forever
    struct Looper;

    impl Component for Looper {
        fn name(&self) -> &'static str {
            "looper"
        }

        fn topics(&self) -> &'static [Topic] {
            &[Topic::Slider]
        }

        fn handle(&mut self, _event: &UiEvent) -> Vec<Effect> {
            vec![Effect::Emit(UiEvent::SliderNext)]
        }
    }

    fn recorder(topics: &'static [Topic]) -> Rc<RefCell<Recorder>> {
        Rc::new(RefCell::new(Recorder {
            seen: Vec::new(),
            topics,
        }))
    }

    #[test]
    fn test_routes_by_topic() {
        let mut bus = EventBus::default();
        let keyboard = recorder(&[Topic::Keyboard]);
        let slider = recorder(&[Topic::Slider]);
        bus.register(keyboard.clone());
        bus.register(slider.clone());

        let report = bus.publish(UiEvent::escape());

        // Escape reaches the keyboard recorder, whose follow-up reaches the slider one
        assert_eq!(report.processed, 2);
        assert_eq!(report.delivered, 2);
        assert_eq!(keyboard.borrow().seen, vec![UiEvent::escape()]);
        assert_eq!(slider.borrow().seen, vec![UiEvent::SliderNext]);
    }

    #[test]
    fn test_unregister() {
        let mut bus = EventBus::default();
        let keyboard = recorder(&[Topic::Keyboard]);
        let id = bus.register(keyboard.clone());
        assert_eq!(bus.subscriber_count(Topic::Keyboard), 1);

        assert!(bus.unregister(&id));
        assert!(!bus.unregister(&id));
        assert_eq!(bus.subscriber_count(Topic::Keyboard), 0);

        bus.publish(UiEvent::escape());
        assert!(keyboard.borrow().seen.is_empty());
    }

    #[test]
    fn test_cascade_limit() {
        let mut bus = EventBus::new(BusConfig { max_cascade: 10 });
        bus.register(Rc::new(RefCell::new(Looper)));

        let report = bus.publish(UiEvent::SliderNext);
        assert_eq!(report.processed, 10);
        assert_eq!(report.dropped, 1);
    }

    #[test]
    fn test_timers_fire_through_advance() {
        let mut bus = EventBus::default();
        let slider = recorder(&[Topic::Slider, Topic::Timer, Topic::Tabs]);
        bus.register(slider.clone());

        bus.publish(UiEvent::SliderPrev);
        assert_eq!(bus.next_deadline(), Some(Duration::from_millis(100)));

        let report = bus.advance(Duration::from_millis(250));
        assert_eq!(report.processed, 2);
        assert_eq!(bus.now(), Duration::from_millis(250));
        assert_eq!(bus.next_deadline(), Some(Duration::from_millis(300)));

        bus.publish(UiEvent::TabSelected {
            group: "login".to_string(),
            tab: "staff".to_string(),
        });
        assert_eq!(bus.next_deadline(), None);

        let fired = slider
            .borrow()
            .seen
            .iter()
            .filter(|e| matches!(e, UiEvent::TimerFired { .. }))
            .count();
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_advance_never_goes_backwards() {
        let mut bus = EventBus::default();
        bus.advance(Duration::from_secs(2));
        bus.advance_to(Duration::from_secs(1));
        assert_eq!(bus.now(), Duration::from_secs(2));
    }

    #[test]
    fn test_busy_component_is_skipped() {
        let mut bus = EventBus::default();
        let keyboard = recorder(&[Topic::Keyboard]);
        bus.register(keyboard.clone());

        let guard = keyboard.borrow();
        let report = bus.publish(UiEvent::escape());
        drop(guard);

        assert_eq!(report.delivered, 0);
        assert!(keyboard.borrow().seen.is_empty());
    }
}
