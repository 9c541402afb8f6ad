//! Streaming trigger evaluation
//!
//! Evaluation is callback-driven: the host feeds each fresh value for
//! a path into [`TriggerEngine::on_value`], which synchronously
//! produces an active/inactive verdict for every trigger anchored to
//! that path and hands it to the trigger's alert callback. Trend
//! triggers accumulate rolling statistics in an [`EngineState`] owned
//! by the engine.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::expr::Trigger;
use super::window::RollingWindow;
use crate::error::{ConfigError, EvalError, TriggerError};
use crate::events::{AlertCallback, AlertEvent};
use crate::value::Value;

/// Rolling-window store keyed by derived statistic name
/// (`<path>.incr` / `<path>.decr`). Windows are created lazily on
/// first observation.
#[derive(Debug, Default)]
pub struct EngineState {
    windows: HashMap<String, RollingWindow>,
}

impl EngineState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a window by statistic key
    pub fn window(&self, key: &str) -> Option<&RollingWindow> {
        self.windows.get(key)
    }

    fn window_mut(&mut self, key: String) -> &mut RollingWindow {
        self.windows.entry(key).or_default()
    }
}

impl Trigger {
    /// Evaluate this trigger against a fresh value, updating any
    /// rolling statistics in `state`.
    ///
    /// Trend triggers gate the verdict on the window's warm-up before
    /// appending, then append the sample regardless of the verdict. A
    /// value of the wrong type returns an [`EvalError`] and leaves the
    /// window untouched for that update.
    pub fn evaluate(&self, value: &Value, state: &mut EngineState) -> Result<bool, EvalError> {
        match self {
            Trigger::Passthrough { .. } => Ok(value.is_truthy()),

            Trigger::StateEquals { path, state: expected } => {
                let actual = value.state().ok_or_else(|| EvalError::NotANotification {
                    path: path.clone(),
                    found: value.kind(),
                })?;
                Ok(actual == expected)
            }

            Trigger::LessThan { path, threshold } => {
                Ok(numeric(path, value)? < *threshold)
            }

            Trigger::GreaterThan { path, threshold } => {
                Ok(numeric(path, value)? > *threshold)
            }

            Trigger::RisingTrend { path, delta } => {
                let sample = numeric(path, value)?;
                let window = state.window_mut(format!("{path}.incr"));
                let active = window.is_warmed_up() && sample > window.mean() + delta;
                window.push(sample);
                Ok(active)
            }

            Trigger::FallingTrend { path, delta } => {
                let sample = numeric(path, value)?;
                let window = state.window_mut(format!("{path}.decr"));
                let active = window.is_warmed_up() && sample < window.mean() - delta;
                window.push(sample);
                Ok(active)
            }
        }
    }
}

fn numeric(path: &str, value: &Value) -> Result<f64, EvalError> {
    value.as_f64().ok_or_else(|| EvalError::NotNumeric {
        path: path.to_string(),
        found: value.kind(),
    })
}

/// One-shot evaluation: parse `expression` and evaluate it against
/// `value`, accumulating rolling statistics in `state`. Prefer
/// registering with a [`TriggerEngine`] so the expression is parsed
/// once.
pub fn evaluate(
    expression: &str,
    value: &Value,
    state: &mut EngineState,
) -> Result<bool, TriggerError> {
    let trigger = Trigger::parse(expression)?;
    Ok(trigger.evaluate(value, state)?)
}

struct Registration {
    trigger: Trigger,
    expression: String,
    callback: AlertCallback,
}

/// Owns the registered triggers and their rolling-window state, and
/// routes incoming values to every trigger anchored to the path.
///
/// The state sits behind a mutex so a host that delivers updates for
/// the same path from multiple threads still gets atomic
/// append-and-evict on each window. Updates for a given path must be
/// fed in arrival order; different paths have independent windows and
/// may interleave freely.
#[derive(Default)]
pub struct TriggerEngine {
    registrations: Vec<Registration>,
    state: Mutex<EngineState>,
}

impl TriggerEngine {
    /// Create an engine with no registrations
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger expression with an alert callback.
    ///
    /// The expression is parsed here; a malformed expression is
    /// rejected now rather than misbehaving per update.
    pub fn register(
        &mut self,
        expression: &str,
        callback: AlertCallback,
    ) -> Result<(), ConfigError> {
        let trigger = Trigger::parse(expression)?;
        log::debug!(
            "registered trigger `{}` on path {}",
            expression,
            trigger.path()
        );
        self.registrations.push(Registration {
            trigger,
            expression: expression.to_string(),
            callback,
        });
        Ok(())
    }

    /// Number of registered triggers
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether no triggers are registered
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Feed a fresh value observed on `path`.
    ///
    /// Every trigger anchored to the path is evaluated synchronously
    /// and its callback invoked with the verdict. Evaluation failures
    /// are logged and collected; they never panic and never touch
    /// window state.
    pub fn on_value(&self, path: &str, value: &Value) -> Vec<EvalError> {
        let mut errors = Vec::new();
        let mut verdicts = Vec::new();

        // Verdicts are produced under the lock, callbacks run after it
        // is released so a callback may safely re-enter the engine.
        {
            let mut state = self.state.lock();
            for registration in self
                .registrations
                .iter()
                .filter(|r| r.trigger.path() == path)
            {
                match registration.trigger.evaluate(value, &mut state) {
                    Ok(active) => verdicts.push((registration, active)),
                    Err(err) => {
                        log::warn!("trigger `{}`: {}", registration.expression, err);
                        errors.push(err);
                    }
                }
            }
        }

        for (registration, active) in verdicts {
            (registration.callback)(AlertEvent::new(
                path,
                &registration.expression,
                active,
                value.clone(),
            ));
        }

        errors
    }

    /// Inspect a rolling window by statistic key, for diagnostics
    pub fn with_window<T>(&self, key: &str, f: impl FnOnce(Option<&RollingWindow>) -> T) -> T {
        let state = self.state.lock();
        f(state.window(key))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::value::Notification;

    #[test]
    fn test_threshold_trigger_is_pure() {
        let trigger = Trigger::parse("x<0.2").unwrap();
        let mut state = EngineState::new();

        let verdicts: Vec<bool> = [0.3, 0.1, 0.25]
            .iter()
            .map(|v| trigger.evaluate(&Value::Number(*v), &mut state).unwrap())
            .collect();

        assert_eq!(verdicts, vec![false, true, false]);
        // Threshold triggers keep no windows.
        assert!(state.window("x.incr").is_none());
    }

    #[test]
    fn test_state_equality_trigger() {
        let trigger = Trigger::parse("electrical.batteries.0:alarm").unwrap();
        let mut state = EngineState::new();

        let alarm = Value::Notification(Notification::new("alarm"));
        let normal = Value::Notification(Notification::new("normal"));

        assert!(trigger.evaluate(&alarm, &mut state).unwrap());
        assert!(!trigger.evaluate(&normal, &mut state).unwrap());
    }

    #[test]
    fn test_state_probe_on_number_is_eval_error() {
        let trigger = Trigger::parse("x:alarm").unwrap();
        let mut state = EngineState::new();

        let err = trigger
            .evaluate(&Value::Number(0.5), &mut state)
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::NotANotification {
                path: "x".into(),
                found: "number",
            }
        );
    }

    #[test]
    fn test_rising_trend_warm_up_never_fires() {
        let trigger = Trigger::parse("x+0.0").unwrap();
        let mut state = EngineState::new();

        // Strictly increasing, but the first 30 samples are warm-up.
        for i in 0..30 {
            let active = trigger
                .evaluate(&Value::Number(i as f64), &mut state)
                .unwrap();
            assert!(!active, "sample {} fired during warm-up", i);
        }

        // Sample 31 is past warm-up and well above the trailing mean.
        let active = trigger.evaluate(&Value::Number(100.0), &mut state).unwrap();
        assert!(active);
    }

    #[test]
    fn test_rising_trend_respects_delta() {
        let trigger = Trigger::parse("x+5.0").unwrap();
        let mut state = EngineState::new();

        for _ in 0..30 {
            trigger.evaluate(&Value::Number(10.0), &mut state).unwrap();
        }

        // Mean is 10; only values above 15 fire.
        assert!(!trigger.evaluate(&Value::Number(14.0), &mut state).unwrap());
        assert!(trigger.evaluate(&Value::Number(16.5), &mut state).unwrap());
    }

    #[test]
    fn test_falling_trend_symmetry() {
        let trigger = Trigger::parse("x-5.0").unwrap();
        let mut state = EngineState::new();

        for _ in 0..30 {
            trigger.evaluate(&Value::Number(10.0), &mut state).unwrap();
        }

        assert!(!trigger.evaluate(&Value::Number(6.0), &mut state).unwrap());
        assert!(trigger.evaluate(&Value::Number(4.0), &mut state).unwrap());
    }

    #[test]
    fn test_trend_sample_appended_regardless_of_verdict() {
        let trigger = Trigger::parse("x+0.5").unwrap();
        let mut state = EngineState::new();

        for i in 0..35 {
            trigger.evaluate(&Value::Number(i as f64), &mut state).unwrap();
        }

        let window = state.window("x.incr").unwrap();
        assert_eq!(window.len(), 30);
        assert_eq!(window.seen(), 35);
        let retained: Vec<f64> = window.samples().collect();
        assert_eq!(retained.first(), Some(&5.0));
        assert_eq!(retained.last(), Some(&34.0));
    }

    #[test]
    fn test_eval_error_leaves_window_untouched() {
        let trigger = Trigger::parse("x+0.1").unwrap();
        let mut state = EngineState::new();

        trigger.evaluate(&Value::Number(1.0), &mut state).unwrap();
        assert!(trigger.evaluate(&Value::Text("oops".into()), &mut state).is_err());

        let window = state.window("x.incr").unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window.seen(), 1);
    }

    #[test]
    fn test_rising_and_falling_use_separate_windows() {
        let rising = Trigger::parse("x+0.1").unwrap();
        let falling = Trigger::parse("x-0.1").unwrap();
        let mut state = EngineState::new();

        rising.evaluate(&Value::Number(1.0), &mut state).unwrap();
        falling.evaluate(&Value::Number(2.0), &mut state).unwrap();

        assert_eq!(state.window("x.incr").unwrap().len(), 1);
        assert_eq!(state.window("x.decr").unwrap().len(), 1);
    }

    #[test]
    fn test_one_shot_evaluate() {
        let mut state = EngineState::new();

        assert!(evaluate("x>0.9", &Value::Number(0.95), &mut state).unwrap());
        assert!(matches!(
            evaluate("x<abc", &Value::Number(0.5), &mut state).unwrap_err(),
            TriggerError::Config(_)
        ));
    }

    #[test]
    fn test_engine_routes_by_path() {
        let mut engine = TriggerEngine::new();

        let fuel_verdicts = Arc::new(Mutex::new(Vec::new()));
        let water_verdicts = Arc::new(Mutex::new(Vec::new()));

        let sink = fuel_verdicts.clone();
        engine
            .register(
                "tanks.fuel.0.currentLevel<0.2",
                Box::new(move |event| sink.lock().push(event.active)),
            )
            .unwrap();

        let sink = water_verdicts.clone();
        engine
            .register(
                "tanks.freshWater.0.currentLevel<0.2",
                Box::new(move |event| sink.lock().push(event.active)),
            )
            .unwrap();

        engine.on_value("tanks.fuel.0.currentLevel", &Value::Number(0.1));
        engine.on_value("tanks.fuel.0.currentLevel", &Value::Number(0.5));

        assert_eq!(*fuel_verdicts.lock(), vec![true, false]);
        assert!(water_verdicts.lock().is_empty());
    }

    #[test]
    fn test_notification_trigger_with_delimiter_receives_values() {
        let mut engine = TriggerEngine::new();
        let verdicts = Arc::new(Mutex::new(Vec::new()));

        let sink = verdicts.clone();
        engine
            .register(
                "notifications.mob:alarm",
                Box::new(move |event| sink.lock().push(event.active)),
            )
            .unwrap();

        // The value arrives on the pre-delimiter source path and is
        // judged by truthiness, not by the state operand.
        engine.on_value("notifications.mob", &Value::Number(1.0));
        engine.on_value("notifications.mob", &Value::Null);

        assert_eq!(*verdicts.lock(), vec![true, false]);
    }

    #[test]
    fn test_engine_rejects_malformed_expression() {
        let mut engine = TriggerEngine::new();
        let result = engine.register("x<abc", Box::new(|_| {}));
        assert!(result.is_err());
        assert!(engine.is_empty());
    }

    #[test]
    fn test_callback_may_reenter_engine() {
        use std::sync::OnceLock;

        let cell: Arc<OnceLock<TriggerEngine>> = Arc::new(OnceLock::new());
        let inner_verdicts = Arc::new(Mutex::new(Vec::new()));

        let mut engine = TriggerEngine::new();

        let sink = inner_verdicts.clone();
        engine
            .register("y<0.5", Box::new(move |event| sink.lock().push(event.active)))
            .unwrap();

        let handle = cell.clone();
        engine
            .register(
                "x>0.9",
                Box::new(move |_| {
                    // Feeding another path from inside a callback must
                    // not deadlock on the engine's state lock.
                    if let Some(engine) = handle.get() {
                        engine.on_value("y", &Value::Number(0.1));
                    }
                }),
            )
            .unwrap();

        let engine = cell.get_or_init(|| engine);
        engine.on_value("x", &Value::Number(1.0));

        assert_eq!(*inner_verdicts.lock(), vec![true]);
    }

    #[test]
    fn test_engine_surfaces_eval_errors_without_crashing() {
        let mut engine = TriggerEngine::new();
        engine.register("x<0.2", Box::new(|_| {})).unwrap();

        let errors = engine.on_value("x", &Value::Text("not a number".into()));
        assert_eq!(errors.len(), 1);

        // The engine keeps working afterwards.
        let errors = engine.on_value("x", &Value::Number(0.1));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_engine_event_carries_context() {
        let mut engine = TriggerEngine::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        let sink = events.clone();
        engine
            .register(
                "tanks.0.currentLevel>0.9",
                Box::new(move |event| sink.lock().push(event)),
            )
            .unwrap();

        engine.on_value("tanks.0.currentLevel", &Value::Number(0.95));

        let events = events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].path, "tanks.0.currentLevel");
        assert_eq!(events[0].expression, "tanks.0.currentLevel>0.9");
        assert!(events[0].active);
        assert_eq!(events[0].value, Value::Number(0.95));
    }
}
