use std::future::Future;
use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Numbers scheduled calls. A timer may deliver only while its ticket is
/// still the latest one handed out.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DebounceGate {
    latest: u64,
}

impl DebounceGate {
    pub fn schedule(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

/// Wait out `delay`, then run `apply` unless a newer call was scheduled in
/// the meantime.
pub fn fire_when_quiet(
    delay: Duration,
    ticket: u64,
    is_latest: impl Fn(u64) -> bool,
    apply: impl FnOnce(),
) -> impl Future<Output = ()> {
    async move {
        sleep(delay).await;
        if is_latest(ticket) {
            apply();
        }
    }
}

#[derive(Default)]
struct Pending {
    gate: DebounceGate,
    task: Option<Task>,
}

/// Trailing-edge debouncer. Each [`Debounced::call`] cancels the pending timer
/// and schedules a new one; only the last value within the quiet period is
/// delivered. The timer task belongs to the calling component, so an unmount
/// drops it.
pub struct Debounced<T: 'static> {
    pending: Signal<Pending>,
    apply: Callback<T>,
    delay: Duration,
}

impl<T: 'static> Clone for Debounced<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Debounced<T> {}

impl<T: 'static> Debounced<T> {
    pub fn call(&mut self, value: T) {
        let ticket = {
            let mut pending = self.pending.write();
            if let Some(task) = pending.task.take() {
                task.cancel();
            }
            pending.gate.schedule()
        };
        let pending = self.pending;
        let apply = self.apply;
        let task = spawn(fire_when_quiet(
            self.delay,
            ticket,
            move |ticket| pending.peek().gate.is_latest(ticket),
            move || apply.call(value),
        ));
        self.pending.write().task = Some(task);
    }
}

pub fn use_debounced<T: 'static>(delay_ms: u64, apply: impl FnMut(T) + 'static) -> Debounced<T> {
    let pending = use_signal(Pending::default);
    let apply = use_callback(apply);
    Debounced {
        pending,
        apply,
        delay: Duration::from_millis(delay_ms),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    const DELAY: Duration = Duration::from_millis(400);

    #[tokio::test(start_paused = true)]
    async fn test_only_last_keystroke_applies_after_quiet_period() {
        let gate = Arc::new(Mutex::new(DebounceGate::default()));
        let applied = Arc::new(Mutex::new(Vec::new()));
        let mut timers = Vec::new();

        // Keystrokes at 0, 100 and 200 ms.
        for (i, text) in ["j", "ja", "jan"].into_iter().enumerate() {
            if i > 0 {
                tokio::time::advance(Duration::from_millis(100)).await;
            }
            let ticket = gate.lock().unwrap().schedule();
            let check = gate.clone();
            let sink = applied.clone();
            timers.push(tokio::spawn(fire_when_quiet(
                DELAY,
                ticket,
                move |t| check.lock().unwrap().is_latest(t),
                move || sink.lock().unwrap().push(text),
            )));
            tokio::task::yield_now().await;
        }

        // 599 ms: both superseded timers have fired and been dropped.
        tokio::time::advance(Duration::from_millis(399)).await;
        tokio::task::yield_now().await;
        assert!(applied.lock().unwrap().is_empty());

        tokio::time::advance(Duration::from_millis(1)).await;
        for timer in timers {
            timer.await.unwrap();
        }
        assert_eq!(*applied.lock().unwrap(), vec!["jan"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_call_applies_once_delay_elapses() {
        let mut gate = DebounceGate::default();
        let ticket = gate.schedule();
        let applied = Arc::new(Mutex::new(false));
        let sink = applied.clone();
        let timer = tokio::spawn(fire_when_quiet(DELAY, ticket, move |t| gate.is_latest(t), move || {
            *sink.lock().unwrap() = true;
        }));
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(399)).await;
        tokio::task::yield_now().await;
        assert!(!*applied.lock().unwrap());

        tokio::time::advance(Duration::from_millis(1)).await;
        timer.await.unwrap();
        assert!(*applied.lock().unwrap());
    }

    #[test]
    fn test_gate_tracks_latest_ticket() {
        let mut gate = DebounceGate::default();
        let first = gate.schedule();
        let second = gate.schedule();
        assert!(!gate.is_latest(first));
        assert!(gate.is_latest(second));
    }
}
