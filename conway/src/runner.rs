// runner.rs - Ticks a shared board on a background tokio task at an adjustable rate

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{broadcast, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::board::{lock_board, SharedBoard};
use crate::config::{Settings, DEFAULT_EVENT_CAPACITY};

/// Lifecycle notifications published by a [`Runner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerEvent {
    Started,
    Stopped,
    /// A scheduled step completed; the board is now at `generation`.
    Updated { generation: u64 },
}

#[derive(Default)]
struct RunState {
    running: bool,
    run_id: u64,                      // Bumped on every start; a task only steps for its own run
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

/// Drives [`Board::step`](crate::Board::step) at a wall-clock interval.
///
/// `start`, `stop` and `set_tick_interval` may be called from any thread while
/// the scheduling task is active. At most one task steps the board at a time.
pub struct Runner {
    board: SharedBoard,
    interval: watch::Sender<Duration>,
    state: Arc<Mutex<RunState>>,
    events: broadcast::Sender<RunnerEvent>,
    runtime: Handle,
}

impl Runner {
    /// Create a stopped runner that will spawn its task on `runtime`.
    pub fn new(board: SharedBoard, interval: Duration, runtime: Handle) -> Self {
        Self::build(board, interval, DEFAULT_EVENT_CAPACITY, runtime)
    }

    pub fn with_settings(board: SharedBoard, settings: &Settings, runtime: Handle) -> Self {
        Self::build(board, settings.tick_interval, settings.event_capacity, runtime)
    }

    fn build(board: SharedBoard, interval: Duration, capacity: usize, runtime: Handle) -> Self {
        let (interval, _) = watch::channel(interval);
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            board,
            interval,
            state: Arc::new(Mutex::new(RunState::default())),
            events,
            runtime,
        }
    }

    /// Receive `Started`, `Stopped` and `Updated` notifications from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<RunnerEvent> {
        self.events.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.lock_state().running
    }

    pub fn tick_interval(&self) -> Duration {
        *self.interval.borrow()
    }

    /// Change the time between steps.
    ///
    /// A waiting task abandons its current wait and starts a fresh one with the
    /// new interval, without stepping. Setting the current value is a no-op.
    pub fn set_tick_interval(&self, interval: Duration) {
        let changed = self.interval.send_if_modified(|current| {
            if *current == interval {
                return false;
            }
            *current = interval;
            true
        });
        if changed {
            debug!(interval_ms = interval.as_millis() as u64, "tick interval changed");
        }
    }

    /// Begin stepping the board. Does nothing if already running.
    pub fn start(&self) {
        let mut state = self.lock_state();
        if state.running {
            return;
        }

        state.running = true;
        state.run_id += 1;
        let (stop_tx, stop_rx) = oneshot::channel();
        state.stop = Some(stop_tx);

        let _ = self.events.send(RunnerEvent::Started);
        debug!(run = state.run_id, interval_ms = self.tick_interval().as_millis() as u64, "runner started");

        let ctx = TickContext {
            run_id: state.run_id,
            board: Arc::clone(&self.board),
            state: Arc::clone(&self.state),
            events: self.events.clone(),
        };
        let interval = self.interval.subscribe();
        if let Some(previous) = state.task.replace(self.runtime.spawn(schedule(ctx, interval, stop_rx))) {
            // Already signalled by the stop that ended its run
            previous.abort();
        }
    }

    /// Stop stepping the board. Does nothing if already stopped.
    ///
    /// A step that has not started yet is abandoned.
    pub fn stop(&self) {
        let mut state = self.lock_state();
        if !state.running {
            return;
        }

        state.running = false;
        if let Some(stop) = state.stop.take() {
            let _ = stop.send(());
        }

        let _ = self.events.send(RunnerEvent::Stopped);
        debug!(run = state.run_id, "runner stopped");
    }

    fn lock_state(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn loop_finished(&self) -> bool {
        self.lock_state().task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        let mut state = self.lock_state();
        state.running = false;
        if let Some(stop) = state.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = state.task.take() {
            task.abort();
        }
    }
}

/// What a scheduling task needs to perform a step for its run.
struct TickContext {
    run_id: u64,
    board: SharedBoard,
    state: Arc<Mutex<RunState>>,
    events: broadcast::Sender<RunnerEvent>,
}

impl TickContext {
    /// Step the board if this run is still the active one.
    ///
    /// Lock order is board then run state, the same order a caller editing the
    /// board while calling `stop()` uses. Holding the run state across the step
    /// keeps `stop()` from publishing `Stopped` before this run's `Updated`.
    fn tick(&self) -> bool {
        let mut board = lock_board(&self.board);
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.running || state.run_id != self.run_id {
            return false;
        }

        board.step();
        let _ = self.events.send(RunnerEvent::Updated { generation: board.generation() });
        true
    }
}

/// Scheduling loop: wait one interval, step, repeat.
///
/// The wait ends early on a stop request (exit without stepping) or an
/// interval change (wait again with the new value, without stepping).
async fn schedule(
    ctx: TickContext,
    mut interval: watch::Receiver<Duration>,
    mut stop: oneshot::Receiver<()>,
) {
    loop {
        let period = *interval.borrow_and_update();

        tokio::select! {
            biased;
            _ = &mut stop => break,
            changed = interval.changed() => {
                if changed.is_err() {
                    break;
                }
                trace!(run = ctx.run_id, "wait restarted after interval change");
                continue;
            }
            _ = tokio::time::sleep(period) => {}
        }

        if !ctx.tick() {
            break;
        }
    }
    debug!(run = ctx.run_id, "scheduling loop exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[tokio::test(start_paused = true)]
    async fn stop_before_first_interval_ends_the_task() {
        let board = Board::new(4, 4).unwrap().into_shared();
        let runner = Runner::new(board.clone(), Duration::from_millis(100), Handle::current());
        assert!(runner.loop_finished());

        runner.start();
        assert!(!runner.loop_finished());
        runner.stop();
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert!(runner.loop_finished());
        assert_eq!(lock_board(&board).generation(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_mid_wait_ends_the_task_without_waiting_out_the_interval() {
        let board = Board::new(4, 4).unwrap().into_shared();
        let runner = Runner::new(board, Duration::from_secs(60), Handle::current());

        runner.start();
        tokio::time::sleep(Duration::from_millis(10)).await;
        runner.stop();
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert!(runner.loop_finished());
    }
}
