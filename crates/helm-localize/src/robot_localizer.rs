//! The localizer as a [`Layer`]: fuses registered sources into a single
//! `Localization` task per tick.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use helm_core::{Layer, ProcessOutput, SetupContext, Task, TaskId, TaskKind, TaskPayload};
use helm_geom::Mat3;

use crate::solver::{NewtonLocalizer, NewtonSolverConfig};
use crate::source::LocalizationSource;

/// State the setup-time update listener and `process` both need mutable
/// access to. `process` only ever sees `&mut self`, but the listener
/// closure registered with the controller must outlive `setup` and share
/// the same sources/cache — hence the `Rc<RefCell<_>>` rather than
/// threading a borrow through the `Layer` trait.
struct Shared {
    sources: Vec<Box<dyn LocalizationSource>>,
    cache: Option<Mat3>,
    started: bool,
    initial_transform: Mat3,
}

/// A source layer (no parents) that emits a single `Localization` task
/// per tick, computed lazily from whichever registered sources currently
/// `has_data()` and cached until the next `invalidate_cache`.
///
/// A non-finite solve (or a solve over zero contributing sources that
/// happens to come back non-finite) falls back to the last good
/// transform, or the initial transform on the very first tick, per the
/// numeric-failure recovery policy.
pub struct RobotLocalizer {
    shared: Rc<RefCell<Shared>>,
    solver: NewtonLocalizer,
    awaiting_ack: Option<TaskId>,
    last_good: Mat3,
}

impl RobotLocalizer {
    /// Builds a localizer starting at `initial_transform`, solving with
    /// `solver_config` and a `ChaCha8Rng` seeded from `seed`.
    pub fn new(initial_transform: Mat3, solver_config: NewtonSolverConfig, seed: u64) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                sources: Vec::new(),
                cache: None,
                started: false,
                initial_transform,
            })),
            solver: NewtonLocalizer::new(solver_config, seed),
            awaiting_ack: None,
            last_good: initial_transform,
        }
    }

    /// Registers a source to be polled on every solve.
    pub fn register_source(&mut self, source: Box<dyn LocalizationSource>) {
        self.shared.borrow_mut().sources.push(source);
    }

    fn resolve_transform(&mut self) -> Mat3 {
        let mut shared = self.shared.borrow_mut();

        if !shared.started {
            let initial = shared.initial_transform;
            for source in shared.sources.iter_mut() {
                source.on_start(initial);
            }
            shared.started = true;
        }

        if let Some(cached) = shared.cache {
            return cached;
        }

        let data: Vec<_> = shared
            .sources
            .iter()
            .filter(|s| s.has_data())
            .map(|s| s.collect_data())
            .collect();
        drop(shared);

        let solved = self.solver.solve(&data);
        let resolved = if solved.is_finite() { solved } else { self.last_good };

        self.shared.borrow_mut().cache = Some(resolved);
        self.last_good = resolved;
        resolved
    }
}

impl Layer for RobotLocalizer {
    fn input_tasks(&self) -> HashSet<TaskKind> {
        HashSet::new()
    }

    fn output_tasks(&self) -> HashSet<TaskKind> {
        HashSet::from([TaskKind::Localization])
    }

    fn setup(&mut self, ctx: &mut dyn SetupContext) {
        let shared = self.shared.clone();
        ctx.add_update_listener(Box::new(move || {
            let mut shared = shared.borrow_mut();
            shared.cache = None;
            for source in shared.sources.iter_mut() {
                source.on_update();
            }
        }));
    }

    fn accept_task(&mut self, task: Task) {
        panic!("RobotLocalizer has no parents and cannot accept {:?}", task.kind());
    }

    fn process(&mut self) -> ProcessOutput {
        if self.awaiting_ack.is_some() {
            return ProcessOutput::none();
        }
        let transform = self.resolve_transform();
        let task = Task::new(TaskPayload::Localization { transform });
        self.awaiting_ack = Some(task.id());
        ProcessOutput::none().emit_subtask(task)
    }

    fn subtask_completed(&mut self, task: &Task) {
        if self.awaiting_ack == Some(task.id()) {
            self.awaiting_ack = None;
        }
    }
}
