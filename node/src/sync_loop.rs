use std::time::Instant;

use log::{debug, info, trace, warn};

use entrain_shared::{
    ConfigError, ModeStateMachine, NamedValue, PeerSyncChannel, PeerUpdate, PeriodHistory,
    PeriodIntegrator, PeriodicityEstimator, RegularityInput, RegularityMetric, SampleClock,
    SensorReading, SensorRingBuffer,
};

use crate::{
    events::{Beat, Events},
    hooks::{ClockDriver, ModeChangeHook},
    status::{ErrorCounts, NodeStatus},
    NodeConfig, NodeError, SyncError,
};

/// Owns every piece of mutable state of one node and is the only place it
/// changes. The three entry points are [`Self::on_sensor_sample_at`],
/// [`Self::on_peer_message`] and [`Self::on_beat`].
///
/// Not thread-safe on its own; [`Node`](crate::Node) wraps it in a single
/// mutex so both producers see a consistent `(deviation, their_deviation)`
/// pair.
pub struct SynchronizationLoop {
    config: NodeConfig,

    sensor_history: SensorRingBuffer,
    period_history: PeriodHistory,
    sample_clock: SampleClock,
    estimator: Box<dyn PeriodicityEstimator>,
    metric: Box<dyn RegularityMetric>,
    mode: ModeStateMachine,
    integrator: PeriodIntegrator,
    channel: PeerSyncChannel,

    clock_driver: Option<Box<dyn ClockDriver>>,
    mode_hook: Option<Box<dyn ModeChangeHook>>,
    events: Events,

    period: f32,
    period_strength: f32,
    deviation: f32,
    intensity: f32,
    integrated_period: Option<f32>,

    samples: u64,
    cycles: u64,
    beats: u64,
    rejected_estimates: u64,
    faulted_samples: u64,
    transport_failures: u64,
    last_fault: Option<String>,
}

impl SynchronizationLoop {
    /// Validates `config` and builds the estimator and metric it names.
    pub fn new(config: NodeConfig) -> Result<Self, ConfigError> {
        let history_len = config.sync.sensor_history_len;
        let estimator = config.sync.estimator.build(history_len);
        let metric = config.sync.regularity.build(history_len);
        Self::with_strategies(config, estimator, metric)
    }

    /// Like [`Self::new`], with caller-supplied strategies in place of the
    /// configured ones.
    pub fn with_strategies(
        config: NodeConfig,
        estimator: Box<dyn PeriodicityEstimator>,
        metric: Box<dyn RegularityMetric>,
    ) -> Result<Self, ConfigError> {
        config.sync.validate()?;
        let sync = &config.sync;

        info!(
            "Node {} activated: {} estimator, {} metric, initial mode {}",
            config.node_id,
            estimator.name(),
            metric.name(),
            sync.initial_mode
        );

        Ok(Self {
            sensor_history: SensorRingBuffer::new(sync.sensor_history_len),
            period_history: PeriodHistory::new(sync.period_history_len, sync.period_range),
            sample_clock: SampleClock::new(
                sync.interval_history_len,
                sync.steps_between_update,
                sync.nominal_sample_interval_ms,
            ),
            estimator,
            metric,
            mode: ModeStateMachine::new(sync.initial_mode, sync.deviation_threshold),
            integrator: PeriodIntegrator::new(sync.solo_policy, sync.max_clock_interval_ms),
            channel: PeerSyncChannel::new(config.node_id.clone()),

            clock_driver: None,
            mode_hook: None,
            events: Events::new(),

            period: 0.0,
            period_strength: 0.0,
            deviation: 0.0,
            intensity: 0.0,
            integrated_period: None,

            samples: 0,
            cycles: 0,
            beats: 0,
            rejected_estimates: 0,
            faulted_samples: 0,
            transport_failures: 0,
            last_fault: None,

            config,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn set_clock_driver<D: ClockDriver + 'static>(&mut self, driver: D) {
        self.clock_driver = Some(Box::new(driver));
    }

    pub fn set_mode_hook<H: ModeChangeHook + 'static>(&mut self, hook: H) {
        self.mode_hook = Some(Box::new(hook));
    }

    /// Feeds one sensor reading taken at `now`.
    ///
    /// Every `steps_between_update`-th sample (the first included) runs a
    /// recompute cycle and returns this node's two outbound broadcasts. A
    /// reading without a finite magnitude is dropped, counted, recorded as the
    /// last fault and returned as an error; the loop is ready for the next
    /// sample either way.
    pub fn on_sensor_sample_at(
        &mut self,
        reading: SensorReading,
        now: Instant,
    ) -> Result<Option<[NamedValue; 2]>, SyncError> {
        let magnitude = reading.magnitude();
        if !magnitude.is_finite() {
            let error = SyncError::NonFiniteSample {
                x: reading.x,
                y: reading.y,
                z: reading.z,
            };
            self.record_fault(error.clone());
            return Err(error);
        }

        self.sensor_history.push(magnitude);
        self.intensity = magnitude;

        let due = self.samples % self.config.sync.steps_between_update as u64 == 0;
        self.samples += 1;
        if !due {
            return Ok(None);
        }

        Ok(Some(self.recompute(now)))
    }

    /// Folds one inbound broadcast into the peer state. A new peer deviation
    /// re-evaluates the mode immediately.
    pub fn on_peer_message(&mut self, named: &NamedValue) -> PeerUpdate {
        let update = self.channel.receive(named);
        match &update {
            PeerUpdate::Deviation(value) => {
                trace!("Node {}: peer deviation {value}", self.config.node_id);
                self.evaluate_mode();
            }
            PeerUpdate::Period(value) => {
                trace!("Node {}: peer period {value}ms", self.config.node_id);
            }
            PeerUpdate::OwnEcho | PeerUpdate::Ignored(_) => {}
        }
        update
    }

    /// Counts a beat of the shared clock and reports it with the current mode.
    pub fn on_beat(&mut self) -> Beat {
        self.beats += 1;
        let beat = Beat {
            beat: self.beats,
            mode: self.mode.mode(),
            integrated_period: self.integrated_period,
        };
        self.events.push_beat(beat);
        beat
    }

    pub fn status(&self) -> NodeStatus {
        let peer = self.channel.state();
        NodeStatus {
            mode: self.mode.mode(),
            period: self.period,
            period_strength: self.period_strength,
            their_period: peer.their_period,
            deviation: self.deviation,
            their_deviation: peer.their_deviation,
            intensity: self.intensity,
            integrated_period: self.integrated_period,
            sample_interval_ms: self.sample_clock.sample_interval_ms(),
            samples: self.samples,
            cycles: self.cycles,
            beats: self.beats,
            errors: ErrorCounts {
                rejected_estimates: self.rejected_estimates,
                rejected_intervals: self.integrator.rejected(),
                faulted_samples: self.faulted_samples,
                ignored_peer_messages: self.channel.ignored(),
                transport_failures: self.transport_failures,
            },
            last_fault: self.last_fault.clone(),
        }
    }

    pub fn take_events(&mut self) -> Events {
        self.events.take()
    }

    /// Starts a new session: every buffer, estimate, counter and the peer
    /// state are cleared and the mode returns to its initial value without
    /// firing the hook. Hooks and strategies are kept.
    pub fn reset(&mut self) {
        let sync = &self.config.sync;
        self.sensor_history.clear();
        self.period_history.clear();
        self.sample_clock.reset();
        self.mode.reset(sync.initial_mode);
        self.integrator.reset();
        self.channel.reset();
        self.events = Events::new();

        self.period = 0.0;
        self.period_strength = 0.0;
        self.deviation = 0.0;
        self.intensity = 0.0;
        self.integrated_period = None;

        self.samples = 0;
        self.cycles = 0;
        self.beats = 0;
        self.rejected_estimates = 0;
        self.faulted_samples = 0;
        self.transport_failures = 0;
        self.last_fault = None;

        info!("Node {} reset", self.config.node_id);
    }

    pub(crate) fn record_transport_error(&mut self, error: NodeError) {
        self.transport_failures += 1;
        self.last_fault = Some(error.to_string());
        self.events.push_error(error);
    }

    // Private

    fn recompute(&mut self, now: Instant) -> [NamedValue; 2] {
        self.cycles += 1;
        let sync = &self.config.sync;

        let sample_interval_ms = self.sample_clock.sample_interval_ms();
        let estimate = self
            .estimator
            .estimate(&self.sensor_history, sample_interval_ms);
        if estimate.is_acceptable(sync.max_estimate_ms) {
            self.period += (estimate.period_ms - self.period) * sync.smoothing;
            self.period_strength = estimate.confidence;
            self.period_history.push_period(self.period);
        } else {
            self.rejected_estimates += 1;
            debug!(
                "Node {}: discarding period estimate {}ms outside (0, {})ms",
                self.config.node_id, estimate.period_ms, sync.max_estimate_ms
            );
        }

        let input = RegularityInput::new(&self.sensor_history, &self.period_history);
        let deviation = self.metric.deviation(&input);
        if deviation.is_finite() {
            self.deviation = deviation;
        } else {
            let error = SyncError::NonFiniteDeviation {
                metric: self.metric.name(),
                value: deviation,
                previous: self.deviation,
            };
            self.record_fault(error);
        }

        self.sample_clock.record_cycle(now);

        trace!(
            "Node {}: cycle {} period {}ms strength {} deviation {} interval {}ms",
            self.config.node_id,
            self.cycles,
            self.period,
            self.period_strength,
            self.deviation,
            sample_interval_ms
        );

        let outbound = self.channel.outbound(self.deviation, self.period);
        self.evaluate_mode();
        self.drive_clock();
        outbound
    }

    fn evaluate_mode(&mut self) {
        let their_deviation = self.channel.state().their_deviation;
        let hook = &mut self.mode_hook;
        let transition = self
            .mode
            .evaluate(self.deviation, their_deviation, |from, to| {
                if let Some(hook) = hook.as_mut() {
                    hook.on_mode_changed(from, to);
                }
            });

        if let Some(transition) = transition {
            info!(
                "Node {}: mode {} -> {} (deviation {}, peer {})",
                self.config.node_id, transition.from, transition.to, self.deviation, their_deviation
            );
            self.events.push_mode_change(transition);
        }
    }

    fn drive_clock(&mut self) {
        let peer = *self.channel.state();
        if self.period <= 0.0 && peer.known_period().is_none() {
            // nothing measured locally or heard from a peer yet
            return;
        }

        let integrated = self
            .integrator
            .integrate(self.mode.mode(), self.period, peer.their_period);
        self.integrated_period = Some(integrated);

        let Some(interval_ms) = self.integrator.guard(integrated) else {
            return;
        };
        if let Some(driver) = self.clock_driver.as_mut() {
            driver.set_interval(interval_ms);
        }
        self.events.push_interval(interval_ms);
    }

    fn record_fault(&mut self, error: SyncError) {
        self.faulted_samples += 1;
        warn!("Node {}: {error}", self.config.node_id);
        self.last_fault = Some(error.to_string());
        self.events.push_error(NodeError::Sync(error));
    }
}
