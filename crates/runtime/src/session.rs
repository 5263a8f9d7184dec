//! A running game: content, state, and the event surface.

use crumbs_core::{
    Action, ConvertAction, Decimal, ExecuteError, ExecutionOutcome, GameState, GameView, LayerId,
    ProgressionEngine, PurchaseAction, ResetAction, TickAction,
};

use crate::events::{Event, EventBus, ResetApplied, ResourceChanged, UpgradePurchased};

/// Owns the mutable game and routes every mutation through the engine.
///
/// The session is the single mutator: the driver ticks it, user commands
/// call it, and everyone else watches the bus or polls [`GameSession::snapshot`].
pub struct GameSession {
    content: crumbs_core::Content,
    state: GameState,
    bus: EventBus,
    dev_speed: Decimal,
    paused: bool,
}

impl GameSession {
    /// Starts a fresh game over the given content.
    pub fn new(content: crumbs_core::Content) -> Self {
        let state = GameState::new(&content);
        Self::with_state(content, state)
    }

    /// Resumes from restored state (persistence, offline catch-up).
    pub fn with_state(content: crumbs_core::Content, state: GameState) -> Self {
        Self {
            content,
            state,
            bus: EventBus::new(),
            dev_speed: Decimal::ONE,
            paused: false,
        }
    }

    pub fn content(&self) -> &crumbs_core::Content {
        &self.content
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Read-only snapshot for rendering.
    pub fn snapshot(&self) -> GameView {
        GameView::capture(&self.content.env(), &self.state)
            .expect("session env always carries all oracles")
    }

    pub fn dev_speed(&self) -> Decimal {
        self.dev_speed
    }

    /// Debug speed multiplier; zero behaves like a pause.
    pub fn set_dev_speed(&mut self, dev_speed: Decimal) {
        self.dev_speed = dev_speed.max(Decimal::ZERO);
        tracing::debug!(dev_speed = %self.dev_speed, "dev speed changed");
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        tracing::debug!(paused, "pause toggled");
    }

    /// One frame: integrates `delta_seconds` of wall time, scaled by pause
    /// state and dev speed.
    pub fn on_tick(&mut self, delta_seconds: Decimal) -> Result<ExecutionOutcome, ExecuteError> {
        let scaled = if self.paused {
            Decimal::ZERO
        } else {
            delta_seconds.max(Decimal::ZERO) * self.dev_speed
        };
        self.execute(Action::Tick(TickAction::new(scaled)))
    }

    /// Applies an unscaled delta, bypassing pause and dev speed. Offline
    /// catch-up uses this.
    pub(crate) fn apply_raw_tick(
        &mut self,
        delta_seconds: Decimal,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.execute(Action::Tick(TickAction::new(delta_seconds)))
    }

    /// Buys an upgrade. An unaffordable purchase is a logged no-op at the
    /// session boundary; callers that care inspect the returned error.
    pub fn purchase_upgrade(
        &mut self,
        layer: LayerId,
        index: usize,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let result = self.execute(Action::Purchase(PurchaseAction::new(layer, index)));
        if let Err(error) = &result {
            tracing::debug!(%layer, index, %error, "purchase rejected");
        }
        result
    }

    /// Applies the layer's conversion at the current base value.
    pub fn trigger_conversion(
        &mut self,
        layer: LayerId,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.execute(Action::Convert(ConvertAction::new(layer)))
    }

    /// Resets the layer and cascades over branch edges.
    pub fn trigger_reset(&mut self, layer: LayerId) -> Result<ExecutionOutcome, ExecuteError> {
        self.execute(Action::Reset(ResetAction::new(layer)))
    }

    /// The reset button: convert, then reset. The conversion banks the
    /// prestige gain; the reset wipes the base that paid for it.
    pub fn press_reset_button(
        &mut self,
        layer: LayerId,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.trigger_conversion(layer)?;
        self.trigger_reset(layer)
    }

    /// Replaces the whole state (load path). Observers are told every
    /// layer may have changed.
    pub(crate) fn replace_state(&mut self, state: GameState) {
        self.state = state;
        for def in self.content.layers() {
            if let Some(layer_state) = self.state.layer(def.id) {
                self.bus.publish(Event::Resource(ResourceChanged {
                    layer: def.slug.clone(),
                    value: layer_state.resource.value(),
                    best: layer_state.resource.best(),
                    total: layer_state.resource.total(),
                }));
            }
        }
    }

    fn execute(&mut self, action: Action) -> Result<ExecutionOutcome, ExecuteError> {
        let env = self.content.env();
        let mut engine = ProgressionEngine::new(&mut self.state);
        let outcome = engine.execute(env, &action)?;
        self.publish(&outcome);
        Ok(outcome)
    }

    /// Turns a state delta into bus traffic. This is the explicit
    /// observer-notification step that replaces reactive recomputation.
    fn publish(&self, outcome: &ExecutionOutcome) {
        let slug_of = |id: LayerId| {
            self.content
                .layers()
                .get(id.index())
                .map(|def| def.slug.clone())
                .unwrap_or_default()
        };

        for changes in &outcome.delta.layers {
            if !changes.resource.is_empty()
                && let Some(layer_state) = self.state.layer(changes.layer)
            {
                self.bus.publish(Event::Resource(ResourceChanged {
                    layer: slug_of(changes.layer),
                    value: layer_state.resource.value(),
                    best: layer_state.resource.best(),
                    total: layer_state.resource.total(),
                }));
            }
        }

        match &outcome.delta.action {
            Action::Purchase(purchase) => {
                self.bus.publish(Event::Upgrade(UpgradePurchased {
                    layer: slug_of(purchase.layer),
                    index: purchase.index,
                }));
            }
            Action::Reset(reset) => {
                self.bus.publish(Event::Reset(ResetApplied {
                    triggered_by: slug_of(reset.layer),
                    affected: outcome
                        .delta
                        .changed_layers()
                        .map(slug_of)
                        .collect(),
                }));
            }
            Action::Tick(_) | Action::Convert(_) => {}
        }
    }
}
