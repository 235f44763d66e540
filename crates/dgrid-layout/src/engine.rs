//! Gesture state machine tying mapper, sessions and model together.
//!
//! ```text
//! Idle -> ActiveMove   -> Idle   (commit, discard or cancel)
//! Idle -> ActiveResize -> Idle
//! ```
//!
//! Every call to [`GridLayoutManager::handle_event`] yields exactly one
//! [`GestureTransition`]. Events that do not apply to the current phase are
//! reported as [`GestureEffect::Noop`] and change nothing; in particular a
//! second pointer-down while a gesture is active is ignored.
//!
//! The model is mutated only on pointer-up, and observers are notified only
//! after a commit succeeded.

use std::fmt;

use dgrid_core::event::{Modifiers, PointerButton};
use dgrid_core::geometry::{PixelPoint, PixelRect, Rect};

use crate::config::{GridConfig, GridConfigError};
use crate::coords::CoordinateMapper;
use crate::drag::{DragSession, MoveCommit};
use crate::item::{GridItem, GridItemSpec, ItemId};
use crate::model::{GridModel, GridModelError};
use crate::preview::ShadowPreview;
use crate::render::RenderPlan;
use crate::resize::{HandleGrab, ResizeCommit, ResizeMode, ResizeSession};

/// Which part of an item the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grip {
    /// Item body: starts a move.
    Body,
    /// Resize handle with its measured pixel bounds: starts a resize.
    ResizeHandle { handle: PixelRect },
}

/// Pointer press that may open a gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerPress {
    pub item: ItemId,
    pub grip: Grip,
    pub position: PixelPoint,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerPress {
    /// Primary-button press on an item body.
    pub fn body(item: impl Into<ItemId>, position: PixelPoint) -> Self {
        Self {
            item: item.into(),
            grip: Grip::Body,
            position,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    /// Primary-button press on an item's resize handle.
    pub fn handle(item: impl Into<ItemId>, handle: PixelRect, position: PixelPoint) -> Self {
        Self {
            item: item.into(),
            grip: Grip::ResizeHandle { handle },
            position,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// Input consumed by the gesture machine, in host pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum GridInputEvent {
    PointerDown(PointerPress),
    PointerMove { position: PixelPoint },
    PointerUp { position: PixelPoint },
    Cancel { reason: CancelReason },
}

/// Why a gesture was abandoned without a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    EscapeKey,
    FocusLost,
    PointerCancel,
    Programmatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Idle,
    ActiveMove,
    ActiveResize,
}

/// Diagnostics for events that were safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoopReason {
    IdleWithoutGesture,
    GestureAlreadyActive,
    UnknownItem,
    NonPrimaryButton,
    /// A [`GestureCapture`] that did not open the active gesture tried to
    /// drive it.
    NotCaptured,
}

/// Why an ended gesture left the model untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    InvalidPreview,
    Canceled(CancelReason),
    /// The model refused the commit.
    Rejected(GridModelError),
}

/// A successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommit {
    Move(MoveCommit),
    Resize(ResizeCommit),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureEffect {
    MoveStarted { item: ItemId },
    ResizeStarted { item: ItemId, mode: ResizeMode },
    PreviewUpdated { rect: Rect, is_valid: bool },
    Committed(GridCommit),
    Discarded { reason: DiscardReason },
    Noop { reason: NoopReason },
}

/// One step of the gesture machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureTransition {
    pub transition_id: u64,
    pub from: GesturePhase,
    pub to: GesturePhase,
    pub effect: GestureEffect,
}

impl GestureTransition {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.effect, GestureEffect::Noop { .. })
    }

    #[must_use]
    pub fn commit(&self) -> Option<&GridCommit> {
        match &self.effect {
            GestureEffect::Committed(commit) => Some(commit),
            _ => None,
        }
    }
}

/// Receiver of committed layout changes.
///
/// Both methods default to no-ops so observers implement only what they need.
pub trait LayoutObserver {
    /// A move or swap was committed. `rect` is the dragged item's new
    /// rectangle.
    fn on_layout_change(&mut self, _item: &ItemId, _rect: Rect, _is_swap: bool) {}

    /// A resize was committed.
    fn on_resize(&mut self, _item: &ItemId, _width: u16, _height: u16, _mode: ResizeMode) {}
}

/// Construction failures of [`GridLayoutManager`].
#[derive(Debug, Clone, PartialEq)]
pub enum GridLayoutError {
    Config(GridConfigError),
    Model(GridModelError),
}

impl fmt::Display for GridLayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid grid config: {err}"),
            Self::Model(err) => write!(f, "invalid initial layout: {err}"),
        }
    }
}

impl std::error::Error for GridLayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Model(err) => Some(err),
        }
    }
}

impl From<GridConfigError> for GridLayoutError {
    fn from(err: GridConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<GridModelError> for GridLayoutError {
    fn from(err: GridModelError) -> Self {
        Self::Model(err)
    }
}

#[derive(Debug, Clone)]
enum GestureState {
    Idle,
    ActiveMove {
        session: DragSession,
        preview: ShadowPreview,
    },
    ActiveResize {
        session: ResizeSession,
        preview: ShadowPreview,
    },
}

impl GestureState {
    const fn phase(&self) -> GesturePhase {
        match self {
            Self::Idle => GesturePhase::Idle,
            Self::ActiveMove { .. } => GesturePhase::ActiveMove,
            Self::ActiveResize { .. } => GesturePhase::ActiveResize,
        }
    }
}

/// Interactive grid: owns the model and drives one gesture at a time.
pub struct GridLayoutManager {
    config: GridConfig,
    model: GridModel,
    mapper: CoordinateMapper,
    state: GestureState,
    observers: Vec<Box<dyn LayoutObserver>>,
    transition_counter: u64,
}

impl fmt::Debug for GridLayoutManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridLayoutManager")
            .field("config", &self.config)
            .field("model", &self.model)
            .field("mapper", &self.mapper)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .field("transition_counter", &self.transition_counter)
            .finish()
    }
}

impl GridLayoutManager {
    /// Validate `config` and place the initial items.
    pub fn new(
        config: GridConfig,
        container: PixelRect,
        specs: &[GridItemSpec],
    ) -> Result<Self, GridLayoutError> {
        config.validate()?;
        let model = GridModel::from_specs(config.dimensions(), specs)?;
        Ok(Self {
            mapper: CoordinateMapper::from_config(container, &config),
            config,
            model,
            state: GestureState::Idle,
            observers: Vec::new(),
            transition_counter: 0,
        })
    }

    pub fn subscribe(&mut self, observer: Box<dyn LayoutObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub const fn model(&self) -> &GridModel {
        &self.model
    }

    #[must_use]
    pub const fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        self.state.phase()
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    /// Number of transitions emitted so far.
    #[must_use]
    pub const fn transition_counter(&self) -> u64 {
        self.transition_counter
    }

    /// Shadow preview of the active gesture.
    #[must_use]
    pub fn preview(&self) -> Option<&ShadowPreview> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::ActiveMove { preview, .. } | GestureState::ActiveResize { preview, .. } => {
                Some(preview)
            }
        }
    }

    /// Item under the active gesture.
    #[must_use]
    pub fn active_item(&self) -> Option<&ItemId> {
        self.preview().map(|preview| &preview.item_id)
    }

    /// Snapshot for the renderer.
    #[must_use]
    pub fn render_plan(&self) -> RenderPlan {
        RenderPlan::build(&self.model, &self.mapper, self.preview())
    }

    /// Re-measured container bounds; applies from the next pointer event.
    pub fn set_container(&mut self, container: PixelRect) {
        self.mapper.set_container(container);
    }

    /// Add a panel at runtime (see [`GridModel::insert`]).
    pub fn insert(&mut self, spec: &GridItemSpec) -> Result<&GridItem, GridModelError> {
        self.model.insert(spec)
    }

    /// Remove a panel, cancelling its gesture first if it is being dragged or
    /// resized.
    pub fn remove(&mut self, id: &ItemId) -> Option<GridItem> {
        if self.active_item() == Some(id) {
            self.force_cancel();
        }
        self.model.remove(id)
    }

    /// Feed one input event through the gesture machine.
    pub fn handle_event(&mut self, event: &GridInputEvent) -> GestureTransition {
        let from = self.phase();
        let effect = match event {
            GridInputEvent::PointerDown(press) => self.pointer_down(press),
            GridInputEvent::PointerMove { position } => self.pointer_move(*position),
            GridInputEvent::PointerUp { position } => self.pointer_up(*position),
            GridInputEvent::Cancel { reason } => self.cancel(*reason),
        };
        self.transition(from, effect)
    }

    /// Unconditionally drop the active gesture without committing.
    ///
    /// Returns `None` when already idle.
    pub fn force_cancel(&mut self) -> Option<GestureTransition> {
        if !self.is_active() {
            return None;
        }
        let from = self.phase();
        let effect = self.cancel(CancelReason::Programmatic);
        Some(self.transition(from, effect))
    }

    /// Open a gesture with an exclusive borrow of the manager.
    ///
    /// The returned guard is the only way to drive the gesture while it lives.
    /// Finish it with [`GestureCapture::release`]; dropping it on any other
    /// path cancels the gesture.
    pub fn capture(&mut self, press: PointerPress) -> GestureCapture<'_> {
        let opened = self.handle_event(&GridInputEvent::PointerDown(press));
        let owns_gesture = !opened.is_noop();
        GestureCapture {
            manager: self,
            opened,
            owns_gesture,
        }
    }

    fn transition(&mut self, from: GesturePhase, effect: GestureEffect) -> GestureTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        GestureTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase(),
            effect,
        }
    }

    fn pointer_down(&mut self, press: &PointerPress) -> GestureEffect {
        if self.is_active() {
            return GestureEffect::Noop {
                reason: NoopReason::GestureAlreadyActive,
            };
        }
        if press.button != PointerButton::Primary {
            return GestureEffect::Noop {
                reason: NoopReason::NonPrimaryButton,
            };
        }

        let cell = self.mapper.pixel_to_cell(press.position);
        match press.grip {
            Grip::Body => {
                let Ok(session) = DragSession::begin(&self.model, &press.item, cell) else {
                    return GestureEffect::Noop {
                        reason: NoopReason::UnknownItem,
                    };
                };
                let preview = session.preview(&self.model, cell, self.config.swap_threshold);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    message = "grid.gesture.start",
                    item = %press.item,
                    phase = "move",
                    cell_x = cell.x,
                    cell_y = cell.y
                );
                self.state = GestureState::ActiveMove { session, preview };
                GestureEffect::MoveStarted {
                    item: press.item.clone(),
                }
            }
            Grip::ResizeHandle { handle } => {
                let grab = HandleGrab::within(handle, press.position);
                let mode = ResizeMode::detect(press.modifiers, Some(grab), self.config.handle_zone);
                let Ok(session) = ResizeSession::begin(&self.model, &press.item, cell, mode) else {
                    return GestureEffect::Noop {
                        reason: NoopReason::UnknownItem,
                    };
                };
                let preview = session.preview(&self.model, cell);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    message = "grid.gesture.start",
                    item = %press.item,
                    phase = "resize",
                    mode = mode.as_str()
                );
                self.state = GestureState::ActiveResize { session, preview };
                GestureEffect::ResizeStarted {
                    item: press.item.clone(),
                    mode,
                }
            }
        }
    }

    fn pointer_move(&mut self, position: PixelPoint) -> GestureEffect {
        let cell = self.mapper.pixel_to_cell(position);
        let threshold = self.config.swap_threshold;
        let updated = match &mut self.state {
            GestureState::Idle => None,
            GestureState::ActiveMove { session, preview } => {
                *preview = session.preview(&self.model, cell, threshold);
                Some(&*preview)
            }
            GestureState::ActiveResize { session, preview } => {
                *preview = session.preview(&self.model, cell);
                Some(&*preview)
            }
        };
        match updated {
            Some(preview) => GestureEffect::PreviewUpdated {
                rect: preview.rect,
                is_valid: preview.is_valid,
            },
            None => GestureEffect::Noop {
                reason: NoopReason::IdleWithoutGesture,
            },
        }
    }

    fn pointer_up(&mut self, position: PixelPoint) -> GestureEffect {
        let cell = self.mapper.pixel_to_cell(position);
        let outcome = match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => {
                return GestureEffect::Noop {
                    reason: NoopReason::IdleWithoutGesture,
                };
            }
            GestureState::ActiveMove { session, .. } => {
                let preview = session.preview(&self.model, cell, self.config.swap_threshold);
                if !preview.is_valid {
                    Err(DiscardReason::InvalidPreview)
                } else {
                    session
                        .commit(&mut self.model, &preview)
                        .map(GridCommit::Move)
                        .map_err(DiscardReason::Rejected)
                }
            }
            GestureState::ActiveResize { session, .. } => {
                let preview = session.preview(&self.model, cell);
                if !preview.is_valid {
                    Err(DiscardReason::InvalidPreview)
                } else {
                    session
                        .commit(&mut self.model, &preview)
                        .map(GridCommit::Resize)
                        .map_err(DiscardReason::Rejected)
                }
            }
        };

        match outcome {
            Ok(commit) => {
                self.notify(&commit);
                #[cfg(feature = "tracing")]
                log_commit(&commit);
                GestureEffect::Committed(commit)
            }
            Err(reason) => {
                #[cfg(feature = "tracing")]
                match &reason {
                    DiscardReason::Rejected(err) => {
                        tracing::warn!(message = "grid.commit.rejected", error = %err);
                    }
                    _ => tracing::debug!(message = "grid.gesture.end", outcome = "discarded"),
                }
                GestureEffect::Discarded { reason }
            }
        }
    }

    fn cancel(&mut self, reason: CancelReason) -> GestureEffect {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => GestureEffect::Noop {
                reason: NoopReason::IdleWithoutGesture,
            },
            _ => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    message = "grid.gesture.end",
                    outcome = "canceled",
                    reason = ?reason
                );
                GestureEffect::Discarded {
                    reason: DiscardReason::Canceled(reason),
                }
            }
        }
    }

    fn notify(&mut self, commit: &GridCommit) {
        for observer in &mut self.observers {
            match commit {
                GridCommit::Move(MoveCommit::Moved { item, rect }) => {
                    observer.on_layout_change(item, *rect, false);
                }
                GridCommit::Move(MoveCommit::Swapped { item, rect, .. }) => {
                    observer.on_layout_change(item, *rect, true);
                }
                GridCommit::Resize(resize) => {
                    observer.on_resize(&resize.item, resize.width, resize.height, resize.mode);
                }
            }
        }
    }
}

#[cfg(feature = "tracing")]
fn log_commit(commit: &GridCommit) {
    match commit {
        GridCommit::Move(MoveCommit::Moved { item, rect }) => tracing::info!(
            message = "grid.commit",
            kind = "move",
            item = %item,
            x = rect.x,
            y = rect.y
        ),
        GridCommit::Move(MoveCommit::Swapped { item, target, .. }) => tracing::info!(
            message = "grid.commit",
            kind = "swap",
            item = %item,
            target = %target
        ),
        GridCommit::Resize(resize) => tracing::info!(
            message = "grid.commit",
            kind = "resize",
            item = %resize.item,
            width = resize.width,
            height = resize.height,
            mode = resize.mode.as_str()
        ),
    }
    tracing::debug!(message = "grid.gesture.end", outcome = "committed");
}

/// Exclusive handle on one gesture.
///
/// Holds `&mut GridLayoutManager`, so no other event can reach the manager
/// until the capture ends. Dropping an unreleased capture cancels the gesture
/// it opened.
#[must_use = "dropping the capture cancels the gesture"]
pub struct GestureCapture<'a> {
    manager: &'a mut GridLayoutManager,
    opened: GestureTransition,
    owns_gesture: bool,
}

impl GestureCapture<'_> {
    /// The pointer-down transition; a no-op when no gesture was opened.
    #[must_use]
    pub fn opened(&self) -> &GestureTransition {
        &self.opened
    }

    /// Whether this capture started a gesture.
    #[must_use]
    pub const fn owns_gesture(&self) -> bool {
        self.owns_gesture
    }

    #[must_use]
    pub fn preview(&self) -> Option<&ShadowPreview> {
        if self.owns_gesture {
            self.manager.preview()
        } else {
            None
        }
    }

    pub fn move_to(&mut self, position: PixelPoint) -> GestureTransition {
        self.forward(&GridInputEvent::PointerMove { position })
    }

    /// Finish the gesture at `position`, committing a valid preview.
    pub fn release(mut self, position: PixelPoint) -> GestureTransition {
        let transition = self.forward(&GridInputEvent::PointerUp { position });
        self.owns_gesture = false;
        transition
    }

    /// Abandon the gesture explicitly.
    pub fn cancel(mut self, reason: CancelReason) -> GestureTransition {
        let transition = self.forward(&GridInputEvent::Cancel { reason });
        self.owns_gesture = false;
        transition
    }

    /// Events reach the manager only while this capture owns its gesture.
    fn forward(&mut self, event: &GridInputEvent) -> GestureTransition {
        if self.owns_gesture {
            return self.manager.handle_event(event);
        }
        let from = self.manager.phase();
        self.manager.transition(
            from,
            GestureEffect::Noop {
                reason: NoopReason::NotCaptured,
            },
        )
    }
}

impl Drop for GestureCapture<'_> {
    fn drop(&mut self) {
        if self.owns_gesture {
            self.manager.force_cancel();
        }
    }
}
