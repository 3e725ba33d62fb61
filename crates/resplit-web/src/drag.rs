#![forbid(unsafe_code)]

//! Pointer drag lifecycle for one split handle.
//!
//! [`DragController`] is an explicit two-state machine:
//!
//! ```text
//!            pointer_down (primary, not collapsed)
//!   Idle ───────────────────────────────────────────▶ Dragging{session, scope}
//!    ▲                                                   │  pointer_move → LayoutEngine::set_from_pointer
//!    └──────────── pointer_up | cancel | teardown ◀──────┘
//! ```
//!
//! Every transition returns a [`DragDispatch`] record. Inputs that do not fit
//! the current state (move while idle, a second pointer-down, an up from a
//! different pointer) are reported as [`DragEffect::Ignored`] and change
//! nothing.
//!
//! The page side effects of a drag live in the [`DragScope`] held by the
//! `Dragging` state, so leaving that state by any path releases them. Dropping
//! the controller mid-drag releases them too.

use resplit_core::event::{PointerButton, PointerEvent};
use resplit_core::geometry::Size;
use resplit_layout::{DragSession, ExtentUpdate, LayoutEngine};

use crate::page::{DragScope, PageHost};

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    Cancel,
    Teardown,
}

/// Signal that aborts an active drag without a pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The handle lost pointer capture (`lostpointercapture`).
    LostPointerCapture,
    /// The window lost focus.
    Blur,
    /// The document became hidden.
    VisibilityHidden,
    /// The owning view cancelled, e.g. because its region collapsed.
    Programmatic,
}

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragIgnoredReason {
    /// Move, up or cancel arrived with no active drag.
    NotDragging,
    /// Pointer-down arrived while a drag was already in progress.
    AlreadyDragging,
    /// The region is collapsed, so the handle cannot be dragged.
    Collapsed,
    ButtonNotAllowed,
    /// Event came from a pointer other than the one that started the drag.
    PointerMismatch,
    NonFinitePosition,
}

/// What a dispatch did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEffect {
    Started,
    /// A pointer move was fed to the layout engine. The update may itself be
    /// a no-op (see [`ExtentUpdate::is_noop`]).
    Updated(ExtentUpdate),
    Ended,
    Canceled(CancelReason),
    Ignored(DragIgnoredReason),
}

/// Result of one drag lifecycle dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDispatch {
    pub phase: DragPhase,
    pub pointer_id: Option<u32>,
    pub effect: DragEffect,
    /// Whether the host should call `preventDefault()` on the triggering
    /// event. Set when a drag starts and on every move it accepts, to
    /// suppress native drag, selection and scrolling.
    pub prevent_default: bool,
}

impl DragDispatch {
    fn new(phase: DragPhase, pointer_id: Option<u32>, effect: DragEffect) -> Self {
        Self {
            phase,
            pointer_id,
            effect,
            prevent_default: false,
        }
    }

    fn ignored(phase: DragPhase, pointer_id: Option<u32>, reason: DragIgnoredReason) -> Self {
        resplit_core::trace!(
            message = "split.drag.ignored",
            phase = ?phase,
            pointer_id = ?pointer_id,
            reason = ?reason
        );
        Self::new(phase, pointer_id, DragEffect::Ignored(reason))
    }

    /// Whether the input was ignored.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.effect, DragEffect::Ignored(_))
    }

    /// Extent update produced by a move, if any.
    #[must_use]
    pub const fn update(&self) -> Option<ExtentUpdate> {
        match self.effect {
            DragEffect::Updated(update) => Some(update),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum DragState {
    Idle,
    Dragging { session: DragSession, scope: DragScope },
}

/// Drag state machine bound to a page host.
#[derive(Debug)]
pub struct DragController<H: PageHost> {
    host: H,
    state: DragState,
    activation_button: PointerButton,
}

impl<H: PageHost> DragController<H> {
    /// Idle controller that starts drags on the primary button.
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: DragState::Idle,
            activation_button: PointerButton::Primary,
        }
    }

    /// Use `button` instead of the primary button to start drags.
    #[must_use]
    pub fn with_activation_button(mut self, button: PointerButton) -> Self {
        self.activation_button = button;
        self
    }

    #[must_use]
    pub const fn activation_button(&self) -> PointerButton {
        self.activation_button
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Active session, if dragging.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging { session, .. } => Some(session),
            DragState::Idle => None,
        }
    }

    /// Pointer that owns the active drag.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.session().map(DragSession::pointer_id)
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Start a drag on the handle.
    ///
    /// Records the session origin from `engine`, applies the page side
    /// effects and installs the page-wide listeners. Ignored while
    /// `collapsed`, for a non-activation button, and while a drag is
    /// already active.
    pub fn pointer_down(
        &mut self,
        engine: &LayoutEngine,
        event: &PointerEvent,
        collapsed: bool,
    ) -> DragDispatch {
        let pointer_id = Some(event.pointer_id);
        if collapsed {
            return DragDispatch::ignored(
                DragPhase::PointerDown,
                pointer_id,
                DragIgnoredReason::Collapsed,
            );
        }
        if event.button != self.activation_button {
            return DragDispatch::ignored(
                DragPhase::PointerDown,
                pointer_id,
                DragIgnoredReason::ButtonNotAllowed,
            );
        }
        if self.is_dragging() {
            return DragDispatch::ignored(
                DragPhase::PointerDown,
                pointer_id,
                DragIgnoredReason::AlreadyDragging,
            );
        }
        if !event.position.is_finite() {
            return DragDispatch::ignored(
                DragPhase::PointerDown,
                pointer_id,
                DragIgnoredReason::NonFinitePosition,
            );
        }

        let session = DragSession::begin(engine, event.pointer_id, event.position);
        let scope = DragScope::acquire(&mut self.host, engine.axis().resize_cursor());
        resplit_core::debug!(
            message = "split.drag.start",
            pointer_id = event.pointer_id,
            axis = ?engine.axis(),
            origin = session.origin_coordinate(),
            extent = session.origin_extent()
        );
        self.state = DragState::Dragging { session, scope };

        DragDispatch {
            prevent_default: true,
            ..DragDispatch::new(DragPhase::PointerDown, pointer_id, DragEffect::Started)
        }
    }

    /// Feed a pointer move to `engine`.
    ///
    /// `container` is the container size measured now; ratio extents are a
    /// no-op without it.
    pub fn pointer_move(
        &mut self,
        engine: &mut LayoutEngine,
        event: &PointerEvent,
        container: Option<Size>,
    ) -> DragDispatch {
        let pointer_id = Some(event.pointer_id);
        let DragState::Dragging { session, .. } = &self.state else {
            return DragDispatch::ignored(
                DragPhase::PointerMove,
                pointer_id,
                DragIgnoredReason::NotDragging,
            );
        };
        if session.pointer_id() != event.pointer_id {
            return DragDispatch::ignored(
                DragPhase::PointerMove,
                pointer_id,
                DragIgnoredReason::PointerMismatch,
            );
        }

        let coordinate = engine.axis().coordinate(event.position);
        let update = engine.set_from_pointer(coordinate, session, container);
        resplit_core::trace!(
            message = "split.drag.update",
            pointer_id = event.pointer_id,
            coordinate,
            extent = update.extent.value(),
            outcome = ?update.outcome
        );
        DragDispatch {
            prevent_default: true,
            ..DragDispatch::new(DragPhase::PointerMove, pointer_id, DragEffect::Updated(update))
        }
    }

    /// Finish the drag. The extent keeps its last applied value.
    ///
    /// Only the first up for the active pointer ends the drag; later ups are
    /// ignored as [`DragIgnoredReason::NotDragging`].
    pub fn pointer_up(&mut self, event: &PointerEvent) -> DragDispatch {
        let pointer_id = Some(event.pointer_id);
        match self.active_pointer_id() {
            None => {
                return DragDispatch::ignored(
                    DragPhase::PointerUp,
                    pointer_id,
                    DragIgnoredReason::NotDragging,
                );
            }
            Some(active) if active != event.pointer_id => {
                return DragDispatch::ignored(
                    DragPhase::PointerUp,
                    pointer_id,
                    DragIgnoredReason::PointerMismatch,
                );
            }
            Some(_) => {}
        }

        self.finish();
        resplit_core::debug!(message = "split.drag.end", pointer_id = event.pointer_id);
        DragDispatch::new(DragPhase::PointerUp, pointer_id, DragEffect::Ended)
    }

    /// Abort the active drag. The extent keeps its last applied value.
    pub fn cancel(&mut self, reason: CancelReason) -> DragDispatch {
        let Some(pointer_id) = self.active_pointer_id() else {
            return DragDispatch::ignored(DragPhase::Cancel, None, DragIgnoredReason::NotDragging);
        };
        self.finish();
        resplit_core::debug!(message = "split.drag.cancel", pointer_id, reason = ?reason);
        DragDispatch::new(
            DragPhase::Cancel,
            Some(pointer_id),
            DragEffect::Canceled(reason),
        )
    }

    /// Release any active drag. Returns `true` if one was active.
    ///
    /// Called from `Drop`; safe to call repeatedly.
    pub fn teardown(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        resplit_core::debug!(
            message = "split.drag.cancel",
            pointer_id = ?self.active_pointer_id(),
            reason = "teardown"
        );
        self.finish();
        true
    }

    fn finish(&mut self) {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        if let DragState::Dragging { scope, .. } = state {
            scope.release(&mut self.host);
        }
    }
}

impl<H: PageHost> Drop for DragController<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{HostCommand, MemoryPage};
    use resplit_layout::{Extent, ExtentConfig, ExtentOutcome, LayoutConfig, SplitAxis};

    fn ratio_engine() -> LayoutEngine {
        LayoutEngine::initialize(&LayoutConfig {
            axis: SplitAxis::Horizontal,
            extent: ExtentConfig::ratio(0.65, 0.2, 0.2),
        })
    }

    fn container() -> Option<Size> {
        Some(Size::new(800.0, 600.0))
    }

    #[test]
    fn full_gesture_updates_and_restores_page() {
        let mut engine = ratio_engine();
        let mut drag = DragController::new(MemoryPage::with_styles("auto", "text"));

        let down = drag.pointer_down(&engine, &PointerEvent::new(100.0, 5.0), false);
        assert_eq!(down.effect, DragEffect::Started);
        assert!(down.prevent_default);
        assert!(drag.is_dragging());
        assert_eq!(drag.host().cursor, "col-resize");
        assert_eq!(drag.host().user_select, "none");
        assert_eq!(drag.host().listeners, 1);

        let mv = drag.pointer_move(&mut engine, &PointerEvent::new(180.0, 5.0), container());
        let update = mv.update().expect("move applies");
        assert_eq!(update.outcome, ExtentOutcome::Applied);
        assert!((update.extent.value() - 0.75).abs() < 1e-9);
        assert!(mv.prevent_default);

        let up = drag.pointer_up(&PointerEvent::new(180.0, 5.0));
        assert_eq!(up.effect, DragEffect::Ended);
        assert!(!drag.is_dragging());
        assert_eq!(drag.host().cursor, "auto");
        assert_eq!(drag.host().user_select, "text");
        assert_eq!(drag.host().listeners, 0);
    }

    #[test]
    fn second_pointer_up_is_inert() {
        let engine = ratio_engine();
        let mut drag = DragController::new(MemoryPage::new());
        drag.pointer_down(&engine, &PointerEvent::new(0.0, 0.0), false);
        assert_eq!(drag.pointer_up(&PointerEvent::new(0.0, 0.0)).effect, DragEffect::Ended);

        let log_len = drag.host().log.len();
        let again = drag.pointer_up(&PointerEvent::new(0.0, 0.0));
        assert_eq!(
            again.effect,
            DragEffect::Ignored(DragIgnoredReason::NotDragging)
        );
        assert_eq!(drag.host().log.len(), log_len);
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut engine = ratio_engine();
        let mut drag = DragController::new(MemoryPage::new());
        let mv = drag.pointer_move(&mut engine, &PointerEvent::new(300.0, 0.0), container());
        assert_eq!(mv.effect, DragEffect::Ignored(DragIgnoredReason::NotDragging));
        assert!(!mv.prevent_default);
        assert_eq!(engine.extent(), Extent::Ratio(0.65));
    }

    #[test]
    fn second_pointer_down_does_not_restart() {
        let mut engine = ratio_engine();
        let mut drag = DragController::new(MemoryPage::new());
        drag.pointer_down(&engine, &PointerEvent::new(100.0, 0.0), false);
        let again = drag.pointer_down(&engine, &PointerEvent::new(400.0, 0.0), false);
        assert_eq!(
            again.effect,
            DragEffect::Ignored(DragIgnoredReason::AlreadyDragging)
        );
        assert!(!again.prevent_default);
        assert_eq!(drag.host().listeners, 1);

        // Original origin still governs the session.
        drag.pointer_move(&mut engine, &PointerEvent::new(180.0, 0.0), container());
        assert!((engine.value() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn collapsed_or_secondary_button_never_starts() {
        let engine = ratio_engine();
        let mut drag = DragController::new(MemoryPage::new());
        let collapsed = drag.pointer_down(&engine, &PointerEvent::new(0.0, 0.0), true);
        assert_eq!(
            collapsed.effect,
            DragEffect::Ignored(DragIgnoredReason::Collapsed)
        );

        let secondary = drag.pointer_down(
            &engine,
            &PointerEvent::new(0.0, 0.0).with_button(PointerButton::Secondary),
            false,
        );
        assert_eq!(
            secondary.effect,
            DragEffect::Ignored(DragIgnoredReason::ButtonNotAllowed)
        );
        assert!(drag.host().log.is_empty());
    }

    #[test]
    fn other_pointers_are_ignored_mid_drag() {
        let mut engine = ratio_engine();
        let mut drag = DragController::new(MemoryPage::new());
        drag.pointer_down(&engine, &PointerEvent::new(100.0, 0.0).with_pointer_id(3), false);

        let stray = PointerEvent::new(500.0, 0.0).with_pointer_id(4);
        assert_eq!(
            drag.pointer_move(&mut engine, &stray, container()).effect,
            DragEffect::Ignored(DragIgnoredReason::PointerMismatch)
        );
        assert_eq!(
            drag.pointer_up(&stray).effect,
            DragEffect::Ignored(DragIgnoredReason::PointerMismatch)
        );
        assert!(drag.is_dragging());
        assert_eq!(drag.active_pointer_id(), Some(3));
    }

    #[test]
    fn cancel_keeps_extent_and_restores_page() {
        let mut engine = ratio_engine();
        let mut drag = DragController::new(MemoryPage::with_styles("default", ""));
        drag.pointer_down(&engine, &PointerEvent::new(100.0, 0.0), false);
        drag.pointer_move(&mut engine, &PointerEvent::new(140.0, 0.0), container());

        let cancel = drag.cancel(CancelReason::LostPointerCapture);
        assert_eq!(
            cancel.effect,
            DragEffect::Canceled(CancelReason::LostPointerCapture)
        );
        assert!((engine.value() - 0.7).abs() < 1e-9);
        assert_eq!(drag.host().cursor, "default");
        assert_eq!(
            drag.cancel(CancelReason::Blur).effect,
            DragEffect::Ignored(DragIgnoredReason::NotDragging)
        );
    }

    #[test]
    fn drop_mid_drag_restores_shared_page() {
        let page = MemoryPage::with_styles("pointer", "auto").shared();
        let engine = LayoutEngine::initialize(&LayoutConfig {
            axis: SplitAxis::Vertical,
            extent: ExtentConfig::default(),
        });
        {
            let mut drag = DragController::new(std::rc::Rc::clone(&page));
            drag.pointer_down(&engine, &PointerEvent::new(0.0, 50.0), false);
            assert_eq!(page.borrow().cursor, "row-resize");
        }
        let page = page.borrow();
        assert_eq!(page.cursor, "pointer");
        assert_eq!(page.user_select, "auto");
        assert_eq!(page.listeners, 0);
        assert_eq!(
            page.log.first(),
            Some(&HostCommand::SetCursor {
                value: "row-resize".into()
            })
        );
    }

    #[test]
    fn teardown_is_idempotent() {
        let engine = ratio_engine();
        let mut drag = DragController::new(MemoryPage::new());
        assert!(!drag.teardown());
        drag.pointer_down(&engine, &PointerEvent::new(0.0, 0.0), false);
        assert!(drag.teardown());
        assert!(!drag.teardown());
        assert_eq!(drag.host().listeners, 0);
    }

    #[test]
    fn non_finite_pointer_down_is_ignored() {
        let engine = ratio_engine();
        let mut drag = DragController::new(MemoryPage::new());
        let dispatch = drag.pointer_down(&engine, &PointerEvent::new(f64::NAN, 0.0), false);
        assert!(dispatch.is_ignored());
        assert!(!drag.is_dragging());
    }
}
