#![forbid(unsafe_code)]

//! Page-global side effects of a drag.
//!
//! While a handle is being dragged the page shows a resize cursor, text
//! selection is disabled, and page-wide move/up listeners are installed.
//! All three are process-wide state owned by the host page, so they are
//! modelled as a [`DragScope`]. Scopes on one page are counted through a
//! [`PageHold`]: the first acquire records the previous styles and applies the
//! drag styles, the last release puts them back, in whatever order the
//! scopes are released.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

/// Host page operations a drag needs.
///
/// Implementations exist for the browser (`DomPage`, wasm32 only) and for
/// headless use ([`MemoryPage`]). Sharing one page between several split views
/// goes through `Rc<RefCell<_>>`.
pub trait PageHost {
    /// Current document cursor style (`""` when unset).
    fn cursor(&self) -> String;
    fn set_cursor(&mut self, value: &str);
    /// Current document `user-select` style (`""` when unset).
    fn user_select(&self) -> String;
    fn set_user_select(&mut self, value: &str);
    /// Install page-wide `pointermove` and one-shot `pointerup` listeners.
    fn install_drag_listeners(&mut self);
    fn remove_drag_listeners(&mut self);
    /// Styles saved by the outermost active drag, if any drag holds the page.
    fn drag_hold(&self) -> Option<PageHold>;
    fn set_drag_hold(&mut self, hold: Option<PageHold>);
}

impl<H: PageHost + ?Sized> PageHost for &mut H {
    fn cursor(&self) -> String {
        (**self).cursor()
    }

    fn set_cursor(&mut self, value: &str) {
        (**self).set_cursor(value);
    }

    fn user_select(&self) -> String {
        (**self).user_select()
    }

    fn set_user_select(&mut self, value: &str) {
        (**self).set_user_select(value);
    }

    fn install_drag_listeners(&mut self) {
        (**self).install_drag_listeners();
    }

    fn remove_drag_listeners(&mut self) {
        (**self).remove_drag_listeners();
    }

    fn drag_hold(&self) -> Option<PageHold> {
        (**self).drag_hold()
    }

    fn set_drag_hold(&mut self, hold: Option<PageHold>) {
        (**self).set_drag_hold(hold);
    }
}

impl<H: PageHost + ?Sized> PageHost for Rc<RefCell<H>> {
    fn cursor(&self) -> String {
        self.borrow().cursor()
    }

    fn set_cursor(&mut self, value: &str) {
        self.borrow_mut().set_cursor(value);
    }

    fn user_select(&self) -> String {
        self.borrow().user_select()
    }

    fn set_user_select(&mut self, value: &str) {
        self.borrow_mut().set_user_select(value);
    }

    fn install_drag_listeners(&mut self) {
        self.borrow_mut().install_drag_listeners();
    }

    fn remove_drag_listeners(&mut self) {
        self.borrow_mut().remove_drag_listeners();
    }

    fn drag_hold(&self) -> Option<PageHold> {
        self.borrow().drag_hold()
    }

    fn set_drag_hold(&mut self, hold: Option<PageHold>) {
        self.borrow_mut().set_drag_hold(hold);
    }
}

/// `user-select` value applied during a drag.
pub const DRAG_USER_SELECT: &str = "none";

/// Page mutation, as recorded by [`MemoryPage`] or queued for a JS host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HostCommand {
    SetCursor { value: String },
    SetUserSelect { value: String },
    InstallDragListeners,
    RemoveDragListeners,
}

/// Drags currently holding a page, with the styles to restore once the
/// last of them ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHold {
    pub depth: u32,
    pub previous_cursor: String,
    pub previous_user_select: String,
}

/// One drag's claim on the page.
///
/// Must be handed back through [`DragScope::release`]; the drag controller
/// does so on every exit path, including its own drop.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a DragScope must be released to restore the page"]
pub struct DragScope {
    depth: u32,
}

impl DragScope {
    /// Install the drag listeners. The first scope on a page also records
    /// the current styles, applies `cursor` and disables text selection.
    pub fn acquire<H: PageHost + ?Sized>(host: &mut H, cursor: &str) -> Self {
        let hold = match host.drag_hold() {
            Some(hold) => PageHold {
                depth: hold.depth.saturating_add(1),
                ..hold
            },
            None => {
                let hold = PageHold {
                    depth: 1,
                    previous_cursor: host.cursor(),
                    previous_user_select: host.user_select(),
                };
                host.set_cursor(cursor);
                host.set_user_select(DRAG_USER_SELECT);
                hold
            }
        };
        let depth = hold.depth;
        host.set_drag_hold(Some(hold));
        host.install_drag_listeners();
        Self { depth }
    }

    /// Remove the listeners. The last scope on a page restores the styles
    /// recorded by the first.
    pub fn release<H: PageHost + ?Sized>(self, host: &mut H) {
        host.remove_drag_listeners();
        match host.drag_hold() {
            Some(hold) if hold.depth > 1 => host.set_drag_hold(Some(PageHold {
                depth: hold.depth - 1,
                ..hold
            })),
            Some(hold) => {
                host.set_drag_hold(None);
                host.set_cursor(&hold.previous_cursor);
                host.set_user_select(&hold.previous_user_select);
            }
            None => {}
        }
    }

    /// Number of drags holding the page when this scope was acquired,
    /// counting itself.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }
}

/// Headless page: plain fields plus a log of every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPage {
    pub cursor: String,
    pub user_select: String,
    /// Number of listener sets currently installed.
    pub listeners: u32,
    pub hold: Option<PageHold>,
    pub log: Vec<HostCommand>,
}

impl MemoryPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page whose body already carries `cursor` and `user_select` styles.
    #[must_use]
    pub fn with_styles(cursor: &str, user_select: &str) -> Self {
        Self {
            cursor: cursor.to_owned(),
            user_select: user_select.to_owned(),
            ..Self::default()
        }
    }

    /// Wrap in `Rc<RefCell<_>>` so tests can inspect it while a controller
    /// holds it.
    #[must_use]
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }
}

impl PageHost for MemoryPage {
    fn cursor(&self) -> String {
        self.cursor.clone()
    }

    fn set_cursor(&mut self, value: &str) {
        value.clone_into(&mut self.cursor);
        self.log.push(HostCommand::SetCursor {
            value: value.to_owned(),
        });
    }

    fn user_select(&self) -> String {
        self.user_select.clone()
    }

    fn set_user_select(&mut self, value: &str) {
        value.clone_into(&mut self.user_select);
        self.log.push(HostCommand::SetUserSelect {
            value: value.to_owned(),
        });
    }

    fn install_drag_listeners(&mut self) {
        self.listeners = self.listeners.saturating_add(1);
        self.log.push(HostCommand::InstallDragListeners);
    }

    fn remove_drag_listeners(&mut self) {
        self.listeners = self.listeners.saturating_sub(1);
        self.log.push(HostCommand::RemoveDragListeners);
    }

    fn drag_hold(&self) -> Option<PageHold> {
        self.hold.clone()
    }

    fn set_drag_hold(&mut self, hold: Option<PageHold>) {
        self.hold = hold;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_applies_and_restores_page_state() {
        let mut page = MemoryPage::with_styles("pointer", "text");
        let scope = DragScope::acquire(&mut page, "col-resize");
        assert_eq!(page.cursor, "col-resize");
        assert_eq!(page.user_select, "none");
        assert_eq!(page.listeners, 1);
        assert_eq!(scope.depth(), 1);
        assert_eq!(
            page.hold,
            Some(PageHold {
                depth: 1,
                previous_cursor: "pointer".into(),
                previous_user_select: "text".into(),
            })
        );

        scope.release(&mut page);
        assert_eq!(page.cursor, "pointer");
        assert_eq!(page.user_select, "text");
        assert_eq!(page.listeners, 0);
        assert_eq!(page.hold, None);
    }

    #[test]
    fn overlapping_scopes_restore_in_any_release_order() {
        let page = MemoryPage::with_styles("auto", "text").shared();
        let mut first_host = Rc::clone(&page);
        let mut second_host = Rc::clone(&page);

        let first = DragScope::acquire(&mut first_host, "col-resize");
        let second = DragScope::acquire(&mut second_host, "row-resize");
        assert_eq!(second.depth(), 2);
        assert_eq!(page.borrow().cursor, "col-resize");
        assert_eq!(page.borrow().listeners, 2);

        first.release(&mut first_host);
        assert_eq!(page.borrow().cursor, "col-resize");
        assert_eq!(page.borrow().user_select, "none");
        assert_eq!(page.borrow().listeners, 1);

        second.release(&mut second_host);
        let page = page.borrow();
        assert_eq!(page.cursor, "auto");
        assert_eq!(page.user_select, "text");
        assert_eq!(page.listeners, 0);
        assert_eq!(page.hold, None);
    }

    #[test]
    fn nested_scopes_restore_once() {
        let mut page = MemoryPage::with_styles("pointer", "");
        let outer = DragScope::acquire(&mut page, "row-resize");
        let inner = DragScope::acquire(&mut page, "col-resize");
        inner.release(&mut page);
        assert_eq!(page.cursor, "row-resize");
        outer.release(&mut page);
        assert_eq!(page.cursor, "pointer");
        let style_writes = page
            .log
            .iter()
            .filter(|command| matches!(command, HostCommand::SetCursor { .. }))
            .count();
        assert_eq!(style_writes, 2);
    }

    #[test]
    fn shared_page_is_visible_through_rc() {
        let page = MemoryPage::new().shared();
        let mut handle = Rc::clone(&page);
        let scope = DragScope::acquire(&mut handle, "row-resize");
        assert_eq!(page.borrow().cursor, "row-resize");
        scope.release(&mut handle);
        assert_eq!(page.borrow().cursor, "");
        assert_eq!(
            page.borrow().log.last(),
            Some(&HostCommand::SetUserSelect {
                value: String::new()
            })
        );
    }

    #[test]
    fn host_commands_serialize_with_tag() {
        let json = serde_json::to_string(&HostCommand::SetCursor {
            value: "col-resize".into(),
        })
        .expect("serialize");
        assert_eq!(json, r#"{"command":"set_cursor","value":"col-resize"}"#);
        let json = serde_json::to_string(&HostCommand::InstallDragListeners).expect("serialize");
        assert_eq!(json, r#"{"command":"install_drag_listeners"}"#);
    }
}
