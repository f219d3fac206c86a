//! Shared helpers for deciding whether scene input belongs to the UI

use bevy_egui::EguiContexts;

/// True when egui is using the pointer (hovering a panel or dragging a widget).
///
/// Camera controls should ignore mouse input while this holds.
pub fn ui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
}

/// True when a text field or other widget has keyboard focus
pub fn ui_wants_keyboard(contexts: &mut EguiContexts) -> bool {
    contexts.ctx_mut().is_ok_and(|ctx| ctx.wants_keyboard_input())
}
