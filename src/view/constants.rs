//! Layout dimension constants for TUI rendering.

/// Height of the pagination bar in lines.
pub const PAGINATION_BAR_HEIGHT: u16 = 1;

/// Height of the notice pane when shown (border + content).
pub const NOTICE_PANE_HEIGHT: u16 = 6;

/// Width percentage for the deletion confirmation popup.
pub const CONFIRM_POPUP_WIDTH_PERCENT: u16 = 50;

/// Height of the deletion confirmation popup in lines.
pub const CONFIRM_POPUP_HEIGHT: u16 = 6;
