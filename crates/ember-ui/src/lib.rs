//! Ember UI - Retained-mode controls and focus groups
//!
//! Controls live inside a `UiGroup`, which assigns ids, routes input,
//! draws everything through the renderer's submission protocol, and
//! bubbles control events up as plain `UiEvent` values. Positions and
//! dimensions are stored as window fractions so layouts survive resizes.
//!
//! Gamepad focus travels along caller-wired neighbour links; the group
//! draws a highlight indicator behind the focused control whenever a
//! controller is connected.

mod button;
mod carousel;
mod component;
mod group;
mod label;
mod listbox;
mod slider;
mod switch;
mod textarea;
mod textbox;

pub use button::UiButton;
pub use carousel::UiCarousel;
pub use component::{
    UiBase, UiControl, UiEvent, UiFrame, UiStyle, CLICKED_EVENT, HIGHLIGHTED_EVENT,
    SELECTED_EVENT, SWITCH_OFF_EVENT, SWITCH_ON_EVENT, TEXT_ENTERED_EVENT, UNHIGHLIGHTED_EVENT,
    UNSELECTED_EVENT, VALUE_SET_EVENT,
};
pub use group::UiGroup;
pub use label::UiLabel;
pub use listbox::UiListBox;
pub use slider::UiSlider;
pub use switch::UiSwitch;
pub use textarea::UiTextArea;
pub use textbox::{UiPasswordBox, UiTextBox};
