//! Inline styles and fixed strings of the overlay elements

pub const CONTAINER_CLASS: &str = "noselect debug-overlay";

const CONTAINER: &str = "position:absolute;top:0;transform:translate(6px,6px);padding:5pt;padding-top:4pt;border-radius:5px;display:grid;gap:1px;color:#ffffff;background-color:rgba(0,0,0,0.5);cursor:default;z-index:10;overflow:hidden;";
const FONT_FAMILY: &str = "font-family:'Roboto Mono',monospace;";
const FONT_SIZE: &str = "font-size:10pt;";
const FONT_WEIGHT: &str = "font-weight:300;";
const NO_SELECT: &str = "-webkit-touch-callout:none;-webkit-user-select:none;-khtml-user-select:none;-moz-user-select:none;-ms-user-select:none;user-select:none;cursor:default;";

/// Indicator colour while the loop runs.
pub const LOOP_RUNNING_COLOR: &str = "#5EE1F0";
/// Indicator colour while the loop is stopped.
pub const LOOP_STOPPED_COLOR: &str = "#FF2E62";
/// Indicator colour before the first status report, when it is clickable.
pub const LOOP_TOGGLE_COLOR: &str = "#9C8CF3";

pub const FPS_TITLE: &str = "Displaying the current frame rate";
pub const FRAME_TIME_TITLE: &str = "Displaying the current frame time";
pub const LOOP_TITLE: &str = "Display current status of the loop.";
pub const GRAPH_TITLE: &str = "Frame time over time";

pub fn container_style() -> String {
    [CONTAINER, FONT_FAMILY, FONT_SIZE, FONT_WEIGHT, NO_SELECT].concat()
}

pub fn toggle_hint_style() -> String {
    format!("cursor: Pointer;color:{LOOP_TOGGLE_COLOR}")
}

pub fn loop_indicator_style(running: bool) -> String {
    let color = if running {
        LOOP_RUNNING_COLOR
    } else {
        LOOP_STOPPED_COLOR
    };
    format!("cursor:Pointer;color:{color}")
}

/// Logical size of the graph element, in CSS pixels.
pub fn graph_style(width: u32, height: u32) -> String {
    format!("width:{width}px;height:{height}px;")
}
