//! Small widget helpers shared by the panels.

use eframe::egui;

/// True when a slider's value should be sent: the drag ended, or the value
/// changed without a drag (keyboard, text entry).
pub fn committed(response: &egui::Response) -> bool {
    response.drag_stopped() || (response.changed() && !response.dragged())
}

/// Result of editing a slider-backed value.
pub struct SliderEdit<T> {
    pub value: T,
    pub commit: bool,
}

/// Three sliders for an `[x, y, z]` position in [-1, 1].
///
/// Returns the edited position if any component changed or was committed.
pub fn position_sliders(ui: &mut egui::Ui, position: [f64; 3]) -> Option<SliderEdit<[f64; 3]>> {
    let mut value = position;
    let mut changed = false;
    let mut commit = false;

    for (axis, component) in ["X", "Y", "Z"].iter().zip(value.iter_mut()) {
        let response = ui.add(egui::Slider::new(component, -1.0..=1.0).text(*axis));
        changed |= response.changed();
        commit |= committed(&response);
    }

    (changed || commit).then_some(SliderEdit { value, commit })
}

/// One slider over `range`.
pub fn scalar_slider(
    ui: &mut egui::Ui,
    value: f64,
    range: std::ops::RangeInclusive<f64>,
    label: &str,
) -> Option<SliderEdit<f64>> {
    let mut edited = value;
    let response = ui.add(egui::Slider::new(&mut edited, range).text(label));
    let commit = committed(&response);
    (response.changed() || commit).then_some(SliderEdit { value: edited, commit })
}
