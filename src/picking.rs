//! Click binding for zoomable objects (enabled with the `picking` feature).

use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;

use crate::components::ZoomTrigger;
use crate::events::ToggleZoom;

/// Observer that toggles the zoom of the clicked object.
///
/// Clicks on child meshes resolve to the nearest ancestor carrying a `ZoomTrigger`; once
/// handled, the click stops bubbling so nested zoomable objects toggle only once.
pub fn toggle_zoom_on_click(
    mut click: On<Pointer<Click>>,
    mut commands: Commands,
    parents: Query<&ChildOf>,
    triggers: Query<(), With<ZoomTrigger>>,
) {
    if click.button != PointerButton::Primary {
        return;
    }

    let clicked = click.entity;
    let Some(entity) = std::iter::once(clicked)
        .chain(parents.iter_ancestors(clicked))
        .find(|e| triggers.contains(*e))
    else {
        return;
    };

    click.propagate(false);
    commands.trigger(ToggleZoom::new(entity));
}
