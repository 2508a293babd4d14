use crate::core::math::transform::Axis;
use crate::io::config::ControlsConfig;
use crate::scene::camera::{ViewKind, ViewSelection};
use crate::scene::scene_object::SceneObject;
use minifb::{Key, KeyRepeat, Window};

/// Read-only view of the keyboard for one frame.
pub trait KeyboardState {
    /// Key is currently held.
    fn held(&self, key: Key) -> bool;
    /// Key went down since the previous frame (no auto-repeat).
    fn pressed(&self, key: Key) -> bool;
}

impl KeyboardState for Window {
    fn held(&self, key: Key) -> bool {
        self.is_key_down(key)
    }

    fn pressed(&self, key: Key) -> bool {
        self.is_key_pressed(key, KeyRepeat::No)
    }
}

/// One-shot commands bound to key-down events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectView(ViewSelection),
    ResetTransform,
    PrintHelp,
    PrintMatrix,
}

/// Keys with a discrete binding, in the order they are polled.
pub const ACTION_KEYS: [Key; 7] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Escape,
    Key::R,
    Key::H,
    Key::M,
];

pub fn action_for_key(key: Key) -> Option<Action> {
    match key {
        Key::Key1 => Some(Action::SelectView(ViewSelection::Single(ViewKind::Top))),
        Key::Key2 => Some(Action::SelectView(ViewSelection::Single(ViewKind::Front))),
        Key::Key3 => Some(Action::SelectView(ViewSelection::Single(ViewKind::Side))),
        Key::Escape => Some(Action::SelectView(ViewSelection::Overview)),
        Key::R => Some(Action::ResetTransform),
        Key::H => Some(Action::PrintHelp),
        Key::M => Some(Action::PrintMatrix),
        _ => None,
    }
}

/// Actions for every bound key pressed this frame.
pub fn pressed_actions<K: KeyboardState + ?Sized>(keys: &K) -> Vec<Action> {
    ACTION_KEYS
        .iter()
        .filter(|&&key| keys.pressed(key))
        .filter_map(|&key| action_for_key(key))
        .collect()
}

/// Maps held keys to per-frame transform increments.
///
/// There is no frame-time scaling: each frame a key is held applies one full step.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectController {
    pub move_step: f32,
    pub rotate_step: f32,
    pub scale_step: f32,
}

impl Default for ObjectController {
    fn default() -> Self {
        Self::from_config(&ControlsConfig::default())
    }
}

impl ObjectController {
    pub fn from_config(controls: &ControlsConfig) -> Self {
        Self {
            move_step: controls.move_step,
            rotate_step: controls.rotate_step,
            scale_step: controls.scale_step,
        }
    }

    pub fn update<K: KeyboardState + ?Sized>(&self, keys: &K, object: &mut SceneObject) {
        let m = self.move_step;
        let r = self.rotate_step;

        // --- Translation ---
        if keys.held(Key::Left) {
            object.translate(-m, 0.0, 0.0);
        }
        if keys.held(Key::Right) {
            object.translate(m, 0.0, 0.0);
        }
        if keys.held(Key::Up) {
            object.translate(0.0, m, 0.0);
        }
        if keys.held(Key::Down) {
            object.translate(0.0, -m, 0.0);
        }
        if keys.held(Key::PageUp) {
            object.translate(0.0, 0.0, m);
        }
        if keys.held(Key::PageDown) {
            object.translate(0.0, 0.0, -m);
        }

        // --- Rotation ---
        if keys.held(Key::Q) {
            object.rotate(Axis::X, r);
        }
        if keys.held(Key::E) {
            object.rotate(Axis::X, -r);
        }
        if keys.held(Key::W) {
            object.rotate(Axis::Y, r);
        }
        if keys.held(Key::S) {
            object.rotate(Axis::Y, -r);
        }
        if keys.held(Key::A) {
            object.rotate(Axis::Z, r);
        }
        if keys.held(Key::D) {
            object.rotate(Axis::Z, -r);
        }

        // --- Scale (main keyboard or numpad) ---
        if keys.held(Key::Equal) || keys.held(Key::NumPadPlus) {
            object.scale(1.0 + self.scale_step);
        }
        if keys.held(Key::Minus) || keys.held(Key::NumPadMinus) {
            object.scale(1.0 - self.scale_step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::mesh::PolygonMesh;
    use approx::assert_relative_eq;
    use nalgebra::Matrix4;

    #[derive(Default)]
    struct FakeKeys {
        held: Vec<Key>,
        pressed: Vec<Key>,
    }

    impl KeyboardState for FakeKeys {
        fn held(&self, key: Key) -> bool {
            self.held.contains(&key)
        }

        fn pressed(&self, key: Key) -> bool {
            self.pressed.contains(&key)
        }
    }

    fn holding(keys: &[Key]) -> FakeKeys {
        FakeKeys {
            held: keys.to_vec(),
            pressed: Vec::new(),
        }
    }

    fn glyph() -> SceneObject {
        SceneObject::new(PolygonMesh::letter_glyph())
    }

    #[test]
    fn arrows_and_page_keys_translate() {
        let controller = ObjectController::default();
        let mut obj = glyph();
        controller.update(&holding(&[Key::Left, Key::Up, Key::PageDown]), &mut obj);
        let m = obj.transform();
        assert_relative_eq!(m[(0, 3)], -0.1);
        assert_relative_eq!(m[(1, 3)], 0.1);
        assert_relative_eq!(m[(2, 3)], -0.1);
    }

    #[test]
    fn opposite_keys_cancel() {
        let controller = ObjectController::default();
        let mut obj = glyph();
        controller.update(&holding(&[Key::Right, Key::Left]), &mut obj);
        assert_relative_eq!(*obj.transform(), Matrix4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn rotation_keys_use_degree_steps() {
        let controller = ObjectController::default();
        for (key, axis, sign) in [
            (Key::Q, Axis::X, 1.0),
            (Key::E, Axis::X, -1.0),
            (Key::W, Axis::Y, 1.0),
            (Key::S, Axis::Y, -1.0),
            (Key::A, Axis::Z, 1.0),
            (Key::D, Axis::Z, -1.0),
        ] {
            let mut via_key = glyph();
            controller.update(&holding(&[key]), &mut via_key);
            let mut direct = glyph();
            direct.rotate(axis, 2.0 * sign);
            assert_eq!(via_key.transform(), direct.transform(), "key {key:?}");
        }
    }

    #[test]
    fn plus_and_minus_scale_multiplicatively() {
        let controller = ObjectController::default();
        let mut obj = glyph();
        controller.update(&holding(&[Key::NumPadPlus]), &mut obj);
        assert_relative_eq!(obj.transform()[(0, 0)], 1.1);
        controller.update(&holding(&[Key::Minus]), &mut obj);
        assert_relative_eq!(obj.transform()[(0, 0)], 0.99, epsilon = 1e-6);
    }

    #[test]
    fn steps_come_from_config() {
        let controller = ObjectController::from_config(&ControlsConfig {
            move_step: 0.5,
            rotate_step: 10.0,
            scale_step: 0.5,
        });
        let mut obj = glyph();
        controller.update(&holding(&[Key::Right]), &mut obj);
        assert_relative_eq!(obj.transform()[(0, 3)], 0.5);
    }

    #[test]
    fn discrete_keys_map_to_actions() {
        assert_eq!(
            action_for_key(Key::Key1),
            Some(Action::SelectView(ViewSelection::Single(ViewKind::Top)))
        );
        assert_eq!(
            action_for_key(Key::Key3),
            Some(Action::SelectView(ViewSelection::Single(ViewKind::Side)))
        );
        assert_eq!(
            action_for_key(Key::Escape),
            Some(Action::SelectView(ViewSelection::Overview))
        );
        assert_eq!(action_for_key(Key::R), Some(Action::ResetTransform));
        assert_eq!(action_for_key(Key::Q), None);
    }

    #[test]
    fn held_action_keys_do_not_trigger_actions() {
        let keys = FakeKeys {
            held: vec![Key::R, Key::M],
            pressed: vec![Key::H],
        };
        assert_eq!(pressed_actions(&keys), vec![Action::PrintHelp]);
    }
}
