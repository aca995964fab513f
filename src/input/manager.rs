use super::events::{ConfigAction, RawInputEvent};
use std::collections::HashMap;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Keyboard shortcuts for decal navigation.
pub struct InputManager {
    bindings: HashMap<KeyCode, ConfigAction>,
}

impl InputManager {
    pub fn new() -> Self {
        let mut manager = Self {
            bindings: HashMap::new(),
        };
        manager.load_default_bindings();
        manager
    }

    pub fn process(&mut self, event: RawInputEvent) -> Option<ConfigAction> {
        if event.state != ElementState::Pressed {
            return None;
        }
        self.bindings.get(&event.keycode).cloned()
    }

    fn load_default_bindings(&mut self) {
        // Navigation between decals
        self.bindings
            .insert(KeyCode::ArrowLeft, ConfigAction::SelectPrevious);
        self.bindings
            .insert(KeyCode::ArrowRight, ConfigAction::SelectNext);
        self.bindings.insert(KeyCode::Home, ConfigAction::SetActiveIndex(0));
        self.bindings
            .insert(KeyCode::End, ConfigAction::SetActiveIndex(usize::MAX));

        // Removal
        self.bindings
            .insert(KeyCode::Delete, ConfigAction::RemoveActiveDecal);

        // Panels
        self.bindings.insert(KeyCode::Escape, ConfigAction::HideControls);
        self.bindings.insert(KeyCode::Tab, ConfigAction::ShowControls);
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(keycode: KeyCode) -> RawInputEvent {
        RawInputEvent {
            keycode,
            state: ElementState::Pressed,
        }
    }

    #[test]
    fn test_arrows_navigate() {
        let mut manager = InputManager::new();
        assert_eq!(
            manager.process(press(KeyCode::ArrowLeft)),
            Some(ConfigAction::SelectPrevious)
        );
        assert_eq!(
            manager.process(press(KeyCode::ArrowRight)),
            Some(ConfigAction::SelectNext)
        );
    }

    #[test]
    fn test_release_and_unbound_keys_are_ignored() {
        let mut manager = InputManager::new();
        let release = RawInputEvent {
            keycode: KeyCode::Delete,
            state: ElementState::Released,
        };
        assert_eq!(manager.process(release), None);
        assert_eq!(manager.process(press(KeyCode::KeyQ)), None);
        assert_eq!(
            manager.process(press(KeyCode::Delete)),
            Some(ConfigAction::RemoveActiveDecal)
        );
    }
}
