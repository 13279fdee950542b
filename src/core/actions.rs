//! 액션 시스템: 목록 포커스 상태에서의 키 바인딩과 하단 힌트가
//! 이 모듈의 레지스트리를 참조합니다.
//!
//! 경로 입력창에 포커스가 있을 때의 문자 입력은 여기서 다루지 않습니다.

use crossterm::event::{KeyCode, KeyModifiers};
use log::debug;
use std::sync::LazyLock;

/// 다이얼로그에서 가능한 액션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    GoToTop,
    GoToBottom,
    GoToParent,
    Activate,
    Refresh,
    // Focus
    FocusPath,
    // Dialog
    Cancel,
    Quit,
}

/// 하단 힌트 표시 정보
pub struct HintEntry {
    pub key: &'static str,
    pub label: &'static str,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub id: &'static str,
    pub hint: Option<HintEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

pub static ACTION_DEFS: &[ActionDef] = &[
    ActionDef {
        action: Action::MoveUp,
        id: "move_up",
        hint: Some(HintEntry {
            key: "↑↓",
            label: "Mark",
        }),
    },
    ActionDef {
        action: Action::MoveDown,
        id: "move_down",
        hint: None,
    },
    ActionDef {
        action: Action::GoToTop,
        id: "go_top",
        hint: None,
    },
    ActionDef {
        action: Action::GoToBottom,
        id: "go_bottom",
        hint: None,
    },
    ActionDef {
        action: Action::GoToParent,
        id: "go_parent",
        hint: Some(HintEntry {
            key: "BS",
            label: "Up",
        }),
    },
    ActionDef {
        action: Action::Activate,
        id: "activate",
        hint: Some(HintEntry {
            key: "Enter",
            label: "Open",
        }),
    },
    ActionDef {
        action: Action::Refresh,
        id: "refresh",
        hint: None,
    },
    ActionDef {
        action: Action::FocusPath,
        id: "focus_path",
        hint: Some(HintEntry {
            key: "Tab",
            label: "Path",
        }),
    },
    ActionDef {
        action: Action::Cancel,
        id: "cancel",
        hint: Some(HintEntry {
            key: "Esc",
            label: "Cancel",
        }),
    },
    ActionDef {
        action: Action::Quit,
        id: "quit",
        hint: None,
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding {
            code: KeyCode::Up,
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Char('k'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Down,
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Char('j'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Home,
            modifiers: None,
            action: Action::GoToTop,
        },
        KeyBinding {
            code: KeyCode::End,
            modifiers: None,
            action: Action::GoToBottom,
        },
        KeyBinding {
            code: KeyCode::Backspace,
            modifiers: None,
            action: Action::GoToParent,
        },
        KeyBinding {
            code: KeyCode::Up,
            modifiers: Some(KeyModifiers::ALT),
            action: Action::GoToParent,
        },
        KeyBinding {
            code: KeyCode::Enter,
            modifiers: None,
            action: Action::Activate,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Refresh,
        },
        KeyBinding {
            code: KeyCode::Tab,
            modifiers: None,
            action: Action::FocusPath,
        },
        KeyBinding {
            code: KeyCode::Esc,
            modifiers: None,
            action: Action::Cancel,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Quit,
        },
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    key_bindings()
        .iter()
        .find(|binding| {
            binding.code == code
                && match binding.modifiers {
                    None => true, // any modifier
                    Some(required) => modifiers == required,
                }
        })
        .map(|binding| binding.action)
        .inspect(|action| debug!("{:?} -> {}", code, action_id(*action)))
}

/// 로그에 남길 액션 식별자
pub fn action_id(action: Action) -> &'static str {
    ACTION_DEFS
        .iter()
        .find(|def| def.action == action)
        .map_or("unknown", |def| def.id)
}

/// 하단에 표시할 힌트 목록 (정의 순서)
pub fn hint_entries() -> impl Iterator<Item = &'static HintEntry> {
    ACTION_DEFS.iter().filter_map(|def| def.hint.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_action_basic() {
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Enter),
            Some(Action::Activate)
        );
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Backspace),
            Some(Action::GoToParent)
        );
        assert_eq!(
            find_action(KeyModifiers::ALT, KeyCode::Up),
            Some(Action::GoToParent)
        );
        assert_eq!(
            find_action(KeyModifiers::NONE, KeyCode::Up),
            Some(Action::MoveUp)
        );
        assert_eq!(
            find_action(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(Action::Quit)
        );
        assert_eq!(find_action(KeyModifiers::NONE, KeyCode::Char('z')), None);
    }

    #[test]
    fn test_every_action_has_definition() {
        for binding in key_bindings() {
            assert!(
                ACTION_DEFS.iter().any(|def| def.action == binding.action),
                "missing definition for {:?}",
                binding.action
            );
        }
        let ids: Vec<_> = ACTION_DEFS.iter().map(|def| def.id).collect();
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
        assert_eq!(action_id(Action::Refresh), "refresh");
    }

    #[test]
    fn test_hints_in_definition_order() {
        let keys: Vec<_> = hint_entries().map(|hint| hint.key).collect();
        assert_eq!(keys, vec!["↑↓", "BS", "Enter", "Tab", "Esc"]);
    }
}
