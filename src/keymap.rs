//! Physical key to calculator input translation.

use crossterm::event::{KeyCode, KeyEvent};

use crate::engine::Input;

/// Map one raw character to a calculator input.
///
/// `x`, `X`, and `*` all mean multiplication, stored internally as `x`.
pub fn map_char(character: char) -> Option<Input> {
    match character {
        '0'..='9' | '.' | '+' | '-' | '/' => Some(Input::Char(character)),
        'x' | 'X' | '*' => Some(Input::Char('x')),
        '=' => Some(Input::Evaluate),
        _ => None,
    }
}

/// Map a terminal key event to a calculator input.
pub fn map_key(key: &KeyEvent) -> Option<Input> {
    match key.code {
        KeyCode::Char(character) => map_char(character),
        KeyCode::Enter => Some(Input::Evaluate),
        KeyCode::Backspace | KeyCode::Delete => Some(Input::Delete),
        KeyCode::Esc => Some(Input::Clear),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_maps_digits_and_operators() {
        assert_eq!(map_char('7'), Some(Input::Char('7')));
        assert_eq!(map_char('.'), Some(Input::Char('.')));
        assert_eq!(map_char('+'), Some(Input::Char('+')));
        assert_eq!(map_char('/'), Some(Input::Char('/')));
    }

    #[test]
    fn test_multiplication_aliases() {
        assert_eq!(map_char('x'), Some(Input::Char('x')));
        assert_eq!(map_char('X'), Some(Input::Char('x')));
        assert_eq!(map_char('*'), Some(Input::Char('x')));
    }

    #[test]
    fn test_maps_special_keys() {
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(map_key(&enter), Some(Input::Evaluate));

        let backspace = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(map_key(&backspace), Some(Input::Delete));

        let delete = KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(map_key(&delete), Some(Input::Delete));

        let escape = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(map_key(&escape), Some(Input::Clear));
    }

    #[test]
    fn test_ignores_everything_else() {
        assert_eq!(map_char('a'), None);
        assert_eq!(map_char('('), None);

        let function_key = KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(map_key(&function_key), None);
    }
}
