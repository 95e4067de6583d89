/// The reset code restores both the ink and background colors.
pub const K_COLOR_RESET: u8 = 0;

/// Offset between an ink code and the matching background code.
const K_BACKGROUND_OFFSET: u8 = 10;

/// High-level enumeration of supported colors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Colors {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Colors {
    /// SGR code selecting this color for the ink (foreground).
    pub fn ink_code(&self) -> u8 {
        match self {
            Colors::Black => 30,
            Colors::Red => 31,
            Colors::Green => 32,
            Colors::Yellow => 33,
            Colors::Blue => 34,
            Colors::Magenta => 35,
            Colors::Cyan => 36,
            Colors::White => 37,
        }
    }

    /// SGR code selecting this color for the background.
    pub fn background_code(&self) -> u8 {
        self.ink_code() + K_BACKGROUND_OFFSET
    }

    /// Maps an ink or background SGR code back to its color.
    pub fn from_code(p_code: u8) -> Option<Colors> {
        let l_ink = if (40..=47).contains(&p_code) {
            p_code - K_BACKGROUND_OFFSET
        } else {
            p_code
        };
        match l_ink {
            30 => Some(Colors::Black),
            31 => Some(Colors::Red),
            32 => Some(Colors::Green),
            33 => Some(Colors::Yellow),
            34 => Some(Colors::Blue),
            35 => Some(Colors::Magenta),
            36 => Some(Colors::Cyan),
            37 => Some(Colors::White),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_is_ink_plus_ten() {
        assert_eq!(Colors::Black.ink_code(), 30);
        assert_eq!(Colors::White.ink_code(), 37);
        assert_eq!(Colors::Red.background_code(), 41);
    }

    #[test]
    fn codes_map_back_to_colors() {
        assert_eq!(Colors::from_code(36), Some(Colors::Cyan));
        assert_eq!(Colors::from_code(44), Some(Colors::Blue));
        assert_eq!(Colors::from_code(K_COLOR_RESET), None);
        assert_eq!(Colors::from_code(38), None);
    }
}
