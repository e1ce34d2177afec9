//! Difficulty profiles and screen-size scaling
//!
//! A profile is an immutable bundle of physics and spawn constants. The
//! controller holds the active one and lends it to every update call.

use serde::{Deserialize, Serialize};

use crate::consts::MOBILE_BREAKPOINT;

/// Named difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Stable key used for storage and DOM data attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse a difficulty name; unknown names yield `None`
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Viewport class used to rescale profiles for small screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScreenType {
    #[default]
    Desktop,
    Mobile,
}

impl ScreenType {
    pub fn from_viewport_width(width: f32) -> Self {
        if width < MOBILE_BREAKPOINT {
            ScreenType::Mobile
        } else {
            ScreenType::Desktop
        }
    }
}

/// Physics and spawn constants for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_force: f32,
    /// Horizontal obstacle velocity (negative = leftward)
    pub obstacle_speed: f32,
    /// Vertical clearance between pipes
    pub obstacle_gap: f32,
    /// Frames between obstacle spawns
    pub spawn_interval: u32,
}

impl DifficultyProfile {
    pub const EASY: Self = Self {
        difficulty: Difficulty::Easy,
        gravity: 0.35,
        jump_force: -8.0,
        obstacle_speed: -2.0,
        obstacle_gap: 180.0,
        spawn_interval: 180,
    };

    pub const NORMAL: Self = Self {
        difficulty: Difficulty::Normal,
        gravity: 0.45,
        jump_force: -7.0,
        obstacle_speed: -3.0,
        obstacle_gap: 150.0,
        spawn_interval: 150,
    };

    pub const HARD: Self = Self {
        difficulty: Difficulty::Hard,
        gravity: 0.55,
        jump_force: -6.0,
        obstacle_speed: -4.0,
        obstacle_gap: 120.0,
        spawn_interval: 120,
    };

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::EASY,
            Difficulty::Normal => Self::NORMAL,
            Difficulty::Hard => Self::HARD,
        }
    }

    /// Look up a profile by name (`None` for unknown names)
    pub fn by_name(name: &str) -> Option<Self> {
        Difficulty::from_name(name).map(Self::for_difficulty)
    }

    pub fn name(&self) -> &'static str {
        self.difficulty.label()
    }

    /// Profile adjusted for the viewport class
    ///
    /// Mobile screens get slower scrolling, a wider gap and a longer spawn
    /// interval. The same factors apply to every profile, so the easy < normal
    /// < hard ordering holds on both screen types.
    pub fn scaled_for(&self, screen: ScreenType) -> Self {
        match screen {
            ScreenType::Desktop => *self,
            ScreenType::Mobile => Self {
                obstacle_speed: self.obstacle_speed * 0.85,
                obstacle_gap: self.obstacle_gap * 1.1,
                spawn_interval: (self.spawn_interval as f32 * 1.15).round() as u32,
                ..*self
            },
        }
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::NORMAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_table_values() {
        let p = DifficultyProfile::by_name("easy").unwrap();
        assert_eq!(p.gravity, 0.35);
        assert_eq!(p.jump_force, -8.0);
        assert_eq!(p.obstacle_speed, -2.0);
        assert_eq!(p.obstacle_gap, 180.0);
        assert_eq!(p.spawn_interval, 180);
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert!(DifficultyProfile::by_name("nightmare").is_none());
        assert!(Difficulty::from_name("").is_none());
        assert_eq!(Difficulty::from_name(" HARD "), Some(Difficulty::Hard));
    }

    #[test]
    fn test_ordering_preserved_on_every_screen() {
        for screen in [ScreenType::Desktop, ScreenType::Mobile] {
            let easy = DifficultyProfile::EASY.scaled_for(screen);
            let normal = DifficultyProfile::NORMAL.scaled_for(screen);
            let hard = DifficultyProfile::HARD.scaled_for(screen);

            assert!(easy.obstacle_speed.abs() < normal.obstacle_speed.abs());
            assert!(normal.obstacle_speed.abs() < hard.obstacle_speed.abs());
            assert!(easy.obstacle_gap > normal.obstacle_gap);
            assert!(normal.obstacle_gap > hard.obstacle_gap);
        }
    }

    #[test]
    fn test_screen_type_breakpoint() {
        assert_eq!(ScreenType::from_viewport_width(375.0), ScreenType::Mobile);
        assert_eq!(ScreenType::from_viewport_width(1024.0), ScreenType::Desktop);
    }
}
